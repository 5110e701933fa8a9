//! The example run: insert, find and update one user, then disconnect.
//!
//! Every step logs its own failure and the sequence always continues. The
//! delete operation exists but is not part of the sequence.

use doc_records_core::models::{NewUser, UserUpdate};
use doc_records_core::schema::{ModelInfo, registry};
use doc_records_store::{DocumentStore, MemoryStore, StoreConfig, UserRepository, connection};
use tracing::info;

use super::CommandError;
use super::users::{find_user, insert_user, update_user};

/// Username used by every step of the example run.
pub const EXAMPLE_USERNAME: &str = "exampleUser";

/// Age written by the update step.
pub const UPDATED_AGE: f64 = 26.0;

/// The user inserted by the example run.
#[must_use]
pub fn example_user() -> NewUser {
    NewUser {
        username: EXAMPLE_USERNAME.to_owned(),
        email: "user@example.com".to_owned(),
        age: Some(25.0),
        address: Some("123 Example Street, City, Country".to_owned()),
    }
}

/// `records run`
///
/// # Errors
///
/// Returns `CommandError::Store` if the database cannot be reached. Failures
/// of individual steps are logged, not returned.
pub async fn run(config: &StoreConfig, memory: bool) -> Result<(), CommandError> {
    if memory {
        info!("using in-memory store");
        execute(MemoryStore::new()).await;
    } else {
        execute(connection::connect(config).await?).await;
    }
    Ok(())
}

/// Register models, run the sequence, then disconnect.
pub async fn execute<S: DocumentStore>(store: S) {
    register_models();
    sequence(&store).await;
    info!("all operations completed");
    connection::disconnect(store).await;
}

/// Insert → find → update, in that order, once.
pub async fn sequence<S: DocumentStore>(store: &S) {
    let users = UserRepository::new(store);

    // Each step has already logged its error; keep going regardless.
    let _ = insert_user(&users, example_user()).await;
    let _ = find_user(&users, EXAMPLE_USERNAME).await;
    let _ = update_user(&users, EXAMPLE_USERNAME, UserUpdate::age(UPDATED_AGE)).await;
}

/// `records models`
pub fn list_models() {
    for model in registry() {
        log_model(&model, "model");
    }
}

fn register_models() {
    for model in registry() {
        log_model(&model, "registered model");
    }
}

fn log_model(model: &ModelInfo, message: &'static str) {
    let references: Vec<String> = model
        .references
        .iter()
        .map(|r| {
            if r.many {
                format!("{} -> [{}]", r.path, r.model)
            } else {
                format!("{} -> {}", r.path, r.model)
            }
        })
        .collect();

    info!(
        model = model.name,
        collection = model.collection,
        required = ?model.required,
        references = ?references,
        "{message}"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use bson::oid::ObjectId;
    use bson::{Document, doc};
    use doc_records_store::{StoreError, UpdateSummary};

    use super::*;

    /// Delegates to a shared `MemoryStore` and records `shutdown`.
    struct RecordingStore {
        inner: Arc<MemoryStore>,
        shut_down: Arc<AtomicBool>,
    }

    impl DocumentStore for RecordingStore {
        fn backend(&self) -> &'static str {
            "recording"
        }

        async fn insert_one(
            &self,
            collection: &str,
            document: Document,
        ) -> Result<ObjectId, StoreError> {
            self.inner.insert_one(collection, document).await
        }

        async fn find_one(
            &self,
            collection: &str,
            filter: Document,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.find_one(collection, filter).await
        }

        async fn find_by_ids(
            &self,
            collection: &str,
            ids: Vec<ObjectId>,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.find_by_ids(collection, ids).await
        }

        async fn update_one(
            &self,
            collection: &str,
            filter: Document,
            update: Document,
        ) -> Result<UpdateSummary, StoreError> {
            self.inner.update_one(collection, filter, update).await
        }

        async fn find_one_and_update(
            &self,
            collection: &str,
            filter: Document,
            update: Document,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.find_one_and_update(collection, filter, update).await
        }

        async fn find_one_and_delete(
            &self,
            collection: &str,
            filter: Document,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.find_one_and_delete(collection, filter).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.inner.ping().await
        }

        async fn shutdown(self) {
            self.shut_down.store(true, Ordering::SeqCst);
        }
    }

    /// A store whose `exampleUser` document cannot be decoded.
    async fn corrupt_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc! { "username": EXAMPLE_USERNAME, "email": 5 })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_sequence_inserts_then_updates() {
        let store = MemoryStore::new();
        sequence(&store).await;

        let user = UserRepository::new(&store)
            .find_by_username(EXAMPLE_USERNAME)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.age, Some(UPDATED_AGE));
        assert_eq!(user.email, "user@example.com");
        assert!(!user.is_deleted());
    }

    #[tokio::test]
    async fn test_second_run_inserts_again() {
        let store = MemoryStore::new();
        sequence(&store).await;
        sequence(&store).await;

        assert_eq!(store.count("users").await, 2);
    }

    #[tokio::test]
    async fn test_failed_find_does_not_stop_update() {
        let store = corrupt_store().await;
        let users = UserRepository::new(&store);
        assert!(find_user(&users, EXAMPLE_USERNAME).await.is_err());

        sequence(&store).await;

        // Insert ran, and the update hit the first match.
        assert_eq!(store.count("users").await, 2);
        let first = store
            .find_one("users", doc! { "username": EXAMPLE_USERNAME })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.get_f64("age").unwrap(), UPDATED_AGE);
    }

    #[tokio::test]
    async fn test_execute_disconnects_after_failed_step() {
        let inner = Arc::new(corrupt_store().await);
        let shut_down = Arc::new(AtomicBool::new(false));

        execute(RecordingStore {
            inner: Arc::clone(&inner),
            shut_down: Arc::clone(&shut_down),
        })
        .await;

        assert!(shut_down.load(Ordering::SeqCst));
        assert_eq!(inner.count("users").await, 2);
    }
}
