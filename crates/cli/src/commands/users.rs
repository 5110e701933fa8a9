//! User operations.
//!
//! Each operation logs its result or its error. The `*_user` functions take
//! a repository so the run sequence can share one connection; the
//! subcommand handlers open and close their own.

use doc_records_core::UserId;
use doc_records_core::models::{NewUser, User, UserUpdate};
use doc_records_store::{
    DocumentStore, RepositoryError, StoreConfig, UpdateSummary, UserRepository, connection,
};
use tracing::{error, info, warn};

use super::CommandError;

/// Insert a user and log the stored record.
///
/// # Errors
///
/// Returns the repository error after logging it.
pub async fn insert_user<S: DocumentStore>(
    users: &UserRepository<'_, S>,
    user: NewUser,
) -> Result<User, RepositoryError> {
    users
        .insert(user)
        .await
        .inspect(|user| info!(id = %user.id, username = %user.username, ?user, "new user added"))
        .inspect_err(|e| error!(error = %e, "failed to add user"))
}

/// Find a user by username and log it, or log that none matched.
///
/// # Errors
///
/// Returns the repository error after logging it.
pub async fn find_user<S: DocumentStore>(
    users: &UserRepository<'_, S>,
    username: &str,
) -> Result<Option<User>, RepositoryError> {
    let found = users
        .find_by_username(username)
        .await
        .inspect_err(|e| error!(username, error = %e, "failed to find user"))?;

    match &found {
        Some(user) => info!(id = %user.id, username, ?user, "found user"),
        None => info!(username, "found user: none"),
    }
    Ok(found)
}

/// Update the first user matching `username` and log the summary.
///
/// # Errors
///
/// Returns the repository error after logging it.
pub async fn update_user<S: DocumentStore>(
    users: &UserRepository<'_, S>,
    username: &str,
    update: UserUpdate,
) -> Result<UpdateSummary, RepositoryError> {
    users
        .update_by_username(username, update)
        .await
        .inspect(|summary| {
            info!(
                username,
                matched = summary.matched,
                modified = summary.modified,
                "user updated"
            );
        })
        .inspect_err(|e| error!(username, error = %e, "failed to update user"))
}

/// Find-and-update the first user matching `username` and log the result.
///
/// # Errors
///
/// Returns the repository error after logging it.
pub async fn find_and_update_user<S: DocumentStore>(
    users: &UserRepository<'_, S>,
    username: &str,
    update: UserUpdate,
) -> Result<Option<User>, RepositoryError> {
    let updated = users
        .find_and_update_by_username(username, update)
        .await
        .inspect_err(|e| error!(username, error = %e, "failed to update user"))?;

    match &updated {
        Some(user) => info!(
            id = %user.id,
            username,
            deleted = user.is_deleted(),
            ?user,
            "user updated"
        ),
        None => warn!(username, "no user matched"),
    }
    Ok(updated)
}

/// Delete a user by ID and log the removed record.
///
/// # Errors
///
/// Returns the repository error after logging it.
pub async fn delete_user<S: DocumentStore>(
    users: &UserRepository<'_, S>,
    id: UserId,
) -> Result<Option<User>, RepositoryError> {
    let removed = users
        .delete_by_id(id)
        .await
        .inspect_err(|e| error!(%id, error = %e, "failed to delete user"))?;

    match &removed {
        Some(user) => info!(%id, ?user, "user deleted"),
        None => info!(%id, "user deleted: none"),
    }
    Ok(removed)
}

/// `records user insert`
pub async fn insert(config: &StoreConfig, user: NewUser) -> Result<(), CommandError> {
    let store = connection::connect(config).await?;
    let result = insert_user(&UserRepository::new(&store), user).await;
    connection::disconnect(store).await;
    result?;
    Ok(())
}

/// `records user find`
pub async fn find(config: &StoreConfig, username: &str) -> Result<(), CommandError> {
    let store = connection::connect(config).await?;
    let result = find_user(&UserRepository::new(&store), username).await;
    connection::disconnect(store).await;
    result?;
    Ok(())
}

/// `records user update`
pub async fn update(
    config: &StoreConfig,
    username: &str,
    update: UserUpdate,
) -> Result<(), CommandError> {
    let store = connection::connect(config).await?;
    let result = update_user(&UserRepository::new(&store), username, update).await;
    connection::disconnect(store).await;
    result?;
    Ok(())
}

/// `records user find-and-update`
pub async fn find_and_update(
    config: &StoreConfig,
    username: &str,
    update: UserUpdate,
) -> Result<(), CommandError> {
    let store = connection::connect(config).await?;
    let result = find_and_update_user(&UserRepository::new(&store), username, update).await;
    connection::disconnect(store).await;
    result?;
    Ok(())
}

/// `records user delete`
pub async fn delete(config: &StoreConfig, id: UserId) -> Result<(), CommandError> {
    let store = connection::connect(config).await?;
    let result = delete_user(&UserRepository::new(&store), id).await;
    connection::disconnect(store).await;
    result?;
    Ok(())
}
