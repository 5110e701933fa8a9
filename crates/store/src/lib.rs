//! Doc Records Store - Document store access.
//!
//! # Backends
//!
//! - [`mongo::MongoStore`] - MongoDB through the official driver
//! - [`memory::MemoryStore`] - In-process collections for tests and dry runs
//!
//! Both implement [`DocumentStore`]; repositories are generic over it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use doc_records_store::{StoreConfig, UserRepository, connection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::from_env()?;
//! let store = connection::connect(&config).await?;
//!
//! let users = UserRepository::new(&store);
//! let user = users.find_by_username("exampleUser").await?;
//!
//! connection::disconnect(store).await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod connection;
pub mod memory;
pub mod mongo;
pub mod repositories;

pub use backend::{DocumentStore, StoreError, UpdateSummary};
pub use config::{ConfigError, StoreConfig};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use repositories::{
    CommentRepository, OrderRepository, PostRepository, ProductRepository, RepositoryError,
    UserRepository,
};
