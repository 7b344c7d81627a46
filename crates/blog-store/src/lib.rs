//! blog-store: Storage layer for the blog API
//!
//! This crate provides:
//! - The [`BlogStore`] trait the HTTP handlers are written against
//! - [`MongoStore`], backed by the `authors` and `blogposts` collections
//! - [`MemoryStore`], a process-local backend for tests and local runs
//! - Fixture seeding with generated data
//!
//! # Usage
//!
//! ```rust,ignore
//! use blog_store::{StoreConfig, open};
//!
//! let config = StoreConfig::from_env()?;
//! let store = open(&config).await?;
//!
//! let authors = store.list_authors().await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod schema;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use seed::{Seeded, seed};
pub use store::{Backend, BlogStore, StoreConfig, open};

// Re-export blog-core for downstream crates
pub use blog_core;
