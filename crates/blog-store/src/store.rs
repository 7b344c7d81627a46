//! The `BlogStore` trait and store configuration.
//!
//! Handlers talk to storage through `Arc<dyn BlogStore>`, so the same
//! routes run against MongoDB in production and against
//! [`MemoryStore`](crate::MemoryStore) in tests.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use blog_core::{Author, AuthorId, AuthorPatch, BlogPost, NewAuthor, NewPost, PostId, PostPatch};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::mongo::MongoStore;

/// Default connection string when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/blog-app";

/// Database name used when neither config nor URL names one.
pub const DEFAULT_DATABASE_NAME: &str = "blog-app";

/// Document storage for authors and posts.
///
/// Lookups by id return `AuthorNotFound` / `PostNotFound` when the document
/// does not exist. None of the multi-step operations built on top of this
/// trait (uniqueness checks, cascade deletes) are transactional.
#[async_trait]
pub trait BlogStore: Send + Sync + fmt::Debug {
    // ==================== Author Operations ====================

    /// List all authors.
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;

    /// Get an author by id.
    async fn get_author(&self, id: AuthorId) -> StoreResult<Author>;

    /// Find the author holding `user_name`, if any.
    async fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>>;

    /// Insert a new author.
    ///
    /// Returns `UserNameTaken` if the backend detects a duplicate username.
    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<Author>;

    /// Apply a partial update and return the updated author.
    async fn update_author(&self, id: AuthorId, patch: &AuthorPatch) -> StoreResult<Author>;

    /// Delete an author. Does not touch the author's posts.
    async fn delete_author(&self, id: AuthorId) -> StoreResult<()>;

    // ==================== Post Operations ====================

    /// List all posts.
    async fn list_posts(&self) -> StoreResult<Vec<BlogPost>>;

    /// Get a post by id.
    async fn get_post(&self, id: PostId) -> StoreResult<BlogPost>;

    /// Insert a new post. Does not check that the author exists.
    async fn insert_post(&self, post: &NewPost) -> StoreResult<BlogPost>;

    /// Apply a partial update and return the updated post.
    async fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<BlogPost>;

    /// Delete a post.
    async fn delete_post(&self, id: PostId) -> StoreResult<()>;

    /// Delete every post referencing `author_id`, returning how many went.
    async fn delete_posts_by_author(&self, author_id: AuthorId) -> StoreResult<u64>;

    // ==================== Maintenance ====================

    /// Remove every author and post. Used by test teardown.
    async fn clear(&self) -> StoreResult<()>;
}

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// MongoDB via the official driver.
    #[default]
    Mongo,
    /// Process-local maps; data is lost on exit.
    Memory,
}

impl FromStr for Backend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(StoreError::ConfigError(format!(
                "unknown store backend `{}` (expected `mongo` or `memory`)",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mongo => f.write_str("mongo"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Which backend to open.
    pub backend: Backend,
    /// MongoDB connection URL.
    pub database_url: String,
    /// Database name; falls back to the URL's default database.
    pub database_name: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Mongo,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_name: None,
        }
    }
}

impl StoreConfig {
    /// Configuration for the in-memory backend.
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `STORE_BACKEND` - Optional, `mongo` (default) or `memory`
    /// - `DATABASE_URL` - Optional, defaults to [`DEFAULT_DATABASE_URL`]
    /// - `DATABASE_NAME` - Optional, overrides the database named in the URL
    pub fn from_env() -> StoreResult<Self> {
        let backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => Backend::Mongo,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let database_name = std::env::var("DATABASE_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            backend,
            database_url,
            database_name,
        })
    }
}

/// Open the configured backend.
pub async fn open(config: &StoreConfig) -> StoreResult<Arc<dyn BlogStore>> {
    match config.backend {
        Backend::Mongo => Ok(Arc::new(MongoStore::connect(config).await?)),
        Backend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, Backend::Mongo);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.database_name.is_none());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("mongo".parse::<Backend>().unwrap(), Backend::Mongo);
        assert_eq!("MEMORY".parse::<Backend>().unwrap(), Backend::Memory);
        assert!("postgres".parse::<Backend>().is_err());
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let store = open(&StoreConfig::memory()).await.unwrap();
        assert!(store.list_authors().await.unwrap().is_empty());
    }
}
