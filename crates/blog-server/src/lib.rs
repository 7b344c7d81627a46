//! blog-server: HTTP API server for the blog.
//!
//! This crate provides:
//! - CRUD endpoints for authors and blog posts
//! - Cascade deletion of an author's posts
//! - JSON error responses with a uniform `{ code, message }` shape
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation and propagation
//!
//! Persistence goes through the `blog_store::BlogStore` trait, so the same
//! router runs against MongoDB or the in-memory store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blog_server::{AppState, ServerConfig, build_app};
//! use blog_store::{StoreConfig, open};
//!
//! let config = ServerConfig::from_env()?;
//! let store = open(&StoreConfig::from_env()?).await?;
//! let app = build_app(AppState::new(store, config))?;
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::build_app;
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;

// Re-export dependent crates
pub use blog_core;
pub use blog_store;
