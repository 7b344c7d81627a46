//! blog-core: domain types for the blog API
//!
//! This crate provides:
//! - `Author` and `BlogPost` entities with ObjectId-backed ids
//! - JSON projections returned by the HTTP API
//! - Request payloads and their validation
//! - Fake data generators for seeding and tests
//!
//! It has no I/O; storage lives in `blog-store` and HTTP in `blog-server`.

pub mod fake;
pub mod input;
pub mod types;

pub use input::{
    AuthorPatch, CreateAuthorRequest, CreatePostRequest, NewAuthor, NewPost, PostPatch,
    UpdateAuthorRequest, UpdatePostRequest, ValidationError,
};
pub use types::{
    Author, AuthorId, AuthorList, AuthorView, BlogPost, IdParseError, PostId, PostList, PostView,
};
