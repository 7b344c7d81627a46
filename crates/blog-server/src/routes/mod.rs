//! Route definitions for the HTTP API.

pub mod authors;
pub mod health;
pub mod posts;

use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(authors::routes())
        .merge(posts::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

/// Any unmatched path, or a known path with an unsupported method.
async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
