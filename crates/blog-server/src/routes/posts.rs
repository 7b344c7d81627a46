//! Blog post routes.
//!
//! - GET /posts - List all posts
//! - POST /posts - Create a post for an existing author
//! - GET /posts/{id} - Fetch one post
//! - PUT /posts/{id} - Partially update a post
//! - DELETE /posts/{id} - Delete a post

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use blog_core::{Author, AuthorId, CreatePostRequest, PostId, PostList, PostView, UpdatePostRequest};
use blog_store::{BlogStore, StoreError, StoreResult};

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Look up a post's author, treating a dangling reference as absent.
async fn find_author(store: &dyn BlogStore, id: AuthorId) -> StoreResult<Option<Author>> {
    match store.get_author(id).await {
        Ok(author) => Ok(Some(author)),
        Err(StoreError::AuthorNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// GET /posts
async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<PostList>> {
    let posts = state.store().list_posts().await?;
    let authors: HashMap<AuthorId, Author> = state
        .store()
        .list_authors()
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(Json(PostList {
        posts: posts
            .iter()
            .map(|p| p.to_view(authors.get(&p.author_id)))
            .collect(),
    }))
}

/// GET /posts/{id}
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostView>> {
    let id: PostId = id.parse()?;
    let post = state.store().get_post(id).await?;
    let author = find_author(state.store(), post.author_id).await?;

    Ok(Json(post.to_view(author.as_ref())))
}

/// POST /posts
///
/// The referenced author must exist; otherwise the request is a 400.
async fn create_post(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let new_post = request.validate()?;

    let Some(author) = find_author(state.store(), new_post.author_id).await? else {
        return Err(ApiError::BadRequest("Author not found".to_string()));
    };

    let post = state.store().insert_post(&new_post).await?;

    tracing::info!(post_id = %post.id, author_id = %author.id, "Created post");

    Ok((StatusCode::CREATED, Json(post.to_view(Some(&author)))))
}

/// PUT /posts/{id}
///
/// Responds 204 with no body. Only `title` and `content` are updatable.
async fn update_post(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> ApiResult<StatusCode> {
    let patch = request.into_patch(&path_id)?;
    let id: PostId = path_id.parse()?;

    state.store().update_post(id, &patch).await?;

    tracing::info!(post_id = %id, "Updated post");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /posts/{id}
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: PostId = id.parse()?;
    state.store().delete_post(id).await?;

    tracing::info!(post_id = %id, "Deleted post");

    Ok(StatusCode::NO_CONTENT)
}

/// Build post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
