//! Author routes.
//!
//! - GET /authors - List all authors
//! - POST /authors - Create an author with a unique user name
//! - GET /authors/{id} - Fetch one author
//! - PUT /authors/{id} - Partially update an author
//! - DELETE /authors/{id} - Delete an author and all of their posts

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use blog_core::{AuthorId, AuthorList, AuthorView, CreateAuthorRequest, UpdateAuthorRequest};
use blog_store::StoreError;

use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// GET /authors
async fn list_authors(State(state): State<AppState>) -> ApiResult<Json<AuthorList>> {
    let authors = state.store().list_authors().await?;

    Ok(Json(AuthorList {
        authors: authors.iter().map(|a| a.to_view()).collect(),
    }))
}

/// GET /authors/{id}
async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AuthorView>> {
    let id: AuthorId = id.parse()?;
    let author = state.store().get_author(id).await?;
    Ok(Json(author.to_view()))
}

/// POST /authors
async fn create_author(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAuthorRequest>,
) -> ApiResult<(StatusCode, Json<AuthorView>)> {
    let new_author = request.validate()?;

    if state
        .store()
        .find_author_by_user_name(&new_author.user_name)
        .await?
        .is_some()
    {
        return Err(StoreError::UserNameTaken(new_author.user_name).into());
    }

    let author = state.store().insert_author(&new_author).await?;

    tracing::info!(author_id = %author.id, user_name = %author.user_name, "Created author");

    Ok((StatusCode::CREATED, Json(author.to_view())))
}

/// PUT /authors/{id}
///
/// Responds 202 with the updated author. Only fields present in the body
/// change. An unknown id is a 404 even when the body would also be
/// rejected; a `userName` already held by a different author is a 400.
async fn update_author(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    JsonBody(request): JsonBody<UpdateAuthorRequest>,
) -> ApiResult<(StatusCode, Json<AuthorView>)> {
    let patch = request.into_patch(&path_id)?;
    let id: AuthorId = path_id.parse()?;

    state.store().get_author(id).await?;

    if let Some(user_name) = &patch.user_name {
        let holder = state.store().find_author_by_user_name(user_name).await?;
        if holder.is_some_and(|a| a.id != id) {
            return Err(StoreError::UserNameTaken(user_name.clone()).into());
        }
    }

    let author = state.store().update_author(id, &patch).await?;

    tracing::info!(author_id = %author.id, "Updated author");

    Ok((StatusCode::ACCEPTED, Json(author.to_view())))
}

/// DELETE /authors/{id}
///
/// Posts go first, then the author. The two deletes are not atomic.
async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: AuthorId = id.parse()?;

    let removed_posts = state.store().delete_posts_by_author(id).await?;
    state.store().delete_author(id).await?;

    tracing::info!(author_id = %id, removed_posts, "Deleted author");

    Ok(StatusCode::NO_CONTENT)
}

/// Build author routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::{NewAuthor, NewPost};
    use blog_store::MemoryStore;

    use super::*;
    use crate::config::ServerConfig;
    use crate::error::ApiError;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), ServerConfig::default())
    }

    fn create_body(user_name: &str) -> CreateAuthorRequest {
        CreateAuthorRequest {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            user_name: Some(user_name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let state = state();
        let (status, Json(created)) =
            create_author(State(state.clone()), JsonBody(create_body("ada")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.name, "Ada Lovelace");

        let Json(fetched) = get_author(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_user_name() {
        let state = state();
        let (status, _) = create_author(State(state.clone()), JsonBody(create_body("ada")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = create_author(State(state.clone()), JsonBody(create_body("ada")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(state.store().list_authors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_user_name_of_other_author() {
        let state = state();
        state
            .store()
            .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
            .await
            .unwrap();
        let grace = state
            .store()
            .insert_author(&NewAuthor::new("Grace", "Hopper", "grace"))
            .await
            .unwrap();

        let body = UpdateAuthorRequest {
            id: Some(grace.id.to_string()),
            user_name: Some("ada".to_string()),
            ..Default::default()
        };
        let err = update_author(State(state), Path(grace.id.to_string()), JsonBody(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Store(StoreError::UserNameTaken(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_author_is_not_found() {
        let state = state();
        state
            .store()
            .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
            .await
            .unwrap();

        let missing = AuthorId::new();
        let body = UpdateAuthorRequest {
            id: Some(missing.to_string()),
            user_name: Some("ada".to_string()),
            ..Default::default()
        };
        let err = update_author(State(state), Path(missing.to_string()), JsonBody(body))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(matches!(err, ApiError::Store(StoreError::AuthorNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_user_name() {
        let state = state();
        let ada = state
            .store()
            .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
            .await
            .unwrap();

        let body = UpdateAuthorRequest {
            id: Some(ada.id.to_string()),
            first_name: Some("Augusta".to_string()),
            user_name: Some("ada".to_string()),
            ..Default::default()
        };
        let (status, Json(view)) =
            update_author(State(state), Path(ada.id.to_string()), JsonBody(body))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(view.name, "Augusta Lovelace");
        assert_eq!(view.user_name, "ada");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_posts() {
        let state = state();
        let ada = state
            .store()
            .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
            .await
            .unwrap();
        state
            .store()
            .insert_post(&NewPost::new("Notes", "On the engine", ada.id))
            .await
            .unwrap();

        let status = delete_author(State(state.clone()), Path(ada.id.to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store().list_posts().await.unwrap().is_empty());
        assert!(state.store().list_authors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let err = get_author(State(state()), Path("not-an-id".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
