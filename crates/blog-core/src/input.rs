//! Request payloads and their validation.
//!
//! Each `*Request` type mirrors a JSON body accepted by the API. Fields are
//! optional at the serde level so that a missing field becomes a
//! [`ValidationError`] (400) instead of a deserialization failure.
//! Validation turns a request into the store input it describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AuthorId, IdParseError};

/// Reasons a request body is rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field absent, null, or blank.
    #[error("`{0}` is missing in request body")]
    MissingField(&'static str),

    /// Optional field present but blank.
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),

    /// Path id and body id disagree (or the body id is absent).
    #[error("request path id ({path}) and request body id ({body}) values must match")]
    IdMismatch { path: String, body: String },

    /// An id that is not a valid ObjectId.
    #[error(transparent)]
    InvalidId(#[from] IdParseError),
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn optional(field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        other => Ok(other),
    }
}

fn check_ids_match(path_id: &str, body_id: Option<&str>) -> Result<(), ValidationError> {
    match body_id {
        Some(body) if body == path_id => Ok(()),
        body => Err(ValidationError::IdMismatch {
            path: path_id.to_string(),
            body: body.unwrap_or_default().to_string(),
        }),
    }
}

// ============================================================================
// Authors
// ============================================================================

/// Body of `POST /authors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl CreateAuthorRequest {
    /// Check that every required field is present.
    pub fn validate(self) -> Result<NewAuthor, ValidationError> {
        Ok(NewAuthor {
            first_name: required("firstName", self.first_name)?,
            last_name: required("lastName", self.last_name)?,
            user_name: required("userName", self.user_name)?,
        })
    }
}

/// Input for inserting a new author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl NewAuthor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_name: user_name.into(),
        }
    }
}

/// Body of `PUT /authors/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl UpdateAuthorRequest {
    /// Check the body id against the path id and collect the fields to set.
    pub fn into_patch(self, path_id: &str) -> Result<AuthorPatch, ValidationError> {
        check_ids_match(path_id, self.id.as_deref())?;

        Ok(AuthorPatch {
            first_name: optional("firstName", self.first_name)?,
            last_name: optional("lastName", self.last_name)?,
            user_name: optional("userName", self.user_name)?,
        })
    }
}

/// Partial update of an author. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl AuthorPatch {
    /// True when the patch sets no fields.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.user_name.is_none()
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Body of `POST /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

impl CreatePostRequest {
    /// Check required fields and parse the author reference.
    ///
    /// Does not check that the author exists; that needs the store.
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        let title = required("title", self.title)?;
        let content = required("content", self.content)?;
        let author_id: AuthorId = required("authorId", self.author_id)?.parse()?;

        Ok(NewPost::new(title, content, author_id))
    }
}

/// Input for inserting a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
    pub created: DateTime<Utc>,
}

impl NewPost {
    /// A post created now.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: AuthorId) -> Self {
        Self::with_created(title, content, author_id, Utc::now())
    }

    /// A post with an explicit creation time (fixtures, imports).
    pub fn with_created(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: AuthorId,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
            created,
        }
    }
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdatePostRequest {
    /// Check the body id against the path id and collect the fields to set.
    pub fn into_patch(self, path_id: &str) -> Result<PostPatch, ValidationError> {
        check_ids_match(path_id, self.id.as_deref())?;

        Ok(PostPatch {
            title: optional("title", self.title)?,
            content: optional("content", self.content)?,
        })
    }
}

/// Partial update of a post. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    /// True when the patch sets no fields.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_author_valid() {
        let json = r#"{"firstName": "Ada", "lastName": "Lovelace", "userName": "ada"}"#;
        let request: CreateAuthorRequest = serde_json::from_str(json).unwrap();
        let author = request.validate().unwrap();
        assert_eq!(author, NewAuthor::new("Ada", "Lovelace", "ada"));
    }

    #[test]
    fn test_create_author_missing_field() {
        let json = r#"{"firstName": "Ada", "userName": "ada"}"#;
        let request: CreateAuthorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::MissingField("lastName")
        );
    }

    #[test]
    fn test_blank_and_null_count_as_missing() {
        let json = r#"{"firstName": "  ", "lastName": null, "userName": "ada"}"#;
        let request: CreateAuthorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::MissingField("firstName")
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = ValidationError::MissingField("title");
        assert_eq!(err.to_string(), "`title` is missing in request body");
    }

    #[test]
    fn test_update_author_requires_matching_ids() {
        let request = UpdateAuthorRequest {
            id: Some("aaa".to_string()),
            first_name: Some("New".to_string()),
            ..Default::default()
        };
        let err = request.into_patch("bbb").unwrap_err();
        assert!(matches!(err, ValidationError::IdMismatch { .. }));

        let missing_body_id = UpdateAuthorRequest::default();
        assert!(missing_body_id.into_patch("bbb").is_err());
    }

    #[test]
    fn test_update_author_patch_keeps_only_sent_fields() {
        let json = r#"{"id": "abc", "lastName": "Byron"}"#;
        let request: UpdateAuthorRequest = serde_json::from_str(json).unwrap();
        let patch = request.into_patch("abc").unwrap();
        assert_eq!(
            patch,
            AuthorPatch {
                last_name: Some("Byron".to_string()),
                ..Default::default()
            }
        );
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_update_rejects_blank_field() {
        let json = r#"{"id": "abc", "userName": ""}"#;
        let request: UpdateAuthorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.into_patch("abc").unwrap_err(),
            ValidationError::EmptyField("userName")
        );
    }

    #[test]
    fn test_create_post_valid() {
        let author_id = AuthorId::new();
        let request = CreatePostRequest {
            title: Some("Think and Grow Rich".to_string()),
            content: Some("Body".to_string()),
            author_id: Some(author_id.to_string()),
        };
        let post = request.validate().unwrap();
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.title, "Think and Grow Rich");
    }

    #[test]
    fn test_create_post_invalid_author_id() {
        let request = CreatePostRequest {
            title: Some("t".to_string()),
            content: Some("c".to_string()),
            author_id: Some("nope".to_string()),
        };
        assert!(matches!(
            request.validate().unwrap_err(),
            ValidationError::InvalidId(_)
        ));
    }

    #[test]
    fn test_create_post_missing_author_id() {
        let json = r#"{"title": "t", "content": "c"}"#;
        let request: CreatePostRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::MissingField("authorId")
        );
    }

    #[test]
    fn test_update_post_empty_patch() {
        let json = r#"{"id": "p1", "author": "ignored"}"#;
        let request: UpdatePostRequest = serde_json::from_str(json).unwrap();
        let patch = request.into_patch("p1").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_create_request_serialize_skips_none() {
        let request = CreatePostRequest {
            title: Some("t".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"title":"t"}"#);
    }
}
