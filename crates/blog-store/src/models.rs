//! MongoDB document models.
//!
//! These types map directly to stored documents. They are separate from
//! the domain types in blog-core so the on-disk field names (`_id`,
//! camelCase, `author` as an ObjectId reference) stay a storage concern.

use blog_core::{Author, AuthorId, BlogPost, NewAuthor, NewPost, PostId};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Collection holding authors.
pub const AUTHORS_COLLECTION: &str = "authors";

/// Collection holding blog posts.
pub const POSTS_COLLECTION: &str = "blogposts";

/// Document in the `authors` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl AuthorDocument {
    /// A fresh document for `author` with a newly minted id.
    pub fn from_new(author: &NewAuthor) -> Self {
        Self {
            id: ObjectId::new(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            user_name: author.user_name.clone(),
        }
    }
}

impl From<AuthorDocument> for Author {
    fn from(doc: AuthorDocument) -> Self {
        Self {
            id: AuthorId::from_object_id(doc.id),
            first_name: doc.first_name,
            last_name: doc.last_name,
            user_name: doc.user_name,
        }
    }
}

/// Document in the `blogposts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    /// Reference to `authors._id`.
    pub author: ObjectId,
    pub created: bson::DateTime,
}

impl PostDocument {
    /// A fresh document for `post` with a newly minted id.
    pub fn from_new(post: &NewPost) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: *post.author_id.as_object_id(),
            created: bson::DateTime::from_millis(post.created.timestamp_millis()),
        }
    }
}

impl TryFrom<PostDocument> for BlogPost {
    type Error = StoreError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let millis = doc.created.timestamp_millis();
        let created = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            StoreError::CorruptDocument(format!(
                "post {} has out-of-range created timestamp {}",
                doc.id, millis
            ))
        })?;

        Ok(Self {
            id: PostId::from_object_id(doc.id),
            title: doc.title,
            content: doc.content,
            author_id: AuthorId::from_object_id(doc.author),
            created,
        })
    }
}

/// Filter matching a single document by `_id`.
pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_document_field_names() {
        let doc = AuthorDocument::from_new(&NewAuthor::new("Ada", "Lovelace", "ada"));
        let raw = bson::to_document(&doc).unwrap();

        assert!(raw.contains_key("_id"));
        assert_eq!(raw.get_str("firstName").unwrap(), "Ada");
        assert_eq!(raw.get_str("lastName").unwrap(), "Lovelace");
        assert_eq!(raw.get_str("userName").unwrap(), "ada");
    }

    #[test]
    fn test_author_document_into_domain() {
        let doc = AuthorDocument::from_new(&NewAuthor::new("Ada", "Lovelace", "ada"));
        let id = doc.id;
        let author: Author = doc.into();
        assert_eq!(author.id.as_object_id(), &id);
        assert_eq!(author.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_post_document_keeps_created_millis() {
        let author_id = AuthorId::new();
        let new_post = NewPost::new("Love Coding", "Body", author_id);
        let doc = PostDocument::from_new(&new_post);

        let raw = bson::to_document(&doc).unwrap();
        assert_eq!(raw.get_object_id("author").unwrap(), *author_id.as_object_id());
        assert!(raw.get_datetime("created").is_ok());

        let post = BlogPost::try_from(doc).unwrap();
        assert_eq!(
            post.created.timestamp_millis(),
            new_post.created.timestamp_millis()
        );
        assert_eq!(post.author_id, author_id);
    }
}
