//! Core data types for the blog API.
//!
//! Authors and blog posts are stored as documents keyed by a MongoDB
//! `ObjectId`. The id newtypes below keep author ids and post ids apart
//! and render as 24-character hex strings on the wire.
//!
//! The `*View` types are the JSON projections returned by the HTTP API.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Error type for parsing a document id from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id `{0}`: expected 24 hex characters")]
pub struct IdParseError(pub String);

macro_rules! object_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub ObjectId);

        impl $name {
            /// Creates a fresh id.
            #[must_use]
            pub fn new() -> Self {
                Self(ObjectId::new())
            }

            /// Wraps an existing ObjectId.
            #[must_use]
            pub const fn from_object_id(oid: ObjectId) -> Self {
                Self(oid)
            }

            /// Returns the inner ObjectId.
            #[must_use]
            pub const fn as_object_id(&self) -> &ObjectId {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ObjectId::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| IdParseError(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

object_id_type! {
    /// Unique identifier for an author document.
    AuthorId
}

object_id_type! {
    /// Unique identifier for a blog post document.
    PostId
}

// ============================================================================
// Entities
// ============================================================================

/// A blog contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    /// Intended to be unique across authors.
    pub user_name: String,
}

impl Author {
    /// Display name: first and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// JSON projection returned by the API.
    #[must_use]
    pub fn to_view(&self) -> AuthorView {
        AuthorView {
            id: self.id,
            name: self.full_name(),
            user_name: self.user_name.clone(),
        }
    }
}

/// A content record referencing an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// JSON projection returned by the API.
    ///
    /// `author` is the referenced author when it still exists. A post whose
    /// author is gone renders with an empty author name.
    #[must_use]
    pub fn to_view(&self, author: Option<&Author>) -> PostView {
        PostView {
            id: self.id,
            author: author.map(Author::full_name).unwrap_or_default(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created,
        }
    }
}

// ============================================================================
// Wire Projections
// ============================================================================

/// Author as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    #[serde(rename = "_id")]
    pub id: AuthorId,
    pub name: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}

/// Blog post as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// Response body for `GET /authors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorList {
    pub authors: Vec<AuthorView>,
}

/// Response body for `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<PostView>,
}
