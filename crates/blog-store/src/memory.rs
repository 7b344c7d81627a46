//! In-memory store used by tests and `STORE_BACKEND=memory`.
//!
//! Documents live in ordered maps keyed by ObjectId, so listing returns them
//! roughly in insertion order, like a MongoDB collection scan. Username
//! uniqueness is checked under the same write lock as the insert.

use std::collections::BTreeMap;

use async_trait::async_trait;
use blog_core::{Author, AuthorId, AuthorPatch, BlogPost, NewAuthor, NewPost, PostId, PostPatch};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::BlogStore;

#[derive(Debug, Default)]
struct Collections {
    authors: BTreeMap<AuthorId, Author>,
    posts: BTreeMap<PostId, BlogPost>,
}

impl Collections {
    fn user_name_holder(&self, user_name: &str) -> Option<&Author> {
        self.authors.values().find(|a| a.user_name == user_name)
    }
}

/// Process-local [`BlogStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        Ok(self.inner.read().await.authors.values().cloned().collect())
    }

    async fn get_author(&self, id: AuthorId) -> StoreResult<Author> {
        self.inner
            .read()
            .await
            .authors
            .get(&id)
            .cloned()
            .ok_or(StoreError::AuthorNotFound(id))
    }

    async fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>> {
        Ok(self.inner.read().await.user_name_holder(user_name).cloned())
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<Author> {
        let mut inner = self.inner.write().await;

        if inner.user_name_holder(&author.user_name).is_some() {
            return Err(StoreError::UserNameTaken(author.user_name.clone()));
        }

        let row = Author {
            id: AuthorId::new(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            user_name: author.user_name.clone(),
        };
        inner.authors.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_author(&self, id: AuthorId, patch: &AuthorPatch) -> StoreResult<Author> {
        let mut inner = self.inner.write().await;

        if let Some(user_name) = &patch.user_name {
            if inner
                .user_name_holder(user_name)
                .is_some_and(|holder| holder.id != id)
            {
                return Err(StoreError::UserNameTaken(user_name.clone()));
            }
        }

        let author = inner
            .authors
            .get_mut(&id)
            .ok_or(StoreError::AuthorNotFound(id))?;

        if let Some(v) = &patch.first_name {
            author.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            author.last_name = v.clone();
        }
        if let Some(v) = &patch.user_name {
            author.user_name = v.clone();
        }

        Ok(author.clone())
    }

    async fn delete_author(&self, id: AuthorId) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .authors
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::AuthorNotFound(id))
    }

    async fn list_posts(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn get_post(&self, id: PostId) -> StoreResult<BlogPost> {
        self.inner
            .read()
            .await
            .posts
            .get(&id)
            .cloned()
            .ok_or(StoreError::PostNotFound(id))
    }

    async fn insert_post(&self, post: &NewPost) -> StoreResult<BlogPost> {
        let row = BlogPost {
            id: PostId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id,
            created: post.created,
        };
        self.inner.write().await.posts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<BlogPost> {
        let mut inner = self.inner.write().await;
        let post = inner
            .posts
            .get_mut(&id)
            .ok_or(StoreError::PostNotFound(id))?;

        if let Some(v) = &patch.title {
            post.title = v.clone();
        }
        if let Some(v) = &patch.content {
            post.content = v.clone();
        }

        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::PostNotFound(id))
    }

    async fn delete_posts_by_author(&self, author_id: AuthorId) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|_, p| p.author_id != author_id);
        Ok((before - inner.posts.len()) as u64)
    }

    async fn clear(&self) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.authors.clear();
        inner.posts.clear();
        Ok(())
    }
}
