//! MongoDB-backed [`BlogStore`].

use async_trait::async_trait;
use blog_core::{Author, AuthorId, AuthorPatch, BlogPost, NewAuthor, NewPost, PostId, PostPatch};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    options::{ClientOptions, ReturnDocument},
};

use crate::error::{StoreError, StoreResult, is_duplicate_key};
use crate::models::{AUTHORS_COLLECTION, AuthorDocument, POSTS_COLLECTION, PostDocument, by_id};
use crate::schema;
use crate::store::{BlogStore, DEFAULT_DATABASE_NAME, StoreConfig};

/// Store backed by two MongoDB collections.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
    authors: Collection<AuthorDocument>,
    posts: Collection<PostDocument>,
}

impl MongoStore {
    /// Connect, verify the server responds, and ensure indexes exist.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        tracing::info!("Connecting to database...");

        let options = ClientOptions::parse(&config.database_url).await?;
        let database_name = config
            .database_name
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let client = Client::with_options(options)?;
        let db = client.database(&database_name);

        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %database_name, "Connected to database");

        let store = Self::from_database(db);
        schema::ensure_indexes(&store.authors, &store.posts).await?;

        Ok(store)
    }

    /// Wrap an already-connected database handle. Does not create indexes.
    pub fn from_database(db: Database) -> Self {
        Self {
            authors: db.collection(AUTHORS_COLLECTION),
            posts: db.collection(POSTS_COLLECTION),
            db,
        }
    }

    /// Drop the whole database. Used by integration test teardown.
    pub async fn drop_database(&self) -> StoreResult<()> {
        tracing::warn!(database = %self.db.name(), "Dropping database");
        self.db.drop().await?;
        Ok(())
    }

    fn map_write_error(err: mongodb::error::Error, user_name: Option<&str>) -> StoreError {
        match user_name {
            Some(name) if is_duplicate_key(&err) => StoreError::UserNameTaken(name.to_string()),
            _ => StoreError::Database(err),
        }
    }
}

fn author_set(patch: &AuthorPatch) -> Document {
    let mut set = Document::new();
    if let Some(v) = &patch.first_name {
        set.insert("firstName", v.as_str());
    }
    if let Some(v) = &patch.last_name {
        set.insert("lastName", v.as_str());
    }
    if let Some(v) = &patch.user_name {
        set.insert("userName", v.as_str());
    }
    set
}

fn post_set(patch: &PostPatch) -> Document {
    let mut set = Document::new();
    if let Some(v) = &patch.title {
        set.insert("title", v.as_str());
    }
    if let Some(v) = &patch.content {
        set.insert("content", v.as_str());
    }
    set
}

#[async_trait]
impl BlogStore for MongoStore {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let docs: Vec<AuthorDocument> = self.authors.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Author::from).collect())
    }

    async fn get_author(&self, id: AuthorId) -> StoreResult<Author> {
        self.authors
            .find_one(by_id(id.0))
            .await?
            .map(Author::from)
            .ok_or(StoreError::AuthorNotFound(id))
    }

    async fn find_author_by_user_name(&self, user_name: &str) -> StoreResult<Option<Author>> {
        Ok(self
            .authors
            .find_one(doc! { "userName": user_name })
            .await?
            .map(Author::from))
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<Author> {
        let document = AuthorDocument::from_new(author);
        self.authors
            .insert_one(&document)
            .await
            .map_err(|e| Self::map_write_error(e, Some(&author.user_name)))?;

        Ok(document.into())
    }

    async fn update_author(&self, id: AuthorId, patch: &AuthorPatch) -> StoreResult<Author> {
        if patch.is_empty() {
            return self.get_author(id).await;
        }

        self.authors
            .find_one_and_update(by_id(id.0), doc! { "$set": author_set(patch) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| Self::map_write_error(e, patch.user_name.as_deref()))?
            .map(Author::from)
            .ok_or(StoreError::AuthorNotFound(id))
    }

    async fn delete_author(&self, id: AuthorId) -> StoreResult<()> {
        let result = self.authors.delete_one(by_id(id.0)).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::AuthorNotFound(id));
        }
        Ok(())
    }

    async fn list_posts(&self) -> StoreResult<Vec<BlogPost>> {
        let docs: Vec<PostDocument> = self.posts.find(doc! {}).await?.try_collect().await?;
        docs.into_iter().map(BlogPost::try_from).collect()
    }

    async fn get_post(&self, id: PostId) -> StoreResult<BlogPost> {
        self.posts
            .find_one(by_id(id.0))
            .await?
            .ok_or(StoreError::PostNotFound(id))?
            .try_into()
    }

    async fn insert_post(&self, post: &NewPost) -> StoreResult<BlogPost> {
        let document = PostDocument::from_new(post);
        self.posts.insert_one(&document).await?;
        document.try_into()
    }

    async fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<BlogPost> {
        if patch.is_empty() {
            return self.get_post(id).await;
        }

        self.posts
            .find_one_and_update(by_id(id.0), doc! { "$set": post_set(patch) })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StoreError::PostNotFound(id))?
            .try_into()
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<()> {
        let result = self.posts.delete_one(by_id(id.0)).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::PostNotFound(id));
        }
        Ok(())
    }

    async fn delete_posts_by_author(&self, author_id: AuthorId) -> StoreResult<u64> {
        let result = self
            .posts
            .delete_many(doc! { "author": author_id.0 })
            .await?;
        Ok(result.deleted_count)
    }

    async fn clear(&self) -> StoreResult<()> {
        self.posts.delete_many(doc! {}).await?;
        self.authors.delete_many(doc! {}).await?;
        Ok(())
    }
}
