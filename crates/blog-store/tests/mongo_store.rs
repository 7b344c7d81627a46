//! MongoDB-backed store tests.
//!
//! Needs a running MongoDB. Run with:
//!
//! ```bash
//! TEST_DATABASE_URL=mongodb://localhost:27017/test-blog-app \
//!     cargo test -p blog-store --features integration-tests
//! ```

#![cfg(feature = "integration-tests")]

use blog_core::{AuthorId, AuthorPatch, NewAuthor, NewPost, PostId, PostPatch};
use blog_store::{Backend, BlogStore, MongoStore, StoreConfig, StoreError};
use mongodb::bson::oid::ObjectId;

const DEFAULT_TEST_DATABASE_URL: &str = "mongodb://localhost:27017/test-blog-app";

/// Connect to a fresh, uniquely named database.
async fn connect() -> MongoStore {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());

    let config = StoreConfig {
        backend: Backend::Mongo,
        database_url,
        database_name: Some(format!("test-blog-app-{}", ObjectId::new().to_hex())),
    };

    MongoStore::connect(&config)
        .await
        .expect("connect to TEST_DATABASE_URL")
}

#[tokio::test]
async fn author_crud() {
    let store = connect().await;

    let ada = store
        .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
        .await
        .unwrap();
    assert_eq!(store.get_author(ada.id).await.unwrap(), ada);
    assert_eq!(
        store.find_author_by_user_name("ada").await.unwrap(),
        Some(ada.clone())
    );

    let patch = AuthorPatch {
        first_name: Some("Augusta".to_string()),
        ..Default::default()
    };
    let updated = store.update_author(ada.id, &patch).await.unwrap();
    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.last_name, "Lovelace");

    store.delete_author(ada.id).await.unwrap();
    assert!(matches!(
        store.get_author(ada.id).await,
        Err(StoreError::AuthorNotFound(_))
    ));

    store.drop_database().await.unwrap();
}

#[tokio::test]
async fn unique_index_rejects_duplicate_user_name() {
    let store = connect().await;

    store
        .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
        .await
        .unwrap();
    let err = store
        .insert_author(&NewAuthor::new("Other", "Person", "ada"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UserNameTaken(name) if name == "ada"));

    let grace = store
        .insert_author(&NewAuthor::new("Grace", "Hopper", "grace"))
        .await
        .unwrap();
    let patch = AuthorPatch {
        user_name: Some("ada".to_string()),
        ..Default::default()
    };
    let err = store.update_author(grace.id, &patch).await.unwrap_err();
    assert!(matches!(err, StoreError::UserNameTaken(_)));

    store.drop_database().await.unwrap();
}

#[tokio::test]
async fn post_crud_and_cascade() {
    let store = connect().await;

    let ada = store
        .insert_author(&NewAuthor::new("Ada", "Lovelace", "ada"))
        .await
        .unwrap();
    let first = store
        .insert_post(&NewPost::new("One", "First post", ada.id))
        .await
        .unwrap();
    store
        .insert_post(&NewPost::new("Two", "Second post", ada.id))
        .await
        .unwrap();

    let fetched = store.get_post(first.id).await.unwrap();
    assert_eq!(fetched.title, "One");
    assert_eq!(fetched.author_id, ada.id);
    // BSON dates keep millisecond precision.
    assert_eq!(
        fetched.created.timestamp_millis(),
        first.created.timestamp_millis()
    );

    let patch = PostPatch {
        content: Some("Rewritten".to_string()),
        ..Default::default()
    };
    let updated = store.update_post(first.id, &patch).await.unwrap();
    assert_eq!(updated.title, "One");
    assert_eq!(updated.content, "Rewritten");

    assert_eq!(store.delete_posts_by_author(ada.id).await.unwrap(), 2);
    assert!(store.list_posts().await.unwrap().is_empty());

    store.drop_database().await.unwrap();
}

#[tokio::test]
async fn missing_documents_are_not_found() {
    let store = connect().await;

    assert!(store.get_author(AuthorId::new()).await.unwrap_err().is_not_found());
    assert!(store.get_post(PostId::new()).await.unwrap_err().is_not_found());
    assert!(store.delete_post(PostId::new()).await.unwrap_err().is_not_found());
    assert!(
        store
            .update_post(PostId::new(), &PostPatch::default())
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert_eq!(store.delete_posts_by_author(AuthorId::new()).await.unwrap(), 0);

    store.drop_database().await.unwrap();
}
