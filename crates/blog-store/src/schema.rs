//! Index definitions applied when connecting.
//!
//! Creating an index that already exists with the same keys and options is
//! a no-op in MongoDB, so this runs on every connect.

use mongodb::{
    Collection, IndexModel,
    bson::doc,
    options::IndexOptions,
};

use crate::error::{StoreError, StoreResult};
use crate::models::{AuthorDocument, PostDocument};

/// Name of the unique index on `authors.userName`.
pub const USER_NAME_INDEX: &str = "userName_unique";

/// Name of the index on `blogposts.author`.
pub const POST_AUTHOR_INDEX: &str = "author_1";

/// Create the indexes the store relies on.
///
/// - unique `authors.userName`, so concurrent creates cannot both win
/// - `blogposts.author`, for the cascade delete
pub async fn ensure_indexes(
    authors: &Collection<AuthorDocument>,
    posts: &Collection<PostDocument>,
) -> StoreResult<()> {
    tracing::debug!("Ensuring collection indexes...");

    let user_name = IndexModel::builder()
        .keys(doc! { "userName": 1 })
        .options(
            IndexOptions::builder()
                .name(USER_NAME_INDEX.to_string())
                .unique(true)
                .build(),
        )
        .build();

    authors.create_index(user_name).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create userName index");
        StoreError::Database(e)
    })?;

    let author_ref = IndexModel::builder()
        .keys(doc! { "author": 1 })
        .options(
            IndexOptions::builder()
                .name(POST_AUTHOR_INDEX.to_string())
                .build(),
        )
        .build();

    posts.create_index(author_ref).await?;

    tracing::info!("Collection indexes ready");
    Ok(())
}
