//! Seed a store with generated authors and posts.

use blog_core::{Author, BlogPost, NewAuthor, fake};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{StoreError, StoreResult};
use crate::store::BlogStore;

/// Attempts per author before giving up on finding a free username.
const USER_NAME_ATTEMPTS: usize = 5;

/// Everything inserted by [`seed`].
#[derive(Debug, Clone, Default)]
pub struct Seeded {
    pub authors: Vec<Author>,
    pub posts: Vec<BlogPost>,
}

/// Insert `authors` random authors and `posts` random posts spread across
/// them. With zero authors no posts are inserted.
pub async fn seed<R: Rng>(
    store: &dyn BlogStore,
    rng: &mut R,
    authors: usize,
    posts: usize,
) -> StoreResult<Seeded> {
    tracing::info!(authors, posts, "Seeding blog data");

    let mut seeded = Seeded::default();

    for _ in 0..authors {
        seeded.authors.push(insert_random_author(store, rng).await?);
    }

    if seeded.authors.is_empty() {
        return Ok(seeded);
    }

    for _ in 0..posts {
        let Some(author) = seeded.authors.choose(rng) else {
            break;
        };
        let post = fake::post(rng, author.id);
        seeded.posts.push(store.insert_post(&post).await?);
    }

    tracing::debug!(
        authors = seeded.authors.len(),
        posts = seeded.posts.len(),
        "Seeding complete"
    );
    Ok(seeded)
}

async fn insert_random_author<R: Rng>(store: &dyn BlogStore, rng: &mut R) -> StoreResult<Author> {
    insert_with_retries(store, || fake::author(rng)).await
}

/// Insert the author produced by `next`, drawing a fresh one while the
/// username collides. The final collision is returned as is.
async fn insert_with_retries<F>(store: &dyn BlogStore, mut next: F) -> StoreResult<Author>
where
    F: FnMut() -> NewAuthor,
{
    let mut attempt = 1;
    loop {
        match store.insert_author(&next()).await {
            Err(StoreError::UserNameTaken(name)) if attempt < USER_NAME_ATTEMPTS => {
                tracing::debug!(user_name = %name, attempt, "Generated username collided, retrying");
                attempt += 1;
            }
            result => return result,
        }
    }
}
