//! Placeholder data for seeding a database and for tests.
//!
//! Generators take any [`rand::Rng`] so tests can use a seeded RNG and get
//! reproducible fixtures.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::input::{CreateAuthorRequest, CreatePostRequest, NewAuthor, NewPost};
use crate::types::AuthorId;

/// Titles used for generated posts.
pub const TITLES: &[&str] = &[
    "Mind over Body",
    "I Kick Ass at Making Money",
    "I love Money and Money Loves Me",
    "Think and Grow Rich",
    "Love Coding",
];

const FIRST_NAMES: &[&str] = &[
    "Elena", "Marcus", "Priya", "Tomas", "Aiko", "Jonah", "Fatima", "Liam", "Sofia", "Kwame",
    "Ingrid", "Mateo",
];

const LAST_NAMES: &[&str] = &[
    "Granados", "Okafor", "Lindqvist", "Nakamura", "Haddad", "Brennan", "Costa", "Novak",
    "Mensah", "Delgado", "Fischer", "Rahman",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
];

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A random author with a username derived from the name.
pub fn author<R: Rng>(rng: &mut R) -> NewAuthor {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let suffix: u32 = rng.gen_range(1000..100_000);
    let user_name = format!(
        "{}{}{}",
        first.to_lowercase().chars().next().unwrap_or('x'),
        last.to_lowercase(),
        suffix
    );
    NewAuthor::new(first, last, user_name)
}

/// A random post title from [`TITLES`].
pub fn title<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, TITLES)
}

/// A lorem-style paragraph of three to six sentences.
pub fn paragraph<R: Rng>(rng: &mut R) -> String {
    let sentences = rng.gen_range(3..=6);
    (0..sentences)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(5..=12);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut s = words.join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s.push('.');
    s
}

/// A random post by `author_id`, created at some point in the past year.
pub fn post<R: Rng>(rng: &mut R, author_id: AuthorId) -> NewPost {
    let age = Duration::seconds(rng.gen_range(60..365 * 24 * 3600));
    NewPost::with_created(title(rng), paragraph(rng), author_id, Utc::now() - age)
}

/// Request body for creating a random author through the API.
pub fn author_request<R: Rng>(rng: &mut R) -> CreateAuthorRequest {
    let author = author(rng);
    CreateAuthorRequest {
        first_name: Some(author.first_name),
        last_name: Some(author.last_name),
        user_name: Some(author.user_name),
    }
}

/// Request body for creating a random post through the API.
pub fn post_request<R: Rng>(rng: &mut R, author_id: AuthorId) -> CreatePostRequest {
    CreatePostRequest {
        title: Some(title(rng).to_string()),
        content: Some(paragraph(rng)),
        author_id: Some(author_id.to_string()),
    }
}
