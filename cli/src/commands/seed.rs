//! SEED command - Fill a server with generated authors and posts.

use anyhow::{Result, bail};
use blog_core::{AuthorView, PostView, fake};
use clap::Args;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::{CliError, HumanReadable, make_request, output};

/// Attempts per author before giving up on a free username.
const USER_NAME_ATTEMPTS: usize = 5;

/// Arguments for the seed command.
#[derive(Args)]
pub struct SeedArgs {
    /// Number of authors to create
    #[arg(long, default_value_t = 5)]
    pub authors: usize,

    /// Number of posts to create, spread across the new authors
    #[arg(long, default_value_t = 20)]
    pub posts: usize,

    /// RNG seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Everything the seed command created.
#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub authors: Vec<AuthorView>,
    pub posts: Vec<PostView>,
}

impl HumanReadable for SeedReport {
    fn print_human(&self) {
        println!("{}", "Seeding complete!".green().bold());
        println!();
        println!("  {} {}", "Authors:".cyan(), self.authors.len());
        println!("  {} {}", "Posts:".cyan(), self.posts.len());
    }
}

/// Execute the seed command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: SeedArgs,
) -> Result<()> {
    if args.posts > 0 && args.authors == 0 {
        bail!("cannot create posts without at least one author");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let authors_url = format!("{}/authors", base_url);
    let posts_url = format!("{}/posts", base_url);

    let mut report = SeedReport {
        authors: Vec::with_capacity(args.authors),
        posts: Vec::with_capacity(args.posts),
    };

    for _ in 0..args.authors {
        report
            .authors
            .push(create_author(client, &authors_url, &mut rng).await?);
    }

    for _ in 0..args.posts {
        let Some(author) = report.authors.choose(&mut rng) else {
            break;
        };
        let body = fake::post_request(&mut rng, author.id);
        let post: PostView = make_request(client.post(&posts_url).json(&body)).await?;
        report.posts.push(post);
    }

    output(&report, human)
}

/// Create one random author, retrying when the generated username is taken.
async fn create_author(
    client: &reqwest::Client,
    url: &str,
    rng: &mut StdRng,
) -> Result<AuthorView> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let body = fake::author_request(rng);
        match make_request(client.post(url).json(&body)).await {
            Ok(author) => return Ok(author),
            Err(CliError::Server { status: 400, .. }) if attempt < USER_NAME_ATTEMPTS => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
