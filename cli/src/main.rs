//! Command-line client for the blog API.
//!
//! Commands:
//! - authors: list, get, create, update, and delete authors
//! - posts: list, get, create, update, and delete blog posts
//! - seed: fill the server with generated authors and posts
//!
//! Configuration via environment:
//! - BLOG_URL: Base URL of the blog server (default: http://localhost:8080)

mod commands;

use clap::{Parser, Subcommand};

use commands::{authors::AuthorsArgs, posts::PostsArgs, seed::SeedArgs};

/// Blog API CLI
///
/// Prints JSON by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "blog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Blog server URL
    #[arg(
        long,
        env = "BLOG_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authors
    Authors(AuthorsArgs),

    /// Manage blog posts
    Posts(PostsArgs),

    /// Create random authors and posts through the API
    Seed(SeedArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::Authors(args) => {
            commands::authors::execute(&client, base_url, cli.human, args).await
        }
        Commands::Posts(args) => commands::posts::execute(&client, base_url, cli.human, args).await,
        Commands::Seed(args) => commands::seed::execute(&client, base_url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
