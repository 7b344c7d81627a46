//! AUTHORS command - Manage authors.

use anyhow::Result;
use blog_core::{AuthorList, AuthorView, CreateAuthorRequest, UpdateAuthorRequest};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{Done, HumanReadable, make_request, output, send_no_content};

/// Arguments for the authors command.
#[derive(Args)]
pub struct AuthorsArgs {
    #[command(subcommand)]
    pub command: AuthorsCommand,
}

#[derive(Subcommand)]
pub enum AuthorsCommand {
    /// List all authors
    List,

    /// Show one author
    Get {
        /// Author ID
        id: String,
    },

    /// Create an author
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        user_name: String,
    },

    /// Update some fields of an author
    Update {
        /// Author ID
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        user_name: Option<String>,
    },

    /// Delete an author and all of their posts
    Delete {
        /// Author ID
        id: String,

        /// Skip confirmation prompt (for non-interactive use)
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

impl HumanReadable for AuthorView {
    fn print_human(&self) {
        println!("{} {}", self.name.bold(), format!("@{}", self.user_name).dimmed());
        println!("  {} {}", "ID:".cyan(), self.id);
    }
}

impl HumanReadable for AuthorList {
    fn print_human(&self) {
        if self.authors.is_empty() {
            println!("{}", "No authors.".dimmed());
            return;
        }

        println!("{}", format!("Authors ({})", self.authors.len()).green().bold());
        println!();
        for author in &self.authors {
            println!(
                "  {}  {:<30} {}",
                author.id.to_string().cyan(),
                author.name,
                format!("@{}", author.user_name).dimmed()
            );
        }
    }
}

/// Execute the authors command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: AuthorsArgs,
) -> Result<()> {
    let collection = format!("{}/authors", base_url);

    match args.command {
        AuthorsCommand::List => {
            let list: AuthorList = make_request(client.get(&collection)).await?;
            output(&list, human)
        }
        AuthorsCommand::Get { id } => {
            let author: AuthorView =
                make_request(client.get(format!("{}/{}", collection, id))).await?;
            output(&author, human)
        }
        AuthorsCommand::Create {
            first_name,
            last_name,
            user_name,
        } => {
            let body = CreateAuthorRequest {
                first_name: Some(first_name),
                last_name: Some(last_name),
                user_name: Some(user_name),
            };
            let author: AuthorView = make_request(client.post(&collection).json(&body)).await?;
            output(&author, human)
        }
        AuthorsCommand::Update {
            id,
            first_name,
            last_name,
            user_name,
        } => {
            let body = UpdateAuthorRequest {
                id: Some(id.clone()),
                first_name,
                last_name,
                user_name,
            };
            let author: AuthorView =
                make_request(client.put(format!("{}/{}", collection, id)).json(&body)).await?;
            output(&author, human)
        }
        AuthorsCommand::Delete { id, yes } => {
            if human && !yes && !super::confirm(&format!("delete author {} and their posts", id))? {
                eprintln!("Aborted.");
                return Ok(());
            }

            send_no_content(client.delete(format!("{}/{}", collection, id))).await?;
            output(
                &Done {
                    id,
                    status: "deleted",
                },
                human,
            )
        }
    }
}
