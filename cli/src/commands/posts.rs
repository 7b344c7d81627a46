//! POSTS command - Manage blog posts.

use anyhow::Result;
use blog_core::{CreatePostRequest, PostList, PostView, UpdatePostRequest};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{
    Done, HumanReadable, format_timestamp, make_request, output, send_no_content, truncate,
};

/// Arguments for the posts command.
#[derive(Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Subcommand)]
pub enum PostsCommand {
    /// List all posts
    List,

    /// Show one post
    Get {
        /// Post ID
        id: String,
    },

    /// Create a post
    Create {
        /// Author ID
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        /// Post body; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
    },

    /// Update the title or content of a post
    Update {
        /// Post ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a post
    Delete {
        /// Post ID
        id: String,
    },
}

impl HumanReadable for PostView {
    fn print_human(&self) {
        println!("{}", self.title.bold());
        println!(
            "  {} {}  {} {}",
            "By:".cyan(),
            if self.author.is_empty() { "(unknown)" } else { self.author.as_str() },
            "On:".cyan(),
            format_timestamp(&self.created)
        );
        println!("  {} {}", "ID:".cyan(), self.id);
        println!();
        println!("{}", self.content);
    }
}

impl HumanReadable for PostList {
    fn print_human(&self) {
        if self.posts.is_empty() {
            println!("{}", "No posts.".dimmed());
            return;
        }

        println!("{}", format!("Posts ({})", self.posts.len()).green().bold());
        println!();
        for post in &self.posts {
            println!(
                "  {}  {:<40} {}",
                post.id.to_string().cyan(),
                truncate(&post.title, 40),
                post.author.dimmed()
            );
        }
    }
}

/// Execute the posts command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: PostsArgs,
) -> Result<()> {
    let collection = format!("{}/posts", base_url);

    match args.command {
        PostsCommand::List => {
            let list: PostList = make_request(client.get(&collection)).await?;
            output(&list, human)
        }
        PostsCommand::Get { id } => {
            let post: PostView = make_request(client.get(format!("{}/{}", collection, id))).await?;
            output(&post, human)
        }
        PostsCommand::Create {
            author,
            title,
            content,
        } => {
            let content = match content {
                Some(c) => c,
                None => read_stdin()?,
            };
            let body = CreatePostRequest {
                title: Some(title),
                content: Some(content),
                author_id: Some(author),
            };
            let post: PostView = make_request(client.post(&collection).json(&body)).await?;
            output(&post, human)
        }
        PostsCommand::Update { id, title, content } => {
            let body = UpdatePostRequest {
                id: Some(id.clone()),
                title,
                content,
            };
            send_no_content(client.put(format!("{}/{}", collection, id)).json(&body)).await?;
            output(
                &Done {
                    id,
                    status: "updated",
                },
                human,
            )
        }
        PostsCommand::Delete { id } => {
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

fn read_stdin() -> Result<String> {
    use std::io::Read;

    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    Ok(content)
}
