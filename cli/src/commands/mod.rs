//! Command implementations for the blog CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod authors;
pub mod posts;
pub mod seed;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build the HTTP client used by every command.
pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("blog-cli/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Confirmation printed for requests that answer 204 No Content.
#[derive(Debug, Serialize)]
pub struct Done {
    pub id: String,
    pub status: &'static str,
}

impl HumanReadable for Done {
    fn print_human(&self) {
        use colored::Colorize;
        println!("{} {}", self.status.green().bold(), self.id);
    }
}

/// Send a request and decode the JSON body of a successful response.
pub async fn make_request<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json::<T>().await?)
}

/// Send a request whose successful response carries no body.
pub async fn send_no_content(request: reqwest::RequestBuilder) -> Result<(), CliError> {
    check_status(request.send().await?).await?;
    Ok(())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `message` out of a `{ code, message }` error body, else the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Ask for a y/N confirmation on stderr.
pub fn confirm(action: &str) -> Result<bool> {
    use colored::Colorize;
    use std::io::Write;

    eprint!("{} Are you sure you want to {}? [y/N] ", "Warning:".yellow().bold(), action);
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        let body = r#"{"code":"BAD_REQUEST","message":"That username is already taken"}"#;
        assert_eq!(error_message(body), "That username is already taken");
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer sentence", 10), "a much ...");
    }
}
