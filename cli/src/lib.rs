//! Command-line front end for the short-link service.
//!
//! `shorten`, `update` and `delete` cover the link form; `analytics` covers
//! the click-count lookup. Every command makes exactly one client call and
//! returns the text to print.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shortlink_core::{short_code_from_url, ShortLinkClient, Transport};

#[derive(Debug, Parser)]
#[command(name = "shortlink", version, about = "Create, manage and inspect short links")]
pub struct Cli {
    /// API key; overrides DEFAULT_API_KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a short link for URL
    Shorten { url: String },
    /// Point an existing short link at a new URL
    Update {
        /// Short code or full short URL
        code: String,
        url: String,
    },
    /// Delete a short link
    Delete {
        /// Short code or full short URL
        code: String,
    },
    /// Show the click count for a short link
    Analytics {
        /// Short code or full short URL
        code: String,
    },
}

/// Accepts either a bare code or a short URL.
pub fn resolve_code(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let code = if raw.contains("://") {
        short_code_from_url(raw)
    } else {
        raw.to_string()
    };
    if code.is_empty() {
        bail!("could not determine a short code from {raw:?}");
    }
    Ok(code)
}

pub fn run<T: Transport>(cli: &Cli, client: &ShortLinkClient<T>) -> Result<String> {
    let key = cli.api_key.as_deref();
    match &cli.command {
        Command::Shorten { url } => {
            let record = client.create_short_link(url, key)?;
            let code = record.short_code();
            Ok(format!("Short URL: {}\nShort code: {code}", record.short_url))
        }
        Command::Update { code, url } => {
            let code = resolve_code(code)?;
            client.update_short_link(&code, url, key)?;
            Ok(format!("Updated {code} -> {url}"))
        }
        Command::Delete { code } => {
            let code = resolve_code(code)?;
            client.delete_short_link(&code, key)?;
            Ok(format!("Deleted {code}"))
        }
        Command::Analytics { code } => {
            let code = resolve_code(code)?;
            let record = client.get_analytics(&code, key)?;
            Ok(format!("Total clicks: {}", record.click_count))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use clap::CommandFactory;
    use shortlink_core::{ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse};

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shortlink").chain(args.iter().copied())).unwrap()
    }

    fn reply(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:3000").unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn api_key_is_global() {
        let cli = parse(&["analytics", "ab12", "--api-key", "k1"]);
        assert_eq!(cli.api_key.as_deref(), Some("k1"));
        assert!(matches!(cli.command, Command::Analytics { ref code } if code == "ab12"));
    }

    #[test]
    fn update_requires_url() {
        let result = Cli::try_parse_from(["shortlink", "update", "ab12"]);
        assert!(result.is_err());
    }

    #[test]
    fn short_urls_resolve_to_codes() {
        assert_eq!(resolve_code("ab12").unwrap(), "ab12");
        assert_eq!(resolve_code("https://m.example.dev/ab12").unwrap(), "ab12");
        assert!(resolve_code("https://m.example.dev/").is_err());
        assert!(resolve_code("  ").is_err());
    }

    #[test]
    fn shorten_prints_url_and_code() {
        let transport = |req: HttpRequest| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.header("authorization"), Some("Bearer k1"));
            reply(201, r#"{"shortUrl":"https://m.example.dev/ab12","url":"https://example.com"}"#)
        };
        let client = ShortLinkClient::with_transport(config(), transport);

        let out = run(&parse(&["--api-key", "k1", "shorten", "https://example.com"]), &client).unwrap();
        assert_eq!(out, "Short URL: https://m.example.dev/ab12\nShort code: ab12");
    }

    #[test]
    fn update_accepts_short_url_argument() {
        let paths = RefCell::new(Vec::new());
        let transport = |req: HttpRequest| {
            paths.borrow_mut().push(req.path);
            reply(204, "")
        };
        let client = ShortLinkClient::with_transport(config(), transport);

        let cli = parse(&["update", "https://m.example.dev/ab12", "https://example.org"]);
        let out = run(&cli, &client).unwrap();
        assert_eq!(out, "Updated ab12 -> https://example.org");
        assert_eq!(paths.into_inner(), vec!["http://localhost:3000/urls/ab12".to_string()]);
    }

    #[test]
    fn code_with_reserved_characters_stays_one_segment() {
        let paths = RefCell::new(Vec::new());
        let transport = |req: HttpRequest| {
            paths.borrow_mut().push(req.path);
            reply(204, "")
        };
        let client = ShortLinkClient::with_transport(config(), transport);

        run(&parse(&["delete", "ab/12?x"]), &client).unwrap();
        assert_eq!(
            paths.into_inner(),
            vec!["http://localhost:3000/urls/ab%2F12%3Fx".to_string()]
        );
    }

    #[test]
    fn analytics_prints_click_count() {
        let transport = |_: HttpRequest| reply(200, r#"{"shortCode":"ab12","clickCount":42}"#);
        let client = ShortLinkClient::with_transport(config(), transport);

        let out = run(&parse(&["analytics", "ab12"]), &client).unwrap();
        assert_eq!(out, "Total clicks: 42");
    }

    #[test]
    fn backend_detail_is_surfaced() {
        let transport = |_: HttpRequest| reply(404, r#"{"error":"Short URL not found"}"#);
        let client = ShortLinkClient::with_transport(config(), transport);

        let err = run(&parse(&["delete", "zz99"]), &client).unwrap_err();
        assert_eq!(err.to_string(), "Short URL not found");
    }

    #[test]
    fn bad_code_argument_skips_the_request() {
        let transport = |_: HttpRequest| -> Result<HttpResponse, ApiError> {
            panic!("no request expected")
        };
        let client = ShortLinkClient::with_transport(config(), transport);

        assert!(run(&parse(&["delete", "https://m.example.dev/"]), &client).is_err());
    }
}
