//! CLI entry point for the Retell MCP server.
//!
//! This binary provides the `retell-mcp` command, which serves the Retell
//! tools to an MCP host over stdin/stdout.  Logs go to stderr so they never
//! corrupt protocol frames.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retell_adapters::config::BASE_URL_VAR;
use retell_adapters::{RetellClient, RetellConfig, UndocumentedHttpClient};
use retell_mcp::McpServer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Retell AI tools for MCP hosts.
#[derive(Parser, Debug)]
#[command(
    name = "retell-mcp",
    version,
    about = "MCP server exposing the Retell AI voice-agent API as tools"
)]
struct Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "RETELL_MCP_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Override the Retell API origin.
    #[arg(long, env = "RETELL_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Serve the tools over stdin/stdout (default).
    Serve,

    /// Print the tool catalog and exit.
    Tools,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // `.env` must be loaded before parsing so clap's env fallbacks see it.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Ok(path) = &dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    let outcome = match cli.command.as_ref().unwrap_or(&Commands::Serve) {
        Commands::Serve => cmd_serve(&cli).await,
        Commands::Tools => cmd_tools(),
    };

    // The stdin reader may still be parked on a blocking read, so leave
    // without waiting for the runtime to wind down.
    match outcome {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!(error = %format!("{e:#}"), "retell-mcp failed");
            std::process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    info!(base_url = %config.base_url, "configuration loaded");

    let client = RetellClient::from_config(&config);
    let undocumented = match &config.undocumented {
        Some(credentials) => Some(UndocumentedHttpClient::new(
            config.base_url.clone(),
            credentials,
        )),
        None => {
            warn!("undocumented API credentials not set; test case definition tools will fail");
            None
        }
    };

    let server = Arc::new(McpServer::new(retell_adapters::build_adapters(
        client,
        undocumented,
    )));

    retell_mcp::serve_stdio(server, shutdown_signal())
        .await
        .context("failed to close the MCP connection")
}

/// Resolves on Ctrl-C.  If the handler cannot be installed, never resolves
/// and the server runs until input closes.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received, shutting down"),
        Err(e) => {
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Environment configuration.  The origin comes from `--base-url`, which
/// clap already falls back to `RETELL_BASE_URL` for.
fn load_config(cli: &Cli) -> Result<RetellConfig> {
    RetellConfig::from_lookup(|key| {
        if key == BASE_URL_VAR {
            cli.base_url.clone()
        } else {
            std::env::var(key).ok()
        }
    })
    .context("failed to load configuration")
}

// ---------------------------------------------------------------------------
// Subcommand: tools
// ---------------------------------------------------------------------------

fn cmd_tools() -> Result<()> {
    let catalog = retell_adapters::tool_catalog();
    let width = catalog.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &catalog {
        println!("{:<width$}  {}", tool.name, tool.description);
    }
    println!("\n{} tools", catalog.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["retell-mcp"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["retell-mcp", "tools", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Tools));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn base_url_flag_is_trimmed_into_config() {
        let cli = Cli::try_parse_from(["retell-mcp", "--base-url", "http://localhost:8080/"])
            .unwrap();
        let config = RetellConfig::from_lookup(|key| match key {
            "RETELL_API_KEY" => Some("key".into()),
            BASE_URL_VAR => cli.base_url.clone(),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
