use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use twittquilibrium::config::{parse_handle_list, Config};
use twittquilibrium::Engine;

/// Twittquilibrium: unfollow everyone who doesn't follow you back.
///
/// Followers, verified accounts and whitelisted handles are kept.
#[derive(Parser)]
#[command(name = "twittquilibrium", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unfollow every followed account that is not a follower, verified or kept
    Clean {
        /// Handle to keep following regardless (repeatable, or comma-separated)
        #[arg(long = "keep", value_name = "HANDLE")]
        keep: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("twittquilibrium=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { keep } => {
            let config = Config::load()?;
            config.require_credentials()?;

            let mut engine = Engine::with_api_url(config.credentials(), &config.api_url)?;
            let whitelist = config
                .keep
                .iter()
                .cloned()
                .chain(keep.iter().flat_map(|k| parse_handle_list(k)));
            for handle in whitelist {
                info!(handle = handle.as_str(), "Keeping whitelisted account");
                engine.keep_following(&handle);
            }

            let report = engine.clean().await?;

            eprintln!();
            eprintln!("{}", "=== Follow equilibrium reached ===".bold());
            eprintln!("  Followed:   {}", report.followed);
            eprintln!("  Followers:  {}", report.followers);
            eprintln!("  Verified:   {}", report.verified);
            eprintln!("  Kept:       {}", report.kept.to_string().green());
            eprintln!(
                "  Unfollowed: {}",
                report.unfollowed.len().to_string().red()
            );
        }
    }

    Ok(())
}
