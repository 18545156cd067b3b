//! term-poster CLI - posts a random glossary term to X/Twitter.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use term_poster::{
    AppConfig, FixedOffset, MessageComposer, MicroCmsClient, OffsetSelector, Publisher,
    RandomOffset, RunMode, Runner, TwitterClient,
};

/// Post a random term from the microCMS glossary to X/Twitter.
#[derive(Parser)]
#[command(name = "term-poster")]
#[command(about = "Posts a random glossary term to X/Twitter")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a random term and publish it (default)
    Post {
        /// Use this offset instead of a random one
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Fetch and compose without publishing
    Preview {
        /// Use this offset instead of a random one
        #[arg(long)]
        offset: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal in CI and containers.
    dotenvy::dotenv().ok();

    init_tracing(cli.verbose, cli.json_logs);

    let (mode, offset) = match cli.command {
        None => (RunMode::Publish, None),
        Some(Commands::Post { offset }) => (RunMode::Publish, offset),
        Some(Commands::Preview { offset }) => (RunMode::DryRun, offset),
    };

    if let Err(e) = run(mode, offset).await {
        tracing::error!(error = %e, "An error occurred");
        return Err(e);
    }

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("term_poster=debug,info")
        } else {
            EnvFilter::new("term_poster=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(filter)
        .init();
}

async fn run(mode: RunMode, offset: Option<u64>) -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let store = MicroCmsClient::new(config.cms.clone())?;

    let twitter = match mode {
        RunMode::Publish => Some(TwitterClient::with_api_base(
            config.twitter_credentials()?.clone(),
            &config.twitter_api_base,
            config.timeout,
        )?),
        RunMode::DryRun => None,
    };
    let publisher = twitter.as_ref().map(|t| t as &dyn Publisher);

    let mut selector: Box<dyn OffsetSelector> = match offset {
        Some(offset) => Box::new(FixedOffset(offset)),
        None => Box::new(RandomOffset::from_entropy()),
    };

    let composer = MessageComposer::new();
    let max_length = composer.max_length();

    let runner = Runner::new(&store, publisher, composer, &config.site_url);
    let report = runner.run(selector.as_mut(), mode).await?;

    match report.tweet {
        Some(tweet) => {
            println!("Posted {} ({}): {}", report.term.title, report.term.slug, tweet.id);
        }
        None => {
            println!("{}", report.message.text);
            println!(
                "\n({} / {} chars{})",
                report.message.len(),
                max_length,
                if report.message.truncated {
                    ", truncated"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}
