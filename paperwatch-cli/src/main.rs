//! paperwatch CLI
//!
//! Fetches yesterday's arXiv listing, scores it against the keyword table,
//! saves a markdown summary and posts the digest to Slack.

mod settings;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use paperwatch_arxiv::{default_target_date, fetch_catchup, is_weekend, FetchConfig};
use paperwatch_core::{score_all, Digest, KeywordTable, KNOWN_ARCHIVES};
use paperwatch_slack::{SlackClient, SlackConfig};
use settings::Settings;

#[derive(Parser)]
#[command(name = "paperwatch")]
#[command(author, version, about = "paperwatch: keyword-scored arXiv digest for Slack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, score and deliver the daily digest
    Run {
        /// Path to the YAML configuration
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Slack bot token (or set SLACK_BOT_TOKEN env var)
        #[arg(long, env = "SLACK_BOT_TOKEN")]
        slack_token: Option<String>,

        /// Listing date (YYYY-MM-DD), default: yesterday
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Score and save the summary but skip the Slack post
        #[arg(long)]
        dry_run: bool,
    },

    /// Check the Slack token and channel configuration
    Status {
        /// Path to the YAML configuration
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Slack bot token (or set SLACK_BOT_TOKEN env var)
        #[arg(long, env = "SLACK_BOT_TOKEN")]
        slack_token: Option<String>,
    },

    /// List the archive identifiers the configuration accepts
    Archives,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Run {
            config,
            slack_token,
            date,
            dry_run,
        } => {
            run_digest(&config, slack_token, date, dry_run).await?;
        }
        Commands::Status { config, slack_token } => {
            check_status(&config, slack_token).await?;
        }
        Commands::Archives => {
            for archive in KNOWN_ARCHIVES {
                println!("{:10} {}", archive.id, archive.name);
            }
        }
    }

    Ok(())
}

async fn run_digest(
    config_path: &PathBuf,
    slack_token: Option<String>,
    date: Option<NaiveDate>,
    dry_run: bool,
) -> Result<()> {
    let settings = Settings::load(config_path)?;

    let token = if dry_run {
        None
    } else {
        Some(slack_token.ok_or_else(|| {
            anyhow::anyhow!("Slack token required. Set SLACK_BOT_TOKEN or use --slack-token")
        })?)
    };

    let date = date.unwrap_or_else(default_target_date);
    println!("📰 paperwatch - {} digest for {}", settings.archive, date);

    if is_weekend(date) {
        info!("no papers during the weekend");
        println!("💤 {} falls on a weekend, nothing to fetch.", date);
        return Ok(());
    }

    let keywords = KeywordTable::load_with_backup(
        &settings.keywords_file,
        &settings.backup_file,
        settings.match_mode,
    )?;
    println!("🗝️  {} keyword rules (threshold {})", keywords.len(), settings.threshold);

    let papers = fetch_catchup(&settings.archive, date, &FetchConfig::default())
        .await
        .context("fetching the catchup listing")?;
    println!("📥 {} papers listed for {}", papers.len(), settings.archive);

    let scored = score_all(papers, &keywords, settings.threshold);
    let digest = Digest::from_scored(date, scored);
    println!("⭐ {} relevant papers", digest.len());

    fs::create_dir_all(&settings.summary_dir).with_context(|| {
        format!("creating summary dir {}", settings.summary_dir.display())
    })?;
    let summary_path = settings.summary_dir.join(digest.file_name());
    fs::write(&summary_path, digest.render_markdown(settings.include_abstract))
        .with_context(|| format!("writing summary to {}", summary_path.display()))?;
    println!("📄 Summary saved to {}", summary_path.display());

    if dry_run {
        println!("🚫 Dry run, skipping the Slack post.");
        return Ok(());
    }

    // Token is present unless dry_run
    let slack = SlackClient::new(SlackConfig::new(
        token.as_deref().unwrap_or_default(),
        &settings.slack_channel,
    ))?;
    slack
        .post_message(&digest.render_mrkdwn(settings.include_abstract))
        .await
        .context("delivering the digest to Slack")?;
    println!("✅ Digest posted to {}", settings.slack_channel);

    Ok(())
}

async fn check_status(config_path: &PathBuf, slack_token: Option<String>) -> Result<()> {
    let settings = Settings::load(config_path)?;
    println!("🔌 Checking Slack access for {}...", settings.slack_channel);

    let token = slack_token.ok_or_else(|| {
        anyhow::anyhow!("Slack token required. Set SLACK_BOT_TOKEN or use --slack-token")
    })?;

    let slack = SlackClient::new(SlackConfig::new(&token, &settings.slack_channel))?;
    match slack.auth_test().await {
        Ok(Some(team)) => println!("✅ Token valid (workspace: {})", team),
        Ok(None) => println!("✅ Token valid"),
        Err(e) => {
            println!("❌ Slack check failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
