//! CLI binary for ResourceHub.

use anyhow::Context;
use clap::{Parser, Subcommand};
use hub_search::{
    AggregatedResults, Category, CategoryLimits, EnabledCategories, RepoResult, ResultRef,
    SearchQuery, SourceStatus, VideoResult,
};
use resourcehub::{HubConfig, UsageLedger};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ResourceHub: discover learning resources across GitHub, the web and YouTube.
#[derive(Parser)]
#[command(name = "resourcehub", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search every enabled category for a topic.
    Search {
        /// What you would like to learn.
        query: String,
        /// Results per category (1-10).
        #[arg(short, long)]
        limit: Option<usize>,
        /// Comma-separated categories: video, article, repo.
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
        /// Print the full result set as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the most-starred repositories.
    Trending {
        /// Number of repositories (1-10).
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Show the most-viewed videos for a topic.
    Videos {
        /// Topic to look up.
        topic: String,
        /// Number of videos (1-10).
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Show today's API request usage.
    Usage,

    /// Write a default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resourcehub=info,hub_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(HubConfig::default_config_path);

    if let Command::InitConfig { force } = cli.command {
        return init_config(&config_path, force);
    }

    let mut config = HubConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.apply_env_overrides();

    match cli.command {
        Command::Search {
            query,
            limit,
            only,
            json,
        } => run_search(&config, query, limit, &only, json).await,
        Command::Trending { limit } => {
            let search_config = config.to_search_config()?;
            let repos = hub_search::trending_repositories(limit, &search_config).await;
            charge(&config, 1)?;
            if repos.is_empty() {
                println!("No trending repositories found.");
            }
            for repo in &repos {
                print_repo(repo);
            }
            Ok(())
        }
        Command::Videos { topic, limit } => {
            let search_config = config.to_search_config()?;
            let videos = hub_search::popular_videos(&topic, limit, &search_config).await;
            if !topic.trim().is_empty() {
                charge(&config, 1)?;
            }
            if videos.is_empty() {
                println!("No videos found for \"{topic}\".");
            }
            for video in &videos {
                print_video(video);
            }
            Ok(())
        }
        Command::Usage => {
            let path = config.ledger_path();
            let mut ledger =
                UsageLedger::load_or_new(&path, config.usage.daily_budget, chrono::Utc::now())?;
            ledger.reset_if_elapsed(chrono::Utc::now());
            println!(
                "Used {} / {} requests (resets {})",
                ledger.used,
                ledger.daily_budget,
                ledger.resets_at().format("%Y-%m-%d %H:%M UTC")
            );
            if ledger.is_low() {
                println!("Warning: approaching the daily request budget.");
            }
            Ok(())
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

async fn run_search(
    config: &HubConfig,
    query: String,
    limit: Option<usize>,
    only: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let search_config = config.to_search_config()?;

    let enabled = if only.is_empty() {
        config.enabled_categories()
    } else {
        let categories = only
            .iter()
            .map(|name| {
                Category::parse(name).with_context(|| format!("unknown category: {name}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        EnabledCategories::only(&categories)
    };

    let limits = limit.map(CategoryLimits::uniform).unwrap_or_else(|| config.limits());
    let query = SearchQuery::new(query, 0).with_limits(limits);

    let path = config.ledger_path();
    let now = chrono::Utc::now();
    let ledger = UsageLedger::load_or_new(&path, config.usage.daily_budget, now)?;
    let (results, ledger) =
        resourcehub::run_query(&query, enabled, &search_config, ledger, now).await;
    ledger.save(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }
    Ok(())
}

fn init_config(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    HubConfig::default().save_to_file(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn charge(config: &HubConfig, units: u64) -> anyhow::Result<()> {
    let path = config.ledger_path();
    let now = chrono::Utc::now();
    let mut ledger = UsageLedger::load_or_new(&path, config.usage.daily_budget, now)?;
    ledger.reset_if_elapsed(now);
    ledger.record(units);
    ledger.save(&path)?;
    Ok(())
}

fn print_results(results: &AggregatedResults) {
    for report in &results.reports {
        if let SourceStatus::Failed { reason } | SourceStatus::Skipped { reason } =
            &report.status
        {
            eprintln!("warning: {} search unavailable: {reason}", report.category);
        }
    }

    if results.combined.is_empty() {
        println!("No results found. Try a different search term.");
        return;
    }

    for item in results.combined_records() {
        match item {
            ResultRef::Video(video) => print_video(video),
            ResultRef::Article(article) => {
                println!("[article] {}", article.title);
                println!("    {}  ({})", article.link, article.display_link);
                if !article.snippet.is_empty() {
                    println!("    {}", article.snippet);
                }
                println!("    relevance {:.3}", article.relevance);
            }
            ResultRef::Repo(repo) => print_repo(repo),
        }
    }
}

fn print_video(video: &VideoResult) {
    let published = video.published_at.split('T').next().unwrap_or_default();
    println!("[video] {}", video.title);
    println!("    {}  ({}, {})", video.url, video.channel, published);
    if !video.description.is_empty() {
        println!("    {}", truncate(&video.description, 150));
    }
}

fn print_repo(repo: &RepoResult) {
    println!("[repo] {}/{}  ★ {}", repo.owner, repo.name, repo.stars);
    println!("    {}  ({})", repo.url, repo.language);
    if !repo.description.is_empty() {
        println!("    {}", repo.description);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
