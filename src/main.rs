// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so JSON on stdout stays clean)
// 3. Load settings and apply the command-line overrides
// 4. Dispatch to the subcommand handler and print the result
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use word_score::{
    CrawlConfig, CrawlResult, Crawler, HttpFetcher, JobManager, JobStatus, Settings,
};

/// How often the count command asks the job for its status
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins if set; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "word_score=debug"
    } else {
        "word_score=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Count {
            url,
            word,
            max_depth,
            workers,
            options,
        } => {
            options.apply(&mut settings);
            if let Some(max_depth) = max_depth {
                settings.score.max_depth = max_depth;
            }
            if let Some(workers) = workers {
                settings.score.workers = workers;
            }
            handle_count(&url, &word, &settings, options.json).await
        }
        Commands::Crawl {
            url,
            max_depth,
            options,
        } => {
            options.apply(&mut settings);
            if let Some(max_depth) = max_depth {
                settings.crawl.max_depth = max_depth;
            }
            handle_crawl(&url, &settings, options.json).await
        }
    }
}

// Handles the 'count' subcommand
//
// Submits a job and polls it the same way a web front-end would
async fn handle_count(url: &str, word: &str, settings: &Settings, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(settings.fetch.clone())?;
    let crawler = Crawler::new(
        fetcher,
        CrawlConfig {
            max_depth: settings.score.max_depth,
            max_pages: settings.crawl.max_pages,
        },
    );
    let manager = JobManager::new(crawler, settings.score.workers);

    let job_id = manager
        .submit_word_count_job(url, word)
        .await
        .context("Job rejected")?;

    let status = loop {
        let status = manager.get_job_status(job_id).await?;
        if status.is_finished() {
            manager.remove_job(job_id).await?;
            break status;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    };

    print_status(&status, word, json)?;

    match status {
        JobStatus::Success { .. } => Ok(0),
        _ => Ok(2),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(url: &str, settings: &Settings, json: bool) -> Result<i32> {
    info!(
        max_depth = settings.crawl.max_depth,
        max_pages = settings.crawl.max_pages,
        "scanning website"
    );

    let fetcher = HttpFetcher::new(settings.fetch.clone())?;
    let crawler = Crawler::new(fetcher, settings.crawl);
    let result = crawler.build_pages_set(url).await?;

    print_pages(&result, json)?;
    Ok(0)
}

// Prints the final job status either as a summary or JSON
fn print_status(status: &JobStatus, word: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    match status {
        JobStatus::Success {
            total_occurrences,
            visited_urls,
        } => {
            println!("{:<80}", "PAGES VISITED");
            println!("{}", "=".repeat(80));
            for url in visited_urls {
                println!("{}", truncate(url, 80));
            }
            println!();
            println!("📊 Summary:");
            println!("   🔤 Word: {}", word);
            println!("   📄 Pages: {}", visited_urls.len());
            println!("   🔢 Occurrences: {}", total_occurrences);
        }
        JobStatus::Error { message } => println!("❌ Job failed: {}", message),
        JobStatus::Pending => println!("⏳ Job still pending"),
    }

    Ok(())
}

// Prints the crawled pages as a table or JSON
fn print_pages(result: &CrawlResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result.urls())?);
        return Ok(());
    }

    println!("{:<6} {:<80}", "DEPTH", "URL");
    println!("{}", "=".repeat(87));
    for (page, depth) in result.entries() {
        println!("{:<6} {:<80}", depth, truncate(page.url(), 80));
    }
    println!();
    println!("📄 Crawled {} page(s)", result.len());

    Ok(())
}

// Shortens long URLs for table output
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
