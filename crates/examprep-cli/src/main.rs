//! examprep command-line entry point

mod config;
mod logging;
mod summary;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use examprep_core::{
    ExamResources, ExamScraper, FetchOptions, KNOWN_EXAMS, OutputFormat, write_records,
};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "examprep")]
#[command(version)]
#[command(about = "Aggregates preparation resources for Indian competitive exams", long_about = None)]
struct Cli {
    /// Configuration file (skipped when missing)
    #[arg(short, long, value_name = "FILE", default_value = "examprep.toml")]
    config: PathBuf,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape resources and write them as JSON or CSV
    Fetch {
        /// Exam names, e.g. NEET "SSC CGL"
        queries: Vec<String>,

        /// Also scrape every exam in the built-in list
        #[arg(long)]
        all_known: bool,

        /// Output format; defaults to the output file extension, else json
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<OutputFormat>,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        groups: GroupArgs,
    },

    /// Print a readable summary for one exam
    Show {
        /// Exam name; prompted for when omitted
        query: Option<String>,

        #[command(flatten)]
        groups: GroupArgs,
    },

    /// List the built-in exams
    Exams,
}

#[derive(clap::Args, Clone, Copy)]
struct GroupArgs {
    /// Skip YouTube videos and playlist
    #[arg(long)]
    no_videos: bool,

    /// Skip books and free PYQs
    #[arg(long)]
    no_books: bool,
}

impl From<GroupArgs> for FetchOptions {
    fn from(args: GroupArgs) -> Self {
        FetchOptions {
            include_videos: !args.no_videos,
            include_books: !args.no_books,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);

    match cli.command {
        Commands::Exams => {
            cmd_exams();
            Ok(())
        }
        Commands::Fetch {
            queries,
            all_known,
            format,
            output,
            pretty,
            groups,
        } => {
            let config = AppConfig::load(Some(&cli.config))?;
            let queries = collect_queries(queries, all_known);
            let format = resolve_format(format, output.as_deref());
            cmd_fetch(&config, &queries, groups.into(), format, output.as_deref(), pretty).await
        }
        Commands::Show { query, groups } => {
            let config = AppConfig::load(Some(&cli.config))?;
            cmd_show(&config, query, groups.into()).await
        }
    }
}

fn cmd_exams() {
    for exam in KNOWN_EXAMS {
        println!("{:<10} {}", exam.name, exam.description);
    }
}

async fn cmd_fetch(
    config: &AppConfig,
    queries: &[String],
    options: FetchOptions,
    format: OutputFormat,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    if queries.is_empty() {
        bail!("No exam given; pass one or more names or use --all-known");
    }

    let scraper = build_scraper(config, options)?;
    let records = scraper
        .fetch_many(queries, options)
        .await
        .context("Scrape failed")?;
    report(&records);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_records(&records, format, BufWriter::new(file), pretty)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} record(s) as {} to {}", records.len(), format, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_records(&records, format, stdout.lock(), pretty)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

async fn cmd_show(config: &AppConfig, query: Option<String>, options: FetchOptions) -> Result<()> {
    let query = match query {
        Some(q) => q,
        None => prompt_query()?,
    };
    if query.trim().is_empty() {
        println!("No query entered. Exiting.");
        return Ok(());
    }

    let scraper = build_scraper(config, options)?;
    let record = scraper.fetch_exam_info(&query, options).await?;
    print!("{}", summary::Summary(&record));
    Ok(())
}

fn build_scraper(config: &AppConfig, options: FetchOptions) -> Result<ExamScraper> {
    let scraper = ExamScraper::with_config(config.scraper_config())
        .context("Failed to initialize HTTP client")?;
    if options.include_videos && !scraper.has_youtube_key() {
        warn!(
            "{} not set; YouTube videos and playlist will be skipped",
            config::YOUTUBE_KEY_VAR
        );
    }
    Ok(scraper)
}

fn prompt_query() -> Result<String> {
    print!("Enter exam name (e.g., NEET, JEE Main, CLAT, UPSC, CUET, SSC CGL): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read exam name")?;
    Ok(line.trim().to_string())
}

/// Explicit queries first, then built-in exams not already named
fn collect_queries(mut queries: Vec<String>, all_known: bool) -> Vec<String> {
    queries.retain(|q| !q.trim().is_empty());
    if all_known {
        for exam in KNOWN_EXAMS {
            if !queries.iter().any(|q| q.trim().eq_ignore_ascii_case(exam.name)) {
                queries.push(exam.name.to_string());
            }
        }
    }
    queries
}

fn resolve_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    explicit
        .or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or_default()
}

fn report(records: &[ExamResources]) {
    for record in records {
        info!(
            query = %record.query,
            resources = record.resource_count(),
            failures = record.failures.len(),
            "collected"
        );
    }
}
