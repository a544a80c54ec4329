use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use javaconf::model::ConferenceRecord;
use javaconf::tool::{self, ToolRequest};
use javaconf::{fetch, parser, settings};

#[derive(Parser)]
#[command(name = "javaconf", about = "Java conference list extracted from a markdown document")]
struct Cli {
    /// Markdown document URL (overrides JAVACONF_MARKDOWN_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the list and show conferences for one year
    List {
        /// Year to show (default: current year)
        #[arg(short, long)]
        year: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Parse a local markdown file
    Parse {
        file: PathBuf,
        /// Only show this year (default: all years)
        #[arg(short, long)]
        year: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Fetch the list and count conferences per year
    Years,
    /// Read a JSON request ({"year": "2025"}) on stdin, answer with JSON on stdout
    Tool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = settings::load(cli.url)?;

    match cli.command {
        Commands::List { year, json } => {
            let client = fetch::build_client(&settings)?;
            let request = ToolRequest { year };
            let records = tool::get_conferences(&client, &settings, &request).await;
            print_records(&records, json)?;
        }
        Commands::Parse { file, year, json } => {
            let markdown = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut records = parser::parse(&markdown);
            if let Some(y) = year.as_deref() {
                let target = tool::target_year(Some(y), tool::current_year());
                records = tool::filter_by_year(records, target);
            }
            print_records(&records, json)?;
        }
        Commands::Years => {
            let client = fetch::build_client(&settings)?;
            let markdown = fetch::fetch_markdown(&client, &settings.markdown_url).await?;
            let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
            for r in parser::parse(&markdown) {
                *per_year.entry(r.year).or_default() += 1;
            }
            if per_year.is_empty() {
                println!("No conferences found.");
            }
            for (year, count) in per_year {
                println!("{}  {:>4}", year, count);
            }
        }
        Commands::Tool => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read tool request")?;
            let request = tool::parse_request(&input);
            let client = fetch::build_client(&settings)?;
            let records = tool::get_conferences(&client, &settings, &request).await;
            println!("{}", serde_json::to_string(&records)?);
            return Ok(());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn print_records(records: &[ConferenceRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No conferences found.");
        return Ok(());
    }

    println!(
        "{:>3} | {:<4} | {:<28} | {:<24} | {:<6} | {:<16} | {}",
        "#", "Year", "Conference", "Location", "Hybrid", "CFP", "Link"
    );
    println!("{}", "-".repeat(110));

    for (i, r) in records.iter().enumerate() {
        let cfp = r.cfp_status.as_deref().unwrap_or("-");
        println!(
            "{:>3} | {:<4} | {:<28} | {:<24} | {:<6} | {:<16} | {}",
            i + 1,
            r.year,
            truncate(&r.name, 28),
            truncate(&r.location, 24),
            if r.is_hybrid { "yes" } else { "no" },
            truncate(cfp, 16),
            r.link.as_deref().unwrap_or("")
        );
    }

    println!("\n{} conferences", records.len());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
