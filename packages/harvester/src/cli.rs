//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{parse_date, HarvestConfig};
use crate::error::Result;
use crate::harvester::{self, RunOutcome};
use crate::layout::Layout;
use crate::term::Term;

/// Default field-mapping layout path.
const DEFAULT_LAYOUT: &str = "configs/layout.yaml";

/// Default CSV destination.
const DEFAULT_OUTPUT: &str = "document_list.csv";

/// EDINET Harvester - Download annual securities reports and extract XBRL facts to CSV.
#[derive(Parser)]
#[command(name = "edinet-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Start of the date range, YYYY-MM-DD (default: start of the current fiscal year)
    #[arg(long, global = true, env = "EDINET_FROM")]
    pub from: Option<String>,

    /// End of the date range, YYYY-MM-DD (default: today)
    #[arg(long, global = true, env = "EDINET_TO")]
    pub to: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the document listings and report how many filings match.
    Discover,

    /// Download every matching filing and write the extracted fields as CSV.
    Harvest {
        /// Field-mapping layout file
        #[arg(short, long, default_value = DEFAULT_LAYOUT)]
        layout: PathBuf,

        /// Destination CSV file (an existing file marks the run as done)
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = HarvestConfig::default();
    let term = resolve_term(cli.from.as_deref(), cli.to.as_deref())?;

    match cli.command {
        Commands::Discover => discover_command(&config, &term),
        Commands::Harvest { layout, output } => {
            harvest_command(&config, &term, &layout, &output)
        }
    }
}

/// Build the term from explicit bounds, falling back to fiscal year to date.
fn resolve_term(from: Option<&str>, to: Option<&str>) -> Result<Term> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Term::explicit(parse_date(from)?, parse_date(to)?)),
        _ => Ok(Term::current()),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the discover command.
fn discover_command(config: &HarvestConfig, term: &Term) -> Result<()> {
    println!(
        "{} listings from {} to {}",
        style("Searching").bold(),
        style(term.start).green(),
        style(term.end).green()
    );

    let pb = spinner("Querying document listings...");
    let documents = match harvester::discover(config, term) {
        Ok(documents) => documents,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    println!(
        "{} {} matching filings",
        style("Found").green().bold(),
        documents.len()
    );
    Ok(())
}

/// Execute the harvest command.
fn harvest_command(
    config: &HarvestConfig,
    term: &Term,
    layout_path: &std::path::Path,
    output: &std::path::Path,
) -> Result<()> {
    let layout = Layout::load(layout_path)?;

    println!(
        "{} filings from {} to {}",
        style("Harvesting").bold(),
        style(term.start).green(),
        style(term.end).green()
    );

    let pb = spinner("Downloading filings...");
    let outcome = match harvester::harvest(config, term, &layout, output) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    match outcome {
        RunOutcome::AlreadyComplete => {
            println!(
                "{} {} already exists, nothing to do",
                style("Skipped:").yellow().bold(),
                output.display()
            );
        }
        RunOutcome::Harvested { documents } => {
            println!(
                "{} {} documents to {}",
                style("Wrote").green().bold(),
                documents,
                output.display()
            );
        }
    }

    Ok(())
}
