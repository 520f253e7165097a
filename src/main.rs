use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use blockwatch::config::Config;
use blockwatch::output::terminal;
use blockwatch::pipeline;
use blockwatch::severity::lexicon::SeverityLexicon;
use blockwatch::severity::profile;
use blockwatch::severity::scorer::LexiconScorer;
use blockwatch::{dataset, status};

/// Blockwatch: crime-incident severity heatmaps.
///
/// Cleans an open-data incident export, assigns each incident type a 1-5
/// severity via text similarity against reference exemplars, and renders
/// the result as an interactive heatmap.
#[derive(Parser)]
#[command(name = "blockwatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw CSV export into the intermediate artifact
    Clean {
        /// Path to the raw CSV (overrides BLOCKWATCH_INPUT)
        #[arg(long)]
        input: Option<String>,
    },

    /// Render the severity heatmap from the cleaned artifact
    Map {
        /// Only include incidents from this year onward
        #[arg(long)]
        from_year: Option<i32>,

        /// Only include incidents up to this year
        #[arg(long)]
        to_year: Option<i32>,

        /// Drop incidents below this severity level (1-5)
        #[arg(long)]
        min_severity: Option<u8>,
    },

    /// Score a single incident description
    Score {
        /// The description to score (e.g. "BURGLARY FROM VEHICLE")
        description: String,
    },

    /// Summarize the cleaned dataset as a severity profile
    Profile,

    /// Show pipeline status (artifact freshness, row counts, paths)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockwatch=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { input } => {
            let config = Config::load()?;
            println!("Cleaning incident export...");

            let summary = pipeline::clean::run(&config, input.as_deref())?;
            terminal::display_clean_summary(&summary, &config.artifact_path);
        }

        Commands::Map {
            from_year,
            to_year,
            min_severity,
        } => {
            let config = Config::load()?;

            if let Some(level) = min_severity {
                if !(1..=5).contains(&level) {
                    anyhow::bail!("--min-severity must be between 1 and 5, got {level}");
                }
            }
            if let (Some(from), Some(to)) = (from_year, to_year) {
                if from > to {
                    anyhow::bail!("--from-year {from} is after --to-year {to}");
                }
            }

            println!("Rendering severity heatmap...");

            let options = pipeline::map::MapOptions {
                from_year,
                to_year,
                min_severity,
            };
            let summary = pipeline::map::run(&config, &options)?;
            terminal::display_map_summary(&summary);
        }

        Commands::Score { description } => {
            let scorer = LexiconScorer::new(SeverityLexicon::default());
            let assessment = scorer.assess(&description);
            terminal::display_assessment(&description, &assessment);
        }

        Commands::Profile => {
            let config = Config::load()?;
            config.require_artifact()?;

            println!("Building severity profile...");

            let incidents = dataset::artifact::read_incidents(&config.artifact_path)?;
            let scorer = LexiconScorer::new(SeverityLexicon::default());
            let profile = profile::build_profile(&incidents, &scorer)?;

            profile.display();
            println!(
                "{}",
                "Bands come from text similarity against the severity lexicon.".dimmed()
            );
        }

        Commands::Status => {
            let config = Config::load()?;
            status::show(&config)?;
        }
    }

    Ok(())
}
