//! dinelog - restaurant visit tracker client
//!
//! ```sh
//! dinelog add --name "Pho 99" --location "5th Ave" --dish "Rare beef pho" --rating 4
//! dinelog list
//! dinelog recommend
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dinelog_cli::client::DEFAULT_SERVER;
use dinelog_cli::{render, TrackerState, VisitClient};
use dinelog_common::config::TomlConfig;
use dinelog_common::{time, VisitDraft};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for dinelog
#[derive(Parser, Debug)]
#[command(name = "dinelog")]
#[command(about = "Track restaurant visits and get revisit recommendations")]
#[command(version)]
struct Args {
    /// Visit service API base URL
    #[arg(short, long, default_value = DEFAULT_SERVER, env = "DINELOG_SERVER")]
    server: String,

    /// TOML file with logging and scoring settings
    #[arg(short, long, env = "DINELOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a visit
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// What was ordered
        #[arg(long)]
        dish: String,
        /// 1 to 5
        #[arg(long, default_value_t = 5.0)]
        rating: f64,
        /// Visit date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show previous visits, newest first
    List,
    /// Suggest restaurants to revisit
    Recommend {
        /// Score as of this date instead of now
        #[arg(long)]
        at: Option<NaiveDate>,
        /// Print picks as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = TomlConfig::load(args.config.as_deref());
    let log_level = TomlConfig::log_level_of(&loaded);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dinelog_cli={0},dinelog_common={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TomlConfig::or_warn_default(loaded);

    if let Err(e) = run(args, &config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args, config: &TomlConfig) -> Result<()> {
    let client = VisitClient::new(args.server);
    debug!("Using visit service at {}", client.base_url());

    let today = time::today();
    let state = TrackerState::new(today);

    match args.command {
        Command::Add {
            name,
            location,
            dish,
            rating,
            date,
        } => {
            let state = state.set_draft(VisitDraft {
                name,
                location,
                dish,
                rating,
                date: date.unwrap_or(today),
            });

            let saved = client
                .submit_visit(&state.draft)
                .await
                .context("Failed to save visit")?;
            let state = state.record_saved(saved, today);

            println!("Saved:\n{}", render::visit_card(&state.visits[0]));
        }
        Command::List => {
            let visits = client
                .list_visits()
                .await
                .context("Failed to load visits")?;
            let state = state.loaded(visits);

            println!("{}", render::visit_list(&state.visits));
        }
        Command::Recommend { at, json } => {
            let visits = client
                .list_visits()
                .await
                .context("Failed to load visits")?;
            let now = at.map(time::start_of_day).unwrap_or_else(time::now);
            let state = state.loaded(visits).refresh_recommendation(now, &config.scoring);

            if let Some(recommendation) = state.recommendation {
                if json {
                    println!("{}", serde_json::to_string_pretty(&recommendation)?);
                } else {
                    println!("{}", recommendation);
                }
            }
        }
    }

    Ok(())
}
