// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::time::Instant;
use tracing::info;

use stride_insights::config::EngineConfig;
use stride_insights::intelligence::AnalysisFacade;
use stride_insights::logging::{self, AppLogger};
use stride_insights::models::Workout;

/// Analyze a running workout history and print a JSON report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of workouts, newest first
    #[arg(long)]
    history: String,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Report on a single workout by its index in the history
    #[arg(short, long)]
    workout: Option<usize>,

    /// Maximum heart rate used for zone distribution
    #[arg(long)]
    max_hr: Option<f64>,
}

fn load_history(path: &str) -> Result<Vec<Workout>> {
    let started = Instant::now();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read history file: {}", path))?;
    let history: Vec<Workout> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file: {}", path))?;

    AppLogger::log_history_loaded(path, history.len(), started.elapsed().as_millis() as u64);

    if let Some(pair) = history.windows(2).find(|pair| pair[0].date < pair[1].date) {
        AppLogger::log_input_warning(
            "History is not ordered newest first; windows and intervals will be skewed",
            Some(&pair[1].id),
        );
    }

    Ok(history)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_from_env()?;

    let args = Args::parse();

    let config = EngineConfig::load(args.config)?;
    let facade = AnalysisFacade::new(config);
    let history = load_history(&args.history)?;

    let output = match args.workout {
        Some(index) => {
            let workout = history.get(index).with_context(|| {
                format!(
                    "Workout index {} out of range, history has {} workouts",
                    index,
                    history.len()
                )
            })?;
            info!(workout.id = %workout.id, "Generating workout report");
            serde_json::to_string_pretty(&facade.workout_report(workout, args.max_hr))?
        }
        None => {
            info!(workouts = history.len(), "Generating history report");
            let report = facade.history_report_async(history).await?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}
