//! LiftForm CLI — Replay recorded detector output through movement analysis.
//!
//! Usage:
//!   liftform analyze <LOG> --exercise <TYPE>   Count reps and score a session
//!   liftform risk --exercise <TYPE> k=v...     Check one frame for injury risk
//!   liftform exercises                         List supported exercise types

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liftform_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "liftform",
    about = "Repetition counting, injury-risk checks, and form scoring from pose detections",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL detection log and report reps, risk, and metrics
    Analyze {
        /// Path to the detection log (one JSON frame per line)
        path: PathBuf,

        /// Exercise performed in the recording
        #[arg(short, long)]
        exercise: String,

        /// Analysis threshold file (JSON); overrides the app config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Include per-frame reports in the output
        #[arg(long)]
        frames: bool,
    },

    /// Evaluate injury risk for a single frame of labels
    Risk {
        /// Exercise being performed
        #[arg(short, long)]
        exercise: String,

        /// Analysis threshold file (JSON); overrides the app config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Label confidences as `name=value` (e.g. `ibw=0.95 down=0.65`)
        labels: Vec<String>,
    },

    /// List supported exercise types and the labels they read
    Exercises,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load();

    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.log_json {
        logging.json = true;
    }
    liftform_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Analyze {
            path,
            exercise,
            config,
            json,
            frames,
        } => {
            let config = config.or(app_config.analysis_config);
            commands::analyze::run(path, exercise, config, json, frames)
        }
        Commands::Risk {
            exercise,
            config,
            labels,
        } => {
            let config = config.or(app_config.analysis_config);
            commands::risk::run(exercise, config, labels)
        }
        Commands::Exercises => commands::exercises::run(),
    }
}
