use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "carebook",
    about = "Score standardized clinical questionnaires and record the results",
    version
)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered questionnaire templates
    Templates,
    /// Print one template as JSON
    Show { code: String },
    /// Replay an answer file through an assessment session
    Score(ScoreArgs),
    /// List completed assessments from the audit log
    History {
        /// Only show assessments for this patient
        #[arg(long)]
        patient: Option<String>,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Template code, e.g. PHQ-9
    pub code: String,
    #[arg(long)]
    pub patient: String,
    /// JSON object mapping question id to selected option value
    #[arg(long)]
    pub answers: PathBuf,
    /// Finalize the session and append the record to the audit log
    #[arg(long)]
    pub finalize: bool,
}
