use carebook_audit::sink::{AssessmentSink, AuditedSink, JsonLinesSink};
use carebook_cli::cli::{Cli, Command};
use carebook_cli::commands;
use carebook_cli::config::{self, CarebookConfig};
use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let load = || -> Result<CarebookConfig> {
        let mut config = config::load_or_default(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    };

    match cli.command {
        Command::InitConfig { force } => {
            if config_path.exists() && !force {
                return Err(eyre::eyre!(
                    "config already exists at {} (use --force to overwrite)",
                    config_path.display()
                ));
            }
            config::save_config(&config_path, &CarebookConfig::default())?;
            println!("{}", config_path.display());
        }
        Command::Templates => {
            let store = commands::build_store(&load()?)?;
            for summary in commands::list_templates(&store) {
                println!(
                    "{:<8} {:>3} questions  max {:>3}  {}",
                    summary.code, summary.questions, summary.max_score, summary.name
                );
            }
        }
        Command::Show { code } => {
            let store = commands::build_store(&load()?)?;
            println!("{}", commands::show_template(&store, &code)?);
        }
        Command::Score(args) => {
            let config = load()?;
            let store = commands::build_store(&config)?;
            let answers = commands::read_answers(&args.answers)?;
            let outcome = if args.finalize {
                let log = JsonLinesSink::open(&config.audit_log_path()?)?;
                let mut audited = AuditedSink::new(log, config.clinician.as_str());
                let sink: &mut dyn AssessmentSink = &mut audited;
                commands::score(&store, &args.code, &args.patient, &answers, Some(sink))?
            } else {
                commands::score(&store, &args.code, &args.patient, &answers, None)?
            };
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::History { patient } => {
            let config = load()?;
            let records = commands::history(&config.audit_log_path()?, patient.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
