use anyhow::Result;
use clap::Parser;

use buildnest::cli::{Cli, Command};
use buildnest::commands;
use buildnest::config::Config;
use buildnest::error::BuildError;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        let code = err
            .downcast_ref::<BuildError>()
            .map(BuildError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Dispatch to subcommand
    match cli.command {
        Command::Clean => {
            let config = load_config(&cli)?;
            tracing::info!(project_dir = %cli.project_dir.display(), "Starting clean");
            commands::clean::run(&config, &cli.project_dir, cli.quiet)?;
        }
        Command::Plan(ref args) => {
            let config = load_config(&cli)?;
            tracing::info!(?args, "Starting plan");
            commands::plan::run(args, &config, &cli.project_dir)?;
        }
        Command::Completions(ref args) => {
            commands::completions::run(args);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config =
        Config::load(cli.config.as_deref(), &cli.project_dir).map_err(BuildError::from)?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buildnest={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
