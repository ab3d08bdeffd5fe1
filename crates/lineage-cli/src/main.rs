//! Lineage CLI - Compile red panda lineage records into a JSON graph

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::{build, completions};
use config::{config_file_path, Config};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(author, version, about = "Compile red panda lineage records into a JSON graph")]
pub struct Cli {
    /// Config file (default: ./lineage.toml)
    #[arg(short, long, env = "LINEAGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import, validate and export the dataset
    Build(build::BuildArgs),
    /// Import and validate the dataset without writing an export
    Check(build::CheckArgs),
    /// Manage the config file
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting lineage CLI");

    let config_path = config_file_path(cli.config.as_deref());

    match &cli.command {
        Commands::Build(args) => build::run_build(args, &Config::load(&config_path)?)?,
        Commands::Check(args) => build::run_check(args, &Config::load(&config_path)?)?,
        Commands::Config(args) => commands::config::run(args, &config_path)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn max_parents(args: &[&str]) -> Result<Option<usize>, clap::Error> {
        let cli = Cli::try_parse_from(args.iter().copied())?;
        match cli.command {
            Commands::Build(args) => Ok(args.source.max_parents),
            _ => panic!("expected the build command"),
        }
    }

    #[test]
    fn test_max_parents_flag() {
        assert_eq!(max_parents(&["lineage", "build"]).unwrap(), None);
        assert_eq!(
            max_parents(&["lineage", "build", "--max-parents", "3"]).unwrap(),
            Some(3)
        );
        assert!(max_parents(&["lineage", "build", "--max-parents", "0"]).is_err());
        assert!(max_parents(&["lineage", "build", "--max-parents", "-1"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
