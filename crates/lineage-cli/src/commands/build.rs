//! Build and check commands

use std::path::PathBuf;

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::Args;

use crate::config::Config;
use lineage_core::{write_json, BuildOptions, EntityKind, ExportOptions, LineageGraph, ZooPhase};
use lineage_source::load_tree;

/// Where records are read from
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Zoo record directory
    #[arg(long, value_name = "DIR")]
    pub zoos: Option<PathBuf>,

    /// Panda record directory
    #[arg(long, value_name = "DIR")]
    pub pandas: Option<PathBuf>,

    /// Record file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Maximum distinct parents a child may be listed by
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_parents: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Export file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the export
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Import both record trees, zoos first, and validate the result
fn compile(source: &SourceArgs, config: &Config) -> anyhow::Result<LineageGraph> {
    let zoo_dir = source.zoos.as_ref().unwrap_or(&config.zoo_dir);
    let panda_dir = source.pandas.as_ref().unwrap_or(&config.panda_dir);
    let extension = source.extension.as_deref().unwrap_or(&config.extension);
    let max_parents = source.max_parents.unwrap_or(config.max_parents);

    let mut zoos = ZooPhase::new(BuildOptions::default().with_max_parents(max_parents));
    for record in load_tree(zoo_dir, EntityKind::Zoo, extension)? {
        zoos.import_zoo(&record)?;
    }
    let mut pandas = zoos.finish()?;

    for record in load_tree(panda_dir, EntityKind::Panda, extension)? {
        pandas.import_panda(&record)?;
    }
    Ok(pandas.finish()?)
}

pub fn run_build(args: &BuildArgs, config: &Config) -> anyhow::Result<()> {
    let graph = compile(&args.source, config)?;

    let output = args.output.as_ref().unwrap_or(&config.output);
    let options = ExportOptions {
        pretty: args.pretty || config.pretty,
    };
    let totals = write_json(&graph, output, options)
        .with_context(|| format!("failed to export {}", output.display()))?;

    eprintln!(
        "Dataset exported: {} pandas at {} zoos",
        totals.pandas, totals.zoos
    );
    Ok(())
}

pub fn run_check(args: &CheckArgs, config: &Config) -> anyhow::Result<()> {
    let graph = compile(&args.source, config)?;
    eprintln!(
        "Dataset valid: {} pandas at {} zoos",
        graph.panda_count(),
        graph.zoo_count()
    );
    Ok(())
}
