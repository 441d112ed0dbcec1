use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::info;
use splitshot::request::{resolve_selection, validate_count};
use splitshot::{catalog, estimate_combination_count, search};

use crate::cli::{Cli, Commands, EstimateArgs, PatternArgs};
use crate::config::CliConfig;
use crate::table::{group_thousands, render_catalog, render_patterns};

pub fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Patterns(args) => patterns(&cli.config, &args, out),
        Commands::Estimate(args) => estimate(&cli.config, &args, out),
        Commands::Catalog => {
            writeln!(out, "{}", render_catalog(catalog()))?;
            Ok(())
        }
    }
}

fn patterns(config_path: &Path, args: &PatternArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let (mut config, request) = CliConfig::load(config_path)?.merge_pattern_args(args);
    let plan = search::plan(&request, &config.limits())?;
    info!("calculating {} combinations", plan.estimated_combinations);
    let outcome = search::run(&plan);

    if args.json {
        let json = serde_json::to_string_pretty(&outcome.patterns).context("encoding patterns")?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "Calculated {} combinations.", group_thousands(outcome.estimated_combinations))?;
        writeln!(out)?;
        writeln!(out, "{}", render_patterns(&outcome.patterns))?;
    }

    if args.save {
        config.remember(&plan.request);
        config.save(config_path)?;
    }
    Ok(())
}

fn estimate(config_path: &Path, args: &EstimateArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let request = CliConfig::load(config_path)?.merge_estimate_args(args);
    let classes = resolve_selection(&request.selection)?;
    let count = validate_count(request.desired_count)?;
    let count = estimate_combination_count(classes.len(), count)?;
    writeln!(out, "{} combinations", group_thousands(count))?;
    Ok(())
}
