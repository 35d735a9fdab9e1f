use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use regroup_core::models::{ThemeEntry, parse_document};
use regroup_core::summary::{check_document, summarize_groups};
use regroup_core::{RegroupError, extract_all, run_regroup, run_regroup_with_rng};
use tracing::{info, warn};

use crate::cli::{CheckArgs, Cli, Commands, ExtractArgs, RebalanceArgs};

mod support;

use self::support::{emit_document, print_json, read_payloads, resolve_config};

pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => run_extract(config_path, args),
        Commands::Rebalance(args) => run_rebalance(config_path, args),
        Commands::Check(args) => run_check(config_path, args),
    }
}

/// Writes the structured error payload for core failures, then the chain.
pub(crate) fn report_failure(err: &anyhow::Error) {
    if let Some(core) = err.downcast_ref::<RegroupError>()
        && let Ok(payload) = serde_json::to_string(&core.to_payload("regroup", None))
    {
        eprintln!("{payload}");
    }
    eprintln!("error: {err:#}");
}

fn run_extract(config_path: Option<&std::path::Path>, args: ExtractArgs) -> Result<()> {
    let config = resolve_config(config_path, None, args.input.strict_ids)?;
    let payloads = read_payloads(&args.input)?;
    let extraction = extract_all(&payloads, &config.extract_options())?;
    if !extraction.rejected_ids.is_empty() {
        warn!(count = extraction.rejected_ids.len(), "rejected member ids");
    }
    let summary = summarize_groups(&extraction.groups);
    emit_document(&summary, args.output.as_deref())?;
    if let Some(path) = &args.output {
        print_json(&serde_json::json!({
            "status": "ok",
            "output_location": path.display().to_string(),
            "total_groups": summary.summary.total_groups,
            "total_members_grouped": summary.summary.total_members_grouped,
        }))?;
    }
    Ok(())
}

fn run_rebalance(config_path: Option<&std::path::Path>, args: RebalanceArgs) -> Result<()> {
    let config = resolve_config(config_path, Some(&args.sizes), args.input.strict_ids)?;
    // Fail on bad bounds before reading any input.
    config.bounds()?;
    let payloads = read_payloads(&args.input)?;
    let outcome = match args.seed {
        Some(seed) => run_regroup_with_rng(&payloads, &config, &mut StdRng::seed_from_u64(seed))?,
        None => run_regroup(&payloads, &config)?,
    };

    let report = outcome.report();
    let mut entries = outcome.entries;
    if entries.is_empty() {
        warn!("no theme survived rebalancing");
        if args.placeholder_on_empty {
            entries.push(ThemeEntry::empty_result());
        }
    }
    emit_document(&entries, args.output.as_deref())?;

    if let Some(path) = &args.output {
        let report = report.with_output_location(path.display().to_string());
        info!(
            themes = report.total_themes,
            members = report.total_members,
            "wrote theme document"
        );
        print_json(&report)?;
    }
    Ok(())
}

fn run_check(config_path: Option<&std::path::Path>, args: CheckArgs) -> Result<()> {
    let config = resolve_config(config_path, Some(&args.sizes), false)?;
    let bounds = config.bounds()?;
    let raw = std::fs::read_to_string(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let entries = parse_document(&raw)
        .with_context(|| format!("{} is not a theme document", args.document.display()))?;
    let check = check_document(&entries, bounds);
    print_json(&check)?;
    if args.enforce && !check.is_valid() {
        anyhow::bail!(
            "document check failed: {} bound violations, {} duplicate ids",
            check.violations.len(),
            check.duplicate_ids.len()
        );
    }
    Ok(())
}
