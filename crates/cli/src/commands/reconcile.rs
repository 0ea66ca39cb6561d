use std::path::Path;

use anyhow::{Context, Result};
use uncouple_core::domain::{ReconcileConfig, ReconcileReport, RunMode};
use uncouple_core::Uncoupler;

pub fn run(
    catalog: &Path,
    prefixes: &[String],
    config: ReconcileConfig,
    mode: RunMode,
) -> Result<()> {
    let mut uncoupler = Uncoupler::open(catalog)
        .with_context(|| format!("failed to open catalog {}", catalog.display()))?
        .with_config(config);

    let report = uncoupler
        .run(prefixes, mode)
        .context("reconciliation aborted, catalog left unchanged")?;

    println!("{}", summary(&report));
    Ok(())
}

fn summary(report: &ReconcileReport) -> String {
    let mut line = format!(
        "{} switched, {} without backing",
        report.promoted.len(),
        report.unresolved.len()
    );
    if !report.committed() {
        line.push_str(" (dry run, nothing written)");
    }
    line
}
