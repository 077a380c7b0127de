use crate::config::{IgnoreFilter, Settings, SeverityLevel};
use crate::reporters::{JsonReporter, TreeReporter};
use anyhow::Result;
use colored::Colorize;
use ou_core::openapi::{extract_endpoints, SpecReader};
use ou_typescript::UsageAnalyzer;
use tracing::info;

/// Outcome of one analysis run
#[derive(Debug)]
pub struct RunResult {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
    /// 0 on success; 1 when check mode fails on unused endpoints
    pub exit_code: i32,
}

/// Executes a full analysis: read the OpenAPI document, scan the source tree,
/// print the tree report, optionally write the JSON report, and compute the
/// exit code for check mode.
pub fn run(settings: &Settings) -> Result<RunResult> {
    info!(
        openapi = %settings.openapi.display(),
        src = %settings.src.display(),
        "Starting analysis"
    );

    let document = SpecReader::load(&settings.openapi)?;
    let endpoints = extract_endpoints(&document);
    println!(
        "Found {} endpoints in {}",
        endpoints.len(),
        settings.openapi.display()
    );

    let mut usages = UsageAnalyzer::new().analyze(&endpoints, &settings.src)?;

    let filter = IgnoreFilter::new(&settings.ignore)?;
    if !filter.is_empty() {
        let before = usages.len();
        usages.retain_keys(|key| !filter.matches(key));
        info!(ignored = before - usages.len(), "Applied ignore patterns");
    }

    if prints_console_report(settings.check, settings.output.is_some()) {
        println!();
        print!("{}", TreeReporter.generate(&usages));
        print!("{}", TreeReporter.summary(&usages));
    }

    if let Some(output) = &settings.output {
        JsonReporter.generate(&usages, output)?;
        println!("Report saved to {}", output.display());
    }

    let total = usages.len();
    let unused = usages.unused_keys().len();
    let used = total - unused;

    let exit_code = if settings.check && unused > 0 && settings.level == SeverityLevel::Error {
        1
    } else {
        0
    };

    if unused == 0 {
        println!("{}", "✓ All endpoints are used".green());
    } else if exit_code != 0 {
        println!("{}", format!("✗ {} unused endpoint(s)", unused).red());
    } else {
        println!("{}", format!("⚠ {} unused endpoint(s)", unused).yellow());
    }

    Ok(RunResult {
        total,
        used,
        unused,
        exit_code,
    })
}

/// The tree report goes to the console unless the run only exists to write a
/// JSON file: check mode always shows it, and so does a run with no `--output`.
fn prints_console_report(check: bool, has_output: bool) -> bool {
    check || !has_output
}
