use anyhow::{Context, Result};
use ou_core::models::{CallSite, UsageMap};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON report generator
pub struct JsonReporter;

/// Machine-readable report written by `--output`
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub generated_at: String,
    pub endpoints: Vec<EndpointReport>,
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct EndpointReport {
    pub method: String,
    pub path: String,
    pub usages: Vec<CallSite>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
}

impl JsonReporter {
    /// Builds the report structure, endpoints sorted alphabetically by key
    pub fn build(&self, usages: &UsageMap) -> UsageReport {
        let endpoints: Vec<EndpointReport> = usages
            .sorted_entries()
            .into_iter()
            .map(|(key, sites)| {
                let (method, path) = key.split_once(' ').unwrap_or((key, ""));
                EndpointReport {
                    method: method.to_string(),
                    path: path.to_string(),
                    usages: sites.to_vec(),
                }
            })
            .collect();

        let total = usages.len();
        let unused = usages.unused_keys().len();

        UsageReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            endpoints,
            summary: ReportSummary {
                total,
                used: total - unused,
                unused,
            },
        }
    }

    /// Writes the pretty-printed report, creating parent directories as
    /// needed
    pub fn generate(&self, usages: &UsageMap, output_path: &Path) -> Result<()> {
        let report = self.build(usages);
        let json_string = serde_json::to_string_pretty(&report)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(output_path, json_string)
            .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
        Ok(())
    }
}
