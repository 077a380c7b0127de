use crate::bindings::client_bindings;
use crate::parser::SourceParser;
use crate::scanner::scan_calls;
use ou_core::matcher::find_matching_endpoint;
use ou_core::models::{AnalysisError, EndpointSet, UsageMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cross-references a declared-endpoint set against a TypeScript source tree.
///
/// Owns the shared source map so that every file parsed during one analysis
/// can report line numbers consistently.
pub struct UsageAnalyzer {
    parser: SourceParser,
}

impl Default for UsageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageAnalyzer {
    pub fn new() -> Self {
        Self {
            parser: SourceParser::new(),
        }
    }

    /// Scans every `.ts`/`.tsx` file under `src_root` and aggregates the call
    /// sites per declared endpoint.
    ///
    /// The returned map holds one entry for every declared endpoint, including
    /// the ones with no usages. Scanned keys that match no declared endpoint
    /// are dropped. Files that fail to parse are skipped with a warning so a
    /// single broken file never aborts the run.
    pub fn analyze(&self, endpoints: &EndpointSet, src_root: &Path) -> Result<UsageMap, AnalysisError> {
        if !src_root.is_dir() {
            return Err(AnalysisError::SourceRootNotFound(src_root.to_path_buf()));
        }

        // Reported paths are relative to the directory containing the source
        // root, so "src/api.ts" rather than a bare "api.ts".
        let base = src_root.parent().unwrap_or(src_root);

        let mut files = Vec::new();
        collect_source_files(src_root, &mut files);
        files.sort();
        debug!(count = files.len(), root = %src_root.display(), "Collected source files");

        let mut usages = UsageMap::for_endpoints(endpoints);

        for file in &files {
            let parsed = match self.parser.parse_file(file) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "Skipping unparsable file");
                    continue;
                }
            };

            let relative = file
                .strip_prefix(base)
                .unwrap_or(file.as_path())
                .to_string_lossy()
                .replace('\\', "/");

            let bindings = client_bindings(&parsed.module);
            for scanned in scan_calls(&parsed, &relative, &bindings) {
                if usages.contains_key(&scanned.key) {
                    usages.record(&scanned.key, scanned.site);
                } else if let Some(matched) = find_matching_endpoint(&scanned.key, endpoints) {
                    let matched = matched.to_string();
                    usages.record(&matched, scanned.site);
                } else {
                    debug!(key = %scanned.key, file = %relative, "Call matches no declared endpoint");
                }
            }
        }

        Ok(usages)
    }
}

/// Analyzes `src_root` with a fresh [`UsageAnalyzer`]
pub fn analyze(endpoints: &EndpointSet, src_root: &Path) -> Result<UsageMap, AnalysisError> {
    UsageAnalyzer::new().analyze(endpoints, src_root)
}

fn collect_source_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            if name == "node_modules" || name.starts_with('.') {
                continue;
            }
            collect_source_files(&path, out);
        } else if name.ends_with(".ts") || name.ends_with(".tsx") {
            // .d.ts declaration files contain no executable calls
            if name.ends_with(".d.ts") {
                continue;
            }
            out.push(path);
        }
    }
}
