use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How unused endpoints affect the exit code in check mode
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// Unused endpoints fail the run
    Error,
    /// Unused endpoints are reported but the run succeeds
    Warn,
}

/// Config file names probed in the working directory, in priority order
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "openapi-usage.yaml",
    "openapi-usage.yml",
    ".openapi-usage.yaml",
    ".openapi-usage.yml",
];

/// Project configuration file. Every field is optional; command-line
/// arguments override whatever is set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Path to the OpenAPI document
    pub openapi: Option<String>,
    /// Root of the TypeScript source tree
    pub src: Option<String>,
    /// Where to write the JSON report
    pub output: Option<String>,
    pub level: Option<SeverityLevel>,
    /// Glob patterns for endpoint paths to exclude from the report
    pub ignore: Option<Vec<String>>,
}

impl FileConfig {
    /// Loads a config file from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Probes the default config file names under `dir`. Returns the first
    /// one that exists, or an empty config when none do.
    pub fn discover(dir: &Path) -> Result<Self> {
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Using discovered config file");
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }
}

/// Fully resolved settings for one run, after merging command-line arguments
/// over the config file
#[derive(Debug)]
pub struct Settings {
    pub openapi: PathBuf,
    pub src: PathBuf,
    pub output: Option<PathBuf>,
    pub check: bool,
    pub level: SeverityLevel,
    pub ignore: Vec<String>,
}

/// Glob filter over endpoint keys. Patterns apply to the full
/// `"METHOD path"` key, with `*` matching any run of characters (including
/// `/`), so `GET /health` ignores one endpoint and `* /internal/*` ignores
/// every verb under a prefix.
pub struct IgnoreFilter {
    patterns: Vec<Regex>,
}

impl IgnoreFilter {
    pub fn new(globs: &[String]) -> Result<Self> {
        let patterns = globs
            .iter()
            .map(|glob| {
                let regex = glob_to_regex(glob);
                Regex::new(&regex).with_context(|| format!("Invalid ignore pattern: {glob}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// True when the endpoint key matches any ignore pattern
    pub fn matches(&self, endpoint_key: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.is_match(endpoint_key))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::from("^");
    for ch in glob.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_full_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openapi-usage.yaml");
        fs::write(
            &path,
            "openapi: api/openapi.json\nsrc: web/src\noutput: report.json\nlevel: warn\nignore:\n  - /internal/*\n",
        )
        .unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.openapi.as_deref(), Some("api/openapi.json"));
        assert_eq!(config.src.as_deref(), Some("web/src"));
        assert_eq!(config.output.as_deref(), Some("report.json"));
        assert_eq!(config.level, Some(SeverityLevel::Warn));
        assert_eq!(config.ignore, Some(vec!["/internal/*".to_string()]));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openapi-usage.yaml");
        fs::write(&path, "openapi: api.json\nunknown_key: true\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn discover_prefers_earlier_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("openapi-usage.yml"), "openapi: second.json\n").unwrap();
        fs::write(dir.path().join("openapi-usage.yaml"), "openapi: first.json\n").unwrap();

        let config = FileConfig::discover(dir.path()).unwrap();
        assert_eq!(config.openapi.as_deref(), Some("first.json"));
    }

    #[test]
    fn discover_without_config_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::discover(dir.path()).unwrap();
        assert!(config.openapi.is_none());
        assert!(config.level.is_none());
    }

    #[test]
    fn method_qualified_pattern_matches_only_its_own_key() {
        let filter = IgnoreFilter::new(&["GET /health".to_string()]).unwrap();
        assert!(filter.matches("GET /health"));
        assert!(!filter.matches("DELETE /health"));
        assert!(!filter.matches("GET /healthz"));
    }

    #[test]
    fn wildcard_method_pattern_covers_every_verb() {
        let filter = IgnoreFilter::new(&["* /internal/*".to_string()]).unwrap();
        assert!(filter.matches("GET /internal/health"));
        assert!(filter.matches("POST /internal/metrics/reset"));
        assert!(!filter.matches("GET /users"));
        assert!(!filter.matches("GET /api/internal/x"));
    }

    #[test]
    fn ignore_filter_escapes_regex_metacharacters() {
        let filter = IgnoreFilter::new(&["GET /v1.0/*".to_string()]).unwrap();
        assert!(filter.matches("GET /v1.0/users"));
        assert!(!filter.matches("GET /v1x0/users"));
    }

    #[test]
    fn exact_pattern_requires_full_match() {
        let filter = IgnoreFilter::new(&["GET /health".to_string()]).unwrap();
        assert!(filter.matches("GET /health"));
        assert!(!filter.matches("GET /healthcheck"));
    }
}
