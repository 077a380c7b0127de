use ou_core::models::UsageMap;

/// Plain-text tree report for the terminal
pub struct TreeReporter;

impl TreeReporter {
    /// Renders one block per endpoint, alphabetically, with its call sites as
    /// tree branches. Endpoints without call sites get an `(unused)` leaf.
    pub fn generate(&self, usages: &UsageMap) -> String {
        let mut report = String::new();

        for (key, sites) in usages.sorted_entries() {
            report.push_str(key);
            report.push('\n');

            if sites.is_empty() {
                report.push_str("  └─ (unused)\n");
            } else {
                for (i, site) in sites.iter().enumerate() {
                    let branch = if i + 1 == sites.len() {
                        "└─"
                    } else {
                        "├─"
                    };
                    report.push_str(&format!("  {} {}:{}\n", branch, site.file, site.line));
                }
            }
            report.push('\n');
        }

        report
    }

    /// Renders the closing summary: totals plus the unused keys in
    /// declaration order
    pub fn summary(&self, usages: &UsageMap) -> String {
        let unused = usages.unused_keys();
        let total = usages.len();
        let used = total - unused.len();

        let mut summary = String::new();
        summary.push_str(&"─".repeat(35));
        summary.push('\n');
        summary.push_str(&format!("Total endpoints: {}\n", total));
        summary.push_str(&format!("Used: {}\n", used));
        summary.push_str(&format!("Unused: {}\n", unused.len()));
        for key in unused {
            summary.push_str(&format!("  - {}\n", key));
        }

        summary
    }
}
