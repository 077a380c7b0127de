use crate::models::EndpointSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A location in source code where a recognized client method is invoked.
///
/// `file` is relative to the parent of the analysis root, `line` is 1-based.
/// Call sites are facts derived once per scan and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub file: String,
    pub line: usize,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Per-run mapping from every declared endpoint key to its observed call
/// sites.
///
/// The key set is fixed at construction to exactly the declared-endpoint set:
/// an endpoint with zero call sites is "unused", never absent. The aggregator
/// exclusively owns and mutates the map for the run, then hands it off to
/// reporting.
#[derive(Debug, Clone, Default)]
pub struct UsageMap {
    usages: IndexMap<String, Vec<CallSite>>,
}

impl UsageMap {
    /// Creates a map with every declared endpoint mapped to an empty list
    pub fn for_endpoints(endpoints: &EndpointSet) -> Self {
        let usages = endpoints
            .keys()
            .map(|key| (key.to_string(), Vec::new()))
            .collect();
        Self { usages }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.usages.contains_key(key)
    }

    /// Appends a call site under an existing endpoint key. Returns false (and
    /// records nothing) when the key is not declared.
    pub fn record(&mut self, key: &str, site: CallSite) -> bool {
        match self.usages.get_mut(key) {
            Some(sites) => {
                sites.push(site);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&[CallSite]> {
        self.usages.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CallSite])> {
        self.usages.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Entries sorted alphabetically by endpoint key, for reporting
    pub fn sorted_entries(&self) -> Vec<(&str, &[CallSite])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// Endpoint keys with zero recorded call sites, in declaration order
    pub fn unused_keys(&self) -> Vec<&str> {
        self.usages
            .iter()
            .filter(|(_, sites)| sites.is_empty())
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Drops endpoint keys rejected by the predicate (the ignore filter runs
    /// through this before the map reaches reporting)
    pub fn retain_keys<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.usages.retain(|key, _| keep(key));
    }

    pub fn len(&self) -> usize {
        self.usages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}
