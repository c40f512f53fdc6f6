//! Candidate selection: which packages an evaluation run examines

use crate::error::{Error, Result};
use crate::manifest::{DependencyGroup, PackageManifest};
use std::collections::HashSet;

/// Package names excluded by default: the tool's own packages
pub const DEFAULT_ALLOW_LIST: &[&str] = &["vigil", "vigil-engine"];

/// Package names never evaluated, regardless of their metrics
#[derive(Debug, Clone)]
pub struct AllowList {
    names: HashSet<String>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self {
            names: DEFAULT_ALLOW_LIST.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl AllowList {
    /// Build an allow-list from user-supplied names, keeping the defaults
    ///
    /// Empty or blank entries are rejected.
    pub fn with_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(Error::EmptyAllowListEntry);
            }
            list.names.insert(name);
        }
        Ok(list)
    }

    /// Whether a package is excluded from evaluation
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Ordered, deduplicated set of packages eligible for evaluation
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    names: Vec<String>,
}

impl CandidateSet {
    /// Collect candidates from all dependency groups of a manifest
    ///
    /// Groups are visited in the fixed order `dependencies`,
    /// `devDependencies`, `peerDependencies`. Empty names, entries with a
    /// null version spec, and allow-listed names are dropped. A package
    /// declared in more than one group is kept once (first occurrence
    /// wins).
    pub fn collect(manifest: &PackageManifest, allow_list: &AllowList) -> Self {
        let mut names = Vec::new();
        let mut seen = HashSet::new();

        for group in DependencyGroup::ORDER {
            for (name, spec) in manifest.group(group) {
                if name.trim().is_empty() || spec.is_null() {
                    continue;
                }
                if allow_list.contains(name) || !seen.insert(name.clone()) {
                    continue;
                }
                names.push(name.clone());
            }
        }

        Self { names }
    }

    /// Candidates not yet flagged, preserving collection order
    ///
    /// Called fresh before each indicator pass so packages confirmed
    /// suspicious by an earlier pass drop out.
    pub fn remaining<'a>(&'a self, flagged: &HashSet<String>) -> Vec<&'a str> {
        self.names
            .iter()
            .filter(|name| !flagged.contains(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// All candidate names in collection order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no candidates
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
