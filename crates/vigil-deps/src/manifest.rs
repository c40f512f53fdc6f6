//! package.json manifest model

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Dependency group within a package.json manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyGroup {
    /// Runtime dependencies (`dependencies`)
    Runtime,
    /// Development dependencies (`devDependencies`)
    Dev,
    /// Peer dependencies (`peerDependencies`)
    Peer,
}

impl DependencyGroup {
    /// Fixed group order used when collecting candidates
    pub const ORDER: [DependencyGroup; 3] = [
        DependencyGroup::Runtime,
        DependencyGroup::Dev,
        DependencyGroup::Peer,
    ];

    /// The manifest key this group is stored under
    pub fn manifest_key(self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "dependencies",
            DependencyGroup::Dev => "devDependencies",
            DependencyGroup::Peer => "peerDependencies",
        }
    }
}

/// A parsed package.json manifest
///
/// Read-only input to the evaluation engine. Dependency groups keep the
/// document's key order (serde_json is built with `preserve_order`), so
/// candidate collection is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Package name, if declared
    #[serde(default)]
    pub name: Option<String>,

    /// Runtime dependencies (name -> version spec)
    #[serde(default)]
    pub dependencies: Map<String, Value>,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,

    /// Peer dependencies
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: Map<String, Value>,
}

impl PackageManifest {
    /// Parse a manifest from raw package.json text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a manifest from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load and parse a package.json file
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Entries for a dependency group, in document order
    pub fn group(&self, group: DependencyGroup) -> &Map<String, Value> {
        match group {
            DependencyGroup::Runtime => &self.dependencies,
            DependencyGroup::Dev => &self.dev_dependencies,
            DependencyGroup::Peer => &self.peer_dependencies,
        }
    }
}
