//! # vigil-deps
//!
//! package.json parsing and candidate selection for the vigil
//! suspicious-dependency audit.
//!
//! This crate provides:
//! - A read-only [`PackageManifest`] model over the three dependency
//!   groups (`dependencies`, `devDependencies`, `peerDependencies`)
//! - An [`AllowList`] of packages that are never evaluated
//! - Ordered, deduplicated [`CandidateSet`] collection with per-pass
//!   subtraction of already-flagged packages
//!
//! ## Example
//!
//! ```rust
//! use vigil_deps::{AllowList, CandidateSet, PackageManifest};
//!
//! # fn example() -> vigil_deps::Result<()> {
//! let manifest = PackageManifest::from_json(
//!     r#"{ "dependencies": { "left-pad": "1.0.0" } }"#,
//! )?;
//! let candidates = CandidateSet::collect(&manifest, &AllowList::default());
//! assert_eq!(candidates.names(), ["left-pad"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

pub mod candidates;
pub mod error;
pub mod manifest;

pub use candidates::{AllowList, CandidateSet, DEFAULT_ALLOW_LIST};
pub use error::{Error, Result};
pub use manifest::{DependencyGroup, PackageManifest};
