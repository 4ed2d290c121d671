//! Plugin marketplace manifest validation
//!
//! A marketplace is a directory holding a root `marketplace.json` and a
//! `plugins/` directory whose immediate subdirectories each describe one
//! plugin through a `plugin.json` (and, ideally, a `README.md`).
//!
//! Validation is split into the steps a caller runs in order:
//! [`check_marketplace_manifest`], [`discover_plugin_dirs`] and
//! [`validate_plugin`] for each plugin. Results accumulate in a
//! [`MarketplaceReport`], which decides the final outcome.

pub mod errors;
pub mod report;
pub mod types;
pub mod validation;

pub use errors::ManifestError;
pub use report::{MarketplaceReport, Outcome};
pub use types::{MarketplaceManifest, PluginManifest};
pub use validation::{
    check_marketplace_manifest, discover_plugin_dirs, validate_plugin, RootCheck,
    ValidationResult, ValidationRules,
};
