//! Marketplace and plugin checks
//!
//! Problems found inside a single plugin are collected as messages and never
//! abort the scan. Only an unreadable root manifest or a missing plugins
//! directory is returned as a [`ManifestError`].

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::ManifestError;
use crate::types::{MarketplaceManifest, PluginManifest, PLUGIN_MANIFEST_FILE, PLUGIN_README_FILE};

/// Errors (must fix) and warnings (should fix) found for one plugin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Typed `plugin.json`, when it parsed into the expected shape
    pub manifest: Option<PluginManifest>,
}

impl ValidationResult {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Values a plugin manifest is checked against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub expected_mcp_server: String,
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            expected_mcp_server: fa_config::DEFAULT_MCP_SERVER.to_string(),
        }
    }
}

impl ValidationRules {
    pub fn from_config(config: &fa_config::Config) -> Self {
        ValidationRules {
            expected_mcp_server: config.mcp_server().to_string(),
        }
    }
}

/// Outcome of the root manifest check
#[derive(Debug, Clone, PartialEq)]
pub struct RootCheck {
    /// File name used in messages (e.g. `marketplace.json`)
    pub file_name: String,
    /// Required keys absent from the manifest, in check order
    pub missing_fields: Vec<&'static str>,
    /// Typed manifest when every field has the expected shape
    pub manifest: Option<MarketplaceManifest>,
}

impl RootCheck {
    pub fn is_valid(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Messages recorded in the marketplace-wide error list
    pub fn errors(&self) -> Vec<String> {
        self.missing_fields
            .iter()
            .map(|field| format!("{}: Missing field '{}'", self.file_name, field))
            .collect()
    }
}

fn read_json(path: &Path) -> Result<Value, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>, ManifestError> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(ManifestError::NotAnObject(path.to_path_buf())),
    }
}

/// Check the root manifest for presence of the required keys.
///
/// A missing or unparsable file is fatal; missing keys are not.
pub fn check_marketplace_manifest(path: &Path) -> Result<RootCheck, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::MarketplaceNotFound(path.to_path_buf()));
    }

    let data = read_json_object(path)?;
    let missing_fields: Vec<&'static str> = MarketplaceManifest::REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !data.contains_key(*field))
        .collect();

    let manifest = serde_json::from_value(Value::Object(data)).ok();
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    debug!(
        "Checked {} ({} missing field(s))",
        path.display(),
        missing_fields.len()
    );

    Ok(RootCheck {
        file_name,
        missing_fields,
        manifest,
    })
}

/// List the immediate subdirectories of the plugins directory, sorted by name.
///
/// Plain files (a top-level README, for instance) are ignored.
pub fn discover_plugin_dirs(plugins_dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    if !plugins_dir.is_dir() {
        return Err(ManifestError::PluginsDirNotFound(plugins_dir.to_path_buf()));
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(plugins_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // `is_dir` on the path follows symlinks, `file_type` does not
        if entry.path().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    debug!(
        "Found {} plugin director(ies) in {}",
        dirs.len(),
        plugins_dir.display()
    );
    Ok(dirs)
}

/// Validate one plugin directory.
///
/// Checks run in a fixed order and stop early when `plugin.json` is missing,
/// unreadable, or not a JSON object.
pub fn validate_plugin(plugin_dir: &Path, rules: &ValidationRules) -> ValidationResult {
    let mut result = ValidationResult::default();

    // Presence only: a directory in place of a file fails at the read below
    let manifest_path = plugin_dir.join(PLUGIN_MANIFEST_FILE);
    if !manifest_path.exists() {
        result.error(format!("Missing required file: {}", PLUGIN_MANIFEST_FILE));
        return result;
    }

    if !plugin_dir.join(PLUGIN_README_FILE).exists() {
        result.warning(format!("Missing recommended file: {}", PLUGIN_README_FILE));
    }

    let data = match read_json_object(&manifest_path) {
        Ok(data) => data,
        Err(e) => {
            result.error(format!("{}: {}", PLUGIN_MANIFEST_FILE, e));
            return result;
        }
    };

    for field in PluginManifest::REQUIRED_FIELDS {
        if !data.contains_key(field) {
            result.error(format!(
                "{}: Missing required field '{}'",
                PLUGIN_MANIFEST_FILE, field
            ));
        }
    }

    if let Some(mcp_server) = data.get("mcpServer") {
        if mcp_server.as_str() != Some(rules.expected_mcp_server.as_str()) {
            let actual = mcp_server
                .as_str()
                .map_or_else(|| mcp_server.to_string(), str::to_string);
            result.error(format!(
                "{}: mcpServer must be '{}', got '{}'",
                PLUGIN_MANIFEST_FILE, rules.expected_mcp_server, actual
            ));
        }
    }

    for field in PluginManifest::RECOMMENDED_FIELDS {
        if !data.contains_key(field) {
            result.warning(format!(
                "{}: Missing recommended field '{}'",
                PLUGIN_MANIFEST_FILE, field
            ));
        }
    }

    result.manifest = serde_json::from_value(Value::Object(data)).ok();
    result
}
