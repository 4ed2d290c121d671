//! Typed views of the marketplace manifests
//!
//! Validation itself runs on raw JSON so that missing keys can be reported
//! one by one; these types carry the parsed content of a manifest that fits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File every plugin directory must contain
pub const PLUGIN_MANIFEST_FILE: &str = "plugin.json";

/// File every plugin directory should contain
pub const PLUGIN_README_FILE: &str = "README.md";

/// Root `marketplace.json` descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketplaceManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub plugins: Vec<Value>,
}

impl MarketplaceManifest {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["name", "description", "version", "plugins"];
}

/// Per-plugin `plugin.json` descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Either a plain name or an object with name/email/url
    pub author: Value,
    pub mcp_server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Value>,
}

impl PluginManifest {
    pub const REQUIRED_FIELDS: [&'static str; 6] =
        ["id", "name", "version", "description", "author", "mcpServer"];
    pub const RECOMMENDED_FIELDS: [&'static str; 3] = ["homepage", "repository", "capabilities"];
}
