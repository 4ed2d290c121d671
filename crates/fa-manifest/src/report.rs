//! Marketplace-wide aggregation of validation results

use crate::validation::{RootCheck, ValidationResult};

/// Result for one plugin directory, keyed by the directory name
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PluginReport {
    name: String,
    result: ValidationResult,
}

/// Final verdict of a marketplace scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    PassedWithWarnings,
    Failed { errors: usize },
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Passed | Outcome::PassedWithWarnings => 0,
            Outcome::Failed { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplaceReport {
    root_errors: Vec<String>,
    plugins: Vec<PluginReport>,
}

impl MarketplaceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_root(&mut self, check: &RootCheck) {
        self.root_errors.extend(check.errors());
    }

    pub fn record_plugin(&mut self, name: impl Into<String>, result: ValidationResult) {
        self.plugins.push(PluginReport {
            name: name.into(),
            result,
        });
    }

    /// Every error in scan order, plugin messages prefixed with the plugin name
    pub fn errors(&self) -> Vec<String> {
        let plugin_errors = self.plugins.iter().flat_map(|plugin| {
            plugin
                .result
                .errors
                .iter()
                .map(move |e| format!("{}: {}", plugin.name, e))
        });
        self.root_errors.iter().cloned().chain(plugin_errors).collect()
    }

    /// Every warning in scan order, prefixed with the plugin name
    pub fn warnings(&self) -> Vec<String> {
        self.plugins
            .iter()
            .flat_map(|plugin| {
                plugin
                    .result
                    .warnings
                    .iter()
                    .map(move |w| format!("{}: {}", plugin.name, w))
            })
            .collect()
    }

    pub fn outcome(&self) -> Outcome {
        let errors = self.errors().len();
        if errors > 0 {
            Outcome::Failed { errors }
        } else if self.warnings().is_empty() {
            Outcome::Passed
        } else {
            Outcome::PassedWithWarnings
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome().exit_code()
    }
}
