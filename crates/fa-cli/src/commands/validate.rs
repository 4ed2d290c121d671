use colored::Colorize;
use fa_config::Config;
use fa_logger as logger;
use fa_manifest::{
    check_marketplace_manifest, discover_plugin_dirs, validate_plugin, ManifestError,
    MarketplaceReport, Outcome, ValidationResult, ValidationRules,
};
use std::path::Path;

const RULE: &str = "============================================================";

fn error_mark() -> colored::ColoredString {
    "❌".red()
}

fn warning_mark() -> colored::ColoredString {
    "⚠️ ".yellow()
}

fn ok_mark() -> colored::ColoredString {
    "✓".green()
}

/// Validate the marketplace rooted at `root`, print the report on stdout and
/// return the process exit code.
pub fn handle_validate(root: &Path, config: &Config) -> i32 {
    println!("Validating FarmAdvisor Claude Plugins marketplace...\n");
    logger::debug(&format!("Marketplace root: {}", root.display()));

    let rules = ValidationRules::from_config(config);
    let mut report = MarketplaceReport::new();

    let marketplace_file = config.marketplace_file();
    println!("Checking {}...", marketplace_file);
    let check = match check_marketplace_manifest(&root.join(marketplace_file)) {
        Ok(check) => check,
        Err(ManifestError::MarketplaceNotFound(_)) => {
            println!("{} ERROR: {} not found!", error_mark(), marketplace_file);
            return 1;
        }
        Err(e) => {
            println!("{} ERROR: {} - {}", error_mark(), marketplace_file, e);
            return 1;
        }
    };
    for field in &check.missing_fields {
        println!(
            "{} ERROR: {} missing required field '{}'",
            error_mark(),
            marketplace_file,
            field
        );
    }
    report.record_root(&check);
    if check.is_valid() {
        println!("{} {} is valid\n", ok_mark(), marketplace_file);
    }
    if let Some(manifest) = &check.manifest {
        logger::debug(&format!(
            "Marketplace '{}' v{} lists {} plugin(s)",
            manifest.name,
            manifest.version,
            manifest.plugins.len()
        ));
    }

    let plugins_dir_name = config.plugins_dir();
    println!("Checking {} directory...", plugins_dir_name);
    let plugin_dirs = match discover_plugin_dirs(&root.join(plugins_dir_name)) {
        Ok(dirs) => dirs,
        Err(ManifestError::PluginsDirNotFound(_)) => {
            println!("{} ERROR: {} directory not found!", error_mark(), plugins_dir_name);
            return 1;
        }
        Err(e) => {
            println!("{} ERROR: {}", error_mark(), e);
            return 1;
        }
    };

    if plugin_dirs.is_empty() {
        println!(
            "{} WARNING: No plugins found in {} directory\n",
            warning_mark(),
            plugins_dir_name
        );
    } else {
        println!("Found {} plugin(s)\n", plugin_dirs.len());
    }

    for plugin_dir in &plugin_dirs {
        let name = plugin_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("Validating plugin: {}", name);
        logger::step(&format!("Checking {}", plugin_dir.display()));

        let result = validate_plugin(plugin_dir, &rules);
        print_plugin_result(&result);
        if let Some(manifest) = &result.manifest {
            logger::debug(&format!(
                "Plugin '{}' ({}) v{}",
                manifest.id, manifest.name, manifest.version
            ));
        }
        println!();

        report.record_plugin(name, result);
    }

    print_summary(&report);
    report.exit_code()
}

fn print_plugin_result(result: &ValidationResult) {
    if result.has_errors() {
        println!("  {} Errors:", error_mark());
        for error in &result.errors {
            println!("     - {}", error);
        }
    }
    if !result.warnings.is_empty() {
        println!("  {} Warnings:", warning_mark());
        for warning in &result.warnings {
            println!("     - {}", warning);
        }
    }
    if result.is_clean() {
        println!("  {} Plugin is valid", ok_mark());
    }
}

fn print_summary(report: &MarketplaceReport) {
    println!("{}", RULE);
    println!("{}", "VALIDATION SUMMARY".bold());
    println!("{}", RULE);

    let errors = report.errors();
    if !errors.is_empty() {
        println!("\n{} Found {} error(s):", error_mark(), errors.len());
        for error in &errors {
            println!("  - {}", error);
        }
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!("\n{} Found {} warning(s):", warning_mark(), warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    match report.outcome() {
        Outcome::Passed => println!("\n{} All validations passed!", ok_mark()),
        Outcome::PassedWithWarnings => {
            println!("\n{} No errors found (warnings only)", ok_mark());
        }
        Outcome::Failed { errors } => {
            println!("\n{} Validation failed with {} error(s)", error_mark(), errors);
        }
    }
}
