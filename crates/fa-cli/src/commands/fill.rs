use anyhow::Context;
use fa_logger as logger;
use fa_pdf::FieldValueMapping;
use std::path::{Path, PathBuf};

/// Where the field mapping comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `--data '<json>'`
    Inline(String),
    /// `--data-file <path>`
    File(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> anyhow::Result<FieldValueMapping> {
        match self {
            DataSource::Inline(json) => Ok(FieldValueMapping::from_json_str(json)?),
            DataSource::File(path) => FieldValueMapping::from_file(path)
                .with_context(|| format!("Failed to load field mapping from {}", path.display())),
        }
    }
}

/// Fill `input` into `output` and print the fill report as JSON on stdout.
pub fn handle_fill(input: &Path, output: &Path, source: &DataSource) -> anyhow::Result<()> {
    let mapping = source.load()?;
    logger::debug(&format!(
        "Filling {} field value(s) from {} into {}",
        mapping.len(),
        input.display(),
        output.display()
    ));

    logger::spinner_start(&format!("Filling {}", input.display()));
    let report = match fa_pdf::fill_form(input, output, &mapping) {
        Ok(report) => report,
        Err(e) => {
            logger::spinner_stop();
            return Err(e.into());
        }
    };
    logger::spinner_success(&format!("Wrote {}", output.display()));
    logger::info(&format!(
        "Matched {} of {} mapping key(s)",
        report.fields_filled,
        mapping.len()
    ));

    if report.fields_written.len() < report.fields_filled {
        logger::debug(&format!(
            "{} matching field(s) had no reachable widget and were not written",
            report.fields_filled - report.fields_written.len()
        ));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inline_source_parses_mapping() {
        let mapping = DataSource::Inline(r#"{"farm_name": "Green Acres"}"#.to_string())
            .load()
            .expect("mapping");
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["farm_name"]);
    }

    #[test]
    fn test_file_source_reads_mapping() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("mapping.json");
        std::fs::write(&path, r#"{"county": "Story", "acres": 40}"#).expect("write");

        let mapping = DataSource::File(path).load().expect("mapping");
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_missing_file_source_names_the_path() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("absent.json");

        let err = DataSource::File(path.clone()).load().expect_err("missing file");
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
