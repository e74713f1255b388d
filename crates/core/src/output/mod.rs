mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::{FormatReport, WarningKind};

/// Output format options for run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

/// Format a FormatReport according to the specified format
pub fn format_report(report: &FormatReport, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_summary(report)),
    }
}

/// Generate a human-readable summary
pub fn format_summary(report: &FormatReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Import Format Summary\n\
         =====================\n\
         Root: {}\n\n",
        report.root.display()
    ));

    output.push_str(&format!(
        "Files Processed: {}\n\
         - JavaScript: {}\n\
         - TypeScript: {}\n\n",
        report.stats.total_files, report.stats.javascript_files, report.stats.typescript_files
    ));

    output.push_str(&format!(
        "Outcomes:\n\
         - Changed: {}\n\
         - Unchanged: {}\n\
         - No Imports: {}\n\
         - Failed: {}\n\n",
        report.stats.changed_files,
        report.stats.unchanged_files,
        report.stats.no_import_files,
        report.stats.failed_files
    ));

    output.push_str(&format!("Total Imports: {}\n\n", report.stats.total_imports));

    if report.stats.total_warnings > 0 {
        output.push_str("Warnings:\n");
        for file in &report.files {
            for warning in &file.warnings {
                output.push_str(&format!(
                    "  {}: {} ({})\n",
                    file.path.display(),
                    warning.specifier,
                    warning_label(warning.kind)
                ));
            }
        }
        output.push('\n');
    }

    if report.stats.failed_files > 0 {
        output.push_str("Failures:\n");
        for file in &report.files {
            if let Some(ref error) = file.error {
                output.push_str(&format!("  {}: {}\n", file.path.display(), error));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Run Duration: {}ms ({:.2} files/sec)\n\
         Timestamp: {}\n\
         Tool Version: {}\n",
        report.metadata.duration_ms,
        report.metadata.files_per_second,
        report.metadata.timestamp,
        report.metadata.tool_version
    ));

    output
}

fn warning_label(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::UnclassifiableSpecifier => "unclassifiable specifier",
        WarningKind::MalformedSpecifier => "malformed specifier",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FileOutcome, FileReport, FormatStats, FormatWarning, Language, RunMetadata,
    };
    use std::path::PathBuf;

    fn sample_report() -> FormatReport {
        let files = vec![FileReport {
            path: PathBuf::from("src/app.ts"),
            language: Language::TypeScript,
            outcome: FileOutcome::Changed,
            import_count: 4,
            warnings: vec![FormatWarning::new(
                WarningKind::UnclassifiableSpecifier,
                "./orphan/x",
            )],
            error: None,
        }];
        let stats = FormatReport::calculate_stats(&files);

        FormatReport {
            root: PathBuf::from("/project"),
            files,
            stats,
            metadata: RunMetadata::default(),
        }
    }

    #[test]
    fn test_summary_contains_outcomes_and_warnings() {
        let summary = format_summary(&sample_report());

        assert!(summary.contains("Root: /project"));
        assert!(summary.contains("- Changed: 1"));
        assert!(summary.contains("src/app.ts: ./orphan/x (unclassifiable specifier)"));
    }

    #[test]
    fn test_empty_report_summary() {
        let report = FormatReport {
            root: PathBuf::from("."),
            files: vec![],
            stats: FormatStats::default(),
            metadata: RunMetadata::default(),
        };

        let summary = format_summary(&report);
        assert!(summary.contains("Files Processed: 0"));
        assert!(!summary.contains("Warnings:"));
    }
}
