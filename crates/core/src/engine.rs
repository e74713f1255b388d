use crate::config::{ConfigError, IgnoreFilter, RunConfig};
use crate::formatter::{format_source, FormatError};
use crate::models::{
    FileOutcome, FileReport, FormatReport, Language, RunMetadata,
};
use crate::policy::CategoryPolicy;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Walks a tree, formats each source file's import block, and aggregates
/// the results into a report. Files are independent, so they are processed
/// in parallel unless a single thread is requested.
pub struct FormatEngine {
    config: RunConfig,
    policy: CategoryPolicy,
    ignore_filter: IgnoreFilter,
}

impl FormatEngine {
    pub fn new(config: RunConfig, policy: CategoryPolicy) -> Result<Self, EngineError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            policy,
            ignore_filter,
        })
    }

    /// Format every matching file under the run root and return the report
    pub fn run(&self) -> Result<FormatReport, EngineError> {
        let start = Instant::now();

        let targets = self.find_source_files()?;

        let files: Vec<FileReport> = if self.config.threads == 1 {
            targets
                .iter()
                .map(|(path, lang)| self.format_file(path, *lang))
                .collect()
        } else {
            let pool = if self.config.threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.threads)
                    .build()
                    .ok()
            } else {
                None
            };

            match pool {
                Some(pool) => pool.install(|| {
                    targets
                        .par_iter()
                        .map(|(path, lang)| self.format_file(path, *lang))
                        .collect()
                }),
                None => targets
                    .par_iter()
                    .map(|(path, lang)| self.format_file(path, *lang))
                    .collect(),
            }
        };

        let stats = FormatReport::calculate_stats(&files);

        let duration = start.elapsed();
        let metadata = RunMetadata {
            duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                files.len() as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(FormatReport {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all source files matching the ignore and language filters
    fn find_source_files(&self) -> Result<Vec<(PathBuf, Language)>, EngineError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if entry.file_type().is_dir() {
                continue;
            }

            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            if !self
                .ignore_filter
                .matches_language_filter(path, &self.config.language_filter)
            {
                continue;
            }

            if let Some(ext) = path.extension() {
                if let Some(lang) = Language::from_extension(&ext.to_string_lossy()) {
                    files.push((path.to_path_buf(), lang));
                }
            }
        }

        Ok(files)
    }

    /// Format a single source file, writing it back unless in check mode
    fn format_file(&self, path: &Path, language: Language) -> FileReport {
        let relative_path = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Self::failed(relative_path, language, 0, vec![], e.to_string()),
        };

        match format_source(&content, language, &self.policy) {
            Ok(result) => {
                if result.changed && !self.config.check {
                    if let Err(e) = fs::write(path, &result.source) {
                        return Self::failed(
                            relative_path,
                            language,
                            result.import_count,
                            result.warnings,
                            e.to_string(),
                        );
                    }
                }

                FileReport {
                    path: relative_path,
                    language,
                    outcome: if result.changed {
                        FileOutcome::Changed
                    } else {
                        FileOutcome::Unchanged
                    },
                    import_count: result.import_count,
                    warnings: result.warnings,
                    error: None,
                }
            }
            Err(FormatError::NoImportsFound) => FileReport {
                path: relative_path,
                language,
                outcome: FileOutcome::NoImports,
                import_count: 0,
                warnings: vec![],
                error: None,
            },
            Err(e) => Self::failed(relative_path, language, 0, vec![], e.to_string()),
        }
    }

    fn failed(
        path: PathBuf,
        language: Language,
        import_count: usize,
        warnings: Vec<crate::models::FormatWarning>,
        error: String,
    ) -> FileReport {
        FileReport {
            path,
            language,
            outcome: FileOutcome::Failed,
            import_count,
            warnings,
            error: Some(error),
        }
    }
}
