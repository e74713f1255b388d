use crate::models::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
    #[error("Failed to parse gitignore: {0}")]
    GitignoreError(#[from] ignore::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration for a formatting run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory (or single file) to format
    pub root: PathBuf,
    /// Filter to specific languages
    pub language_filter: Option<Vec<Language>>,
    /// Additional ignore patterns (glob style)
    pub ignore_patterns: Vec<String>,
    /// Custom ignore file path
    pub ignore_file: Option<PathBuf>,
    /// Report files that need rewriting without writing anything
    pub check: bool,
    /// Number of threads (0 = auto)
    pub threads: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            language_filter: None,
            ignore_patterns: vec![],
            ignore_file: None,
            check: false,
            threads: 0,
        }
    }
}

impl RunConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_language_filter(mut self, languages: Vec<Language>) -> Self {
        self.language_filter = Some(languages);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
}

impl IgnoreFilter {
    pub fn new(config: &RunConfig) -> Result<Self, ConfigError> {
        // Load .gitignore if present
        let gitignore = if let Some(ref ignore_file) = config.ignore_file {
            let mut builder = GitignoreBuilder::new(&config.root);
            builder.add(ignore_file);
            Some(builder.build()?)
        } else {
            let gitignore_path = config.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&config.root);
                builder.add(&gitignore_path);
                Some(builder.build()?)
            } else {
                None
            }
        };

        // Build custom ignore globs
        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        // Generated and vendored trees are never formatted
        let mut default_builder = GlobSetBuilder::new();
        default_builder.add(Glob::new("**/node_modules/**")?);
        default_builder.add(Glob::new("**/.git/**")?);
        default_builder.add(Glob::new("**/dist/**")?);
        default_builder.add(Glob::new("**/build/**")?);
        default_builder.add(Glob::new("**/coverage/**")?);
        default_builder.add(Glob::new("**/vendor/**")?);
        default_builder.add(Glob::new("**/.next/**")?);
        default_builder.add(Glob::new("**/.nuxt/**")?);
        default_builder.add(Glob::new("**/*.min.js")?);
        default_builder.add(Glob::new("**/*.bundle.js")?);
        default_builder.add(Glob::new("**/*.d.ts")?);
        let default_ignores = default_builder.build()?;

        Ok(Self {
            gitignore,
            custom_globs,
            default_ignores,
        })
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        // Check default ignores
        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        // Check custom patterns
        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        // Check gitignore
        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Check if a file extension matches the language filter
    pub fn matches_language_filter(&self, path: &Path, filter: &Option<Vec<Language>>) -> bool {
        match filter {
            None => true,
            Some(languages) => {
                if let Some(ext) = path.extension() {
                    if let Some(lang) = Language::from_extension(&ext.to_string_lossy()) {
                        languages.contains(&lang)
                    } else {
                        false
                    }
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.language_filter.is_none());
        assert!(!config.check);
    }

    #[test]
    fn test_config_builder() {
        let config = RunConfig::new(PathBuf::from("/test"))
            .with_language_filter(vec![Language::TypeScript])
            .with_ignore_patterns(vec!["*.spec.*".to_string()])
            .with_check(true)
            .with_threads(4);

        assert_eq!(config.root, PathBuf::from("/test"));
        assert!(config.language_filter.is_some());
        assert!(config.check);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_default_ignores() {
        let config = RunConfig::default();
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("web/node_modules/react/index.js"), false));
        assert!(filter.should_ignore(Path::new("web/dist/app.js"), false));
        assert!(filter.should_ignore(Path::new("src/types.d.ts"), false));
        assert!(!filter.should_ignore(Path::new("src/app.ts"), false));
    }

    #[test]
    fn test_custom_ignore_patterns() {
        let config =
            RunConfig::default().with_ignore_patterns(vec!["**/generated/**".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("src/generated/api.ts"), false));
        assert!(!filter.should_ignore(Path::new("src/api.ts"), false));
    }

    #[test]
    fn test_language_filter() {
        let config = RunConfig::default();
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.matches_language_filter(
            Path::new("a.ts"),
            &Some(vec![Language::TypeScript])
        ));
        assert!(!filter.matches_language_filter(
            Path::new("a.js"),
            &Some(vec![Language::TypeScript])
        ));
        assert!(filter.matches_language_filter(Path::new("a.jsx"), &None));
    }
}
