use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Category an import statement is routed to for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// The configured well-known package, always emitted first
    NamedPackage,
    /// Module-style specifier with no custom prefix match
    Absolute,
    /// Module-style specifier bucketed under a configured prefix
    AbsoluteCustom,
    /// Relative specifier with no custom prefix match
    Relative,
    /// Relative specifier bucketed under a configured prefix
    RelativeCustom,
}

impl Category {
    /// Fixed emission order for output blocks
    pub const EMIT_ORDER: [Category; 5] = [
        Category::NamedPackage,
        Category::Absolute,
        Category::AbsoluteCustom,
        Category::Relative,
        Category::RelativeCustom,
    ];

    /// Whether this category holds named sub-buckets instead of a flat list
    pub fn is_bucketed(self) -> bool {
        matches!(self, Category::AbsoluteCustom | Category::RelativeCustom)
    }
}

/// Result of classifying one module specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Present only for bucketed categories
    pub bucket: Option<String>,
}

impl Classification {
    pub fn flat(category: Category) -> Self {
        Self {
            category,
            bucket: None,
        }
    }

    pub fn bucketed(category: Category, bucket: String) -> Self {
        Self {
            category,
            bucket: Some(bucket),
        }
    }
}

/// Language of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    /// TypeScript with JSX, parsed with the dedicated grammar
    Tsx,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            _ => None,
        }
    }
}

/// A single import statement extracted from a source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStatement {
    /// The module specifier string literal
    pub specifier: String,
    /// Full original text of the statement, not yet trimmed
    pub raw: String,
    /// Byte offset of the statement start in the original source
    pub start: usize,
    /// Byte offset one past the statement end
    pub end: usize,
    /// Line number in source file
    pub line: usize,
    /// Column position
    pub column: usize,
}

/// Imports routed to their categories, original order preserved within each
/// destination list until sorting
#[derive(Debug, Clone, Default)]
pub struct GroupedImports {
    pub named_package: Vec<ImportStatement>,
    pub absolute: Vec<ImportStatement>,
    pub absolute_custom: HashMap<String, Vec<ImportStatement>>,
    pub relative: Vec<ImportStatement>,
    pub relative_custom: HashMap<String, Vec<ImportStatement>>,
}

impl GroupedImports {
    /// Total number of statements across all categories and buckets
    pub fn total(&self) -> usize {
        self.named_package.len()
            + self.absolute.len()
            + self.absolute_custom.values().map(Vec::len).sum::<usize>()
            + self.relative.len()
            + self.relative_custom.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Kind of a non-fatal formatting warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Specifier matched no configured category or bucket
    UnclassifiableSpecifier,
    /// Statement's specifier is not a plain string literal
    MalformedSpecifier,
}

/// A warning tied to one offending statement; the statement is dropped from
/// the formatted categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatWarning {
    pub kind: WarningKind,
    pub specifier: String,
}

impl FormatWarning {
    pub fn new(kind: WarningKind, specifier: impl Into<String>) -> Self {
        Self {
            kind,
            specifier: specifier.into(),
        }
    }
}

/// Outcome of formatting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Import block was rewritten (or would be, in check mode)
    Changed,
    /// File already in canonical form
    Unchanged,
    /// File has no import statements
    NoImports,
    /// File could not be read, parsed or written
    Failed,
}

/// Per-file result within a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Relative path from the run root
    pub path: PathBuf,
    pub language: Language,
    pub outcome: FileOutcome,
    /// Number of statements that went through the pipeline
    pub import_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FormatWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Statistics about a formatting run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatStats {
    pub total_files: usize,
    pub changed_files: usize,
    pub unchanged_files: usize,
    pub no_import_files: usize,
    pub failed_files: usize,
    pub total_imports: usize,
    pub total_warnings: usize,
    pub javascript_files: usize,
    pub typescript_files: usize,
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub duration_ms: u64,
    pub files_per_second: f64,
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            files_per_second: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Aggregated results of a formatting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatReport {
    /// Run root path
    pub root: PathBuf,
    /// All files processed
    pub files: Vec<FileReport>,
    /// Run statistics
    pub stats: FormatStats,
    /// Run metadata
    pub metadata: RunMetadata,
}

impl FormatReport {
    /// Filter to only the files that produced warnings
    pub fn filter_to_warnings(&self) -> Self {
        let files: Vec<FileReport> = self
            .files
            .iter()
            .filter(|f| !f.warnings.is_empty())
            .cloned()
            .collect();

        let stats = Self::calculate_stats(&files);

        FormatReport {
            root: self.root.clone(),
            files,
            stats,
            metadata: self.metadata.clone(),
        }
    }

    /// Filter to only the files whose import block needed rewriting
    pub fn filter_to_changed(&self) -> Self {
        let files: Vec<FileReport> = self
            .files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Changed)
            .cloned()
            .collect();

        let stats = Self::calculate_stats(&files);

        FormatReport {
            root: self.root.clone(),
            files,
            stats,
            metadata: self.metadata.clone(),
        }
    }

    /// Aggregate per-file reports into run statistics
    pub fn calculate_stats(files: &[FileReport]) -> FormatStats {
        let mut stats = FormatStats::default();
        stats.total_files = files.len();

        for file in files {
            match file.language {
                Language::JavaScript => stats.javascript_files += 1,
                Language::TypeScript | Language::Tsx => stats.typescript_files += 1,
            }

            match file.outcome {
                FileOutcome::Changed => stats.changed_files += 1,
                FileOutcome::Unchanged => stats.unchanged_files += 1,
                FileOutcome::NoImports => stats.no_import_files += 1,
                FileOutcome::Failed => stats.failed_files += 1,
            }

            stats.total_imports += file.import_count;
            stats.total_warnings += file.warnings.len();
        }

        stats
    }
}
