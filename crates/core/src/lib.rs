//! FmtImports Core Library
//!
//! This library rewrites the import statements at the top of a
//! JavaScript/TypeScript source file into a deterministic, canonical layout:
//! each statement is classified against a configurable policy, sorted within
//! its category, and re-emitted as contiguous blocks separated by blank
//! lines, in a fixed category order.
//!
//! # Features
//!
//! - Classify module specifiers (named package, absolute, relative, custom
//!   prefix buckets)
//! - Stable lexicographic ordering within every category and bucket
//! - Parse JavaScript/TypeScript/TSX imports with tree-sitter
//! - Format single sources or whole directory trees (check or write mode)
//! - Report results in JSON, YAML or summary format
//!
//! # Example
//!
//! ```
//! use fmtimports_core::{format_source, CategoryPolicy, Language};
//!
//! let source = "import b from \"./b\";\nimport react from \"react\";\n";
//! let policy = CategoryPolicy::default();
//!
//! let result = format_source(source, Language::TypeScript, &policy).unwrap();
//! assert!(result.source.starts_with("import react from \"react\";"));
//! ```

pub mod classifier;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod formatter;
pub mod grouper;
pub mod models;
pub mod output;
pub mod parsers;
pub mod policy;
pub mod sorter;

// Re-exports for convenience
pub use config::RunConfig;
pub use engine::{EngineError, FormatEngine};
pub use formatter::{
    format_import_block, format_source, replacement_span, FormatError, FormattedBlock,
    FormattedFile,
};
pub use models::*;
pub use output::{format_report, format_summary, OutputFormat};
pub use policy::{CategoryPolicy, PolicyError, RelativeCustomPrefix};
