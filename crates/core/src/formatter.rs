use thiserror::Error;

use crate::emitter::merge;
use crate::grouper::group;
use crate::models::{FormatWarning, ImportStatement, Language, WarningKind};
use crate::parsers::{create_parser, ParserError};
use crate::policy::CategoryPolicy;
use crate::sorter::sort;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("no import statements found")]
    NoImportsFound,
    #[error("Parser error: {0}")]
    ParserError(#[from] ParserError),
}

/// A formatted import block and the warnings accumulated while building it
#[derive(Debug, Clone)]
pub struct FormattedBlock {
    /// The canonical block text; may end with a trailing blank line, the
    /// caller decides whether to keep it
    pub text: String,
    pub warnings: Vec<FormatWarning>,
}

/// Run the classify/group/sort/merge pipeline over an ordered statement
/// list. The statements must be in original source order; an empty list is
/// fatal and produces no output.
pub fn format_import_block(
    statements: &[ImportStatement],
    policy: &CategoryPolicy,
) -> Result<FormattedBlock, FormatError> {
    if statements.is_empty() {
        return Err(FormatError::NoImportsFound);
    }

    let (grouped, warnings) = group(statements, policy);
    let sorted = sort(grouped);
    let text = merge(&sorted, policy);

    Ok(FormattedBlock { text, warnings })
}

/// The source span a host should replace with the formatted block: the
/// first statement's start through the last statement's end, in original
/// source order.
pub fn replacement_span(statements: &[ImportStatement]) -> Option<(usize, usize)> {
    let first = statements.first()?;
    let last = statements.last()?;
    Some((first.start, last.end))
}

/// Result of formatting a whole file
#[derive(Debug, Clone)]
pub struct FormattedFile {
    /// The complete new file text
    pub source: String,
    /// The replacement block spliced over the original import span
    pub block: String,
    pub warnings: Vec<FormatWarning>,
    /// Statements that went through the pipeline, malformed ones included
    pub import_count: usize,
    pub changed: bool,
}

/// Parse a file, format its import block and splice the result back over
/// the original span, leaving all other file content untouched.
///
/// Statements without a plain string specifier are not classified; their
/// text is re-emitted verbatim after the formatted categories so nothing
/// inside the replaced span is lost, and each is reported as a
/// `MalformedSpecifier` warning.
pub fn format_source(
    source: &str,
    language: Language,
    policy: &CategoryPolicy,
) -> Result<FormattedFile, FormatError> {
    let mut parser = create_parser(language)?;
    let parsed = parser.parse(source);

    if parsed.statements.is_empty() {
        return Err(FormatError::NoImportsFound);
    }

    let mut warnings: Vec<FormatWarning> = parsed
        .malformed
        .iter()
        .map(|s| FormatWarning::new(WarningKind::MalformedSpecifier, s.specifier.clone()))
        .collect();

    let block = format_import_block(&parsed.statements, policy)?;
    warnings.extend(block.warnings);

    let mut text = block.text;
    if !parsed.malformed.is_empty() {
        for statement in &parsed.malformed {
            text.push_str(statement.raw.trim());
            text.push('\n');
        }
        text.push('\n');
    }

    // The replaced span covers every extracted statement, malformed ones
    // included
    let start = parsed
        .statements
        .iter()
        .chain(&parsed.malformed)
        .map(|s| s.start)
        .min()
        .unwrap_or(0);
    let end = parsed
        .statements
        .iter()
        .chain(&parsed.malformed)
        .map(|s| s.end)
        .max()
        .unwrap_or(0);

    let replacement = text.trim_end().to_string();
    let mut new_source = String::with_capacity(source.len());
    new_source.push_str(&source[..start]);
    new_source.push_str(&replacement);
    new_source.push_str(&source[end..]);

    let changed = new_source != source;
    let import_count = parsed.total();

    Ok(FormattedFile {
        source: new_source,
        block: replacement,
        warnings,
        import_count,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(specifier: &str) -> ImportStatement {
        ImportStatement {
            specifier: specifier.to_string(),
            raw: format!("import x from \"{}\";", specifier),
            start: 0,
            end: 0,
            line: 1,
            column: 0,
        }
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let policy = CategoryPolicy::default();
        let result = format_import_block(&[], &policy);
        assert!(matches!(result, Err(FormatError::NoImportsFound)));
    }

    #[test]
    fn test_block_multiset_preserved() {
        let policy = CategoryPolicy::default();
        let statements = vec![
            stmt("./b"),
            stmt("react"),
            stmt("components/x"),
            stmt("./a"),
            stmt("state/y"),
        ];

        let block = format_import_block(&statements, &policy).unwrap();

        assert!(block.warnings.is_empty());
        // Every input statement appears exactly once in the output
        for statement in &statements {
            let needle = statement.raw.trim();
            assert_eq!(block.text.matches(needle).count(), 1, "{}", needle);
        }
    }

    #[test]
    fn test_dropped_statements_are_exactly_the_warned_ones() {
        let policy = CategoryPolicy::default()
            .with_absolute_prefixes(vec!["state".to_string()])
            .with_positional_relative_prefixes(vec![
                "./state".to_string(),
                "./orphan".to_string(),
            ]);

        let statements = vec![stmt("./state/a"), stmt("./orphan/b"), stmt("lodash")];
        let block = format_import_block(&statements, &policy).unwrap();

        assert_eq!(block.warnings.len(), 1);
        assert_eq!(block.warnings[0].specifier, "./orphan/b");
        assert!(!block.text.contains("./orphan/b"));
        assert!(block.text.contains("./state/a"));
        assert!(block.text.contains("lodash"));
    }

    #[test]
    fn test_replacement_span() {
        let mut first = stmt("react");
        first.start = 12;
        first.end = 40;
        let mut last = stmt("./a");
        last.start = 41;
        last.end = 62;

        assert_eq!(replacement_span(&[first, last]), Some((12, 62)));
        assert_eq!(replacement_span(&[]), None);
    }

    #[test]
    fn test_format_source_rewrites_block_only() {
        let policy = CategoryPolicy::default();
        let source = "// header\n\
                      import b from \"./b\";\n\
                      import react from \"react\";\n\
                      \n\
                      const x = 1;\n";

        let result = format_source(source, Language::TypeScript, &policy).unwrap();

        assert!(result.changed);
        assert!(result.warnings.is_empty());
        assert_eq!(result.import_count, 2);
        assert_eq!(
            result.source,
            "// header\n\
             import react from \"react\";\n\
             \n\
             import b from \"./b\";\n\
             \n\
             const x = 1;\n"
        );
    }

    #[test]
    fn test_format_source_is_idempotent() {
        let policy = CategoryPolicy::default();
        let source = "import z from \"./z\";\n\
                      import state from \"state/store\";\n\
                      import react from \"react\";\n\
                      import a from \"./a\";\n";

        let first = format_source(source, Language::TypeScript, &policy).unwrap();
        assert!(first.changed);

        let second = format_source(&first.source, Language::TypeScript, &policy).unwrap();
        assert!(!second.changed);
        assert_eq!(second.source, first.source);
    }

    #[test]
    fn test_format_source_no_imports() {
        let policy = CategoryPolicy::default();
        let result = format_source("const x = 1;\n", Language::JavaScript, &policy);
        assert!(matches!(result, Err(FormatError::NoImportsFound)));
    }

    #[test]
    fn test_malformed_statement_kept_verbatim() {
        let policy = CategoryPolicy::default();
        let source = "import state from \"state/store\";\n\
                      import fs = require(\"fs\");\n\
                      import a from \"./a\";\n";

        let result = format_source(source, Language::TypeScript, &policy).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MalformedSpecifier);
        assert_eq!(result.import_count, 3);
        assert_eq!(
            result.source,
            "import state from \"state/store\";\n\
             \n\
             import a from \"./a\";\n\
             \n\
             import fs = require(\"fs\");\n"
        );
    }
}
