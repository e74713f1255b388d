mod javascript;

pub use javascript::JavaScriptParser;

use crate::models::{ImportStatement, Language};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),
}

/// Import statements extracted from one file, in original source order
#[derive(Debug, Clone, Default)]
pub struct ParsedImports {
    /// Statements whose specifier is a plain string literal
    pub statements: Vec<ImportStatement>,
    /// Import statements whose specifier could not be read as a plain
    /// string; excluded from classification
    pub malformed: Vec<ImportStatement>,
}

impl ParsedImports {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.malformed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.statements.len() + self.malformed.len()
    }
}

/// Trait for language-specific import parsers
pub trait ImportParser {
    /// Parse source code and extract its import statements
    fn parse(&mut self, source: &str) -> ParsedImports;

    /// Get the language this parser handles
    fn language(&self) -> Language;
}

/// Create a parser for the given language
pub fn create_parser(language: Language) -> Result<Box<dyn ImportParser>, ParserError> {
    Ok(Box::new(JavaScriptParser::new(language)?))
}
