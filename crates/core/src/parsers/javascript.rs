use tree_sitter::{Node, Parser};

use crate::models::{ImportStatement, Language};

use super::{ImportParser, ParsedImports, ParserError};

/// Extracts top-level ESM import statements from JavaScript, TypeScript and
/// TSX sources.
pub struct JavaScriptParser {
    parser: Parser,
    language: Language,
}

impl JavaScriptParser {
    pub fn new(language: Language) -> Result<Self, ParserError> {
        let mut parser = Parser::new();

        let grammar = match language {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };

        parser
            .set_language(&grammar)
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser, language })
    }

    fn extract_imports(&self, source: &str, tree: &tree_sitter::Tree) -> ParsedImports {
        let mut parsed = ParsedImports::default();
        let root = tree.root_node();

        // Imports are module-level statements; only the root's direct
        // children are inspected
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == "import_statement" {
                self.collect_import(&child, source, &mut parsed);
            }
        }

        parsed
    }

    fn collect_import(&self, node: &Node, source: &str, parsed: &mut ParsedImports) {
        let raw = self.get_node_text(node, source);
        let specifier = self.find_specifier(node, source);

        match specifier {
            Some(specifier) if !specifier.is_empty() => {
                parsed.statements.push(self.build_statement(node, specifier, raw));
            }
            _ => {
                // No plain string specifier (e.g. `import x = require(...)`)
                let display = raw.trim().to_string();
                parsed.malformed.push(self.build_statement(node, display, raw));
            }
        }
    }

    /// The specifier string literal is a direct child of the statement node
    fn find_specifier(&self, node: &Node, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "string" {
                return Some(self.extract_string_value(&child, source));
            }
        }
        None
    }

    fn build_statement(&self, node: &Node, specifier: String, raw: String) -> ImportStatement {
        ImportStatement {
            specifier,
            raw,
            start: node.start_byte(),
            end: node.end_byte(),
            line: node.start_position().row + 1,
            column: node.start_position().column,
        }
    }

    fn extract_string_value(&self, node: &Node, source: &str) -> String {
        let text = self.get_node_text(node, source);
        // Remove quotes
        text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string()
    }

    fn get_node_text(&self, node: &Node, source: &str) -> String {
        source[node.byte_range()].to_string()
    }
}

impl ImportParser for JavaScriptParser {
    fn parse(&mut self, source: &str) -> ParsedImports {
        match self.parser.parse(source, None) {
            Some(tree) => self.extract_imports(source, &tree),
            None => ParsedImports::default(),
        }
    }

    fn language(&self) -> Language {
        self.language
    }
}
