//! WASM bindings for FmtImports
//!
//! This module provides WebAssembly bindings for the import formatter,
//! allowing editor extensions and web applications to format in-memory
//! sources without filesystem access.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use fmtimports_core::{format_source, CategoryPolicy, FormatError, FormatWarning, Language};

/// Result envelope returned to the JavaScript host
#[derive(Serialize, Deserialize)]
pub struct WasmFormatResult {
    pub success: bool,
    pub changed: bool,
    pub data: Option<String>,
    pub warnings: Vec<FormatWarning>,
    pub error: Option<String>,
}

impl WasmFormatResult {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            changed: false,
            data: None,
            warnings: vec![],
            error: Some(error),
        }
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn language_from_tag(language: &str) -> Option<Language> {
    match language {
        "javascript" | "js" | "jsx" => Some(Language::JavaScript),
        "typescript" | "ts" => Some(Language::TypeScript),
        "tsx" => Some(Language::Tsx),
        _ => None,
    }
}

fn policy_from_json(policy_json: &str) -> Result<CategoryPolicy, String> {
    if policy_json.is_empty() {
        return Ok(CategoryPolicy::default());
    }
    serde_json::from_str(policy_json).map_err(|e| format!("invalid policy: {}", e))
}

/// Format the import block of a single source string and return the full
/// new source. `language` is one of "javascript", "typescript" or "tsx";
/// `policy_json` is a JSON policy object or the empty string for defaults.
#[wasm_bindgen]
pub fn format_imports(source: &str, language: &str, policy_json: &str) -> JsValue {
    let result = format_imports_impl(source, language, policy_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn format_imports_impl(source: &str, language: &str, policy_json: &str) -> WasmFormatResult {
    let Some(language) = language_from_tag(language) else {
        return WasmFormatResult::failure(format!("unsupported language: {}", language));
    };

    let policy = match policy_from_json(policy_json) {
        Ok(policy) => policy,
        Err(e) => return WasmFormatResult::failure(e),
    };

    match format_source(source, language, &policy) {
        Ok(result) => WasmFormatResult {
            success: true,
            changed: result.changed,
            data: Some(result.source),
            warnings: result.warnings,
            error: None,
        },
        // A source without imports passes through unchanged
        Err(FormatError::NoImportsFound) => WasmFormatResult {
            success: true,
            changed: false,
            data: Some(source.to_string()),
            warnings: vec![],
            error: None,
        },
        Err(e) => WasmFormatResult::failure(e.to_string()),
    }
}

/// Parse a single source and return its import statements as JSON
#[wasm_bindgen]
pub fn parse_imports(source: &str, language: &str) -> JsValue {
    use fmtimports_core::parsers::{create_parser, ImportParser};

    let Some(language) = language_from_tag(language) else {
        let result = WasmFormatResult::failure(format!("unsupported language: {}", language));
        return serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL);
    };

    let result = match create_parser(language) {
        Ok(mut parser) => {
            let parsed = parser.parse(source);
            WasmFormatResult {
                success: true,
                changed: false,
                data: serde_json::to_string(&parsed.statements).ok(),
                warnings: vec![],
                error: None,
            }
        }
        Err(e) => WasmFormatResult::failure(e.to_string()),
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
