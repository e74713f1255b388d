use super::OutputError;
use crate::models::FormatReport;

/// Serialize a FormatReport to pretty-printed JSON
pub fn to_json(report: &FormatReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::from)
}

/// Serialize a FormatReport to compact JSON
#[allow(dead_code)]
pub fn to_json_compact(report: &FormatReport) -> Result<String, OutputError> {
    serde_json::to_string(report).map_err(OutputError::from)
}
