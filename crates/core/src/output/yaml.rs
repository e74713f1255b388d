use super::OutputError;
use crate::models::FormatReport;

/// Serialize a FormatReport to YAML
pub fn to_yaml(report: &FormatReport) -> Result<String, OutputError> {
    serde_yaml::to_string(report).map_err(OutputError::from)
}
