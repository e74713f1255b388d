use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML policy: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse JSON policy: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse YAML policy: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Unsupported policy file extension: {0}")]
    UnsupportedExtension(String),
}

/// A relative-custom rule: specifiers starting with `prefix` are routed to
/// the sub-bucket named `bucket`, which must be a declared absolute prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeCustomPrefix {
    pub prefix: String,
    pub bucket: String,
}

/// Classification policy: the fixed category set is closed, this configures
/// how specifiers are routed into it and in which order buckets are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPolicy {
    /// Exact-match specifier routed to its own always-first category
    pub named_package: String,
    /// Ordered bucket prefixes for module-style specifiers; declaration
    /// order is the emission order for both bucketed categories
    pub absolute_custom_prefixes: Vec<String>,
    /// Ordered bucket rules for relative specifiers; empty disables the
    /// relative-custom category
    pub relative_custom_prefixes: Vec<RelativeCustomPrefix>,
    /// Token prefixes that mark a specifier as relative
    pub relative_path_tokens: Vec<String>,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self {
            named_package: "react".to_string(),
            absolute_custom_prefixes: vec![
                "common".to_string(),
                "components".to_string(),
                "modules".to_string(),
                "routing".to_string(),
                "state".to_string(),
            ],
            relative_custom_prefixes: vec![],
            relative_path_tokens: vec![".".to_string(), "..".to_string(), "/".to_string()],
        }
    }
}

impl CategoryPolicy {
    /// Set the always-first package (builder pattern)
    pub fn with_named_package(mut self, name: impl Into<String>) -> Self {
        self.named_package = name.into();
        self
    }

    /// Set the absolute bucket prefixes (builder pattern)
    pub fn with_absolute_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.absolute_custom_prefixes = prefixes;
        self
    }

    /// Set relative-custom rules with explicit bucket names (builder pattern)
    pub fn with_relative_prefixes(mut self, prefixes: Vec<RelativeCustomPrefix>) -> Self {
        self.relative_custom_prefixes = prefixes;
        self
    }

    /// Set relative-custom rules from bare prefixes, pairing each with the
    /// absolute bucket name at the same position. A prefix past the end of
    /// the absolute list keeps its own text as bucket name, which no
    /// declared bucket matches, so its statements are dropped with a
    /// warning at grouping time.
    pub fn with_positional_relative_prefixes(mut self, prefixes: Vec<String>) -> Self {
        let entries: Vec<RelativeCustomPrefix> = prefixes
            .into_iter()
            .enumerate()
            .map(|(index, prefix)| {
                let bucket = self
                    .absolute_custom_prefixes
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| prefix.clone());
                RelativeCustomPrefix { prefix, bucket }
            })
            .collect();
        self.relative_custom_prefixes = entries;
        self
    }

    /// Load a policy from a TOML, JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "toml" => Ok(toml::from_str(&content)?),
            "json" => Ok(serde_json::from_str(&content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            other => Err(PolicyError::UnsupportedExtension(other.to_string())),
        }
    }

    /// Whether the specifier is relative under this policy
    pub fn is_relative(&self, specifier: &str) -> bool {
        self.relative_path_tokens
            .iter()
            .any(|token| specifier.starts_with(token.as_str()))
    }

    /// Declared sub-bucket names in emission order, duplicates removed
    pub fn bucket_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for prefix in &self.absolute_custom_prefixes {
            if !order.contains(&prefix.as_str()) {
                order.push(prefix.as_str());
            }
        }
        order
    }

    /// Whether `bucket` is a declared sub-bucket name
    pub fn is_declared_bucket(&self, bucket: &str) -> bool {
        self.absolute_custom_prefixes
            .iter()
            .any(|prefix| prefix == bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CategoryPolicy::default();
        assert_eq!(policy.named_package, "react");
        assert_eq!(policy.absolute_custom_prefixes.len(), 5);
        assert!(policy.relative_custom_prefixes.is_empty());
        assert_eq!(policy.relative_path_tokens, vec![".", "..", "/"]);
    }

    #[test]
    fn test_positional_relative_prefixes() {
        let policy = CategoryPolicy::default()
            .with_positional_relative_prefixes(vec!["./common".to_string(), "./ui".to_string()]);

        assert_eq!(
            policy.relative_custom_prefixes[0],
            RelativeCustomPrefix {
                prefix: "./common".to_string(),
                bucket: "common".to_string(),
            }
        );
        assert_eq!(
            policy.relative_custom_prefixes[1],
            RelativeCustomPrefix {
                prefix: "./ui".to_string(),
                bucket: "components".to_string(),
            }
        );
    }

    #[test]
    fn test_positional_relative_prefixes_past_absolute_list() {
        let policy = CategoryPolicy::default()
            .with_absolute_prefixes(vec!["state".to_string()])
            .with_positional_relative_prefixes(vec![
                "./state".to_string(),
                "./orphan".to_string(),
            ]);

        assert_eq!(policy.relative_custom_prefixes[1].bucket, "./orphan");
        assert!(!policy.is_declared_bucket("./orphan"));
    }

    #[test]
    fn test_is_relative() {
        let policy = CategoryPolicy::default();
        assert!(policy.is_relative("./foo"));
        assert!(policy.is_relative("../foo"));
        assert!(policy.is_relative("/abs/path"));
        assert!(!policy.is_relative("react-dom"));
    }

    #[test]
    fn test_bucket_order_dedupes() {
        let policy = CategoryPolicy::default().with_absolute_prefixes(vec![
            "state".to_string(),
            "common".to_string(),
            "state".to_string(),
        ]);
        assert_eq!(policy.bucket_order(), vec!["state", "common"]);
    }

    #[test]
    fn test_policy_from_toml() {
        let toml_src = r#"
named_package = "preact"
absolute_custom_prefixes = ["app", "shared"]
"#;
        let policy: CategoryPolicy = toml::from_str(toml_src).unwrap();
        assert_eq!(policy.named_package, "preact");
        assert_eq!(policy.absolute_custom_prefixes, vec!["app", "shared"]);
        // Defaulted fields
        assert_eq!(policy.relative_path_tokens, vec![".", "..", "/"]);
        assert!(policy.relative_custom_prefixes.is_empty());
    }

    #[test]
    fn test_policy_from_json() {
        let json_src = r#"{
            "relative_custom_prefixes": [
                { "prefix": "./state", "bucket": "state" }
            ]
        }"#;
        let policy: CategoryPolicy = serde_json::from_str(json_src).unwrap();
        assert_eq!(policy.named_package, "react");
        assert_eq!(policy.relative_custom_prefixes[0].prefix, "./state");
        assert_eq!(policy.relative_custom_prefixes[0].bucket, "state");
    }
}
