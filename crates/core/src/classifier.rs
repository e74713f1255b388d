use crate::models::{Category, Classification};
use crate::policy::CategoryPolicy;

/// Classify a module specifier, first match wins.
///
/// Matching is a plain string-prefix test: a specifier may match a shorter
/// unrelated prefix that shares leading characters (prefix "state" matches
/// "statex/foo"). That approximation is part of the contract.
pub fn classify(specifier: &str, policy: &CategoryPolicy) -> Classification {
    if specifier == policy.named_package {
        return Classification::flat(Category::NamedPackage);
    }

    if policy.is_relative(specifier) {
        if let Some(entry) = policy
            .relative_custom_prefixes
            .iter()
            .find(|entry| specifier.starts_with(entry.prefix.as_str()))
        {
            return Classification::bucketed(Category::RelativeCustom, entry.bucket.clone());
        }
        return Classification::flat(Category::Relative);
    }

    if let Some(prefix) = policy
        .absolute_custom_prefixes
        .iter()
        .find(|prefix| specifier.starts_with(prefix.as_str()))
    {
        return Classification::bucketed(Category::AbsoluteCustom, prefix.clone());
    }

    Classification::flat(Category::Absolute)
}
