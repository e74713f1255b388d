use crate::classifier::classify;
use crate::models::{
    Category, FormatWarning, GroupedImports, ImportStatement, WarningKind,
};
use crate::policy::CategoryPolicy;

/// Route statements into their categories, preserving original relative
/// order within each destination list. Bucket lists are created lazily on
/// first use.
///
/// A statement whose bucket is not declared by the policy is dropped from
/// the output and reported as a warning; remaining statements are
/// unaffected. Warnings are returned as a value, never logged.
pub fn group(
    statements: &[ImportStatement],
    policy: &CategoryPolicy,
) -> (GroupedImports, Vec<FormatWarning>) {
    let mut grouped = GroupedImports::default();
    let mut warnings = Vec::new();

    for statement in statements {
        let classification = classify(&statement.specifier, policy);

        match classification.category {
            Category::NamedPackage => grouped.named_package.push(statement.clone()),
            Category::Absolute => grouped.absolute.push(statement.clone()),
            Category::Relative => grouped.relative.push(statement.clone()),
            Category::AbsoluteCustom | Category::RelativeCustom => {
                let bucket = classification.bucket.unwrap_or_default();
                if !policy.is_declared_bucket(&bucket) {
                    warnings.push(FormatWarning::new(
                        WarningKind::UnclassifiableSpecifier,
                        statement.specifier.clone(),
                    ));
                    continue;
                }

                let buckets = if classification.category == Category::AbsoluteCustom {
                    &mut grouped.absolute_custom
                } else {
                    &mut grouped.relative_custom
                };
                buckets.entry(bucket).or_default().push(statement.clone());
            }
        }
    }

    (grouped, warnings)
}
