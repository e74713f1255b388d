use std::collections::HashMap;

use crate::models::{Category, GroupedImports, ImportStatement};
use crate::policy::CategoryPolicy;

/// Re-serialize sorted imports in the fixed category order.
///
/// Each non-empty category or sub-bucket emits its statements' trimmed raw
/// text one per line, followed by exactly one blank line. Empty categories
/// contribute nothing, not even a blank line. The final block may end with
/// a trailing blank line; the caller decides whether to trim it.
pub fn merge(sorted: &GroupedImports, policy: &CategoryPolicy) -> String {
    let mut result = String::new();

    for category in Category::EMIT_ORDER {
        match category {
            Category::NamedPackage => emit_list(&sorted.named_package, &mut result),
            Category::Absolute => emit_list(&sorted.absolute, &mut result),
            Category::AbsoluteCustom => emit_buckets(&sorted.absolute_custom, policy, &mut result),
            Category::Relative => emit_list(&sorted.relative, &mut result),
            Category::RelativeCustom => emit_buckets(&sorted.relative_custom, policy, &mut result),
        }
    }

    result
}

fn emit_list(statements: &[ImportStatement], result: &mut String) {
    if statements.is_empty() {
        return;
    }

    for statement in statements {
        result.push_str(statement.raw.trim());
        result.push('\n');
    }
    result.push('\n');
}

fn emit_buckets(
    buckets: &HashMap<String, Vec<ImportStatement>>,
    policy: &CategoryPolicy,
    result: &mut String,
) {
    // Emission order comes from the policy's declared bucket order, never
    // from the map's key order
    for bucket in policy.bucket_order() {
        if let Some(statements) = buckets.get(bucket) {
            emit_list(statements, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::group;
    use crate::sorter::sort;

    fn stmt(specifier: &str) -> ImportStatement {
        let raw = format!("  import x from \"{}\";  ", specifier);
        ImportStatement {
            specifier: specifier.to_string(),
            raw,
            start: 0,
            end: 0,
            line: 1,
            column: 0,
        }
    }

    fn format(statements: &[ImportStatement], policy: &CategoryPolicy) -> String {
        let (grouped, _) = group(statements, policy);
        merge(&sort(grouped), policy)
    }

    #[test]
    fn test_raw_text_is_trimmed() {
        let policy = CategoryPolicy::default();
        let output = format(&[stmt("react")], &policy);
        assert_eq!(output, "import x from \"react\";\n\n");
    }

    #[test]
    fn test_categories_in_fixed_order_with_blank_lines() {
        let policy = CategoryPolicy::default();
        let statements = vec![stmt("./b"), stmt("react"), stmt("lodash"), stmt("./a")];

        let output = format(&statements, &policy);

        assert_eq!(
            output,
            "import x from \"react\";\n\
             \n\
             import x from \"lodash\";\n\
             \n\
             import x from \"./a\";\n\
             import x from \"./b\";\n\
             \n"
        );
    }

    #[test]
    fn test_empty_categories_emit_nothing() {
        let policy = CategoryPolicy::default();
        let output = format(&[stmt("./only")], &policy);

        // No stray blank lines from the empty categories before Relative
        assert_eq!(output, "import x from \"./only\";\n\n");
    }

    #[test]
    fn test_buckets_emitted_in_policy_order() {
        let policy = CategoryPolicy::default();
        // "state" is declared after "components", regardless of input order
        let statements = vec![stmt("state/y"), stmt("components/x")];

        let output = format(&statements, &policy);

        assert_eq!(
            output,
            "import x from \"components/x\";\n\
             \n\
             import x from \"state/y\";\n\
             \n"
        );
    }

    #[test]
    fn test_scenario_mixed_input() {
        let policy = CategoryPolicy::default();
        let statements = vec![
            stmt("./b"),
            stmt("react"),
            stmt("components/x"),
            stmt("./a"),
            stmt("state/y"),
        ];

        let output = format(&statements, &policy);

        assert_eq!(
            output,
            "import x from \"react\";\n\
             \n\
             import x from \"components/x\";\n\
             \n\
             import x from \"state/y\";\n\
             \n\
             import x from \"./a\";\n\
             import x from \"./b\";\n\
             \n"
        );
    }

    #[test]
    fn test_deterministic_output() {
        let policy = CategoryPolicy::default();
        let statements = vec![stmt("modules/a"), stmt("react"), stmt("./z")];

        let first = format(&statements, &policy);
        let second = format(&statements, &policy);
        assert_eq!(first, second);
    }
}
