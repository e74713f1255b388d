use crate::models::{GroupedImports, ImportStatement};

/// Stable-sort every flat list and every sub-bucket list by specifier,
/// preserving the grouped shape. Statements with equal specifiers keep
/// their original relative order.
pub fn sort(mut grouped: GroupedImports) -> GroupedImports {
    sort_list(&mut grouped.named_package);
    sort_list(&mut grouped.absolute);
    sort_list(&mut grouped.relative);

    for list in grouped.absolute_custom.values_mut() {
        sort_list(list);
    }
    for list in grouped.relative_custom.values_mut() {
        sort_list(list);
    }

    grouped
}

fn sort_list(list: &mut [ImportStatement]) {
    list.sort_by(|a, b| a.specifier.cmp(&b.specifier));
}
