use tracing::trace;

use crate::core::types::{ACTION_CATALOG, ActionItem, ColumnDataType, TransformKind};

/// Compute the transform actions offered for a column.
///
/// The result is always a sub-sequence of [`ACTION_CATALOG`]. A `None` or empty
/// `visible` filter places no restriction on the catalog; a non-empty one keeps
/// only the kinds it names, still in catalog order.
pub fn resolve_actions(
    column_type: &ColumnDataType,
    visible: Option<&[TransformKind]>,
) -> Vec<ActionItem> {
    if column_type.is_opaque() {
        trace!(%column_type, "no actions for opaque column type");
        return Vec::new();
    }

    let filter = visible.filter(|kinds| !kinds.is_empty());
    let scalar = !column_type.is_structured_or_text();

    let items: Vec<ActionItem> = ACTION_CATALOG
        .iter()
        .copied()
        .filter(|item| filter.is_none_or(|kinds| kinds.contains(&item.transform)))
        // Atomic values have no sub-string or sub-element to address
        .filter(|item| {
            !(scalar && matches!(item.transform, TransformKind::Extract | TransformKind::Split))
        })
        .collect();

    trace!(%column_type, count = items.len(), "resolved selection actions");
    items
}
