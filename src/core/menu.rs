use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::location::{
    LIST_OF_ITEMS_KEY, Location, NavigationTarget, base_state, build_target, effective_column_type,
};
use crate::core::resolver::resolve_actions;
use crate::core::types::{ActionItem, ColumnDataType, TransformKind, catalog_item};

/// Everything the host knows about the current text selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub column_name: String,
    pub column_type: ColumnDataType,
    pub location: Location,
    /// Restrict the offered transforms; `None` or empty offers all of them
    #[serde(default)]
    pub visible_items: Option<Vec<TransformKind>>,
}

impl SelectionContext {
    pub fn new(
        column_name: impl Into<String>,
        column_type: ColumnDataType,
        location: Location,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_type,
            location,
            visible_items: None,
        }
    }

    pub fn with_visible_items(mut self, items: Vec<TransformKind>) -> Self {
        self.visible_items = Some(items);
        self
    }

    /// Sub-elements covered by the selection, when it spans a list
    pub fn list_of_items(&self) -> Option<&Vec<Value>> {
        self.location
            .state
            .as_ref()
            .and_then(|state| state.get(LIST_OF_ITEMS_KEY))
            .and_then(Value::as_array)
    }

    /// True when the selection covers more than one list element
    pub fn is_list_selection(&self) -> bool {
        self.list_of_items().is_some_and(|items| items.len() > 1)
    }

    pub fn effective_column_type(&self) -> ColumnDataType {
        effective_column_type(&self.location, &self.column_type)
    }
}

/// One row of the popover
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuEntry {
    Transform {
        item: ActionItem,
        target: NavigationTarget,
    },
    Separator,
    CopySelection,
}

impl MenuEntry {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, MenuEntry::Separator)
    }

    /// Translation key of the entry's label
    pub fn label_key(&self) -> Option<&'static str> {
        match self {
            MenuEntry::Transform { item, .. } => Some(item.name),
            MenuEntry::Separator => None,
            MenuEntry::CopySelection => Some(crate::core::i18n::COPY_SELECTION_KEY),
        }
    }
}

/// Decide the rows of the popover for a selection.
///
/// A selection spanning several list elements only offers whole-list
/// extraction. Otherwise every resolved transform gets a row. The copy row is
/// always last and is preceded by a separator when anything precedes it.
pub fn compose_entries(ctx: &SelectionContext) -> Vec<MenuEntry> {
    let column_type = ctx.effective_column_type();
    let state = base_state(&ctx.column_name, &ctx.location, &column_type);
    let transform = |item: ActionItem| MenuEntry::Transform {
        target: build_target(&ctx.location, &state, &item),
        item,
    };

    let mut entries: Vec<MenuEntry> = if ctx.is_list_selection() {
        debug!(column = %ctx.column_name, "list selection, offering whole-list extract");
        vec![transform(catalog_item(TransformKind::Extract))]
    } else {
        resolve_actions(&column_type, ctx.visible_items.as_deref())
            .into_iter()
            .map(transform)
            .collect()
    };

    if !entries.is_empty() {
        entries.push(MenuEntry::Separator);
    }
    entries.push(MenuEntry::CopySelection);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::StateMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn transforms(entries: &[MenuEntry]) -> Vec<TransformKind> {
        entries
            .iter()
            .filter_map(|e| match e {
                MenuEntry::Transform { item, .. } => Some(item.transform),
                _ => None,
            })
            .collect()
    }

    fn list_state(items: Value) -> StateMap {
        let mut state = StateMap::new();
        state.insert(LIST_OF_ITEMS_KEY.to_string(), items);
        state
    }

    #[test]
    fn test_text_column_entries() {
        let ctx = SelectionContext::new("name", ColumnDataType::Text, Location::new("/ds"));
        let entries = compose_entries(&ctx);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[5], MenuEntry::Separator);
        assert_eq!(entries[6], MenuEntry::CopySelection);
        assert_eq!(transforms(&entries).len(), 5);
    }

    #[test]
    fn test_opaque_column_only_copies() {
        let ctx = SelectionContext::new("blob", ColumnDataType::Binary, Location::new("/ds"))
            .with_visible_items(vec![]);
        assert_eq!(compose_entries(&ctx), vec![MenuEntry::CopySelection]);
    }

    #[test]
    fn test_list_selection_offers_whole_list_extract() {
        let loc = Location::new("/ds").with_state(list_state(json!(["a", "b", "c"])));
        for t in [ColumnDataType::Integer, ColumnDataType::Binary, ColumnDataType::List] {
            let ctx = SelectionContext::new("tags", t, loc.clone())
                .with_visible_items(vec![TransformKind::Replace]);
            let entries = compose_entries(&ctx);
            assert_eq!(entries.len(), 3);
            assert_eq!(transforms(&entries), vec![TransformKind::Extract]);
            assert_eq!(entries[1], MenuEntry::Separator);
            assert_eq!(entries[2], MenuEntry::CopySelection);
            let MenuEntry::Transform { target, .. } = &entries[0] else {
                panic!("first entry should be a transform");
            };
            assert_eq!(target.state.get(LIST_OF_ITEMS_KEY), Some(&json!(["a", "b", "c"])));
        }
    }

    #[test]
    fn test_single_item_list_uses_resolver() {
        let loc = Location::new("/ds").with_state(list_state(json!(["only"])));
        let ctx = SelectionContext::new("tags", ColumnDataType::Integer, loc);
        assert!(!ctx.is_list_selection());
        assert_eq!(
            transforms(&compose_entries(&ctx)),
            vec![TransformKind::Replace, TransformKind::KeepOnly, TransformKind::Exclude]
        );
    }

    #[test]
    fn test_state_override_changes_entries() {
        let mut state = StateMap::new();
        state.insert("columnType".to_string(), json!("MIXED"));
        let loc = Location::new("/ds").with_state(state);
        let ctx = SelectionContext::new("c", ColumnDataType::Text, loc);
        assert_eq!(compose_entries(&ctx), vec![MenuEntry::CopySelection]);
    }

    #[test]
    fn test_targets_carry_transform_type() {
        let ctx = SelectionContext::new("c", ColumnDataType::Map, Location::new("/ds"));
        for entry in compose_entries(&ctx) {
            if let MenuEntry::Transform { item, target } = entry {
                assert_eq!(target.transform_type(), Some(item.transform.as_ref()));
                assert_eq!(target.state.get("columnType"), Some(&json!("MAP")));
            }
        }
    }
}
