//! End-to-end behavior of the selection menu as a host drives it

use pretty_assertions::assert_eq;
use ratatui::layout::Rect;
use selmenu::core::{StateMap, TransformKind};
use selmenu::tui::{Action, Anchor, Component, HostLog, MenuHost};
use selmenu::{
    ColumnDataType, Location, MenuEntry, NavigationTarget, SelectionContext, SelectionMenu,
    compose_entries, resolve_actions,
};
use serde_json::{Value, json};

fn anchor(id: u64) -> Anchor {
    Anchor::new(id, Rect::new(4, 1, 6, 1))
}

fn kinds(entries: &[MenuEntry]) -> Vec<Option<TransformKind>> {
    entries
        .iter()
        .map(|e| match e {
            MenuEntry::Transform { item, .. } => Some(item.transform),
            _ => None,
        })
        .collect()
}

#[test]
fn menu_opens_when_host_supplies_anchor() {
    let ctx = SelectionContext::new("city", ColumnDataType::Text, Location::new("/space/ds"));
    let mut menu = SelectionMenu::new(ctx, None, HostLog::default());
    assert!(!menu.is_open());

    menu.set_anchor(Some(anchor(1)));
    assert!(menu.is_open());

    // Dismissed, then a new selection arrives without recreating the menu
    menu.dismiss();
    assert!(!menu.is_open());
    menu.set_anchor(Some(anchor(2)));
    assert!(menu.is_open());
    assert_eq!(menu.host().closes, 1);
}

#[test]
fn text_filter_keeps_catalog_order() {
    let filter = ["extract", "split"]
        .iter()
        .map(|s| s.parse::<TransformKind>().unwrap())
        .collect::<Vec<_>>();
    let items = resolve_actions(&ColumnDataType::from("TEXT"), Some(&filter[..]));
    assert_eq!(
        items.iter().map(|i| i.transform).collect::<Vec<_>>(),
        vec![TransformKind::Extract, TransformKind::Split]
    );
}

#[test]
fn list_selection_renders_whole_list_extract() {
    let mut state = StateMap::new();
    state.insert("listOfItems".into(), json!(["a", "b", "c"]));
    for column_type in ["TEXT", "INTEGER", "MIXED", "LIST"] {
        let ctx = SelectionContext::new(
            "tags",
            ColumnDataType::from(column_type),
            Location::new("/ds").with_state(state.clone()),
        );
        let entries = compose_entries(&ctx);
        assert_eq!(kinds(&entries), vec![Some(TransformKind::Extract), None, None]);
        assert_eq!(entries[1], MenuEntry::Separator);
        assert_eq!(entries[2], MenuEntry::CopySelection);
    }
}

#[test]
fn binary_column_only_offers_copy() {
    let ctx = SelectionContext::new("payload", ColumnDataType::from("BINARY"), Location::new("/ds"))
        .with_visible_items(vec![]);
    let menu = SelectionMenu::new(ctx, Some(anchor(1)), HostLog::default());
    assert_eq!(menu.entries(), &[MenuEntry::CopySelection]);
    assert_eq!(menu.labels(), vec!["Copy Selection"]);
}

#[test]
fn activating_transform_navigates_once_and_closes_once() {
    let mut query = StateMap::new();
    query.insert("version".into(), json!("42"));
    let location = Location::new("/space/ds").with_query(query);
    let ctx = SelectionContext::new("city", ColumnDataType::Text, location);

    for (offset, expected) in [
        (0, "extract"),
        (1, "replace"),
        (2, "split"),
        (3, "keeponly"),
        (4, "exclude"),
    ] {
        let mut menu = SelectionMenu::new(ctx.clone(), Some(anchor(1)), HostLog::default());
        for _ in 0..offset {
            menu.handle_action(Action::MoveDown).unwrap();
        }
        menu.handle_action(Action::Confirm).unwrap();
        // Further input after closing is ignored
        menu.handle_action(Action::Confirm).unwrap();

        let host = menu.into_host();
        assert_eq!(host.closes, 1);
        assert_eq!(host.copies, 0);
        assert_eq!(host.navigations.len(), 1);

        let target = &host.navigations[0];
        assert_eq!(target.pathname, "/space/ds/details");
        assert_eq!(target.transform_type(), Some(expected));
        assert_eq!(
            Value::Object(target.query.clone()),
            json!({"version": "42", "type": "transform"})
        );
        assert_eq!(target.state.get("columnName"), Some(&json!("city")));
        assert_eq!(target.state.get("columnType"), Some(&json!("TEXT")));
        assert_eq!(target.state.get("hasSelection"), Some(&json!(true)));
    }
}

/// Host that acts immediately instead of recording
#[derive(Default)]
struct EagerHost {
    events: Vec<String>,
}

impl MenuHost for EagerHost {
    fn close(&mut self) {
        self.events.push("close".into());
    }

    fn copy_selection(&mut self) {
        self.events.push("copy".into());
    }

    fn navigate(&mut self, target: NavigationTarget) {
        self.events.push(format!("navigate:{}", target.transform_type().unwrap_or("")));
    }
}

#[test]
fn navigation_precedes_close() {
    let ctx = SelectionContext::new("n", ColumnDataType::Integer, Location::new("/ds"));
    let mut menu = SelectionMenu::new(ctx, Some(anchor(1)), EagerHost::default());
    assert!(menu.activate(0));
    assert_eq!(menu.host().events, vec!["navigate:replace", "close"]);
}

#[test]
fn copy_entry_uses_same_close_path() {
    let ctx = SelectionContext::new("n", ColumnDataType::Integer, Location::new("/ds"));
    let mut menu = SelectionMenu::new(ctx, Some(anchor(1)), EagerHost::default());
    menu.handle_action(Action::End).unwrap();
    menu.handle_action(Action::Confirm).unwrap();
    assert_eq!(menu.host().events, vec!["copy", "close"]);
}

#[test]
fn query_override_applies_without_state() {
    let mut query = StateMap::new();
    query.insert("columnType".into(), json!("BINARY"));
    let ctx = SelectionContext::new("c", ColumnDataType::Text, Location::new("/ds").with_query(query));
    assert_eq!(compose_entries(&ctx), vec![MenuEntry::CopySelection]);
}
