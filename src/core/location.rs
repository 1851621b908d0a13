use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::{ActionItem, ColumnDataType};

/// Key/value bag used for query parameters and navigation state
pub type StateMap = Map<String, Value>;

pub const COLUMN_NAME_KEY: &str = "columnName";
pub const COLUMN_TYPE_KEY: &str = "columnType";
pub const HAS_SELECTION_KEY: &str = "hasSelection";
pub const TRANSFORM_TYPE_KEY: &str = "transformType";
pub const LIST_OF_ITEMS_KEY: &str = "listOfItems";
pub const DETAILS_SUFFIX: &str = "/details";

/// Where the viewer currently is: path, query parameters and carried state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub query: StateMap,
    #[serde(default)]
    pub state: Option<StateMap>,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            query: StateMap::new(),
            state: None,
        }
    }

    pub fn with_query(mut self, query: StateMap) -> Self {
        self.query = query;
        self
    }

    pub fn with_state(mut self, state: StateMap) -> Self {
        self.state = Some(state);
        self
    }
}

/// Destination handed to the host when a transform entry is activated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub pathname: String,
    pub query: StateMap,
    pub state: StateMap,
}

impl NavigationTarget {
    /// The transform recorded in the target state, if any
    pub fn transform_type(&self) -> Option<&str> {
        self.state.get(TRANSFORM_TYPE_KEY).and_then(Value::as_str)
    }
}

/// Column type to use for the selection.
///
/// When the location carries state, only the state is consulted for a
/// `columnType` override; the query is consulted only when there is no state
/// at all. An absent or empty override falls back to `context_type`.
pub fn effective_column_type(location: &Location, context_type: &ColumnDataType) -> ColumnDataType {
    let source = location.state.as_ref().unwrap_or(&location.query);
    match source.get(COLUMN_TYPE_KEY).and_then(Value::as_str) {
        Some(tag) if !tag.is_empty() => ColumnDataType::from(tag),
        _ => context_type.clone(),
    }
}

/// State shared by every target built for one selection.
///
/// Incoming location state may override `columnName`, but `columnType` and
/// `hasSelection` always reflect this selection.
pub fn base_state(
    column_name: &str,
    location: &Location,
    effective_type: &ColumnDataType,
) -> StateMap {
    let mut state = StateMap::new();
    state.insert(COLUMN_NAME_KEY.to_string(), Value::from(column_name));
    if let Some(incoming) = &location.state {
        state.extend(incoming.clone());
    }
    state.insert(COLUMN_TYPE_KEY.to_string(), Value::from(effective_type.as_str()));
    state.insert(HAS_SELECTION_KEY.to_string(), Value::Bool(true));
    state
}

/// Build the navigation target for one transform entry
pub fn build_target(location: &Location, base_state: &StateMap, item: &ActionItem) -> NavigationTarget {
    let mut query = location.query.clone();
    query.insert("type".to_string(), Value::from("transform"));

    let mut state = base_state.clone();
    state.insert(
        TRANSFORM_TYPE_KEY.to_string(),
        Value::from(item.transform.as_ref()),
    );

    NavigationTarget {
        pathname: format!("{}{}", location.pathname, DETAILS_SUFFIX),
        query,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ACTION_CATALOG, TransformKind, catalog_item};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> StateMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_effective_type_from_state() {
        let loc = Location::new("/space/ds").with_state(obj(json!({"columnType": "LIST"})));
        assert_eq!(effective_column_type(&loc, &ColumnDataType::Text), ColumnDataType::List);
    }

    #[test]
    fn test_effective_type_from_query_without_state() {
        let loc = Location::new("/space/ds").with_query(obj(json!({"columnType": "MAP"})));
        assert_eq!(effective_column_type(&loc, &ColumnDataType::Text), ColumnDataType::Map);
    }

    #[test]
    fn test_state_shadows_query_even_without_override() {
        let loc = Location::new("/space/ds")
            .with_query(obj(json!({"columnType": "MAP"})))
            .with_state(obj(json!({"other": 1})));
        assert_eq!(
            effective_column_type(&loc, &ColumnDataType::Integer),
            ColumnDataType::Integer
        );
    }

    #[test]
    fn test_empty_override_falls_back() {
        let loc = Location::new("/p").with_state(obj(json!({"columnType": ""})));
        assert_eq!(effective_column_type(&loc, &ColumnDataType::Date), ColumnDataType::Date);
    }

    #[test]
    fn test_base_state_merge_order() {
        let loc = Location::new("/p").with_state(obj(json!({
            "columnName": "renamed",
            "columnType": "INTEGER",
            "hasSelection": false,
            "extra": [1, 2]
        })));
        let state = base_state("col", &loc, &ColumnDataType::Text);
        assert_eq!(
            Value::Object(state),
            json!({
                "columnName": "renamed",
                "columnType": "TEXT",
                "hasSelection": true,
                "extra": [1, 2]
            })
        );
    }

    #[test]
    fn test_build_target() {
        let loc = Location::new("/space/ds").with_query(obj(json!({"version": "7", "type": "x"})));
        let base = base_state("city", &loc, &ColumnDataType::Text);
        let target = build_target(&loc, &base, &catalog_item(TransformKind::KeepOnly));

        assert_eq!(target.pathname, "/space/ds/details");
        assert_eq!(Value::Object(target.query.clone()), json!({"version": "7", "type": "transform"}));
        assert_eq!(target.transform_type(), Some("keeponly"));
        assert_eq!(target.state.get(COLUMN_NAME_KEY), Some(&json!("city")));
        assert_eq!(target.state.get(HAS_SELECTION_KEY), Some(&json!(true)));
        // Inputs are left untouched
        assert_eq!(loc.query.get("type"), Some(&json!("x")));
        assert!(base.get(TRANSFORM_TYPE_KEY).is_none());
    }

    #[test]
    fn test_build_target_is_pure() {
        let loc = Location::new("/a/b").with_state(obj(json!({"listOfItems": ["x"]})));
        let base = base_state("c", &loc, &ColumnDataType::List);
        for item in &ACTION_CATALOG {
            let first = build_target(&loc, &base, item);
            let second = build_target(&loc, &base, item);
            assert_eq!(first, second);
            assert_eq!(first.pathname, format!("{}/details", loc.pathname));
        }
    }
}
