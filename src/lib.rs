pub mod config;
pub mod core;
pub mod logging;
pub mod tui;

// Re-export commonly used types
pub use crate::core::{
    ACTION_CATALOG, ActionItem, ColumnDataType, Location, MenuEntry, NavigationTarget,
    SelectionContext, TransformKind, build_target, compose_entries, resolve_actions,
};
pub use crate::tui::{Action, Anchor, HostLog, MenuHost, SelectionMenu};
