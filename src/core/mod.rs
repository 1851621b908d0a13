pub mod error;
pub mod i18n;
pub mod location;
pub mod menu;
pub mod resolver;
pub mod types;

pub use error::MenuError;
pub use i18n::{Translate, TranslationTable, Untranslated};
pub use location::{Location, NavigationTarget, StateMap, base_state, build_target, effective_column_type};
pub use menu::{MenuEntry, SelectionContext, compose_entries};
pub use resolver::resolve_actions;
pub use types::*;
