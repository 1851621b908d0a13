pub mod action;
pub mod component;
pub mod components;
pub mod keybindings;
pub mod theme;
pub mod visibility;

pub use action::Action;
pub use component::Component;
pub use components::{Anchor, HostLog, MenuHost, SelectionMenu};
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use theme::{Theme, ThemeName};
pub use visibility::Visibility;
