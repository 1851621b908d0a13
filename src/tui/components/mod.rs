pub mod selection_menu;

pub use selection_menu::{Anchor, HostLog, MenuHost, SelectionMenu, popup_area};
