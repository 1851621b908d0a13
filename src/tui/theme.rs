use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named theme selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// Colors used to draw the selection menu
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub separator: Color,

    pub selected_fg: Color,
    pub selected_bg: Color,

    // Anchor highlight in the driver view
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Default Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            border: Color::Cyan,
            separator: Color::DarkGray,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            highlight_fg: Color::Black,
            highlight_bg: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Blue,
            separator: Color::Gray,
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(255, 230, 120),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn separator_style(&self) -> Style {
        Style::default().fg(self.separator)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight_fg).bg(self.highlight_bg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
