use crate::core::{MenuEntry, NavigationTarget, SelectionContext, Translate, Untranslated, compose_entries};
use crate::tui::visibility::Visibility;
use crate::tui::{Action, Component, Theme};
use color_eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear},
};
use tracing::debug;

const SUPPORTED_ACTIONS: &[Action] = &[
    Action::MoveUp,
    Action::MoveDown,
    Action::Home,
    Action::End,
    Action::Confirm,
    Action::Cancel,
    Action::Copy,
];

/// Screen element the menu hangs from, usually the selected text span.
///
/// Two anchors are the same anchor only if both id and area match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub id: u64,
    pub area: Rect,
}

impl Anchor {
    pub fn new(id: u64, area: Rect) -> Self {
        Self { id, area }
    }
}

/// Callbacks the menu makes into its host application
pub trait MenuHost {
    /// The menu was dismissed; called once per close
    fn close(&mut self);
    /// Put the selected text on the clipboard
    fn copy_selection(&mut self);
    /// Open the transform details view described by `target`
    fn navigate(&mut self, target: NavigationTarget);
}

/// Host that only records what was requested, for hosts that act after the menu closes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostLog {
    pub closes: usize,
    pub copies: usize,
    pub navigations: Vec<NavigationTarget>,
}

impl MenuHost for HostLog {
    fn close(&mut self) {
        self.closes += 1;
    }

    fn copy_selection(&mut self) {
        self.copies += 1;
    }

    fn navigate(&mut self, target: NavigationTarget) {
        self.navigations.push(target);
    }
}

/// Popover offering transforms for a text selection inside a cell
pub struct SelectionMenu<H: MenuHost> {
    context: SelectionContext,
    entries: Vec<MenuEntry>,
    visibility: Visibility<Anchor>,
    /// Index into `entries`; always a selectable entry
    selected: usize,
    host: H,
    translator: Box<dyn Translate>,
    theme: Theme,
    /// Where the popup was last drawn, for mouse hit testing
    popup_area: Option<Rect>,
    /// First entry shown when the popup is too short for all entries
    scroll: usize,
}

impl<H: MenuHost> SelectionMenu<H> {
    pub fn new(context: SelectionContext, anchor: Option<Anchor>, host: H) -> Self {
        let entries = compose_entries(&context);
        let mut menu = Self {
            context,
            entries,
            visibility: Visibility::new(anchor),
            selected: 0,
            host,
            translator: Box::new(Untranslated),
            theme: Theme::default(),
            popup_area: None,
            scroll: 0,
        };
        menu.select_first();
        menu
    }

    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.visibility.anchor()
    }

    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Display text of each selectable entry, in menu order
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(MenuEntry::label_key)
            .map(|key| self.translator.translate(key))
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.entries.get(self.selected)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Pass on the host's current anchor; a new anchor reopens the menu
    pub fn set_anchor(&mut self, anchor: Option<Anchor>) -> bool {
        let opened = self.visibility.set_anchor(anchor);
        if opened {
            debug!(column = %self.context.column_name, "selection menu opened");
            self.select_first();
        }
        opened
    }

    /// Replace the selection context and recompute the entries
    pub fn set_context(&mut self, context: SelectionContext) {
        self.entries = compose_entries(&context);
        self.context = context;
        self.select_first();
    }

    /// Run the entry at `index`. Returns false if nothing happened.
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.entries.get(index) {
            Some(MenuEntry::Transform { item, target }) => {
                debug!(
                    column = %self.context.column_name,
                    transform = %item.transform,
                    pathname = %target.pathname,
                    "navigating to transform"
                );
                self.host.navigate(target.clone());
            }
            Some(MenuEntry::CopySelection) => {
                debug!(column = %self.context.column_name, "copying selection");
                self.host.copy_selection();
            }
            Some(MenuEntry::Separator) | None => return false,
        }
        self.close();
        true
    }

    /// Close without running an entry (Esc, click-away)
    pub fn dismiss(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!(column = %self.context.column_name, "selection menu dismissed");
        self.close();
        true
    }

    fn close(&mut self) {
        let host = &mut self.host;
        self.visibility.close(|| host.close());
        self.popup_area = None;
    }

    fn selectable_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_selectable())
            .map(|(i, _)| i)
            .collect()
    }

    fn select_first(&mut self) {
        self.selected = self.selectable_indices().first().copied().unwrap_or(0);
        self.scroll = 0;
    }

    fn select_last(&mut self) {
        self.selected = self.selectable_indices().last().copied().unwrap_or(0);
    }

    fn move_selection(&mut self, forward: bool) {
        let indices = self.selectable_indices();
        if indices.is_empty() {
            return;
        }
        let pos = indices.iter().position(|&i| i == self.selected).unwrap_or(0);
        let next = if forward {
            (pos + 1) % indices.len()
        } else {
            (pos + indices.len() - 1) % indices.len()
        };
        self.selected = indices[next];
    }

    fn copy_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, MenuEntry::CopySelection))
    }

    /// Outer size of the popup including borders
    fn popup_size(&self) -> (u16, u16) {
        let widest = self
            .labels()
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let width = widest.saturating_add(4).max(12);
        let height = (self.entries.len() as u16).saturating_add(2);
        (width, height)
    }

    /// Left click inside the popup runs the entry under it; any press elsewhere dismisses
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }
        let MouseEventKind::Down(button) = event.kind else {
            return Ok(false);
        };
        let position = Position::new(event.column, event.row);
        match self.popup_area {
            Some(popup) if popup.contains(position) => {
                let inner = Block::default().borders(Borders::ALL).inner(popup);
                if button == MouseButton::Left && inner.contains(position) {
                    let index = self.scroll + (position.y - inner.y) as usize;
                    self.activate(index);
                }
                Ok(true)
            }
            _ => Ok(self.dismiss()),
        }
    }
}

/// Place a popup of `size` so its top-right corner touches the anchor's
/// bottom-right corner, shifted as needed to stay inside `bounds`.
pub fn popup_area(anchor: Rect, size: (u16, u16), bounds: Rect) -> Rect {
    let width = size.0.min(bounds.width);
    let height = size.1.min(bounds.height);

    let right = anchor.right().min(bounds.right());
    let x = right.saturating_sub(width).max(bounds.x);

    let mut y = anchor.bottom();
    if y.saturating_add(height) > bounds.bottom() {
        y = bounds.bottom().saturating_sub(height);
    }
    let y = y.max(bounds.y);

    Rect::new(x, y, width, height)
}

/// First visible entry so that `selected` stays inside a window of `rows` entries
fn scroll_offset(scroll: usize, selected: usize, rows: usize, len: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    let scroll = if selected < scroll {
        selected
    } else if selected >= scroll + rows {
        selected + 1 - rows
    } else {
        scroll
    };
    scroll.min(len.saturating_sub(rows))
}

impl<H: MenuHost> Component for SelectionMenu<H> {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }
        match action {
            Action::MoveUp => self.move_selection(false),
            Action::MoveDown => self.move_selection(true),
            Action::Home => self.select_first(),
            Action::End => self.select_last(),
            Action::Confirm => {
                self.activate(self.selected);
            }
            Action::Cancel => {
                self.dismiss();
            }
            Action::Copy => {
                if let Some(index) = self.copy_index() {
                    self.activate(index);
                }
            }
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }
        let size = self.popup_size();
        let popup = match self.anchor() {
            Some(anchor) => popup_area(anchor.area, size, area),
            // Anchor withdrawn while open: keep showing where it was last drawn
            None => self.popup_area.unwrap_or_else(|| {
                let center = Rect::new(area.x + area.width / 2, area.y + area.height / 2, 0, 0);
                popup_area(center, size, area)
            }),
        };
        self.popup_area = Some(popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .style(self.theme.normal_style());
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let width = inner.width as usize;
        let rows = inner.height as usize;
        self.scroll = scroll_offset(self.scroll, self.selected, rows, self.entries.len());
        let shown = self.entries.iter().enumerate().skip(self.scroll).take(rows);
        for (offset, (i, entry)) in shown.enumerate() {
            let row = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
            let line = match entry.label_key() {
                None => Line::styled("─".repeat(width), self.theme.separator_style()),
                Some(key) => {
                    let label = self.translator.translate(key);
                    let text = format!(" {:<w$}", label, w = width.saturating_sub(1));
                    let style = if i == self.selected {
                        self.theme.selected_style()
                    } else {
                        self.theme.normal_style()
                    };
                    Line::styled(text, style)
                }
            };
            frame.render_widget(line, row);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        SUPPORTED_ACTIONS
    }

    fn name(&self) -> &str {
        "SelectionMenu"
    }
}
