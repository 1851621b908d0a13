use arboard::Clipboard;
use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use selmenu::config::Config;
use selmenu::core::{
    ColumnDataType, Location, SelectionContext, StateMap, Translate, compose_entries,
    parse_transform_list,
};
use selmenu::tui::{Action, Anchor, Component, HostLog, KeyBindings, SelectionMenu, Theme};
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

const SELECTED_PREFIX: &str = "Selected: ";

/// Show the selected-text action menu for one cell selection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the column the selection was made in
    #[arg(long, default_value = "column")]
    column_name: String,
    /// Column data type tag (TEXT, LIST, MAP, INTEGER, ...)
    #[arg(long, default_value = "TEXT")]
    column_type: String,
    /// Current view path; targets go to <pathname>/details
    #[arg(long, default_value = "/")]
    pathname: String,
    /// Query parameter of the current view, KEY=VALUE. Repeatable
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_query_pair)]
    query: Vec<(String, String)>,
    /// JSON object carried as location state, e.g. '{"listOfItems":["a","b"]}'
    #[arg(long, value_name = "JSON")]
    state: Option<String>,
    /// Comma separated transforms to offer (overrides the config file)
    #[arg(long, value_name = "LIST")]
    visible: Option<String>,
    /// The selected text; placed on the clipboard by Copy Selection
    #[arg(long, default_value = "")]
    selection: String,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Print the menu entries as JSON instead of opening the menu
    #[arg(long)]
    print: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn parse_query_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn build_context(args: &Args, cfg: &Config) -> Result<SelectionContext> {
    let query: StateMap = args
        .query
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect();

    let mut location = Location::new(args.pathname.trim_end_matches('/')).with_query(query);
    if let Some(raw) = &args.state {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(state) => location = location.with_state(state),
            other => return Err(eyre!("--state must be a JSON object, got {other}")),
        }
    }

    let visible = match &args.visible {
        Some(list) => parse_transform_list(list)?,
        None => cfg.visible_items()?,
    };

    Ok(SelectionContext::new(
        args.column_name.clone(),
        ColumnDataType::from(args.column_type.as_str()),
        location,
    )
    .with_visible_items(visible))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(level) = args.logging {
        selmenu::logging::init_with(None, Some(level.into()))?;
    }

    let cfg = Config::from_path(args.config.as_ref())?;
    let context = build_context(&args, &cfg)?;
    debug!(?context, "selection context");

    if args.print {
        let entries: Vec<Value> = compose_entries(&context)
            .iter()
            .map(|entry| -> Result<Value, serde_json::Error> {
                let mut value = serde_json::to_value(entry)?;
                if let (Some(key), Value::Object(map)) = (entry.label_key(), &mut value) {
                    map.insert("label".into(), Value::from(cfg.translations.translate(key)));
                }
                Ok(value)
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let keybindings = cfg.keybindings();
    let menu = SelectionMenu::new(context, None, HostLog::default())
        .with_translator(cfg.translations.clone())
        .with_theme(cfg.theme());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_menu(&mut terminal, menu, &keybindings, &args.selection, &cfg.theme());

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    let host = res?;
    if let Some(target) = host.navigations.last() {
        info!(pathname = %target.pathname, "transform selected");
        println!("{}", serde_json::to_string_pretty(target)?);
    }
    if host.copies > 0 {
        copy_to_clipboard(&args.selection).wrap_err("failed to copy selection")?;
    }
    Ok(())
}

/// Put `text` on the system clipboard.
///
/// X11 and Wayland serve clipboard contents from the owning process, so on Linux
/// this blocks until another application replaces the selection.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        eprintln!("Selection copied; waiting until the clipboard is taken over");
        clipboard.set().wait().text(text.to_owned())?;
    }
    #[cfg(not(target_os = "linux"))]
    clipboard.set_text(text.to_owned())?;
    info!(chars = text.chars().count(), "selection copied to clipboard");
    Ok(())
}

/// Draw the selected cell, hang the menu off the selection and run until it closes
fn run_menu<B: Backend>(
    terminal: &mut Terminal<B>,
    mut menu: SelectionMenu<HostLog>,
    keybindings: &KeyBindings,
    selection: &str,
    theme: &Theme,
) -> Result<HostLog> {
    let mut anchor_id = 0;
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let block = Block::default().borders(Borders::ALL).title(" selmenu ");
            let inner = block.inner(area);
            let ctx = menu.context();
            let lines = vec![
                Line::from(format!("Column: {} ({})", ctx.column_name, ctx.effective_column_type())),
                Line::from(""),
                Line::from(vec![
                    Span::raw(SELECTED_PREFIX),
                    Span::styled(selection.to_string(), theme.highlight_style()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), area);

            // The anchor follows the highlighted text; a new area means a new anchor
            let anchor_area = Rect::new(
                inner.x + SELECTED_PREFIX.len() as u16,
                inner.y + 2,
                (selection.chars().count() as u16).max(1),
                1,
            )
            .intersection(inner);
            if menu.anchor().map(|a| a.area) != Some(anchor_area) {
                anchor_id += 1;
                menu.set_anchor(Some(Anchor::new(anchor_id, anchor_area)));
            }
            menu.render(frame, area);
        })?;

        if !menu.is_open() {
            break;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match keybindings.get_action(&key) {
                    Some(Action::Quit) => {
                        menu.dismiss();
                    }
                    Some(action) => {
                        menu.handle_action(action)?;
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) => {
                menu.handle_mouse(mouse)?;
            }
            _ => {}
        }
    }
    Ok(menu.into_host())
}
