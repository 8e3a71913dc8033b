//! Demo for the `tab_pager` library: a swipeable tab view and a sectioned
//! grid pager in the terminal.
//!
//! Drag the content sideways with the mouse to swipe, click a title to jump,
//! and press Tab to switch between the two demos.

mod app;
mod config;

use std::io::{self, stderr};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tab_pager::ui::{
    grid::GridWidget, page_control::PageControlWidget, pager::PagerWidget,
    tab_strip::TabStripWidget, theme::Theme,
};
use tab_pager::TitlePosition;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, DemoKind},
};

/// Animation frame interval.
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Swipeable paged tab view demo")]
struct Cli {
    /// Page titles, one page per title.
    #[arg(default_value = "Home,Live,Fun,News,More", value_delimiter = ',')]
    titles: Vec<String>,

    /// Start in the sectioned grid demo.
    #[arg(long)]
    grid: bool,

    /// Grid columns per page.
    #[arg(long)]
    cols: Option<usize>,

    /// Grid rows per page.
    #[arg(long)]
    rows: Option<usize>,

    /// Size titles by their text and let the strip scroll.
    #[arg(long = "scroll-titles")]
    scroll_titles: bool,

    /// Draw the selection underline.
    #[arg(long)]
    underline: bool,

    /// Emphasise the selected title.
    #[arg(long)]
    scale: bool,

    /// Put the title strip below the content.
    #[arg(long = "title-bottom")]
    title_bottom: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    /// Flags win over the config file.
    fn apply(&self, config: &mut config::AppConfig) {
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        config.style.scroll_enabled |= self.scroll_titles;
        config.style.show_underline |= self.underline;
        config.style.scale_enabled |= self.scale;
        if self.title_bottom {
            config.title_position = TitlePosition::Bottom;
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut ratatui::Frame, state: &mut AppState) {
    let layout = state.layout(frame.area());
    state.sync_layout(&layout);

    match state.demo {
        DemoKind::Pages => {
            frame.render_widget(TabStripWidget::new(state.pages.strip()), layout.title_area);
            frame.render_stateful_widget(PagerWidget, layout.content_area, state.pages.pager_mut());
        }
        DemoKind::Grid => {
            frame.render_widget(TabStripWidget::new(state.grid.strip()), layout.title_area);
            frame.render_widget(GridWidget::new(&state.grid), layout.content_area);
            if let Some(dots) = layout.dots_area {
                frame.render_widget(PageControlWidget::new(state.grid.page_control()), dots);
            }
        }
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.latest_activity() {
        Some(activity) => format!("{activity} | {hint}"),
        None => hint,
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut user_config = config::AppConfig::load();
    cli.apply(&mut user_config);

    if cli.write_config {
        let path = user_config.save().context("writing config file")?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut state = AppState::new(cli.titles.clone(), user_config)?;
    if cli.grid {
        state.switch_demo();
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    outcome
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut clock = tokio::time::interval(FRAME);
    clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut dirty = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        if dirty {
            terminal.draw(|frame| draw(frame, state))?;
            dirty = false;
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k)?,
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m)?,
                    AppEvent::Resize(_, _) => {}
                }
                dirty = true;
            }

            now = clock.tick() => {
                // Keep the clock's notion of "now" fresh while idle so the
                // first animated frame does not see a huge time step.
                if state.is_animating() {
                    handler::handle_tick(state, now.into_std())?;
                    dirty = true;
                } else {
                    state.last_tick = Instant::now();
                }
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
