//! portfolio-feed: a personal portfolio page for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!                 fetch(page, size)            PageSource
//!   ┌──────────────┐  tokio::spawn  ┌───────────────────────────┐
//!   │ feed/        │ ─────────────► │ source/ (sample|http|rss) │
//!   │ controller   │ ◄───────────── │                           │
//!   └──────────────┘   mpsc outcome └───────────────────────────┘
//!      ▲       │ Renderer calls
//!      │       ▼
//!      │   ┌──────────┐  draw()  ┌──────────┐
//!      │   │ FeedView │ ───────► │  ui.rs   │── sentinel visible? ─┐
//!      │   └──────────┘          └──────────┘                      │
//!      │ request_more()                                            ▼
//!   ┌──────────┐  keys   ┌──────────┐                 ┌───────────────────┐
//!   │ input.rs │ ──────► │  app.rs  │ ◄────────────── │ VisibilityTrigger │
//!   └──────────┘         └──────────┘                 └───────────────────┘
//! ```
//!
//! * **`feed`**: the incremental loader: cursor, four-phase state machine,
//!   renderer contract, and the infinite-scroll trigger.
//! * **`source`**: the `PageSource` trait and concrete implementations.
//! * **`app`**: owns all application state (feed, theme, carousel, focus).
//! * **`ui`**: pure rendering: reads `App` state and draws widgets.
//! * **`input`**: maps key events to `App` mutations.
//! * **`main`**: wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop (or the headless loader).

mod app;
mod carousel;
mod cli;
mod error;
mod feed;
mod input;
mod logging;
mod source;
mod theme;
mod typing;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::{App, Feed};
use cli::Cli;
use feed::{FeedView, Phase};
use source::PageSource;
use theme::ThemeManager;

// ---------------------------------------------------------------------------
// RAII terminal guard: restores the terminal even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.headless)?;

    // -- configure the feed --------------------------------------------------
    let source = cli.build_source().context("cannot set up page source")?;
    tracing::info!(source = source.name(), page_size = cli.page_size, "starting");
    let feed = Feed::new(Arc::new(source), FeedView::new(), cli.feed_config())
        .context("invalid feed configuration")?;

    if cli.headless {
        return run_headless(feed).await;
    }

    install_panic_hook();
    let theme = ThemeManager::load(&cli.theme_file, ThemeManager::system_theme());
    let app = App::new(feed, theme, cli.autoplay(), Instant::now());

    // crossterm's poll/read block, so the UI loop gets its own thread and the
    // runtime workers stay free for fetch tasks.
    tokio::task::spawn_blocking(move || run_tui(app))
        .await
        .context("UI thread panicked")?
}

/// Main event loop.
///
/// Runs at ~20 fps (50 ms tick).  Each iteration:
///   1. Apply finished fetches and advance timers.
///   2. Render the UI (which measures the sentinel).
///   3. Let the visibility trigger request more posts.
///   4. Poll for keyboard input (up to one tick).
fn run_tui(mut app: App) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let tick_rate = Duration::from_millis(50);

    loop {
        app.tick(Instant::now());

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        app.observe_sentinel();

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key, Instant::now());
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}

/// Load every page in order and print each post as one JSON line.
async fn run_headless(mut feed: Feed) -> Result<()> {
    let mut printed = 0;
    feed.request_more();

    loop {
        feed.settle().await;

        for post in feed.renderer().posts().skip(printed) {
            println!("{}", serde_json::to_string(post)?);
        }
        printed = feed.renderer().post_count();

        match feed.phase() {
            Phase::Idle => {
                feed.request_more();
            }
            Phase::Exhausted => break,
            Phase::Error => bail!(
                "page {} failed: {}",
                feed.state().cursor,
                feed.last_error().unwrap_or("unknown error")
            ),
            Phase::Loading => {}
        }
    }

    tracing::info!(posts = printed, "headless load complete");
    Ok(())
}
