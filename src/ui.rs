//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## Layout
//!
//! ```text
//! ┌ nav bar: About │ Projects │ Blog ─────────── theme hint ┐
//! │ header: name + typing animation                          │
//! │ projects: one carousel slide                             │
//! │ blog: posts, skeletons, error notice, "load more" row    │
//! └ status bar ──────────────────────────────────────────────┘
//! ```
//!
//! Drawing the blog list also measures whether the "load more" sentinel is
//! inside the viewport and stores it on the [`App`] for the trigger.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Section};
use crate::feed::{Phase, Row};
use crate::theme::Palette;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let palette = app.theme.current().palette();
    frame.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        frame.area(),
    );

    let [nav_area, header_area, projects_area, blog_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_nav(app, &palette, frame, nav_area);
    draw_header(app, &palette, frame, header_area);
    draw_projects(app, &palette, frame, projects_area);
    draw_blog(app, &palette, frame, blog_area);
    draw_status_bar(app, &palette, frame, status_area);
}

fn section_block<'a>(app: &App, section: Section, palette: &Palette) -> Block<'a> {
    let border = if app.section == section {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    Block::default()
        .title(format!(" {} ", section.title()))
        .borders(Borders::ALL)
        .border_style(border)
}

/// Navigation bar with the focused section highlighted.
fn draw_nav(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(palette.muted)));
        }
        let style = if *section == app.section {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.fg)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, section.title()), style));
    }
    spans.push(Span::styled(
        format!("   t: {}", app.theme.current().toggle_label()),
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("I'm a ", Style::default().fg(palette.fg)),
        Span::styled(
            app.typewriter.text(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("▏", Style::default().fg(palette.accent)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(section_block(app, Section::About, palette)),
        area,
    );
}

fn draw_projects(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let lines = match app.carousel.current() {
        Some(project) => vec![
            Line::from(Span::styled(
                project.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(project.description.clone())),
            Line::from(Span::styled(
                format!(
                    "{}/{}",
                    app.carousel.current_index() + 1,
                    app.carousel.slides().len()
                ),
                Style::default().fg(palette.muted),
            )),
        ],
        None => vec![Line::from("No projects yet")],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(section_block(app, Section::Projects, palette)),
        area,
    );
}

fn row_item<'a>(row: &Row, palette: &Palette) -> ListItem<'a> {
    match row {
        Row::Post(post) => ListItem::new(Line::from(vec![
            Span::styled(
                format!("{:<18}", post.formatted_date()),
                Style::default().fg(palette.muted),
            ),
            Span::raw(" "),
            Span::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(post.excerpt.clone(), Style::default().fg(palette.muted)),
        ])),
        Row::Skeleton => ListItem::new(Line::from(Span::styled(
            "░░░░░░░░░░░░░░░░   ░░░░░░░░░░░░░░░░░░░░░░░░░░░░",
            Style::default().fg(palette.muted),
        ))),
        Row::Error(message) => ListItem::new(Line::from(Span::styled(
            format!("⚠ {message}"),
            Style::default().fg(palette.error),
        ))),
    }
}

/// Render the blog list and measure the sentinel's visibility.
fn draw_blog(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let view = app.feed.renderer();
    let mut items: Vec<ListItem> = view.rows.iter().map(|r| row_item(r, palette)).collect();

    let row_count = view.rows.len();
    let load_more_visible = view.load_more_visible;
    if load_more_visible {
        let label = match app.feed.phase() {
            Phase::Loading => "Loading…",
            Phase::Error => "Retry (m)",
            _ => "Load more (m)",
        };
        items.push(ListItem::new(Line::from(Span::styled(
            label,
            Style::default().fg(palette.accent),
        ))));
    }

    let list = List::new(items)
        .block(section_block(app, Section::Blog, palette))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(palette.highlight),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);

    let viewport = area.height.saturating_sub(2) as usize;
    app.sentinel_visible = load_more_visible
        && sentinel_in_view(row_count, app.list_state.offset(), viewport);
}

/// Whether the row at index `sentinel` lies in the window
/// `[offset, offset + viewport)` of single-line rows.
pub fn sentinel_in_view(sentinel: usize, offset: usize, viewport: usize) -> bool {
    sentinel >= offset && sentinel - offset < viewport
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let message = app.status.clone().unwrap_or_else(|| app.feed_status());
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(message, Style::default().fg(palette.accent)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.feed.source_name()),
            Style::default().fg(palette.muted),
        ),
        Span::raw("  q: quit  Tab: section  ↑/↓: scroll  m: load more"),
    ]));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::app::Feed;
    use crate::feed::{FeedConfig, FeedView};
    use crate::source::{DynSource, SampleSource};
    use crate::theme::ThemeManager;

    fn app(config: FeedConfig, dir: &tempfile::TempDir) -> App {
        let source: DynSource = Box::new(SampleSource::new().latency(Duration::ZERO));
        let feed = Feed::new(Arc::new(source), FeedView::new(), config).unwrap();
        let theme = ThemeManager::load(dir.path().join("theme"), None);
        App::new(feed, theme, None, Instant::now())
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn sentinel_window_bounds() {
        assert!(sentinel_in_view(0, 0, 10));
        assert!(sentinel_in_view(9, 0, 10));
        assert!(!sentinel_in_view(10, 0, 10));
        assert!(sentinel_in_view(12, 5, 10));
        assert!(!sentinel_in_view(4, 5, 10), "scrolled past");
        assert!(!sentinel_in_view(0, 0, 0), "zero-height viewport");
    }

    #[tokio::test]
    async fn draw_while_loading_shows_skeletons_and_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(FeedConfig::default(), &dir);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("░░░░"));
        assert!(text.contains("Loading page 1"));
        assert!(app.sentinel_visible);
    }

    #[tokio::test]
    async fn draw_after_exhaustion_hides_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(FeedConfig::default(), &dir);
        app.feed.settle().await;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Getting Started with Web Development"));
        assert!(text.contains("All 3 posts loaded"));
        assert!(!text.contains("Load more"));
        assert!(!app.sentinel_visible);
    }

    #[tokio::test]
    async fn sentinel_below_the_fold_is_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(
            FeedConfig {
                skeleton_count: 40,
                ..FeedConfig::default()
            },
            &dir,
        );

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert!(!app.sentinel_visible);
    }

    #[tokio::test]
    async fn nav_bar_names_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(
            FeedConfig {
                auto_start: false,
                ..FeedConfig::default()
            },
            &dir,
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();

        let text = screen_text(&terminal);
        for section in Section::ALL {
            assert!(text.contains(section.title()));
        }
        assert!(text.contains("Project 1"));
        assert!(text.contains("Dark Mode"));
    }

    #[tokio::test]
    async fn draw_does_not_panic_on_tiny_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(FeedConfig::default(), &dir);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }
}
