//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching business logic.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: the article list (or the detail pane)
//!   on top and a one-line status bar at the bottom.
//! * Colours and styles are defined inline — feel free to extract them into
//!   constants or a theme struct if the palette grows.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use newsreel::normalize::format_date;
use newsreel::Article;

use crate::app::App;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if app.detail {
        draw_detail(app, frame, main_area);
    } else {
        draw_article_list(app, frame, main_area);
    }
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable article list.
fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .snapshot
        .articles
        .iter()
        .map(|article| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>8}", article.relative_date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(article.title.as_str(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", article.category),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(" Articles ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the currently opened article, or why there is none.
fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let text = match &app.snapshot.current {
        Some(article) => article_text(article),
        None if app.is_busy() => Text::from("Loading…"),
        None => Text::from(
            app.snapshot
                .error
                .clone()
                .unwrap_or_else(|| "Nothing selected".into()),
        ),
    };

    let detail = Paragraph::new(text)
        .block(Block::default().title(" Article ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

fn article_text(article: &Article) -> Text<'_> {
    let mut lines = vec![
        Line::from(Span::styled(
            article.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} · {} ({}) · {}",
                article.author,
                format_date(article.published_at),
                article.relative_date,
                article.category
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if !article.url.is_empty() {
        lines.push(Line::from(Span::styled(
            article.url.as_str(),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::default());

    if article.has_content() {
        lines.extend(article.content.lines().map(Line::from));
    } else {
        lines.push(Line::from(Span::styled(
            newsreel::normalize::NO_CONTENT,
            Style::default().fg(Color::DarkGray),
        )));
    }
    Text::from(lines)
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let help = if app.detail {
        "  Esc: back  r: reload  q: quit"
    } else {
        "  q: quit  ↑/↓: scroll  Enter: open  r: reload"
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status(), Style::default().fg(Color::Yellow)),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}
