//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::tui::app::{App, Region};
use crate::tui::theme::Theme;

/// Spinner frames for in-flight requests
const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // URL bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_url_bar(frame, chunks[1], app);
    render_content(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if let Some(popup) = &app.error_popup {
        render_error_popup(frame, &popup.title, &popup.message);
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn spinner(app: &App) -> &'static str {
    SPINNER[(app.tick_counter as usize) % SPINNER.len()]
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let activity = if app.any_loading() {
        format!(" {} working", spinner(app))
    } else {
        String::new()
    };

    let title = format!(" pagescout │ page extraction client{activity} ");

    let header = Paragraph::new(title)
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the URL input bar
fn render_url_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (style, title) = if app.url_input_mode {
        (Theme::editing(), " URL (Enter: fetch, Ctrl+a: autopilot, Esc: done) ")
    } else {
        (Theme::normal_border(), " URL [u] ")
    };

    let content = if app.url_input_mode {
        // Block cursor at the insertion point
        format!("{}█", app.url_input)
    } else if app.url_input.is_empty() {
        "(no URL - press u or paste one)".to_string()
    } else {
        app.url_input.clone()
    };

    let bar = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(bar, area);
}

/// Render the six content regions
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ])
        .split(columns[1]);

    render_meta(frame, left[0], app);
    render_text(frame, left[1], app);

    render_list_region(
        frame,
        right[0],
        app,
        Region::Headings,
        &format!(" Headings ({}) ", app.panels.headings.len()),
        app.panels.headings.items(),
        app.headings_scroll,
    );
    render_list_region(
        frame,
        right[1],
        app,
        Region::Links,
        &links_title(app),
        app.panels.links.items(),
        app.links_scroll,
    );
    render_list_region(
        frame,
        right[2],
        app,
        Region::Prices,
        &format!(" Prices ({}) ", app.panels.prices.len()),
        app.panels.prices.items(),
        app.prices_scroll,
    );
    render_summary(frame, right[3], app);
}

/// Links region title; shows the truncation so it is visible to the user
fn links_title(app: &App) -> String {
    if app.panels.links_truncated() {
        format!(
            " Links ({} of {}) ",
            app.panels.links.len(),
            app.panels.links_total
        )
    } else {
        format!(" Links ({}) ", app.panels.links.len())
    }
}

/// Render the metadata region (pretty-printed {url, title} JSON)
fn render_meta(frame: &mut Frame, area: Rect, app: &App) {
    let content = if app.fetch_loading || app.autopilot_loading {
        format!("{} loading...", spinner(app))
    } else if app.panels.meta.is_empty() {
        "(nothing fetched yet)".to_string()
    } else {
        app.panels.meta.clone()
    };

    let meta = Paragraph::new(content).block(
        Block::default()
            .title(" Meta ")
            .borders(Borders::ALL)
            .border_style(Theme::normal_border()),
    );

    frame.render_widget(meta, area);
}

/// Render the editable text region
fn render_text(frame: &mut Frame, area: Rect, app: &App) {
    let (border, title) = if app.text_edit_mode {
        (Theme::editing(), " Text (editing - Ctrl+s: summarize, Esc: done) ")
    } else if app.focus == Region::Text {
        (Theme::focused_border(), " Text [e to edit] ")
    } else {
        (Theme::normal_border(), " Text [e to edit] ")
    };

    let mut content = app.panels.text.clone();
    if app.text_edit_mode {
        content.push('█');
    }

    let text = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((app.text_scroll as u16, 0))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        );

    frame.render_widget(text, area);
}

/// Shared renderer for the list regions: one item per entry, verbatim
fn render_list_region(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    region: Region,
    title: &str,
    entries: &[String],
    scroll: usize,
) {
    let border = if app.focus == region {
        Theme::focused_border()
    } else {
        Theme::normal_border()
    };

    let scroll = scroll.min(entries.len().saturating_sub(1));
    let items: Vec<ListItem> = entries
        .iter()
        .skip(scroll)
        .map(|entry| ListItem::new(entry.as_str()))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border),
    );

    frame.render_widget(list, area);
}

/// Render the summary region, with its own loading state
fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    if app.summarize_loading || app.autopilot_loading {
        let border = if app.focus == Region::Summary {
            Theme::focused_border()
        } else {
            Theme::normal_border()
        };
        let placeholder = Paragraph::new(format!("{} summarizing...", spinner(app)))
            .style(Theme::muted())
            .block(
                Block::default()
                    .title(" Summary ")
                    .borders(Borders::ALL)
                    .border_style(border),
            );
        frame.render_widget(placeholder, area);
        return;
    }

    render_list_region(
        frame,
        area,
        app,
        Region::Summary,
        &format!(" Summary ({}) ", app.panels.summary.len()),
        app.panels.summary.items(),
        app.summary_scroll,
    );
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let message = app
        .status_message
        .as_deref()
        .unwrap_or("[f] fetch  [a] autopilot  [s] summarize  [?] help  [q] quit");

    let bar = Paragraph::new(format!(" {message}")).style(Theme::muted());
    frame.render_widget(bar, area);
}

/// Render the error popup (blocks input until dismissed)
fn render_error_popup(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(60, 40, frame.area());

    frame.render_widget(Clear, area);

    let text = format!("{message}\n\nPress Enter to dismiss");
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Theme::error())
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Theme::error()),
        );

    frame.render_widget(popup, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from("  u, /       edit URL bar"),
        Line::from("  Enter      (in URL bar) fetch + extract"),
        Line::from("  Ctrl+a     (in URL bar) autopilot"),
        Line::from("  f          fetch + extract"),
        Line::from("  a          autopilot (fetch + summarize)"),
        Line::from("  s          summarize the text region"),
        Line::from("  e, i       edit the text region"),
        Line::from("  Ctrl+s     (while editing) summarize"),
        Line::from("  Tab        cycle focused region"),
        Line::from("  j/k        scroll focused region"),
        Line::from("  q, Ctrl+c  quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  press any key to close",
            Theme::muted(),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::header()),
    );

    frame.render_widget(help, area);
}

/// Helper to create a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
