use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::config::ColorConfig;
use crate::display::QuakeRow;
use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Earthquake list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_list_pane(frame, app, chunks[0], colors);
    render_status_bar(frame, app, chunks[1], colors);
}

fn render_list_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let title = format!(
        " Earthquakes ({}) [min magnitude {}] ",
        app.rows().len(),
        app.query.min_magnitude
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    if app.rows().is_empty() {
        let message = if app.loader.is_loading() {
            ""
        } else if app.is_loaded() {
            "No earthquakes found."
        } else {
            "Nothing loaded. Press R to fetch."
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| ListItem::new(row_lines(row, colors)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Two lines per earthquake: badge and place, then offset and timestamp.
fn row_lines(row: &QuakeRow, colors: &ColorConfig) -> Vec<Line<'static>> {
    let badge = Span::styled(
        format!(" {:>4} ", row.magnitude),
        Style::default()
            .bg(colors.magnitude_color(row.bucket))
            .fg(colors.magnitude_text)
            .add_modifier(Modifier::BOLD),
    );
    let pad = " ".repeat(row.magnitude.len().max(4) + 2);

    vec![
        Line::from(vec![
            badge,
            Span::raw(" "),
            Span::styled(
                row.location.primary.clone(),
                Style::default()
                    .fg(colors.location_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(pad),
            Span::raw(" "),
            Span::styled(
                row.location.offset.to_uppercase(),
                Style::default().fg(colors.location_offset),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{}  {}", row.date, row.time),
                Style::default().fg(colors.date_time),
            ),
        ]),
    ]
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.loader.is_loading() {
        format!(
            "Loading earthquakes (min magnitude {})...",
            app.query.min_magnitude
        )
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "j/k:Nav  n/p:Page  o:Open  R:Refresh  c:Clear  +/-:Min magnitude  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
