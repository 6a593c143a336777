//! Common UI components shared across the screen.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::bytes::format_rate;
use crate::data::{Direction, TOTAL_SERIES};

/// Render the header bar: title, direction segment, cluster totals, and
/// the active data source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" BROKERWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    // Direction segment, the two-option write/read switch
    for (i, direction) in [Direction::Write, Direction::Read].iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("/"));
        }
        let style = if app.selector.direction() == *direction {
            app.theme.segment_active
        } else {
            app.theme.segment_inactive
        };
        spans.push(Span::styled(direction.label(), style));
    }

    spans.push(Span::raw(" │ "));

    match app.catalog.rates(TOTAL_SERIES) {
        Some(rates) => {
            spans.push(Span::raw(format!(
                "R:{} W:{}",
                format_rate(rates.read),
                format_rate(rates.write)
            )));
        }
        None => {
            spans.push(Span::styled("waiting for data", Style::default().add_modifier(Modifier::DIM)));
        }
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        app.source_description().to_string(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows available controls and the time since the last snapshot; errors
/// and temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else if app.filter_active {
        " Type to search | Enter:apply Esc:cancel".to_string()
    } else if let Some(at) = app.last_snapshot_at {
        format!(
            " updated {}s ago | ↑↓:series Tab:write/read /:search e:export ?:help q:quit",
            at.elapsed().as_secs()
        )
    } else {
        " Waiting for first snapshot... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Selection",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Select series"),
        Line::from("  PgUp/PgDn   Jump 5 series"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Tab ←/→     Toggle write/read"),
        Line::from("  w / r       View writes / reads"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Filter",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  Esc       Cancel filter input"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e         Export visible state to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
