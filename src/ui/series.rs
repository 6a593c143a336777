//! Series sidebar rendering.
//!
//! A selectable list over the catalog: moving the cursor selects the
//! series, so the chart follows the list. Each row shows the current
//! rate for the viewed direction, or "-" for series the latest snapshot
//! no longer mentions.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::data::bytes::format_rate;
use crate::data::Direction;

/// Render the series list with the cursor on the selected entry.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let names = app.filtered_names();

    let items: Vec<ListItem> = names
        .iter()
        .map(|name| {
            let rate = app.catalog.rates(name).map(|r| match app.selector.direction() {
                Direction::Read => r.read,
                Direction::Write => r.write,
            });
            let rate_label = rate.map(format_rate).unwrap_or_else(|| "-".to_string());

            let selected = app.selector.selected() == Some(name.as_str());
            let marker = if selected { "▸ " } else { "  " };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(name.to_string()),
                Span::raw("  "),
                Span::styled(rate_label, Style::default().fg(app.theme.axis)),
            ]))
        })
        .collect();

    let title = if app.filter_text.is_empty() {
        format!(" Series ({}) ", names.len())
    } else {
        format!(" Series /{} ", app.filter_text)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(if app.filter_active {
            app.theme.highlight
        } else {
            app.theme.border
        }));

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected);

    let mut state = ListState::default();
    if !names.is_empty() {
        state.select(Some(app.cursor.min(names.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
