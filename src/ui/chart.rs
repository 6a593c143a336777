//! Live throughput chart rendering.
//!
//! [`visible_series`] is the pure mapping from buffer state to chart
//! input: it carries only the buffers currently flagged visible and keeps
//! no state of its own. [`render`] feeds that into a ratatui line chart
//! with time and byte-rate axes.

use std::time::Instant;

use ratatui::{
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::data::bytes::format_rate;
use crate::data::duration::format_duration;
use crate::data::Registry;

/// One visible buffer mapped to chart-library input.
///
/// Points are `(age, rate)` where age is seconds relative to `now`
/// (negative = past), so the x axis never needs re-basing as time moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Map buffer state into chart input at draw time.
///
/// Only buffers flagged visible produce an entry; an empty registry (or
/// one with nothing visible) yields an empty list and the chart renders
/// empty axes.
pub fn visible_series(registry: &Registry, now: Instant) -> Vec<ChartSeries> {
    let mut out = Vec::new();
    for series in registry.iter() {
        for (direction, buffer) in [("write", &series.write), ("read", &series.read)] {
            if !buffer.visible {
                continue;
            }
            let points = buffer
                .samples()
                .map(|s| {
                    let age = now.saturating_duration_since(s.at).as_secs_f64();
                    (-age, s.rate)
                })
                .collect();
            out.push(ChartSeries {
                label: format!("{} {}", direction, series.name),
                points,
            });
        }
    }
    out
}

/// Render the live throughput chart for the current selection.
pub fn render(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let now = Instant::now();
    let series = visible_series(&app.registry, now);
    let horizon = app.window.horizon().as_secs_f64();

    // Scale the y axis to the visible data, with headroom so the line
    // never hugs the top border
    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.2;

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.chart_line))
                .data(&s.points)
        })
        .collect();

    let title = match app.selector.selected() {
        Some(name) => format!(
            " Live throughput: {} {} ",
            app.selector.direction().label(),
            name
        ),
        None => " Live throughput ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let half = app.window.horizon() / 2;
    let x_labels = vec![
        Span::raw(format!("-{}", format_duration(app.window.horizon()))),
        Span::raw(format!("-{}", format_duration(half))),
        Span::raw("now"),
    ];
    let y_labels = vec![
        Span::raw(format_rate(0.0)),
        Span::raw(format_rate(y_max / 2.0)),
        Span::raw(format_rate(y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([-horizon, 0.0])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.axis)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(y_labels)
                .style(Style::default().fg(app.theme.axis)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Catalog, ChangeQueue, Registry, Sample, ViewSelector};
    use crate::source::BrokerThroughput;
    use std::time::Duration;

    fn registry_with(names: &[&str]) -> Registry {
        let snapshot: Vec<BrokerThroughput> = names
            .iter()
            .map(|n| BrokerThroughput {
                name: n.to_string(),
                read: 0.0,
                write: 0.0,
            })
            .collect();
        let mut catalog = Catalog::new();
        catalog.update(&snapshot);
        let mut registry = Registry::new();
        registry.sync(&catalog);
        registry
    }

    #[test]
    fn test_empty_registry_yields_empty_chart_input() {
        let registry = Registry::new();
        assert!(visible_series(&registry, Instant::now()).is_empty());
    }

    #[test]
    fn test_only_visible_buffers_are_mapped() {
        let mut registry = registry_with(&["total", "BrokerA"]);
        let now = Instant::now();

        registry.get_mut("total").unwrap().write.push(Sample {
            at: now,
            rate: 100.0,
        });
        registry.get_mut("BrokerA").unwrap().write.push(Sample {
            at: now,
            rate: 200.0,
        });

        // Registry sync made "total" write-visible; BrokerA stays hidden.
        let series = visible_series(&registry, now);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "write total");
        assert_eq!(series[0].points, vec![(0.0, 100.0)]);
    }

    #[test]
    fn test_selection_switches_mapped_series() {
        let mut registry = registry_with(&["total", "BrokerA"]);
        let now = Instant::now();
        registry.get_mut("BrokerA").unwrap().read.push(Sample {
            at: now,
            rate: 42.0,
        });

        let mut selector = ViewSelector::new();
        let mut changes = ChangeQueue::new();
        selector.select_series("BrokerA", &mut registry, &mut changes);
        selector.select_direction(crate::data::Direction::Read, &mut registry, &mut changes);

        let series = visible_series(&registry, now);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "read BrokerA");
    }

    #[test]
    fn test_point_ages_are_non_positive_and_bounded() {
        let mut registry = registry_with(&["total"]);
        let base = Instant::now();
        let buffer = &mut registry.get_mut("total").unwrap().write;
        for secs in [0u64, 30, 60] {
            buffer.push(Sample {
                at: base + Duration::from_secs(secs),
                rate: 1.0,
            });
        }

        let now = base + Duration::from_secs(60);
        let series = visible_series(&registry, now);
        for (x, _) in &series[0].points {
            assert!(*x <= 0.0);
            assert!(*x >= -61.0);
        }
    }
}
