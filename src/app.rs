//! Application state and interaction logic.
//!
//! `App` wires the pieces together: it owns the data source, the catalog,
//! the registry, the sampling window, and the view selector. The two
//! asynchronous triggers - snapshot arrival and the sampling tick - enter
//! through [`App::poll_source`] and [`App::tick_if_due`], both called from
//! the single-threaded main loop, so no locking is involved anywhere.

use std::time::Instant;

use anyhow::Result;

use crate::data::{BufferWindow, Catalog, Change, ChangeQueue, Direction, Registry, ViewSelector};
use crate::source::DataSource;
use crate::ui::Theme;

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data path
    source: Box<dyn DataSource>,
    pub catalog: Catalog,
    pub registry: Registry,
    pub window: BufferWindow,
    pub selector: ViewSelector,
    pub changes: ChangeQueue,
    pub load_error: Option<String>,
    pub last_snapshot_at: Option<Instant>,

    // Sidebar state
    pub cursor: usize,
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and sampling window.
    pub fn new(source: Box<dyn DataSource>, window: BufferWindow) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            catalog: Catalog::new(),
            registry: Registry::new(),
            window,
            selector: ViewSelector::new(),
            changes: ChangeQueue::new(),
            load_error: None,
            last_snapshot_at: None,
            cursor: 0,
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Snapshot-arrival producer: poll the data source and reconcile.
    ///
    /// On new data the catalog is updated, the registry grows to match,
    /// and the selector auto-selects the aggregate the first time the
    /// catalog becomes non-empty. Without new data the last-known rates
    /// stay in effect - a tick never waits for a snapshot. Returns whether
    /// a snapshot was consumed.
    pub fn poll_source(&mut self) -> bool {
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }

        let Some(snapshot) = self.source.poll() else {
            return false;
        };

        self.load_error = None;
        self.last_snapshot_at = Some(Instant::now());

        let grew = self.catalog.update(&snapshot);
        self.registry.sync(&self.catalog);
        if grew {
            self.changes.push(Change::Catalog);
        }
        self.selector
            .auto_select(&self.catalog, &mut self.registry, &mut self.changes);
        self.sync_cursor();
        true
    }

    /// Timer producer: run a sampling tick when the cadence has elapsed.
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        if !self.window.due(now) {
            return false;
        }
        self.window
            .tick_at(now, &self.catalog, &mut self.registry, &mut self.changes);
        true
    }

    /// Catalog names passing the current filter, in display order.
    pub fn filtered_names(&self) -> Vec<String> {
        self.catalog
            .names()
            .iter()
            .filter(|n| self.matches_filter(n))
            .cloned()
            .collect()
    }

    /// Check if a series name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Keep the cursor on the selected series when the list shifts.
    fn sync_cursor(&mut self) {
        let names = self.filtered_names();
        if let Some(selected) = self.selector.selected() {
            if let Some(pos) = names.iter().position(|n| n == selected) {
                self.cursor = pos;
                return;
            }
        }
        self.cursor = self.cursor.min(names.len().saturating_sub(1));
    }

    /// Select the series under the cursor.
    fn select_at_cursor(&mut self) {
        let names = self.filtered_names();
        if let Some(name) = names.get(self.cursor) {
            let name = name.clone();
            self.selector
                .select_series(&name, &mut self.registry, &mut self.changes);
        }
    }

    /// Move the cursor down by n entries and select.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.filtered_names().len().saturating_sub(1);
        self.cursor = (self.cursor + n).min(max);
        self.select_at_cursor();
    }

    /// Move the cursor up by n entries and select.
    pub fn select_prev_n(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.select_at_cursor();
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Jump to the first entry in the list.
    pub fn select_first(&mut self) {
        self.cursor = 0;
        self.select_at_cursor();
    }

    /// Jump to the last entry in the list.
    pub fn select_last(&mut self) {
        self.cursor = self.filtered_names().len().saturating_sub(1);
        self.select_at_cursor();
    }

    /// Select a specific cursor position (mouse click).
    pub fn select_index(&mut self, index: usize) {
        if index < self.filtered_names().len() {
            self.cursor = index;
            self.select_at_cursor();
        }
    }

    /// Toggle between the write and read views.
    pub fn toggle_direction(&mut self) {
        self.selector
            .toggle_direction(&mut self.registry, &mut self.changes);
    }

    /// View a specific direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.selector
            .select_direction(direction, &mut self.registry, &mut self.changes);
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
        self.sync_cursor();
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.sync_cursor();
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.sync_cursor();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.sync_cursor();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current view state to a JSON file.
    ///
    /// Captures the catalog, the selection, and every series' buffered
    /// samples (as age/rate pairs relative to now) with their visibility
    /// flags.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let now = Instant::now();
        let buffer_json = |buffer: &crate::data::SeriesBuffer| {
            serde_json::json!({
                "visible": buffer.visible,
                "samples": buffer.samples().map(|s| {
                    serde_json::json!({
                        "age_secs": now.saturating_duration_since(s.at).as_secs_f64(),
                        "rate": s.rate,
                    })
                }).collect::<Vec<_>>(),
            })
        };

        let export = serde_json::json!({
            "catalog": self.catalog.names(),
            "selected": self.selector.selected(),
            "direction": self.selector.direction().label(),
            "series": self.registry.iter().map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "write": buffer_json(&s.write),
                    "read": buffer_json(&s.read),
                })
            }).collect::<Vec<_>>(),
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BrokerThroughput, ChannelSource};
    use std::time::Duration;

    fn snapshot(entries: &[(&str, f64, f64)]) -> Vec<BrokerThroughput> {
        entries
            .iter()
            .map(|(name, read, write)| BrokerThroughput {
                name: name.to_string(),
                read: *read,
                write: *write,
            })
            .collect()
    }

    fn app_with_feed() -> (tokio::sync::watch::Sender<Vec<BrokerThroughput>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), BufferWindow::default());
        // Consume the channel's initial empty snapshot
        app.poll_source();
        (tx, app)
    }

    #[test]
    fn test_snapshot_to_selected_sample_flow() {
        let (tx, mut app) = app_with_feed();

        tx.send(snapshot(&[("total", 10.0, 20.0), ("BrokerA", 512.0, 1024.0)]))
            .unwrap();
        assert!(app.poll_source());

        // Catalog arrived: the aggregate is auto-selected on write.
        assert_eq!(app.selector.selected(), Some("total"));
        assert_eq!(app.selector.direction(), Direction::Write);

        // Switch to BrokerA and sample once.
        app.select_next();
        assert_eq!(app.selector.selected(), Some("BrokerA"));

        let now = Instant::now();
        assert!(app.tick_if_due(now));

        let broker = app.registry.get("BrokerA").unwrap();
        assert_eq!(broker.write.len(), 1);
        assert_eq!(broker.write.latest().unwrap().rate, 1024.0);
        assert!(broker.write.visible);
        let total = app.registry.get("total").unwrap();
        assert!(!total.write.visible);
        assert!(!total.read.visible);
    }

    #[test]
    fn test_tick_respects_cadence() {
        let (tx, mut app) = app_with_feed();
        tx.send(snapshot(&[("total", 1.0, 2.0)])).unwrap();
        app.poll_source();

        let base = Instant::now();
        assert!(app.tick_if_due(base));
        assert!(!app.tick_if_due(base + Duration::from_secs(1)));
        assert!(app.tick_if_due(base + Duration::from_secs(5)));
    }

    #[test]
    fn test_filter_narrows_sidebar() {
        let (tx, mut app) = app_with_feed();
        tx.send(snapshot(&[
            ("total", 0.0, 0.0),
            ("BrokerA", 0.0, 0.0),
            ("BrokerB", 0.0, 0.0),
        ]))
        .unwrap();
        app.poll_source();

        app.start_filter();
        app.filter_push('b');
        app.filter_push('r');

        assert_eq!(app.filtered_names(), vec!["BrokerA", "BrokerB"]);

        app.clear_filter();
        assert_eq!(app.filtered_names().len(), 3);
        // Cursor follows the still-selected aggregate
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_cursor_follows_selection_as_catalog_grows() {
        let (tx, mut app) = app_with_feed();
        tx.send(snapshot(&[("total", 0.0, 0.0), ("mango", 0.0, 0.0)]))
            .unwrap();
        app.poll_source();

        app.select_last();
        assert_eq!(app.selector.selected(), Some("mango"));

        // A new name sorts ahead of mango; the cursor must follow it down.
        tx.send(snapshot(&[
            ("total", 0.0, 0.0),
            ("apple", 0.0, 0.0),
            ("mango", 0.0, 0.0),
        ]))
        .unwrap();
        app.poll_source();

        assert_eq!(app.selector.selected(), Some("mango"));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = app_with_feed();
        tx.send(snapshot(&[("total", 10.0, 20.0)])).unwrap();
        app.poll_source();
        app.tick_if_due(Instant::now());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["selected"], "total");
        assert_eq!(value["direction"], "write");
        assert_eq!(value["series"][0]["write"]["samples"][0]["rate"], 20.0);
    }
}
