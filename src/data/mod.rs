//! Data models and processing for live throughput telemetry.
//!
//! This module owns the whole data path between a raw snapshot and the
//! chart: catalog reconciliation, per-series sample buffers, the sampling
//! window, and the visibility state machine.
//!
//! ## Submodules
//!
//! - [`catalog`]: sorted catalog of series names plus the latest rates
//! - [`registry`]: per-series read/write sample buffers with visibility
//! - [`window`]: the timer-driven append/evict cycle over the registry
//! - [`selector`]: which single series and direction is on screen
//! - [`changes`]: change events consumed by the render loop
//! - [`bytes`]: byte-rate formatting for axes and headers
//! - [`duration`]: parsing and formatting of duration strings (e.g. "5s")
//!
//! ## Data Flow
//!
//! ```text
//! ThroughputSnapshot (raw JSON)
//!        │
//!        ▼
//! Catalog::update()  ──▶  Registry::sync()  (new series appear)
//!        │
//!        ▼
//! BufferWindow::tick_at()  (append one sample per series, evict old)
//!        │
//!        ▼
//! ViewSelector  (exactly one series/direction visible)
//!        │
//!        ▼
//! ui::chart::visible_series()  (only visible buffers are drawn)
//! ```

pub mod bytes;
pub mod catalog;
pub mod changes;
pub mod duration;
pub mod registry;
pub mod selector;
pub mod window;

pub use catalog::{Catalog, Rates, TOTAL_SERIES};
pub use changes::{Change, ChangeQueue};
pub use registry::{Registry, Sample, Series, SeriesBuffer};
pub use selector::{Direction, ViewSelector};
pub use window::BufferWindow;
