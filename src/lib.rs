// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # brokerwatch
//!
//! A live throughput TUI and library for monitoring message broker
//! activity.
//!
//! This crate renders the read/write byte rates of a broker cluster's
//! components as a time-windowed line chart: one selectable series per
//! component plus a `"total"` aggregate, sampled on a fixed cadence and
//! retained for a sliding horizon (ten minutes by default).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │(buffers) │    │(chart)  │    │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── FileSource | StreamSource | ChannelSource   │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: application state and the two producers (snapshot
//!   arrival, sampling tick) feeding the single-threaded main loop
//! - **[`source`]**: data source abstraction ([`DataSource`] trait) with
//!   implementations for file polling, TCP streams, and channel input
//! - **[`data`]**: the data path - catalog reconciliation, per-series
//!   sample buffers, the sampling window, and the visibility selector
//! - **[`ui`]**: terminal rendering using ratatui - the live chart, the
//!   series sidebar, and shared chrome
//! - **[`config`]**: cadence/horizon settings from file and environment
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Follow a JSON snapshot file some agent rewrites periodically
//! brokerwatch --file throughput.json
//!
//! # Follow a live NDJSON feed over TCP
//! brokerwatch --connect localhost:9000
//!
//! # Shorter window, faster sampling
//! brokerwatch --tick 1s --horizon 2m
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use brokerwatch::{App, BufferWindow, FileSource};
//!
//! let source = Box::new(FileSource::new("throughput.json"));
//! let app = App::new(source, BufferWindow::default());
//! ```
//!
//! ### As a library with a channel source (for embedding)
//!
//! ```
//! use brokerwatch::{App, BufferWindow, BrokerThroughput, ChannelSource};
//!
//! // Create a channel for pushing snapshots
//! let (tx, source) = ChannelSource::create("cluster-a");
//!
//! // Push a snapshot whenever your feed updates
//! tx.send(vec![BrokerThroughput {
//!     name: "total".to_string(),
//!     read: 1024.0,
//!     write: 2048.0,
//! }]).unwrap();
//!
//! let app = App::new(Box::new(source), BufferWindow::default());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{
    BufferWindow, Catalog, Change, ChangeQueue, Direction, Rates, Registry, Sample, Series,
    SeriesBuffer, ViewSelector, TOTAL_SERIES,
};
pub use source::{
    decode_snapshot, decode_snapshot_bytes, BrokerThroughput, ChannelSource, DataSource,
    FileSource, StreamSource, ThroughputSnapshot,
};
