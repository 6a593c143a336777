//! Data source abstraction for receiving throughput snapshots.
//!
//! This module provides a trait-based abstraction for receiving throughput
//! data from various sources (files, in-memory channels, network streams).

mod channel;
mod file;
mod snapshot;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{decode_snapshot, decode_snapshot_bytes, BrokerThroughput, ThroughputSnapshot};
pub use stream::StreamSource;

use std::fmt::Debug;

/// Trait for receiving throughput snapshots from various backends.
///
/// Implementations provide snapshots from different transports - file
/// polling, TCP streams, or in-memory channels. Polling must never block:
/// when no new snapshot is available the caller keeps working with the
/// last-known rates.
///
/// # Example
///
/// ```
/// use brokerwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("throughput.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} components", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data arrived since the previous
    /// poll, `None` otherwise. Non-blocking.
    fn poll(&mut self) -> Option<ThroughputSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Source errors are soft: the view keeps rendering the last-known
    /// buffers while the error is shown in the status bar.
    fn error(&self) -> Option<&str>;
}
