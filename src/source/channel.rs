//! Channel-based data source.
//!
//! Receives throughput snapshots via a tokio watch channel. This is the
//! embedding path: a host application that already has a feed of broker
//! metrics pushes snapshots through the channel instead of writing files.

use tokio::sync::watch;

use super::{DataSource, ThroughputSnapshot};

/// A data source that receives throughput snapshots via a channel.
///
/// The producer (for example a task draining a push feed) sends snapshots
/// through the channel, and this source hands them to the view on poll.
///
/// # Example
///
/// ```
/// use brokerwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("cluster-a");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<ThroughputSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    ///   (e.g., "cluster-a", "ws://broker:9000")
    pub fn new(receiver: watch::Receiver<ThroughputSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender is used to push snapshots
    /// and the source plugs into the TUI.
    pub fn create(source_description: &str) -> (watch::Sender<ThroughputSnapshot>, Self) {
        let (tx, rx) = watch::channel(ThroughputSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<ThroughputSnapshot> {
        // Return the initial value on first poll, even if it was sent
        // before anyone polled
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            let snapshot = self.receiver.borrow_and_update().clone();
            Some(snapshot)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Channel sources don't have transport errors of their own; the
        // producing side owns those
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BrokerThroughput;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert!(snapshot.unwrap().is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        // Send a new snapshot
        tx.send(vec![BrokerThroughput {
            name: "total".to_string(),
            read: 10.0,
            write: 20.0,
        }])
        .unwrap();

        // Now poll returns the new snapshot exactly once
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "total");
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("cluster-a");
        assert_eq!(source.description(), "channel: cluster-a");
    }
}
