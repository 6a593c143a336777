//! Shared types for throughput snapshots.
//!
//! These types match the serialization format produced by the broker's
//! monitoring endpoint: a flat array of per-component byte rates, with a
//! synthetic `"total"` entry aggregating the whole cluster.

use serde::{Deserialize, Serialize};

/// Current byte rates for a single broker component.
///
/// Rates are bytes per second, as reported by the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerThroughput {
    /// Component name, unique within a snapshot. `"total"` is the
    /// cluster-wide aggregate.
    pub name: String,
    /// Outbound (consumer-facing) byte rate.
    pub read: f64,
    /// Inbound (producer-facing) byte rate.
    pub write: f64,
}

/// A complete throughput snapshot: one entry per component.
pub type ThroughputSnapshot = Vec<BrokerThroughput>;

/// Decode a snapshot from a JSON string.
///
/// Decoding is lenient per entry: elements missing `name`, `read`, or
/// `write` (or carrying the wrong types) are dropped and the rest of the
/// snapshot is kept. Only a document that is not a JSON array at all is an
/// error.
pub fn decode_snapshot(content: &str) -> serde_json::Result<ThroughputSnapshot> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(content)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Decode a snapshot from raw JSON bytes. Same per-entry leniency as
/// [`decode_snapshot`].
pub fn decode_snapshot_bytes(bytes: &[u8]) -> serde_json::Result<ThroughputSnapshot> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_snapshot() {
        let json = r#"[
            {"name": "total", "read": 2048.0, "write": 4096.0},
            {"name": "broker-0", "read": 1024.0, "write": 2048.0}
        ]"#;

        let snapshot = decode_snapshot(json).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "total");
        assert_eq!(snapshot[0].read, 2048.0);
        assert_eq!(snapshot[1].write, 2048.0);
    }

    #[test]
    fn test_decode_drops_malformed_entries() {
        let json = r#"[
            {"name": "total", "read": 10.0, "write": 20.0},
            {"name": "no-rates"},
            {"read": 1.0, "write": 2.0},
            {"name": "broker-1", "read": "fast", "write": 2.0},
            {"name": "broker-2", "read": 5.0, "write": 6.0}
        ]"#;

        let snapshot = decode_snapshot(json).unwrap();
        let names: Vec<&str> = snapshot.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["total", "broker-2"]);
    }

    #[test]
    fn test_decode_integer_rates() {
        // Upstream sends whole numbers without a decimal point.
        let snapshot = decode_snapshot(r#"[{"name": "total", "read": 0, "write": 1024}]"#).unwrap();
        assert_eq!(snapshot[0].write, 1024.0);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_snapshot(r#"{"name": "total"}"#).is_err());
        assert!(decode_snapshot("not json").is_err());
    }

    #[test]
    fn test_decode_bytes() {
        let snapshot =
            decode_snapshot_bytes(br#"[{"name": "a", "read": 1.0, "write": 2.0}]"#).unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
