//! Series catalog: the sorted, append-only set of known series names and
//! the latest byte rates reported for each.
//!
//! The catalog is the boundary between raw snapshots and the rest of the
//! view: it normalizes whatever the feed sends into a stable ordering and
//! answers "what is this component's current rate" for the sampling tick.

use std::collections::HashMap;

use crate::source::ThroughputSnapshot;

/// Reserved series name for the cluster-wide aggregate. Always sorts
/// ahead of every component name.
pub const TOTAL_SERIES: &str = "total";

/// Latest read/write byte rates for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub read: f64,
    pub write: f64,
}

/// Sorted catalog of series names plus the latest rates per name.
///
/// Names are append-only for the life of the catalog: a component that
/// disappears from later snapshots keeps its slot so the series list and
/// chart stay stable. Rates, in contrast, always reflect only the latest
/// snapshot - a name with no current entry has no rates, and ticks for it
/// are skipped.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All names ever seen, "total" first, then case-insensitive ascending.
    names: Vec<String>,
    /// name -> rates from the latest snapshot only.
    rates: HashMap<String, Rates>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the catalog with the latest snapshot.
    ///
    /// Inserts names not seen before at their sorted position and replaces
    /// the rate table wholesale. Idempotent: re-running with an identical
    /// snapshot leaves names and ordering unchanged. Returns `true` if the
    /// name set grew.
    pub fn update(&mut self, snapshot: &ThroughputSnapshot) -> bool {
        self.rates.clear();

        let mut grew = false;
        for entry in snapshot {
            self.rates.insert(
                entry.name.clone(),
                Rates {
                    read: entry.read,
                    write: entry.write,
                },
            );

            if !self.names.iter().any(|n| n == &entry.name) {
                let key = sort_key(&entry.name);
                let pos = self.names.partition_point(|n| sort_key(n) < key);
                self.names.insert(pos, entry.name.clone());
                grew = true;
            }
        }
        grew
    }

    /// All known names in display order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a name in the display order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Latest rates for a name, or `None` if the latest snapshot did not
    /// mention it.
    pub fn rates(&self, name: &str) -> Option<Rates> {
        self.rates.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Sort key: "total" first, everything else case-insensitive ascending.
fn sort_key(name: &str) -> (bool, String) {
    (name != TOTAL_SERIES, name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BrokerThroughput;

    fn entry(name: &str, read: f64, write: f64) -> BrokerThroughput {
        BrokerThroughput {
            name: name.to_string(),
            read,
            write,
        }
    }

    #[test]
    fn test_total_sorts_first() {
        let mut catalog = Catalog::new();
        catalog.update(&vec![
            entry("zeta", 1.0, 2.0),
            entry("total", 3.0, 4.0),
            entry("Alpha", 5.0, 6.0),
        ]);

        assert_eq!(catalog.names(), &["total", "Alpha", "zeta"]);
    }

    #[test]
    fn test_case_insensitive_ordering() {
        let mut catalog = Catalog::new();
        catalog.update(&vec![
            entry("broker-B", 0.0, 0.0),
            entry("Broker-a", 0.0, 0.0),
            entry("broker-C", 0.0, 0.0),
        ]);

        assert_eq!(catalog.names(), &["Broker-a", "broker-B", "broker-C"]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let snapshot = vec![entry("total", 1.0, 2.0), entry("broker-0", 3.0, 4.0)];

        let mut catalog = Catalog::new();
        catalog.update(&snapshot);
        let first: Vec<String> = catalog.names().to_vec();

        let grew = catalog.update(&snapshot);
        assert!(!grew);
        assert_eq!(catalog.names(), first.as_slice());
    }

    #[test]
    fn test_names_are_append_only() {
        let mut catalog = Catalog::new();
        catalog.update(&vec![entry("total", 1.0, 2.0), entry("broker-0", 3.0, 4.0)]);

        // broker-0 vanishes from the next snapshot
        catalog.update(&vec![entry("total", 5.0, 6.0)]);

        assert_eq!(catalog.names(), &["total", "broker-0"]);
        // ...but its rates are gone until it comes back
        assert!(catalog.rates("broker-0").is_none());
        assert_eq!(catalog.rates("total").unwrap().read, 5.0);
    }

    #[test]
    fn test_new_names_insert_in_order() {
        let mut catalog = Catalog::new();
        catalog.update(&vec![entry("total", 0.0, 0.0), entry("mango", 0.0, 0.0)]);
        catalog.update(&vec![entry("apple", 0.0, 0.0), entry("zebra", 0.0, 0.0)]);

        assert_eq!(catalog.names(), &["total", "apple", "mango", "zebra"]);
    }

    #[test]
    fn test_rates_lookup() {
        let mut catalog = Catalog::new();
        catalog.update(&vec![entry("total", 7.0, 9.0)]);

        let rates = catalog.rates("total").unwrap();
        assert_eq!(rates.read, 7.0);
        assert_eq!(rates.write, 9.0);
        assert!(catalog.rates("missing").is_none());
    }
}
