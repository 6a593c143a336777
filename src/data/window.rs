//! The live buffer window: timer-driven sampling and eviction.
//!
//! On each tick, every registered series gets one new sample per buffer
//! (taken from the catalog's latest rates) and loses whatever has aged
//! past the retention horizon. The window holds no series data itself -
//! catalog and registry are passed in explicitly.

use std::time::{Duration, Instant};

use super::catalog::Catalog;
use super::changes::{Change, ChangeQueue};
use super::registry::{Registry, Sample};

/// Default sampling cadence, matching the upstream refresh interval.
pub const DEFAULT_TICK: Duration = Duration::from_secs(5);

/// Default retention horizon: ten minutes of history.
pub const DEFAULT_HORIZON: Duration = Duration::from_secs(600);

/// Fixed-cadence sampling window over the series registry.
#[derive(Debug, Clone)]
pub struct BufferWindow {
    cadence: Duration,
    horizon: Duration,
    last_tick: Option<Instant>,
}

impl Default for BufferWindow {
    fn default() -> Self {
        Self::new(DEFAULT_TICK, DEFAULT_HORIZON)
    }
}

impl BufferWindow {
    pub fn new(cadence: Duration, horizon: Duration) -> Self {
        Self {
            cadence,
            horizon,
            last_tick: None,
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn horizon(&self) -> Duration {
        self.horizon
    }

    /// Whether a tick is due at `now`. The first call is always due.
    pub fn due(&self, now: Instant) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.cadence,
        }
    }

    /// Run one sampling/eviction cycle at the given clock value.
    ///
    /// For every series in the registry with an entry in the catalog's
    /// latest rates: append `(now, rate)` to both buffers, then drop head
    /// samples older than `now - horizon`. A series the latest snapshot
    /// no longer mentions is skipped whole - no append, no eviction - so
    /// its chart does not truncate retroactively. O(buffer length) per
    /// series.
    pub fn tick_at(
        &mut self,
        now: Instant,
        catalog: &Catalog,
        registry: &mut Registry,
        changes: &mut ChangeQueue,
    ) {
        self.last_tick = Some(now);
        let cutoff = now.checked_sub(self.horizon);

        let mut touched = false;
        for series in registry.iter_mut() {
            let Some(rates) = catalog.rates(&series.name) else {
                continue;
            };

            touched |= series.write.push(Sample {
                at: now,
                rate: rates.write,
            });
            touched |= series.read.push(Sample {
                at: now,
                rate: rates.read,
            });

            if let Some(cutoff) = cutoff {
                series.write.evict_older_than(cutoff);
                series.read.evict_older_than(cutoff);
            }
        }

        if touched {
            changes.push(Change::Buffer);
        }
    }

    /// Convenience wrapper around [`tick_at`](Self::tick_at) using the
    /// current time.
    pub fn tick(&mut self, catalog: &Catalog, registry: &mut Registry, changes: &mut ChangeQueue) {
        self.tick_at(Instant::now(), catalog, registry, changes);
    }
}
