/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

/// A single progress update emitted while a download is in flight.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ProgressUpdate {
    bytes_transferred: u64,
    total_bytes_hint: Option<u64>,
    percent: Option<u8>,
}

impl ProgressUpdate {
    /// Total bytes received so far
    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }

    /// The advisory total size the percentage is computed against, if known
    pub fn total_bytes_hint(&self) -> Option<u64> {
        self.total_bytes_hint
    }

    /// Percentage complete in `[0, 100]`.
    ///
    /// `None` when no size hint is available. Monotonically non-decreasing
    /// over the lifetime of one download and capped at 100 even when the
    /// actual byte count exceeds the hint.
    pub fn percent(&self) -> Option<u8> {
        self.percent
    }
}

/// Projects raw byte-count deltas into normalized progress updates.
///
/// Purely internal running state, no I/O. How updates are rendered or
/// throttled is the concern of the [`ProgressSink`] receiving them.
#[derive(Debug)]
pub struct ProgressTracker {
    bytes_transferred: u64,
    total_bytes_hint: Option<u64>,
    last_percent: Option<u8>,
}

impl ProgressTracker {
    /// Create a tracker for a download with the given advisory total size.
    pub fn new(total_bytes_hint: Option<u64>) -> Self {
        Self {
            bytes_transferred: 0,
            total_bytes_hint,
            last_percent: None,
        }
    }

    /// Record a received byte-count delta and project the next update.
    pub fn record(&mut self, delta: u64) -> ProgressUpdate {
        self.bytes_transferred = self.bytes_transferred.saturating_add(delta);

        let percent = self.total_bytes_hint.map(|hint| {
            let computed = if hint == 0 {
                100
            } else {
                let pct = (self.bytes_transferred as u128) * 100 / (hint as u128);
                pct.min(100) as u8
            };
            // the hint is advisory; never let an inaccurate one walk progress backwards
            match self.last_percent {
                Some(last) => last.max(computed),
                None => computed,
            }
        });
        self.last_percent = percent;

        ProgressUpdate {
            bytes_transferred: self.bytes_transferred,
            total_bytes_hint: self.total_bytes_hint,
            percent,
        }
    }
}

/// An observer invoked with a [`ProgressUpdate`] for every chunk received.
#[derive(Clone)]
pub struct ProgressSink {
    pub(crate) observer: Arc<dyn Fn(ProgressUpdate) + Send + Sync + 'static>,
}

impl ProgressSink {
    pub(crate) fn notify(&self, update: ProgressUpdate) {
        (self.observer)(update)
    }
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("ProgressSink");
        formatter.field("observer", &"<closure>");
        formatter.finish()
    }
}

impl<F> From<F> for ProgressSink
where
    F: Fn(ProgressUpdate) + Send + Sync + 'static,
{
    fn from(value: F) -> Self {
        ProgressSink {
            observer: Arc::new(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_monotonic_under_hint() {
        let mut tracker = ProgressTracker::new(Some(100));
        let deltas = [10u64, 15, 25, 50];
        let mut last = 0;
        for delta in deltas {
            let update = tracker.record(delta);
            let pct = update.percent().expect("hint set");
            assert!(pct >= last, "{pct} regressed below {last}");
            last = pct;
        }
        assert_eq!(100, last);
        assert_eq!(100, tracker.bytes_transferred);
    }

    #[test]
    fn test_percent_caps_at_100_when_hint_exceeded() {
        let mut tracker = ProgressTracker::new(Some(10));
        tracker.record(8);
        let update = tracker.record(100);
        assert_eq!(Some(100), update.percent());
        assert_eq!(108, update.bytes_transferred());
    }

    #[test]
    fn test_no_hint_yields_no_percentage() {
        let mut tracker = ProgressTracker::new(None);
        let update = tracker.record(42);
        assert_eq!(None, update.percent());
        assert_eq!(42, update.bytes_transferred());
    }

    #[test]
    fn test_zero_byte_hint() {
        let mut tracker = ProgressTracker::new(Some(0));
        let update = tracker.record(0);
        assert_eq!(Some(100), update.percent());
    }

    #[test]
    fn test_partial_progress_rounds_down() {
        let mut tracker = ProgressTracker::new(Some(3));
        assert_eq!(Some(33), tracker.record(1).percent());
        assert_eq!(Some(66), tracker.record(1).percent());
        assert_eq!(Some(100), tracker.record(1).percent());
    }
}
