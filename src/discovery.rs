//! Startup discovery of editable surfaces.
//!
//! Hosts build their surface list asynchronously, so the first scan after
//! load often finds nothing. [`Bootstrap`] schedules rescans: the host
//! scans, reports how many surfaces it found, and either proceeds, sleeps
//! for the returned interval and scans again, or stops scheduling. The
//! host owns the timer; this type only decides.

use std::time::Duration;

use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rescan schedule for the startup scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BootstrapConfig {
    /// Empty scans tolerated before giving up.
    pub max_attempts: u32,
    /// Delay between consecutive scans.
    pub poll_interval: Duration,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { max_attempts: 20, poll_interval: Duration::from_millis(500) }
    }
}

/// What the host should do after reporting a scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Surfaces exist: feed them to [`Session::set_lines`] and start
    /// handling keys.
    ///
    /// [`Session::set_lines`]: crate::engine::Session::set_lines
    Ready,
    /// Nothing yet: scan again after this delay.
    Retry(Duration),
    /// The retry ceiling was reached: stop scheduling rescans.
    GaveUp,
}

/// Decides whether an empty scan warrants another attempt.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    config: BootstrapConfig,
    attempts: u32,
    exhausted: bool,
}

impl Bootstrap {
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config, attempts: 0, exhausted: false }
    }

    /// Empty scans reported so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Report one scan's result and get the next step.
    ///
    /// A non-zero count yields [`ScanOutcome::Ready`] no matter how many
    /// attempts came before. Once the ceiling is reached every further
    /// empty scan yields [`ScanOutcome::GaveUp`]; the giving-up itself is
    /// logged exactly once.
    pub fn observe(&mut self, surfaces_found: usize) -> ScanOutcome {
        if surfaces_found > 0 {
            return ScanOutcome::Ready;
        }
        if !self.exhausted {
            if self.attempts < self.config.max_attempts {
                self.attempts += 1;
                return ScanOutcome::Retry(self.config.poll_interval);
            }
            self.exhausted = true;
            warn!(attempts = self.attempts, "no editable surfaces found, giving up");
        }
        ScanOutcome::GaveUp
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(BootstrapConfig::default())
    }
}
