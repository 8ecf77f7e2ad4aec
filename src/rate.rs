//! Outbound rate governing.
//!
//! The upstream tracker can emit far faster than the downstream consumer
//! wants. The governor admits at most one forward per minimum interval and
//! silently drops the rest. Dropping instead of queueing keeps latency
//! bounded for a live feed where only the most recent sample matters. This
//! is a plain leaky limiter: no token bucket, no burst credit for idle
//! periods.

use std::time::{Duration, Instant};

use crate::error::{BridgeError, Result};

/// Target outbound rate in messages per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendRate(f64);

impl SendRate {
    /// Create a send rate. Fails for non-finite or non-positive values.
    pub fn per_second(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(BridgeError::config(format!(
                "send rate must be a positive finite number of messages/second, got {hz}"
            )));
        }
        Ok(Self(hz))
    }

    /// Minimum interval between accepted sends.
    pub fn min_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.0)
    }

    /// The configured rate in Hz.
    pub fn hz(self) -> f64 {
        self.0
    }
}

/// Admits at most one event per minimum interval.
///
/// The decision point takes the event time explicitly so the policy is
/// deterministic and testable without sleeping.
#[derive(Debug)]
pub struct RateGovernor {
    min_interval: Duration,
    last_send: Option<Instant>,
    accepted: u64,
}

impl RateGovernor {
    pub fn new(rate: SendRate) -> Self {
        Self { min_interval: rate.min_interval(), last_send: None, accepted: 0 }
    }

    /// Gate a candidate forward event occurring at `now`.
    ///
    /// Returns `true` (and records the send) if at least the minimum
    /// interval elapsed since the last accepted event, or if nothing has
    /// been sent yet. Returns `false` otherwise; rejected events leave no
    /// trace.
    pub fn admit(&mut self, now: Instant) -> bool {
        let ok = match self.last_send {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        };
        if ok {
            self.last_send = Some(now);
            self.accepted += 1;
        }
        ok
    }

    /// Number of accepted events since the last [`take_accepted`] call.
    ///
    /// [`take_accepted`]: RateGovernor::take_accepted
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Return and reset the accepted counter. Called by the periodic report.
    pub fn take_accepted(&mut self) -> u64 {
        std::mem::take(&mut self.accepted)
    }
}
