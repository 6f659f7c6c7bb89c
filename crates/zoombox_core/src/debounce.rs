//! Debounced resize signal
//!
//! Turns a burst of raw resize occurrences into a single "settled"
//! notification. Every occurrence pushes the deadline out by the settle
//! delay; the signal fires once the deadline passes with no further
//! occurrence. This is a debounce, not a throttle: a resize stream that
//! never pauses never settles.
//!
//! The signal does not own a timer. Callers pass the current instant to
//! [`DebouncedResize::trigger`] and [`DebouncedResize::poll`], and use
//! [`DebouncedResize::deadline`] to decide when to poll next.

use std::time::{Duration, Instant};

/// Quiet period used when none is configured
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Emitted once per burst after the quiet period elapses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleEvent {
    /// Raw occurrences coalesced into this settle
    pub burst_len: u32,
    /// When the last raw occurrence of the burst happened
    pub last_resize: Instant,
    /// When the settle was observed
    pub fired_at: Instant,
}

impl SettleEvent {
    /// Time between the last raw occurrence and the settle
    pub fn quiet_period(&self) -> Duration {
        self.fired_at.saturating_duration_since(self.last_resize)
    }
}

/// Whole milliseconds in `delay`, saturating at `u64::MAX`
pub(crate) fn saturating_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Deadline timer that coalesces a burst of raw resizes into one settle
///
/// ```
/// use std::time::{Duration, Instant};
/// use zoombox_core::DebouncedResize;
///
/// let mut signal = DebouncedResize::new(Duration::from_millis(100));
/// let start = Instant::now();
/// signal.trigger(start);
/// signal.trigger(start + Duration::from_millis(30));
///
/// assert!(signal.poll(start + Duration::from_millis(100)).is_none());
/// let settled = signal.poll(start + Duration::from_millis(130)).unwrap();
/// assert_eq!(settled.burst_len, 2);
/// ```
#[derive(Debug)]
pub struct DebouncedResize {
    delay: Duration,
    deadline: Option<Instant>,
    last_resize: Option<Instant>,
    burst_len: u32,
    settled_count: u64,
}

impl DebouncedResize {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            last_resize: None,
            burst_len: 0,
            settled_count: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the settle delay
    ///
    /// A pending deadline keeps its original time; the new delay applies
    /// from the next trigger.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record a raw resize at `now`, superseding any pending deadline
    ///
    /// A delay too long to represent as an `Instant` leaves no deadline: the
    /// burst never settles.
    pub fn trigger(&mut self, now: Instant) {
        if self.deadline.is_some() {
            tracing::trace!(burst_len = self.burst_len, "settle timer restarted");
        }
        self.deadline = now.checked_add(self.delay);
        if self.deadline.is_none() {
            tracing::warn!(delay = ?self.delay, "settle delay out of range, burst will not settle");
        }
        self.last_resize = Some(now);
        self.burst_len = self.burst_len.saturating_add(1);
    }

    /// Fire the settle notification if its deadline has passed
    ///
    /// Returns `Some` at most once per burst.
    pub fn poll(&mut self, now: Instant) -> Option<SettleEvent> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        let event = SettleEvent {
            burst_len: self.burst_len,
            last_resize: self.last_resize.unwrap_or(now),
            fired_at: now,
        };
        self.deadline = None;
        self.burst_len = 0;
        self.settled_count += 1;
        Some(event)
    }

    /// Drop a pending deadline without firing; returns whether one existed
    pub fn cancel(&mut self) -> bool {
        self.burst_len = 0;
        self.deadline.take().is_some()
    }

    /// When the pending settle is due
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of settles fired so far
    pub fn settled_count(&self) -> u64 {
        self.settled_count
    }
}

impl Default for DebouncedResize {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}
