//! Tick scheduling for hosts that drive the economy from a clock.
//!
//! The host owns the timer and reports the current time; `Cadence` answers
//! "is a tick due now?" and guarantees a tick is never started while another is
//! still in flight.

/// Fixed-period schedule with no backlog catch-up.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval_ms: u64,
    next_due_ms: Option<u64>,
    in_flight: bool,
    /// Periods that elapsed without their own tick (host stalled)
    missed_periods: u64,
}

impl Cadence {
    /// `interval_ms` must be non-zero; config validation guarantees this.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
            in_flight: false,
            missed_periods: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    pub fn missed_periods(&self) -> u64 {
        self.missed_periods
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start the first period at `now_ms`. Polling an unstarted cadence also starts it.
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    /// Whether a tick is due at `now_ms`. Fires at most once per call.
    ///
    /// When several periods have elapsed the extra ones are counted as missed
    /// and the next deadline lands on the first period boundary after `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_due_ms else {
            self.start(now_ms);
            return false;
        };

        if now_ms < due {
            return false;
        }

        let elapsed_periods = (now_ms - due) / self.interval_ms;
        self.missed_periods += elapsed_periods;
        let next = due.saturating_add((elapsed_periods + 1).saturating_mul(self.interval_ms));
        self.next_due_ms = Some(next);
        true
    }

    /// Claim the tick slot. Returns false if a tick is already running.
    pub fn begin_tick(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish_tick(&mut self) {
        self.in_flight = false;
    }
}
