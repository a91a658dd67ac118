//! The periodic "request server lists from every upstream directory" timer,
//! grounded in `central_proxy.py`'s `ActionScheduler`.

/// Fires at a fixed interval, starting immediately. `poll` tells the caller
/// whether it's time to act; `next_timeout` tells the caller how long it
/// may block before calling `poll` again.
#[derive(Debug)]
pub struct Scheduler {
    next_fire_at: u64,
    interval_secs: u64,
}

impl Scheduler {
    /// Builds a scheduler that fires immediately on the first `poll`, then
    /// every `interval_secs` seconds after that.
    pub fn new(now: u64, interval_secs: u64) -> Self {
        Scheduler {
            next_fire_at: now,
            interval_secs,
        }
    }

    /// Returns true and advances the schedule if `now` has reached the
    /// next fire time.
    pub fn poll(&mut self, now: u64) -> bool {
        if self.next_fire_at <= now {
            self.next_fire_at += self.interval_secs.max(1);
            true
        } else {
            false
        }
    }

    /// Seconds until the next fire, possibly negative if a fire is
    /// already overdue — the caller should skip blocking on receive and
    /// call `poll` again immediately in that case, matching
    /// `ActionScheduler.run`'s "negative timeout" log line.
    pub fn next_timeout(&self, now: u64) -> i64 {
        self.next_fire_at as i64 - now as i64
    }
}
