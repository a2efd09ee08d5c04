// SPDX-License-Identifier: MPL-2.0
//! Inactivity timer bookkeeping.
//!
//! The UI loop cannot cancel a sleeping task cheaply, so every arm or cancel
//! bumps a generation counter instead. An expiry is honoured only if it still
//! carries the current generation and the timer is armed.

use std::future::Future;
use std::time::Duration;

/// A scheduled expiry, handed to the runtime to sleep on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub generation: u64,
    pub after: Duration,
}

#[derive(Debug)]
pub struct InactivityTimer {
    timeout: Option<Duration>,
    generation: u64,
    armed: bool,
}

impl InactivityTimer {
    /// Creates a disarmed timer. `None` disables it entirely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            generation: 0,
            armed: false,
        }
    }

    /// Restarts the countdown, superseding any pending expiry.
    pub fn arm(&mut self) -> Option<TimerTicket> {
        self.generation += 1;
        self.armed = self.timeout.is_some();
        self.timeout.map(|after| TimerTicket {
            generation: self.generation,
            after,
        })
    }

    /// Cancels any pending expiry.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    /// Consumes an expiry. Returns `true` only for the live ticket.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.armed && generation == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Sleeps for the ticket's duration and yields its generation.
pub fn wait(ticket: TimerTicket) -> impl Future<Output = u64> {
    async move {
        tokio::time::sleep(ticket.after).await;
        ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_ticket_expires_once() {
        let mut timer = InactivityTimer::new(Some(Duration::from_secs(30)));
        let ticket = timer.arm().expect("timer enabled");
        assert_eq!(ticket.after, Duration::from_secs(30));

        assert!(timer.expire(ticket.generation));
        assert!(!timer.expire(ticket.generation));
    }

    #[test]
    fn rearming_supersedes_previous_ticket() {
        let mut timer = InactivityTimer::new(Some(Duration::from_secs(5)));
        let first = timer.arm().unwrap();
        let second = timer.arm().unwrap();

        assert!(!timer.expire(first.generation));
        assert!(timer.expire(second.generation));
    }

    #[test]
    fn cancel_invalidates_pending_ticket() {
        let mut timer = InactivityTimer::new(Some(Duration::from_secs(5)));
        let ticket = timer.arm().unwrap();
        timer.cancel();

        assert!(!timer.is_armed());
        assert!(!timer.expire(ticket.generation));
    }

    #[test]
    fn disabled_timer_never_arms() {
        let mut timer = InactivityTimer::new(None);
        assert_eq!(timer.arm(), None);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_resolves_after_timeout() {
        let ticket = TimerTicket {
            generation: 7,
            after: Duration::from_secs(30),
        };
        let start = tokio::time::Instant::now();

        let generation = wait(ticket).await;

        assert_eq!(generation, 7);
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_is_pending_before_timeout() {
        let ticket = TimerTicket {
            generation: 1,
            after: Duration::from_secs(30),
        };

        let early = tokio::time::timeout(Duration::from_secs(29), wait(ticket)).await;
        assert!(early.is_err());
    }
}
