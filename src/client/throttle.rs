//! Sliding-window call throttling.
//!
//! A [`RateLimiter`] keeps the completion instants of recent calls. Before a
//! call proceeds, instants older than the window are dropped; if the quota is
//! still exhausted the caller waits until the oldest counted call leaves the
//! window. The whole prune/decide/run/record sequence runs under one lock, so
//! a limiter can be shared by concurrent tasks.

use std::collections::VecDeque;
use std::future::Future;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::config::Throttle;
use crate::Result;

/// Enforces "at most `calls` completions per `seconds`-long window".
#[derive(Debug)]
pub struct RateLimiter {
    window: Mutex<CallWindow>,
}

#[derive(Debug)]
struct CallWindow {
    throttle: Throttle,
    history: VecDeque<Instant>,
}

impl CallWindow {
    fn prune(&mut self, now: Instant) {
        let window = self.throttle.window();
        while let Some(&oldest) = self.history.front() {
            if now.saturating_duration_since(oldest) > window {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Instant at which the next call may proceed, `None` if it may go now.
    fn ready_at(&mut self, now: Instant) -> Option<Instant> {
        self.prune(now);
        let calls = self.throttle.calls as usize;
        if self.history.len() < calls {
            return None;
        }
        let blocking = self.history[self.history.len() - calls];
        let ready = blocking + self.throttle.window();
        (ready > now).then_some(ready)
    }
}

impl RateLimiter {
    /// Create a limiter for the given quota.
    pub fn new(throttle: Throttle) -> Result<Self> {
        throttle.validate()?;
        Ok(Self {
            window: Mutex::new(CallWindow {
                throttle,
                history: VecDeque::new(),
            }),
        })
    }

    /// Run `op` once the quota allows it and record its completion.
    ///
    /// Only the calling task is suspended while waiting.
    pub async fn throttle<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut window = self.window.lock().await;
        if let Some(ready) = window.ready_at(Instant::now()) {
            let wait = ready.saturating_duration_since(Instant::now());
            debug!(secs = wait.as_secs_f64(), "stalling call");
            sleep_until(ready).await;
        }
        let output = op().await;
        window.history.push_back(Instant::now());
        output
    }

    /// Replace the quota. Call history is kept, so calls already made still
    /// count toward the new window.
    pub async fn reconfigure(&self, throttle: Throttle) -> Result<()> {
        throttle.validate()?;
        debug!(calls = throttle.calls, seconds = throttle.seconds, "throttling");
        self.window.lock().await.throttle = throttle;
        Ok(())
    }

    /// The quota currently enforced.
    pub async fn current(&self) -> Throttle {
        self.window.lock().await.throttle
    }
}
