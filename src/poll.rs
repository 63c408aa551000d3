#![cfg(feature = "std")]
//! Cancellable polling of a lobby's game state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Notify;
use tokio::time::{sleep, Duration, Instant};

use crate::core::GameState;
use crate::transport::LobbyApi;

/// Default delay between two polls (2 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Longest delay the error backoff grows to (16 seconds).
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(16);

/// Shortest delay after a failed poll, whatever the interval (50 ms).
pub const MIN_RETRY_DELAY: Duration = Duration::from_millis(50);

/// How long the lobby may stay unchanged before polling gives up (10 minutes).
pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Timing of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between polls while the server answers.
    pub interval: Duration,
    /// Cap for the delay after consecutive failed polls.
    pub max_interval: Duration,
    /// Maximum time without an observed change in game state.
    pub stall_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
            stall_timeout: DEFAULT_STALL_TIMEOUT,
        }
    }
}

impl PollPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self.max_interval = self.max_interval.max(interval);
        self
    }

    pub fn with_stall_timeout(mut self, stall_timeout: Duration) -> Self {
        self.stall_timeout = stall_timeout;
        self
    }

    /// Delay after a failed poll that followed a wait of `current`. Never
    /// below [`MIN_RETRY_DELAY`], even with a zero interval.
    pub fn backoff(&self, current: Duration) -> Duration {
        let cap = self.max_interval.max(self.interval);
        current
            .saturating_mul(2)
            .max(self.interval)
            .min(cap)
            .max(MIN_RETRY_DELAY)
    }
}

/// Handle that stops a [`Poller`] from another task.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Stores a permit, so a sleep that starts later still wakes.
        self.notify.notify_one();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn sleep(&self, delay: Duration) {
        if self.is_cancelled() {
            return;
        }
        tokio::select! {
            _ = sleep(delay) => {}
            _ = self.notify.notified() => {}
        }
    }
}

/// One successful poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    /// `false` when the state equals the previous snapshot.
    pub changed: bool,
}

/// Fetches game state on a fixed cadence, backing off while the server
/// fails and giving up when the lobby stalls.
pub struct Poller {
    policy: PollPolicy,
    cancel: CancelHandle,
    delay: Duration,
    wait_next: bool,
    last_change: Instant,
    last_seen: Option<GameState>,
}

impl Poller {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            cancel: CancelHandle::default(),
            delay: policy.interval,
            wait_next: false,
            last_change: Instant::now(),
            last_seen: None,
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Skip the wait before the next poll, e.g. right after submitting a move.
    pub fn poll_now(&mut self) {
        self.wait_next = false;
    }

    /// Wait for the next poll slot, then fetch until a fetch succeeds.
    pub async fn next(&mut self, api: &dyn LobbyApi, lobby: &str) -> anyhow::Result<Snapshot> {
        loop {
            if self.wait_next {
                self.cancel.sleep(self.delay).await;
            }
            self.wait_next = true;
            if self.cancel.is_cancelled() {
                return Err(anyhow::anyhow!("Polling cancelled"));
            }
            if self.last_change.elapsed() > self.policy.stall_timeout {
                return Err(anyhow::anyhow!(
                    "Lobby {} stalled: no change for {:?}",
                    lobby,
                    self.policy.stall_timeout
                ));
            }

            match api.fetch_game_state(lobby).await {
                Ok(state) => {
                    self.delay = self.policy.interval;
                    let changed = self.last_seen.as_ref() != Some(&state);
                    if changed {
                        self.last_change = Instant::now();
                        self.last_seen = Some(state.clone());
                    }
                    return Ok(Snapshot { state, changed });
                }
                Err(e) => {
                    self.delay = self.policy.backoff(self.delay);
                    warn!("Failed to fetch game state for lobby {}: {:#}", lobby, e);
                    debug!("Next poll in {:?}", self.delay);
                }
            }
        }
    }
}
