//! Undo-window timers
//!
//! [`TimerScheduler`] is the only source of time for the cart. Production
//! code uses [`TokioTimers`]; tests use [`ManualTimers`] and move a virtual
//! clock forward explicitly.

use parking_lot::Mutex;
use shared::error::{AppError, AppResult, ErrorCode};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Work to run when a timer elapses
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Cancellable handle to a scheduled timer
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    /// Handle for a scheduler that cancels through `token`
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Prevent the task from running. No effect once it has fired.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Schedules one-shot tasks
pub trait TimerScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

// ============================================================================
// Tokio
// ============================================================================

/// Timers backed by `tokio::time::sleep`
///
/// Every timer is a child of one root token, so [`TokioTimers::shutdown`]
/// cancels everything still pending.
pub struct TokioTimers {
    handle: Handle,
    root: CancellationToken,
}

impl TokioTimers {
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            root: CancellationToken::new(),
        }
    }

    /// Bind to the runtime of the calling context
    pub fn try_current() -> AppResult<Self> {
        let handle = Handle::try_current().map_err(|e| {
            AppError::with_message(ErrorCode::RuntimeUnavailable, format!("{}", e))
        })?;
        Ok(Self::with_handle(handle))
    }

    /// Cancel all pending timers
    pub fn shutdown(&self) {
        self.root.cancel();
    }
}

impl TimerScheduler for TokioTimers {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let token = self.root.child_token();
        let guard = token.clone();
        self.handle.spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    tracing::trace!("Timer cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    task();
                }
            }
        });
        TimerHandle::new(token)
    }
}

// ============================================================================
// Manual (virtual time)
// ============================================================================

struct ScheduledTask {
    due: Duration,
    seq: u64,
    token: CancellationToken,
    task: TimerTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    scheduled: Vec<ScheduledTask>,
}

/// Deterministic timers driven by [`ManualTimers::advance`]
#[derive(Default)]
pub struct ManualTimers {
    state: Mutex<ManualState>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Timers that are neither fired nor cancelled
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .scheduled
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .count()
    }

    /// Move the clock forward, running every task that comes due in
    /// deadline order. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut fired = 0;

        loop {
            // Tasks run without the lock held; they may schedule more timers
            let next = {
                let mut state = self.state.lock();
                state.scheduled.retain(|t| !t.token.is_cancelled());
                let idx = state
                    .scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let task = state.scheduled.swap_remove(i);
                    state.now = task.due;
                    task
                })
            };

            match next {
                Some(t) => {
                    (t.task)();
                    fired += 1;
                }
                None => break,
            }
        }

        self.state.lock().now = target;
        fired
    }
}

impl TimerScheduler for ManualTimers {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let token = CancellationToken::new();
        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now + delay;
        state.scheduled.push(ScheduledTask {
            due,
            seq,
            token: token.clone(),
            task,
        });
        TimerHandle::new(token)
    }
}
