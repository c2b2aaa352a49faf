//! Cart editing
//!
//! Optimistic line removal with a bounded undo window, plus the notifier and
//! timer seams it is built on.

mod mutator;
pub mod notifier;
pub mod timer;

pub use mutator::{
    DEFAULT_UNDO_TIMEOUT, MutatorConfig, OptimisticListMutator, QuantityChange, RemovalOutcome,
    UndoOutcome,
};
pub use notifier::{
    BroadcastNotifier, LogNotifier, Notification, NotificationLevel, Notifier, UndoAction,
};
pub use timer::{ManualTimers, TimerHandle, TimerScheduler, TimerTask, TokioTimers};
