//! Optimistic removal with undo
//!
//! Removing a line takes it out of the caller's list immediately and opens an
//! undo window. Per line id the state is either absent or pending:
//!
//! ```text
//!            remove_item                 timer elapses
//!   Absent ─────────────▶ PendingRemoval ─────────────▶ Absent (stays removed)
//!                               │
//!                               │ undo
//!                               ▼
//!                        Absent (line reinserted)
//! ```
//!
//! The list itself is owned by the caller and borrowed per call. The mutator
//! keeps only the snapshot needed to restore a line, and no persistence call
//! is made from here.

use parking_lot::Mutex;
use shared::order::{LineItem, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use super::notifier::{Notification, Notifier};
use super::timer::{TimerHandle, TimerScheduler};

/// Default undo window
pub const DEFAULT_UNDO_TIMEOUT: Duration = Duration::from_millis(5000);

/// Mutator policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutatorConfig {
    /// How long undo stays possible (and how long the toast shows)
    pub undo_timeout: Duration,
    pub min_quantity: i32,
    pub max_quantity: i32,
    /// Show a toast even when the line to remove is already gone
    pub notify_missing_removal: bool,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            undo_timeout: DEFAULT_UNDO_TIMEOUT,
            min_quantity: MIN_LINE_QUANTITY,
            max_quantity: MAX_LINE_QUANTITY,
            notify_missing_removal: false,
        }
    }
}

/// Result of [`OptimisticListMutator::remove_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Line taken out of the list at `index`, undo window open
    Removed { index: usize },
    /// No line with that id in the list
    NotFound,
}

/// Result of [`OptimisticListMutator::undo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// Line put back at `index`
    Restored { index: usize },
    /// A line with that id was already in the list; nothing inserted
    AlreadyPresent,
    /// Window elapsed, already undone, or never removed
    NotPending,
}

/// Result of [`OptimisticListMutator::handle_qty_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity stored, after clamping
    Updated { quantity: i32 },
    /// Non-positive quantity treated as a removal request
    Removed(RemovalOutcome),
    /// No line with that id in the list
    NotFound,
}

struct PendingRemoval {
    item: LineItem,
    index: usize,
    /// Attached once scheduling returns
    timer: Option<TimerHandle>,
    generation: u64,
}

impl PendingRemoval {
    fn cancel_timer(&self) {
        if let Some(timer) = &self.timer {
            timer.cancel();
        }
    }
}

#[derive(Default)]
struct PendingTable {
    entries: HashMap<String, PendingRemoval>,
    next_generation: u64,
}

/// Optimistic list mutator
///
/// Timer tasks keep only a weak reference to the pending table, so they
/// never extend the mutator's lifetime.
pub struct OptimisticListMutator {
    pending: Arc<Mutex<PendingTable>>,
    timers: Arc<dyn TimerScheduler>,
    notifier: Arc<dyn Notifier>,
    config: MutatorConfig,
}

impl OptimisticListMutator {
    pub fn new(
        config: MutatorConfig,
        timers: Arc<dyn TimerScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pending: Arc::new(Mutex::new(PendingTable::default())),
            timers,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    /// Remove a line now, keeping it restorable until the window elapses
    ///
    /// Removing an id that is not in the list is a no-op. If the id is still
    /// pending from an earlier removal (it was re-added meanwhile), tracking
    /// restarts with the fresh snapshot and the old timer is cancelled.
    pub fn remove_item(&self, items: &mut Vec<LineItem>, line_id: &str) -> RemovalOutcome {
        let Some(index) = items.iter().position(|i| i.line_id == line_id) else {
            tracing::debug!(line_id, "Remove requested for line not in list");
            if self.config.notify_missing_removal {
                self.notifier.notify(Notification::info(
                    "Item already removed",
                    self.config.undo_timeout,
                ));
            }
            return RemovalOutcome::NotFound;
        };

        let item = items.remove(index);
        let name = item.display_name().to_string();

        let generation = {
            let mut table = self.pending.lock();
            let generation = table.next_generation;
            table.next_generation += 1;

            let previous = table.entries.insert(
                line_id.to_string(),
                PendingRemoval {
                    item,
                    index,
                    timer: None,
                    generation,
                },
            );
            if let Some(previous) = previous {
                previous.cancel_timer();
                tracing::debug!(line_id, "Restarted pending removal");
            }
            generation
        };

        // Scheduled outside the lock: a scheduler may run the task inline
        let timer = self.schedule_expiry(line_id, generation);
        match self.pending.lock().entries.get_mut(line_id) {
            Some(pending) if pending.generation == generation => pending.timer = Some(timer),
            _ => tracing::debug!(line_id, "Undo window closed while scheduling"),
        }

        tracing::info!(line_id, index, "Line removed, undo window open");
        self.notifier.notify(
            Notification::info(format!("Removed {}", name), self.config.undo_timeout)
                .with_undo(line_id),
        );

        RemovalOutcome::Removed { index }
    }

    /// Put a pending line back where it was
    ///
    /// Reinserts at the original index, or at the end if the list has since
    /// shrunk below it. Idempotent: a second call, or a call after the
    /// window elapsed, changes nothing.
    pub fn undo(&self, items: &mut Vec<LineItem>, line_id: &str) -> UndoOutcome {
        let Some(pending) = self.pending.lock().entries.remove(line_id) else {
            tracing::debug!(line_id, "Undo ignored, nothing pending");
            return UndoOutcome::NotPending;
        };
        pending.cancel_timer();

        if items.iter().any(|i| i.line_id == line_id) {
            tracing::debug!(line_id, "Undo skipped, line already present");
            return UndoOutcome::AlreadyPresent;
        }

        let index = pending.index.min(items.len());
        items.insert(index, pending.item);
        tracing::info!(line_id, index, "Line restored");

        UndoOutcome::Restored { index }
    }

    /// Apply a quantity edit
    ///
    /// Zero or below is a removal request: a warning is shown, then the line
    /// goes through [`remove_item`](Self::remove_item). Anything else is
    /// clamped into the configured range.
    pub fn handle_qty_change(
        &self,
        items: &mut Vec<LineItem>,
        line_id: &str,
        next_qty: i32,
    ) -> QuantityChange {
        if next_qty <= 0 {
            self.notifier.notify(Notification::warning(
                format!(
                    "Quantity must be at least {}, item removed",
                    self.config.min_quantity
                ),
                self.config.undo_timeout,
            ));
            return QuantityChange::Removed(self.remove_item(items, line_id));
        }

        let Some(line) = items.iter_mut().find(|i| i.line_id == line_id) else {
            return QuantityChange::NotFound;
        };

        let quantity = next_qty
            .min(self.config.max_quantity)
            .max(self.config.min_quantity);
        if quantity != next_qty {
            tracing::debug!(line_id, requested = next_qty, quantity, "Quantity clamped");
        }
        line.quantity = quantity;

        QuantityChange::Updated { quantity }
    }

    pub fn is_pending(&self, line_id: &str) -> bool {
        self.pending.lock().entries.contains_key(line_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().entries.len()
    }

    /// Cancel every undo window and forget the snapshots (teardown)
    pub fn cancel_all(&self) {
        let drained: Vec<PendingRemoval> = {
            let mut table = self.pending.lock();
            table.entries.drain().map(|(_, p)| p).collect()
        };
        if drained.is_empty() {
            return;
        }
        for pending in &drained {
            pending.cancel_timer();
        }
        tracing::debug!(count = drained.len(), "Cancelled pending removals");
    }

    fn schedule_expiry(&self, line_id: &str, generation: u64) -> TimerHandle {
        let table: Weak<Mutex<PendingTable>> = Arc::downgrade(&self.pending);
        let line_id = line_id.to_string();
        self.timers.schedule(
            self.config.undo_timeout,
            Box::new(move || finalize(&table, &line_id, generation)),
        )
    }
}

impl Drop for OptimisticListMutator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Timer callback: the window elapsed, drop the snapshot
///
/// Only the entry this timer created is removed; a newer removal of the
/// same id has a different generation and keeps its own window.
fn finalize(table: &Weak<Mutex<PendingTable>>, line_id: &str, generation: u64) {
    let Some(table) = table.upgrade() else {
        return;
    };
    let mut table = table.lock();
    if table
        .entries
        .get(line_id)
        .is_some_and(|p| p.generation == generation)
    {
        table.entries.remove(line_id);
        tracing::debug!(line_id, "Removal finalized");
    }
}
