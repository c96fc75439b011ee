//! Wand activation and the tick-driven repeat scheduler.
//!
//! Single and area abilities complete inside the triggering event. Repeat
//! abilities outlive it: the first firing happens immediately, the rest
//! are queued on the [`WandScheduler`] and drained by the host's tick
//! loop. Every queued firing re-checks the handle and the caster before
//! acting, so a cancelled task or a disconnected caster stops cleanly
//! mid-sequence instead of firing into an empty world.
//!
//! One active sequence per caster: triggering a repeat wand while its
//! previous sequence is still running is ignored rather than stacked.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use arcanum_core::catalog::{AreaAction, WandAbility, WandAction, WandDefinition};
use arcanum_core::error::Result;
use arcanum_core::types::{ItemKind, ItemStack, PlayerId};
use arcanum_core::Catalog;

use crate::host::GameHost;

// ---------------------------------------------------------------------------
// Task handles
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TaskFlags {
    cancelled: AtomicBool,
    finished: AtomicBool,
}

/// Shared handle to a scheduled repeat sequence.
///
/// Cloning is cheap; any clone may cancel. A handle whose task has fired
/// its last repeat (or was cancelled) reports inactive.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle(Arc<TaskFlags>);

impl TaskHandle {
    /// Request cancellation; the task is dropped at its next due tick.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::Release);
    }

    /// Whether the sequence still has firings pending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.0.cancelled.load(Ordering::Acquire) && !self.0.finished.load(Ordering::Acquire)
    }

    fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::Acquire)
    }

    fn finish(&self) {
        self.0.finished.store(true, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RepeatTask {
    caster: PlayerId,
    action: WandAction,
    interval_ticks: u32,
    ticks_until_due: u32,
    remaining: u32,
    handle: TaskHandle,
}

/// Queue of pending repeat firings, advanced by the host tick loop.
#[derive(Debug, Default)]
pub struct WandScheduler {
    tasks: Vec<RepeatTask>,
}

impl WandScheduler {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sequences still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    fn schedule(
        &mut self,
        caster: PlayerId,
        action: WandAction,
        interval_ticks: u32,
        remaining: u32,
    ) -> TaskHandle {
        let handle = TaskHandle::default();
        if remaining == 0 {
            handle.finish();
            return handle;
        }
        self.tasks.push(RepeatTask {
            caster,
            action,
            interval_ticks,
            ticks_until_due: interval_ticks,
            remaining,
            handle: handle.clone(),
        });
        handle
    }

    /// Advance the scheduler by one simulation tick, firing every due
    /// repeat through `host`.
    pub fn tick<H: GameHost>(&mut self, host: &mut H) {
        let mut index = 0;
        while index < self.tasks.len() {
            let task = &mut self.tasks[index];

            if task.handle.is_cancelled() {
                debug!(caster = %task.caster, "repeat sequence cancelled");
                self.tasks.swap_remove(index);
                continue;
            }

            task.ticks_until_due = task.ticks_until_due.saturating_sub(1);
            if task.ticks_until_due > 0 {
                index += 1;
                continue;
            }

            // Due. A caster who logged out mid-sequence ends it.
            if !host.is_online(task.caster) {
                warn!(caster = %task.caster, "caster offline, ending repeat sequence");
                task.handle.cancel();
                self.tasks.swap_remove(index);
                continue;
            }

            host.launch(task.caster, task.action);
            task.remaining -= 1;
            if task.remaining == 0 {
                task.handle.finish();
                self.tasks.swap_remove(index);
                continue;
            }
            task.ticks_until_due = task.interval_ticks;
            index += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// What a wand trigger amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The held item is not a fashioned wand; the event is not ours.
    NotAWand,
    /// A repeat sequence is already running for this caster.
    Busy,
    /// The ability fired (or its sequence was queued).
    Fired,
}

/// Routes wand triggers to their abilities, holding the one-active-
/// sequence-per-caster state.
#[derive(Debug, Default)]
pub struct WandDispatcher {
    active: HashMap<PlayerId, TaskHandle>,
}

impl WandDispatcher {
    /// A dispatcher with no active sequences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the wand in `held`, if it is one.
    ///
    /// # Errors
    /// Returns [`arcanum_core::ArcanumError::UnknownWand`] if the item
    /// carries a wand tag the catalog no longer defines.
    pub fn activate<H: GameHost>(
        &mut self,
        host: &mut H,
        scheduler: &mut WandScheduler,
        catalog: &Catalog,
        caster: PlayerId,
        held: &ItemStack,
    ) -> Result<Activation> {
        if held.kind != ItemKind::BlazeRod {
            return Ok(Activation::NotAWand);
        }
        let Some(kind) = held.wand else {
            return Ok(Activation::NotAWand);
        };
        let def = catalog.wand(kind)?;

        if self
            .active
            .get(&caster)
            .is_some_and(TaskHandle::is_active)
        {
            debug!(%caster, wand = %kind, "wand re-trigger ignored, sequence active");
            return Ok(Activation::Busy);
        }
        self.active.remove(&caster);

        info!(%caster, wand = %kind, "wand triggered");
        match def.ability {
            WandAbility::Single(action) => host.launch(caster, action),
            WandAbility::Area { action, radius } => Self::sweep(host, caster, def, action, radius),
            WandAbility::Repeat {
                action,
                interval_ticks,
                repeats,
            } => {
                // First firing is immediate; the remainder are queued.
                host.launch(caster, action);
                if repeats > 1 {
                    let handle = scheduler.schedule(caster, action, interval_ticks, repeats - 1);
                    self.active.insert(caster, handle);
                }
            }
        }
        Ok(Activation::Fired)
    }

    /// Cancel the caster's running sequence, if any. Used when the caster
    /// disconnects.
    pub fn cancel(&mut self, caster: PlayerId) {
        if let Some(handle) = self.active.remove(&caster) {
            handle.cancel();
        }
    }

    /// Whether the caster has a sequence still running.
    #[must_use]
    pub fn is_busy(&self, caster: PlayerId) -> bool {
        self.active
            .get(&caster)
            .is_some_and(TaskHandle::is_active)
    }

    fn sweep<H: GameHost>(
        host: &mut H,
        caster: PlayerId,
        def: &WandDefinition,
        action: AreaAction,
        radius: f64,
    ) {
        let mut struck = 0_u32;
        for (entity, mob) in host.nearby_entities(caster, radius) {
            if !mob.is_hostile() {
                continue;
            }
            match action {
                AreaAction::Ignite => host.ignite(entity),
                AreaAction::Lightning => host.strike_lightning(entity),
            }
            struck += 1;
        }
        debug!(%caster, wand = def.name, struck, "area sweep complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_handle_reports_inactive() {
        let handle = TaskHandle::default();
        assert!(handle.is_active());
        handle.cancel();
        assert!(!handle.is_active());
    }

    #[test]
    fn zero_remaining_schedules_nothing() {
        let mut scheduler = WandScheduler::new();
        let handle = scheduler.schedule(PlayerId::new(), WandAction::SpawnArrow, 10, 0);
        assert!(!handle.is_active());
        assert_eq!(scheduler.pending(), 0);
    }
}
