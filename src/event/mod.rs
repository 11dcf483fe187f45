/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Event strategies: one decision function per scheduling event.
//!
//! Each trait below corresponds to one event the host kernel reports. A
//! strategy is a stateless type implementing the trait; it drives the
//! enclosing scheduler purely through the policy primitives (plus the
//! optional capabilities it declares in its bounds) and returns the task
//! that should run next.
//!
//! Strategies that only ever return `Some` when a task is available pair
//! with [`idle::WithIdle`], which converts an empty-queue `None` into the
//! idle task and short-circuits the cases where the idle task is current.
//!
//! # Group operations
//!
//! Unblock and kill events can arrive in bursts while some other task holds
//! the CPU. Their handlers therefore take both `current` and the affected
//! task as `Option`s:
//!
//! - *intermediate call* — `current` is `None`: only record the affected
//!   task (enqueue it, or remove the victim); the return value is `None` and
//!   no dispatch decision is made;
//! - *terminating call* — `current` is `Some`: process the affected task if
//!   one is attached, then commit and return the dispatch decision.
//!
//! "Tasks A and B unblocked while C runs" is reported as
//! `on_task_unblocked(None, Some(a))`, `on_task_unblocked(None, Some(b))`,
//! `on_task_unblocked(Some(c), None)` — or by attaching the last task to the
//! terminating call. A group operation may also be finished by a different
//! terminating event, e.g. `on_task_finished` when the unblocks were caused
//! by the current task's exit.

use alloc::sync::Arc;

use crate::caps::HasPriority;
use crate::policy::Policy;

pub mod blocked;
pub mod exit;
pub mod idle;
pub mod killed;
pub mod priority;
pub mod quantum;
pub mod spawn;
pub mod timer;
pub mod unblocked;
pub mod yielded;

/// Decides what runs after a timer interrupt.
pub trait TimerInterruptHandler<S: Policy> {
    /// `current` was running when the timer fired.
    fn on_timer_interrupt(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}

/// Decides what runs after a new task enters the system.
pub trait TaskCreatedHandler<S: Policy> {
    /// `task` was just created while `current` was running.
    fn on_task_created(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
    ) -> Option<Arc<S::Task>>;
}

/// Decides what runs after the current task finishes.
///
/// The kernel destroys `current` after this call returns; no strategy ever
/// re-enqueues it.
pub trait TaskFinishedHandler<S: Policy> {
    /// `current` has run to completion (or terminated itself).
    fn on_task_finished(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}

/// Decides what runs after the current task voluntarily yields.
pub trait TaskYieldedHandler<S: Policy> {
    /// `current` gave up the CPU but is still runnable.
    fn on_task_yielded(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}

/// Decides what runs after the current task blocks.
///
/// The kernel has already parked `current` on a wait object; it is not
/// runnable and must not be enqueued.
pub trait TaskBlockedHandler<S: Policy> {
    /// `current` just blocked.
    fn on_task_blocked(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}

/// Decides what runs after a task is unblocked. Supports group operations
/// (see the [module docs](self)).
pub trait TaskUnblockedHandler<S: Policy> {
    /// `task` became runnable again; `None` for `current` marks an
    /// intermediate call.
    fn on_task_unblocked(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>>;
}

/// Decides what runs after a ready task is killed by another task. Supports
/// group operations (see the [module docs](self)).
///
/// The victim must be a *ready* task distinct from `current`; a task that
/// kills itself goes through [`TaskFinishedHandler`] instead.
pub trait TaskKilledHandler<S: Policy> {
    /// `task` was killed; `None` for `current` marks an intermediate call.
    fn on_task_killed(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>>;
}

/// Decides what runs after some entity changes the priority of a *ready*
/// task (never the running one — that case is
/// [`CurrentPriorityChangedHandler`]).
pub trait TaskPriorityChangedHandler<S>
where
    S: Policy,
    S::Task: HasPriority,
{
    /// `task`'s priority was already updated on the task itself;
    /// `old_level` is where the queue last filed it.
    fn on_task_priority_changed(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
        old_level: <S::Task as HasPriority>::Level,
    ) -> Option<Arc<S::Task>>;
}

/// Decides what runs after the running task changes its own priority.
pub trait CurrentPriorityChangedHandler<S: Policy> {
    /// `current` requested (and already received) a new priority level.
    fn on_current_priority_changed(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}

/// Decides what runs once the current task's tick allotment hits zero.
///
/// Invoked by quantum-aware timer strategies through
/// [`QuantumDelegate`](crate::QuantumDelegate); also callable directly by
/// the kernel if it does its own tick accounting.
pub trait QuantumUsedUpHandler<S: Policy> {
    /// `current` has no ticks left.
    fn on_quantum_used_up(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>>;
}
