/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Idle-task awareness as a wrapper.
//!
//! Wrapping a strategy in [`WithIdle`] turns "nothing is ready" (`None`)
//! into the scheduler's idle task and keeps the idle task itself out of the
//! ready queue: when the idle task holds the CPU the wrapper never requeues
//! it, and when a newcomer shows up it preempts the idle task directly. A
//! wrapped terminating call therefore always returns a task.
//!
//! Idle handling is uniform for most events and the impls here are generic
//! over the wrapped strategy. The unblock and kill events differ per
//! variant (the preemptive unblock requeues the interrupted task, the
//! cooperative one must not), so those get dedicated impls.

use alloc::sync::Arc;
use core::marker::PhantomData;

use super::{
    killed, unblocked, CurrentPriorityChangedHandler, TaskBlockedHandler, TaskCreatedHandler,
    TaskFinishedHandler, TaskKilledHandler, TaskPriorityChangedHandler, TaskUnblockedHandler,
    TaskYieldedHandler, TimerInterruptHandler,
};
use crate::caps::{HasPriority, Prioritized};
use crate::policy::{Adjustable, Removable};
use crate::scheduler::IdleAware;

/// Makes the wrapped strategy idle-task aware.
pub struct WithIdle<H>(PhantomData<H>);

fn idle_fallback<S: IdleAware>(sched: &S) -> Option<Arc<S::Task>> {
    trace!("ready queue drained, dispatching the idle task");
    Some(sched.idle_task().clone())
}

fn is_idle<S: IdleAware>(sched: &S, task: &Arc<S::Task>) -> bool {
    Arc::ptr_eq(task, sched.idle_task())
}

impl<S, H> TimerInterruptHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: TimerInterruptHandler<S>,
{
    fn on_timer_interrupt(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        // The queue may have been refilled behind the idle task's back
        // (e.g. by intermediate unblock calls), so check it before
        // resuming idling.
        if is_idle(sched, &current) {
            return sched.next().or(Some(current));
        }
        H::on_timer_interrupt(sched, current).or_else(|| idle_fallback(sched))
    }
}

impl<S, H> TaskCreatedHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: TaskCreatedHandler<S>,
{
    fn on_task_created(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
    ) -> Option<Arc<S::Task>> {
        // The newcomer always beats the idle task, whatever its rank.
        if is_idle(sched, &current) {
            return Some(task);
        }
        H::on_task_created(sched, current, task).or_else(|| idle_fallback(sched))
    }
}

impl<S, H> TaskFinishedHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: TaskFinishedHandler<S>,
{
    fn on_task_finished(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        H::on_task_finished(sched, current).or_else(|| idle_fallback(sched))
    }
}

impl<S, H> TaskYieldedHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: TaskYieldedHandler<S>,
{
    fn on_task_yielded(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        if is_idle(sched, &current) {
            return sched.next().or(Some(current));
        }
        H::on_task_yielded(sched, current).or_else(|| idle_fallback(sched))
    }
}

impl<S, H> TaskBlockedHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: TaskBlockedHandler<S>,
{
    fn on_task_blocked(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        H::on_task_blocked(sched, current).or_else(|| idle_fallback(sched))
    }
}

impl<S, H> TaskPriorityChangedHandler<S> for WithIdle<H>
where
    S: IdleAware + Adjustable,
    S::Task: HasPriority + Prioritized,
    H: TaskPriorityChangedHandler<S>,
{
    fn on_task_priority_changed(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
        old_level: <S::Task as HasPriority>::Level,
    ) -> Option<Arc<S::Task>> {
        if is_idle(sched, &current) {
            sched.adjust_position(&task, old_level);
            return sched.next().or(Some(current));
        }
        H::on_task_priority_changed(sched, current, task, old_level)
            .or_else(|| idle_fallback(sched))
    }
}

impl<S, H> CurrentPriorityChangedHandler<S> for WithIdle<H>
where
    S: IdleAware,
    H: CurrentPriorityChangedHandler<S>,
{
    fn on_current_priority_changed(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        H::on_current_priority_changed(sched, current).or_else(|| idle_fallback(sched))
    }
}

/// Preemptive idle-aware unblock: on the terminating call the interrupted
/// task goes back into the queue (unless it is the idle task) and the
/// policy's pick runs — which may or may not be the task that just woke.
impl<S> TaskUnblockedHandler<S> for WithIdle<unblocked::RunNext>
where
    S: IdleAware,
{
    fn on_task_unblocked(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        let Some(current) = current else {
            return unblocked::RunNext::on_task_unblocked(sched, None, task);
        };
        if let Some(task) = task {
            sched.ready(task);
        }
        if !is_idle(sched, &current) {
            sched.ready(current);
        }
        sched.next().or_else(|| idle_fallback(sched))
    }
}

/// Cooperative idle-aware unblock: the interrupted task keeps the CPU even
/// when the woken task outranks it — only the idle task is displaced.
impl<S> TaskUnblockedHandler<S> for WithIdle<unblocked::KeepCurrent>
where
    S: IdleAware,
{
    fn on_task_unblocked(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        let Some(current) = current else {
            return unblocked::KeepCurrent::on_task_unblocked(sched, None, task);
        };
        if let Some(task) = task {
            sched.ready(task);
        }
        if is_idle(sched, &current) {
            return sched.next().or(Some(current));
        }
        Some(current)
    }
}

/// Idle-aware kill: identical to the plain strategy (the killer keeps the
/// CPU either way); provided so assemblies can wrap every slot uniformly.
impl<S> TaskKilledHandler<S> for WithIdle<killed::KeepCurrent>
where
    S: IdleAware + Removable,
{
    fn on_task_killed(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        killed::KeepCurrent::on_task_killed(sched, current, task)
    }
}
