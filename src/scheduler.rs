/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! The assembler: one policy plus any subset of event strategies.

use alloc::sync::Arc;
use core::marker::PhantomData;

use crate::caps::HasPriority;
use crate::event::{
    CurrentPriorityChangedHandler, QuantumUsedUpHandler, TaskBlockedHandler, TaskCreatedHandler,
    TaskFinishedHandler, TaskKilledHandler, TaskPriorityChangedHandler, TaskUnblockedHandler,
    TaskYieldedHandler, TimerInterruptHandler,
};
use crate::policy::{Adjustable, Policy, Removable};

/// A scheduler with an idle task to fall back on.
///
/// Implemented by every assembled [`Scheduler`]; idle-aware strategies
/// (anything wrapped in [`WithIdle`](crate::event::idle::WithIdle)) reach
/// the idle task through this trait.
pub trait IdleAware: Policy {
    /// The always-runnable task representing "nothing to do". Never kept in
    /// the ready queue by idle-aware strategies.
    fn idle_task(&self) -> &Arc<Self::Task>;
}

/// A scheduler with a composed quantum-used-up strategy.
///
/// Quantum-aware timer strategies delegate here once the running task's
/// allotment is spent, without naming the concrete strategy.
pub trait QuantumDelegate: Policy {
    /// Decides what runs now that `current` has no ticks left.
    fn quantum_used_up(&mut self, current: Arc<Self::Task>) -> Option<Arc<Self::Task>>;
}

/// A scheduler assembled from a ready-queue policy and per-event strategy
/// slots.
///
/// Type parameters, in order: the policy `P`, then one slot per event —
/// timer interrupt `Ti`, task created `Cr`, finished `Ex`, yielded `Yl`,
/// blocked `Bk`, unblocked `Ub`, killed `Kl`, priority changed `Pc`,
/// current task's own priority changed `Sc`, quantum used up `Qd`. A slot
/// left at the default `()` composes no strategy, and the matching entry
/// point does not exist on the assembled type. The entry points are plain
/// methods; each one is available exactly when its slot type implements the
/// corresponding handler trait against this scheduler.
///
/// The scheduler itself implements [`Policy`] (and forwards [`Removable`] /
/// [`Adjustable`] when the policy has them), which is how the strategies
/// drive it. `ready`/`next` double as the kernel-facing utility surface for
/// initial admission and bootstrap.
pub struct Scheduler<P, Ti = (), Cr = (), Ex = (), Yl = (), Bk = (), Ub = (), Kl = (), Pc = (), Sc = (), Qd = ()>
where
    P: Policy,
{
    policy: P,
    idle: Arc<P::Task>,
    _slots: PhantomData<(Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd)>,
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
{
    /// Assembles a scheduler from a policy and the idle task.
    ///
    /// The idle task must stay alive for the scheduler's whole lifetime and
    /// must always be runnable. Strategies that are not idle-aware simply
    /// never look at it.
    pub fn new(policy: P, idle_task: Arc<P::Task>) -> Self {
        Self {
            policy,
            idle: idle_task,
            _slots: PhantomData,
        }
    }

    /// Admits a task into the ready queue (initial admission path).
    pub fn ready(&mut self, task: Arc<P::Task>) {
        self.policy.ready(task);
    }

    /// Dequeues the highest-ranked ready task (bootstrap path).
    pub fn next(&mut self) -> Option<Arc<P::Task>> {
        self.policy.next()
    }

    /// The idle task this scheduler was assembled with.
    pub fn idle_task(&self) -> &Arc<P::Task> {
        &self.idle
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Policy
    for Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
{
    type Task = P::Task;

    fn next(&mut self) -> Option<Arc<P::Task>> {
        self.policy.next()
    }

    fn ready(&mut self, task: Arc<P::Task>) {
        self.policy.ready(task);
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Removable
    for Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Removable,
{
    fn remove(&mut self, task: &Arc<P::Task>) -> Option<Arc<P::Task>> {
        self.policy.remove(task)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Adjustable
    for Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Adjustable,
    P::Task: HasPriority,
{
    fn adjust_position(&mut self, task: &Arc<P::Task>, old_level: <P::Task as HasPriority>::Level) {
        self.policy.adjust_position(task, old_level);
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> IdleAware
    for Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
{
    fn idle_task(&self) -> &Arc<P::Task> {
        &self.idle
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> QuantumDelegate
    for Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Qd: QuantumUsedUpHandler<Self>,
{
    fn quantum_used_up(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Qd::on_quantum_used_up(self, current)
    }
}

// Event entry points. Each lives in its own impl block so that it exists
// exactly when the matching slot is filled with a capable strategy.

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Ti: TimerInterruptHandler<Self>,
{
    /// A timer interrupt fired while `current` was running. Returns the
    /// task to switch to (possibly `current` itself).
    pub fn on_timer_interrupt(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Ti::on_timer_interrupt(self, current)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Cr: TaskCreatedHandler<Self>,
{
    /// A new task entered the system while `current` was running.
    pub fn on_task_created(
        &mut self,
        current: Arc<P::Task>,
        task: Arc<P::Task>,
    ) -> Option<Arc<P::Task>> {
        Cr::on_task_created(self, current, task)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Ex: TaskFinishedHandler<Self>,
{
    /// `current` finished; the kernel destroys it after this call returns.
    pub fn on_task_finished(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Ex::on_task_finished(self, current)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Yl: TaskYieldedHandler<Self>,
{
    /// `current` voluntarily gave up the CPU but remains runnable.
    pub fn on_task_yielded(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Yl::on_task_yielded(self, current)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Bk: TaskBlockedHandler<Self>,
{
    /// `current` blocked on a wait object owned by the kernel.
    pub fn on_task_blocked(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Bk::on_task_blocked(self, current)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Ub: TaskUnblockedHandler<Self>,
{
    /// A task became runnable again. Pass `current: None` for an
    /// intermediate call that only enqueues `task`; a call with `current`
    /// present terminates the group and returns the dispatch decision.
    pub fn on_task_unblocked(
        &mut self,
        current: Option<Arc<P::Task>>,
        task: Option<Arc<P::Task>>,
    ) -> Option<Arc<P::Task>> {
        Ub::on_task_unblocked(self, current, task)
    }

    /// Batch form of the unblock protocol: enqueues every task in `tasks`
    /// as intermediate calls, then terminates the group on behalf of
    /// `current` and returns the dispatch decision.
    pub fn on_tasks_unblocked<I>(&mut self, current: Arc<P::Task>, tasks: I) -> Option<Arc<P::Task>>
    where
        I: IntoIterator<Item = Arc<P::Task>>,
    {
        for task in tasks {
            Ub::on_task_unblocked(self, None, Some(task));
        }
        Ub::on_task_unblocked(self, Some(current), None)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Kl: TaskKilledHandler<Self>,
{
    /// A ready task (never `current`) was killed. Follows the same
    /// intermediate/terminating protocol as [`Self::on_task_unblocked`].
    pub fn on_task_killed(
        &mut self,
        current: Option<Arc<P::Task>>,
        task: Option<Arc<P::Task>>,
    ) -> Option<Arc<P::Task>> {
        Kl::on_task_killed(self, current, task)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    P::Task: HasPriority,
    Pc: TaskPriorityChangedHandler<Self>,
{
    /// A ready task's priority was changed (the new level is already on the
    /// task); `old_level` says where the queue last filed it.
    pub fn on_task_priority_changed(
        &mut self,
        current: Arc<P::Task>,
        task: Arc<P::Task>,
        old_level: <P::Task as HasPriority>::Level,
    ) -> Option<Arc<P::Task>> {
        Pc::on_task_priority_changed(self, current, task, old_level)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Sc: CurrentPriorityChangedHandler<Self>,
{
    /// The running task changed its own priority.
    pub fn on_current_priority_changed(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Sc::on_current_priority_changed(self, current)
    }
}

impl<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd> Scheduler<P, Ti, Cr, Ex, Yl, Bk, Ub, Kl, Pc, Sc, Qd>
where
    P: Policy,
    Qd: QuantumUsedUpHandler<Self>,
{
    /// The running task's tick allotment hit zero. Usually reached through
    /// a quantum-aware timer strategy, but the kernel may call it directly
    /// if it accounts ticks itself.
    pub fn on_task_quantum_used_up(&mut self, current: Arc<P::Task>) -> Option<Arc<P::Task>> {
        Qd::on_quantum_used_up(self, current)
    }
}
