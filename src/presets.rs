/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! The classic schedulers, assembled as thin type aliases.
//!
//! Nothing here adds behavior: each alias just picks a policy and fills the
//! event slots of [`Scheduler`]. They double as worked examples for rolling
//! a custom assembly.

use crate::event::idle::WithIdle;
use crate::event::{blocked, exit, quantum, spawn, timer, unblocked, yielded};
use crate::policy::{
    DynMultiQueue, FifoFactory, FifoQueue, PrioritizedQueue, QuantumAllocator, WithEnqueueHook,
};
use crate::Scheduler;

/// First come, first served, run to completion.
///
/// Cooperative: the timer never preempts; a task leaves the CPU only by
/// yielding, blocking, or finishing. Requires only
/// [`Schedulable`](crate::caps::Schedulable) of the task type.
pub type Fifo<T> = Scheduler<
    FifoQueue<T>,
    timer::KeepCurrent,
    WithIdle<spawn::KeepCurrent>,
    WithIdle<exit::RunNext>,
    yielded::RunNext,
    WithIdle<blocked::RunNext>,
    WithIdle<unblocked::KeepCurrent>,
>;

/// FIFO plus a preemptive timer tick: every interrupt rotates the queue.
pub type RoundRobin<T> = Scheduler<
    FifoQueue<T>,
    WithIdle<timer::RunNext>,
    WithIdle<spawn::KeepCurrent>,
    WithIdle<exit::RunNext>,
    yielded::RunNext,
    WithIdle<blocked::RunNext>,
    WithIdle<unblocked::KeepCurrent>,
>;

/// Fixed-priority preemptive scheduling, round-robin within each level.
///
/// One FIFO sub-queue per priority level, materialized on first use. A
/// newly created or woken task preempts a lower-priority incumbent.
/// Requires [`HasPriority`](crate::caps::HasPriority).
pub type PrioritizedRoundRobin<T> = Scheduler<
    DynMultiQueue<T, FifoFactory>,
    WithIdle<timer::RunNext>,
    WithIdle<spawn::RunHigherPriority>,
    WithIdle<exit::RunNext>,
    yielded::RunNext,
    WithIdle<blocked::RunNext>,
    WithIdle<unblocked::RunNext>,
>;

/// Multilevel feedback queue.
///
/// A running task keeps the CPU until the quantum for its level drains,
/// then is demoted one level and requeued; the enqueue hook hands every
/// (re)queued task the allotment for its current level, sized by the
/// injected [`QuantumSpec`](crate::caps::QuantumSpec) `Q`. Requires
/// [`PriorityLadder`](crate::caps::PriorityLadder) and
/// [`Quantized`](crate::caps::Quantized).
pub type MultilevelFeedbackQueue<T, Q> = Scheduler<
    WithEnqueueHook<DynMultiQueue<T, FifoFactory>, QuantumAllocator<Q>>,
    WithIdle<timer::TickQuantum>,
    WithIdle<spawn::RunHigherPriority>,
    WithIdle<exit::RunNext>,
    yielded::RunNext,
    WithIdle<blocked::RunNext>,
    WithIdle<unblocked::RunNext>,
    (),
    (),
    (),
    quantum::Demote,
>;

/// Earliest deadline first.
///
/// A single queue ordered by the tasks' intrinsic rank (earlier deadline
/// outranks later; equal deadlines stay in arrival order). Arrivals
/// preempt, the timer does not. Requires
/// [`Prioritized`](crate::caps::Prioritized) of the task type.
pub type EarliestDeadlineFirst<T> = Scheduler<
    PrioritizedQueue<T>,
    timer::KeepCurrent,
    WithIdle<spawn::RunHigherPriority>,
    WithIdle<exit::RunNext>,
>;
