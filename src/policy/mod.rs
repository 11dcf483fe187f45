/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Ready-queue policies.
//!
//! A policy decides how ready tasks are stored and which one runs next. The
//! whole interface is two primitives: [`Policy::ready`] inserts a task,
//! [`Policy::next`] removes and returns the highest-ranked one. Two optional
//! capabilities ([`Removable`], [`Adjustable`]) are declared separately so
//! that only the event strategies that need them demand them.
//!
//! Invariants every policy upholds:
//!
//! - a task is queued at most once, and the running task is never queued;
//! - ranking is a total preorder; peers dequeue in insertion order
//!   (first come, first served);
//! - `next()` on an empty queue returns `None` and has no other effect.

use alloc::sync::Arc;

use crate::caps::{HasPriority, Schedulable};

mod fifo;
mod hooks;
mod multilevel;
mod prioritized;

pub use fifo::{FifoQueue, IntrusiveFifo};
pub use hooks::{QuantumAllocator, QueueHook, WithDequeueHook, WithEnqueueHook};
pub use multilevel::{DynMultiQueue, FifoFactory, LevelQueue, LevelQueueFactory, MultiQueue};
pub use prioritized::PrioritizedQueue;

/// The scheduling primitives every ready-queue policy provides.
pub trait Policy {
    /// The task type held by the queue.
    type Task: Schedulable;

    /// Removes and returns the highest-ranked ready task, or `None` if no
    /// task is ready.
    fn next(&mut self) -> Option<Arc<Self::Task>>;

    /// Inserts a ready task. The task must not already be queued.
    fn ready(&mut self, task: Arc<Self::Task>);
}

/// A policy that can detach a specific task from its queue.
pub trait Removable: Policy {
    /// Removes `task` from the queue, returning the queue's reference to it,
    /// or `None` if it was not queued.
    fn remove(&mut self, task: &Arc<Self::Task>) -> Option<Arc<Self::Task>>;
}

/// A policy that can re-home a task whose priority changed while queued.
pub trait Adjustable: Policy
where
    Self::Task: HasPriority,
{
    /// Moves `task` from the sub-queue for `old_level` to the one matching
    /// its current priority. The task must be queued at `old_level`.
    fn adjust_position(&mut self, task: &Arc<Self::Task>, old_level: <Self::Task as HasPriority>::Level);
}
