/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Quantum-exhaustion strategies, reached from
//! [`timer::TickQuantum`](super::timer::TickQuantum) when the running
//! task's allotment hits zero.

use alloc::sync::Arc;
use core::marker::PhantomData;

use super::QuantumUsedUpHandler;
use crate::caps::{HasPriority, PriorityLadder, QuantumSpec, Quantized};
use crate::policy::Policy;

/// Drop the task one priority level and requeue it.
///
/// Does not touch the allotment itself: pair the policy with a
/// [`QuantumAllocator`](crate::policy::QuantumAllocator) enqueue hook so the
/// requeue hands out the allotment for the *new* level. This split is what
/// makes the multilevel feedback queue fall out of the composition.
pub struct Demote;

impl<S> QuantumUsedUpHandler<S> for Demote
where
    S: Policy,
    S::Task: PriorityLadder,
{
    fn on_quantum_used_up(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        debug!("quantum spent: demoting and requeueing the current task");
        current.demote();
        sched.ready(current);
        sched.next()
    }
}

/// Refill the task's allotment for its (unchanged) level and requeue it.
/// Over a multi-queue policy this gives per-level round-robin with
/// level-specific time slices.
pub struct Recharge<Q>(PhantomData<Q>);

impl<S, Q> QuantumUsedUpHandler<S> for Recharge<Q>
where
    S: Policy,
    S::Task: HasPriority + Quantized,
    Q: QuantumSpec<S::Task>,
{
    fn on_quantum_used_up(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        current.allocate_ticks(Q::quantum(current.priority()));
        sched.ready(current);
        sched.next()
    }
}

/// Demote first, then refill for the new, lower level, then requeue. The
/// self-contained alternative to [`Demote`] for assemblies whose policy
/// carries no allocation hook.
pub struct DemoteRecharge<Q>(PhantomData<Q>);

impl<S, Q> QuantumUsedUpHandler<S> for DemoteRecharge<Q>
where
    S: Policy,
    S::Task: PriorityLadder + Quantized,
    Q: QuantumSpec<S::Task>,
{
    fn on_quantum_used_up(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        current.demote();
        current.allocate_ticks(Q::quantum(current.priority()));
        sched.ready(current);
        sched.next()
    }
}
