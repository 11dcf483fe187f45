/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Timer-interrupt strategies.

use alloc::sync::Arc;

use super::TimerInterruptHandler;
use crate::caps::Quantized;
use crate::policy::Policy;
use crate::scheduler::QuantumDelegate;

/// Cooperative: the tick changes nothing, the current task keeps the CPU.
///
/// The right choice when preemption is forbidden (plain FIFO) or when the
/// ordering is already settled elsewhere (EDF, where only arrivals and
/// completions move the needle).
pub struct KeepCurrent;

impl<S: Policy> TimerInterruptHandler<S> for KeepCurrent {
    fn on_timer_interrupt(_sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        Some(current)
    }
}

/// Preemptive: requeue the current task and dispatch whatever the policy
/// ranks first. Over a FIFO policy this is exactly round-robin.
pub struct RunNext;

impl<S: Policy> TimerInterruptHandler<S> for RunNext {
    fn on_timer_interrupt(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        sched.ready(current);
        sched.next()
    }
}

/// Quantum bookkeeping: charge one tick against the current task and keep
/// it running until its allotment is spent, then hand the decision to the
/// scheduler's composed quantum-used-up strategy.
///
/// This is the core of the multilevel feedback queue: pair it with
/// [`quantum::Demote`](super::quantum::Demote) and an enqueue hook that
/// sizes the fresh allotment from the post-demotion level.
pub struct TickQuantum;

impl<S> TimerInterruptHandler<S> for TickQuantum
where
    S: Policy + QuantumDelegate,
    S::Task: Quantized,
{
    fn on_timer_interrupt(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        current.tick();
        if current.exhausted() {
            return sched.quantum_used_up(current);
        }
        Some(current)
    }
}
