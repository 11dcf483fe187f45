/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Task-creation strategies.

use alloc::sync::Arc;

use super::TaskCreatedHandler;
use crate::caps::Prioritized;
use crate::policy::Policy;

/// Cooperative: queue the newcomer, the current task keeps the CPU.
pub struct KeepCurrent;

impl<S: Policy> TaskCreatedHandler<S> for KeepCurrent {
    fn on_task_created(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
    ) -> Option<Arc<S::Task>> {
        sched.ready(task);
        Some(current)
    }
}

/// Preemptive: the higher-ranked of the two gets the CPU, the other is
/// queued. A tie goes to the incumbent.
pub struct RunHigherPriority;

impl<S> TaskCreatedHandler<S> for RunHigherPriority
where
    S: Policy,
    S::Task: Prioritized,
{
    fn on_task_created(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
    ) -> Option<Arc<S::Task>> {
        if task.outranks(&current) {
            sched.ready(current);
            Some(task)
        } else {
            sched.ready(task);
            Some(current)
        }
    }
}
