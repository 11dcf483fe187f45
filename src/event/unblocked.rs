/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Task-unblocked strategies. Both support the intermediate/terminating
//! group-operation protocol described in the [event docs](super).

use alloc::sync::Arc;

use super::TaskUnblockedHandler;
use crate::policy::Policy;

/// Cooperative: queue the woken task, the current task keeps the CPU even
/// if the newcomer outranks it. Preemption waits for an explicit yield,
/// block, or finish.
pub struct KeepCurrent;

impl<S: Policy> TaskUnblockedHandler<S> for KeepCurrent {
    fn on_task_unblocked(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        let Some(current) = current else {
            let task = task.expect("intermediate unblock call without a task");
            sched.ready(task);
            return None;
        };
        if let Some(task) = task {
            sched.ready(task);
        }
        Some(current)
    }
}

/// Preemptive: queue the woken task and dispatch the policy's pick.
///
/// The terminating call does *not* requeue `current`: with a prioritized
/// policy the queue must already contain every runnable task at that point,
/// so the caller is obliged to have enqueued `current` beforehand if it is
/// still runnable. The idle-aware form,
/// [`WithIdle<RunNext>`](super::idle::WithIdle), requeues `current` itself.
pub struct RunNext;

impl<S: Policy> TaskUnblockedHandler<S> for RunNext {
    fn on_task_unblocked(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        let Some(_current) = current else {
            let task = task.expect("intermediate unblock call without a task");
            sched.ready(task);
            return None;
        };
        if let Some(task) = task {
            sched.ready(task);
        }
        sched.next()
    }
}
