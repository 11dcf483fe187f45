/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Priority-change strategies, for both the externally retargeted ready
//! task and the running task changing its own level.

use alloc::sync::Arc;

use super::{CurrentPriorityChangedHandler, TaskPriorityChangedHandler};
use crate::caps::{HasPriority, Prioritized};
use crate::policy::{Adjustable, Policy};

/// Re-home the retargeted task inside the queue, then preempt if it now
/// outranks the running task.
pub struct Rebalance;

impl<S> TaskPriorityChangedHandler<S> for Rebalance
where
    S: Adjustable,
    S::Task: HasPriority + Prioritized,
{
    fn on_task_priority_changed(
        sched: &mut S,
        current: Arc<S::Task>,
        task: Arc<S::Task>,
        old_level: <S::Task as HasPriority>::Level,
    ) -> Option<Arc<S::Task>> {
        assert!(
            !Arc::ptr_eq(&task, &current),
            "the running task reports its own priority change separately"
        );
        sched.adjust_position(&task, old_level);
        if task.outranks(&current) {
            sched.ready(current);
            sched.next()
        } else {
            Some(current)
        }
    }
}

/// Requeue the running task so the policy files it under its new level; it
/// comes straight back if it still ranks highest.
pub struct Requeue;

impl<S: Policy> CurrentPriorityChangedHandler<S> for Requeue {
    fn on_current_priority_changed(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        sched.ready(current);
        sched.next()
    }
}
