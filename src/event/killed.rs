/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Task-killed strategies. Supports the intermediate/terminating
//! group-operation protocol described in the [event docs](super).

use alloc::sync::Arc;

use super::TaskKilledHandler;
use crate::policy::Removable;

/// Pull the victim out of the ready queue; the killer keeps the CPU.
///
/// Pre-conditions (kernel bugs if violated, both abort): the victim is not
/// the running task, and it is actually queued.
pub struct KeepCurrent;

impl<S: Removable> TaskKilledHandler<S> for KeepCurrent {
    fn on_task_killed(
        sched: &mut S,
        current: Option<Arc<S::Task>>,
        task: Option<Arc<S::Task>>,
    ) -> Option<Arc<S::Task>> {
        if let (Some(current), Some(task)) = (&current, &task) {
            assert!(
                !Arc::ptr_eq(current, task),
                "the running task cannot be killed through the ready queue"
            );
        }
        let Some(current) = current else {
            let task = task.expect("intermediate kill call without a task");
            let removed = sched.remove(&task);
            assert!(removed.is_some(), "killed task was not in the ready queue");
            return None;
        };
        if let Some(task) = task {
            let removed = sched.remove(&task);
            assert!(removed.is_some(), "killed task was not in the ready queue");
        }
        Some(current)
    }
}
