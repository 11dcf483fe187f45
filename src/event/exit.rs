/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Task-termination strategies.

use alloc::sync::Arc;

use super::TaskFinishedHandler;
use crate::policy::Policy;

/// Dispatch whatever the policy ranks first; the finished task is gone and
/// is never requeued.
pub struct RunNext;

impl<S: Policy> TaskFinishedHandler<S> for RunNext {
    fn on_task_finished(sched: &mut S, _current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        sched.next()
    }
}
