/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Voluntary-yield strategies.

use alloc::sync::Arc;

use super::TaskYieldedHandler;
use crate::policy::Policy;

/// Requeue the yielder and dispatch the policy's pick. If the yielder is
/// the only ready task it comes straight back.
pub struct RunNext;

impl<S: Policy> TaskYieldedHandler<S> for RunNext {
    fn on_task_yielded(sched: &mut S, current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        sched.ready(current);
        sched.next()
    }
}
