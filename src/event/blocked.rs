/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Task-blocked strategies.

use alloc::sync::Arc;

use super::TaskBlockedHandler;
use crate::policy::Policy;

/// Dispatch the policy's pick. The blocked task belongs to a wait object
/// now and comes back through the unblock path.
pub struct RunNext;

impl<S: Policy> TaskBlockedHandler<S> for RunNext {
    fn on_task_blocked(sched: &mut S, _current: Arc<S::Task>) -> Option<Arc<S::Task>> {
        sched.next()
    }
}
