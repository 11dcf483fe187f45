/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

use alloc::collections::VecDeque;
use alloc::sync::Arc;

use super::{Policy, Removable};
use crate::caps::Prioritized;

/// A single ready queue kept sorted by task rank, highest first.
///
/// Insertion is stable: a task is placed before the first queued task it
/// strictly outranks, so peers stay in arrival order. This is the natural
/// policy for intrinsically ordered tasks (earliest deadline first), and it
/// works just as well for tasks ranked by a numeric priority.
pub struct PrioritizedQueue<T> {
    queue: VecDeque<Arc<T>>,
}

impl<T> PrioritizedQueue<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T> Default for PrioritizedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prioritized> Policy for PrioritizedQueue<T> {
    type Task = T;

    fn next(&mut self) -> Option<Arc<T>> {
        self.queue.pop_front()
    }

    fn ready(&mut self, task: Arc<T>) {
        debug_assert!(
            !self.queue.iter().any(|queued| Arc::ptr_eq(queued, &task)),
            "task is already in the ready queue"
        );
        let index = self
            .queue
            .iter()
            .position(|queued| task.outranks(queued))
            .unwrap_or(self.queue.len());
        self.queue.insert(index, task);
    }
}

impl<T: Prioritized> Removable for PrioritizedQueue<T> {
    fn remove(&mut self, task: &Arc<T>) -> Option<Arc<T>> {
        let index = self.queue.iter().position(|queued| Arc::ptr_eq(queued, task))?;
        self.queue.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Schedulable;

    struct Deadline(u32);
    impl Schedulable for Deadline {}
    impl Prioritized for Deadline {
        fn outranks(&self, other: &Self) -> bool {
            self.0 < other.0
        }
    }

    #[test]
    fn dequeues_highest_rank_first() {
        let mut queue = PrioritizedQueue::new();
        let late = Arc::new(Deadline(8));
        let soon = Arc::new(Deadline(4));
        let mid = Arc::new(Deadline(6));
        queue.ready(late.clone());
        queue.ready(soon.clone());
        queue.ready(mid.clone());

        assert!(Arc::ptr_eq(&queue.next().unwrap(), &soon));
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &mid));
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &late));
    }

    #[test]
    fn peers_keep_arrival_order() {
        let mut queue = PrioritizedQueue::new();
        let first = Arc::new(Deadline(4));
        let second = Arc::new(Deadline(4));
        let third = Arc::new(Deadline(4));
        queue.ready(first.clone());
        queue.ready(second.clone());
        queue.ready(third.clone());

        assert!(Arc::ptr_eq(&queue.next().unwrap(), &first));
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &second));
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &third));
    }
}
