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
use crate::caps::Schedulable;
use crate::list::{List, Listed};

/// A first-come-first-served ready queue backed by an owned deque.
///
/// `ready()` appends to the tail, `next()` pops the head. This is the
/// default FIFO policy; use [`IntrusiveFifo`] to avoid per-queue storage
/// when the task type can carry intrusive links.
pub struct FifoQueue<T> {
    queue: VecDeque<Arc<T>>,
}

impl<T> FifoQueue<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Schedulable> Policy for FifoQueue<T> {
    type Task = T;

    fn next(&mut self) -> Option<Arc<T>> {
        self.queue.pop_front()
    }

    fn ready(&mut self, task: Arc<T>) {
        debug_assert!(
            !self.queue.iter().any(|queued| Arc::ptr_eq(queued, &task)),
            "task is already in the ready queue"
        );
        self.queue.push_back(task);
    }
}

impl<T: Schedulable> Removable for FifoQueue<T> {
    fn remove(&mut self, task: &Arc<T>) -> Option<Arc<T>> {
        let index = self.queue.iter().position(|queued| Arc::ptr_eq(queued, task))?;
        self.queue.remove(index)
    }
}

/// A first-come-first-served ready queue that links the tasks themselves.
///
/// Tasks go in wrapped as [`Listed`] so the link storage rides along with
/// them; enqueueing and dequeueing allocate nothing.
pub struct IntrusiveFifo<T> {
    queue: List<Listed<T>>,
}

impl<T> IntrusiveFifo<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self { queue: List::new() }
    }
}

impl<T> Default for IntrusiveFifo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Schedulable> Policy for IntrusiveFifo<T> {
    type Task = Listed<T>;

    fn next(&mut self) -> Option<Arc<Listed<T>>> {
        self.queue.pop_front()
    }

    fn ready(&mut self, task: Arc<Listed<T>>) {
        self.queue.push_back(task);
    }
}

impl<T: Schedulable> Removable for IntrusiveFifo<T> {
    fn remove(&mut self, task: &Arc<Listed<T>>) -> Option<Arc<Listed<T>>> {
        // A task is queued in at most one ready queue, so a linked task seen
        // here is linked into this list.
        unsafe { self.queue.remove(task) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Job(u32);
    impl Schedulable for Job {}

    #[test]
    fn dequeues_in_arrival_order() {
        let mut queue = FifoQueue::new();
        assert!(queue.next().is_none());

        let jobs: [Arc<Job>; 3] = [Arc::new(Job(1)), Arc::new(Job(2)), Arc::new(Job(3))];
        for job in &jobs {
            queue.ready(job.clone());
        }
        for job in &jobs {
            assert!(Arc::ptr_eq(&queue.next().unwrap(), job));
        }
        assert!(queue.next().is_none());
    }

    #[test]
    fn removes_a_specific_task() {
        let mut queue = FifoQueue::new();
        let a = Arc::new(Job(1));
        let b = Arc::new(Job(2));
        queue.ready(a.clone());
        queue.ready(b.clone());

        assert!(queue.remove(&a).is_some());
        assert!(queue.remove(&a).is_none());
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &b));
    }

    #[test]
    fn intrusive_queue_behaves_like_the_owned_one() {
        let mut queue = IntrusiveFifo::new();
        let a = Arc::new(Listed::new(Job(1)));
        let b = Arc::new(Listed::new(Job(2)));
        queue.ready(a.clone());
        queue.ready(b.clone());

        assert!(Arc::ptr_eq(&queue.next().unwrap(), &a));
        assert!(queue.remove(&b).is_some());
        assert!(queue.next().is_none());
    }
}
