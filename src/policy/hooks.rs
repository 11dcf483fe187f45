/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Policy extension wrappers.
//!
//! A wrapper interposes a [`QueueHook`] around one queue primitive of an
//! inner policy: [`WithEnqueueHook`] runs the hook just before `ready()`
//! inserts a task, [`WithDequeueHook`] just after `next()` removes one.
//! Hooks compose in declaration order, either as tuples or by nesting
//! wrappers. The optional policy capabilities pass straight through to the
//! inner queue; in particular `adjust_position` re-homes a task without
//! re-running the enqueue hook.

use alloc::sync::Arc;
use core::marker::PhantomData;

use super::{Adjustable, Policy, Removable};
use crate::caps::{HasPriority, QuantumSpec, Quantized, Schedulable};

/// A stateless piece of code run against a task crossing a queue boundary.
pub trait QueueHook<T: Schedulable> {
    /// Runs the hook against `task`.
    fn run(task: &Arc<T>);
}

impl<T: Schedulable> QueueHook<T> for () {
    fn run(_task: &Arc<T>) {}
}

impl<T: Schedulable, A: QueueHook<T>> QueueHook<T> for (A,) {
    fn run(task: &Arc<T>) {
        A::run(task);
    }
}

impl<T: Schedulable, A: QueueHook<T>, B: QueueHook<T>> QueueHook<T> for (A, B) {
    fn run(task: &Arc<T>) {
        A::run(task);
        B::run(task);
    }
}

impl<T: Schedulable, A: QueueHook<T>, B: QueueHook<T>, C: QueueHook<T>> QueueHook<T> for (A, B, C) {
    fn run(task: &Arc<T>) {
        A::run(task);
        B::run(task);
        C::run(task);
    }
}

/// Runs a hook on every task just before it is enqueued.
pub struct WithEnqueueHook<Q, H> {
    inner: Q,
    _hook: PhantomData<H>,
}

impl<Q, H> WithEnqueueHook<Q, H> {
    /// Wraps `inner`.
    pub const fn new(inner: Q) -> Self {
        Self {
            inner,
            _hook: PhantomData,
        }
    }
}

impl<Q: Default, H> Default for WithEnqueueHook<Q, H> {
    fn default() -> Self {
        Self::new(Q::default())
    }
}

impl<Q: Policy, H: QueueHook<Q::Task>> Policy for WithEnqueueHook<Q, H> {
    type Task = Q::Task;

    fn next(&mut self) -> Option<Arc<Q::Task>> {
        self.inner.next()
    }

    fn ready(&mut self, task: Arc<Q::Task>) {
        H::run(&task);
        self.inner.ready(task);
    }
}

impl<Q: Removable, H: QueueHook<Q::Task>> Removable for WithEnqueueHook<Q, H> {
    fn remove(&mut self, task: &Arc<Q::Task>) -> Option<Arc<Q::Task>> {
        self.inner.remove(task)
    }
}

impl<Q: Adjustable, H: QueueHook<Q::Task>> Adjustable for WithEnqueueHook<Q, H>
where
    Q::Task: HasPriority,
{
    fn adjust_position(&mut self, task: &Arc<Q::Task>, old_level: <Q::Task as HasPriority>::Level) {
        self.inner.adjust_position(task, old_level);
    }
}

/// Runs a hook on every task just after it is dequeued.
pub struct WithDequeueHook<Q, H> {
    inner: Q,
    _hook: PhantomData<H>,
}

impl<Q, H> WithDequeueHook<Q, H> {
    /// Wraps `inner`.
    pub const fn new(inner: Q) -> Self {
        Self {
            inner,
            _hook: PhantomData,
        }
    }
}

impl<Q: Default, H> Default for WithDequeueHook<Q, H> {
    fn default() -> Self {
        Self::new(Q::default())
    }
}

impl<Q: Policy, H: QueueHook<Q::Task>> Policy for WithDequeueHook<Q, H> {
    type Task = Q::Task;

    fn next(&mut self) -> Option<Arc<Q::Task>> {
        let task = self.inner.next();
        if let Some(task) = &task {
            H::run(task);
        }
        task
    }

    fn ready(&mut self, task: Arc<Q::Task>) {
        self.inner.ready(task);
    }
}

impl<Q: Removable, H: QueueHook<Q::Task>> Removable for WithDequeueHook<Q, H> {
    fn remove(&mut self, task: &Arc<Q::Task>) -> Option<Arc<Q::Task>> {
        self.inner.remove(task)
    }
}

impl<Q: Adjustable, H: QueueHook<Q::Task>> Adjustable for WithDequeueHook<Q, H>
where
    Q::Task: HasPriority,
{
    fn adjust_position(&mut self, task: &Arc<Q::Task>, old_level: <Q::Task as HasPriority>::Level) {
        self.inner.adjust_position(task, old_level);
    }
}

/// The canonical enqueue hook: gives every task entering the queue a fresh
/// quantum sized for its current priority level.
///
/// Combined with a demoting quantum strategy this yields the multilevel
/// feedback queue: the demotion picks the new level, and the allotment for
/// that level is applied here when the task is requeued.
pub struct QuantumAllocator<S>(PhantomData<S>);

impl<T, S> QueueHook<T> for QuantumAllocator<S>
where
    T: Schedulable + HasPriority + Quantized,
    S: QuantumSpec<T>,
{
    fn run(task: &Arc<T>) {
        task.allocate_ticks(S::quantum(task.priority()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FifoQueue;
    use core::sync::atomic::{AtomicU32, Ordering};

    struct Job {
        level: u32,
        ticks: AtomicU32,
    }

    impl Schedulable for Job {}
    impl HasPriority for Job {
        type Level = u32;
        fn priority(&self) -> u32 {
            self.level
        }
    }
    impl Quantized for Job {
        type Ticks = u32;
        fn tick(&self) {
            self.ticks.fetch_sub(1, Ordering::Relaxed);
        }
        fn exhausted(&self) -> bool {
            self.ticks.load(Ordering::Relaxed) == 0
        }
        fn allocate_ticks(&self, ticks: u32) {
            self.ticks.store(ticks, Ordering::Relaxed);
        }
    }

    struct DoubleLevel;
    impl QuantumSpec<Job> for DoubleLevel {
        fn quantum(level: u32) -> u32 {
            level * 2
        }
    }

    #[test]
    fn enqueue_hook_allocates_the_quantum() {
        let mut queue: WithEnqueueHook<FifoQueue<Job>, QuantumAllocator<DoubleLevel>> =
            WithEnqueueHook::new(FifoQueue::new());
        let job = Arc::new(Job {
            level: 3,
            ticks: AtomicU32::new(0),
        });
        assert!(job.exhausted());

        queue.ready(job.clone());
        assert_eq!(job.ticks.load(Ordering::Relaxed), 6);
        assert!(Arc::ptr_eq(&queue.next().unwrap(), &job));
    }

    #[test]
    fn dequeue_hook_sees_the_departing_task() {
        let mut queue: WithDequeueHook<FifoQueue<Job>, QuantumAllocator<DoubleLevel>> =
            WithDequeueHook::new(FifoQueue::new());
        let job = Arc::new(Job {
            level: 2,
            ticks: AtomicU32::new(0),
        });
        queue.ready(job.clone());
        assert!(job.exhausted());

        let out = queue.next().unwrap();
        assert!(Arc::ptr_eq(&out, &job));
        assert_eq!(job.ticks.load(Ordering::Relaxed), 4);
    }
}
