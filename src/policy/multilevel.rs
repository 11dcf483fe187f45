/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Per-priority-level multi-queues.
//!
//! One sub-queue per priority level, served strictly highest-level-first;
//! within a level the sub-queue's own order applies. Sub-queues are
//! materialized lazily the first time a level is seen and stay allocated
//! (empty ones contribute nothing to `next()`).
//!
//! [`MultiQueue`] keeps every level in the same sub-queue type.
//! [`DynMultiQueue`] asks a [`LevelQueueFactory`] for each new level, so
//! different levels can use different queue disciplines behind the
//! object-safe [`LevelQueue`] interface.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::marker::PhantomData;

use super::{Adjustable, Policy, Removable};
use crate::caps::{HasPriority, Schedulable};

/// The object-safe face of a per-level sub-queue.
///
/// Implemented for free by every policy that supports removal, so any such
/// policy can be boxed into a [`DynMultiQueue`] level.
pub trait LevelQueue<T: Schedulable> {
    /// See [`Policy::next`].
    fn next(&mut self) -> Option<Arc<T>>;

    /// See [`Policy::ready`].
    fn ready(&mut self, task: Arc<T>);

    /// See [`Removable::remove`].
    fn remove(&mut self, task: &Arc<T>) -> Option<Arc<T>>;
}

impl<Q: Removable> LevelQueue<Q::Task> for Q {
    fn next(&mut self) -> Option<Arc<Q::Task>> {
        Policy::next(self)
    }

    fn ready(&mut self, task: Arc<Q::Task>) {
        Policy::ready(self, task)
    }

    fn remove(&mut self, task: &Arc<Q::Task>) -> Option<Arc<Q::Task>> {
        Removable::remove(self, task)
    }
}

/// Maps a priority level to a freshly built sub-queue.
pub trait LevelQueueFactory<T: Schedulable + HasPriority> {
    /// Builds the sub-queue for `level`.
    fn make(level: T::Level) -> Box<dyn LevelQueue<T>>;
}

/// The factory behind the classic prioritized round-robin: every priority
/// level gets its own FIFO sub-queue.
pub struct FifoFactory;

impl<T: Schedulable + HasPriority + 'static> LevelQueueFactory<T> for FifoFactory {
    fn make(_level: T::Level) -> Box<dyn LevelQueue<T>> {
        Box::new(super::FifoQueue::new())
    }
}

/// A multi-queue whose levels all use the same sub-queue type.
pub struct MultiQueue<Q: Policy>
where
    Q::Task: HasPriority,
{
    queues: BTreeMap<<Q::Task as HasPriority>::Level, Q>,
}

impl<Q: Policy> MultiQueue<Q>
where
    Q::Task: HasPriority,
{
    /// Creates a multi-queue with no levels materialized yet.
    pub const fn new() -> Self {
        Self {
            queues: BTreeMap::new(),
        }
    }
}

impl<Q: Policy> Default for MultiQueue<Q>
where
    Q::Task: HasPriority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: Policy + Default> Policy for MultiQueue<Q>
where
    Q::Task: HasPriority,
{
    type Task = Q::Task;

    fn next(&mut self) -> Option<Arc<Q::Task>> {
        // Highest level first; empty levels are skipped, not reclaimed.
        for queue in self.queues.values_mut().rev() {
            if let Some(task) = queue.next() {
                return Some(task);
            }
        }
        None
    }

    fn ready(&mut self, task: Arc<Q::Task>) {
        let level = task.priority();
        self.queues.entry(level).or_default().ready(task);
    }
}

impl<Q: Removable + Default> Removable for MultiQueue<Q>
where
    Q::Task: HasPriority,
{
    fn remove(&mut self, task: &Arc<Q::Task>) -> Option<Arc<Q::Task>> {
        self.queues.get_mut(&task.priority())?.remove(task)
    }
}

impl<Q: Removable + Default> Adjustable for MultiQueue<Q>
where
    Q::Task: HasPriority,
{
    fn adjust_position(&mut self, task: &Arc<Q::Task>, old_level: <Q::Task as HasPriority>::Level) {
        let queued = self
            .queues
            .get_mut(&old_level)
            .and_then(|queue| queue.remove(task))
            .expect("task to re-home was not queued at its previous level");
        Policy::ready(self, queued);
    }
}

/// A multi-queue that builds each level's sub-queue through a factory.
pub struct DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
{
    queues: BTreeMap<T::Level, Box<dyn LevelQueue<T>>>,
    _factory: PhantomData<F>,
}

impl<T, F> DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
{
    /// Creates a multi-queue with no levels materialized yet.
    pub const fn new() -> Self {
        Self {
            queues: BTreeMap::new(),
            _factory: PhantomData,
        }
    }
}

impl<T, F> Default for DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Policy for DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
    F: LevelQueueFactory<T>,
{
    type Task = T;

    fn next(&mut self) -> Option<Arc<T>> {
        for queue in self.queues.values_mut().rev() {
            if let Some(task) = queue.next() {
                return Some(task);
            }
        }
        None
    }

    fn ready(&mut self, task: Arc<T>) {
        let level = task.priority();
        self.queues
            .entry(level)
            .or_insert_with(|| {
                debug!("multi-queue: materializing sub-queue for level {:?}", level);
                F::make(level)
            })
            .ready(task);
    }
}

impl<T, F> Removable for DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
    F: LevelQueueFactory<T>,
{
    fn remove(&mut self, task: &Arc<T>) -> Option<Arc<T>> {
        self.queues.get_mut(&task.priority())?.remove(task)
    }
}

impl<T, F> Adjustable for DynMultiQueue<T, F>
where
    T: Schedulable + HasPriority + 'static,
    F: LevelQueueFactory<T>,
{
    fn adjust_position(&mut self, task: &Arc<T>, old_level: T::Level) {
        let queued = self
            .queues
            .get_mut(&old_level)
            .and_then(|queue| queue.remove(task))
            .expect("task to re-home was not queued at its previous level");
        Policy::ready(self, queued);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FifoQueue;
    use core::sync::atomic::{AtomicU32, Ordering};

    struct Job {
        level: AtomicU32,
    }

    impl Job {
        fn at(level: u32) -> Arc<Self> {
            Arc::new(Self {
                level: AtomicU32::new(level),
            })
        }
    }

    impl Schedulable for Job {}
    impl HasPriority for Job {
        type Level = u32;
        fn priority(&self) -> u32 {
            self.level.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn serves_higher_levels_first_and_fifo_within_a_level() {
        let mut queue: MultiQueue<FifoQueue<Job>> = MultiQueue::new();
        let low = Job::at(1);
        let high_first = Job::at(9);
        let high_second = Job::at(9);
        Policy::ready(&mut queue, low.clone());
        Policy::ready(&mut queue, high_first.clone());
        Policy::ready(&mut queue, high_second.clone());

        assert!(Arc::ptr_eq(&Policy::next(&mut queue).unwrap(), &high_first));
        assert!(Arc::ptr_eq(&Policy::next(&mut queue).unwrap(), &high_second));
        assert!(Arc::ptr_eq(&Policy::next(&mut queue).unwrap(), &low));
        assert!(Policy::next(&mut queue).is_none());
    }

    #[test]
    fn factory_levels_materialize_lazily() {
        let mut queue: DynMultiQueue<Job, FifoFactory> = DynMultiQueue::new();
        assert!(Policy::next(&mut queue).is_none());
        assert_eq!(queue.queues.len(), 0);

        Policy::ready(&mut queue, Job::at(3));
        Policy::ready(&mut queue, Job::at(7));
        assert_eq!(queue.queues.len(), 2);

        // Draining a level keeps its sub-queue allocated.
        assert_eq!(Policy::next(&mut queue).unwrap().priority(), 7);
        assert_eq!(queue.queues.len(), 2);
    }

    #[test]
    fn adjust_position_rehomes_a_requeued_task() {
        let mut queue: DynMultiQueue<Job, FifoFactory> = DynMultiQueue::new();
        let job = Job::at(2);
        let other = Job::at(2);
        Policy::ready(&mut queue, job.clone());
        Policy::ready(&mut queue, other.clone());

        job.level.store(5, Ordering::Relaxed);
        queue.adjust_position(&job, 2);

        assert!(Arc::ptr_eq(&Policy::next(&mut queue).unwrap(), &job));
        assert!(Arc::ptr_eq(&Policy::next(&mut queue).unwrap(), &other));
    }
}
