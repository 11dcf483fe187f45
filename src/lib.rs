/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Composable task scheduling for kernels and cooperative runtimes.
//!
//! A scheduler built from this crate answers exactly one question on every
//! scheduling event: given the currently running task and a notification of
//! what happened, which task should run next? The crate owns the ready-queue
//! bookkeeping and the event-to-decision logic; the host kernel owns CPUs,
//! stacks, timers, and blocking primitives, and context-switches to whatever
//! task an event entry point returns.
//!
//! A concrete scheduler is assembled from two orthogonal kinds of parts:
//!
//! - A **ready-queue policy** ([`Policy`]): how ready tasks are stored and
//!   which one is dequeued first. See [`policy`] for FIFO, rank-sorted, and
//!   per-priority-level multi-queue implementations, plus extension wrappers
//!   that interpose code around the queue primitives.
//! - **Event strategies**, one per scheduling event (timer interrupt, task
//!   created, finished, yielded, blocked, unblocked, killed, priority
//!   changed, quantum exhausted). Each comes in cooperative and preemptive
//!   flavors; wrapping a strategy in [`event::idle::WithIdle`] makes it fall
//!   back to the idle task instead of returning nothing. See [`event`].
//!
//! The [`Scheduler`] assembler composes one policy with any subset of event
//! strategies. Unfilled event slots simply have no entry point, and a
//! strategy whose task-capability requirements (see [`caps`]) are not met by
//! the task type fails to compile rather than misbehaving at run time.
//!
//! Tasks are handed around as [`Arc`](alloc::sync::Arc) references. The
//! scheduler never owns a task and never blocks: every entry point runs to
//! completion inside the host's critical section.
//!
//! [`presets`] wires up the five classic schedulers (FIFO, round-robin,
//! prioritized round-robin, multilevel feedback queue, earliest deadline
//! first) as thin type aliases over the same parts.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use schedkit::presets::RoundRobin;
//! use schedkit::policy::FifoQueue;
//! use schedkit::caps::Schedulable;
//! use schedkit::Scheduler;
//!
//! struct Job(u32);
//! impl Schedulable for Job {}
//!
//! let idle = Arc::new(Job(0));
//! let mut sched: RoundRobin<Job> = Scheduler::new(FifoQueue::new(), idle.clone());
//!
//! let worker = Arc::new(Job(1));
//! sched.ready(worker.clone());
//!
//! // The timer tick preempts the idle task in favor of the worker.
//! let next = sched.on_timer_interrupt(idle).unwrap();
//! assert!(Arc::ptr_eq(&next, &worker));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod caps;
pub mod event;
pub mod list;
pub mod policy;
pub mod presets;

mod scheduler;


pub use scheduler::{IdleAware, QuantumDelegate, Scheduler};

pub use caps::{
    HasPriority, PriorityLadder, Prioritized, QuantumSpec, Quantized, Schedulable, SetPriority,
};
pub use policy::{Adjustable, Policy, Removable};
