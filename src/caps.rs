/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! Capability contracts on task types.
//!
//! Policies and event strategies never inspect a task directly; they require
//! one of the traits below. Assembling a component with a task type that
//! lacks the required capability is a compile error.
//!
//! All mutating capability methods take `&self`: tasks are shared with the
//! host kernel behind [`Arc`](alloc::sync::Arc) references, so implementors
//! keep the affected fields in atomics (or another interior-mutability cell
//! appropriate to the host's concurrency rules).

use core::fmt;

/// Marks a type that a ready queue may hold.
pub trait Schedulable {}

/// A total preorder deciding which of two tasks should run first.
///
/// `a.outranks(b)` means `a` runs before `b`; if neither outranks the other
/// they are peers and first-come-first-served order applies. Implement this
/// directly for tasks ranked by an intrinsic key (an EDF task compares
/// absolute deadlines: earlier deadline outranks later). Tasks with a
/// numeric priority level get this for free via [`HasPriority`].
pub trait Prioritized: Schedulable {
    /// Whether `self` must run before `other`.
    fn outranks(&self, other: &Self) -> bool;
}

/// A task that exposes a numeric priority level. Larger is higher.
pub trait HasPriority: Schedulable {
    /// The priority level type.
    type Level: Ord + Copy + fmt::Debug;

    /// Returns the current priority level.
    fn priority(&self) -> Self::Level;
}

impl<T: HasPriority> Prioritized for T {
    fn outranks(&self, other: &Self) -> bool {
        self.priority() > other.priority()
    }
}

/// A task whose priority level can be replaced.
pub trait SetPriority: HasPriority {
    /// Replaces the priority level.
    fn set_priority(&self, level: Self::Level);
}

/// A task that can be moved one priority level at a time.
///
/// Both operations clamp at the extreme levels: promoting the highest or
/// demoting the lowest leaves the level unchanged.
pub trait PriorityLadder: SetPriority {
    /// Raises the priority by one level.
    fn promote(&self);

    /// Lowers the priority by one level.
    fn demote(&self);
}

/// A task that runs on a budget of timer ticks.
pub trait Quantized: Schedulable {
    /// The tick counter type (an unsigned integer in practice).
    type Ticks: Copy;

    /// Accounts for one elapsed timer tick.
    fn tick(&self);

    /// Whether the allotment has been used up.
    fn exhausted(&self) -> bool;

    /// Resets the allotment to `ticks`.
    fn allocate_ticks(&self, ticks: Self::Ticks);
}

/// A pure mapping from priority level to tick allotment.
///
/// Injected as a type parameter wherever a quantum has to be (re)computed:
/// the [`QuantumAllocator`](crate::policy::QuantumAllocator) enqueue hook and
/// the recharge strategies in [`event::quantum`](crate::event::quantum).
pub trait QuantumSpec<T: HasPriority + Quantized> {
    /// How many ticks a task at `level` may run before its quantum is spent.
    fn quantum(level: T::Level) -> T::Ticks;
}
