/* Copyright (c) [2023] [Syswonder Community]
 *   [Ruxos] is licensed under Mulan PSL v2.
 *   You can use this software according to the terms and conditions of the Mulan PSL v2.
 *   You may obtain a copy of Mulan PSL v2 at:
 *               http://license.coscl.org.cn/MulanPSL2
 *   THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
 *   See the Mulan PSL v2 for more details.
 */

//! An intrusive doubly linked list with constant-time arbitrary removal.
//!
//! Link storage lives inside the entries themselves, so enqueueing allocates
//! nothing. Entries are shared [`Arc`]s; the list holds one reference count
//! per linked entry and releases it on removal. It is modeled on the linked
//! list used by the Rust-for-Linux kernel bindings, cut down to the
//! operations a ready queue needs.
//!
//! User task types do not have to embed the links: the [`Listed`] wrapper
//! carries them and forwards the task capabilities to the inner type.

use alloc::sync::Arc;
use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Deref;
use core::ptr::NonNull;

use crate::caps::{HasPriority, PriorityLadder, Quantized, Schedulable, SetPriority};

/// The link storage embedded in a list entry.
pub struct Links<T: ?Sized> {
    linked: Cell<bool>,
    prev: Cell<Option<NonNull<T>>>,
    next: Cell<Option<NonNull<T>>>,
}

// The cells are only touched by `List` operations, which the host runs
// inside its scheduler critical section (the library is single-threaded by
// contract).
unsafe impl<T: ?Sized> Send for Links<T> {}
unsafe impl<T: ?Sized> Sync for Links<T> {}

impl<T: ?Sized> Links<T> {
    /// Creates unlinked storage.
    pub const fn new() -> Self {
        Self {
            linked: Cell::new(false),
            prev: Cell::new(None),
            next: Cell::new(None),
        }
    }

    /// Whether the owner is currently in a list.
    pub fn is_linked(&self) -> bool {
        self.linked.get()
    }
}

impl<T: ?Sized> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An entry type that exposes its link storage.
///
/// # Safety
///
/// `links()` must return the same storage for the whole lifetime of the
/// value, and that storage must not be shared with another [`Linked`] value.
pub unsafe trait Linked {
    /// Returns the entry's link storage.
    fn links(&self) -> &Links<Self>;
}

/// An intrusive FIFO-ordered list of `Arc<T>` entries.
///
/// An entry may be in at most one list at a time; pushing an entry that is
/// already linked is a caller bug and aborts.
pub struct List<T: Linked> {
    head: Option<NonNull<T>>,
    tail: Option<NonNull<T>>,
    _owned: PhantomData<Arc<T>>,
}

unsafe impl<T: Linked + Send + Sync> Send for List<T> {}

impl<T: Linked> List<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            _owned: PhantomData,
        }
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `item` to the back of the list.
    pub fn push_back(&mut self, item: Arc<T>) {
        let ptr = unsafe { NonNull::new_unchecked(Arc::into_raw(item) as *mut T) };
        let links = unsafe { ptr.as_ref() }.links();
        assert!(!links.linked.get(), "entry is already linked into a list");
        links.linked.set(true);
        links.prev.set(self.tail);
        links.next.set(None);
        match self.tail {
            Some(tail) => unsafe { tail.as_ref() }.links().next.set(Some(ptr)),
            None => self.head = Some(ptr),
        }
        self.tail = Some(ptr);
    }

    /// Detaches and returns the front entry, if any.
    pub fn pop_front(&mut self) -> Option<Arc<T>> {
        let head = self.head?;
        unsafe {
            self.unlink(head);
            Some(Arc::from_raw(head.as_ptr()))
        }
    }

    /// Detaches `item`, returning the list's reference to it.
    ///
    /// Returns `None` if `item` is not linked anywhere.
    ///
    /// # Safety
    ///
    /// If `item` is linked, it must be linked into *this* list; the link
    /// storage cannot tell lists apart.
    pub unsafe fn remove(&mut self, item: &Arc<T>) -> Option<Arc<T>> {
        if !item.links().linked.get() {
            return None;
        }
        let ptr = NonNull::from(&**item);
        self.unlink(ptr);
        Some(Arc::from_raw(ptr.as_ptr()))
    }

    unsafe fn unlink(&mut self, entry: NonNull<T>) {
        let links = entry.as_ref().links();
        let prev = links.prev.get();
        let next = links.next.get();
        match prev {
            Some(prev) => prev.as_ref().links().next.set(next),
            None => self.head = next,
        }
        match next {
            Some(next) => next.as_ref().links().prev.set(prev),
            None => self.tail = prev,
        }
        links.prev.set(None);
        links.next.set(None);
        links.linked.set(false);
    }
}

impl<T: Linked> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Linked> Drop for List<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
    }
}

/// Wraps a task with intrusive link storage.
///
/// Lets an arbitrary task type ride an intrusive policy without embedding
/// links itself. The scheduling capabilities of the inner type are forwarded
/// so the wrapper composes with the same policies and strategies.
pub struct Listed<T> {
    inner: T,
    links: Links<Self>,
}

unsafe impl<T> Linked for Listed<T> {
    fn links(&self) -> &Links<Self> {
        &self.links
    }
}

impl<T> Listed<T> {
    /// Wraps `inner` with fresh, unlinked storage.
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            links: Links::new(),
        }
    }

    /// Returns a reference to the inner task.
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> Deref for Listed<T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Listed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: Schedulable> Schedulable for Listed<T> {}

impl<T: HasPriority> HasPriority for Listed<T> {
    type Level = T::Level;
    fn priority(&self) -> Self::Level {
        self.inner.priority()
    }
}

impl<T: SetPriority> SetPriority for Listed<T> {
    fn set_priority(&self, level: Self::Level) {
        self.inner.set_priority(level);
    }
}

impl<T: PriorityLadder> PriorityLadder for Listed<T> {
    fn promote(&self) {
        self.inner.promote();
    }
    fn demote(&self) {
        self.inner.demote();
    }
}

impl<T: Quantized> Quantized for Listed<T> {
    type Ticks = T::Ticks;
    fn tick(&self) {
        self.inner.tick();
    }
    fn exhausted(&self) -> bool {
        self.inner.exhausted()
    }
    fn allocate_ticks(&self, ticks: Self::Ticks) {
        self.inner.allocate_ticks(ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node(u32);

    #[test]
    fn push_pop_preserves_order() {
        let mut list: List<Listed<Node>> = List::new();
        let a = Arc::new(Listed::new(Node(1)));
        let b = Arc::new(Listed::new(Node(2)));
        let c = Arc::new(Listed::new(Node(3)));

        assert!(list.is_empty());
        list.push_back(a.clone());
        list.push_back(b.clone());
        list.push_back(c.clone());
        assert!(a.links().is_linked());

        assert_eq!(list.pop_front().unwrap().inner().0, 1);
        assert_eq!(list.pop_front().unwrap().inner().0, 2);
        assert_eq!(list.pop_front().unwrap().inner().0, 3);
        assert!(list.pop_front().is_none());
        assert!(!a.links().is_linked());
    }

    #[test]
    fn remove_detaches_middle_entry() {
        let mut list: List<Listed<Node>> = List::new();
        let a = Arc::new(Listed::new(Node(1)));
        let b = Arc::new(Listed::new(Node(2)));
        let c = Arc::new(Listed::new(Node(3)));
        list.push_back(a.clone());
        list.push_back(b.clone());
        list.push_back(c.clone());

        let removed = unsafe { list.remove(&b) }.unwrap();
        assert!(Arc::ptr_eq(&removed, &b));
        assert!(unsafe { list.remove(&b) }.is_none());

        assert_eq!(list.pop_front().unwrap().inner().0, 1);
        assert_eq!(list.pop_front().unwrap().inner().0, 3);
        assert!(list.is_empty());
    }

    #[test]
    fn dropping_a_list_releases_its_references() {
        let a = Arc::new(Listed::new(Node(1)));
        {
            let mut list: List<Listed<Node>> = List::new();
            list.push_back(a.clone());
            assert_eq!(Arc::strong_count(&a), 2);
        }
        assert_eq!(Arc::strong_count(&a), 1);
        assert!(!a.links().is_linked());
    }
}
