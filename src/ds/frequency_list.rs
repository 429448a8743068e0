//! Frequency-ordered doubly linked list backed by `SlotArena`.
//!
//! Nodes carry an access frequency and are kept sorted ascending from head
//! to tail. The head is always a minimum-frequency node, which makes it the
//! eviction candidate of an LFU cache.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, frequency, prev, next }              │
//!   ├────────┼────────────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, frequency: 1, prev: None, next: id_3 } │
//!   │ id_2   │ { value: B, frequency: 4, prev: id_3, next: None } │
//!   │ id_3   │ { value: C, frequency: 2, prev: id_1, next: id_2 } │
//!   └────────┴────────────────────────────────────────────────────┘
//!
//!   head ─► [A:1] ◄──► [C:2] ◄──► [B:4] ◄── tail
//! ```
//!
//! ## Placement rule
//!
//! A node is (re)inserted immediately before the first node whose frequency
//! is strictly greater than its own, or at the tail if there is none. Among
//! nodes of equal frequency the most recently placed one therefore ends up
//! last, so the head of a tier is the node that has been in it longest.
//!
//! ```text
//!   before:  [A:1] [B:2] [C:2] [D:3]
//!   insert E with frequency 2
//!   after:   [A:1] [B:2] [C:2] [E:2] [D:3]
//! ```
//!
//! ## Operations
//! - `insert_by_frequency(value, freq)`: allocate + place by the rule above
//! - `increment(id)`: detach, bump frequency, place again
//! - `remove(id)`: detach + free slot in arena
//! - `pop_front()`: remove the head (least frequent, oldest in its tier)
//!
//! ## Performance
//! - `remove` / `pop_front`: O(1)
//! - `insert_by_frequency`: O(n) worst case, O(tier) for frequency-1 inserts
//! - `increment`: O(size of the old and new tiers)
//! - `iter`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    frequency: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list that keeps its nodes sorted by frequency.
#[derive(Debug)]
pub struct FrequencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> FrequencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the head (least frequent).
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the SlotId at the head (least frequent).
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value at the tail (most frequent).
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the SlotId at the tail (most frequent).
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    ///
    /// The frequency cannot be changed through this reference, so the
    /// ordering is unaffected.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns the frequency recorded for `id`, if present.
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.arena.get(id).map(|node| node.frequency)
    }

    /// Returns an iterator of `(&T, frequency)` from head to tail.
    pub fn iter(&self) -> FrequencyListIter<'_, T> {
        FrequencyListIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of SlotIds from head to tail.
    pub fn iter_ids(&self) -> FrequencyListIdIter<'_, T> {
        FrequencyListIdIter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts a new node with `frequency` and returns its `SlotId`.
    ///
    /// The node lands after every existing node whose frequency is less than
    /// or equal to `frequency`.
    pub fn insert_by_frequency(&mut self, value: T, frequency: u64) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            frequency,
            prev: None,
            next: None,
        });
        let attached = self.attach_scanning_from(id, self.head);
        debug_assert!(attached.is_some(), "new node {:?} failed to attach", id);
        id
    }

    /// Increments the frequency of `id` by one and repositions it.
    ///
    /// Returns the new frequency, or `None` if `id` is not present. The
    /// counter saturates at `u64::MAX`.
    pub fn increment(&mut self, id: SlotId) -> Option<u64> {
        let old_next = self.arena.get(id)?.next;
        self.detach(id)?;

        let node = self.arena.get_mut(id)?;
        node.frequency = node.frequency.saturating_add(1);
        let frequency = node.frequency;

        // Every node ahead of the old position has frequency <= the old one,
        // so the first strictly greater node can only follow it.
        let attached = self.attach_scanning_from(id, old_next);
        debug_assert!(attached.is_some(), "node {:?} failed to reattach", id);
        Some(frequency)
    }

    /// Removes and returns the head value with its frequency.
    pub fn pop_front(&mut self) -> Option<(T, u64)> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value and frequency.
    pub fn remove(&mut self, id: SlotId) -> Option<(T, u64)> {
        self.detach(id)?;
        self.arena
            .remove(id)
            .map(|node| (node.value, node.frequency))
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns the list order as SlotIds from head to tail.
    pub fn debug_snapshot_ids(&self) -> Vec<SlotId> {
        self.iter_ids().collect()
    }

    /// Verifies link symmetry, endpoint state, ordering and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match (self.head, self.tail) {
            (None, None) => {
                if !self.arena.is_empty() {
                    return Err(InvariantError::new(format!(
                        "list has no endpoints but arena holds {} nodes",
                        self.arena.len()
                    )));
                }
                return Ok(());
            },
            (Some(_), None) | (None, Some(_)) => {
                return Err(InvariantError::new(
                    "exactly one of head/tail is set".to_string(),
                ));
            },
            (Some(_), Some(_)) => {},
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev: Option<SlotId> = None;
        let mut last_frequency = 0u64;

        while let Some(id) = current {
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new(format!(
                    "walk exceeded {} nodes; list contains a cycle",
                    self.arena.len()
                )));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("stale SlotId {:?} in list", id)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} prev is {:?}, expected {:?}",
                    id, node.prev, prev
                )));
            }
            if node.frequency < last_frequency {
                return Err(InvariantError::new(format!(
                    "node {:?} frequency {} follows frequency {}",
                    id, node.frequency, last_frequency
                )));
            }
            last_frequency = node.frequency;
            prev = Some(id);
            current = node.next;
        }

        if self.tail != prev {
            return Err(InvariantError::new(format!(
                "tail is {:?} but walk ended at {:?}",
                self.tail, prev
            )));
        }
        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "walk counted {} nodes but arena holds {}",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency list invariant violated: {}", err);
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    /// Places a detached node before the first node at or after `start`
    /// whose frequency is strictly greater, or at the tail.
    fn attach_scanning_from(&mut self, id: SlotId, start: Option<SlotId>) -> Option<()> {
        let frequency = self.arena.get(id)?.frequency;
        let mut current = start;
        while let Some(candidate) = current {
            let node = self.arena.get(candidate)?;
            if node.frequency > frequency {
                return self.attach_before(id, candidate);
            }
            current = node.next;
        }
        self.attach_back(id)
    }

    fn attach_before(&mut self, id: SlotId, at: SlotId) -> Option<()> {
        let prev = self.arena.get(at)?.prev;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = Some(at);
        } else {
            return None;
        }
        if let Some(at_node) = self.arena.get_mut(at) {
            at_node.prev = Some(id);
        }
        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        Some(())
    }

    fn attach_back(&mut self, id: SlotId) -> Option<()> {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        } else {
            return None;
        }
        if let Some(old_tail) = old_tail {
            if let Some(tail_node) = self.arena.get_mut(old_tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        Some(())
    }
}

/// Iterator over `(&T, frequency)` pairs from head to tail.
pub struct FrequencyListIter<'a, T> {
    list: &'a FrequencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for FrequencyListIter<'a, T> {
    type Item = (&'a T, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((&node.value, node.frequency))
    }
}

/// Iterator over SlotIds from head to tail.
pub struct FrequencyListIdIter<'a, T> {
    list: &'a FrequencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for FrequencyListIdIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(id)
    }
}

impl<T> Default for FrequencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}
