//! Index-linked recency list backed by `SlotArena`.
//!
//! Stores list nodes in a bounded `SlotArena` and links them by `SlotId`,
//! giving O(1) splice/move operations without per-node allocation or
//! pointer chasing. `Option<SlotId>` is the "no neighbor" sentinel, so
//! slot 0 is an ordinary slot and can never be mistaken for "absent".
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   front ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── back
//!            (MRU)                   (LRU)
//! ```
//!
//! - `try_push_front(value)`: new MRU node, `None` when the arena is full
//! - `move_to_front(id)`: detach + attach to front; no-op when already front
//! - `pop_back()`: detach + free the LRU node
//! - `remove(id)`: detach + free an arbitrary node

use crate::ds::slot_arena::{SlotArena, SlotId};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Bounded recency list; front is most recently used, back is least.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    front: Option<SlotId>,
    back: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list bounded by `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` when every slot in the arena is live.
    pub fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns the SlotId of the most recently used node.
    pub fn front_id(&self) -> Option<SlotId> {
        self.front
    }

    /// Returns the SlotId of the least recently used node.
    pub fn back_id(&self) -> Option<SlotId> {
        self.back
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front (MRU) and returns its `SlotId`, or
    /// `None` when the arena is full and nothing can be allocated.
    pub fn try_push_front(&mut self, value: T) -> Option<SlotId> {
        let id = self.arena.try_insert(Node {
            value,
            prev: None,
            next: self.front,
        })?;
        if let Some(front) = self.front {
            if let Some(node) = self.arena.get_mut(front) {
                node.prev = Some(id);
            }
        } else {
            self.back = Some(id);
        }
        self.front = Some(id);
        Some(id)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not
    /// present. Already-front nodes are left untouched.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.front == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Removes and returns the back (LRU) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id` from wherever it sits and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Frees every node; the capacity bound is unchanged.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = None;
        self.back = None;
    }

    /// Raises the node bound without disturbing the chain.
    pub fn grow_to(&mut self, capacity: usize) {
        self.arena.grow_to(capacity);
    }

    /// Returns an iterator from front (MRU) to back (LRU).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.front,
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
            self.front = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.back = prev;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_front = self.front;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_front;
        }
        if let Some(front) = old_front {
            if let Some(node) = self.arena.get_mut(front) {
                node.prev = Some(id);
            }
        } else {
            self.back = Some(id);
        }
        self.front = Some(id);
    }

    /// Walks the chain both ways and cross-checks it against the arena.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut seen = 0usize;
        let mut prev: Option<SlotId> = None;
        let mut current = self.front;
        while let Some(id) = current {
            let node = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("chain references vacant slot {}", id.index()))
            })?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "backlink mismatch at slot {}",
                    id.index()
                )));
            }
            seen += 1;
            if seen > self.arena.len() {
                return Err(InvariantError::new("cycle detected in recency chain"));
            }
            prev = current;
            current = node.next;
        }
        if seen != self.arena.len() {
            return Err(InvariantError::new(format!(
                "chain length {} does not match live node count {}",
                seen,
                self.arena.len()
            )));
        }
        if prev != self.back {
            return Err(InvariantError::new("chain does not terminate at back"));
        }
        Ok(())
    }
}

/// Iterator over node values from front (MRU) to back (LRU).
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
