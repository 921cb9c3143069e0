//! Registry of running animations
//!
//! Records are stored in a [`SlotMap`] and linked into a list in front of the
//! most recently started one. Keys are generation-tagged, so an
//! [`AnimationId`] held across a removal never resolves to a different record.

use crate::animation::Animation;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a running animation
    pub struct AnimationId;
}

struct Node<T> {
    animation: Animation<T>,
    prev: Option<AnimationId>,
    next: Option<AnimationId>,
}

/// Linked collection of running animations
///
/// Insertion is always at the head. Head access, insertion and removal of a
/// known record are O(1).
pub struct AnimationRegistry<T> {
    nodes: SlotMap<AnimationId, Node<T>>,
    head: Option<AnimationId>,
}

impl<T> AnimationRegistry<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Most recently inserted record
    pub fn head(&self) -> Option<AnimationId> {
        self.head
    }

    /// Record after `id`, or `None` at the end or if `id` is gone
    pub fn next(&self, id: AnimationId) -> Option<AnimationId> {
        self.nodes.get(id).and_then(|node| node.next)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation<T>> {
        self.nodes.get(id).map(|node| &node.animation)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation<T>> {
        self.nodes.get_mut(id).map(|node| &mut node.animation)
    }

    /// Insert a record in front of all others
    pub fn push_front(&mut self, animation: Animation<T>) -> AnimationId {
        let old_head = self.head;
        let id = self.nodes.insert(Node {
            animation,
            prev: None,
            next: old_head,
        });

        if let Some(old) = old_head {
            self.nodes[old].prev = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Unlink and return a record
    pub fn remove(&mut self, id: AnimationId) -> Option<Animation<T>> {
        let node = self.nodes.remove(id)?;

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        if let Some(next) = node.next {
            self.nodes[next].prev = node.prev;
        }

        Some(node.animation)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            registry: self,
            cursor: self.head,
        }
    }
}

impl<T> Default for AnimationRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over an [`AnimationRegistry`]
pub struct Iter<'a, T> {
    registry: &'a AnimationRegistry<T>,
    cursor: Option<AnimationId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (AnimationId, &'a Animation<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.registry.nodes.get(id)?;
        self.cursor = node.next;
        Some((id, &node.animation))
    }
}
