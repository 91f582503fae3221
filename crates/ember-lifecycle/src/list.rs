//! Arena-backed singly linked list with a permanent sentinel head
//!
//! Nodes live in a `Vec` and link to each other by index. Slot 0 is the
//! sentinel: it never holds a payload and is never unlinked. `tail` is the
//! index of the last live node, or 0 when the list is empty. Slots released
//! by [`LifecycleList::update_and_reap`] go onto a free stack and are reused
//! by later appends; a per-slot generation keeps old [`NodeId`]s from
//! resolving to the new occupant.

use crate::Lifecycle;
use ember_core::{Camera, Canvas};

const HEAD: usize = 0;

/// Handle to a node returned by [`LifecycleList::append`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// The sentinel head
    pub const HEAD: NodeId = NodeId {
        index: 0,
        generation: 0,
    };

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn is_head(&self) -> bool {
        self.index as usize == HEAD
    }
}

struct Node<T> {
    payload: Option<T>,
    next: Option<usize>,
    generation: u32,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            payload: None,
            next: None,
            generation: 0,
        }
    }
}

/// Append-only list of transient objects, reaped during its update pass
pub struct LifecycleList<T> {
    nodes: Vec<Node<T>>,
    tail: usize,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for LifecycleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LifecycleList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate room for `capacity` nodes besides the sentinel
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Self {
            nodes,
            tail: HEAD,
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the node `tail` refers to; [`NodeId::HEAD`] when empty
    pub fn tail(&self) -> NodeId {
        self.id_of(self.tail)
    }

    /// Payload of the last live node
    pub fn last(&self) -> Option<&T> {
        self.nodes[self.tail].payload.as_ref()
    }

    /// Link `payload` after the current tail. O(1).
    pub fn append(&mut self, payload: T) -> NodeId {
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index].payload = Some(payload);
                index
            }
            None => {
                self.nodes.push(Node {
                    payload: Some(payload),
                    next: None,
                    generation: 0,
                });
                self.nodes.len() - 1
            }
        };

        self.nodes[self.tail].next = Some(index);
        self.tail = index;
        self.len += 1;
        self.id_of(index)
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        let node = self.nodes.get(id.index())?;
        if node.generation != id.generation {
            return None;
        }
        node.payload.as_ref()
    }

    /// Live payloads in insertion order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes[HEAD].next,
        }
    }

    /// Visit live payloads mutably in insertion order. Cannot unlink.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        let mut cursor = self.nodes[HEAD].next;
        while let Some(index) = cursor {
            let node = &mut self.nodes[index];
            cursor = node.next;
            if let Some(payload) = node.payload.as_mut() {
                f(payload);
            }
        }
    }

    /// Unlink and drop every node
    pub fn clear(&mut self) {
        let mut cursor = self.nodes[HEAD].next.take();
        while let Some(index) = cursor {
            cursor = self.nodes[index].next;
            self.release(index);
        }
        self.tail = HEAD;
    }

    fn id_of(&self, index: usize) -> NodeId {
        NodeId {
            index: index as u32,
            generation: self.nodes[index].generation,
        }
    }

    fn release(&mut self, index: usize) {
        let node = &mut self.nodes[index];
        node.payload = None;
        node.next = None;
        node.generation = node.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
    }
}

impl<T: Lifecycle> LifecycleList<T> {
    /// Update every live node once, unlinking the ones that die.
    ///
    /// This is the only place nodes are destroyed. The cursor continues from
    /// the removed node's successor, so no live node is skipped or visited
    /// twice. Returns how many nodes were reaped.
    pub fn update_and_reap(&mut self, env: &T::Env, dt: f32) -> usize {
        let mut reaped = 0;
        let mut prev = HEAD;
        let mut cursor = self.nodes[HEAD].next;

        while let Some(index) = cursor {
            let next = self.nodes[index].next;
            let dead = match self.nodes[index].payload.as_mut() {
                Some(payload) => {
                    payload.update(env, dt);
                    payload.is_dead()
                }
                None => true,
            };

            if dead {
                self.nodes[prev].next = next;
                if self.tail == index {
                    self.tail = prev;
                }
                self.release(index);
                reaped += 1;
            } else {
                prev = index;
            }
            cursor = next;
        }

        if reaped > 0 {
            tracing::trace!(reaped, live = self.len, "lifecycle nodes reaped");
        }
        reaped
    }

    /// Draw every live node in insertion order. Does not mutate the list.
    pub fn draw_all(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        for payload in self.iter() {
            payload.draw(canvas, camera);
        }
    }
}

/// Iterator over live payloads, see [`LifecycleList::iter`]
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        loop {
            let node = &nodes[self.cursor?];
            self.cursor = node.next;
            if let Some(payload) = node.payload.as_ref() {
                return Some(payload);
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a LifecycleList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
