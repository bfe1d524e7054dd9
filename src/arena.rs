use std::{
    mem,
    ops::{Index, IndexMut},
};

use crate::node::{Node, NodeId};

#[derive(Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant,
}

/// Slab of nodes addressed by [`NodeId`].
///
/// Released slots go to a free list and are handed out again by the next
/// allocation, so ids are only stable while the node is alive.
#[derive(Debug)]
pub(crate) struct NodeArena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    tower_bytes: usize,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            tower_bytes: 0,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.tower_bytes += Node::<K, V>::tower_size(node.height());
        match self.free.pop() {
            Some(idx) => {
                debug_assert!(matches!(self.slots[idx], Slot::Vacant));
                self.slots[idx] = Slot::Occupied(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V> {
        match mem::replace(&mut self.slots[id.0], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(id.0);
                self.tower_bytes -= Node::<K, V>::tower_size(node.height());
                node
            }
            Slot::Vacant => panic!("release of vacant slot {}", id.0),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.tower_bytes = 0;
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn mem_usage(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Slot<K, V>>()
            + self.free.capacity() * mem::size_of::<usize>()
            + self.tower_bytes
    }
}

impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("dangling node id {}", id.0),
        }
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("dangling node id {}", id.0),
        }
    }
}
