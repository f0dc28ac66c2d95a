//! Node storage for the linked queue
//!
//! Nodes live in an arena of slots addressed by [`NodeId`]. The arena owns
//! every node; order is defined only by the `next` links, so relinking during
//! reverse and sort never moves or reallocates a node. Vacated slots are
//! threaded onto a free list and reused by later insertions.

use std::ops::{Index, IndexMut};

use crate::queue::{QueueError, QueueResult};

/// Stable handle to a node for as long as the node stays in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One chain element: an owned value and the link to its successor
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) next: Option<NodeId>,
}

/// Accounted size of a node record, excluding its value storage
pub(crate) const NODE_BYTES: usize = std::mem::size_of::<Node>();

#[derive(Debug)]
enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
    free: Option<usize>,
    occupied: usize,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` nodes up front
    pub(crate) fn with_capacity(capacity: usize) -> QueueResult<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::allocation_failure(capacity.saturating_mul(NODE_BYTES)))?;
        Ok(Self {
            slots,
            free: None,
            occupied: 0,
        })
    }

    /// Make sure the next `insert` cannot need to grow the slot vector
    pub(crate) fn reserve_one(&mut self) -> QueueResult<()> {
        if self.free.is_some() {
            return Ok(());
        }
        self.slots
            .try_reserve(1)
            .map_err(|_| QueueError::allocation_failure(NODE_BYTES))
    }

    /// Store a node, reusing a vacant slot when one exists
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        self.occupied += 1;
        match self.free {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free = next_free;
                }
                self.slots[index] = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena, returning its slot to the free list
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(slot, Slot::Vacant { next_free: self.free });
        self.free = Some(id.0);
        self.occupied -= 1;
        match vacated {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.occupied
    }

    /// Number of slots ever created, vacant ones included
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every node and slot at once
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.occupied = 0;
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("node {} is not linked into the queue", id.0),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("node {} is not linked into the queue", id.0),
        }
    }
}
