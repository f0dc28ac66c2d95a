//! Singly-Linked String Queue
//!
//! Owned text values on a singly-linked chain with cached head, tail and
//! length. Insertion works at both ends, removal at the head only.
//! Every node and value is charged to a [`MemoryTracker`], so exhaustion is
//! reported as [`QueueError::AllocationFailure`] instead of aborting and
//! teardown can be audited.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::queue::memory_tracker::MemoryTracker;
use crate::queue::node::{Node, NodeArena, NodeId, NODE_BYTES};
use crate::queue::sort::{compare_values, merge_sort};
use crate::queue::{QueueError, QueueResult};

/// Accounted size of a stored value, terminator included
fn value_bytes(value: &str) -> usize {
    value.len() + 1
}

pub struct StringQueue {
    nodes: NodeArena,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    count: usize,
    tracker: Arc<MemoryTracker>,
}

impl StringQueue {
    /// Create an empty queue with unlimited accounting
    pub fn new() -> Self {
        Self::with_tracker(Arc::new(MemoryTracker::new(None)))
    }

    /// Create an empty queue that charges its allocations to `tracker`
    pub fn with_tracker(tracker: Arc<MemoryTracker>) -> Self {
        Self {
            nodes: NodeArena::new(),
            head: None,
            tail: None,
            count: 0,
            tracker,
        }
    }

    /// Create an empty queue with room for `capacity` nodes reserved
    pub fn with_capacity(capacity: usize, tracker: Arc<MemoryTracker>) -> QueueResult<Self> {
        let nodes = NodeArena::with_capacity(capacity)?;
        Ok(Self {
            nodes,
            head: None,
            tail: None,
            count: 0,
            tracker,
        })
    }

    pub fn tracker(&self) -> &Arc<MemoryTracker> {
        &self.tracker
    }

    /// Insert a copy of `value` before the current head
    pub fn insert_head(&mut self, value: &str) -> QueueResult<()> {
        let id = self.allocate_node(value)?;
        self.nodes[id].next = self.head;
        if self.head.is_none() {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.count += 1;
        trace!("insert_head: {} bytes, size now {}", value.len(), self.count);
        Ok(())
    }

    /// Insert a copy of `value` after the current tail
    pub fn insert_tail(&mut self, value: &str) -> QueueResult<()> {
        let id = self.allocate_node(value)?;
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.count += 1;
        trace!("insert_tail: {} bytes, size now {}", value.len(), self.count);
        Ok(())
    }

    /// Detach the head and hand its value to the caller
    pub fn pop_head(&mut self) -> Option<String> {
        let id = self.head?;
        let node = self.nodes.remove(id)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.count -= 1;
        self.release(&node.value);
        trace!("remove_head: {} bytes, size now {}", node.value.len(), self.count);
        Some(node.value)
    }

    /// Remove the head, copying its value into `out` as a NUL-terminated
    /// byte string. At most `out.len() - 1` bytes are copied; longer values
    /// are truncated. Returns the number of bytes copied, terminator excluded.
    ///
    /// Nothing is removed when `out` is empty or the queue has no elements.
    pub fn remove_head_into(&mut self, out: &mut [u8]) -> QueueResult<usize> {
        if out.is_empty() {
            return Err(QueueError::invalid_argument("output buffer has zero capacity"));
        }
        let value = self.pop_head().ok_or(QueueError::EmptyQueue)?;

        let copied = value.len().min(out.len() - 1);
        out[..copied].copy_from_slice(&value.as_bytes()[..copied]);
        out[copied] = 0;
        Ok(copied)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn peek_head(&self) -> Option<&str> {
        self.head.map(|id| self.nodes[id].value.as_str())
    }

    pub fn peek_tail(&self) -> Option<&str> {
        self.tail.map(|id| self.nodes[id].value.as_str())
    }

    /// Reverse the chain by relinking; no node is created or released
    pub fn reverse(&mut self) {
        let mut previous = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            cursor = self.nodes[id].next;
            self.nodes[id].next = previous;
            previous = Some(id);
        }
        self.tail = self.head;
        self.head = previous;
    }

    /// Stable ascending sort by byte order of the values
    pub fn sort(&mut self) {
        if self.count < 2 {
            return;
        }
        self.head = merge_sort(&mut self.nodes, self.head, self.count);

        let mut last = self.head;
        while let Some(next) = last.and_then(|id| self.nodes[id].next) {
            last = Some(next);
        }
        self.tail = last;
        debug!("sorted {} elements", self.count);
    }

    /// True when every value is no greater than its successor
    pub fn is_sorted(&self) -> bool {
        let mut values = self.iter();
        let Some(mut previous) = values.next() else {
            return true;
        };
        for value in values {
            if compare_values(previous, value).is_gt() {
                return false;
            }
            previous = value;
        }
        true
    }

    /// Release every node and value, leaving an empty queue
    pub fn clear(&mut self) {
        let released = self.count;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            cursor = self.nodes[id].next;
            let value = std::mem::take(&mut self.nodes[id].value);
            self.release(&value);
        }
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.count = 0;
        if released > 0 {
            debug!("released {} elements", released);
        }
    }

    /// Iterate over values from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.count,
        }
    }

    /// Node handles from head to tail
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.count);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.nodes[id].next;
        }
        ids
    }

    /// Check the structural invariants of the chain
    pub fn check_invariants(&self) -> QueueResult<()> {
        let violation = |message: String| -> QueueResult<()> {
            Err(QueueError::InvariantViolation { message })
        };

        if self.head.is_none() != (self.count == 0) || self.tail.is_none() != (self.count == 0) {
            return violation(format!(
                "head/tail presence disagrees with size {}",
                self.count
            ));
        }

        let mut reachable = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if self.nodes.get(id).is_none() {
                return violation(format!("link to vacant node {}", id.index()));
            }
            reachable += 1;
            if reachable > self.count {
                return violation(format!("chain is longer than size {}", self.count));
            }
            last = Some(id);
            cursor = self.nodes[id].next;
        }

        if reachable != self.count {
            return violation(format!(
                "{} reachable nodes but size is {}",
                reachable, self.count
            ));
        }
        if last != self.tail {
            return violation("tail is not the last reachable node".to_string());
        }
        if self.nodes.len() != self.count {
            return violation(format!(
                "{} stored nodes but size is {}",
                self.nodes.len(),
                self.count
            ));
        }
        Ok(())
    }

    /// Obtain an unlinked node holding a private copy of `value`. On failure
    /// every charge made so far is returned and the arena is untouched.
    fn allocate_node(&mut self, value: &str) -> QueueResult<NodeId> {
        if !self.tracker.allocate(NODE_BYTES) {
            warn!("node allocation of {} bytes refused", NODE_BYTES);
            return Err(QueueError::allocation_failure(NODE_BYTES));
        }

        let stored = self
            .nodes
            .reserve_one()
            .and_then(|_| self.copy_value(value));
        let stored = match stored {
            Ok(stored) => stored,
            Err(e) => {
                self.tracker.deallocate(NODE_BYTES);
                return Err(e);
            }
        };

        Ok(self.nodes.insert(Node {
            value: stored,
            next: None,
        }))
    }

    fn copy_value(&self, value: &str) -> QueueResult<String> {
        let bytes = value_bytes(value);
        if !self.tracker.allocate(bytes) {
            warn!("value allocation of {} bytes refused", bytes);
            return Err(QueueError::allocation_failure(bytes));
        }

        let mut stored = String::new();
        if stored.try_reserve_exact(value.len()).is_err() {
            self.tracker.deallocate(bytes);
            return Err(QueueError::allocation_failure(bytes));
        }
        stored.push_str(value);
        Ok(stored)
    }

    fn release(&self, value: &str) {
        self.tracker.deallocate(value_bytes(value));
        self.tracker.deallocate(NODE_BYTES);
    }
}

impl Default for StringQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StringQueue {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for StringQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over queue values, head first
pub struct Iter<'a> {
    nodes: &'a NodeArena,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let nodes = self.nodes;
        let node = &nodes[id];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a StringQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
