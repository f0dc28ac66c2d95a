//! Stable merge sort over the node chain
//!
//! Nodes are relinked in place; nothing is allocated and no value moves.

use std::cmp::Ordering;

use crate::queue::node::{NodeArena, NodeId};

/// Byte-lexicographic ordering of two values. The first differing byte
/// decides; a strict prefix orders before the longer value.
pub fn compare_values(left: &str, right: &str) -> Ordering {
    left.as_bytes().cmp(right.as_bytes())
}

/// True when `left` may be placed before `right`. Equal values answer true,
/// which keeps the merge stable.
fn precedes(left: &str, right: &str) -> bool {
    compare_values(left, right) != Ordering::Greater
}

/// Sort the `len` nodes starting at `head` and return the new first node.
/// The last node of the result has no successor.
pub(crate) fn merge_sort(nodes: &mut NodeArena, head: Option<NodeId>, len: usize) -> Option<NodeId> {
    if len < 2 {
        return head;
    }

    let right_len = len / 2;
    let left_len = len - right_len;

    let left = head?;
    let mut split = left;
    for _ in 1..left_len {
        match nodes[split].next {
            Some(next) => split = next,
            None => break,
        }
    }
    let right = nodes[split].next.take();

    let left = merge_sort(nodes, Some(left), left_len);
    let right = merge_sort(nodes, right, right_len);
    merge(nodes, left, right)
}

/// Merge two sorted chains, taking from `left` on ties
fn merge(nodes: &mut NodeArena, mut left: Option<NodeId>, mut right: Option<NodeId>) -> Option<NodeId> {
    let mut head = None;
    let mut tail: Option<NodeId> = None;

    while let (Some(l), Some(r)) = (left, right) {
        let taken = if precedes(&nodes[l].value, &nodes[r].value) {
            left = nodes[l].next;
            l
        } else {
            right = nodes[r].next;
            r
        };
        match tail {
            Some(t) => nodes[t].next = Some(taken),
            None => head = Some(taken),
        }
        tail = Some(taken);
    }

    let rest = left.or(right);
    match tail {
        Some(t) => nodes[t].next = rest,
        None => head = rest,
    }
    head
}
