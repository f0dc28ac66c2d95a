//! Reverse and sort tests

use crate::queue::StringQueue;

fn queue_of(values: &[&str]) -> StringQueue {
    let mut queue = StringQueue::new();
    for value in values {
        queue.insert_tail(value).unwrap();
    }
    queue
}

fn contents(queue: &StringQueue) -> Vec<&str> {
    queue.iter().collect()
}

#[test]
fn test_reverse_order() {
    let mut queue = queue_of(&["a", "b", "c", "d"]);
    queue.reverse();
    assert_eq!(contents(&queue), vec!["d", "c", "b", "a"]);
    assert_eq!(queue.peek_tail(), Some("a"));
    assert_eq!(queue.len(), 4);
    assert!(queue.check_invariants().is_ok());
}

#[test]
fn test_reverse_preserves_nodes() {
    let mut queue = queue_of(&["a", "b", "c"]);
    let mut before = queue.node_ids();
    let slots = queue.tracker().allocated_blocks();

    queue.reverse();
    before.reverse();
    assert_eq!(queue.node_ids(), before);
    assert_eq!(queue.tracker().allocated_blocks(), slots);
}

#[test]
fn test_reverse_is_involution() {
    let mut queue = queue_of(&["one", "two", "three"]);
    queue.reverse();
    queue.reverse();
    assert_eq!(contents(&queue), vec!["one", "two", "three"]);
}

#[test]
fn test_reverse_small_queues() {
    let mut empty = StringQueue::new();
    empty.reverse();
    assert!(empty.is_empty());
    assert!(empty.check_invariants().is_ok());

    let mut single = queue_of(&["solo"]);
    single.reverse();
    assert_eq!(contents(&single), vec!["solo"]);
    assert_eq!(single.peek_tail(), Some("solo"));
}

#[test]
fn test_sort_then_reverse_example() {
    let mut queue = queue_of(&["banana", "apple", "cherry"]);
    queue.sort();
    assert_eq!(contents(&queue), vec!["apple", "banana", "cherry"]);
    assert_eq!(queue.peek_tail(), Some("cherry"));

    queue.reverse();
    assert_eq!(contents(&queue), vec!["cherry", "banana", "apple"]);
}

#[test]
fn test_sort_prefix_orders_first() {
    let mut queue = queue_of(&["apple", "app", "applesauce", "ap"]);
    queue.sort();
    assert_eq!(contents(&queue), vec!["ap", "app", "apple", "applesauce"]);
}

#[test]
fn test_sort_is_stable() {
    // Equal values are distinguished by node handle
    let mut queue = queue_of(&["b", "a", "b", "a", "b"]);
    let ids = queue.node_ids();
    queue.sort();

    assert_eq!(contents(&queue), vec!["a", "a", "b", "b", "b"]);
    assert_eq!(
        queue.node_ids(),
        vec![ids[1], ids[3], ids[0], ids[2], ids[4]]
    );
}

#[test]
fn test_sort_idempotent() {
    let mut queue = queue_of(&["d", "b", "a", "c"]);
    queue.sort();
    let first = queue.node_ids();
    queue.sort();
    assert_eq!(queue.node_ids(), first);
    assert!(queue.is_sorted());
}

#[test]
fn test_sort_small_queues() {
    let mut empty = StringQueue::new();
    empty.sort();
    assert!(empty.is_empty());

    let mut single = queue_of(&["x"]);
    single.sort();
    assert_eq!(contents(&single), vec!["x"]);
    assert!(single.check_invariants().is_ok());
}

#[test]
fn test_sort_does_not_allocate() {
    let mut queue = queue_of(&["q", "w", "e", "r", "t", "y"]);
    let bytes = queue.tracker().allocated_bytes();
    let peak = queue.tracker().peak_bytes();

    queue.sort();
    assert_eq!(queue.tracker().allocated_bytes(), bytes);
    assert_eq!(queue.tracker().peak_bytes(), peak);
}

#[test]
fn test_sort_reverse_sorted_input() {
    let values: Vec<String> = (0..100).rev().map(|i| format!("{:03}", i)).collect();
    let mut queue = StringQueue::new();
    for value in &values {
        queue.insert_tail(value).unwrap();
    }

    queue.sort();
    assert!(queue.is_sorted());
    assert_eq!(queue.peek_head(), Some("000"));
    assert_eq!(queue.peek_tail(), Some("099"));
    assert!(queue.check_invariants().is_ok());

    // Tail must be usable for insertion after sort
    queue.insert_tail("zzz").unwrap();
    assert_eq!(queue.peek_tail(), Some("zzz"));
    assert!(queue.check_invariants().is_ok());
}

#[test]
fn test_sort_after_removals_reuses_slots() {
    let mut queue = queue_of(&["m", "k", "z"]);
    queue.pop_head();
    queue.insert_head("a").unwrap();
    queue.insert_tail("b").unwrap();
    queue.sort();
    assert_eq!(contents(&queue), vec!["a", "b", "k", "z"]);
    assert!(queue.check_invariants().is_ok());
}

#[test]
fn test_is_sorted() {
    assert!(StringQueue::new().is_sorted());
    assert!(queue_of(&["a", "a", "b"]).is_sorted());
    assert!(!queue_of(&["b", "a"]).is_sorted());
}
