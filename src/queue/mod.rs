//! Linked String Queue
//!
//! A queue of owned text values on a singly-linked chain. Values can be
//! inserted at either end and removed from the head, so the same structure
//! serves FIFO (tail insert, head remove) and LIFO (head insert, head remove)
//! use. The chain can be reversed and stably sorted in place.
//!
//! # Architecture
//!
//! - **StringQueue**: head, tail and length over a chain of nodes
//! - **NodeArena**: slot storage that owns every node; links are [`NodeId`]s
//! - **Merge sort**: counted-split top-down merge over the chain, no allocation
//! - **MemoryTracker**: byte/block accounting with an optional budget and
//!   injected failures, shared with callers that audit teardown
//!
//! # Usage
//!
//! ```rust
//! use linkq::queue::StringQueue;
//!
//! let mut queue = StringQueue::new();
//! queue.insert_tail("banana").unwrap();
//! queue.insert_tail("apple").unwrap();
//! queue.insert_tail("cherry").unwrap();
//!
//! queue.sort();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["apple", "banana", "cherry"]);
//!
//! queue.reverse();
//! let mut buffer = [0u8; 4];
//! let copied = queue.remove_head_into(&mut buffer).unwrap();
//! assert_eq!(&buffer[..copied], b"che");
//! assert_eq!(buffer[copied], 0);
//! ```

pub mod config;
pub mod error;
pub mod memory_tracker;
pub mod node;
pub mod sort;
pub mod string_queue;

pub use config::QueueConfig;
pub use error::{QueueError, QueueResult};
pub use memory_tracker::MemoryTracker;
pub use node::NodeId;
pub use sort::compare_values;
pub use string_queue::{Iter, StringQueue};

#[cfg(test)]
mod tests;
