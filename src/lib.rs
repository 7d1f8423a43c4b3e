//! Order-statistic red-black tree map for Rust.
//!
//! This crate provides [`OSRBTreeMap`], an ordered map with the familiar
//! `BTreeMap` surface plus O(log n) order-statistic operations:
//!
//! - [`select`](OSRBTreeMap::select) - Get the key at a given sorted position
//! - [`rank`](OSRBTreeMap::rank) - Count the keys strictly less than a key
//! - [`floor`](OSRBTreeMap::floor) / [`ceiling`](OSRBTreeMap::ceiling) - Nearest key at or below / above a query
//! - [`delete_min`](OSRBTreeMap::delete_min) / [`delete_max`](OSRBTreeMap::delete_max) - Remove the extremes
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Ordinary map operations
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank(&"Carol"), 2);
//! assert_eq!(scores.floor(&"Bz"), Ok(Some(&"Bob")));
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Implementation
//!
//! The map is a left-leaning red-black tree: a binary search tree encoding of
//! a 2-3-4 tree in which red links group nodes of the same level and always
//! lean left. Every node records the size of its subtree, which turns rank and
//! select into a single root-to-leaf walk. Nodes live in an arena and link to
//! each other through compact handles, so the tree carries no parent pointers
//! and no `unsafe` code.
//!
//! Diagnostics are emitted through the [`log`] facade at `trace` level only.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod osrbtree_map;

pub use error::Error;
pub use order_statistic::Rank;
pub use osrbtree_map::OSRBTreeMap;
