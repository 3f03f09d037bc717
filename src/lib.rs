//! store-algos: a separate-chaining hash table of `Store` records with value
//! semantics, plus the heap, graph and sorting exercises that share its
//! `Store` record and edge types.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash table whose callers never hold a reference into its
//!   storage. Every boundary crossing copies: `insert` keeps a clone,
//!   `find`/`remove` hand back owned values, `Clone` duplicates every chain.
//! - Layers:
//!   - Store: the record. `owner` is the key and the only input to `Hash`;
//!     `sales` is freely mutable on copies.
//!   - Chain: per-bucket singly linked list. Nodes live in a chain-local
//!     `SlotMap` and link through generational keys; inserts prepend.
//!   - StoreTable<S>: a `Vec<Chain>` indexed by `hash mod capacity`, with a
//!     load-factor check before each insert that doubles and rehashes.
//!
//! Constraints
//! - Capacity starts at 4 and only grows. The load factor, counting the
//!   incoming element, is checked before placing it, so the 4th insert
//!   doubles 4 -> 8 and the 7th doubles 8 -> 16.
//! - Duplicate owners are allowed. Lookups return the most recent insert;
//!   resize replays each chain tail-to-head so that order survives.
//! - Empty owners can be stored but are never found or removed by key.
//! - Single-threaded usage; types hold no interior mutability, callers
//!   serialize access externally if they share a table.
//!
//! Hasher
//! - The default `PolyState` is a deterministic base-31 string hash, so
//!   bucket placement and the `Display` listing are reproducible. Any
//!   `BuildHasher` can be supplied through `with_hasher`.
//!
//! Supporting modules
//! - `chained_map`: generic unique-key map; `put` updates in place and
//!   growth is checked after each new key.
//! - `loader`: owner/sales line pairs into stores or straight into a table.
//! - `priority_queue`: `StoreHeap`, a max-heap on sales, and `heapsort`.
//! - `graph`: adjacency-list graph, BFS components, Prim MST, Dijkstra.
//! - `trace`: Dijkstra over a bare edge list with per-step snapshots.
//! - `sort`: counting/heap/quick/selection sorts and a bounded min-queue.
//!
//! Logging goes through `tracing`; the crate never installs a subscriber.

pub mod chain;
pub mod chained_map;
pub mod config;
pub mod error;
pub mod graph;
pub mod hasher;
pub mod loader;
pub mod priority_queue;
pub mod sort;
pub mod store;
pub mod table;
mod table_proptest;
pub mod trace;

// Public surface
pub use chain::Chain;
pub use chained_map::ChainedMap;
pub use config::TableConfig;
pub use error::{CapacityError, ConfigError, GraphError, LoadError};
pub use graph::{Edge, Graph, ShortestPaths};
pub use hasher::{PolyHasher, PolyState};
pub use loader::{load_stores, populate_table, StoreLines};
pub use priority_queue::{heapsort, PriorityQueue, StoreHeap};
pub use sort::MinPriorityQueue;
pub use store::Store;
pub use table::StoreTable;
pub use trace::{trace_dijkstra, DijkstraTrace, TraceStep};
