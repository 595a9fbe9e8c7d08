//! # MOSAIC Registry
//!
//! The authoritative peer-window roster, shared across independent window
//! processes through one dumb storage medium.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Window A    │     │  Window B    │     │  Window C    │
//! │ WindowTracker│     │ WindowTracker│     │ WindowTracker│
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │    heartbeat + shape, once per tick     │
//!        └───────────────┬────────┴────────────────┘
//!                        ▼
//!               ┌─────────────────┐
//!               │   SharedStore   │  (one JSON roster document)
//!               └─────────────────┘
//! ```
//!
//! Every tracker rewrites the whole roster document on update: no
//! transactions, last writer wins. Staleness is resolved by heartbeat
//! timestamps, not by goodbyes - a window that dies silently ages out.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod store;
pub mod tracker;

pub use store::{JsonFileStore, MemoryStore, SharedStore, StoreError};
pub use tracker::{WindowTracker, ROSTER_KEY};
