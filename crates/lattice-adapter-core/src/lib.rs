//! Core systems for Lattice Adapter.
//!
//! This crate provides the building blocks the list adapter is made of:
//!
//! - **Signal/Slot System**: Type-safe change notification to any number of subscribers
//! - **Deferred Queue**: Fire-once work posted out of a layout pass and drained later
//! - **Errors**: The [`AdapterError`] type shared by every adapter operation
//! - **Logging**: `tracing` target names and outline debug formatting
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_adapter_core::Signal;
//!
//! // A signal carrying (first, count) of an inserted range
//! let inserted = Signal::<(usize, usize)>::new();
//!
//! let conn_id = inserted.connect(|(first, count)| {
//!     println!("{count} rows inserted at {first}");
//! });
//!
//! inserted.emit((0, 3));
//! inserted.disconnect(conn_id);
//! ```
//!
//! # Deferred Queue Example
//!
//! ```
//! use lattice_adapter_core::DeferredQueue;
//! use std::time::{Duration, Instant};
//!
//! let mut queue = DeferredQueue::new();
//! queue.post("request page");
//! queue.post_delayed(Duration::from_millis(50), "check viewport");
//!
//! let now = Instant::now();
//! assert_eq!(queue.take_due(now), vec!["request page"]);
//! assert_eq!(queue.len(), 1);
//! ```

pub mod deferred;
mod error;
pub mod logging;
pub mod signal;

pub use deferred::{DeferredQueue, TaskId};
pub use error::{AdapterError, Result};
pub use logging::{OutlineDebug, OutlineDisplay, OutlineFormatOptions, OutlineRow, TreeStyle};
pub use signal::{ConnectionId, Signal};

static_assertions::assert_impl_all!(Signal<(usize, usize)>: Send, Sync);
static_assertions::assert_impl_all!(DeferredQueue<u32>: Send, Sync);
