//! Core systems for gridbind.
//!
//! This crate provides the foundational pieces the table model is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous event dispatch
//! - **Event Queue**: Deferred FIFO processing with cancellation
//! - **Logging**: `tracing` targets, span names and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use gridbind_core::Signal;
//!
//! // Create a signal that notifies when a row is tapped
//! let row_tapped = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = row_tapped.connect(|row| {
//!     println!("Row {} tapped", row);
//! });
//!
//! row_tapped.emit(3);
//! row_tapped.disconnect(conn_id);
//! ```
//!
//! # Event Queue Example
//!
//! ```
//! use gridbind_core::EventQueue;
//!
//! let mut queue = EventQueue::new();
//! queue.post("deferred");
//!
//! // Later, on the next tick:
//! let processed = queue.process_all(|entry| println!("{}", entry));
//! assert_eq!(processed, 1);
//! ```

#[macro_use]
pub mod logging;
mod error;
pub mod queue;
pub mod signal;

pub use error::{CoreError, CoreResult};
pub use logging::PerfSpan;
pub use queue::{EventQueue, QueuedId};
pub use signal::{ConnectionId, Signal};
