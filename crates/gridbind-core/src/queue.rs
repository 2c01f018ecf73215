//! Deferred event queue.
//!
//! Entries are posted now and processed later, in FIFO order, when the owner
//! decides to drain the queue (typically on the next tick of its event loop).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::logging::targets;

/// A unique identifier for a queued entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueuedId(u64);

impl QueuedId {
    /// Get the raw u64 value of this ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique queue IDs.
static NEXT_QUEUED_ID: AtomicU64 = AtomicU64::new(1);

fn next_queued_id() -> QueuedId {
    QueuedId(NEXT_QUEUED_ID.fetch_add(1, Ordering::Relaxed))
}

struct Entry<T> {
    id: QueuedId,
    payload: T,
}

/// A FIFO queue of deferred payloads.
pub struct EventQueue<T> {
    entries: VecDeque<Entry<T>>,
    batch_size: usize,
}

impl<T> EventQueue<T> {
    /// Create a new queue with the default batch size of 10.
    pub fn new() -> Self {
        Self::with_batch_size(10)
    }

    /// Create a new queue with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            batch_size,
        }
    }

    /// Post a payload for later processing.
    ///
    /// Returns the ID that can be used to cancel the entry.
    pub fn post(&mut self, payload: T) -> QueuedId {
        let id = next_queued_id();
        self.entries.push_back(Entry { id, payload });
        gridbind_trace!(id = id.as_u64(), pending = self.entries.len(), "queued entry");
        id
    }

    /// Cancel a pending entry, returning its payload.
    pub fn cancel(&mut self, id: QueuedId) -> CoreResult<T> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CoreError::UnknownQueueEntry(id.as_u64()))?;
        let entry = self
            .entries
            .remove(pos)
            .ok_or(CoreError::UnknownQueueEntry(id.as_u64()))?;
        tracing::debug!(target: targets::QUEUE, id = id.as_u64(), "cancelled queued entry");
        Ok(entry.payload)
    }

    /// Check if there are any pending entries.
    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get the number of pending entries.
    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Process up to `batch_size` entries.
    ///
    /// Returns the number of entries processed.
    pub fn process_batch<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(T),
    {
        let count = self.entries.len().min(self.batch_size);
        for _ in 0..count {
            if let Some(entry) = self.entries.pop_front() {
                handler(entry.payload);
            }
        }
        count
    }

    /// Process all pending entries.
    ///
    /// Returns the number of entries processed.
    pub fn process_all<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(T),
    {
        let count = self.entries.len();
        while let Some(entry) = self.entries.pop_front() {
            handler(entry.payload);
        }
        if count > 0 {
            gridbind_debug!(count, "processed queued entries");
        }
        count
    }

    /// Set the batch size used by [`process_batch`](Self::process_batch).
    pub fn set_batch_size(&mut self, size: usize) {
        self.batch_size = size;
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.entries.len())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
