//! Deferred selection dispatch.
//!
//! UI toolkits often report taps while they are in the middle of a layout
//! pass, where running user slots that mutate the data source is unsafe.
//! A [`SelectionQueue`] records the taps and replays them against the data
//! source once the caller is back in a quiet state.
//!
//! ```
//! use gridbind::dispatch::SelectionQueue;
//! use gridbind::model::{Coordinate, ItemModel, TableDataSource};
//!
//! let mut source = TableDataSource::new();
//! source.add_item(ItemModel::new("Cell"), None);
//!
//! let mut queue = SelectionQueue::new();
//! queue.post_select(Coordinate::new(0, 0));
//! queue.post_deselect(Coordinate::new(0, 0));
//!
//! assert_eq!(queue.process_all(&source), 2);
//! assert!(!queue.has_pending());
//! ```

use gridbind_core::logging::{span_names, targets};
use gridbind_core::{CoreResult, EventQueue, PerfSpan, QueuedId};

use crate::model::{Coordinate, TableDataSource};

/// A selection change waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommand {
    Select(Coordinate),
    Deselect(Coordinate),
}

impl SelectionCommand {
    pub fn coordinate(self) -> Coordinate {
        match self {
            Self::Select(at) | Self::Deselect(at) => at,
        }
    }

    /// Applies the command. Returns `false` if no visible row was at the coordinate.
    fn apply(self, source: &TableDataSource) -> bool {
        let event = match self {
            Self::Select(at) => source.select_item(at),
            Self::Deselect(at) => source.deselect_item(at),
        };
        if event.is_none() {
            tracing::debug!(target: targets::DATA_SOURCE, command = ?self, "dropped selection for missing row");
        }
        event.is_some()
    }
}

/// FIFO queue of [`SelectionCommand`]s.
///
/// Coordinates are resolved when the command is processed, not when it is
/// posted.
#[derive(Debug, Default)]
pub struct SelectionQueue {
    queue: EventQueue<SelectionCommand>,
}

impl SelectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue whose [`process_batch`](Self::process_batch) handles
    /// at most `batch_size` commands per call.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            queue: EventQueue::with_batch_size(batch_size),
        }
    }

    pub fn post(&mut self, command: SelectionCommand) -> QueuedId {
        self.queue.post(command)
    }

    pub fn post_select(&mut self, at: Coordinate) -> QueuedId {
        self.post(SelectionCommand::Select(at))
    }

    pub fn post_deselect(&mut self, at: Coordinate) -> QueuedId {
        self.post(SelectionCommand::Deselect(at))
    }

    /// Withdraws a command that has not been processed yet.
    pub fn cancel(&mut self, id: QueuedId) -> CoreResult<SelectionCommand> {
        self.queue.cancel(id)
    }

    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Applies every pending command in posting order.
    ///
    /// Returns the number of commands processed, including those whose
    /// coordinate no longer pointed at a row.
    pub fn process_all(&mut self, source: &TableDataSource) -> usize {
        let _span = PerfSpan::new(span_names::DISPATCH);
        self.queue.process_all(|command| {
            command.apply(source);
        })
    }

    /// Applies up to one batch of pending commands.
    pub fn process_batch(&mut self, source: &TableDataSource) -> usize {
        let _span = PerfSpan::new(span_names::DISPATCH);
        self.queue.process_batch(|command| {
            command.apply(source);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemModel;
    use gridbind_core::CoreError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn source_with_rows(count: usize) -> TableDataSource {
        let mut source = TableDataSource::new();
        for i in 0..count {
            source.add_item(ItemModel::new("Cell").with_element_id(format!("row{i}")), None);
        }
        source
    }

    fn record(source: &TableDataSource) -> Arc<Mutex<Vec<String>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let selected = log.clone();
        source
            .signals()
            .item_selected
            .connect(move |e| selected.lock().push(format!("select {}", e.element_id())));
        let deselected = log.clone();
        source
            .signals()
            .item_deselected
            .connect(move |e| deselected.lock().push(format!("deselect {}", e.element_id())));
        log
    }

    #[test]
    fn test_nothing_fires_until_processed() {
        let source = source_with_rows(1);
        let log = record(&source);
        let mut queue = SelectionQueue::new();

        queue.post_select(Coordinate::new(0, 0));
        assert!(log.lock().is_empty());
        assert_eq!(queue.pending_count(), 1);

        queue.process_all(&source);
        assert_eq!(*log.lock(), vec!["select row0"]);
    }

    #[test]
    fn test_fifo_order() {
        let source = source_with_rows(2);
        let log = record(&source);
        let mut queue = SelectionQueue::new();

        queue.post_select(Coordinate::new(0, 1));
        queue.post_deselect(Coordinate::new(0, 1));
        queue.post_select(Coordinate::new(0, 0));
        queue.process_all(&source);

        assert_eq!(
            *log.lock(),
            vec!["select row1", "deselect row1", "select row0"]
        );
    }

    #[test]
    fn test_cancel() {
        let source = source_with_rows(1);
        let log = record(&source);
        let mut queue = SelectionQueue::new();

        let id = queue.post_select(Coordinate::new(0, 0));
        assert_eq!(queue.cancel(id).unwrap(), SelectionCommand::Select(Coordinate::new(0, 0)));
        assert!(matches!(queue.cancel(id), Err(CoreError::UnknownQueueEntry(_))));

        assert_eq!(queue.process_all(&source), 0);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_coordinates_resolved_late() {
        let mut source = source_with_rows(2);
        let log = record(&source);
        let mut queue = SelectionQueue::new();

        queue.post_select(Coordinate::new(0, 0));
        source.remove_item(Coordinate::new(0, 0));
        queue.process_all(&source);

        assert_eq!(*log.lock(), vec!["select row1"]);
    }

    #[test]
    fn test_missing_rows_are_dropped() {
        let source = source_with_rows(1);
        let log = record(&source);
        let mut queue = SelectionQueue::new();

        queue.post_select(Coordinate::new(4, 0));
        assert_eq!(queue.process_all(&source), 1);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_process_batch() {
        let source = source_with_rows(3);
        let mut queue = SelectionQueue::with_batch_size(2);
        for row in 0..3 {
            queue.post_select(Coordinate::new(0, row));
        }

        assert_eq!(queue.process_batch(&source), 2);
        assert_eq!(queue.pending_count(), 1);
        assert_eq!(queue.process_batch(&source), 1);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_command_coordinate() {
        let at = Coordinate::new(1, 2);
        assert_eq!(SelectionCommand::Deselect(at).coordinate(), at);
    }
}
