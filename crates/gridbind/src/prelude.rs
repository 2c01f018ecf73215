//! Prelude module for gridbind.
//!
//! ```ignore
//! use gridbind::prelude::*;
//! ```

// ============================================================================
// Signals
// ============================================================================

pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    Coordinate, DataSourceSignals, ItemModel, RowAction, RowHeight, SectionId, SelectionEvent,
    TableDataSource, TableItem, TableSection, VisibilityChange,
};

// ============================================================================
// Errors and Configuration
// ============================================================================

pub use crate::config::DataSourceConfig;
pub use crate::error::{DataSourceError, ValidationError};

// ============================================================================
// Dispatch
// ============================================================================

pub use crate::dispatch::{SelectionCommand, SelectionQueue};
