//! Change and selection notifications.
//!
//! A data source never calls back into stored closures. It emits signals,
//! and collaborators (usually the UI adapter) connect to the ones they need.

use gridbind_core::Signal;

use super::coordinate::Coordinate;
use super::table_item::TableItem;

/// Payload of a select/deselect notification.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    /// Coordinate of the row at the time of the event.
    pub coordinate: Coordinate,
    /// The row that was (de)selected. Use [`TableItem::model`] to read its model.
    pub item: TableItem,
}

impl SelectionEvent {
    /// Element id of the affected model.
    pub fn element_id(&self) -> String {
        self.item.element_id()
    }
}

/// Collection of signals emitted by a `TableDataSource`.
///
/// - **Selection**: `item_selected`, `item_deselected`
/// - **Rows**: `items_inserted`, `items_removed`
/// - **Sections**: `sections_inserted`, `sections_removed`
/// - **Everything else** (visibility, header flags): `layout_changed`
#[derive(Debug, Default)]
pub struct DataSourceSignals {
    /// Emitted after a row's own selection signal fired.
    pub item_selected: Signal<SelectionEvent>,

    /// Emitted after a row's own deselection signal fired.
    pub item_deselected: Signal<SelectionEvent>,

    /// Emitted after an item was inserted.
    /// Args: coordinate of the new row
    pub items_inserted: Signal<Coordinate>,

    /// Emitted after an item was removed.
    /// Args: coordinate the row had before removal
    pub items_removed: Signal<Coordinate>,

    /// Emitted after a visible section was inserted.
    /// Args: visible index of the new section
    pub sections_inserted: Signal<usize>,

    /// Emitted after a visible section was removed.
    /// Args: visible index the section had before removal
    pub sections_removed: Signal<usize>,

    /// Emitted after a visibility or header/footer flag change.
    pub layout_changed: Signal<()>,
}

impl DataSourceSignals {
    /// Creates a new set of data source signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks or unblocks every structural signal at once.
    ///
    /// Selection signals are left alone.
    pub fn set_structure_blocked(&self, blocked: bool) {
        self.items_inserted.set_blocked(blocked);
        self.items_removed.set_blocked(blocked);
        self.sections_inserted.set_blocked(blocked);
        self.sections_removed.set_blocked(blocked);
        self.layout_changed.set_blocked(blocked);
    }
}
