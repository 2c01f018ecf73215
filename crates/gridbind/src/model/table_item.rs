//! Positional wrapper around an `ItemModel`.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gridbind_core::logging::targets;

use super::coordinate::Coordinate;
use super::item_model::ItemModel;
use super::signals::SelectionEvent;

struct ItemState {
    row: usize,
    section: usize,
    visible: bool,
    cell_height: f64,
}

struct ItemInner {
    model: RwLock<ItemModel>,
    state: Mutex<ItemState>,
}

/// A row of a `TableSection`.
///
/// `TableItem` is a cheap, cloneable handle: clones refer to the same row,
/// and equality is identity. The row keeps its coordinate up to date as the
/// owning section re-indexes, so a handle returned by
/// [`TableSection::add_item`](super::TableSection::add_item) can be asked for
/// its position later.
///
/// # Example
///
/// ```
/// use gridbind::model::{Coordinate, ItemModel, TableItem};
///
/// let item = TableItem::with_position(ItemModel::new("Cell"), 2, 1);
/// assert_eq!(item.coordinate(), Coordinate::new(1, 2));
/// assert!(item.is_visible());
/// ```
#[derive(Clone)]
pub struct TableItem {
    inner: Arc<ItemInner>,
}

impl TableItem {
    /// Wraps a model at coordinate `(0, 0)`.
    pub fn new(model: ItemModel) -> Self {
        Self::with_position(model, 0, 0)
    }

    /// Wraps a model at the given row and section.
    ///
    /// The model's fixed height (or 0) is captured here and is not updated
    /// when the model changes later.
    pub fn with_position(model: ItemModel, row: usize, section: usize) -> Self {
        let cell_height = model.cell_height().unwrap_or(0.0);
        Self {
            inner: Arc::new(ItemInner {
                model: RwLock::new(model),
                state: Mutex::new(ItemState {
                    row,
                    section,
                    visible: true,
                    cell_height,
                }),
            }),
        }
    }

    /// Returns the current `(section, row)` address of this item.
    pub fn coordinate(&self) -> Coordinate {
        let state = self.inner.state.lock();
        Coordinate::new(state.section, state.row)
    }

    pub fn row(&self) -> usize {
        self.inner.state.lock().row
    }

    pub fn section(&self) -> usize {
        self.inner.state.lock().section
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.lock().visible
    }

    /// Height captured from the model when this item was created, 0 if none.
    pub fn cell_height(&self) -> f64 {
        self.inner.state.lock().cell_height
    }

    /// Re-captures the cell height from the model.
    pub fn refresh_cell_height(&self) {
        let height = self.model().cell_height().unwrap_or(0.0);
        self.inner.state.lock().cell_height = height;
    }

    /// Read access to the wrapped model.
    pub fn model(&self) -> RwLockReadGuard<'_, ItemModel> {
        self.inner.model.read()
    }

    /// Write access to the wrapped model.
    pub fn model_mut(&self) -> RwLockWriteGuard<'_, ItemModel> {
        self.inner.model.write()
    }

    pub fn element_id(&self) -> String {
        self.model().element_id().to_owned()
    }

    /// Returns `true` if both handles refer to the same row.
    pub fn ptr_eq(&self, other: &TableItem) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Emits the model's `selected` signal with this item's coordinate.
    ///
    /// Nothing is stored: selection is an event, not item state.
    pub fn fire_select(&self) -> SelectionEvent {
        let event = self.selection_event();
        let signals = self.model().signals_handle();
        tracing::trace!(target: targets::SECTION, coordinate = %event.coordinate, "firing select");
        signals.selected.emit(event.clone());
        event
    }

    /// Emits the model's `deselected` signal with this item's coordinate.
    pub fn fire_deselect(&self) -> SelectionEvent {
        let event = self.selection_event();
        let signals = self.model().signals_handle();
        tracing::trace!(target: targets::SECTION, coordinate = %event.coordinate, "firing deselect");
        signals.deselected.emit(event.clone());
        event
    }

    fn selection_event(&self) -> SelectionEvent {
        SelectionEvent {
            coordinate: self.coordinate(),
            item: self.clone(),
        }
    }

    pub(crate) fn reposition(&self, row: usize, section: usize) {
        let mut state = self.inner.state.lock();
        state.row = row;
        state.section = section;
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.inner.state.lock().visible = visible;
    }
}

impl PartialEq for TableItem {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TableItem {}

impl fmt::Debug for TableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("TableItem")
            .field("section", &state.section)
            .field("row", &state.row)
            .field("visible", &state.visible)
            .field("cell_height", &state.cell_height)
            .field("model", &*self.inner.model.read())
            .finish()
    }
}
