//! A single section of a `TableDataSource`.
//!
//! A section owns an ordered list of rows plus optional header and footer
//! models. Rows may be hidden; every positional query (`item`, `remove_item`,
//! `insert`, selection) counts visible rows only, and every mutation
//! re-indexes so visible rows are numbered `0..number_of_items()`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLockReadGuard;

use gridbind_core::logging::targets;

use super::item_model::{ItemModel, RowHeight};
use super::signals::SelectionEvent;
use super::table_item::TableItem;
use crate::error::{DataSourceError, Result};

/// A stable identifier for a section, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u64);

impl SectionId {
    /// Get the raw u64 value of this ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_SECTION_ID: AtomicU64 = AtomicU64::new(1);

fn next_section_id() -> SectionId {
    SectionId(NEXT_SECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// An ordered group of rows with optional header and footer models.
///
/// # Example
///
/// ```
/// use gridbind::model::{ItemModel, TableSection};
///
/// let section = TableSection::new()
///     .with_header(ItemModel::new("Header").with_element_id("contacts"))
///     .with_item(ItemModel::new("Cell").with_element_id("alice"))
///     .with_item(ItemModel::new("Cell").with_element_id("bob"));
///
/// assert_eq!(section.number_of_items(), 2);
/// assert_eq!(section.item(1).map(|i| i.row()), Some(1));
/// ```
#[derive(Debug)]
pub struct TableSection {
    id: SectionId,
    items: Vec<TableItem>,
    header: Option<ItemModel>,
    footer: Option<ItemModel>,
    show_section_headers: bool,
    show_section_footers: bool,
    visible: bool,
    index: usize,
    strict_bounds: bool,
}

impl Default for TableSection {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSection {
    /// Creates an empty, visible section.
    ///
    /// Out-of-bounds inserts panic in debug builds; see
    /// [`with_strict_bounds`](Self::with_strict_bounds).
    pub fn new() -> Self {
        Self {
            id: next_section_id(),
            items: Vec::new(),
            header: None,
            footer: None,
            show_section_headers: false,
            show_section_footers: false,
            visible: true,
            index: 0,
            strict_bounds: cfg!(debug_assertions),
        }
    }

    /// Sets the header model.
    pub fn with_header(mut self, header: ItemModel) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the footer model.
    pub fn with_footer(mut self, footer: ItemModel) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets the initial visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Chooses between panicking (`true`) and rejecting with an error
    /// (`false`) when [`insert`](Self::insert) gets a position past the end.
    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    /// Appends a row and returns the section, for chained construction.
    pub fn with_item(mut self, model: ItemModel) -> Self {
        self.add_item(model);
        self
    }

    /// Stable identity that survives re-indexing.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Position of this section among the visible sections of its data source.
    ///
    /// Hidden sections keep the index they had when they were last visible.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the section takes part in display and indexing.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the header is shown.
    pub fn show_section_headers(&self) -> bool {
        self.show_section_headers
    }

    /// Shows or hides the header of this section only.
    pub fn set_show_section_headers(&mut self, show: bool) {
        self.show_section_headers = show;
    }

    /// Whether the footer is shown.
    pub fn show_section_footers(&self) -> bool {
        self.show_section_footers
    }

    /// Shows or hides the footer of this section only.
    pub fn set_show_section_footers(&mut self, show: bool) {
        self.show_section_footers = show;
    }

    /// The header model, if any.
    pub fn header(&self) -> Option<&ItemModel> {
        self.header.as_ref()
    }

    /// Mutable access to the header model.
    pub fn header_mut(&mut self) -> Option<&mut ItemModel> {
        self.header.as_mut()
    }

    /// Replaces the header model.
    pub fn set_header(&mut self, header: Option<ItemModel>) {
        self.header = header;
    }

    /// The footer model, if any.
    pub fn footer(&self) -> Option<&ItemModel> {
        self.footer.as_ref()
    }

    /// Mutable access to the footer model.
    pub fn footer_mut(&mut self) -> Option<&mut ItemModel> {
        self.footer.as_mut()
    }

    /// Replaces the footer model.
    pub fn set_footer(&mut self, footer: Option<ItemModel>) {
        self.footer = footer;
    }

    pub(crate) fn header_matches(&self, element_id: &str) -> bool {
        self.header.as_ref().is_some_and(|h| h.element_id() == element_id)
    }

    pub(crate) fn footer_matches(&self, element_id: &str) -> bool {
        self.footer.as_ref().is_some_and(|f| f.element_id() == element_id)
    }

    /// Height the adapter should reserve for the header.
    ///
    /// Zero while headers are hidden; the header's fixed height if it has
    /// one; otherwise the container decides.
    pub fn header_height(&self) -> RowHeight {
        supplementary_height(self.show_section_headers, self.header.as_ref())
    }

    /// Height the adapter should reserve for the footer. Same rules as
    /// [`header_height`](Self::header_height).
    pub fn footer_height(&self) -> RowHeight {
        supplementary_height(self.show_section_footers, self.footer.as_ref())
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Creates a row for `model`, appends it after every existing row
    /// (hidden ones included) and returns it.
    pub fn add_item(&mut self, model: ItemModel) -> TableItem {
        let item = TableItem::with_position(model, self.items.len(), self.index);
        self.items.push(item.clone());
        self.reindex_items();
        tracing::debug!(target: targets::SECTION, section = self.index, row = item.row(), "added item");
        item
    }

    /// Inserts an existing row at a position among the visible rows.
    ///
    /// `None` appends. A position equal to the visible count also appends.
    ///
    /// # Panics
    ///
    /// A position past the visible count is a caller bug. With strict bounds
    /// this panics; otherwise the section is left unchanged and
    /// [`DataSourceError::IndexOutOfBounds`] is returned.
    pub fn insert(&mut self, item: TableItem, at: Option<usize>) -> Result<()> {
        let position = match at {
            None => self.items.len(),
            Some(at) => match self.storage_position(at) {
                Some(position) => position,
                None => return Err(out_of_bounds(self.strict_bounds, at, self.number_of_items())),
            },
        };

        self.items.insert(position, item);
        self.reindex_items();
        tracing::debug!(target: targets::SECTION, section = self.index, position, "inserted item");
        Ok(())
    }

    /// Removes the visible row at `at`.
    pub fn remove_item(&mut self, at: usize) -> Option<TableItem> {
        let position = self.visible_storage_position(at)?;
        let item = self.items.remove(position);
        self.reindex_items();
        tracing::debug!(target: targets::SECTION, section = self.index, row = at, "removed item");
        Some(item)
    }

    /// Removes the *last* row whose model has `element_id`, visible or not.
    pub fn remove_item_by_element_id(&mut self, element_id: &str) -> Option<TableItem> {
        let position = self
            .items
            .iter()
            .rposition(|item| item.model().element_id() == element_id)?;
        let item = self.items.remove(position);
        self.reindex_items();
        tracing::debug!(target: targets::SECTION, section = self.index, element_id, "removed item by element id");
        Some(item)
    }

    /// Removes every row, returning them in order.
    ///
    /// No data source signals fire; use
    /// [`TableDataSource::remove_all_items`](crate::model::TableDataSource::remove_all_items)
    /// when observers must see the rows go.
    pub fn remove_all_items(&mut self) -> Vec<TableItem> {
        std::mem::take(&mut self.items)
    }

    /// Shows or hides a row of this section and re-indexes.
    ///
    /// Returns `false` if the row does not belong to this section.
    pub fn set_item_visible(&mut self, item: &TableItem, visible: bool) -> bool {
        if !self.contains(item) {
            return false;
        }
        item.set_visible(visible);
        self.reindex_items();
        true
    }

    /// Renumbers visible rows `0..n` in list order.
    ///
    /// Hidden rows keep their previous coordinates.
    pub fn reindex_items(&self) {
        for (row, item) in self.visible_items().enumerate() {
            item.reposition(row, self.index);
        }
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_strict_bounds(&mut self, strict: bool) {
        self.strict_bounds = strict;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All rows, hidden ones included.
    pub fn items(&self) -> &[TableItem] {
        &self.items
    }

    /// Visible rows in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &TableItem> + '_ {
        self.items.iter().filter(|item| item.is_visible())
    }

    /// Number of visible rows.
    pub fn number_of_items(&self) -> usize {
        self.visible_items().count()
    }

    /// Whether `item` is one of this section's rows, visible or not.
    pub fn contains(&self, item: &TableItem) -> bool {
        self.items.iter().any(|i| i.ptr_eq(item))
    }

    /// Visible row offset of `item`, or `None` if it is hidden or not here.
    pub(crate) fn visible_row_of(&self, item: &TableItem) -> Option<usize> {
        self.visible_items().position(|i| i.ptr_eq(item))
    }

    /// The visible row at `at`, or `None` when out of range.
    pub fn item(&self, at: usize) -> Option<&TableItem> {
        self.visible_items().nth(at)
    }

    /// Read access to the model of the visible row at `at`.
    pub fn model(&self, at: usize) -> Option<RwLockReadGuard<'_, ItemModel>> {
        self.item(at).map(TableItem::model)
    }

    /// Cached cell height of the visible row at `at`, or 0.
    pub fn item_height(&self, at: usize) -> f64 {
        self.item(at).map_or(0.0, TableItem::cell_height)
    }

    /// Live height of the visible row at `at`, honouring collapse state.
    pub fn row_height(&self, at: usize) -> RowHeight {
        self.item(at)
            .map_or(RowHeight::Automatic, |item| item.model().effective_height())
    }

    /// Fires the selection signal of the visible row at `at`.
    pub fn fire_select(&self, at: usize) -> Option<SelectionEvent> {
        self.item(at).map(TableItem::fire_select)
    }

    /// Fires the deselection signal of the visible row at `at`.
    pub fn fire_deselect(&self, at: usize) -> Option<SelectionEvent> {
        self.item(at).map(TableItem::fire_deselect)
    }

    /// Maps a visible offset to a position in the full list. The visible
    /// count itself maps to the end of the list.
    fn storage_position(&self, at: usize) -> Option<usize> {
        if at == self.number_of_items() {
            return Some(self.items.len());
        }
        self.visible_storage_position(at)
    }

    fn visible_storage_position(&self, at: usize) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible())
            .nth(at)
            .map(|(position, _)| position)
    }
}

/// Handles an insert position past `len` visible rows: panics when `strict`,
/// otherwise logs a warning and returns the error for the caller to propagate.
pub(crate) fn out_of_bounds(strict: bool, index: usize, len: usize) -> DataSourceError {
    if strict {
        panic!("gridbind: inserting item at index {index}, but the section holds {len} visible items");
    }
    tracing::warn!(target: targets::SECTION, index, len, "rejected out-of-bounds insert");
    DataSourceError::IndexOutOfBounds { index, len }
}

fn supplementary_height(shown: bool, model: Option<&ItemModel>) -> RowHeight {
    if !shown {
        return RowHeight::Fixed(0.0);
    }
    match model.and_then(ItemModel::cell_height) {
        Some(height) => RowHeight::Fixed(height),
        None => RowHeight::Automatic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn cell(id: &str) -> ItemModel {
        ItemModel::new("Cell").with_element_id(id)
    }

    fn visible_rows(section: &TableSection) -> Vec<usize> {
        section.visible_items().map(TableItem::row).collect()
    }

    fn visible_ids(section: &TableSection) -> Vec<String> {
        section.visible_items().map(TableItem::element_id).collect()
    }

    #[test]
    fn test_add_item_appends_and_indexes() {
        let mut section = TableSection::new();
        let first = section.add_item(cell("a"));
        let second = section.add_item(cell("b"));

        assert_eq!(first.row(), 0);
        assert_eq!(second.row(), 1);
        assert_eq!(section.number_of_items(), 2);
    }

    #[test]
    fn test_insert_at_position() {
        let mut section = TableSection::new().with_item(cell("a")).with_item(cell("c"));
        let b = TableItem::new(cell("b"));

        section.insert(b.clone(), Some(1)).unwrap();

        assert_eq!(visible_ids(&section), vec!["a", "b", "c"]);
        assert_eq!(b.row(), 1);
        assert_eq!(visible_rows(&section), vec![0, 1, 2]);
    }

    #[test]
    fn test_insert_none_and_at_count_append() {
        let mut section = TableSection::new().with_item(cell("a"));
        section.insert(TableItem::new(cell("b")), None).unwrap();
        section.insert(TableItem::new(cell("c")), Some(2)).unwrap();
        assert_eq!(visible_ids(&section), vec!["a", "b", "c"]);
    }

    #[test]
    #[should_panic(expected = "inserting item at index 3")]
    fn test_insert_out_of_bounds_strict_panics() {
        let mut section = TableSection::new().with_strict_bounds(true).with_item(cell("a"));
        let _ = section.insert(TableItem::new(cell("b")), Some(3));
    }

    #[test]
    fn test_insert_out_of_bounds_lenient_rejects() {
        let mut section = TableSection::new().with_strict_bounds(false).with_item(cell("a"));
        let err = section.insert(TableItem::new(cell("b")), Some(3)).unwrap_err();

        assert!(matches!(err, DataSourceError::IndexOutOfBounds { index: 3, len: 1 }));
        assert_eq!(section.number_of_items(), 1);
    }

    #[test]
    fn test_insert_counts_visible_rows_only() {
        let mut section = TableSection::new()
            .with_item(cell("a"))
            .with_item(cell("hidden"))
            .with_item(cell("c"));
        let hidden = section.items()[1].clone();
        section.set_item_visible(&hidden, false);

        section.insert(TableItem::new(cell("b")), Some(1)).unwrap();

        assert_eq!(visible_ids(&section), vec!["a", "b", "c"]);
        assert_eq!(visible_rows(&section), vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_item_by_visible_offset() {
        let mut section = TableSection::new()
            .with_item(cell("a"))
            .with_item(cell("b"))
            .with_item(cell("c"));
        let a = section.items()[0].clone();
        section.set_item_visible(&a, false);

        let removed = section.remove_item(0).unwrap();
        assert_eq!(removed.element_id(), "b");
        assert_eq!(visible_ids(&section), vec!["c"]);
        assert_eq!(visible_rows(&section), vec![0]);
        assert!(section.remove_item(5).is_none());
    }

    #[test]
    fn test_remove_by_element_id_takes_last_match() {
        let mut section = TableSection::new();
        let first = section.add_item(cell("dup"));
        section.add_item(cell("other"));
        let last = section.add_item(cell("dup"));

        let removed = section.remove_item_by_element_id("dup").unwrap();
        assert!(removed.ptr_eq(&last));
        assert!(section.contains(&first));
        assert!(section.remove_item_by_element_id("missing").is_none());
        assert_eq!(visible_rows(&section), vec![0, 1]);
    }

    #[test]
    fn test_hidden_items_keep_stale_index() {
        let mut section = TableSection::new()
            .with_item(cell("a"))
            .with_item(cell("b"))
            .with_item(cell("c"));
        let b = section.items()[1].clone();

        section.set_item_visible(&b, false);
        section.remove_item(0);

        assert_eq!(b.row(), 1);
        assert_eq!(section.item(0).map(TableItem::element_id), Some("c".to_string()));
        assert_eq!(section.number_of_items(), 1);
    }

    #[test]
    fn test_item_lookup_out_of_range() {
        let section = TableSection::new().with_item(cell("a"));
        assert!(section.item(1).is_none());
        assert!(section.model(7).is_none());
        assert_eq!(section.item_height(3), 0.0);
        assert!(section.fire_select(2).is_none());
    }

    #[test]
    fn test_item_height_uses_snapshot() {
        let section = TableSection::new().with_item(cell("a").with_cell_height(50.0));
        section.item(0).unwrap().model_mut().set_cell_height(Some(90.0));

        assert_eq!(section.item_height(0), 50.0);
        assert_eq!(section.row_height(0), RowHeight::Fixed(90.0));
    }

    #[test]
    fn test_fire_select_routes_to_visible_row() {
        let section = TableSection::new().with_item(cell("a")).with_item(cell("b"));
        let event = section.fire_select(1).unwrap();
        assert_eq!(event.coordinate, Coordinate::new(0, 1));
        assert_eq!(event.element_id(), "b");
    }

    #[test]
    fn test_header_footer_heights() {
        let mut section = TableSection::new()
            .with_header(ItemModel::new("Header").with_cell_height(28.0))
            .with_footer(ItemModel::new("Footer"));

        assert_eq!(section.header_height(), RowHeight::Fixed(0.0));

        section.set_show_section_headers(true);
        section.set_show_section_footers(true);
        assert_eq!(section.header_height(), RowHeight::Fixed(28.0));
        assert_eq!(section.footer_height(), RowHeight::Automatic);
    }

    #[test]
    fn test_element_id_matching() {
        let section = TableSection::new()
            .with_header(ItemModel::new("Header").with_element_id("h"))
            .with_footer(ItemModel::new("Footer").with_element_id("f"));
        assert!(section.header_matches("h"));
        assert!(!section.header_matches("f"));
        assert!(section.footer_matches("f"));
    }

    #[test]
    fn test_remove_all_items() {
        let mut section = TableSection::new().with_item(cell("a")).with_item(cell("b"));
        let removed = section.remove_all_items();
        assert_eq!(removed.len(), 2);
        assert_eq!(section.number_of_items(), 0);
    }

    #[test]
    fn test_set_item_visible_foreign_item() {
        let mut section = TableSection::new().with_item(cell("a"));
        let stranger = TableItem::new(cell("x"));
        assert!(!section.set_item_visible(&stranger, false));
        assert!(stranger.is_visible());
    }

    #[test]
    fn test_section_ids_unique() {
        assert_ne!(TableSection::new().id(), TableSection::new().id());
    }
}
