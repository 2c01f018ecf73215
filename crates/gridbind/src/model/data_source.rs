//! The top-level coordinator: an ordered list of sections.
//!
//! `TableDataSource` is what a list/grid adapter talks to. It answers
//! "how many sections, how many rows, which model at this coordinate",
//! routes select/deselect events and runs validation passes.
//!
//! # Coordinates
//!
//! Every query that takes a [`Coordinate`] or a section position counts
//! *visible* sections and *visible* rows only. Positions passed to the
//! inserting operations (`add_item`, `insert_item`, `add_section`,
//! `insert_section`) address the full section list, and grow it with empty
//! sections when they point past its end.
//!
//! # Example
//!
//! ```
//! use gridbind::model::{Coordinate, ItemModel, TableDataSource};
//!
//! let mut source = TableDataSource::new();
//! source.add_item(ItemModel::new("Cell").with_element_id("first"), None);
//! source.add_item(ItemModel::new("Cell").with_element_id("third"), Some(2));
//!
//! assert_eq!(source.number_of_sections(), 3);
//! assert_eq!(source.number_of_items(1), 0);
//! assert_eq!(
//!     source.model(Coordinate::new(2, 0)).map(|m| m.element_id().to_owned()),
//!     Some("third".to_string())
//! );
//! ```

use parking_lot::RwLockReadGuard;

use gridbind_core::logging::{span_names, targets};
use gridbind_core::PerfSpan;

use super::coordinate::Coordinate;
use super::item_model::{ItemModel, RowHeight};
use super::section::{out_of_bounds, SectionId, TableSection};
use super::signals::{DataSourceSignals, SelectionEvent};
use super::table_item::TableItem;
use crate::config::DataSourceConfig;
use crate::error::{Result, ValidationError, ValidationFailure};

/// Coordinates an adapter has to insert and delete after a visibility change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Rows that appeared, at their new coordinates.
    pub inserted: Vec<Coordinate>,
    /// Rows that disappeared, at the coordinates they had before.
    pub removed: Vec<Coordinate>,
}

impl VisibilityChange {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// An ordered collection of [`TableSection`]s.
#[derive(Debug)]
pub struct TableDataSource {
    sections: Vec<TableSection>,
    config: DataSourceConfig,
    signals: DataSourceSignals,
}

impl Default for TableDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDataSource {
    /// Creates an empty data source with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DataSourceConfig::default())
    }

    /// Creates an empty data source with the given configuration.
    pub fn with_config(config: DataSourceConfig) -> Self {
        Self {
            sections: Vec::new(),
            config,
            signals: DataSourceSignals::new(),
        }
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// Returns the signals for this data source.
    pub fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    pub fn show_section_headers(&self) -> bool {
        self.config.show_section_headers
    }

    /// Sets the header flag on every section that exists right now.
    ///
    /// This is a one-shot broadcast, not a binding: sections changed
    /// individually afterwards keep their own value, and sections created
    /// later start from the value set here.
    pub fn set_show_section_headers(&mut self, show: bool) {
        self.config.show_section_headers = show;
        for section in &mut self.sections {
            section.set_show_section_headers(show);
        }
        tracing::debug!(target: targets::DATA_SOURCE, show, "broadcast section header flag");
        self.signals.layout_changed.emit(());
    }

    pub fn show_section_footers(&self) -> bool {
        self.config.show_section_footers
    }

    /// Footer counterpart of [`set_show_section_headers`](Self::set_show_section_headers).
    pub fn set_show_section_footers(&mut self, show: bool) {
        self.config.show_section_footers = show;
        for section in &mut self.sections {
            section.set_show_section_footers(show);
        }
        tracing::debug!(target: targets::DATA_SOURCE, show, "broadcast section footer flag");
        self.signals.layout_changed.emit(());
    }

    pub fn show_table_header(&self) -> bool {
        self.config.show_table_header
    }

    pub fn set_show_table_header(&mut self, show: bool) {
        self.config.show_table_header = show;
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Creates a row for `model` and appends it to a section.
    ///
    /// With `to_section == None` the row goes into the last section, which
    /// is created if there is none. A position past the end first fills the
    /// gap with empty sections.
    pub fn add_item(&mut self, model: ItemModel, to_section: Option<usize>) -> TableItem {
        let position = self.ensure_section(to_section);
        let item = self.sections[position].add_item(model);
        self.notify_item_inserted(position, &item);
        item
    }

    /// Inserts an existing row into a section.
    ///
    /// Section selection works like [`add_item`](Self::add_item); the row
    /// position is handled by [`TableSection::insert`], including its
    /// out-of-bounds policy. The row position is checked before any empty
    /// sections are created, so a rejected insert changes nothing.
    pub fn insert_item(
        &mut self,
        item: TableItem,
        at_row: Option<usize>,
        in_section: Option<usize>,
    ) -> Result<()> {
        if let Some(at) = at_row {
            let target = in_section.unwrap_or_else(|| self.sections.len().saturating_sub(1));
            if target >= self.sections.len() && at > 0 {
                return Err(out_of_bounds(self.config.strict_bounds, at, 0));
            }
        }
        let position = self.ensure_section(in_section);
        self.sections[position].insert(item.clone(), at_row)?;
        self.notify_item_inserted(position, &item);
        Ok(())
    }

    /// Removes the row at a visible coordinate.
    pub fn remove_item(&mut self, at: Coordinate) -> Option<TableItem> {
        let item = self.section_mut(at.section)?.remove_item(at.row)?;
        self.signals.items_removed.emit(at);
        Some(item)
    }

    /// Removes every row of the visible section at `section`.
    ///
    /// `items_removed` fires once per visible row, last row first, so each
    /// coordinate is still valid when it is reported.
    pub fn remove_all_items(&mut self, section: usize) -> Vec<TableItem> {
        let Some(target) = self.section_mut(section) else {
            return Vec::new();
        };
        let visible_rows = target.number_of_items();
        let removed = target.remove_all_items();
        for row in (0..visible_rows).rev() {
            self.signals.items_removed.emit(Coordinate::new(section, row));
        }
        tracing::debug!(target: targets::DATA_SOURCE, section, count = removed.len(), "removed all items");
        removed
    }

    /// Shows or hides a row and reports the coordinates that changed.
    ///
    /// A row shared by several sections changes in all of them, and every
    /// one of those sections is re-indexed. Rows in hidden sections change
    /// state without producing coordinates.
    pub fn set_item_visible(&mut self, item: &TableItem, visible: bool) -> VisibilityChange {
        let mut change = VisibilityChange::default();
        if item.is_visible() == visible {
            return change;
        }
        let containing: Vec<usize> = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(item))
            .map(|(position, _)| position)
            .collect();
        if containing.is_empty() {
            return change;
        }

        if !visible {
            change.removed = self.visible_coordinates_of(item, &containing);
        }
        for &position in &containing {
            self.sections[position].set_item_visible(item, visible);
        }
        if visible {
            change.inserted = self.visible_coordinates_of(item, &containing);
        }

        tracing::debug!(target: targets::DATA_SOURCE, visible, ?change, "item visibility changed");
        self.signals.layout_changed.emit(());
        change
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Creates a section and inserts it at `at` (appending when `None`).
    ///
    /// The new section starts with the data source's current header and
    /// footer flags.
    pub fn add_section(
        &mut self,
        header: Option<ItemModel>,
        footer: Option<ItemModel>,
        at: Option<usize>,
    ) -> &mut TableSection {
        let position = self.fill_to(at);
        let mut section = TableSection::new().with_strict_bounds(self.config.strict_bounds);
        section.set_header(header);
        section.set_footer(footer);
        section.set_show_section_headers(self.config.show_section_headers);
        section.set_show_section_footers(self.config.show_section_footers);
        self.place_section(position, section);
        &mut self.sections[position]
    }

    /// Inserts an existing section at `at` (appending when `None`).
    ///
    /// The section keeps its own header/footer flags and adopts the data
    /// source's bounds policy.
    pub fn insert_section(&mut self, mut section: TableSection, at: Option<usize>) -> SectionId {
        let position = self.fill_to(at);
        section.set_strict_bounds(self.config.strict_bounds);
        let id = section.id();
        self.place_section(position, section);
        id
    }

    /// Removes the section with the given id.
    pub fn remove_section(&mut self, id: SectionId) -> Option<TableSection> {
        let position = self.sections.iter().position(|s| s.id() == id)?;
        Some(self.take_section(position))
    }

    /// Removes a section whose header or footer model carries `element_id`.
    ///
    /// Sections are scanned from the last to the first; within a section the
    /// header is checked before the footer. Only the first hit is removed.
    pub fn remove_section_by_element_id(&mut self, element_id: &str) -> Option<TableSection> {
        let position = self
            .sections
            .iter()
            .rposition(|s| s.header_matches(element_id) || s.footer_matches(element_id))?;
        Some(self.take_section(position))
    }

    /// Shows or hides a section and re-indexes.
    ///
    /// Returns `false` if no section has this id.
    pub fn set_section_visible(&mut self, id: SectionId, visible: bool) -> bool {
        let Some(section) = self.section_by_id_mut(id) else {
            return false;
        };
        section.set_visible(visible);
        self.reindex();
        tracing::debug!(target: targets::DATA_SOURCE, section = %id, visible, "section visibility changed");
        self.signals.layout_changed.emit(());
        true
    }

    /// The visible section at `at`.
    pub fn section(&self, at: usize) -> Option<&TableSection> {
        self.visible_sections().nth(at)
    }

    /// Mutable access to the visible section at `at`.
    pub fn section_mut(&mut self, at: usize) -> Option<&mut TableSection> {
        self.sections.iter_mut().filter(|s| s.is_visible()).nth(at)
    }

    pub fn section_by_id(&self, id: SectionId) -> Option<&TableSection> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn section_by_id_mut(&mut self, id: SectionId) -> Option<&mut TableSection> {
        self.sections.iter_mut().find(|s| s.id() == id)
    }

    /// Finds a section by the element id of its header or footer.
    ///
    /// Hidden sections are included. A header match anywhere wins over a
    /// footer match; ties go to the earlier section.
    pub fn section_by_element_id(&self, element_id: &str) -> Option<&TableSection> {
        self.sections
            .iter()
            .find(|s| s.header_matches(element_id))
            .or_else(|| self.sections.iter().find(|s| s.footer_matches(element_id)))
    }

    /// All sections, hidden ones included.
    pub fn sections(&self) -> &[TableSection] {
        &self.sections
    }

    /// Renumbers visible sections `0..n`, then re-indexes their rows.
    pub fn reindex(&mut self) {
        let _span = PerfSpan::new(span_names::REINDEX);
        for (index, section) in self.sections.iter_mut().filter(|s| s.is_visible()).enumerate() {
            section.set_index(index);
            section.reindex_items();
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of visible sections.
    pub fn number_of_sections(&self) -> usize {
        self.visible_sections().count()
    }

    /// Number of visible rows in the visible section at `section`, or 0.
    pub fn number_of_items(&self, section: usize) -> usize {
        self.section(section).map_or(0, TableSection::number_of_items)
    }

    pub fn item(&self, at: Coordinate) -> Option<&TableItem> {
        self.section(at.section)?.item(at.row)
    }

    pub fn model(&self, at: Coordinate) -> Option<RwLockReadGuard<'_, ItemModel>> {
        self.item(at).map(TableItem::model)
    }

    /// Cached cell height of the row at `at`, or 0.
    pub fn item_height(&self, at: Coordinate) -> f64 {
        self.section(at.section)
            .map_or(0.0, |section| section.item_height(at.row))
    }

    /// Live height of the row at `at`, honouring its collapse state.
    pub fn row_height(&self, at: Coordinate) -> RowHeight {
        self.section(at.section)
            .map_or(RowHeight::Automatic, |section| section.row_height(at.row))
    }

    /// Header height of the visible section at `section`; zero if missing.
    pub fn header_height(&self, section: usize) -> RowHeight {
        self.section(section)
            .map_or(RowHeight::Fixed(0.0), TableSection::header_height)
    }

    /// Footer height of the visible section at `section`; zero if missing.
    pub fn footer_height(&self, section: usize) -> RowHeight {
        self.section(section)
            .map_or(RowHeight::Fixed(0.0), TableSection::footer_height)
    }

    /// Header model of the visible section at `section`, if headers are shown there.
    pub fn section_header(&self, section: usize) -> Option<&ItemModel> {
        self.section(section)
            .filter(|s| s.show_section_headers())
            .and_then(TableSection::header)
    }

    /// Footer model of the visible section at `section`, if footers are shown there.
    pub fn section_footer(&self, section: usize) -> Option<&ItemModel> {
        self.section(section)
            .filter(|s| s.show_section_footers())
            .and_then(TableSection::footer)
    }

    /// Every row of every section, regardless of visibility.
    pub fn all_items(&self) -> Vec<TableItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items().iter().cloned())
            .collect()
    }

    /// Visible rows of visible sections, in display order.
    pub fn all_visible_items(&self) -> Vec<TableItem> {
        self.visible_sections()
            .flat_map(|s| s.visible_items().cloned())
            .collect()
    }

    /// All rows of the visible section at `section`, hidden rows included.
    pub fn items_in(&self, section: usize) -> Option<&[TableItem]> {
        self.section(section).map(TableSection::items)
    }

    /// Models of every row whose element id matches, regardless of visibility.
    pub fn models_by_element_id(&self, element_id: &str) -> Vec<RwLockReadGuard<'_, ItemModel>> {
        self.sections
            .iter()
            .flat_map(|s| s.items())
            .map(TableItem::model)
            .filter(|model| model.element_id() == element_id)
            .collect()
    }

    /// Every row whose model's element id matches, regardless of visibility.
    pub fn items_by_element_id(&self, element_id: &str) -> Vec<TableItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items())
            .filter(|item| item.model().element_id() == element_id)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Fires the selection signal of the row at `at`, then `item_selected`.
    ///
    /// Returns `None` (and emits nothing) when no row is there.
    pub fn select_item(&self, at: Coordinate) -> Option<SelectionEvent> {
        let event = self.section(at.section)?.fire_select(at.row)?;
        self.signals.item_selected.emit(event.clone());
        Some(event)
    }

    /// Fires the deselection signal of the row at `at`, then `item_deselected`.
    pub fn deselect_item(&self, at: Coordinate) -> Option<SelectionEvent> {
        let event = self.section(at.section)?.fire_deselect(at.row)?;
        self.signals.item_deselected.emit(event.clone());
        Some(event)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Evaluates every visible row and fails with all rows that did not pass.
    pub fn validate_all(&self) -> std::result::Result<(), ValidationError> {
        let _span = PerfSpan::new(span_names::VALIDATION);
        let failures: Vec<ValidationFailure> = self
            .all_visible_items()
            .into_iter()
            .filter_map(evaluate_item)
            .collect();

        if failures.is_empty() {
            return Ok(());
        }
        tracing::debug!(target: targets::VALIDATION, failed = failures.len(), "validation failed");
        Err(ValidationError::new(failures))
    }

    /// Evaluates visible rows in order and fails on the first one that does
    /// not pass.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match self.all_visible_items().into_iter().find_map(evaluate_item) {
            None => Ok(()),
            Some(failure) => {
                tracing::debug!(
                    target: targets::VALIDATION,
                    coordinate = %failure.item.coordinate(),
                    "validation failed"
                );
                Err(ValidationError::new(vec![failure]))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn visible_sections(&self) -> impl Iterator<Item = &TableSection> + '_ {
        self.sections.iter().filter(|s| s.is_visible())
    }

    /// Resolves the target section of an item insert, growing the list as needed.
    fn ensure_section(&mut self, section: Option<usize>) -> usize {
        match section {
            Some(section) => {
                while self.sections.len() <= section {
                    self.add_section(None, None, None);
                }
                section
            }
            None => {
                if self.sections.is_empty() {
                    self.add_section(None, None, None);
                }
                self.sections.len() - 1
            }
        }
    }

    /// Resolves the position of a section insert, filling any gap before it.
    fn fill_to(&mut self, at: Option<usize>) -> usize {
        match at {
            Some(at) => {
                while self.sections.len() < at {
                    self.add_section(None, None, None);
                }
                at
            }
            None => self.sections.len(),
        }
    }

    /// Coordinates of `item` in the visible sections among `positions`.
    fn visible_coordinates_of(&self, item: &TableItem, positions: &[usize]) -> Vec<Coordinate> {
        positions
            .iter()
            .map(|&position| &self.sections[position])
            .filter(|section| section.is_visible())
            .filter_map(|section| {
                section
                    .visible_row_of(item)
                    .map(|row| Coordinate::new(section.index(), row))
            })
            .collect()
    }

    /// Inserts at a list position. The signal carries the visible index and
    /// is skipped for hidden sections.
    fn place_section(&mut self, position: usize, section: TableSection) {
        self.sections.insert(position, section);
        self.reindex();
        let placed = &self.sections[position];
        tracing::debug!(target: targets::DATA_SOURCE, position, id = %placed.id(), "inserted section");
        if placed.is_visible() {
            self.signals.sections_inserted.emit(placed.index());
        }
    }

    fn take_section(&mut self, position: usize) -> TableSection {
        let section = self.sections.remove(position);
        self.reindex();
        tracing::debug!(target: targets::DATA_SOURCE, position, id = %section.id(), "removed section");
        if section.is_visible() {
            self.signals.sections_removed.emit(section.index());
        }
        section
    }

    fn notify_item_inserted(&self, position: usize, item: &TableItem) {
        if self.sections[position].is_visible() && item.is_visible() {
            self.signals.items_inserted.emit(item.coordinate());
        }
    }
}

fn evaluate_item(item: TableItem) -> Option<ValidationFailure> {
    let messages = item.model().evaluate()?;
    Some(ValidationFailure { item, messages })
}
