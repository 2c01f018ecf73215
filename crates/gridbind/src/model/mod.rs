//! Table data model.
//!
//! A [`TableDataSource`] owns an ordered list of [`TableSection`]s, each of
//! which owns an ordered list of [`TableItem`] rows wrapping an
//! [`ItemModel`]. Adapters address rows by [`Coordinate`] and learn about
//! changes through [`DataSourceSignals`].
//!
//! # Core Types
//!
//! - `ItemModel`: What a row displays, plus its optional capabilities
//!   (collapse, validation) and its selection signals
//! - `TableItem`: Shared handle to a row that tracks its own coordinate
//! - `TableSection`: Rows plus optional header and footer models
//! - `TableDataSource`: Sections, visibility, selection and validation
//!
//! # Visibility
//!
//! Sections and rows can be hidden without being removed. Hidden entries
//! keep their last coordinate but are skipped by every coordinate-based
//! query, and the visible ones are renumbered densely.
//!
//! ```text
//! storage:  [a] [b*] [c]        (* hidden)
//! visible:  (0,0)=a  (0,1)=c
//! ```
//!
//! # Example
//!
//! ```
//! use gridbind::model::{Coordinate, ItemModel, TableDataSource};
//!
//! let mut source = TableDataSource::new();
//! let item = source.add_item(ItemModel::new("Cell").with_element_id("email"), None);
//!
//! item.model().on_select(|event| {
//!     println!("selected {} at {}", event.element_id(), event.coordinate);
//! });
//!
//! source.select_item(Coordinate::new(0, 0));
//! ```

mod coordinate;
mod data_source;
mod item_model;
mod section;
mod signals;
mod table_item;

pub use coordinate::Coordinate;
pub use data_source::{TableDataSource, VisibilityChange};
pub use item_model::{Collapse, Evaluator, ItemModel, ItemSignals, RowAction, RowHeight};
pub use section::{SectionId, TableSection};
pub use signals::{DataSourceSignals, SelectionEvent};
pub use table_item::TableItem;
