//! gridbind - a data-binding core for sectioned table views.
//!
//! The crate keeps the rows of a grouped list or table in memory, maps
//! `(section, row)` coordinates to their models, filters hidden rows and
//! sections, and routes selection and validation. Rendering is left to an
//! adapter for whatever UI toolkit is in use.
//!
//! # Example
//!
//! ```
//! use gridbind::prelude::*;
//!
//! let mut source = TableDataSource::new();
//! source.add_item(ItemModel::new("Cell").with_element_id("testId"), None);
//! source.add_item(ItemModel::new("Cell2"), None);
//!
//! assert_eq!(source.number_of_items(0), 2);
//! assert_eq!(
//!     source.model(Coordinate::new(0, 1)).map(|m| m.cell_identifier().to_owned()),
//!     Some("Cell2".to_string())
//! );
//! ```

pub use gridbind_core::*;

pub mod config;
pub mod debug;
pub mod dispatch;
mod error;
pub mod model;
pub mod prelude;

pub use config::DataSourceConfig;
pub use error::{DataSourceError, Result, ValidationError, ValidationFailure};
