//! Human-readable dumps of a data source.
//!
//! ```
//! use gridbind::debug::{DataSourceTreeDebug, TreeFormatOptions, TreeStyle};
//! use gridbind::model::{ItemModel, TableDataSource};
//!
//! let mut source = TableDataSource::new();
//! source.add_item(ItemModel::new("Cell").with_element_id("name"), None);
//!
//! let options = TreeFormatOptions { style: TreeStyle::Ascii, ..Default::default() };
//! let dump = DataSourceTreeDebug::with_options(&source, options).to_string();
//! assert!(dump.contains("name"));
//! ```

use std::fmt::{self, Write};

use crate::model::{TableDataSource, TableItem, TableSection};

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Dashes only, no vertical guides.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to prefix rows with their `(section, row)` coordinate.
    pub show_coordinates: bool,
    /// Whether to show the cell identifier of each model.
    pub show_cell_identifiers: bool,
    /// Whether hidden sections and rows are listed (marked `hidden`).
    pub show_hidden: bool,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_coordinates: true,
            show_cell_identifiers: true,
            show_hidden: false,
        }
    }
}

impl TreeFormatOptions {
    /// Everything, including hidden sections and rows.
    pub fn detailed() -> Self {
        Self {
            show_hidden: true,
            ..Default::default()
        }
    }

    /// Element ids only.
    pub fn minimal() -> Self {
        Self {
            show_coordinates: false,
            show_cell_identifiers: false,
            ..Default::default()
        }
    }
}

/// Renders the section/row hierarchy of a [`TableDataSource`] via `Display`.
#[derive(Debug, Clone)]
pub struct DataSourceTreeDebug<'a> {
    source: &'a TableDataSource,
    options: TreeFormatOptions,
}

impl<'a> DataSourceTreeDebug<'a> {
    pub fn new(source: &'a TableDataSource) -> Self {
        Self::with_options(source, TreeFormatOptions::default())
    }

    pub fn with_options(source: &'a TableDataSource, options: TreeFormatOptions) -> Self {
        Self { source, options }
    }

    fn connectors(&self) -> (&'static str, &'static str, &'static str) {
        match self.options.style {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("  ", "- ", "- "),
        }
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        section: &TableSection,
        is_last: bool,
    ) -> fmt::Result {
        let (branch, tee, corner) = self.connectors();
        f.write_str(if is_last { corner } else { tee })?;
        write!(f, "Section {}", section.id())?;
        if section.is_visible() {
            write!(f, " [{}]", section.index())?;
        } else {
            f.write_str(" hidden")?;
        }
        if let Some(header) = section.header() {
            write!(f, " header={}", header.element_id())?;
        }
        if let Some(footer) = section.footer() {
            write!(f, " footer={}", footer.element_id())?;
        }
        f.write_char('\n')?;

        let rows: Vec<&TableItem> = section
            .items()
            .iter()
            .filter(|item| self.options.show_hidden || item.is_visible())
            .collect();
        // Compact output has no guides, only indentation.
        let indent = match self.options.style {
            TreeStyle::Compact => "  ",
            _ if is_last => "    ",
            _ => branch,
        };
        let row_count = rows.len();
        for (i, item) in rows.into_iter().enumerate() {
            f.write_str(indent)?;
            f.write_str(if i + 1 == row_count { corner } else { tee })?;
            self.write_item(f, item)?;
        }
        Ok(())
    }

    fn write_item(&self, f: &mut fmt::Formatter<'_>, item: &TableItem) -> fmt::Result {
        if self.options.show_coordinates && item.is_visible() {
            write!(f, "{} ", item.coordinate())?;
        }
        let model = item.model();
        f.write_str(model.element_id())?;
        if self.options.show_cell_identifiers {
            write!(f, " ({})", model.cell_identifier())?;
        }
        if !item.is_visible() {
            f.write_str(" hidden")?;
        }
        f.write_char('\n')
    }
}

impl fmt::Display for DataSourceTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: Vec<&TableSection> = self
            .source
            .sections()
            .iter()
            .filter(|s| self.options.show_hidden || s.is_visible())
            .collect();

        writeln!(
            f,
            "TableDataSource ({} sections, {} items):",
            self.source.number_of_sections(),
            self.source.all_visible_items().len()
        )?;
        if sections.is_empty() {
            return writeln!(f, "  (empty)");
        }

        let count = sections.len();
        for (i, section) in sections.into_iter().enumerate() {
            self.write_section(f, section, i + 1 == count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemModel;

    fn sample() -> TableDataSource {
        let mut source = TableDataSource::new();
        source.add_section(Some(ItemModel::new("Header").with_element_id("h")), None, None);
        source.add_item(ItemModel::new("Cell").with_element_id("a"), None);
        let hidden = source.add_item(ItemModel::new("Cell").with_element_id("b"), None);
        source.set_item_visible(&hidden, false);
        source
    }

    #[test]
    fn test_empty() {
        let source = TableDataSource::new();
        let dump = DataSourceTreeDebug::new(&source).to_string();
        assert_eq!(dump, "TableDataSource (0 sections, 0 items):\n  (empty)\n");
    }

    #[test]
    fn test_ascii_layout() {
        let source = sample();
        let id = source.sections()[0].id();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..Default::default()
        };
        let dump = DataSourceTreeDebug::with_options(&source, options).to_string();

        let expected = format!(
            "TableDataSource (1 sections, 1 items):\n`-- Section {id} [0] header=h\n    `-- (0, 0) a (Cell)\n"
        );
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_detailed_lists_hidden_rows() {
        let source = sample();
        let dump = DataSourceTreeDebug::with_options(&source, TreeFormatOptions::detailed()).to_string();
        assert!(dump.contains("b (Cell) hidden"));
    }

    #[test]
    fn test_minimal() {
        let source = sample();
        let options = TreeFormatOptions {
            style: TreeStyle::Compact,
            ..TreeFormatOptions::minimal()
        };
        let dump = DataSourceTreeDebug::with_options(&source, options).to_string();
        assert!(dump.contains("  - a\n"));
        assert!(!dump.contains("(Cell)"));
    }
}
