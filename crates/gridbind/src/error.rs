//! Error types for table data sources.

use crate::model::TableItem;

/// A row that failed validation, with the messages its evaluator returned.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    /// The failing row.
    pub item: TableItem,
    /// Messages reported by the evaluator. Never empty.
    pub messages: Vec<String>,
}

/// Validation failed for one or more visible rows.
///
/// Returned by [`TableDataSource::validate_all`](crate::model::TableDataSource::validate_all)
/// with every failing row, and by
/// [`TableDataSource::validate`](crate::model::TableDataSource::validate)
/// with only the first one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} item(s) failed validation: {}", .failures.len(), element_ids(.failures))]
pub struct ValidationError {
    failures: Vec<ValidationFailure>,
}

impl ValidationError {
    pub(crate) fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// All failures, in row order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// The failing rows, in row order.
    pub fn items(&self) -> impl Iterator<Item = &TableItem> {
        self.failures.iter().map(|f| &f.item)
    }

    /// The first failing row. This is the row an adapter would scroll to.
    pub fn first(&self) -> Option<&TableItem> {
        self.failures.first().map(|f| &f.item)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// All messages of all failures, flattened.
    pub fn messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(|f| f.messages.iter().cloned())
            .collect()
    }
}

fn element_ids(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.item.element_id())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The main error type for data source operations.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// An insert position past the end of the visible rows.
    ///
    /// Only returned when strict bounds are off; strict mode panics instead.
    #[error("Index {index} is out of bounds for {len} visible items")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Validation failed.
    ///
    /// `validate` and `validate_all` return the bare [`ValidationError`];
    /// this variant lets callers returning [`Result`] propagate it with `?`.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// A specialized Result type for data source operations.
pub type Result<T> = std::result::Result<T, DataSourceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemModel, TableDataSource};

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(vec![
            ValidationFailure {
                item: TableItem::new(ItemModel::new("Cell").with_element_id("name")),
                messages: vec!["required".into()],
            },
            ValidationFailure {
                item: TableItem::new(ItemModel::new("Cell").with_element_id("email")),
                messages: vec!["invalid".into(), "too long".into()],
            },
        ]);

        assert_eq!(err.to_string(), "2 item(s) failed validation: name, email");
        assert_eq!(err.len(), 2);
        assert_eq!(err.messages(), vec!["required", "invalid", "too long"]);
        assert_eq!(err.first().map(|i| i.element_id()), Some("name".to_string()));
    }

    #[test]
    fn test_validation_propagates_with_question_mark() {
        fn submit(source: &TableDataSource) -> Result<usize> {
            source.validate_all()?;
            Ok(source.all_visible_items().len())
        }

        let mut source = TableDataSource::new();
        source.add_item(ItemModel::new("Cell").with_element_id("ok"), None);
        assert_eq!(submit(&source).unwrap(), 1);

        source.add_item(
            ItemModel::new("Cell")
                .with_element_id("name")
                .validatable(|_| Some(vec!["required".into()])),
            None,
        );
        let err = submit(&source).unwrap_err();
        assert!(matches!(&err, DataSourceError::Validation(v) if v.len() == 1));
        assert_eq!(err.to_string(), "1 item(s) failed validation: name");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = DataSourceError::IndexOutOfBounds { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Index 5 is out of bounds for 2 visible items");
    }
}
