//! Per-row payload: the model behind a row, section header or footer.
//!
//! An [`ItemModel`] carries the identity of a renderable unit, a cell
//! template key, an optional fixed height and two optional capabilities:
//!
//! - **Collapse**: an extra height shown while the row is expanded
//! - **Validation**: an evaluator returning failure messages
//!
//! Capabilities are chosen at construction time and are queried through
//! plain `Option` fields, never by probing the model's type.
//!
//! Selection callbacks are replaced by per-model signals: subscribe to
//! [`ItemModel::on_select`] / [`ItemModel::on_deselect`] to be told when the
//! row is selected.

use std::fmt;
use std::sync::Arc;

use gridbind_core::{ConnectionId, Signal};

use super::signals::SelectionEvent;

/// Evaluation closure for validatable models.
///
/// Returns the list of failure messages, or `None` when the model is valid.
pub type Evaluator = Arc<dyn Fn(&ItemModel) -> Option<Vec<String>> + Send + Sync>;

/// An opaque swipe/row action descriptor.
///
/// The core never interprets these. They are handed back to the adapter unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    /// Adapter-defined key for the action.
    pub identifier: String,
    /// Title shown by the adapter.
    pub title: String,
}

impl RowAction {
    /// Creates a new row action descriptor.
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
        }
    }
}

/// State of the collapse capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collapse {
    /// Extra height added while the row is expanded.
    pub expand_height_difference: u32,
    /// Whether the row currently hides its extra height.
    pub collapsed: bool,
}

/// The height a row asks its container for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowHeight {
    /// A fixed height in points.
    Fixed(f64),
    /// Let the container size the row.
    Automatic,
}

impl RowHeight {
    /// Returns the fixed height, or `fallback` for automatic rows.
    pub fn value_or(self, fallback: f64) -> f64 {
        match self {
            Self::Fixed(height) => height,
            Self::Automatic => fallback,
        }
    }

    /// Returns `true` for [`RowHeight::Automatic`].
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

/// Signals owned by a single model.
#[derive(Debug, Default)]
pub struct ItemSignals {
    /// Emitted when the row carrying this model is selected.
    pub selected: Signal<SelectionEvent>,
    /// Emitted when the row carrying this model is deselected.
    pub deselected: Signal<SelectionEvent>,
}

/// The payload and behavior of one renderable unit.
///
/// # Example
///
/// ```
/// use gridbind::model::{ItemModel, RowHeight};
///
/// let mut picker = ItemModel::new("PickerCell")
///     .with_element_id("birthday")
///     .with_cell_height(60.0)
///     .collapsable(100, true);
///
/// assert_eq!(picker.effective_height(), RowHeight::Fixed(60.0));
/// picker.set_collapsed(false);
/// assert_eq!(picker.effective_height(), RowHeight::Fixed(160.0));
/// ```
pub struct ItemModel {
    cell_identifier: String,
    element_id: String,
    cell_height: Option<f64>,
    row_actions: Vec<RowAction>,
    configuration: Option<String>,
    collapse: Option<Collapse>,
    evaluator: Option<Evaluator>,
    signals: Arc<ItemSignals>,
}

impl ItemModel {
    /// Creates a model for the given cell template key.
    ///
    /// The element id defaults to a fresh UUID string.
    pub fn new(cell_identifier: impl Into<String>) -> Self {
        Self {
            cell_identifier: cell_identifier.into(),
            element_id: uuid::Uuid::new_v4().to_string(),
            cell_height: None,
            row_actions: Vec::new(),
            configuration: None,
            collapse: None,
            evaluator: None,
            signals: Arc::new(ItemSignals::default()),
        }
    }

    /// Sets the element id. Ids do not need to be unique.
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    /// Sets a fixed cell height.
    pub fn with_cell_height(mut self, height: f64) -> Self {
        self.cell_height = Some(height);
        self
    }

    /// Attaches row action descriptors.
    pub fn with_row_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.row_actions = actions;
        self
    }

    /// Attaches an adapter-defined configuration key.
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Enables the collapse capability.
    pub fn collapsable(mut self, expand_height_difference: u32, collapsed: bool) -> Self {
        self.collapse = Some(Collapse {
            expand_height_difference,
            collapsed,
        });
        self
    }

    /// Enables the validation capability.
    pub fn validatable<F>(mut self, evaluator: F) -> Self
    where
        F: Fn(&ItemModel) -> Option<Vec<String>> + Send + Sync + 'static,
    {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    /// Reuse identifier of the cell type that renders this model.
    pub fn cell_identifier(&self) -> &str {
        &self.cell_identifier
    }

    /// Changes the cell reuse identifier.
    pub fn set_cell_identifier(&mut self, cell_identifier: impl Into<String>) {
        self.cell_identifier = cell_identifier.into();
    }

    /// Identifier used by the element-id lookups and removals.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Changes the element id.
    pub fn set_element_id(&mut self, element_id: impl Into<String>) {
        self.element_id = element_id.into();
    }

    /// Fixed row height, or `None` to let the container decide.
    pub fn cell_height(&self) -> Option<f64> {
        self.cell_height
    }

    /// Changes the fixed height.
    ///
    /// Rows that already wrap this model keep the height they captured when
    /// they were created; see [`TableItem::cell_height`](super::TableItem::cell_height).
    pub fn set_cell_height(&mut self, height: Option<f64>) {
        self.cell_height = height;
    }

    /// Swipe actions offered for the row.
    pub fn row_actions(&self) -> &[RowAction] {
        &self.row_actions
    }

    /// Key the adapter uses to look up its cell configuration callback.
    pub fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    /// Changes the configuration key.
    pub fn set_configuration(&mut self, configuration: Option<String>) {
        self.configuration = configuration;
    }

    /// Returns the collapse state, if the model is collapsable.
    pub fn collapse(&self) -> Option<Collapse> {
        self.collapse
    }

    /// Whether the model was built with a collapse state.
    pub fn is_collapsable(&self) -> bool {
        self.collapse.is_some()
    }

    /// Returns `true` if the model is collapsable and currently collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.collapse.is_some_and(|c| c.collapsed)
    }

    /// Sets the collapsed flag.
    ///
    /// Returns `false` without changing anything if the model is not collapsable.
    pub fn set_collapsed(&mut self, collapsed: bool) -> bool {
        match self.collapse.as_mut() {
            Some(collapse) => {
                collapse.collapsed = collapsed;
                true
            }
            None => false,
        }
    }

    /// Whether the model was built with a validation evaluator.
    pub fn is_validatable(&self) -> bool {
        self.evaluator.is_some()
    }

    /// Runs the evaluator.
    ///
    /// Returns `Some(messages)` only when the evaluator reports at least one
    /// message. An empty list counts as valid, and so does a model without
    /// an evaluator.
    pub fn evaluate(&self) -> Option<Vec<String>> {
        let evaluator = self.evaluator.as_ref()?;
        evaluator(self).filter(|messages| !messages.is_empty())
    }

    /// Returns `true` if [`evaluate`](Self::evaluate) reports a failure.
    pub fn fails_validation(&self) -> bool {
        self.evaluate().is_some()
    }

    /// Computes the height the row should currently be shown at.
    ///
    /// Without a fixed height the container decides. An expanded collapsable
    /// model adds its expand difference to the fixed height.
    pub fn effective_height(&self) -> RowHeight {
        let Some(height) = self.cell_height else {
            return RowHeight::Automatic;
        };
        match self.collapse {
            Some(Collapse {
                expand_height_difference,
                collapsed: false,
            }) if expand_height_difference > 0 => {
                RowHeight::Fixed(height + f64::from(expand_height_difference))
            }
            _ => RowHeight::Fixed(height),
        }
    }

    /// Returns the model's signals.
    pub fn signals(&self) -> &ItemSignals {
        &self.signals
    }

    /// Connects a slot to the selection signal.
    pub fn on_select<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.signals.selected.connect(slot)
    }

    /// Connects a slot to the deselection signal.
    pub fn on_deselect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.signals.deselected.connect(slot)
    }

    /// Shared handle to the signals, so they can be emitted without holding
    /// a lock on the model.
    pub(crate) fn signals_handle(&self) -> Arc<ItemSignals> {
        self.signals.clone()
    }
}

impl fmt::Debug for ItemModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemModel")
            .field("cell_identifier", &self.cell_identifier)
            .field("element_id", &self.element_id)
            .field("cell_height", &self.cell_height)
            .field("row_actions", &self.row_actions)
            .field("collapse", &self.collapse)
            .field("validatable", &self.evaluator.is_some())
            .finish()
    }
}
