use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::source::{DataSource, Record};
use crate::core::AxisValue;

/// Extracts the stacked value from a record; `None` marks a missing value.
pub type ValueAccessor = Rc<dyn Fn(&Record) -> Option<f64>>;

/// Extracts the key used to place a record on the key axis.
pub type KeyAccessor = Rc<dyn Fn(&Record) -> AxisValue>;

/// Builds tooltip text for one record.
pub type TitleAccessor = Rc<dyn Fn(&Record) -> String>;

/// One registered series of a stack.
#[derive(Clone)]
pub struct Layer {
    pub id: String,
    pub source: Rc<dyn DataSource>,
    pub hidden: bool,
    pub value_accessor: Option<ValueAccessor>,
    pub title_accessor: Option<TitleAccessor>,
}

impl Layer {
    #[must_use]
    pub fn new(id: impl Into<String>, source: Rc<dyn DataSource>) -> Self {
        Self {
            id: id.into(),
            source,
            hidden: false,
            value_accessor: None,
            title_accessor: None,
        }
    }

    #[must_use]
    pub fn with_value_accessor(mut self, accessor: ValueAccessor) -> Self {
        self.value_accessor = Some(accessor);
        self
    }

    #[must_use]
    pub fn with_title_accessor(mut self, accessor: TitleAccessor) -> Self {
        self.title_accessor = Some(accessor);
        self
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("hidden", &self.hidden)
            .field("custom_value_accessor", &self.value_accessor.is_some())
            .field("custom_title_accessor", &self.title_accessor.is_some())
            .finish_non_exhaustive()
    }
}

/// Legend-facing view of a layer.
///
/// `color_key` is the registration index; color assignment itself belongs to
/// the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub hidden: bool,
    pub color_key: usize,
}

#[must_use]
pub fn default_value_accessor() -> ValueAccessor {
    Rc::new(Record::numeric_value)
}

#[must_use]
pub fn default_key_accessor() -> KeyAccessor {
    Rc::new(|record: &Record| record.key.clone())
}
