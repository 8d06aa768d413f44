use std::cell::RefCell;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AxisValue;
use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// One `{key, value}` record produced by a grouped data source.
///
/// `value` is an arbitrary JSON value so reductions producing objects
/// (`{"count": 3, "sum": 12.5}`) can be read through custom accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: AxisValue,
    pub value: Value,
}

impl Record {
    #[must_use]
    pub fn new(key: impl Into<AxisValue>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn from_decimal(key: impl Into<AxisValue>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(key, decimal_to_f64(value, "record value")?))
    }

    #[must_use]
    pub fn at_time(time: DateTime<Utc>, value: impl Into<Value>) -> Self {
        Self::new(AxisValue::from_datetime(time), value)
    }

    /// Reads the value as a plain number.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// Predicate applied to a source's dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Keeps keys in `[start, end)`.
    Range { start: f64, end: f64 },
    /// Keeps a single key.
    Exact(AxisValue),
}

impl Filter {
    /// Builds a range filter, swapping reversed bounds.
    #[must_use]
    pub fn range(start: f64, end: f64) -> Self {
        Self::Range {
            start: start.min(end),
            end: start.max(end),
        }
    }

    #[must_use]
    pub fn as_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range { start, end } => Some((*start, *end)),
            Self::Exact(_) => None,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &AxisValue) -> bool {
        match self {
            Self::Range { start, end } => key
                .as_f64()
                .is_some_and(|value| value >= *start && value < *end),
            Self::Exact(expected) => expected == key,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { start, end } => write!(f, "[{start} -> {end}]"),
            Self::Exact(key) => write!(f, "{key}"),
        }
    }
}

/// Contract of the reactive data source the engine reads from.
///
/// Sources are shared between charts and mutated through `&self`; the engine
/// is single-threaded and never holds a borrow across calls.
pub trait DataSource {
    /// Current records, ordered by key.
    fn all(&self) -> Vec<Record>;

    /// Active filter on the source's dimension.
    fn filter(&self) -> Option<Filter>;

    /// Replaces (`Some`) or clears (`None`) the active filter.
    fn set_filter(&self, filter: Option<Filter>);
}

/// In-memory source used by hosts without a reactive backend and by tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RefCell<Vec<Record>>,
    filter: RefCell<Option<Filter>>,
    filter_history: RefCell<Vec<Option<Filter>>>,
}

impl MemorySource {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(sort_records(records)),
            ..Self::default()
        }
    }

    /// Builds a source from `(key, number)` pairs.
    #[must_use]
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<AxisValue>,
        I: IntoIterator<Item = (K, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(key, value)| Record::new(key, value))
                .collect(),
        )
    }

    /// Parses a JSON array of `{ "key": ..., "value": ... }` objects.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let records: Vec<Record> = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidData(format!("invalid records json: {err}")))?;
        Ok(Self::new(records))
    }

    pub fn replace_records(&self, records: Vec<Record>) {
        *self.records.borrow_mut() = sort_records(records);
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Every filter that was applied, oldest first.
    #[must_use]
    pub fn filter_history(&self) -> Vec<Option<Filter>> {
        self.filter_history.borrow().clone()
    }
}

impl DataSource for MemorySource {
    fn all(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    fn filter(&self) -> Option<Filter> {
        self.filter.borrow().clone()
    }

    fn set_filter(&self, filter: Option<Filter>) {
        self.filter_history.borrow_mut().push(filter.clone());
        *self.filter.borrow_mut() = filter;
    }
}

fn sort_records(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|left, right| left.key.cmp(&right.key));
    records
}
