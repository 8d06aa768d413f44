use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::layer::{
    KeyAccessor, Layer, LegendEntry, TitleAccessor, ValueAccessor, default_key_accessor,
    default_value_accessor,
};
use crate::core::source::{DataSource, Record};
use crate::core::{AxisValue, Orientation};
use crate::error::{ChartError, ChartResult};

/// One record of one layer after value extraction and baseline assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub key: AxisValue,
    /// `None` when the layer is hidden or the accessor yields no finite value.
    pub value: Option<f64>,
    pub baseline: f64,
    pub record: Record,
    pub layer_id: String,
    pub hidden: bool,
}

impl DataPoint {
    /// End of the stacked segment (`baseline + value`).
    #[must_use]
    pub fn top(&self) -> f64 {
        self.baseline + self.value.unwrap_or(0.0)
    }

    /// Lower edge of the segment, accounting for negative values.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.baseline.min(self.top())
    }
}

/// A point in rendering orientation.
///
/// Vertical output keeps the key on `x` and stacks along `y` from `y0`;
/// horizontal output swaps the roles and stacks along `x` from `x0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedPoint {
    pub x: AxisValue,
    pub y: AxisValue,
    pub x0: f64,
    pub y0: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedLayer {
    pub id: String,
    /// Registration index of the layer, stable across visibility toggles.
    pub color_key: usize,
    pub points: Vec<DataPoint>,
}

impl StackedLayer {
    #[must_use]
    pub fn baseline_at(&self, key: &AxisValue) -> Option<f64> {
        self.points
            .iter()
            .find(|point| &point.key == key)
            .map(|point| point.baseline)
    }

    #[must_use]
    pub fn value_at(&self, key: &AxisValue) -> Option<f64> {
        self.points
            .iter()
            .find(|point| &point.key == key)
            .and_then(|point| point.value)
    }

    #[must_use]
    pub fn oriented(&self, orientation: Orientation) -> Vec<OrientedPoint> {
        self.points
            .iter()
            .map(|point| {
                let value = AxisValue::number(point.value.unwrap_or(0.0));
                match orientation {
                    Orientation::Vertical => OrientedPoint {
                        x: point.key.clone(),
                        y: value,
                        x0: 0.0,
                        y0: point.baseline,
                    },
                    Orientation::Horizontal => OrientedPoint {
                        x: value,
                        y: point.key.clone(),
                        x0: point.baseline,
                        y0: 0.0,
                    },
                }
            })
            .collect()
    }
}

/// Extra room added on both ends of an elastic axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisPadding {
    /// Fixed amount in domain units.
    Absolute(f64),
    /// Percentage of the raw domain span.
    Percent(f64),
}

impl Default for AxisPadding {
    fn default() -> Self {
        Self::Absolute(0.0)
    }
}

impl AxisPadding {
    #[must_use]
    pub fn amount(self, raw_span: f64) -> f64 {
        match self {
            Self::Absolute(value) => value,
            Self::Percent(percent) => raw_span.abs() * percent / 100.0,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        let value = match self {
            Self::Absolute(value) | Self::Percent(value) => value,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(
                "axis padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Key-range restriction applied while extracting layer points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum DomainFilter {
    /// Keeps every point (elastic or ordinal key axis).
    #[default]
    All,
    /// Keeps numeric keys inside `[min, max]`.
    Range { min: f64, max: f64 },
}

impl DomainFilter {
    #[must_use]
    pub fn keeps(&self, key: &AxisValue) -> bool {
        match self {
            Self::All => true,
            Self::Range { min, max } => match key.as_f64() {
                Some(value) => value >= *min && value <= *max,
                None => true,
            },
        }
    }
}

/// Layer registry and stacked-baseline computation.
pub struct StackingEngine {
    layers: IndexMap<String, Layer>,
    default_value_accessor: ValueAccessor,
    key_accessor: KeyAccessor,
    ordering: KeyAccessor,
    default_title_accessor: Option<TitleAccessor>,
    key_padding: AxisPadding,
    value_padding: AxisPadding,
}

impl Default for StackingEngine {
    fn default() -> Self {
        Self {
            layers: IndexMap::new(),
            default_value_accessor: default_value_accessor(),
            key_accessor: default_key_accessor(),
            ordering: default_key_accessor(),
            default_title_accessor: None,
            key_padding: AxisPadding::default(),
            value_padding: AxisPadding::default(),
        }
    }
}

impl std::fmt::Debug for StackingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackingEngine")
            .field("layers", &self.layers)
            .field("key_padding", &self.key_padding)
            .field("value_padding", &self.value_padding)
            .finish_non_exhaustive()
    }
}

impl StackingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer and returns its id.
    ///
    /// Without a name the id is the layer's position, skipping ahead past
    /// ids already taken. Registering an existing name replaces that layer
    /// in place.
    pub fn add_layer(
        &mut self,
        source: Rc<dyn DataSource>,
        name: Option<&str>,
        accessor: Option<ValueAccessor>,
    ) -> String {
        let id = name.map_or_else(|| self.next_positional_id(), str::to_owned);
        let mut layer = Layer::new(id.clone(), source);
        layer.value_accessor = accessor;
        if let Some(previous) = self.layers.get(&id) {
            layer.hidden = previous.hidden;
        }
        self.layers.insert(id.clone(), layer);
        debug!(layer = %id, count = self.layers.len(), "registered stack layer");
        id
    }

    fn next_positional_id(&self) -> String {
        (self.layers.len()..)
            .map(|position| position.to_string())
            .find(|id| !self.layers.contains_key(id))
            .unwrap_or_default()
    }

    /// Clears every layer and registers `source` as the first one.
    pub fn set_source(&mut self, source: Rc<dyn DataSource>, name: Option<&str>) -> String {
        self.layers.clear();
        self.add_layer(source, name, None)
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Registered layers in registration order.
    pub fn layers(&self) -> impl ExactSizeIterator<Item = &Layer> {
        self.layers.values()
    }

    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Hides a layer. Returns `true` when visibility changed.
    pub fn hide_layer(&mut self, id: &str) -> bool {
        self.set_hidden(id, true)
    }

    /// Shows a layer. Returns `true` when visibility changed.
    pub fn show_layer(&mut self, id: &str) -> bool {
        self.set_hidden(id, false)
    }

    /// `false` for unknown ids.
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.layers.get(id).is_some_and(|layer| layer.hidden)
    }

    /// Flips visibility. Unknown ids are ignored and return `false`.
    pub fn toggle_hidden(&mut self, id: &str) -> bool {
        let hidden = self.is_hidden(id);
        self.set_hidden(id, !hidden)
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        match self.layers.get_mut(id) {
            Some(layer) if layer.hidden != hidden => {
                layer.hidden = hidden;
                debug!(layer = %id, hidden, "layer visibility changed");
                true
            }
            Some(_) => false,
            None => {
                trace!(layer = %id, "ignoring visibility change for unknown layer");
                false
            }
        }
    }

    #[must_use]
    pub fn legendables(&self) -> Vec<LegendEntry> {
        self.layers
            .values()
            .enumerate()
            .map(|(index, layer)| LegendEntry {
                name: layer.id.clone(),
                hidden: layer.hidden,
                color_key: index,
            })
            .collect()
    }

    pub fn set_default_value_accessor(&mut self, accessor: ValueAccessor) {
        self.default_value_accessor = accessor;
    }

    pub fn set_key_accessor(&mut self, accessor: KeyAccessor) {
        self.key_accessor = accessor;
    }

    /// Sort key used by [`StackingEngine::ordered_domain`].
    pub fn set_ordering(&mut self, ordering: KeyAccessor) {
        self.ordering = ordering;
    }

    pub fn set_default_title_accessor(&mut self, accessor: Option<TitleAccessor>) {
        self.default_title_accessor = accessor;
    }

    #[must_use]
    pub fn key_padding(&self) -> AxisPadding {
        self.key_padding
    }

    pub fn set_key_padding(&mut self, padding: AxisPadding) -> ChartResult<()> {
        self.key_padding = padding.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn value_padding(&self) -> AxisPadding {
        self.value_padding
    }

    pub fn set_value_padding(&mut self, padding: AxisPadding) -> ChartResult<()> {
        self.value_padding = padding.validate()?;
        Ok(())
    }

    /// Materializes one layer without stacking, hidden layers included.
    #[must_use]
    pub fn layer_points(&self, id: &str) -> Option<Vec<DataPoint>> {
        self.layers
            .get(id)
            .map(|layer| self.prepare_values(layer, &DomainFilter::All))
    }

    /// Extracts and stacks every visible layer.
    ///
    /// Layer `i`'s baseline at key `k` is the sum of the values of the visible
    /// layers registered before it at `k`; missing keys and missing values
    /// count as zero.
    #[must_use]
    pub fn compute_stacked_layers(&self, filter: &DomainFilter) -> Vec<StackedLayer> {
        let mut totals: HashMap<AxisValue, f64> = HashMap::new();
        let mut stacked = Vec::with_capacity(self.layers.len());

        for (color_key, layer) in self.layers.values().enumerate() {
            if layer.hidden {
                continue;
            }

            let mut points = self.prepare_values(layer, filter);
            for point in &mut points {
                point.baseline = totals.get(&point.key).copied().unwrap_or(0.0);
            }
            for point in &points {
                *totals.entry(point.key.clone()).or_insert(0.0) += point.value.unwrap_or(0.0);
            }

            stacked.push(StackedLayer {
                id: layer.id.clone(),
                color_key,
                points,
            });
        }

        debug!(
            registered = self.layers.len(),
            visible = stacked.len(),
            "computed stacked layers"
        );
        stacked
    }

    fn prepare_values(&self, layer: &Layer, filter: &DomainFilter) -> Vec<DataPoint> {
        let accessor = layer
            .value_accessor
            .as_ref()
            .unwrap_or(&self.default_value_accessor);

        layer
            .source
            .all()
            .into_iter()
            .filter_map(|record| {
                let key = (self.key_accessor)(&record);
                if !filter.keeps(&key) {
                    return None;
                }
                let value = if layer.hidden {
                    None
                } else {
                    accessor(&record).filter(|value| {
                        let finite = value.is_finite();
                        if !finite {
                            trace!(layer = %layer.id, key = %key, "dropping non-finite value");
                        }
                        finite
                    })
                };
                Some(DataPoint {
                    key,
                    value,
                    baseline: 0.0,
                    record,
                    layer_id: layer.id.clone(),
                    hidden: layer.hidden,
                })
            })
            .collect()
    }

    /// Raw `[min, max]` of numeric keys across `layers`.
    #[must_use]
    pub fn key_extent(layers: &[StackedLayer]) -> Option<(f64, f64)> {
        fold_extent(
            layers
                .iter()
                .flat_map(|layer| &layer.points)
                .filter_map(|point| point.key.as_f64()),
        )
    }

    /// Raw `[min, max]` of stacked segments across `layers`.
    #[must_use]
    pub fn value_extent(layers: &[StackedLayer]) -> Option<(f64, f64)> {
        let points = || layers.iter().flat_map(|layer| &layer.points);
        let min = points().map(DataPoint::bottom).reduce(f64::min)?;
        let max = points().map(DataPoint::top).reduce(f64::max)?;
        Some((min, max))
    }

    #[must_use]
    pub fn key_axis_min(&self, layers: &[StackedLayer]) -> Option<f64> {
        Self::key_extent(layers).map(|(min, max)| min - self.key_padding.amount(max - min))
    }

    #[must_use]
    pub fn key_axis_max(&self, layers: &[StackedLayer]) -> Option<f64> {
        Self::key_extent(layers).map(|(min, max)| max + self.key_padding.amount(max - min))
    }

    #[must_use]
    pub fn value_axis_min(&self, layers: &[StackedLayer]) -> Option<f64> {
        Self::value_extent(layers).map(|(min, max)| min - self.value_padding.amount(max - min))
    }

    #[must_use]
    pub fn value_axis_max(&self, layers: &[StackedLayer]) -> Option<f64> {
        Self::value_extent(layers).map(|(min, max)| max + self.value_padding.amount(max - min))
    }

    /// Distinct keys across `layers`, sorted by the ordering accessor.
    ///
    /// The sort is stable, so keys with equal ordering keep the order in
    /// which layers contributed them.
    #[must_use]
    pub fn ordered_domain(&self, layers: &[StackedLayer]) -> Vec<AxisValue> {
        let mut keyed: Vec<(AxisValue, &AxisValue)> = layers
            .iter()
            .flat_map(|layer| &layer.points)
            .map(|point| ((self.ordering)(&point.record), &point.key))
            .collect();
        keyed.sort_by(|left, right| left.0.cmp(&right.0));

        let mut seen = indexmap::IndexSet::with_capacity(keyed.len());
        for (_, key) in keyed {
            seen.insert(key.clone());
        }
        seen.into_iter().collect()
    }

    /// Tooltip text for `point` using the layer's title accessor when set.
    #[must_use]
    pub fn title(&self, point: &DataPoint) -> String {
        let accessor = self
            .layers
            .get(&point.layer_id)
            .and_then(|layer| layer.title_accessor.as_ref())
            .or(self.default_title_accessor.as_ref());
        match accessor {
            Some(accessor) => accessor(&point.record),
            None => match point.value {
                Some(value) => format!("{}: {value}", point.key),
                None => format!("{}", point.key),
            },
        }
    }
}

fn fold_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |extent, value| match extent {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
