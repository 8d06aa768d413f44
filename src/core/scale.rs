use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::AxisValue;
use crate::error::{ChartError, ChartResult};

/// Smallest band width handed to the rendering collaborator.
pub const MIN_BAND_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleMode {
    /// Quantitative or temporal mapping.
    #[default]
    Continuous,
    /// Discrete keys laid out in equal bands.
    Ordinal,
}

/// What `map` does with values outside a continuous domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutOfDomainPolicy {
    #[default]
    Extrapolate,
    Clamp,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ScaleDomain {
    #[default]
    Unset,
    Continuous {
        min: f64,
        max: f64,
    },
    Ordinal(IndexSet<AxisValue>),
}

impl ScaleDomain {
    /// Builds a continuous domain, swapping reversed bounds.
    #[must_use]
    pub fn continuous(a: f64, b: f64) -> Self {
        Self::Continuous {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn ordinal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AxisValue>,
    {
        Self::Ordinal(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// `true` for unset domains and empty ordinal sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unset => true,
            Self::Continuous { .. } => false,
            Self::Ordinal(values) => values.is_empty(),
        }
    }

    #[must_use]
    pub fn as_continuous(&self) -> Option<(f64, f64)> {
        match self {
            Self::Continuous { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&IndexSet<AxisValue>> {
        match self {
            Self::Ordinal(values) => Some(values),
            _ => None,
        }
    }

    /// Structural equality that also compares ordinal ordering.
    ///
    /// `IndexSet` equality ignores insertion order, which is exactly what an
    /// ordinal axis must not ignore.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unset, Self::Unset) => true,
            (
                Self::Continuous { min: a0, max: a1 },
                Self::Continuous { min: b0, max: b1 },
            ) => a0 == b0 && a1 == b1,
            (Self::Ordinal(a), Self::Ordinal(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            _ => false,
        }
    }
}

/// One-dimensional mapping between a data domain and a display range.
///
/// Continuous scales map linearly; ordinal scales lay the domain out in
/// equal bands separated by `inner_padding` display units, with
/// `outer_padding` units reserved at both ends of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    axis: &'static str,
    mode: ScaleMode,
    domain: ScaleDomain,
    range: (f64, f64),
    inner_padding: f64,
    outer_padding: f64,
    out_of_domain: OutOfDomainPolicy,
}

impl Scale {
    #[must_use]
    pub fn new(axis: &'static str, mode: ScaleMode) -> Self {
        Self {
            axis,
            mode,
            domain: ScaleDomain::Unset,
            range: (0.0, 1.0),
            inner_padding: 0.0,
            outer_padding: 0.0,
            out_of_domain: OutOfDomainPolicy::default(),
        }
    }

    #[must_use]
    pub fn continuous(axis: &'static str) -> Self {
        Self::new(axis, ScaleMode::Continuous)
    }

    #[must_use]
    pub fn ordinal(axis: &'static str) -> Self {
        Self::new(axis, ScaleMode::Ordinal)
    }

    #[must_use]
    pub fn axis(&self) -> &'static str {
        self.axis
    }

    #[must_use]
    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    #[must_use]
    pub fn is_ordinal(&self) -> bool {
        self.mode == ScaleMode::Ordinal
    }

    /// Switches between continuous and ordinal mapping, dropping the domain.
    pub fn set_mode(&mut self, mode: ScaleMode) {
        if self.mode != mode {
            self.mode = mode;
            self.domain = ScaleDomain::Unset;
        }
    }

    #[must_use]
    pub fn domain(&self) -> &ScaleDomain {
        &self.domain
    }

    /// Replaces the domain.
    ///
    /// The domain kind must match the scale mode. `Unset` is accepted and
    /// puts the scale back into its unconfigured state.
    pub fn set_domain(&mut self, domain: ScaleDomain) -> ChartResult<()> {
        match (&domain, self.mode) {
            (ScaleDomain::Unset, _) => {}
            (ScaleDomain::Continuous { min, max }, ScaleMode::Continuous) => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(ChartError::InvalidData(format!(
                        "{} scale domain must be finite",
                        self.axis
                    )));
                }
            }
            (ScaleDomain::Ordinal(_), ScaleMode::Ordinal) => {}
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "{} scale domain kind does not match scale mode {:?}",
                    self.axis, self.mode
                )));
            }
        }

        self.domain = domain;
        Ok(())
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_range(&mut self, r0: f64, r1: f64) -> ChartResult<()> {
        if !r0.is_finite() || !r1.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{} scale range must be finite",
                self.axis
            )));
        }
        self.range = (r0, r1);
        Ok(())
    }

    /// Length of the display range.
    #[must_use]
    pub fn range_extent(&self) -> f64 {
        (self.range.1 - self.range.0).abs()
    }

    #[must_use]
    pub fn padding(&self) -> (f64, f64) {
        (self.inner_padding, self.outer_padding)
    }

    /// Sets inner (between bands) and outer (range ends) padding in display units.
    pub fn set_padding(&mut self, inner: f64, outer: f64) -> ChartResult<()> {
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || outer < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{} scale padding must be finite and >= 0",
                self.axis
            )));
        }
        self.inner_padding = inner;
        self.outer_padding = outer;
        Ok(())
    }

    #[must_use]
    pub fn out_of_domain_policy(&self) -> OutOfDomainPolicy {
        self.out_of_domain
    }

    pub fn set_out_of_domain_policy(&mut self, policy: OutOfDomainPolicy) {
        self.out_of_domain = policy;
    }

    /// Number of discrete positions implied by an ordinal domain.
    #[must_use]
    pub fn ordinal_len(&self) -> usize {
        self.domain.as_ordinal().map_or(0, IndexSet::len)
    }

    /// Maps a domain value to a display position.
    ///
    /// Ordinal keys map to the start of their band.
    pub fn map(&self, value: &AxisValue) -> ChartResult<f64> {
        match &self.domain {
            ScaleDomain::Unset => Err(ChartError::DomainNotSet { axis: self.axis }),
            ScaleDomain::Continuous { .. } => match value.as_f64() {
                Some(number) => self.map_number(number),
                None => Err(ChartError::InvalidData(format!(
                    "{} scale is continuous and cannot map category {value}",
                    self.axis
                ))),
            },
            ScaleDomain::Ordinal(values) => match values.get_index_of(value) {
                Some(index) => Ok(self.band_start(index, values.len())),
                None if self.out_of_domain == OutOfDomainPolicy::Reject => {
                    Err(ChartError::OutOfDomain {
                        value: value.to_string(),
                    })
                }
                None => Ok(self.range.0),
            },
        }
    }

    /// Maps a number through a continuous domain.
    pub fn map_number(&self, value: f64) -> ChartResult<f64> {
        let Some((min, max)) = self.domain.as_continuous() else {
            return match self.domain {
                ScaleDomain::Unset => Err(ChartError::DomainNotSet { axis: self.axis }),
                _ => Err(ChartError::InvalidData(format!(
                    "{} scale is ordinal and cannot map numbers",
                    self.axis
                ))),
            };
        };
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let outside = value < min || value > max;
        if outside && self.out_of_domain == OutOfDomainPolicy::Reject {
            return Err(ChartError::OutOfDomain {
                value: value.to_string(),
            });
        }

        let span = max - min;
        let mut normalized = if span == 0.0 {
            0.0
        } else {
            (value - min) / span
        };
        if self.out_of_domain == OutOfDomainPolicy::Clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        let (r0, r1) = self.range;
        Ok(r0 + normalized * (r1 - r0))
    }

    /// Maps a display position back into a continuous domain.
    pub fn invert(&self, position: f64) -> ChartResult<f64> {
        let Some((min, max)) = self.domain.as_continuous() else {
            return match self.domain {
                ScaleDomain::Unset => Err(ChartError::DomainNotSet { axis: self.axis }),
                _ => Err(ChartError::InvalidData(format!(
                    "{} scale is ordinal and cannot be inverted",
                    self.axis
                ))),
            };
        };
        if !position.is_finite() {
            return Err(ChartError::InvalidData("position must be finite".to_owned()));
        }

        let (r0, r1) = self.range;
        let extent = r1 - r0;
        if extent == 0.0 {
            return Ok(min);
        }
        Ok(min + (position - r0) / extent * (max - min))
    }

    /// Band width for `unit_count` equal bands over the range.
    ///
    /// `(extent - (n - 1) * inner - 2 * outer) / n`, floored, and never below
    /// [`MIN_BAND_WIDTH`]. Degenerate inputs (no units, empty range, NaN)
    /// produce exactly the floor.
    #[must_use]
    pub fn band_width(&self, unit_count: usize) -> f64 {
        clamp_band_width(self.raw_band_width(unit_count).floor())
    }

    /// Ordinal band width using the domain's own unit count.
    #[must_use]
    pub fn ordinal_band_width(&self) -> f64 {
        self.band_width(self.ordinal_len())
    }

    fn raw_band_width(&self, unit_count: usize) -> f64 {
        let units = unit_count as f64;
        let mut width = (self.range_extent() - (units - 1.0) * self.inner_padding) / units;
        if self.outer_padding > 0.0 {
            width -= 2.0 * self.outer_padding / units;
        }
        width
    }

    fn band_start(&self, index: usize, count: usize) -> f64 {
        let (r0, r1) = self.range;
        let direction = if r1 >= r0 { 1.0 } else { -1.0 };
        let units = count.max(1) as f64;
        let step = (self.range_extent() - 2.0 * self.outer_padding + self.inner_padding) / units;
        r0 + direction * (self.outer_padding + step * index as f64)
    }

    /// Tick values for axis rendering.
    ///
    /// Continuous domains get "nice" round steps; ordinal domains return
    /// every key in order.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<AxisValue> {
        match &self.domain {
            ScaleDomain::Unset => Vec::new(),
            ScaleDomain::Continuous { min, max } => nice_ticks(*min, *max, count)
                .into_iter()
                .filter(|tick| *tick >= *min - 1e-9 && *tick <= *max + 1e-9)
                .map(AxisValue::number)
                .collect(),
            ScaleDomain::Ordinal(values) => values.iter().cloned().collect(),
        }
    }
}

fn clamp_band_width(width: f64) -> f64 {
    if !width.is_finite() || width < MIN_BAND_WIDTH {
        MIN_BAND_WIDTH
    } else {
        width
    }
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).ceil() * step;
    let steps = ((max - start) / step + 1e-9).floor();
    if !steps.is_finite() || steps < 0.0 {
        return Vec::new();
    }
    let steps = steps.min(10_000.0) as u64;
    (0..=steps).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
