pub mod bar_series;
pub mod layer;
pub mod primitives;
pub mod scale;
pub mod source;
pub mod stack;
pub mod types;
pub mod units;

pub use bar_series::{BarLayout, StackedBar, project_stacked_bars};
pub use layer::{KeyAccessor, Layer, LegendEntry, TitleAccessor, ValueAccessor};
pub use scale::{MIN_BAND_WIDTH, OutOfDomainPolicy, Scale, ScaleDomain, ScaleMode};
pub use source::{DataSource, Filter, MemorySource, Record};
pub use stack::{
    AxisPadding, DataPoint, DomainFilter, OrientedPoint, StackedLayer, StackingEngine,
};
pub use types::{AxisValue, Margins, Orientation, Viewport};
pub use units::KeyUnits;
