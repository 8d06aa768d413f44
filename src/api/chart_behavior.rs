use super::{BarBehavior, BrushBehavior, KeyAxisConfig, RoundFn, ValueAxisConfig, ZoomBehavior};

/// Axis and interaction policies, grouped apart from chart model state.
pub(super) struct ChartBehaviorState {
    pub(super) key_axis: KeyAxisConfig,
    pub(super) value_axis: ValueAxisConfig,
    pub(super) bar: BarBehavior,
    pub(super) brush: BrushBehavior,
    pub(super) zoom: ZoomBehavior,
    pub(super) round: Option<RoundFn>,
    /// Key domain of the linked range chart, applied on top of the original
    /// domain when zoom-out restriction is on.
    pub(super) range_constraint: Option<(f64, f64)>,
}
