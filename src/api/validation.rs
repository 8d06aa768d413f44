use crate::core::{ScaleDomain, ScaleMode};
use crate::error::{ChartError, ChartResult};

use super::{BarBehavior, ChartConfig, KeyAxisConfig, ValueAxisConfig, ZoomBehavior};

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    let margins = config.margins;
    if ![margins.top, margins.right, margins.bottom, margins.left]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
    {
        return Err(ChartError::InvalidData(
            "chart margins must be finite and >= 0".to_owned(),
        ));
    }

    validate_key_axis_config(&config.key_axis)?;
    validate_value_axis_config(config.value_axis)?;
    validate_bar_behavior(config.bar)?;
    validate_zoom_behavior(config.zoom)?;
    Ok(())
}

pub(super) fn validate_key_axis_config(config: &KeyAxisConfig) -> ChartResult<()> {
    config.padding.validate()?;
    match (&config.domain, config.mode) {
        (None | Some(ScaleDomain::Unset), _) => {}
        (Some(ScaleDomain::Continuous { min, max }), ScaleMode::Continuous) => {
            validate_continuous_domain(*min, *max, "key")?;
        }
        (Some(ScaleDomain::Ordinal(_)), ScaleMode::Ordinal) => {}
        _ => {
            return Err(ChartError::InvalidData(
                "key axis domain kind must match key axis mode".to_owned(),
            ));
        }
    }
    Ok(())
}

pub(super) fn validate_value_axis_config(config: ValueAxisConfig) -> ChartResult<()> {
    config.padding.validate()?;
    if let Some((min, max)) = config.domain {
        validate_continuous_domain(min, max, "value")?;
    }
    Ok(())
}

pub(super) fn validate_bar_behavior(bar: BarBehavior) -> ChartResult<()> {
    if !bar.gap_px.is_finite() || bar.gap_px < 0.0 {
        return Err(ChartError::InvalidData(
            "bar gap must be finite and >= 0".to_owned(),
        ));
    }
    if !bar.outer_padding_px.is_finite() || bar.outer_padding_px < 0.0 {
        return Err(ChartError::InvalidData(
            "bar outer padding must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_zoom_behavior(zoom: ZoomBehavior) -> ChartResult<()> {
    for limit in [zoom.min_zoom, zoom.max_zoom].into_iter().flatten() {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom limits must be finite and > 0".to_owned(),
            ));
        }
    }
    if let (Some(min_zoom), Some(max_zoom)) = (zoom.min_zoom, zoom.max_zoom) {
        if max_zoom < min_zoom {
            return Err(ChartError::InvalidData(
                "max zoom must be >= min zoom".to_owned(),
            ));
        }
    }
    Ok(())
}

pub(super) fn validate_continuous_domain(min: f64, max: f64, axis: &str) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{axis} axis domain must be finite"
        )));
    }
    Ok(())
}

pub(super) fn validate_zoom_input(factor: f64, anchor: f64) -> ChartResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "zoom factor must be finite and > 0".to_owned(),
        ));
    }
    if !anchor.is_finite() {
        return Err(ChartError::InvalidData(
            "zoom anchor must be finite".to_owned(),
        ));
    }
    Ok(())
}
