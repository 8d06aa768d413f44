use std::time::Duration;

use tracing::debug;

use crate::core::{Scale, ScaleDomain, StackingEngine};
use crate::error::ChartResult;
use crate::interaction::{EventTrigger, InteractionState};
use crate::render::Renderer;

use super::{
    ChartConfig, ChartEngine,
    chart_behavior::ChartBehaviorState,
    chart_model::ChartModel,
    chart_runtime::{ChartRuntimeState, LinkSignals},
    engine_core::EngineCore,
    layout_cache::LayoutCache,
    validation::validate_chart_config,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no layers. Scales take their explicit domains
    /// from `config`; elastic axes get theirs at the first render.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        validate_chart_config(&config)?;

        let mut key_scale = Scale::new("key", config.key_axis.mode);
        key_scale.set_out_of_domain_policy(config.out_of_domain_policy);
        key_scale.set_padding(config.bar.gap_px, config.bar.outer_padding_px)?;

        let mut interaction = InteractionState::default();
        if let Some(domain) = config.key_axis.domain.clone().filter(ScaleDomain::is_set) {
            key_scale.set_domain(domain)?;
            interaction.set_original_domain(key_scale.domain().as_continuous());
        }

        let mut value_scale = Scale::continuous("value");
        value_scale.set_out_of_domain_policy(config.out_of_domain_policy);
        if let Some((min, max)) = config.value_axis.domain {
            value_scale.set_domain(ScaleDomain::continuous(min, max))?;
        }

        let mut stack = StackingEngine::new();
        stack.set_key_padding(config.key_axis.padding)?;
        stack.set_value_padding(config.value_axis.padding)?;

        let mut model = ChartModel {
            viewport: config.viewport,
            margins: config.margins,
            orientation: config.orientation,
            key_scale,
            value_scale,
            stack,
            dimension: None,
            filter: None,
            interaction,
            stacked: Vec::new(),
            last_key_domain: ScaleDomain::Unset,
        };
        let (key_r0, key_r1) = model.key_range();
        model.key_scale.set_range(key_r0, key_r1)?;
        let (value_r0, value_r1) = model.value_range();
        model.value_scale.set_range(value_r0, value_r1)?;

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            key_mode = ?config.key_axis.mode,
            elastic_keys = config.key_axis.elastic,
            elastic_values = config.value_axis.elastic,
            "created chart engine"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                model,
                behavior: ChartBehaviorState {
                    key_axis: config.key_axis,
                    value_axis: config.value_axis,
                    bar: config.bar,
                    brush: config.brush,
                    zoom: config.zoom,
                    round: None,
                    range_constraint: None,
                },
                runtime: ChartRuntimeState {
                    plugins: Vec::new(),
                    trigger: EventTrigger::new(Duration::from_millis(config.event_delay_ms)),
                    layout: LayoutCache::default(),
                    rendered: false,
                    resizing: false,
                    link_signals: LinkSignals::default(),
                },
            },
        })
    }
}
