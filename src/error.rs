use thiserror::Error;

use crate::api::ChartId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A coordinate query or render pass ran before the axis had any domain.
    #[error("{axis} axis domain is not set")]
    DomainNotSet { axis: &'static str },

    #[error("value {value} is outside of the scale domain")]
    OutOfDomain { value: String },

    #[error("unknown chart id: {0}")]
    UnknownChart(ChartId),

    #[error("invalid chart link: {0}")]
    InvalidLink(String),
}
