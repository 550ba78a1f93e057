//! climate-chart: headless interactive time-series chart engine.
//!
//! Turns already-fetched climate rows into render-ready chart frames: SVG
//! path data for metric lines and min/max bands, axis ticks, tooltips and
//! drag-to-zoom selections. Drawing pixels is left to a host `Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ClimateChart};
pub use error::{ChartError, ChartResult};
