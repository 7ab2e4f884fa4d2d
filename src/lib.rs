// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! A single analog speedometer: a 60-tick dial labelled 0 to 220, a needle
//! driven by an integer progress value and a center hub.
//!
//! [`SpeedView`] turns the progress value and the area it is given into draw
//! calls on any [`Surface`]. [`Scene`] records those calls; [`PixelCanvas`]
//! rasterizes them into an RGBA frame; [`SpeedometerApp`] hosts the widget in
//! a window.

pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod raster;
pub mod scene;
pub mod slider;
pub mod speed_view;

pub use app::{SpeedCommand, SpeedometerApp};
pub use config::{Color, SpeedViewConfig, WindowConfig};
pub use error::{Result, SpeedViewError};
pub use geometry::{Padding, Point, RectF, Size, Transform};
pub use measure::{resolve_size, MeasureSpec, Resolved};
pub use raster::{FontMetrics, PixelCanvas};
pub use scene::{
    DrawCommand, FixedMetrics, Paint, Scene, Surface, TextBounds, TextMeasure, TextPaint,
};
pub use slider::{Slider, SliderInput};
pub use speed_view::{Invalidate, Needle, PlacedLabel, SpeedView};

use tracing_subscriber::EnvFilter;

// ============================================================================
// LOGGING
// ============================================================================

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SpeedViewError::Logging(e.to_string()))
}
