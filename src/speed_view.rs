//! The speedometer widget.
//!
//! All geometry is derived from `circle_rect`, which is recomputed on every
//! resize. The only mutable state besides it is `progress`.

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::config::{Color, SpeedViewConfig};
use crate::geometry::{Point, RectF, Size};
use crate::measure::{resolve_size, MeasureSpec};
use crate::scene::{Paint, Surface, TextMeasure, TextPaint};

/// Dial labels, one every 30 degrees clockwise from 12 o'clock.
pub const LABELS: [&str; 12] = [
    "0", "20", "40", "60", "80", "100", "120", "140", "160", "180", "200", "220",
];

// "240" is never drawn; it sizes the widget with headroom for three digits.
const SIZE_PROXY_LABEL: &str = "240";

pub const CENTER_RADIUS: f32 = 10.0;
pub const SHORT_ARM: f32 = 40.0;
const MIN_LONG_ARM: f32 = 360.0;
const MAX_TICK_LENGTH: f32 = 20.0;

const OUTER_CIRCLE_STROKE: f32 = 5.0;
const OUTER_CIRCLE_INSET: f32 = 5.0;

pub const TICK_COUNT: usize = 60;
const MAJOR_TICK_EVERY: usize = 5;
const TICK_TOP_OFFSET: f32 = 5.0;
pub const MAJOR_TICK: TickStyle = TickStyle {
    stroke_width: 5.0,
    length: 20.0,
};
pub const MINOR_TICK: TickStyle = TickStyle {
    stroke_width: 3.0,
    length: 10.0,
};

const LABEL_INSET: f32 = 50.0;
const LONG_ARM_INSET: f32 = 120.0;
const NEEDLE_STROKE: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    pub stroke_width: f32,
    pub length: f32,
}

/// Redraw request hook supplied by the host.
pub trait Invalidate {
    fn invalidate(&self);
}

impl<F: Fn()> Invalidate for F {
    fn invalidate(&self) {
        self()
    }
}

/// Resolved endpoints of the needle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needle {
    /// End of the short tail.
    pub start: Point,
    /// Tip of the long arm.
    pub end: Point,
}

/// A label with its baseline origin, already centered on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    pub text: &'static str,
    pub origin: Point,
}

pub struct SpeedView {
    config: SpeedViewConfig,
    progress: i32,
    circle_rect: RectF,
    invalidator: Option<Box<dyn Invalidate>>,
}

impl SpeedView {
    pub fn new(config: SpeedViewConfig) -> Self {
        Self {
            progress: config.initial_progress,
            config,
            circle_rect: RectF::default(),
            invalidator: None,
        }
    }

    pub fn with_invalidator(mut self, invalidator: impl Invalidate + 'static) -> Self {
        self.set_invalidator(invalidator);
        self
    }

    pub fn set_invalidator(&mut self, invalidator: impl Invalidate + 'static) {
        self.invalidator = Some(Box::new(invalidator));
    }

    pub fn config(&self) -> &SpeedViewConfig {
        &self.config
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Square the dial is laid out in, as of the last resize.
    pub fn circle_rect(&self) -> RectF {
        self.circle_rect
    }

    /// Stores `progress` as-is and requests one redraw. Values outside
    /// 0..=100 are not clamped; they simply turn the needle further.
    pub fn set_progress(&mut self, progress: i32) {
        trace!(progress, previous = self.progress, "progress updated");
        self.progress = progress;
        if let Some(invalidator) = &self.invalidator {
            invalidator.invalidate();
        }
    }

    pub fn text_paint(&self) -> TextPaint {
        TextPaint {
            color: self.config.text_color,
            size: self.config.text_size,
        }
    }

    /// Unconstrained square size that fits every part of the gauge.
    pub fn preferred_size<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        suggested_minimum: Size,
    ) -> Size {
        let bounds = measure.text_bounds(SIZE_PROXY_LABEL, &self.text_paint());
        let padding = self.config.padding;
        let common = self.config.stroke_width * 2.0
            + CENTER_RADIUS
            + MIN_LONG_ARM
            + SHORT_ARM
            + MAX_TICK_LENGTH;

        let measured_width = (common + bounds.width + padding.horizontal()) as i32;
        let measured_height = (common + bounds.height + padding.vertical()) as i32;
        debug!(measured_width, measured_height, "computed gauge extent");

        let requested_width = measured_width.max(suggested_minimum.width);
        let requested_height = measured_height.max(suggested_minimum.height);
        let requested = requested_width.max(requested_height);
        debug!(requested, "requested square size");

        Size::square(requested)
    }

    /// Resolves the preferred size against the parent's constraints.
    pub fn on_measure<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
        suggested_minimum: Size,
    ) -> Size {
        debug!(
            ?width_spec,
            ?height_spec,
            suggested_min_width = suggested_minimum.width,
            suggested_min_height = suggested_minimum.height,
            "measuring speedometer"
        );
        let requested = self.preferred_size(measure, suggested_minimum);
        let width = resolve_size(requested.width, width_spec);
        let height = resolve_size(requested.height, height_spec);
        if width.too_small || height.too_small {
            debug!(
                requested = requested.width,
                width = width.size,
                height = height.size,
                "parent constraint smaller than preferred size"
            );
        }
        Size::new(width.size, height.size)
    }

    /// Lays the dial out in a `width` x `height` area.
    ///
    /// The right and bottom padding are taken off the side length rather than
    /// inset from the far edge.
    pub fn on_size_changed(&mut self, width: i32, height: i32) -> RectF {
        let half_stroke = self.config.stroke_width / 2.0;
        let padding = self.config.padding;
        let size = width.min(height) as f32 - half_stroke;
        self.circle_rect = RectF::new(
            half_stroke + padding.left,
            half_stroke + padding.top,
            size - padding.right,
            size - padding.bottom,
        );
        debug!(width, height, rect = ?self.circle_rect, "speedometer resized");
        self.circle_rect
    }

    /// Needle angle in radians; 50 progress units make half a turn.
    pub fn needle_angle(&self) -> f64 {
        self.progress as f64 * (PI / 50.0)
    }

    pub fn needle(&self) -> Needle {
        let rect = self.circle_rect;
        let center_x = rect.center_x() as f64;
        let long_arm = (rect.width() / 2.0 - LONG_ARM_INSET) as f64;
        let short_arm = SHORT_ARM as f64;
        let (sin, cos) = self.needle_angle().sin_cos();

        // Both coordinates hang off the horizontal center.
        Needle {
            start: Point::new(
                (center_x - short_arm * sin) as f32,
                (center_x + short_arm * cos) as f32,
            ),
            end: Point::new(
                (center_x + long_arm * sin) as f32,
                (center_x - long_arm * cos) as f32,
            ),
        }
    }

    pub fn labels<M: TextMeasure + ?Sized>(&self, measure: &M) -> Vec<PlacedLabel> {
        let rect = self.circle_rect;
        let radius = (rect.width() / 2.0 - LABEL_INSET) as f64;
        let paint = self.text_paint();
        LABELS
            .iter()
            .enumerate()
            .map(|(i, &text)| {
                let angle = PI / 6.0 * i as f64;
                let bounds = measure.text_bounds(text, &paint);
                let x = rect.center_x() as f64 + radius * angle.sin() - bounds.width as f64 / 2.0;
                let y = rect.center_y() as f64 - radius * angle.cos() + bounds.height as f64 / 2.0;
                PlacedLabel {
                    text,
                    origin: Point::new(x as f32, y as f32),
                }
            })
            .collect()
    }

    /// Draws one frame. Later passes paint over earlier ones.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.draw_outer_circle(surface);
        self.draw_scale(surface);
        self.draw_speed_values(surface);
        self.draw_needle(surface);
        self.draw_center(surface);
    }

    fn draw_outer_circle<S: Surface + ?Sized>(&self, surface: &mut S) {
        let rect = self.circle_rect;
        surface.stroke_circle(
            rect.center(),
            rect.width() / 2.0 - OUTER_CIRCLE_INSET,
            &Paint::stroke(Color::BLACK, OUTER_CIRCLE_STROKE),
        );
    }

    // One vertical segment at 12 o'clock, with the frame turned between ticks.
    fn draw_scale<S: Surface + ?Sized>(&self, surface: &mut S) {
        let rect = self.circle_rect;
        let pivot = rect.center();
        let step = 360.0 / TICK_COUNT as f32;
        surface.save();
        for i in 0..TICK_COUNT {
            let tick = if i % MAJOR_TICK_EVERY == 0 {
                MAJOR_TICK
            } else {
                MINOR_TICK
            };
            let top = rect.top + TICK_TOP_OFFSET;
            surface.stroke_line(
                Point::new(pivot.x, top),
                Point::new(pivot.x, top + tick.length),
                &Paint::stroke(Color::BLACK, tick.stroke_width),
            );
            surface.rotate(step, pivot);
        }
        surface.restore();
    }

    fn draw_speed_values<S: Surface + ?Sized>(&self, surface: &mut S) {
        let paint = self.text_paint();
        for label in self.labels(&*surface) {
            surface.draw_text(label.text, label.origin, &paint);
        }
    }

    fn draw_needle<S: Surface + ?Sized>(&self, surface: &mut S) {
        let needle = self.needle();
        surface.stroke_line(needle.start, needle.end, &needle_paint());
    }

    fn draw_center<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.stroke_circle(self.circle_rect.center(), CENTER_RADIUS, &needle_paint());
    }
}

fn needle_paint() -> Paint {
    Paint::stroke(Color::BLACK, NEEDLE_STROKE)
}
