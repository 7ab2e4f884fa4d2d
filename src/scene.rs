//! Drawing contract between the gauge and whatever surface renders it.
//!
//! Every primitive carries its own [`Paint`]; nothing is shared or mutated
//! between draw calls. [`Scene`] records calls as [`DrawCommand`]s so a frame
//! can be inspected or replayed onto another surface.

use crate::config::Color;
use crate::geometry::{Point, Transform};

/// Stroke style of a single circle or line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
}

impl Paint {
    pub const fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub color: Color,
    pub size: f32,
}

/// Pixel bounding box of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

pub trait TextMeasure {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        (**self).text_bounds(text, paint)
    }
}

/// Immediate-mode drawing surface.
///
/// Coordinates pass through the current transform. `save` pushes the
/// transform, `restore` pops it; `rotate` turns the frame clockwise about a
/// pivot. Text origins are the left end of the baseline.
pub trait Surface: TextMeasure {
    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &Paint);
    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint);
    fn draw_text(&mut self, text: &str, origin: Point, paint: &TextPaint);
    fn save(&mut self);
    fn restore(&mut self);
    fn rotate(&mut self, degrees: f32, pivot: Point);
}

/// Text metrics proportional to the text size, for hosts without a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    /// Advance per character as a fraction of the text size.
    pub advance: f32,
    /// Glyph height as a fraction of the text size.
    pub height: f32,
}

impl FixedMetrics {
    pub const fn new(advance: f32, height: f32) -> Self {
        Self { advance, height }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(0.6, 0.7)
    }
}

impl TextMeasure for FixedMetrics {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        TextBounds {
            width: (text.chars().count() as f32 * self.advance * paint.size).floor(),
            height: (self.height * paint.size).floor(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: Point,
        to: Point,
        paint: Paint,
    },
    Text {
        text: String,
        origin: Point,
        paint: TextPaint,
    },
    Save,
    Restore,
    Rotate {
        degrees: f32,
        pivot: Point,
    },
}

impl DrawCommand {
    /// Whether the command puts ink on the surface.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DrawCommand::Circle { .. } | DrawCommand::Line { .. } | DrawCommand::Text { .. }
        )
    }
}

/// A line after the transform in effect when it was drawn has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLine {
    pub from: Point,
    pub to: Point,
    pub paint: Paint,
}

/// Recording surface.
pub struct Scene<M> {
    commands: Vec<DrawCommand>,
    measure: M,
}

impl<M: TextMeasure> Scene<M> {
    pub fn new(measure: M) -> Self {
        Self {
            commands: Vec::new(),
            measure,
        }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn primitive_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_primitive()).count()
    }

    /// Transform left in effect after the recorded commands run.
    pub fn final_transform(&self) -> Transform {
        let mut stack = TransformStack::default();
        for command in &self.commands {
            stack.track(command);
        }
        stack.current
    }

    /// Every line in surface coordinates.
    pub fn resolved_lines(&self) -> Vec<ResolvedLine> {
        let mut stack = TransformStack::default();
        let mut lines = Vec::new();
        for command in &self.commands {
            if let DrawCommand::Line { from, to, paint } = command {
                lines.push(ResolvedLine {
                    from: stack.current.apply(*from),
                    to: stack.current.apply(*to),
                    paint: *paint,
                });
            }
            stack.track(command);
        }
        lines
    }

    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => surface.stroke_circle(*center, *radius, paint),
                DrawCommand::Line { from, to, paint } => surface.stroke_line(*from, *to, paint),
                DrawCommand::Text {
                    text,
                    origin,
                    paint,
                } => surface.draw_text(text, *origin, paint),
                DrawCommand::Save => surface.save(),
                DrawCommand::Restore => surface.restore(),
                DrawCommand::Rotate { degrees, pivot } => surface.rotate(*degrees, *pivot),
            }
        }
    }
}

impl<M: TextMeasure> TextMeasure for Scene<M> {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        self.measure.text_bounds(text, paint)
    }
}

impl<M: TextMeasure> Surface for Scene<M> {
    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.add_command(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.add_command(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, paint: &TextPaint) {
        self.add_command(DrawCommand::Text {
            text: text.to_string(),
            origin,
            paint: *paint,
        });
    }

    fn save(&mut self) {
        self.add_command(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.add_command(DrawCommand::Restore);
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.add_command(DrawCommand::Rotate { degrees, pivot });
    }
}

/// Save/restore bookkeeping shared by surfaces that apply transforms.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    pub current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores leave the transform untouched.
    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }

    pub fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.current = self
            .current
            .pre_concat(&Transform::rotation_about(degrees, pivot));
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    fn track(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Save => self.save(),
            DrawCommand::Restore => self.restore(),
            DrawCommand::Rotate { degrees, pivot } => self.rotate(*degrees, *pivot),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint() -> Paint {
        Paint::stroke(Color::BLACK, 2.0)
    }

    #[test]
    fn fixed_metrics_scale_with_size() {
        let metrics = FixedMetrics::new(0.5, 0.75);
        let bounds = metrics.text_bounds(
            "220",
            &TextPaint {
                color: Color::BLACK,
                size: 20.0,
            },
        );
        assert_eq!(bounds.width, 30.0);
        assert_eq!(bounds.height, 15.0);
    }

    #[test]
    fn lines_resolve_through_rotation() {
        let mut scene = Scene::new(FixedMetrics::default());
        let pivot = Point::new(50.0, 50.0);
        scene.save();
        scene.rotate(90.0, pivot);
        scene.stroke_line(Point::new(50.0, 0.0), Point::new(50.0, 10.0), &paint());
        scene.restore();
        scene.stroke_line(Point::new(50.0, 0.0), Point::new(50.0, 10.0), &paint());

        let lines = scene.resolved_lines();
        assert_eq!(lines.len(), 2);
        assert!((lines[0].from.x - 100.0).abs() < 1e-3);
        assert!((lines[0].from.y - 50.0).abs() < 1e-3);
        assert_eq!(lines[1].from, Point::new(50.0, 0.0));
        assert!(scene.final_transform().is_identity());
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut original = Scene::new(FixedMetrics::default());
        original.stroke_circle(Point::new(1.0, 2.0), 3.0, &paint());
        original.save();
        original.rotate(6.0, Point::new(0.0, 0.0));
        original.draw_text(
            "40",
            Point::new(4.0, 5.0),
            &TextPaint {
                color: Color::BLACK,
                size: 12.0,
            },
        );
        original.restore();

        let mut copy = Scene::new(FixedMetrics::default());
        original.replay(&mut copy);
        assert_eq!(copy.commands(), original.commands());
        assert_eq!(copy.primitive_count(), 2);
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut stack = TransformStack::default();
        stack.rotate(30.0, Point::new(1.0, 1.0));
        stack.restore();
        assert!(!stack.current.is_identity());
        assert_eq!(stack.depth(), 0);
    }
}
