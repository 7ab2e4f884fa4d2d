// ============================================================================
// PIXEL-BUFFER SURFACE
// ============================================================================

use std::path::{Path, PathBuf};

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::error::{Result, SpeedViewError};
use crate::geometry::Point;
use crate::scene::{Paint, Surface, TextBounds, TextMeasure, TextPaint, TransformStack};

/// Fonts tried when none is given explicitly.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Text metrics and glyph outlines from a TrueType/OpenType font.
pub struct FontMetrics {
    font: Font<'static>,
}

impl FontMetrics {
    pub fn from_bytes(data: Vec<u8>, source_name: &str) -> Result<Self> {
        let font = Font::try_from_vec(data).ok_or_else(|| SpeedViewError::FontLoad {
            source_name: source_name.to_string(),
        })?;
        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, &path.display().to_string())
    }

    /// Loads `explicit` if given, otherwise the first candidate that parses.
    pub fn locate(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for candidate in candidates {
            match Self::from_file(candidate) {
                Ok(font) => {
                    tracing::debug!(path = %candidate.display(), "using system font");
                    return Ok(font);
                }
                Err(err) => tracing::trace!(path = %candidate.display(), %err, "font candidate rejected"),
            }
        }
        Err(SpeedViewError::NoFont {
            tried: candidates.to_vec(),
        })
    }

    fn layout(&self, text: &str, size: f32, baseline: Point) -> Vec<PositionedGlyph<'_>> {
        self.font
            .layout(text, Scale::uniform(size), point(baseline.x, baseline.y))
            .collect()
    }
}

impl TextMeasure for FontMetrics {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        if paint.size <= 0.0 {
            return TextBounds::default();
        }
        let glyphs = self.layout(text, paint.size, Point::default());
        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        TextBounds {
            width: if min_x < max_x { (max_x - min_x) as f32 } else { 0.0 },
            height: if min_y < max_y { (max_y - min_y) as f32 } else { 0.0 },
        }
    }
}

/// RGBA frame buffer that the gauge draws into.
///
/// Without a font, text measures as empty and is not drawn.
pub struct PixelCanvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a FontMetrics>,
    transform: TransformStack,
}

impl<'a> PixelCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
            font: None,
            transform: TransformStack::default(),
        }
    }

    pub fn with_font(mut self, font: &'a FontMetrics) -> Self {
        self.font = Some(font);
        self
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        if idx + 4 > self.frame.len() {
            return;
        }
        let a = (coverage * color.alpha()).clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

impl TextMeasure for PixelCanvas<'_> {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        self.font
            .map(|font| font.text_bounds(text, paint))
            .unwrap_or_default()
    }
}

impl Surface for PixelCanvas<'_> {
    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        let center = self.transform.current.apply(center);
        let half = paint.stroke_width / 2.0;
        let reach = (radius + half + 1.0).ceil() as i32;
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        for y in cy - reach..=cy + reach {
            for x in cx - reach..=cx + reach {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = 1.0 - ((dist - radius).abs() - half).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, paint.color, aa);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        let p0 = self.transform.current.apply(from);
        let p1 = self.transform.current.apply(to);
        let thickness = paint.stroke_width;
        let pad = thickness.ceil() + 1.0;
        let min_x = (p0.x.min(p1.x) - pad).floor() as i32;
        let max_x = (p0.x.max(p1.x) + pad).ceil() as i32;
        let min_y = (p0.y.min(p1.y) - pad).floor() as i32;
        let max_y = (p0.y.max(p1.y) + pad).ceil() as i32;
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5 - p0.x;
                let py = y as f32 + 0.5 - p0.y;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = p0.x + t * dx;
                let ly = p0.y + t * dy;
                let dist = ((lx - x as f32 - 0.5).powi(2) + (ly - y as f32 - 0.5).powi(2)).sqrt();
                let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, paint.color, aa);
                }
            }
        }
    }

    // Glyphs are placed at the transformed origin but not themselves rotated.
    fn draw_text(&mut self, text: &str, origin: Point, paint: &TextPaint) {
        let Some(font) = self.font else {
            return;
        };
        if paint.size <= 0.0 || paint.color.a == 0 {
            return;
        }
        let origin = self.transform.current.apply(origin);
        for glyph in font.layout(text, paint.size, origin) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    self.set_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, paint.color, v);
                });
            }
        }
    }

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.transform.rotate(degrees, pivot);
    }
}
