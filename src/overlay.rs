//! Display-agnostic overlay annotations.
//!
//! The frame loop does not rasterize anything itself. It collects the shapes
//! to draw on top of a frame into an [`Overlay`], which the display
//! collaborator renders however it likes (OpenGL texture, OpenCV drawing
//! calls, a test buffer, ...). Positions are in pixel coordinates of the
//! frame; rounding to whole pixels is left to the renderer.

use nalgebra::Point2;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(u8, u8, u8);

impl Color {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
    pub const RED: Self = Self(255, 0, 0);
    pub const GREEN: Self = Self(0, 255, 0);

    /// Creates a color from 8-bit RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.1
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.2
    }
}

/// Color of the ink trail, the fingertip circle, and the "Pointer" caption.
pub const INK_COLOR: Color = Color::RED;
/// Color of the landmark markers.
pub const MARKER_COLOR: Color = Color::GREEN;
/// Color of the skeleton edges between landmarks.
pub const BONE_COLOR: Color = Color::from_rgb8(0, 128, 0);
/// Color of the per-hand "<side>: <gesture>" label.
pub const LABEL_COLOR: Color = Color::WHITE;
/// Color of the FPS readout.
pub const FPS_COLOR: Color = Color::GREEN;

/// Stroke width of the ink trail segments.
pub const INK_STROKE_WIDTH: u32 = 5;
/// Radius of the circle drawn on the pointing fingertip.
pub const FINGERTIP_RADIUS: u32 = 8;
/// Radius of the landmark markers.
pub const MARKER_RADIUS: u32 = 4;
/// Stroke width of skeleton edges.
pub const BONE_STROKE_WIDTH: u32 = 2;

/// A single shape to draw on top of the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A filled circular marker on a landmark.
    Marker {
        pos: Point2<f32>,
        radius: u32,
        color: Color,
    },
    /// A filled circle.
    Circle {
        center: Point2<f32>,
        radius: u32,
        color: Color,
    },
    /// A line segment.
    Line {
        start: Point2<f32>,
        end: Point2<f32>,
        color: Color,
        stroke_width: u32,
    },
    /// A text caption anchored at its top-left corner.
    Text {
        pos: Point2<f32>,
        text: String,
        color: Color,
        scale: f32,
        thickness: u32,
    },
}

/// The ordered list of shapes to draw over one frame.
///
/// Shapes are drawn in insertion order; later shapes paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    shapes: Vec<Shape>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shapes in drawing order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn marker(&mut self, pos: Point2<f32>, color: Color) {
        self.push(Shape::Marker {
            pos,
            radius: MARKER_RADIUS,
            color,
        });
    }

    pub fn circle(&mut self, center: Point2<f32>, radius: u32, color: Color) {
        self.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Color, stroke_width: u32) {
        self.push(Shape::Line {
            start,
            end,
            color,
            stroke_width,
        });
    }

    pub fn text(&mut self, pos: Point2<f32>, text: impl Into<String>, color: Color, scale: f32) {
        self.push(Shape::Text {
            pos,
            text: text.into(),
            color,
            scale,
            thickness: 2,
        });
    }

    /// Draws text with a faux-bold effect: two black shadow copies offset by
    /// one pixel diagonally, then the colored text on top.
    pub fn bold_text(&mut self, pos: Point2<f32>, text: &str, color: Color, scale: f32) {
        for offset in [Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)] {
            self.push(Shape::Text {
                pos: Point2::new(pos.x + offset.x, pos.y + offset.y),
                text: text.to_string(),
                color: Color::BLACK,
                scale,
                thickness: 4,
            });
        }
        self.push(Shape::Text {
            pos,
            text: text.to_string(),
            color,
            scale,
            thickness: 2,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_text_draws_shadows_first() {
        let mut overlay = Overlay::new();
        overlay.bold_text(Point2::new(10.0, 10.0), "Pointer", INK_COLOR, 1.0);

        let shapes = overlay.shapes();
        assert_eq!(shapes.len(), 3);
        for shadow in &shapes[..2] {
            let Shape::Text { color, .. } = shadow else {
                panic!("expected text, got {shadow:?}");
            };
            assert_eq!(*color, Color::BLACK);
        }
        let Shape::Text { color, text, .. } = &shapes[2] else {
            panic!("expected text");
        };
        assert_eq!(*color, INK_COLOR);
        assert_eq!(text, "Pointer");
    }
}
