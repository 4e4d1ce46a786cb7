//! Types for representing image resolutions.

use std::fmt;

use nalgebra::Point2;

/// Resolution (`width x height`) of an image, window, camera, or display.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// 1080p resolution: `1920x1080`
    pub const RES_1080P: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// 720p resolution: `1280x720`
    pub const RES_720P: Self = Self {
        width: 1280,
        height: 720,
    };

    /// Creates a new [`Resolution`] of `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width of this [`Resolution`].
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of this [`Resolution`].
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps a point with coordinates normalized to `[0, 1]` into pixel
    /// coordinates of this resolution.
    pub fn to_pixels(&self, normalized: Point2<f32>) -> Point2<f32> {
        Point2::new(
            normalized.x * self.width as f32,
            normalized.y * self.height as f32,
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_pixels() {
        let res = Resolution::new(640, 480);
        assert_eq!(
            res.to_pixels(Point2::new(0.5, 0.5)),
            Point2::new(320.0, 240.0)
        );
        assert_eq!(res.to_pixels(Point2::new(0.0, 1.0)), Point2::new(0.0, 480.0));
    }
}
