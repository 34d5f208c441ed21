//! Data-space <-> pixel-space conversion for the swarm.
//!
//! The swarm is computed in pixels so the marker diameter means the same thing
//! on both axes. This module maps display coordinates in data units to pixels
//! and back, and moves between the display frame and the swarm frame.

use crate::geometry::{Orientation, Point};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisTransform {
    pub orientation: Orientation,
    /// Pixels per categorical unit (one category slot is 1.0).
    pub category_pixels_per_unit: f64,
    /// Pixels per value unit.
    pub value_pixels_per_unit: f64,
}

impl AxisTransform {
    /// Per-display-axis scale factors (x, y).
    fn display_scale(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (self.category_pixels_per_unit, self.value_pixels_per_unit),
            Orientation::Horizontal => (self.value_pixels_per_unit, self.category_pixels_per_unit),
        }
    }

    /// Display coordinates in data units -> display coordinates in pixels.
    pub fn to_pixels(&self, data: Point) -> Point {
        let (sx, sy) = self.display_scale();
        Point::new(data.x * sx, data.y * sy)
    }

    /// Display coordinates in pixels -> display coordinates in data units.
    pub fn to_data(&self, px: Point) -> Point {
        let (sx, sy) = self.display_scale();
        Point::new(px.x / sx, px.y / sy)
    }

    /// A (category position, value) pair in data units -> swarm frame pixels.
    pub fn to_swarm(&self, category: f64, value: f64) -> Point {
        let display = self.orientation.compose(category, value);
        self.orientation.to_swarm_frame(self.to_pixels(display))
    }

    /// Swarm frame pixels -> categorical coordinate in data units.
    pub fn category_from_swarm(&self, p: Point) -> f64 {
        let data = self.to_data(self.orientation.to_display_frame(p));
        self.orientation.to_swarm_frame(data).x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(orientation: Orientation) -> AxisTransform {
        AxisTransform {
            orientation,
            category_pixels_per_unit: 100.0,
            value_pixels_per_unit: 10.0,
        }
    }

    #[test]
    fn test_vertical_scales_each_axis() {
        let t = transform(Orientation::Vertical);
        assert_eq!(t.to_pixels(Point::new(1.0, 2.0)), Point::new(100.0, 20.0));
        assert_eq!(t.to_swarm(1.0, 2.0), Point::new(100.0, 20.0));
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let t = transform(Orientation::Horizontal);
        // Display x carries the value
        assert_eq!(t.to_pixels(Point::new(2.0, 1.0)), Point::new(20.0, 100.0));
        // Swarm frame is always (category, value)
        assert_eq!(t.to_swarm(1.0, 2.0), Point::new(100.0, 20.0));
    }

    #[test]
    fn test_category_round_trip() {
        for o in [Orientation::Vertical, Orientation::Horizontal] {
            let t = transform(o);
            let p = t.to_swarm(2.5, -3.0);
            assert!((t.category_from_swarm(p) - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_data_pixel_round_trip() {
        let t = transform(Orientation::Vertical);
        let d = Point::new(0.37, 12.5);
        let back = t.to_data(t.to_pixels(d));
        assert!((back.x - d.x).abs() < 1e-12);
        assert!((back.y - d.y).abs() < 1e-12);
    }
}
