// Geometry primitives shared by the swarm builder and the axis transform.
//
// All swarm math happens in the "swarm frame": x is the categorical axis and
// y is the value axis, both in pixels. Orientation only decides how the
// display frame maps onto it.

use serde::{Deserialize, Serialize};

/// Points per inch; marker sizes and stroke widths are given in points.
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn swapped(&self) -> Point {
        Point { x: self.y, y: self.x }
    }
}

/// Which display axis carries the values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories along x, values along y.
    #[default]
    Vertical,
    /// Values along x, categories along y.
    Horizontal,
}

impl Orientation {
    /// Display frame -> swarm frame (categorical axis first).
    pub fn to_swarm_frame(self, p: Point) -> Point {
        match self {
            Orientation::Vertical => p,
            Orientation::Horizontal => p.swapped(),
        }
    }

    /// Swarm frame -> display frame. The swap is its own inverse.
    pub fn to_display_frame(self, p: Point) -> Point {
        self.to_swarm_frame(p)
    }

    /// Build a display-frame point from a categorical coordinate and a value.
    pub fn compose(self, category: f64, value: f64) -> Point {
        self.to_display_frame(Point::new(category, value))
    }
}

/// Minimum center-to-center pixel distance for two markers not to overlap.
pub fn marker_diameter(marker_size: f64, stroke_width: f64, dpi: f64) -> f64 {
    (marker_size + stroke_width) * (dpi / POINTS_PER_INCH)
}
