use std::ops::{Add, Mul, Sub};

/// A point or displacement in turtle space: origin at the canvas centre,
/// +x to the east, +y to the north.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `heading` degrees (0 = east, counter-clockwise).
    pub fn from_heading(heading: f64) -> Self {
        let (sin, cos) = heading.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    /// Rotates counter-clockwise by `degrees`.
    pub fn rotate(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two headings, in degrees.
pub fn heading_delta(a: f64, b: f64) -> f64 {
    let d = normalize_heading(a - b);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_heading_points_counter_clockwise() {
        let north = Vec2::from_heading(90.0);
        assert!(north.x.abs() < 1e-12);
        assert!((north.y - 1.0).abs() < 1e-12);

        let west = Vec2::from_heading(180.0);
        assert!((west.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = Vec2::new(2.0, 0.0).rotate(90.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_heading_wraps_both_ways() {
        assert_eq!(normalize_heading(370.0), 10.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert!(normalize_heading(-1e-20) < 360.0);
    }

    #[test]
    fn heading_delta_takes_short_way_round() {
        assert!((heading_delta(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((heading_delta(90.0, 270.0) - 180.0).abs() < 1e-12);
    }
}
