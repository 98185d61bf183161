//! Fixed settings for the window, the pen and the heart outline.

use crate::geometry::Vec2;

#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Logical size in points.
    pub size: (u32, u32),
    pub title: String,
    pub resizable: bool,
    /// Color name or `#rrggbb`.
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: (800, 600),
            title: String::from("Heart"),
            resizable: true,
            background: String::from("white"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PenConfig {
    pub shape: String,
    pub color: String,
    pub speed: f64,
    pub width: f32,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            shape: String::from("turtle"),
            color: String::from("red"),
            speed: 3.0,
            width: 1.0,
        }
    }
}

/// Geometry of the heart outline. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct HeartConfig {
    pub start: Vec2,
    pub start_heading: f64,
    /// Turn before the first straight side.
    pub lean: f64,
    pub side: f64,
    pub lobe_radius: f64,
    pub lobe_extent: f64,
    /// Right turn between the two lobes.
    pub notch_turn: f64,
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(0.0, -100.0),
            start_heading: 0.0,
            lean: 50.0,
            side: 133.0,
            lobe_radius: 50.0,
            lobe_extent: 200.0,
            notch_turn: 140.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub window: WindowConfig,
    pub pen: PenConfig,
    pub heart: HeartConfig,
}
