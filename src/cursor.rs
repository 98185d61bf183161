use std::fmt;
use std::str::FromStr;

use skia_safe::Color;

use crate::geometry::Vec2;

/// Glyph outlines in shape space: +y points along the heading, +x to the
/// cursor's right.
const CLASSIC: &[(f64, f64)] = &[(0.0, 0.0), (-5.0, -9.0), (0.0, -7.0), (5.0, -9.0)];
const ARROW: &[(f64, f64)] = &[(-10.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
const SQUARE: &[(f64, f64)] = &[(10.0, -10.0), (10.0, 10.0), (-10.0, 10.0), (-10.0, -10.0)];
const TRIANGLE: &[(f64, f64)] = &[(10.0, -5.77), (0.0, 11.55), (-10.0, -5.77)];
const TURTLE: &[(f64, f64)] = &[
    (0.0, 16.0),
    (-2.0, 14.0),
    (-1.0, 10.0),
    (-4.0, 7.0),
    (-7.0, 9.0),
    (-9.0, 8.0),
    (-6.0, 5.0),
    (-7.0, 1.0),
    (-5.0, -3.0),
    (-8.0, -6.0),
    (-6.0, -8.0),
    (-4.0, -5.0),
    (0.0, -7.0),
    (4.0, -5.0),
    (6.0, -8.0),
    (8.0, -6.0),
    (5.0, -3.0),
    (7.0, 1.0),
    (6.0, 5.0),
    (9.0, 8.0),
    (7.0, 9.0),
    (4.0, 7.0),
    (1.0, 10.0),
    (2.0, 14.0),
];
const CIRCLE_RADIUS: f64 = 10.0;
const CIRCLE_SEGMENTS: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Classic,
    Arrow,
    Turtle,
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Classic => "classic",
            Shape::Arrow => "arrow",
            Shape::Turtle => "turtle",
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        }
    }

    /// Outline of the glyph in shape space.
    pub fn outline(self) -> Vec<Vec2> {
        let points = match self {
            Shape::Classic => CLASSIC,
            Shape::Arrow => ARROW,
            Shape::Turtle => TURTLE,
            Shape::Square => SQUARE,
            Shape::Triangle => TRIANGLE,
            Shape::Circle => {
                return (0..CIRCLE_SEGMENTS)
                    .map(|i| {
                        let angle = 360.0 * i as f64 / CIRCLE_SEGMENTS as f64;
                        Vec2::from_heading(angle) * CIRCLE_RADIUS
                    })
                    .collect();
            }
        };
        points.iter().copied().map(Vec2::from).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseShapeError(String);

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "there is no shape named {:?}", self.0)
    }
}

impl std::error::Error for ParseShapeError {}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Shape::Classic,
            "arrow" => Shape::Arrow,
            "turtle" => Shape::Turtle,
            "circle" => Shape::Circle,
            "square" => Shape::Square,
            "triangle" => Shape::Triangle,
            _ => return Err(ParseShapeError(s.to_string())),
        })
    }
}

/// What the renderer needs to draw one turtle's glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub pos: Vec2,
    pub heading: f64,
    pub shape: Shape,
    pub pen_color: Color,
    pub fill_color: Color,
    pub visible: bool,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: 0.0,
            shape: Shape::default(),
            pen_color: Color::BLACK,
            fill_color: Color::BLACK,
            visible: true,
        }
    }

    /// Glyph outline placed at the cursor position and rotated to its heading.
    pub fn glyph_polygon(&self) -> Vec<Vec2> {
        let forward = Vec2::from_heading(self.heading);
        let right = Vec2::from_heading(self.heading - 90.0);
        self.shape
            .outline()
            .into_iter()
            .map(|p| self.pos + forward * p.y + right * p.x)
            .collect()
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}
