//! Turtle-style cursor.
//!
//! A [`Turtle`] carries its own position, heading and pen attributes. It has
//! no access to any drawing surface of its own: every operation that can
//! produce output takes the [`Scene`] it draws into, so several turtles can
//! share one scene and tests can inspect exactly what was drawn.

use log::{debug, trace};
use skia_safe::Color;

use crate::cursor::{CursorState, Shape};
use crate::geometry::{Vec2, normalize_heading};
use crate::scene::{CursorId, DrawOp, OpIndex, Scene};

/// Speed levels outside `(0.5, 10.5)` mean "no animation".
pub const FASTEST: u8 = 0;

#[derive(Debug, Clone)]
struct FillPath {
    mark: OpIndex,
    points: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Turtle {
    id: CursorId,
    pos: Vec2,
    heading: f64,
    pen_down: bool,
    pen_color: Color,
    fill_color: Color,
    width: f32,
    speed: u8,
    shape: Shape,
    visible: bool,
    fill: Option<FillPath>,
}

impl Turtle {
    /// Creates a turtle at the origin facing east, pen down, and registers
    /// its glyph with `scene`.
    pub fn new(scene: &mut Scene) -> Self {
        let state = CursorState::new();
        let id = scene.register_cursor(state);
        Self {
            id,
            pos: state.pos,
            heading: state.heading,
            pen_down: true,
            pen_color: state.pen_color,
            fill_color: state.fill_color,
            width: 1.0,
            speed: 3,
            shape: state.shape,
            visible: state.visible,
            fill: None,
        }
    }

    pub fn id(&self) -> CursorId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_down(&self) -> bool {
        self.pen_down
    }

    pub fn is_filling(&self) -> bool {
        self.fill.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_shape(&mut self, scene: &mut Scene, shape: Shape) {
        self.shape = shape;
        self.sync(scene);
    }

    /// Sets both pen and fill color.
    pub fn set_color(&mut self, scene: &mut Scene, color: Color) {
        self.pen_color = color;
        self.fill_color = color;
        self.sync(scene);
    }

    pub fn set_pen_color(&mut self, scene: &mut Scene, color: Color) {
        self.pen_color = color;
        self.sync(scene);
    }

    pub fn set_fill_color(&mut self, scene: &mut Scene, color: Color) {
        self.fill_color = color;
        self.sync(scene);
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    /// Levels 1 (slowest) to 10 are kept, rounded; anything outside
    /// `(0.5, 10.5)` becomes [`FASTEST`].
    pub fn set_speed(&mut self, level: f64) {
        self.speed = if level > 0.5 && level < 10.5 {
            level.round() as u8
        } else {
            FASTEST
        };
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    pub fn show(&mut self, scene: &mut Scene) {
        self.visible = true;
        self.sync(scene);
    }

    pub fn hide(&mut self, scene: &mut Scene) {
        self.visible = false;
        self.sync(scene);
    }

    pub fn turn_left(&mut self, scene: &mut Scene, degrees: f64) {
        self.heading = normalize_heading(self.heading + degrees);
        self.sync(scene);
    }

    pub fn turn_right(&mut self, scene: &mut Scene, degrees: f64) {
        self.turn_left(scene, -degrees);
    }

    pub fn set_heading(&mut self, scene: &mut Scene, degrees: f64) {
        self.heading = normalize_heading(degrees);
        self.sync(scene);
    }

    pub fn forward(&mut self, scene: &mut Scene, distance: f64) {
        let target = self.pos + Vec2::from_heading(self.heading) * distance;
        self.go_to(scene, target);
    }

    pub fn backward(&mut self, scene: &mut Scene, distance: f64) {
        self.forward(scene, -distance);
    }

    /// Moves to `(x, y)` without changing the heading.
    pub fn move_to(&mut self, scene: &mut Scene, x: f64, y: f64) {
        self.go_to(scene, Vec2::new(x, y));
    }

    /// Returns to the origin and faces east.
    pub fn home(&mut self, scene: &mut Scene) {
        self.go_to(scene, Vec2::ZERO);
        self.set_heading(scene, 0.0);
    }

    /// Traces a circular arc of `radius` sweeping `extent` degrees.
    ///
    /// The centre lies `radius` units to the left of the turtle, so a
    /// positive radius curves counter-clockwise. A negative radius mirrors
    /// the arc to the right; a negative extent runs it backwards. The arc is
    /// approximated by chords whose endpoints lie on the true circle, so the
    /// final position and heading match the exact arc.
    pub fn arc(&mut self, scene: &mut Scene, radius: f64, extent: f64) {
        let steps = arc_steps(radius, extent);
        let mut step_angle = extent / steps as f64;
        let mut half_step = 0.5 * step_angle;
        let mut chord = 2.0 * radius * half_step.to_radians().sin();
        if radius < 0.0 {
            chord = -chord;
            step_angle = -step_angle;
            half_step = -half_step;
        }

        trace!("arc r={radius} extent={extent} in {steps} chords");
        self.turn_left(scene, half_step);
        for _ in 0..steps {
            self.forward(scene, chord);
            self.turn_left(scene, step_angle);
        }
        self.turn_left(scene, -half_step);
    }

    /// Starts recording a fill path at the current position. Calling it
    /// again while a fill is open discards the open path and starts over.
    pub fn begin_fill(&mut self, scene: &mut Scene) {
        if self.fill.is_some() {
            debug!("begin_fill while filling, restarting fill path");
        }
        self.fill = Some(FillPath {
            mark: scene.mark(),
            points: vec![self.pos],
        });
    }

    /// Closes the open fill path with a straight edge back to its start and
    /// fills it with the fill color. The fill goes beneath everything drawn
    /// since [`Turtle::begin_fill`]. Without an open fill this does nothing.
    pub fn end_fill(&mut self, scene: &mut Scene) {
        let Some(fill) = self.fill.take() else {
            debug!("end_fill without begin_fill ignored");
            return;
        };

        if fill.points.len() < 3 {
            debug!(
                "fill path has {} point(s), nothing to fill",
                fill.points.len()
            );
            return;
        }

        debug!("filling polygon with {} points", fill.points.len());
        scene.insert_at(
            fill.mark,
            DrawOp::Fill {
                points: fill.points,
                color: self.fill_color,
            },
        );
    }

    fn go_to(&mut self, scene: &mut Scene, target: Vec2) {
        let from = self.pos;
        self.pos = target;

        if self.pen_down && from != target {
            trace!(
                "line ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                from.x, from.y, target.x, target.y
            );
            scene.push(DrawOp::Line {
                from,
                to: target,
                color: self.pen_color,
                width: self.width,
            });
        }

        if let Some(fill) = self.fill.as_mut() {
            fill.points.push(target);
        }

        self.sync(scene);
    }

    fn sync(&self, scene: &mut Scene) {
        scene.update_cursor(
            self.id,
            CursorState {
                pos: self.pos,
                heading: self.heading,
                shape: self.shape,
                pen_color: self.pen_color,
                fill_color: self.fill_color,
                visible: self.visible,
            },
        );
    }
}

/// Number of chords used to approximate an arc.
pub fn arc_steps(radius: f64, extent: f64) -> usize {
    let fraction = extent.abs() / 360.0;
    1 + ((11.0 + radius.abs() / 6.0).min(59.0) * fraction) as usize
}
