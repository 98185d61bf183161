//! The drawing context turtles draw into.
//!
//! A [`Scene`] owns the background color, an ordered display list of
//! [`DrawOp`]s and one [`CursorState`] per turtle created from it. It holds
//! no display resources, so the same scene can be inspected in tests,
//! rasterized headlessly, or handed to the window backend.

use skia_safe::Color;

use crate::cursor::CursorState;
use crate::geometry::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Filled polygon. The closing edge back to the first point is implicit.
    Fill { points: Vec<Vec2>, color: Color },
}

/// Handle to a turtle's glyph slot in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CursorId(pub(crate) usize);

/// Reserved slot in the display order. Stays valid while other ops are
/// pushed or inserted around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpIndex(u64);

#[derive(Clone, Debug)]
pub struct Scene {
    pub background: Color,
    ops: Vec<DrawOp>,
    // display order of each op, strictly increasing alongside `ops`
    seqs: Vec<u64>,
    next_seq: u64,
    cursors: Vec<CursorState>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            ops: Vec::new(),
            seqs: Vec::new(),
            next_seq: 0,
            cursors: Vec::new(),
        }
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn push(&mut self, op: DrawOp) {
        let seq = self.take_seq();
        self.ops.push(op);
        self.seqs.push(seq);
    }

    /// Reserves a slot after everything drawn so far. Nothing is drawn
    /// until [`Scene::insert_at`] fills it.
    pub fn mark(&mut self) -> OpIndex {
        OpIndex(self.take_seq())
    }

    /// Inserts `op` into a slot returned by [`Scene::mark`]: above every op
    /// drawn before the mark, below every op drawn after it.
    pub fn insert_at(&mut self, index: OpIndex, op: DrawOp) {
        let at = self.seqs.partition_point(|&seq| seq < index.0);
        self.ops.insert(at, op);
        self.seqs.insert(at, index.0);
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { from, to, .. } => Some((*from, *to)),
            DrawOp::Fill { .. } => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = &[Vec2]> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { points, .. } => Some(points.as_slice()),
            DrawOp::Line { .. } => None,
        })
    }

    pub(crate) fn register_cursor(&mut self, state: CursorState) -> CursorId {
        self.cursors.push(state);
        CursorId(self.cursors.len() - 1)
    }

    pub(crate) fn update_cursor(&mut self, id: CursorId, state: CursorState) {
        if let Some(slot) = self.cursors.get_mut(id.0) {
            *slot = state;
        }
    }

    pub fn cursor(&self, id: CursorId) -> Option<&CursorState> {
        self.cursors.get(id.0)
    }

    pub fn visible_cursors(&self) -> impl Iterator<Item = &CursorState> + '_ {
        self.cursors.iter().filter(|c| c.visible)
    }
}
