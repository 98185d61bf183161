use anyhow::{Context, Result};
use log::warn;
use skia_safe::{
    Canvas, Color, ColorType, Paint, PaintCap, PaintJoin, PaintStyle, PathBuilder, Point, Surface,
    gpu::{self, SurfaceOrigin, backend_render_targets, gl::FramebufferInfo},
};

use crate::cursor::CursorState;
use crate::geometry::Vec2;
use crate::scene::{DrawOp, Scene};

const GLYPH_OUTLINE_WIDTH: f32 = 1.0;

fn create_skia_surface(
    dimensions: (i32, i32),
    fb_info: FramebufferInfo,
    gr_context: &mut gpu::DirectContext,
    num_samples: usize,
    stencil_size: usize,
) -> Option<Surface> {
    let backend_render_target =
        backend_render_targets::make_gl(dimensions, num_samples, stencil_size, fb_info);

    gpu::surfaces::wrap_backend_render_target(
        gr_context,
        &backend_render_target,
        SurfaceOrigin::BottomLeft,
        ColorType::RGBA8888,
        None,
        None,
    )
}

#[derive(Clone, Copy)]
pub enum SurfaceSource {
    Gl {
        fb_info: FramebufferInfo,
        num_samples: usize,
        stencil_size: usize,
    },
    Raster,
}

/// Paints a [`Scene`] onto a Skia surface, turtle origin at the centre.
pub struct Renderer {
    surface: Surface,
    gr_context: Option<gpu::DirectContext>,
    source: SurfaceSource,
    scale_factor: f32,
}

impl Renderer {
    pub fn new(
        dimensions: (u32, u32),
        fb_info: FramebufferInfo,
        gr_context: gpu::DirectContext,
        num_samples: usize,
        stencil_size: usize,
    ) -> Result<Self> {
        let mut gr_context = gr_context;
        let surface = create_skia_surface(
            (dimensions.0 as i32, dimensions.1 as i32),
            fb_info,
            &mut gr_context,
            num_samples,
            stencil_size,
        )
        .context("could not create Skia surface")?;

        Ok(Self {
            surface,
            gr_context: Some(gr_context),
            source: SurfaceSource::Gl {
                fb_info,
                num_samples,
                stencil_size,
            },
            scale_factor: 1.0,
        })
    }

    pub fn from_surface(surface: Surface, gr_context: Option<gpu::DirectContext>) -> Self {
        Self {
            surface,
            gr_context,
            source: SurfaceSource::Raster,
            scale_factor: 1.0,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor.max(0.1);
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn redraw(&mut self, scene: &Scene) {
        let (width, height) = (self.surface.width() as f32, self.surface.height() as f32);
        let canvas = self.surface.canvas();
        canvas.clear(scene.background);

        canvas.save();
        canvas.translate((width / 2.0, height / 2.0));
        // turtle space has +y pointing up
        canvas.scale((self.scale_factor, -self.scale_factor));

        draw_scene(canvas, scene);

        canvas.restore();

        if let Some(gr) = self.gr_context.as_mut() {
            gr.flush_and_submit();
        }
    }

    pub fn resize(&mut self, dimensions: (u32, u32)) {
        if let SurfaceSource::Gl {
            fb_info,
            num_samples,
            stencil_size,
        } = self.source
            && let Some(context) = self.gr_context.as_mut()
        {
            match create_skia_surface(
                (dimensions.0 as i32, dimensions.1 as i32),
                fb_info,
                context,
                num_samples,
                stencil_size,
            ) {
                Some(surface) => self.surface = surface,
                None => warn!(
                    "could not recreate Skia surface at {}x{}, keeping previous size",
                    dimensions.0, dimensions.1
                ),
            }
        }
    }
}

fn draw_scene(canvas: &Canvas, scene: &Scene) {
    for op in scene.ops() {
        match op {
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => {
                let paint = stroke_paint(*color, *width);
                canvas.draw_line(to_point(*from), to_point(*to), &paint);
            }
            DrawOp::Fill { points, color } => {
                let paint = fill_paint(*color);
                canvas.draw_path(&polygon_path(points), &paint);
            }
        }
    }

    for cursor in scene.visible_cursors() {
        draw_cursor(canvas, cursor);
    }
}

fn draw_cursor(canvas: &Canvas, cursor: &CursorState) {
    let path = polygon_path(&cursor.glyph_polygon());
    canvas.draw_path(&path, &fill_paint(cursor.fill_color));
    canvas.draw_path(&path, &stroke_paint(cursor.pen_color, GLYPH_OUTLINE_WIDTH));
}

fn polygon_path(points: &[Vec2]) -> skia_safe::Path {
    let points: Vec<Point> = points.iter().copied().map(to_point).collect();
    let mut builder = PathBuilder::new();
    builder.add_polygon(&points, true);
    builder.detach()
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f32, v.y as f32)
}

fn fill_paint(color: Color) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(PaintStyle::Fill);
    paint.set_color(color);
    paint
}

fn stroke_paint(color: Color, width: f32) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(PaintStyle::Stroke);
    paint.set_stroke_width(width);
    paint.set_stroke_cap(PaintCap::Round);
    paint.set_stroke_join(PaintJoin::Round);
    paint.set_color(color);
    paint
}
