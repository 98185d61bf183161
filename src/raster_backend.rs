//! Headless rendering into an in-memory RGB frame.

use anyhow::{Context, Result, bail};
use skia_safe::{AlphaType, ColorType, ImageInfo, image::CachingHint, surfaces};

use crate::{renderer::Renderer, scene::Scene};

/// Tightly packed RGB pixels, row-major from the top-left corner.
#[derive(Clone, Debug)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterFrame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        match self.data.get(offset..offset + 3)? {
            &[r, g, b] => Some((r, g, b)),
            _ => None,
        }
    }

    /// Pixel at turtle-space coordinates, origin at the frame centre.
    pub fn pixel_at_turtle(&self, x: f64, y: f64) -> Option<(u8, u8, u8)> {
        let px = (self.width as f64 / 2.0 + x).floor();
        let py = (self.height as f64 / 2.0 - y).floor();
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px as u32, py as u32)
    }
}

fn read_frame(renderer: &mut Renderer, size: (u32, u32)) -> Result<RasterFrame> {
    let (width, height) = size;
    let image = renderer.surface_mut().image_snapshot();
    let image_info = ImageInfo::new(
        (width as i32, height as i32),
        ColorType::RGB888x,
        AlphaType::Opaque,
        None,
    );
    let row_bytes = image_info.min_row_bytes();
    let mut pixels = vec![0u8; row_bytes * height as usize];
    let ok = image.read_pixels(
        &image_info,
        pixels.as_mut_slice(),
        row_bytes,
        (0, 0),
        CachingHint::Disallow,
    );
    if !ok {
        bail!("failed to read back raster pixels");
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for row in pixels.chunks_exact(row_bytes) {
        for chunk in row[..width as usize * 4].chunks_exact(4) {
            rgb.extend_from_slice(&chunk[..3]);
        }
    }

    Ok(RasterFrame {
        width,
        height,
        data: rgb,
    })
}

/// Renders `scene` onto a CPU surface of `size` pixels.
pub fn render(scene: &Scene, size: (u32, u32)) -> Result<RasterFrame> {
    let width = size.0.max(1);
    let height = size.1.max(1);

    let image_info = ImageInfo::new(
        (width as i32, height as i32),
        ColorType::BGRA8888,
        AlphaType::Premul,
        None,
    );

    let surface =
        surfaces::raster(&image_info, None, None).context("failed to create raster surface")?;

    let mut renderer = Renderer::from_surface(surface, None);
    renderer.redraw(scene);

    read_frame(&mut renderer, (width, height))
}
