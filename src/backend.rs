//! Windowed output: winit event loop, glutin GL context, Skia GPU surface.

use std::{ffi::CString, num::NonZeroU32};

use anyhow::{Context, Result, anyhow};
use glutin::{
    config::{Config as GlutinConfig, ConfigTemplateBuilder, GlConfig},
    context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext},
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface as GlutinSurface, SurfaceAttributesBuilder, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use log::{debug, info, warn};
use raw_window_handle::HasWindowHandle;
use skia_safe::gpu::gl::FramebufferInfo;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::WindowConfig;
use crate::renderer::Renderer;
use crate::scene::Scene;

struct Env {
    gl_surface: GlutinSurface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

struct App {
    // drop order: renderer (DirectContext) before the window it draws into
    renderer: Renderer,
    env: Env,
    scene: Scene,
    scale_factor: f64,
    error: Option<anyhow::Error>,
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

impl App {
    fn handle_resize(&mut self, physical_size: winit::dpi::PhysicalSize<u32>) {
        let (w, h): (u32, u32) = physical_size.into();
        debug!("resize to {w}x{h}");
        self.env
            .gl_surface
            .resize(&self.env.gl_context, non_zero(w), non_zero(h));
        self.renderer.resize((w.max(1), h.max(1)));
        self.env.window.request_redraw();
    }

    fn redraw(&mut self) -> Result<()> {
        self.renderer.set_scale_factor(self.scale_factor as f32);
        self.renderer.redraw(&self.scene);
        self.env
            .gl_surface
            .swap_buffers(&self.env.gl_context)
            .context("swap_buffers failed")
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => self.handle_resize(physical_size),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                self.handle_resize(self.env.window.inner_size());
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.error = Some(err);
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

/// Lowest-sample candidate; Skia does its own anti-aliasing.
fn fewest_samples<T>(
    candidates: impl Iterator<Item = T>,
    samples: impl Fn(&T) -> u8,
) -> Option<T> {
    candidates.reduce(|accum, cfg| {
        if samples(&cfg) < samples(&accum) {
            cfg
        } else {
            accum
        }
    })
}

fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig {
    // glutin reports an empty match as a build error before calling the picker
    fewest_samples(configs, GlConfig::num_samples)
        .expect("display unavailable: no GL framebuffer config matched")
}

fn create_env_renderer(
    event_loop: &EventLoop<()>,
    config: &WindowConfig,
) -> Result<(Env, Renderer)> {
    let window_attributes = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_resizable(config.resizable)
        .with_inner_size(LogicalSize::new(config.size.0, config.size.1));

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);

    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
    let (window, gl_config) = display_builder
        .build(event_loop, template, pick_config)
        .map_err(|err| anyhow!("failed to build display: {err}"))?;

    let window = window.context("could not create window")?;
    let window_handle = window
        .window_handle()
        .context("failed to get window handle")?;
    let raw_window_handle = window_handle.as_raw();

    let context_attributes = ContextAttributesBuilder::new().build(Some(raw_window_handle));
    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(None))
        .build(Some(raw_window_handle));

    let display = gl_config.display();
    let not_current_gl_context = unsafe {
        display
            .create_context(&gl_config, &context_attributes)
            .or_else(|_| display.create_context(&gl_config, &fallback_context_attributes))
            .context("failed to create GL/GLES context")?
    };

    let (width, height): (u32, u32) = window.inner_size().into();
    let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        non_zero(width),
        non_zero(height),
    );

    let gl_surface = unsafe {
        display
            .create_window_surface(&gl_config, &attrs)
            .context("could not create GL window surface")?
    };

    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .context("could not make GL context current")?;

    let proc_address = |name: &str| {
        CString::new(name)
            .map(|name| display.get_proc_address(name.as_c_str()))
            .unwrap_or(std::ptr::null())
    };

    gl::load_with(proc_address);

    let interface = skia_safe::gpu::gl::Interface::new_load_with(|name| {
        if name == "eglGetCurrentDisplay" {
            return std::ptr::null();
        }
        proc_address(name)
    })
    .context("could not create Skia GL interface")?;

    let gr_context = skia_safe::gpu::direct_contexts::make_gl(interface, None)
        .context("make_gl failed: could not create Skia direct context")?;

    let fb_info = {
        let mut fboid: i32 = 0;
        unsafe { gl::GetIntegerv(gl::FRAMEBUFFER_BINDING, &mut fboid) };

        FramebufferInfo {
            fboid: fboid as u32,
            format: skia_safe::gpu::gl::Format::RGBA8.into(),
            ..Default::default()
        }
    };

    let num_samples = gl_config.num_samples() as usize;
    let stencil_size = gl_config.stencil_size() as usize;
    debug!("GL config: {num_samples} samples, {stencil_size}-bit stencil");

    let renderer = Renderer::new(
        (width, height),
        fb_info,
        gr_context,
        num_samples,
        stencil_size,
    )?;

    let env = Env {
        gl_surface,
        gl_context,
        window,
    };

    Ok((env, renderer))
}

/// Opens a window showing `scene` and blocks until the user closes it.
///
/// Any failure to obtain a display, GL context or Skia surface is returned
/// before the window is shown.
pub fn run(scene: Scene, config: &WindowConfig) -> Result<()> {
    let el = EventLoop::new().context("failed to create event loop")?;
    let (env, renderer) = create_env_renderer(&el, config)?;
    let scale_factor = env.window.scale_factor();
    let size = env.window.inner_size();
    info!(
        "window {:?} open at {}x{} (scale {scale_factor})",
        config.title, size.width, size.height
    );

    let mut app = App {
        renderer,
        env,
        scene,
        scale_factor,
        error: None,
    };

    // Wayland windows often only appear after the first present
    app.env.window.request_redraw();
    el.run_app(&mut app).context("event loop failed")?;

    match app.error.take() {
        Some(err) => {
            warn!("renderer stopped: {err:#}");
            Err(err)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewest_samples_prefers_lowest_count() {
        let picked = fewest_samples([4u8, 0, 8, 0].into_iter().enumerate(), |(_, n)| *n);
        assert_eq!(picked, Some((1, 0)));
    }

    #[test]
    fn fewest_samples_of_nothing_is_none() {
        assert_eq!(fewest_samples(std::iter::empty::<u8>(), |n| *n), None);
    }

    #[test]
    fn non_zero_clamps_empty_sizes() {
        assert_eq!(non_zero(0).get(), 1);
        assert_eq!(non_zero(640).get(), 640);
    }
}
