pub mod backend;
pub mod color;
pub mod config;
pub mod cursor;
pub mod geometry;
pub mod heart;
pub mod raster_backend;
pub mod renderer;
pub mod scene;
pub mod turtle;

pub use config::Config;
pub use heart::{draw_heart, draw_scene};
pub use scene::{DrawOp, Scene};
pub use turtle::Turtle;
