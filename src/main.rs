use anyhow::Result;
use log::info;

use turtle_heart::{Config, backend, draw_scene};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let scene = draw_scene(&config)?;
    info!("scene ready with {} draw ops", scene.ops().len());

    backend::run(scene, &config.window)
}
