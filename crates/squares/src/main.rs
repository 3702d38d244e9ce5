mod animation;
mod app;
mod config;
mod panel;
mod scene;

use squares_engine::device::GpuInit;
use squares_engine::logging::{init_logging, LoggingConfig};
use squares_engine::window::Runtime;

use crate::app::SquaresApp;
use crate::config::SceneConfig;

fn main() {
    init_logging(LoggingConfig::default());

    let config = SceneConfig::default();
    let runtime = config.runtime_config();

    if let Err(err) = Runtime::run(runtime, GpuInit::default(), SquaresApp::new(config)) {
        log::error!("{err:#}");
        std::process::exit(-1);
    }

    log::info!("shutdown complete");
}
