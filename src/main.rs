mod config;
mod core;
mod domain;
mod geocode;
mod localize;
mod render;
mod session;
mod share;
mod widget;

use anyhow::Context;

use crate::config::PlaceShareConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();

    let config = PlaceShareConfig::load()?;
    log::debug!("Loaded config: {config:?}");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(core::app::run(config))
}
