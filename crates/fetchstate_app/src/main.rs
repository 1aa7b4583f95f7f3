mod app;
mod config;
mod render;
mod runner;

use std::path::PathBuf;

use anyhow::Context;
use loader_logging::loader_info;

use crate::app::App;
use crate::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => config::load(&path)
            .with_context(|| format!("loading demo config from {}", path.display()))?,
        None => DemoConfig::default(),
    };

    loader_logging::initialize(config.log_destination(), config.log_level());
    loader_info!("Running cases {:?}", config.cases);

    let mut app = App::new(&config).context("starting fetch engine")?;
    for case in &config.cases {
        app.run_case(*case, &config.script);
    }
    Ok(())
}
