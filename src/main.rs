mod key_map;
mod render;
mod terminal;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use clap::Parser;
use kitchen_core::configuration::KitchenConfiguration;
use kitchen_core::KitchenCorePlugin;
use simplelog::{LevelFilter, WriteLogger};

/// Plan, replay, and commit the moves of a small kitchen crew.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Write debug logs to debug.log
    #[arg(long)]
    debug: bool,
    /// TOML file with layout, plates, orders, and animation speed
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.debug {
        setup_logging()?;
    }
    let configuration = match &args.config {
        Some(path) => KitchenConfiguration::load(path)?,
        None => KitchenConfiguration::default(),
    };
    log::debug!("Starting kitchen with {:?}", configuration);

    let kitchen = KitchenCorePlugin::from_configuration(&configuration)?;
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))),
        )
        .add_plugins((kitchen, terminal::TerminalPlugin))
        .run();
    Ok(())
}

fn setup_logging() -> anyhow::Result<()> {
    let file = File::create("debug.log").context("could not create debug.log")?;
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        file,
    )
    .context("could not install logger")
}
