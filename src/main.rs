#![warn(missing_docs)]

//! A daemon mirroring the user's Always-On-Display preference into the
//! display controller's override node.
//!
//! While the preference is enabled, screen on/off transitions are mirrored
//! into the node: "1" when the screen goes off, "0" when it comes back on.
//! While the preference is disabled, the hardware is left alone.

mod actors;
mod config;
mod control;
mod external;
mod system;

use crate::{
    actors::spawn_server, control::aod_controller::AodController,
    external::dependency_provider::DependencyProvider, system::aod_node::AodNodeEffector,
};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};

/// Command-line arguments
#[derive(Parser)]
#[clap(
    name = "vigilia",
    about = "Mirrors the Always-On-Display preference into a display override node"
)]
struct Args {
    /// Path to the daemon configuration file
    #[clap(
        short,
        long,
        parse(from_os_str),
        default_value = "/etc/vigilia/config.toml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    log_panics::init();

    let config = config::load(&args.config)?;
    log::info!(
        "Mirroring the interactive state into {}",
        config.control_file.display()
    );

    let dependency_provider = DependencyProvider::make_system(&config).await?;
    let node_port = spawn_server(AodNodeEffector::new(config.control_file.clone())).await?;
    let controller_handle = AodController::new(dependency_provider, node_port)
        .spawn()
        .await;

    wait_for_termination_signal().await?;
    log::info!("Shutting down");
    controller_handle.await_shutdown().await;
    Ok(())
}

async fn wait_for_termination_signal() -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
    Ok(())
}
