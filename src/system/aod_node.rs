use crate::actors::{ActorPort, Server};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::{fs, path::PathBuf};

/// A command for the display controller's AOD override node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideCommand {
    /// Take over panel handling from the hardware (written while the screen
    /// is off)
    Engage,
    /// Hand panel handling back to the hardware (written while the screen is
    /// on)
    Release,
}

impl OverrideCommand {
    /// The literal value the node expects for this command
    pub fn node_value(&self) -> &'static str {
        match self {
            OverrideCommand::Engage => "1",
            OverrideCommand::Release => "0",
        }
    }
}

pub type NodePort = ActorPort<OverrideCommand, (), anyhow::Error>;

/// An actor owning the sysfs-style AOD override node.
///
/// Writes are overwrites of the whole node value; only the most recent one
/// matters, so there is no queueing or retrying.
pub struct AodNodeEffector {
    node_path: PathBuf,
}

impl AodNodeEffector {
    pub fn new(node_path: PathBuf) -> AodNodeEffector {
        AodNodeEffector { node_path }
    }
}

#[async_trait]
impl Server<OverrideCommand, ()> for AodNodeEffector {
    fn get_name(&self) -> String {
        "AodNodeEffector".to_owned()
    }

    async fn initialize(&mut self) -> Result<()> {
        if !self.node_path.exists() {
            log::warn!(
                "AOD override node {} is missing, writes will fail",
                self.node_path.display()
            );
        }
        Ok(())
    }

    async fn handle_message(&mut self, payload: OverrideCommand) -> Result<()> {
        let value = payload.node_value();
        log::debug!(
            "Writing {} to AOD override node {}",
            value,
            self.node_path.display()
        );
        let path = self.node_path.clone();
        tokio::task::spawn_blocking(move || {
            fs::write(&path, format!("{}\n", value))
                .with_context(|| format!("couldn't write to AOD override node {}", path.display()))
        })
        .await?
    }
}
