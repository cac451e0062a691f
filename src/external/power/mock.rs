use super::{PowerSignalSource, PowerState};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// A mock [PowerSignalSource], usable when testing the actors using the
/// trait.
#[derive(Clone)]
pub struct Source {
    sender: Arc<watch::Sender<PowerState>>,
    receiver: watch::Receiver<PowerState>,
}

impl Source {
    /// Create a new source reporting the given initial state
    pub fn new(initial: PowerState) -> Source {
        let (sender, receiver) = watch::channel(initial);
        Source {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Simulate an interactive-state transition
    pub fn notify_power_transition(&self, new_state: PowerState) -> Result<()> {
        Ok(self.sender.send(new_state)?)
    }
}

impl PowerSignalSource for Source {
    fn power_channel(&self) -> watch::Receiver<PowerState> {
        self.receiver.clone()
    }
}
