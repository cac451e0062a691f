use super::{AodPreference, SettingsStore};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// A mock [SettingsStore], usable when testing the actors using the trait.
#[derive(Clone)]
pub struct Store {
    sender: Arc<watch::Sender<AodPreference>>,
    receiver: watch::Receiver<AodPreference>,
}

impl Store {
    /// Create a new store holding the given initial preference
    pub fn new(initial: AodPreference) -> Store {
        let (sender, receiver) = watch::channel(initial);
        Store {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Simulate a write to the underlying setting.
    ///
    /// Subscribers are notified even when the value didn't change, matching
    /// the behavior of real settings stores.
    pub fn set_preference(&self, preference: AodPreference) -> Result<()> {
        Ok(self.sender.send(preference)?)
    }
}

impl SettingsStore for Store {
    fn preference_channel(&self) -> watch::Receiver<AodPreference> {
        self.receiver.clone()
    }
}
