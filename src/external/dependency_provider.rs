use super::{
    dbus,
    power::{mock::Source as MockSource, screensaver::ScreenSaverSource, PowerSignalSource, PowerState},
    settings::{file::FileStore, mock::Store as MockStore, AodPreference, SettingsStore},
};
use crate::config::Config;
use anyhow::Result;
use tokio::sync::watch;

/// Aggregates the external capabilities the daemon's actors depend on, so
/// that tests can substitute fakes for all of them at once.
pub struct DependencyProvider<S: SettingsStore, P: PowerSignalSource> {
    settings_store: S,
    power_source: P,
}

impl<S: SettingsStore, P: PowerSignalSource> DependencyProvider<S, P> {
    pub fn new(settings_store: S, power_source: P) -> DependencyProvider<S, P> {
        DependencyProvider {
            settings_store,
            power_source,
        }
    }

    pub fn preference_channel(&self) -> watch::Receiver<AodPreference> {
        self.settings_store.preference_channel()
    }

    pub fn power_channel(&self) -> watch::Receiver<PowerState> {
        self.power_source.power_channel()
    }
}

impl DependencyProvider<FileStore, ScreenSaverSource> {
    pub async fn make_system(config: &Config) -> Result<Self> {
        let mut dbus_factory = dbus::ConnectionFactory::new();
        let connection = dbus_factory.get_session().await?;
        Ok(DependencyProvider::new(
            FileStore::new(config.settings_file.clone()),
            ScreenSaverSource::new(connection).await?,
        ))
    }
}

impl DependencyProvider<MockStore, MockSource> {
    pub fn make_mock() -> Self {
        DependencyProvider::new(
            MockStore::new(AodPreference::Disabled),
            MockSource::new(PowerState::Interactive),
        )
    }
}
