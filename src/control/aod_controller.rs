use crate::{
    actors::{Handle, HandleChild},
    external::{
        dependency_provider::DependencyProvider,
        power::{PowerSignalSource, PowerState},
        settings::{AodPreference, SettingsStore},
    },
    system::aod_node::{NodePort, OverrideCommand},
};
use tokio::sync::watch;

/// Routes preference and interactive-state changes into override-node
/// writes.
///
/// The controller always listens for preference changes. The interactive
/// state is mirrored into the node only while the preference is enabled;
/// the mirroring subscription is taken and dropped as the preference
/// toggles.
pub struct AodController<S: SettingsStore, P: PowerSignalSource> {
    dependency_provider: DependencyProvider<S, P>,
    node_port: NodePort,
    handle_child: Option<HandleChild>,
}

impl<S: SettingsStore + Sync + 'static, P: PowerSignalSource + Sync + 'static> AodController<S, P> {
    pub fn new(
        dependency_provider: DependencyProvider<S, P>,
        node_port: NodePort,
    ) -> AodController<S, P> {
        AodController {
            dependency_provider,
            node_port,
            handle_child: None,
        }
    }

    pub async fn spawn(mut self) -> Handle {
        let (handle, handle_child) = Handle::new();
        self.handle_child = Some(handle_child);

        tokio::spawn(async move {
            self.main_loop().await;
        });

        handle
    }

    async fn main_loop(&mut self) {
        let mut preference_rx = self.dependency_provider.preference_channel();
        let mut power_rx = self.dependency_provider.power_channel();
        let mut mirroring = preference_rx.borrow_and_update().is_enabled();
        if mirroring {
            log::info!("AOD enabled on startup, mirroring the interactive state");
            power_rx.borrow_and_update();
        }
        loop {
            tokio::select! {
                _ = self.handle_child.as_mut().unwrap().should_terminate() => {
                    log::info!("Handle dropped, terminating");
                    return;
                }
                res = preference_rx.changed() => {
                    if res.is_err() {
                        log::error!("Settings store went away, terminating");
                        return;
                    }
                    let preference = *preference_rx.borrow_and_update();
                    mirroring = self.apply_preference(preference, &mut power_rx);
                }
                res = power_rx.changed(), if mirroring => {
                    if res.is_err() {
                        log::error!("Power signal source went away, terminating");
                        return;
                    }
                    let state = *power_rx.borrow_and_update();
                    self.mirror_power_state(state).await;
                }
            }
        }
    }

    /// Activates or deactivates mirroring to match the given preference
    /// value, returning the new mirroring flag.
    ///
    /// Activation is performed even when mirroring is already active,
    /// matching the idempotent re-registration of the underlying
    /// subscription mechanism.
    fn apply_preference(
        &self,
        preference: AodPreference,
        power_rx: &mut watch::Receiver<PowerState>,
    ) -> bool {
        match preference {
            AodPreference::Enabled => {
                log::debug!("AOD enabled");
                *power_rx = self.dependency_provider.power_channel();
                // Transitions from before this subscription must not be
                // replayed into the node.
                power_rx.borrow_and_update();
                true
            }
            AodPreference::Disabled => {
                log::debug!("AOD disabled");
                false
            }
        }
    }

    async fn mirror_power_state(&self, state: PowerState) {
        let command = match state {
            PowerState::Interactive => {
                log::debug!("Device interactive");
                OverrideCommand::Release
            }
            PowerState::NonInteractive => {
                log::debug!("Device non-interactive");
                OverrideCommand::Engage
            }
        };
        if let Err(e) = self.node_port.request(command).await {
            log::error!("Couldn't update the AOD override node: {:?}", e);
        }
    }
}
