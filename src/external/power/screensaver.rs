use super::{PowerSignalSource, PowerState};
use anyhow::Result;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use zbus::dbus_proxy;

#[dbus_proxy(
    interface = "org.freedesktop.ScreenSaver",
    default_service = "org.freedesktop.ScreenSaver",
    default_path = "/org/freedesktop/ScreenSaver"
)]
trait ScreenSaver {
    fn get_active(&self) -> zbus::Result<bool>;

    #[dbus_proxy(signal)]
    fn active_changed(&self, active: bool) -> zbus::Result<()>;
}

/// A [PowerSignalSource] fed by the session's screensaver interface.
///
/// An active screensaver blanks the screen, so ActiveChanged(true) maps to
/// [PowerState::NonInteractive] and ActiveChanged(false) to
/// [PowerState::Interactive].
pub struct ScreenSaverSource {
    receiver: watch::Receiver<PowerState>,
}

impl ScreenSaverSource {
    pub async fn new(session_connection: zbus::Connection) -> Result<ScreenSaverSource> {
        let proxy = ScreenSaverProxy::new(&session_connection).await?;
        let current_state = screen_state(proxy.get_active().await?);
        log::debug!(
            "Interactive state on spawn of ScreenSaverSource is {:?}",
            current_state
        );
        let stream = proxy.receive_active_changed().await?;
        let (updates_sender, updates_receiver) = watch::channel(current_state);
        let mut monitor = ScreenSaverMonitor {
            stream,
            updates_sender,
        };
        tokio::spawn(async move {
            monitor.run().await;
        });
        Ok(ScreenSaverSource {
            receiver: updates_receiver,
        })
    }
}

impl PowerSignalSource for ScreenSaverSource {
    fn power_channel(&self) -> watch::Receiver<PowerState> {
        self.receiver.clone()
    }
}

struct ScreenSaverMonitor {
    stream: ActiveChangedStream<'static>,
    updates_sender: watch::Sender<PowerState>,
}

impl ScreenSaverMonitor {
    async fn run(&mut self) {
        loop {
            tokio::select! {
                _ = self.updates_sender.closed() => {
                    log::info!("All receivers closed, terminating");
                    return;
                },
                Some(signal) = self.stream.next() => {
                    match signal.args() {
                        Ok(args) => {
                            let state = screen_state(args.active);
                            log::debug!("Interactive state change received. New state: {:?}", state);
                            if let Err(e) = self.updates_sender.send(state) {
                                log::error!("Couldn't send interactive state change notification: {}", e);
                            }
                        }
                        Err(e) => {
                            log::error!("Couldn't read arguments of ActiveChanged signal: {}", e);
                        }
                    }
                }
            }
        }
    }
}

fn screen_state(saver_active: bool) -> PowerState {
    if saver_active {
        PowerState::NonInteractive
    } else {
        PowerState::Interactive
    }
}
