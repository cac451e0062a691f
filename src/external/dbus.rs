use log::info;
use zbus;

/// Handles initialization and cloning of [zbus::Connection]s. These are
/// clone-able and handle their own refcounts internally. This struct will
/// either create or provide clones of the session connection.
pub struct ConnectionFactory {
    session: Option<zbus::Connection>,
}

impl ConnectionFactory {
    /// Create a new ConnectionFactory.
    ///
    /// No connections are created upon calling this method.
    pub fn new() -> ConnectionFactory {
        ConnectionFactory { session: None }
    }

    /// Get a connection to the session's / user's D-Bus
    pub async fn get_session(&mut self) -> zbus::Result<zbus::Connection> {
        if let Some(c) = &self.session {
            Ok(c.clone())
        } else {
            info!("Creating a new connection to the session bus");
            self.session = Some(zbus::Connection::session().await?);
            Ok(self.session.as_ref().unwrap().clone())
        }
    }
}
