use tokio::sync::watch::Receiver;

/// The user's Always-On-Display preference.
///
/// The preference is owned by an external settings store; this daemon only
/// reads it and reacts to its changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AodPreference {
    /// The user wants the display to stay on in a low-power mode while the
    /// device sleeps
    Enabled,
    /// Hardware handles the sleeping display on its own
    Disabled,
}

impl Into<AodPreference> for bool {
    fn into(self) -> AodPreference {
        if self {
            AodPreference::Enabled
        } else {
            AodPreference::Disabled
        }
    }
}

impl AodPreference {
    pub fn is_enabled(&self) -> bool {
        *self == AodPreference::Enabled
    }
}

/// The interface between the daemon and the store holding the user's
/// Always-On-Display preference.
pub trait SettingsStore: Send {
    /// Get a [Receiver] notified on every change of the AOD preference,
    /// whether or not the value differs from the previous one.
    fn preference_channel(&self) -> Receiver<AodPreference>;
}
