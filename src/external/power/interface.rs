use tokio::sync::watch::Receiver;

/// The interactive state of the device.
///
/// The device is interactive while its screen is on and accepting input,
/// non-interactive while the screen is blanked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Screen is on, device accepts input
    Interactive,
    /// Screen is blanked
    NonInteractive,
}

/// A source of interactive/non-interactive transition signals.
///
/// Implementations fold the platform's "became interactive" and "became
/// non-interactive" signals into a single channel carrying [PowerState].
pub trait PowerSignalSource: Send {
    /// Get a [Receiver] notified on every interactive-state transition.
    fn power_channel(&self) -> Receiver<PowerState>;
}
