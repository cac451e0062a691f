/// Observation of the device's interactive state (screen on/off)
pub mod interface;
pub mod mock;
pub mod screensaver;

pub use interface::*;

#[cfg(test)]
mod test;
