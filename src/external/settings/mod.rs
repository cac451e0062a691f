/// Access to the user's Always-On-Display preference
pub mod file;
pub mod interface;
pub mod mock;

pub use interface::*;

#[cfg(test)]
mod test;
