//! Small actor primitives on top of Tokio tasks: request/response ports,
//! lifecycle handles and a server trait for actors with initialization and
//! teardown phases.

mod ports;
mod server;

#[doc(inline)]
pub use ports::*;

#[doc(inline)]
pub use server::*;

#[cfg(test)]
mod test_ports;

#[cfg(test)]
mod test_server;
