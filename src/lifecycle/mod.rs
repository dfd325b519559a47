//! Process lifecycle coordination.
//!
//! Startup is linear (config → listener → server); the only coordination
//! needed is graceful shutdown, broadcast from the signal handler to the
//! serving loop.

pub mod shutdown;

pub use shutdown::Shutdown;
