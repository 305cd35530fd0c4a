//! Tracing setup for the notes client
//!
//! Every crate logs through the `tracing` macros; binaries call
//! [`init::init_tracing`] once at startup to install a subscriber.

pub mod config;
pub mod init;

pub use config::{InstrumentationConfig, LogFormat};
pub use init::init_tracing;
