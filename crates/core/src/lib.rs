//! Notes core utilities shared by the client crates

pub mod tracing;
pub mod validation;

pub use validation::ValidateConfig;
