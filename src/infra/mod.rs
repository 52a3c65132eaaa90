//! Clients for external services.

pub mod generator;

pub use generator::{GeneratorClient, GeneratorError};
