//! Configuration Module
//!
//! Client settings and where they are loaded from.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ClientConfig, DEFAULT_BASE_URL};
