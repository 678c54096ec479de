//! Configuration management
//!
//! [`OrbitalConfig`] is assembled by [`ConfigLoader`] from defaults, an
//! optional TOML file and `ORBITAL_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
