//! KDL configuration parsing for WorkBee.
//!
//! A single `workbee.kdl` file configures:
//! - The lifecycle engine (free booking quota)
//! - The matching simulator (delay, jitter) and its worker roster
//! - The API server and logging

pub mod error;
mod nodes;
mod roster;
pub mod system;

pub use error::{ConfigError, ConfigResult};
pub use system::{
    EngineConfig, LogConfig, LogFormat, ServerConfig, SimulatorConfig, WorkBeeConfig, load_config,
    parse_config,
};
