//! System configuration parsing.

use kdl::{KdlDocument, KdlNode};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use workbee_core::WorkerProfile;

use crate::nodes::{get_first_string_arg, get_u64_arg};
use crate::roster::parse_roster;
use crate::{ConfigError, ConfigResult};

/// Free bookings a business gets unless configured otherwise.
pub const DEFAULT_FREE_BOOKINGS: u32 = 3;
/// Delay before the simulator proposes a worker.
pub const DEFAULT_MATCH_DELAY: Duration = Duration::from_secs(3);

/// Complete WorkBee configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkBeeConfig {
    pub engine: EngineConfig,
    pub simulator: SimulatorConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
    /// Workers available to the matching simulator.
    pub roster: Vec<WorkerProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    /// Confirmed bookings allowed per business; `None` means unlimited.
    pub free_bookings: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            free_bookings: Some(DEFAULT_FREE_BOOKINGS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulatorConfig {
    pub delay: Duration,
    /// Extra random delay drawn from `0..=jitter`.
    pub jitter: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_MATCH_DELAY,
            jitter: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// PostgreSQL URL for the record store; in-memory when absent.
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<WorkBeeConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration from KDL text. Missing sections keep their defaults.
pub fn parse_config(kdl: &str) -> ConfigResult<WorkBeeConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = WorkBeeConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "engine" => config.engine = parse_engine(node)?,
            "simulator" => config.simulator = parse_simulator(node)?,
            "server" => config.server = parse_server(node)?,
            "log" => config.log = parse_log(node)?,
            "roster" => config.roster = parse_roster(node)?,
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(config)
}

fn children(node: &KdlNode) -> impl Iterator<Item = &KdlNode> {
    node.children().into_iter().flat_map(|c| c.nodes().iter())
}

fn parse_engine(node: &KdlNode) -> ConfigResult<EngineConfig> {
    let mut engine = EngineConfig::default();

    for child in children(node) {
        if child.name().value() == "free-bookings" {
            engine.free_bookings = match get_first_string_arg(child).as_deref() {
                Some("unlimited") => None,
                Some(other) => {
                    return Err(ConfigError::InvalidValue {
                        field: "free-bookings".to_string(),
                        message: format!("expected a count or \"unlimited\", got {}", other),
                    });
                }
                None => {
                    let count = get_u64_arg(child, "free-bookings")?;
                    Some(u32::try_from(count).map_err(|_| ConfigError::InvalidValue {
                        field: "free-bookings".to_string(),
                        message: format!("{} is too large", count),
                    })?)
                }
            };
        }
    }

    Ok(engine)
}

fn parse_simulator(node: &KdlNode) -> ConfigResult<SimulatorConfig> {
    let mut simulator = SimulatorConfig::default();

    for child in children(node) {
        match child.name().value() {
            "delay-ms" => {
                simulator.delay = Duration::from_millis(get_u64_arg(child, "delay-ms")?);
            }
            "jitter-ms" => {
                simulator.jitter = Duration::from_millis(get_u64_arg(child, "jitter-ms")?);
            }
            _ => {}
        }
    }

    Ok(simulator)
}

fn parse_server(node: &KdlNode) -> ConfigResult<ServerConfig> {
    let mut server = ServerConfig::default();

    for child in children(node) {
        match child.name().value() {
            "bind" => {
                let raw = get_first_string_arg(child)
                    .ok_or_else(|| ConfigError::MissingField("server bind".to_string()))?;
                server.bind = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "bind".to_string(),
                    message: format!("not a socket address: {}", raw),
                })?;
            }
            "database-url" => {
                server.database_url = get_first_string_arg(child);
            }
            _ => {}
        }
    }

    Ok(server)
}

fn parse_log(node: &KdlNode) -> ConfigResult<LogConfig> {
    let mut log = LogConfig::default();

    for child in children(node) {
        match child.name().value() {
            "filter" => {
                log.filter = get_first_string_arg(child)
                    .ok_or_else(|| ConfigError::MissingField("log filter".to_string()))?;
            }
            "format" => {
                log.format = match get_first_string_arg(child).as_deref() {
                    Some("pretty") => LogFormat::Pretty,
                    Some("json") => LogFormat::Json,
                    other => {
                        return Err(ConfigError::InvalidValue {
                            field: "log format".to_string(),
                            message: format!("expected \"pretty\" or \"json\", got {:?}", other),
                        });
                    }
                };
            }
            _ => {}
        }
    }

    Ok(log)
}
