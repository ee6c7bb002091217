//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lapwatch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};

use crate::core::engine::{DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TICK_INTERVAL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LapwatchConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    pub tick_interval_ms: Option<u64>,
    pub shutdown_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub show_clock: Option<bool>,
    pub clock_format: Option<String>,
    pub show_progress: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub tick_interval: Duration,
    pub shutdown_timeout: Duration,
    pub show_clock: bool,
    pub clock_format: String,
    pub show_progress: bool,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub tick_interval_ms: Option<u64>,
    pub no_clock: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.lapwatch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lapwatch").join("config.toml"))
}

/// Load config from `~/.lapwatch/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LapwatchConfig::default()`.
pub fn load_config() -> Result<LapwatchConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(LapwatchConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if missing.
pub fn load_config_from(path: &Path) -> Result<LapwatchConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LapwatchConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LapwatchConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Lapwatch Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [engine]
# tick_interval_ms = 100             # Or set LAPWATCH_TICK_MS
# shutdown_timeout_ms = 1000         # Or set LAPWATCH_SHUTDOWN_TIMEOUT_MS

# [display]
# show_clock = true                  # Wall clock next to the stopwatch
# clock_format = "%H:%M:%S"          # chrono strftime syntax
# show_progress = true               # Seconds-within-minute gauge
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LapwatchConfig, cli: &CliOverrides) -> ResolvedConfig {
    let env_tick = env_millis("LAPWATCH_TICK_MS");
    let env_shutdown = env_millis("LAPWATCH_SHUTDOWN_TIMEOUT_MS");
    resolve_with_env(config, cli, env_tick, env_shutdown)
}

fn resolve_with_env(
    config: &LapwatchConfig,
    cli: &CliOverrides,
    env_tick: Option<u64>,
    env_shutdown: Option<u64>,
) -> ResolvedConfig {
    // Tick interval: CLI → env → config → default
    let tick_ms = cli
        .tick_interval_ms
        .or(env_tick)
        .or(config.engine.tick_interval_ms);
    let tick_interval = match tick_ms {
        Some(0) => {
            warn!(
                "tick_interval_ms must be positive, using {}ms",
                DEFAULT_TICK_INTERVAL.as_millis()
            );
            DEFAULT_TICK_INTERVAL
        }
        Some(ms) => Duration::from_millis(ms),
        None => DEFAULT_TICK_INTERVAL,
    };

    // Shutdown timeout: env → config → default
    let shutdown_timeout = env_shutdown
        .or(config.engine.shutdown_timeout_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT);

    let show_clock = !cli.no_clock && config.display.show_clock.unwrap_or(true);

    ResolvedConfig {
        tick_interval,
        shutdown_timeout,
        show_clock,
        clock_format: resolve_clock_format(config.display.clock_format.as_deref()),
        show_progress: config.display.show_progress.unwrap_or(true),
    }
}

/// chrono panics when rendering an invalid format, so reject it up front.
fn resolve_clock_format(configured: Option<&str>) -> String {
    match configured {
        Some(format) if is_valid_clock_format(format) => format.to_string(),
        Some(format) => {
            warn!("Invalid clock_format {:?}, using {:?}", format, DEFAULT_CLOCK_FORMAT);
            DEFAULT_CLOCK_FORMAT.to_string()
        }
        None => DEFAULT_CLOCK_FORMAT.to_string(),
    }
}

fn is_valid_clock_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

fn env_millis(key: &str) -> Option<u64> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            warn!("Ignoring {}: not a number of milliseconds ({:?})", key, value);
            None
        }
    }
}
