// Configuration loading and parsing (config/hitboard.toml).
//
// The file is optional: every section has defaults, so a fresh checkout runs
// without any configuration. A file that exists but fails to parse or
// validate is an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::colors::{Rgb, TeamColors, TeamPalette};
use crate::record::DISPLAY_LIMIT;
use crate::summary::DEFAULT_TIERS;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Earliest season the season selector allows.
pub const MIN_SEASON: i32 = 1901;

/// Public MLB Stats API root.
pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// Relative location of the config file under the base directory.
pub const CONFIG_FILE: &str = "config/hitboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    /// Season selected at start-up.
    pub default_season: i32,
    pub chart: ChartSettings,
    /// Summary tier thresholds, highest first.
    pub tiers: [f64; 3],
    pub logging: LoggingConfig,
    /// Team color additions/overrides from `[colors]`.
    pub team_colors: HashMap<String, TeamColors>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            default_season: current_season(),
            chart: ChartSettings::default(),
            tiers: DEFAULT_TIERS,
            logging: LoggingConfig::default(),
            team_colors: HashMap::new(),
        }
    }
}

impl Config {
    /// Build the team palette: built-in clubs plus any configured overrides.
    pub fn palette(&self) -> TeamPalette {
        TeamPalette::mlb().with_overrides(&self.team_colors)
    }
}

// ---------------------------------------------------------------------------
// hitboard.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiConfig,
    season: SeasonSection,
    chart: ChartSettings,
    summary: SummarySection,
    logging: LoggingConfig,
    colors: HashMap<String, ColorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub sport_id: u32,
    /// Number of hitters requested per season.
    pub limit: usize,
    /// Optional request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            sport_id: 1,
            limit: DISPLAY_LIMIT,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SeasonSection {
    default: Option<i32>,
}

/// Bar chart display settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub y_min: f64,
    pub y_max: f64,
    pub max_bars: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            y_min: 0.250,
            y_max: 0.350,
            max_bars: DISPLAY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SummarySection {
    tiers: Vec<f64>,
}

impl Default for SummarySection {
    fn default() -> Self {
        SummarySection {
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "hitboard=info,warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ColorEntry {
    primary: String,
    secondary: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/hitboard.toml` under `base_dir`, falling
/// back to defaults when the file does not exist.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::FileNotFound {
        path: path.clone(),
        source,
    })?;
    parse_config(&text, &path)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::FileNotFound {
        path: PathBuf::from("."),
        source,
    })?;
    load_config_from(&cwd)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    let tiers: [f64; 3] =
        file.summary
            .tiers
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::ValidationError {
                field: "summary.tiers".into(),
                message: format!("expected exactly 3 thresholds, got {}", file.summary.tiers.len()),
            })?;

    let mut team_colors = HashMap::new();
    for (team, entry) in &file.colors {
        let primary = parse_color(team, "primary", &entry.primary)?;
        let secondary = parse_color(team, "secondary", &entry.secondary)?;
        team_colors.insert(team.clone(), TeamColors { primary, secondary });
    }

    let config = Config {
        api: file.api,
        default_season: file.season.default.unwrap_or_else(current_season),
        chart: file.chart,
        tiers,
        logging: file.logging,
        team_colors,
    };

    validate(&config)?;

    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The current calendar year, used as the default season.
pub fn current_season() -> i32 {
    chrono::Local::now().year()
}

/// Clamp a season to the selectable range.
pub fn clamp_season(season: i32) -> i32 {
    season.clamp(MIN_SEASON, current_season().max(MIN_SEASON))
}

fn parse_color(team: &str, which: &str, value: &str) -> Result<Rgb, ConfigError> {
    Rgb::parse(value).map_err(|e| ConfigError::ValidationError {
        field: format!("colors.\"{team}\".{which}"),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.api.sport_id == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.sport_id".into(),
            message: "must be greater than 0".into(),
        });
    }

    if !(1..=100).contains(&config.api.limit) {
        return Err(ConfigError::ValidationError {
            field: "api.limit".into(),
            message: format!("must be between 1 and 100, got {}", config.api.limit),
        });
    }

    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0 when set".into(),
        });
    }

    if config.default_season < MIN_SEASON {
        return Err(ConfigError::ValidationError {
            field: "season.default".into(),
            message: format!("must be {MIN_SEASON} or later, got {}", config.default_season),
        });
    }

    if !(1..=DISPLAY_LIMIT).contains(&config.chart.max_bars) {
        return Err(ConfigError::ValidationError {
            field: "chart.max_bars".into(),
            message: format!(
                "must be between 1 and {DISPLAY_LIMIT}, got {}",
                config.chart.max_bars
            ),
        });
    }

    let (y_min, y_max) = (config.chart.y_min, config.chart.y_max);
    if !(y_min.is_finite() && y_max.is_finite() && y_min < y_max) {
        return Err(ConfigError::ValidationError {
            field: "chart.y_min".into(),
            message: format!("y_min ({y_min}) must be less than y_max ({y_max})"),
        });
    }

    for (i, t) in config.tiers.iter().enumerate() {
        if !(*t > 0.0 && *t <= 1.0) {
            return Err(ConfigError::ValidationError {
                field: format!("summary.tiers[{i}]"),
                message: format!("must be in (0, 1], got {t}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
