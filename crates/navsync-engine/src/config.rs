#![forbid(unsafe_code)]

//! Engine tuning.
//!
//! Two knobs: the reconciliation (debounce) window that collapses bursts of
//! view changes into one history write, and the interval of the fragment
//! polling fallback. Programmatic values and environment overrides are
//! clamped to the documented ranges; explicit values in a loaded config file
//! are validated instead and rejected when out of range.
//!
//! # Timing Defaults
//!
//! | Setting | Default | Range | Description |
//! |---------|---------|-------|-------------|
//! | `debounce_window` | 50ms | 10-200ms | View-change coalescing window |
//! | `poll_interval` | 400ms | 100-2000ms | Fragment polling fallback |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `NAVSYNC_DEBOUNCE_MS` | u64 | 50 | Reconciliation window |
//! | `NAVSYNC_POLL_INTERVAL_MS` | u64 | 400 | Fragment poll interval |

use web_time::Duration;

/// Default reconciliation window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Minimum allowed reconciliation window.
pub const MIN_DEBOUNCE_MS: u64 = 10;

/// Maximum allowed reconciliation window.
pub const MAX_DEBOUNCE_MS: u64 = 200;

/// Default fragment poll interval.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 400;

/// Minimum allowed fragment poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Maximum allowed fragment poll interval.
pub const MAX_POLL_INTERVAL_MS: u64 = 2000;

/// Tuning for the reconciliation scheduler and the polling fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long view changes coalesce before one history write.
    /// Default: 50ms.
    pub debounce_window: Duration,

    /// How often the fragment polling fallback runs while authenticated.
    /// Default: 400ms.
    pub poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

fn clamp_ms(value: u64, min: u64, max: u64) -> Duration {
    Duration::from_millis(value.clamp(min, max))
}

impl EngineConfig {
    /// Set the reconciliation window, clamped to the valid range.
    #[must_use]
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        let ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self.debounce_window = clamp_ms(ms, MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        self
    }

    /// Set the fragment poll interval, clamped to the valid range.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        let ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self.poll_interval = clamp_ms(ms, MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads `NAVSYNC_DEBOUNCE_MS` and `NAVSYNC_POLL_INTERVAL_MS`.
    /// Unparsable values are ignored; parsed values are clamped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = env_ms("NAVSYNC_DEBOUNCE_MS") {
            config.debounce_window = clamp_ms(ms, MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        }
        if let Some(ms) = env_ms("NAVSYNC_POLL_INTERVAL_MS") {
            config.poll_interval = clamp_ms(ms, MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
        }
        config
    }

    /// Parse config from a TOML string.
    ///
    /// Unlike the clamping paths above, explicit file values outside the
    /// documented ranges are rejected; all violations are reported at once.
    ///
    /// ```toml
    /// debounce_ms = 80
    /// poll_interval_ms = 250
    /// ```
    #[cfg(feature = "config-load")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(input).map_err(ConfigError::Toml)?;

        let mut errors = Vec::new();
        let mut config = Self::default();

        if let Some(ms) = raw.debounce_ms {
            if (MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&ms) {
                config.debounce_window = Duration::from_millis(ms);
            } else {
                errors.push(format!(
                    "debounce_ms must be in {MIN_DEBOUNCE_MS}..={MAX_DEBOUNCE_MS}, got {ms}"
                ));
            }
        }
        if let Some(ms) = raw.poll_interval_ms {
            if (MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&ms) {
                config.poll_interval = Duration::from_millis(ms);
            } else {
                errors.push(format!(
                    "poll_interval_ms must be in {MIN_POLL_INTERVAL_MS}..={MAX_POLL_INTERVAL_MS}, got {ms}"
                ));
            }
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn env_ms(var: &str) -> Option<u64> {
    std::env::var(var).ok()?.trim().parse().ok()
}

/// Raw deserialization target for [`EngineConfig::from_toml_str`].
#[cfg(feature = "config-load")]
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    debounce_ms: Option<u64>,
    poll_interval_ms: Option<u64>,
}

/// Errors from loading an engine configuration.
#[cfg(feature = "config-load")]
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse error.
    Toml(toml::de::Error),
    /// Range violations, all collected.
    Validation(Vec<String>),
}

#[cfg(feature = "config-load")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

#[cfg(feature = "config-load")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
