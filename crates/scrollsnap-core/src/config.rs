use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decision::ThresholdPolicy;
use crate::easing::{Easing, EasingType};
use crate::error::{Error, Result, SettingsIssue};
use crate::geometry::AxisPair;
use crate::units::{parse_snap_lengths, SnapDestination, SnapLength};

/// Timeouts below this may misfire on platforms with momentum scrolling
pub const TIMEOUT_MIN_MS: f64 = 50.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Snap behaviour for one container, as written in configuration
///
/// Numbers are kept as `f64` so that out-of-range values survive parsing and
/// can be reported together by [`SnapConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Horizontal snap length: a number of pixels or "<n>px|%|vw|vh"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_destination_x: Option<SnapDestination>,
    /// Vertical snap length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_destination_y: Option<SnapDestination>,
    /// Quiet time after the last scroll before snapping
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: f64,
    /// Snap animation duration
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Fraction of a cell [0, 1] to cross before advancing
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Never skip intermediate snap points
    #[serde(default)]
    pub snap_stop: bool,
    /// Animation curve
    #[serde(default)]
    pub easing: EasingType,
    /// Show directional arrow affordances
    #[serde(default)]
    pub show_arrows: bool,
    /// Step with the arrow keys
    #[serde(default = "default_true")]
    pub enable_keyboard: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_destination_x: None,
            snap_destination_y: None,
            timeout_ms: default_timeout_ms(),
            duration_ms: default_duration_ms(),
            threshold: default_threshold(),
            snap_stop: false,
            easing: EasingType::default(),
            show_arrows: false,
            enable_keyboard: default_true(),
        }
    }
}

impl SnapConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check every setting once and produce the immutable [`Settings`] the
    /// engine runs with
    ///
    /// All problems are reported together. A timeout below
    /// [`TIMEOUT_MIN_MS`] only logs a warning.
    pub fn validate(&self) -> Result<Settings> {
        let mut issues = Vec::new();

        let timeout = millis("timeout_ms", self.timeout_ms, &mut issues);
        let duration = millis("duration_ms", self.duration_ms, &mut issues);
        if !(0.0..=1.0).contains(&self.threshold) {
            issues.push(SettingsIssue::new("threshold", "a number in [0, 1]", self.threshold));
        }
        for (field, destination) in [
            ("snap_destination_x", &self.snap_destination_x),
            ("snap_destination_y", &self.snap_destination_y),
        ] {
            if let Some(SnapDestination::Pixels(value)) = destination {
                if !value.is_finite() {
                    issues.push(SettingsIssue::new(field, "a finite number or a length string", value));
                }
            }
        }

        if !issues.is_empty() {
            return Err(Error::InvalidSettings(issues));
        }

        if self.timeout_ms < TIMEOUT_MIN_MS {
            warn!(
                timeout_ms = self.timeout_ms,
                "Timeout below {}ms may cause issues with momentum scrolling", TIMEOUT_MIN_MS
            );
        }

        let lengths = parse_snap_lengths(
            self.snap_destination_x.as_ref(),
            self.snap_destination_y.as_ref(),
        );
        if lengths.x.is_zero() && lengths.y.is_zero() {
            warn!("No usable snap destination configured, snapping is disabled on both axes");
        }

        Ok(Settings {
            lengths,
            timeout,
            duration,
            policy: ThresholdPolicy {
                threshold: self.threshold,
                snap_stop: self.snap_stop,
            },
            easing: self.easing.into(),
            show_arrows: self.show_arrows,
            enable_keyboard: self.enable_keyboard,
        })
    }
}

/// Convert a millisecond setting, recording an issue if it is negative,
/// not finite or too large for a `Duration`
fn millis(field: &'static str, value: f64, issues: &mut Vec<SettingsIssue>) -> Duration {
    if value >= 0.0 {
        if let Ok(duration) = Duration::try_from_secs_f64(value / 1000.0) {
            return duration;
        }
    }
    issues.push(SettingsIssue::new(field, "a finite number >= 0", value));
    Duration::ZERO
}

/// Validated, immutable snap settings for one bound container
#[derive(Debug, Clone)]
pub struct Settings {
    pub lengths: AxisPair<SnapLength>,
    pub timeout: Duration,
    pub duration: Duration,
    pub policy: ThresholdPolicy,
    pub easing: Easing,
    pub show_arrows: bool,
    pub enable_keyboard: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lengths: AxisPair::default(),
            timeout: Duration::from_millis(default_timeout_ms() as u64),
            duration: Duration::from_millis(default_duration_ms() as u64),
            policy: ThresholdPolicy::default(),
            easing: Easing::default(),
            show_arrows: false,
            enable_keyboard: true,
        }
    }
}

impl Settings {
    /// Replace the animation curve, e.g. with a host-supplied function
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl TryFrom<&SnapConfig> for Settings {
    type Error = Error;

    fn try_from(config: &SnapConfig) -> Result<Self> {
        config.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Frame interval while idle, in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme name ("gruvbox-dark" or "gruvbox-light")
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Columns of cells in the playground grid
    #[serde(default = "default_grid_size")]
    pub grid_columns: u16,
    /// Rows of cells in the playground grid
    #[serde(default = "default_grid_size")]
    pub grid_rows: u16,
    /// Offset moved per mouse wheel notch, in cells of the terminal
    #[serde(default = "default_wheel_step")]
    pub wheel_step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: default_theme_name(),
            grid_columns: default_grid_size(),
            grid_rows: default_grid_size(),
            wheel_step: default_wheel_step(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "k", "<C-k>" (Ctrl+k), "<S-k>" (Shift+k), "<Up>", "<Esc>", "<Space>"
/// Arrow keys always step in their direction in addition to these
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_snap_up")]
    pub snap_up: String,
    #[serde(default = "default_key_snap_down")]
    pub snap_down: String,
    #[serde(default = "default_key_snap_left")]
    pub snap_left: String,
    #[serde(default = "default_key_snap_right")]
    pub snap_right: String,
    /// Show/hide the arrow affordances
    #[serde(default = "default_key_toggle_arrows")]
    pub toggle_arrows: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            snap_up: default_key_snap_up(),
            snap_down: default_key_snap_down(),
            snap_left: default_key_snap_left(),
            snap_right: default_key_snap_right(),
            toggle_arrows: default_key_toggle_arrows(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_snap_up() -> String { "k".to_string() }
fn default_key_snap_down() -> String { "j".to_string() }
fn default_key_snap_left() -> String { "h".to_string() }
fn default_key_snap_right() -> String { "l".to_string() }
fn default_key_toggle_arrows() -> String { "a".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollsnap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> f64 {
    100.0
}

fn default_duration_ms() -> f64 {
    300.0
}

fn default_threshold() -> f64 {
    0.2
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_grid_size() -> u16 {
    4
}

fn default_wheel_step() -> u16 {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it is missing
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollsnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollsnap")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns stderr
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("scrollsnap.log")
    }
}
