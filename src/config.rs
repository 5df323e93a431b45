//! Runtime configuration, loaded from an optional TOML file

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gesture: GestureConfig,
    pub pipeline: PipelineConfig,
    pub detector: DetectorConfig,
    pub actuation: ActuationConfig,
    pub context: ContextConfig,
    pub overlay: OverlayConfig,
}

impl Config {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Classifier thresholds and timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pointer offsets shorter than this (pixels) are ignored
    pub dead_zone_radius: f32,
    /// Scale applied to the pointer offset before it becomes a move command
    pub cursor_sensitivity: f32,
    /// Thumb-to-index tip distance that counts as a pinch
    pub pinch_threshold: f32,
    pub click_cooldown_ms: u64,
    /// Minimum spacing between activation/deactivation
    pub mode_cooldown_ms: u64,
    /// Pause after activation toggles so the held pose does not re-trigger
    pub activation_pause_ms: u64,
    pub swipe_threshold_x: f32,
    pub swipe_threshold_y: f32,
    pub swipe_cooldown_ms: u64,
    /// How long a lost palm may stay lost before the swipe disarms
    pub swipe_grace_ms: u64,
    pub context_check_cooldown_ms: u64,
    /// Vertical travel that produces one volume/scroll/brightness step
    pub mode_step: f32,
    pub action_cooldown_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            dead_zone_radius: 35.0,
            cursor_sensitivity: 0.3,
            pinch_threshold: 0.05,
            click_cooldown_ms: 1000,
            mode_cooldown_ms: 1000,
            activation_pause_ms: 500,
            swipe_threshold_x: 0.1,
            swipe_threshold_y: 0.1,
            swipe_cooldown_ms: 800,
            swipe_grace_ms: 250,
            context_check_cooldown_ms: 1000,
            mode_step: 0.04,
            action_cooldown_ms: 50,
        }
    }
}

impl GestureConfig {
    pub fn activation_pause(&self) -> Duration {
        Duration::from_millis(self.activation_pause_ms)
    }
}

/// Queue capacities and capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub frame_queue: usize,
    pub landmark_queue: usize,
    pub display_queue: usize,
    pub command_queue: usize,
    pub status_queue: usize,
    pub camera_index: i32,
    pub fallback_camera_index: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub target_fps: u32,
    pub reconnect_attempts: u32,
    pub reconnect_delay_ms: u64,
    /// Stop after this many synthetic frames (unbounded when unset)
    pub frame_limit: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_queue: 1,
            landmark_queue: 1,
            display_queue: 1,
            command_queue: 5,
            status_queue: 5,
            camera_index: 1,
            fallback_camera_index: 0,
            frame_width: 1280,
            frame_height: 720,
            target_fps: 30,
            reconnect_attempts: 5,
            reconnect_delay_ms: 1000,
            frame_limit: None,
        }
    }
}

impl PipelineConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectorBackend {
    /// JSON-lines file, one array of hands per frame
    Replay,
    /// Latest hands received on a UDP socket
    Udp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub backend: DetectorBackend,
    pub replay_path: Option<PathBuf>,
    pub replay_loop: bool,
    pub udp_addr: String,
    /// UDP snapshots older than this are treated as "no hands"
    pub max_age_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            backend: DetectorBackend::Udp,
            replay_path: None,
            replay_loop: false,
            udp_addr: "127.0.0.1:5905".to_string(),
            max_age_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActuatorBackend {
    /// Log commands without touching the host
    DryRun,
    Xdotool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuationConfig {
    pub backend: ActuatorBackend,
    /// Wheel clicks per scroll step
    pub scroll_clicks: u32,
    /// Brightness change per step, in percent
    pub brightness_step: u32,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            backend: ActuatorBackend::DryRun,
            scroll_clicks: 1,
            brightness_step: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowTitleBackend {
    Xdotool,
    /// Always report `fixed_title`
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub source: WindowTitleBackend,
    pub fixed_title: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            source: WindowTitleBackend::Fixed,
            fixed_title: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusSinkKind {
    Log,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub sink: StatusSinkKind,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            sink: StatusSinkKind::Log,
        }
    }
}
