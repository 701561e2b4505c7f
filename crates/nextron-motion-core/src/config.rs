use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tokens::ViewportPreset;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionSettings,
    #[serde(default)]
    pub ambient: AmbientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where the reduced-motion preference comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducedMotionMode {
    /// Follow the platform setting
    #[default]
    System,
    /// Always reduce, regardless of the platform
    Always,
    /// Never reduce
    Never,
}

impl ReducedMotionMode {
    /// Effective preference given the platform's current value
    pub fn resolve(self, system: bool) -> bool {
        match self {
            ReducedMotionMode::System => system,
            ReducedMotionMode::Always => true,
            ReducedMotionMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Reduced-motion source: "system", "always" or "never"
    #[serde(default)]
    pub reduced_motion: ReducedMotionMode,
    /// Frames per second for the animation tick
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Viewport preset for sections that don't pick one
    #[serde(default)]
    pub viewport: ViewportPreset,
    /// Observe section visibility; when off every section reveals on mount
    #[serde(default = "default_true")]
    pub observe_visibility: bool,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            reduced_motion: ReducedMotionMode::default(),
            frame_rate: default_frame_rate(),
            viewport: ViewportPreset::default(),
            observe_visibility: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Play background loops at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of vertical lines in the industrial grid
    #[serde(default = "default_grid_lines")]
    pub grid_lines: usize,
    /// Number of horizontal light streaks
    #[serde(default = "default_light_streaks")]
    pub light_streaks: usize,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            grid_lines: default_grid_lines(),
            light_streaks: default_light_streaks(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    60
}

fn default_grid_lines() -> usize {
    3
}

fn default_light_streaks() -> usize {
    5
}

impl MotionSettings {
    /// Tick duration for the configured frame rate
    pub fn tick_duration(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_micros((1_000_000 / self.frame_rate as u64).max(1))
        }
    }
}

impl MotionConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path, defaults if it doesn't exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            tracing::debug!("Loaded motion config from {}", path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/nextron-motion/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("nextron-motion")
            .join("config.toml")
    }

    /// Reject settings the runtime cannot honour
    pub fn validate(&self) -> crate::Result<()> {
        if self.motion.frame_rate > 240 {
            return Err(crate::Error::Config(format!(
                "frame_rate {} exceeds 240",
                self.motion.frame_rate
            )));
        }
        self.motion.viewport.trigger().validate(self.motion.viewport.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.motion.reduced_motion, ReducedMotionMode::System);
        assert_eq!(config.motion.frame_rate, 60);
        assert_eq!(config.motion.viewport, ViewportPreset::Standard);
        assert!(config.ambient.enabled);
        assert!(config.motion.observe_visibility);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: MotionConfig = toml::from_str(
            r#"
            [motion]
            reduced_motion = "always"
            viewport = "late"
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.reduced_motion, ReducedMotionMode::Always);
        assert_eq!(config.motion.viewport, ViewportPreset::Late);
        assert_eq!(config.motion.frame_rate, 60);
        assert_eq!(config.ambient.grid_lines, 3);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_resolve_mode() {
        assert!(ReducedMotionMode::System.resolve(true));
        assert!(!ReducedMotionMode::System.resolve(false));
        assert!(ReducedMotionMode::Always.resolve(false));
        assert!(!ReducedMotionMode::Never.resolve(true));
    }

    #[test]
    fn test_tick_duration() {
        let mut settings = MotionSettings::default();
        settings.frame_rate = 50;
        assert_eq!(settings.tick_duration(), Duration::from_millis(20));
        settings.frame_rate = 0;
        assert_eq!(settings.tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_huge_frame_rate_never_zero_tick() {
        let config: MotionConfig = toml::from_str("[motion]\nframe_rate = 2000000\n").unwrap();
        assert!(config.motion.tick_duration() > Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("nextron-motion-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = MotionConfig::default();
        config.motion.reduced_motion = ReducedMotionMode::Never;
        config.ambient.light_streaks = 2;
        config.save_to(&path).unwrap();

        let loaded = MotionConfig::load_from(&path).unwrap();
        assert_eq!(loaded.motion.reduced_motion, ReducedMotionMode::Never);
        assert_eq!(loaded.ambient.light_streaks, 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = MotionConfig::load_from(Path::new("/nonexistent/nextron/config.toml")).unwrap();
        assert_eq!(config.motion.frame_rate, 60);
    }

    #[test]
    fn test_frame_rate_limit() {
        let mut config = MotionConfig::default();
        config.motion.frame_rate = 1000;
        assert!(config.validate().is_err());
    }
}
