//! Configuration for lumen.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/lumen/config.toml` on Linux). Every field is optional; missing
//! fields fall back to defaults. A few fields can be overridden from the
//! environment for one-off runs.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use directories::ProjectDirs;
use lumen_core::{AnimationSpeed, AnimatorSettings, NetworkSettings, PulseSettings, Theme};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the theme.
pub const ENV_THEME: &str = "LUMEN_THEME";
/// Environment variable forcing reduced motion.
pub const ENV_REDUCED_MOTION: &str = "LUMEN_REDUCED_MOTION";
/// Environment variable fixing the random seed.
pub const ENV_SEED: &str = "LUMEN_SEED";

/// Terminal display settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Target frames per second.
    pub fps: u32,
    /// Viewport units per raster pixel.
    pub pixel_scale: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fps: 60,
            pixel_scale: 6.0,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colour theme.
    pub theme: Theme,
    /// Disable the animation and show the static background.
    pub reduced_motion: bool,
    /// Animation speed.
    pub speed: AnimationSpeed,
    /// Fixed random seed for reproducible layouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub network: NetworkSettings,
    pub pulses: PulseSettings,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            reduced_motion: false,
            speed: AnimationSpeed::Medium,
            seed: None,
            network: NetworkSettings::default(),
            pulses: PulseSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Path of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lumen").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when no
    /// file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate TOML contents.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().ok_or_else(|| eyre!("no config directory available"))?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).wrap_err_with(|| format!("failed to write {}", path.display()))
    }

    /// Record `theme` in the file at the default location, leaving every
    /// other setting as the file has it.
    pub fn save_theme(theme: Theme) -> Result<()> {
        let path = Self::default_path().ok_or_else(|| eyre!("no config directory available"))?;
        Self::save_theme_to(&path, theme)
    }

    /// Record `theme` in the file at `path`. Environment overrides applied to
    /// an in-memory config never reach the file.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        let mut on_disk = Self::load_from(path)?;
        on_disk.theme = theme;
        on_disk.save_to(path)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup(ENV_THEME) {
            self.theme = Theme::from_name(&value)
                .ok_or_else(|| eyre!("{ENV_THEME} must be \"light\" or \"dark\", got {value:?}"))?;
        }
        if let Some(value) = lookup(ENV_REDUCED_MOTION) {
            self.reduced_motion = parse_flag(&value)
                .ok_or_else(|| eyre!("{ENV_REDUCED_MOTION} must be a boolean, got {value:?}"))?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            let seed = value
                .trim()
                .parse()
                .wrap_err_with(|| format!("{ENV_SEED} must be an unsigned integer"))?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Reject settings the animator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let pulses = &self.pulses;
        if !(0.0..=1.0).contains(&pulses.spawn_chance) {
            bail!("pulses.spawn_chance must be within 0.0-1.0");
        }
        if !pulses.min_speed.is_finite() || !pulses.max_speed.is_finite() {
            bail!("pulses.min_speed and pulses.max_speed must be finite");
        }
        if pulses.min_speed <= 0.0 || pulses.max_speed <= pulses.min_speed {
            bail!("pulses.min_speed must be positive and below pulses.max_speed");
        }
        if !self.network.link_distance.is_finite() || self.network.link_distance <= 0.0 {
            bail!("network.link_distance must be positive");
        }
        if self.display.fps == 0 || self.display.fps > 240 {
            bail!("display.fps must be within 1-240");
        }
        if !self.display.pixel_scale.is_finite() || self.display.pixel_scale <= 0.0 {
            bail!("display.pixel_scale must be positive");
        }
        Ok(())
    }

    /// Settings handed to the animator.
    pub fn animator_settings(&self) -> AnimatorSettings {
        AnimatorSettings {
            network: self.network,
            pulses: self.pulses,
            speed: self.speed,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
