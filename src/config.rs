//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SWARMFIELD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use swarmfield_core::{FieldParams, Palette};
use swarmfield_math::Rgb;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle field tuning
    #[serde(default)]
    pub field: FieldConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SWARMFIELD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SWARMFIELD_FIELD__LINK_DISTANCE=200 -> field.link_distance = 200
        figment = figment.merge(Env::prefixed("SWARMFIELD_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce a broken or invisible field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window", "width and height must be nonzero"));
        }
        self.field.validate()?;
        self.rendering.validate()?;
        let interval = self.debug.stats_interval_secs;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::invalid(
                "debug.stats_interval_secs",
                "must be a positive number of seconds",
            ));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Swarmfield".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Smallest accepted `field.area_per_particle`
pub const MIN_AREA_PER_PARTICLE: f32 = 1.0;

/// Particle field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface area (square pixels) per particle
    pub area_per_particle: f32,
    /// Maximum distance at which two particles are connected
    pub link_distance: f32,
    /// Connection opacity at zero distance
    pub link_max_alpha: f32,
    /// Connection line width in pixels
    pub link_width: f32,
    /// Particle colors as hex strings
    pub palette: Vec<Rgb>,
    /// Fixed RNG seed for reproducible layouts; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let params = FieldParams::default();
        Self {
            area_per_particle: params.area_per_particle,
            link_distance: params.link_distance,
            link_max_alpha: params.link_max_alpha,
            link_width: params.link_width,
            palette: params.palette.colors().to_vec(),
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Below one square pixel per particle the population outgrows the surface
        if !self.area_per_particle.is_finite() || self.area_per_particle < MIN_AREA_PER_PARTICLE {
            return Err(ConfigError::invalid(
                "field.area_per_particle",
                "must be at least 1 square pixel",
            ));
        }
        if !self.link_distance.is_finite() || self.link_distance <= 0.0 {
            return Err(ConfigError::invalid("field.link_distance", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.link_max_alpha) {
            return Err(ConfigError::invalid("field.link_max_alpha", "must be within [0, 1]"));
        }
        if !self.link_width.is_finite() || self.link_width <= 0.0 {
            return Err(ConfigError::invalid("field.link_width", "must be positive"));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("field.palette", "needs at least one color"));
        }
        Ok(())
    }

    /// Convert to simulation parameters
    pub fn to_params(&self) -> Result<FieldParams, ConfigError> {
        self.validate()?;
        let palette = Palette::new(self.palette.clone())
            .ok_or_else(|| ConfigError::invalid("field.palette", "needs at least one color"))?;

        Ok(FieldParams {
            area_per_particle: self.area_per_particle,
            link_distance: self.link_distance,
            link_max_alpha: self.link_max_alpha,
            link_width: self.link_width,
            palette,
        })
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Page background behind the field
    pub background_color: Rgb,
    /// Opacity of the whole particle layer
    pub opacity: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: Rgb::new(0x0A, 0x0F, 0x1C),
            opacity: 0.85,
        }
    }
}

impl RenderingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::invalid("rendering.opacity", "must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show fps / particle / link counts in the window title
    pub show_stats: bool,
    /// Seconds between statistics samples
    pub stats_interval_secs: f32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_stats: false,
            stats_interval_secs: 1.0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// A value that parsed but is out of range
    pub fn invalid(key: &str, reason: &str) -> Self {
        ConfigError {
            message: format!("invalid {}: {}", key, reason),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
