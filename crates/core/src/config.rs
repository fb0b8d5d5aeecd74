//! Session configuration.
//!
//! The collection sizes, the flash window and the toast durations are part of the
//! toy's contract. They live here as named, validated values instead of being
//! scattered through the store.

use thiserror::Error;

pub const DEFAULT_BUBBLE_COUNT: usize = 60;
pub const DEFAULT_LIGHT_COUNT: usize = 12;
pub const DEFAULT_SWITCH_COUNT: usize = 8;
pub const DEFAULT_COLOR_BUTTON_COUNT: usize = 8;
pub const DEFAULT_FLASH_MS: u64 = 200;
pub const DEFAULT_SLIDER_VALUE: u8 = 50;
pub const SLIDER_MIN: u8 = 0;
pub const SLIDER_MAX: u8 = 100;
pub const DEFAULT_SOUND_VOLUME: f32 = 0.1;
pub const DEFAULT_QUICK_TOAST_MS: u32 = 500;
pub const DEFAULT_RESET_TOAST_MS: u32 = 4000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    EmptyCollection { field: &'static str },
    #[error("flash_ms must be greater than zero")]
    ZeroFlashWindow,
    #[error("slider_default {0} is outside 0..=100")]
    SliderDefaultOutOfRange(u8),
    #[error("sound_volume {0} is outside 0.0..=1.0")]
    VolumeOutOfRange(f32),
    #[cfg(feature = "serde")]
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FidgetConfig {
    pub bubble_count: usize,
    pub light_count: usize,
    pub switch_count: usize,
    pub color_button_count: usize,
    /// How long a color button stays highlighted after a click.
    pub flash_ms: u64,
    pub slider_default: u8,
    pub sound_volume: f32,
    pub quick_toast_ms: u32,
    pub reset_toast_ms: u32,
    /// Color PRNG seed. `None` lets the caller pick one (usually from the clock).
    pub seed: Option<u64>,
}

impl Default for FidgetConfig {
    fn default() -> Self {
        Self {
            bubble_count: DEFAULT_BUBBLE_COUNT,
            light_count: DEFAULT_LIGHT_COUNT,
            switch_count: DEFAULT_SWITCH_COUNT,
            color_button_count: DEFAULT_COLOR_BUTTON_COUNT,
            flash_ms: DEFAULT_FLASH_MS,
            slider_default: DEFAULT_SLIDER_VALUE,
            sound_volume: DEFAULT_SOUND_VOLUME,
            quick_toast_ms: DEFAULT_QUICK_TOAST_MS,
            reset_toast_ms: DEFAULT_RESET_TOAST_MS,
            seed: None,
        }
    }
}

impl FidgetConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("bubble_count", self.bubble_count),
            ("light_count", self.light_count),
            ("switch_count", self.switch_count),
            ("color_button_count", self.color_button_count),
        ];
        if let Some(&(field, _)) = sizes.iter().find(|(_, n)| *n == 0) {
            return Err(ConfigError::EmptyCollection { field });
        }
        if self.flash_ms == 0 {
            return Err(ConfigError::ZeroFlashWindow);
        }
        if self.slider_default > SLIDER_MAX {
            return Err(ConfigError::SliderDefaultOutOfRange(self.slider_default));
        }
        if !(0.0..=1.0).contains(&self.sound_volume) {
            return Err(ConfigError::VolumeOutOfRange(self.sound_volume));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: FidgetConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
