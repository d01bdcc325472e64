//! Runtime tuning persisted as a postcard blob

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::animation::DEFAULT_ANIMATION_FPS;
use crate::ui::MOUSE_TARGET_THRESHOLD;
use crate::ui::styling::{Color, WHITE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to decode config: {0}")]
    Decode(postcard::Error),

    #[error("Failed to encode config: {0}")]
    Encode(postcard::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RuntimeConfig {
    /// Repaint cadence of the main loop
    pub render_fps: f32,
    /// Default tick rate for animations
    pub animation_fps: f32,
    /// Hit-test tolerance in layout units
    pub mouse_target_threshold: i32,
    /// Screen color painted before each frame
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            render_fps: 40.0,
            animation_fps: DEFAULT_ANIMATION_FPS,
            mouse_target_threshold: MOUSE_TARGET_THRESHOLD,
            clear_color: WHITE,
        }
    }
}

impl RuntimeConfig {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(ConfigError::Decode)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    /// Render interval in milliseconds, at least one.
    pub fn frame_interval_ms(&self) -> u64 {
        crate::animation::tick_interval_ms(if self.render_fps > 0.0 {
            self.render_fps
        } else {
            DEFAULT_ANIMATION_FPS
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_survives_postcard() {
        let config = RuntimeConfig {
            render_fps: 30.0,
            mouse_target_threshold: 8,
            ..RuntimeConfig::default()
        };
        let bytes = config.to_vec().unwrap();
        assert_eq!(RuntimeConfig::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        let bytes = RuntimeConfig::default().to_vec().unwrap();
        assert!(matches!(
            RuntimeConfig::from_bytes(&bytes[..3]),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(RuntimeConfig::default().frame_interval_ms(), 25);
        let config = RuntimeConfig {
            render_fps: 0.0,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.frame_interval_ms(), 25);
    }
}
