//! Game settings
//!
//! Read once at startup; never written back. Every field has a default, so a
//! settings blob only needs the keys it wants to change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ENEMY_MAX_SPAWN_RADIUS, ENEMY_SPAWN_GAP, PLAYER_FLOOR_GAP, PLAYER_HEIGHT, PLAYER_WIDTH,
    PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, SPAWN_INTERVAL, TRAIL_ALPHA,
};
use crate::sim::Playfield;

/// Why a settings blob was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Settings file could not be read
    Io(std::io::Error),
    /// A field is outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid settings JSON: {e}"),
            Self::Io(e) => write!(f, "cannot read settings: {e}"),
            Self::OutOfRange { field, value } => {
                write!(f, "setting `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in canvas pixels
    pub width: f32,
    /// Playfield height in canvas pixels
    pub height: f32,
    /// Frames between enemy spawns
    pub spawn_interval: u32,
    /// Start a new session on the frame after game over instead of waiting
    /// for the restart key
    pub auto_restart: bool,
    /// Fixed RNG seed; random per page load when absent
    pub seed: Option<u64>,
    /// Opacity of the per-frame black fill (1.0 = hard clear, lower = longer trails)
    pub trail_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,
            auto_restart: false,
            seed: None,
            trail_alpha: TRAIL_ALPHA,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings blob
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Narrowest playfield where the largest enemy still spawns inside the walls
    pub fn min_width() -> f32 {
        (2.0 * ENEMY_MAX_SPAWN_RADIUS as f32 + ENEMY_SPAWN_GAP).max(PLAYER_WIDTH)
    }

    /// Shortest playfield that fits the player above the floor gap and the
    /// largest enemy below the ceiling
    pub fn min_height() -> f32 {
        (PLAYER_HEIGHT + PLAYER_FLOOR_GAP).max(2.0 * ENEMY_MAX_SPAWN_RADIUS as f32)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width.is_finite() && self.width >= Self::min_width()) {
            return Err(SettingsError::OutOfRange {
                field: "width",
                value: self.width.into(),
            });
        }
        if !(self.height.is_finite() && self.height >= Self::min_height()) {
            return Err(SettingsError::OutOfRange {
                field: "height",
                value: self.height.into(),
            });
        }
        if self.spawn_interval == 0 {
            return Err(SettingsError::OutOfRange {
                field: "spawn_interval",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(SettingsError::OutOfRange {
                field: "trail_alpha",
                value: self.trail_alpha.into(),
            });
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.width,
            height: self.height,
        }
    }

    /// Canvas attribute holding an optional settings blob
    #[cfg(target_arch = "wasm32")]
    const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the canvas element's `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        let Some(json) = canvas.get_attribute(Self::DATA_ATTRIBUTE) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::DATA_ATTRIBUTE);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", Self::DATA_ATTRIBUTE);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, tick};

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.playfield(), Playfield::default());
        assert!(!settings.auto_restart);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "auto_restart": true, "seed": 42 }"#).unwrap();
        assert!(settings.auto_restart);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.width, PLAYFIELD_WIDTH);
        assert_eq!(settings.spawn_interval, SPAWN_INTERVAL);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let err = Settings::from_json(r#"{ "spawn_interval": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "spawn_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_trail_alpha_rejected() {
        let err = Settings::from_json(r#"{ "trail_alpha": 1.5 }"#).unwrap_err();
        assert_eq!(err.to_string(), "setting `trail_alpha` out of range: 1.5");
    }

    #[test]
    fn test_negative_width_rejected() {
        assert!(Settings::from_json(r#"{ "width": -10 }"#).is_err());
    }

    #[test]
    fn test_too_small_playfield_rejected() {
        let err = Settings::from_json(r#"{ "width": 80, "height": 30 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { field: "width", .. }));

        let err = Settings::from_json(r#"{ "height": 60 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { field: "height", .. }));

        assert_eq!(Settings::min_width(), 102.0);
        assert_eq!(Settings::min_height(), 100.0);
    }

    #[test]
    fn test_smallest_playfield_keeps_spawns_inside() {
        let json = format!(
            r#"{{ "width": {}, "height": {} }}"#,
            Settings::min_width(),
            Settings::min_height()
        );
        let settings = Settings::from_json(&json).unwrap();

        for seed in 0..50 {
            let mut state = GameState::with_settings(settings.clone(), seed);
            let player = state.player.as_rect();
            assert!(player.pos.x >= 0.0 && player.pos.y >= 0.0);
            assert!(player.pos.x + player.size.x <= settings.width);
            assert!(player.pos.y + player.size.y <= settings.height);

            tick(&mut state, &TickInput::default());
            let enemy = &state.enemies[0];
            assert!(enemy.pos.x - enemy.radius >= 0.0, "seed {seed}: {enemy:?}");
            assert!(enemy.pos.x + enemy.radius <= settings.width, "seed {seed}: {enemy:?}");
            assert!(enemy.pos.y + enemy.radius <= settings.height, "seed {seed}: {enemy:?}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_file(std::path::Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
