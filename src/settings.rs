//! Board and animation settings
//!
//! Loaded from a JSON file on native builds. Missing fields fall back to the
//! defaults, which reproduce the classic 9x9, four-colour board.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BoardError, SettingsError};
use crate::layout::BoardLayout;
use crate::sim::BoardConfig;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub rows: usize,
    pub columns: usize,
    /// Number of distinct tile types (at least 3)
    pub tile_types: u8,

    // === Geometry (pixels) ===
    pub tile_size: f32,
    pub tile_spacing: f32,
    pub grid_margin: f32,

    // === Cascades ===
    /// Animate cascades step by step instead of resolving them instantly
    pub animated: bool,
    /// Falling tile speed (pixels/second)
    pub fall_speed: f32,
    /// Cascade passes before the board is reported unstable
    pub max_cascade_passes: u32,

    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            tile_types: TILE_TYPE_COUNT,

            tile_size: TILE_SIZE,
            tile_spacing: TILE_SPACING,
            grid_margin: GRID_MARGIN,

            animated: true,
            fall_speed: FALL_SPEED,
            max_cascade_passes: MAX_CASCADE_PASSES,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Validated board dimensions
    pub fn board_config(&self) -> Result<BoardConfig, BoardError> {
        BoardConfig::new(self.rows, self.columns, self.tile_types)
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            rows: self.rows,
            columns: self.columns,
            tile_size: self.tile_size,
            tile_spacing: self.tile_spacing,
            margin: self.grid_margin,
        }
    }

    /// Check every field, not just the board dimensions
    pub fn validate(&self) -> Result<(), BoardError> {
        self.board_config()?;
        if self.tile_size.is_nan() || self.tile_size <= 0.0 {
            return Err(BoardError::InvalidConfiguration(format!(
                "tile_size must be positive (got {})",
                self.tile_size
            )));
        }
        if self.tile_spacing.is_nan() || self.tile_spacing < 0.0 || self.grid_margin.is_nan() || self.grid_margin < 0.0 {
            return Err(BoardError::InvalidConfiguration(
                "tile_spacing and grid_margin must not be negative".to_string(),
            ));
        }
        if self.fall_speed.is_nan() || self.fall_speed <= 0.0 {
            return Err(BoardError::InvalidConfiguration(format!(
                "fall_speed must be positive (got {})",
                self.fall_speed
            )));
        }
        if self.max_cascade_passes == 0 {
            return Err(BoardError::InvalidConfiguration(
                "max_cascade_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.board_config().unwrap(), BoardConfig::default());
        assert_eq!(settings.layout(), BoardLayout::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "rows": 6, "animated": false, "seed": 42 }"#).unwrap();
        assert_eq!(settings.rows, 6);
        assert_eq!(settings.columns, GRID_COLUMNS);
        assert!(!settings.animated);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.fall_speed, FALL_SPEED);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        for json in [
            r#"{ "tile_types": 2 }"#,
            r#"{ "rows": 0 }"#,
            r#"{ "tile_size": 0.0 }"#,
            r#"{ "fall_speed": -5.0 }"#,
            r#"{ "max_cascade_passes": 0 }"#,
        ] {
            assert!(
                matches!(Settings::from_json(json), Err(SettingsError::Invalid(_))),
                "{json} should be rejected"
            );
        }
        assert!(matches!(Settings::from_json("{ nope"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            tile_types: 5,
            seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("open-match-missing-settings.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Read { .. })));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
