//! Editor settings and preferences
//!
//! Persisted separately from builds as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{BrickKind, Color, Tool};

/// Editor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Placement ===
    /// Color of newly created bricks
    pub default_color: Color,
    /// Kind placed by clicking a surface
    pub default_kind: BrickKind,
    /// Tool active at startup
    pub default_tool: Tool,

    // === UI ===
    /// Swatches offered by the color picker
    pub palette: Vec<Color>,
    /// Draw the baseplate grid lines
    pub show_grid: bool,
    /// Show the controls hint overlay
    pub show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_color: Color::default(),
            default_kind: BrickKind::default(),
            default_tool: Tool::default(),

            palette: Color::PALETTE.to_vec(),
            show_grid: true,
            show_help: true,
        }
    }
}

impl Settings {
    /// Palette with the default color guaranteed to be present
    pub fn palette(&self) -> Vec<Color> {
        let mut palette = self.palette.clone();
        if !palette.contains(&self.default_color) {
            palette.insert(0, self.default_color);
        }
        palette
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No settings at {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_color, Color::RED);
        assert_eq!(settings.default_kind, BrickKind::TwoByFour);
        assert_eq!(settings.palette.len(), 7);
        assert_eq!(settings.palette(), settings.palette);
    }

    #[test]
    fn test_palette_includes_default_color() {
        let settings = Settings {
            default_color: Color::rgb(1, 2, 3),
            ..Default::default()
        };
        let palette = settings.palette();
        assert_eq!(palette[0], Color::rgb(1, 2, 3));
        assert_eq!(palette.len(), 8);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r##"{"default_color":"#0055bf"}"##).unwrap();
        assert_eq!(settings.default_color, Color::BLUE);
        assert!(settings.show_grid);
        assert_eq!(settings.default_tool, Tool::Move);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            default_kind: BrickKind::OneByTwo,
            show_help: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_load_missing_or_broken_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("nope.json")), Settings::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        assert_eq!(Settings::load(&broken), Settings::default());
    }
}
