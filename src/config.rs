use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::style::StrokeStyle;

/// Whether finished gestures are committed to a raster surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasMode {
    /// Vector only: every gesture accumulates into one path that is replayed
    /// each frame.
    Transient,
    /// Raster backed: a finished gesture is composited onto the raster
    /// surface and the live path is reset.
    #[default]
    Persistent,
}

/// Settings for a [`crate::StrokeCanvas`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults
pub struct CanvasConfig {
    pub mode: CanvasMode,
    pub style: StrokeStyle,
    /// Color a fresh or cleared raster surface is filled with
    pub background: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            mode: CanvasMode::Persistent,
            style: StrokeStyle::default(),
            background: Color32::WHITE,
        }
    }
}

impl CanvasConfig {
    pub fn transient() -> Self {
        Self {
            mode: CanvasMode::Transient,
            ..Self::default()
        }
    }

    pub fn persistent() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.style.validate()
    }
}

/// Status texts shown by the [`crate::Shell`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellMessages {
    /// Neutral message shown at startup and after a clear
    pub prompt: String,
    /// Prepended to the label returned by the classifier
    pub classification_prefix: String,
    /// Shown when there is no drawing to classify
    pub no_image: String,
    /// Prepended to a classifier failure
    pub error_prefix: String,
}

impl Default for ShellMessages {
    fn default() -> Self {
        Self {
            prompt: "Draw a figure".to_owned(),
            classification_prefix: "Classification: ".to_owned(),
            no_image: "Error: could not get the drawing.".to_owned(),
            error_prefix: "Error: ".to_owned(),
        }
    }
}

/// Top-level configuration, usually loaded from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub canvas: CanvasConfig,
    pub messages: ShellMessages,
}

impl ShellConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ShellConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.canvas.mode, CanvasMode::Persistent);
        assert_eq!(config.canvas.background, Color32::WHITE);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "canvas": { "mode": "transient", "style": { "width": 4.0, "cap": "round" } },
            "messages": { "prompt": "Dibuja una figura" }
        }"#;
        let config = ShellConfig::from_json_str(json).unwrap();

        assert_eq!(config.canvas.mode, CanvasMode::Transient);
        assert_eq!(config.canvas.style.width, 4.0);
        assert_eq!(config.canvas.style.cap, crate::style::LineCap::Round);
        assert_eq!(config.canvas.style.color, Color32::BLACK);
        assert_eq!(config.messages.prompt, "Dibuja una figura");
        assert_eq!(config.messages.classification_prefix, "Classification: ");
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        let json = r#"{ "canvas": { "style": { "width": 0.0 } } }"#;
        let result = ShellConfig::from_json_str(json);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = ShellConfig::from_json_str("{ canvas: ");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = ShellConfig::default();
        config.canvas.background = Color32::from_rgb(10, 20, 30);
        let json = config.to_json_string().unwrap();
        assert_eq!(ShellConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "canvas": {{ "mode": "persistent" }} }}"#).unwrap();

        let config = ShellConfig::from_path(file.path()).unwrap();
        assert_eq!(config.canvas.mode, CanvasMode::Persistent);

        let missing = ShellConfig::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
