//! Toolkit configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::geometry::Vec2;

/// Smallest accepted global scale.
pub const MIN_SCALE: f32 = 0.25;
/// Largest accepted global scale.
pub const MAX_SCALE: f32 = 4.0;

/// Startup configuration. Every field has a default, so an empty document is valid.
///
/// ```toml
/// screen_width = 1280
/// screen_height = 720
/// global_scale = 1.0
/// debug_draw = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Screen width in pixels.
    pub screen_width: f32,
    /// Screen height in pixels.
    pub screen_height: f32,
    /// Multiplier for pixel sizes, offsets, padding and spacing.
    pub global_scale: f32,
    /// Draw into an offscreen root surface and composite it at the end.
    pub use_render_target: bool,
    /// Outline every entity's rect.
    pub debug_draw: bool,
    /// Pointer travel, in pixels, before a press becomes a drag.
    pub drag_threshold: f32,
    /// Pixels scrolled per wheel unit.
    pub scroll_step: f32,
    /// Show tooltips for hovered entities.
    pub show_tooltips: bool,
    /// Draw the software cursor.
    pub show_cursor: bool,
    /// Draw the cursor into the root render target instead of over the
    /// composited frame, so the render-target transform applies to it.
    pub include_cursor_in_render_target: bool,
    /// Theme directory, for file-backed providers.
    pub theme: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            global_scale: 1.0,
            use_render_target: false,
            debug_draw: false,
            drag_threshold: 3.0,
            scroll_step: 40.0,
            show_tooltips: true,
            show_cursor: true,
            include_cursor_in_render_target: true,
            theme: None,
        }
    }
}

impl UiConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on syntax errors, unknown keys, or out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.message().to_owned()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Screen size as a vector.
    #[must_use]
    pub const fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    fn validate(&self) -> UiResult<()> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(UiError::InvalidConfig("screen size must be positive".into()));
        }
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.global_scale) {
            return Err(UiError::InvalidConfig(format!(
                "global_scale {} outside [{MIN_SCALE}, {MAX_SCALE}]",
                self.global_scale
            )));
        }
        if self.drag_threshold < 0.0 || self.scroll_step < 0.0 {
            return Err(UiError::InvalidConfig("thresholds must not be negative".into()));
        }
        Ok(())
    }
}
