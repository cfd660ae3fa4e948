//! Directory-backed asset provider.
//!
//! ```text
//! <root>/
//!   textures/panel_default.png      one file per texture path
//!   textures/cursor_ibeam_md.toml   cursor draw width and hotspot
//!   fonts/Regular.toml              metric table per font style
//!   styles/Button-Default.toml      one document per key and state
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tessera_ui::assets::{AssetProvider, TextureHandle};
use tessera_ui::style::{FontStyle, InteractionState, StyleSheet};
use tessera_ui::text::FontHandle;
use tessera_ui::{CursorData, CursorType, UiConfig, UiError, UiResult};

use crate::document::{CursorDocument, StyleDocument};
use crate::metrics::TableMetrics;

/// Image extension looked up for texture paths.
pub const TEXTURE_EXTENSION: &str = "png";

/// Serves a theme from a directory tree.
///
/// Texture handles are assigned in request order and map back to the file
/// through [`DirectoryAssets::texture_file`], so a renderer can upload them.
#[derive(Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
    textures: HashMap<String, TextureHandle>,
    files: Vec<PathBuf>,
}

impl DirectoryAssets {
    /// Provider rooted at `root`. Nothing is read until assets are requested.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            files: Vec::new(),
        }
    }

    /// Provider rooted at the configured theme directory.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the configuration names no theme.
    pub fn from_config(config: &UiConfig) -> UiResult<Self> {
        config
            .theme
            .as_ref()
            .map(Self::new)
            .ok_or_else(|| UiError::InvalidConfig("no theme directory configured".into()))
    }

    /// Theme directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Image file behind a handle served by this provider.
    #[must_use]
    pub fn texture_file(&self, handle: TextureHandle) -> Option<&Path> {
        let index = usize::try_from(handle.0).ok()?.checked_sub(1)?;
        self.files.get(index).map(PathBuf::as_path)
    }

    fn read(&self, relative: &str) -> UiResult<Option<String>> {
        let path = self.root.join(relative);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "theme file unreadable");
                Err(UiError::missing(relative))
            }
        }
    }
}

impl AssetProvider for DirectoryAssets {
    fn load_texture(&mut self, path: &str) -> UiResult<TextureHandle> {
        if let Some(handle) = self.textures.get(path) {
            return Ok(*handle);
        }
        let file = self.root.join(format!("{path}.{TEXTURE_EXTENSION}"));
        if !file.is_file() {
            return Err(UiError::missing(path));
        }
        let next = u32::try_from(self.files.len() + 1).map_err(|_| UiError::missing(path))?;
        let handle = TextureHandle(next);
        tracing::debug!(path, file = %file.display(), id = handle.0, "texture registered");
        self.files.push(file);
        self.textures.insert(path.to_owned(), handle);
        Ok(handle)
    }

    fn load_font(&mut self, style: FontStyle) -> UiResult<FontHandle> {
        let relative = format!("fonts/{}.toml", style.name());
        let text = self
            .read(&relative)?
            .ok_or_else(|| UiError::missing(format!("fonts/{}", style.name())))?;
        let metrics = TableMetrics::parse(&text, &relative)?;
        tracing::debug!(font = style.name(), "font loaded");
        #[allow(clippy::cast_possible_truncation)]
        Ok(FontHandle::new(style.index() as u32, style, Rc::new(metrics)))
    }

    fn load_cursor_data(&mut self, cursor: CursorType) -> UiResult<CursorData> {
        let stem = format!("textures/cursor_{}_md", cursor.name());
        let relative = format!("{stem}.toml");
        let text = self.read(&relative)?.ok_or_else(|| UiError::missing(stem))?;
        let data = CursorDocument::parse(&text, &relative)?;
        tracing::debug!(cursor = cursor.name(), width = data.draw_width, "cursor metadata loaded");
        Ok(data)
    }

    fn load_style_defaults(&mut self, name: &str) -> UiResult<StyleSheet> {
        let mut sheet = StyleSheet::new();
        let mut found = 0;
        for state in InteractionState::ALL {
            let relative = format!("styles/{name}-{}.toml", state.name());
            if let Some(text) = self.read(&relative)? {
                StyleDocument::parse(&text, &relative)?.apply(&mut sheet, state);
                found += 1;
            }
        }
        if found == 0 {
            return Err(UiError::missing(format!("styles/{name}")));
        }
        tracing::debug!(style = name, states = found, "style defaults loaded");
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_ui::style::{PropertyId, StyleValue};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tessera_provider_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("styles")).unwrap();
        fs::create_dir_all(dir.join("textures")).unwrap();
        dir
    }

    #[test]
    fn test_texture_handles_are_stable() {
        let dir = scratch("textures");
        fs::write(dir.join("textures/scrollbar.png"), b"").unwrap();
        let mut assets = DirectoryAssets::new(&dir);

        let first = assets.load_texture("textures/scrollbar").unwrap();
        assert_eq!(assets.load_texture("textures/scrollbar").unwrap(), first);
        assert_eq!(assets.texture_file(first), Some(dir.join("textures/scrollbar.png").as_path()));
        assert_eq!(assets.texture_file(TextureHandle(0)), None);
        assert_eq!(
            assets.load_texture("textures/arrow_up"),
            Err(UiError::missing("textures/arrow_up"))
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_states_merge_into_one_sheet() {
        let dir = scratch("styles");
        fs::write(dir.join("styles/Button-Default.toml"), "Scale = 1.0\n").unwrap();
        fs::write(dir.join("styles/Button-MouseDown.toml"), "Scale = 1.5\n").unwrap();
        let mut assets = DirectoryAssets::new(&dir);

        let sheet = assets.load_style_defaults("Button").unwrap();
        assert_eq!(
            sheet.get(InteractionState::Default, PropertyId::Scale),
            Some(StyleValue::Scalar(1.0))
        );
        assert_eq!(sheet.get(InteractionState::MouseHover, PropertyId::Scale), None);
        assert_eq!(
            sheet.get(InteractionState::MouseDown, PropertyId::Scale),
            Some(StyleValue::Scalar(1.5))
        );
        assert_eq!(assets.load_style_defaults("Label"), Err(UiError::missing("styles/Label")));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_cursor_metadata_per_type() {
        let dir = scratch("cursors");
        fs::write(dir.join("textures/cursor_pointer_md.toml"), "draw_width = 28.0\noffset = [-6.0, 0.0]\n").unwrap();
        let mut assets = DirectoryAssets::new(&dir);

        let data = assets.load_cursor_data(CursorType::Pointer).unwrap();
        assert_eq!(data.draw_width, 28.0);
        assert_eq!(
            assets.load_cursor_data(CursorType::IBeam),
            Err(UiError::missing("textures/cursor_ibeam_md"))
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_from_config_needs_theme() {
        assert!(matches!(
            DirectoryAssets::from_config(&UiConfig::default()),
            Err(UiError::InvalidConfig(_))
        ));
        let config = UiConfig {
            theme: Some(PathBuf::from("/themes/hexagon")),
            ..UiConfig::default()
        };
        assert_eq!(DirectoryAssets::from_config(&config).unwrap().root(), Path::new("/themes/hexagon"));
    }
}
