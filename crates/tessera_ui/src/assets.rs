//! Asset-provider boundary and the loaded theme.
//!
//! The core never touches files. A provider hands out texture handles, font
//! metrics and default style sheets by name; [`Theme::load`] pulls the full
//! required set once and fails on the first missing asset.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::cursor::{CursorData, CursorStyle, CursorType};
use crate::entity::{ButtonSkin, PanelSkin, SliderSkin};
use crate::error::{UiError, UiResult};
use crate::geometry::Vec2;
use crate::style::{FontStyle, InteractionState, PropertyId, StyleDefaults, StyleKey, StyleSheet, StyleValue};
use crate::text::{FontHandle, MonospaceMetrics};

/// Opaque texture reference understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Source of theme assets.
pub trait AssetProvider {
    /// Loads a texture by theme-relative path (`textures/button_default`).
    ///
    /// # Errors
    ///
    /// `AssetMissing` when the texture does not exist.
    fn load_texture(&mut self, path: &str) -> UiResult<TextureHandle>;

    /// Loads font metrics.
    ///
    /// # Errors
    ///
    /// `AssetMissing` when the font does not exist.
    fn load_font(&mut self, style: FontStyle) -> UiResult<FontHandle>;

    /// Loads the default sheet of a style key, all states merged.
    ///
    /// # Errors
    ///
    /// `AssetMissing` when no document exists for `name`;
    /// `InvalidStyleDocument` when one exists but does not parse.
    fn load_style_defaults(&mut self, name: &str) -> UiResult<StyleSheet>;

    /// Loads the draw metadata of a cursor texture. Providers without
    /// metadata serve [`CursorData::DEFAULT`].
    ///
    /// # Errors
    ///
    /// `AssetMissing` when the provider requires metadata and has none.
    fn load_cursor_data(&mut self, _cursor: CursorType) -> UiResult<CursorData> {
        Ok(CursorData::DEFAULT)
    }
}

/// Fallback names tried when a primary texture is missing.
#[derive(Debug, Clone, Default)]
pub struct AssetAliases {
    map: HashMap<String, String>,
}

impl AssetAliases {
    /// No aliases.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Aliases for renamed skins in older themes.
    #[must_use]
    pub fn legacy() -> Self {
        let mut aliases = Self::default();
        aliases.insert("textures/panel_alternative", "textures/panel_golden");
        aliases.insert("textures/panel_alternative_md", "textures/panel_golden_md");
        aliases
    }

    /// Adds an alias.
    pub fn insert(&mut self, primary: impl Into<String>, fallback: impl Into<String>) {
        self.map.insert(primary.into(), fallback.into());
    }

    /// Fallback for a primary name.
    #[must_use]
    pub fn get(&self, primary: &str) -> Option<&str> {
        self.map.get(primary).map(String::as_str)
    }
}

/// Textures, fonts and default styles of one theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Solid white, used for flat fills and highlights.
    pub white: TextureHandle,
    panels: [TextureHandle; 5],
    buttons: [[TextureHandle; 3]; 3],
    checkbox: [TextureHandle; 3],
    radio: [TextureHandle; 3],
    sliders: [TextureHandle; 2],
    slider_marks: [TextureHandle; 2],
    /// Progress bar frame.
    pub progress_bar: TextureHandle,
    /// Progress bar fill.
    pub progress_bar_fill: TextureHandle,
    /// Divider.
    pub horizontal_line: TextureHandle,
    /// Scrollbar track.
    pub scrollbar: TextureHandle,
    /// Scrollbar thumb.
    pub scrollbar_mark: TextureHandle,
    /// Dropdown arrow (closed).
    pub arrow_down: TextureHandle,
    /// Dropdown arrow (open).
    pub arrow_up: TextureHandle,
    /// Frame behind icons.
    pub icon_background: TextureHandle,
    cursors: [CursorStyle; 3],
    fonts: [FontHandle; 3],
    /// Default sheet per style key.
    pub styles: StyleDefaults,
}

fn state_suffix(state: InteractionState) -> &'static str {
    match state {
        InteractionState::Default => "",
        InteractionState::MouseHover => "_hover",
        InteractionState::MouseDown => "_down",
    }
}

impl Theme {
    /// Loads every required asset, trying the legacy aliases for missing textures.
    ///
    /// # Errors
    ///
    /// The first `AssetMissing` or `InvalidStyleDocument` encountered.
    pub fn load(provider: &mut dyn AssetProvider) -> UiResult<Self> {
        Self::load_with_aliases(provider, &AssetAliases::legacy())
    }

    /// Loads every required asset with an explicit alias table.
    ///
    /// # Errors
    ///
    /// The first `AssetMissing` or `InvalidStyleDocument` encountered.
    pub fn load_with_aliases(provider: &mut dyn AssetProvider, aliases: &AssetAliases) -> UiResult<Self> {
        let mut tex = |path: String| -> UiResult<TextureHandle> {
            match (provider.load_texture(&path), aliases.get(&path)) {
                (Err(UiError::AssetMissing { .. }), Some(fallback)) => {
                    tracing::warn!(%path, %fallback, "texture missing, using legacy alias");
                    provider.load_texture(fallback)
                }
                (result, _) => result,
            }
        };

        let mut panels = [TextureHandle(0); 5];
        for (slot, skin) in panels.iter_mut().zip(PanelSkin::TEXTURED) {
            if let Some(stem) = skin.file_stem() {
                *slot = tex(format!("textures/{stem}"))?;
            }
        }

        let mut buttons = [[TextureHandle(0); 3]; 3];
        for skin in ButtonSkin::ALL {
            for state in InteractionState::ALL {
                buttons[skin.index()][state.index()] =
                    tex(format!("textures/{}{}", skin.file_stem(), state_suffix(state)))?;
            }
        }

        let mut checkbox = [TextureHandle(0); 3];
        let mut radio = [TextureHandle(0); 3];
        for state in InteractionState::ALL {
            checkbox[state.index()] = tex(format!("textures/checkbox{}", state_suffix(state)))?;
            radio[state.index()] = tex(format!("textures/radio{}", state_suffix(state)))?;
        }

        let mut sliders = [TextureHandle(0); 2];
        let mut slider_marks = [TextureHandle(0); 2];
        for skin in SliderSkin::ALL {
            sliders[skin.index()] = tex(format!("textures/{}", skin.file_stem()))?;
            slider_marks[skin.index()] = tex(format!("textures/{}_mark", skin.file_stem()))?;
        }

        let white = tex("textures/white_texture".into())?;
        let progress_bar = tex("textures/progressbar".into())?;
        let progress_bar_fill = tex("textures/progressbar_fill".into())?;
        let horizontal_line = tex("textures/horizontal_line".into())?;
        let scrollbar = tex("textures/scrollbar".into())?;
        let scrollbar_mark = tex("textures/scrollbar_mark".into())?;
        let arrow_down = tex("textures/arrow_down".into())?;
        let arrow_up = tex("textures/arrow_up".into())?;
        let icon_background = tex("textures/icons/background".into())?;
        let mut cursor_textures = [TextureHandle(0); 3];
        for cursor in CursorType::ALL {
            cursor_textures[cursor.index()] = tex(format!("textures/cursor_{}", cursor.name()))?;
        }

        let fonts = [
            provider.load_font(FontStyle::Regular)?,
            provider.load_font(FontStyle::Bold)?,
            provider.load_font(FontStyle::Italic)?,
        ];

        let mut cursors = [CursorStyle {
            texture: TextureHandle(0),
            data: CursorData::DEFAULT,
        }; 3];
        for cursor in CursorType::ALL {
            cursors[cursor.index()] = CursorStyle {
                texture: cursor_textures[cursor.index()],
                data: provider.load_cursor_data(cursor)?,
            };
        }

        let mut styles = StyleDefaults::empty();
        for key in StyleKey::ALL {
            let sheet = match provider.load_style_defaults(key.name()) {
                Err(UiError::AssetMissing { .. }) if key == StyleKey::DropDownSelectedPanel => {
                    tracing::warn!(style = key.name(), "style missing, falling back to Panel");
                    let mut sheet = provider.load_style_defaults(StyleKey::Panel.name())?;
                    sheet.set(
                        InteractionState::Default,
                        PropertyId::DefaultSize,
                        StyleValue::Vector(Vec2::ZERO),
                    );
                    sheet
                }
                other => other?,
            };
            styles.set_sheet(key, sheet);
        }

        tracing::info!("theme loaded");
        Ok(Self {
            white,
            panels,
            buttons,
            checkbox,
            radio,
            sliders,
            slider_marks,
            progress_bar,
            progress_bar_fill,
            horizontal_line,
            scrollbar,
            scrollbar_mark,
            arrow_down,
            arrow_up,
            icon_background,
            cursors,
            fonts,
            styles,
        })
    }

    /// Panel texture; `None` for [`PanelSkin::None`].
    #[must_use]
    pub fn panel(&self, skin: PanelSkin) -> Option<TextureHandle> {
        PanelSkin::TEXTURED
            .iter()
            .position(|s| *s == skin)
            .map(|i| self.panels[i])
    }

    /// Button texture for a skin and state.
    #[must_use]
    pub const fn button(&self, skin: ButtonSkin, state: InteractionState) -> TextureHandle {
        self.buttons[skin.index()][state.index()]
    }

    /// Check box texture for a state.
    #[must_use]
    pub const fn checkbox(&self, state: InteractionState) -> TextureHandle {
        self.checkbox[state.index()]
    }

    /// Radio button texture for a state.
    #[must_use]
    pub const fn radio(&self, state: InteractionState) -> TextureHandle {
        self.radio[state.index()]
    }

    /// Slider track texture.
    #[must_use]
    pub const fn slider(&self, skin: SliderSkin) -> TextureHandle {
        self.sliders[skin.index()]
    }

    /// Slider handle texture.
    #[must_use]
    pub const fn slider_mark(&self, skin: SliderSkin) -> TextureHandle {
        self.slider_marks[skin.index()]
    }

    /// Texture and metadata of a stock cursor.
    #[must_use]
    pub const fn cursor(&self, cursor: CursorType) -> CursorStyle {
        self.cursors[cursor.index()]
    }

    /// Font for a style.
    #[must_use]
    pub const fn font(&self, style: FontStyle) -> &FontHandle {
        &self.fonts[style.index()]
    }
}

/// In-memory provider serving the built-in theme.
///
/// Textures are synthetic handles numbered in request order; fonts use
/// [`MonospaceMetrics::DEFAULT`]; styles come from [`StyleDefaults::builtin`].
#[derive(Debug, Clone)]
pub struct BuiltinAssets {
    textures: HashMap<String, TextureHandle>,
    missing: HashSet<String>,
    styles: StyleDefaults,
    metrics: MonospaceMetrics,
    next_texture: u32,
}

impl BuiltinAssets {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            missing: HashSet::new(),
            styles: StyleDefaults::builtin(),
            metrics: MonospaceMetrics::DEFAULT,
            next_texture: 1,
        }
    }

    /// Uses different font metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Pretends an asset (texture path or style name) does not exist.
    #[must_use]
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.missing.insert(name.into());
        self
    }

    /// Handle previously served for a path.
    #[must_use]
    pub fn texture(&self, path: &str) -> Option<TextureHandle> {
        self.textures.get(path).copied()
    }
}

impl Default for BuiltinAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProvider for BuiltinAssets {
    fn load_texture(&mut self, path: &str) -> UiResult<TextureHandle> {
        if self.missing.contains(path) {
            return Err(UiError::missing(path));
        }
        if let Some(handle) = self.textures.get(path) {
            return Ok(*handle);
        }
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(path.to_owned(), handle);
        Ok(handle)
    }

    fn load_font(&mut self, style: FontStyle) -> UiResult<FontHandle> {
        let path = format!("fonts/{}", style.name());
        if self.missing.contains(&path) {
            return Err(UiError::missing(path));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(FontHandle::new(style.index() as u32, style, Rc::new(self.metrics)))
    }

    fn load_style_defaults(&mut self, name: &str) -> UiResult<StyleSheet> {
        if self.missing.contains(name) {
            return Err(UiError::missing(format!("styles/{name}")));
        }
        StyleKey::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .map(|k| self.styles.sheet(k).clone())
            .ok_or_else(|| UiError::missing(format!("styles/{name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Resolver;

    #[test]
    fn test_builtin_theme_loads() {
        let theme = Theme::load(&mut BuiltinAssets::new()).unwrap();
        assert_eq!(theme.panel(PanelSkin::None), None);
        assert!(theme.panel(PanelSkin::Fancy).is_some());
        assert_ne!(
            theme.button(ButtonSkin::Default, InteractionState::Default),
            theme.button(ButtonSkin::Default, InteractionState::MouseDown)
        );
        assert_eq!(theme.font(FontStyle::Bold).style(), FontStyle::Bold);
    }

    #[test]
    fn test_missing_texture_is_fatal() {
        let mut provider = BuiltinAssets::new().without("textures/scrollbar");
        let err = Theme::load(&mut provider).unwrap_err();
        assert_eq!(err, UiError::missing("textures/scrollbar"));
    }

    #[test]
    fn test_legacy_alias() {
        let mut provider = BuiltinAssets::new().without("textures/panel_alternative");
        let theme = Theme::load(&mut provider).unwrap();
        assert_eq!(
            theme.panel(PanelSkin::Alternative),
            provider.texture("textures/panel_golden")
        );

        let mut provider = BuiltinAssets::new().without("textures/panel_alternative");
        assert!(Theme::load_with_aliases(&mut provider, &AssetAliases::none()).is_err());
    }

    #[test]
    fn test_selected_panel_falls_back() {
        let mut provider = BuiltinAssets::new().without("DropDownSelectedPanel");
        let theme = Theme::load(&mut provider).unwrap();
        let sheet = theme.styles.sheet(StyleKey::DropDownSelectedPanel);
        let r = Resolver::new(None, sheet, InteractionState::Default);
        assert_eq!(r.vector(PropertyId::DefaultSize), Vec2::ZERO);
        assert_eq!(r.vector(PropertyId::Padding), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_cursors_load_per_type() {
        let mut provider = BuiltinAssets::new();
        let theme = Theme::load(&mut provider).unwrap();
        let ibeam = theme.cursor(CursorType::IBeam);
        assert_eq!(Some(ibeam.texture), provider.texture("textures/cursor_ibeam"));
        assert_eq!(ibeam.data, CursorData::DEFAULT);

        let mut provider = BuiltinAssets::new().without("textures/cursor_pointer");
        assert_eq!(Theme::load(&mut provider).unwrap_err(), UiError::missing("textures/cursor_pointer"));
    }

    #[test]
    fn test_missing_font_is_fatal() {
        let mut provider = BuiltinAssets::new().without("fonts/Italic");
        assert!(matches!(Theme::load(&mut provider), Err(UiError::AssetMissing { .. })));
    }
}
