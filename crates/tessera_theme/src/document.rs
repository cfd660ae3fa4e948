//! Style documents.
//!
//! One TOML file per style key and interaction state, named
//! `styles/<Name>-<State>.toml`. Keys are property names; every key is
//! optional and unknown keys are rejected:
//!
//! ```toml
//! FillColor = "#FFFFFFFF"
//! Padding = [30.0, 30.0]
//! FontStyle = "Bold"
//! ```
//!
//! Cursor textures carry a sibling `textures/cursor_<name>_md.toml` with
//! their draw width and hotspot offset.

use std::ops::Range;

use serde::{Deserialize, Deserializer};
use tessera_ui::style::{Color, FontStyle, InteractionState, PropertyId, StyleSheet, StyleValue};
use tessera_ui::{CursorData, UiError, UiResult, Vec2};

/// Color written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HexColor(Color);

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse_hex(&text)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{text}', expected #RRGGBB or #RRGGBBAA")))
    }
}

/// The properties of one state of one style key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct StyleDocument {
    fill_color: Option<HexColor>,
    outline_color: Option<HexColor>,
    outline_width: Option<i32>,
    force_align_center: Option<bool>,
    font_style: Option<FontStyle>,
    selected_highlight_color: Option<HexColor>,
    shadow_color: Option<HexColor>,
    shadow_offset: Option<[f32; 2]>,
    shadow_scale: Option<f32>,
    scale: Option<f32>,
    padding: Option<[f32; 2]>,
    space_before: Option<[f32; 2]>,
    space_after: Option<[f32; 2]>,
    default_size: Option<[f32; 2]>,
}

impl StyleDocument {
    /// Parses a document; `file` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// `InvalidStyleDocument` with the 1-based line of the offending element.
    pub fn parse(text: &str, file: &str) -> UiResult<Self> {
        toml::from_str(text).map_err(|e| UiError::InvalidStyleDocument {
            file: file.to_owned(),
            line: line_of(text, e.span()),
            message: e.message().to_owned(),
        })
    }

    /// Writes every property the document sets into one state of `sheet`.
    pub fn apply(&self, sheet: &mut StyleSheet, state: InteractionState) {
        let color = |c: Option<HexColor>| c.map(|c| StyleValue::Color(c.0));
        let vector = |v: Option<[f32; 2]>| v.map(|v| StyleValue::Vector(Vec2::from(v)));
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let font = self.font_style.map(|f| StyleValue::Int(f.index() as i32));

        let values = [
            (PropertyId::FillColor, color(self.fill_color)),
            (PropertyId::OutlineColor, color(self.outline_color)),
            (PropertyId::OutlineWidth, self.outline_width.map(StyleValue::Int)),
            (PropertyId::ForceAlignCenter, self.force_align_center.map(StyleValue::Bool)),
            (PropertyId::FontStyle, font),
            (PropertyId::SelectedHighlightColor, color(self.selected_highlight_color)),
            (PropertyId::ShadowColor, color(self.shadow_color)),
            (PropertyId::ShadowOffset, vector(self.shadow_offset)),
            (PropertyId::ShadowScale, self.shadow_scale.map(StyleValue::Scalar)),
            (PropertyId::Scale, self.scale.map(StyleValue::Scalar)),
            (PropertyId::Padding, vector(self.padding)),
            (PropertyId::SpaceBefore, vector(self.space_before)),
            (PropertyId::SpaceAfter, vector(self.space_after)),
            (PropertyId::DefaultSize, vector(self.default_size)),
        ];
        for (prop, value) in values {
            if let Some(value) = value {
                sheet.set(state, prop, value);
            }
        }
    }
}

/// Draw metadata of one cursor texture.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorDocument {
    draw_width: f32,
    #[serde(default)]
    offset: [f32; 2],
}

impl CursorDocument {
    /// Parses a cursor metadata file; `file` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// `InvalidStyleDocument` for malformed files and non-positive widths.
    pub fn parse(text: &str, file: &str) -> UiResult<CursorData> {
        let doc: Self = toml::from_str(text).map_err(|e| UiError::InvalidStyleDocument {
            file: file.to_owned(),
            line: line_of(text, e.span()),
            message: e.message().to_owned(),
        })?;
        if doc.draw_width <= 0.0 {
            return Err(UiError::InvalidStyleDocument {
                file: file.to_owned(),
                line: 1,
                message: format!("draw_width must be positive, got {}", doc.draw_width),
            });
        }
        Ok(CursorData {
            draw_width: doc.draw_width,
            offset: Vec2::from(doc.offset),
        })
    }
}

/// 1-based line containing the start of `span`; line 1 when unknown.
pub(crate) fn line_of(text: &str, span: Option<Range<usize>>) -> usize {
    span.map_or(1, |span| {
        let end = span.start.min(text.len());
        text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let doc = StyleDocument::parse(
            "FillColor = \"#FF000080\"\nPadding = [4.0, 6.0]\nFontStyle = \"Bold\"\nForceAlignCenter = true\n",
            "styles/Button-MouseHover.toml",
        )
        .unwrap();
        let mut sheet = StyleSheet::new();
        doc.apply(&mut sheet, InteractionState::MouseHover);

        assert_eq!(
            sheet.get(InteractionState::MouseHover, PropertyId::FillColor),
            Some(StyleValue::Color(Color::hex(0xFF00_0080)))
        );
        assert_eq!(
            sheet.get(InteractionState::MouseHover, PropertyId::Padding),
            Some(StyleValue::Vector(Vec2::new(4.0, 6.0)))
        );
        assert_eq!(
            sheet.get(InteractionState::MouseHover, PropertyId::FontStyle),
            Some(StyleValue::Int(1))
        );
        // other states and properties stay unset
        assert_eq!(sheet.get(InteractionState::Default, PropertyId::FillColor), None);
        assert_eq!(sheet.get(InteractionState::MouseHover, PropertyId::Scale), None);
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = StyleDocument::parse("Scale = 1.0\n\nFillColour = \"#FFFFFF\"\n", "styles/Panel-Default.toml")
            .unwrap_err();
        match err {
            UiError::InvalidStyleDocument { file, line, message } => {
                assert_eq!(file, "styles/Panel-Default.toml");
                assert_eq!(line, 3);
                assert!(message.contains("FillColour"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bad_color_reports_line() {
        let err = StyleDocument::parse("Scale = 1.0\nFillColor = \"red\"\n", "styles/Label-Default.toml").unwrap_err();
        assert!(matches!(err, UiError::InvalidStyleDocument { line: 2, .. }));
    }

    #[test]
    fn test_cursor_document() {
        let data = CursorDocument::parse("draw_width = 24.0\noffset = [-12.0, -12.0]\n", "textures/cursor_ibeam_md.toml")
            .unwrap();
        assert_eq!(data.draw_width, 24.0);
        assert_eq!(data.offset, Vec2::new(-12.0, -12.0));
        assert_eq!(
            CursorDocument::parse("draw_width = 32.0\n", "c").unwrap().offset,
            Vec2::ZERO
        );
        assert!(matches!(
            CursorDocument::parse("draw_width = 32.0\nhotspot = [1.0, 1.0]\n", "c"),
            Err(UiError::InvalidStyleDocument { line: 2, .. })
        ));
        assert!(matches!(
            CursorDocument::parse("draw_width = 0.0\n", "c"),
            Err(UiError::InvalidStyleDocument { .. })
        ));
    }

    #[test]
    fn test_line_of() {
        assert_eq!(line_of("a\nb\nc", Some(4..5)), 3);
        assert_eq!(line_of("abc", None), 1);
        assert_eq!(line_of("abc", Some(99..100)), 1);
    }
}
