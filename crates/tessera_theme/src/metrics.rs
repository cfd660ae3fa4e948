//! Font metric tables.
//!
//! A theme describes each font with a small TOML table instead of shipping
//! a rasterizer:
//!
//! ```toml
//! line_height = 22.0
//! default_advance = 10.0
//!
//! [advances]
//! "i" = 4.0
//! "W" = 14.0
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tessera_ui::text::GlyphMetrics;
use tessera_ui::{UiError, UiResult};

use crate::document::line_of;

/// Per-character advances with a fallback width.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableMetrics {
    line_height: f32,
    default_advance: f32,
    #[serde(default)]
    advances: HashMap<char, f32>,
}

impl TableMetrics {
    /// Parses a font table.
    ///
    /// # Errors
    ///
    /// `InvalidStyleDocument` on syntax errors, unknown keys or non-positive sizes.
    pub fn parse(text: &str, file: &str) -> UiResult<Self> {
        let invalid = |line, message: String| UiError::InvalidStyleDocument {
            file: file.to_owned(),
            line,
            message,
        };
        let table: Self = toml::from_str(text).map_err(|e| invalid(line_of(text, e.span()), e.message().to_owned()))?;
        if table.line_height <= 0.0 || table.default_advance < 0.0 {
            return Err(invalid(1, "line_height must be positive and default_advance not negative".into()));
        }
        if let Some((ch, _)) = table.advances.iter().find(|(_, advance)| **advance < 0.0) {
            return Err(invalid(1, format!("negative advance for '{ch}'")));
        }
        Ok(table)
    }
}

impl GlyphMetrics for TableMetrics {
    fn advance(&self, ch: char) -> f32 {
        self.advances.get(&ch).copied().unwrap_or(self.default_advance)
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_with_fallback() {
        let metrics = TableMetrics::parse(
            "line_height = 20.0\ndefault_advance = 9.0\n[advances]\n\"i\" = 3.0\n",
            "fonts/Regular.toml",
        )
        .unwrap();
        assert_eq!(metrics.advance('i'), 3.0);
        assert_eq!(metrics.advance('m'), 9.0);
        assert_eq!(metrics.line_height(), 20.0);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(TableMetrics::parse("line_height = 0.0\ndefault_advance = 9.0\n", "f").is_err());
        assert!(TableMetrics::parse("line_height = 10.0\n", "f").is_err());
        let err = TableMetrics::parse("line_height = 10.0\ndefault_advance = 9.0\nkerning = 1\n", "f").unwrap_err();
        assert!(matches!(err, UiError::InvalidStyleDocument { line: 3, .. }));
    }
}
