//! Pre-measured glyph metrics and word wrapping.
//!
//! The toolkit never shapes text itself; fonts arrive as advance tables from
//! the asset provider and everything here is arithmetic over those tables.

use std::fmt;
use std::rc::Rc;

use crate::geometry::Vec2;
use crate::style::FontStyle;

/// Advance widths and line height of one font at scale 1.
pub trait GlyphMetrics: fmt::Debug {
    /// Horizontal advance of a character.
    fn advance(&self, ch: char) -> f32;
    /// Distance between baselines.
    fn line_height(&self) -> f32;
}

/// Fixed-pitch metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance of every character.
    pub advance: f32,
    /// Line height.
    pub line_height: f32,
}

impl MonospaceMetrics {
    /// 8 px per character, 16 px per line.
    pub const DEFAULT: Self = Self {
        advance: 8.0,
        line_height: 16.0,
    };
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn advance(&self, _ch: char) -> f32 {
        self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// A loaded font: renderer-facing id plus metrics for layout.
#[derive(Debug, Clone)]
pub struct FontHandle {
    id: u32,
    style: FontStyle,
    metrics: Rc<dyn GlyphMetrics>,
}

impl FontHandle {
    /// Creates a handle.
    #[must_use]
    pub fn new(id: u32, style: FontStyle, metrics: Rc<dyn GlyphMetrics>) -> Self {
        Self { id, style, metrics }
    }

    /// Renderer-facing id.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Style this font was loaded for.
    #[must_use]
    pub const fn style(&self) -> FontStyle {
        self.style
    }

    /// Line height at `scale`.
    #[must_use]
    pub fn line_height(&self, scale: f32) -> f32 {
        self.metrics.line_height() * scale
    }

    /// Width of a single line at `scale`.
    #[must_use]
    pub fn line_width(&self, line: &str, scale: f32) -> f32 {
        line.chars().map(|c| self.metrics.advance(c)).sum::<f32>() * scale
    }

    /// Size of a block of text, honoring explicit newlines only.
    #[must_use]
    pub fn measure(&self, text: &str, scale: f32) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut lines = 0usize;
        for line in text.split('\n') {
            width = width.max(self.line_width(line, scale));
            lines += 1;
        }
        #[allow(clippy::cast_precision_loss)]
        Vec2::new(width, lines as f32 * self.line_height(scale))
    }
}

/// Greedy word wrap. A non-positive `max_width` disables wrapping; words
/// longer than a line are broken between characters.
#[must_use]
pub fn wrap_text(text: &str, font: &FontHandle, scale: f32, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 {
        return text.split('\n').map(str::to_owned).collect();
    }

    let space = font.line_width(" ", scale);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split(' ') {
            let word_width = font.line_width(word, scale);
            let needed = if line.is_empty() { word_width } else { line_width + space + word_width };

            if needed <= max_width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_width = needed;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            // word alone still too wide: hard-break it
            for ch in word.chars() {
                let w = font.line_width(ch.encode_utf8(&mut [0; 4]), scale);
                if line_width + w > max_width && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(ch);
                line_width += w;
            }
        }
        out.push(line);
    }
    out
}

/// Height of `text` wrapped to `max_width`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn wrapped_height(text: &str, font: &FontHandle, scale: f32, max_width: f32) -> f32 {
    wrap_text(text, font, scale, max_width).len() as f32 * font.line_height(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono() -> FontHandle {
        FontHandle::new(0, FontStyle::Regular, Rc::new(MonospaceMetrics::DEFAULT))
    }

    #[test]
    fn test_measure_multiline() {
        let size = mono().measure("abcd\nab", 1.0);
        assert_eq!(size, Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_wrap_by_words() {
        // 10 chars per line at 8px
        let lines = wrap_text("hello big world", &mono(), 1.0, 80.0);
        assert_eq!(lines, vec!["hello big".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text("abcdefghij", &mono(), 1.0, 32.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrapped_height_scales() {
        let h = wrapped_height("one two", &mono(), 2.0, 0.0);
        assert_eq!(h, 32.0);
    }
}
