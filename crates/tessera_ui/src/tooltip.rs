//! Hover tooltips.
//!
//! The tooltip for the current target is laid out in the same update that
//! found the target, so it is visible on the first hovered frame.

use crate::assets::TextureHandle;
use crate::geometry::{Rect, Vec2};
use crate::render::{DrawEffect, Outline, Quad, Renderer, TextRun};
use crate::style::Color;
use crate::text::{wrap_text, FontHandle};

/// Configuration for tooltip rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipConfig {
    /// Background color.
    pub background: Color,
    /// Border color.
    pub border: Color,
    /// Text color.
    pub text: Color,
    /// Padding inside tooltip.
    pub padding: f32,
    /// Border width.
    pub border_width: f32,
    /// Offset from cursor.
    pub cursor_offset: Vec2,
    /// Maximum width before wrapping.
    pub max_width: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background: Color::rgba(0.05, 0.05, 0.08, 0.95),
            border: Color::rgba(0.6, 0.6, 0.6, 1.0),
            text: Color::rgba(0.9, 0.9, 0.9, 1.0),
            padding: 8.0,
            border_width: 1.0,
            cursor_offset: Vec2::new(12.0, 12.0),
            max_width: 300.0,
        }
    }
}

/// A laid-out tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Wrapped lines.
    pub lines: Vec<String>,
    /// Cursor position it was opened at.
    pub anchor: Vec2,
    /// Bounds on screen.
    pub bounds: Rect,
}

impl Tooltip {
    /// Lays out `text` next to the cursor, flipping to the other side of the
    /// cursor when it would leave the screen.
    #[must_use]
    pub fn layout(text: &str, cursor: Vec2, screen: Vec2, font: &FontHandle, config: &TooltipConfig) -> Self {
        let lines = wrap_text(text, font, 1.0, config.max_width);
        let text_width = lines
            .iter()
            .map(|l| font.line_width(l, 1.0))
            .fold(0.0_f32, f32::max);
        #[allow(clippy::cast_precision_loss)]
        let text_height = lines.len() as f32 * font.line_height(1.0);

        let width = text_width + config.padding * 2.0;
        let height = text_height + config.padding * 2.0;

        let mut x = cursor.x + config.cursor_offset.x;
        let mut y = cursor.y + config.cursor_offset.y;
        if x + width > screen.x {
            x = cursor.x - width - config.cursor_offset.x;
        }
        if y + height > screen.y {
            y = cursor.y - height - config.cursor_offset.y;
        }

        Self {
            lines,
            anchor: cursor,
            bounds: Rect::new(x.max(0.0), y.max(0.0), width, height),
        }
    }

    /// Draws the tooltip.
    pub fn draw(&self, renderer: &mut dyn Renderer, white: TextureHandle, font: &FontHandle, config: &TooltipConfig) {
        renderer.draw_quad(&Quad {
            bounds: self.bounds,
            texture: white,
            color: config.background,
            clip: None,
            effect: DrawEffect::Normal,
        });
        renderer.draw_outline(&Outline {
            bounds: self.bounds,
            color: config.border,
            width: config.border_width,
            clip: None,
        });

        let mut pos = Vec2::new(self.bounds.x + config.padding, self.bounds.y + config.padding);
        for line in &self.lines {
            renderer.draw_text(&TextRun {
                text: line.clone(),
                position: pos,
                font: font.id(),
                scale: 1.0,
                color: config.text,
                outline_color: Color::TRANSPARENT,
                outline_width: 0.0,
                clip: None,
                effect: DrawEffect::Normal,
            });
            pos.y += font.line_height(1.0);
        }
    }
}

/// Holds the tooltip of the current target, if any.
#[derive(Debug, Clone)]
pub struct TooltipManager {
    current: Option<Tooltip>,
    screen_size: Vec2,
    /// Appearance.
    pub config: TooltipConfig,
}

impl TooltipManager {
    /// Creates a new tooltip manager.
    #[must_use]
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            current: None,
            screen_size,
            config: TooltipConfig::default(),
        }
    }

    /// Updates screen size.
    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    /// Shows a tooltip immediately.
    pub fn show(&mut self, text: &str, cursor: Vec2, font: &FontHandle) {
        self.current = Some(Tooltip::layout(text, cursor, self.screen_size, font, &self.config));
    }

    /// Hides the current tooltip.
    pub fn hide(&mut self) {
        self.current = None;
    }

    /// Returns true if a tooltip is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the current tooltip.
    #[must_use]
    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }

    /// Draws the active tooltip.
    pub fn draw(&self, renderer: &mut dyn Renderer, white: TextureHandle, font: &FontHandle) {
        if let Some(tooltip) = &self.current {
            tooltip.draw(renderer, white, font, &self.config);
        }
    }
}

impl Default for TooltipManager {
    fn default() -> Self {
        Self::new(Vec2::new(1920.0, 1080.0))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::render::CommandList;
    use crate::style::FontStyle;
    use crate::text::MonospaceMetrics;

    fn font() -> FontHandle {
        FontHandle::new(0, FontStyle::Regular, Rc::new(MonospaceMetrics::DEFAULT))
    }

    #[test]
    fn test_tooltip_instant_show() {
        let mut manager = TooltipManager::new(Vec2::new(1920.0, 1080.0));
        manager.show("Test tooltip", Vec2::new(100.0, 100.0), &font());
        assert!(manager.is_active());

        let mut list = CommandList::new();
        manager.draw(&mut list, TextureHandle(1), &font());
        assert_eq!(list.texts().count(), 1);

        manager.hide();
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_tooltip_screen_clamping() {
        let screen = Vec2::new(1920.0, 1080.0);
        let tooltip = Tooltip::layout("Test", Vec2::new(1900.0, 1060.0), screen, &font(), &TooltipConfig::default());
        assert!(tooltip.bounds.right() <= 1920.0);
        assert!(tooltip.bounds.bottom() <= 1080.0);
    }

    #[test]
    fn test_tooltip_wraps() {
        let config = TooltipConfig {
            max_width: 80.0,
            ..TooltipConfig::default()
        };
        let tooltip = Tooltip::layout("aaaa bbbb cccc", Vec2::ZERO, Vec2::new(800.0, 600.0), &font(), &config);
        assert_eq!(tooltip.lines.len(), 2);
        assert_eq!(tooltip.bounds.height, 2.0 * 16.0 + 16.0);
    }
}
