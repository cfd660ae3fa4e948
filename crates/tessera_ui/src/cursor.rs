//! Software mouse cursor.
//!
//! The theme ships one texture per [`CursorType`] plus a small metadata
//! record (draw width and hotspot). The context draws the active cursor as
//! the last quad of the frame, either inside the root render target or on
//! top of the composited result.

use crate::assets::TextureHandle;
use crate::geometry::{Rect, Vec2};

/// Stock cursor shapes every theme provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorType {
    /// Arrow.
    #[default]
    Default,
    /// Pointing hand, for clickable things.
    Pointer,
    /// Text beam, for editable text.
    IBeam,
}

impl CursorType {
    /// Every cursor type, in index order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Pointer, Self::IBeam];

    /// Slot in per-type tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used in theme file paths (`textures/cursor_pointer`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::IBeam => "ibeam",
        }
    }
}

/// Draw metadata of a cursor texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorData {
    /// Drawn width in unscaled pixels; the cursor is drawn square.
    pub draw_width: f32,
    /// Offset from the pointer position to the texture's top-left corner.
    pub offset: Vec2,
}

impl CursorData {
    /// 32 px, tip of the arrow on the pointer.
    pub const DEFAULT: Self = Self {
        draw_width: 32.0,
        offset: Vec2::ZERO,
    };
}

impl Default for CursorData {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Texture plus metadata of the active cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorStyle {
    /// Texture drawn.
    pub texture: TextureHandle,
    /// Size and hotspot.
    pub data: CursorData,
}

impl CursorStyle {
    /// Screen rect of the cursor at `pointer`, scaled by `scale`.
    #[must_use]
    pub fn bounds(&self, pointer: Vec2, scale: f32) -> Rect {
        let side = (self.data.draw_width * scale).max(0.0);
        Rect::from_pos_size(pointer + self.data.offset * scale, Vec2::new(side, side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_hotspot_and_scale() {
        let style = CursorStyle {
            texture: TextureHandle(7),
            data: CursorData {
                draw_width: 40.0,
                offset: Vec2::new(-4.0, -2.0),
            },
        };
        assert_eq!(
            style.bounds(Vec2::new(100.0, 50.0), 2.0),
            Rect::new(92.0, 46.0, 80.0, 80.0)
        );
        assert_eq!(CursorType::IBeam.name(), "ibeam");
        assert_eq!(CursorType::ALL[CursorType::Pointer.index()], CursorType::Pointer);
    }
}
