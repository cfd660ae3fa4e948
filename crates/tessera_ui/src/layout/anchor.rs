//! Declarative placement: anchors and per-axis lengths.

/// Attachment point of an entity relative to its parent's content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    CenterLeft,
    /// Center.
    Center,
    /// Middle of the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
    /// Starts a new auto-flow row, left aligned.
    #[default]
    Auto,
    /// Starts a new auto-flow row, horizontally centered.
    AutoCenter,
    /// Continues the current row, wrapping when the entity does not fit.
    AutoInline,
    /// Continues the current row even past the content width.
    AutoInlineNoBreak,
}

impl Anchor {
    /// Returns true for the auto-flow variants, which consume the parent's cursor.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(
            self,
            Self::Auto | Self::AutoCenter | Self::AutoInline | Self::AutoInlineNoBreak
        )
    }

    /// Returns true when the vertical position does not depend on the parent height.
    #[must_use]
    pub const fn is_top_aligned(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight) || self.is_auto()
    }
}

/// Declared length on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Fill the remaining parent space.
    Fill,
    /// Fixed pixels, multiplied by the global scale.
    Pixels(f32),
    /// Fraction of the parent's content size, never scaled.
    Fraction(f32),
    /// Entity-type specific size (text height, default size, fit children).
    #[default]
    Intrinsic,
}

impl Length {
    /// Decodes the float convention: `0` fills, `(0, 1)` is a fraction,
    /// `>= 1` is pixels and any negative value asks for the intrinsic size.
    #[must_use]
    pub fn from_legacy(value: f32) -> Self {
        if value == 0.0 {
            Self::Fill
        } else if value > 0.0 && value < 1.0 {
            Self::Fraction(value)
        } else if value >= 1.0 {
            Self::Pixels(value)
        } else {
            Self::Intrinsic
        }
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::from_legacy(value)
    }
}

/// Declared two-axis size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: Length,
    /// Height.
    pub height: Length,
}

impl Size {
    /// Intrinsic on both axes.
    pub const INTRINSIC: Self = Self::new(Length::Intrinsic, Length::Intrinsic);

    /// Fill on both axes.
    pub const FILL: Self = Self::new(Length::Fill, Length::Fill);

    /// Creates a size from two lengths.
    #[must_use]
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    /// Fixed pixel size.
    #[must_use]
    pub const fn pixels(width: f32, height: f32) -> Self {
        Self::new(Length::Pixels(width), Length::Pixels(height))
    }
}

impl From<(f32, f32)> for Size {
    fn from((w, h): (f32, f32)) -> Self {
        Self::new(w.into(), h.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_decoding() {
        assert_eq!(Length::from(0.0), Length::Fill);
        assert_eq!(Length::from(0.5), Length::Fraction(0.5));
        assert_eq!(Length::from(1.0), Length::Pixels(1.0));
        assert_eq!(Length::from(450.0), Length::Pixels(450.0));
        assert_eq!(Length::from(-1.0), Length::Intrinsic);
    }

    #[test]
    fn test_size_from_tuple() {
        let size = Size::from((450.0, -1.0));
        assert_eq!(size.width, Length::Pixels(450.0));
        assert_eq!(size.height, Length::Intrinsic);
    }
}
