//! Style property identifiers and tagged values.

use serde::{Deserialize, Serialize};

use super::Color;
use crate::geometry::Vec2;

/// Font families every theme provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontStyle {
    /// Regular weight.
    #[default]
    Regular,
    /// Bold weight.
    Bold,
    /// Italic.
    Italic,
}

impl FontStyle {
    /// Every font style, in index order.
    pub const ALL: [Self; 3] = [Self::Regular, Self::Bold, Self::Italic];

    /// Stable integer encoding used inside style sheets.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes the integer stored in a style sheet; unknown values map to Regular.
    #[must_use]
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Bold,
            2 => Self::Italic,
            _ => Self::Regular,
        }
    }

    /// Name used in theme file paths.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
        }
    }
}

/// A tagged style value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    /// RGBA color.
    Color(Color),
    /// Scalar (scale factors).
    Scalar(f32),
    /// 2D vector (padding, spacing, sizes).
    Vector(Vec2),
    /// Boolean switch.
    Bool(bool),
    /// Integer or enum discriminant.
    Int(i32),
}

impl StyleValue {
    /// Returns the color, if this is a color value.
    #[must_use]
    pub const fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the scalar, if this is a scalar value.
    #[must_use]
    pub const fn as_scalar(self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the vector, if this is a vector value.
    #[must_use]
    pub const fn as_vector(self) -> Option<Vec2> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    #[must_use]
    pub const fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(i),
            _ => None,
        }
    }
}

/// Every property a style sheet can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// Main fill / text color.
    FillColor,
    /// Outline color.
    OutlineColor,
    /// Outline width in pixels.
    OutlineWidth,
    /// Force text to center alignment.
    ForceAlignCenter,
    /// Font style (integer encoded [`FontStyle`]).
    FontStyle,
    /// Highlight behind the selected row of lists.
    SelectedHighlightColor,
    /// Drop shadow color.
    ShadowColor,
    /// Drop shadow offset.
    ShadowOffset,
    /// Drop shadow scale.
    ShadowScale,
    /// Text / content scale.
    Scale,
    /// Inner padding, removed from the children's available space.
    Padding,
    /// Spacing before the entity in auto-flow.
    SpaceBefore,
    /// Spacing after the entity in auto-flow.
    SpaceAfter,
    /// Size used when an axis is declared intrinsic.
    DefaultSize,
}

/// Number of property slots in a style sheet.
pub const PROPERTY_COUNT: usize = 14;

impl PropertyId {
    /// All properties in slot order.
    pub const ALL: [Self; PROPERTY_COUNT] = [
        Self::FillColor,
        Self::OutlineColor,
        Self::OutlineWidth,
        Self::ForceAlignCenter,
        Self::FontStyle,
        Self::SelectedHighlightColor,
        Self::ShadowColor,
        Self::ShadowOffset,
        Self::ShadowScale,
        Self::Scale,
        Self::Padding,
        Self::SpaceBefore,
        Self::SpaceAfter,
        Self::DefaultSize,
    ];

    /// Slot index inside a style sheet row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Property name as written in theme documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FillColor => "FillColor",
            Self::OutlineColor => "OutlineColor",
            Self::OutlineWidth => "OutlineWidth",
            Self::ForceAlignCenter => "ForceAlignCenter",
            Self::FontStyle => "FontStyle",
            Self::SelectedHighlightColor => "SelectedHighlightColor",
            Self::ShadowColor => "ShadowColor",
            Self::ShadowOffset => "ShadowOffset",
            Self::ShadowScale => "ShadowScale",
            Self::Scale => "Scale",
            Self::Padding => "Padding",
            Self::SpaceBefore => "SpaceBefore",
            Self::SpaceAfter => "SpaceAfter",
            Self::DefaultSize => "DefaultSize",
        }
    }

    /// Looks a property up by its document name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Whether changing this property can move or resize entities.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        matches!(
            self,
            Self::Padding
                | Self::SpaceBefore
                | Self::SpaceAfter
                | Self::DefaultSize
                | Self::ShadowOffset
                | Self::Scale
                | Self::FontStyle
        )
    }

    /// Value used when neither the instance nor the type default sets the property.
    #[must_use]
    pub const fn fallback(self) -> StyleValue {
        match self {
            Self::FillColor => StyleValue::Color(Color::WHITE),
            Self::OutlineColor => StyleValue::Color(Color::BLACK),
            Self::OutlineWidth => StyleValue::Int(0),
            Self::ForceAlignCenter => StyleValue::Bool(false),
            Self::FontStyle => StyleValue::Int(0),
            Self::SelectedHighlightColor => StyleValue::Color(Color::rgba(0.0, 0.0, 0.5, 0.5)),
            Self::ShadowColor => StyleValue::Color(Color::TRANSPARENT),
            Self::ShadowOffset | Self::Padding | Self::SpaceBefore | Self::SpaceAfter | Self::DefaultSize => {
                StyleValue::Vector(Vec2::ZERO)
            }
            Self::ShadowScale | Self::Scale => StyleValue::Scalar(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_slots_are_dense() {
        for (i, prop) in PropertyId::ALL.iter().enumerate() {
            assert_eq!(prop.index(), i);
            assert_eq!(PropertyId::from_name(prop.name()), Some(*prop));
        }
    }

    #[test]
    fn test_fallback_types() {
        assert!(PropertyId::FillColor.fallback().as_color().is_some());
        assert!(PropertyId::Padding.fallback().as_vector().is_some());
        assert_eq!(PropertyId::Scale.fallback().as_scalar(), Some(1.0));
        assert_eq!(FontStyle::from_index(1), FontStyle::Bold);
    }
}
