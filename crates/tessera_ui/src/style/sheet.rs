//! Per-state style sheets and the fallback chain used to resolve them.
//!
//! Lookup order for a property at state `S`:
//!
//! ```text
//! instance[S] -> instance[Default] -> type_default[S] -> type_default[Default] -> fallback
//! ```

use super::property::{FontStyle, PropertyId, StyleValue, PROPERTY_COUNT};
use super::Color;
use crate::geometry::Vec2;

/// Interaction state of an entity, driven by hit testing during update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// Not under the pointer.
    #[default]
    Default,
    /// Under the pointer.
    MouseHover,
    /// Pressed.
    MouseDown,
}

impl InteractionState {
    /// All states in sheet order.
    pub const ALL: [Self; 3] = [Self::Default, Self::MouseHover, Self::MouseDown];

    /// Row index in a style sheet.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suffix used by theme documents (`Button-MouseHover`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::MouseHover => "MouseHover",
            Self::MouseDown => "MouseDown",
        }
    }
}

const STATE_COUNT: usize = 3;

/// Sparse property bag, one row per interaction state.
///
/// `None` marks an unset slot; it is never confused with a zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    slots: [[Option<StyleValue>; PROPERTY_COUNT]; STATE_COUNT],
}

impl StyleSheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value set for exactly this state, without fallback.
    #[must_use]
    pub fn get(&self, state: InteractionState, prop: PropertyId) -> Option<StyleValue> {
        self.slots[state.index()][prop.index()]
    }

    /// Sets a value for one state.
    pub fn set(&mut self, state: InteractionState, prop: PropertyId, value: StyleValue) {
        self.slots[state.index()][prop.index()] = Some(value);
    }

    /// Builder form of [`StyleSheet::set`].
    #[must_use]
    pub fn with(mut self, state: InteractionState, prop: PropertyId, value: StyleValue) -> Self {
        self.set(state, prop, value);
        self
    }

    /// Unsets a value for one state.
    pub fn unset(&mut self, state: InteractionState, prop: PropertyId) {
        self.slots[state.index()][prop.index()] = None;
    }

    /// Unsets everything.
    pub fn clear(&mut self) {
        self.slots = [[None; PROPERTY_COUNT]; STATE_COUNT];
    }

    /// Returns true when no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().flatten().all(Option::is_none)
    }

    /// State value, falling back to this sheet's Default row.
    #[must_use]
    pub fn lookup(&self, state: InteractionState, prop: PropertyId) -> Option<StyleValue> {
        self.get(state, prop)
            .or_else(|| self.get(InteractionState::Default, prop))
    }
}

/// Names of the process-wide default sheets, one per entity type or sub-part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StyleKey {
    Entity,
    Paragraph,
    Header,
    Label,
    Button,
    ButtonParagraph,
    CheckBox,
    CheckBoxParagraph,
    RadioButton,
    RadioButtonParagraph,
    ColoredRectangle,
    DropDown,
    DropDownParagraph,
    DropDownSelectedPanel,
    DropDownSelectedParagraph,
    HorizontalLine,
    Icon,
    Image,
    Panel,
    ProgressBar,
    ProgressBarFill,
    SelectList,
    SelectListParagraph,
    Slider,
    TextInput,
    TextInputParagraph,
    TextInputPlaceholder,
    VerticalScrollbar,
    PanelTabsButton,
    PanelTabsButtonParagraph,
}

const KEY_COUNT: usize = 30;

impl StyleKey {
    /// Every key, in index order.
    pub const ALL: [Self; KEY_COUNT] = [
        Self::Entity,
        Self::Paragraph,
        Self::Header,
        Self::Label,
        Self::Button,
        Self::ButtonParagraph,
        Self::CheckBox,
        Self::CheckBoxParagraph,
        Self::RadioButton,
        Self::RadioButtonParagraph,
        Self::ColoredRectangle,
        Self::DropDown,
        Self::DropDownParagraph,
        Self::DropDownSelectedPanel,
        Self::DropDownSelectedParagraph,
        Self::HorizontalLine,
        Self::Icon,
        Self::Image,
        Self::Panel,
        Self::ProgressBar,
        Self::ProgressBarFill,
        Self::SelectList,
        Self::SelectListParagraph,
        Self::Slider,
        Self::TextInput,
        Self::TextInputParagraph,
        Self::TextInputPlaceholder,
        Self::VerticalScrollbar,
        Self::PanelTabsButton,
        Self::PanelTabsButtonParagraph,
    ];

    /// Index into [`StyleDefaults`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// File stem used by theme documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entity => "Entity",
            Self::Paragraph => "Paragraph",
            Self::Header => "Header",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::ButtonParagraph => "ButtonParagraph",
            Self::CheckBox => "CheckBox",
            Self::CheckBoxParagraph => "CheckBoxParagraph",
            Self::RadioButton => "RadioButton",
            Self::RadioButtonParagraph => "RadioButtonParagraph",
            Self::ColoredRectangle => "ColoredRectangle",
            Self::DropDown => "DropDown",
            Self::DropDownParagraph => "DropDownParagraph",
            Self::DropDownSelectedPanel => "DropDownSelectedPanel",
            Self::DropDownSelectedParagraph => "DropDownSelectedParagraph",
            Self::HorizontalLine => "HorizontalLine",
            Self::Icon => "Icon",
            Self::Image => "Image",
            Self::Panel => "Panel",
            Self::ProgressBar => "ProgressBar",
            Self::ProgressBarFill => "ProgressBarFill",
            Self::SelectList => "SelectList",
            Self::SelectListParagraph => "SelectListParagraph",
            Self::Slider => "Slider",
            Self::TextInput => "TextInput",
            Self::TextInputParagraph => "TextInputParagraph",
            Self::TextInputPlaceholder => "TextInputPlaceholder",
            Self::VerticalScrollbar => "VerticalScrollbar",
            Self::PanelTabsButton => "PanelTabsButton",
            Self::PanelTabsButtonParagraph => "PanelTabsButtonParagraph",
        }
    }
}

/// One default sheet per [`StyleKey`], shared by every instance of that type.
#[derive(Debug, Clone)]
pub struct StyleDefaults {
    sheets: Vec<StyleSheet>,
}

impl StyleDefaults {
    /// Creates a registry of empty sheets.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sheets: vec![StyleSheet::new(); KEY_COUNT],
        }
    }

    /// Default sheet for a key.
    #[must_use]
    pub fn sheet(&self, key: StyleKey) -> &StyleSheet {
        &self.sheets[key.index()]
    }

    /// Mutable default sheet for a key.
    pub fn sheet_mut(&mut self, key: StyleKey) -> &mut StyleSheet {
        &mut self.sheets[key.index()]
    }

    /// Replaces the default sheet for a key.
    pub fn set_sheet(&mut self, key: StyleKey, sheet: StyleSheet) {
        self.sheets[key.index()] = sheet;
    }

    /// The built-in theme, used when no theme directory is supplied.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        use InteractionState::{Default as D, MouseDown as Down, MouseHover as Hover};
        use PropertyId as P;
        use StyleValue::{Bool, Color as C, Int, Scalar, Vector};

        let text = Color::rgb(0.92, 0.92, 0.92);
        let muted = Color::rgb(0.55, 0.55, 0.55);
        let accent = Color::rgb(1.0, 0.85, 0.35);
        let v = |x, y| Vector(Vec2::new(x, y));

        let mut d = Self::empty();
        let paragraph = StyleSheet::new()
            .with(D, P::FillColor, C(text))
            .with(D, P::OutlineColor, C(Color::BLACK))
            .with(D, P::OutlineWidth, Int(2))
            .with(D, P::Scale, Scalar(1.0));

        d.set_sheet(StyleKey::Entity, StyleSheet::new().with(D, P::FillColor, C(Color::WHITE)));
        d.set_sheet(StyleKey::Paragraph, paragraph.clone());
        d.set_sheet(
            StyleKey::Header,
            paragraph
                .clone()
                .with(D, P::FillColor, C(accent))
                .with(D, P::Scale, Scalar(1.2))
                .with(D, P::FontStyle, Int(FontStyle::Bold.index() as i32))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::Label,
            paragraph.clone().with(D, P::Scale, Scalar(0.8)).with(D, P::FillColor, C(muted)),
        );
        d.set_sheet(
            StyleKey::Panel,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::Padding, v(30.0, 30.0))
                .with(D, P::ShadowColor, C(Color::rgba(0.0, 0.0, 0.0, 0.25)))
                .with(D, P::ShadowOffset, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::Button,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(Hover, P::FillColor, C(Color::rgb(0.85, 0.85, 1.0)))
                .with(Down, P::FillColor, C(Color::rgb(0.7, 0.7, 0.85)))
                .with(D, P::DefaultSize, v(0.0, 73.0))
                .with(D, P::Padding, v(30.0, 0.0))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::ButtonParagraph,
            paragraph
                .clone()
                .with(D, P::ForceAlignCenter, Bool(true))
                .with(Hover, P::FillColor, C(accent)),
        );
        for (key, para) in [
            (StyleKey::CheckBox, StyleKey::CheckBoxParagraph),
            (StyleKey::RadioButton, StyleKey::RadioButtonParagraph),
        ] {
            d.set_sheet(
                key,
                StyleSheet::new()
                    .with(D, P::FillColor, C(Color::WHITE))
                    .with(D, P::DefaultSize, v(0.0, 40.0))
                    .with(D, P::SpaceAfter, v(0.0, 8.0)),
            );
            d.set_sheet(para, paragraph.clone().with(Hover, P::FillColor, C(accent)));
        }
        d.set_sheet(
            StyleKey::ColoredRectangle,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::OutlineColor, C(Color::BLACK))
                .with(D, P::OutlineWidth, Int(2))
                .with(D, P::DefaultSize, v(0.0, 100.0)),
        );
        let list = StyleSheet::new()
            .with(D, P::FillColor, C(Color::WHITE))
            .with(D, P::Padding, v(30.0, 22.0))
            .with(D, P::SelectedHighlightColor, C(Color::rgba(0.0, 0.0, 0.5, 0.5)))
            .with(D, P::DefaultSize, v(0.0, 220.0))
            .with(D, P::SpaceAfter, v(0.0, 8.0));
        d.set_sheet(StyleKey::SelectList, list.clone());
        d.set_sheet(StyleKey::DropDown, list);
        d.set_sheet(StyleKey::SelectListParagraph, paragraph.clone().with(Hover, P::FillColor, C(accent)));
        d.set_sheet(StyleKey::DropDownParagraph, paragraph.clone().with(Hover, P::FillColor, C(accent)));
        d.set_sheet(
            StyleKey::DropDownSelectedPanel,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::Padding, v(30.0, 10.0))
                .with(D, P::DefaultSize, v(0.0, 67.0)),
        );
        d.set_sheet(StyleKey::DropDownSelectedParagraph, paragraph.clone());
        d.set_sheet(
            StyleKey::HorizontalLine,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::DefaultSize, v(0.0, 8.0))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::Icon,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(Hover, P::Scale, Scalar(1.1))
                .with(D, P::DefaultSize, v(50.0, 50.0))
                .with(D, P::SpaceAfter, v(4.0, 4.0)),
        );
        d.set_sheet(
            StyleKey::Image,
            StyleSheet::new().with(D, P::FillColor, C(Color::WHITE)).with(D, P::DefaultSize, v(0.0, 100.0)),
        );
        d.set_sheet(
            StyleKey::Slider,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::DefaultSize, v(0.0, 30.0))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::ProgressBar,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::DefaultSize, v(0.0, 52.0))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(
            StyleKey::ProgressBarFill,
            StyleSheet::new().with(D, P::FillColor, C(Color::rgb(0.2, 0.8, 0.3))),
        );
        d.set_sheet(
            StyleKey::TextInput,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::Padding, v(30.0, 22.0))
                .with(D, P::DefaultSize, v(0.0, 65.0))
                .with(D, P::SpaceAfter, v(0.0, 8.0)),
        );
        d.set_sheet(StyleKey::TextInputParagraph, paragraph.clone());
        d.set_sheet(StyleKey::TextInputPlaceholder, paragraph.clone().with(D, P::FillColor, C(muted)));
        d.set_sheet(
            StyleKey::VerticalScrollbar,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::WHITE))
                .with(D, P::DefaultSize, v(20.0, 0.0)),
        );
        d.set_sheet(
            StyleKey::PanelTabsButton,
            StyleSheet::new()
                .with(D, P::FillColor, C(Color::rgb(0.8, 0.8, 0.8)))
                .with(Hover, P::FillColor, C(Color::WHITE))
                .with(Down, P::FillColor, C(Color::WHITE))
                .with(D, P::DefaultSize, v(0.0, 65.0)),
        );
        d.set_sheet(StyleKey::PanelTabsButtonParagraph, paragraph.with(D, P::ForceAlignCenter, Bool(true)));
        d
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves properties for one entity at one state through the full chain.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    instance: Option<&'a StyleSheet>,
    defaults: &'a StyleSheet,
    state: InteractionState,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over an optional instance sheet and a type default sheet.
    #[must_use]
    pub const fn new(
        instance: Option<&'a StyleSheet>,
        defaults: &'a StyleSheet,
        state: InteractionState,
    ) -> Self {
        Self {
            instance,
            defaults,
            state,
        }
    }

    /// State the resolver reads for.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    /// Resolves a property; never fails thanks to the hard-coded fallback.
    #[must_use]
    pub fn get(&self, prop: PropertyId) -> StyleValue {
        self.instance
            .and_then(|sheet| sheet.lookup(self.state, prop))
            .or_else(|| self.defaults.lookup(self.state, prop))
            .unwrap_or_else(|| prop.fallback())
    }

    /// Resolves a color property.
    #[must_use]
    pub fn color(&self, prop: PropertyId) -> Color {
        self.get(prop)
            .as_color()
            .or_else(|| prop.fallback().as_color())
            .unwrap_or(Color::WHITE)
    }

    /// Resolves a scalar property.
    #[must_use]
    pub fn scalar(&self, prop: PropertyId) -> f32 {
        self.get(prop)
            .as_scalar()
            .or_else(|| prop.fallback().as_scalar())
            .unwrap_or(1.0)
    }

    /// Resolves a vector property.
    #[must_use]
    pub fn vector(&self, prop: PropertyId) -> Vec2 {
        self.get(prop)
            .as_vector()
            .or_else(|| prop.fallback().as_vector())
            .unwrap_or(Vec2::ZERO)
    }

    /// Resolves a boolean property.
    #[must_use]
    pub fn boolean(&self, prop: PropertyId) -> bool {
        self.get(prop).as_bool().unwrap_or(false)
    }

    /// Resolves an integer property.
    #[must_use]
    pub fn int(&self, prop: PropertyId) -> i32 {
        self.get(prop).as_int().unwrap_or(0)
    }

    /// Resolves the font style.
    #[must_use]
    pub fn font_style(&self) -> FontStyle {
        FontStyle::from_index(self.int(PropertyId::FontStyle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_layer_chain() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let green = Color::rgb(0.0, 1.0, 0.0);

        let defaults = StyleSheet::new()
            .with(InteractionState::Default, PropertyId::FillColor, StyleValue::Color(green))
            .with(InteractionState::MouseDown, PropertyId::FillColor, StyleValue::Color(blue));
        let mut instance = StyleSheet::new();

        // type-default[Default]
        let r = Resolver::new(Some(&instance), &defaults, InteractionState::MouseHover);
        assert_eq!(r.color(PropertyId::FillColor), green);

        // type-default[S]
        let r = Resolver::new(Some(&instance), &defaults, InteractionState::MouseDown);
        assert_eq!(r.color(PropertyId::FillColor), blue);

        // instance[Default] beats type-default[S]
        instance.set(InteractionState::Default, PropertyId::FillColor, StyleValue::Color(red));
        let r = Resolver::new(Some(&instance), &defaults, InteractionState::MouseDown);
        assert_eq!(r.color(PropertyId::FillColor), red);

        // hard-coded fallback
        assert_eq!(r.vector(PropertyId::Padding), Vec2::ZERO);
    }

    #[test]
    fn test_unset_distinct_from_zero() {
        let mut sheet = StyleSheet::new();
        assert!(sheet.is_empty());
        sheet.set(InteractionState::Default, PropertyId::Padding, StyleValue::Vector(Vec2::ZERO));
        assert!(!sheet.is_empty());
        assert_eq!(
            sheet.get(InteractionState::Default, PropertyId::Padding),
            Some(StyleValue::Vector(Vec2::ZERO))
        );
        sheet.unset(InteractionState::Default, PropertyId::Padding);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_builtin_covers_every_key() {
        let defaults = StyleDefaults::builtin();
        for key in StyleKey::ALL {
            assert_eq!(StyleKey::ALL[key.index()], key);
        }
        let button = defaults.sheet(StyleKey::Button);
        let r = Resolver::new(None, button, InteractionState::Default);
        assert_eq!(r.vector(PropertyId::DefaultSize), Vec2::new(0.0, 73.0));
    }
}
