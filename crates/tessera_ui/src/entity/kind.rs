//! Entity kinds and their per-kind data.
//!
//! Intrinsic size, drawing and input reactions are implemented by the frame
//! passes in `context`, matching on [`EntityKind`].

use super::EntityId;
use crate::assets::TextureHandle;
use crate::overflow::{Overflow, ScrollState};
use crate::style::StyleKey;

/// Height of one [`EntityKind::LineSpace`] unit, in unscaled pixels.
pub const LINE_SPACE_UNIT: f32 = 8.0;

/// Background texture of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelSkin {
    /// No background at all.
    None,
    /// Default frame.
    #[default]
    Default,
    /// Ornamented frame.
    Fancy,
    /// Alternative frame (legacy themes call it "golden").
    Alternative,
    /// Flat frame.
    Simple,
    /// Background used behind lists and text inputs.
    ListBackground,
}

impl PanelSkin {
    /// Skins that carry a texture, in theme order.
    pub const TEXTURED: [Self; 5] = [
        Self::Default,
        Self::Fancy,
        Self::Alternative,
        Self::Simple,
        Self::ListBackground,
    ];

    /// Theme file stem, `None` for the untextured skin.
    #[must_use]
    pub const fn file_stem(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Default => Some("panel_default"),
            Self::Fancy => Some("panel_fancy"),
            Self::Alternative => Some("panel_alternative"),
            Self::Simple => Some("panel_simple"),
            Self::ListBackground => Some("panel_listbackground"),
        }
    }
}

/// Button texture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonSkin {
    /// Default.
    #[default]
    Default,
    /// Alternative.
    Alternative,
    /// Fancy.
    Fancy,
}

impl ButtonSkin {
    /// All skins in theme order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Alternative, Self::Fancy];

    /// Index into the theme's button table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Theme file stem.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Default => "button_default",
            Self::Alternative => "button_alternative",
            Self::Fancy => "button_fancy",
        }
    }
}

/// Slider texture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderSkin {
    /// Default.
    #[default]
    Default,
    /// Fancy.
    Fancy,
}

impl SliderSkin {
    /// All skins in theme order.
    pub const ALL: [Self; 2] = [Self::Default, Self::Fancy];

    /// Index into the theme's slider table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Theme file stem.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Default => "slider_default",
            Self::Fancy => "slider_fancy",
        }
    }
}

/// Container data.
#[derive(Debug, Clone, Default)]
pub struct PanelData {
    /// Background skin.
    pub skin: PanelSkin,
    /// Overflow policy for children.
    pub overflow: Overflow,
    /// Scroll offset when the overflow policy scrolls.
    pub scroll: ScrollState,
}

/// Clickable button.
#[derive(Debug, Clone, Default)]
pub struct ButtonData {
    /// Caption.
    pub text: String,
    /// Skin.
    pub skin: ButtonSkin,
    /// Pressed state of a toggle-mode button.
    pub checked: bool,
    /// Owning tabs container and tab index, for tab buttons.
    pub(crate) tab: Option<(EntityId, usize)>,
}

/// Text shared by paragraphs, headers and labels.
#[derive(Debug, Clone, Default)]
pub struct TextData {
    /// Text; `\n` starts a new line.
    pub text: String,
    /// Wrap to the entity width.
    pub wrap: bool,
}

/// Check box or radio button.
#[derive(Debug, Clone, Default)]
pub struct ToggleData {
    /// Caption.
    pub text: String,
    /// Checked state.
    pub checked: bool,
}

/// Value in an integer range; used by sliders and progress bars.
#[derive(Debug, Clone, Default)]
pub struct RangeData {
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
    /// Current value in `[min, max]`.
    pub value: i32,
    /// Skin (sliders only).
    pub skin: SliderSkin,
    /// Caption drawn over a progress bar.
    pub caption: Option<String>,
}

impl RangeData {
    /// Creates a range starting at its midpoint.
    #[must_use]
    pub fn new(min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: min + (max - min) / 2,
            ..Self::default()
        }
    }

    /// Clamps and stores a value; returns true if it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Position of the value in the range, 0 to 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f32 {
        if self.max == self.min {
            0.0
        } else {
            (self.value - self.min) as f32 / (self.max - self.min) as f32
        }
    }

    /// Sets the value from a 0 to 1 fraction, rounding to the nearest step.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn set_fraction(&mut self, fraction: f32) -> bool {
        let span = (self.max - self.min) as f32;
        self.set_value(self.min + (fraction.clamp(0.0, 1.0) * span).round() as i32)
    }
}

/// Scrollable list of string rows.
#[derive(Debug, Clone, Default)]
pub struct ListData {
    /// Rows.
    pub items: Vec<String>,
    /// Selected row.
    pub selected: Option<usize>,
    /// Pixel scroll of the rows.
    pub scroll: ScrollState,
}

impl ListData {
    /// Creates a list from its rows.
    #[must_use]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Selected row text.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    /// Selects a row by index; out of range clears the selection.
    /// Returns true if the selection changed.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.items.len());
        let changed = index != self.selected;
        self.selected = index;
        changed
    }

    /// Selects the first row with this text.
    pub fn select_value(&mut self, value: &str) -> bool {
        let index = self.items.iter().position(|item| item == value);
        self.select(index)
    }

    /// Appends a row.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Removes a row, keeping the selection on the same item when possible.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Some(self.items.remove(index))
    }
}

/// List that collapses into its selected value.
#[derive(Debug, Clone, Default)]
pub struct DropDownData {
    /// Rows and selection.
    pub list: ListData,
    /// Whether the list is unfolded.
    pub open: bool,
    /// Shown when nothing is selected.
    pub placeholder: String,
}

/// Editable text field.
#[derive(Debug, Clone, Default)]
pub struct TextInputData {
    /// Current value.
    pub value: String,
    /// Shown while the value is empty.
    pub placeholder: String,
    /// Accept newlines.
    pub multiline: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Caret position in characters.
    pub(crate) caret: usize,
}

impl TextInputData {
    /// Caret position in characters.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret.min(self.value.chars().count())
    }

    /// Pulls the caret back inside the value after outside edits of `value`.
    fn clamp_caret(&mut self) {
        self.caret = self.caret();
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value.char_indices().nth(chars).map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts text at the caret, honoring `multiline` and `max_length`.
    /// Returns true if anything was inserted.
    pub fn insert(&mut self, text: &str) -> bool {
        self.clamp_caret();
        let mut changed = false;
        for ch in text.chars() {
            if (ch == '\n' && !self.multiline) || (ch.is_control() && ch != '\n') {
                continue;
            }
            if self.max_length.is_some_and(|max| self.value.chars().count() >= max) {
                break;
            }
            let at = self.byte_index(self.caret);
            self.value.insert(at, ch);
            self.caret += 1;
            changed = true;
        }
        changed
    }

    /// Deletes the character before the caret.
    pub fn backspace(&mut self) -> bool {
        self.clamp_caret();
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        let at = self.byte_index(self.caret);
        self.value.remove(at);
        true
    }

    /// Deletes the character after the caret.
    pub fn delete(&mut self) -> bool {
        self.clamp_caret();
        if self.caret >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.caret);
        self.value.remove(at);
        true
    }

    /// Moves the caret by `delta` characters.
    pub fn move_caret(&mut self, delta: isize) {
        self.clamp_caret();
        let len = self.value.chars().count();
        self.caret = self.caret.saturating_add_signed(delta).min(len);
    }

    /// Moves the caret to the end of the value.
    pub fn caret_to_end(&mut self) {
        self.caret = self.value.chars().count();
    }
}

/// Picture stretched over the entity rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageData {
    /// Texture.
    pub texture: TextureHandle,
}

/// Small square picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconData {
    /// Texture.
    pub texture: TextureHandle,
    /// Draw the theme's icon frame behind it.
    pub background: bool,
}

/// One tab of a [`TabsData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Button caption.
    pub title: String,
    /// Header button.
    pub button: EntityId,
    /// Content panel, visible only while the tab is active.
    pub panel: EntityId,
}

/// Tabbed container: a row of buttons above one visible panel.
#[derive(Debug, Clone)]
pub struct TabsData {
    /// Tabs in creation order.
    pub tabs: Vec<Tab>,
    /// Active tab.
    pub active: Option<usize>,
    /// Background skin.
    pub skin: PanelSkin,
    pub(crate) buttons_panel: EntityId,
    pub(crate) panels_panel: EntityId,
}

impl TabsData {
    /// Active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }
}

/// Closed set of entity types.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Container.
    Panel(PanelData),
    /// Button.
    Button(ButtonData),
    /// Body text.
    Paragraph(TextData),
    /// Title text.
    Header(TextData),
    /// Small caption text.
    Label(TextData),
    /// Check box.
    CheckBox(ToggleData),
    /// Radio button; checking one unchecks its sibling radios.
    RadioButton(ToggleData),
    /// Draggable value in a range.
    Slider(RangeData),
    /// Read-only value in a range.
    ProgressBar(RangeData),
    /// Scrollable list.
    SelectList(ListData),
    /// Collapsible list.
    DropDown(DropDownData),
    /// Editable text.
    TextInput(TextInputData),
    /// Picture.
    Image(ImageData),
    /// Icon.
    Icon(IconData),
    /// Flat rectangle colored by FillColor and OutlineColor.
    ColoredRectangle,
    /// Divider.
    HorizontalLine,
    /// Empty vertical space, in [`LINE_SPACE_UNIT`]s.
    LineSpace(u32),
    /// Tabbed container.
    PanelTabs(TabsData),
}

impl EntityKind {
    /// Default style sheet of the kind.
    #[must_use]
    pub const fn style_key(&self) -> StyleKey {
        match self {
            Self::Panel(_) | Self::PanelTabs(_) => StyleKey::Panel,
            Self::Button(b) if b.tab.is_some() => StyleKey::PanelTabsButton,
            Self::Button(_) => StyleKey::Button,
            Self::Paragraph(_) => StyleKey::Paragraph,
            Self::Header(_) => StyleKey::Header,
            Self::Label(_) => StyleKey::Label,
            Self::CheckBox(_) => StyleKey::CheckBox,
            Self::RadioButton(_) => StyleKey::RadioButton,
            Self::Slider(_) => StyleKey::Slider,
            Self::ProgressBar(_) => StyleKey::ProgressBar,
            Self::SelectList(_) => StyleKey::SelectList,
            Self::DropDown(_) => StyleKey::DropDown,
            Self::TextInput(_) => StyleKey::TextInput,
            Self::Image(_) => StyleKey::Image,
            Self::Icon(_) => StyleKey::Icon,
            Self::ColoredRectangle => StyleKey::ColoredRectangle,
            Self::HorizontalLine => StyleKey::HorizontalLine,
            Self::LineSpace(_) => StyleKey::Entity,
        }
    }

    /// Style sheet of the caption, for kinds that draw one.
    #[must_use]
    pub const fn text_style_key(&self) -> Option<StyleKey> {
        match self {
            Self::Button(b) if b.tab.is_some() => Some(StyleKey::PanelTabsButtonParagraph),
            Self::Button(_) => Some(StyleKey::ButtonParagraph),
            Self::Paragraph(_) | Self::Header(_) | Self::Label(_) => Some(self.style_key()),
            Self::CheckBox(_) => Some(StyleKey::CheckBoxParagraph),
            Self::RadioButton(_) => Some(StyleKey::RadioButtonParagraph),
            Self::SelectList(_) => Some(StyleKey::SelectListParagraph),
            Self::DropDown(_) => Some(StyleKey::DropDownParagraph),
            Self::TextInput(_) => Some(StyleKey::TextInputParagraph),
            Self::ProgressBar(_) => Some(StyleKey::Paragraph),
            _ => None,
        }
    }

    /// Main text of the kind, if it has one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Button(b) => Some(&b.text),
            Self::Paragraph(t) | Self::Header(t) | Self::Label(t) => Some(&t.text),
            Self::CheckBox(t) | Self::RadioButton(t) => Some(&t.text),
            Self::TextInput(t) => Some(&t.value),
            Self::ProgressBar(r) => r.caption.as_deref(),
            _ => None,
        }
    }

    /// Replaces the main text; returns false for kinds without text.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        match self {
            Self::Button(b) => b.text = text,
            Self::Paragraph(t) | Self::Header(t) | Self::Label(t) => t.text = text,
            Self::CheckBox(t) | Self::RadioButton(t) => t.text = text,
            Self::TextInput(t) => {
                t.value = text;
                t.caret_to_end();
            }
            Self::ProgressBar(r) => r.caption = Some(text),
            _ => return false,
        }
        true
    }

    /// Whether children are laid out inside this kind.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Panel(_) | Self::PanelTabs(_))
    }

    /// Overflow policy for children.
    #[must_use]
    pub const fn overflow(&self) -> Overflow {
        match self {
            Self::Panel(p) => p.overflow,
            _ => Overflow::Visible,
        }
    }

    /// Scroll state of kinds that scroll.
    #[must_use]
    pub const fn scroll(&self) -> Option<&ScrollState> {
        match self {
            Self::Panel(p) if p.overflow.scrolls() => Some(&p.scroll),
            Self::SelectList(l) => Some(&l.scroll),
            Self::DropDown(d) if d.open => Some(&d.list.scroll),
            _ => None,
        }
    }

    /// Mutable scroll state of kinds that scroll.
    pub fn scroll_mut(&mut self) -> Option<&mut ScrollState> {
        match self {
            Self::Panel(p) if p.overflow.scrolls() => Some(&mut p.scroll),
            Self::SelectList(l) => Some(&mut l.scroll),
            Self::DropDown(d) if d.open => Some(&mut d.list.scroll),
            _ => None,
        }
    }

    /// Whether the kind takes keyboard focus by default.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        matches!(self, Self::TextInput(_))
    }

    /// Checked state of toggles; `None` for other kinds.
    #[must_use]
    pub const fn checked(&self) -> Option<bool> {
        match self {
            Self::CheckBox(t) | Self::RadioButton(t) => Some(t.checked),
            Self::Button(b) => Some(b.checked),
            _ => None,
        }
    }

    /// Short type name, for debug output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Panel(_) => "Panel",
            Self::Button(_) => "Button",
            Self::Paragraph(_) => "Paragraph",
            Self::Header(_) => "Header",
            Self::Label(_) => "Label",
            Self::CheckBox(_) => "CheckBox",
            Self::RadioButton(_) => "RadioButton",
            Self::Slider(_) => "Slider",
            Self::ProgressBar(_) => "ProgressBar",
            Self::SelectList(_) => "SelectList",
            Self::DropDown(_) => "DropDown",
            Self::TextInput(_) => "TextInput",
            Self::Image(_) => "Image",
            Self::Icon(_) => "Icon",
            Self::ColoredRectangle => "ColoredRectangle",
            Self::HorizontalLine => "HorizontalLine",
            Self::LineSpace(_) => "LineSpace",
            Self::PanelTabs(_) => "PanelTabs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_clamps_and_rounds() {
        let mut r = RangeData::new(0, 10);
        assert_eq!(r.value, 5);
        assert!(r.set_value(42));
        assert_eq!(r.value, 10);
        assert!(r.set_fraction(0.26));
        assert_eq!(r.value, 3);
        assert!((r.fraction() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_list_selection() {
        let mut list = ListData::new(["a", "b", "c"]);
        assert!(list.select(Some(2)));
        assert_eq!(list.selected_value(), Some("c"));
        assert!(!list.select(Some(2)));
        list.remove(0);
        assert_eq!(list.selected, Some(1));
        assert!(list.select(Some(9)));
        assert_eq!(list.selected, None);
        assert!(list.select_value("b"));
        assert_eq!(list.selected, Some(0));
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInputData {
            max_length: Some(5),
            ..TextInputData::default()
        };
        assert!(input.insert("héllo world"));
        assert_eq!(input.value, "héllo");
        input.move_caret(-2);
        assert!(input.backspace());
        assert_eq!(input.value, "hélo");
        assert!(input.delete());
        assert_eq!(input.value, "héo");
        assert!(!input.insert("\n"));
    }

    #[test]
    fn test_caret_survives_outside_edits() {
        let mut input = TextInputData::default();
        assert!(input.insert("abc"));
        input.value.clear();
        assert_eq!(input.caret(), 0);
        assert!(!input.backspace());
        assert!(!input.delete());

        input.value.push_str("xy");
        input.move_caret(-1);
        assert!(input.insert("é"));
        assert_eq!(input.value, "éxy");
    }

    #[test]
    fn test_style_keys() {
        let tab = EntityKind::Button(ButtonData {
            tab: Some((EntityId(1), 0)),
            ..ButtonData::default()
        });
        assert_eq!(tab.style_key(), StyleKey::PanelTabsButton);
        assert_eq!(tab.text_style_key(), Some(StyleKey::PanelTabsButtonParagraph));
        assert_eq!(EntityKind::LineSpace(1).text_style_key(), None);
    }
}
