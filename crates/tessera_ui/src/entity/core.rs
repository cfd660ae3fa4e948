//! The base entity record shared by every kind.

use std::fmt;

use super::events::EventHooks;
use super::kind::{
    ButtonData, ButtonSkin, DropDownData, EntityKind, IconData, ImageData, ListData, PanelData, PanelSkin,
    RangeData, TextData, TextInputData, ToggleData,
};
use crate::animator::{Animator, Presentation};
use crate::assets::TextureHandle;
use crate::geometry::{Rect, Vec2};
use crate::layout::{Anchor, Length, Size};
use crate::overflow::Overflow;
use crate::style::{Color, InteractionState, PropertyId, StyleSheet, StyleValue};

/// Unique identifier for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Creates a new entity ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityFlags(u32);

impl EntityFlags {
    /// Entity is laid out, drawn and hit-tested.
    pub const VISIBLE: u32 = 1 << 0;
    /// Entity reacts to input.
    pub const ENABLED: u32 = 1 << 1;
    /// Entity blocks input without reacting or changing appearance.
    pub const LOCKED: u32 = 1 << 2;
    /// Entity can be dragged.
    pub const DRAGGABLE: u32 = 1 << 3;
    /// Button stays pressed after a click until clicked again.
    pub const TOGGLE_MODE: u32 = 1 << 4;
    /// Pointer passes through to entities below.
    pub const CLICK_THROUGH: u32 = 1 << 5;
    /// Entity takes focus when clicked.
    pub const FOCUSABLE: u32 = 1 << 6;
    /// Dragging is clamped into the parent's content rect.
    pub const LIMIT_DRAG: u32 = 1 << 7;

    /// Default flags for a new entity.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED | Self::LIMIT_DRAG);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A node of the UI tree.
///
/// Declarative fields (`anchor`, `size`, `offset`, `flags`, `style`, `kind`)
/// are public; computed state (rect, interaction state, presentation) is
/// written by the frame passes and read through accessors.
pub struct Entity {
    /// Type and per-type data.
    pub kind: EntityKind,
    /// Attachment point inside the parent.
    pub anchor: Anchor,
    /// Declared size.
    pub size: Size,
    /// Offset from the anchor point, unscaled.
    pub offset: Vec2,
    /// Behaviour flags.
    pub flags: EntityFlags,
    /// Free-form name used by [`crate::UiContext::find`].
    pub identifier: String,
    /// Tooltip shown while hovered.
    pub tooltip: Option<String>,
    /// Per-instance style overrides.
    pub style: StyleSheet,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) state: InteractionState,
    pub(crate) animators: Vec<Box<dyn Animator>>,
    pub(crate) presentation: Presentation,
    pub(crate) drag_offset: Vec2,
    pub(crate) rect: Rect,
    pub(crate) content_rect: Rect,
    pub(crate) visual: Rect,
    pub(crate) disabled: bool,
    pub(crate) inert: bool,
    pub(crate) hooks: EventHooks,
}

impl Entity {
    /// Creates an entity of any kind with default placement.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            anchor: Anchor::Auto,
            size: Size::INTRINSIC,
            offset: Vec2::ZERO,
            flags: EntityFlags::DEFAULT,
            identifier: String::new(),
            tooltip: None,
            style: StyleSheet::new(),
            parent: None,
            children: Vec::new(),
            state: InteractionState::Default,
            animators: Vec::new(),
            presentation: Presentation::IDENTITY,
            drag_offset: Vec2::ZERO,
            rect: Rect::ZERO,
            content_rect: Rect::ZERO,
            visual: Rect::ZERO,
            disabled: false,
            inert: false,
            hooks: EventHooks::new(),
        }
    }

    /// Panel with a skin and an explicit size.
    #[must_use]
    pub fn panel(size: impl Into<Size>, skin: PanelSkin, anchor: Anchor) -> Self {
        Self::new(EntityKind::Panel(PanelData {
            skin,
            ..PanelData::default()
        }))
        .with_size(size)
        .with_anchor(anchor)
    }

    /// Button.
    #[must_use]
    pub fn button(text: impl Into<String>) -> Self {
        Self::new(EntityKind::Button(ButtonData {
            text: text.into(),
            ..ButtonData::default()
        }))
    }

    /// Wrapped body text.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(EntityKind::Paragraph(TextData {
            text: text.into(),
            wrap: true,
        }))
    }

    /// Title text.
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        Self::new(EntityKind::Header(TextData {
            text: text.into(),
            wrap: true,
        }))
    }

    /// Caption text.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(EntityKind::Label(TextData {
            text: text.into(),
            wrap: true,
        }))
    }

    /// Check box.
    #[must_use]
    pub fn checkbox(text: impl Into<String>, checked: bool) -> Self {
        Self::new(EntityKind::CheckBox(ToggleData {
            text: text.into(),
            checked,
        }))
    }

    /// Radio button.
    #[must_use]
    pub fn radio(text: impl Into<String>, checked: bool) -> Self {
        Self::new(EntityKind::RadioButton(ToggleData {
            text: text.into(),
            checked,
        }))
    }

    /// Slider over `[min, max]`.
    #[must_use]
    pub fn slider(min: i32, max: i32) -> Self {
        Self::new(EntityKind::Slider(RangeData::new(min, max)))
    }

    /// Progress bar over `[min, max]`.
    #[must_use]
    pub fn progress_bar(min: i32, max: i32) -> Self {
        Self::new(EntityKind::ProgressBar(RangeData::new(min, max)))
    }

    /// Scrollable list.
    #[must_use]
    pub fn select_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EntityKind::SelectList(ListData::new(items)))
    }

    /// Collapsible list.
    #[must_use]
    pub fn dropdown<I, S>(items: I, placeholder: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EntityKind::DropDown(DropDownData {
            list: ListData::new(items),
            open: false,
            placeholder: placeholder.into(),
        }))
    }

    /// Text input.
    #[must_use]
    pub fn text_input(multiline: bool, placeholder: impl Into<String>) -> Self {
        Self::new(EntityKind::TextInput(TextInputData {
            multiline,
            placeholder: placeholder.into(),
            ..TextInputData::default()
        }))
        .focusable(true)
    }

    /// Image stretched over its rect.
    #[must_use]
    pub fn image(texture: TextureHandle, size: impl Into<Size>) -> Self {
        Self::new(EntityKind::Image(ImageData { texture })).with_size(size)
    }

    /// Icon.
    #[must_use]
    pub fn icon(texture: TextureHandle, background: bool) -> Self {
        Self::new(EntityKind::Icon(IconData { texture, background }))
    }

    /// Flat rectangle.
    #[must_use]
    pub fn colored_rectangle(fill: Color, outline: Color, outline_width: i32) -> Self {
        Self::new(EntityKind::ColoredRectangle)
            .with_style(PropertyId::FillColor, StyleValue::Color(fill))
            .with_style(PropertyId::OutlineColor, StyleValue::Color(outline))
            .with_style(PropertyId::OutlineWidth, StyleValue::Int(outline_width))
    }

    /// Divider line.
    #[must_use]
    pub fn horizontal_line() -> Self {
        Self::new(EntityKind::HorizontalLine)
    }

    /// Vertical gap of `lines` units.
    #[must_use]
    pub fn line_space(lines: u32) -> Self {
        let mut entity = Self::new(EntityKind::LineSpace(lines));
        entity.flags.set(EntityFlags::CLICK_THROUGH);
        entity
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the declared size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    /// Sets the offset.
    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<Vec2>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Sets the tooltip text.
    #[must_use]
    pub fn with_tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Overrides a style property for the Default state.
    #[must_use]
    pub fn with_style(self, prop: PropertyId, value: StyleValue) -> Self {
        self.with_state_style(InteractionState::Default, prop, value)
    }

    /// Overrides a style property for one state.
    #[must_use]
    pub fn with_state_style(mut self, state: InteractionState, prop: PropertyId, value: StyleValue) -> Self {
        self.style.set(state, prop, value);
        self
    }

    /// Sets the padding override.
    #[must_use]
    pub fn with_padding(self, padding: impl Into<Vec2>) -> Self {
        self.with_style(PropertyId::Padding, StyleValue::Vector(padding.into()))
    }

    /// Sets the panel overflow policy. No effect on other kinds.
    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        if let EntityKind::Panel(panel) = &mut self.kind {
            panel.overflow = overflow;
        }
        self
    }

    /// Makes the entity draggable.
    #[must_use]
    pub fn draggable(mut self, on: bool) -> Self {
        self.flags.assign(EntityFlags::DRAGGABLE, on);
        self
    }

    /// Puts a button in toggle mode.
    #[must_use]
    pub fn toggle_mode(mut self, on: bool) -> Self {
        self.flags.assign(EntityFlags::TOGGLE_MODE, on);
        self
    }

    /// Makes the entity take focus when clicked.
    #[must_use]
    pub fn focusable(mut self, on: bool) -> Self {
        self.flags.assign(EntityFlags::FOCUSABLE, on);
        self
    }

    /// Sets the button skin. No effect on other kinds.
    #[must_use]
    pub fn with_button_skin(mut self, skin: ButtonSkin) -> Self {
        if let EntityKind::Button(button) = &mut self.kind {
            button.skin = skin;
        }
        self
    }

    /// Visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.has(EntityFlags::VISIBLE)
    }

    /// Shows or hides the entity.
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.assign(EntityFlags::VISIBLE, visible);
    }

    /// Whether the entity itself is enabled (ancestors not considered).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.flags.has(EntityFlags::ENABLED)
    }

    /// Enables or disables the entity and, in effect, its subtree.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.assign(EntityFlags::ENABLED, enabled);
    }

    /// Whether the entity is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.flags.has(EntityFlags::LOCKED)
    }

    /// Locks or unlocks the entity.
    pub fn set_locked(&mut self, locked: bool) {
        self.flags.assign(EntityFlags::LOCKED, locked);
    }

    /// Whether the entity can be dragged.
    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.flags.has(EntityFlags::DRAGGABLE)
    }

    /// Clamps dragging into the parent (on by default).
    pub fn set_limit_drag_to_parent(&mut self, on: bool) {
        self.flags.assign(EntityFlags::LIMIT_DRAG, on);
    }

    /// Lets the pointer pass through.
    pub fn set_click_through(&mut self, on: bool) {
        self.flags.assign(EntityFlags::CLICK_THROUGH, on);
    }

    /// Whether the entity takes focus when clicked.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        self.flags.has(EntityFlags::FOCUSABLE) || self.kind.is_focusable()
    }

    /// Sets a style override for one state.
    pub fn set_style(&mut self, state: InteractionState, prop: PropertyId, value: StyleValue) {
        self.style.set(state, prop, value);
    }

    /// Sets the padding override.
    pub fn set_padding(&mut self, padding: Vec2) {
        self.style.set(InteractionState::Default, PropertyId::Padding, StyleValue::Vector(padding));
    }

    /// Replaces the declared height, keeping the width.
    pub fn set_height(&mut self, height: Length) {
        self.size.height = height;
    }

    /// Parent, if attached below another entity.
    #[must_use]
    pub const fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in order.
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Interaction state computed by the last update.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    /// Destination rect from the last layout, in screen pixels.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Rect available to children (after padding and scroll bar).
    #[must_use]
    pub const fn content_rect(&self) -> Rect {
        self.content_rect
    }

    /// Animator output for the current frame.
    #[must_use]
    pub const fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Accumulated drag, in unscaled pixels.
    #[must_use]
    pub const fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    /// Number of attached animators.
    #[must_use]
    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    /// Rect drawn and hit-tested this frame: layout rect plus the presentation
    /// of the entity and its ancestors.
    #[must_use]
    pub const fn visual_rect(&self) -> Rect {
        self.visual
    }

    /// Whether the entity or an ancestor was disabled at the last layout.
    #[must_use]
    pub const fn is_effectively_disabled(&self) -> bool {
        self.disabled
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("kind", &self.kind.name())
            .field("identifier", &self.identifier)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("rect", &self.rect)
            .field("state", &self.state)
            .field("flags", &self.flags)
            .field("animators", &self.animators.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let entity = Entity::paragraph("hi");
        assert!(entity.is_visible());
        assert!(entity.is_enabled());
        assert!(!entity.is_locked());
        assert!(entity.flags.has(EntityFlags::LIMIT_DRAG));
        assert_eq!(entity.anchor, Anchor::Auto);
    }

    #[test]
    fn test_builders() {
        let panel = Entity::panel((450.0, -1.0), PanelSkin::Default, Anchor::Center)
            .with_overflow(Overflow::VerticalScroll)
            .draggable(true)
            .with_identifier("main");
        assert_eq!(panel.size.width, Length::Pixels(450.0));
        assert_eq!(panel.size.height, Length::Intrinsic);
        assert!(panel.is_draggable());
        assert_eq!(panel.kind.overflow(), Overflow::VerticalScroll);
        assert_eq!(panel.identifier, "main");

        let input = Entity::text_input(false, "name");
        assert!(input.is_focusable());
        assert!(!Entity::button("ok").is_focusable());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(EntityId::new(7).to_string(), "#7");
    }
}
