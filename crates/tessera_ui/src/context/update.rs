//! Update pass: animators, layout, hit testing, interaction state, events
//! and per-kind input behaviour.

use std::iter;

use super::{DragState, UiContext};
use crate::animator::AnimationFrame;
use crate::entity::{Entity, EntityFlags, EntityId, EntityKind, EventKind};
use crate::geometry::{Rect, Vec2};
use crate::input::{InputSnapshot, Key, MouseButton};
use crate::style::{FontStyle, InteractionState};

/// State an entity shows when nothing interacts with it.
fn resting_state(entity: &Entity) -> InteractionState {
    match &entity.kind {
        EntityKind::Button(b) if b.checked && (b.tab.is_some() || entity.flags.has(EntityFlags::TOGGLE_MODE)) => {
            InteractionState::MouseDown
        }
        _ => InteractionState::Default,
    }
}

impl UiContext {
    /// Runs one update: animators, layout, interaction and events.
    ///
    /// Listeners run at the end of the pass, followed by the commands they
    /// deferred.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) {
        self.pointer = input.pointer;
        self.run_animators(dt);
        self.layout_pass();

        let target = self.hit_test(input.pointer);
        let states_before = self.placed_states();
        let clicked = self.update_target(input, target);
        self.update_drag(input);
        self.update_focus(input, target);
        self.update_wheel(input, target);
        if let Some(id) = clicked {
            self.click_behaviour(id, input.pointer);
        }
        self.held_behaviour(input);
        self.text_input_behaviour(input);
        // state-dependent padding and spacing must be placed with this frame's states
        if self.placed_states() != states_before {
            self.layout_dirty = true;
        }
        if self.layout_dirty {
            self.layout_pass();
        }
        self.update_tooltip(input, target);

        self.dispatch_pending();
        self.apply_deferred();
        tracing::trace!(?target, focused = ?self.focused, "update pass");
    }

    fn run_animators(&mut self, dt: f32) {
        let ids: Vec<EntityId> = self.tree.iter_dfs().collect();
        for id in ids {
            let Some(entity) = self.tree.get_mut(id) else {
                continue;
            };
            entity.presentation.reset();
            if entity.animators.is_empty() {
                continue;
            }
            let mut frame = AnimationFrame {
                presentation: &mut entity.presentation,
                rect: entity.rect,
                text: entity.kind.text(),
            };
            for animator in entity.animators.iter_mut().filter(|a| a.enabled()) {
                animator.update(&mut frame, dt);
            }
        }
    }

    /// Topmost entity under `point`: last in draw order, not click-through,
    /// inside every clipping ancestor.
    pub(crate) fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        self.hit_list
            .iter()
            .rev()
            .find(|h| !h.click_through && h.rect.contains(point) && h.clip.map_or(true, |c| c.contains(point)))
            .map(|h| h.id)
    }

    /// Interaction state of every placed entity, in hit-list order.
    fn placed_states(&self) -> Vec<InteractionState> {
        self.hit_list
            .iter()
            .map(|h| self.tree.get(h.id).map_or(InteractionState::Default, |e| e.state))
            .collect()
    }

    fn is_interactive(&self, id: EntityId) -> bool {
        self.tree.get(id).is_some_and(|e| !e.inert)
    }

    fn set_state(&mut self, id: EntityId, state: InteractionState) {
        if let Some(entity) = self.tree.get_mut(id) {
            if entity.state != InteractionState::MouseDown {
                entity.state = state;
            }
        }
    }

    /// Updates interaction states and raises pointer events. Returns the
    /// entity clicked this frame.
    fn update_target(&mut self, input: &InputSnapshot, target: Option<EntityId>) -> Option<EntityId> {
        for hit in &self.hit_list {
            if let Some(entity) = self.tree.get_mut(hit.id) {
                entity.state = resting_state(entity);
            }
        }

        if self.target != target {
            if let Some(old) = self.target.filter(|id| self.is_interactive(*id)) {
                self.emit(old, EventKind::MouseLeave);
            }
            if let Some(new) = target.filter(|id| self.is_interactive(*id)) {
                self.emit(new, EventKind::MouseEnter);
            }
            self.target = target;
        }

        let left_released = input.released(MouseButton::Left);
        let mut clicked = None;
        if let Some(id) = target.filter(|id| self.is_interactive(*id)) {
            if input.pressed(MouseButton::Left) {
                self.pressed = Some(id);
                self.press_origin = input.pointer;
                self.emit(id, EventKind::MouseDown);
                self.arm_drag(id, input.pointer);
            }

            let held = input.held(MouseButton::Left) && self.pressed == Some(id);
            if held {
                self.set_state(id, InteractionState::MouseDown);
                self.emit(id, EventKind::WhileMouseDown);
            } else {
                self.set_state(id, InteractionState::MouseHover);
                self.emit(id, EventKind::WhileMouseHover);
            }

            if left_released && self.pressed == Some(id) {
                self.emit(id, EventKind::MouseReleased);
                self.emit(id, EventKind::Click);
                clicked = Some(id);
            }
            if input.released(MouseButton::Right) {
                self.emit(id, EventKind::RightClick);
            }
        }

        if left_released {
            self.pressed = None;
        }
        clicked
    }

    /// Arms a drag on the nearest draggable entity at or above `id`.
    fn arm_drag(&mut self, id: EntityId, pointer: Vec2) {
        let owns_pointer = self
            .tree
            .get(id)
            .is_some_and(|e| matches!(e.kind, EntityKind::Slider(_) | EntityKind::TextInput(_)));
        if owns_pointer {
            self.drag = None;
            return;
        }
        let tree = &self.tree;
        self.drag = iter::once(id)
            .chain(tree.ancestors(id))
            .find(|a| tree.get(*a).is_some_and(|e| e.is_draggable() && !e.inert))
            .map(|entity| DragState {
                entity,
                start: pointer,
                active: false,
            });
    }

    fn update_drag(&mut self, input: &InputSnapshot) {
        let Some(mut drag) = self.drag else {
            return;
        };
        if !input.held(MouseButton::Left) {
            if drag.active {
                tracing::debug!(entity = %drag.entity, "drag stopped");
                self.emit(drag.entity, EventKind::StopDrag);
            }
            self.drag = None;
            return;
        }

        let delta = if drag.active {
            input.pointer_delta()
        } else {
            let moved = input.pointer - drag.start;
            if moved.length() <= self.config.drag_threshold {
                return;
            }
            drag.active = true;
            tracing::debug!(entity = %drag.entity, "drag started");
            self.emit(drag.entity, EventKind::StartDrag);
            moved
        };

        let scale = self.scale;
        if let Some(entity) = self.tree.get_mut(drag.entity) {
            entity.drag_offset += delta * (1.0 / scale);
        }
        self.emit(drag.entity, EventKind::WhileDragging);
        self.drag = Some(drag);
        self.layout_dirty = true;
    }

    fn update_focus(&mut self, input: &InputSnapshot, target: Option<EntityId>) {
        if !input.released(MouseButton::Left) {
            return;
        }
        let next = target.filter(|id| self.tree.get(*id).is_some_and(|e| !e.inert && e.is_focusable()));
        if next == self.focused {
            return;
        }
        tracing::debug!(from = ?self.focused, to = ?next, "focus changed");
        if let Some(old) = self.focused {
            self.emit(old, EventKind::FocusChange);
        }
        if let Some(new) = next {
            self.emit(new, EventKind::FocusChange);
        }
        self.focused = next;
    }

    fn update_wheel(&mut self, input: &InputSnapshot, target: Option<EntityId>) {
        if input.scroll_delta == Vec2::ZERO {
            return;
        }
        let Some(target) = target else {
            return;
        };

        let step = self.config.scroll_step * self.scale;
        let delta = -input.scroll_delta * step;
        let chain: Vec<EntityId> = iter::once(target).chain(self.tree.ancestors(target)).collect();
        for id in chain {
            let Some(entity) = self.tree.get_mut(id).filter(|e| !e.inert) else {
                continue;
            };
            if let Some(scroll) = entity.kind.scroll_mut().filter(|s| s.is_scrollable()) {
                scroll.scroll_by(delta);
                self.layout_dirty = true;
                break;
            }
        }

        if self.is_interactive(target) {
            self.emit(target, EventKind::MouseWheelScroll);
        }
    }

    /// Kind reaction to a completed click.
    fn click_behaviour(&mut self, id: EntityId, pointer: Vec2) {
        let geometry = self.tree.get(id).and_then(|e| self.list_geometry(e));
        let header_height = self.dropdown_header_height();
        let Some(entity) = self.tree.get_mut(id) else {
            return;
        };

        let mut changed = false;
        let mut radio_group = None;
        let mut tab = None;
        let visual = entity.visual;
        let toggle_mode = entity.flags.has(EntityFlags::TOGGLE_MODE);

        match &mut entity.kind {
            EntityKind::CheckBox(toggle) => {
                toggle.checked = !toggle.checked;
                changed = true;
            }
            EntityKind::RadioButton(toggle) => {
                if !toggle.checked {
                    toggle.checked = true;
                    changed = true;
                    radio_group = Some(entity.parent);
                }
            }
            EntityKind::Button(button) => {
                if let Some(owner) = button.tab {
                    tab = Some(owner);
                } else if toggle_mode {
                    button.checked = !button.checked;
                    changed = true;
                }
            }
            EntityKind::SelectList(list) => {
                let row = geometry.and_then(|g| g.row_at(pointer, list.scroll.offset().y));
                if let Some(row) = row.filter(|r| *r < list.items.len()) {
                    changed = list.select(Some(row));
                }
            }
            EntityKind::DropDown(dropdown) => {
                if dropdown.open {
                    let header = Rect::new(visual.x, visual.y, visual.width, header_height);
                    let row = geometry
                        .and_then(|g| g.row_at(pointer, dropdown.list.scroll.offset().y))
                        .filter(|r| *r < dropdown.list.items.len());
                    if let Some(row) = row {
                        changed = dropdown.list.select(Some(row));
                        dropdown.open = false;
                    } else if header.contains(pointer) {
                        dropdown.open = false;
                    }
                } else {
                    dropdown.open = true;
                }
                self.layout_dirty = true;
            }
            _ => {}
        }

        if changed {
            self.emit(id, EventKind::ValueChange);
            self.layout_dirty = true;
        }
        if let Some(parent) = radio_group {
            self.uncheck_sibling_radios(id, parent);
        }
        if let Some((tabs, index)) = tab {
            match self.select_tab(tabs, index) {
                Ok(true) => self.emit(tabs, EventKind::ValueChange),
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "tab button lost its container"),
            }
        }
    }

    fn uncheck_sibling_radios(&mut self, id: EntityId, parent: Option<EntityId>) {
        let siblings = match parent {
            Some(parent) => self.tree.children(parent).to_vec(),
            None => self.tree.roots().to_vec(),
        };
        let mut unchecked = Vec::new();
        for sibling in siblings.into_iter().filter(|s| *s != id) {
            if let Some(EntityKind::RadioButton(toggle)) = self.tree.get_mut(sibling).map(|e| &mut e.kind) {
                if toggle.checked {
                    toggle.checked = false;
                    unchecked.push(sibling);
                }
            }
        }
        for sibling in unchecked {
            self.emit(sibling, EventKind::ValueChange);
        }
    }

    /// Continuous reaction while the left button stays down on the pressed entity.
    fn held_behaviour(&mut self, input: &InputSnapshot) {
        let Some(id) = self.pressed else {
            return;
        };
        if !input.held(MouseButton::Left) {
            return;
        }
        let bar = self.scrollbar_width();
        let origin = self.press_origin;
        let Some(entity) = self.tree.get_mut(id).filter(|e| !e.inert) else {
            return;
        };
        let visual = entity.visual;

        let changed = match &mut entity.kind {
            EntityKind::Slider(range) => {
                let mark = visual.height;
                let track = (visual.width - mark).max(1.0);
                range.set_fraction((input.pointer.x - visual.x - mark * 0.5) / track)
            }
            EntityKind::Panel(panel) if panel.overflow.scrolls() => {
                let track = Rect::new(visual.right() - bar, visual.y, bar, visual.height);
                if track.contains(origin) && panel.scroll.is_scrollable() {
                    let thumb = panel.scroll.thumb_rect(track);
                    let travel = (track.height - thumb.height).max(1.0);
                    panel
                        .scroll
                        .set_fraction((input.pointer.y - track.y - thumb.height * 0.5) / travel);
                    self.layout_dirty = true;
                }
                false
            }
            _ => false,
        };

        if changed {
            self.emit(id, EventKind::ValueChange);
        }
    }

    fn text_input_behaviour(&mut self, input: &InputSnapshot) {
        let Some(id) = self.focused else {
            return;
        };
        let Some(entity) = self.tree.get_mut(id).filter(|e| !e.inert) else {
            return;
        };
        let EntityKind::TextInput(field) = &mut entity.kind else {
            return;
        };

        let mut changed = field.insert(&input.text_input);
        for key in input.keys_pressed() {
            match key {
                Key::Backspace => changed |= field.backspace(),
                Key::Delete => changed |= field.delete(),
                Key::Enter if field.multiline => changed |= field.insert("\n"),
                Key::Left => field.move_caret(-1),
                Key::Right => field.move_caret(1),
                Key::Home => field.move_caret(isize::MIN),
                Key::End => field.caret_to_end(),
                _ => {}
            }
        }

        if changed {
            self.emit(id, EventKind::ValueChange);
            self.layout_dirty = true;
        }
    }

    fn update_tooltip(&mut self, input: &InputSnapshot, target: Option<EntityId>) {
        let text = target
            .filter(|_| self.config.show_tooltips && self.dragging().is_none())
            .and_then(|id| self.tree.get(id))
            .and_then(|e| e.tooltip.clone());
        match text {
            Some(text) => self.tooltips.show(&text, input.pointer, self.theme.font(FontStyle::Regular)),
            None => self.tooltips.hide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::animator::FadeOutAnimator;
    use crate::animator::Easing;
    use crate::config::UiConfig;
    use crate::entity::PanelSkin;
    use crate::layout::{Anchor, Size};
    use crate::animator::Animator;
    use crate::overflow::Overflow;
    use crate::render::CommandList;
    use crate::style::{PropertyId, StyleValue};

    fn ui() -> UiContext {
        let config = UiConfig {
            screen_width: 800.0,
            screen_height: 600.0,
            ..UiConfig::default()
        };
        UiContext::with_builtin_theme(config).unwrap()
    }

    /// Hover, press, release at `pos`.
    fn click(ui: &mut UiContext, input: &mut InputSnapshot, pos: Vec2) {
        input.begin_frame();
        input.set_pointer(pos);
        ui.update(input, 0.016);
        input.begin_frame();
        input.press(MouseButton::Left);
        ui.update(input, 0.016);
        input.begin_frame();
        input.release(MouseButton::Left);
        ui.update(input, 0.016);
    }

    fn record(ui: &mut UiContext, kinds: &[EventKind]) -> Rc<RefCell<Vec<(EntityId, EventKind)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for &kind in kinds {
            let log = Rc::clone(&log);
            ui.on(kind, move |ctx| log.borrow_mut().push((ctx.entity(), ctx.kind())));
        }
        log
    }

    #[test]
    fn test_click_sequence() {
        let mut ui = ui();
        let button = ui.add_entity(Entity::button("ok").with_size(Size::pixels(200.0, 50.0)));
        let log = record(
            &mut ui,
            &[EventKind::MouseEnter, EventKind::MouseDown, EventKind::MouseReleased, EventKind::Click],
        );
        let mut input = InputSnapshot::new();
        click(&mut ui, &mut input, Vec2::new(10.0, 10.0));

        let kinds: Vec<EventKind> = log.borrow().iter().map(|(_, k)| *k).collect();
        assert_eq!(
            kinds,
            [EventKind::MouseEnter, EventKind::MouseDown, EventKind::MouseReleased, EventKind::Click]
        );
        assert_eq!(ui.target(), Some(button));
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::MouseHover);
    }

    #[test]
    fn test_later_sibling_wins_hit_test() {
        let mut ui = ui();
        let _below = ui.add_entity(Entity::panel((200.0, 200.0), PanelSkin::Default, Anchor::TopLeft));
        let above = ui.add_entity(Entity::panel((100.0, 100.0), PanelSkin::Default, Anchor::TopLeft));
        ui.update(&InputSnapshot::new(), 0.0);
        assert_eq!(ui.hit_test(Vec2::new(50.0, 50.0)), Some(above));
    }

    #[test]
    fn test_disabled_blocks_without_events() {
        let mut ui = ui();
        let button = ui.add_entity(Entity::button("off").with_size(Size::pixels(200.0, 50.0)));
        ui.entity_mut(button).unwrap().set_enabled(false);
        let log = record(&mut ui, &[EventKind::MouseEnter, EventKind::Click]);
        let mut input = InputSnapshot::new();
        click(&mut ui, &mut input, Vec2::new(10.0, 10.0));

        assert_eq!(ui.target(), Some(button));
        assert!(log.borrow().is_empty());
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::Default);
    }

    #[test]
    fn test_checkbox_and_radio_groups() {
        let mut ui = ui();
        let panel = ui.add_entity(Entity::panel(Size::FILL, PanelSkin::None, Anchor::TopLeft).with_padding(Vec2::ZERO));
        let check = ui.add_child(panel, Entity::checkbox("check", false)).unwrap();
        let r1 = ui.add_child(panel, Entity::radio("one", true)).unwrap();
        let r2 = ui.add_child(panel, Entity::radio("two", false)).unwrap();
        let mut input = InputSnapshot::new();
        ui.update(&input, 0.0);

        let at = |ui: &UiContext, id| ui.entity(id).unwrap().rect().center();
        let p = at(&ui, check);
        click(&mut ui, &mut input, p);
        assert_eq!(ui.entity(check).unwrap().kind.checked(), Some(true));

        let p = at(&ui, r2);
        click(&mut ui, &mut input, p);
        assert_eq!(ui.entity(r2).unwrap().kind.checked(), Some(true));
        assert_eq!(ui.entity(r1).unwrap().kind.checked(), Some(false));
    }

    #[test]
    fn test_toggle_button_shows_pressed() {
        let mut ui = ui();
        let button = ui.add_entity(Entity::button("toggle").with_size(Size::pixels(200.0, 50.0)).toggle_mode(true));
        let mut input = InputSnapshot::new();
        click(&mut ui, &mut input, Vec2::new(10.0, 10.0));
        input.begin_frame();
        input.set_pointer(Vec2::new(700.0, 500.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::MouseDown);
    }

    #[test]
    fn test_drag_threshold_and_release() {
        let mut ui = ui();
        let panel = ui.add_entity(
            Entity::panel((100.0, 100.0), PanelSkin::Default, Anchor::TopLeft).draggable(true),
        );
        let log = record(&mut ui, &[EventKind::StartDrag, EventKind::StopDrag]);
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(50.0, 50.0));
        ui.update(&input, 0.0);
        input.begin_frame();
        input.press(MouseButton::Left);
        ui.update(&input, 0.0);

        input.begin_frame();
        input.set_pointer(Vec2::new(51.0, 50.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.dragging(), None);

        input.begin_frame();
        input.set_pointer(Vec2::new(70.0, 60.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.dragging(), Some(panel));
        assert_eq!(ui.entity(panel).unwrap().drag_offset(), Vec2::new(20.0, 10.0));

        input.begin_frame();
        input.release(MouseButton::Left);
        ui.update(&input, 0.0);
        assert_eq!(ui.dragging(), None);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(ui.entity(panel).unwrap().rect().position(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_focus_and_typing() {
        let mut ui = ui();
        let field = ui.add_entity(Entity::text_input(false, "name"));
        let mut input = InputSnapshot::new();
        ui.update(&input, 0.0);
        let p = ui.entity(field).unwrap().rect().center();
        click(&mut ui, &mut input, p);
        assert_eq!(ui.focused(), Some(field));

        input.begin_frame();
        input.text("abc\n");
        input.key_down(Key::Backspace);
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(field).unwrap().kind.text(), Some("ab"));

        click(&mut ui, &mut input, Vec2::new(790.0, 590.0));
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_wheel_scrolls_nearest_panel() {
        let mut ui = ui();
        let panel = ui.add_entity(
            Entity::panel((300.0, 200.0), PanelSkin::Default, Anchor::TopLeft)
                .with_overflow(Overflow::VerticalScroll),
        );
        for _ in 0..20 {
            ui.add_child(panel, Entity::paragraph("row")).unwrap();
        }
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(100.0, 100.0));
        ui.update(&input, 0.0);

        input.begin_frame();
        input.scroll(Vec2::new(0.0, -1.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(panel).unwrap().kind.scroll().unwrap().offset().y, 40.0);
    }

    #[test]
    fn test_select_list_row_click() {
        let mut ui = ui();
        let list = ui.add_entity(Entity::select_list(["a", "b", "c"]));
        let mut input = InputSnapshot::new();
        ui.update(&input, 0.0);
        let rect = ui.entity(list).unwrap().rect();
        // padding 22, rows of 16 + 8
        click(&mut ui, &mut input, Vec2::new(rect.x + 40.0, rect.y + 22.0 + 24.0 + 4.0));
        match &ui.entity(list).unwrap().kind {
            EntityKind::SelectList(l) => assert_eq!(l.selected_value(), Some("b")),
            other => panic!("unexpected kind {}", other.name()),
        }
    }

    #[test]
    fn test_slider_follows_pointer() {
        let mut ui = ui();
        let slider = ui.add_entity(Entity::slider(0, 10).with_size(Size::pixels(330.0, 30.0)));
        let mut input = InputSnapshot::new();
        click(&mut ui, &mut input, Vec2::new(315.0, 15.0));
        match &ui.entity(slider).unwrap().kind {
            EntityKind::Slider(r) => assert_eq!(r.value, 10),
            other => panic!("unexpected kind {}", other.name()),
        }
    }

    #[test]
    fn test_tooltip_same_frame() {
        let mut ui = ui();
        ui.add_entity(Entity::button("?").with_size(Size::pixels(100.0, 50.0)).with_tooltip("help"));
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(10.0, 10.0));
        ui.update(&input, 0.0);
        assert!(ui.tooltips().is_active());
    }

    #[test]
    fn test_animators_reset_presentation_each_frame() {
        let mut ui = ui();
        let id = ui.add_entity(Entity::paragraph("bye"));
        let handle = ui
            .attach_animator(id, Box::new(FadeOutAnimator::new(1.0, Easing::Linear)))
            .unwrap();
        ui.update(&InputSnapshot::new(), 0.5);
        assert!(ui.entity(id).unwrap().presentation().opacity < 1.0);

        ui.animator_mut(handle).unwrap().set_enabled(false);
        ui.update(&InputSnapshot::new(), 0.5);
        assert_eq!(ui.entity(id).unwrap().presentation().opacity, 1.0);
    }

    /// Writes a fixed opacity every frame.
    struct HoldOpacity {
        opacity: f32,
        enabled: bool,
    }

    impl HoldOpacity {
        fn boxed(opacity: f32) -> Box<dyn Animator> {
            Box::new(Self { opacity, enabled: true })
        }
    }

    impl Animator for HoldOpacity {
        fn update(&mut self, frame: &mut AnimationFrame<'_>, _dt: f32) {
            frame.presentation.opacity = self.opacity;
        }

        fn reset(&mut self) {}

        fn enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    #[test]
    fn test_last_animator_writing_a_field_wins() {
        let mut ui = ui();
        let id = ui.add_entity(Entity::paragraph("both"));
        ui.attach_animator(id, HoldOpacity::boxed(0.25)).unwrap();
        let second = ui.attach_animator(id, HoldOpacity::boxed(0.75)).unwrap();
        ui.update(&InputSnapshot::new(), 0.1);
        assert_eq!(ui.entity(id).unwrap().presentation().opacity, 0.75);

        ui.animator_mut(second).unwrap().set_enabled(false);
        ui.update(&InputSnapshot::new(), 0.1);
        assert_eq!(ui.entity(id).unwrap().presentation().opacity, 0.25);
    }

    #[test]
    fn test_locked_entity_stays_default_without_events() {
        let mut ui = ui();
        let button = ui.add_entity(Entity::button("locked").with_size(Size::pixels(200.0, 50.0)));
        ui.entity_mut(button).unwrap().set_locked(true);
        let log = record(
            &mut ui,
            &[EventKind::MouseEnter, EventKind::MouseDown, EventKind::WhileMouseHover, EventKind::Click],
        );
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(10.0, 10.0));
        ui.update(&input, 0.016);
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::Default);

        input.begin_frame();
        input.press(MouseButton::Left);
        ui.update(&input, 0.016);
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::Default);

        input.begin_frame();
        input.release(MouseButton::Left);
        ui.update(&input, 0.016);
        assert_eq!(ui.target(), Some(button));
        assert_eq!(ui.entity(button).unwrap().state(), InteractionState::Default);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_hover_padding_applies_in_same_frame() {
        let mut ui = ui();
        let panel = ui.add_entity(
            Entity::panel((400.0, 400.0), PanelSkin::None, Anchor::TopLeft).with_state_style(
                InteractionState::MouseHover,
                PropertyId::Padding,
                StyleValue::Vector(Vec2::ZERO),
            ),
        );
        let child = ui
            .add_child(panel, Entity::panel((50.0, 50.0), PanelSkin::None, Anchor::TopLeft))
            .unwrap();
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(700.0, 500.0));
        ui.update(&input, 0.0);
        let resting = ui.entity(child).unwrap().rect();
        assert!(resting.x > 0.0 && resting.y > 0.0);

        input.begin_frame();
        input.set_pointer(Vec2::new(300.0, 300.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(panel).unwrap().state(), InteractionState::MouseHover);
        assert_eq!(ui.entity(child).unwrap().rect().position(), Vec2::ZERO);

        ui.draw(&mut CommandList::new());
        assert_eq!(ui.entity(child).unwrap().rect().position(), Vec2::ZERO);
    }

    #[test]
    fn test_backspace_after_value_cleared_externally() {
        let mut ui = ui();
        let field = ui.add_entity(Entity::text_input(false, "name"));
        let mut input = InputSnapshot::new();
        ui.update(&input, 0.0);
        let p = ui.entity(field).unwrap().rect().center();
        click(&mut ui, &mut input, p);

        input.begin_frame();
        input.text("abc");
        ui.update(&input, 0.0);
        match &mut ui.entity_mut(field).unwrap().kind {
            EntityKind::TextInput(f) => f.value.clear(),
            other => panic!("unexpected kind {}", other.name()),
        }

        input.begin_frame();
        input.key_down(Key::Backspace);
        ui.update(&input, 0.0);
        input.begin_frame();
        input.text("z");
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(field).unwrap().kind.text(), Some("z"));
    }
}
