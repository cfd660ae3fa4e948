//! The UI root.
//!
//! [`UiContext`] owns the entity tree, the theme, configuration and all
//! per-frame interaction state. A frame is `update(input, dt)` followed by
//! `draw(renderer)`:
//!
//! ```text
//! update: animators -> layout -> hit test -> states/events -> kind behaviour
//!         -> (layout if states changed) -> tooltip -> dispatch -> deferred commands
//! draw:   (layout if dirty) -> entities in DFS order -> debug -> tooltip
//!         -> present root target -> AfterDraw -> deferred commands
//! ```

mod draw;
mod layout;
mod tabs;
mod update;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::animator::{Animator, AnimatorHandle};
use crate::assets::{BuiltinAssets, TextureHandle, Theme};
use crate::config::{UiConfig, MAX_SCALE, MIN_SCALE};
use crate::cursor::{CursorData, CursorStyle, CursorType};
use crate::entity::{Deferred, Entity, EntityId, EntityTree, EventContext, EventHooks, EventKind};
use crate::error::{UiError, UiResult};
use crate::geometry::{Rect, Transform2D, Vec2};
use crate::style::{PropertyId, Resolver, StyleDefaults, StyleValue};
use crate::tooltip::TooltipManager;

/// One hit-testable rect, recorded by the layout pass in draw order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HitEntry {
    pub(crate) id: EntityId,
    pub(crate) rect: Rect,
    pub(crate) clip: Option<Rect>,
    pub(crate) click_through: bool,
}

/// Drag in progress or armed by a press.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub(crate) entity: EntityId,
    pub(crate) start: Vec2,
    pub(crate) active: bool,
}

/// Root object of the toolkit.
pub struct UiContext {
    tree: EntityTree,
    theme: Theme,
    config: UiConfig,
    scale: f32,
    screen: Vec2,
    render_target_transform: Option<Transform2D>,
    debug_draw: bool,
    cursor: CursorStyle,
    pointer: Vec2,
    target: Option<EntityId>,
    focused: Option<EntityId>,
    pressed: Option<EntityId>,
    press_origin: Vec2,
    drag: Option<DragState>,
    tooltips: TooltipManager,
    global_hooks: EventHooks,
    pending: Vec<(EntityId, EventKind)>,
    deferred: Vec<Deferred>,
    hit_list: Vec<HitEntry>,
    /// Intrinsic panel heights of the current layout pass, by entity and width bits.
    measure_cache: RefCell<HashMap<(EntityId, u32), f32>>,
    layout_dirty: bool,
}

impl UiContext {
    /// Creates a context over a loaded theme.
    #[must_use]
    pub fn new(config: UiConfig, theme: Theme) -> Self {
        let screen = config.screen_size();
        let cursor = theme.cursor(CursorType::Default);
        Self {
            tree: EntityTree::new(),
            theme,
            scale: config.global_scale.clamp(MIN_SCALE, MAX_SCALE),
            screen,
            render_target_transform: None,
            debug_draw: config.debug_draw,
            cursor,
            pointer: Vec2::ZERO,
            config,
            target: None,
            focused: None,
            pressed: None,
            press_origin: Vec2::ZERO,
            drag: None,
            tooltips: TooltipManager::new(screen),
            global_hooks: EventHooks::new(),
            pending: Vec::new(),
            deferred: Vec::new(),
            hit_list: Vec::new(),
            measure_cache: RefCell::new(HashMap::new()),
            layout_dirty: true,
        }
    }

    /// Creates a context with the in-memory built-in theme.
    ///
    /// # Errors
    ///
    /// Propagates theme loading errors.
    pub fn with_builtin_theme(config: UiConfig) -> UiResult<Self> {
        let theme = Theme::load(&mut BuiltinAssets::new())?;
        Ok(Self::new(config, theme))
    }

    /// Loaded theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Default style sheets.
    #[must_use]
    pub const fn style_defaults(&self) -> &StyleDefaults {
        &self.theme.styles
    }

    /// Mutable default style sheets. Marks layout dirty.
    pub fn style_defaults_mut(&mut self) -> &mut StyleDefaults {
        self.layout_dirty = true;
        &mut self.theme.styles
    }

    /// Startup configuration.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Entity tree, read-only.
    #[must_use]
    pub const fn tree(&self) -> &EntityTree {
        &self.tree
    }

    // tree operations

    /// Adds an entity as a new root.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.tree.insert(entity);
        // fresh ids are never attached, so attaching as a root cannot fail
        if let Err(e) = self.tree.attach(None, id) {
            tracing::warn!(error = %e, "root attach failed");
        }
        self.layout_dirty = true;
        id
    }

    /// Adds an entity under `parent`.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` when the parent does not exist; nothing is inserted.
    pub fn add_child(&mut self, parent: EntityId, entity: Entity) -> UiResult<EntityId> {
        if !self.tree.contains(parent) {
            return Err(UiError::EntityNotFound(parent));
        }
        let id = self.tree.insert(entity);
        self.tree.attach(Some(parent), id)?;
        self.layout_dirty = true;
        Ok(id)
    }

    /// Stores an entity without attaching it.
    pub fn insert_detached(&mut self, entity: Entity) -> EntityId {
        self.tree.insert(entity)
    }

    /// Attaches a detached entity.
    ///
    /// # Errors
    ///
    /// See [`EntityTree::attach`].
    pub fn attach(&mut self, parent: Option<EntityId>, child: EntityId) -> UiResult<()> {
        self.tree.attach(parent, child)?;
        self.layout_dirty = true;
        Ok(())
    }

    /// Detaches an entity; it stays alive but is no longer updated or drawn.
    ///
    /// # Errors
    ///
    /// See [`EntityTree::detach`].
    pub fn detach(&mut self, id: EntityId) -> UiResult<()> {
        self.tree.detach(id)?;
        self.forget_unreachable();
        self.layout_dirty = true;
        Ok(())
    }

    /// Removes an entity and its subtree, returning the entity.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids.
    pub fn remove_entity(&mut self, id: EntityId) -> UiResult<Entity> {
        let entity = self.tree.remove(id)?;
        self.forget_unreachable();
        self.layout_dirty = true;
        Ok(entity)
    }

    /// Drops interaction state that points at entities no longer reachable.
    fn forget_unreachable(&mut self) {
        let tree = &self.tree;
        let live = |id: &EntityId| tree.is_reachable(*id);
        self.target = self.target.filter(live);
        self.pressed = self.pressed.filter(live);
        self.drag = self.drag.filter(|d| live(&d.entity));
        if let Some(focused) = self.focused {
            if !live(&focused) {
                tracing::debug!(entity = %focused, "focus cleared by detach");
                self.focused = None;
            }
        }
        self.hit_list.retain(|h| live(&h.id));
    }

    // entity access

    /// Looks an entity up.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.tree.get(id)
    }

    /// Mutable access to an entity. Marks layout dirty.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.layout_dirty = true;
        self.tree.get_mut(id)
    }

    /// First reachable entity with this identifier.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<EntityId> {
        self.tree.find(identifier)
    }

    // events

    /// Registers a global listener, run after entity listeners.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&mut EventContext<'_>) + 'static) {
        self.global_hooks.add(kind, Box::new(handler));
    }

    /// Registers a listener on one entity.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids.
    pub fn on_entity(
        &mut self,
        id: EntityId,
        kind: EventKind,
        handler: impl FnMut(&mut EventContext<'_>) + 'static,
    ) -> UiResult<()> {
        let entity = self.tree.get_mut(id).ok_or(UiError::EntityNotFound(id))?;
        entity.hooks.add(kind, Box::new(handler));
        Ok(())
    }

    /// Queues a command to run at the end of the current pass.
    pub fn defer(&mut self, command: impl FnOnce(&mut Self) + 'static) {
        self.deferred.push(Box::new(command));
    }

    pub(crate) fn emit(&mut self, id: EntityId, kind: EventKind) {
        self.pending.push((id, kind));
    }

    /// Runs every queued event through entity hooks, then global hooks.
    pub(crate) fn dispatch_pending(&mut self) {
        let events = std::mem::take(&mut self.pending);
        for (id, kind) in events {
            if let Some(entity) = self.tree.get_mut(id) {
                let mut handlers = entity.hooks.take(kind);
                if !handlers.is_empty() {
                    let mut ctx = EventContext::new(id, kind, &self.tree, &mut self.deferred);
                    for handler in &mut handlers {
                        handler(&mut ctx);
                    }
                }
                if let Some(entity) = self.tree.get_mut(id) {
                    entity.hooks.restore(kind, handlers);
                }
            }

            let mut handlers = self.global_hooks.take(kind);
            if !handlers.is_empty() {
                let mut ctx = EventContext::new(id, kind, &self.tree, &mut self.deferred);
                for handler in &mut handlers {
                    handler(&mut ctx);
                }
            }
            self.global_hooks.restore(kind, handlers);
        }
    }

    /// Applies deferred commands, including any queued by the commands themselves.
    pub(crate) fn apply_deferred(&mut self) {
        loop {
            let commands = std::mem::take(&mut self.deferred);
            if commands.is_empty() {
                break;
            }
            for command in commands {
                command(self);
            }
            // commands may queue events through the public API
            self.dispatch_pending();
        }
    }

    // animators

    /// Attaches an animator to an entity.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids.
    pub fn attach_animator(&mut self, id: EntityId, animator: Box<dyn Animator>) -> UiResult<AnimatorHandle> {
        let entity = self.tree.get_mut(id).ok_or(UiError::EntityNotFound(id))?;
        entity.animators.push(animator);
        Ok(AnimatorHandle {
            entity: id,
            index: entity.animators.len() - 1,
        })
    }

    /// Mutable access to an attached animator.
    pub fn animator_mut(&mut self, handle: AnimatorHandle) -> Option<&mut (dyn Animator + 'static)> {
        self.tree
            .get_mut(handle.entity)?
            .animators
            .get_mut(handle.index)
            .map(|animator| &mut **animator)
    }

    // style and settings

    /// Resolves a property of an entity at its current interaction state.
    #[must_use]
    pub fn resolve_style(&self, id: EntityId, prop: PropertyId) -> Option<StyleValue> {
        self.tree.get(id).map(|e| self.resolver(e).get(prop))
    }

    pub(crate) fn resolver<'a>(&'a self, entity: &'a Entity) -> Resolver<'a> {
        Resolver::new(
            Some(&entity.style),
            self.theme.styles.sheet(entity.kind.style_key()),
            entity.state,
        )
    }

    /// Resolver for the caption of an entity. Instance overrides apply only
    /// when the caption is the entity's main style.
    pub(crate) fn text_resolver<'a>(&'a self, entity: &'a Entity) -> Resolver<'a> {
        let main = entity.kind.style_key();
        let key = entity.kind.text_style_key().unwrap_or(main);
        let instance = (key == main).then_some(&entity.style);
        Resolver::new(instance, self.theme.styles.sheet(key), entity.state)
    }

    /// Sets the global scale, clamped to the supported range.
    pub fn set_global_scale(&mut self, scale: f32) {
        let clamped = scale.clamp(MIN_SCALE, MAX_SCALE);
        if (clamped - scale).abs() > f32::EPSILON {
            tracing::debug!(requested = scale, applied = clamped, "global scale clamped");
        }
        self.scale = clamped;
        self.layout_dirty = true;
    }

    /// Current global scale.
    #[must_use]
    pub const fn global_scale(&self) -> f32 {
        self.scale
    }

    /// Enables outline drawing of every entity rect.
    pub fn set_debug_draw(&mut self, on: bool) {
        self.debug_draw = on;
    }

    /// Whether debug outlines are drawn.
    #[must_use]
    pub const fn debug_draw(&self) -> bool {
        self.debug_draw
    }

    /// Transform applied when the root target is composited. Setting one
    /// routes the frame through a root surface.
    pub fn set_render_target_transform(&mut self, transform: Option<Transform2D>) {
        self.render_target_transform = transform;
    }

    /// Changes the screen size.
    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen = size;
        self.tooltips.set_screen_size(size);
        self.layout_dirty = true;
    }

    /// Screen size.
    #[must_use]
    pub const fn screen_size(&self) -> Vec2 {
        self.screen
    }

    // queries

    /// Entity under the pointer after the last update.
    #[must_use]
    pub const fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Entity holding keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<EntityId> {
        self.focused
    }

    /// Entity being dragged, once the drag threshold was crossed.
    #[must_use]
    pub fn dragging(&self) -> Option<EntityId> {
        self.drag.filter(|d| d.active).map(|d| d.entity)
    }

    /// Moves focus without raising events.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids; `InvalidTreeOperation` for entities
    /// not reachable from a root.
    pub fn set_focus(&mut self, id: Option<EntityId>) -> UiResult<()> {
        if let Some(id) = id {
            if !self.tree.contains(id) {
                return Err(UiError::EntityNotFound(id));
            }
            if !self.tree.is_reachable(id) {
                return Err(UiError::tree(format!("cannot focus detached entity {id}")));
            }
        }
        self.focused = id;
        Ok(())
    }

    // cursor

    /// Switches to one of the theme's stock cursors.
    pub fn set_cursor(&mut self, cursor: CursorType) {
        self.cursor = self.theme.cursor(cursor);
    }

    /// Uses a custom texture as cursor.
    pub fn set_custom_cursor(&mut self, texture: TextureHandle, data: CursorData) {
        self.cursor = CursorStyle { texture, data };
    }

    /// Shows or hides the software cursor.
    pub fn set_show_cursor(&mut self, on: bool) {
        self.config.show_cursor = on;
    }

    /// Draws the cursor into the root render target instead of on top of
    /// the composited frame.
    pub fn set_include_cursor_in_render_target(&mut self, on: bool) {
        self.config.include_cursor_in_render_target = on;
    }

    /// Active cursor.
    #[must_use]
    pub const fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Pointer position seen by the last update.
    #[must_use]
    pub const fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Tooltip manager.
    #[must_use]
    pub const fn tooltips(&self) -> &TooltipManager {
        &self.tooltips
    }

    /// Mutable tooltip manager, for appearance changes.
    pub fn tooltips_mut(&mut self) -> &mut TooltipManager {
        &mut self.tooltips
    }

    /// Runs the layout pass now.
    pub fn layout(&mut self) {
        self.layout_pass();
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("entities", &self.tree.len())
            .field("scale", &self.scale)
            .field("screen", &self.screen)
            .field("target", &self.target)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::animator::FloatUpDownAnimator;

    fn ctx() -> UiContext {
        UiContext::with_builtin_theme(UiConfig::default()).unwrap()
    }

    #[test]
    fn test_add_child_missing_parent() {
        let mut ui = ctx();
        let before = ui.tree().len();
        let err = ui.add_child(EntityId(999), Entity::paragraph("x")).unwrap_err();
        assert_eq!(err, UiError::EntityNotFound(EntityId(999)));
        assert_eq!(ui.tree().len(), before);
    }

    #[test]
    fn test_global_scale_clamped() {
        let mut ui = ctx();
        ui.set_global_scale(10.0);
        assert_eq!(ui.global_scale(), MAX_SCALE);
        ui.set_global_scale(0.0);
        assert_eq!(ui.global_scale(), MIN_SCALE);
    }

    #[test]
    fn test_remove_clears_focus() {
        let mut ui = ctx();
        let input = ui.add_entity(Entity::text_input(false, "name"));
        ui.set_focus(Some(input)).unwrap();
        ui.remove_entity(input).unwrap();
        assert_eq!(ui.focused(), None);
        assert!(ui.entity(input).is_none());
    }

    #[test]
    fn test_detached_entities_cannot_take_focus() {
        let mut ui = ctx();
        let loose = ui.insert_detached(Entity::text_input(false, "name"));
        assert!(matches!(
            ui.set_focus(Some(loose)),
            Err(UiError::InvalidTreeOperation { .. })
        ));
        assert_eq!(ui.focused(), None);

        ui.attach(None, loose).unwrap();
        ui.set_focus(Some(loose)).unwrap();
        assert_eq!(ui.focused(), Some(loose));
    }

    #[test]
    fn test_dispatch_order_entity_then_global() {
        let mut ui = ctx();
        let id = ui.add_entity(Entity::button("ok"));
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::clone(&log);
        ui.on(EventKind::Click, move |_| l.borrow_mut().push("global"));
        let l = Rc::clone(&log);
        ui.on_entity(id, EventKind::Click, move |_| l.borrow_mut().push("entity 1")).unwrap();
        let l = Rc::clone(&log);
        ui.on_entity(id, EventKind::Click, move |_| l.borrow_mut().push("entity 2")).unwrap();

        ui.emit(id, EventKind::Click);
        ui.dispatch_pending();
        assert_eq!(*log.borrow(), ["entity 1", "entity 2", "global"]);
    }

    #[test]
    fn test_deferred_structural_change() {
        let mut ui = ctx();
        let id = ui.add_entity(Entity::button("remove me"));
        ui.on_entity(id, EventKind::Click, |ctx| {
            let me = ctx.entity();
            ctx.defer(move |ui| {
                ui.remove_entity(me).ok();
            });
        })
        .unwrap();

        ui.emit(id, EventKind::Click);
        ui.dispatch_pending();
        assert!(ui.entity(id).is_some());
        ui.apply_deferred();
        assert!(ui.entity(id).is_none());
    }

    #[test]
    fn test_animator_handle() {
        let mut ui = ctx();
        let id = ui.add_entity(Entity::paragraph("float"));
        let handle = ui
            .attach_animator(id, Box::new(FloatUpDownAnimator::new(1.0, 5.0)))
            .unwrap();
        assert_eq!(handle.index, 0);
        ui.animator_mut(handle).unwrap().set_enabled(false);
        assert!(!ui.animator_mut(handle).unwrap().enabled());
        assert!(ui.attach_animator(EntityId(77), Box::new(FloatUpDownAnimator::new(1.0, 5.0))).is_err());
    }

    #[test]
    fn test_text_resolver_ignores_instance_for_sub_parts() {
        let mut ui = ctx();
        let red = crate::style::Color::RED;
        let id = ui.add_entity(Entity::button("b").with_style(PropertyId::FillColor, StyleValue::Color(red)));
        let entity = ui.entity(id).unwrap();
        assert_eq!(ui.resolver(entity).color(PropertyId::FillColor), red);
        assert_ne!(ui.text_resolver(entity).color(PropertyId::FillColor), red);
    }
}
