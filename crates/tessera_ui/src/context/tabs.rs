//! Tabbed panels: a row of tab buttons above a stack of content panels,
//! of which only the active one is visible.

use super::UiContext;
use crate::entity::{Entity, EntityId, EntityKind, PanelSkin, Tab, TabsData};
use crate::error::{UiError, UiResult};
use crate::geometry::Vec2;
use crate::layout::{Anchor, Length, Size};

impl UiContext {
    /// Creates an empty tabs container under `parent`, or as a root.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` when the parent does not exist.
    pub fn create_panel_tabs(
        &mut self,
        parent: Option<EntityId>,
        size: impl Into<Size>,
        skin: PanelSkin,
    ) -> UiResult<EntityId> {
        if let Some(parent) = parent.filter(|p| !self.tree.contains(*p)) {
            return Err(UiError::EntityNotFound(parent));
        }

        let buttons_panel = self.tree.insert(
            Entity::panel(Size::new(Length::Fill, Length::Intrinsic), PanelSkin::None, Anchor::Auto)
                .with_padding(Vec2::ZERO),
        );
        let panels_panel = self
            .tree
            .insert(Entity::panel(Size::FILL, PanelSkin::None, Anchor::Auto).with_padding(Vec2::ZERO));
        let tabs = self.tree.insert(
            Entity::new(EntityKind::PanelTabs(TabsData {
                tabs: Vec::new(),
                active: None,
                skin,
                buttons_panel,
                panels_panel,
            }))
            .with_size(size),
        );

        let attached = self
            .tree
            .attach(Some(tabs), buttons_panel)
            .and_then(|()| self.tree.attach(Some(tabs), panels_panel))
            .and_then(|()| self.tree.attach(parent, tabs));
        if let Err(e) = attached {
            for id in [tabs, buttons_panel, panels_panel] {
                self.tree.remove(id).ok();
            }
            return Err(e);
        }

        self.layout_dirty = true;
        Ok(tabs)
    }

    /// Appends a tab. The first tab becomes active; later ones start hidden.
    /// Tab buttons share the header row equally.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids, `InvalidTreeOperation` when `tabs`
    /// is not a tabs container.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_tab(&mut self, tabs: EntityId, title: impl Into<String>) -> UiResult<Tab> {
        let (buttons_panel, panels_panel, index) = match self.tree.get(tabs).map(|e| &e.kind) {
            Some(EntityKind::PanelTabs(data)) => (data.buttons_panel, data.panels_panel, data.tabs.len()),
            Some(other) => return Err(UiError::tree(format!("{tabs} is a {}, not a tabs panel", other.name()))),
            None => return Err(UiError::EntityNotFound(tabs)),
        };

        let title = title.into();
        let mut button = Entity::button(title.clone()).with_anchor(Anchor::AutoInline);
        if let EntityKind::Button(data) = &mut button.kind {
            data.tab = Some((tabs, index));
        }
        let button = self.add_child(buttons_panel, button)?;
        let mut panel = Entity::panel(Size::FILL, PanelSkin::None, Anchor::TopLeft);
        panel.set_visible(index == 0);
        let panel = self.add_child(panels_panel, panel)?;

        let tab = Tab { title, button, panel };
        let mut buttons = Vec::new();
        if let Some(EntityKind::PanelTabs(data)) = self.tree.get_mut(tabs).map(|e| &mut e.kind) {
            data.tabs.push(tab.clone());
            buttons = data.tabs.iter().map(|t| t.button).collect();
        }

        let share = Length::Fraction(1.0 / buttons.len() as f32);
        for id in buttons {
            if let Some(entity) = self.tree.get_mut(id) {
                entity.size = Size::new(share, Length::Intrinsic);
            }
        }
        if index == 0 {
            self.select_tab(tabs, 0)?;
        }
        tracing::debug!(%tabs, index, "tab added");
        Ok(tab)
    }

    /// Activates a tab: its button shows pressed and only its panel is visible.
    /// Returns whether the active tab changed.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids, `InvalidTreeOperation` for a
    /// non-tabs entity or an index out of range.
    pub fn select_tab(&mut self, tabs: EntityId, index: usize) -> UiResult<bool> {
        let (list, changed) = match self.tree.get_mut(tabs).map(|e| &mut e.kind) {
            Some(EntityKind::PanelTabs(data)) => {
                if index >= data.tabs.len() {
                    return Err(UiError::tree(format!("{tabs} has no tab {index}")));
                }
                let changed = data.active != Some(index);
                data.active = Some(index);
                (data.tabs.clone(), changed)
            }
            Some(_) => return Err(UiError::tree(format!("{tabs} is not a tabs panel"))),
            None => return Err(UiError::EntityNotFound(tabs)),
        };

        for (i, tab) in list.iter().enumerate() {
            let active = i == index;
            if let Some(button) = self.tree.get_mut(tab.button) {
                if let EntityKind::Button(data) = &mut button.kind {
                    data.checked = active;
                }
            }
            if let Some(panel) = self.tree.get_mut(tab.panel) {
                panel.set_visible(active);
            }
        }
        self.layout_dirty = true;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::input::{InputSnapshot, MouseButton};
    use crate::style::InteractionState;

    fn ui() -> UiContext {
        let config = UiConfig {
            screen_width: 900.0,
            screen_height: 600.0,
            ..UiConfig::default()
        };
        UiContext::with_builtin_theme(config).unwrap()
    }

    fn tabs_data(ui: &UiContext, id: EntityId) -> TabsData {
        match &ui.entity(id).unwrap().kind {
            EntityKind::PanelTabs(data) => data.clone(),
            other => panic!("unexpected kind {}", other.name()),
        }
    }

    #[test]
    fn test_first_tab_active_and_buttons_share_row() {
        let mut ui = ui();
        let tabs = ui.create_panel_tabs(None, Size::FILL, PanelSkin::Default).unwrap();
        let first = ui.add_tab(tabs, "one").unwrap();
        let second = ui.add_tab(tabs, "two").unwrap();
        let third = ui.add_tab(tabs, "three").unwrap();
        ui.layout();

        assert_eq!(tabs_data(&ui, tabs).active, Some(0));
        assert!(ui.entity(first.panel).unwrap().is_visible());
        assert!(!ui.entity(second.panel).unwrap().is_visible());

        let rects: Vec<_> = [first.button, second.button, third.button]
            .iter()
            .map(|b| ui.entity(*b).unwrap().rect())
            .collect();
        assert_eq!(rects[0].y, rects[2].y);
        assert!((rects[0].width - 280.0).abs() < 0.01);
        assert!((rects[2].x - 30.0 - 2.0 * 280.0).abs() < 0.01);
    }

    #[test]
    fn test_clicking_tab_button_switches_panel() {
        let mut ui = ui();
        let tabs = ui.create_panel_tabs(None, Size::FILL, PanelSkin::Default).unwrap();
        let first = ui.add_tab(tabs, "one").unwrap();
        let second = ui.add_tab(tabs, "two").unwrap();

        let mut input = InputSnapshot::new();
        ui.update(&input, 0.0);
        input.set_pointer(ui.entity(second.button).unwrap().rect().center());
        ui.update(&input, 0.0);
        input.begin_frame();
        input.press(MouseButton::Left);
        ui.update(&input, 0.0);
        input.begin_frame();
        input.release(MouseButton::Left);
        ui.update(&input, 0.0);

        assert_eq!(tabs_data(&ui, tabs).active, Some(1));
        assert!(!ui.entity(first.panel).unwrap().is_visible());
        assert!(ui.entity(second.panel).unwrap().is_visible());

        input.begin_frame();
        input.set_pointer(Vec2::new(899.0, 599.0));
        ui.update(&input, 0.0);
        assert_eq!(ui.entity(second.button).unwrap().state(), InteractionState::MouseDown);
        assert_eq!(ui.entity(first.button).unwrap().state(), InteractionState::Default);
    }

    #[test]
    fn test_tab_errors() {
        let mut ui = ui();
        let para = ui.add_entity(Entity::paragraph("x"));
        assert!(matches!(ui.add_tab(para, "t"), Err(UiError::InvalidTreeOperation { .. })));
        assert_eq!(
            ui.create_panel_tabs(Some(EntityId(4242)), Size::FILL, PanelSkin::Default),
            Err(UiError::EntityNotFound(EntityId(4242)))
        );
        let tabs = ui.create_panel_tabs(None, Size::FILL, PanelSkin::Default).unwrap();
        assert!(ui.select_tab(tabs, 0).is_err());
    }
}
