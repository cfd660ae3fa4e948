//! Layout pass: walks the reachable tree in draw order, places every visible
//! entity, and records the hit list used by the update pass.

use super::{HitEntry, UiContext};
use crate::animator::Presentation;
use crate::entity::{Entity, EntityFlags, EntityId, EntityKind, LINE_SPACE_UNIT};
use crate::geometry::{Rect, Vec2};
use crate::layout::{place, FlowCursor, IntrinsicSize, LayoutRequest};
use crate::style::{InteractionState, PropertyId, Resolver, StyleKey};
use crate::text::{wrapped_height, FontHandle};

/// Gap between list rows, unscaled.
pub(crate) const ROW_GAP: f32 = 8.0;

/// State handed from a container to its children.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    clip: Option<Rect>,
    offset: Vec2,
    disabled: bool,
    inert: bool,
}

impl Inherited {
    const ROOT: Self = Self {
        clip: None,
        offset: Vec2::ZERO,
        disabled: false,
        inert: false,
    };
}

/// Rows of a select list or an open dropdown.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListGeometry {
    /// Background area of the list.
    pub(crate) area: Rect,
    /// Area rows are drawn in.
    pub(crate) content: Rect,
    /// Height of one row, gap included.
    pub(crate) row_height: f32,
}

impl ListGeometry {
    /// Row index under a point, given the scroll offset.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn row_at(&self, point: Vec2, scroll: f32) -> Option<usize> {
        if !self.content.contains(point) || self.row_height <= 0.0 {
            return None;
        }
        Some(((point.y - self.content.y + scroll) / self.row_height).floor() as usize)
    }
}

/// Kind-specific intrinsic size of one entity.
struct Intrinsic<'a> {
    ui: &'a UiContext,
    id: EntityId,
}

impl IntrinsicSize for Intrinsic<'_> {
    fn width(&mut self) -> Option<f32> {
        self.ui.intrinsic_width(self.id)
    }

    fn height(&mut self, width: f32) -> Option<f32> {
        self.ui.intrinsic_height(self.id, width)
    }
}

impl UiContext {
    pub(crate) fn layout_pass(&mut self) {
        self.hit_list.clear();
        self.measure_cache.get_mut().clear();
        let screen = Rect::from_pos_size(Vec2::ZERO, self.screen);
        let roots = self.tree.roots().to_vec();
        let mut cursor = FlowCursor::new();
        for id in roots {
            self.layout_entity(id, screen, &mut cursor, Inherited::ROOT);
        }
        self.layout_dirty = false;
        tracing::trace!(placed = self.hit_list.len(), "layout pass");
    }

    fn request(&self, id: EntityId) -> Option<LayoutRequest> {
        let entity = self.tree.get(id).filter(|e| e.is_visible())?;
        let style = self.resolver(entity);
        Some(LayoutRequest {
            anchor: entity.anchor,
            size: entity.size,
            offset: entity.offset,
            space_before: style.vector(PropertyId::SpaceBefore),
            space_after: style.vector(PropertyId::SpaceAfter),
        })
    }

    fn layout_entity(&mut self, id: EntityId, content: Rect, cursor: &mut FlowCursor, inherited: Inherited) {
        let Some(request) = self.request(id) else {
            return;
        };
        let scale = self.scale;
        let mut rect = place(&request, content, cursor, scale, &mut Intrinsic { ui: &*self, id });

        let Some(entity) = self.tree.get_mut(id) else {
            return;
        };
        if entity.drag_offset != Vec2::ZERO {
            rect = rect.translate(entity.drag_offset * scale);
            if entity.is_draggable() && entity.flags.has(EntityFlags::LIMIT_DRAG) {
                let correction = rect.correction_into(&content);
                if correction != Vec2::ZERO {
                    rect = rect.translate(correction);
                    entity.drag_offset += correction * (1.0 / scale);
                }
            }
        }

        let disabled = inherited.disabled || !entity.is_enabled();
        let inert = disabled || inherited.inert || entity.is_locked();
        let offset = inherited.offset + entity.presentation.offset;
        let visual = Presentation {
            offset,
            ..entity.presentation
        }
        .apply(rect);

        entity.rect = rect;
        entity.content_rect = rect;
        entity.visual = visual;
        entity.disabled = disabled;
        entity.inert = inert;
        let click_through = entity.flags.has(EntityFlags::CLICK_THROUGH);
        let has_children = !entity.children.is_empty();

        self.hit_list.push(HitEntry {
            id,
            rect: visual,
            clip: inherited.clip,
            click_through,
        });
        self.update_list_extent(id);

        if has_children {
            let inherited = Inherited {
                offset,
                disabled,
                inert,
                ..inherited
            };
            self.layout_children(id, rect, inherited);
        }
    }

    fn layout_children(&mut self, id: EntityId, rect: Rect, inherited: Inherited) {
        let Some(entity) = self.tree.get(id) else {
            return;
        };
        let children = entity.children.clone();
        let overflow = entity.kind.overflow();
        let padding = self.resolver(entity).vector(PropertyId::Padding) * self.scale;

        let mut content = rect.inset(padding);
        let mut viewport = rect.translate(inherited.offset);
        if overflow.scrolls() {
            let bar = self.scrollbar_width();
            content.width = (content.width - bar).max(0.0);
            viewport.width = (viewport.width - bar).max(0.0);
        }

        let mut clip = inherited.clip;
        if overflow.clips() {
            clip = Some(match clip {
                Some(outer) => outer
                    .intersection(&viewport)
                    .unwrap_or(Rect::new(viewport.x, viewport.y, 0.0, 0.0)),
                None => viewport,
            });
        }

        let mut shifted = content;
        if overflow.scrolls() {
            let mut extent = self.measure_children(&children, content);
            if !overflow.scrolls_x() {
                extent.x = content.width;
            }
            if let Some(scroll) = self.tree.get_mut(id).and_then(|e| e.kind.scroll_mut()) {
                scroll.set_extent(extent, content.size());
                shifted = content.translate(-scroll.offset());
            }
        }
        if let Some(entity) = self.tree.get_mut(id) {
            entity.content_rect = content;
        }

        let inherited = Inherited { clip, ..inherited };
        let mut cursor = FlowCursor::new();
        for child in children {
            self.layout_entity(child, shifted, &mut cursor, inherited);
        }
    }

    /// Extent of the children placed inside `content`, relative to its origin.
    /// Writes nothing.
    fn measure_children(&self, children: &[EntityId], content: Rect) -> Vec2 {
        let mut cursor = FlowCursor::new();
        let mut extent = Vec2::ZERO;
        for &child in children {
            let Some(request) = self.request(child) else {
                continue;
            };
            let rect = place(&request, content, &mut cursor, self.scale, &mut Intrinsic { ui: self, id: child });
            let after = request.space_after * self.scale;
            extent = extent.max(Vec2::new(
                rect.right() - content.x + after.x,
                rect.bottom() - content.y + after.y,
            ));
        }
        extent.max(Vec2::new(0.0, cursor.extent()))
    }

    fn intrinsic_width(&self, id: EntityId) -> Option<f32> {
        let entity = self.tree.get(id)?;
        match &entity.kind {
            EntityKind::Paragraph(t) | EntityKind::Header(t) | EntityKind::Label(t) => {
                if t.wrap {
                    None
                } else {
                    let (font, scale) = self.caption_font(entity);
                    Some(font.measure(&t.text, scale).x)
                }
            }
            EntityKind::LineSpace(_) => None,
            _ => {
                let default = self.resolver(entity).vector(PropertyId::DefaultSize) * self.scale;
                (default.x > 0.0).then_some(default.x)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn intrinsic_height(&self, id: EntityId, width: f32) -> Option<f32> {
        let entity = self.tree.get(id)?;
        let style = self.resolver(entity);
        let default = style.vector(PropertyId::DefaultSize) * self.scale;
        match &entity.kind {
            EntityKind::Paragraph(t) | EntityKind::Header(t) | EntityKind::Label(t) => {
                let (font, scale) = self.caption_font(entity);
                Some(wrapped_height(&t.text, font, scale, if t.wrap { width } else { 0.0 }))
            }
            EntityKind::LineSpace(lines) => Some(*lines as f32 * LINE_SPACE_UNIT * self.scale),
            EntityKind::DropDown(d) => {
                let header = self.dropdown_header_height();
                Some(if d.open { header + default.y } else { header })
            }
            EntityKind::Panel(_) | EntityKind::PanelTabs(_) if default.y <= 0.0 => {
                let key = (id, width.to_bits());
                if let Some(&height) = self.measure_cache.borrow().get(&key) {
                    return Some(height);
                }
                let padding = style.vector(PropertyId::Padding) * self.scale;
                let mut inner = width - padding.x * 2.0;
                if entity.kind.overflow().scrolls() {
                    inner -= self.scrollbar_width();
                }
                let content = Rect::new(0.0, 0.0, inner.max(0.0), 0.0);
                let height = self.measure_children(&entity.children, content).y + padding.y * 2.0;
                self.measure_cache.borrow_mut().insert(key, height);
                Some(height)
            }
            _ => (default.y > 0.0).then_some(default.y),
        }
    }

    /// Font and final text scale of an entity's caption.
    pub(crate) fn caption_font(&self, entity: &Entity) -> (&FontHandle, f32) {
        let style = self.text_resolver(entity);
        (
            self.theme.font(style.font_style()),
            style.scalar(PropertyId::Scale) * self.scale,
        )
    }

    /// Width reserved for the scrollbar of scrolling panels.
    pub(crate) fn scrollbar_width(&self) -> f32 {
        let style = Resolver::new(
            None,
            self.theme.styles.sheet(StyleKey::VerticalScrollbar),
            InteractionState::Default,
        );
        style.vector(PropertyId::DefaultSize).x * self.scale
    }

    /// Height of the collapsed part of a dropdown.
    pub(crate) fn dropdown_header_height(&self) -> f32 {
        let style = Resolver::new(
            None,
            self.theme.styles.sheet(StyleKey::DropDownSelectedPanel),
            InteractionState::Default,
        );
        let height = style.vector(PropertyId::DefaultSize).y;
        if height > 0.0 {
            height * self.scale
        } else {
            let font = self.theme.font(style.font_style());
            (font.line_height(1.0) + style.vector(PropertyId::Padding).y * 2.0) * self.scale
        }
    }

    /// Row layout of a select list or an open dropdown.
    pub(crate) fn list_geometry(&self, entity: &Entity) -> Option<ListGeometry> {
        let visual = entity.visual;
        let area = match &entity.kind {
            EntityKind::SelectList(_) => visual,
            EntityKind::DropDown(d) if d.open => {
                let header = self.dropdown_header_height();
                Rect::new(visual.x, visual.y + header, visual.width, (visual.height - header).max(0.0))
            }
            _ => return None,
        };
        let padding = self.resolver(entity).vector(PropertyId::Padding) * self.scale;
        let (font, scale) = self.caption_font(entity);
        Some(ListGeometry {
            area,
            content: area.inset(padding),
            row_height: font.line_height(scale) + ROW_GAP * self.scale,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn update_list_extent(&mut self, id: EntityId) {
        let Some(entity) = self.tree.get(id) else {
            return;
        };
        let Some(geometry) = self.list_geometry(entity) else {
            return;
        };
        let rows = match &entity.kind {
            EntityKind::SelectList(l) => l.items.len(),
            EntityKind::DropDown(d) => d.list.items.len(),
            _ => 0,
        };
        let content = Vec2::new(geometry.content.width, rows as f32 * geometry.row_height);
        if let Some(scroll) = self.tree.get_mut(id).and_then(|e| e.kind.scroll_mut()) {
            scroll.set_extent(content, geometry.content.size());
        }
    }
}
