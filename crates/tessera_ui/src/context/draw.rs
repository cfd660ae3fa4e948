//! Draw pass.
//!
//! Entities are emitted in the same DFS order the hit test walks, so later
//! siblings paint over earlier ones. Scrolling containers render their
//! children into an offscreen surface that is composited back over the
//! visible area; clipping containers only narrow the scissor rect.

use super::layout::{ListGeometry, ROW_GAP};
use super::UiContext;
use crate::assets::TextureHandle;
use crate::entity::{Entity, EntityId, EntityKind, EventKind, ListData, PanelSkin};
use crate::geometry::{Rect, Vec2};
use crate::render::{ClipStack, DrawEffect, Outline, Quad, Renderer, TextRun};
use crate::style::{Color, FontStyle, InteractionState, PropertyId, Resolver, StyleKey};
use crate::text::wrap_text;

/// How one entity paints, derived from its ancestors and its presentation.
#[derive(Debug, Clone, Copy)]
struct Brush {
    clip: Option<Rect>,
    opacity: f32,
    disabled: bool,
    tint: Option<Color>,
}

impl Brush {
    fn effect(self) -> DrawEffect {
        if self.disabled {
            DrawEffect::Disabled
        } else {
            DrawEffect::Normal
        }
    }

    /// Final color of a draw. Disabled entities always use the fixed tint.
    fn paint(self, color: Color) -> Color {
        if self.disabled {
            Color::DISABLED.fade(self.opacity)
        } else {
            self.tint.unwrap_or(color).fade(self.opacity)
        }
    }

    fn quad(self, renderer: &mut dyn Renderer, bounds: Rect, texture: TextureHandle, color: Color) {
        renderer.draw_quad(&Quad {
            bounds,
            texture,
            color: self.paint(color),
            clip: self.clip,
            effect: self.effect(),
        });
    }

    fn clipped_to(self, area: Rect) -> Self {
        let clip = match self.clip {
            Some(outer) => outer.intersection(&area).unwrap_or(Rect::new(area.x, area.y, 0.0, 0.0)),
            None => area,
        };
        Self { clip: Some(clip), ..self }
    }
}

/// A block of text inside an area.
struct TextBlock<'a> {
    text: &'a str,
    area: Rect,
    wrap: bool,
    middle: bool,
    visible_chars: Option<usize>,
}

impl<'a> TextBlock<'a> {
    fn top(text: &'a str, area: Rect) -> Self {
        Self {
            text,
            area,
            wrap: false,
            middle: false,
            visible_chars: None,
        }
    }

    fn middle(text: &'a str, area: Rect) -> Self {
        Self {
            middle: true,
            ..Self::top(text, area)
        }
    }
}

impl UiContext {
    /// Draws the reachable tree, debug outlines and the tooltip, then fires
    /// `AfterDraw` for every drawn entity.
    ///
    /// Layout is recomputed first if anything changed geometry since the
    /// last update.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        if self.layout_dirty {
            self.layout_pass();
        }

        let drawn = self.paint(renderer);
        tracing::trace!(drawn = drawn.len(), "draw pass");

        for id in drawn {
            self.emit(id, EventKind::AfterDraw);
        }
        self.dispatch_pending();
        self.apply_deferred();
    }

    fn paint(&self, renderer: &mut dyn Renderer) -> Vec<EntityId> {
        let screen = Rect::from_pos_size(Vec2::ZERO, self.screen);
        let transform = self.render_target_transform;
        let root_surface = (self.config.use_render_target || transform.is_some())
            .then(|| renderer.begin_target_surface(screen));

        let mut clips = ClipStack::new();
        let mut drawn = Vec::with_capacity(self.hit_list.len());
        for &id in self.tree.roots() {
            self.draw_entity(renderer, id, &mut clips, 1.0, &mut drawn);
        }

        if self.debug_draw {
            self.draw_debug(renderer);
        }
        self.tooltips
            .draw(renderer, self.theme.white, self.theme.font(FontStyle::Regular));

        let cursor_inside = self.config.include_cursor_in_render_target || root_surface.is_none();
        if cursor_inside {
            self.draw_cursor(renderer);
        }
        if let Some(surface) = root_surface {
            renderer.end_target_surface(surface);
            renderer.present_surface(surface, screen, screen, transform.as_ref());
        }
        if !cursor_inside {
            self.draw_cursor(renderer);
        }
        drawn
    }

    fn draw_cursor(&self, renderer: &mut dyn Renderer) {
        if !self.config.show_cursor {
            return;
        }
        renderer.draw_quad(&Quad {
            bounds: self.cursor.bounds(self.pointer, self.scale),
            texture: self.cursor.texture,
            color: Color::WHITE,
            clip: None,
            effect: DrawEffect::Normal,
        });
    }

    fn draw_entity(
        &self,
        renderer: &mut dyn Renderer,
        id: EntityId,
        clips: &mut ClipStack,
        parent_opacity: f32,
        drawn: &mut Vec<EntityId>,
    ) {
        let Some(entity) = self.tree.get(id).filter(|e| e.is_visible()) else {
            return;
        };
        let brush = Brush {
            clip: clips.current(),
            opacity: parent_opacity * entity.presentation.opacity,
            disabled: entity.disabled,
            tint: entity.presentation.tint,
        };

        self.draw_shadow(renderer, entity, brush);
        self.draw_body(renderer, id, entity, brush);
        drawn.push(id);

        if entity.children.is_empty() {
            return;
        }
        let overflow = entity.kind.overflow();
        let viewport = self.viewport(entity);

        if overflow.scrolls() {
            let surface = renderer.begin_target_surface(viewport);
            clips.push(viewport);
            self.draw_children(renderer, entity, clips, brush.opacity, drawn);
            clips.pop();
            renderer.end_target_surface(surface);
            renderer.present_surface(surface, viewport, viewport, None);
            self.draw_scrollbar(renderer, entity, brush);
        } else if overflow.clips() {
            clips.push(viewport);
            self.draw_children(renderer, entity, clips, brush.opacity, drawn);
            clips.pop();
        } else {
            self.draw_children(renderer, entity, clips, brush.opacity, drawn);
        }
    }

    fn draw_children(
        &self,
        renderer: &mut dyn Renderer,
        entity: &Entity,
        clips: &mut ClipStack,
        opacity: f32,
        drawn: &mut Vec<EntityId>,
    ) {
        for &child in &entity.children {
            self.draw_entity(renderer, child, clips, opacity, drawn);
        }
    }

    /// Visible area of a container: its laid-out rect moved by the inherited
    /// presentation offset, minus the scrollbar strip.
    fn viewport(&self, entity: &Entity) -> Rect {
        let offset = entity.visual.center() - entity.rect.center();
        let mut viewport = entity.rect.translate(offset);
        if entity.kind.overflow().scrolls() {
            viewport.width = (viewport.width - self.scrollbar_width()).max(0.0);
        }
        viewport
    }

    fn draw_shadow(&self, renderer: &mut dyn Renderer, entity: &Entity, brush: Brush) {
        let texture = match &entity.kind {
            EntityKind::Panel(p) => self.theme.panel(p.skin),
            EntityKind::PanelTabs(t) => self.theme.panel(t.skin),
            EntityKind::Button(b) => Some(self.theme.button(b.skin, entity.state)),
            _ => None,
        };
        let Some(texture) = texture else {
            return;
        };
        let style = self.resolver(entity);
        let color = style.color(PropertyId::ShadowColor);
        if color.a <= 0.0 {
            return;
        }
        let mut bounds = entity
            .visual
            .translate(style.vector(PropertyId::ShadowOffset) * self.scale);
        let shadow_scale = style.scalar(PropertyId::ShadowScale);
        if shadow_scale > 0.0 && (shadow_scale - 1.0).abs() > f32::EPSILON {
            bounds = bounds.scale_centered(shadow_scale);
        }
        renderer.draw_quad(&Quad {
            bounds,
            texture,
            color: color.fade(brush.opacity),
            clip: brush.clip,
            effect: DrawEffect::Silhouette,
        });
    }

    #[allow(clippy::too_many_lines)]
    fn draw_body(&self, renderer: &mut dyn Renderer, id: EntityId, entity: &Entity, brush: Brush) {
        let style = self.resolver(entity);
        let fill = style.color(PropertyId::FillColor);
        let visual = entity.visual;
        let theme = &self.theme;

        match &entity.kind {
            EntityKind::Panel(panel) => {
                if let Some(texture) = theme.panel(panel.skin) {
                    brush.quad(renderer, visual, texture, fill);
                }
            }
            EntityKind::PanelTabs(tabs) => {
                if let Some(texture) = theme.panel(tabs.skin) {
                    brush.quad(renderer, visual, texture, fill);
                }
            }
            EntityKind::Button(button) => {
                brush.quad(renderer, visual, theme.button(button.skin, entity.state), fill);
                let area = visual.inset(style.vector(PropertyId::Padding) * self.scale);
                let block = TextBlock {
                    visible_chars: entity.presentation.visible_chars,
                    ..TextBlock::middle(&button.text, area)
                };
                self.draw_text(renderer, brush, &self.text_resolver(entity), &block);
            }
            EntityKind::Paragraph(t) | EntityKind::Header(t) | EntityKind::Label(t) => {
                let block = TextBlock {
                    wrap: t.wrap,
                    visible_chars: entity.presentation.visible_chars,
                    ..TextBlock::top(&t.text, visual)
                };
                self.draw_text(renderer, brush, &self.text_resolver(entity), &block);
            }
            EntityKind::CheckBox(toggle) | EntityKind::RadioButton(toggle) => {
                let shown = if toggle.checked {
                    InteractionState::MouseDown
                } else {
                    entity.state
                };
                let texture = if matches!(entity.kind, EntityKind::CheckBox(_)) {
                    theme.checkbox(shown)
                } else {
                    theme.radio(shown)
                };
                let side = visual.height;
                brush.quad(renderer, Rect::new(visual.x, visual.y, side, side), texture, fill);
                let gap = ROW_GAP * self.scale;
                let area = Rect::new(
                    visual.x + side + gap,
                    visual.y,
                    (visual.width - side - gap).max(0.0),
                    visual.height,
                );
                self.draw_text(renderer, brush, &self.text_resolver(entity), &TextBlock::middle(&toggle.text, area));
            }
            EntityKind::Slider(range) => {
                brush.quad(renderer, visual, theme.slider(range.skin), fill);
                let mark = visual.height;
                let x = visual.x + range.fraction() * (visual.width - mark).max(0.0);
                brush.quad(
                    renderer,
                    Rect::new(x, visual.y, mark, mark),
                    theme.slider_mark(range.skin),
                    fill,
                );
            }
            EntityKind::ProgressBar(range) => {
                brush.quad(renderer, visual, theme.progress_bar, fill);
                let fill_style = Resolver::new(None, theme.styles.sheet(StyleKey::ProgressBarFill), entity.state);
                let filled = Rect::new(visual.x, visual.y, visual.width * range.fraction(), visual.height);
                brush.quad(
                    renderer,
                    filled,
                    theme.progress_bar_fill,
                    fill_style.color(PropertyId::FillColor),
                );
                if let Some(caption) = &range.caption {
                    self.draw_text(renderer, brush, &self.text_resolver(entity), &TextBlock::middle(caption, visual));
                }
            }
            EntityKind::SelectList(list) => {
                if let Some(geometry) = self.list_geometry(entity) {
                    self.draw_list(renderer, entity, brush, list, &geometry);
                }
            }
            EntityKind::DropDown(dropdown) => {
                self.draw_dropdown_header(renderer, entity, brush, dropdown.list.selected_value(), &dropdown.placeholder);
                if let Some(geometry) = self.list_geometry(entity) {
                    self.draw_list(renderer, entity, brush, &dropdown.list, &geometry);
                }
            }
            EntityKind::TextInput(field) => {
                if let Some(texture) = theme.panel(PanelSkin::ListBackground) {
                    brush.quad(renderer, visual, texture, fill);
                }
                let area = visual.inset(style.vector(PropertyId::Padding) * self.scale);
                let focused = self.focused == Some(id);
                let block = TextBlock {
                    wrap: field.multiline,
                    ..TextBlock::top(&field.value, area)
                };
                if field.value.is_empty() {
                    let placeholder = Resolver::new(
                        None,
                        theme.styles.sheet(StyleKey::TextInputPlaceholder),
                        entity.state,
                    );
                    self.draw_text(
                        renderer,
                        brush,
                        &placeholder,
                        &TextBlock {
                            text: &field.placeholder,
                            ..block
                        },
                    );
                } else {
                    self.draw_text(renderer, brush, &self.text_resolver(entity), &block);
                }
                if focused {
                    self.draw_caret(renderer, entity, brush, &field.value, field.caret(), &block);
                }
            }
            EntityKind::Image(image) => brush.quad(renderer, visual, image.texture, fill),
            EntityKind::Icon(icon) => {
                if icon.background {
                    brush.quad(renderer, visual, theme.icon_background, fill);
                }
                brush.quad(renderer, visual, icon.texture, fill);
            }
            EntityKind::ColoredRectangle => {
                brush.quad(renderer, visual, theme.white, fill);
                #[allow(clippy::cast_precision_loss)]
                let width = style.int(PropertyId::OutlineWidth) as f32 * self.scale;
                if width > 0.0 {
                    renderer.draw_outline(&Outline {
                        bounds: visual,
                        color: brush.paint(style.color(PropertyId::OutlineColor)),
                        width,
                        clip: brush.clip,
                    });
                }
            }
            EntityKind::HorizontalLine => brush.quad(renderer, visual, theme.horizontal_line, fill),
            EntityKind::LineSpace(_) => {}
        }
    }

    /// Emits wrapped lines of text. Horizontal centering follows
    /// `ForceAlignCenter`; `visible_chars` cuts the text for typewriter effects.
    fn draw_text(&self, renderer: &mut dyn Renderer, brush: Brush, style: &Resolver<'_>, block: &TextBlock<'_>) {
        if block.text.is_empty() {
            return;
        }
        let font = self.theme.font(style.font_style());
        let scale = style.scalar(PropertyId::Scale) * self.scale;
        let max_width = if block.wrap { block.area.width } else { 0.0 };
        let mut lines = wrap_text(block.text, font, scale, max_width);
        if let Some(limit) = block.visible_chars {
            let mut left = limit;
            for line in &mut lines {
                let count = line.chars().count();
                if count > left {
                    *line = line.chars().take(left).collect();
                }
                left = left.saturating_sub(count);
            }
        }

        let line_height = font.line_height(scale);
        #[allow(clippy::cast_precision_loss)]
        let total = lines.len() as f32 * line_height;
        let mut y = if block.middle {
            block.area.y + (block.area.height - total) * 0.5
        } else {
            block.area.y
        };
        let center = style.boolean(PropertyId::ForceAlignCenter);
        let color = brush.paint(style.color(PropertyId::FillColor));
        #[allow(clippy::cast_precision_loss)]
        let outline_width = style.int(PropertyId::OutlineWidth) as f32 * self.scale;
        let outline_color = style.color(PropertyId::OutlineColor).fade(brush.opacity);

        for line in lines {
            if !line.is_empty() {
                let x = if center {
                    block.area.x + (block.area.width - font.line_width(&line, scale)) * 0.5
                } else {
                    block.area.x
                };
                renderer.draw_text(&TextRun {
                    text: line,
                    position: Vec2::new(x, y),
                    font: font.id(),
                    scale,
                    color,
                    outline_color,
                    outline_width,
                    clip: brush.clip,
                    effect: brush.effect(),
                });
            }
            y += line_height;
        }
    }

    fn draw_caret(
        &self,
        renderer: &mut dyn Renderer,
        entity: &Entity,
        brush: Brush,
        value: &str,
        caret: usize,
        block: &TextBlock<'_>,
    ) {
        let style = self.text_resolver(entity);
        let font = self.theme.font(style.font_style());
        let scale = style.scalar(PropertyId::Scale) * self.scale;
        let before: String = value.chars().take(caret).collect();
        let max_width = if block.wrap { block.area.width } else { 0.0 };
        let lines = wrap_text(&before, font, scale, max_width);
        let last = lines.last().map_or(0.0, |l| font.line_width(l, scale));
        let line_height = font.line_height(scale);
        #[allow(clippy::cast_precision_loss)]
        let row = lines.len().saturating_sub(1) as f32;
        let bounds = Rect::new(
            block.area.x + last,
            block.area.y + row * line_height,
            (2.0 * self.scale).max(1.0),
            line_height,
        );
        brush.quad(renderer, bounds, self.theme.white, style.color(PropertyId::FillColor));
    }

    fn draw_dropdown_header(
        &self,
        renderer: &mut dyn Renderer,
        entity: &Entity,
        brush: Brush,
        selected: Option<&str>,
        placeholder: &str,
    ) {
        let visual = entity.visual;
        let header = Rect::new(visual.x, visual.y, visual.width, self.dropdown_header_height());
        let panel = Resolver::new(
            None,
            self.theme.styles.sheet(StyleKey::DropDownSelectedPanel),
            entity.state,
        );
        if let Some(texture) = self.theme.panel(PanelSkin::ListBackground) {
            brush.quad(renderer, header, texture, panel.color(PropertyId::FillColor));
        }

        let padding = panel.vector(PropertyId::Padding) * self.scale;
        let area = header.inset(padding);
        let (text, key) = match selected {
            Some(value) => (value, StyleKey::DropDownSelectedParagraph),
            None => (placeholder, StyleKey::TextInputPlaceholder),
        };
        let style = Resolver::new(None, self.theme.styles.sheet(key), entity.state);
        self.draw_text(renderer, brush, &style, &TextBlock::middle(text, area));

        let side = header.height * 0.5;
        let arrow = Rect::new(header.right() - padding.x - side, header.y + (header.height - side) * 0.5, side, side);
        let open = matches!(&entity.kind, EntityKind::DropDown(d) if d.open);
        let texture = if open { self.theme.arrow_up } else { self.theme.arrow_down };
        brush.quad(renderer, arrow, texture, Color::WHITE);
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_list(
        &self,
        renderer: &mut dyn Renderer,
        entity: &Entity,
        brush: Brush,
        list: &ListData,
        geometry: &ListGeometry,
    ) {
        let style = self.resolver(entity);
        if let Some(texture) = self.theme.panel(PanelSkin::ListBackground) {
            brush.quad(renderer, geometry.area, texture, style.color(PropertyId::FillColor));
        }

        let rows = brush.clipped_to(geometry.content);
        let text_style = self.text_resolver(entity);
        let scroll = list.scroll.offset().y;
        let content = geometry.content;
        for (index, item) in list.items.iter().enumerate() {
            let y = content.y + index as f32 * geometry.row_height - scroll;
            if y + geometry.row_height < content.y {
                continue;
            }
            if y > content.bottom() {
                break;
            }
            let row = Rect::new(content.x, y, content.width, geometry.row_height);
            if list.selected == Some(index) {
                rows.quad(
                    renderer,
                    row,
                    self.theme.white,
                    style.color(PropertyId::SelectedHighlightColor),
                );
            }
            self.draw_text(renderer, rows, &text_style, &TextBlock::top(item, row));
        }
    }

    fn draw_scrollbar(&self, renderer: &mut dyn Renderer, entity: &Entity, brush: Brush) {
        let Some(scroll) = entity.kind.scroll().filter(|s| s.is_scrollable()) else {
            return;
        };
        let bar = self.scrollbar_width();
        let visual = entity.visual;
        let track = Rect::new(visual.right() - bar, visual.y, bar, visual.height);
        let style = Resolver::new(
            None,
            self.theme.styles.sheet(StyleKey::VerticalScrollbar),
            entity.state,
        );
        let fill = style.color(PropertyId::FillColor);
        brush.quad(renderer, track, self.theme.scrollbar, fill);
        brush.quad(renderer, scroll.thumb_rect(track), self.theme.scrollbar_mark, fill);
    }

    /// Outlines every placed entity; the pointer target in yellow, the
    /// focused entity in red.
    fn draw_debug(&self, renderer: &mut dyn Renderer) {
        for hit in &self.hit_list {
            let color = if Some(hit.id) == self.target {
                Color::YELLOW
            } else if Some(hit.id) == self.focused {
                Color::RED
            } else {
                Color::WHITE.with_alpha(0.5)
            };
            renderer.draw_outline(&Outline {
                bounds: hit.rect,
                color,
                width: 1.0,
                clip: None,
            });
        }
    }
}
