//! Renderer boundary.
//!
//! The core never rasterizes. It walks the tree and emits quads, outlines,
//! text runs and surface operations through [`Renderer`]; [`CommandList`]
//! records them for tests, batching, or replay on a GPU backend.

use crate::assets::TextureHandle;
use crate::geometry::{Rect, Transform2D, Vec2};
use crate::style::Color;
use crate::text::FontHandle;

/// Offscreen surface allocated by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// Shader treatment applied to a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawEffect {
    /// Plain textured draw.
    #[default]
    Normal,
    /// Greyed out with [`Color::DISABLED`].
    Disabled,
    /// Solid color, texture alpha only (shadows).
    Silhouette,
}

/// Textured, tinted rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// Destination bounds.
    pub bounds: Rect,
    /// Texture.
    pub texture: TextureHandle,
    /// Tint.
    pub color: Color,
    /// Scissor rect, if any.
    pub clip: Option<Rect>,
    /// Effect.
    pub effect: DrawEffect,
}

/// Rectangle outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    /// Bounds.
    pub bounds: Rect,
    /// Stroke color.
    pub color: Color,
    /// Line width.
    pub width: f32,
    /// Scissor rect, if any.
    pub clip: Option<Rect>,
}

/// One line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Top-left of the line.
    pub position: Vec2,
    /// Font id, see [`FontHandle::id`].
    pub font: u32,
    /// Scale applied to the font metrics.
    pub scale: f32,
    /// Fill color.
    pub color: Color,
    /// Outline color.
    pub outline_color: Color,
    /// Outline width; zero disables it.
    pub outline_width: f32,
    /// Scissor rect, if any.
    pub clip: Option<Rect>,
    /// Effect.
    pub effect: DrawEffect,
}

/// Backend the draw pass emits into.
pub trait Renderer {
    /// Draws a textured quad.
    fn draw_quad(&mut self, quad: &Quad);

    /// Draws a rectangle outline.
    fn draw_outline(&mut self, outline: &Outline);

    /// Draws one line of text.
    fn draw_text(&mut self, text: &TextRun);

    /// Redirects subsequent draws into an offscreen surface covering `bounds`.
    fn begin_target_surface(&mut self, bounds: Rect) -> SurfaceId;

    /// Restores the previous target.
    fn end_target_surface(&mut self, surface: SurfaceId);

    /// Composites `source` of a surface into `dest`, optionally transformed.
    fn present_surface(&mut self, surface: SurfaceId, source: Rect, dest: Rect, transform: Option<&Transform2D>);

    /// Measures text. Backends with real shaping may override this.
    fn measure_text(&self, font: &FontHandle, text: &str, scale: f32) -> Vec2 {
        font.measure(text, scale)
    }
}

/// A recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Textured quad.
    Quad(Quad),
    /// Rectangle outline.
    Outline(Outline),
    /// Text line.
    Text(TextRun),
    /// Start drawing into a surface.
    BeginSurface {
        /// Surface.
        surface: SurfaceId,
        /// Area the surface covers.
        bounds: Rect,
    },
    /// Stop drawing into a surface.
    EndSurface {
        /// Surface.
        surface: SurfaceId,
    },
    /// Composite a surface.
    PresentSurface {
        /// Surface.
        surface: SurfaceId,
        /// Source region.
        source: Rect,
        /// Destination region.
        dest: Rect,
        /// Final transform, if any.
        transform: Option<Transform2D>,
    },
}

/// Recording renderer.
#[derive(Debug, Clone)]
pub struct CommandList {
    commands: Vec<RenderCommand>,
    next_surface: u32,
    open_surfaces: Vec<SurfaceId>,
}

impl CommandList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(4096),
            next_surface: 0,
            open_surfaces: Vec::with_capacity(8),
        }
    }

    /// Clears the previous frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.open_surfaces.clear();
        self.next_surface = 0;
    }

    /// Recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Recorded quads, in draw order.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Quad(q) => Some(q),
            _ => None,
        })
    }

    /// Recorded text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Surfaces begun but not yet ended.
    #[must_use]
    pub fn open_surfaces(&self) -> &[SurfaceId] {
        &self.open_surfaces
    }

    /// Tessellates every quad into two triangles. Clip rects are applied by
    /// trimming the geometry (UVs are not adjusted).
    #[must_use]
    pub fn vertices(&self) -> Vec<UiVertex> {
        let mut out = Vec::with_capacity(self.commands.len() * 6);
        for quad in self.quads() {
            let bounds = match quad.clip {
                Some(clip) => match quad.bounds.intersection(&clip) {
                    Some(r) => r,
                    None => continue,
                },
                None => quad.bounds,
            };
            let color = match quad.effect {
                DrawEffect::Disabled => Color::DISABLED,
                _ => quad.color,
            }
            .to_array();
            let (x0, y0, x1, y1) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
            let tl = UiVertex::new(x0, y0, 0.0, 0.0, color);
            let tr = UiVertex::new(x1, y0, 1.0, 0.0, color);
            let bl = UiVertex::new(x0, y1, 0.0, 1.0, color);
            let br = UiVertex::new(x1, y1, 1.0, 1.0, color);
            out.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
        }
        out
    }
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CommandList {
    fn draw_quad(&mut self, quad: &Quad) {
        self.commands.push(RenderCommand::Quad(quad.clone()));
    }

    fn draw_outline(&mut self, outline: &Outline) {
        self.commands.push(RenderCommand::Outline(outline.clone()));
    }

    fn draw_text(&mut self, text: &TextRun) {
        self.commands.push(RenderCommand::Text(text.clone()));
    }

    fn begin_target_surface(&mut self, bounds: Rect) -> SurfaceId {
        let surface = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.open_surfaces.push(surface);
        self.commands.push(RenderCommand::BeginSurface { surface, bounds });
        surface
    }

    fn end_target_surface(&mut self, surface: SurfaceId) {
        if let Some(pos) = self.open_surfaces.iter().rposition(|s| *s == surface) {
            self.open_surfaces.remove(pos);
        }
        self.commands.push(RenderCommand::EndSurface { surface });
    }

    fn present_surface(&mut self, surface: SurfaceId, source: Rect, dest: Rect, transform: Option<&Transform2D>) {
        self.commands.push(RenderCommand::PresentSurface {
            surface,
            source,
            dest,
            transform: transform.copied(),
        });
    }
}

/// Nested scissor rects; each push intersects with the current top.
#[derive(Debug, Clone, Default)]
pub struct ClipStack {
    stack: Vec<Rect>,
}

impl ClipStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
        }
    }

    /// Pushes a clip rect.
    pub fn push(&mut self, bounds: Rect) {
        let actual = if let Some(current) = self.stack.last() {
            current.intersection(&bounds).unwrap_or(Rect::ZERO)
        } else {
            bounds
        };
        self.stack.push(actual);
    }

    /// Pops the current clip rect.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current(&self) -> Option<Rect> {
        self.stack.last().copied()
    }

    /// Nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UiVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}
