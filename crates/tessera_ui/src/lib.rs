//! # TESSERA UI
//!
//! Retained-mode, immediate-draw UI toolkit:
//! - Entities attach to their parent through declarative anchors
//! - Appearance comes from per-interaction-state style sheets
//! - Layout is recomputed every frame from the tree alone
//! - Drawing goes through an abstract renderer with clip, scroll and
//!   offscreen composition
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          UI FRAME                             │
//! ├───────────────────────────────────────────────────────────────┤
//! │  InputSnapshot → update: animators → layout → hit test        │
//! │                          → states/events → kind behaviour     │
//! │                  draw:   DFS render → debug → tooltip         │
//! │                          → composite (optional transform)     │
//! │       ↓               ↓                ↓                      │
//! │  Event hooks     Deferred commands   Renderer / CommandList   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tessera_ui::{Anchor, CommandList, Entity, InputSnapshot, PanelSkin, UiConfig, UiContext};
//!
//! let mut ui = UiContext::with_builtin_theme(UiConfig::default()).unwrap();
//! let panel = ui.add_entity(Entity::panel((450.0, 300.0), PanelSkin::Default, Anchor::Center));
//! ui.add_child(panel, Entity::header("Hello")).unwrap();
//! ui.add_child(panel, Entity::button("Click me")).unwrap();
//!
//! let mut renderer = CommandList::new();
//! ui.update(&InputSnapshot::new(), 1.0 / 60.0);
//! ui.draw(&mut renderer);
//! assert!(renderer.command_count() > 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animator;
pub mod assets;
pub mod config;
pub mod context;
pub mod cursor;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod overflow;
pub mod render;
pub mod style;
pub mod text;
pub mod tooltip;

pub use animator::{Animator, AnimatorHandle, Easing, Presentation};
pub use assets::{AssetAliases, AssetProvider, BuiltinAssets, TextureHandle, Theme};
pub use config::UiConfig;
pub use context::UiContext;
pub use cursor::{CursorData, CursorStyle, CursorType};
pub use entity::{Entity, EntityFlags, EntityId, EntityKind, EventContext, EventKind, PanelSkin};
pub use error::{UiError, UiResult};
pub use geometry::{Rect, Transform2D, Vec2};
pub use input::{InputSnapshot, Key, MouseButton};
pub use layout::{Anchor, Length, Size};
pub use overflow::{Overflow, ScrollState};
pub use render::{CommandList, DrawEffect, RenderCommand, Renderer};
pub use style::{Color, InteractionState, PropertyId, StyleSheet, StyleValue};
pub use text::{FontHandle, GlyphMetrics, MonospaceMetrics};
