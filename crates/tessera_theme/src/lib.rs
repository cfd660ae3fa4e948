//! # TESSERA THEME
//!
//! File-backed themes for `tessera_ui`: textures located by path, font
//! metric tables, per-state style documents and cursor metadata, all under
//! one directory.
//!
//! ```no_run
//! use tessera_theme::DirectoryAssets;
//! use tessera_ui::{Theme, UiConfig, UiContext};
//!
//! let config = UiConfig::load("ui.toml").unwrap();
//! let mut assets = DirectoryAssets::from_config(&config).unwrap();
//! let theme = Theme::load(&mut assets).unwrap();
//! let ui = UiContext::new(config, theme);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod document;
pub mod metrics;
pub mod provider;

pub use document::{CursorDocument, StyleDocument};
pub use metrics::TableMetrics;
pub use provider::{DirectoryAssets, TEXTURE_EXTENSION};
