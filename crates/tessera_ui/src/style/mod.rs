//! Styling: colors, typed properties, per-state sheets and their resolution.
//!
//! Some properties (padding, spacing, default size) feed the layout pass, so
//! resolution happens during update as well as during draw.

mod color;
mod property;
mod sheet;

pub use color::Color;
pub use property::{FontStyle, PropertyId, StyleValue, PROPERTY_COUNT};
pub use sheet::{InteractionState, Resolver, StyleDefaults, StyleKey, StyleSheet};
