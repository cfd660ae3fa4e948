//! Entities: the base record, the closed set of kinds, event hooks and the
//! owning tree.

mod core;
mod events;
mod kind;
mod tree;

pub use core::{Entity, EntityFlags, EntityId};
pub use events::{Deferred, EventContext, EventHooks, EventKind, Handler};
pub use kind::{
    ButtonData, ButtonSkin, DropDownData, EntityKind, IconData, ImageData, ListData, PanelData, PanelSkin,
    RangeData, SliderSkin, Tab, TabsData, TextData, TextInputData, ToggleData, LINE_SPACE_UNIT,
};
pub use tree::EntityTree;
