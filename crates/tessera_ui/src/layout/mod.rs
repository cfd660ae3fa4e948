//! Layout: anchors, declared sizes and the resolution engine.

mod anchor;
mod engine;

pub use anchor::{Anchor, Length, Size};
pub use engine::{
    anchor_position, place, resolve_length, FixedIntrinsic, FlowCursor, IntrinsicSize, LayoutRequest,
};
