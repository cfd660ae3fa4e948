//! Event kinds, listener lists and the context handed to listeners.
//!
//! Listeners get read-only access to the tree. Structural changes go through
//! [`EventContext::defer`] and run after the pass that raised the event.

use std::collections::HashMap;
use std::fmt;

use super::{EntityId, EntityTree};
use crate::context::UiContext;

/// Everything an entity can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Left button released over an entity that was pressed.
    Click,
    /// Right button released over the target.
    RightClick,
    /// Pointer entered the entity.
    MouseEnter,
    /// Pointer left the entity.
    MouseLeave,
    /// Left button pressed on the entity.
    MouseDown,
    /// Left button released over the entity after a press.
    MouseReleased,
    /// Every frame the entity is hovered.
    WhileMouseHover,
    /// Every frame the entity is held down.
    WhileMouseDown,
    /// The entity's value changed.
    ValueChange,
    /// Dragging started.
    StartDrag,
    /// Every frame while dragging.
    WhileDragging,
    /// Dragging stopped.
    StopDrag,
    /// The entity gained or lost focus.
    FocusChange,
    /// Wheel input over the entity.
    MouseWheelScroll,
    /// The entity was drawn.
    AfterDraw,
}

/// Deferred mutation of the UI, applied after the current pass.
pub type Deferred = Box<dyn FnOnce(&mut UiContext)>;

/// Event listener.
pub type Handler = Box<dyn FnMut(&mut EventContext<'_>)>;

/// What a listener sees.
pub struct EventContext<'a> {
    entity: EntityId,
    kind: EventKind,
    tree: &'a EntityTree,
    deferred: &'a mut Vec<Deferred>,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        entity: EntityId,
        kind: EventKind,
        tree: &'a EntityTree,
        deferred: &'a mut Vec<Deferred>,
    ) -> Self {
        Self {
            entity,
            kind,
            tree,
            deferred,
        }
    }

    /// Entity that raised the event.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Read-only view of the tree.
    #[must_use]
    pub const fn tree(&self) -> &EntityTree {
        self.tree
    }

    /// Queues a mutation to run once the current pass finishes.
    pub fn defer(&mut self, command: impl FnOnce(&mut UiContext) + 'static) {
        self.deferred.push(Box::new(command));
    }
}

impl fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("entity", &self.entity)
            .field("kind", &self.kind)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}

/// Ordered listener lists, one per event kind.
#[derive(Default)]
pub struct EventHooks {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl EventHooks {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener.
    pub fn add(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Number of listeners for a kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Removes every listener of a kind.
    pub fn clear(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }

    /// Takes the listeners out so they can run while the tree is borrowed.
    pub(crate) fn take(&mut self, kind: EventKind) -> Vec<Handler> {
        self.handlers.remove(&kind).unwrap_or_default()
    }

    /// Puts taken listeners back in front of any registered meanwhile.
    pub(crate) fn restore(&mut self, kind: EventKind, mut taken: Vec<Handler>) {
        if taken.is_empty() {
            return;
        }
        if let Some(added) = self.handlers.remove(&kind) {
            taken.extend(added);
        }
        self.handlers.insert(kind, taken);
    }
}

impl fmt::Debug for EventHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}
