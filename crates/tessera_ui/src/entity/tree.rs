//! Entity tree: ownership, attachment and traversal.

use std::collections::HashMap;

use super::{Entity, EntityId};
use crate::error::{UiError, UiResult};

/// Owns every entity, indexed by id.
///
/// Only entities reachable from a root are updated and drawn; detached
/// entities stay in the tree until removed or re-attached.
#[derive(Debug)]
pub struct EntityTree {
    entities: HashMap<EntityId, Entity>,
    roots: Vec<EntityId>,
    next_id: u64,
}

impl EntityTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: HashMap::with_capacity(256),
            roots: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Stores an entity without attaching it.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        entity.parent = None;
        entity.children.clear();
        self.entities.insert(id, entity);
        id
    }

    /// Attaches a detached entity under `parent`, or as a root when `None`.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids; `InvalidTreeOperation` when the
    /// entity is already attached, is its own parent, or is an ancestor of
    /// `parent`.
    pub fn attach(&mut self, parent: Option<EntityId>, child: EntityId) -> UiResult<()> {
        if !self.entities.contains_key(&child) {
            return Err(UiError::EntityNotFound(child));
        }
        if self.is_attached(child) {
            return Err(UiError::tree(format!("{child} is already attached")));
        }

        let Some(parent) = parent else {
            self.roots.push(child);
            tracing::debug!(entity = %child, "attached as root");
            return Ok(());
        };

        if !self.entities.contains_key(&parent) {
            return Err(UiError::EntityNotFound(parent));
        }
        if parent == child {
            return Err(UiError::tree(format!("{child} cannot be its own parent")));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(UiError::tree(format!("attaching {child} under {parent} would form a cycle")));
        }

        if let Some(p) = self.entities.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.entities.get_mut(&child) {
            c.parent = Some(parent);
        }
        tracing::debug!(entity = %child, %parent, "attached");
        Ok(())
    }

    /// Detaches an entity (and its subtree) from its parent or the root list.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids; `InvalidTreeOperation` when the
    /// entity is not attached.
    pub fn detach(&mut self, id: EntityId) -> UiResult<()> {
        let parent = self.entities.get(&id).ok_or(UiError::EntityNotFound(id))?.parent;
        match parent {
            Some(parent) => {
                if let Some(p) = self.entities.get_mut(&parent) {
                    p.children.retain(|&c| c != id);
                }
                if let Some(e) = self.entities.get_mut(&id) {
                    e.parent = None;
                }
            }
            None => {
                let before = self.roots.len();
                self.roots.retain(|&r| r != id);
                if self.roots.len() == before {
                    return Err(UiError::tree(format!("{id} is not attached")));
                }
            }
        }
        tracing::debug!(entity = %id, "detached");
        Ok(())
    }

    /// Removes an entity and all its descendants.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` for unknown ids.
    pub fn remove(&mut self, id: EntityId) -> UiResult<Entity> {
        if !self.entities.contains_key(&id) {
            return Err(UiError::EntityNotFound(id));
        }
        if self.is_attached(id) {
            self.detach(id)?;
        }

        let mut stack: Vec<EntityId> = self.children(id).to_vec();
        while let Some(next) = stack.pop() {
            if let Some(e) = self.entities.remove(&next) {
                stack.extend(e.children);
            }
        }
        let mut entity = self.entities.remove(&id).ok_or(UiError::EntityNotFound(id))?;
        entity.children.clear();
        tracing::debug!(entity = %id, "removed");
        Ok(entity)
    }

    /// Gets an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Gets mutable access to an entity.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Whether the id is alive.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true when the tree holds no entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the children of an entity.
    #[must_use]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities.get(&id).map_or(&[], |e| e.children.as_slice())
    }

    /// Parent of an entity.
    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|e| e.parent)
    }

    /// Returns all root entities.
    #[must_use]
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Whether the entity has a parent or is a root.
    #[must_use]
    pub fn is_attached(&self, id: EntityId) -> bool {
        self.parent(id).is_some() || self.roots.contains(&id)
    }

    /// Whether the entity is reachable from a root, and therefore live.
    #[must_use]
    pub fn is_reachable(&self, id: EntityId) -> bool {
        let top = self.ancestors(id).last().unwrap_or(id);
        self.contains(id) && self.roots.contains(&top)
    }

    /// Walks the parent chain, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Returns every reachable entity in depth-first (draw) order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.subtree(&self.roots)
    }

    /// Depth-first walk starting from the given entities.
    pub fn subtree<'a>(&'a self, start: &[EntityId]) -> impl Iterator<Item = EntityId> + 'a {
        DfsIter {
            tree: self,
            stack: start.iter().rev().copied().collect(),
        }
    }

    /// Returns every reachable entity in reverse draw order (for hit testing).
    pub fn iter_reverse(&self) -> impl Iterator<Item = EntityId> + '_ {
        let all: Vec<_> = self.iter_dfs().collect();
        all.into_iter().rev()
    }

    /// Iterates over every live entity, attached or not, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Finds the first reachable entity with this identifier, in draw order.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<EntityId> {
        self.iter_dfs()
            .find(|id| self.get(*id).is_some_and(|e| e.identifier == identifier))
    }

    /// Finds the first entity with this identifier below `root`.
    #[must_use]
    pub fn find_in(&self, root: EntityId, identifier: &str) -> Option<EntityId> {
        self.subtree(self.children(root))
            .find(|id| self.get(*id).is_some_and(|e| e.identifier == identifier))
    }
}

impl Default for EntityTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over the entity tree.
struct DfsIter<'a> {
    tree: &'a EntityTree,
    stack: Vec<EntityId>,
}

impl Iterator for DfsIter<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // children pushed reversed so they pop left-to-right
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }

        Some(id)
    }
}
