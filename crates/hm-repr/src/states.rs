use std::collections::HashMap;

use hm_core::{NodeId, StateId};

/// What a state node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// The single state of a physical node.
    Physical(NodeId),
    /// A feature node entered from a given state.
    Feature {
        /// Feature node id.
        feature: NodeId,
        /// State the walk arrived from.
        source: StateId,
    },
}

impl StateKey {
    /// Node the state belongs to (the feature id for feature states).
    pub fn node_id(&self) -> NodeId {
        match self {
            StateKey::Physical(node) => *node,
            StateKey::Feature { feature, .. } => *feature,
        }
    }
}

/// First-come-first-served state id allocator. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct StateIdAllocator {
    ids: HashMap<StateKey, StateId>,
    keys: Vec<StateKey>,
}

impl StateIdAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `key`, allocating the next one on first sight.
    /// The flag is true when the id was just allocated.
    pub fn get_or_insert(&mut self, key: StateKey) -> (StateId, bool) {
        if let Some(id) = self.ids.get(&key) {
            return (*id, false);
        }
        self.keys.push(key);
        let id = StateId::from_raw(self.keys.len() as u64);
        self.ids.insert(key, id);
        (id, true)
    }

    /// Id previously allocated to `key`.
    pub fn get(&self, key: &StateKey) -> Option<StateId> {
        self.ids.get(key).copied()
    }

    /// Key an id was allocated to.
    pub fn key_of(&self, id: StateId) -> Option<StateKey> {
        let index = usize::try_from(id.as_raw()).ok()?.checked_sub(1)?;
        self.keys.get(index).copied()
    }

    /// Number of allocated ids.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing was allocated yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_stable() {
        let mut alloc = StateIdAllocator::new();
        let a = StateKey::Physical(NodeId::from_raw(7));
        let b = StateKey::Physical(NodeId::from_raw(3));
        assert_eq!(alloc.get_or_insert(a), (StateId::from_raw(1), true));
        assert_eq!(alloc.get_or_insert(b), (StateId::from_raw(2), true));
        assert_eq!(alloc.get_or_insert(a), (StateId::from_raw(1), false));

        let f = StateKey::Feature {
            feature: NodeId::from_raw(10),
            source: StateId::from_raw(2),
        };
        assert_eq!(alloc.get_or_insert(f).0, StateId::from_raw(3));
        assert_eq!(alloc.key_of(StateId::from_raw(3)), Some(f));
        assert_eq!(alloc.key_of(StateId::from_raw(0)), None);
        assert_eq!(alloc.len(), 3);
        assert_eq!(f.node_id(), NodeId::from_raw(10));
    }
}
