//! Style identities.
//!
//! Resolved entries are handed to the host renderer, which registers them and
//! answers with an opaque handle. That handle keys the extension store.
//! [`StyleIdentities`] is the seam; [`StyleRegistry`] is an in-memory
//! allocator for hosts without one of their own (and for tests).

use std::collections::HashMap;
use std::fmt;

use crate::types::StyleRecord;

/// Opaque, host-assigned identity of a realized style entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(pub u32);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The host's style-identity allocator.
pub trait StyleIdentities {
    /// Registers a fully resolved entry and returns its identity.
    fn register(&mut self, name: &str, style: &StyleRecord) -> StyleId;
}

/// How [`StyleRegistry`] hands out identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Allocation {
    /// Every registration gets a new identity.
    #[default]
    Fresh,
    /// Re-registering a name keeps its identity and replaces the stored
    /// record, as when a live style update re-resolves the same entry.
    ByName,
}

/// In-memory identity allocator and style store.
///
/// # Example
///
/// ```
/// use xss::{record, StyleIdentities, StyleRegistry};
///
/// let mut registry = StyleRegistry::keyed_by_name();
/// let first = registry.register("button", &record! { "padding" => 4 });
/// let again = registry.register("button", &record! { "padding" => 8 });
/// assert_eq!(first, again);
/// assert_eq!(registry.get(first), Some(&record! { "padding" => 8 }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    allocation: Allocation,
    styles: Vec<StyleRecord>,
    by_name: HashMap<String, StyleId>,
}

impl StyleRegistry {
    /// A registry allocating a fresh identity per registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that reuses identities per entry name.
    pub fn keyed_by_name() -> Self {
        Self {
            allocation: Allocation::ByName,
            ..Self::default()
        }
    }

    pub fn allocation(&self) -> Allocation {
        self.allocation
    }

    /// The record registered under `id`.
    pub fn get(&self, id: StyleId) -> Option<&StyleRecord> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.styles.get(index)
    }

    /// The most recent identity registered for `name`.
    pub fn id_of(&self, name: &str) -> Option<StyleId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn allocate(&mut self, style: &StyleRecord) -> StyleId {
        self.styles.push(style.clone());
        // Identities start at 1.
        StyleId(self.styles.len() as u32)
    }
}

impl StyleIdentities for StyleRegistry {
    fn register(&mut self, name: &str, style: &StyleRecord) -> StyleId {
        if self.allocation == Allocation::ByName {
            if let Some(id) = self.by_name.get(name).copied() {
                let index = id.0 as usize - 1;
                self.styles[index] = style.clone();
                log::debug!("re-registered style `{}` as {}", name, id);
                return id;
            }
        }
        let id = self.allocate(style);
        self.by_name.insert(name.to_string(), id);
        log::debug!("registered style `{}` as {}", name, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_fresh_allocation_never_reuses() {
        let mut registry = StyleRegistry::new();
        let a = registry.register("button", &record! { "padding" => 4 });
        let b = registry.register("button", &record! { "padding" => 4 });
        assert_ne!(a, b);
        assert_eq!(registry.id_of("button"), Some(b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_identity() {
        let registry = StyleRegistry::new();
        assert_eq!(registry.get(StyleId(0)), None);
        assert_eq!(registry.get(StyleId(7)), None);
    }
}
