//! Slot Registry - Per-class mapping from slot name to definition.
//!
//! Each component class owns one registry. Deriving a class copies the
//! parent's registry by value (definitions share their `Rc` renderables),
//! so slots declared on one branch of a hierarchy never appear on a sibling.
//!
//! Collection slots also register their singular alias. An alias that
//! collides with a slot name or with another alias is a declaration error.

use std::fmt;

use indexmap::IndexMap;

use crate::error::DeclarationError;

use super::definition::SlotDefinition;

pub struct SlotRegistry<T> {
    /// Slot name → definition, in declaration order.
    slots: IndexMap<String, SlotDefinition<T>>,

    /// Singular alias → collection slot name.
    aliases: IndexMap<String, String>,
}

impl<T> SlotRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }

    /// Register a definition, replacing any slot of the same name.
    pub(crate) fn define(&mut self, definition: SlotDefinition<T>) -> Result<(), DeclarationError> {
        let name = definition.name().to_string();

        if let Some(owner) = self.aliases.get(&name) {
            if *owner != name {
                return Err(DeclarationError::AliasCollision {
                    alias: name.clone(),
                    slot: owner.clone(),
                    existing: name,
                });
            }
        }

        if let Some(alias) = definition.singular() {
            let existing = if alias == name || self.slots.contains_key(alias) {
                Some(alias.to_string())
            } else {
                self.aliases
                    .get(alias)
                    .filter(|owner| **owner != name)
                    .cloned()
            };
            if let Some(existing) = existing {
                return Err(DeclarationError::AliasCollision {
                    alias: alias.to_string(),
                    slot: name,
                    existing,
                });
            }
        }

        // Redefinition drops the alias of the previous definition
        if let Some(previous) = self.slots.get(&name) {
            if let Some(alias) = previous.singular() {
                self.aliases.shift_remove(alias);
            }
        }

        if let Some(alias) = definition.singular() {
            self.aliases.insert(alias.to_string(), name.clone());
        }
        self.slots.insert(name, definition);
        Ok(())
    }

    /// Definition registered under exactly this slot name.
    pub fn get(&self, name: &str) -> Option<&SlotDefinition<T>> {
        self.slots.get(name)
    }

    /// Definition for a slot name or a singular alias.
    pub fn resolve(&self, name: &str) -> Option<&SlotDefinition<T>> {
        match self.slots.get(name) {
            Some(definition) => Some(definition),
            None => self
                .aliases
                .get(name)
                .and_then(|owner| self.slots.get(owner)),
        }
    }

    /// True when `name` is the singular alias of a collection slot.
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name) && !self.slots.contains_key(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Slot names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &SlotDefinition<T>> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for SlotRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shallow copy: definitions are cloned, renderables share their `Rc`s.
impl<T> Clone for SlotRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            aliases: self.aliases.clone(),
        }
    }
}

impl<T> fmt::Debug for SlotRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotRegistry")
            .field("slots", &self.slots.values().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Registry = SlotRegistry<Vec<String>>;

    #[test]
    fn test_define_and_resolve() {
        let mut registry = Registry::new();
        registry.define(SlotDefinition::one("title", ())).unwrap();
        registry
            .define(SlotDefinition::many("cars", "car", ()))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["title", "cars"]);

        assert_eq!(registry.resolve("car").map(SlotDefinition::name), Some("cars"));
        assert_eq!(registry.resolve("cars").map(SlotDefinition::name), Some("cars"));
        assert!(registry.get("car").is_none());
        assert!(registry.is_alias("car"));
        assert!(!registry.is_alias("cars"));
        assert!(registry.resolve("bike").is_none());
    }

    #[test]
    fn test_alias_collides_with_slot() {
        let mut registry = Registry::new();
        registry.define(SlotDefinition::one("item", ())).unwrap();

        let err = registry
            .define(SlotDefinition::many("items", "item", ()))
            .unwrap_err();
        assert_eq!(
            err,
            DeclarationError::AliasCollision {
                alias: "item".into(),
                slot: "items".into(),
                existing: "item".into(),
            }
        );
    }

    #[test]
    fn test_slot_collides_with_alias() {
        let mut registry = Registry::new();
        registry
            .define(SlotDefinition::many("items", "item", ()))
            .unwrap();

        let err = registry.define(SlotDefinition::one("item", ())).unwrap_err();
        assert!(matches!(err, DeclarationError::AliasCollision { slot, .. } if slot == "items"));
    }

    #[test]
    fn test_alias_equal_to_plural() {
        let mut registry = Registry::new();
        let err = registry
            .define(SlotDefinition::many("fish", "fish", ()))
            .unwrap_err();
        assert!(matches!(err, DeclarationError::AliasCollision { .. }));
    }

    #[test]
    fn test_redefine_replaces_alias() {
        let mut registry = Registry::new();
        registry
            .define(SlotDefinition::many("people", "person", ()))
            .unwrap();
        registry
            .define(SlotDefinition::many("people", "human", ()))
            .unwrap();

        assert!(!registry.is_alias("person"));
        assert!(registry.is_alias("human"));

        // Same alias for the same slot is fine
        registry
            .define(SlotDefinition::many("people", "human", ()))
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut parent = Registry::new();
        parent.define(SlotDefinition::one("title", ())).unwrap();

        let mut child = parent.clone();
        child.define(SlotDefinition::one("footer", ())).unwrap();
        parent.define(SlotDefinition::one("header", ())).unwrap();

        assert!(child.contains("footer"));
        assert!(!child.contains("header"));
        assert!(parent.contains("header"));
        assert!(!parent.contains("footer"));
    }
}
