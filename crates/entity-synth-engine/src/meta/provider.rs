// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata provider seam.
//!
//! The engine asks two questions of the outside world: "describe the class
//! with this name" and "list every class you know". Everything else
//! (supertype walks, descendant checks, key discovery) is derived from those
//! two through provided trait methods.

use std::collections::{BTreeMap, HashSet};

use super::{EntityMeta, FieldMeta};

/// Source of reflected class descriptions.
///
/// Implementations must be shareable across worker threads.
pub trait MetadataProvider: Send + Sync {
    /// Class by fully-qualified name.
    fn class_by_name(&self, name: &str) -> Option<&EntityMeta>;

    /// Every class the provider knows.
    fn all_known_classes(&self) -> Vec<&EntityMeta>;

    /// Direct supertype, if the provider knows it.
    fn superclass(&self, class: &EntityMeta) -> Option<&EntityMeta> {
        class
            .supertype
            .as_ref()
            .and_then(|supertype| self.class_by_name(&supertype.name))
    }

    /// Known ancestors, nearest first.
    ///
    /// Stops at the first unknown supertype and at the first repeated name,
    /// so a cyclic hierarchy yields a finite chain.
    fn ancestors<'a>(&'a self, class: &EntityMeta) -> Vec<&'a EntityMeta> {
        let mut seen = HashSet::from([class.name.as_str()]);
        let mut chain: Vec<&'a EntityMeta> = Vec::new();
        let mut next = class
            .supertype
            .as_ref()
            .and_then(|supertype| self.class_by_name(&supertype.name));
        while let Some(parent) = next {
            if !seen.insert(parent.name.as_str()) {
                break;
            }
            chain.push(parent);
            next = self.superclass(parent);
        }
        chain
    }

    /// Whether any other known class has `class` among its ancestors.
    fn has_descendants(&self, class: &EntityMeta) -> bool {
        self.all_known_classes().into_iter().any(|candidate| {
            candidate.name != class.name
                && self
                    .ancestors(candidate)
                    .iter()
                    .any(|ancestor| ancestor.name == class.name)
        })
    }

    /// Primary-key field of `class`, searching the supertype chain.
    fn primary_key<'a>(&'a self, class: &'a EntityMeta) -> Option<&'a FieldMeta> {
        class.fields.iter().find(|field| field.is_id()).or_else(|| {
            self.ancestors(class)
                .into_iter()
                .find_map(|ancestor| ancestor.fields.iter().find(|field| field.is_id()))
        })
    }

    /// Whether `class` or an ancestor declares a public method `name`.
    fn has_public_method(&self, class: &EntityMeta, name: &str) -> bool {
        class.public_method(name).is_some()
            || self
                .ancestors(class)
                .iter()
                .any(|ancestor| ancestor.public_method(name).is_some())
    }
}

/// Provider over an in-memory class map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryProvider {
    classes: BTreeMap<String, EntityMeta>
}

impl InMemoryProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any class with the same name.
    pub fn insert(&mut self, class: EntityMeta) -> Option<EntityMeta> {
        self.classes.insert(class.name.clone(), class)
    }

    /// Add a class (builder form).
    #[must_use]
    pub fn with(mut self, class: EntityMeta) -> Self {
        self.insert(class);
        self
    }

    /// Mutable access to a class.
    pub fn class_mut(&mut self, name: &str) -> Option<&mut EntityMeta> {
        self.classes.get_mut(name)
    }

    /// Names of all classes, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is known.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<EntityMeta> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = EntityMeta>>(iter: I) -> Self {
        let mut provider = Self::new();
        for class in iter {
            provider.insert(class);
        }
        provider
    }
}

impl Extend<EntityMeta> for InMemoryProvider {
    fn extend<I: IntoIterator<Item = EntityMeta>>(&mut self, iter: I) {
        for class in iter {
            self.insert(class);
        }
    }
}

impl MetadataProvider for InMemoryProvider {
    fn class_by_name(&self, name: &str) -> Option<&EntityMeta> {
        self.classes.get(name)
    }

    fn all_known_classes(&self) -> Vec<&EntityMeta> {
        self.classes.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{AnnotationMeta, MethodMeta, TypeRef};

    fn hierarchy() -> InMemoryProvider {
        [
            EntityMeta::new("a.Base")
                .abstract_class()
                .field(
                    FieldMeta::new("id", TypeRef::new("java.util.UUID"))
                        .annotated(AnnotationMeta::new("Id"))
                )
                .method(MethodMeta::getter("id", TypeRef::new("java.util.UUID"))),
            EntityMeta::new("a.Middle").extends(TypeRef::new("a.Base")),
            EntityMeta::new("a.Leaf").extends(TypeRef::new("a.Middle")),
            EntityMeta::new("a.Alone")
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn ancestors_nearest_first() {
        let provider = hierarchy();
        let leaf = provider.class_by_name("a.Leaf").unwrap();
        let names: Vec<_> = provider.ancestors(leaf).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a.Middle", "a.Base"]);
    }

    #[test]
    fn descendants() {
        let provider = hierarchy();
        let base = provider.class_by_name("a.Base").unwrap();
        let leaf = provider.class_by_name("a.Leaf").unwrap();
        let alone = provider.class_by_name("a.Alone").unwrap();
        assert!(provider.has_descendants(base));
        assert!(!provider.has_descendants(leaf));
        assert!(!provider.has_descendants(alone));
    }

    #[test]
    fn key_found_through_chain() {
        let provider = hierarchy();
        let leaf = provider.class_by_name("a.Leaf").unwrap();
        let key = provider.primary_key(leaf).unwrap();
        assert_eq!(key.ty, TypeRef::new("java.util.UUID"));
        assert!(provider.primary_key(provider.class_by_name("a.Alone").unwrap()).is_none());
    }

    #[test]
    fn inherited_public_method() {
        let provider = hierarchy();
        let leaf = provider.class_by_name("a.Leaf").unwrap();
        assert!(provider.has_public_method(leaf, "getId"));
        assert!(!provider.has_public_method(leaf, "getName"));
    }

    #[test]
    fn cyclic_chain_terminates() {
        let provider: InMemoryProvider = [
            EntityMeta::new("a.X").extends(TypeRef::new("a.Y")),
            EntityMeta::new("a.Y").extends(TypeRef::new("a.X"))
        ]
        .into_iter()
        .collect();
        let x = provider.class_by_name("a.X").unwrap();
        assert_eq!(provider.ancestors(x).len(), 1);
        assert!(provider.has_descendants(x));
    }
}
