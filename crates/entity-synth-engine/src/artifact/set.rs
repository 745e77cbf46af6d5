// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Name-unique artifact collection.

use std::collections::BTreeMap;

use super::ArtifactClass;
use crate::error::{GenerationError, Result};

/// Finished artifacts keyed by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<String, ArtifactClass>
}

impl ArtifactSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::DuplicateArtifact`] if an artifact with
    /// the same name is already present.
    pub fn insert(&mut self, artifact: ArtifactClass) -> Result<()> {
        if self.artifacts.contains_key(&artifact.name) {
            return Err(GenerationError::DuplicateArtifact {
                name: artifact.name
            });
        }
        self.artifacts.insert(artifact.name.clone(), artifact);
        Ok(())
    }

    /// Artifact by name.
    pub fn get(&self, name: &str) -> Option<&ArtifactClass> {
        self.artifacts.get(name)
    }

    /// Whether an artifact named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    /// Whether `name` or one of its artifact supertypes declares `method`.
    ///
    /// Walks `extends` through artifacts of this set only.
    pub fn has_method_in_hierarchy(&self, name: &str, method: &str) -> bool {
        let mut next = self.get(name);
        let mut steps = 0;
        while let Some(artifact) = next {
            if artifact.has_method(method) {
                return true;
            }
            steps += 1;
            if steps > self.artifacts.len() {
                break;
            }
            next = artifact
                .extends
                .as_ref()
                .and_then(|parent| self.get(&parent.name));
        }
        false
    }

    /// Artifacts in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactClass> {
        self.artifacts.values()
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for ArtifactSet {
    type Item = ArtifactClass;
    type IntoIter = std::collections::btree_map::IntoValues<String, ArtifactClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        artifact::{ArtifactKind, ArtifactMethod},
        meta::TypeRef
    };

    #[test]
    fn duplicate_names_rejected() {
        let mut set = ArtifactSet::new();
        set.insert(ArtifactClass::new("a.B", ArtifactKind::Class))
            .unwrap();
        let err = set
            .insert(ArtifactClass::new("a.B", ArtifactKind::Interface))
            .unwrap_err();
        assert!(matches!(err, GenerationError::DuplicateArtifact { name } if name == "a.B"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn hierarchy_method_lookup() {
        let mut base = ArtifactClass::new("a.BaseDTO", ArtifactKind::Class);
        base.methods.push(ArtifactMethod::new("setId"));
        let mut leaf = ArtifactClass::new("a.LeafDTO", ArtifactKind::Class);
        leaf.extends = Some(TypeRef::new("a.BaseDTO"));

        let mut set = ArtifactSet::new();
        set.insert(base).unwrap();
        set.insert(leaf).unwrap();
        assert!(set.has_method_in_hierarchy("a.LeafDTO", "setId"));
        assert!(!set.has_method_in_hierarchy("a.LeafDTO", "setName"));
        assert!(!set.has_method_in_hierarchy("a.Missing", "setId"));
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut set = ArtifactSet::new();
        set.insert(ArtifactClass::new("b.Z", ArtifactKind::Class))
            .unwrap();
        set.insert(ArtifactClass::new("a.Y", ArtifactKind::Class))
            .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["a.Y", "b.Z"]);
    }
}
