// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dispatch index over a finished converter class.
//!
//! Maps the erased parameter type of every `convertToDto` overload to the
//! overload's signature. The generic entrypoint (parameter type `Object`)
//! is not indexed. The index is built once, after all entities are
//! synthesized, and is read-only afterwards.
//!
//! ```text
//! convertToDto(Object)        -- entrypoint, not indexed
//! convertToDto(a.User)        -- "a.User"  → "convertToDto(a.User)"
//! convertToDto(a.Order)       -- "a.Order" → "convertToDto(a.Order)"
//! ```

use std::collections::BTreeMap;

use entity_synth_core::ConversionError;

use super::converter::ENTRYPOINT;
use crate::artifact::ArtifactClass;

/// Overloads of one converter class by parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchIndex {
    class:   String,
    entries: BTreeMap<String, String>
}

impl DispatchIndex {
    /// Index the single-parameter `convertToDto` overloads of `converter`,
    /// leaving out the one taking `object_type`.
    pub fn build(converter: &ArtifactClass, object_type: &str) -> Self {
        let entries = converter
            .methods_named(ENTRYPOINT)
            .filter_map(|method| match method.params.as_slice() {
                [param] if param.ty.name != object_type => {
                    Some((param.ty.erasure().to_string(), method.signature()))
                }
                _ => None
            })
            .collect();
        Self {
            class: converter.name.clone(),
            entries
        }
    }

    /// Signature of the overload handling `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MethodNotFound`] when no overload takes
    /// `type_name`.
    pub fn lookup(&self, type_name: &str) -> Result<&str, ConversionError> {
        self.entries
            .get(type_name)
            .map(String::as_str)
            .ok_or_else(|| ConversionError::not_found(type_name))
    }

    /// Whether `type_name` has an overload.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Name of the indexed converter class.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Number of indexed overloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no overload is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(type, signature)` pairs in type order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(ty, signature)| (ty.as_str(), signature.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        artifact::{ArtifactKind, ArtifactMethod, ArtifactParam},
        meta::TypeRef
    };

    fn converter() -> ArtifactClass {
        let mut class = ArtifactClass::new("a.dto.Converter", ArtifactKind::Class);
        for ty in ["java.lang.Object", "a.User", "a.Order"] {
            class.methods.push(
                ArtifactMethod::new(ENTRYPOINT).param(ArtifactParam::new("value", TypeRef::new(ty)))
            );
        }
        class.methods.push(
            ArtifactMethod::new("convertToDtoList")
                .param(ArtifactParam::new("records", TypeRef::new("java.util.Collection")))
        );
        class
            .methods
            .push(ArtifactMethod::new(ENTRYPOINT).param(ArtifactParam::new(
                "value",
                TypeRef::generic("a.Box", [TypeRef::new("a.User")])
            )));
        class
    }

    #[test]
    fn indexes_typed_overloads_only() {
        let index = DispatchIndex::build(&converter(), "java.lang.Object");
        assert_eq!(index.class(), "a.dto.Converter");
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("a.User"), Ok("convertToDto(a.User)"));
        assert_eq!(index.lookup("a.Box"), Ok("convertToDto(a.Box<a.User>)"));
        assert!(!index.contains("java.lang.Object"));
        assert_eq!(
            index.iter().map(|(ty, _)| ty).collect::<Vec<_>>(),
            ["a.Box", "a.Order", "a.User"]
        );
    }

    #[test]
    fn miss_reports_type_name() {
        let index = DispatchIndex::build(&converter(), "java.lang.Object");
        let err = index.lookup("a.Unknown").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Conversion method not found: a.Unknown");
    }

    #[test]
    fn empty_converter() {
        let class = ArtifactClass::new("a.dto.Converter", ArtifactKind::Class);
        assert!(DispatchIndex::build(&class, "java.lang.Object").is_empty());
    }
}
