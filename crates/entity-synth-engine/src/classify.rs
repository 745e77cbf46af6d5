// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type classification.
//!
//! Every field, method parameter and return type passes through here
//! before projection. The verdict decides whether the type is copied as-is,
//! narrowed element-wise, or replaced by a generated DTO.
//!
//! # Order
//!
//! | Check | Verdict |
//! |-------|---------|
//! | representable, enum, `java.lang.*`, type variable | [`TypeClass::Simple`] |
//! | known collection | [`TypeClass::Collection`] |
//! | class with the entity marker | [`TypeClass::Relation`] (`Entity`) |
//! | DTO-family name or package | [`TypeClass::Relation`] (`Dto`) |
//! | anything else | [`TypeClass::Unresolved`] |
//!
//! A collection of entities is therefore a collection with a relation
//! element, never a relation itself.

mod standard;

pub use standard::StandardTypes;

use crate::{
    config::GeneratorConfig,
    meta::{ClassKind, EntityMeta, MetadataProvider, TypeRef},
    naming
};

/// Kind of a collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Ordered sequence.
    List,
    /// Unique set.
    Set,
    /// Unordered collection without further guarantees.
    Bag
}

impl CollectionKind {
    /// Interface type of the kind.
    pub const fn interface_name(self) -> &'static str {
        match self {
            Self::List => "java.util.List",
            Self::Set => "java.util.Set",
            Self::Bag => "java.util.Collection"
        }
    }

    /// Concrete type used for default initializers.
    pub const fn default_impl(self) -> &'static str {
        match self {
            Self::List => "java.util.ArrayList",
            Self::Set | Self::Bag => "java.util.HashSet"
        }
    }
}

/// What a relation type points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationTarget {
    /// Another entity; it is replaced by its DTO.
    Entity,
    /// Already a DTO-family type; it is kept.
    Dto
}

/// Classification verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    /// Copied without transformation.
    Simple,

    /// Collection; `element` is the sole type argument when present.
    Collection {
        /// Collection kind.
        kind:    CollectionKind,
        /// Element type, `None` for raw collections.
        element: Option<TypeRef>
    },

    /// Generated-entity or DTO type.
    Relation(RelationTarget),

    /// None of the above.
    Unresolved
}

/// Answers "is this name a representable target type?" and "is it a
/// collection?".
pub trait TypeResolver: Send + Sync {
    /// Whether `name` maps 1:1 onto a target type.
    fn is_representable(&self, name: &str) -> bool;

    /// Collection kind of `name`, if it is one.
    fn collection_kind(&self, name: &str) -> Option<CollectionKind>;
}

/// Classifier bound to one run's provider, resolver and configuration.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    provider: &'a dyn MetadataProvider,
    resolver: &'a dyn TypeResolver,
    config:   &'a GeneratorConfig
}

impl<'a> Classifier<'a> {
    /// Create a classifier.
    pub fn new(
        provider: &'a dyn MetadataProvider,
        resolver: &'a dyn TypeResolver,
        config: &'a GeneratorConfig
    ) -> Self {
        Self {
            provider,
            resolver,
            config
        }
    }

    /// Metadata provider of this run.
    pub fn provider(&self) -> &'a dyn MetadataProvider {
        self.provider
    }

    /// Type resolver of this run.
    pub fn resolver(&self) -> &'a dyn TypeResolver {
        self.resolver
    }

    /// Configuration of this run.
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Classify `ty` as seen from `context`.
    pub fn classify(&self, ty: &TypeRef, context: &EntityMeta) -> TypeClass {
        if self.is_simple(ty, context) {
            return TypeClass::Simple;
        }
        if let Some(kind) = self.resolver.collection_kind(&ty.name) {
            let element = match ty.args.as_slice() {
                [element] => Some(element.clone()),
                _ => None
            };
            return TypeClass::Collection {
                kind,
                element
            };
        }
        if self.is_entity_type(&ty.name) {
            return TypeClass::Relation(RelationTarget::Entity);
        }
        if self.is_dto_type(&ty.name) {
            return TypeClass::Relation(RelationTarget::Dto);
        }
        TypeClass::Unresolved
    }

    /// Simple-type test.
    pub fn is_simple(&self, ty: &TypeRef, context: &EntityMeta) -> bool {
        context.has_type_param(&ty.name)
            || self.resolver.is_representable(&ty.name)
            || ty.name.starts_with("java.lang.")
            || self
                .provider
                .class_by_name(&ty.name)
                .is_some_and(|class| class.kind == ClassKind::Enum)
    }

    /// Whether `name` is a class carrying the entity marker.
    pub fn is_entity_type(&self, name: &str) -> bool {
        self.provider
            .class_by_name(name)
            .is_some_and(EntityMeta::is_entity)
    }

    /// Whether `name` is a DTO-family name.
    ///
    /// Matches the DTO postfix or prefix while affixes are enabled, and
    /// membership in the DTO package. Empty affixes never match.
    pub fn is_dto_type(&self, name: &str) -> bool {
        let affixes = self.config.dto_affixes();
        if !self.config.disable_affixes_attach
            && ((!affixes.postfix.is_empty() && name.ends_with(&affixes.postfix))
                || (!affixes.prefix.is_empty()
                    && naming::simple_name(name).starts_with(&affixes.prefix)))
        {
            return true;
        }
        let package = &self.config.dto_package;
        !package.is_empty()
            && name
                .strip_prefix(package.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// DTO counterpart of an entity type, arguments dropped.
    pub fn dto_type(&self, ty: &TypeRef) -> TypeRef {
        if self.is_dto_type(&ty.name) {
            return ty.erasure();
        }
        TypeRef {
            name:  self.config.dto_name(&ty.name),
            args:  Vec::new(),
            array: ty.array
        }
    }

    /// Target type of a source type, or `None` if it cannot be represented.
    ///
    /// Entities become their DTOs, recursively through type arguments. A
    /// collection whose arguments do not all convert falls back to its raw
    /// type.
    pub fn convert_type(&self, ty: &TypeRef, context: &EntityMeta) -> Option<TypeRef> {
        match self.classify(ty, context) {
            TypeClass::Simple | TypeClass::Relation(RelationTarget::Dto) => Some(ty.clone()),
            TypeClass::Collection {
                ..
            } => Some(
                self.convert_args(ty, context)
                    .map_or_else(|| ty.erasure(), |args| TypeRef {
                        name: ty.name.clone(),
                        args,
                        array: ty.array
                    })
            ),
            TypeClass::Relation(RelationTarget::Entity) => {
                let mut dto = self.dto_type(ty);
                dto.args = self.convert_args(ty, context).unwrap_or_default();
                Some(dto)
            }
            TypeClass::Unresolved => None
        }
    }

    fn convert_args(&self, ty: &TypeRef, context: &EntityMeta) -> Option<Vec<TypeRef>> {
        ty.args
            .iter()
            .map(|arg| self.convert_type(arg, context))
            .collect()
    }
}
