// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-field projection decisions.
//!
//! [`FieldProjector::project`] is a pure function from one entity field to a
//! [`ProjectionDecision`]. The DTO synthesizer turns decisions into fields;
//! the converter synthesizer turns the same decisions into copy statements,
//! so both sides always agree on what a DTO contains.
//!
//! # Rules
//!
//! | Precedence | Condition | Decision |
//! |------------|-----------|----------|
//! | 0 | static field while `skipStaticFields` | skip |
//! | 1 | `DtoExclude` | skip |
//! | 2 | relation annotation | complex (target override wins) |
//! | 3 | complex without `DtoInclude` | skip |
//! | 4 | simple | include as-is |
//! | 5 | collection of relations | include, narrowed to element DTO |
//!
//! `DtoInclude(ID)` on a single relation renames the field to `<name>Id`
//! and types it with the related entity's key type. Collections ignore the
//! mode and are always projected as DTO collections.

use tracing::warn;

use crate::{
    classify::{Classifier, CollectionKind, TypeClass},
    meta::{AnnotationValue, EntityMeta, FieldMeta, TypeRef, markers},
    naming
};

/// How a related entity is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationMode {
    /// Only the related entity's key.
    Id,
    /// The full related DTO.
    #[default]
    Dto
}

impl AggregationMode {
    /// Mode named by an include annotation value.
    ///
    /// Accepts `ID` / `DTO` with or without an enum qualifier, in any case.
    /// Anything else is [`AggregationMode::Dto`].
    pub fn from_value(value: &AnnotationValue) -> Self {
        match value.as_constant() {
            Some(constant) if constant.eq_ignore_ascii_case("id") => Self::Id,
            _ => Self::Dto
        }
    }
}

/// Why a field was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Static field while static fields are skipped.
    StaticField,
    /// Explicit `DtoExclude`.
    Excluded,
    /// Complex field without `DtoInclude`.
    NotIncluded,
    /// Type could not be classified.
    Unresolved
}

/// Shape of an included field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// Copied with its declared type.
    AsIs,
    /// Key of the related entity.
    ForeignKey,
    /// Related DTO.
    Nested,
    /// Collection of related DTOs.
    NestedCollection(CollectionKind)
}

/// Included field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// DTO field name.
    pub name:         String,
    /// DTO field type.
    pub ty:           TypeRef,
    /// Shape.
    pub kind:         ProjectionKind,
    /// Aggregation mode of complex fields; `None` for simple ones.
    pub mode:         Option<AggregationMode>,
    /// Name of the entity field it comes from.
    pub source_field: String,
    /// Related entity for foreign keys.
    pub related:      Option<TypeRef>
}

impl Projection {
    /// Whether only the related key is projected.
    pub fn as_foreign_key(&self) -> bool {
        self.kind == ProjectionKind::ForeignKey
    }

    /// Whether the field needs conversion.
    pub fn is_complex(&self) -> bool {
        self.mode.is_some()
    }
}

/// Outcome of projecting one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionDecision {
    /// Field is not part of the DTO.
    Skip(SkipReason),
    /// Field is part of the DTO.
    Include(Projection)
}

impl ProjectionDecision {
    /// Included projection, if any.
    pub fn projection(&self) -> Option<&Projection> {
        match self {
            Self::Include(projection) => Some(projection),
            Self::Skip(_) => None
        }
    }

    /// Whether the field is skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Applies the projection rules.
#[derive(Clone, Copy)]
pub struct FieldProjector<'a> {
    classifier: Classifier<'a>
}

impl<'a> FieldProjector<'a> {
    /// Create a projector.
    pub fn new(classifier: Classifier<'a>) -> Self {
        Self {
            classifier
        }
    }

    /// Decide how `field` of `entity` appears in the DTO.
    pub fn project(&self, field: &FieldMeta, entity: &EntityMeta) -> ProjectionDecision {
        let config = self.classifier.config();
        if config.skip_static_fields && field.modifiers.is_static {
            return ProjectionDecision::Skip(SkipReason::StaticField);
        }
        if field.has_annotation(markers::DTO_EXCLUDE) {
            return ProjectionDecision::Skip(SkipReason::Excluded);
        }

        let relation = field
            .annotations
            .iter()
            .find(|annotation| markers::is_relation(annotation));
        let target = relation
            .and_then(|annotation| annotation.get("targetEntity"))
            .and_then(AnnotationValue::as_type)
            .map(|ty| ty.qualified_in(entity.package()));
        let class = self.classifier.classify(&field.ty, entity);

        let complex = match &class {
            _ if relation.is_some() => true,
            TypeClass::Simple => false,
            TypeClass::Collection {
                element, ..
            } => element.as_ref().is_some_and(|element| {
                !matches!(
                    self.classifier.classify(element, entity),
                    TypeClass::Simple | TypeClass::Unresolved
                )
            }),
            TypeClass::Relation(_) => true,
            TypeClass::Unresolved => return ProjectionDecision::Skip(SkipReason::Unresolved)
        };

        if !complex {
            return ProjectionDecision::Include(Projection {
                name:         field.name.clone(),
                ty:           field.ty.clone(),
                kind:         ProjectionKind::AsIs,
                mode:         None,
                source_field: field.name.clone(),
                related:      None
            });
        }

        let Some(include) = field.annotation(markers::DTO_INCLUDE) else {
            return ProjectionDecision::Skip(SkipReason::NotIncluded);
        };
        let mode = include
            .value()
            .map(AggregationMode::from_value)
            .unwrap_or_default();

        if let TypeClass::Collection {
            kind,
            element
        } = class
        {
            let Some(element) = target.or(element) else {
                return ProjectionDecision::Skip(SkipReason::Unresolved);
            };
            return ProjectionDecision::Include(Projection {
                name:         field.name.clone(),
                ty:           TypeRef::generic(field.ty.name.clone(), [self
                    .classifier
                    .dto_type(&element)]),
                kind:         ProjectionKind::NestedCollection(kind),
                mode:         Some(AggregationMode::Dto),
                source_field: field.name.clone(),
                related:      Some(element)
            });
        }

        let related = target.unwrap_or_else(|| field.ty.clone());
        match mode {
            AggregationMode::Id => ProjectionDecision::Include(Projection {
                name:         format!("{}Id", field.name),
                ty:           self.key_type(&related, entity, field),
                kind:         ProjectionKind::ForeignKey,
                mode:         Some(mode),
                source_field: field.name.clone(),
                related:      Some(related)
            }),
            AggregationMode::Dto => ProjectionDecision::Include(Projection {
                name:         field.name.clone(),
                ty:           self.classifier.dto_type(&related),
                kind:         ProjectionKind::Nested,
                mode:         Some(mode),
                source_field: field.name.clone(),
                related:      Some(related)
            })
        }
    }

    /// Name of the related entity's key field, `id` when unknown.
    pub fn key_field_name(&self, related: &TypeRef) -> String {
        let provider = self.classifier.provider();
        provider
            .class_by_name(&related.name)
            .and_then(|class| provider.primary_key(class))
            .map_or_else(|| "id".to_string(), |key| key.name.clone())
    }

    fn key_type(&self, related: &TypeRef, entity: &EntityMeta, field: &FieldMeta) -> TypeRef {
        let provider = self.classifier.provider();
        let key = provider
            .class_by_name(&related.name)
            .and_then(|class| provider.primary_key(class));
        match key {
            Some(key) => key.ty.clone(),
            None => {
                let fallback = &self.classifier.config().default_key_type;
                warn!(
                    entity = %entity.name,
                    field = %field.name,
                    related = %related,
                    fallback = %fallback,
                    "related entity has no key field, using default key type"
                );
                TypeRef::new(fallback.clone())
            }
        }
    }
}

/// Convenience wrapper over [`naming::getter_name`] for a projection's
/// source field.
pub fn source_getter(projection: &Projection) -> String {
    naming::getter_name(&projection.source_field)
}

/// Convenience wrapper over [`naming::setter_name`] for a projection's DTO
/// field.
pub fn target_setter(projection: &Projection) -> String {
    naming::setter_name(&projection.name)
}
