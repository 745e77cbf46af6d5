// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! DAO interface synthesis.
//!
//! | Entity | DAO supertype |
//! |--------|---------------|
//! | root | `JpaRepository<Entity, Key>` |
//! | root with descendants | `JpaRepository<T, Key>`, `T extends Entity` |
//! | child of an entity | `IParentDAO<Entity>` |
//!
//! Every query variant becomes one abstract method:
//!
//! ```text
//! @Query(value = "...", nativeQuery = true)   // native queries only
//! @Modifying @Transactional                    // when flagged
//! List<UserDTO> findByName(@Param("name") String name, Pageable pageable);
//! ```

use std::collections::HashSet;

use super::Synthesizer;
use crate::{
    artifact::{ArtifactClass, ArtifactKind, ArtifactMethod, ArtifactParam},
    error::{GenerationError, Result},
    meta::{AnnotationMeta, EntityMeta, Modifiers, TypeParam, TypeRef},
    query::{self, QuerySpec, QueryVariant}
};

/// Name of the generic parameter of DAOs whose entity has descendants.
const ENTITY_TYPE_PARAM: &str = "T";

/// Build the DAO of `entity`; `parent` is the DAO name of its entity
/// supertype.
///
/// # Errors
///
/// - [`GenerationError::MissingPrimaryKey`] for a keyless concrete entity
/// - [`GenerationError::DuplicateArtifact`] when two query variants share a
///   signature
pub(super) fn build(
    synth: &Synthesizer<'_>,
    entity: &EntityMeta,
    parent: Option<String>
) -> Result<ArtifactClass> {
    let classifier = synth.classifier;
    let config = classifier.config();
    let provider = classifier.provider();
    let repository = &config.repository;

    let key = match provider.primary_key(entity) {
        Some(key) => key.ty.clone(),
        None if entity.is_abstract => TypeRef::new(config.object_type.clone()),
        None => {
            return Err(GenerationError::MissingPrimaryKey {
                entity: entity.name.clone()
            });
        }
    };

    let mut class = ArtifactClass::new(config.dao_name(&entity.name), ArtifactKind::Interface);
    class.doc = entity.doc.clone();
    class
        .annotations
        .push(AnnotationMeta::new(repository.repository_annotation.clone()));

    let mut narrow = TypeRef::new(entity.name.clone());
    if provider.has_descendants(entity) {
        class
            .type_params
            .push(TypeParam::bounded(ENTITY_TYPE_PARAM, narrow));
        narrow = TypeRef::new(ENTITY_TYPE_PARAM);
    }
    class.extends = Some(match parent {
        Some(parent) => TypeRef::generic(parent, [narrow]),
        None => TypeRef::generic(repository.base_repository.clone(), [narrow, key])
    });

    let dto = TypeRef::new(config.dto_name(&entity.name));
    let mut signatures = HashSet::new();
    for spec in query::extract(&entity.annotations) {
        for variant in spec.variants() {
            let method = query_method(synth, &spec, variant, &dto);
            let signature = method.signature();
            if !signatures.insert(signature.clone()) {
                return Err(GenerationError::DuplicateArtifact {
                    name: format!("{}.{signature}", class.name)
                });
            }
            class.methods.push(method);
        }
    }

    Ok(class)
}

/// One DAO method for `variant` of `spec`.
fn query_method(
    synth: &Synthesizer<'_>,
    spec: &QuerySpec,
    variant: QueryVariant,
    dto: &TypeRef
) -> ArtifactMethod {
    let repository = &synth.classifier.config().repository;

    let mut method = ArtifactMethod::new(spec.name.clone())
        .returning(spec.return_type(dto, variant, repository))
        .with_modifiers(Modifiers::public().with_abstract());

    if spec.is_native() {
        method.annotations.push(
            AnnotationMeta::new(repository.query_annotation.clone())
                .with("value", spec.value.as_deref().unwrap_or_default())
                .with("nativeQuery", true)
        );
    }
    if spec.is_modifying {
        method
            .annotations
            .push(AnnotationMeta::new(repository.modifying_annotation.clone()));
    }
    if spec.is_transactional {
        method
            .annotations
            .push(AnnotationMeta::new(repository.transactional_annotation.clone()));
    }

    for param in spec.variant_params(variant, repository) {
        let mut artifact = ArtifactParam::new(param.name.clone(), param.ty);
        if param.bound {
            artifact = artifact.annotated(
                AnnotationMeta::new(repository.param_annotation.clone())
                    .with("value", param.name.as_str())
            );
        }
        method.params.push(artifact);
    }

    method
}
