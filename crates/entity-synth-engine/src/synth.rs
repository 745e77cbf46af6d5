// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Artifact synthesis.
//!
//! A [`Synthesizer`] turns one entity into its DTO, its DAO and its
//! converter method, recursing into entity supertypes first. All three are
//! memoized per entity in a [`Registry`], so a shared ancestor reached from
//! several subclasses (or from several worker threads) is built once.
//! Classes reached through an included relation are synthesized as well, so
//! every DTO type a field refers to exists and has a converter overload.
//!
//! # Architecture
//!
//! ```text
//! synth.rs (coordinator)
//! ├── dto.rs       - DTO class: fields, accessors, extend fields, mirrored methods
//! ├── dao.rs       - DAO interface: repository wiring, query variants
//! ├── converter.rs - Shared converter class and per-entity convertToDto
//! └── dispatch.rs  - DispatchIndex over the finished converter
//! ```
//!
//! # Order
//!
//! ```text
//! synthesize(Leaf)
//!   ├── lineage check (cycle → InheritanceCycle)
//!   ├── dto(Leaf) ─► dto(Base) first when Base is an entity
//!   ├── dao(Leaf) ─► dao(Base) first when Base is an entity
//!   ├── converter(Leaf), skipped for abstract entities
//!   └── synthesize(Related) for each included relation of Leaf and Base
//! ```
//!
//! Lock order always runs from descendant to ancestor, so concurrent
//! syntheses cannot deadlock on registry slots. Related classes are visited
//! only after every slot of the current entity is released, and each class
//! has its relations walked once per run, so relation cycles terminate.

mod converter;
mod dao;
pub mod dispatch;
mod dto;

use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError}
};

use tracing::{debug, info};

pub use self::{
    converter::{ENTRYPOINT, LIST_HELPER},
    dispatch::DispatchIndex
};
use crate::{
    artifact::{ArtifactClass, ArtifactSet},
    classify::Classifier,
    error::{GenerationError, Result},
    meta::EntityMeta,
    projection::FieldProjector,
    registry::{ArtifactFamily, Lookup, Registry}
};

/// Outcome of synthesizing one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// Entity name.
    pub entity:     String,
    /// DTO class.
    pub dto:        Lookup,
    /// DAO interface; `None` for non-entity classes.
    pub dao:        Option<Lookup>,
    /// Converter overload signature; `None` for abstract or non-entity
    /// classes.
    pub conversion: Option<Lookup>
}

/// Builds artifacts for one run.
///
/// Shareable across threads; every mutable part sits behind a lock.
pub struct Synthesizer<'a> {
    classifier: Classifier<'a>,
    projector:  FieldProjector<'a>,
    registry:   Registry,
    artifacts:  Mutex<ArtifactSet>,
    converter:  Mutex<ArtifactClass>,
    walked:     Mutex<HashSet<String>>
}

impl<'a> Synthesizer<'a> {
    /// Synthesizer with an empty registry and the converter scaffolding.
    pub fn new(classifier: Classifier<'a>) -> Self {
        let converter = converter::scaffold(classifier.config());
        Self {
            classifier,
            projector: FieldProjector::new(classifier),
            registry: Registry::new(),
            artifacts: Mutex::new(ArtifactSet::new()),
            converter: Mutex::new(converter),
            walked: Mutex::new(HashSet::new())
        }
    }

    /// Classifier of this run.
    pub fn classifier(&self) -> Classifier<'a> {
        self.classifier
    }

    /// Memo table of this run.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Synthesize `entity` and whatever of its supertypes and related classes
    /// is still missing.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InheritanceCycle`] if the supertype chain loops
    /// - [`GenerationError::MissingPrimaryKey`] for a keyless concrete entity
    /// - [`GenerationError::DuplicateArtifact`] on artifact name collisions
    pub fn synthesize(&self, entity: &EntityMeta) -> Result<Synthesized> {
        let ancestors = self.lineage(entity)?;
        debug!(entity = %entity.name, depth = ancestors.len(), "synthesizing");

        let dto = self.dto(entity, &ancestors)?;
        let outcome = if entity.is_entity() {
            Synthesized {
                entity: entity.name.clone(),
                dto,
                dao: Some(self.dao(entity, &ancestors)?),
                conversion: self.conversion(entity, &ancestors)?
            }
        } else {
            Synthesized {
                entity: entity.name.clone(),
                dto,
                dao: None,
                conversion: None
            }
        };
        self.reach(entity, &ancestors)?;
        Ok(outcome)
    }

    /// Finished artifacts plus the converter and its dispatch index.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::DuplicateArtifact`] if the converter name
    /// collides with a generated artifact.
    pub fn finish(self) -> Result<(ArtifactSet, DispatchIndex)> {
        let mut artifacts = self
            .artifacts
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut converter = self
            .converter
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let object_type = &self.classifier.config().object_type;
        converter::order_overloads(&mut converter, object_type);
        let index = DispatchIndex::build(&converter, object_type);
        info!(
            converter = %converter.name,
            overloads = index.len(),
            "conversion dispatch index built"
        );
        artifacts.insert(converter)?;
        Ok((artifacts, index))
    }

    /// Known ancestors, nearest first, or the cycle they form.
    fn lineage(&self, entity: &EntityMeta) -> Result<Vec<&'a EntityMeta>> {
        let provider = self.classifier.provider();
        let mut chain = vec![entity.name.clone()];
        let mut ancestors = Vec::new();
        let mut next = entity
            .supertype
            .as_ref()
            .and_then(|supertype| provider.class_by_name(&supertype.name));
        while let Some(parent) = next {
            let repeated = chain.contains(&parent.name);
            chain.push(parent.name.clone());
            if repeated {
                return Err(GenerationError::InheritanceCycle {
                    chain
                });
            }
            ancestors.push(parent);
            next = provider.superclass(parent);
        }
        Ok(ancestors)
    }

    /// Synthesize every known class referenced by an included relation of
    /// `entity` or of the entity ancestors whose DTOs it extends.
    fn reach(&self, entity: &EntityMeta, ancestors: &[&'a EntityMeta]) -> Result<()> {
        let provider = self.classifier.provider();
        let owners = std::iter::once(entity).chain(
            ancestors
                .iter()
                .copied()
                .take_while(|ancestor| ancestor.is_entity())
        );
        for owner in owners {
            let first_visit = self
                .walked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(owner.name.clone());
            if !first_visit {
                continue;
            }
            for field in &owner.fields {
                let decision = self.projector.project(field, owner);
                let Some(related) = decision
                    .projection()
                    .and_then(|projection| projection.related.as_ref())
                    .and_then(|related| provider.class_by_name(&related.name))
                else {
                    continue;
                };
                debug!(
                    entity = %owner.name,
                    field = %field.name,
                    related = %related.name,
                    "following included relation"
                );
                self.synthesize(related)?;
            }
        }
        Ok(())
    }

    fn dto(&self, entity: &EntityMeta, ancestors: &[&'a EntityMeta]) -> Result<Lookup> {
        self.registry
            .get_or_create(ArtifactFamily::Dto, &entity.name, || {
                let parent = match ancestors.split_first() {
                    Some((parent, rest)) if parent.is_entity() => {
                        self.dto(parent, rest)?;
                        Some(*parent)
                    }
                    _ => None
                };
                let class = dto::build(self, entity, parent)?;
                let name = class.name.clone();
                self.store(class)?;
                info!(entity = %entity.name, dto = %name, "DTO synthesized");
                Ok(name)
            })
    }

    fn dao(&self, entity: &EntityMeta, ancestors: &[&'a EntityMeta]) -> Result<Lookup> {
        self.registry
            .get_or_create(ArtifactFamily::Dao, &entity.name, || {
                let parent = match ancestors.split_first() {
                    Some((parent, rest)) if parent.is_entity() => {
                        Some(self.dao(parent, rest)?.name().to_string())
                    }
                    _ => None
                };
                let class = dao::build(self, entity, parent)?;
                let name = class.name.clone();
                self.store(class)?;
                info!(entity = %entity.name, dao = %name, "DAO synthesized");
                Ok(name)
            })
    }

    fn conversion(
        &self,
        entity: &EntityMeta,
        ancestors: &[&'a EntityMeta]
    ) -> Result<Option<Lookup>> {
        if entity.is_abstract {
            info!(entity = %entity.name, "abstract entity contributes no converter method");
            return Ok(None);
        }
        self.registry
            .get_or_create(ArtifactFamily::Converter, &entity.name, || {
                let method = converter::build(self, entity, ancestors);
                let signature = method.signature();
                let mut class = self.converter.lock().unwrap_or_else(PoisonError::into_inner);
                if class
                    .methods
                    .iter()
                    .any(|existing| existing.signature() == signature)
                {
                    return Err(GenerationError::DuplicateArtifact {
                        name: format!("{}.{signature}", class.name)
                    });
                }
                class.methods.push(method);
                info!(entity = %entity.name, method = %signature, "converter method synthesized");
                Ok(signature)
            })
            .map(Some)
    }

    fn store(&self, class: ArtifactClass) -> Result<()> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class)
    }

    fn has_dto_method(&self, dto: &str, method: &str) -> bool {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .has_method_in_hierarchy(dto, method)
    }
}
