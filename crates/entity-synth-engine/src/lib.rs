// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Transformation engine of entity-synth.
//!
//! Turns a reflected model of annotated entity classes into a target
//! artifact model: one DTO class and one DAO interface per entity, plus a
//! single shared converter class with one `convertToDto` overload per
//! concrete entity.
//!
//! # Architecture
//!
//! ```text
//! entity-synth-engine/src/
//! ├── lib.rs          - Crate root (you are here)
//! ├── config.rs       - GeneratorConfig (serde + toml)
//! ├── error.rs        - GenerationError, Result alias
//! ├── meta.rs         - Reflected model + MetadataProvider
//! │   └── source.rs   - Rust source provider (feature "source")
//! ├── naming.rs       - Affix resolution, accessor names
//! ├── classify.rs     - Simple / collection / relation classification
//! ├── projection.rs   - Per-field projection decisions
//! ├── query.rs        - Query annotation extraction, variants
//! ├── artifact.rs     - Target-side class model
//! ├── registry.rs     - Per-key memo table
//! ├── synth.rs        - DTO, DAO and converter synthesis
//! └── generator.rs    - Run orchestration, emission
//! ```
//!
//! # Pipeline
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`classify`] | [`TypeRef`](meta::TypeRef) | [`TypeClass`](classify::TypeClass) |
//! | [`naming`] | entity name + affixes | artifact name |
//! | [`projection`] | [`FieldMeta`](meta::FieldMeta) | [`ProjectionDecision`](projection::ProjectionDecision) |
//! | [`query`] | entity annotations | [`QuerySpec`](query::QuerySpec) list |
//! | [`synth`] | [`EntityMeta`](meta::EntityMeta) | [`Synthesized`](synth::Synthesized) |
//! | [`generator`] | root entity names | [`GenerationOutput`](generator::GenerationOutput) |
//!
//! # Example
//!
//! ```rust
//! use entity_synth_engine::{
//!     config::GeneratorConfig,
//!     generator::Generator,
//!     meta::{AnnotationMeta, EntityMeta, FieldMeta, InMemoryProvider, TypeRef}
//! };
//!
//! let provider: InMemoryProvider = [EntityMeta::new("app.model.User")
//!     .annotated(AnnotationMeta::new("Entity"))
//!     .field(
//!         FieldMeta::new("id", TypeRef::new("java.lang.Long"))
//!             .annotated(AnnotationMeta::new("Id"))
//!     )]
//! .into_iter()
//! .collect();
//!
//! let config = GeneratorConfig::new("app.model", "app.api", "app.data");
//! let output = Generator::new(&provider, config)
//!     .unwrap()
//!     .run(&["app.model.User"])
//!     .unwrap();
//!
//! assert!(output.artifact("app.api.dto.UserDTO").is_some());
//! assert!(output.artifact("app.data.dao.IUserDAO").is_some());
//! ```

pub mod artifact;
pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod meta;
pub mod naming;
pub mod projection;
pub mod query;
pub mod registry;
pub mod synth;
#[cfg(feature = "source")]
pub(crate) mod utils;

pub use error::{GenerationError, Result};
