// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use entity_synth::prelude::*;
//! ```

#[cfg(feature = "source")]
pub use entity_synth_engine::meta::SourceProvider;
pub use entity_synth_engine::{
    GenerationError,
    artifact::{ArtifactClass, ArtifactKind, ArtifactSet},
    classify::{StandardTypes, TypeResolver},
    config::GeneratorConfig,
    generator::{CancelToken, Emitter, GenerationOutput, Generator},
    meta::{AnnotationMeta, EntityMeta, FieldMeta, InMemoryProvider, MetadataProvider, TypeRef},
    synth::DispatchIndex
};

pub use crate::{ConversionError, ConversionTable, Converted, Convertible, Value};
