// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Reflected entity model.
//!
//! The engine never parses sources itself. It consumes read-only
//! descriptions of classes through a [`MetadataProvider`]; how those
//! descriptions are obtained is the provider's business.
//!
//! # Architecture
//!
//! ```text
//! meta.rs (coordinator)
//! ├── type_ref.rs   - TypeRef, shared by source and artifact side
//! ├── annotation.rs - AnnotationMeta, AnnotationValue
//! ├── markers.rs    - Recognized annotation names
//! ├── model.rs      - EntityMeta, FieldMeta, MethodMeta
//! ├── provider.rs   - MetadataProvider, InMemoryProvider
//! └── source.rs     - SourceProvider over Rust items (feature "source")
//! ```

mod annotation;
pub mod markers;
mod model;
mod provider;
#[cfg(feature = "source")]
mod source;
mod type_ref;

pub use annotation::{AnnotationMeta, AnnotationValue};
pub use model::{ClassKind, EntityMeta, FieldMeta, MethodMeta, Modifiers, ParamMeta, TypeParam};
pub use provider::{InMemoryProvider, MetadataProvider};
#[cfg(feature = "source")]
#[cfg_attr(docsrs, doc(cfg(feature = "source")))]
pub use source::SourceProvider;
pub use type_ref::TypeRef;
