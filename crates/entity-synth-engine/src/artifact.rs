// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Target artifact model.
//!
//! Synthesis produces [`ArtifactClass`] values: classes and interfaces with
//! fields, methods, annotations and generic parameters. Method bodies are a
//! small statement model (see [`body`]) rather than text, so tests can
//! inspect what a converter does without parsing generated source.
//!
//! # Architecture
//!
//! ```text
//! artifact.rs (coordinator)
//! ├── class.rs - ArtifactClass, ArtifactField, ArtifactMethod, ArtifactParam
//! ├── body.rs  - MethodBody, Statement, Expr
//! └── set.rs   - ArtifactSet (name-unique, ordered)
//! ```
//!
//! Artifacts are created fresh per run and handed to an
//! [`Emitter`](crate::generator::Emitter) when the run completes.

pub mod body;
mod class;
mod set;

pub use body::{Expr, MethodBody, Statement};
pub use class::{ArtifactClass, ArtifactField, ArtifactMethod, ArtifactParam, FieldInit};
pub use set::ArtifactSet;

pub use crate::meta::ClassKind as ArtifactKind;
