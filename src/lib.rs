// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod prelude;

// Runtime dispatch
pub use entity_synth_core::{
    BoxError, ConversionError, ConversionTable, ConversionTableBuilder, Converted, Convertible,
    Value
};
// Engine
pub use entity_synth_engine::{
    GenerationError, Result, artifact, classify, config, generator, meta, naming, projection,
    query, registry, synth
};
