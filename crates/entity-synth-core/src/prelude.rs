// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Prelude module for convenient imports.
//!
//! ```rust
//! use entity_synth_core::prelude::*;
//! ```

pub use crate::{
    BoxError, ConversionError, ConversionTable, ConversionTableBuilder, Converted, Convertible,
    Value
};
