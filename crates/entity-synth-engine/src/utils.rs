// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Helpers for reading Rust source metadata.
//!
//! # Submodules
//!
//! - [`case`] - Rust identifiers to reflected member and annotation names
//! - [`docs`] - Doc comment extraction

pub mod case;
pub mod docs;
