// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identifier case mapping.
//!
//! | Rust | Reflected | Function |
//! |------|-----------|----------|
//! | `created_at` (field, method, param) | `createdAt` | [`member_name`] |
//! | `dto_include` (attribute) | `DtoInclude` | [`annotation_name`] |
//! | `is_pageable` (attribute key) | `isPageable` | [`key_name`] |
//! | `ty` (attribute key) | `type` | [`key_name`] |

use convert_case::{Case, Casing};

/// Attribute keys spelled differently because the reflected name is a Rust
/// keyword.
const KEYWORD_KEYS: &[(&str, &str)] = &[("ty", "type"), ("r#type", "type")];

/// Field, method or parameter name.
pub fn member_name(ident: &str) -> String {
    ident.trim_start_matches("r#").to_case(Case::Camel)
}

/// Annotation name of an attribute path segment.
pub fn annotation_name(ident: &str) -> String {
    ident.to_case(Case::Pascal)
}

/// Parameter name inside an attribute.
pub fn key_name(ident: &str) -> String {
    KEYWORD_KEYS
        .iter()
        .find(|(rust, _)| *rust == ident)
        .map_or_else(|| ident.to_case(Case::Camel), |(_, key)| (*key).to_string())
}
