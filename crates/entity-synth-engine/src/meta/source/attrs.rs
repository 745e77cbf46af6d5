// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural attributes of Rust source items.
//!
//! `#[entity(...)]` and `#[field(...)]` describe what Rust cannot say on
//! its own (inheritance, abstractness, Java-style modifiers). Every other
//! attribute is reflected as an annotation by
//! [`annotations`](super::annotations).
//!
//! ```rust,ignore
//! #[entity(extends = "Base<Tag>", is_abstract, package = "shop.model")]
//! pub struct Post {
//!     #[field(is_static, is_final, init = "3")]
//!     pub version: i32,
//! }
//! ```

use darling::{FromDeriveInput, FromField};
use syn::{Ident, Type};

/// Item-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), allow_unknown_fields)]
pub struct EntityAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Supertype as Rust type syntax, e.g. `"Base<Tag>"`.
    #[darling(default)]
    pub extends: Option<String>,

    /// Class is abstract.
    #[darling(default)]
    pub is_abstract: bool,

    /// Package overriding the one the source was registered under.
    #[darling(default)]
    pub package: Option<String>
}

/// Field-level modifiers parsed from `#[field(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(field))]
pub struct FieldAttrs {
    /// Field identifier; `None` for tuple fields.
    pub ident: Option<Ident>,

    /// Field type.
    pub ty: Type,

    /// Class-level field.
    #[darling(default)]
    pub is_static: bool,

    /// Excluded from serialization.
    #[darling(default)]
    pub transient: bool,

    /// Assigned once.
    #[darling(default)]
    pub is_final: bool,

    /// Initializer as source text.
    #[darling(default)]
    pub init: Option<String>
}
