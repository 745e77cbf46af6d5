// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime support for converters produced by entity-synth.
//!
//! The engine describes one shared converter artifact with a generic
//! `convertToDto` entrypoint. At runtime that entrypoint needs to find the
//! per-entity conversion for whatever value it receives. This crate provides
//! the table that makes that lookup explicit: a mapping from a type identity
//! to a conversion closure, built once ahead of time and immutable afterwards.
//!
//! # Overview
//!
//! - [`ConversionTable`] - Immutable type → conversion dispatch table
//! - [`ConversionTableBuilder`] - One-shot builder for the table
//! - [`Convertible`] - Object-safe view of any value the table can dispatch on
//! - [`Value`] / [`Converted`] - Single value or collection input and output
//! - [`ConversionError`] - Classified dispatch failures
//!
//! # Usage
//!
//! ```rust
//! use entity_synth_core::{ConversionError, ConversionTable};
//!
//! struct User {
//!     name: String
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct UserDto {
//!     name: String
//! }
//!
//! let table = ConversionTable::builder()
//!     .register(|user: &User| {
//!         Ok::<_, ConversionError>(UserDto {
//!             name: user.name.clone()
//!         })
//!     })
//!     .build();
//!
//! let dto = table
//!     .convert(&User {
//!         name: "ann".into()
//!     })
//!     .unwrap();
//! assert_eq!(dto.name, "ann");
//! assert!(table.convert(&42_u8).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod prelude;

pub use dispatch::{
    BoxError, ConversionTable, ConversionTableBuilder, Converted, Convertible, Value
};
pub use error::ConversionError;
