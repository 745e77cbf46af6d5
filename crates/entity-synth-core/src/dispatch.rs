// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tagged-variant dispatch table for converter entrypoints.
//!
//! A generated converter exposes one generic entrypoint that accepts any
//! entity (or a collection of entities) and routes it to the per-entity
//! conversion. Instead of discovering conversions through runtime
//! introspection, the table is filled once through
//! [`ConversionTableBuilder`] and never changes afterwards.
//!
//! # Dispatch Rules
//!
//! | Input | Behaviour |
//! |-------|-----------|
//! | `Value::One(v)` | Look up the runtime type of `v`, invoke the registered conversion |
//! | `Value::Many(vs)` | Convert element-wise, skipping `None` elements |
//! | unregistered type | [`ConversionError::MethodNotFound`] with the type name |
//! | conversion fails | [`ConversionError::Failed`] with the original message |

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt
};

use crate::error::ConversionError;

/// Boxed error returned by registered conversion functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type ConvertFn<Out> = Box<dyn Fn(&dyn Any) -> Result<Out, BoxError> + Send + Sync>;

/// Object-safe view over a value the table can dispatch on.
///
/// Implemented for every `'static` type. The type name is captured at the
/// point where the concrete type is still known, so dispatch misses can
/// report it.
pub trait Convertible: Any {
    /// Name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// Upcast to [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> Convertible for T {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Input of the generic entrypoint.
pub enum Value<'a> {
    /// A single value.
    One(&'a dyn Convertible),

    /// A collection; `None` elements are skipped.
    Many(Vec<Option<&'a dyn Convertible>>)
}

/// Output of the generic entrypoint, mirroring [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converted<Out> {
    /// Result of converting a single value.
    One(Out),

    /// Results of converting a collection.
    Many(Vec<Out>)
}

impl<Out> Converted<Out> {
    /// Return the single result, if this is [`Converted::One`].
    pub fn one(self) -> Option<Out> {
        match self {
            Self::One(out) => Some(out),
            Self::Many(_) => None
        }
    }

    /// Return the collection results, if this is [`Converted::Many`].
    pub fn many(self) -> Option<Vec<Out>> {
        match self {
            Self::Many(out) => Some(out),
            Self::One(_) => None
        }
    }
}

struct Entry<Out> {
    type_name: &'static str,
    convert:   ConvertFn<Out>
}

/// Builder for [`ConversionTable`].
///
/// Registering the same source type twice keeps the last registration.
pub struct ConversionTableBuilder<Out> {
    entries: HashMap<TypeId, Entry<Out>>
}

impl<Out> Default for ConversionTableBuilder<Out> {
    fn default() -> Self {
        Self {
            entries: HashMap::new()
        }
    }
}

impl<Out: 'static> ConversionTableBuilder<Out> {
    /// Register the conversion for source type `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use entity_synth_core::{ConversionError, ConversionTable};
    ///
    /// let table = ConversionTable::<String>::builder()
    ///     .register(|n: &u32| Ok::<_, ConversionError>(n.to_string()))
    ///     .build();
    /// assert!(table.contains::<u32>());
    /// ```
    #[must_use]
    pub fn register<T, F, E>(mut self, convert: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Result<Out, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        let convert: ConvertFn<Out> = Box::new(move |value: &dyn Any| {
            match value.downcast_ref::<T>() {
                Some(value) => convert(value).map_err(Into::into),
                None => Err(format!("value is not a {}", type_name::<T>()).into())
            }
        });

        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: type_name::<T>(),
                convert
            }
        );
        self
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> ConversionTable<Out> {
        ConversionTable {
            entries: self.entries
        }
    }
}

/// Immutable dispatch table from source type to conversion.
pub struct ConversionTable<Out> {
    entries: HashMap<TypeId, Entry<Out>>
}

impl<Out: 'static> ConversionTable<Out> {
    /// Start building a table.
    pub fn builder() -> ConversionTableBuilder<Out> {
        ConversionTableBuilder::default()
    }

    /// Number of registered source types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no conversion is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a conversion is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Names of all registered source types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Convert a single value by its runtime type.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::MethodNotFound`] if the type is not registered
    /// - [`ConversionError::Failed`] if the conversion itself fails
    pub fn convert(&self, value: &dyn Convertible) -> Result<Out, ConversionError> {
        let type_name = value.type_name();
        let any = value.as_any();
        let entry = self
            .entries
            .get(&any.type_id())
            .ok_or_else(|| ConversionError::not_found(type_name))?;

        (entry.convert)(any).map_err(|err| ConversionError::Failed {
            type_name: type_name.to_string(),
            message:   err.to_string()
        })
    }

    /// Convert an optional value; `None` converts to `None`.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert).
    pub fn convert_optional(
        &self,
        value: Option<&dyn Convertible>
    ) -> Result<Option<Out>, ConversionError> {
        value.map(|value| self.convert(value)).transpose()
    }

    /// Convert a collection element-wise, skipping `None` elements.
    ///
    /// # Errors
    ///
    /// Fails on the first element that cannot be converted.
    pub fn convert_list<'a, I>(&self, records: I) -> Result<Vec<Out>, ConversionError>
    where
        I: IntoIterator<Item = Option<&'a dyn Convertible>>
    {
        records
            .into_iter()
            .flatten()
            .map(|record| self.convert(record))
            .collect()
    }

    /// Generic entrypoint: collections go through
    /// [`convert_list`](Self::convert_list), single values through
    /// [`convert`](Self::convert).
    ///
    /// # Errors
    ///
    /// Same as the delegated method.
    pub fn convert_value(&self, value: Value<'_>) -> Result<Converted<Out>, ConversionError> {
        match value {
            Value::One(value) => self.convert(value).map(Converted::One),
            Value::Many(values) => self.convert_list(values).map(Converted::Many)
        }
    }
}

impl<Out> fmt::Debug for ConversionTable<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_struct("ConversionTable")
            .field("types", &names)
            .finish()
    }
}
