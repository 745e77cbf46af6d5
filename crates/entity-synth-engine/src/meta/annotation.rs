// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Annotation model.
//!
//! Annotation values arrive from providers in loosely normalized form: a
//! scalar may still be quoted, a class literal may still carry `.class`,
//! and a repeatable group may hold one annotation or a list of them. The
//! accessors here hide those differences.

use std::collections::BTreeMap;

use super::TypeRef;
use crate::naming;

/// Value of an annotation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// String, number, boolean or enum constant.
    Scalar(String),

    /// Class literal (`Long.class`).
    ClassLiteral(TypeRef),

    /// Nested annotation.
    Annotation(AnnotationMeta),

    /// Array of values.
    List(Vec<AnnotationValue>)
}

impl AnnotationValue {
    /// Scalar value with surrounding quotes removed.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(raw) => {
                let trimmed = raw.trim();
                Some(
                    trimmed
                        .strip_prefix('"')
                        .and_then(|s| s.strip_suffix('"'))
                        .unwrap_or(trimmed)
                )
            }
            _ => None
        }
    }

    /// Boolean value, parsed case-insensitively.
    pub fn as_bool(&self) -> Option<bool> {
        let raw = self.as_str()?;
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    /// Class literal, or a scalar spelling one (`"a.B.class"`, `"a.B"`).
    pub fn as_type(&self) -> Option<TypeRef> {
        match self {
            Self::ClassLiteral(ty) => Some(ty.clone()),
            Self::Scalar(_) => {
                let raw = self.as_str()?;
                TypeRef::parse(raw.strip_suffix(".class").unwrap_or(raw))
            }
            _ => None
        }
    }

    /// Enum constant without its type qualifier (`AggregationType.ID` -> `ID`).
    pub fn as_constant(&self) -> Option<&str> {
        self.as_str().map(naming::simple_name)
    }

    /// Nested annotations, whether given singly or as a list.
    pub fn annotations(&self) -> Vec<&AnnotationMeta> {
        match self {
            Self::Annotation(annotation) => vec![annotation],
            Self::List(values) => values
                .iter()
                .filter_map(|value| match value {
                    Self::Annotation(annotation) => Some(annotation),
                    _ => None
                })
                .collect(),
            _ => Vec::new()
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<TypeRef> for AnnotationValue {
    fn from(value: TypeRef) -> Self {
        Self::ClassLiteral(value)
    }
}

impl From<AnnotationMeta> for AnnotationValue {
    fn from(value: AnnotationMeta) -> Self {
        Self::Annotation(value)
    }
}

impl From<Vec<AnnotationMeta>> for AnnotationValue {
    fn from(value: Vec<AnnotationMeta>) -> Self {
        Self::List(value.into_iter().map(Self::Annotation).collect())
    }
}

/// Annotation with its named parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationMeta {
    /// Qualified or simple annotation type name.
    pub name:   String,
    /// Named parameters; the default parameter is `value`.
    pub params: BTreeMap<String, AnnotationValue>
}

impl AnnotationMeta {
    /// Annotation without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            params: BTreeMap::new()
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Last segment of the annotation type name.
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.name)
    }

    /// Whether this annotation is of type `name`.
    ///
    /// Matches on the full name or on the simple name, so `Entity`,
    /// `javax.persistence.Entity` and `jakarta.persistence.Entity` are the
    /// same marker.
    pub fn is(&self, name: &str) -> bool {
        self.name == name || self.simple_name() == naming::simple_name(name)
    }

    /// Parameter by key.
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.params.get(key)
    }

    /// The default `value` parameter.
    pub fn value(&self) -> Option<&AnnotationValue> {
        self.get("value")
    }

    /// String parameter, empty strings treated as absent.
    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(AnnotationValue::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Boolean parameter with a default.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(AnnotationValue::as_bool)
            .unwrap_or(default)
    }
}

/// First annotation of type `name`.
pub(crate) fn find<'a>(
    annotations: &'a [AnnotationMeta],
    name: &str
) -> Option<&'a AnnotationMeta> {
    annotations.iter().find(|annotation| annotation.is(name))
}
