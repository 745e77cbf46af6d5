// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Default type resolver.
//!
//! Knows the JVM built-ins an entity model usually references and the Rust
//! std names produced by the source provider. Projects with their own value
//! types register them through [`StandardTypes::with_simple`].

use std::collections::{HashMap, HashSet};

use super::{CollectionKind, TypeResolver};

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void"
];

const JVM_SIMPLE: &[&str] = &[
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.util.Date",
    "java.util.Calendar",
    "java.util.UUID",
    "java.util.Locale",
    "java.util.Currency",
    "java.sql.Date",
    "java.sql.Time",
    "java.sql.Timestamp"
];

const RUST_SIMPLE: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64", "char", "str", "String", "Uuid", "DateTime", "NaiveDate",
    "NaiveDateTime", "NaiveTime", "Duration", "Decimal"
];

const COLLECTIONS: &[(&str, CollectionKind)] = &[
    ("java.util.List", CollectionKind::List),
    ("java.util.ArrayList", CollectionKind::List),
    ("java.util.LinkedList", CollectionKind::List),
    ("java.util.Set", CollectionKind::Set),
    ("java.util.HashSet", CollectionKind::Set),
    ("java.util.LinkedHashSet", CollectionKind::Set),
    ("java.util.TreeSet", CollectionKind::Set),
    ("java.util.SortedSet", CollectionKind::Set),
    ("java.util.Collection", CollectionKind::Bag),
    ("Vec", CollectionKind::List),
    ("VecDeque", CollectionKind::List),
    ("HashSet", CollectionKind::Set),
    ("BTreeSet", CollectionKind::Set)
];

/// Built-in type knowledge plus project registrations.
#[derive(Debug, Clone, Default)]
pub struct StandardTypes {
    simple:      HashSet<String>,
    collections: HashMap<String, CollectionKind>
}

impl StandardTypes {
    /// Resolver with built-ins only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra representable type.
    #[must_use]
    pub fn with_simple(mut self, name: impl Into<String>) -> Self {
        self.simple.insert(name.into());
        self
    }

    /// Register an extra collection type.
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>, kind: CollectionKind) -> Self {
        self.collections.insert(name.into(), kind);
        self
    }
}

impl TypeResolver for StandardTypes {
    fn is_representable(&self, name: &str) -> bool {
        PRIMITIVES.contains(&name)
            || JVM_SIMPLE.contains(&name)
            || RUST_SIMPLE.contains(&name)
            || name.starts_with("java.time.")
            || self.simple.contains(name)
    }

    fn collection_kind(&self, name: &str) -> Option<CollectionKind> {
        self.collections.get(name).copied().or_else(|| {
            COLLECTIONS
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, kind)| *kind)
        })
    }
}
