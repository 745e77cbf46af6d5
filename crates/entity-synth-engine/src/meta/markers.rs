// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Recognized annotation names.
//!
//! Matching is by simple name (see [`AnnotationMeta::is`]), so the
//! constants carry simple names only.

use super::AnnotationMeta;

/// Marks a class as an entity.
pub const ENTITY: &str = "Entity";

/// Marks the primary-key field.
pub const ID: &str = "Id";

/// Forces a field out of the DTO.
pub const DTO_EXCLUDE: &str = "DtoExclude";

/// Admits a complex field; `value` selects the aggregation mode.
pub const DTO_INCLUDE: &str = "DtoInclude";

/// Adds synthetic fields to the DTO.
pub const DTO_EXTEND: &str = "DtoExtend";

/// Mirrors a method onto the DTO.
pub const DTO_METHOD: &str = "DtoMethod";

/// Single native query.
pub const NATIVE_QUERY: &str = "NativeQuery";

/// Repeatable group of native queries.
pub const NATIVE_QUERIES: &str = "NativeQueries";

/// Single conventional (derived) query.
pub const CONVENTIONAL_QUERY: &str = "ConventionalQuery";

/// Repeatable group of conventional queries.
pub const CONVENTIONAL_QUERIES: &str = "ConventionalQueries";

/// Relation annotations that make a field complex.
pub const RELATIONS: [&str; 4] = ["OneToOne", "ManyToOne", "OneToMany", "ManyToMany"];

/// Whether `annotation` is one of [`RELATIONS`].
pub fn is_relation(annotation: &AnnotationMeta) -> bool {
    RELATIONS.iter().any(|name| annotation.is(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_markers() {
        assert!(is_relation(&AnnotationMeta::new("javax.persistence.ManyToOne")));
        assert!(is_relation(&AnnotationMeta::new("OneToMany")));
        assert!(!is_relation(&AnnotationMeta::new("Column")));
    }
}
