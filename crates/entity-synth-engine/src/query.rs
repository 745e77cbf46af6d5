// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query specification extraction.
//!
//! Entities declare repository queries through annotations. Two families
//! are recognized, each as a single annotation or as a repeatable group:
//!
//! | Annotation | Kind | Group |
//! |------------|------|-------|
//! | `NativeQuery` | [`QueryKind::Native`] | `NativeQueries` |
//! | `ConventionalQuery` | [`QueryKind::Conventional`] | `ConventionalQueries` |
//!
//! [`extract`] normalizes them into [`QuerySpec`] records in declaration
//! order. Each spec then expands into one to four DAO methods through
//! [`QuerySpec::variants`].
//!
//! # Parameters
//!
//! ```text
//! @ConventionalQuery(
//!     name = "findByName",
//!     isPageable = true,
//!     parameters = { @Parameter(value = "name", type = String.class) }
//! )
//! ```
//!
//! Parameter names are unique within one spec; see [`disambiguate`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    config::RepositoryConfig,
    meta::{AnnotationMeta, AnnotationValue, TypeRef, markers}
};

/// Name given to parameters that declare none.
pub const DEFAULT_PARAM_NAME: &str = "param";

/// Base name of the pager parameter.
pub const PAGEABLE_PARAM_NAME: &str = "pageable";

/// Base name of the sort parameter.
pub const SORT_PARAM_NAME: &str = "sort";

/// Query family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Explicit query text.
    Native,
    /// Derived from the method name.
    Conventional
}

/// One declared query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpecParam {
    /// Unique parameter name.
    pub name:     String,
    /// Element type.
    pub ty:       TypeRef,
    /// Whether the parameter is an array of `ty`.
    pub is_array: bool
}

impl QuerySpecParam {
    /// Type as it appears in the method signature.
    pub fn declared_type(&self) -> TypeRef {
        if self.is_array {
            self.ty.clone().into_array()
        } else {
            self.ty.clone()
        }
    }
}

/// One variant of a query method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QueryVariant {
    /// Appends a pager parameter and wraps the result in a page.
    pub pageable: bool,
    /// Appends a sort parameter.
    pub sortable: bool
}

impl QueryVariant {
    /// The base variant.
    pub const BASE: Self = Self {
        pageable: false,
        sortable: false
    };
}

/// Parameter of an expanded query method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantParam {
    /// Parameter name.
    pub name:  String,
    /// Parameter type.
    pub ty:    TypeRef,
    /// Whether the parameter is bound into the query by name.
    pub bound: bool
}

/// Normalized query description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Method name.
    pub name:             String,
    /// Family.
    pub kind:             QueryKind,
    /// Explicit result type.
    pub result_type:      Option<TypeRef>,
    /// Query text; set for native queries only.
    pub value:            Option<String>,
    /// Modifying query.
    pub is_modifying:     bool,
    /// Transactional query.
    pub is_transactional: bool,
    /// Sortable variant requested.
    pub is_sortable:      bool,
    /// Pageable variant requested.
    pub is_pageable:      bool,
    /// Result is a collection.
    pub is_collection:    bool,
    /// Parameters in declaration order.
    pub params:           Vec<QuerySpecParam>
}

impl QuerySpec {
    /// Spec with default flags and no parameters.
    pub fn new(name: impl Into<String>, kind: QueryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            result_type: None,
            value: None,
            is_modifying: false,
            is_transactional: false,
            is_sortable: false,
            is_pageable: false,
            is_collection: true,
            params: Vec::new()
        }
    }

    /// Whether the spec carries explicit query text.
    pub fn is_native(&self) -> bool {
        self.kind == QueryKind::Native
    }

    /// Method variants in order: base, pageable, sortable, both.
    ///
    /// ```rust
    /// use entity_synth_engine::query::{QueryKind, QuerySpec};
    ///
    /// let mut spec = QuerySpec::new("findAll", QueryKind::Conventional);
    /// assert_eq!(spec.variants().len(), 1);
    ///
    /// spec.is_pageable = true;
    /// spec.is_sortable = true;
    /// assert_eq!(spec.variants().len(), 4);
    /// ```
    pub fn variants(&self) -> Vec<QueryVariant> {
        let mut variants = vec![QueryVariant::BASE];
        if self.is_pageable {
            variants.push(QueryVariant {
                pageable: true,
                sortable: false
            });
        }
        if self.is_sortable {
            variants.push(QueryVariant {
                pageable: false,
                sortable: true
            });
        }
        if self.is_pageable && self.is_sortable {
            variants.push(QueryVariant {
                pageable: true,
                sortable: true
            });
        }
        variants
    }

    /// Return type of `variant` for an entity whose DTO is `dto`.
    ///
    /// Pageable variants always return a page of DTOs. Otherwise an
    /// explicit result type wins, then a list of DTOs for collection
    /// results, then the bare DTO.
    pub fn return_type(
        &self,
        dto: &TypeRef,
        variant: QueryVariant,
        repository: &RepositoryConfig
    ) -> TypeRef {
        if variant.pageable {
            return TypeRef::generic(repository.page_type.clone(), [dto.clone()]);
        }
        match &self.result_type {
            Some(result_type) => result_type.clone(),
            None if self.is_collection => {
                TypeRef::generic(repository.list_type.clone(), [dto.clone()])
            }
            None => dto.clone()
        }
    }

    /// Parameters of `variant`: the declared ones, then pager, then sort.
    pub fn variant_params(
        &self,
        variant: QueryVariant,
        repository: &RepositoryConfig
    ) -> Vec<VariantParam> {
        let mut params: Vec<VariantParam> = self
            .params
            .iter()
            .map(|param| VariantParam {
                name:  param.name.clone(),
                ty:    param.declared_type(),
                bound: true
            })
            .collect();
        let taken: HashSet<&str> = self.params.iter().map(|param| param.name.as_str()).collect();
        if variant.pageable {
            params.push(VariantParam {
                name:  non_conflicting(&taken, PAGEABLE_PARAM_NAME),
                ty:    TypeRef::new(repository.pageable_type.clone()),
                bound: false
            });
        }
        if variant.sortable {
            params.push(VariantParam {
                name:  non_conflicting(&taken, SORT_PARAM_NAME),
                ty:    TypeRef::new(repository.sort_type.clone()),
                bound: false
            });
        }
        params
    }
}

/// Extract query specs from an entity's annotations.
///
/// Unrelated annotations are ignored. A query without a name is skipped
/// with a warning.
pub fn extract(annotations: &[AnnotationMeta]) -> Vec<QuerySpec> {
    let mut specs = Vec::new();
    for annotation in annotations {
        if annotation.is(markers::NATIVE_QUERIES) || annotation.is(markers::CONVENTIONAL_QUERIES) {
            let members = annotation
                .value()
                .map(AnnotationValue::annotations)
                .unwrap_or_default();
            specs.extend(members.into_iter().filter_map(spec_from));
        } else if annotation.is(markers::NATIVE_QUERY)
            || annotation.is(markers::CONVENTIONAL_QUERY)
        {
            specs.extend(spec_from(annotation));
        }
    }
    specs
}

fn spec_from(annotation: &AnnotationMeta) -> Option<QuerySpec> {
    let kind = if annotation.is(markers::NATIVE_QUERY) {
        QueryKind::Native
    } else if annotation.is(markers::CONVENTIONAL_QUERY) {
        QueryKind::Conventional
    } else {
        debug!(annotation = %annotation.name, "ignoring non-query member of a query group");
        return None;
    };
    let Some(name) = annotation.str_param("name") else {
        warn!(annotation = %annotation.name, "query without a name skipped");
        return None;
    };

    let mut spec = QuerySpec::new(name, kind);
    spec.result_type = annotation
        .get("resultType")
        .and_then(AnnotationValue::as_type)
        .filter(|ty| !ty.name.is_empty());
    if kind == QueryKind::Native {
        spec.value = Some(annotation.str_param("value").unwrap_or_default().to_string());
    }
    spec.is_modifying = annotation.flag("isModifying", false);
    spec.is_transactional = annotation.flag("isTransactional", false);
    spec.is_sortable = annotation.flag("isSortable", false);
    spec.is_pageable = annotation.flag("isPageable", false);
    spec.is_collection = annotation.flag("isCollection", true);

    let declared: Vec<(Option<String>, TypeRef, bool)> = annotation
        .get("parameters")
        .map(AnnotationValue::annotations)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|param| {
            let name = param.str_param("value").map(str::to_string);
            match param.get("type").and_then(AnnotationValue::as_type) {
                Some(ty) => Some((name, ty, param.flag("isArray", false))),
                None => {
                    debug!(
                        query = %spec.name,
                        param = name.as_deref().unwrap_or(DEFAULT_PARAM_NAME),
                        "query parameter without a type dropped"
                    );
                    None
                }
            }
        })
        .collect();

    let names: Vec<Option<String>> = declared.iter().map(|(name, ..)| name.clone()).collect();
    spec.params = disambiguate(&names)
        .into_iter()
        .zip(declared)
        .map(|(name, (_, ty, is_array))| QuerySpecParam {
            name,
            ty,
            is_array
        })
        .collect();
    Some(spec)
}

/// Make parameter names unique, scanning left to right.
///
/// Unnamed parameters become [`DEFAULT_PARAM_NAME`]. A name already taken
/// by an earlier parameter gets the first free numeric suffix, counting
/// from zero.
///
/// ```rust
/// use entity_synth_engine::query::disambiguate;
///
/// let names = [Some("id".into()), Some("id".into()), Some("id".into()), None];
/// assert_eq!(disambiguate(&names), ["id", "id0", "id1", "param"]);
/// ```
pub fn disambiguate(names: &[Option<String>]) -> Vec<String> {
    let mut processed: HashSet<String> = HashSet::new();
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let base = name.as_deref().unwrap_or(DEFAULT_PARAM_NAME);
        let unique = {
            let taken: HashSet<&str> = processed.iter().map(String::as_str).collect();
            non_conflicting(&taken, base)
        };
        processed.insert(unique.clone());
        resolved.push(unique);
    }
    resolved
}

/// `candidate`, or `candidate` plus the first numeric suffix not in
/// `taken`.
pub fn non_conflicting(taken: &HashSet<&str>, candidate: &str) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    (0_usize..)
        .map(|index| format!("{candidate}{index}"))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: &str) -> AnnotationMeta {
        AnnotationMeta::new("Parameter")
            .with("value", name)
            .with("type", TypeRef::new(ty))
    }

    #[test]
    fn defaults() {
        let specs = extract(&[AnnotationMeta::new("ConventionalQuery").with("name", "findAll")]);
        assert_eq!(specs, vec![QuerySpec::new("findAll", QueryKind::Conventional)]);
        assert!(specs[0].is_collection);
        assert!(specs[0].params.is_empty());
        assert!(specs[0].value.is_none());
    }

    #[test]
    fn native_single_with_flags() {
        let specs = extract(&[AnnotationMeta::new("com.acme.NativeQuery")
            .with("name", "purge")
            .with("value", "\"DELETE FROM orders\"")
            .with("isModifying", "TRUE")
            .with("isTransactional", true)
            .with("isCollection", false)]);
        let spec = &specs[0];
        assert!(spec.is_native());
        assert_eq!(spec.value.as_deref(), Some("DELETE FROM orders"));
        assert!(spec.is_modifying && spec.is_transactional);
        assert!(!spec.is_collection);
    }

    #[test]
    fn repeatable_groups_keep_order() {
        let group = AnnotationMeta::new("ConventionalQueries").with(
            "value",
            vec![
                AnnotationMeta::new("ConventionalQuery").with("name", "findByA"),
                AnnotationMeta::new("ConventionalQuery").with("name", "findByB")
            ]
        );
        let single_group = AnnotationMeta::new("NativeQueries").with(
            "value",
            AnnotationMeta::new("NativeQuery")
                .with("name", "raw")
                .with("value", "SELECT 1")
        );
        let specs = extract(&[group, AnnotationMeta::new("Column"), single_group]);
        let names: Vec<_> = specs.iter().map(|spec| spec.name.as_str()).collect();
        assert_eq!(names, ["findByA", "findByB", "raw"]);
        assert_eq!(specs[2].kind, QueryKind::Native);
    }

    #[test]
    fn nameless_query_skipped() {
        assert!(extract(&[AnnotationMeta::new("ConventionalQuery")]).is_empty());
    }

    #[test]
    fn parameters_single_list_and_untyped() {
        let single = extract(&[AnnotationMeta::new("ConventionalQuery")
            .with("name", "findByName")
            .with("parameters", param("name", "java.lang.String"))]);
        assert_eq!(single[0].params.len(), 1);

        let list = extract(&[AnnotationMeta::new("ConventionalQuery")
            .with("name", "findByIds")
            .with(
                "parameters",
                vec![
                    param("ids", "java.lang.Long").with("isArray", true),
                    AnnotationMeta::new("Parameter").with("value", "ghost"),
                    AnnotationMeta::new("Parameter").with("type", "java.lang.String.class")
                ]
            )]);
        let params = &list[0].params;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].declared_type().to_string(), "java.lang.Long[]");
        assert_eq!(params[1].name, "param");
        assert_eq!(params[1].ty, TypeRef::new("java.lang.String"));
    }

    #[test]
    fn colliding_parameter_names() {
        let spec = &extract(&[AnnotationMeta::new("ConventionalQuery")
            .with("name", "findByIdIn")
            .with(
                "parameters",
                vec![
                    param("id", "long"),
                    param("id", "long"),
                    param("id", "long")
                ]
            )])[0];
        let names: Vec<_> = spec.params.iter().map(|param| param.name.as_str()).collect();
        assert_eq!(names, ["id", "id0", "id1"]);
    }

    #[test]
    fn disambiguation_against_existing_suffix() {
        let names = [Some("id0".to_string()), Some("id".to_string()), Some("id".to_string())];
        assert_eq!(disambiguate(&names), ["id0", "id", "id1"]);
        assert_eq!(disambiguate(&[None, None]), ["param", "param0"]);
    }

    #[test]
    fn variant_expansion() {
        let mut spec = QuerySpec::new("findAll", QueryKind::Conventional);
        spec.is_pageable = true;
        assert_eq!(spec.variants(), [QueryVariant::BASE, QueryVariant {
            pageable: true,
            sortable: false
        }]);

        spec.is_pageable = false;
        spec.is_sortable = true;
        assert_eq!(spec.variants().len(), 2);
        assert!(spec.variants()[1].sortable);

        spec.is_pageable = true;
        let variants = spec.variants();
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[3], QueryVariant {
            pageable: true,
            sortable: true
        });
    }

    #[test]
    fn return_types() {
        let repository = RepositoryConfig::default();
        let dto = TypeRef::new("app.api.dto.UserDTO");
        let mut spec = QuerySpec::new("findByName", QueryKind::Conventional);

        let list = spec.return_type(&dto, QueryVariant::BASE, &repository);
        assert_eq!(list.to_string(), "java.util.List<app.api.dto.UserDTO>");

        let page = spec.return_type(
            &dto,
            QueryVariant {
                pageable: true,
                sortable: false
            },
            &repository
        );
        assert_eq!(
            page.to_string(),
            "org.springframework.data.domain.Page<app.api.dto.UserDTO>"
        );

        spec.is_collection = false;
        assert_eq!(spec.return_type(&dto, QueryVariant::BASE, &repository), dto);

        spec.result_type = Some(TypeRef::new("java.lang.Long"));
        assert_eq!(
            spec.return_type(&dto, QueryVariant::BASE, &repository),
            TypeRef::new("java.lang.Long")
        );
    }

    #[test]
    fn appended_parameters_do_not_conflict() {
        let repository = RepositoryConfig::default();
        let mut spec = QuerySpec::new("findBySort", QueryKind::Conventional);
        spec.params.push(QuerySpecParam {
            name:     "sort".into(),
            ty:       TypeRef::new("java.lang.String"),
            is_array: false
        });
        let params = spec.variant_params(
            QueryVariant {
                pageable: true,
                sortable: true
            },
            &repository
        );
        let names: Vec<_> = params.iter().map(|param| param.name.as_str()).collect();
        assert_eq!(names, ["sort", "pageable", "sort0"]);
        assert!(params[0].bound);
        assert!(!params[1].bound);
        assert_eq!(params[1].ty, TypeRef::new("org.springframework.data.domain.Pageable"));
    }
}
