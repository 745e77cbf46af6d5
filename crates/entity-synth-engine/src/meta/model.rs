// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Class, field and method descriptions.
//!
//! These are read-only views: the engine never mutates them. The builder
//! methods exist for providers and tests that assemble a model by hand.

use super::{AnnotationMeta, TypeRef, annotation, markers};
use crate::naming;

/// Kind of a reflected or generated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    /// Ordinary class.
    #[default]
    Class,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
    /// Annotation type.
    Annotation
}

/// Member and class modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// `public`.
    pub is_public:    bool,
    /// `static`.
    pub is_static:    bool,
    /// `final`.
    pub is_final:     bool,
    /// `abstract`.
    pub is_abstract:  bool,
    /// `transient`.
    pub is_transient: bool
}

impl Modifiers {
    /// `public` only.
    pub const fn public() -> Self {
        Self {
            is_public:    true,
            is_static:    false,
            is_final:     false,
            is_abstract:  false,
            is_transient: false
        }
    }

    /// `private`: no flag set.
    pub const fn private() -> Self {
        Self {
            is_public:    false,
            is_static:    false,
            is_final:     false,
            is_abstract:  false,
            is_transient: false
        }
    }

    /// Same modifiers plus `static`.
    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Same modifiers plus `final`.
    #[must_use]
    pub const fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Same modifiers plus `abstract`.
    #[must_use]
    pub const fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Same modifiers plus `transient`.
    #[must_use]
    pub const fn with_transient(mut self) -> Self {
        self.is_transient = true;
        self
    }
}

/// Generic type parameter with an optional upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    /// Variable name (`T`).
    pub name:  String,
    /// Upper bound (`T extends Bound`).
    pub bound: Option<TypeRef>
}

impl TypeParam {
    /// Unbounded parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            bound: None
        }
    }

    /// Bounded parameter.
    pub fn bounded(name: impl Into<String>, bound: TypeRef) -> Self {
        Self {
            name:  name.into(),
            bound: Some(bound)
        }
    }
}

/// Reflected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name.
    pub name:        String,
    /// Declared type.
    pub ty:          TypeRef,
    /// Modifiers.
    pub modifiers:   Modifiers,
    /// Annotations in declaration order.
    pub annotations: Vec<AnnotationMeta>,
    /// Initializer expression as source text.
    pub initializer: Option<String>,
    /// Documentation comment.
    pub doc:         Option<String>
}

impl FieldMeta {
    /// Private field without annotations.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::private(),
            annotations: Vec::new(),
            initializer: None,
            doc: None
        }
    }

    /// Add an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationMeta) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Replace the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the initializer expression.
    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    /// First annotation of type `name`.
    pub fn annotation(&self, name: &str) -> Option<&AnnotationMeta> {
        annotation::find(&self.annotations, name)
    }

    /// Whether an annotation of type `name` is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Whether this is the primary-key field.
    pub fn is_id(&self) -> bool {
        self.has_annotation(markers::ID)
    }
}

/// Reflected method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMeta {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty:   TypeRef
}

impl ParamMeta {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty
        }
    }
}

/// Reflected method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMeta {
    /// Method name.
    pub name:        String,
    /// Parameters in order.
    pub params:      Vec<ParamMeta>,
    /// Return type; `None` is `void`.
    pub return_type: Option<TypeRef>,
    /// Modifiers.
    pub modifiers:   Modifiers,
    /// Annotations.
    pub annotations: Vec<AnnotationMeta>,
    /// Body as source text.
    pub body:        Option<String>
}

impl MethodMeta {
    /// Public `void` method without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            params:      Vec::new(),
            return_type: None,
            modifiers:   Modifiers::public(),
            annotations: Vec::new(),
            body:        None
        }
    }

    /// Public getter `get<Field>()` returning `ty`.
    pub fn getter(field: &str, ty: TypeRef) -> Self {
        Self::new(naming::getter_name(field)).returning(ty)
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    /// Set the return type.
    #[must_use]
    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Replace the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the body source.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationMeta) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Whether an annotation of type `name` is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        annotation::find(&self.annotations, name).is_some()
    }
}

/// Reflected class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityMeta {
    /// Fully-qualified name.
    pub name:        String,
    /// Direct supertype, with its type arguments.
    pub supertype:   Option<TypeRef>,
    /// Declared fields in order.
    pub fields:      Vec<FieldMeta>,
    /// Declared methods in order.
    pub methods:     Vec<MethodMeta>,
    /// Class annotations.
    pub annotations: Vec<AnnotationMeta>,
    /// Generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Class kind.
    pub kind:        ClassKind,
    /// `abstract` class.
    pub is_abstract: bool,
    /// Documentation comment.
    pub doc:         Option<String>
}

impl EntityMeta {
    /// Concrete class without members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the supertype.
    #[must_use]
    pub fn extends(mut self, supertype: TypeRef) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Add a field.
    #[must_use]
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method.
    #[must_use]
    pub fn method(mut self, method: MethodMeta) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a class annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationMeta) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a generic parameter.
    #[must_use]
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    /// Mark as abstract.
    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the kind.
    #[must_use]
    pub fn of_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// Package of the class.
    pub fn package(&self) -> &str {
        naming::package_of(&self.name)
    }

    /// Simple name of the class.
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.name)
    }

    /// Self type, narrowed with the class's own type variables.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.type_params.iter().map(|param| TypeRef::new(param.name.clone()))
        )
    }

    /// First class annotation of type `name`.
    pub fn annotation(&self, name: &str) -> Option<&AnnotationMeta> {
        annotation::find(&self.annotations, name)
    }

    /// Whether a class annotation of type `name` is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Whether the class carries the entity marker.
    pub fn is_entity(&self) -> bool {
        self.has_annotation(markers::ENTITY)
    }

    /// Whether `name` is one of the class's type variables.
    pub fn has_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|param| param.name == name)
    }

    /// Public method named `name` declared on this class.
    pub fn public_method(&self, name: &str) -> Option<&MethodMeta> {
        self.methods
            .iter()
            .find(|method| method.name == name && method.modifiers.is_public)
    }

    /// Names of the synthetic fields declared through `DtoExtend`.
    pub fn extend_field_names(&self) -> Vec<&str> {
        self.annotation(markers::DTO_EXTEND)
            .and_then(AnnotationMeta::value)
            .map(|value| {
                value
                    .annotations()
                    .into_iter()
                    .filter_map(|param| param.str_param("value"))
                    .collect()
            })
            .unwrap_or_default()
    }
}
