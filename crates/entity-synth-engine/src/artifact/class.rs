// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Classes, members and parameters of generated artifacts.

use std::fmt::Write as _;

use super::{ArtifactKind, MethodBody};
use crate::{
    meta::{AnnotationMeta, Modifiers, TypeParam, TypeRef},
    naming
};

/// Initial value of a generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInit {
    /// Fresh empty instance of the given concrete type.
    Empty(TypeRef),
    /// Initializer copied as source text.
    Expr(String)
}

/// Generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactField {
    /// Field name.
    pub name:      String,
    /// Field type.
    pub ty:        TypeRef,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Initializer.
    pub init:      Option<FieldInit>,
    /// Documentation comment.
    pub doc:       Option<String>
}

impl ArtifactField {
    /// Private field without initializer.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::private(),
            init: None,
            doc: None
        }
    }
}

/// Generated method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactParam {
    /// Parameter name.
    pub name:        String,
    /// Parameter type.
    pub ty:          TypeRef,
    /// Annotations on the parameter.
    pub annotations: Vec<AnnotationMeta>
}

impl ArtifactParam {
    /// Unannotated parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new()
        }
    }

    /// Add an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationMeta) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMethod {
    /// Method name.
    pub name:        String,
    /// Method-level generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Return type; `None` is `void`.
    pub return_type: Option<TypeRef>,
    /// Parameters in order.
    pub params:      Vec<ArtifactParam>,
    /// Modifiers.
    pub modifiers:   Modifiers,
    /// Annotations.
    pub annotations: Vec<AnnotationMeta>,
    /// Body.
    pub body:        MethodBody,
    /// Documentation comment.
    pub doc:         Option<String>
}

impl ArtifactMethod {
    /// Public bodiless `void` method.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            type_params: Vec::new(),
            return_type: None,
            params:      Vec::new(),
            modifiers:   Modifiers::public(),
            annotations: Vec::new(),
            body:        MethodBody::None,
            doc:         None
        }
    }

    /// Set the return type.
    #[must_use]
    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, param: ArtifactParam) -> Self {
        self.params.push(param);
        self
    }

    /// Add a method-level generic parameter.
    #[must_use]
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
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

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: MethodBody) -> Self {
        self.body = body;
        self
    }

    /// `name(Type, Type)`; identifies an overload.
    pub fn signature(&self) -> String {
        let mut signature = format!("{}(", self.name);
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                signature.push_str(", ");
            }
            let _ = write!(signature, "{}", param.ty);
        }
        signature.push(')');
        signature
    }

    /// First annotation of type `name`.
    pub fn annotation(&self, name: &str) -> Option<&AnnotationMeta> {
        self.annotations.iter().find(|annotation| annotation.is(name))
    }
}

/// Generated class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactClass {
    /// Fully-qualified name.
    pub name:        String,
    /// Kind.
    pub kind:        ArtifactKind,
    /// Modifiers.
    pub modifiers:   Modifiers,
    /// Superclass (classes) or first superinterface (interfaces).
    pub extends:     Option<TypeRef>,
    /// Implemented interfaces.
    pub implements:  Vec<TypeRef>,
    /// Generic parameters.
    pub type_params: Vec<TypeParam>,
    /// Fields in order.
    pub fields:      Vec<ArtifactField>,
    /// Methods in order.
    pub methods:     Vec<ArtifactMethod>,
    /// Annotations.
    pub annotations: Vec<AnnotationMeta>,
    /// Documentation comment.
    pub doc:         Option<String>
}

impl ArtifactClass {
    /// Empty public artifact.
    pub fn new(name: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::public(),
            extends: None,
            implements: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            doc: None
        }
    }

    /// Simple name.
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.name)
    }

    /// Package.
    pub fn package(&self) -> &str {
        naming::package_of(&self.name)
    }

    /// Reference to this artifact, narrowed with its own type variables.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.type_params.iter().map(|param| TypeRef::new(param.name.clone()))
        )
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&ArtifactField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// First method named `name`.
    pub fn method(&self, name: &str) -> Option<&ArtifactMethod> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// All methods named `name`, in declaration order.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ArtifactMethod> {
        self.methods.iter().filter(move |method| method.name == name)
    }

    /// Whether a method named `name` is declared.
    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    /// First annotation of type `name`.
    pub fn annotation(&self, name: &str) -> Option<&AnnotationMeta> {
        self.annotations.iter().find(|annotation| annotation.is(name))
    }

    /// Add a public getter and setter for `field`.
    pub fn add_accessors(&mut self, field: &ArtifactField) {
        use super::{Expr, Statement};

        let getter = ArtifactMethod::new(naming::getter_name(&field.name))
            .returning(field.ty.clone())
            .with_body(MethodBody::Statements(vec![Statement::Return(Expr::Field(
                field.name.clone()
            ))]));
        let setter = ArtifactMethod::new(naming::setter_name(&field.name))
            .param(ArtifactParam::new("value", field.ty.clone()))
            .with_body(MethodBody::Statements(vec![Statement::Assign {
                field: field.name.clone(),
                value: Expr::var("value")
            }]));
        self.methods.push(getter);
        self.methods.push(setter);
    }
}
