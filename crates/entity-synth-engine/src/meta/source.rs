// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata provider reading Rust source.
//!
//! Rust items are reflected onto the class model the synthesizer works on:
//!
//! | Rust | Reflected as |
//! |------|--------------|
//! | `struct` | class; entity when it carries `#[entity]` |
//! | `enum` | enum class |
//! | `trait` | interface with abstract methods |
//! | `impl` block | methods of its self type |
//! | `pub` field without getter | field plus synthesized public getter |
//! | other attributes | annotations (`#[dto_include(ID)]` → `DtoInclude(value = ID)`) |
//!
//! Names follow the reflected conventions: members are camelCase,
//! annotations PascalCase, attribute keys camelCase with `ty` spelled
//! `type`. Type paths keep their last segment; a single-segment name
//! declared in the same package is qualified with it. `Option<T>` is read
//! as `T`, references as their target, slices and arrays as arrays.
//!
//! # Example
//!
//! ```rust
//! use entity_synth_engine::meta::{MetadataProvider, SourceProvider};
//!
//! let mut provider = SourceProvider::new();
//! provider
//!     .add_source(
//!         "shop.model",
//!         r#"
//!         #[entity]
//!         pub struct Customer {
//!             #[id]
//!             pub id: i64,
//!             pub display_name: String,
//!         }
//!         "#
//!     )
//!     .unwrap();
//!
//! let customer = provider.class_by_name("shop.model.Customer").unwrap();
//! assert!(customer.is_entity());
//! assert!(customer.public_method("getDisplayName").is_some());
//! ```

mod attrs;

use std::{collections::HashSet, fs, path::Path};

use darling::{FromDeriveInput, FromField};
use quote::ToTokens;
use syn::{
    Attribute, DeriveInput, Expr, File, FnArg, GenericArgument, GenericParam, Generics, ImplItem,
    Item, ItemEnum, ItemImpl, ItemStruct, ItemTrait, Lit, Meta, Pat, PathArguments, ReturnType,
    Signature, Token, TraitItem, Type, TypeParamBound, Visibility, punctuated::Punctuated
};
use tracing::{debug, info, warn};

use self::attrs::{EntityAttrs, FieldAttrs};
use super::{
    AnnotationMeta, AnnotationValue, ClassKind, EntityMeta, FieldMeta, InMemoryProvider,
    MetadataProvider, MethodMeta, Modifiers, ParamMeta, TypeParam, TypeRef, markers
};
use crate::{
    error::{GenerationError, Result},
    naming,
    utils::{
        case::{annotation_name, key_name, member_name},
        docs::extract_doc_comments
    }
};

/// Attributes that describe Rust structure rather than metadata.
const STRUCTURAL_ATTRIBUTES: &[&str] = &[
    "doc",
    "entity",
    "field",
    "derive",
    "allow",
    "warn",
    "deny",
    "expect",
    "cfg",
    "cfg_attr",
    "must_use",
    "non_exhaustive",
    "repr",
    "serde",
    "inline"
];

/// Provider built from Rust source files.
#[derive(Debug, Clone, Default)]
pub struct SourceProvider {
    classes: InMemoryProvider
}

impl SourceProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and register its items under `package`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Source`] if the source does not parse or
    /// an `#[entity]`/`#[field]` attribute is malformed.
    pub fn add_source(&mut self, package: &str, source: &str) -> Result<&mut Self> {
        let file = syn::parse_file(source).map_err(source_error)?;
        self.add_syntax(package, &file)
    }

    /// Read and register the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Source`] if the file cannot be read or
    /// parsed.
    pub fn add_file(&mut self, package: &str, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|err| GenerationError::Source(format!("{}: {err}", path.display())))?;
        debug!(path = %path.display(), package, "reading source file");
        self.add_source(package, &source)
    }

    /// Register the items of an already parsed file under `package`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Source`] if an `#[entity]` or `#[field]`
    /// attribute is malformed.
    pub fn add_syntax(&mut self, package: &str, file: &File) -> Result<&mut Self> {
        let scope = Scope {
            package,
            declared: file.items.iter().filter_map(item_ident).collect(),
            known: &self.classes
        };

        let mut classes = Vec::new();
        let mut impls = Vec::new();
        for item in &file.items {
            match item {
                Item::Struct(item) => classes.push(scope.struct_class(item)?),
                Item::Enum(item) => classes.push(scope.enum_class(item)),
                Item::Trait(item) => classes.push(scope.interface(item)),
                Item::Impl(item) => impls.push(item),
                _ => {}
            }
        }
        let methods: Vec<(String, Vec<MethodMeta>)> = impls
            .into_iter()
            .filter_map(|item| scope.impl_methods(item))
            .collect();

        let names: Vec<String> = classes.iter().map(|class| class.name.clone()).collect();
        self.classes.extend(classes);
        for (owner, methods) in methods {
            match self.classes.class_mut(&owner) {
                Some(class) => class.methods.extend(methods),
                None => warn!(owner = %owner, "impl block for unknown type skipped")
            }
        }
        for name in &names {
            if let Some(class) = self.classes.class_mut(name) {
                add_field_getters(class);
            }
        }
        info!(package, classes = names.len(), "source registered");
        Ok(self)
    }

    /// Reflected classes.
    pub fn into_inner(self) -> InMemoryProvider {
        self.classes
    }
}

impl MetadataProvider for SourceProvider {
    fn class_by_name(&self, name: &str) -> Option<&EntityMeta> {
        self.classes.class_by_name(name)
    }

    fn all_known_classes(&self) -> Vec<&EntityMeta> {
        self.classes.all_known_classes()
    }
}

/// Name resolution context of one source file.
struct Scope<'s> {
    package:  &'s str,
    declared: HashSet<String>,
    known:    &'s InMemoryProvider
}

impl Scope<'_> {
    fn qualify(&self, name: &str) -> String {
        let qualified = format!("{}.{name}", self.package);
        if self.declared.contains(name) || self.known.class_by_name(&qualified).is_some() {
            qualified
        } else {
            name.to_string()
        }
    }

    /// Reflected type; `None` for `()`.
    fn type_ref(&self, ty: &Type) -> Option<TypeRef> {
        match ty {
            Type::Path(path) => {
                let segment = path.path.segments.last()?;
                let args: Vec<TypeRef> = match &segment.arguments {
                    PathArguments::AngleBracketed(generic) => generic
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Type(ty) => self.type_ref(ty),
                            _ => None
                        })
                        .collect(),
                    _ => Vec::new()
                };
                let name = segment.ident.to_string();
                if name == "Option"
                    && let [inner] = args.as_slice()
                {
                    return Some(inner.clone());
                }
                Some(TypeRef::generic(self.qualify(&name), args))
            }
            Type::Reference(reference) => self.type_ref(&reference.elem),
            Type::Paren(paren) => self.type_ref(&paren.elem),
            Type::Group(group) => self.type_ref(&group.elem),
            Type::Slice(slice) => self.type_ref(&slice.elem).map(TypeRef::into_array),
            Type::Array(array) => self.type_ref(&array.elem).map(TypeRef::into_array),
            Type::Tuple(tuple) if tuple.elems.is_empty() => None,
            other => Some(TypeRef::new(other.to_token_stream().to_string()))
        }
    }

    fn type_params(&self, generics: &Generics) -> Vec<TypeParam> {
        generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(param) => Some(param),
                _ => None
            })
            .map(|param| {
                let bound = param.bounds.iter().find_map(|bound| match bound {
                    TypeParamBound::Trait(bound) => bound.path.segments.last(),
                    _ => None
                });
                TypeParam {
                    name:  param.ident.to_string(),
                    bound: bound
                        .map(|segment| TypeRef::new(self.qualify(&segment.ident.to_string())))
                }
            })
            .collect()
    }

    fn struct_class(&self, item: &ItemStruct) -> Result<EntityMeta> {
        let input = DeriveInput::from(item.clone());
        let attrs = EntityAttrs::from_derive_input(&input).map_err(source_error)?;
        let package = attrs.package.as_deref().unwrap_or(self.package);

        let mut class = EntityMeta::new(format!("{package}.{}", attrs.ident));
        class.doc = extract_doc_comments(&item.attrs);
        class.type_params = self.type_params(&item.generics);
        class.is_abstract = attrs.is_abstract;
        if has_attribute(&item.attrs, "entity") {
            class.annotations.push(AnnotationMeta::new(markers::ENTITY));
        }
        class.annotations.extend(annotations(&item.attrs));
        if let Some(extends) = &attrs.extends {
            let ty: Type = syn::parse_str(extends).map_err(source_error)?;
            class.supertype = self.type_ref(&ty);
        }

        for field in &item.fields {
            let attrs = FieldAttrs::from_field(field).map_err(source_error)?;
            let Some(ident) = &attrs.ident else {
                debug!(class = %class.name, "unnamed field skipped");
                continue;
            };
            let Some(ty) = self.type_ref(&attrs.ty) else {
                debug!(class = %class.name, field = %ident, "unit-typed field skipped");
                continue;
            };
            let modifiers = Modifiers {
                is_public: matches!(field.vis, Visibility::Public(_)),
                is_static: attrs.is_static,
                is_final: attrs.is_final,
                is_transient: attrs.transient,
                is_abstract: false
            };
            let mut meta = FieldMeta::new(member_name(&ident.to_string()), ty)
                .with_modifiers(modifiers);
            meta.initializer = attrs.init.clone();
            meta.annotations = annotations(&field.attrs);
            meta.doc = extract_doc_comments(&field.attrs);
            class.fields.push(meta);
        }
        Ok(class)
    }

    fn enum_class(&self, item: &ItemEnum) -> EntityMeta {
        let mut class =
            EntityMeta::new(self.qualify(&item.ident.to_string())).of_kind(ClassKind::Enum);
        class.doc = extract_doc_comments(&item.attrs);
        class.annotations = annotations(&item.attrs);
        class
    }

    fn interface(&self, item: &ItemTrait) -> EntityMeta {
        let mut class =
            EntityMeta::new(self.qualify(&item.ident.to_string())).of_kind(ClassKind::Interface);
        class.doc = extract_doc_comments(&item.attrs);
        class.type_params = self.type_params(&item.generics);
        class.annotations = annotations(&item.attrs);
        for entry in &item.items {
            if let TraitItem::Fn(function) = entry {
                let mut method = self.method(&function.sig, &function.attrs, true);
                match &function.default {
                    Some(block) => method.body = Some(block.to_token_stream().to_string()),
                    None => method.modifiers.is_abstract = true
                }
                class.methods.push(method);
            }
        }
        class
    }

    /// Owner name and methods of an `impl` block.
    fn impl_methods(&self, item: &ItemImpl) -> Option<(String, Vec<MethodMeta>)> {
        let Type::Path(owner) = item.self_ty.as_ref() else {
            debug!("impl block for a non-path type skipped");
            return None;
        };
        let owner = self.qualify(&owner.path.segments.last()?.ident.to_string());
        let in_trait = item.trait_.is_some();
        let methods = item
            .items
            .iter()
            .filter_map(|entry| match entry {
                ImplItem::Fn(function) => {
                    let public = in_trait || matches!(function.vis, Visibility::Public(_));
                    let mut method = self.method(&function.sig, &function.attrs, public);
                    method.body = Some(function.block.to_token_stream().to_string());
                    Some(method)
                }
                _ => None
            })
            .collect();
        Some((owner, methods))
    }

    fn method(&self, signature: &Signature, attrs: &[Attribute], public: bool) -> MethodMeta {
        let mut method = MethodMeta::new(member_name(&signature.ident.to_string()));
        let mut has_receiver = false;
        for input in &signature.inputs {
            match input {
                FnArg::Receiver(_) => has_receiver = true,
                FnArg::Typed(typed) => {
                    let Pat::Ident(pat) = typed.pat.as_ref() else {
                        continue;
                    };
                    if let Some(ty) = self.type_ref(&typed.ty) {
                        method
                            .params
                            .push(ParamMeta::new(member_name(&pat.ident.to_string()), ty));
                    }
                }
            }
        }
        method.return_type = match &signature.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => self.type_ref(ty)
        };
        method.modifiers = Modifiers {
            is_public: public,
            is_static: !has_receiver,
            ..Modifiers::default()
        };
        method.annotations = annotations(attrs);
        method
    }
}

/// Public getter for every public instance field that lacks one.
fn add_field_getters(class: &mut EntityMeta) {
    let getters: Vec<MethodMeta> = class
        .fields
        .iter()
        .filter(|field| field.modifiers.is_public && !field.modifiers.is_static)
        .filter(|field| class.public_method(&naming::getter_name(&field.name)).is_none())
        .map(|field| {
            MethodMeta::getter(&field.name, field.ty.clone()).with_modifiers(Modifiers::public())
        })
        .collect();
    class.methods.extend(getters);
}

fn item_ident(item: &Item) -> Option<String> {
    match item {
        Item::Struct(item) => Some(item.ident.to_string()),
        Item::Enum(item) => Some(item.ident.to_string()),
        Item::Trait(item) => Some(item.ident.to_string()),
        _ => None
    }
}

fn source_error(err: impl std::fmt::Display) -> GenerationError {
    GenerationError::Source(err.to_string())
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Annotations reflected from the non-structural attributes.
pub(crate) fn annotations(attrs: &[Attribute]) -> Vec<AnnotationMeta> {
    attrs
        .iter()
        .filter(|attr| {
            !STRUCTURAL_ATTRIBUTES
                .iter()
                .any(|name| attr.path().is_ident(name))
        })
        .filter_map(|attr| annotation(&attr.meta))
        .collect()
}

/// One attribute as an annotation.
///
/// Lone paths and nested annotations become `value` (a list when there are
/// several); `key = expr` becomes a parameter; `key(a(..), b(..))` whose
/// items are all nested lists becomes a parameter holding those
/// annotations.
fn annotation(meta: &Meta) -> Option<AnnotationMeta> {
    let segment = meta.path().segments.last()?;
    let mut reflected = AnnotationMeta::new(annotation_name(&segment.ident.to_string()));
    match meta {
        Meta::Path(_) => {}
        Meta::NameValue(pair) => reflected = reflected.with("value", expr_value(&pair.value)),
        Meta::List(_) => {
            let Some(items) = nested(meta) else {
                warn!(annotation = %reflected.name, "unparsable attribute arguments ignored");
                return Some(reflected);
            };
            let mut lone = Vec::new();
            for item in &items {
                match item {
                    Meta::Path(path) => lone.push(AnnotationValue::Scalar(path_text(path))),
                    Meta::NameValue(pair) => {
                        let key = key_name(&path_text(&pair.path));
                        reflected = reflected.with(key, expr_value(&pair.value));
                    }
                    Meta::List(list) => match keyed_list(item) {
                        Some(children) => {
                            let key = key_name(&path_text(&list.path));
                            reflected = reflected.with(key, AnnotationValue::List(children));
                        }
                        None => {
                            if let Some(child) = annotation(item) {
                                lone.push(AnnotationValue::Annotation(child));
                            }
                        }
                    }
                }
            }
            match lone.len() {
                0 => {}
                1 => reflected = reflected.with("value", lone.remove(0)),
                _ => reflected = reflected.with("value", AnnotationValue::List(lone))
            }
        }
    }
    Some(reflected)
}

fn nested(meta: &Meta) -> Option<Punctuated<Meta, Token![,]>> {
    let Meta::List(list) = meta else {
        return None;
    };
    list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()
}

/// Annotations of `key(a(..), b(..))`, when every item is a nested list.
fn keyed_list(meta: &Meta) -> Option<Vec<AnnotationValue>> {
    let items = nested(meta)?;
    if items.is_empty() || !items.iter().all(|item| matches!(item, Meta::List(_))) {
        return None;
    }
    items
        .iter()
        .map(|item| annotation(item).map(AnnotationValue::Annotation))
        .collect()
}

fn path_text(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn expr_value(expr: &Expr) -> AnnotationValue {
    match expr {
        Expr::Lit(literal) => AnnotationValue::Scalar(match &literal.lit {
            Lit::Str(text) => text.value(),
            Lit::Bool(flag) => flag.value.to_string(),
            Lit::Int(number) => number.base10_digits().to_string(),
            Lit::Float(number) => number.base10_digits().to_string(),
            other => other.to_token_stream().to_string()
        }),
        Expr::Path(path) => AnnotationValue::Scalar(path_text(&path.path)),
        Expr::Array(array) => AnnotationValue::List(array.elems.iter().map(expr_value).collect()),
        other => AnnotationValue::Scalar(other.to_token_stream().to_string())
    }
}
