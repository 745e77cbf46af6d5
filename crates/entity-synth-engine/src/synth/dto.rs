// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! DTO class synthesis.
//!
//! For an entity `shop.model.Order extends Base` the DTO looks like:
//!
//! ```text
//! public class shop.api.dto.OrderDTO extends shop.api.dto.BaseDTO {
//!     private java.lang.String number;        // simple field
//!     private java.lang.Long customerId;      // DtoInclude(ID)
//!     private java.util.List<LineDTO> lines = new java.util.ArrayList();
//!     // getters and setters for every non-static field
//! }
//! ```
//!
//! A root DTO implements the configured marker interface instead of
//! extending anything. Only the entity's own fields are mirrored; inherited
//! ones live on the super DTO.

use tracing::{debug, error, info, warn};

use super::Synthesizer;
use crate::{
    artifact::{
        ArtifactClass, ArtifactField, ArtifactKind, ArtifactMethod, ArtifactParam, FieldInit,
        MethodBody
    },
    classify::Classifier,
    error::{GenerationError, Result},
    meta::{
        AnnotationValue, ClassKind, EntityMeta, MethodMeta, Modifiers, TypeParam, TypeRef, markers
    },
    projection::{ProjectionDecision, ProjectionKind}
};

/// Collection interfaces and the concrete type used to initialize them.
const COLLECTION_DEFAULTS: &[(&str, &str)] = &[
    ("java.util.List", "java.util.ArrayList"),
    ("java.util.Set", "java.util.HashSet"),
    ("java.util.SortedSet", "java.util.TreeSet"),
    ("java.util.Collection", "java.util.HashSet")
];

/// Build the DTO of `entity`; `parent` is its entity supertype, whose DTO
/// already exists.
///
/// # Errors
///
/// Returns [`GenerationError::DuplicateArtifact`] when two projected fields
/// end up with the same DTO field name.
pub(super) fn build(
    synth: &Synthesizer<'_>,
    entity: &EntityMeta,
    parent: Option<&EntityMeta>
) -> Result<ArtifactClass> {
    let classifier = synth.classifier;
    let config = classifier.config();

    let mut class = ArtifactClass::new(config.dto_name(&entity.name), ArtifactKind::Class);
    class.modifiers.is_abstract = entity.is_abstract;
    class.doc = entity.doc.clone();

    match (parent, entity.supertype.as_ref()) {
        (Some(parent), Some(supertype)) => {
            class.extends = Some(TypeRef::generic(
                config.dto_name(&parent.name),
                supertype
                    .args
                    .iter()
                    .map(|arg| classifier.convert_type(arg, entity).unwrap_or_else(|| arg.clone()))
            ));
        }
        _ => class
            .implements
            .push(TypeRef::new(config.dto_interface_class.clone()))
    }

    class.type_params = entity
        .type_params
        .iter()
        .map(|param| TypeParam {
            name:  param.name.clone(),
            bound: param.bound.as_ref().map(|bound| {
                classifier
                    .convert_type(bound, entity)
                    .unwrap_or_else(|| bound.clone())
            })
        })
        .collect();

    for field in &entity.fields {
        let ProjectionDecision::Include(projection) = synth.projector.project(field, entity) else {
            continue;
        };
        let modifiers = Modifiers {
            is_transient: field.modifiers.is_transient,
            is_static: field.modifiers.is_static,
            is_final: field.modifiers.is_final,
            ..Modifiers::private()
        };
        let init = match (&field.initializer, modifiers.is_final) {
            (Some(initializer), true) => Some(FieldInit::Expr(initializer.clone())),
            _ => default_init(classifier, &projection.ty, projection.kind)
        };
        if class.field(&projection.name).is_some() {
            return Err(GenerationError::DuplicateArtifact {
                name: format!("{}.{}", class.name, projection.name)
            });
        }
        let dto_field = ArtifactField {
            name: projection.name,
            ty: projection.ty,
            modifiers,
            init,
            doc: field.doc.clone()
        };
        add_field(&mut class, dto_field);
    }

    add_extend_fields(&mut class, entity);

    if config.generate_methods {
        for method in entity
            .methods
            .iter()
            .filter(|method| method.has_annotation(markers::DTO_METHOD))
        {
            if let Some(mirrored) = mirror_method(classifier, entity, method) {
                info!(dto = %class.name, method = %mirrored.name, "mirroring DTO method");
                class.methods.push(mirrored);
            }
        }
    }

    Ok(class)
}

/// Add a field plus its accessors.
///
/// Static fields get no accessors; final fields get a getter only.
fn add_field(class: &mut ArtifactClass, field: ArtifactField) {
    if !field.modifiers.is_static {
        class.add_accessors(&field);
        if field.modifiers.is_final {
            let setter = crate::naming::setter_name(&field.name);
            class.methods.retain(|method| method.name != setter);
        }
    }
    class.fields.push(field);
}

/// Empty collection initializer for collection-typed fields.
pub(super) fn default_init(
    classifier: Classifier<'_>,
    ty: &TypeRef,
    kind: ProjectionKind
) -> Option<FieldInit> {
    if ty.array {
        return None;
    }
    let collection = match kind {
        ProjectionKind::NestedCollection(collection) => collection,
        _ => classifier.resolver().collection_kind(&ty.name)?
    };
    let known = COLLECTION_DEFAULTS
        .iter()
        .find(|(interface, _)| *interface == ty.name)
        .map(|(_, concrete)| TypeRef::new(*concrete));
    let is_interface = classifier
        .provider()
        .class_by_name(&ty.name)
        .is_some_and(|class| class.kind == ClassKind::Interface);
    let concrete = match known {
        Some(concrete) => concrete,
        None if is_interface => TypeRef::new(collection.default_impl()),
        None => ty.erasure()
    };
    Some(FieldInit::Empty(concrete))
}

/// Synthetic fields declared through `DtoExtend(Parameter(value, type))`.
fn add_extend_fields(class: &mut ArtifactClass, entity: &EntityMeta) {
    let Some(extend) = entity
        .annotation(markers::DTO_EXTEND)
        .and_then(|annotation| annotation.value())
    else {
        return;
    };
    for param in extend.annotations() {
        let Some(name) = param.str_param("value") else {
            warn!(entity = %entity.name, "DtoExtend parameter without a name skipped");
            continue;
        };
        let Some(ty) = param
            .get("type")
            .and_then(AnnotationValue::as_type)
            .map(|ty| ty.qualified_in(entity.package()))
        else {
            warn!(
                entity = %entity.name,
                field = name,
                "DtoExtend parameter without a type skipped"
            );
            continue;
        };
        if class.field(name).is_some() {
            debug!(dto = %class.name, field = name, "DtoExtend field already present");
            continue;
        }
        add_field(class, ArtifactField::new(name, ty));
    }
}

/// Mirror a `DtoMethod` onto the DTO, converting its types.
///
/// Returns `None` (after logging) when a type cannot be represented.
fn mirror_method(
    classifier: Classifier<'_>,
    entity: &EntityMeta,
    method: &MethodMeta
) -> Option<ArtifactMethod> {
    let return_type = match &method.return_type {
        Some(ty) if !ty.is_void() => {
            let Some(converted) = classifier.convert_type(ty, entity) else {
                error!(
                    entity = %entity.name,
                    method = %method.name,
                    ty = %ty,
                    "inconvertible method return type"
                );
                return None;
            };
            Some(converted)
        }
        _ => None
    };

    let mut params = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let Some(ty) = classifier.convert_type(&param.ty, entity) else {
            error!(
                entity = %entity.name,
                method = %method.name,
                param = %param.name,
                "inconvertible method parameter"
            );
            return None;
        };
        params.push(ArtifactParam::new(param.name.clone(), ty));
    }

    let source = method.modifiers;
    let modifiers = Modifiers {
        is_public: source.is_public,
        is_static: source.is_static,
        is_abstract: source.is_abstract,
        is_final: source.is_final && !source.is_abstract,
        is_transient: false
    };
    let body = if source.is_abstract {
        MethodBody::None
    } else {
        MethodBody::Source(method.body.clone().unwrap_or_default())
    };

    Some(ArtifactMethod {
        name: method.name.clone(),
        type_params: Vec::new(),
        return_type,
        params,
        modifiers,
        annotations: Vec::new(),
        body,
        doc: None
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        artifact::{ArtifactClass, FieldInit, MethodBody},
        classify::{Classifier, StandardTypes},
        config::GeneratorConfig,
        error::GenerationError,
        meta::{
            AnnotationMeta, EntityMeta, FieldMeta, InMemoryProvider, MetadataProvider,
            MethodMeta, Modifiers, ParamMeta, TypeParam, TypeRef
        },
        registry::ArtifactFamily,
        synth::Synthesizer
    };

    fn entity(name: &str) -> EntityMeta {
        EntityMeta::new(name).annotated(AnnotationMeta::new("Entity"))
    }

    fn id() -> FieldMeta {
        FieldMeta::new("id", TypeRef::new("java.lang.Long")).annotated(AnnotationMeta::new("Id"))
    }

    fn dto_of(provider: &InMemoryProvider, config: &GeneratorConfig, name: &str) -> ArtifactClass {
        let types = StandardTypes::new();
        let synth = Synthesizer::new(Classifier::new(provider, &types, config));
        let result = synth
            .synthesize(provider.class_by_name(name).unwrap())
            .unwrap();
        let (artifacts, _) = synth.finish().unwrap();
        artifacts.get(result.dto.name()).unwrap().clone()
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("shop.model", "shop.api", "shop.data")
    }

    #[test]
    fn root_dto_implements_marker_interface() {
        let provider: InMemoryProvider = [entity("shop.model.User")
            .field(id())
            .field(FieldMeta::new("name", TypeRef::new("java.lang.String")))]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.User");
        assert_eq!(dto.name, "shop.api.dto.UserDTO");
        assert_eq!(dto.implements, [TypeRef::new("java.io.Serializable")]);
        assert!(dto.extends.is_none());
        assert_eq!(dto.fields.len(), 2);
        for accessor in ["getId", "setId", "getName", "setName"] {
            assert!(dto.has_method(accessor), "{accessor}");
        }
    }

    #[test]
    fn child_dto_extends_narrowed_parent() {
        let provider: InMemoryProvider = [
            entity("shop.model.Base")
                .abstract_class()
                .type_param(TypeParam::new("T"))
                .field(id()),
            entity("shop.model.Tag").field(id()),
            entity("shop.model.Post").extends(TypeRef::generic("shop.model.Base", [
                TypeRef::new("shop.model.Tag")
            ]))
        ]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Post");
        assert_eq!(
            dto.extends.as_ref().unwrap().to_string(),
            "shop.api.dto.BaseDTO<shop.api.dto.TagDTO>"
        );
        assert!(dto.implements.is_empty());
        assert!(dto.fields.is_empty());
    }

    #[test]
    fn abstract_entity_and_bounded_params() {
        let provider: InMemoryProvider = [
            entity("shop.model.Tag").field(id()),
            entity("shop.model.Holder")
                .abstract_class()
                .type_param(TypeParam::bounded("T", TypeRef::new("shop.model.Tag")))
        ]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Holder");
        assert!(dto.modifiers.is_abstract);
        assert_eq!(dto.type_params[0].bound, Some(TypeRef::new("shop.api.dto.TagDTO")));
    }

    #[test]
    fn modifiers_and_initializers() {
        let provider: InMemoryProvider = [entity("shop.model.Item")
            .field(id())
            .field(
                FieldMeta::new("VERSION", TypeRef::new("int"))
                    .with_modifiers(Modifiers::private().with_static().with_final())
                    .with_initializer("3")
            )
            .field(
                FieldMeta::new("cache", TypeRef::new("java.lang.String"))
                    .with_modifiers(Modifiers::private().with_transient())
            )
            .field(FieldMeta::new(
                "tags",
                TypeRef::generic("java.util.Set", [TypeRef::new("java.lang.String")])
            ))
            .field(FieldMeta::new(
                "history",
                TypeRef::generic("java.util.LinkedList", [TypeRef::new("java.lang.String")])
            ))]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Item");

        let version = dto.field("VERSION").unwrap();
        assert!(version.modifiers.is_static && version.modifiers.is_final);
        assert_eq!(version.init, Some(FieldInit::Expr("3".into())));
        assert!(!dto.has_method("getVERSION"));

        assert!(dto.field("cache").unwrap().modifiers.is_transient);
        assert_eq!(
            dto.field("tags").unwrap().init,
            Some(FieldInit::Empty(TypeRef::new("java.util.HashSet")))
        );
        assert_eq!(
            dto.field("history").unwrap().init,
            Some(FieldInit::Empty(TypeRef::new("java.util.LinkedList")))
        );
    }

    #[test]
    fn final_instance_field_has_no_setter() {
        let provider: InMemoryProvider = [entity("shop.model.Code").field(id()).field(
            FieldMeta::new("value", TypeRef::new("java.lang.String"))
                .with_modifiers(Modifiers::private().with_final())
                .with_initializer("\"x\"")
        )]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Code");
        assert!(dto.has_method("getValue"));
        assert!(!dto.has_method("setValue"));
    }

    #[test]
    fn renamed_key_field_colliding_with_own_field_is_fatal() {
        let provider: InMemoryProvider = [
            entity("shop.model.Customer").field(id()),
            entity("shop.model.Order")
                .field(id())
                .field(FieldMeta::new("customerId", TypeRef::new("java.lang.Long")))
                .field(
                    FieldMeta::new("customer", TypeRef::new("shop.model.Customer"))
                        .annotated(AnnotationMeta::new("ManyToOne"))
                        .annotated(AnnotationMeta::new("DtoInclude").with("value", "ID"))
                )
        ]
        .into_iter()
        .collect();
        let types = StandardTypes::new();
        let config = config();
        let synth = Synthesizer::new(Classifier::new(&provider, &types, &config));

        let err = synth
            .synthesize(provider.class_by_name("shop.model.Order").unwrap())
            .unwrap_err();
        match err {
            GenerationError::DuplicateArtifact {
                name
            } => assert_eq!(name, "shop.api.dto.OrderDTO.customerId"),
            other => panic!("unexpected error: {other}")
        }
        assert_eq!(synth.registry().get(ArtifactFamily::Dto, "shop.model.Order"), None);
    }

    #[test]
    fn skip_static_fields_option() {
        let provider: InMemoryProvider = [entity("shop.model.Item").field(id()).field(
            FieldMeta::new("COUNT", TypeRef::new("int"))
                .with_modifiers(Modifiers::private().with_static())
        )]
        .into_iter()
        .collect();
        let mut config = config();
        config.skip_static_fields = true;
        assert!(dto_of(&provider, &config, "shop.model.Item").field("COUNT").is_none());
    }

    #[test]
    fn extend_fields_added_once() {
        let provider: InMemoryProvider = [entity("shop.model.Order")
            .annotated(AnnotationMeta::new("DtoExtend").with(
                "value",
                vec![
                    AnnotationMeta::new("Parameter")
                        .with("value", "total")
                        .with("type", TypeRef::new("java.math.BigDecimal")),
                    AnnotationMeta::new("Parameter")
                        .with("value", "id")
                        .with("type", TypeRef::new("java.lang.Long")),
                    AnnotationMeta::new("Parameter").with("value", "untyped")
                ]
            ))
            .field(id())]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Order");
        assert_eq!(dto.fields.len(), 2);
        assert_eq!(
            dto.field("total").unwrap().ty,
            TypeRef::new("java.math.BigDecimal")
        );
        assert!(dto.has_method("setTotal"));
    }

    #[test]
    fn dto_methods_mirrored_and_converted() {
        let provider: InMemoryProvider = [
            entity("shop.model.Tag").field(id()),
            entity("shop.model.Post")
                .field(id())
                .method(
                    MethodMeta::new("mainTag")
                        .returning(TypeRef::new("shop.model.Tag"))
                        .with_body("return null;")
                        .annotated(AnnotationMeta::new("DtoMethod"))
                )
                .method(
                    MethodMeta::new("describe")
                        .param(ParamMeta::new("raw", TypeRef::new("shop.model.Opaque")))
                        .annotated(AnnotationMeta::new("DtoMethod"))
                )
                .method(
                    MethodMeta::new("check")
                        .with_modifiers(Modifiers::public().with_abstract())
                        .returning(TypeRef::new("boolean"))
                        .annotated(AnnotationMeta::new("DtoMethod"))
                )
                .method(MethodMeta::new("internal"))
        ]
        .into_iter()
        .collect();
        let dto = dto_of(&provider, &config(), "shop.model.Post");

        let main_tag = dto.method("mainTag").unwrap();
        assert_eq!(main_tag.return_type, Some(TypeRef::new("shop.api.dto.TagDTO")));
        assert_eq!(main_tag.body, MethodBody::Source("return null;".into()));

        let check = dto.method("check").unwrap();
        assert!(check.modifiers.is_abstract);
        assert_eq!(check.body, MethodBody::None);

        assert!(!dto.has_method("describe"));
        assert!(!dto.has_method("internal"));
    }

    #[test]
    fn dto_methods_disabled() {
        let provider: InMemoryProvider = [entity("shop.model.Post").field(id()).method(
            MethodMeta::new("summary")
                .returning(TypeRef::new("java.lang.String"))
                .annotated(AnnotationMeta::new("DtoMethod"))
        )]
        .into_iter()
        .collect();
        let mut config = config();
        config.generate_methods = false;
        assert!(!dto_of(&provider, &config, "shop.model.Post").has_method("summary"));
    }
}
