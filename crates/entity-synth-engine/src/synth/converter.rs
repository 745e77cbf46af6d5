// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Converter class synthesis.
//!
//! One converter class is shared by the whole run. It starts with two
//! methods and gains one `convertToDto` overload per concrete entity:
//!
//! ```text
//! <T> T convertToDto(Object value)                    // generic entrypoint
//! List<Object> convertToDtoList(Collection<Object>)   // element-wise helper
//! UserDTO convertToDto(User value)                    // per entity
//! ```
//!
//! The generic entrypoint dispatches on the runtime type of its argument;
//! see [`DispatchIndex`](super::DispatchIndex). Collections come back as the
//! list built by the helper, so a DTO field of any other collection type
//! receives a copy in its own concrete type.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::{Synthesizer, dto};
use crate::{
    artifact::{
        ArtifactClass, ArtifactKind, ArtifactMethod, ArtifactParam, Expr, FieldInit, MethodBody,
        Statement
    },
    config::GeneratorConfig,
    meta::{EntityMeta, FieldMeta, TypeParam, TypeRef},
    naming,
    projection::{Projection, ProjectionDecision, ProjectionKind}
};

/// Name of every conversion method, generic entrypoint included.
pub const ENTRYPOINT: &str = "convertToDto";

/// Name of the collection helper.
pub const LIST_HELPER: &str = "convertToDtoList";

const VALUE: &str = "value";
const RESULT: &str = "result";
const RECORDS: &str = "records";
const RECORD: &str = "record";
const NULL_COLLECTION_MESSAGE: &str = "<null>";

/// Collection types the helper's `ArrayList` is assignable to.
const LIST_COMPATIBLE: &[&str] = &[
    "java.util.ArrayList",
    "java.util.List",
    "java.util.Collection",
    "java.lang.Iterable"
];

/// Converter class with the entrypoint and the list helper.
pub(super) fn scaffold(config: &GeneratorConfig) -> ArtifactClass {
    let object = TypeRef::new(config.object_type.clone());
    let objects = TypeRef::generic("java.util.Collection", [object.clone()]);
    let list = TypeRef::generic(config.repository.list_type.clone(), [object.clone()]);
    let result_type = TypeRef::new("T");

    let mut class = ArtifactClass::new(config.converter_name(), ArtifactKind::Class);

    let entrypoint = ArtifactMethod::new(ENTRYPOINT)
        .type_param(TypeParam::new("T"))
        .returning(result_type.clone())
        .param(ArtifactParam::new(VALUE, object.clone()))
        .with_body(MethodBody::Statements(vec![
            Statement::If {
                condition: Expr::var(VALUE).is_null(),
                then:      vec![Statement::Return(Expr::Null)]
            },
            Statement::If {
                condition: Expr::InstanceOf {
                    value: Box::new(Expr::var(VALUE)),
                    ty:    TypeRef::new("java.util.Collection")
                },
                then:      vec![Statement::Return(
                    Expr::Invoke {
                        target: None,
                        method: LIST_HELPER.into(),
                        args:   vec![Expr::var(VALUE).cast(objects.clone())]
                    }
                    .cast(result_type.clone())
                )]
            },
            Statement::Return(
                Expr::Lookup {
                    value: Box::new(Expr::var(VALUE))
                }
                .cast(result_type)
            )
        ]));

    let helper = ArtifactMethod::new(LIST_HELPER)
        .returning(list.clone())
        .param(ArtifactParam::new(RECORDS, objects))
        .with_body(MethodBody::Statements(vec![
            Statement::If {
                condition: Expr::var(RECORDS).is_null(),
                then:      vec![Statement::Throw {
                    ty:      TypeRef::new("java.lang.IllegalStateException"),
                    message: NULL_COLLECTION_MESSAGE.into()
                }]
            },
            Statement::Declare {
                name:  RESULT.into(),
                ty:    list,
                value: Expr::New(TypeRef::new("java.util.ArrayList"))
            },
            Statement::ForEach {
                var:      RECORD.into(),
                ty:       object,
                iterable: Expr::var(RECORDS),
                body:     vec![
                    Statement::If {
                        condition: Expr::var(RECORD).is_null(),
                        then:      vec![Statement::Continue]
                    },
                    Statement::Expr(Expr::Invoke {
                        target: Some(Box::new(Expr::var(RESULT))),
                        method: "add".into(),
                        args:   vec![Expr::Invoke {
                            target: None,
                            method: ENTRYPOINT.into(),
                            args:   vec![Expr::var(RECORD)]
                        }]
                    })
                ]
            },
            Statement::Return(Expr::var(RESULT))
        ]));

    class.methods.push(entrypoint);
    class.methods.push(helper);
    class
}

/// Put the per-entity overloads in signature order, after the scaffold
/// methods. Parallel workers append them in completion order.
pub(super) fn order_overloads(converter: &mut ArtifactClass, object_type: &str) {
    converter.methods.sort_by_cached_key(|method| {
        let typed = method.name == ENTRYPOINT
            && method
                .params
                .first()
                .is_some_and(|param| param.ty.name != object_type);
        if typed {
            (1, method.signature())
        } else {
            (0, String::new())
        }
    });
}

/// `convertToDto` overload for `entity`, copying every projected field of
/// the entity and its `ancestors`.
///
/// Fields whose DTO setter or entity getter is missing are skipped with a
/// warning, unless they were declared through `DtoExtend`.
pub(super) fn build(
    synth: &Synthesizer<'_>,
    entity: &EntityMeta,
    ancestors: &[&EntityMeta]
) -> ArtifactMethod {
    let config = synth.classifier.config();
    let provider = synth.classifier.provider();
    let dto_name = config.dto_name(&entity.name);
    let dto = TypeRef::new(dto_name.clone());

    let mut body = vec![Statement::Declare {
        name:  RESULT.into(),
        ty:    dto.clone(),
        value: Expr::New(dto.clone())
    }];

    for (owner, field) in hierarchy_fields(entity, ancestors) {
        if field.modifiers.is_static {
            continue;
        }
        let ProjectionDecision::Include(projection) = synth.projector.project(field, owner) else {
            continue;
        };
        let getter = naming::getter_name(&projection.source_field);
        let setter = naming::setter_name(&projection.name);
        let synthetic = owner.extend_field_names().contains(&field.name.as_str());
        if !synthetic {
            if !synth.has_dto_method(&dto_name, &setter) {
                warn!(
                    entity = %entity.name,
                    field = %field.name,
                    setter = %setter,
                    "DTO setter missing, field not converted"
                );
                continue;
            }
            if !provider.has_public_method(entity, &getter) {
                warn!(
                    entity = %entity.name,
                    field = %field.name,
                    getter = %getter,
                    "entity getter missing, field not converted"
                );
                continue;
            }
        }

        let source = Expr::var(VALUE);
        match projection.kind {
            ProjectionKind::AsIs => body.push(Statement::Set {
                target: RESULT.into(),
                setter,
                value: source.get(getter)
            }),
            ProjectionKind::ForeignKey => {
                let key = projection.related.as_ref().map_or_else(
                    || "id".to_string(),
                    |related| synth.projector.key_field_name(related)
                );
                let var = format!("{}Converted", projection.name);
                body.push(Statement::Declare {
                    name:  var.clone(),
                    ty:    projection.ty.clone(),
                    value: Expr::ForeignKey {
                        target:     Box::new(source),
                        getter,
                        key_getter: naming::getter_name(&key)
                    }
                });
                body.push(Statement::SetIfPresent {
                    target: RESULT.into(),
                    setter,
                    value: Expr::var(var.clone()),
                    var
                });
            }
            ProjectionKind::Nested | ProjectionKind::NestedCollection(_) => {
                let var = format!("{}Converted", projection.name);
                let copy = collection_copy(synth, &projection);
                let converted = match copy {
                    Some(_) => TypeRef::generic("java.util.Collection", projection.ty.args.clone()),
                    None => projection.ty.clone()
                };
                body.push(Statement::Declare {
                    name:  var.clone(),
                    ty:    converted.clone(),
                    value: Expr::Dispatch {
                        value: Box::new(source.get(getter)),
                        ty:    converted
                    }
                });
                let value = match copy {
                    Some(concrete) => Expr::CopyOf {
                        ty:    concrete,
                        value: Box::new(Expr::var(var.clone()))
                    },
                    None => Expr::var(var.clone())
                };
                body.push(Statement::SetIfPresent {
                    target: RESULT.into(),
                    setter,
                    var,
                    value
                });
            }
        }
    }
    body.push(Statement::Return(Expr::var(RESULT)));

    debug!(entity = %entity.name, statements = body.len(), "converter body built");
    ArtifactMethod::new(ENTRYPOINT)
        .returning(dto)
        .param(ArtifactParam::new(VALUE, TypeRef::new(entity.name.clone())))
        .with_body(MethodBody::Statements(body))
}

/// Concrete type a converted collection is copied into, when the DTO field
/// cannot hold a list.
fn collection_copy(synth: &Synthesizer<'_>, projection: &Projection) -> Option<TypeRef> {
    let ty = &projection.ty;
    if !matches!(projection.kind, ProjectionKind::NestedCollection(_))
        || ty.array
        || LIST_COMPATIBLE.contains(&ty.name.as_str())
    {
        return None;
    }
    match dto::default_init(synth.classifier, ty, projection.kind)? {
        FieldInit::Empty(concrete) => Some(concrete.erasure()),
        FieldInit::Expr(_) => None
    }
}

/// Fields of `entity` and its ancestors, nearest declaration first; a field
/// shadowed by a descendant's field of the same name is dropped.
fn hierarchy_fields<'e>(
    entity: &'e EntityMeta,
    ancestors: &[&'e EntityMeta]
) -> Vec<(&'e EntityMeta, &'e FieldMeta)> {
    let mut seen = HashSet::new();
    std::iter::once(entity)
        .chain(ancestors.iter().copied())
        .flat_map(|owner| owner.fields.iter().map(move |field| (owner, field)))
        .filter(|(_, field)| seen.insert(field.name.as_str()))
        .collect()
}
