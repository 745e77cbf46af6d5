// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion dispatch: the generated overload index and the runtime table.

use entity_synth::prelude::*;

#[derive(Debug)]
struct Order {
    id:    i64,
    total: i64
}

#[derive(Debug)]
struct Customer {
    name: String
}

#[derive(Debug)]
struct Unregistered;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Dto {
    Order {
        id: i64
    },
    Customer {
        name: String
    }
}

fn table() -> ConversionTable<Dto> {
    ConversionTable::builder()
        .register(|order: &Order| {
            if order.total < 0 {
                return Err(format!("order {} has a negative total", order.id));
            }
            Ok(Dto::Order {
                id: order.id
            })
        })
        .register(|customer: &Customer| {
            Ok::<_, ConversionError>(Dto::Customer {
                name: customer.name.clone()
            })
        })
        .build()
}

#[test]
fn unregistered_type_is_reported_by_name() {
    let err = table().convert(&Unregistered).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.type_name().ends_with("Unregistered"), "{}", err.type_name());
    assert!(err.to_string().starts_with("Conversion method not found: "));
}

#[test]
fn failures_keep_the_original_message() {
    let order = Order {
        id:    7,
        total: -1
    };
    let err = table().convert(&order).unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("order 7 has a negative total"));
}

#[test]
fn collections_skip_missing_elements() {
    let order = Order {
        id:    1,
        total: 5
    };
    let customer = Customer {
        name: "ann".into()
    };
    let converted = table()
        .convert_value(Value::Many(vec![
            Some(&order as &dyn Convertible),
            None,
            Some(&customer as &dyn Convertible)
        ]))
        .unwrap();
    assert_eq!(
        converted.many(),
        Some(vec![
            Dto::Order {
                id: 1
            },
            Dto::Customer {
                name: "ann".into()
            }
        ])
    );

    let single = table().convert_value(Value::One(&customer)).unwrap();
    assert_eq!(
        single.one(),
        Some(Dto::Customer {
            name: "ann".into()
        })
    );
}

#[test]
fn generated_index_misses_unknown_entities() {
    let provider: InMemoryProvider = [EntityMeta::new("app.model.User")
        .annotated(AnnotationMeta::new("Entity"))
        .field(FieldMeta::new("id", TypeRef::new("long")).annotated(AnnotationMeta::new("Id")))]
    .into_iter()
    .collect();
    let config = GeneratorConfig::new("app.model", "app.api", "app.data");
    let output = Generator::new(&provider, config)
        .unwrap()
        .run_all()
        .unwrap();

    let dispatch = output.dispatch();
    assert_eq!(
        dispatch.lookup("app.model.User"),
        Ok("convertToDto(app.model.User)")
    );

    let err = dispatch.lookup("app.model.Ghost").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.type_name(), "app.model.Ghost");
    assert!(!dispatch.contains("java.lang.Object"));
}
