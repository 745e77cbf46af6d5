// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Synthesis driven by annotated Rust source.

#![cfg(feature = "source")]

use entity_synth::prelude::*;

const SHOP: &str = r#"
    /// Buyer of orders.
    #[entity]
    pub struct Customer {
        #[id]
        pub id: i64,
        pub display_name: String,
    }

    #[entity]
    pub struct Line {
        #[id]
        pub id: i64,
        pub sku: String,
    }

    #[entity]
    #[conventional_query(
        name = "findByNumber",
        is_pageable = true,
        parameters(parameter(value = "number", ty = String))
    )]
    pub struct Order {
        #[id]
        pub id: i64,
        pub number: String,
        #[many_to_one]
        #[dto_include(ID)]
        pub customer: Customer,
        #[one_to_many]
        #[dto_include(DTO)]
        pub lines: Vec<Line>,
        #[many_to_one]
        pub auditor: Customer,
        #[dto_exclude]
        pub secret: String,
    }
"#;

fn provider() -> SourceProvider {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("entity_synth_engine=debug")
        .with_test_writer()
        .try_init();
    let mut provider = SourceProvider::new();
    provider.add_source("shop.model", SHOP).unwrap();
    provider
}

fn output(provider: &SourceProvider) -> GenerationOutput {
    Generator::new(provider, GeneratorConfig::new("shop.model", "shop.api", "shop.data"))
        .unwrap()
        .run_all()
        .unwrap()
}

#[test]
fn every_entity_gets_its_artifacts() {
    let provider = provider();
    let output = output(&provider);
    let names: Vec<_> = output.artifacts().names().collect();
    assert_eq!(names, [
        "shop.api.DtoConversionService",
        "shop.api.dto.CustomerDTO",
        "shop.api.dto.LineDTO",
        "shop.api.dto.OrderDTO",
        "shop.data.dao.ICustomerDAO",
        "shop.data.dao.ILineDAO",
        "shop.data.dao.IOrderDAO"
    ]);
    assert_eq!(output.dispatch().len(), 3);
}

#[test]
fn fields_follow_projection_rules() {
    let provider = provider();
    let output = output(&provider);
    let order = output.artifact("shop.api.dto.OrderDTO").unwrap();

    let names: Vec<_> = order.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, ["id", "number", "customerId", "lines"]);
    assert_eq!(order.field("customerId").unwrap().ty, TypeRef::new("i64"));
    assert_eq!(
        order.field("lines").unwrap().ty.to_string(),
        "Vec<shop.api.dto.LineDTO>"
    );

    let customer = output.artifact("shop.api.dto.CustomerDTO").unwrap();
    assert!(customer.has_method("getDisplayName"));
}

#[test]
fn query_attributes_become_repository_methods() {
    let provider = provider();
    let output = output(&provider);
    let dao = output.artifact("shop.data.dao.IOrderDAO").unwrap();
    assert_eq!(dao.extends.as_ref().unwrap().args[1], TypeRef::new("i64"));

    let methods: Vec<_> = dao.methods_named("findByNumber").collect();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].params[0].ty, TypeRef::new("String"));
    assert_eq!(methods[1].params.len(), 2);
}

#[test]
fn malformed_source_is_an_error() {
    let mut provider = SourceProvider::new();
    let err = provider
        .add_source("shop.model", "pub struct {")
        .unwrap_err();
    assert!(matches!(err, GenerationError::Source(_)));
}
