//! End-to-end: OpenAPI text in, generated units out, through the public API only.

use openapi_codegen::{
    CodegenError, Document, DocumentFormat, GenerateSettings, GenerationUnit, TargetLanguage,
    compile_document, parse_document,
};

const SHOP_YAML: &str = r"
openapi: 3.0.3
info:
  title: shop-api
  version: 2.1.0
paths: {}
components:
  schemas:
    Order:
      type: object
      required: [id, Items]
      properties:
        id:
          type: integer
        Items:
          type: array
          items:
            $ref: '#/components/schemas/LineItem'
        shipping:
          type: object
          properties:
            street:
              type: string
            express:
              type: boolean
        total:
          type: number
    LineItem:
      type: object
      required: [sku]
      properties:
        sku:
          type: string
        quantity:
          type: integer
    Currency:
      type: string
";

fn compile(text: &str, format: DocumentFormat, settings: &GenerateSettings) -> Vec<GenerationUnit> {
    let document: Document = parse_document(text, format).expect("document should parse");
    compile_document(&document, settings).expect("document should compile")
}

fn names(units: &[GenerationUnit]) -> Vec<&str> {
    units.iter().map(|u| u.name.as_str()).collect()
}

#[test]
fn shop_csharp() {
    let units: Vec<GenerationUnit> =
        compile(SHOP_YAML, DocumentFormat::Yaml, &GenerateSettings::default());
    assert_eq!(vec!["Shipping", "Order", "LineItem"], names(&units));

    let expected_shipping: &str = r"using System;

namespace ShopApi
{
    public class Shipping
    {
        public string Street { get; set; }
        public bool Express { get; set; }
    }
}
";
    assert_eq!(expected_shipping, units[0].source);

    let expected_order: &str = r"using System;
using System.Collections.Generic;

namespace ShopApi
{
    public class Order
    {
        public required int Id { get; set; }
        public required List<LineItem> Items { get; set; }
        public Shipping Shipping { get; set; }
        public double Total { get; set; }
    }
}
";
    assert_eq!(expected_order, units[1].source);
}

#[test]
fn shop_rust() {
    let settings = GenerateSettings {
        language: TargetLanguage::Rust,
        ..GenerateSettings::default()
    };
    let units: Vec<GenerationUnit> = compile(SHOP_YAML, DocumentFormat::Yaml, &settings);

    let expected_line_item: &str = r"//! `LineItem` in module `shop_api`. Generated by openapi-codegen. Do not edit manually.

#![allow(unused_imports)]

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub quantity: Option<i32>,
}
";
    assert_eq!(expected_line_item, units[2].source);
    assert!(units[1].source.contains("    pub items: Vec<LineItem>,\n"));
    assert!(units[1].source.contains("use std::vec::Vec;\n"));
}

#[test]
fn model_json_without_title_uses_default_namespace() {
    let text: &str = r#"{
        "openapi": "3.0.0",
        "info": {"version": "1.0.0"},
        "components": {"schemas": {
            "Model": {
                "type": "object",
                "required": ["Name"],
                "properties": {
                    "Name": {"type": "string"},
                    "Age": {"type": "integer"}
                }
            }
        }}
    }"#;
    let units: Vec<GenerationUnit> =
        compile(text, DocumentFormat::Json, &GenerateSettings::default());
    assert_eq!(vec!["Model"], names(&units));
    assert!(units[0].source.contains("namespace GeneratedClasses\n"));
    assert!(units[0].source.contains("public required string Name { get; set; }"));
    assert!(units[0].source.contains("public int Age { get; set; }"));
}

#[test]
fn empty_schema_table_compiles_to_nothing() {
    let units: Vec<GenerationUnit> = compile(
        "openapi: 3.0.0\ncomponents:\n  schemas: {}\n",
        DocumentFormat::Yaml,
        &GenerateSettings::default(),
    );
    assert!(units.is_empty());
}

#[test]
fn missing_schema_table_is_an_error() {
    let document: Document =
        parse_document("openapi: 3.0.0\npaths: {}\n", DocumentFormat::Yaml).expect("parse");
    let err: CodegenError =
        compile_document(&document, &GenerateSettings::default()).unwrap_err();
    assert!(matches!(err, CodegenError::SchemaTableMissing));
}

#[test]
fn missing_type_reports_path() {
    let text: &str = r"
components:
  schemas:
    Model:
      type: object
      properties:
        Name: {}
";
    let document: Document = parse_document(text, DocumentFormat::Yaml).expect("parse");
    let err: CodegenError =
        compile_document(&document, &GenerateSettings::default()).unwrap_err();
    assert_eq!(
        "/components/schemas/Model/properties/Name: schema type is required",
        err.to_string()
    );
}

#[test]
fn recursive_schema_references_itself() {
    let text: &str = r"
components:
  schemas:
    TreeNode:
      type: object
      properties:
        label:
          type: string
        parent:
          $ref: '#/components/schemas/TreeNode'
        children:
          type: array
          items:
            $ref: '#/components/schemas/TreeNode'
";
    let units: Vec<GenerationUnit> =
        compile(text, DocumentFormat::Yaml, &GenerateSettings::default());
    assert_eq!(vec!["TreeNode"], names(&units));
    assert!(units[0].source.contains("public TreeNode Parent { get; set; }"));
    assert!(units[0].source.contains("public List<TreeNode> Children { get; set; }"));
}

#[test]
fn top_level_alias_declares_target_members() {
    let text: &str = r"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
    Animal:
      $ref: '#/components/schemas/Pet'
";
    let units: Vec<GenerationUnit> =
        compile(text, DocumentFormat::Yaml, &GenerateSettings::default());
    assert_eq!(vec!["Pet", "Animal"], names(&units));

    let expected_animal: &str = r"using System;

namespace GeneratedClasses
{
    public class Animal
    {
        public string Name { get; set; }
    }
}
";
    assert_eq!(expected_animal, units[1].source);
}

#[test]
fn recursive_schema_rust_boxes_references() {
    let text: &str = r"
info:
  title: tree
components:
  schemas:
    Node:
      type: object
      required: [children]
      properties:
        parent:
          $ref: '#/components/schemas/Node'
        children:
          type: array
          items:
            $ref: '#/components/schemas/Node'
";
    let settings = GenerateSettings {
        language: TargetLanguage::Rust,
        ..GenerateSettings::default()
    };
    let units: Vec<GenerationUnit> = compile(text, DocumentFormat::Yaml, &settings);

    let expected: &str = r"//! `Node` in module `tree`. Generated by openapi-codegen. Do not edit manually.

#![allow(unused_imports)]

use super::*;
use std::vec::Vec;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<Box<Node>>,
    pub children: Vec<Node>,
}
";
    assert_eq!(vec!["Node"], names(&units));
    assert_eq!(expected, units[0].source);
}

#[test]
fn non_ascii_keys_keep_their_letters() {
    let text: &str = r"
components:
  schemas:
    Maß:
      type: object
      properties:
        größe:
          type: number
";
    let units: Vec<GenerationUnit> =
        compile(text, DocumentFormat::Yaml, &GenerateSettings::default());
    assert_eq!(vec!["Maß"], names(&units));
    assert!(units[0].source.contains("public double Größe { get; set; }"));
}

#[test]
fn property_key_without_identifier_characters_is_an_error() {
    let text: &str = r#"{"components": {"schemas": {
        "Price": {"type": "object", "properties": {"$": {"type": "number"}}}
    }}}"#;
    let document: Document = parse_document(text, DocumentFormat::Json).expect("parse");
    let err: CodegenError =
        compile_document(&document, &GenerateSettings::default()).unwrap_err();
    assert_eq!(
        "/components/schemas/Price/properties/$: `$` has no letters or digits to form an identifier",
        err.to_string()
    );
}
