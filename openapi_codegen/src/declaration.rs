//! Field and type declarations built from schema nodes.

use crate::error::CodegenError;
use crate::json_pointer;
use crate::naming::to_pascal_case;
use crate::schema::{Reference, SchemaNode, SchemaType, Shape};
use crate::type_mapper::{TargetType, map_primitive};
use std::collections::BTreeSet;

/// One property of a generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// The raw schema key. Use [`FieldDeclaration::identifier`] for the rendered name.
    pub name: String,
    pub ty: TargetType,
    pub required: bool,
}

impl FieldDeclaration {
    /// The normalized property name.
    #[must_use]
    pub fn identifier(&self) -> String {
        to_pascal_case(&self.name)
    }
}

/// A named, ordered list of fields: one generated class/struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Already normalized.
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

impl TypeDeclaration {
    /// True if any field is a list and the unit needs the collection import.
    #[must_use]
    pub fn uses_lists(&self) -> bool {
        self.fields.iter().any(|f| f.ty.is_list())
    }
}

/// Build the declaration for one property.
///
/// `path` is the JSON Pointer of `property_schema` and is only used for error reporting.
///
/// # Errors
///
/// Returns `EmptyIdentifier` if `property_name` normalizes to `""`, and
/// `SchemaTypeRequired`, `UnsupportedSchemaType` or `UnknownSchemaType` if the
/// property's type is absent, `null` or unrecognized. Returns `MissingArrayItemTitle` or
/// `UnsupportedArrayItemType` if an array's items cannot be named or mapped.
pub fn build_field(
    property_name: &str,
    property_schema: &SchemaNode,
    required: Option<&BTreeSet<String>>,
    path: &str,
) -> Result<FieldDeclaration, CodegenError> {
    if to_pascal_case(property_name).is_empty() {
        return Err(CodegenError::EmptyIdentifier {
            path: path.to_string(),
            name: property_name.to_string(),
        });
    }
    let ty: TargetType = resolve_field_type(property_name, property_schema, path)?;
    let required: bool = required.is_some_and(|r| r.contains(property_name));
    tracing::trace!(property = property_name, ?ty, required, "built field");
    Ok(FieldDeclaration {
        name: property_name.to_string(),
        ty,
        required,
    })
}

/// Assemble fields into a declaration. Field order is kept as given.
#[must_use]
pub fn build_type(name: &str, fields: Vec<FieldDeclaration>) -> TypeDeclaration {
    TypeDeclaration {
        name: to_pascal_case(name),
        fields,
    }
}

fn resolve_field_type(
    property_key: &str,
    schema: &SchemaNode,
    path: &str,
) -> Result<TargetType, CodegenError> {
    match schema.shape() {
        Shape::Reference(reference) => Ok(TargetType::Named(reference_type_name(
            reference,
            property_key,
        ))),
        Shape::Primitive(ty) => map_primitive(ty).map_err(|unmapped| unmapped.at(path)),
        Shape::Object => Ok(TargetType::Named(to_pascal_case(property_key))),
        Shape::Array(items) => {
            let items_path: String = json_pointer::format(path, "items");
            let element: TargetType = resolve_array_item_type(items, &items_path)?;
            Ok(TargetType::List(Box::new(element)))
        }
        Shape::Null => Err(CodegenError::UnsupportedSchemaType {
            path: path.to_string(),
            found: SchemaType::Null.to_string(),
        }),
        Shape::Absent => Err(CodegenError::SchemaTypeRequired {
            path: path.to_string(),
        }),
        Shape::Unknown(name) => Err(CodegenError::UnknownSchemaType {
            path: path.to_string(),
            found: name.to_string(),
        }),
    }
}

/// Type name for a reference: the id, else the raw locator, else the property key.
fn reference_type_name(reference: &Reference, property_key: &str) -> String {
    let raw: &str = reference
        .id
        .as_deref()
        .or(reference.locator.as_deref())
        .unwrap_or(property_key);
    to_pascal_case(raw)
}

/// Resolve the element type of an array from its `items` schema.
fn resolve_array_item_type(
    items: Option<&SchemaNode>,
    path: &str,
) -> Result<TargetType, CodegenError> {
    let unsupported = || CodegenError::UnsupportedArrayItemType {
        path: path.to_string(),
    };
    let Some(items) = items else {
        return Err(unsupported());
    };
    match items.shape() {
        Shape::Primitive(ty) => map_primitive(ty).map_err(|unmapped| unmapped.at(path)),
        Shape::Reference(reference) => reference
            .id
            .as_deref()
            .or(reference.locator.as_deref())
            .map(|raw| TargetType::Named(to_pascal_case(raw)))
            .ok_or_else(unsupported),
        Shape::Object => inline_item_type_name(items)
            .map(TargetType::Named)
            .ok_or_else(|| CodegenError::MissingArrayItemTitle {
                path: path.to_string(),
            }),
        Shape::Array(_) | Shape::Null | Shape::Absent | Shape::Unknown(_) => Err(unsupported()),
    }
}

/// Type name of an inline object used as array items, taken from its `title`.
/// Returns `None` if the title is missing or has no alphanumeric characters.
pub(crate) fn inline_item_type_name(items: &SchemaNode) -> Option<String> {
    let title: &str = items.title.as_deref()?;
    let name: String = to_pascal_case(title);
    (!name.is_empty()).then_some(name)
}
