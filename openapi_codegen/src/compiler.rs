use crate::declaration::{FieldDeclaration, build_field, build_type, inline_item_type_name};
use crate::error::CodegenError;
use crate::json_pointer;
use crate::language::Language;
use crate::naming::to_pascal_case;
use crate::schema::{Document, SchemaNode, SchemaType, Shape};
use crate::settings::GenerateSettings;
use crate::unit::{GenerationUnit, build_unit};
use indexmap::IndexMap;

/// Compile every top-level object schema of a document.
///
/// Units are returned in schema-table order, each schema's nested units before the
/// schema itself. Units are not deduplicated by name.
///
/// # Errors
///
/// Returns `CodegenError::SchemaTableMissing` if the document has no schema table, or
/// the first error raised while compiling any schema.
pub fn compile_document(
    document: &Document,
    settings: &GenerateSettings,
) -> Result<Vec<GenerationUnit>, CodegenError> {
    let schemas: &IndexMap<String, SchemaNode> = document
        .schemas
        .as_ref()
        .ok_or(CodegenError::SchemaTableMissing)?;
    let namespace: &str = document
        .title
        .as_deref()
        .filter(|title| !to_pascal_case(title).is_empty())
        .unwrap_or(settings.default_namespace.as_str());
    let language: &dyn Language = settings.language.backend();

    let mut units: Vec<GenerationUnit> = Vec::new();
    for (name, schema) in schemas {
        if schema.r#type != Some(SchemaType::Object) {
            tracing::debug!(schema = %name, "skipping top-level schema that is not an object");
            continue;
        }
        if schema.reference.is_some() {
            tracing::debug!(schema = %name, "skipping unresolved top-level alias");
            continue;
        }
        let path: String = json_pointer::format("/components/schemas", name);
        units.extend(compile_at(name, schema, namespace, &path, language)?);
    }
    tracing::debug!(namespace, units = units.len(), "compiled document");
    Ok(units)
}

/// Compile one named object schema and every inline object nested in it.
///
/// Returns an empty sequence if `schema` is not an object.
///
/// # Errors
///
/// Returns the first schema error found in `schema` or any of its nested objects.
pub fn compile_schema(
    name: &str,
    schema: &SchemaNode,
    namespace: &str,
    settings: &GenerateSettings,
) -> Result<Vec<GenerationUnit>, CodegenError> {
    let path: String = json_pointer::format("", name);
    compile_at(name, schema, namespace, &path, settings.language.backend())
}

fn compile_at(
    name: &str,
    schema: &SchemaNode,
    namespace: &str,
    path: &str,
    language: &dyn Language,
) -> Result<Vec<GenerationUnit>, CodegenError> {
    if schema.r#type != Some(SchemaType::Object) {
        return Ok(Vec::new());
    }
    if to_pascal_case(name).is_empty() {
        return Err(CodegenError::EmptyIdentifier {
            path: path.to_string(),
            name: name.to_string(),
        });
    }
    tracing::debug!(schema = name, path, "compiling object schema");

    let mut units: Vec<GenerationUnit> = Vec::new();
    let mut fields: Vec<FieldDeclaration> = Vec::new();
    for (key, property) in schema.properties.iter().flatten() {
        let property_path: String =
            json_pointer::format(&json_pointer::format(path, "properties"), key);
        units.extend(compile_nested(key, property, namespace, &property_path, language)?);
        fields.push(build_field(
            key,
            property,
            schema.required.as_ref(),
            &property_path,
        )?);
    }

    let declaration = build_type(name, fields);
    units.push(build_unit(namespace, &declaration, language)?);
    Ok(units)
}

/// Units for the object schemas declared inline in one property: the property itself
/// when it is an inline object, or its array items when they are a titled inline object.
fn compile_nested(
    key: &str,
    property: &SchemaNode,
    namespace: &str,
    path: &str,
    language: &dyn Language,
) -> Result<Vec<GenerationUnit>, CodegenError> {
    match property.shape() {
        Shape::Object => compile_at(key, property, namespace, path, language),
        Shape::Array(Some(items)) if items.is_inline_object() => {
            // Untitled items yield nothing here; build_field reports the missing title.
            let Some(item_name) = inline_item_type_name(items) else {
                return Ok(Vec::new());
            };
            let items_path: String = json_pointer::format(path, "items");
            compile_at(&item_name, items, namespace, &items_path, language)
        }
        _ => Ok(Vec::new()),
    }
}
