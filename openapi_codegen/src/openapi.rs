//! Loading OpenAPI documents into the compiler's schema model.
//!
//! Only the keywords the compiler understands are modeled; every other key is ignored
//! via serde's default behavior. Maps are `IndexMap`s so declaration order survives.

use crate::error::CodegenError;
use crate::json_pointer;
use crate::schema::{Document, Reference, SchemaNode, SchemaType};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`, any case).
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::UnsupportedDocumentFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CodegenError> {
        let extension: Option<String> = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CodegenError::UnsupportedDocumentFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    info: Option<RawInfo>,

    #[serde(default)]
    components: Option<RawComponents>,

    /// Swagger 2.0 schema table.
    #[serde(default)]
    definitions: Option<IndexMap<String, RawSchema>>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: Option<IndexMap<String, RawSchema>>,
}

/// `type` is a single name, or a list of names in OpenAPI 3.1.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
    Single(String),
    Multiple(Vec<String>),
}

impl RawType {
    fn schema_type(&self) -> SchemaType {
        match self {
            Self::Single(name) => SchemaType::parse(name),
            Self::Multiple(names) => match names.as_slice() {
                [name] => SchemaType::parse(name),
                _ => SchemaType::Unknown(names.join("|")),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default, rename = "$ref")]
    reference: Option<String>,

    #[serde(default)]
    r#type: Option<RawType>,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    properties: Option<IndexMap<String, RawSchema>>,

    #[serde(default)]
    required: Option<Vec<String>>,

    #[serde(default)]
    items: Option<Box<RawSchema>>,
}

/// Turns raw schemas into `SchemaNode`s, resolving `$ref`s against the schema table.
struct Resolver<'a> {
    table: &'a IndexMap<String, RawSchema>,
}

impl Resolver<'_> {
    fn node(&self, raw: &RawSchema, visiting: &mut Vec<String>) -> SchemaNode {
        if let Some(ref locator) = raw.reference {
            return self.reference(locator, visiting);
        }
        SchemaNode {
            r#type: raw.r#type.as_ref().map(RawType::schema_type),
            properties: raw.properties.as_ref().map(|properties| {
                properties
                    .iter()
                    .map(|(key, property)| (key.clone(), self.node(property, visiting)))
                    .collect()
            }),
            required: raw.required.as_ref().map(|r| r.iter().cloned().collect()),
            items: raw
                .items
                .as_ref()
                .map(|items| Box::new(self.node(items, visiting))),
            reference: None,
            title: raw.title.clone(),
        }
    }

    /// A reference node takes its target's type, title and items, never its properties.
    /// Unresolvable targets are assumed to be objects; reference cycles leave the type absent.
    fn reference(&self, locator: &str, visiting: &mut Vec<String>) -> SchemaNode {
        let id: Option<String> = json_pointer::component_name(locator);
        let target: Option<(&String, &RawSchema)> = id
            .as_deref()
            .filter(|_| json_pointer::is_local(locator))
            .and_then(|id| self.table.get_key_value(id));

        let mut node: SchemaNode = match target {
            None => {
                tracing::debug!(locator, "unresolved reference, assuming an object schema");
                SchemaNode::of_type(SchemaType::Object)
            }
            Some((name, _)) if visiting.contains(name) => {
                tracing::debug!(locator, "reference cycle, leaving type unresolved");
                SchemaNode::default()
            }
            Some((name, target)) => {
                visiting.push(name.clone());
                let resolved: SchemaNode = self.shallow(target, visiting);
                visiting.pop();
                resolved
            }
        };
        node.reference = Some(Reference {
            id,
            locator: Some(locator.to_string()),
        });
        node
    }

    /// A schema table entry. An alias entry (`Animal: $ref Pet`) is resolved in full,
    /// properties included, so it declares the same members as its target. Aliases that
    /// cannot be resolved keep their reference.
    fn entry(&self, name: &str, raw: &RawSchema) -> SchemaNode {
        let mut visiting: Vec<String> = vec![name.to_string()];
        let mut current: &RawSchema = raw;
        while let Some(ref locator) = current.reference {
            let target: Option<(&String, &RawSchema)> = json_pointer::component_name(locator)
                .filter(|_| json_pointer::is_local(locator))
                .and_then(|id| self.table.get_key_value(id.as_str()));
            match target {
                Some((target_name, target)) if !visiting.contains(target_name) => {
                    tracing::debug!(schema = name, target = %target_name, "following top-level alias");
                    visiting.push(target_name.clone());
                    current = target;
                }
                _ => return self.node(raw, &mut Vec::new()),
            }
        }
        self.node(current, &mut Vec::new())
    }

    fn shallow(&self, raw: &RawSchema, visiting: &mut Vec<String>) -> SchemaNode {
        if let Some(ref locator) = raw.reference {
            let mut alias: SchemaNode = self.reference(locator, visiting);
            alias.reference = None;
            return alias;
        }
        SchemaNode {
            r#type: raw.r#type.as_ref().map(RawType::schema_type),
            items: raw
                .items
                .as_ref()
                .map(|items| Box::new(self.node(items, visiting))),
            title: raw.title.clone(),
            ..SchemaNode::default()
        }
    }
}

impl RawDocument {
    fn into_document(self) -> Document {
        let table: Option<IndexMap<String, RawSchema>> = self
            .components
            .and_then(|components| components.schemas)
            .or(self.definitions);
        let schemas: Option<IndexMap<String, SchemaNode>> = table.as_ref().map(|table| {
            let resolver = Resolver { table };
            table
                .iter()
                .map(|(name, raw)| (name.clone(), resolver.entry(name, raw)))
                .collect()
        });
        Document {
            title: self.info.and_then(|info| info.title),
            schemas,
        }
    }
}

/// Parse an OpenAPI (3.x or Swagger 2.0) document.
///
/// # Errors
///
/// Returns `CodegenError::Json` or `CodegenError::Yaml` if the text is not a valid
/// document of the given format.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Document, CodegenError> {
    let raw: RawDocument = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(raw.into_document())
}
