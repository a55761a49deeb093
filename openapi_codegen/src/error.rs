use thiserror::Error;

/// Error type for OpenAPI schema compilation and the file-level helpers around it.
///
/// Schema errors carry the JSON Pointer `path` of the offending node so a host can
/// report the diagnostic against the input document.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The document declares no schema table at all.
    #[error("document has no schemas (expected `components.schemas` or `definitions`)")]
    SchemaTableMissing,

    /// A node has no `type`.
    #[error("{path}: schema type is required")]
    SchemaTypeRequired { path: String },

    /// A node has a recognized type that is not implemented (`null`).
    #[error("{path}: schema type `{found}` is not supported")]
    UnsupportedSchemaType { path: String, found: String },

    /// A node has a `type` outside the recognized enumeration.
    #[error("{path}: unknown schema type `{found}`")]
    UnknownSchemaType { path: String, found: String },

    /// `object` or `array` was handed to the primitive mapper.
    #[error("{path}: schema type `{found}` is not a primitive type")]
    NotPrimitive { path: String, found: String },

    /// An inline object used as array items has no `title` to name it by.
    #[error("{path}: inline object array items must have a title")]
    MissingArrayItemTitle { path: String },

    /// A schema key has no letters or digits, so it normalizes to an empty identifier.
    #[error("{path}: `{name}` has no letters or digits to form an identifier")]
    EmptyIdentifier { path: String, name: String },

    /// Array items are missing or of a shape that cannot be mapped.
    #[error("{path}: unsupported array item type")]
    UnsupportedArrayItemType { path: String },

    /// The input file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("{path}: unsupported document format (expected .json, .yaml or .yml)")]
    UnsupportedDocumentFormat { path: String },

    /// I/O error (e.g., reading a document, writing a generated unit).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Writing generated source text failed.
    #[error("failed to format generated source")]
    Format(#[from] std::fmt::Error),
}
