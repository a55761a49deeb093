use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;

/// The `type` keyword of a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    /// A type name outside the recognized enumeration, kept verbatim.
    Unknown(String),
}

impl SchemaType {
    /// Parse a JSON Schema type name. Never fails; unrecognized names become `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "object" => Self::Object,
            "array" => Self::Array,
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The JSON Schema spelling of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `$ref` to another named schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Name of the referenced schema, e.g. `LineItem`.
    pub id: Option<String>,

    /// The raw `$ref` string, e.g. `#/components/schemas/LineItem`.
    pub locator: Option<String>,
}

/// One schema node of an already-parsed document.
///
/// A reference node carries the resolved `type` (and `title`/`items`) of its target but
/// never the target's `properties`; the compiler does not descend through references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    /// `None` when the `type` keyword is absent.
    pub r#type: Option<SchemaType>,

    /// Declaration order is preserved and significant for output.
    pub properties: Option<IndexMap<String, SchemaNode>>,

    pub required: Option<BTreeSet<String>>,

    pub items: Option<Box<SchemaNode>>,

    pub reference: Option<Reference>,

    pub title: Option<String>,
}

/// The shape of a schema node, as far as code generation is concerned.
#[derive(Debug, PartialEq)]
pub enum Shape<'a> {
    /// A reference whose target is an object schema.
    Reference(&'a Reference),
    /// `boolean`, `integer`, `number` or `string` (possibly behind a reference).
    Primitive(&'a SchemaType),
    /// An inline object.
    Object,
    /// An array, with its items if declared.
    Array(Option<&'a SchemaNode>),
    Null,
    Absent,
    Unknown(&'a str),
}

impl SchemaNode {
    /// Classify this node. References to objects take precedence over the inline
    /// object shape; references to anything else behave like their target's type.
    #[must_use]
    pub fn shape(&self) -> Shape<'_> {
        match (&self.reference, &self.r#type) {
            (Some(reference), Some(SchemaType::Object)) => Shape::Reference(reference),
            (_, None) => Shape::Absent,
            (_, Some(SchemaType::Object)) => Shape::Object,
            (_, Some(SchemaType::Array)) => Shape::Array(self.items.as_deref()),
            (_, Some(SchemaType::Null)) => Shape::Null,
            (_, Some(SchemaType::Unknown(name))) => Shape::Unknown(name),
            (
                _,
                Some(
                    primitive @ (SchemaType::Boolean
                    | SchemaType::Integer
                    | SchemaType::Number
                    | SchemaType::String),
                ),
            ) => Shape::Primitive(primitive),
        }
    }

    /// True for an object schema defined in place (not a `$ref`).
    #[must_use]
    pub fn is_inline_object(&self) -> bool {
        self.shape() == Shape::Object
    }

    /// True if `required` is present and lists `key` (exact, case-sensitive match).
    #[must_use]
    pub fn requires(&self, key: &str) -> bool {
        self.required.as_ref().is_some_and(|r| r.contains(key))
    }

    /// An object schema with the given properties, in order.
    #[must_use]
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self {
            r#type: Some(SchemaType::Object),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(key, node)| (key.into(), node))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// A node of a single type with no other keywords.
    #[must_use]
    pub fn of_type(ty: SchemaType) -> Self {
        Self {
            r#type: Some(ty),
            ..Self::default()
        }
    }

    /// An array of `items`.
    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        Self {
            r#type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// A reference to the object schema `id` under `#/components/schemas`.
    #[must_use]
    pub fn object_ref(id: &str) -> Self {
        Self {
            r#type: Some(SchemaType::Object),
            reference: Some(Reference {
                id: Some(id.to_string()),
                locator: Some(format!("#/components/schemas/{id}")),
            }),
            ..Self::default()
        }
    }

    /// Builder-style setter for `required`.
    #[must_use]
    pub fn with_required<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.required = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Builder-style setter for `title`.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// A parsed OpenAPI document: the schema table plus the name used as namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// `info.title`.
    pub title: Option<String>,

    /// `None` when the document declares no schema table at all.
    pub schemas: Option<IndexMap<String, SchemaNode>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_type_parse_round_trips_known_names() {
        for name in [
            "object", "array", "string", "number", "integer", "boolean", "null",
        ] {
            assert_eq!(name, SchemaType::parse(name).as_str());
        }
    }

    #[test]
    fn schema_type_parse_keeps_unknown_names() {
        let actual: SchemaType = SchemaType::parse("file");
        let expected: SchemaType = SchemaType::Unknown("file".to_string());
        assert_eq!(expected, actual);
    }

    #[test]
    fn shape_reference_to_object() {
        let node: SchemaNode = SchemaNode::object_ref("Pet");
        assert!(matches!(node.shape(), Shape::Reference(r) if r.id.as_deref() == Some("Pet")));
        assert!(!node.is_inline_object());
    }

    #[test]
    fn shape_reference_to_primitive_is_primitive() {
        let node = SchemaNode {
            reference: Some(Reference {
                id: Some("Email".to_string()),
                locator: None,
            }),
            ..SchemaNode::of_type(SchemaType::String)
        };
        assert_eq!(Shape::Primitive(&SchemaType::String), node.shape());
    }

    #[test]
    fn shape_inline_object() {
        let node: SchemaNode = SchemaNode::object(Vec::<(String, SchemaNode)>::new());
        assert_eq!(Shape::Object, node.shape());
        assert!(node.is_inline_object());
    }

    #[test]
    fn shape_absent_null_unknown() {
        assert_eq!(Shape::Absent, SchemaNode::default().shape());
        assert_eq!(Shape::Null, SchemaNode::of_type(SchemaType::Null).shape());
        assert_eq!(
            Shape::Unknown("file"),
            SchemaNode::of_type(SchemaType::parse("file")).shape()
        );
    }

    #[test]
    fn shape_array_exposes_items() {
        let node: SchemaNode = SchemaNode::array(SchemaNode::of_type(SchemaType::Integer));
        let Shape::Array(Some(items)) = node.shape() else {
            panic!("expected array with items");
        };
        assert_eq!(Some(SchemaType::Integer), items.r#type);
        assert_eq!(Shape::Array(None), SchemaNode::of_type(SchemaType::Array).shape());
    }

    #[test]
    fn requires_is_exact_and_case_sensitive() {
        let node: SchemaNode =
            SchemaNode::object(Vec::<(String, SchemaNode)>::new()).with_required(["Name"]);
        assert!(node.requires("Name"));
        assert!(!node.requires("name"));
        assert!(!SchemaNode::default().requires("Name"));
    }
}
