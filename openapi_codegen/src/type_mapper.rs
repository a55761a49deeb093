//! Mapping from schema types to language-neutral target types.

use crate::error::CodegenError;
use crate::schema::SchemaType;

/// A target-language type reference, independent of any concrete syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetType {
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// Double-precision float.
    Double,
    Text,
    /// A generated declaration, by its normalized name.
    Named(String),
    /// An ordered sequence.
    List(Box<TargetType>),
}

impl TargetType {
    /// Reverse lookup: the schema primitive this type was mapped from, if any.
    #[must_use]
    pub fn primitive(&self) -> Option<SchemaType> {
        match self {
            Self::Boolean => Some(SchemaType::Boolean),
            Self::Int32 => Some(SchemaType::Integer),
            Self::Double => Some(SchemaType::Number),
            Self::Text => Some(SchemaType::String),
            Self::Named(_) | Self::List(_) => None,
        }
    }

    /// True if this type is a list; such fields need the collection import.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// Why a schema type could not be mapped to a primitive. Converted to a
/// `CodegenError` once the caller knows the node's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmapped {
    /// `null`: recognized but not implemented.
    Null,
    /// `object` or `array`.
    NotPrimitive(SchemaType),
    Unknown(String),
}

impl Unmapped {
    /// Attach the path of the node that failed to map.
    #[must_use]
    pub fn at(self, path: &str) -> CodegenError {
        let path: String = path.to_string();
        match self {
            Self::Null => CodegenError::UnsupportedSchemaType {
                path,
                found: SchemaType::Null.to_string(),
            },
            Self::NotPrimitive(ty) => CodegenError::NotPrimitive {
                path,
                found: ty.to_string(),
            },
            Self::Unknown(found) => CodegenError::UnknownSchemaType { path, found },
        }
    }
}

/// Returns true for the four supported primitives: boolean, integer, number, string.
#[must_use]
pub fn is_primitive(ty: &SchemaType) -> bool {
    matches!(
        ty,
        SchemaType::Boolean | SchemaType::Integer | SchemaType::Number | SchemaType::String
    )
}

/// Map a primitive schema type to its target type.
///
/// # Errors
///
/// Returns `Unmapped::Null` for `null`, `Unmapped::NotPrimitive` for `object`/`array`,
/// and `Unmapped::Unknown` for any type outside the recognized enumeration.
pub fn map_primitive(ty: &SchemaType) -> Result<TargetType, Unmapped> {
    match ty {
        SchemaType::Boolean => Ok(TargetType::Boolean),
        SchemaType::Integer => Ok(TargetType::Int32),
        SchemaType::Number => Ok(TargetType::Double),
        SchemaType::String => Ok(TargetType::Text),
        SchemaType::Object | SchemaType::Array => Err(Unmapped::NotPrimitive(ty.clone())),
        SchemaType::Null => Err(Unmapped::Null),
        SchemaType::Unknown(name) => Err(Unmapped::Unknown(name.clone())),
    }
}
