//! Settings for OpenAPI code generation.

use crate::language::{CSharp, Language, Rust};

/// Namespace used when the document has no usable title.
pub const DEFAULT_NAMESPACE: &str = "GeneratedClasses";

/// Language to emit declarations in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetLanguage {
    /// C# classes with `{ get; set; }` properties.
    #[default]
    #[value(name = "csharp", alias = "cs")]
    CSharp,

    /// Rust structs, one module file per struct.
    #[value(name = "rust", alias = "rs")]
    Rust,
}

impl TargetLanguage {
    /// The backend that renders this language.
    #[must_use]
    pub fn backend(self) -> &'static dyn Language {
        match self {
            Self::CSharp => &CSharp,
            Self::Rust => &Rust,
        }
    }
}

/// Settings that control code generation behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSettings {
    /// **Default: C#.**
    pub language: TargetLanguage,

    /// Namespace for documents without a title. **Default: `GeneratedClasses`.**
    pub default_namespace: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            language: TargetLanguage::default(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
