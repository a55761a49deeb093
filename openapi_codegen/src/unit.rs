use crate::declaration::TypeDeclaration;
use crate::error::CodegenError;
use crate::language::Language;
use crate::naming::to_pascal_case;

/// One generated source unit, addressable on its own (one file per unit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationUnit {
    pub name: String,
    pub source: String,
}

impl GenerationUnit {
    /// File name a host should persist this unit under: `{name}.g.{ext}`.
    #[must_use]
    pub fn file_name(&self, language: &dyn Language) -> String {
        format!("{}.g.{}", self.name, language.file_extension())
    }
}

/// The minimal import set for a declaration: the base import, plus the collection
/// import if and only if a field is a list.
#[must_use]
pub fn imports(declaration: &TypeDeclaration, language: &dyn Language) -> Vec<&'static str> {
    let mut imports: Vec<&'static str> = vec![language.base_import()];
    if declaration.uses_lists() {
        imports.push(language.collection_import());
    }
    imports
}

/// Wrap a declaration into a complete source unit under `namespace` (normalized).
///
/// # Errors
///
/// Returns `CodegenError::Format` if rendering the source text fails.
pub fn build_unit(
    namespace: &str,
    declaration: &TypeDeclaration,
    language: &dyn Language,
) -> Result<GenerationUnit, CodegenError> {
    let namespace: String = to_pascal_case(namespace);
    let imports: Vec<&str> = imports(declaration, language);
    let mut source: String = String::new();
    language.write_unit(&mut source, &namespace, &imports, declaration)?;
    Ok(GenerationUnit {
        name: declaration.name.clone(),
        source,
    })
}
