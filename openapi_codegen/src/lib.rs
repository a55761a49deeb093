//! Compile OpenAPI component schemas into C# classes or Rust structs.
//!
//! Each named object schema, and every object schema nested inline inside one, becomes
//! one [`GenerationUnit`]: a self-contained source file holding a single declaration.

mod compiler;
mod declaration;
mod error;
mod json_pointer;
mod language;
mod naming;
mod openapi;
mod schema;
mod settings;
mod type_mapper;
mod unit;

pub use compiler::{compile_document, compile_schema};
pub use declaration::{FieldDeclaration, TypeDeclaration, build_field, build_type};
pub use error::CodegenError;
pub use language::{CSharp, Language, Rust};
pub use naming::to_pascal_case;
pub use openapi::{DocumentFormat, parse_document};
pub use schema::{Document, Reference, SchemaNode, SchemaType, Shape};
pub use settings::{DEFAULT_NAMESPACE, GenerateSettings, TargetLanguage};
pub use type_mapper::{TargetType, Unmapped, is_primitive, map_primitive};
pub use unit::{GenerationUnit, build_unit, imports};

use std::io::Write;
use std::path::{Path, PathBuf};

/// Compile an OpenAPI document and write every unit to `writer`, each preceded by a
/// `// {file name}` banner line.
///
/// The writer can be any type implementing `Write`, such as `File`, `Vec<u8>`, or
/// `Stdout`, enabling easy unit testing without file system interaction.
///
/// # Errors
///
/// Returns `CodegenError` if the document cannot be parsed, a schema cannot be compiled,
/// or writing to the writer fails. Nothing is written if compilation fails.
pub fn generate_to_writer<W: Write>(
    document_text: &str,
    format: DocumentFormat,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), CodegenError> {
    let document: Document = parse_document(document_text, format)?;
    let units: Vec<GenerationUnit> = compile_document(&document, settings)?;
    let language: &dyn Language = settings.language.backend();
    for (index, unit) in units.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "// {}", unit.file_name(language))?;
        writer.write_all(unit.source.as_bytes())?;
    }
    Ok(())
}

/// Write units into `out_dir` as `{name}.g.{ext}`, creating the directory if needed.
/// Units with the same name overwrite each other in order. Returns the written paths.
///
/// # Errors
///
/// Returns `CodegenError::Io` if the directory or a file cannot be written.
pub fn write_units(
    units: &[GenerationUnit],
    out_dir: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<Vec<PathBuf>, CodegenError> {
    let out_dir: &Path = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;
    let language: &dyn Language = settings.language.backend();
    let mut written: Vec<PathBuf> = Vec::with_capacity(units.len());
    for unit in units {
        let path: PathBuf = out_dir.join(unit.file_name(language));
        std::fs::write(&path, &unit.source)?;
        tracing::info!(path = %path.display(), "wrote unit");
        written.push(path);
    }
    Ok(written)
}

/// Compile an OpenAPI document file (`.json`, `.yaml` or `.yml`) and write one file per
/// unit into `out_dir`.
///
/// # Errors
///
/// Returns `CodegenError` if the extension is not recognized, reading or parsing the
/// input fails, a schema cannot be compiled, or an output file cannot be written.
pub fn generate_from_file(
    input_path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<Vec<PathBuf>, CodegenError> {
    let input_path: &Path = input_path.as_ref();
    let format: DocumentFormat = DocumentFormat::from_path(input_path)?;
    let text: String = std::fs::read_to_string(input_path)?;
    let document: Document = parse_document(&text, format)?;
    let units: Vec<GenerationUnit> = compile_document(&document, settings)?;
    write_units(&units, out_dir, settings)
}
