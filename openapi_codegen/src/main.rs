//! Binary to compile OpenAPI component schemas into C# or Rust declarations.
//!
//! Usage: `openapi-codegen api.yaml --out-dir generated/`
//!
//! With no inputs, reads one JSON (or `--format yaml`) document from stdin. Without
//! `--out-dir`, writes every unit to stdout.

use std::io::{Write, read_to_string, stdin, stdout};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use openapi_codegen::{
    CodegenError, DEFAULT_NAMESPACE, Document, DocumentFormat, GenerateSettings, GenerationUnit,
    TargetLanguage, compile_document, generate_from_file, generate_to_writer, parse_document,
    write_units,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openapi-codegen", version)]
#[command(about = "Generate C# or Rust data declarations from OpenAPI schemas", long_about = None)]
struct Cli {
    /// OpenAPI documents, or directories scanned for .json/.yaml/.yml files
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Write one `{Name}.g.{ext}` file per declaration into this directory
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Language to generate
    #[arg(short, long, value_enum, default_value_t = TargetLanguage::CSharp)]
    language: TargetLanguage,

    /// Namespace for documents without an `info.title`
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Format of the document read from stdin
    #[arg(short, long, value_enum, default_value_t = DocumentFormat::Json)]
    format: DocumentFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter: String = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "warn,openapi_codegen=info",
            2 => "warn,openapi_codegen=debug",
            _ => "debug,openapi_codegen=trace",
        }
        .to_string()
    });
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Expand directories into the documents they directly contain, sorted by path.
fn discover_documents(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CodegenError> {
    let mut documents: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            documents.push(input.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()?;
        found.retain(|path| path.is_file() && DocumentFormat::from_path(path).is_ok());
        found.sort();
        tracing::debug!(dir = %input.display(), documents = found.len(), "scanned directory");
        documents.extend(found);
    }
    Ok(documents)
}

/// Write one document's units to `writer`. If `separate` is set and the document yields
/// any units, a blank line goes first. Returns whether anything was written.
fn print_document<W: Write>(
    path: &Path,
    writer: &mut W,
    settings: &GenerateSettings,
    separate: bool,
) -> Result<bool, CodegenError> {
    let format: DocumentFormat = DocumentFormat::from_path(path)?;
    let text: String = std::fs::read_to_string(path)?;
    let mut output: Vec<u8> = Vec::new();
    generate_to_writer(&text, format, &mut output, settings)?;
    if output.is_empty() {
        return Ok(false);
    }
    if separate {
        writeln!(writer)?;
    }
    writer.write_all(&output)?;
    Ok(true)
}

/// Returns whether anything was printed to stdout.
fn compile_file(
    path: &Path,
    cli: &Cli,
    settings: &GenerateSettings,
    printed: bool,
) -> Result<bool, CodegenError> {
    let Some(ref out_dir) = cli.out_dir else {
        return print_document(path, &mut stdout(), settings, printed);
    };
    let written: Vec<PathBuf> = generate_from_file(path, out_dir, settings)?;
    tracing::info!(input = %path.display(), units = written.len(), "generated");
    Ok(false)
}

fn compile_stdin(cli: &Cli, settings: &GenerateSettings) -> Result<(), CodegenError> {
    let text: String = read_to_string(stdin())?;
    let Some(ref out_dir) = cli.out_dir else {
        return generate_to_writer(&text, cli.format, &mut stdout(), settings);
    };
    let document: Document = parse_document(&text, cli.format)?;
    let units: Vec<GenerationUnit> = compile_document(&document, settings)?;
    let written: Vec<PathBuf> = write_units(&units, out_dir, settings)?;
    tracing::info!(input = "<stdin>", units = written.len(), "generated");
    Ok(())
}

fn main() {
    let cli: Cli = Cli::parse();
    init_tracing(cli.log_verbosity);

    let settings = GenerateSettings {
        language: cli.language,
        default_namespace: cli.namespace.clone(),
    };
    tracing::debug!(language = settings.language.backend().name(), "starting");

    if cli.inputs.is_empty() {
        if let Err(e) = compile_stdin(&cli, &settings) {
            eprintln!("Error: <stdin>: {e}");
            process::exit(1);
        }
        return;
    }

    let documents: Vec<PathBuf> = match discover_documents(&cli.inputs) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut failed: usize = 0;
    let mut printed: bool = false;
    for path in &documents {
        match compile_file(path, &cli, &settings, printed) {
            Ok(wrote) => printed |= wrote,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        tracing::warn!(failed, total = documents.len(), "some documents failed");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_YAML: &str = "components:
  schemas:
    Model:
      type: object
      properties:
        name:
          type: string
";

    #[test]
    fn discover_documents_keeps_sorted_documents_from_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["b.yml", "a.json", "c.YAML", "notes.txt", "README"] {
            std::fs::write(dir.path().join(name), "{}").expect("write file");
        }
        std::fs::create_dir(dir.path().join("nested.json")).expect("create dir");
        let explicit: PathBuf = dir.path().join("explicit.txt");

        let actual: Vec<PathBuf> =
            discover_documents(&[dir.path().to_path_buf(), explicit.clone()])
                .expect("discover_documents should succeed");
        let expected: Vec<PathBuf> = vec![
            dir.path().join("a.json"),
            dir.path().join("b.yml"),
            dir.path().join("c.YAML"),
            explicit,
        ];
        assert_eq!(expected, actual);
    }

    #[test]
    fn discover_documents_missing_directory_entry_is_kept() {
        let missing: PathBuf = PathBuf::from("does/not/exist.yaml");
        let actual: Vec<PathBuf> =
            discover_documents(std::slice::from_ref(&missing)).expect("should succeed");
        assert_eq!(vec![missing], actual);
    }

    #[test]
    fn print_document_separates_consecutive_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first: PathBuf = dir.path().join("first.yaml");
        let empty: PathBuf = dir.path().join("empty.yaml");
        let second: PathBuf = dir.path().join("second.yaml");
        std::fs::write(&first, MODEL_YAML).expect("write first");
        std::fs::write(&empty, "components:\n  schemas: {}\n").expect("write empty");
        std::fs::write(&second, MODEL_YAML).expect("write second");
        let settings = GenerateSettings::default();

        let mut output: Vec<u8> = Vec::new();
        let mut printed: bool = false;
        for path in [&first, &empty, &second] {
            printed |= print_document(path, &mut output, &settings, printed)
                .expect("print_document should succeed");
        }

        let unit: &str = "// Model.g.cs
using System;

namespace GeneratedClasses
{
    public class Model
    {
        public string Name { get; set; }
    }
}
";
        let expected: String = format!("{unit}\n{unit}");
        let actual: String = String::from_utf8(output).expect("output should be valid UTF-8");
        assert_eq!(expected, actual);
    }
}
