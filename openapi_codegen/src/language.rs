//! Target-language backends: type syntax, identifier escaping and unit layout.

use crate::declaration::TypeDeclaration;
use crate::type_mapper::TargetType;
use heck::ToSnakeCase;
use std::fmt::{self, Write};

/// A language the compiler can emit declarations in.
///
/// Implementations only render; deciding *which* imports a unit needs is done by the
/// unit builder from the language's base and collection imports.
pub trait Language: Sync {
    /// Short name used on the command line (`csharp`, `rust`).
    fn name(&self) -> &'static str;

    /// Extension of generated files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Import every unit carries.
    fn base_import(&self) -> &'static str;

    /// Import needed when a field is a list.
    fn collection_import(&self) -> &'static str;

    /// Syntax of a type reference.
    fn render_type(&self, ty: &TargetType) -> String;

    /// Write a complete unit: imports, namespace wrapper and the declaration.
    ///
    /// # Errors
    ///
    /// Returns `fmt::Error` if writing to `out` fails.
    fn write_unit(
        &self,
        out: &mut String,
        namespace: &str,
        imports: &[&str],
        declaration: &TypeDeclaration,
    ) -> fmt::Result;
}

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RUST_RESERVED_PATHS: &[&str] = &["crate", "self", "Self", "super"];

/// Prefix identifiers that would start with a digit.
fn leading_digit_safe(ident: String) -> String {
    if ident.chars().next().is_some_and(char::is_numeric) {
        format!("_{ident}")
    } else {
        ident
    }
}

/// C# output: one `public class` per unit inside a block-scoped namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharp;

impl CSharp {
    fn identifier(ident: &str) -> String {
        if CSHARP_KEYWORDS.contains(&ident) {
            format!("@{ident}")
        } else {
            leading_digit_safe(ident.to_string())
        }
    }
}

impl Language for CSharp {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn base_import(&self) -> &'static str {
        "System"
    }

    fn collection_import(&self) -> &'static str {
        "System.Collections.Generic"
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Boolean => "bool".to_string(),
            TargetType::Int32 => "int".to_string(),
            TargetType::Double => "double".to_string(),
            TargetType::Text => "string".to_string(),
            TargetType::Named(name) => Self::identifier(name),
            TargetType::List(element) => format!("List<{}>", self.render_type(element)),
        }
    }

    fn write_unit(
        &self,
        out: &mut String,
        namespace: &str,
        imports: &[&str],
        declaration: &TypeDeclaration,
    ) -> fmt::Result {
        for import in imports {
            writeln!(out, "using {import};")?;
        }
        writeln!(out)?;
        writeln!(out, "namespace {}", Self::identifier(namespace))?;
        writeln!(out, "{{")?;
        writeln!(out, "    public class {}", Self::identifier(&declaration.name))?;
        writeln!(out, "    {{")?;
        for field in &declaration.fields {
            let modifiers: &str = if field.required {
                "public required"
            } else {
                "public"
            };
            writeln!(
                out,
                "        {modifiers} {} {} {{ get; set; }}",
                self.render_type(&field.ty),
                Self::identifier(&field.identifier())
            )?;
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Rust output: one module file per unit, holding a single struct.
///
/// The namespace becomes the parent module (`snake_case`); `use super::*;` brings the
/// other declarations of the same namespace into scope. Fields of a named type are
/// boxed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rust;

impl Rust {
    fn identifier(ident: &str) -> String {
        if RUST_RESERVED_PATHS.contains(&ident) {
            format!("{ident}_")
        } else if RUST_KEYWORDS.contains(&ident) {
            format!("r#{ident}")
        } else {
            leading_digit_safe(ident.to_string())
        }
    }

    fn field_identifier(ident: &str) -> String {
        Self::identifier(&ident.to_snake_case())
    }
}

impl Language for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn base_import(&self) -> &'static str {
        "super::*"
    }

    fn collection_import(&self) -> &'static str {
        "std::vec::Vec"
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Boolean => "bool".to_string(),
            TargetType::Int32 => "i32".to_string(),
            TargetType::Double => "f64".to_string(),
            TargetType::Text => "String".to_string(),
            TargetType::Named(name) => Self::identifier(name),
            TargetType::List(element) => format!("Vec<{}>", self.render_type(element)),
        }
    }

    fn write_unit(
        &self,
        out: &mut String,
        namespace: &str,
        imports: &[&str],
        declaration: &TypeDeclaration,
    ) -> fmt::Result {
        writeln!(
            out,
            "//! `{}` in module `{}`. Generated by openapi-codegen. Do not edit manually.",
            declaration.name,
            namespace.to_snake_case()
        )?;
        writeln!(out)?;
        writeln!(out, "#![allow(unused_imports)]")?;
        writeln!(out)?;
        for import in imports {
            writeln!(out, "use {import};")?;
        }
        writeln!(out)?;
        writeln!(out, "#[derive(Debug, Clone, PartialEq)]")?;
        writeln!(out, "pub struct {} {{", Self::identifier(&declaration.name))?;
        for field in &declaration.fields {
            // Boxed so self and mutual references have a finite size; `Vec` already is.
            let ty: String = match field.ty {
                TargetType::Named(_) => format!("Box<{}>", self.render_type(&field.ty)),
                _ => self.render_type(&field.ty),
            };
            let ty: String = if field.required {
                ty
            } else {
                format!("Option<{ty}>")
            };
            writeln!(
                out,
                "    pub {}: {ty},",
                Self::field_identifier(&field.identifier())
            )?;
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}
