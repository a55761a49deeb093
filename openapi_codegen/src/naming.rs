//! Identifier normalization.

/// Convert a schema key, title or document name to a `PascalCase` identifier.
///
/// Splits on any run of characters that are neither Unicode letters nor digits,
/// upper-cases the first character of each part, and joins with no separator. The rest of each part is kept as-is, so
/// the conversion is idempotent.
/// Examples: `"The Widget_Settings Schema"` -> `"TheWidgetSettingsSchema"`, `"line-item"` -> `"LineItem"`
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
