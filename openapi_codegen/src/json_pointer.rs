//! JSON Pointer implementation (RFC 6901).
//!
//! Used for two things: building the path of a schema node for error reporting, and
//! reading the target out of a `$ref` locator such as `#/components/schemas/Pet`.
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.

/// Containers whose direct children are named, referenceable schemas.
const SCHEMA_CONTAINERS: &[&[&str]] = &[&["components", "schemas"], &["definitions"], &["$defs"]];

/// Appends a segment to a JSON Pointer path, applying RFC 6901 escaping.
///
/// Escaping rules: `~` -> `~0`, `/` -> `~1`
pub fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

/// Returns a new JSON Pointer path by appending a segment to the given path.
#[must_use]
pub fn format(path: &str, segment: &str) -> String {
    let mut result: String = path.to_string();
    push_segment(&mut result, segment);
    result
}

/// Reverses RFC 6901 escaping for one segment. `~1` must be handled before `~0`.
fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Splits the fragment of a reference locator into unescaped segments.
///
/// `"other.yaml#/components/schemas/Pet"` -> `["components", "schemas", "Pet"]`.
/// Returns `None` if the locator has no `#/` fragment.
fn fragment_segments(locator: &str) -> Option<Vec<String>> {
    let (_, fragment) = locator.split_once('#')?;
    let pointer: &str = fragment.strip_prefix('/')?;
    Some(pointer.split('/').map(unescape_segment).collect())
}

/// Returns the schema name a reference locator points at, when the fragment addresses a
/// direct child of a schema container (`/components/schemas/X`, `/definitions/X`, `/$defs/X`).
#[must_use]
pub fn component_name(locator: &str) -> Option<String> {
    let mut segments: Vec<String> = fragment_segments(locator)?;
    let name: String = segments.pop()?;
    let is_container: bool = SCHEMA_CONTAINERS
        .iter()
        .any(|container| container.iter().copied().eq(segments.iter().map(String::as_str)));
    (is_container && !name.is_empty()).then_some(name)
}

/// Returns true if the locator addresses a schema inside the current document.
#[must_use]
pub fn is_local(locator: &str) -> bool {
    locator.starts_with('#')
}
