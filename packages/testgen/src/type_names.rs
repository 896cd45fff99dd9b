//! Type name utilities
//!
//! Type strings are handled purely as text: they come straight from the
//! source annotations and are never resolved.

use once_cell::sync::Lazy;
use regex::Regex;

/// `import("./path").` qualification emitted by type printers.
static IMPORT_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"import\([^)]+\)\.").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_$][0-9A-Za-z_$]*").unwrap());

const OBSERVABLE_LIKE: &[&str] = &[
    "Observable",
    "Subject",
    "BehaviorSubject",
    "ReplaySubject",
    "AsyncSubject",
];

/// Strip module qualification prefixes and collapse whitespace.
pub fn clean_type_name(type_name: &str) -> String {
    let unqualified = IMPORT_QUALIFIER.replace_all(type_name, "");
    WHITESPACE.replace_all(&unqualified, " ").trim().to_string()
}

/// The type without `null`/`undefined` union members.
///
/// `string | null` becomes `string`; a union of several other members is
/// returned unchanged.
pub fn primary_type(type_name: &str) -> &str {
    let trimmed = type_name.trim();
    if !trimmed.contains('|') {
        return trimmed;
    }
    let members: Vec<&str> = split_top_level(trimmed, '|')
        .into_iter()
        .map(str::trim)
        .filter(|member| !member.is_empty() && *member != "null" && *member != "undefined")
        .collect();
    match members.as_slice() {
        [single] => *single,
        _ => trimmed,
    }
}

/// Name in front of the generic argument list: `Store<State>` → `Store`.
pub fn base_type_name(type_name: &str) -> &str {
    let trimmed = type_name.trim();
    let end = trimmed.find('<').unwrap_or(trimmed.len());
    trimmed[..end].trim()
}

/// Text between the outermost `<` and `>`, if any.
pub fn generic_argument(type_name: &str) -> Option<&str> {
    let trimmed = type_name.trim();
    let start = trimmed.find('<')?;
    let end = trimmed.rfind('>')?;
    (end > start).then(|| trimmed[start + 1..end].trim())
}

pub fn is_void(type_name: &str) -> bool {
    matches!(primary_type(type_name), "void" | "undefined")
}

pub fn is_array_type(type_name: &str) -> bool {
    let ty = primary_type(type_name);
    ty.ends_with("[]") || matches!(base_type_name(ty), "Array" | "ReadonlyArray")
}

pub fn is_observable_like(type_name: &str) -> bool {
    let base = base_type_name(primary_type(type_name));
    OBSERVABLE_LIKE.contains(&base)
}

pub fn is_promise_like(type_name: &str) -> bool {
    matches!(
        base_type_name(primary_type(type_name)),
        "Promise" | "PromiseLike"
    )
}

/// Type seen after `await`: `Promise<T>` unwraps to `T`.
pub fn awaited_type(type_name: &str) -> &str {
    if is_promise_like(type_name) {
        generic_argument(primary_type(type_name)).unwrap_or("any")
    } else {
        type_name
    }
}

/// Every identifier referenced by a type string, in order of appearance.
pub fn referenced_identifiers(type_name: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for found in IDENTIFIER.find_iter(type_name) {
        let ident = found.as_str();
        if !seen.contains(&ident) {
            seen.push(ident);
        }
    }
    seen
}

/// Identifier used for the mock of a dependency: `Store<State>` → `mockStore`.
pub fn mock_identifier(type_name: &str) -> String {
    format!("mock{}", identifier_stem(type_name))
}

/// Name of the factory returning a mock: `HttpClient` → `createMockHttpClient`.
pub fn mock_factory_name(type_name: &str) -> String {
    format!("createMock{}", identifier_stem(type_name))
}

fn identifier_stem(type_name: &str) -> String {
    let stem: String = base_type_name(type_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if stem.is_empty() {
        "Dependency".to_string()
    } else {
        stem
    }
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            _ if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
