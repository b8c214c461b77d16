//! Option arrays: parsing `['class' => 'x', 'required']` into an ordered map
//! and serializing that map back out as HTML attributes.
//!
//! The parser is a small bracket-aware tokenizer rather than a single regex,
//! so nested arrays and calls inside values stay attached to their key.
//! Malformed input never fails; unrecognized entries are skipped.

use super::value::{self, interpolate, is_numeric, string_end};

/// Keys consumed by `Form::open` / `Form::model` that must not be re-emitted
/// as attributes.
pub const FORM_STRUCTURAL_KEYS: &[&str] = &["method", "route", "url", "files", "action"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Key listed without a value, e.g. `'required'`.
    Flag,
    /// Quoted value with its quotes removed.
    Literal(String),
    /// Unquoted value kept verbatim.
    Expression(String),
}

impl OptionValue {
    /// PHP truthiness as far as it can be judged from source text.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Flag => true,
            OptionValue::Literal(text) => !text.is_empty() && text != "0",
            OptionValue::Expression(expr) => {
                !matches!(expr.as_str(), "false" | "FALSE" | "0" | "''" | "\"\"")
                    && !value::is_null(expr)
            }
        }
    }
}

/// Insertion-ordered option map. Re-inserting a key overwrites the value but
/// keeps its original position, matching PHP array semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, OptionValue)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(OptionValue::is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an options argument. `None` (argument omitted) yields an empty map.
pub fn parse_optional(text: Option<&str>) -> OptionMap {
    text.map(parse_options).unwrap_or_default()
}

/// Parse a bracketed options array into an [`OptionMap`].
pub fn parse_options(text: &str) -> OptionMap {
    let mut options = OptionMap::new();
    for entry in split_top_level(array_body(text), b',') {
        if let Some((key, value)) = parse_entry(entry) {
            options.insert(key, value);
        }
    }
    options
}

/// Serialize every option as an HTML attribute string.
pub fn attributes(options: &OptionMap) -> String {
    attributes_excluding(options, &[])
}

/// Serialize options as ` key="value"` fragments, skipping `exclude`.
pub fn attributes_excluding(options: &OptionMap, exclude: &[&str]) -> String {
    options
        .iter()
        .filter(|(key, _)| !exclude.contains(key))
        .filter_map(|(key, value)| attribute(key, value))
        .collect()
}

fn attribute(key: &str, value: &OptionValue) -> Option<String> {
    match value {
        OptionValue::Flag => Some(format!(" {key}")),
        OptionValue::Literal(text) => Some(format!(" {key}=\"{text}\"")),
        OptionValue::Expression(expr) => match expr.as_str() {
            "true" | "TRUE" => Some(format!(" {key}")),
            "false" | "FALSE" => None,
            e if value::is_null(e) => None,
            e if is_numeric(e) => Some(format!(" {key}=\"{e}\"")),
            e => Some(format!(" {key}=\"{}\"", interpolate(e))),
        },
    }
}

/// Contents between the outer brackets. Unterminated arrays yield everything
/// after the opening bracket; text without brackets is used as-is.
fn array_body(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix('[') else {
        return text;
    };
    let close = TopLevel::new(rest.as_bytes())
        .find(|&(_, byte)| byte == b']')
        .map_or(rest.len(), |(index, _)| index);
    &rest[..close]
}

fn parse_entry(entry: &str) -> Option<(String, OptionValue)> {
    let entry = entry.trim();
    let arrow = TopLevel::new(entry.as_bytes())
        .find(|&(index, byte)| byte == b'=' && entry.as_bytes().get(index + 1) == Some(&b'>'));

    let (key, value) = match arrow {
        Some((index, _)) => (&entry[..index], Some(entry[index + 2..].trim())),
        None => (entry, None),
    };

    let key = value::unquote(key.trim()).filter(|key| !key.is_empty())?;
    let value = match value {
        None => OptionValue::Flag,
        Some("") => return None,
        Some(raw) => match value::unquote(raw) {
            Some(text) => OptionValue::Literal(text.to_string()),
            None => OptionValue::Expression(raw.to_string()),
        },
    };
    Some((key.to_string(), value))
}

/// Split on `separator` wherever it appears outside strings and brackets.
pub(crate) fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, byte) in TopLevel::new(text.as_bytes()) {
        if byte == separator {
            parts.push(&text[start..index]);
            start = index + 1;
        }
    }
    parts.push(&text[start..]);
    parts.retain(|part| !part.trim().is_empty());
    parts
}

/// Iterator over bytes at bracket depth zero, outside string literals.
///
/// Closing brackets that would take the depth below zero are yielded so the
/// caller can detect the end of an enclosing array.
struct TopLevel<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> TopLevel<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            depth: 0,
        }
    }
}

impl Iterator for TopLevel<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let index = self.pos;
            let byte = self.bytes[index];
            self.pos += 1;
            match byte {
                b'\'' | b'"' => {
                    self.pos = string_end(self.bytes, index).map_or(self.bytes.len(), |end| end + 1);
                }
                b'[' | b'(' | b'{' => self.depth += 1,
                b']' | b')' | b'}' if self.depth > 0 => self.depth -= 1,
                _ if self.depth == 0 => return Some((index, byte)),
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> OptionValue {
        OptionValue::Literal(text.to_string())
    }

    fn expression(text: &str) -> OptionValue {
        OptionValue::Expression(text.to_string())
    }

    #[test]
    fn test_parse_key_value_pairs_in_order() {
        let options = parse_options("['class' => 'form-control', 'id' => \"username\"]");
        let entries: Vec<_> = options.iter().collect();
        assert_eq!(
            entries,
            vec![("class", &literal("form-control")), ("id", &literal("username"))]
        );
    }

    #[test]
    fn test_bare_key_is_flag() {
        let options = parse_options("['class' => 'x', 'required']");
        assert_eq!(options.get("required"), Some(&OptionValue::Flag));
    }

    #[test]
    fn test_unquoted_value_is_expression() {
        let options = parse_options("['rows' => 3, 'placeholder' => __('Name')]");
        assert_eq!(options.get("rows"), Some(&expression("3")));
        assert_eq!(options.get("placeholder"), Some(&expression("__('Name')")));
    }

    #[test]
    fn test_nested_array_value_stays_with_its_key() {
        let options = parse_options("['route' => ['users.update', $user->id], 'method' => 'PUT']");
        assert_eq!(
            options.get("route"),
            Some(&expression("['users.update', $user->id]"))
        );
        assert_eq!(options.get("method"), Some(&literal("PUT")));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_commas_inside_strings_do_not_split() {
        let options = parse_options("['title' => 'a, b', 'x' => 'y']");
        assert_eq!(options.get("title"), Some(&literal("a, b")));
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let options = parse_options("['a' => '1', 'b' => '2', 'a' => '3']");
        let keys: Vec<_> = options.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(options.get("a"), Some(&literal("3")));
    }

    #[test]
    fn test_malformed_input_yields_partial_map() {
        assert!(parse_options("").is_empty());
        assert!(parse_options("[").is_empty());
        assert!(parse_options("[$x => 'y', 'k' =>]").is_empty());

        let options = parse_options("['class' => 'x', 'broken");
        assert_eq!(options.get("class"), Some(&literal("x")));
    }

    #[test]
    fn test_truthiness() {
        let options = parse_options("['a' => true, 'b' => false, 'c', 'd' => null, 'e' => '0']");
        assert!(options.is_truthy("a"));
        assert!(!options.is_truthy("b"));
        assert!(options.is_truthy("c"));
        assert!(!options.is_truthy("d"));
        assert!(!options.is_truthy("e"));
        assert!(!options.is_truthy("missing"));
    }

    #[test]
    fn test_attributes_render_each_value_kind() {
        let options = parse_options(
            "['class' => 'btn', 'disabled', 'data-id' => $item->id, 'rows' => 4, 'hidden' => false, 'title' => __('Hi')]",
        );
        assert_eq!(
            attributes(&options),
            " class=\"btn\" disabled data-id=\"{{ $item->id }}\" rows=\"4\" title=\"{{ __('Hi') }}\""
        );
    }

    #[test]
    fn test_attributes_true_expression_is_flag() {
        let options = parse_options("['required' => true]");
        assert_eq!(attributes(&options), " required");
    }

    #[test]
    fn test_attributes_excluding_structural_keys() {
        let options = parse_options(
            "['route' => 'users.store', 'method' => 'PUT', 'url' => '/x', 'files' => true, 'class' => 'form']",
        );
        assert_eq!(
            attributes_excluding(&options, FORM_STRUCTURAL_KEYS),
            " class=\"form\""
        );
    }

    #[test]
    fn test_split_top_level_ignores_nested_separators() {
        assert_eq!(
            split_top_level("'a', f(1, 2), [3, 4]", b','),
            vec!["'a'", " f(1, 2)", " [3, 4]"]
        );
    }
}
