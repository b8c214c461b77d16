//! Classification of raw call arguments.
//!
//! Every argument captured from a legacy helper call is one of three things:
//! a quoted constant that can be embedded as-is, a variable (or `null`) that
//! must be interpolated at render time, or some other bare expression such as
//! a number or a function call.

/// A classified argument token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// Quoted constant with one pair of surrounding quotes removed.
    Literal(&'a str),
    /// `$`-prefixed expression, or the `null` keyword.
    Dynamic(&'a str),
    /// Any other bare token, kept verbatim.
    Expression(&'a str),
}

impl<'a> Value<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let token = raw.trim();
        if is_dynamic(token) {
            Value::Dynamic(token)
        } else if let Some(inner) = unquote(token) {
            Value::Literal(inner)
        } else {
            Value::Expression(token)
        }
    }

    /// Render for a field value, falling back to an empty string when a
    /// dynamic value is null at render time.
    pub fn render(&self) -> String {
        match self {
            Value::Literal(text) => (*text).to_string(),
            Value::Dynamic(expr) => format!("{{{{ {expr} ?? '' }}}}"),
            Value::Expression(expr) => interpolate(expr),
        }
    }

    /// Render without the null-coalescing fallback.
    pub fn render_plain(&self) -> String {
        match self {
            Value::Literal(text) => (*text).to_string(),
            Value::Dynamic(expr) | Value::Expression(expr) => interpolate(expr),
        }
    }
}

/// Wrap an expression in Blade's escaped echo syntax.
pub fn interpolate(expr: &str) -> String {
    format!("{{{{ {expr} }}}}")
}

pub fn is_dynamic(token: &str) -> bool {
    token.starts_with('$') || is_null(token)
}

pub fn is_null(token: &str) -> bool {
    token == "null" || token == "NULL"
}

pub fn is_numeric(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
        && token.parse::<f64>().is_ok()
}

/// Strip exactly one matching pair of surrounding quotes.
///
/// Only succeeds when the whole token is a single string literal, so
/// `'a' . 'b'` stays an expression.
pub fn unquote(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    match bytes.first() {
        Some(b'\'' | b'"') => match string_end(bytes, 0) {
            Some(end) if end == bytes.len() - 1 => Some(&token[1..end]),
            _ => None,
        },
        _ => None,
    }
}

/// Index of the quote closing the string literal that opens at `start`.
pub(crate) fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Remove every leading and trailing quote character.
///
/// Name arguments are matched as quote-free strings, so this only ever
/// removes the delimiters themselves.
pub fn trim_quotes(token: &str) -> &str {
    token.trim().trim_matches(|c| c == '\'' || c == '"')
}
