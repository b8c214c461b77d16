//! Call grammar shared by both directive tables.
//!
//! A directive is described declaratively: the helper method name, the
//! ordered argument grammar, and a render function that turns one match into
//! markup. Every call must sit inside a raw-output tag, `{!! ... !!}`.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::ops::Range;

use super::value::trim_quotes;

/// Quoted name without inner quotes: `'email'`.
pub const NAME: &str = r#"(['"][^'"]+['"])"#;
/// Scalar argument: anything up to the next `,` or `)`, not an array.
pub const VALUE: &str = r"([^,\)\[\s][^,\)]*)";
/// Trailing options array, matched lazily up to the closing `) !!}`.
pub const OPTIONS: &str = r"(\[.*?\])";
/// Bound model variable for `Form::model`.
pub const MODEL: &str = r"(\$[a-zA-Z0-9_]+)";
/// Literal boolean, used for the `secure` flag of link helpers.
pub const BOOLEAN: &str = r"(true|false)";

/// One positional argument in a call grammar.
#[derive(Debug, Clone, Copy)]
pub enum Arg {
    Required(&'static str),
    Optional(&'static str),
}

/// Build the full pattern for `{!! Namespace::method(args) !!}`.
pub fn call_pattern(namespace: &str, method: &str, args: &[Arg]) -> String {
    let mut pattern = format!(r"\{{!!\s*{namespace}::{method}\(\s*");
    for (index, arg) in args.iter().enumerate() {
        let separator = if index == 0 { "" } else { r"\s*,\s*" };
        match arg {
            Arg::Required(grammar) => {
                pattern.push_str(separator);
                pattern.push_str(grammar);
            }
            Arg::Optional(grammar) => {
                pattern.push_str(&format!("(?:{separator}{grammar})?"));
            }
        }
    }
    pattern.push_str(r"\s*\)\s*!!\}");
    pattern
}

/// A single recognized legacy call inside the text being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch<'t> {
    pub kind: &'static str,
    pub span: Range<usize>,
    args: Vec<Option<&'t str>>,
}

impl<'t> DirectiveMatch<'t> {
    pub fn new(kind: &'static str, span: Range<usize>, args: Vec<Option<&'t str>>) -> Self {
        Self { kind, span, args }
    }

    fn from_captures(kind: &'static str, captures: &Captures<'t>) -> Self {
        let span = captures.get(0).map_or(0..0, |whole| whole.range());
        let args = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()))
            .collect();
        Self::new(kind, span, args)
    }

    /// Argument at `index`, trimmed; `None` when omitted.
    pub fn arg(&self, index: usize) -> Option<&'t str> {
        self.args.get(index).copied().flatten().map(str::trim)
    }

    /// First argument with its quotes removed.
    pub fn name(&self) -> &'t str {
        self.arg(0).map(trim_quotes).unwrap_or_default()
    }
}

pub type Render = fn(&DirectiveMatch<'_>) -> String;

/// A compiled converter for one directive call shape.
pub struct Directive {
    pub kind: &'static str,
    pattern: Regex,
    render: Render,
}

impl Directive {
    pub fn new(namespace: &str, kind: &'static str, args: &[Arg], render: Render) -> Self {
        let source = call_pattern(namespace, kind, args);
        let pattern = Regex::new(&source)
            .unwrap_or_else(|e| panic!("invalid grammar for {namespace}::{kind}: {e}"));
        Self {
            kind,
            pattern,
            render,
        }
    }

    /// Replace every match in `text`. Unmatched text is returned untouched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let calls = self.calls(text);
        if calls.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut output = String::with_capacity(text.len());
        let mut copied = 0;
        for captures in &calls {
            let m = DirectiveMatch::from_captures(self.kind, captures);
            output.push_str(&text[copied..m.span.start]);
            output.push_str(&(self.render)(&m));
            copied = m.span.end;
        }
        output.push_str(&text[copied..]);
        Cow::Owned(output)
    }

    /// Matches found in `text`, without rendering them.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<DirectiveMatch<'t>> {
        self.calls(text)
            .iter()
            .map(|captures| DirectiveMatch::from_captures(self.kind, captures))
            .collect()
    }

    /// Non-overlapping matches that stay inside a single `{!! ... !!}` tag.
    ///
    /// A lazy argument group can run on into the next tag when the first
    /// call does not fit the grammar. Such a match is dropped and the search
    /// resumes just past its opening tag, so the next call is still found.
    fn calls<'t>(&self, text: &'t str) -> Vec<Captures<'t>> {
        let mut calls = Vec::new();
        let mut start = 0;
        while let Some(captures) = self.pattern.captures_at(text, start) {
            let Some(whole) = captures.get(0) else {
                break;
            };
            if spans_several_tags(whole.as_str()) {
                start = whole.start() + OPEN_TAG.len();
                continue;
            }
            start = whole.end();
            calls.push(captures);
        }
        calls
    }
}

const OPEN_TAG: &str = "{!!";
const CLOSE_TAG: &str = "!!}";

/// True when a matched call contains another raw-output tag between its own
/// opening and closing tags.
fn spans_several_tags(call: &str) -> bool {
    let inner = call
        .strip_prefix(OPEN_TAG)
        .and_then(|rest| rest.strip_suffix(CLOSE_TAG))
        .unwrap_or(call);
    inner.contains(OPEN_TAG) || inner.contains(CLOSE_TAG)
}

impl std::fmt::Debug for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directive")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}
