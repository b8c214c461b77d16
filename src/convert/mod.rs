//! Directive conversion engine.
//!
//! Each [`Pipeline`] is an ordered table of [`grammar::Directive`]s applied
//! one after another to the full text of a template. Converters are pure
//! `text -> text` rewrites: a call that no grammar recognizes is left exactly
//! as it was, and the drop in marker occurrences is the only record of what
//! was converted.
//!
//! ```
//! use collective_migrate::convert::Pipeline;
//!
//! let conversion = Pipeline::Form.convert("{!! Form::close() !!}");
//! assert_eq!(conversion.output, "</form>");
//! assert_eq!(conversion.converted(), 1);
//! ```

pub mod form;
pub mod grammar;
pub mod html;
pub mod options;
pub mod value;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use grammar::Directive;

static FORM_DIRECTIVES: Lazy<Vec<Directive>> = Lazy::new(form::directives);
static HTML_DIRECTIVES: Lazy<Vec<Directive>> = Lazy::new(html::directives);

static FORM_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Form::[a-zA-Z]+").expect("valid marker pattern"));
static HTML_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Html::[a-zA-Z]+").expect("valid marker pattern"));

/// One family of legacy helper directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Form,
    Html,
}

impl Pipeline {
    pub const ALL: [Pipeline; 2] = [Pipeline::Form, Pipeline::Html];

    /// Namespace prefix that identifies a legacy call, e.g. `Form::`.
    pub fn marker(self) -> &'static str {
        match self {
            Pipeline::Form => "Form::",
            Pipeline::Html => "Html::",
        }
    }

    pub fn directives(self) -> &'static [Directive] {
        match self {
            Pipeline::Form => &FORM_DIRECTIVES,
            Pipeline::Html => &HTML_DIRECTIVES,
        }
    }

    /// Number of `Namespace::method` references in `text`.
    pub fn count_occurrences(self, text: &str) -> usize {
        let marker = match self {
            Pipeline::Form => &*FORM_MARKER,
            Pipeline::Html => &*HTML_MARKER,
        };
        marker.find_iter(text).count()
    }

    /// Apply every directive in order without counting.
    pub fn rewrite(self, text: &str) -> String {
        self.directives()
            .iter()
            .fold(text.to_string(), |current, directive| {
                let rewritten = match directive.apply(&current) {
                    Cow::Owned(rewritten) => Some(rewritten),
                    Cow::Borrowed(_) => None,
                };
                rewritten.unwrap_or(current)
            })
    }

    pub fn convert(self, text: &str) -> Conversion {
        let before = self.count_occurrences(text);
        let output = self.rewrite(text);
        let after = self.count_occurrences(&output);
        Conversion {
            changed: output != text,
            output,
            before,
            after,
        }
    }

    /// Human-readable advisory printed after a run that converted something.
    pub fn advisory(self) -> &'static str {
        match self {
            Pipeline::Form => {
                "Review changes carefully before deploying. Some complex form elements may need manual adjustments."
            }
            Pipeline::Html => "Review changes carefully before deploying.",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Form => write!(f, "form"),
            Pipeline::Html => write!(f, "html"),
        }
    }
}

/// Which pipelines a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Form,
    Html,
    All,
}

impl Target {
    pub fn pipelines(self) -> &'static [Pipeline] {
        match self {
            Target::Form => &[Pipeline::Form],
            Target::Html => &[Pipeline::Html],
            Target::All => &Pipeline::ALL,
        }
    }

    pub fn markers(self) -> impl Iterator<Item = &'static str> {
        self.pipelines().iter().map(|pipeline| pipeline.marker())
    }

    pub fn count_occurrences(self, text: &str) -> usize {
        self.pipelines()
            .iter()
            .map(|pipeline| pipeline.count_occurrences(text))
            .sum()
    }

    /// Run each selected pipeline in turn over the same text.
    pub fn convert(self, text: &str) -> Conversion {
        let before = self.count_occurrences(text);
        let output = self
            .pipelines()
            .iter()
            .fold(text.to_string(), |current, pipeline| pipeline.rewrite(&current));
        let after = self.count_occurrences(&output);
        Conversion {
            changed: output != text,
            output,
            before,
            after,
        }
    }

    /// The strongest advisory among the selected pipelines.
    pub fn advisory(self) -> &'static str {
        self.pipelines()
            .first()
            .map_or(Pipeline::Html.advisory(), |pipeline| pipeline.advisory())
    }
}

/// Result of converting one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: String,
    pub before: usize,
    pub after: usize,
    pub changed: bool,
}

impl Conversion {
    /// Occurrences removed by the conversion.
    pub fn converted(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}
