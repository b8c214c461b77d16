//! `Html::` directive table.

use super::grammar::{Arg, Directive, DirectiveMatch, BOOLEAN, NAME, OPTIONS, VALUE};
use super::options::{attributes, parse_optional};
use super::value::{interpolate, is_null, unquote, Value};

pub const NAMESPACE: &str = "Html";

pub(crate) fn directives() -> Vec<Directive> {
    use Arg::{Optional, Required};

    let link_shape = &[Required(VALUE), Optional(VALUE), Optional(OPTIONS), Optional(BOOLEAN)];

    vec![
        html("script", &[Required(VALUE), Optional(OPTIONS)], render_script),
        html("style", &[Required(VALUE), Optional(OPTIONS)], render_style),
        html("image", &[Required(VALUE), Optional(VALUE), Optional(OPTIONS)], render_image),
        html("link", link_shape, render_link),
        html(
            "linkRoute",
            &[Required(NAME), Optional(VALUE), Optional(OPTIONS), Optional(OPTIONS)],
            render_link_route,
        ),
        html("linkAsset", link_shape, render_link_asset),
    ]
}

fn html(kind: &'static str, args: &[Arg], render: fn(&DirectiveMatch<'_>) -> String) -> Directive {
    Directive::new(NAMESPACE, kind, args, render)
}

/// A src/href argument: a quoted string is embedded, anything else echoed.
fn source(raw: &str) -> String {
    match unquote(raw) {
        Some(text) => text.to_string(),
        None => interpolate(raw),
    }
}

fn render_script(m: &DirectiveMatch<'_>) -> String {
    format!(
        "<script src=\"{}\"{}></script>",
        source(m.arg(0).unwrap_or_default()),
        attributes(&parse_optional(m.arg(1)))
    )
}

fn render_style(m: &DirectiveMatch<'_>) -> String {
    format!(
        "<link rel=\"stylesheet\" href=\"{}\"{}>",
        source(m.arg(0).unwrap_or_default()),
        attributes(&parse_optional(m.arg(1)))
    )
}

fn render_image(m: &DirectiveMatch<'_>) -> String {
    let alt = m
        .arg(1)
        .filter(|raw| !is_null(raw))
        .map(|raw| Value::classify(raw).render_plain())
        .unwrap_or_default();
    format!(
        "<img src=\"{}\" alt=\"{alt}\"{}>",
        source(m.arg(0).unwrap_or_default()),
        attributes(&parse_optional(m.arg(2)))
    )
}

fn render_link(m: &DirectiveMatch<'_>) -> String {
    let raw = m.arg(0).unwrap_or_default();
    let href = match unquote(raw) {
        Some(path) if path.starts_with('/') => interpolate(&secure_call("url", path, m.arg(3))),
        Some(url) => url.to_string(),
        None => interpolate(raw),
    };
    anchor(&href, m.arg(1), m.arg(2))
}

fn render_link_asset(m: &DirectiveMatch<'_>) -> String {
    let raw = m.arg(0).unwrap_or_default();
    let href = match unquote(raw) {
        Some(path) => interpolate(&secure_call("asset", path, m.arg(3))),
        None => interpolate(&format!("asset({raw})")),
    };
    anchor(&href, m.arg(1), m.arg(2))
}

fn render_link_route(m: &DirectiveMatch<'_>) -> String {
    let call = match m.arg(2) {
        Some(params) => format!("route('{}', {params})", m.name()),
        None => format!("route('{}')", m.name()),
    };
    anchor(&interpolate(&call), m.arg(1), m.arg(3))
}

/// `url('/x')`, or `url('/x', [], true)` when the secure flag is set.
/// `asset` takes the flag as its second argument.
fn secure_call(helper: &str, path: &str, secure: Option<&str>) -> String {
    match (secure, helper) {
        (Some("true"), "url") => format!("{helper}('{path}', [], true)"),
        (Some("true"), _) => format!("{helper}('{path}', true)"),
        _ => format!("{helper}('{path}')"),
    }
}

/// `<a>` element; a missing or null title falls back to the href itself.
fn anchor(href: &str, title: Option<&str>, options: Option<&str>) -> String {
    let title = match title {
        Some(raw) if !is_null(raw) => Value::classify(raw).render_plain(),
        _ => href.to_string(),
    };
    format!(
        "<a href=\"{href}\"{}>{title}</a>",
        attributes(&parse_optional(options))
    )
}
