//! `Form::` directive table.
//!
//! Order matters: `open` and `model` run before the field converters, and
//! the expression form of `select` runs before the literal-array form so an
//! expression is never mistaken for an array body.

use super::grammar::{Arg, Directive, DirectiveMatch, MODEL, NAME, OPTIONS, VALUE};
use super::options::{
    attributes, attributes_excluding, parse_optional, split_top_level, OptionMap, OptionValue,
    FORM_STRUCTURAL_KEYS,
};
use super::value::{interpolate, trim_quotes, Value};

pub const NAMESPACE: &str = "Form";

/// Options expression for `select` that is computed at render time: a
/// variable with an optional call/property/index/static access, a static
/// class call, an array union such as `['' => 'None'] + $list`, or anything
/// else containing `+`.
const SELECT_EXPRESSION: &str = r"((?:\$[a-zA-Z0-9_]+(?:(?:->|\[|\(|::).*?)?|[A-Z][a-zA-Z0-9_\\]*::[a-zA-Z_].*?|\[[^\[\]]*\]\s*\+.*?|[^\[\s].*?\+.*?))";

/// Literal options array for `select`; only the body is captured.
const SELECT_ARRAY: &str = r#"\[\s*((?:[^\[\]]+|'[^']*'|"[^"]*")*)\s*\]"#;

/// Input types that share the `text` call shape beyond the core set.
const EXTRA_INPUT_TYPES: &[&str] = &["date", "time", "tel", "url", "search", "color"];

pub(crate) fn directives() -> Vec<Directive> {
    use Arg::{Optional, Required};

    let value_field = &[Required(NAME), Optional(VALUE), Optional(OPTIONS)];
    let checkable = &[Required(NAME), Optional(VALUE), Optional(VALUE), Optional(OPTIONS)];
    let name_only = &[Required(NAME), Optional(OPTIONS)];

    let mut table = vec![
        form("open", &[Optional(OPTIONS)], render_open),
        form("model", &[Required(MODEL), Required(OPTIONS)], render_model),
        form("close", &[], render_close),
        form("text", value_field, render_input),
        form("textarea", value_field, render_textarea),
        form("password", name_only, render_password),
        form("email", value_field, render_input),
        form("number", value_field, render_input),
        form("hidden", value_field, render_input),
        form(
            "select",
            &[Required(NAME), Required(SELECT_EXPRESSION), Optional(VALUE), Optional(OPTIONS)],
            render_select_expression,
        ),
        form(
            "select",
            &[Required(NAME), Required(SELECT_ARRAY), Optional(VALUE), Optional(OPTIONS)],
            render_select_array,
        ),
        form("checkbox", checkable, render_checkable),
        form("radio", checkable, render_checkable),
        form("file", name_only, render_file),
        form("submit", &[Required(VALUE), Optional(OPTIONS)], render_button),
        form("label", value_field, render_label),
    ];
    table.extend(
        EXTRA_INPUT_TYPES
            .iter()
            .map(|&kind| form(kind, value_field, render_input)),
    );
    table.push(form("button", &[Required(VALUE), Optional(OPTIONS)], render_button));
    table
}

fn form(kind: &'static str, args: &[Arg], render: fn(&DirectiveMatch<'_>) -> String) -> Directive {
    Directive::new(NAMESPACE, kind, args, render)
}

fn render_open(m: &DirectiveMatch<'_>) -> String {
    form_open(&parse_optional(m.arg(0)), None)
}

fn render_model(m: &DirectiveMatch<'_>) -> String {
    form_open(&parse_optional(m.arg(1)), m.arg(0))
}

fn render_close(_: &DirectiveMatch<'_>) -> String {
    "</form>".to_string()
}

/// Opening `<form>` tag plus the directives that belong right after it.
fn form_open(options: &OptionMap, model: Option<&str>) -> String {
    let verb = options.get("method").and_then(method_verb);
    let (form_method, spoofed) = match verb {
        Some(Verb::Literal(method))
            if method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("POST") =>
        {
            (method, None)
        }
        Some(Verb::Literal(method)) => ("POST", Some(format!("'{method}'"))),
        Some(Verb::Expression(expr)) => ("POST", Some(expr.to_string())),
        None => ("POST", None),
    };

    let enctype = if options.is_truthy("files") {
        " enctype=\"multipart/form-data\""
    } else {
        ""
    };

    let mut markup = format!(
        "<form method=\"{form_method}\" action=\"{}\"{enctype}{}>",
        form_action(options),
        attributes_excluding(options, FORM_STRUCTURAL_KEYS)
    );
    if let Some(model) = model {
        markup.push_str(&format!(
            "\n    {{{{-- Model-bound form for {model}: verify every field is populated manually --}}}}"
        ));
    }
    if !form_method.eq_ignore_ascii_case("GET") {
        markup.push_str("\n    @csrf");
    }
    if let Some(verb) = spoofed {
        markup.push_str(&format!("\n    @method({verb})"));
    }
    markup
}

enum Verb<'a> {
    Literal(&'a str),
    Expression(&'a str),
}

fn method_verb(value: &OptionValue) -> Option<Verb<'_>> {
    match value {
        OptionValue::Literal(text) if !text.is_empty() => Some(Verb::Literal(text)),
        OptionValue::Expression(expr) => Some(Verb::Expression(expr)),
        _ => None,
    }
}

/// Resolve the form action from `route`, then `url`, then `action`.
fn form_action(options: &OptionMap) -> String {
    ["route", "url", "action"]
        .iter()
        .find_map(|helper| {
            options
                .get(helper)
                .filter(|value| value.is_truthy())
                .and_then(|value| helper_call(helper, value))
        })
        .unwrap_or_default()
}

/// `{{ helper(...) }}` for a literal name, an expression, or a
/// `[name, params...]` array.
fn helper_call(helper: &str, value: &OptionValue) -> Option<String> {
    let args = match value {
        OptionValue::Flag => return None,
        OptionValue::Literal(text) => format!("'{text}'"),
        OptionValue::Expression(expr) => {
            match expr.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                Some(items) => array_call_args(items)?,
                None => expr.clone(),
            }
        }
    };
    Some(interpolate(&format!("{helper}({args})")))
}

/// `'users.update', $user->id` stays positional; several parameters, or
/// keyed ones, are regrouped into an array after the name.
fn array_call_args(items: &str) -> Option<String> {
    let items: Vec<&str> = split_top_level(items, b',').into_iter().map(str::trim).collect();
    let (name, params) = items.split_first()?;
    Some(match params {
        [] => (*name).to_string(),
        [single] if !single.contains("=>") => format!("{name}, {single}"),
        _ => format!("{name}, [{}]", params.join(", ")),
    })
}

fn render_input(m: &DirectiveMatch<'_>) -> String {
    let value = m
        .arg(1)
        .map(|raw| format!(" value=\"{}\"", Value::classify(raw).render()))
        .unwrap_or_default();
    format!(
        "<input type=\"{}\" name=\"{}\"{value}{}>",
        m.kind,
        m.name(),
        attributes(&parse_optional(m.arg(2)))
    )
}

fn render_textarea(m: &DirectiveMatch<'_>) -> String {
    let content = m
        .arg(1)
        .map(|raw| Value::classify(raw).render())
        .unwrap_or_default();
    format!(
        "<textarea name=\"{}\"{}>{content}</textarea>",
        m.name(),
        attributes(&parse_optional(m.arg(2)))
    )
}

/// Passwords never carry a value.
fn render_password(m: &DirectiveMatch<'_>) -> String {
    format!(
        "<input type=\"password\" name=\"{}\"{}>",
        m.name(),
        attributes(&parse_optional(m.arg(1)))
    )
}

fn render_file(m: &DirectiveMatch<'_>) -> String {
    format!(
        "<input type=\"file\" name=\"{}\"{}>",
        m.name(),
        attributes(&parse_optional(m.arg(1)))
    )
}

fn render_select_expression(m: &DirectiveMatch<'_>) -> String {
    select(m, m.arg(1).unwrap_or_default())
}

fn render_select_array(m: &DirectiveMatch<'_>) -> String {
    select(m, &format!("[{}]", m.arg(1).unwrap_or_default()))
}

fn select(m: &DirectiveMatch<'_>, options_expr: &str) -> String {
    let selected = m.arg(2).unwrap_or("null");
    let mut options = parse_optional(m.arg(3));
    let placeholder = options
        .remove("placeholder")
        .and_then(|value| placeholder_label(&value))
        .map(|label| format!("    <option value=\"\">{label}</option>\n"))
        .unwrap_or_default();

    format!(
        "<select name=\"{name}\"{attrs}>\n\
         \x20   @php\n\
         \x20       $selectOptions = {options_expr};\n\
         \x20       $selectedValue = {selected};\n\
         \x20   @endphp\n\
         {placeholder}\
         \x20   @foreach($selectOptions as $value => $label)\n\
         \x20       <option value=\"{{{{ $value }}}}\" {{{{ $selectedValue == $value ? 'selected' : '' }}}}>{{{{ $label }}}}</option>\n\
         \x20   @endforeach\n\
         </select>",
        name = m.name(),
        attrs = attributes(&options),
    )
}

fn placeholder_label(value: &OptionValue) -> Option<String> {
    match value {
        OptionValue::Flag => None,
        OptionValue::Literal(text) => Some(text.clone()),
        OptionValue::Expression(expr) => Some(Value::classify(expr).render_plain()),
    }
}

/// Checkbox and radio share a shape: name, value, checked, options.
fn render_checkable(m: &DirectiveMatch<'_>) -> String {
    let name = m.name();
    let value = match m.arg(1) {
        Some(raw) if raw.starts_with('$') => interpolate(raw),
        Some(raw) => trim_quotes(raw).to_string(),
        None if m.kind == "radio" => name.to_string(),
        None => "1".to_string(),
    };
    format!(
        "<input type=\"{}\" name=\"{name}\" value=\"{value}\"{}{}>",
        m.kind,
        checked_attribute(m.arg(2)),
        attributes(&parse_optional(m.arg(3)))
    )
}

fn checked_attribute(checked: Option<&str>) -> String {
    match checked {
        None | Some("false" | "null" | "NULL" | "0") => String::new(),
        Some("true" | "1") => " checked".to_string(),
        Some(expr) => format!(" {{{{ {expr} ? 'checked' : '' }}}}"),
    }
}

/// `submit` and `button` differ only in the button type.
fn render_button(m: &DirectiveMatch<'_>) -> String {
    let kind = if m.kind == "submit" { "submit" } else { "button" };
    format!(
        "<button type=\"{kind}\"{}>{}</button>",
        attributes(&parse_optional(m.arg(1))),
        m.arg(0)
            .map(|raw| Value::classify(raw).render_plain())
            .unwrap_or_default()
    )
}

fn render_label(m: &DirectiveMatch<'_>) -> String {
    let name = m.name();
    let text = match m.arg(1) {
        Some(raw) => Value::classify(raw).render(),
        None => humanize(name),
    };
    format!(
        "<label for=\"{name}\"{}>{text}</label>",
        attributes(&parse_optional(m.arg(2)))
    )
}

/// Default label text: underscores to spaces, each word capitalized.
fn humanize(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
