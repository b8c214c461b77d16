//! Property-based tests for the conversion pipelines
//!
//! These tests verify invariants that should hold for all inputs:
//! - Converting an already converted template changes nothing
//! - The number of legacy calls never grows
//! - Text without any legacy call passes through untouched

use collective_migrate::convert::{Pipeline, Target};
use proptest::prelude::*;

/// Field names as they appear in templates
fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

/// A value argument: quoted literal, variable, property access or null
fn value_arg() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,10}".prop_map(|s| format!("'{s}'")),
        "[a-z][a-z0-9_]{0,8}".prop_map(|s| format!("${s}")),
        "[a-z][a-z0-9_]{0,8}".prop_map(|s| format!("$user->{s}")),
        Just("null".to_string()),
    ]
}

fn options_arg() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z-]{1,8}".prop_map(|class| format!(", ['class' => '{class}']")),
        Just(", ['required', 'placeholder' => 'Type here']".to_string()),
    ]
}

/// One Form:: call, recognized or not.
fn form_call() -> impl Strategy<Value = String> {
    prop_oneof![
        (field_name(), value_arg(), options_arg()).prop_map(|(name, value, options)| {
            format!("{{!! Form::text('{name}', {value}{options}) !!}}")
        }),
        (field_name(), value_arg())
            .prop_map(|(name, value)| format!("{{!! Form::textarea('{name}', {value}) !!}}")),
        (field_name(), options_arg())
            .prop_map(|(name, options)| format!("{{!! Form::password('{name}'{options}) !!}}")),
        field_name().prop_map(|name| format!("{{!! Form::label('{name}') !!}}")),
        (field_name(), value_arg()).prop_map(|(name, value)| {
            format!("{{!! Form::select('{name}', $options, {value}) !!}}")
        }),
        Just("{!! Form::open(['route' => 'users.store', 'method' => 'PUT']) !!}".to_string()),
        Just("{!! Form::model($user, ['url' => '/users']) !!}".to_string()),
        Just("{!! Form::close() !!}".to_string()),
        Just("{!! Form::assignSelectVariant($variant) !!}".to_string()),
    ]
}

/// One Html:: call, recognized or not.
fn html_call() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|file| format!("{{!! Html::script('js/{file}.js') !!}}")),
        value_arg().prop_map(|alt| format!("{{!! Html::image('img/a.png', {alt}) !!}}")),
        Just("{!! Html::link('/home', 'Home') !!}".to_string()),
        Just("{!! Html::macroThing() !!}".to_string()),
    ]
}

/// A template made of legacy calls interleaved with ordinary markup.
fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            form_call(),
            html_call(),
            Just("<div class=\"row\">".to_string()),
            Just("{{ $title }}".to_string()),
        ],
        0..12,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Property: a second conversion is a no-op
    #[test]
    fn prop_conversion_is_idempotent(text in template()) {
        for target in [Target::Form, Target::Html, Target::All] {
            let first = target.convert(&text);
            let second = target.convert(&first.output);
            prop_assert_eq!(&second.output, &first.output);
            prop_assert!(!second.changed);
        }
    }

    /// Property: no directive introduces new legacy calls
    #[test]
    fn prop_occurrences_never_increase(text in template()) {
        for pipeline in Pipeline::ALL {
            let conversion = pipeline.convert(&text);
            prop_assert!(conversion.after <= conversion.before);
            for directive in pipeline.directives() {
                let rewritten = directive.apply(&text);
                prop_assert!(
                    pipeline.count_occurrences(&rewritten) <= pipeline.count_occurrences(&text)
                );
            }
        }
    }

    /// Property: the form pipeline never touches Html:: calls and vice versa
    #[test]
    fn prop_pipelines_are_independent(text in template()) {
        let form = Pipeline::Form.convert(&text);
        prop_assert_eq!(
            Pipeline::Html.count_occurrences(&form.output),
            Pipeline::Html.count_occurrences(&text)
        );
        let html = Pipeline::Html.convert(&text);
        prop_assert_eq!(
            Pipeline::Form.count_occurrences(&html.output),
            Pipeline::Form.count_occurrences(&text)
        );
    }

    /// Property: text with no legacy call is returned byte-identical
    #[test]
    fn prop_plain_markup_is_untouched(text in "[a-zA-Z0-9 <>/=\"{}$\n-]{0,200}") {
        prop_assume!(!text.contains("Form::") && !text.contains("Html::"));
        let conversion = Target::All.convert(&text);
        prop_assert_eq!(conversion.output, text);
        prop_assert!(!conversion.changed);
    }
}
