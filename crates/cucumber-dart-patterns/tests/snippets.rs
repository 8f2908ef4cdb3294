//! Snippet generation as seen by callers of the public API.

use cucumber_dart_patterns::{
    ArgumentParam, ArgumentScan, ArgumentType, DartSnippet, DataTable, NameStyle, REGEXP_HINT,
    SnippetGenerator, SnippetStep, argument_types, generate_snippet, is_cucumber_expression,
};
use rstest::rstest;

const STEP: &str = r#"I have 3 "cucumbers" in my <place>"#;

fn stub(_: &str) -> String {
    "stubbedName".to_owned()
}

#[rstest]
#[case::begin_anchor("^foo", false)]
#[case::end_anchor("foo$", false)]
#[case::script_style("/foo.*/", false)]
#[case::alpha_group("I have (a) cucumber", true)]
#[case::digit_group(r"I have (\d+) cucumbers", false)]
#[case::empty("", true)]
#[case::plain("I have cucumbers", true)]
fn classifies_definitions(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_cucumber_expression(text), expected);
}

#[test]
fn scan_yields_typed_params_and_terminates() {
    assert_eq!(
        argument_types(STEP, false),
        vec![
            ArgumentParam::unnamed(ArgumentType::Integer),
            ArgumentParam::unnamed(ArgumentType::String),
            ArgumentParam::named(ArgumentType::String, "place"),
        ]
    );

    let mut scan = ArgumentScan::new(STEP);
    let bound = STEP.len() + 1;
    let mut segments = 0;
    while scan.next().is_some() {
        segments += 1;
        assert!(segments <= bound, "scan did not terminate");
    }
    assert_eq!(scan.position(), STEP.len());
    assert!(scan.steps() <= STEP.len());
}

#[test]
fn generated_pattern_is_escaped_exactly_once() {
    let generator = SnippetGenerator::new(DartSnippet);
    let pattern = generator.pattern_for("it costs $3 (maybe)?");
    assert_eq!(pattern, r"it costs \$([-+]?\d+) \(maybe\)\?");
    assert!(!pattern.contains(r"\\"));
}

#[test]
fn snippet_without_table_has_empty_table_slot() {
    let expected = [
        r#"@Given("I have ([-+]?\\d+) \"([^\"]*)\" in my <([^>]*)>")"#,
        "Future<void> stubbedName(int arg1, String arg2, String place) async {",
        &format!("  // {REGEXP_HINT}"),
        "  throw PendingException();",
        "}",
        "",
    ]
    .join("\n");
    assert_eq!(generate_snippet(STEP, "Given", None, Some(&stub)), expected);
}

#[test]
fn snippet_with_table_includes_table_hint() {
    let table = DataTable::new(vec![
        vec!["name".into(), "email".into()],
        vec!["Ann".into(), "ann@example.com".into()],
    ]);
    let expected = [
        r#"@Given("the following users exist")"#,
        "Future<void> stubbedName(GherkinTable dataTable) async {",
        &format!("  // {REGEXP_HINT}"),
        "  // The dataTable parameter receives the step's table rows.",
        "  throw PendingException();",
        "}",
        "",
    ]
    .join("\n");
    let step = SnippetStep::new("the following users exist").with_table(&table);
    let generator = SnippetGenerator::new(DartSnippet);
    assert_eq!(generator.snippet(&step, "Given", Some(&stub)), expected);
}

#[rstest]
#[case::camel(NameStyle::Camel, "iHaveInMy")]
#[case::snake(NameStyle::Snake, "i_have_in_my")]
fn name_styles_shape_function_names(#[case] style: NameStyle, #[case] expected: &str) {
    let name = style.generator();
    let snippet = generate_snippet(STEP, "Given", None, Some(&name));
    assert!(
        snippet.contains(&format!("Future<void> {expected}(")),
        "unexpected snippet:\n{snippet}"
    );
}

#[test]
fn missing_name_generator_falls_back_to_step() {
    let snippet = generate_snippet("", "Then", None, None);
    assert!(snippet.starts_with("@Then(\"\")\nFuture<void> step() async {"));
}

#[test]
fn non_ascii_digits_stay_literal() {
    let text = "I have \u{0663} apples";
    let generator = SnippetGenerator::new(DartSnippet);
    assert_eq!(generator.pattern_for(text), text);
    assert!(argument_types(text, false).is_empty());
    let snippet = generate_snippet(text, "Given", None, Some(&stub));
    assert!(snippet.contains("Future<void> stubbedName() async {"));
}

#[rstest]
#[case::function_name("return", "Future<void> return$() async {")]
#[case::parameter_name("I pick <class>", "Future<void> iPick(String class$) async {")]
fn reserved_words_are_not_emitted_as_identifiers(#[case] text: &str, #[case] signature: &str) {
    let name = NameStyle::Camel.generator();
    let snippet = generate_snippet(text, "When", None, Some(&name));
    assert!(snippet.contains(signature), "unexpected snippet:\n{snippet}");
}
