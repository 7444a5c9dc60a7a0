use filter_syntax::parser::{FilterParser, Rule};
use pest::Parser;

fn single_rule(rule: Rule, input: &str) -> Rule {
    let pair = FilterParser::parse(rule, input)
        .unwrap_or_else(|e| panic!("Failed to parse {input}: {e}"))
        .next()
        .unwrap();
    assert_eq!(pair.as_str(), input, "Partial match for {input}");
    pair.as_rule()
}

#[test]
fn test_each_literal_form_is_recognized() {
    let cases = [
        ("null", Rule::lit_null),
        ("true", Rule::lit_boolean),
        ("42", Rule::lit_integer),
        ("-7", Rule::lit_integer),
        ("3.14", Rule::lit_decimal),
        ("1.5e10", Rule::lit_double),
        ("2024-03-01", Rule::lit_date),
        ("12:30:05", Rule::lit_time),
        ("2024-03-01T10:00:00Z", Rule::lit_datetime),
        ("2024-03-01T10:00:00+02:00", Rule::lit_datetime),
        ("0b7a2f4c-12ab-4c3d-9e8f-1234567890ab", Rule::lit_guid),
        ("'hello'", Rule::lit_string),
        ("java.time.chrono.IsoEra'CE'", Rule::lit_enum),
    ];

    for (input, expected) in cases {
        assert_eq!(single_rule(expected, input), expected);
    }
}

#[test]
fn test_null_is_case_insensitive() {
    for input in ["null", "NULL", "Null"] {
        assert_eq!(single_rule(Rule::lit_null, input), Rule::lit_null);
    }
    assert!(FilterParser::parse(Rule::lit_null, "NULLABLE").is_err());
}

#[test]
fn test_string_allows_doubled_quote() {
    let pair = FilterParser::parse(Rule::lit_string, "'O''Neil'")
        .unwrap()
        .next()
        .unwrap();
    assert_eq!(pair.as_str(), "'O''Neil'");
}

#[test]
fn test_keyword_prefix_is_not_a_literal() {
    assert!(FilterParser::parse(Rule::lit_null, "nullable").is_err());
    assert!(FilterParser::parse(Rule::lit_boolean, "trueish").is_err());
}

#[test]
fn test_unterminated_string_fails() {
    assert!(FilterParser::parse(Rule::filter, "Name eq 'abc").is_err());
}
