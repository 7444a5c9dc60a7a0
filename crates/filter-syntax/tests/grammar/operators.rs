use filter_syntax::parser::{FilterParser, Rule};
use pest::Parser;

#[test]
fn test_parse_all_operators() {
    let inputs = [
        "A eq 1",
        "A ne 1",
        "A gt 1 and B lt 2",
        "A ge 1 or B le 2",
        "A add 1 sub 2 eq 3",
        "A mul 2 div 3 mod 4 eq 0",
        "not (A eq 1)",
        "-A gt 0",
        "Era has Namespace.Era'CE'",
    ];

    for input in inputs {
        let result = FilterParser::parse(Rule::filter, input);
        assert!(result.is_ok(), "Failed to parse: {input}");
    }
}

#[test]
fn test_operator_needs_word_boundary() {
    // `order` must not split into `or` + `der`
    let result = FilterParser::parse(Rule::filter, "A eq 1 order B eq 2");
    assert!(result.is_err());
}

#[test]
fn test_incomplete_expressions_fail() {
    for input in ["A eq", "and B", "(A eq 1", "A eq 1)", ""] {
        assert!(
            FilterParser::parse(Rule::filter, input).is_err(),
            "Accepted: {input}"
        );
    }
}

#[test]
fn test_decimal_division_is_not_an_operator() {
    assert!(FilterParser::parse(Rule::filter, "A divby 2 gt 1.5").is_err());
}
