use filter_syntax::parser::{FilterParser, Rule};
use pest::Parser;

fn rules_in(input: &str) -> Vec<Rule> {
    FilterParser::parse(Rule::filter, input)
        .unwrap_or_else(|e| panic!("Failed to parse {input}: {e}"))
        .flatten()
        .map(|pair| pair.as_rule())
        .collect()
}

#[test]
fn test_navigation_path() {
    let rules = rules_in("AdministrativeInformation/Created/By eq 'Marvin'");
    assert_eq!(rules.iter().filter(|r| **r == Rule::property).count(), 3);
}

#[test]
fn test_lambda_segments() {
    let rules = rules_in("Roles/any(d:d/RoleCategory eq 'A')");
    assert!(rules.contains(&Rule::any_segment));
    assert!(rules.contains(&Rule::lambda_variable));

    let rules = rules_in("Roles/all(r: r/RoleCategory ne 'C')");
    assert!(rules.contains(&Rule::all_segment));

    let rules = rules_in("Roles/any()");
    assert!(rules.contains(&Rule::any_segment));
    assert!(!rules.contains(&Rule::lambda_variable));
}

#[test]
fn test_property_named_like_lambda_keyword() {
    let rules = rules_in("anything eq 1");
    assert!(!rules.contains(&Rule::any_segment));
    assert!(rules.contains(&Rule::property));
}

#[test]
fn test_count_segment() {
    let rules = rules_in("Roles/$count ge 2");
    assert!(rules.contains(&Rule::count_segment));
}

#[test]
fn test_calls_with_named_arguments() {
    let rules = rules_in(
        "org.apache.olingo.jpa.PopulationDensity(Area=$it/Area,Population=$it/Population) gt 1",
    );
    assert!(rules.contains(&Rule::call));
    assert_eq!(rules.iter().filter(|r| **r == Rule::param_name).count(), 2);
}

#[test]
fn test_type_reference_and_alias() {
    let rules = rules_in("cast(Area, Edm.String) eq @value");
    assert!(rules.contains(&Rule::type_ref));
    assert!(rules.contains(&Rule::alias));
}
