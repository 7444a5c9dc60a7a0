use filter_syntax::{
    ast::{function::FunctionKind, member::MemberSegment, node::FilterNode},
    parse,
};

#[test]
fn test_builtin_call() {
    let node = parse("contains(CodeID,'166')").unwrap();
    assert_eq!(
        node,
        FilterNode::call(
            FunctionKind::Contains,
            vec![FilterNode::member(&["CodeID"]), FilterNode::string("166")]
        )
    );
}

#[test]
fn test_nested_builtin_calls() {
    let node = parse("length(trim(Name)) eq 3").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::FunctionCall { kind, args } = *left else {
        panic!("Expected call");
    };
    assert_eq!(kind, FunctionKind::Length);
    assert!(matches!(
        args[0],
        FilterNode::FunctionCall {
            kind: FunctionKind::Trim,
            ..
        }
    ));
}

#[test]
fn test_cast_takes_a_type_reference() {
    let node = parse("cast(Area, Edm.String) eq '1'").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::FunctionCall { args, .. } = *left else {
        panic!("Expected call");
    };
    assert_eq!(
        args[1],
        FilterNode::TypeCheck {
            type_name: "Edm.String".into()
        }
    );
}

#[test]
fn test_custom_function_with_named_arguments() {
    let node = parse("PopulationDensity(Area=Area div 1000000,Population=Population) gt 1").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::Member(member) = *left else {
        panic!("Expected member");
    };
    let Some(MemberSegment::Function { name, args }) = member.last() else {
        panic!("Expected function segment");
    };
    assert_eq!(name, "PopulationDensity");
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].name.as_deref(), Some("Area"));
    assert!(matches!(args[0].value, FilterNode::Binary { .. }));
    assert_eq!(args[1].value, FilterNode::member(&["Population"]));
}

#[test]
fn test_unknown_function_name_is_kept_verbatim() {
    let node = parse("geo.distance(Location, 5) lt 10").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::Member(member) = *left else {
        panic!("Expected member");
    };
    assert!(matches!(
        member.last(),
        Some(MemberSegment::Function { name, .. }) if name == "geo.distance"
    ));
}

#[test]
fn test_builtin_name_with_named_arguments_is_not_builtin() {
    let node = parse("length(Value=Name) eq 1").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    assert!(matches!(*left, FilterNode::Member(_)));
}
