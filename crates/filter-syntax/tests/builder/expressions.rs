use filter_syntax::{
    ast::{
        literal::{Literal, LiteralKind},
        node::FilterNode,
        operator::{BinaryOperator, UnaryOperator},
    },
    parse,
};

#[test]
fn test_precedence_of_logical_operators() {
    let node = parse("A eq 1 or B eq 2 and C eq 3").unwrap();
    let FilterNode::Binary {
        operator, right, ..
    } = node
    else {
        panic!("Expected binary node");
    };
    assert_eq!(operator, BinaryOperator::Or);
    assert!(matches!(
        *right,
        FilterNode::Binary {
            operator: BinaryOperator::And,
            ..
        }
    ));
}

#[test]
fn test_arithmetic_is_left_associative() {
    let node = parse("A sub 1 sub 2 eq 0").unwrap();
    let expected = FilterNode::binary(
        FilterNode::binary(
            FilterNode::binary(
                FilterNode::member(&["A"]),
                BinaryOperator::Sub,
                FilterNode::integer(1),
            ),
            BinaryOperator::Sub,
            FilterNode::integer(2),
        ),
        BinaryOperator::Eq,
        FilterNode::integer(0),
    );
    assert_eq!(node, expected);
}

#[test]
fn test_multiplicative_binds_tighter_than_comparison() {
    let node = parse("Population div Area gt 100").unwrap();
    let expected = FilterNode::binary(
        FilterNode::binary(
            FilterNode::member(&["Population"]),
            BinaryOperator::Div,
            FilterNode::member(&["Area"]),
        ),
        BinaryOperator::Gt,
        FilterNode::integer(100),
    );
    assert_eq!(node, expected);
}

#[test]
fn test_parentheses_override_precedence() {
    let node = parse("(A add 1) mul 2 eq 4").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::Binary { left, operator, .. } = *left else {
        panic!("Expected product");
    };
    assert_eq!(operator, BinaryOperator::Mul);
    assert!(matches!(
        *left,
        FilterNode::Binary {
            operator: BinaryOperator::Add,
            ..
        }
    ));
}

#[test]
fn test_literal_kinds_are_preserved() {
    let node = parse("Created lt 2016-01-20T09:21:23Z").unwrap();
    let FilterNode::Binary { right, .. } = node else {
        panic!("Expected binary node");
    };
    assert_eq!(
        *right,
        FilterNode::Literal(Literal::new(
            "2016-01-20T09:21:23Z",
            LiteralKind::DateTimeOffset
        ))
    );
}

#[test]
fn test_null_literal_and_quoted_null_differ() {
    let node = parse("Name eq null").unwrap();
    let FilterNode::Binary { right, .. } = node else {
        panic!("Expected binary node");
    };
    assert!(right.is_null_literal());

    let node = parse("Name eq 'null'").unwrap();
    let FilterNode::Binary { right, .. } = node else {
        panic!("Expected binary node");
    };
    assert!(!right.is_null_literal());
}

#[test]
fn test_negation_of_member() {
    let node = parse("-Area lt 0").unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    assert_eq!(
        *left,
        FilterNode::unary(UnaryOperator::Minus, FilterNode::member(&["Area"]))
    );
}

#[test]
fn test_enum_literal() {
    let node = parse("AStringMappedEnum eq java.time.chrono.IsoEra'CE'").unwrap();
    let FilterNode::Binary { right, .. } = node else {
        panic!("Expected binary node");
    };
    assert_eq!(
        *right,
        FilterNode::TypedLiteral {
            enum_type: "java.time.chrono.IsoEra".into(),
            value: "CE".into(),
        }
    );
}

#[test]
fn test_ast_serializes_to_json() {
    let node = parse("not (Name eq 'x')").unwrap();
    let json = serde_json::to_value(&node).unwrap();
    assert!(json.get("Unary").is_some());
}

#[test]
fn test_syntax_error_carries_location() {
    let err = parse("Name eq 'a' and").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(err.to_string().starts_with("Parse error at line 1"));
}
