use filter_syntax::{
    ast::{
        member::{Member, MemberSegment},
        node::FilterNode,
        operator::BinaryOperator,
    },
    parse,
};

fn left_member(input: &str) -> Member {
    let node = parse(input).unwrap();
    let FilterNode::Binary { left, .. } = node else {
        panic!("Expected binary node");
    };
    let FilterNode::Member(member) = *left else {
        panic!("Expected member");
    };
    member
}

#[test]
fn test_multi_segment_path() {
    let member = left_member("AdministrativeInformation/Created/By eq 'Marvin'");
    assert_eq!(member, Member::path(&["AdministrativeInformation", "Created", "By"]));
}

#[test]
fn test_it_prefix_is_a_property_segment() {
    let member = left_member("$it/Area gt 10");
    assert_eq!(member, Member::path(&["$it", "Area"]));
}

#[test]
fn test_any_lambda() {
    let node = parse("Roles/any(d:d/RoleCategory eq 'A')").unwrap();
    let FilterNode::Member(member) = node else {
        panic!("Expected member");
    };
    assert_eq!(member.segments[0], MemberSegment::Property("Roles".into()));
    let Some(MemberSegment::Any(Some(lambda))) = member.last() else {
        panic!("Expected any lambda");
    };
    assert_eq!(lambda.variable, "d");
    assert_eq!(
        *lambda.body,
        FilterNode::binary(
            FilterNode::member(&["d", "RoleCategory"]),
            BinaryOperator::Eq,
            FilterNode::string("A"),
        )
    );
}

#[test]
fn test_any_without_lambda() {
    let node = parse("Roles/any()").unwrap();
    let FilterNode::Member(member) = node else {
        panic!("Expected member");
    };
    assert_eq!(member.last(), Some(&MemberSegment::Any(None)));
}

#[test]
fn test_nested_lambdas() {
    let node = parse("Children/any(c:c/Roles/all(r:r/RoleCategory eq 'B'))").unwrap();
    let FilterNode::Member(member) = node else {
        panic!("Expected member");
    };
    let Some(MemberSegment::Any(Some(outer))) = member.last() else {
        panic!("Expected any lambda");
    };
    let FilterNode::Member(inner) = outer.body.as_ref() else {
        panic!("Expected inner member");
    };
    assert!(matches!(inner.last(), Some(MemberSegment::All(l)) if l.variable == "r"));
}

#[test]
fn test_count_segment() {
    let member = left_member("Roles/$count ge 2");
    assert!(member.is_count());
    assert_eq!(member.segments.len(), 2);
}
