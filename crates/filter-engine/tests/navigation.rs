mod common;

use common::{children_correlation, compile, division, partner, partner_err, roles_correlation, string};
use filter_engine::error::FilterError;
use model::core::value::Value;

const ROLE: &str = r#""OLINGO"."BusinessPartnerRole""#;
const PARTNER: &str = r#""OLINGO"."BusinessPartner""#;
const DIVISION: &str = r#""OLINGO"."AdministrativeDivision""#;

#[test]
fn test_to_one_navigation_from_complex_type() {
    let (sql, params) = partner("AdministrativeInformation/Created/User/LastName eq 'Doe'");
    assert_eq!(
        sql,
        r#"EXISTS (SELECT 1 FROM "OLINGO"."Person" AS "t1" WHERE (("t1"."ID" = "t0"."CreatedBy") AND ("t1"."LastName" = $1)))"#
    );
    assert_eq!(params, vec![string("Doe")]);
}

#[test]
fn test_each_hop_opens_one_exists() {
    let (sql, params) = partner("Roles/BusinessPartner/Roles/RoleCategory eq 'A'");

    let third = format!(
        r#"EXISTS (SELECT 1 FROM {ROLE} AS "t3" WHERE ({} AND ("t3"."Category" = $1)))"#,
        roles_correlation("t3", "t2")
    );
    let second = format!(
        r#"EXISTS (SELECT 1 FROM {PARTNER} AS "t2" WHERE (("t2"."ID" = "t1"."BusinessPartnerID") AND {third}))"#
    );
    let first = format!(
        r#"EXISTS (SELECT 1 FROM {ROLE} AS "t1" WHERE ({} AND {second}))"#,
        roles_correlation("t1", "t0")
    );
    assert_eq!(sql, first);
    assert_eq!(params, vec![string("A")]);
}

#[test]
fn test_navigation_on_the_right_side() {
    let (sql, _) = partner("'A' eq Roles/RoleCategory");
    assert_eq!(
        sql,
        format!(
            r#"EXISTS (SELECT 1 FROM {ROLE} AS "t1" WHERE ({} AND ($1 = "t1"."Category")))"#,
            roles_correlation("t1", "t0")
        )
    );
}

#[test]
fn test_other_operand_stays_on_the_outer_query() {
    let (sql, params) = partner("Roles/RoleCategory eq Country");
    assert_eq!(
        sql,
        format!(
            r#"EXISTS (SELECT 1 FROM {ROLE} AS "t1" WHERE ({} AND ("t1"."Category" = "t0"."Country")))"#,
            roles_correlation("t1", "t0")
        )
    );
    assert!(params.is_empty());
}

#[test]
fn test_function_argument_navigation_rescopes_the_call() {
    let (sql, params) = partner("contains(AdministrativeInformation/Created/User/LastName, 'Mu')");
    assert_eq!(
        sql,
        r#"EXISTS (SELECT 1 FROM "OLINGO"."Person" AS "t1" WHERE (("t1"."ID" = "t0"."CreatedBy") AND ("t1"."LastName" LIKE $1)))"#
    );
    assert_eq!(params, vec![string("%Mu%")]);
}

#[test]
fn test_navigation_inside_arithmetic() {
    let (sql, params) = division("Parent/Population sub Population gt 0");
    assert_eq!(
        sql,
        format!(
            r#"EXISTS (SELECT 1 FROM {DIVISION} AS "t1" WHERE ((("t1"."CodeID" = "t0"."ParentCodeID") AND ("t1"."DivisionCode" = "t0"."ParentDivisionCode")) AND (("t1"."Population" - "t0"."Population") > $1)))"#
        )
    );
    assert_eq!(params, vec![Value::Long(0)]);
}

#[test]
fn test_navigation_on_both_sides_is_not_supported() {
    let err = partner_err("Roles/RoleCategory eq AdministrativeInformation/Created/User/LastName");
    assert!(matches!(err, FilterError::NotSupported(ref m) if m.contains("both sides")));
}

#[test]
fn test_navigation_property_as_value_is_not_supported() {
    let err = partner_err("Roles eq 'A'");
    assert!(matches!(err, FilterError::NotSupported(_)));
}

#[test]
fn test_count_is_a_scalar_subquery() {
    let (sql, params) = partner("Roles/$count gt 2");
    assert_eq!(
        sql,
        format!(
            r#"((SELECT COUNT(*) FROM {ROLE} AS "t1" WHERE {}) > $1)"#,
            roles_correlation("t1", "t0")
        )
    );
    assert_eq!(params, vec![Value::Long(2)]);
}

#[test]
fn test_count_behind_a_hop_nests_in_exists() {
    let (sql, params) = division("Children/Children/$count eq 0");
    let count = format!(
        r#"(SELECT COUNT(*) FROM {DIVISION} AS "t2" WHERE {})"#,
        children_correlation("t2", "t1")
    );
    assert_eq!(
        sql,
        format!(
            r#"EXISTS (SELECT 1 FROM {DIVISION} AS "t1" WHERE ({} AND ({count} = $1)))"#,
            children_correlation("t1", "t0")
        )
    );
    assert_eq!(params, vec![Value::Long(0)]);
}

#[test]
fn test_count_needs_a_collection() {
    let err = partner_err("Country/$count gt 1");
    assert!(matches!(err, FilterError::NotSupported(_)));

    let err = compile("AdministrativeDivision", "Parent/$count eq 1").unwrap_err();
    assert!(matches!(err, FilterError::NotSupported(ref m) if m.contains("collection")));
}

#[test]
fn test_join_table_navigation() {
    let (sql, params) = partner("Teams/Name eq 'Core'");
    assert_eq!(
        sql,
        r#"EXISTS (SELECT 1 FROM "OLINGO"."Team" AS "t1" INNER JOIN "OLINGO"."Membership" AS "t2" ON ("t2"."TeamID" = "t1"."TeamKey") WHERE (("t2"."PersonID" = "t0"."ID") AND ("t1"."Name" = $1)))"#
    );
    assert_eq!(params, vec![string("Core")]);
}

#[test]
fn test_element_collection_of_complex_values() {
    let (sql, params) = partner("InhouseAddress/RoomNumber gt 100");
    assert_eq!(
        sql,
        r#"EXISTS (SELECT 1 FROM "OLINGO"."InhouseAddress" AS "t1" WHERE (("t1"."ParentID" = "t0"."ID") AND ("t1"."RoomNumber" > $1)))"#
    );
    assert_eq!(params, vec![Value::Int(100)]);
}

#[test]
fn test_it_prefix_addresses_the_root() {
    let (sql, _) = partner("$it/Country eq 'DEU'");
    assert_eq!(sql, r#"("t0"."Country" = $1)"#);
}
