mod common;

use bigdecimal::BigDecimal;
use common::{compile_mysql, division, partner, partner_err, string};
use filter_engine::error::FilterError;
use model::core::value::Value;
use std::str::FromStr;

#[test]
fn test_string_equality() {
    let (sql, params) = partner("Country eq 'DEU'");
    assert_eq!(sql, r#"("t0"."Country" = $1)"#);
    assert_eq!(params, vec![string("DEU")]);
}

#[test]
fn test_literal_on_the_left_takes_the_attribute_type() {
    let (sql, params) = partner("10 lt ETag");
    assert_eq!(sql, r#"($1 < "t0"."ETag")"#);
    assert_eq!(params, vec![Value::Long(10)]);
}

#[test]
fn test_mysql_placeholders() {
    let (sql, params) = compile_mysql("BusinessPartner", "Country ne 'DEU' and ETag ge 3").unwrap();
    assert_eq!(sql, "((`t0`.`Country` <> ?) AND (`t0`.`ETag` >= ?))");
    assert_eq!(params, vec![string("DEU"), Value::Long(3)]);
}

#[test]
fn test_complex_attribute_columns_are_prefixed() {
    let (sql, params) = partner("AdministrativeInformation/Created/By eq 'Marvin'");
    assert_eq!(sql, r#"("t0"."CreatedBy" = $1)"#);
    assert_eq!(params, vec![string("Marvin")]);
}

#[test]
fn test_logical_operators_keep_grouping() {
    let (sql, _) = partner("Country eq 'A' or Country eq 'B' and ETag gt 1");
    assert_eq!(
        sql,
        r#"(("t0"."Country" = $1) OR (("t0"."Country" = $2) AND ("t0"."ETag" > $3)))"#
    );
}

#[test]
fn test_arithmetic_comparison() {
    let (sql, params) = division("Population div Area gt 100");
    assert_eq!(sql, r#"(("t0"."Population" / "t0"."Area") > $1)"#);
    assert_eq!(params, vec![Value::Long(100)]);
}

#[test]
fn test_decimal_division_is_rejected_by_the_parser() {
    assert!(filter_syntax::parse("Population divby Area gt 1").is_err());
}

#[test]
fn test_arithmetic_with_decimal_literal_widens() {
    let (sql, params) = division("Area mul 1.5 gt Population");
    assert_eq!(sql, r#"(("t0"."Area" * $1) > "t0"."Population")"#);
    assert_eq!(params, vec![Value::Decimal(BigDecimal::from_str("1.5").unwrap())]);
}

#[test]
fn test_negative_literal() {
    let (sql, params) = partner("ETag gt -5");
    assert_eq!(sql, r#"("t0"."ETag" > $1)"#);
    assert_eq!(params, vec![Value::Long(-5)]);
}

#[test]
fn test_unary_minus_on_attribute_is_not_supported() {
    let err = partner_err("-ETag gt 5");
    assert!(matches!(err, FilterError::NotSupported(_)));
}

#[test]
fn test_null_comparisons() {
    let (sql, params) = partner("ETag eq null");
    assert_eq!(sql, r#"("t0"."ETag" IS NULL)"#);
    assert!(params.is_empty());

    let (sql, _) = partner("null ne Country");
    assert_eq!(sql, r#"("t0"."Country" IS NOT NULL)"#);

    let err = partner_err("ETag gt null");
    assert!(matches!(err, FilterError::NotSupported(ref m) if m.contains("null")));
}

#[test]
fn test_null_token_ignores_case() {
    let (sql, params) = partner("Country eq NULL");
    assert_eq!(sql, r#"("t0"."Country" IS NULL)"#);
    assert!(params.is_empty());

    let (sql, _) = partner("Country ne Null");
    assert_eq!(sql, r#"("t0"."Country" IS NOT NULL)"#);

    // Quoted, it stays a string
    let (_, params) = partner("Country eq 'NULL'");
    assert_eq!(params, vec![string("NULL")]);
}

#[test]
fn test_double_negation() {
    let (sql, _) = partner("not not Active");
    assert_eq!(sql, r#"NOT (NOT ("t0"."Active"))"#);

    let (sql, _) = partner("not (Country eq 'A')");
    assert_eq!(sql, r#"NOT (("t0"."Country" = $1))"#);
}

#[test]
fn test_not_on_a_value_is_rejected() {
    let err = partner_err("not Country");
    assert!(matches!(err, FilterError::NotSupported(_)));
}

#[test]
fn test_literal_exceeding_max_length() {
    let err = partner_err("Country eq 'TOO LONG'");
    assert!(matches!(err, FilterError::InvalidValue { .. }));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_incompatible_types() {
    let err = partner_err("ETag eq 'x'");
    assert!(matches!(err, FilterError::InvalidValue { .. }));

    let err = partner_err("CreationDate eq ETag");
    assert!(matches!(err, FilterError::NotSupported(ref m) if m.contains("Edm.Date")));
}

#[test]
fn test_date_literal() {
    let (sql, params) = partner("CreationDate ge 2020-01-31");
    assert_eq!(sql, r#"("t0"."CreationDate" >= $1)"#);
    assert_eq!(
        params,
        vec![Value::Date(chrono::NaiveDate::from_ymd_opt(2020, 1, 31).unwrap())]
    );
}

#[test]
fn test_enum_stored_by_name() {
    let (sql, params) = partner("Era eq com.sap.olingo.jpa.IsoEra'CE'");
    assert_eq!(sql, r#"("t0"."Era" = $1)"#);
    assert_eq!(params, vec![Value::Enum("IsoEra".into(), "CE".into())]);

    let (_, params) = partner("Era eq 'BCE'");
    assert_eq!(params, vec![Value::Enum("IsoEra".into(), "BCE".into())]);
}

#[test]
fn test_enum_stored_by_ordinal() {
    let (sql, params) = partner("AccessUnit eq 'SECONDS'");
    assert_eq!(sql, r#"("t0"."AccessUnit" = $1)"#);
    assert_eq!(params, vec![Value::Long(3)]);
}

#[test]
fn test_enum_errors() {
    let err = partner_err("Era eq com.sap.olingo.jpa.ChronoUnit'NANOS'");
    assert!(matches!(err, FilterError::InvalidValue { .. }));

    let err = partner_err("Era eq 'AD'");
    assert!(matches!(err, FilterError::InvalidValue { ref reason, .. } if reason.contains("IsoEra")));
}

#[test]
fn test_unknown_attribute() {
    let err = partner_err("Nickname eq 'x'");
    assert_eq!(
        err,
        FilterError::InvalidPath {
            path: "Nickname".into(),
            owner: "BusinessPartner".into(),
        }
    );
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_unsupported_nodes() {
    assert_eq!(partner_err("Era has 'CE'"), FilterError::NotSupported("has".into()));
    assert!(matches!(partner_err("Country eq @p"), FilterError::NotSupported(ref m) if m.contains("@p")));
    assert_eq!(partner_err("Country eq @p").status_code(), 501);
}
