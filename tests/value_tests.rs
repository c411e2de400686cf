// Value equality, conversion and truthiness.

use test_case::test_case;
use tforth::runtime::data_structures::value::Value;

#[test_case(Value::from(1_i64), Value::from(1.0_f64), true; "int equals float")]
#[test_case(Value::from(1_i64), Value::from(true), true; "int equals bool")]
#[test_case(Value::from(2_i64), Value::from(2.5_f64), false; "float keeps its fraction")]
#[test_case(Value::from("1"), Value::from(1_i64), false; "strings are not numbers")]
#[test_case(Value::None, Value::None, true; "none equals none")]
#[test_case(Value::from("a".to_string()), Value::from("a"), true; "owned and borrowed strings")]
fn numeric_values_compare_across_variants(a: Value, b: Value, expected: bool) {
    assert_eq!(a == b, expected);
}

#[test_case(Value::None, false; "none")]
#[test_case(Value::from(0_i64), false; "zero")]
#[test_case(Value::from(0.0_f64), false; "float zero")]
#[test_case(Value::from(""), false; "empty string")]
#[test_case(Value::from(-3_i64), true; "negative")]
#[test_case(Value::from("x"), true; "string")]
fn truthiness(value: Value, expected: bool) {
    assert_eq!(value.get_bool_val(), expected);
}

#[test]
fn display_and_debug_forms() {
    let value = Value::from("two\nlines");

    assert_eq!(value.to_string(), "two\nlines");
    assert_eq!(format!("{:?}", value), "\"two\\nlines\"");
    assert_eq!(format!("{:?}", Value::from(4_i64)), "4");
}
