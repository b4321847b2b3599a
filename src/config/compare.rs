//! Structural equality for config instances.
//!
//! Floats compare by `total_cmp`, so a NaN read from input equals itself and
//! an instance always equals a second one built from the same values.

use serde::Serialize;
use toml::{Table, Value};

/// Compares two declared field values.
pub fn field_eq<T: Serialize + PartialEq>(a: &T, b: &T) -> bool {
    if a == b {
        return true;
    }
    match (Value::try_from(a), Value::try_from(b)) {
        (Ok(a), Ok(b)) => value_eq(&a, &b),
        _ => false,
    }
}

pub fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => a == b || a.total_cmp(b).is_eq(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| value_eq(a, b))
        }
        (Value::Table(a), Value::Table(b)) => table_eq(a, b),
        (a, b) => a == b,
    }
}

/// Key order is not significant.
pub fn table_eq(a: &Table, b: &Table) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value_eq(value, other)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_nan_equals_itself() {
        assert!(field_eq(&f64::NAN, &f64::NAN));
        assert!(field_eq(&vec![1.0, f64::NAN], &vec![1.0, f64::NAN]));
        assert!(!field_eq(&f64::NAN, &1.0));
    }

    #[test]
    fn test_signed_zeros_stay_equal() {
        assert!(field_eq(&0.0f64, &-0.0f64));
    }

    #[test]
    fn test_tables_with_nan() {
        let a = make_table("x = nan\nlist = [nan, 1.5]\n[nested]\ny = nan");
        let b = make_table("x = nan\nlist = [nan, 1.5]\n[nested]\ny = nan");
        assert!(table_eq(&a, &b));
    }

    #[test]
    fn test_tables_differ() {
        assert!(!table_eq(&make_table("x = 1"), &make_table("x = 2")));
        assert!(!table_eq(&make_table("x = 1"), &make_table("x = 1\ny = 2")));
        assert!(table_eq(&make_table("x = 1\ny = 2"), &make_table("y = 2\nx = 1")));
    }
}
