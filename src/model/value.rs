//! Cell values and the ordering used by column sorting.
//!
//! Every column accessor yields a [`CellValue`]. Sorting never looks at a row
//! directly; it compares the values produced by the sort column's accessor with
//! [`compare_values`].

use serde::Serialize;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// A single value extracted from a row by a column accessor.
///
/// A field the accessor cannot find is `Null`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or explicitly null value.
    #[default]
    Null,
    /// Boolean value. Sorts by its text form.
    Bool(bool),
    /// Numeric value. Two numbers compare numerically.
    Number(f64),
    /// Text value. Compared case-insensitively with numeric runs ordered by value.
    Text(String),
}

impl CellValue {
    /// Convert a JSON value into a cell value.
    ///
    /// Arrays and objects become their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Whether this value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Default display text for the cell.
    ///
    /// Integral numbers print without a fractional part (`30`, not `30.0`).
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ===== Comparison =====

/// Ascending order of two cell values.
///
/// - both null: equal
/// - one null: the null sorts first
/// - both numbers: numeric order (NaN compares equal to everything)
/// - anything else: [`natural_cmp`] over the display text
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::Text(x), CellValue::Text(y)) => natural_cmp(x, y),
        _ => natural_cmp(&a.display(), &b.display()),
    }
}

/// Case-insensitive comparison where runs of ASCII digits compare by value.
///
/// `"item2" < "item10"`, `"Apple" == "apple"`, `"a01" == "a1"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                let ord = fold_case(l).cmp(&fold_case(r));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Compare two digit runs by numeric value without parsing (no overflow).
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_are_equal() {
        assert_eq!(compare_values(&CellValue::Null, &CellValue::Null), Ordering::Equal);
    }

    #[test]
    fn null_sorts_before_present_value() {
        assert_eq!(
            compare_values(&CellValue::Null, &CellValue::Number(-100.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&CellValue::Text("a".into()), &CellValue::Null),
            Ordering::Greater
        );
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare_values(&CellValue::Number(9.0), &CellValue::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&CellValue::Number(2.5), &CellValue::Number(2.5)),
            Ordering::Equal
        );
    }

    #[test]
    fn text_with_numbers_sorts_naturally() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("item10", "item9"), Ordering::Greater);
        assert_eq!(natural_cmp("v1.10", "v1.9"), Ordering::Greater);
    }

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("ÉCOLE", "école"), Ordering::Equal);
    }

    #[test]
    fn leading_zeros_do_not_change_numeric_value() {
        assert_eq!(natural_cmp("a01", "a1"), Ordering::Equal);
        assert_eq!(natural_cmp("a007", "a10"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn very_long_digit_runs_do_not_overflow() {
        let small = "x99999999999999999999999999999";
        let large = "x100000000000000000000000000000";
        assert_eq!(natural_cmp(small, large), Ordering::Less);
    }

    #[test]
    fn mixed_number_and_text_compare_as_text() {
        assert_eq!(
            compare_values(&CellValue::Number(10.0), &CellValue::Text("9".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn from_json_maps_each_kind() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from_json(&json!(30)), CellValue::Number(30.0));
        assert_eq!(
            CellValue::from_json(&json!("x")),
            CellValue::Text("x".to_string())
        );
        assert_eq!(
            CellValue::from_json(&json!([1, 2])),
            CellValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn display_of_integral_number_has_no_fraction() {
        assert_eq!(CellValue::Number(30.0).display(), "30");
        assert_eq!(CellValue::Number(2.5).display(), "2.5");
        assert_eq!(CellValue::Null.display(), "");
    }

    #[test]
    fn option_converts_to_null_when_none() {
        let missing: Option<i32> = None;
        assert_eq!(CellValue::from(missing), CellValue::Null);
        assert_eq!(CellValue::from(Some(4)), CellValue::Number(4.0));
    }
}
