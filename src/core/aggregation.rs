//! Footer totals
//!
//! Sums a nested numeric field over the rows of the loaded page only; the
//! remote total is unknown to the engine. Missing paths and non-numeric
//! values count as zero.

use crate::config::CurrencyFormat;
use crate::types::{ColumnId, GridRow};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Which column totals which path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterSum {
    pub column: ColumnId,
    pub path: String,
}

impl FooterSum {
    pub fn new(column: &str, path: &str) -> Self {
        FooterSum {
            column: column.to_string(),
            path: path.to_string(),
        }
    }
}

/// Numeric reading of a cell value
///
/// JSON numbers and decimal strings count; anything else is `None`.
pub fn numeric_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Sum `path` across `rows`
pub fn sum_path<R: GridRow>(rows: &[R], path: &str) -> Decimal {
    rows.iter()
        .filter_map(|row| row.lookup(path))
        .filter_map(|value| numeric_value(&value))
        .fold(Decimal::ZERO, |total, amount| {
            total.checked_add(amount).unwrap_or_else(|| {
                tracing::warn!("Footer total for '{}' overflowed, keeping partial sum", path);
                total
            })
        })
}

/// Configured sums plus the totals of the last loaded page
#[derive(Debug, Clone)]
pub struct Aggregator {
    sums: Vec<FooterSum>,
    totals: BTreeMap<ColumnId, Decimal>,
    currency: CurrencyFormat,
}

impl Aggregator {
    pub fn new(sums: Vec<FooterSum>, currency: CurrencyFormat) -> Self {
        let totals = sums
            .iter()
            .map(|sum| (sum.column.clone(), Decimal::ZERO))
            .collect();
        Aggregator {
            sums,
            totals,
            currency,
        }
    }

    /// Recompute every configured total from `rows`
    pub fn recompute<R: GridRow>(&mut self, rows: &[R]) {
        self.totals = self
            .sums
            .iter()
            .map(|sum| (sum.column.clone(), sum_path(rows, &sum.path)))
            .collect();
    }

    pub fn total(&self, column: &str) -> Option<Decimal> {
        self.totals.get(column).copied()
    }

    /// Footer text for `column`; empty when the column has no sum configured
    pub fn footer(&self, column: &str) -> String {
        self.total(column)
            .map(|total| self.currency.format(total))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_non_numeric_and_missing_count_as_zero() {
        let rows = vec![
            json!({"a": {"b": 10}}),
            json!({"a": {"b": "x"}}),
            json!({"a": {}}),
        ];
        assert_eq!(sum_path(&rows, "a.b"), Decimal::from(10));
    }

    #[rstest]
    #[case::integer(json!(3), Some(Decimal::from(3)))]
    #[case::float(json!(2.5), Some(Decimal::new(25, 1)))]
    #[case::decimal_string(json!(" 12.30 "), Some(Decimal::new(1230, 2)))]
    #[case::scientific(json!("1e3"), Some(Decimal::from(1000)))]
    #[case::text(json!("abc"), None)]
    #[case::boolean(json!(true), None)]
    #[case::null(Value::Null, None)]
    #[case::object(json!({"v": 1}), None)]
    fn test_numeric_value(#[case] value: Value, #[case] expected: Option<Decimal>) {
        assert_eq!(numeric_value(&value), expected);
    }

    #[test]
    fn test_footer_formats_configured_columns_only() {
        let rows = vec![
            json!({"id": 1, "valores": {"liquido": 1000.5}}),
            json!({"id": 2, "valores": {"liquido": "234.06"}}),
        ];
        let mut aggregator =
            Aggregator::new(vec![FooterSum::new("liquido", "valores.liquido")], CurrencyFormat::brl());
        assert_eq!(aggregator.footer("liquido"), "R$ 0,00");

        aggregator.recompute(&rows);

        assert_eq!(aggregator.footer("liquido"), "R$ 1.234,56");
        assert_eq!(aggregator.footer("nome"), "");
        assert_eq!(aggregator.total("nome"), None);
    }

    #[test]
    fn test_empty_page_totals_zero() {
        let mut aggregator =
            Aggregator::new(vec![FooterSum::new("valor", "valor")], CurrencyFormat::usd());
        aggregator.recompute::<Value>(&[]);
        assert_eq!(aggregator.total("valor"), Some(Decimal::ZERO));
    }
}
