//! Table Rendering
//!
//! Builds a table from uniform records: the header comes from the first
//! record's keys, numbers are shown with two decimals, everything else is
//! passed through.

use serde_json::Value;
use std::fmt;

use crate::api::Record;

/// Placeholder shown for an empty record list
pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    /// Nothing to show; only a message
    Placeholder(String),
    /// Header plus one row per record
    Rows {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Default for Table {
    fn default() -> Self {
        Table::Placeholder(NO_DATA.to_string())
    }
}

impl Table {
    pub fn from_records(records: &[Record]) -> Self {
        Self::from_records_or(records, NO_DATA)
    }

    /// Like `from_records`, with a custom message for the empty case
    pub fn from_records_or(records: &[Record], placeholder: &str) -> Self {
        let Some(first) = records.first() else {
            return Table::Placeholder(placeholder.to_string());
        };

        let headers: Vec<String> = first.keys().cloned().collect();
        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|h| record.get(h).map(format_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Table::Rows { headers, rows }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Table::Placeholder(text) => Some(text),
            Table::Rows { .. } => None,
        }
    }

    pub fn headers(&self) -> &[String] {
        match self {
            Table::Rows { headers, .. } => headers,
            Table::Placeholder(_) => &[],
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        match self {
            Table::Rows { rows, .. } => rows,
            Table::Placeholder(_) => &[],
        }
    }
}

/// Format one cell value
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(|f| to_fixed(f, 2))
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fixed-point text in the browser's `toFixed` style: exact ties round
/// away from zero and zero never carries a sign.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    let text = if is_exact_tie(magnitude, digits) {
        // Past the tie, half-to-even formatting rounds up
        format!("{:.*}", digits, f64::from_bits(magnitude.to_bits() + 1))
    } else {
        format!("{:.*}", digits, magnitude)
    };

    if value < 0.0 {
        format!("-{}", text)
    } else {
        text
    }
}

/// True when `magnitude` lies exactly halfway between two multiples of
/// 10^-digits. A finite f64 has at most 1074 fractional decimal digits.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    let exact = format!("{:.1074}", magnitude);
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    match fraction.as_bytes().get(digits..) {
        Some([b'5', rest @ ..]) => rest.iter().all(|&b| b == b'0'),
        _ => false,
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (headers, rows) = match self {
            Table::Placeholder(text) => return writeln!(f, "{}", text),
            Table::Rows { headers, rows } => (headers, rows),
        };

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{}", line.trim_end())
        };

        write_row(f, headers)?;
        let rule = widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(f, "{}", rule)?;
        for row in rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_fixed_rounds_ties_up() {
        assert_eq!(format_cell(&json!(0.125)), "0.13");
        assert_eq!(format_cell(&json!(12.625)), "12.63");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_to_fixed_non_ties_and_signs() {
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.881_2, 3), "0.881");
        assert_eq!(format_cell(&json!(-0.0)), "0.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_empty_gives_placeholder() {
        let table = Table::from_records(&[]);
        assert_eq!(table.placeholder(), Some("No data available"));
        assert!(table.headers().is_empty());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_custom_placeholder() {
        let table = Table::from_records_or(&[], "No predictions yet");
        assert_eq!(table.placeholder(), Some("No predictions yet"));
    }

    #[test]
    fn test_single_record() {
        let table = Table::from_records(&[record(json!({ "a": 1.5, "b": "x" }))]);
        assert_eq!(table.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows(), &[vec!["1.50".to_string(), "x".to_string()]]);
    }

    #[test]
    fn test_header_follows_first_record_order() {
        let records = vec![
            record(json!({ "Yield": 7.0, "Crop_Type": "Rice", "Farm_Area": 3 })),
            record(json!({ "Yield": 8.25, "Crop_Type": "Wheat", "Farm_Area": 4 })),
        ];
        let table = Table::from_records(&records);

        assert_eq!(table.headers(), &["Yield", "Crop_Type", "Farm_Area"]);
        assert_eq!(table.rows()[1], vec!["8.25", "Wheat", "4.00"]);
    }

    #[test]
    fn test_non_numeric_values_pass_through() {
        assert_eq!(format_cell(&json!("0.912")), "0.912");
        assert_eq!(format_cell(&json!(true)), "true");
        assert_eq!(format_cell(&Value::Null), "null");
        assert_eq!(format_cell(&json!(2)), "2.00");
    }

    #[test]
    fn test_missing_column_is_blank() {
        let records = vec![
            record(json!({ "a": "x", "b": "y" })),
            record(json!({ "a": "z" })),
        ];
        let table = Table::from_records(&records);
        assert_eq!(table.rows()[1], vec!["z", ""]);
    }

    #[test]
    fn test_display_aligns_columns() {
        let records = vec![record(json!({ "Model": "XGBoost", "Yield": 7.5 }))];
        let text = Table::from_records(&records).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Model   | Yield");
        assert_eq!(lines[1], "--------+------");
        assert_eq!(lines[2], "XGBoost | 7.50");
    }
}
