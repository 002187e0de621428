//! Row materialization and permissive timestamp parsing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::columns::ColumnLayout;

/// One retail transaction, fields in the target table's column order.
/// Quantity and unit price are carried as opaque text; the database column's
/// numeric affinity handles coercion on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRecord {
    pub invoice: String,
    pub invoice_date: Option<NaiveDateTime>,
    pub customer_id: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub country: String,
}

impl TabularRecord {
    /// Builds a record from a raw row using the normalized column layout.
    /// Cells missing from short rows read as empty strings.
    pub fn from_row(layout: &ColumnLayout, row: &[String]) -> Self {
        let field = |name: &str| -> String {
            layout
                .index_of(name)
                .and_then(|idx| row.get(idx))
                .cloned()
                .unwrap_or_default()
        };
        TabularRecord {
            invoice: field("invoice"),
            invoice_date: parse_invoice_date(&field("invoice_date")),
            customer_id: field("customer_id"),
            stock_code: field("stock_code"),
            description: field("description"),
            quantity: field("quantity"),
            unit_price: field("unit_price"),
            country: field("country"),
        }
    }
}

/// Parses an invoice timestamp, tolerating malformed input: anything that
/// matches no known format becomes `None` rather than failing the load.
pub fn parse_invoice_date(value: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%d/%m/%Y %H:%M",
        "%Y-%m-%d %H:%M",
    ];
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::map_headers;

    #[test]
    fn parse_invoice_date_supports_multiple_formats() {
        let expected =
            NaiveDateTime::parse_from_str("2010-12-01 08:26:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_invoice_date("2010-12-01 08:26:00"), Some(expected));
        assert_eq!(parse_invoice_date("2010-12-01T08:26:00"), Some(expected));
        assert_eq!(parse_invoice_date("01/12/2010 08:26:00"), Some(expected));
        assert_eq!(parse_invoice_date("12/1/2010 08:26"), Some(expected));
    }

    #[test]
    fn parse_invoice_date_accepts_date_only_values_at_midnight() {
        let expected = NaiveDate::from_ymd_opt(2010, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_invoice_date("2010-12-01"), Some(expected));
    }

    #[test]
    fn parse_invoice_date_is_lossy_on_malformed_input() {
        assert_eq!(parse_invoice_date("not a date"), None);
        assert_eq!(parse_invoice_date(""), None);
        assert_eq!(parse_invoice_date("2010-13-45 99:99:99"), None);
    }

    #[test]
    fn from_row_reads_fields_through_the_layout_and_pads_short_rows() {
        let layout = map_headers(&[
            "InvoiceNo".to_string(),
            "Country".to_string(),
            "Invoice Date".to_string(),
        ]);
        let row = vec!["536365".to_string(), "United Kingdom".to_string()];
        let record = TabularRecord::from_row(&layout, &row);
        assert_eq!(record.invoice, "536365");
        assert_eq!(record.country, "United Kingdom");
        assert_eq!(record.invoice_date, None);
        assert_eq!(record.quantity, "");
    }
}
