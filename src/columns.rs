//! Header normalization, aliasing, and required-column validation.
//!
//! Raw headers are trimmed, lowercased, and have spaces/hyphens replaced with
//! underscores before the alias table maps known variant spellings onto the
//! canonical schema. Unrecognized columns pass through unchanged; duplicate
//! names after mapping keep the first occurrence only.

use std::collections::HashSet;

use crate::error::EtlError;

/// Canonical fields of the target table, in insertion order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "invoice",
    "invoice_date",
    "customer_id",
    "stock_code",
    "description",
    "quantity",
    "unit_price",
    "country",
];

/// Known variant spellings (already normalized) and the canonical name each
/// maps to. Canonical spellings fall through the lookup unchanged, so they
/// need no identity entries here.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("invoiceno", "invoice"),
    ("invoice_no", "invoice"),
    ("invoice_number", "invoice"),
    ("invoicedate", "invoice_date"),
    ("customerid", "customer_id"),
    ("stockcode", "stock_code"),
    ("unitprice", "unit_price"),
    ("price", "unit_price"),
];

/// Retained columns of an input file: canonical names paired with the index
/// each one occupies in the raw rows.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub names: Vec<String>,
    source_index: Vec<usize>,
}

impl ColumnLayout {
    /// Position of `name` within the raw rows, if the column survived
    /// normalization and de-duplication.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.source_index[i])
    }
}

pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

pub fn canonical_name(normalized: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(normalized)
}

/// Normalizes and aliases every raw header, dropping later duplicates.
pub fn map_headers(raw_headers: &[String]) -> ColumnLayout {
    let mut names = Vec::with_capacity(raw_headers.len());
    let mut source_index = Vec::with_capacity(raw_headers.len());
    let mut seen = HashSet::new();
    for (idx, raw) in raw_headers.iter().enumerate() {
        let name = canonical_name(&normalize_label(raw)).to_string();
        if seen.insert(name.clone()) {
            names.push(name);
            source_index.push(idx);
        }
    }
    ColumnLayout {
        names,
        source_index,
    }
}

/// Fails with the sorted list of required columns absent from `names`.
pub fn validate_required(names: &[String]) -> Result<(), EtlError> {
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(**column))
        .map(|column| column.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort();
        Err(EtlError::Schema { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn normalize_label_trims_lowercases_and_replaces_separators() {
        assert_eq!(normalize_label("  Invoice Date "), "invoice_date");
        assert_eq!(normalize_label("Stock-Code"), "stock_code");
        assert_eq!(normalize_label("COUNTRY"), "country");
    }

    #[test]
    fn aliases_map_known_variants_to_canonical_names() {
        assert_eq!(canonical_name("invoiceno"), "invoice");
        assert_eq!(canonical_name("price"), "unit_price");
        assert_eq!(canonical_name("customerid"), "customer_id");
        // canonical and unknown spellings pass through
        assert_eq!(canonical_name("invoice_date"), "invoice_date");
        assert_eq!(canonical_name("loyalty_tier"), "loyalty_tier");
    }

    #[test]
    fn retail_export_headers_normalize_to_full_canonical_set() {
        let layout = map_headers(&headers(&[
            "InvoiceNo",
            "Invoice Date",
            "CustomerID",
            "StockCode",
            "Description",
            "Quantity",
            "UnitPrice",
            "Country",
        ]));
        assert_eq!(
            layout.names,
            vec![
                "invoice",
                "invoice_date",
                "customer_id",
                "stock_code",
                "description",
                "quantity",
                "unit_price",
                "country",
            ]
        );
        assert!(validate_required(&layout.names).is_ok());
    }

    #[test]
    fn duplicate_columns_after_mapping_keep_first_occurrence() {
        let layout = map_headers(&headers(&["UnitPrice", "Price", "Country"]));
        assert_eq!(layout.names, vec!["unit_price", "country"]);
        assert_eq!(layout.index_of("unit_price"), Some(0));
        assert_eq!(layout.index_of("country"), Some(2));
    }

    #[test]
    fn validate_required_lists_missing_columns_sorted() {
        let err = validate_required(&headers(&["invoice", "description"])).unwrap_err();
        match err {
            EtlError::Schema { missing } => {
                assert_eq!(
                    missing,
                    vec![
                        "country",
                        "customer_id",
                        "invoice_date",
                        "quantity",
                        "stock_code",
                        "unit_price",
                    ]
                );
            }
            other => panic!("Expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let mut all = headers(&REQUIRED_COLUMNS);
        all.push("warehouse".to_string());
        let layout = map_headers(&all);
        assert!(validate_required(&layout.names).is_ok());
        assert_eq!(layout.index_of("warehouse"), Some(8));
    }
}
