//! Input ingestion for the loader pipeline.
//!
//! Dispatches on file extension: `.csv`/`.tsv` flow through the `csv` reader
//! with `encoding_rs` decoding (UTF-8 default), `.xlsx`/`.xls` through
//! calamine's first worksheet. Everything lands in the same shape — a header
//! row plus string rows — so the rest of the pipeline never cares where the
//! data came from.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use encoding_rs::{Encoding, UTF_8};

use crate::error::EtlError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// Raw tabular contents of an input file.
#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads a tabular file, choosing the parser from the extension.
pub fn read_table(
    path: &Path,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
) -> Result<TableData> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "tsv" => {
            let delimiter = resolve_input_delimiter(path, delimiter);
            let encoding = resolve_encoding(encoding_label)?;
            read_delimited(path, delimiter, encoding)
        }
        "xlsx" | "xls" => read_spreadsheet(path),
        _ => Err(EtlError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

fn read_delimited(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<TableData> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = decode_record(&reader.byte_headers()?.clone(), encoding)?;
    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record =
            record.with_context(|| format!("Reading row {} in {path:?}", row_idx + 2))?;
        let mut decoded = decode_record(&record, encoding)?;
        decoded.resize(headers.len().max(decoded.len()), String::new());
        rows.push(decoded);
    }
    Ok(TableData { headers, rows })
}

fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

fn read_spreadsheet(path: &Path) -> Result<TableData> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Workbook {path:?} contains no worksheets"))?
        .with_context(|| format!("Reading first worksheet of {path:?}"))?;

    let mut cells = range.rows();
    let headers = cells
        .next()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .ok_or_else(|| anyhow!("Worksheet in {path:?} has no header row"))?;
    let rows = cells
        .map(|row| {
            let mut decoded: Vec<String> = row.iter().map(cell_to_string).collect();
            decoded.resize(headers.len().max(decoded.len()), String::new());
            decoded
        })
        .collect();
    Ok(TableData { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // render whole numbers without a trailing .0, but only inside
            // i64 range where the cast is exact
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|parsed| parsed.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(err) => format!("{err:?}"),
    }
}
