//! Database access: connection opening, table provisioning, and the
//! delete-all-then-insert-all replace used by the loader.
//!
//! The table name is externally configured, so it is always interpolated as a
//! quoted identifier, never as a literal.

use rusqlite::{Connection, params};

use crate::{columns::REQUIRED_COLUMNS, data::TabularRecord, error::EtlError};

/// Opens the database named by the connection value. A `sqlite://` prefix is
/// accepted and stripped; the remainder is treated as a filesystem path.
pub fn open(database: &str) -> Result<Connection, EtlError> {
    let path = database.strip_prefix("sqlite://").unwrap_or(database);
    Ok(Connection::open(path)?)
}

/// Escapes `name` for use as a SQL identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Idempotently creates the target table with the fixed 8-column schema.
pub fn ensure_table(conn: &Connection, table: &str) -> Result<(), EtlError> {
    let create = format!(
        "CREATE TABLE IF NOT EXISTS {} (
            invoice TEXT,
            invoice_date TIMESTAMP,
            customer_id TEXT,
            stock_code TEXT,
            description TEXT,
            quantity NUMERIC,
            unit_price NUMERIC,
            country TEXT
        )",
        quote_identifier(table)
    );
    conn.execute_batch(&create)?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64, EtlError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_identifier(table)),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Replaces the table's contents with `records`, inserting in the fixed
/// column order. Runs inside the caller's transaction so a failure here rolls
/// back to the pre-run state.
pub fn replace_rows(
    conn: &Connection,
    table: &str,
    records: &[TabularRecord],
) -> Result<(), EtlError> {
    conn.execute(&format!("DELETE FROM {}", quote_identifier(table)), [])?;

    let column_list = REQUIRED_COLUMNS
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    let insert = format!(
        "INSERT INTO {} ({column_list}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        quote_identifier(table)
    );
    let mut stmt = conn.prepare(&insert)?;
    for record in records {
        stmt.execute(params![
            record.invoice,
            record.invoice_date,
            record.customer_id,
            record.stock_code,
            record.description,
            record.quantity,
            record.unit_price,
            record.country,
        ])?;
    }
    Ok(())
}
