//! Loader pipeline: ingest a tabular file, normalize and validate its
//! columns, then atomically replace the target table's contents.

use anyhow::{Context, Result};
use log::info;

use crate::{cli::LoadArgs, columns, config, data::TabularRecord, db, ingest};

pub fn execute(args: &LoadArgs) -> Result<()> {
    let input = config::required_path(args.input.clone(), "LOCAL_DATA_PATH")?;
    let table = config::optional(args.table.clone(), "TABLE_NAME", config::DEFAULT_TABLE_NAME);
    let database = config::required(args.database.clone(), "DB_CONNECTION_URL")?;

    let data = ingest::read_table(&input, args.delimiter, args.input_encoding.as_deref())
        .with_context(|| format!("Reading input file {input:?}"))?;
    let layout = columns::map_headers(&data.headers);
    columns::validate_required(&layout.names)
        .with_context(|| format!("Validating columns of {input:?}"))?;

    let records: Vec<TabularRecord> = data
        .rows
        .iter()
        .map(|row| TabularRecord::from_row(&layout, row))
        .collect();
    info!("Parsed {} record(s) from {:?}", records.len(), input);

    let mut conn = db::open(&database)
        .with_context(|| format!("Opening database '{database}'"))?;
    let tx = conn
        .transaction()
        .context("Opening load transaction")?;

    db::ensure_table(&tx, &table).with_context(|| format!("Provisioning table '{table}'"))?;
    let before = db::count_rows(&tx, &table)
        .with_context(|| format!("Counting rows in '{table}'"))?;
    println!("Rows before load: {before}");

    db::replace_rows(&tx, &table, &records)
        .with_context(|| format!("Loading data into '{table}'"))?;
    let after = db::count_rows(&tx, &table)
        .with_context(|| format!("Counting rows in '{table}'"))?;
    println!("Rows after load: {after}");

    tx.commit().context("Committing load transaction")?;
    info!("Load into '{table}' committed");
    Ok(())
}
