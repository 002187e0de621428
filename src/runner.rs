//! SQL runner pipeline: discover `.sql` scripts, split each into statements,
//! and execute everything in file-name order inside one transaction.
//!
//! The transaction spans the whole run, not one file: a failure in a later
//! script rolls back every change made by earlier scripts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use crate::{
    cli::RunSqlArgs,
    config, db,
    error::EtlError,
    splitter::{SqlParserSplitter, StatementSplitter},
};

pub fn execute(args: &RunSqlArgs) -> Result<()> {
    let dir = config::optional_path(args.dir.clone(), "SQL_DIR", config::DEFAULT_SQL_DIR);
    let database = config::required(args.database.clone(), "DB_CONNECTION_URL")?;

    let scripts = discover_scripts(&dir)?;
    info!("Discovered {} script(s) in {dir:?}", scripts.len());

    let mut conn = db::open(&database)
        .with_context(|| format!("Opening database '{database}'"))?;
    run_scripts(&mut conn, &scripts, &SqlParserSplitter)
}

/// Lists `.sql` files in `dir` sorted by name ascending. The sort order
/// defines execution order.
pub fn discover_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(EtlError::NotFound(format!("SQL directory not found: {}", dir.display())).into());
    }
    let mut scripts: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Listing SQL directory {dir:?}"))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
        })
        .collect();
    if scripts.is_empty() {
        return Err(EtlError::NotFound(format!("No SQL files found in: {}", dir.display())).into());
    }
    scripts.sort();
    Ok(scripts)
}

/// Executes every statement of every script sequentially within a single
/// transaction, reporting the statement count per script.
pub fn run_scripts<S: StatementSplitter>(
    conn: &mut Connection,
    scripts: &[PathBuf],
    splitter: &S,
) -> Result<()> {
    let tx = conn.transaction().context("Opening script transaction")?;
    for script in scripts {
        let text = fs::read_to_string(script)
            .with_context(|| format!("Reading SQL script {script:?}"))?;
        let statements = splitter
            .split(&text)
            .with_context(|| format!("Splitting statements in {script:?}"))?;
        for statement in &statements {
            tx.execute_batch(statement)
                .with_context(|| format!("Executing statement from {script:?}"))?;
        }
        let name = script
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>");
        println!("Ran {name} ({} statements)", statements.len());
    }
    tx.commit().context("Committing script transaction")?;
    Ok(())
}
