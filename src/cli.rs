use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Load retail transaction files and run folder-ordered SQL scripts",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a CSV/TSV or Excel file into the target table, replacing its contents
    Load(LoadArgs),
    /// Execute every .sql file in a directory, in name order, as one transaction
    RunSql(RunSqlArgs),
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Input data file (.csv, .tsv, .xlsx, .xls); falls back to LOCAL_DATA_PATH
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Destination table name; falls back to TABLE_NAME, then 'retail_transactions'
    #[arg(short = 't', long = "table")]
    pub table: Option<String>,
    /// Database path or sqlite:// URL; falls back to DB_CONNECTION_URL
    #[arg(long = "database")]
    pub database: Option<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunSqlArgs {
    /// Directory containing .sql scripts; falls back to SQL_DIR, then './sql'
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,
    /// Database path or sqlite:// URL; falls back to DB_CONNECTION_URL
    #[arg(long = "database")]
    pub database: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
