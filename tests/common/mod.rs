#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Path for a SQLite database file under the workspace (not created yet).
    pub fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("retail.db")
    }

    /// Writes a two-row retail CSV using the raw export header spellings.
    pub fn write_retail_csv(&self, name: &str) -> PathBuf {
        self.write(
            name,
            "InvoiceNo,Invoice Date,CustomerID,StockCode,Description,Quantity,UnitPrice,Country\n\
             536365,2010-12-01 08:26:00,17850,85123A,WHITE HANGING HEART,6,2.55,United Kingdom\n\
             536366,2010-12-01 08:28:00,17850,71053,WHITE METAL LANTERN,6,3.39,France\n",
        )
    }
}
