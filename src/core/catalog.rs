//! Reference catalog - known-good item numbers loaded from CSV
//!
//! Expected CSV format:
//! ```text
//! item_number,description,category
//! PCB-X7700,Main Circuit Board,Electronics
//! ```
//!
//! Loading is row tolerant: malformed rows are skipped and counted, rows
//! already accepted stay accepted. The catalog is read-only once loaded and
//! is shared between validators behind an `Arc`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["item_number", "description", "category"];

/// Fixed reference dataset used for bootstrapping and tests
pub const SAMPLE_REFERENCE: [(&str, &str, &str); 10] = [
    ("PCB-X7700", "Main Circuit Board", "Electronics"),
    ("CAP-3300-10V", "10V Capacitor", "Components"),
    ("RES-2K-0.25W", "2K Ohm Resistor", "Components"),
    ("IC-8085", "Microprocessor", "Electronics"),
    ("CONN-DB9-F", "DB9 Female Connector", "Connectors"),
    ("CONN-DB9-M", "DB9 Male Connector", "Connectors"),
    ("DIODE-1N4001", "1A Diode", "Components"),
    ("PCB-A1234", "Power Supply Board", "Electronics"),
    ("CAP-2200-25V", "25V Capacitor", "Components"),
    ("RES-10K-0.50W", "10K Ohm Resistor", "Components"),
];

/// Descriptive metadata for a catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub item_number: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    item_number: String,
    description: String,
    category: String,
}

/// Counts reported after a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Errors loading or writing reference data
#[derive(Debug, Error, miette::Diagnostic)]
pub enum CatalogError {
    #[error("Failed to open reference file {path}: {source}")]
    #[diagnostic(
        code(bomcheck::catalog::open),
        help("Generate one with `bomcheck reference generate <FILE>`")
    )]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference data is missing required column '{column}'")]
    #[diagnostic(
        code(bomcheck::catalog::column),
        help("The header row must be: item_number,description,category")
    )]
    MissingColumn { column: String },

    #[error("Failed to read reference data: {0}")]
    #[diagnostic(code(bomcheck::catalog::read))]
    Read(#[source] csv::Error),

    #[error("Failed to write reference data: {0}")]
    #[diagnostic(code(bomcheck::catalog::write))]
    Write(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(bomcheck::catalog::io))]
    Io(#[from] std::io::Error),
}

/// In-memory set of known-good item numbers
///
/// Iteration follows source row order. A repeated item number replaces the
/// metadata of the first occurrence but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog holding the built-in sample dataset
    pub fn sample() -> Self {
        let mut catalog = Self::new();
        for (item_number, description, category) in SAMPLE_REFERENCE {
            catalog.insert(CatalogEntry {
                item_number: item_number.to_string(),
                description: description.to_string(),
                category: category.to_string(),
            });
        }
        catalog
    }

    /// Load a catalog from a CSV file
    pub fn from_file(path: &Path) -> Result<(Self, LoadSummary), CatalogError> {
        let mut catalog = Self::new();
        let summary = catalog.load(path)?;
        Ok((catalog, summary))
    }

    /// Load from a file, degrading to an empty catalog on failure
    ///
    /// Validation then falls back to pattern rules only. The failure is
    /// logged and returned alongside the catalog so callers can surface it.
    pub fn load_or_empty(path: &Path) -> (Self, Result<LoadSummary, CatalogError>) {
        let mut catalog = Self::new();
        let outcome = catalog.load(path);
        if let Err(e) = &outcome {
            warn!(
                path = %path.display(),
                kept = catalog.len(),
                "reference data unavailable, using pattern rules only: {}",
                e
            );
        }
        (catalog, outcome)
    }

    /// Add the rows of a CSV file to this catalog
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let summary = self.load_reader(file)?;
        info!(
            path = %path.display(),
            loaded = summary.loaded,
            skipped = summary.skipped,
            "loaded reference items"
        );
        Ok(summary)
    }

    /// Add the rows of CSV data from any reader
    ///
    /// Rows with the wrong number of fields or an empty item number are
    /// skipped. An I/O failure mid-stream stops the load with an error; rows
    /// accepted before it remain in the catalog.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<LoadSummary, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(CatalogError::Read)?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(CatalogError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut summary = LoadSummary::default();
        for (row_number, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            match record {
                Ok(row) if !row.item_number.is_empty() => {
                    self.insert(CatalogEntry {
                        item_number: row.item_number,
                        description: row.description,
                        category: row.category,
                    });
                    summary.loaded += 1;
                }
                Ok(_) => {
                    warn!(row = row_number + 2, "skipping reference row with empty item_number");
                    summary.skipped += 1;
                }
                Err(e) if e.is_io_error() => return Err(CatalogError::Read(e)),
                Err(e) => {
                    warn!(row = row_number + 2, "skipping malformed reference row: {}", e);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, entry: CatalogEntry) {
        match self.index.get(&entry.item_number) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.item_number.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn contains(&self, item_number: &str) -> bool {
        self.index.contains_key(item_number)
    }

    pub fn get(&self, item_number: &str) -> Option<&CatalogEntry> {
        self.index.get(item_number).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// First item number (in catalog order) containing `fragment`
    pub fn first_containing(&self, fragment: &str) -> Option<&str> {
        self.entries
            .iter()
            .map(|e| e.item_number.as_str())
            .find(|item_number| item_number.contains(fragment))
    }

    /// Write the catalog as CSV with a header row, returning the number of rows
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize, CatalogError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(REQUIRED_COLUMNS)?;
        for entry in &self.entries {
            csv_writer.write_record([
                entry.item_number.as_str(),
                entry.description.as_str(),
                entry.category.as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(self.entries.len())
    }

    /// Write the sample dataset as CSV, returning the number of rows
    pub fn write_sample<W: Write>(writer: W) -> Result<usize, CatalogError> {
        Self::sample().write_csv(writer)
    }

    /// Write the sample dataset to a CSV file
    pub fn generate_sample(path: &Path) -> Result<usize, CatalogError> {
        let file = File::create(path)?;
        let rows = Self::write_sample(file)?;
        info!(path = %path.display(), rows, "generated reference data");
        Ok(rows)
    }
}
