//! Readers for the two input files
//!
//! - Embedding table: CSV with a header row. Only the id column and the two
//!   coordinate columns are read; everything else is ignored.
//! - Raw histograms: JSON object mapping roster id to an array of counts.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names used to pick values out of the embedding table
#[derive(Debug, Clone)]
pub struct EmbeddingColumns {
    pub id: String,
    pub x: String,
    pub y: String,
}

impl Default for EmbeddingColumns {
    fn default() -> Self {
        Self {
            id: "Roster".to_string(),
            x: "LE_Component_1".to_string(),
            y: "LE_Component_2".to_string(),
        }
    }
}

/// One embedding row before season derivation
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRow {
    pub roster_id: String,
    pub x: f64,
    pub y: f64,
}

/// Raw fine-grained histograms keyed by roster id
pub type RawHistograms = BTreeMap<String, Vec<f64>>;

pub fn load_embedding<P: AsRef<Path>>(path: P, columns: &EmbeddingColumns) -> Result<Vec<EmbeddingRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_embedding(file, columns).map_err(|e| match e {
        Error::Csv { source, .. } => Error::Csv { path: path.to_path_buf(), source },
        other => other,
    })
}

pub fn read_embedding<R: Read>(rdr: R, columns: &EmbeddingColumns) -> Result<Vec<EmbeddingRow>> {
    let csv_err = |source| Error::Csv { path: Default::default(), source };

    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn { column: name.to_string() })
    };
    let id_idx = find(&columns.id)?;
    let x_idx = find(&columns.x)?;
    let y_idx = find(&columns.y)?;

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let number = |idx: usize, column: &str| {
            let value = cell(idx);
            value.parse::<f64>().map_err(|_| Error::InvalidNumber {
                row: row + 1,
                column: column.to_string(),
                value: value.to_string(),
            })
        };

        rows.push(EmbeddingRow {
            roster_id: cell(id_idx).to_string(),
            x: number(x_idx, &columns.x)?,
            y: number(y_idx, &columns.y)?,
        });
    }

    Ok(rows)
}

pub fn load_histograms<P: AsRef<Path>>(path: P) -> Result<RawHistograms> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_histograms(file).map_err(|source| Error::Json { path: path.to_path_buf(), source })
}

pub fn read_histograms<R: Read>(rdr: R) -> std::result::Result<RawHistograms, serde_json::Error> {
    serde_json::from_reader(rdr)
}
