//! Data preparation
//!
//! Everything the chart needs is computed once, up front, by [`prepare`]:
//!
//! 1. Load embedding rows and raw histograms
//! 2. Derive each roster's season from its id
//! 3. Re-bin every raw histogram onto the display edges
//! 4. Build the id → scatter index lookup used by search
//!
//! The result is an immutable [`PreparedData`] that the view layer only reads.

pub mod loader;

use crate::error::{Error, Result};
use crate::histogram::{self, BinnedHistogram};
use loader::{EmbeddingColumns, EmbeddingRow, RawHistograms};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// One team-season in the embedding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRecord {
    pub roster_id: String,
    pub embedding_x: f64,
    pub embedding_y: f64,
    pub season: i32,
}

/// Parse the season year from the first four characters of a roster id.
///
/// `"2016GSW"` → `2016`. Ids shorter than four characters, or whose prefix
/// is not an integer, are rejected.
pub fn derive_season(roster_id: &str) -> Result<i32> {
    let prefix = match roster_id.char_indices().nth(4) {
        Some((end, _)) => &roster_id[..end],
        None if roster_id.chars().count() == 4 => roster_id,
        None => return Err(Error::InvalidSeason(roster_id.to_string())),
    };

    prefix
        .parse::<i32>()
        .map_err(|_| Error::InvalidSeason(roster_id.to_string()))
}

/// Where to read inputs from and how to interpret them
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub embedding_path: PathBuf,
    pub histograms_path: PathBuf,
    pub columns: EmbeddingColumns,
    /// Height range covered by the raw histograms (inches)
    pub original_min: f64,
    pub original_max: f64,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            embedding_path: PathBuf::from("data/height_histograms_le_df.csv"),
            histograms_path: PathBuf::from("data/team_height_histograms.json"),
            columns: EmbeddingColumns::default(),
            original_min: histogram::RAW_HEIGHT_MIN,
            original_max: histogram::RAW_HEIGHT_MAX,
        }
    }
}

/// Immutable output of data preparation
#[derive(Debug, Clone, Default)]
pub struct PreparedData {
    records: Vec<RosterRecord>,
    histograms: BTreeMap<String, BinnedHistogram>,
    index: HashMap<String, usize>,
}

impl PreparedData {
    /// Assemble from already-loaded inputs.
    ///
    /// Fails on the first roster id without a valid season prefix, or on a
    /// repeated roster id.
    pub fn from_parts(
        rows: Vec<EmbeddingRow>,
        raw: &RawHistograms,
        original_min: f64,
        original_max: f64,
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        let mut index = HashMap::with_capacity(rows.len());

        for row in rows {
            let season = derive_season(&row.roster_id)?;
            if index.insert(row.roster_id.clone(), records.len()).is_some() {
                return Err(Error::DuplicateRoster(row.roster_id));
            }
            records.push(RosterRecord {
                roster_id: row.roster_id,
                embedding_x: row.x,
                embedding_y: row.y,
                season,
            });
        }

        let histograms: BTreeMap<String, BinnedHistogram> = raw
            .iter()
            .map(|(id, hist)| (id.clone(), histogram::rebin_display(hist, original_min, original_max)))
            .collect();

        let missing = records
            .iter()
            .filter(|r| !histograms.contains_key(&r.roster_id))
            .count();
        if missing > 0 {
            log::warn!("{} roster(s) in the embedding have no histogram", missing);
        }

        Ok(Self { records, histograms, index })
    }

    pub fn records(&self) -> &[RosterRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&RosterRecord> {
        self.records.get(index)
    }

    /// Scatter index of an exact (case-sensitive) roster id
    pub fn index_of(&self, roster_id: &str) -> Option<usize> {
        self.index.get(roster_id).copied()
    }

    pub fn histogram(&self, roster_id: &str) -> Option<&BinnedHistogram> {
        self.histograms.get(roster_id)
    }

    pub fn histograms(&self) -> &BTreeMap<String, BinnedHistogram> {
        &self.histograms
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Lowest and highest season, if there are any records
    pub fn season_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.season).min()?;
        let max = self.records.iter().map(|r| r.season).max()?;
        Some((min, max))
    }
}

/// Load both inputs and build the prepared bundle
pub fn prepare(options: &PrepareOptions) -> Result<PreparedData> {
    let rows = loader::load_embedding(&options.embedding_path, &options.columns)?;
    log::info!("loaded {} embedding rows from {}", rows.len(), options.embedding_path.display());

    let raw = loader::load_histograms(&options.histograms_path)?;
    log::info!("loaded {} raw histograms from {}", raw.len(), options.histograms_path.display());

    PreparedData::from_parts(rows, &raw, options.original_min, options.original_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(id: &str, x: f64, y: f64) -> EmbeddingRow {
        EmbeddingRow { roster_id: id.to_string(), x, y }
    }

    fn ones(n: usize) -> Vec<f64> {
        vec![1.0; n]
    }

    // ==========================================================================
    // SEASON DERIVATION
    // ==========================================================================

    #[test]
    fn test_derive_season() {
        assert_eq!(derive_season("2016GSW").unwrap(), 2016);
        assert_eq!(derive_season("1999ABC").unwrap(), 1999);
        assert_eq!(derive_season("2024").unwrap(), 2024);
    }

    #[test]
    fn test_derive_season_too_short() {
        assert!(matches!(derive_season("201"), Err(Error::InvalidSeason(_))));
        assert!(derive_season("").is_err());
    }

    #[test]
    fn test_derive_season_non_numeric_prefix() {
        assert!(derive_season("GSW2016").is_err());
        assert!(derive_season("20a6GSW").is_err());
    }

    #[test]
    fn test_derive_season_multibyte_id() {
        // Character-based prefix, never splits a code point
        assert!(derive_season("20é6GSW").is_err());
        assert_eq!(derive_season("2016é").unwrap(), 2016);
    }

    // ==========================================================================
    // PREPARED DATA
    // ==========================================================================

    #[test]
    fn test_from_parts_builds_lookup_and_bins() {
        let rows = vec![row("2016GSW", 1.0, 2.0), row("2001LAL", -1.0, 0.0)];
        let mut raw = RawHistograms::new();
        raw.insert("2016GSW".into(), ones(24));
        raw.insert("2001LAL".into(), ones(24));

        let data = PreparedData::from_parts(rows, &raw, 66.0, 90.0).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.index_of("2001LAL"), Some(1));
        assert_eq!(data.index_of("2001lal"), None);
        assert_eq!(data.record(0).unwrap().season, 2016);
        assert_eq!(
            data.histogram("2016GSW").unwrap(),
            &vec![3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 2.0]
        );
        assert_eq!(data.season_range(), Some((2001, 2016)));
    }

    #[test]
    fn test_bad_season_aborts() {
        let rows = vec![row("2016GSW", 0.0, 0.0), row("GSW", 0.0, 0.0)];
        let err = PreparedData::from_parts(rows, &RawHistograms::new(), 66.0, 90.0).unwrap_err();
        assert!(matches!(err, Error::InvalidSeason(ref id) if id == "GSW"));
    }

    #[test]
    fn test_duplicate_roster_rejected() {
        let rows = vec![row("2016GSW", 0.0, 0.0), row("2016GSW", 1.0, 1.0)];
        let err = PreparedData::from_parts(rows, &RawHistograms::new(), 66.0, 90.0).unwrap_err();
        assert!(matches!(err, Error::DuplicateRoster(_)));
    }

    #[test]
    fn test_missing_histogram_is_tolerated_at_prepare() {
        let rows = vec![row("2016GSW", 0.0, 0.0)];
        let data = PreparedData::from_parts(rows, &RawHistograms::new(), 66.0, 90.0).unwrap();
        assert!(data.histogram("2016GSW").is_none());
    }

    #[test]
    fn test_empty_inputs() {
        let data = PreparedData::from_parts(vec![], &RawHistograms::new(), 66.0, 90.0).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.season_range(), None);
    }

    #[test]
    fn test_prepare_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let embedding_path = dir.path().join("embedding.csv");
        let histograms_path = dir.path().join("hists.json");

        let mut f = std::fs::File::create(&embedding_path).unwrap();
        writeln!(f, "Roster,LE_Component_1,LE_Component_2").unwrap();
        writeln!(f, "2016GSW,0.5,0.25").unwrap();
        std::fs::write(&histograms_path, r#"{"2016GSW": [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1]}"#).unwrap();

        let options = PrepareOptions {
            embedding_path,
            histograms_path,
            ..PrepareOptions::default()
        };
        let data = prepare(&options).unwrap();
        assert_eq!(data.records()[0].embedding_x, 0.5);
        assert_eq!(data.histogram("2016GSW").unwrap().iter().sum::<f64>(), 20.0);
    }

    #[test]
    fn test_prepare_bundled_sample() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        let options = PrepareOptions {
            embedding_path: root.join("data/height_histograms_le_df.csv"),
            histograms_path: root.join("data/team_height_histograms.json"),
            ..PrepareOptions::default()
        };
        let data = prepare(&options).unwrap();

        assert_eq!(data.len(), 10);
        assert_eq!(data.season_range(), Some((2001, 2024)));
        assert_eq!(
            data.histogram("2016GSW").unwrap(),
            &vec![0.0, 4.0, 11.0, 6.0, 1.0, 0.0, 0.0]
        );
    }
}
