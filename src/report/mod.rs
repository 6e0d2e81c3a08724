//! Report generation for the interactive chart
//!
//! One call to [`generate`] writes four files into an output directory:
//!
//! - **`height_visualization.html`**: the chart on its own, ready to open
//! - **`height_script.js`** / **`height_div.html`**: the script and markup
//!   fragments, for embedding the chart in some other page
//! - **`team_heights_interactive.html`**: the complete page with header,
//!   usage notes and a generation timestamp
//!
//! # Usage
//!
//! ```ignore
//! use rosterview::{data, report};
//!
//! let prepared = data::prepare(&data::PrepareOptions::default())?;
//! let files = report::generate("out", &prepared, &chrono::Local::now().to_rfc2822())?;
//! println!("{}", files.page.display());
//! ```

pub mod html;

use crate::data::PreparedData;
use crate::error::{Error, Result};
use crate::view::chart::ChartModel;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const STANDALONE_FILE: &str = "height_visualization.html";
pub const SCRIPT_FILE: &str = "height_script.js";
pub const DIV_FILE: &str = "height_div.html";
pub const PAGE_FILE: &str = "team_heights_interactive.html";

/// Paths of the files written by [`generate`]
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub standalone: PathBuf,
    pub script: PathBuf,
    pub div: PathBuf,
    pub page: PathBuf,
}

impl ReportFiles {
    fn in_dir(dir: &Path) -> Self {
        Self {
            standalone: dir.join(STANDALONE_FILE),
            script: dir.join(SCRIPT_FILE),
            div: dir.join(DIV_FILE),
            page: dir.join(PAGE_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [&self.standalone, &self.script, &self.div, &self.page]
    }
}

/// Write every report file for `data` into `dir`, creating it if needed
pub fn generate<P: AsRef<Path>>(dir: P, data: &PreparedData, generated: &str) -> Result<ReportFiles> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let chart = ChartModel::new(data);
    let files = ReportFiles::in_dir(dir);

    write_file(&files.standalone, |w| html::write_standalone(w, &chart))?;
    write_file(&files.page, |w| html::write_page(w, &chart, generated))?;

    let script = html::render_script(&chart)?;
    write_file(&files.script, |w| w.write_all(script.as_bytes()))?;
    write_file(&files.div, |w| w.write_all(html::render_div(&chart).as_bytes()))?;

    for path in files.all() {
        log::debug!("wrote {}", path.display());
    }

    Ok(files)
}

fn write_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    body(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(path, e))
}

/// Summary statistics for a prepared dataset
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub rosters: usize,
    pub histograms: usize,
    /// Rosters in the embedding with no histogram
    pub missing_histograms: usize,
    pub first_season: Option<i32>,
    pub last_season: Option<i32>,
}

impl Summary {
    pub fn from_data(data: &PreparedData) -> Self {
        let missing_histograms = data
            .records()
            .iter()
            .filter(|r| data.histogram(&r.roster_id).is_none())
            .count();
        let range = data.season_range();

        Self {
            rosters: data.len(),
            histograms: data.histograms().len(),
            missing_histograms,
            first_season: range.map(|(lo, _)| lo),
            last_season: range.map(|(_, hi)| hi),
        }
    }
}
