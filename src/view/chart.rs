//! Chart model: everything the rendered page needs, in one serializable value
//!
//! Colors, ticks and labels are all worked out here so the page script only
//! draws what it is given and applies the search/hover handlers.

use super::color::LinearColorMapper;
use super::ViewState;
use crate::data::PreparedData;
use crate::histogram::{self, BinnedHistogram, BIN_EDGES};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SEARCH_LABEL: &str = "Search for a team (e.g., 2016GSW):";

/// Prefix of every element id a chart creates, unless overridden with
/// [`ChartModel::with_id`]
pub const DEFAULT_CHART_ID: &str = "rosterview";

/// Heights (inches) that get an x-axis tick on the histogram panel
const HEIGHT_TICKS: [u32; 7] = [72, 75, 78, 81, 84, 87, 90];

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub roster: String,
    pub x: f64,
    pub y: f64,
    pub season: i32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: &'static str,
    pub low: f64,
    pub high: f64,
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub width: u32,
    pub height: u32,
    pub point_size: f64,
    pub points: Vec<ScatterPoint>,
    pub color_bar: ColorBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramPanel {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub width: u32,
    pub height: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub bin_edges: Vec<f64>,
    pub bin_centers: Vec<f64>,
    pub bar_width: f64,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<f64>,
}

impl Default for HistogramPanel {
    fn default() -> Self {
        Self {
            x_label: "Height (inches)",
            y_label: "Number of Players",
            width: 450,
            height: 550,
            x_range: (70.0, 92.0),
            y_range: (0.0, 10.0),
            bin_edges: BIN_EDGES.to_vec(),
            bin_centers: histogram::bin_centers(&BIN_EDGES),
            // Slightly less than the 3-inch bin for visible gaps
            bar_width: 2.5,
            x_ticks: HEIGHT_TICKS
                .iter()
                .map(|&h| Tick { value: h as f64, label: histogram::feet_inches(h) })
                .collect(),
            y_ticks: (0..=10).map(|v| v as f64).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartModel<'a> {
    /// Element id prefix; charts sharing a document need distinct ids
    pub id: String,
    pub scatter: ScatterPanel,
    pub histogram: HistogramPanel,
    pub search_label: &'static str,
    pub histograms: &'a BTreeMap<String, BinnedHistogram>,
    pub roster_index: BTreeMap<&'a str, usize>,
    pub initial: ViewState,
    /// Route search/hover through the local HTTP API instead of handling
    /// them in the page
    pub remote: bool,
}

impl<'a> ChartModel<'a> {
    pub fn new(data: &'a PreparedData) -> Self {
        let (low, high) = data
            .season_range()
            .map(|(lo, hi)| (lo as f64, hi as f64))
            .unwrap_or((0.0, 0.0));
        let mapper = LinearColorMapper::new(low, high);

        let points = data
            .records()
            .iter()
            .map(|r| ScatterPoint {
                roster: r.roster_id.clone(),
                x: r.embedding_x,
                y: r.embedding_y,
                season: r.season,
                color: mapper.color(r.season as f64).to_string(),
            })
            .collect();

        let title = match data.season_range() {
            Some((lo, hi)) => format!("NBA Team Height Distributions ({}-{}) - Laplacian Eigenmaps", lo, hi),
            None => "NBA Team Height Distributions - Laplacian Eigenmaps".to_string(),
        };

        let scatter = ScatterPanel {
            title,
            x_label: "Component 1 (Avg Height)",
            y_label: "Component 2 (Height Variance)",
            width: 700,
            height: 550,
            point_size: 10.0,
            points,
            color_bar: ColorBar {
                title: "Season",
                low: mapper.low(),
                high: mapper.high(),
                stops: mapper.gradient_stops(16),
            },
        };

        let roster_index = data
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| (r.roster_id.as_str(), i))
            .collect();

        Self {
            id: DEFAULT_CHART_ID.to_string(),
            scatter,
            histogram: HistogramPanel::default(),
            search_label: SEARCH_LABEL,
            histograms: data.histograms(),
            roster_index,
            initial: ViewState::initial(data),
            remote: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Element id for one part of the chart, e.g. `element_id("root")`
    pub fn element_id(&self, part: &str) -> String {
        format!("{}-{}", self.id, part)
    }

    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote = remote;
        self
    }

    /// Serialize for embedding inside a `<script>` element.
    ///
    /// `</` is escaped so no roster id can terminate the script early.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}
