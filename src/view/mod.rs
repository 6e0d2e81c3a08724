//! Interactive view state
//!
//! The chart has two ways to pick a team: typing its id into the search box,
//! or hovering its point in the scatter panel. Both must end up in exactly
//! the same place, so both handlers resolve to a scatter index and then go
//! through one shared `select` step:
//!
//! ```text
//! search("2016GSW") ──┐
//!                     ├──> select(idx) ──> selected id, histogram, title, highlight
//! hover(Some(idx)) ───┘         (hover also writes the id into the search box)
//! ```
//!
//! Handlers run one at a time to completion. A lookup miss leaves the state
//! untouched.

pub mod chart;
pub mod color;

use crate::data::PreparedData;
use crate::histogram::BinnedHistogram;
use serde::Serialize;

/// Histogram panel title before any team is chosen
pub const DEFAULT_HISTOGRAM_TITLE: &str = "Team Height Distribution";

/// Histogram panel title for a chosen team
pub fn histogram_title(roster_id: &str) -> String {
    format!("Height Distribution for {}", roster_id)
}

/// Everything the user can change by interacting with the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub selected_roster_id: Option<String>,
    pub active_histogram: BinnedHistogram,
    pub highlighted_point_index: Option<usize>,
    pub title: String,
    pub search_text: String,
}

impl ViewState {
    /// Starting state: the first roster's bars under the generic title,
    /// nothing selected or highlighted.
    pub fn initial(data: &PreparedData) -> Self {
        let active_histogram = data
            .record(0)
            .and_then(|r| data.histogram(&r.roster_id))
            .cloned()
            .unwrap_or_else(|| vec![0.0; crate::histogram::BIN_EDGES.len() - 1]);

        Self {
            selected_roster_id: None,
            active_histogram,
            highlighted_point_index: None,
            title: DEFAULT_HISTOGRAM_TITLE.to_string(),
            search_text: String::new(),
        }
    }
}

/// Owns the view state and applies search/hover events to it
pub struct ViewController<'a> {
    data: &'a PreparedData,
    state: ViewState,
}

impl<'a> ViewController<'a> {
    pub fn new(data: &'a PreparedData) -> Self {
        Self { data, state: ViewState::initial(data) }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn data(&self) -> &'a PreparedData {
        self.data
    }

    /// Back to [`ViewState::initial`], e.g. when a fresh page is loaded
    pub fn reset(&mut self) {
        self.state = ViewState::initial(self.data);
    }

    /// Search box changed. Returns true if a team was selected.
    pub fn search(&mut self, text: &str) -> bool {
        self.state.search_text = text.to_string();

        let query = text.trim();
        match self.data.index_of(query) {
            Some(idx) => self.select(idx),
            None => {
                log::debug!("search '{}' matched no roster", query);
                false
            }
        }
    }

    /// Pointer entered a scatter point (`None` when nothing is under it).
    /// Returns true if a team was selected.
    pub fn hover(&mut self, index: Option<usize>) -> bool {
        let Some(idx) = index else {
            return false;
        };
        let data = self.data;
        let Some(record) = data.record(idx) else {
            log::debug!("hover index {} out of range", idx);
            return false;
        };

        let roster_id = record.roster_id.clone();
        if self.select(idx) {
            self.state.search_text = roster_id;
            true
        } else {
            false
        }
    }

    /// Shared update for both handlers
    fn select(&mut self, idx: usize) -> bool {
        let data = self.data;
        let Some(record) = data.record(idx) else {
            return false;
        };
        let Some(hist) = data.histogram(&record.roster_id) else {
            log::warn!("roster {} has no histogram; view left unchanged", record.roster_id);
            return false;
        };

        // Replacing the index clears the previous highlight
        self.state.highlighted_point_index = Some(idx);
        self.state.selected_roster_id = Some(record.roster_id.clone());
        self.state.active_histogram = hist.clone();
        self.state.title = histogram_title(&record.roster_id);
        true
    }
}
