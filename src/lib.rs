//! rosterview - Explore NBA roster height distributions
//!
//! Each NBA team-season ("roster", e.g. `2016GSW`) has a height histogram
//! and a precomputed 2-D embedding of that histogram. rosterview turns the
//! two into an interactive chart: a scatter plot of the embedding colored by
//! season, next to the height histogram of whichever team is selected.
//!
//! # Overview
//!
//! Work happens in two stages:
//!
//! 1. **Data preparation** ([`data`]): load the embedding table and the raw
//!    histograms, derive seasons, and re-bin every histogram onto the
//!    display bins ([`histogram`]). The result is an immutable
//!    [`PreparedData`].
//!
//! 2. **View assembly** ([`view`], [`report`], [`serve`]): build the chart
//!    model, write the HTML report, or serve it locally. Teams are picked by
//!    searching for an id or by hovering a point; both go through the same
//!    [`ViewController`] contract.
//!
//! # Quick Start
//!
//! ```no_run
//! use rosterview::{data, ViewController};
//!
//! let prepared = data::prepare(&data::PrepareOptions::default())?;
//! let mut view = ViewController::new(&prepared);
//!
//! if view.search("2016GSW") {
//!     println!("{}: {:?}", view.state().title, view.state().active_histogram);
//! }
//! # Ok::<(), rosterview::Error>(())
//! ```
//!
//! # Display Bins
//!
//! | Bin | Edges (in) | Center |
//! |-----|------------|--------|
//! | 1 | 70.5-73.5 | 6'0" |
//! | 2 | 73.5-76.5 | 6'3" |
//! | 3 | 76.5-79.5 | 6'6" |
//! | 4 | 79.5-82.5 | 6'9" |
//! | 5 | 82.5-85.5 | 7'0" |
//! | 6 | 85.5-88.5 | 7'3" |
//! | 7 | 88.5-91.5 | 7'6" |

pub mod data;
pub mod error;
pub mod histogram;
pub mod report;
pub mod serve;
pub mod view;

pub use data::{derive_season, prepare, PrepareOptions, PreparedData, RosterRecord};
pub use error::{Error, Result};
pub use histogram::{rebin, BinnedHistogram, BIN_EDGES};
pub use view::{ViewController, ViewState};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is reachable from the crate
    // root.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        let data = PreparedData::default();
        let view = ViewController::new(&data);
        let _: &ViewState = view.state();
        assert_eq!(BIN_EDGES.len(), 8);
    }

    #[test]
    fn test_rebin_and_season_reexported() {
        assert_eq!(rebin(&[1.0; 24], 66.0, 90.0, &BIN_EDGES).len(), 7);
        assert_eq!(derive_season("2016GSW").unwrap(), 2016);
    }
}
