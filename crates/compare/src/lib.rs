//! Side-by-side comparison of extracted insurance quotes.
//!
//! [`build_comparison_rows`] turns a list of [`QuoteExtraction`]s into a
//! [`ComparisonTableData`]: normalized rows with best/worst markers, coverage
//! gap warnings, term conflict warnings and a risk-scored gap analysis.

pub mod constants;
pub mod format;
pub mod policy;

mod conflicts;
mod diff;
mod gap_analysis;
mod gaps;
mod types;


pub use conflicts::{detect_conflicts, detect_conflicts_with};
pub use diff::{
    build_basic_rows, build_comparison_rows, build_coverage_rows, build_metadata_rows,
    build_summary_rows, calculate_best_worst, collect_all_coverage_types, detect_difference,
    BestWorst, ComparisonEngine,
};
pub use gap_analysis::analyze_gaps;
pub use gaps::detect_gaps;
pub use policy::ComparisonPolicy;
pub use types::*;
