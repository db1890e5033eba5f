//! Rating aggregation and report rendering.
//!
//! Everything here is pure: callers fetch modules and ratings however they
//! like and hand them in as slices.

pub mod aggregate;
pub mod csv;

pub use aggregate::{aggregate, build_report, build_reports, format_export, format_summary, round_half_up};
pub use csv::{CsvExport, export_csv};
