//! General ledger report rendering.
//!
//! Pure presentation logic over the chart and the ledger store: the report
//! is recomputed from its inputs on every call and never mutates state.

pub mod service;
pub mod types;


pub use service::GeneralLedgerReport;
pub use types::{LineKind, ReportLine, ReportParams};
