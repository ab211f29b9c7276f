//! Access-log aggregation for webstash.
//!
//! Issues three fixed aggregation queries against an HTTP access-log
//! collection and renders a plain-text summary. Stateless between
//! invocations; all grouping and sorting runs inside the database's
//! aggregation engine.

pub mod report;
pub mod stats;

pub use report::LogReport;
pub use stats::{GroupCount, LogStats};
