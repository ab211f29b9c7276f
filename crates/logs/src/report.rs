//! Plain-text log summary rendering.
//!
//! Output format is fixed and matched byte-for-byte by tests:
//!
//! ```text
//! <n> logs
//! Methods:
//!     method <m>: <c>
//! IPs:
//!     <ip>: <c>
//! ```

use std::fmt;

use webstash_core::Error;

use crate::stats::{GroupCount, LogStats};

/// A fully gathered log summary, ready to print.
#[derive(Debug, Clone)]
pub struct LogReport {
    pub total: u64,
    pub methods: Vec<GroupCount>,
    pub top_ips: Vec<GroupCount>,
}

impl LogStats {
    /// Run all three queries and gather a printable report.
    pub async fn report(&self, top_limit: u32) -> Result<LogReport, Error> {
        Ok(LogReport {
            total: self.count_documents().await?,
            methods: self.count_by_method().await?,
            top_ips: self.top_ips(top_limit).await?,
        })
    }
}

impl fmt::Display for LogReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} logs", self.total)?;
        writeln!(f, "Methods:")?;
        for row in &self.methods {
            writeln!(f, "    method {}: {}", row.key, row.count)?;
        }
        writeln!(f, "IPs:")?;
        for row in &self.top_ips {
            writeln!(f, "    {}: {}", row.key, row.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, count: u64) -> GroupCount {
        GroupCount { key: key.into(), count }
    }

    #[test]
    fn test_render_report() {
        let report = LogReport {
            total: 4,
            methods: vec![row("GET", 3), row("POST", 1)],
            top_ips: vec![row("2.2.2.2", 9), row("1.1.1.1", 5)],
        };

        let expected = "4 logs\n\
                        Methods:\n    \
                        method GET: 3\n    \
                        method POST: 1\n\
                        IPs:\n    \
                        2.2.2.2: 9\n    \
                        1.1.1.1: 5\n";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_render_empty_collection() {
        let report = LogReport { total: 0, methods: vec![], top_ips: vec![] };
        assert_eq!(report.to_string(), "0 logs\nMethods:\nIPs:\n");
    }
}
