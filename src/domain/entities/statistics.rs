use serde::Serialize;

use super::document::DocumentStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub total: u64,
    pub loaded: u64,
    pub failed: u64,
    pub open: u64,
}

impl StatusBreakdown {
    /// Builds a breakdown from grouped `(status, count)` pairs. Statuses that
    /// are missing count as zero; unrecognised ones are ignored.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut breakdown = Self::default();
        for (status, count) in groups {
            match status.parse::<DocumentStatus>() {
                Ok(DocumentStatus::Loaded) => breakdown.loaded += count,
                Ok(DocumentStatus::Failed) => breakdown.failed += count,
                Ok(DocumentStatus::Open) => breakdown.open += count,
                Err(_) => continue,
            }
        }
        breakdown.total = breakdown.loaded + breakdown.failed + breakdown.open;
        breakdown
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: u64,
    pub loaded: u64,
    pub failed: u64,
    pub open: u64,
    pub success_rate: String,
    pub invoices: StatusBreakdown,
    pub credit_notes: StatusBreakdown,
}

/// Raw counts gathered from the store before shaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCounts {
    pub total: u64,
    pub loaded: u64,
    pub failed: u64,
    pub open: u64,
}

impl Statistics {
    pub fn new(counts: StatusCounts, invoices: StatusBreakdown, credit_notes: StatusBreakdown) -> Self {
        Self {
            total: counts.total,
            loaded: counts.loaded,
            failed: counts.failed,
            open: counts.open,
            success_rate: success_rate(counts.loaded, counts.total),
            invoices,
            credit_notes,
        }
    }
}

/// Percentage of loaded documents with one decimal, or `"0"` for an empty collection.
pub fn success_rate(loaded: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    format!("{:.1}", loaded as f64 / total as f64 * 100.0)
}
