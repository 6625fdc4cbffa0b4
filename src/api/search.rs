use std::collections::HashSet;

use crate::models::LogPage;

/// Union two result pages, keeping the first occurrence of each id.
///
/// Pagination comes from `first` as-is; it describes only that branch.
pub fn merge_results(first: LogPage, second: LogPage) -> LogPage {
    let mut seen = HashSet::new();
    let parking_logs = first
        .parking_logs
        .into_iter()
        .chain(second.parking_logs)
        .filter(|log| seen.insert(log.id.clone()))
        .collect();

    LogPage {
        parking_logs,
        pagination: first.pagination,
    }
}
