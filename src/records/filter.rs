use crate::config::FilterConfig;
use crate::records::ExpectedRecord;
use std::collections::HashSet;

/// Canonical form of a record id used for filtering
///
/// Numeric ids compare by value, so `"027"`, `" 27 "` and `27` are the same id.
/// Anything else compares by its trimmed text.
pub fn normalize_id(id: &str) -> String {
    let trimmed = id.trim();
    match trimmed.parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Applies the allow-list and ignore-list to the loaded records
///
/// An empty allow-list keeps every record. The ignore-list always wins. Record
/// order is preserved.
pub fn filter_records(records: Vec<ExpectedRecord>, filter: &FilterConfig) -> Vec<ExpectedRecord> {
    let only: HashSet<String> = filter.only.iter().map(|id| normalize_id(id)).collect();
    let ignore: HashSet<String> = filter.ignore.iter().map(|id| normalize_id(id)).collect();

    records
        .into_iter()
        .filter(|record| {
            let id = normalize_id(&record.id);
            if ignore.contains(&id) {
                tracing::debug!("Record {} is on the ignore list", record.id);
                return false;
            }
            only.is_empty() || only.contains(&id)
        })
        .collect()
}
