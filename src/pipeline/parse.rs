use tracing::debug;

use crate::domain::NodeRecord;

const COLUMN_DELIMITER: char = '\t';

/// Parse the speed-test feed: one header line, then tab-separated rows whose
/// first column is the node name.
///
/// Rows with an empty (trimmed) name are dropped; duplicates are kept in feed order.
pub fn parse_node_records(text: &str) -> Vec<NodeRecord> {
    let mut records = Vec::new();

    for (line_no, line) in text.trim().lines().enumerate().skip(1) {
        let name = line.split(COLUMN_DELIMITER).next().unwrap_or_default().trim();
        if name.is_empty() {
            debug!("Skipping feed line {} with empty node name", line_no + 1);
            continue;
        }
        records.push(NodeRecord::new(name));
    }

    records
}

pub fn parse_node_names(text: &str) -> Vec<String> {
    parse_node_records(text)
        .into_iter()
        .map(|record| record.name)
        .collect()
}
