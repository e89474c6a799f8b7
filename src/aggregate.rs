use crate::model::{Breakdown, ChildEntry, DateRange, Record};
use crate::util::records_matching;
use std::collections::HashMap;

/// Group records under `base_path` into its immediate children.
///
/// `base_path` is matched as a literal prefix and must be empty or end in
/// `/`. Records whose relative path has no segments left are dropped. A child
/// is a directory as soon as one contributing record has further segments
/// below it, regardless of record order.
pub fn aggregate(records: &[Record], base_path: &str, range: &DateRange) -> Breakdown {
    let mut entries: HashMap<String, ChildEntry> = HashMap::new();

    for record in records_matching(records, base_path, range) {
        let relative = &record.path[base_path.len()..];
        let mut segments = relative.split('/').filter(|s| !s.is_empty());

        let Some(child) = segments.next() else {
            continue;
        };
        let nested = segments.next().is_some();

        let entry = entries.entry(child.to_string()).or_default();
        entry.count += 1;
        entry.is_directory |= nested;
    }

    Breakdown::new(base_path, entries)
}
