//! Reading and writing the `path,timestamp` bug CSV.

use crate::error::Result;
use crate::model::Record;
use crate::util::parse_timestamp;
use chrono::SecondsFormat;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    /// Non-blank lines that could not be turned into a record.
    pub skipped: usize,
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<ParsedRecords> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let parsed = parse_records(&content);
    log::debug!(
        "loaded {} records from {} ({} skipped)",
        parsed.records.len(),
        path.display(),
        parsed.skipped
    );
    Ok(parsed)
}

pub fn parse_records(content: &str) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                log::warn!("skipping line {}: {reason}", idx + 1);
                parsed.skipped += 1;
            }
        }
    }

    parsed
}

fn parse_line(line: &str) -> std::result::Result<Record, String> {
    // The timestamp never contains a comma, so split on the last one.
    let (path, timestamp) = line
        .rsplit_once(',')
        .ok_or_else(|| format!("expected 'path,timestamp', got '{line}'"))?;

    let path = path.trim();
    if path.is_empty() {
        return Err("empty path".to_string());
    }

    let date = parse_timestamp(timestamp)
        .ok_or_else(|| format!("unparseable timestamp '{}'", timestamp.trim()))?;

    Ok(Record::new(path, date))
}

pub fn format_record(record: &Record) -> String {
    format!(
        "{},{}",
        record.path,
        record.date.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

pub fn write_records<W: Write>(mut out: W, records: &[Record]) -> Result<()> {
    for record in records {
        writeln!(out, "{}", format_record(record))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_well_formed_lines() {
        let parsed = parse_records("src/a.rs,2020-01-01\nsrc/b/c.rs,2020-01-02T10:00:00Z\n");
        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.records,
            vec![
                Record::new("src/a.rs", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
                Record::new("src/b/c.rs", Utc.with_ymd_and_hms(2020, 1, 2, 10, 0, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn blank_lines_are_ignored_without_counting() {
        let parsed = parse_records("\n   \na.rs,2020-01-01\r\n\t\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let parsed = parse_records("no-comma\n,2020-01-01\na.rs,not-a-date\nb.rs,2020-01-01\n");
        assert_eq!(parsed.skipped, 3);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].path, "b.rs");
    }

    #[test]
    fn commas_in_path_keep_the_last_field_as_timestamp() {
        let parsed = parse_records("docs/a,b.md,2020-01-01\n");
        assert_eq!(parsed.records[0].path, "docs/a,b.md");
    }

    #[test]
    fn written_records_parse_back() {
        let records = vec![
            Record::new("x/y.ts", Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()),
            Record::new("z.ts", Utc.with_ymd_and_hms(2021, 3, 5, 0, 0, 0).unwrap()),
        ];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("x/y.ts,2021-03-04T05:06:07Z"));
        assert_eq!(parse_records(&text).records, records);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, crate::error::BugmapError::Io(_)));
    }
}
