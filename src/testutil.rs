use chrono::DateTime;

use crate::model::LineRecord;

pub(crate) fn record(commit: &str, file: &str, kind: &str, datetime: &str) -> LineRecord {
    LineRecord {
        file: file.to_string(),
        line: 1,
        depth: 0,
        length: 10,
        kind: kind.to_string(),
        author: "ps".to_string(),
        commit: commit.to_string(),
        date: None,
        time: String::new(),
        timezone: "-08:00".to_string(),
        datetime: DateTime::parse_from_rfc3339(datetime).ok(),
    }
}

/// Two commits: `a1` touches `x.js` (2 lines), `b2` touches `y.css` (3 lines).
pub(crate) fn two_commit_records() -> Vec<LineRecord> {
    let mut records = Vec::new();
    for line in 1..=2 {
        let mut r = record("a1", "x.js", "js", "2025-02-10T09:00:00-08:00");
        r.line = line;
        records.push(r);
    }
    for line in 1..=3 {
        let mut r = record("b2", "y.css", "css", "2025-02-12T21:30:00-08:00");
        r.line = line;
        records.push(r);
    }
    records
}
