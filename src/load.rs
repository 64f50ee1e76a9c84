use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{LocvizError, Result};
use crate::model::{Instant, LineRecord};

/// One CSV row before coercion. Column order does not matter; unknown
/// columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    line: String,
    depth: String,
    length: String,
    #[serde(rename = "type")]
    kind: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
}

/// Load line records from `path`, or from stdin when `path` is `-`.
pub fn load_records(path: &Path) -> Result<Vec<LineRecord>> {
    let records = if path.as_os_str() == "-" {
        read_records(io::stdin().lock())?
    } else {
        let file = File::open(path)?;
        read_records(BufReader::new(file))?
    };
    debug!("loaded {} line records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse line records from CSV with a header row, preserving row order.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<LineRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut invalid_instants = 0usize;

    for (idx, row) in rdr.deserialize::<RawRow>().enumerate() {
        // header is row 1
        let row_no = idx + 2;
        let raw = row?;
        let record = coerce(raw, row_no)?;
        if record.datetime.is_none() {
            invalid_instants += 1;
        }
        records.push(record);
    }

    if invalid_instants > 0 {
        warn!("{invalid_instants} rows have an unparseable datetime");
    }

    Ok(records)
}

fn coerce(raw: RawRow, row: usize) -> Result<LineRecord> {
    let offset = parse_offset(&raw.timezone);
    let date = offset.and_then(|tz| parse_day(&raw.date, tz));
    let datetime = parse_datetime(&raw.datetime, offset);

    Ok(LineRecord {
        line: parse_count(&raw.line, "line", row)?,
        depth: parse_count(&raw.depth, "depth", row)?,
        length: parse_count(&raw.length, "length", row)?,
        file: raw.file,
        kind: raw.kind,
        author: raw.author,
        commit: raw.commit,
        date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
    })
}

fn parse_count(value: &str, column: &str, row: usize) -> Result<u32> {
    value.parse::<u32>().map_err(|_| {
        LocvizError::Parse(format!(
            "row {row}: column '{column}' is not a whole number: '{value}'"
        ))
    })
}

/// Parse a UTC offset such as `-08:00`, `+0530` or `Z`.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if tz.eq_ignore_ascii_case("z") || tz.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Midnight of `date` (`YYYY-MM-DD`) in `offset`.
pub fn parse_day(date: &str, offset: FixedOffset) -> Option<Instant> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    offset
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .single()
}

/// Parse an RFC 3339 timestamp. A timestamp without an offset is read in
/// `fallback` when one is available.
pub fn parse_datetime(value: &str, fallback: Option<FixedOffset>) -> Option<Instant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    fallback?.from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length\n";

    #[test]
    fn test_read_records_parses_columns() {
        let csv = format!(
            "{HEADER}index.html,1,html,a1b2c3,ps,2025-02-10,14:33:12,-08:00,2025-02-10T14:33:12-08:00,0,15\n"
        );
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.file, "index.html");
        assert_eq!(r.line, 1);
        assert_eq!(r.kind, "html");
        assert_eq!(r.commit, "a1b2c3");
        assert_eq!(r.depth, 0);
        assert_eq!(r.length, 15);

        let dt = r.datetime.unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 33);

        let date = r.date.unwrap();
        assert_eq!(date.to_rfc3339(), "2025-02-10T00:00:00-08:00");
    }

    #[test]
    fn test_read_records_keeps_row_order() {
        let csv = format!(
            "{HEADER}a.js,1,js,c1,ps,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00,0,1\n\
             b.js,1,js,c2,ps,2025-02-11,10:00:00,+00:00,2025-02-11T10:00:00+00:00,0,1\n\
             a.js,2,js,c1,ps,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00,1,4\n"
        );
        let records = read_records(csv.as_bytes()).unwrap();
        let order: Vec<_> = records.iter().map(|r| (r.file.as_str(), r.line)).collect();
        assert_eq!(order, vec![("a.js", 1), ("b.js", 1), ("a.js", 2)]);
    }

    #[test]
    fn test_unparseable_datetime_is_invalid_instant() {
        let csv = format!(
            "{HEADER}a.js,1,js,c1,ps,someday,10:00:00,+00:00,whenever,0,1\n"
        );
        let records = read_records(csv.as_bytes()).unwrap();
        assert!(records[0].datetime.is_none());
        assert!(records[0].date.is_none());
    }

    #[test]
    fn test_bad_number_reports_row() {
        let csv = format!(
            "{HEADER}a.js,1,js,c1,ps,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00,0,1\n\
             a.js,two,js,c1,ps,2025-02-10,10:00:00,+00:00,2025-02-10T10:00:00+00:00,0,1\n"
        );
        let err = read_records(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "file,line\na.js,1\n";
        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(LocvizError::Csv(_))
        ));
    }

    #[test]
    fn test_parse_offset_forms() {
        assert_eq!(parse_offset("-08:00").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_offset("PST").is_none());
        assert!(parse_offset("").is_none());
    }

    #[test]
    fn test_naive_datetime_uses_row_offset() {
        let tz = parse_offset("-08:00");
        let dt = parse_datetime("2025-02-10T23:15:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-02-10T23:15:00-08:00");
        assert!(parse_datetime("2025-02-10T23:15:00", None).is_none());
    }
}
