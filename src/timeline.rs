use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::error::{LocvizError, Result};
use crate::model::{Commit, Instant};

/// Linear map between a time cursor in `[0, 100]` and the span of commit
/// datetimes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min: Instant,
    max: Instant,
}

impl TimeScale {
    pub fn new(min: Instant, max: Instant) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Extent of the valid commit datetimes; `None` when no commit has one.
    pub fn from_commits(commits: &[Commit]) -> Option<Self> {
        let mut valid = commits.iter().filter_map(|c| c.datetime);
        let first = valid.next()?;
        let (min, max) = valid.fold((first, first), |(lo, hi), dt| {
            (if dt < lo { dt } else { lo }, if dt > hi { dt } else { hi })
        });
        Some(Self { min, max })
    }

    pub fn min(&self) -> Instant {
        self.min
    }

    pub fn max(&self) -> Instant {
        self.max
    }

    /// Cutoff instant for a cursor percentage. Out-of-range percentages are
    /// clamped; 0 maps to exactly `min` and 100 to exactly `max`.
    pub fn instant_at(&self, percent: f64) -> Instant {
        let percent = clamp_percent(percent);
        if percent >= 100.0 {
            return self.max;
        }
        let span_ms = (self.max - self.min).num_milliseconds();
        let offset_ms = (span_ms as f64 * percent / 100.0).round() as i64;
        self.min + Duration::milliseconds(offset_ms)
    }

    /// Cursor percentage of `instant`, clamped to `[0, 100]`. A zero-length
    /// span reports 100 since every commit is already in view.
    pub fn percent_of(&self, instant: Instant) -> f64 {
        let span_ms = (self.max - self.min).num_milliseconds();
        if span_ms == 0 {
            return 100.0;
        }
        let offset_ms = (instant - self.min).num_milliseconds();
        clamp_percent(offset_ms as f64 / span_ms as f64 * 100.0)
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        100.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Commits at or before `cutoff`, in their original order. Commits without
/// a valid datetime never pass.
pub fn filter_until(commits: &[Commit], cutoff: Instant) -> Vec<&Commit> {
    indices_until(commits, cutoff)
        .into_iter()
        .map(|i| &commits[i])
        .collect()
}

/// Positions of the commits [`filter_until`] keeps.
pub fn indices_until(commits: &[Commit], cutoff: Instant) -> Vec<usize> {
    commits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.datetime.is_some_and(|dt| dt <= cutoff))
        .map(|(i, _)| i)
        .collect()
}

/// Parse a user-supplied cutoff.
///
/// Accepts RFC 3339, `YYYY-MM-DD` (end of that day in `latest`'s offset),
/// `YYYY-MM-DD HH:MM:SS` read as UTC, or a duration such as `2weeks`
/// meaning that long before `latest`.
pub fn parse_cutoff(text: &str, latest: Instant) -> Result<Instant> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }

    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let end = day
            .and_hms_opt(23, 59, 59)
            .and_then(|naive| latest.offset().from_local_datetime(&naive).single())
            .ok_or_else(|| LocvizError::InvalidDate(text.to_string()))?;
        return Ok(end);
    }

    if let Ok(system) = humantime::parse_rfc3339_weak(text) {
        let utc: DateTime<Utc> = system.into();
        return Ok(utc.into());
    }

    if let Ok(ago) = humantime::parse_duration(text) {
        let ago = Duration::from_std(ago)
            .map_err(|_| LocvizError::InvalidDate(format!("duration out of range: {text}")))?;
        return latest
            .checked_sub_signed(ago)
            .ok_or_else(|| LocvizError::InvalidDate(format!("duration out of range: {text}")));
    }

    Err(LocvizError::InvalidDate(format!(
        "'{text}' is not a date (RFC3339, YYYY-MM-DD) or a duration"
    )))
}
