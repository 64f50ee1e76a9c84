use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Timelike, Weekday};

use crate::files::group_files;
use crate::model::{Commit, Summary};

/// Headline numbers for a set of commits and the records they own.
pub fn summarize(commits: &[&Commit]) -> Summary {
    let groups = group_files(commits.iter().flat_map(|c| c.lines()));

    let total_loc: usize = commits.iter().map(|c| c.total_lines).sum();
    let authors: HashSet<&str> = commits.iter().map(|c| c.author.as_str()).collect();

    // file length = highest line number seen for that file
    let file_lengths: Vec<(&str, u32)> = groups
        .iter()
        .map(|g| (g.name, g.lines.iter().map(|l| l.line).max().unwrap_or(0)))
        .collect();

    let avg_file_length = if file_lengths.is_empty() {
        0.0
    } else {
        file_lengths.iter().map(|(_, n)| *n as f64).sum::<f64>() / file_lengths.len() as f64
    };

    let longest_file = file_lengths
        .iter()
        .fold(None::<(&str, u32)>, |best, &(name, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((name, n)),
        })
        .map(|(name, n)| (name.to_string(), n));

    let lines = commits.iter().flat_map(|c| c.lines());
    let (max_depth, longest_line) = lines.fold((0u32, 0u32), |(depth, len), l| {
        (depth.max(l.depth), len.max(l.length))
    });

    Summary {
        total_loc,
        total_commits: commits.len(),
        files: groups.len(),
        authors: authors.len(),
        avg_file_length,
        longest_file,
        max_depth,
        longest_line,
        busiest_period: busiest_period(commits).map(|p| p.to_string()),
        busiest_weekday: busiest_weekday(commits).map(|d| weekday_name(d).to_string()),
    }
}

/// Coarse time of day for an hour in `0..24`.
pub fn period_of_day(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    }
}

fn busiest_period(commits: &[&Commit]) -> Option<&'static str> {
    most_common(
        commits
            .iter()
            .filter_map(|c| c.datetime)
            .map(|dt| period_of_day(dt.hour())),
    )
}

fn busiest_weekday(commits: &[&Commit]) -> Option<Weekday> {
    most_common(commits.iter().filter_map(|c| c.datetime).map(|dt| dt.weekday()))
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Most frequent item; the one seen first wins a tie.
fn most_common<T, I>(items: I) -> Option<T>
where
    T: Copy + Eq + std::hash::Hash,
    I: Iterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (order, item) in items.enumerate() {
        counts.entry(item).or_insert((0, order)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(item, _)| item)
}
