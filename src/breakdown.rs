use std::collections::HashMap;

use crate::model::{Breakdown, Commit, TypeShare};

/// Tally the line records owned by `commits` per file type.
///
/// Types appear in the order first seen. A line present in several commit
/// snapshots counts once per snapshot.
pub fn breakdown<'a, I>(commits: I) -> Breakdown
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut total = 0usize;

    for line in commits.into_iter().flat_map(|c| c.lines()) {
        total += 1;
        match slots.get(line.kind.as_str()) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                slots.insert(line.kind.as_str(), counts.len());
                counts.push((line.kind.as_str(), 1));
            }
        }
    }

    let shares = counts
        .into_iter()
        .map(|(kind, count)| TypeShare {
            kind: kind.to_string(),
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();

    Breakdown {
        total_lines: total,
        shares,
    }
}

/// Breakdown of the selection, or of the whole population when nothing is
/// selected.
pub fn breakdown_or_all(selected: &[&Commit], population: &[&Commit]) -> Breakdown {
    if selected.is_empty() {
        breakdown(population.iter().copied())
    } else {
        breakdown(selected.iter().copied())
    }
}

/// Percentage with at most one decimal and no trailing zero: `40%`, `33.3%`.
pub fn format_percent(proportion: f64) -> String {
    let tenths = (proportion * 1000.0).round() / 10.0;
    if tenths.fract() == 0.0 {
        format!("{tenths:.0}%")
    } else {
        format!("{tenths:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::testutil::{record, two_commit_records};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_breakdown_over_all_commits() {
        let commits = group_commits(two_commit_records());
        let result = breakdown(&commits);
        assert_eq!(result.total_lines, 5);
        assert_eq!(
            result.shares,
            vec![
                TypeShare { kind: "js".into(), count: 2, proportion: 0.4 },
                TypeShare { kind: "css".into(), count: 3, proportion: 0.6 },
            ]
        );
    }

    #[test]
    fn test_empty_input_is_empty_breakdown() {
        let result = breakdown(std::iter::empty::<&Commit>());
        assert!(result.is_empty());
        assert_eq!(result.total_lines, 0);
    }

    #[test]
    fn test_falls_back_to_population() {
        let commits = group_commits(two_commit_records());
        let population: Vec<&Commit> = commits.iter().collect();

        let all = breakdown_or_all(&[], &population);
        assert_eq!(all.total_lines, 5);

        let only_b2 = breakdown_or_all(&[&commits[1]], &population);
        assert_eq!(only_b2.total_lines, 3);
        assert_eq!(only_b2.get("css").unwrap().proportion, 1.0);
        assert!(only_b2.get("js").is_none());
    }

    #[test]
    fn test_lines_repeated_across_snapshots_count_each_time() {
        let commits = group_commits(vec![
            record("c1", "a.rs", "rs", "2025-01-01T00:00:00Z"),
            record("c2", "a.rs", "rs", "2025-01-02T00:00:00Z"),
            record("c2", "b.md", "md", "2025-01-02T00:00:00Z"),
        ]);
        let result = breakdown(&commits);
        assert_eq!(result.get("rs").unwrap().count, 2);
        let sum: f64 = result.shares.iter().map(|s| s.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.4), "40%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
        assert_eq!(format_percent(0.6667), "66.7%");
        assert_eq!(format_percent(0.0), "0%");
    }
}
