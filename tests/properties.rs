use chrono::{FixedOffset, TimeZone};
use proptest::prelude::*;

use locviz::aggregate::group_commits;
use locviz::breakdown::breakdown;
use locviz::config::PlotConfig;
use locviz::files::{group_files, sort_by_size};
use locviz::model::LineRecord;
use locviz::selection::{select_in_region, Projection, Region, Selection};
use locviz::timeline::{filter_until, TimeScale};
use locviz::window::ScrollWindow;

const START: i64 = 1_700_000_000;
const SPAN: i64 = 60 * 60 * 24 * 365;

fn line_record() -> impl Strategy<Value = LineRecord> {
    (
        0usize..6,
        0usize..5,
        0usize..4,
        0i64..SPAN,
        -12i32..=12,
        1u32..200,
        proptest::bool::weighted(0.95),
    )
        .prop_map(|(commit, file, kind, secs, tz, line, valid)| {
            let offset = FixedOffset::east_opt(tz * 3600).unwrap();
            LineRecord {
                file: format!("src/f{file}.rs"),
                line,
                depth: line % 7,
                length: line % 80,
                kind: ["rs", "js", "css", "md"][kind].to_string(),
                author: "ps".to_string(),
                commit: format!("c{commit}"),
                date: None,
                time: String::new(),
                timezone: String::new(),
                datetime: valid.then(|| offset.timestamp_opt(START + secs, 0).unwrap()),
            }
        })
}

fn records() -> impl Strategy<Value = Vec<LineRecord>> {
    proptest::collection::vec(line_record(), 0..120)
}

proptest! {
    #[test]
    fn aggregation_keeps_every_record(records in records()) {
        let n = records.len();
        let mut first_seen: Vec<String> = Vec::new();
        for r in &records {
            if !first_seen.contains(&r.commit) {
                first_seen.push(r.commit.clone());
            }
        }

        let commits = group_commits(records);
        let ids: Vec<String> = commits.iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(ids, first_seen);
        prop_assert_eq!(commits.iter().map(|c| c.total_lines).sum::<usize>(), n);
        for c in &commits {
            prop_assert_eq!(c.total_lines, c.lines().len());
            prop_assert!(c.lines().iter().all(|l| l.commit == c.id));
        }
    }

    #[test]
    fn filter_is_monotone(records in records(), a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let commits = group_commits(records);
        let Some(scale) = TimeScale::from_commits(&commits) else {
            return Ok(());
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (t1, t2) = (scale.instant_at(lo), scale.instant_at(hi));

        let early = filter_until(&commits, t1);
        let late = filter_until(&commits, t2);
        prop_assert!(early.len() <= late.len());
        for c in &early {
            prop_assert!(c.datetime.is_some_and(|d| d <= t1));
            prop_assert!(late.iter().any(|l| l.id == c.id));
        }
        prop_assert_eq!(
            filter_until(&commits, scale.instant_at(100.0)).len(),
            commits.iter().filter(|c| c.datetime.is_some()).count()
        );
    }

    #[test]
    fn selection_stays_inside_region_and_filter(
        records in records(),
        cursor in 0.0f64..=100.0,
        x0 in 0.0f64..1000.0, y0 in 0.0f64..600.0,
        x1 in 0.0f64..1000.0, y1 in 0.0f64..600.0,
    ) {
        let commits = group_commits(records);
        let scale = TimeScale::from_commits(&commits);
        let filtered = match scale {
            Some(scale) => filter_until(&commits, scale.instant_at(cursor)),
            None => Vec::new(),
        };
        let projection = Projection::new(&PlotConfig::default(), scale);
        let region = Region::new((x0, y0), (x1, y1));

        for c in select_in_region(&region, &filtered, &projection) {
            let point = projection.project(c);
            prop_assert!(point.is_some_and(|p| region.contains(p)));
        }

        let mut selection = Selection::new();
        selection.brush(Some(region), &filtered, &projection);
        prop_assert!(selection.len() <= filtered.len());
        for c in &commits {
            if selection.is_selected(c) {
                prop_assert!(filtered.iter().any(|f| f.id == c.id));
            }
        }
        selection.brush(None, &filtered, &projection);
        prop_assert!(selection.is_empty());
    }

    #[test]
    fn breakdown_is_normalised(records in records()) {
        let commits = group_commits(records);
        let b = breakdown(commits.iter());
        prop_assert_eq!(b.shares.iter().map(|s| s.count).sum::<usize>(), b.total_lines);
        if !b.is_empty() {
            let total: f64 = b.shares.iter().map(|s| s.proportion).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn file_order_is_stable(records in records()) {
        let mut groups = group_files(records.iter());
        let first_seen: Vec<&str> = groups.iter().map(|g| g.name).collect();
        sort_by_size(&mut groups);

        prop_assert_eq!(groups.iter().map(|g| g.len()).sum::<usize>(), records.len());
        for pair in groups.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.len() >= b.len());
            if a.len() == b.len() {
                let pos = |name: &str| first_seen.iter().position(|n| *n == name);
                prop_assert!(pos(a.name) < pos(b.name));
            }
        }
    }

    #[test]
    fn window_stays_in_bounds(
        total in 0usize..500,
        visible in 1usize..50,
        item_height in 0.5f64..100.0,
        offset in -1000.0f64..100_000.0,
    ) {
        let window = ScrollWindow::new(item_height, visible);
        let range = window.range(total, offset);
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end <= total);
        prop_assert_eq!(range.len(), visible.min(total));
    }
}
