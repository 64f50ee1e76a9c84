use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::cli::CommonArgs;
use crate::model::CommitEntry;
use crate::projects::{filter_year, latest, load_projects, rollup_by_year, search};
use crate::report;
use crate::selection::Region;
use crate::window::ScrollWindow;

pub fn summary(common: &CommonArgs, json: bool, ndjson: bool) -> Result<()> {
    let ctx = common.open_context()?;
    let summary = ctx.summary();
    let breakdown = ctx.breakdown();

    if json {
        report::summary_json(common, summary, breakdown)
    } else if ndjson {
        report::breakdown_ndjson(&breakdown)
    } else {
        report::summary_table(&summary, &breakdown)
    }
}

pub fn commits(
    common: &CommonArgs,
    json: bool,
    ndjson: bool,
    offset: f64,
    visible: usize,
    item_height: f64,
) -> Result<()> {
    let ctx = common.open_context()?;
    let window = ScrollWindow::new(item_height, visible);
    let total = ctx.filtered().len();
    let range = window.range(total, offset);
    debug!("window {}..{} of {} commits", range.start, range.end, total);

    let entries: Vec<CommitEntry> = ctx
        .commit_window(&window, offset)
        .into_iter()
        .map(|c| CommitEntry::from_commit(c, common.repo_url.as_deref()))
        .collect();

    if json {
        report::commits_json(common, &ctx, total, (range.start, range.end), entries)
    } else if ndjson {
        report::entries_ndjson(&entries)
    } else {
        report::commits_table(&entries, total, (range.start, range.end))
    }
}

pub fn select(
    common: &CommonArgs,
    json: bool,
    ndjson: bool,
    region: Option<Region>,
    toggles: &[Region],
) -> Result<()> {
    let mut ctx = common.open_context()?;
    ctx.brush(region);
    for extra in toggles {
        ctx.toggle(*extra);
    }

    let selected: Vec<CommitEntry> = ctx
        .selected_commits()
        .into_iter()
        .map(|c| CommitEntry::from_commit(c, common.repo_url.as_deref()))
        .collect();
    let breakdown = ctx.breakdown();
    info!("{} of {} commits selected", selected.len(), ctx.filtered().len());

    if json {
        report::selection_json(common, &ctx, selected, breakdown)
    } else if ndjson {
        report::entries_ndjson(&selected)
    } else {
        report::selection_table(&selected, &breakdown)
    }
}

pub fn files(common: &CommonArgs, json: bool, ndjson: bool, top: usize) -> Result<()> {
    let ctx = common.open_context()?;
    let groups = ctx.file_groups();
    let total = groups.len();
    let entries: Vec<_> = groups.iter().take(top).map(|g| g.summary()).collect();

    if json {
        report::files_json(common, &ctx, entries)
    } else if ndjson {
        report::files_ndjson(&entries)
    } else {
        report::files_table(&entries, total)
    }
}

pub fn projects(
    path: &Path,
    query: Option<String>,
    year: Option<String>,
    count: Option<usize>,
    json: bool,
    ndjson: bool,
) -> Result<()> {
    let all = load_projects(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let listed = match count {
        Some(n) => latest(&all, n),
        None => &all[..],
    };

    let mut matches = search(listed, query.as_deref().unwrap_or(""));
    if let Some(year) = &year {
        matches = filter_year(&matches, year);
    }
    let years = rollup_by_year(&matches);

    if json {
        report::projects_json(query, year, &matches, years)
    } else if ndjson {
        report::projects_ndjson(&matches)
    } else {
        report::projects_table(&matches, &years)
    }
}
