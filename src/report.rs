use anyhow::Result;
use chrono::Utc;
use console::style;

use crate::breakdown::format_percent;
use crate::cli::CommonArgs;
use crate::context::MetaContext;
use crate::model::{
    Breakdown, CommitEntry, CommitsOutput, FileSummary, FilesOutput, Project, ProjectsOutput,
    SelectionOutput, Summary, SummaryOutput, YearSlice, SCHEMA_VERSION,
};

const RULE: &str = "─";

fn data_path(common: &CommonArgs) -> String {
    common.data.to_string_lossy().to_string()
}

pub fn summary_json(common: &CommonArgs, summary: Summary, breakdown: Breakdown) -> Result<()> {
    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data_path(common),
        summary,
        breakdown,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn breakdown_ndjson(breakdown: &Breakdown) -> Result<()> {
    for share in &breakdown.shares {
        println!("{}", serde_json::to_string(share)?);
    }
    Ok(())
}

pub fn summary_table(summary: &Summary, breakdown: &Breakdown) -> Result<()> {
    if summary.total_commits == 0 {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Summary").bold());
    println!("{}", RULE.repeat(40));
    println!("{:<22} {:>16}", "Lines of code", summary.total_loc);
    println!("{:<22} {:>16}", "Commits", summary.total_commits);
    println!("{:<22} {:>16}", "Files", summary.files);
    println!("{:<22} {:>16}", "Authors", summary.authors);
    println!("{:<22} {:>16.1}", "Avg file length", summary.avg_file_length);
    if let Some((name, lines)) = &summary.longest_file {
        println!("{:<22} {:>16}", "Longest file", format!("{name} ({lines})"));
    }
    println!("{:<22} {:>16}", "Max depth", summary.max_depth);
    println!("{:<22} {:>16}", "Longest line", summary.longest_line);
    if let Some(period) = &summary.busiest_period {
        println!("{:<22} {:>16}", "Busiest time of day", period);
    }
    if let Some(day) = &summary.busiest_weekday {
        println!("{:<22} {:>16}", "Busiest day", day);
    }

    println!();
    breakdown_table(breakdown);
    Ok(())
}

fn breakdown_table(breakdown: &Breakdown) {
    println!(
        "{:<16} {:>8} {:>8}",
        style("Type").bold(),
        style("Lines").bold(),
        style("Share").bold()
    );
    println!("{}", RULE.repeat(34));
    for share in &breakdown.shares {
        println!(
            "{:<16} {:>8} {:>8}",
            style(&share.kind).cyan(),
            share.count,
            format_percent(share.proportion)
        );
    }
}

pub fn commits_json(
    common: &CommonArgs,
    ctx: &MetaContext,
    total: usize,
    window: (usize, usize),
    entries: Vec<CommitEntry>,
) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data_path(common),
        cursor: ctx.cursor(),
        cutoff: ctx.cutoff(),
        total,
        window,
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn entries_ndjson(entries: &[CommitEntry]) -> Result<()> {
    for e in entries {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}

pub fn commits_table(entries: &[CommitEntry], total: usize, window: (usize, usize)) -> Result<()> {
    if entries.is_empty() {
        println!("No commits in range");
        return Ok(());
    }
    entries_table(entries);
    println!(
        "\nShowing {}-{} of {} commits",
        window.0 + 1,
        window.1,
        total
    );
    Ok(())
}

fn entries_table(entries: &[CommitEntry]) {
    println!(
        "{:<10} {:<20} {:<26} {:>6} {:>6}",
        style("Commit").bold(),
        style("Author").bold(),
        style("Date").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", RULE.repeat(72));
    for e in entries {
        let short: String = e.id.chars().take(8).collect();
        let date = e
            .datetime
            .map(|d| d.format("%Y-%m-%d %H:%M %:z").to_string())
            .unwrap_or_else(|| "invalid".to_string());
        let hour = e
            .hour_frac
            .map(|h| format!("{h:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<20} {:<26} {:>6} {:>6}",
            style(short).yellow(),
            e.author,
            date,
            hour,
            e.total_lines
        );
    }
}

pub fn selection_json(
    common: &CommonArgs,
    ctx: &MetaContext,
    selected: Vec<CommitEntry>,
    breakdown: Breakdown,
) -> Result<()> {
    let output = SelectionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data_path(common),
        region: ctx.selection().region().map(|r| r.as_array()),
        cutoff: ctx.cutoff(),
        selected,
        breakdown,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn selection_table(selected: &[CommitEntry], breakdown: &Breakdown) -> Result<()> {
    if selected.is_empty() {
        println!("No commits selected");
    } else {
        println!("{} commits selected\n", style(selected.len()).bold());
        entries_table(selected);
    }
    println!();
    if breakdown.is_empty() {
        println!("No lines to break down");
    } else {
        breakdown_table(breakdown);
    }
    Ok(())
}

pub fn files_json(common: &CommonArgs, ctx: &MetaContext, entries: Vec<FileSummary>) -> Result<()> {
    let output = FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data_path(common),
        cutoff: ctx.cutoff(),
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn files_ndjson(entries: &[FileSummary]) -> Result<()> {
    for e in entries {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}

pub fn files_table(entries: &[FileSummary], total: usize) -> Result<()> {
    if entries.is_empty() {
        println!("No files in range");
        return Ok(());
    }
    println!(
        "{:<50} {:>8} {:<10} {:>6}",
        style("File").bold(),
        style("Lines").bold(),
        style("Type").bold(),
        style("Depth").bold()
    );
    println!("{}", RULE.repeat(78));
    for e in entries {
        println!(
            "{:<50} {:>8} {:<10} {:>6}",
            e.name,
            e.lines,
            style(&e.kind).cyan(),
            e.max_depth
        );
    }
    if total > entries.len() {
        println!("\n... and {} more files", total - entries.len());
    }
    Ok(())
}

pub fn projects_json(
    query: Option<String>,
    year: Option<String>,
    projects: &[&Project],
    years: Vec<YearSlice>,
) -> Result<()> {
    let output = ProjectsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        query,
        year,
        projects: projects.iter().map(|p| (*p).clone()).collect(),
        years,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn projects_ndjson(projects: &[&Project]) -> Result<()> {
    for p in projects {
        println!("{}", serde_json::to_string(p)?);
    }
    Ok(())
}

pub fn projects_table(projects: &[&Project], years: &[YearSlice]) -> Result<()> {
    println!("{} Projects", style(projects.len()).bold());
    println!("{}", RULE.repeat(60));
    for p in projects {
        println!("{:<6} {:<24} {}", style(&p.year).yellow(), p.title, p.description);
    }

    if !years.is_empty() {
        println!("\n{}", style("By year").bold());
        let max = years.iter().map(|y| y.count).max().unwrap_or(1);
        for slice in years {
            let bar = "█".repeat((slice.count * 20).div_ceil(max));
            println!("  {:<6} {} {}", slice.year, style(bar).green(), slice.count);
        }
    }
    Ok(())
}
