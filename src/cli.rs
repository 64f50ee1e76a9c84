use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use crate::config::PlotConfig;
use crate::context::MetaContext;
use crate::selection::Region;
use crate::timeline::parse_cutoff;

#[derive(Parser)]
#[command(name = "locviz")]
#[command(about = "Explore per-line code history: commits over time, brushing and language breakdowns")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the per-line CSV ('-' for stdin)")]
    pub data: PathBuf,

    #[arg(long, help = "Repository URL used to build commit links")]
    pub repo_url: Option<String>,

    #[arg(long, default_value_t = 1000.0, help = "Plot width in screen units")]
    pub width: f64,

    #[arg(long, default_value_t = 600.0, help = "Plot height in screen units")]
    pub height: f64,

    #[arg(long, help = "Time cursor as a percentage of the commit span (0-100)")]
    pub cursor: Option<f64>,

    #[arg(
        long,
        conflicts_with = "cursor",
        help = "Only commits at or before this point (RFC3339, YYYY-MM-DD, or a duration like '2weeks' before the latest commit)"
    )]
    pub until: Option<String>,

    #[arg(short, long, action = ArgAction::Count, help = "More logging (-v info, -vv debug)")]
    pub verbose: u8,

    #[arg(short, long, help = "Only log errors")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn plot_config(&self) -> PlotConfig {
        PlotConfig::new(self.width, self.height)
    }

    /// Load the data file and apply `--cursor` / `--until`.
    pub fn open_context(&self) -> Result<MetaContext> {
        let mut ctx = MetaContext::load(&self.data, &self.plot_config())
            .with_context(|| format!("Failed to load {}", self.data.display()))?;
        self.apply_time_filter(&mut ctx)?;
        Ok(ctx)
    }

    pub fn apply_time_filter(&self, ctx: &mut MetaContext) -> Result<()> {
        if let Some(text) = &self.until {
            match ctx.scale() {
                Some(scale) => {
                    let cutoff = parse_cutoff(text, scale.max())
                        .context("Failed to parse --until")?;
                    ctx.set_cutoff(cutoff);
                }
                None => warn!("no dated commits, ignoring --until {text}"),
            }
        } else if let Some(percent) = self.cursor {
            ctx.set_cursor(percent);
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headline statistics and the language breakdown
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits inside the time cursor, one scroll window at a time
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 0.0, help = "Scroll offset in item-height units")]
        offset: f64,

        #[arg(long, default_value_t = 20, help = "Number of rows in the window")]
        visible: usize,

        #[arg(long, default_value_t = 1.0, help = "Height of one row")]
        item_height: f64,
    },
    /// Brush a region of the plot and break the selection down by type
    Select {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, allow_hyphen_values = true, help = "Brush rectangle x0,y0,x1,y1 in plot coordinates")]
        region: Option<Region>,

        #[arg(long, allow_hyphen_values = true, help = "Toggle commits in a further rectangle (repeatable)")]
        toggle: Vec<Region>,
    },
    /// Files touched by the filtered commits, largest first
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 25, help = "Number of files to show")]
        top: usize,
    },
    /// Search a projects JSON file and roll it up by year
    Projects {
        #[arg(help = "Path to projects.json")]
        path: PathBuf,

        #[arg(long, help = "Case-insensitive search over every field")]
        query: Option<String>,

        #[arg(long, help = "Only projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Only the first N projects")]
        latest: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive explorer
    #[command(alias = "tui", alias = "ui")]
    Explore,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        use crate::commands;

        match self.command {
            Commands::Summary { json, ndjson } => commands::summary(&self.common, json, ndjson),
            Commands::Commits {
                json,
                ndjson,
                offset,
                visible,
                item_height,
            } => commands::commits(&self.common, json, ndjson, offset, visible, item_height),
            Commands::Select {
                json,
                ndjson,
                region,
                toggle,
            } => commands::select(&self.common, json, ndjson, region, &toggle),
            Commands::Files { json, ndjson, top } => commands::files(&self.common, json, ndjson, top),
            Commands::Projects {
                path,
                query,
                year,
                latest,
                json,
                ndjson,
            } => commands::projects(&path, query, year, latest, json, ndjson),
            Commands::Explore => crate::tui::run(&self.common).map_err(|e| anyhow::anyhow!(e)),
        }
    }
}
