use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub type Instant = DateTime<FixedOffset>;

/// One row of the line-level history: a single source line as it exists in
/// a single commit snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub commit: String,
    /// `date` column at midnight in the row's `timezone`; `None` when either
    /// part failed to parse.
    pub date: Option<Instant>,
    pub time: String,
    pub timezone: String,
    pub datetime: Option<Instant>,
}

/// Summary of all line records sharing one commit id.
///
/// The records themselves are owned by the commit and only reachable
/// through [`Commit::lines`]; they are skipped when the commit is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub date: Option<Instant>,
    pub time: String,
    pub timezone: String,
    pub datetime: Option<Instant>,
    pub hour_frac: Option<f64>,
    pub total_lines: usize,
    #[serde(skip)]
    lines: Vec<LineRecord>,
}

impl Commit {
    /// Build a commit from its records. Metadata is taken from the first one.
    /// Returns `None` for an empty group.
    pub fn from_lines(id: String, lines: Vec<LineRecord>) -> Option<Self> {
        let first = lines.first()?;
        let hour_frac = first
            .datetime
            .map(|dt| dt.hour() as f64 + dt.minute() as f64 / 60.0);

        Some(Self {
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_frac,
            total_lines: lines.len(),
            id,
            lines,
        })
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    pub fn url(&self, repo_url: &str) -> String {
        format!("{}/commit/{}", repo_url.trim_end_matches('/'), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub proportion: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub total_lines: usize,
    pub shares: Vec<TypeShare>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn get(&self, kind: &str) -> Option<&TypeShare> {
        self.shares.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub lines: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub max_depth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub id: String,
    pub author: String,
    pub datetime: Option<Instant>,
    pub hour_frac: Option<f64>,
    pub total_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CommitEntry {
    pub fn from_commit(commit: &Commit, repo_url: Option<&str>) -> Self {
        Self {
            id: commit.id.clone(),
            author: commit.author.clone(),
            datetime: commit.datetime,
            hour_frac: commit.hour_frac,
            total_lines: commit.total_lines,
            url: repo_url.map(|base| commit.url(base)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_loc: usize,
    pub total_commits: usize,
    pub files: usize,
    pub authors: usize,
    pub avg_file_length: f64,
    pub longest_file: Option<(String, u32)>,
    pub max_depth: u32,
    pub longest_line: u32,
    pub busiest_period: Option<String>,
    pub busiest_weekday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Written either as `"2024"` or `2024`; kept as text.
    #[serde(deserialize_with = "year_text")]
    pub year: String,
}

fn year_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(text) => text,
        Year::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSlice {
    pub year: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cursor: f64,
    pub cutoff: Option<Instant>,
    pub total: usize,
    pub window: (usize, usize),
    pub entries: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub region: Option<[f64; 4]>,
    pub cutoff: Option<Instant>,
    pub selected: Vec<CommitEntry>,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<Instant>,
    pub entries: Vec<FileSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub summary: Summary,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub query: Option<String>,
    pub year: Option<String>,
    pub projects: Vec<Project>,
    pub years: Vec<YearSlice>,
}
