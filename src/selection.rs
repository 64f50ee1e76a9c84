use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{PlotConfig, UsableArea};
use crate::error::LocvizError;
use crate::model::{Commit, Instant};
use crate::timeline::TimeScale;

/// Maps a commit to its point on the scatterplot: datetime along x,
/// hour of day along y with midnight at the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    area: UsableArea,
    domain: Option<TimeScale>,
}

impl Projection {
    pub fn new(config: &PlotConfig, domain: Option<TimeScale>) -> Self {
        Self {
            area: config.usable_area(),
            domain,
        }
    }

    pub fn area(&self) -> UsableArea {
        self.area
    }

    /// x for an instant. A zero-length domain puts every point mid-plot.
    pub fn x(&self, instant: Instant) -> Option<f64> {
        let domain = self.domain?;
        let span_ms = (domain.max() - domain.min()).num_milliseconds();
        if span_ms == 0 {
            return Some(self.area.left + self.area.width() / 2.0);
        }
        let t = (instant - domain.min()).num_milliseconds() as f64 / span_ms as f64;
        Some(self.area.left + t * self.area.width())
    }

    /// y for a fractional hour in `[0, 24]`.
    pub fn y(&self, hour_frac: f64) -> f64 {
        self.area.bottom - hour_frac / 24.0 * self.area.height()
    }

    /// Inverse of [`Projection::y`].
    pub fn hour_at(&self, y: f64) -> f64 {
        (self.area.bottom - y) / self.area.height() * 24.0
    }

    pub fn project(&self, commit: &Commit) -> Option<(f64, f64)> {
        let x = self.x(commit.datetime?)?;
        let y = self.y(commit.hour_frac?);
        Some((x, y))
    }
}

/// Axis-aligned rectangle in projected coordinates, stored with
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    pub fn new((ax, ay): (f64, f64), (bx, by): (f64, f64)) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl FromStr for Region {
    type Err = LocvizError;

    /// `x0,y0,x1,y1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LocvizError::InvalidRegion(format!("'{s}': {e}")))?;

        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Region::new((*x0, *y0), (*x1, *y1)))
            }
            _ => Err(LocvizError::InvalidRegion(format!(
                "'{s}': expected four finite numbers x0,y0,x1,y1"
            ))),
        }
    }
}

/// Commits whose projected point falls inside `region`, in population order.
pub fn select_in_region<'a>(
    region: &Region,
    commits: &[&'a Commit],
    projection: &Projection,
) -> Vec<&'a Commit> {
    commits
        .iter()
        .copied()
        .filter(|c| projection.project(c).is_some_and(|p| region.contains(p)))
        .collect()
}

/// Brush state: the active region and the ids it selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    region: Option<Region>,
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Replace the selection with whatever `region` covers. `None` clears it.
    pub fn brush(&mut self, region: Option<Region>, commits: &[&Commit], projection: &Projection) {
        self.region = region;
        self.ids = match region {
            Some(r) => select_in_region(&r, commits, projection)
                .into_iter()
                .map(|c| c.id.clone())
                .collect(),
            None => HashSet::new(),
        };
    }

    /// Flip membership of every commit inside `region`.
    pub fn toggle(&mut self, region: Region, commits: &[&Commit], projection: &Projection) {
        for commit in select_in_region(&region, commits, projection) {
            if !self.ids.remove(&commit.id) {
                self.ids.insert(commit.id.clone());
            }
        }
        self.region = Some(region);
    }

    pub fn clear(&mut self) {
        self.region = None;
        self.ids.clear();
    }

    pub fn is_selected(&self, commit: &Commit) -> bool {
        self.ids.contains(&commit.id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected members of `population`, in population order.
    pub fn selected<'a>(&self, population: &[&'a Commit]) -> Vec<&'a Commit> {
        population
            .iter()
            .copied()
            .filter(|c| self.is_selected(c))
            .collect()
    }
}
