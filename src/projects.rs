use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::model::{Project, YearSlice};

pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let file = File::open(path)?;
    let projects = read_projects(BufReader::new(file))?;
    debug!("loaded {} projects from {}", projects.len(), path.display());
    Ok(projects)
}

pub fn read_projects<R: Read>(reader: R) -> Result<Vec<Project>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Projects where any field contains `query`, ignoring case. An empty query
/// matches everything.
pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| {
            query.is_empty()
                || [&p.title, &p.image, &p.description, &p.year]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn filter_year<'a>(projects: &[&'a Project], year: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .copied()
        .filter(|p| p.year == year)
        .collect()
}

/// Project counts per year, newest year first.
pub fn rollup_by_year(projects: &[&Project]) -> Vec<YearSlice> {
    let mut slices: Vec<YearSlice> = Vec::new();
    for project in projects {
        match slices.iter_mut().find(|s| s.year == project.year) {
            Some(slice) => slice.count += 1,
            None => slices.push(YearSlice {
                year: project.year.clone(),
                count: 1,
            }),
        }
    }
    slices.sort_by(|a, b| b.year.cmp(&a.year));
    slices
}

/// First `n` projects, as listed on the landing page.
pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}
