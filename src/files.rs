use std::collections::HashMap;

use crate::model::{FileSummary, LineRecord};

/// Records of one file, borrowed from the commits that own them.
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup<'a> {
    pub name: &'a str,
    pub lines: Vec<&'a LineRecord>,
}

impl<'a> FileGroup<'a> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most frequent type among the records, earliest seen on ties.
    pub fn dominant_kind(&self) -> &'a str {
        let mut counts: Vec<(&'a str, usize)> = Vec::new();
        for line in self.lines.iter().copied() {
            match counts.iter_mut().find(|(k, _)| *k == line.kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((line.kind.as_str(), 1)),
            }
        }
        counts
            .iter()
            .fold(None::<(&'a str, usize)>, |best, &(k, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((k, n)),
            })
            .map(|(k, _)| k)
            .unwrap_or("")
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.to_string(),
            lines: self.lines.len(),
            kind: self.dominant_kind().to_string(),
            max_depth: self.lines.iter().map(|l| l.depth).max().unwrap_or(0),
        }
    }
}

/// Group records by file path. Files come out in first-seen order and each
/// group keeps its records in input order.
pub fn group_files<'a, I>(records: I) -> Vec<FileGroup<'a>>
where
    I: IntoIterator<Item = &'a LineRecord>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<FileGroup<'a>> = Vec::new();

    for record in records {
        match slots.get(record.file.as_str()) {
            Some(&idx) => groups[idx].lines.push(record),
            None => {
                slots.insert(record.file.as_str(), groups.len());
                groups.push(FileGroup {
                    name: record.file.as_str(),
                    lines: vec![record],
                });
            }
        }
    }

    groups
}

/// Largest files first; ties keep first-seen order.
pub fn sort_by_size(groups: &mut [FileGroup<'_>]) {
    groups.sort_by(|a, b| b.lines.len().cmp(&a.lines.len()));
}
