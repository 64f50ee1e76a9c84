use std::collections::HashMap;

use crate::model::{Commit, LineRecord};

/// Group line records into commits.
///
/// Commits come out in the order their id first appears; each record ends up
/// in exactly one commit and keeps its relative order there.
pub fn group_commits(records: Vec<LineRecord>) -> Vec<Commit> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<LineRecord>)> = Vec::new();

    for record in records {
        match slots.get(&record.commit) {
            Some(&idx) => groups[idx].1.push(record),
            None => {
                slots.insert(record.commit.clone(), groups.len());
                groups.push((record.commit.clone(), vec![record]));
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|(id, lines)| Commit::from_lines(id, lines))
        .collect()
}

/// Largest commits first; ties keep their incoming order.
pub fn sort_by_size(commits: &mut [&Commit]) {
    commits.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
}
