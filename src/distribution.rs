use std::collections::HashMap;

use clap::ValueEnum;

use crate::models::{LabelCount, Voter};

/// Bucket label for voters with a missing or empty location value.
pub const UNSPECIFIED_LABEL: &str = "Sin especificar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeoField {
    Department,
    City,
    Neighborhood,
}

impl GeoField {
    fn of<'a>(&self, voter: &'a Voter) -> Option<&'a str> {
        match self {
            GeoField::Department => voter.department.as_deref(),
            GeoField::City => voter.city.as_deref(),
            GeoField::Neighborhood => voter.neighborhood.as_deref(),
        }
    }
}

/// Frequency table of voters over one geographic field. Every voter lands in
/// exactly one bucket, so the counts always sum to the number of voters.
/// First-seen label order is retained for stable top-N tie-breaks.
#[derive(Debug, Clone)]
pub struct Distribution {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl Distribution {
    /// Untruncated view, for consumers that plot every location.
    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Largest buckets first; ties keep first-seen order.
    pub fn top_n(&self, n: usize) -> Vec<LabelCount> {
        let mut buckets: Vec<LabelCount> = self
            .order
            .iter()
            .map(|label| LabelCount {
                label: label.clone(),
                count: self.counts[label],
            })
            .collect();
        buckets.sort_by(|a, b| b.count.cmp(&a.count));
        buckets.truncate(n);
        buckets
    }
}

pub fn distribution(voters: &[Voter], field: GeoField) -> Distribution {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for voter in voters {
        let label = match field.of(voter) {
            Some(value) if !value.trim().is_empty() => value,
            _ => UNSPECIFIED_LABEL,
        };
        match counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                counts.insert(label.to_string(), 1);
                order.push(label.to_string());
            }
        }
    }

    Distribution { counts, order }
}
