use std::collections::HashSet;

use futures_util::future::join_all;
use log::warn;

use crate::fetch::EntityFetcher;
use crate::models::{Group, GroupPerformanceRecord};

/// Roll up one group's recommended-people tree into counts and an
/// efficiency ratio.
///
/// Both relationship lookups are best effort: a failed lookup zeroes only
/// what it feeds and never propagates, so a broken group still renders as a
/// zeroed row instead of taking the dashboard down.
pub async fn compute_group_performance(
    fetcher: &dyn EntityFetcher,
    group: &Group,
) -> GroupPerformanceRecord {
    let recommended_count = match fetcher.recommended_of(group.id).await {
        Ok(people) => people.len(),
        Err(err) => {
            warn!("group {}: recommended lookup failed, counting 0: {err}", group.id);
            0
        }
    };

    let (unique_leader_count, unique_voter_count) = match fetcher.full_structure_of(group.id).await
    {
        Ok(rows) => {
            let mut leaders: HashSet<&str> = HashSet::new();
            let mut voters: HashSet<&str> = HashSet::new();
            for row in &rows {
                if let Some(id) = row.leader_id.as_deref() {
                    leaders.insert(id);
                }
                if let Some(id) = row.voter_id.as_deref() {
                    voters.insert(id);
                }
            }
            (leaders.len(), voters.len())
        }
        Err(err) => {
            warn!("group {}: structure lookup failed, zeroing counts: {err}", group.id);
            (0, 0)
        }
    };

    let efficiency = if unique_leader_count > 0 {
        unique_voter_count as f64 / unique_leader_count as f64
    } else {
        0.0
    };

    GroupPerformanceRecord {
        group_id: group.id,
        group_name: group.name.clone(),
        recommended_count,
        unique_leader_count,
        unique_voter_count,
        efficiency,
    }
}

/// Compute performance for a whole batch of groups. Each group's record is
/// built only from data scoped to that group, so one group's failure cannot
/// contaminate or delay the others.
pub async fn compute_batch(
    fetcher: &dyn EntityFetcher,
    groups: &[Group],
) -> Vec<GroupPerformanceRecord> {
    join_all(
        groups
            .iter()
            .map(|group| compute_group_performance(fetcher, group)),
    )
    .await
}
