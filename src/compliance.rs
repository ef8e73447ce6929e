use std::collections::HashMap;

use crate::models::{ComplianceRecord, Leader, Voter};

/// Compliance rate at or above this counts as meeting the target.
pub const IN_COMPLIANCE_THRESHOLD: f64 = 80.0;

/// Score every leader with a target against their assigned voters.
///
/// Leaders with `target == 0` have no target set and are excluded outright
/// rather than rated 0. Every leader with a target appears exactly once in
/// the output, even with no assigned voters. The join is exact string
/// equality on the voter's primary leader id; voters without an assignment
/// count toward nobody.
pub fn compute_compliance(leaders: &[Leader], voters: &[Voter]) -> Vec<ComplianceRecord> {
    let mut assigned: HashMap<&str, usize> = HashMap::new();
    for voter in voters {
        if let Some(leader_id) = voter.leader_id.as_deref() {
            *assigned.entry(leader_id).or_insert(0) += 1;
        }
    }

    leaders
        .iter()
        .filter(|leader| leader.target > 0)
        .map(|leader| {
            let count = assigned
                .get(leader.identifier.as_str())
                .copied()
                .unwrap_or(0);
            let rate = count as f64 / leader.target as f64 * 100.0;
            ComplianceRecord {
                leader_id: leader.identifier.clone(),
                leader_name: leader.name.clone(),
                leader_surname: leader.surname.clone(),
                target: leader.target,
                assigned_voters: count,
                compliance_rate: rate,
                in_compliance: rate >= IN_COMPLIANCE_THRESHOLD,
            }
        })
        .collect()
}
