use crate::models::ComplianceRecord;

/// Below this rate (and above zero) a leader is considered at risk.
pub const AT_RISK_THRESHOLD: f64 = 60.0;

/// Best-scoring leaders, highest rate first. Leaders with a zero rate never
/// qualify. Ties keep input order (`sort_by` is stable).
pub fn top_performers(records: &[ComplianceRecord], n: usize) -> Vec<ComplianceRecord> {
    let mut qualifying: Vec<ComplianceRecord> = records
        .iter()
        .filter(|r| r.compliance_rate > 0.0)
        .cloned()
        .collect();
    qualifying.sort_by(|a, b| {
        b.compliance_rate
            .partial_cmp(&a.compliance_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    qualifying.truncate(n);
    qualifying
}

/// Leaders strictly between 0 and the at-risk threshold, worst first.
/// A zero rate means either no progress on a target or no target at all;
/// neither belongs in this list.
pub fn at_risk(records: &[ComplianceRecord], n: usize) -> Vec<ComplianceRecord> {
    let mut qualifying: Vec<ComplianceRecord> = records
        .iter()
        .filter(|r| r.compliance_rate > 0.0 && r.compliance_rate < AT_RISK_THRESHOLD)
        .cloned()
        .collect();
    qualifying.sort_by(|a, b| {
        a.compliance_rate
            .partial_cmp(&b.compliance_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    qualifying.truncate(n);
    qualifying
}

/// Share of targeted leaders meeting their target, as a percentage.
/// Defined as 0 when there are no targeted leaders.
pub fn overall_compliance_rate(records: &[ComplianceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let compliant = records.iter().filter(|r| r.in_compliance).count();
    compliant as f64 / records.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, rate: f64) -> ComplianceRecord {
        ComplianceRecord {
            leader_id: id.to_string(),
            leader_name: "Nora".to_string(),
            leader_surname: "Ibanez".to_string(),
            target: 10,
            assigned_voters: (rate / 10.0) as usize,
            compliance_rate: rate,
            in_compliance: rate >= 80.0,
        }
    }

    #[test]
    fn top_performers_sorted_descending_without_zeroes() {
        let records = vec![
            record("L1", 40.0),
            record("L2", 0.0),
            record("L3", 90.0),
            record("L4", 55.0),
        ];
        let top = top_performers(&records, 10);
        let ids: Vec<&str> = top.iter().map(|r| r.leader_id.as_str()).collect();
        assert_eq!(ids, vec!["L3", "L4", "L1"]);
    }

    #[test]
    fn top_performers_respects_limit_and_tie_order() {
        let records = vec![
            record("L1", 50.0),
            record("L2", 50.0),
            record("L3", 50.0),
        ];
        let top = top_performers(&records, 2);
        let ids: Vec<&str> = top.iter().map(|r| r.leader_id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L2"]);
    }

    #[test]
    fn at_risk_keeps_only_the_open_interval() {
        let records = vec![
            record("L1", 0.0),
            record("L2", 59.9),
            record("L3", 60.0),
            record("L4", 12.0),
            record("L5", 95.0),
        ];
        let risky = at_risk(&records, 5);
        let ids: Vec<&str> = risky.iter().map(|r| r.leader_id.as_str()).collect();
        assert_eq!(ids, vec!["L4", "L2"]);
        assert!(risky
            .iter()
            .all(|r| r.compliance_rate > 0.0 && r.compliance_rate < AT_RISK_THRESHOLD));
    }

    #[test]
    fn empty_when_nothing_qualifies() {
        let records = vec![record("L1", 0.0)];
        assert!(top_performers(&records, 10).is_empty());
        assert!(at_risk(&records, 5).is_empty());
        assert!(at_risk(&[], 5).is_empty());
    }

    #[test]
    fn ranking_does_not_mutate_input() {
        let records = vec![record("L1", 10.0), record("L2", 90.0)];
        let before = records.clone();
        let _ = top_performers(&records, 1);
        let _ = at_risk(&records, 1);
        assert_eq!(records, before);
    }

    #[test]
    fn overall_rate_counts_compliant_share() {
        let records = vec![
            record("L1", 90.0),
            record("L2", 80.0),
            record("L3", 20.0),
            record("L4", 0.0),
        ];
        assert!((overall_compliance_rate(&records) - 50.0).abs() < f64::EPSILON);
        assert_eq!(overall_compliance_rate(&[]), 0.0);
    }
}
