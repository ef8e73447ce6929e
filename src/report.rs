use std::fmt::Write;

use chrono::NaiveDate;

use crate::distribution::{self, GeoField};
use crate::models::{ComplianceRecord, GroupPerformanceRecord, Voter};
use crate::ranking;

pub fn build_report(
    generated_on: NaiveDate,
    compliance: &[ComplianceRecord],
    voters: &[Voter],
    groups: &[GroupPerformanceRecord],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Campaign Compliance Report");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall Compliance");
    let _ = writeln!(
        output,
        "{:.1}% of {} targeted leaders are meeting their target.",
        ranking::overall_compliance_rate(compliance),
        compliance.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Performers");
    let top = ranking::top_performers(compliance, 10);
    if top.is_empty() {
        let _ = writeln!(output, "No leader has registered voters yet.");
    } else {
        for record in &top {
            let _ = writeln!(
                output,
                "- {} {}: {:.1}% ({} of {} voters)",
                record.leader_name,
                record.leader_surname,
                record.compliance_rate,
                record.assigned_voters,
                record.target
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## At Risk");
    let risky = ranking::at_risk(compliance, 5);
    if risky.is_empty() {
        let _ = writeln!(output, "No leaders below the risk threshold.");
    } else {
        for record in &risky {
            let _ = writeln!(
                output,
                "- {} {}: {:.1}% ({} of {} voters)",
                record.leader_name,
                record.leader_surname,
                record.compliance_rate,
                record.assigned_voters,
                record.target
            );
        }
    }

    for (field, title) in [
        (GeoField::Department, "Voters by Department"),
        (GeoField::City, "Voters by City"),
    ] {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {title}");
        let buckets = distribution::distribution(voters, field).top_n(10);
        if buckets.is_empty() {
            let _ = writeln!(output, "No voters registered.");
        } else {
            for bucket in &buckets {
                let _ = writeln!(output, "- {}: {}", bucket.label, bucket.count);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Group Performance");
    if groups.is_empty() {
        let _ = writeln!(output, "No groups defined.");
    } else {
        for record in groups {
            let _ = writeln!(
                output,
                "- {}: {} recommended, {} leaders, {} voters, efficiency {:.2}",
                record.group_name,
                record.recommended_count,
                record.unique_leader_count,
                record.unique_voter_count,
                record.efficiency
            );
        }
    }

    output
}
