use std::path::Path;

use crate::models::{ComplianceRecord, LabelCount};

pub fn write_compliance_csv(
    path: &Path,
    records: &[ComplianceRecord],
) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "leader_id",
        "name",
        "surname",
        "target",
        "assigned_voters",
        "compliance_rate",
        "in_compliance",
    ])?;

    for record in records {
        writer.write_record([
            record.leader_id.as_str(),
            record.leader_name.as_str(),
            record.leader_surname.as_str(),
            &record.target.to_string(),
            &record.assigned_voters.to_string(),
            &format!("{:.2}", record.compliance_rate),
            if record.in_compliance { "true" } else { "false" },
        ])?;
    }

    writer.flush()?;
    Ok(records.len())
}

pub fn write_distribution_csv(path: &Path, buckets: &[LabelCount]) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["label", "count"])?;

    for bucket in buckets {
        writer.write_record([bucket.label.as_str(), &bucket.count.to_string()])?;
    }

    writer.flush()?;
    Ok(buckets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compliance.csv");
        let records = vec![ComplianceRecord {
            leader_id: "L1".to_string(),
            leader_name: "Ana".to_string(),
            leader_surname: "Perez".to_string(),
            target: 10,
            assigned_voters: 2,
            compliance_rate: 20.0,
            in_compliance: false,
        }];

        let written = write_compliance_csv(&path, &records).unwrap();
        assert_eq!(written, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "leader_id,name,surname,target,assigned_voters,compliance_rate,in_compliance"
        );
        assert_eq!(lines.next().unwrap(), "L1,Ana,Perez,10,2,20.00,false");
    }

    #[test]
    fn distribution_csv_round_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        let buckets = vec![
            LabelCount {
                label: "Cali".to_string(),
                count: 3,
            },
            LabelCount {
                label: "Sin especificar".to_string(),
                count: 1,
            },
        ];

        write_distribution_csv(&path, &buckets).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Cali,3"));
        assert!(contents.contains("Sin especificar,1"));
    }
}
