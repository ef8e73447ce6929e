use serde::Deserialize;

/// A leader recruits voters and is accountable for a target count.
/// `target == 0` means no target has been set for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub identifier: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub target: u32,
    /// Absent means self-recommended.
    #[serde(default)]
    pub recommender_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub identifier: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    /// Primary leader assignment, at most one.
    #[serde(default)]
    pub leader_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommended {
    pub identifier: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One flattened leader-voter pairing inside a group's recommended tree.
/// Rows may carry only one side, or neither.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRow {
    #[serde(default)]
    pub leader_id: Option<String>,
    #[serde(default)]
    pub voter_id: Option<String>,
}

/// Derived per-leader compliance snapshot, rebuilt on every computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRecord {
    pub leader_id: String,
    pub leader_name: String,
    pub leader_surname: String,
    pub target: u32,
    pub assigned_voters: usize,
    /// assigned / target * 100, unrounded.
    pub compliance_rate: f64,
    pub in_compliance: bool,
}

/// Derived per-group rollup.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPerformanceRecord {
    pub group_id: i64,
    pub group_name: String,
    pub recommended_count: usize,
    pub unique_leader_count: usize,
    pub unique_voter_count: usize,
    /// Unique voters per unique leader, 0 when the group has no leaders.
    pub efficiency: f64,
}

/// One bucket of a geographic distribution top list.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}
