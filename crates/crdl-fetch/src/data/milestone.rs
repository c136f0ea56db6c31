use std::fmt;

use serde::Deserialize;

/// A milestone number as published by the dashboard.
///
/// Older documents carry it as a string, newer ones as a number; both compare
/// by their decimal rendering.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MilestoneId {
    Number(u64),
    Text(String),
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneId::Number(n) => write!(f, "{n}"),
            MilestoneId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of the milestone metadata document. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MilestoneRecord {
    pub milestone: MilestoneId,

    #[serde(default)]
    pub chromium_main_branch_position: Option<u64>,
}

impl MilestoneRecord {
    pub fn matches(&self, identifier: &str) -> bool {
        self.milestone.to_string() == identifier
    }
}
