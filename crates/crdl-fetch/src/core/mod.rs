//! Pure functions behind the resolver and the locator.

mod probe;

pub use probe::{Probe, classify, probe_positions};

use crate::data::MilestoneRecord;

/// First record whose milestone renders as `identifier`.
pub fn find_milestone<'a>(records: &'a [MilestoneRecord], identifier: &str) -> Option<&'a MilestoneRecord> {
    records.iter().find(|record| record.matches(identifier))
}
