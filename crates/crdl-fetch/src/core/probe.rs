/// Outcome of a single archive probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// An artifact exists at the coordinate.
    Hit,
    /// The archive reported the coordinate as absent.
    Miss,
    /// Anything else. Never treated as a miss.
    Unexpected(u16),
}

pub fn classify(status: u16) -> Probe {
    match status {
        200 => Probe::Hit,
        404 => Probe::Miss,
        other => Probe::Unexpected(other),
    }
}

/// Positions in probe order: the anchor, then `anchor - k` before
/// `anchor + k` for each `k` in `1..=radius`.
///
/// Positions that would fall below zero are skipped.
pub fn probe_positions(anchor: u64, radius: u64) -> impl Iterator<Item = u64> {
    std::iter::once(anchor).chain((1..=radius).flat_map(move |offset| {
        anchor
            .checked_sub(offset)
            .into_iter()
            .chain(anchor.checked_add(offset))
    }))
}
