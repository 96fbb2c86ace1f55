use crate::standings::StandingsEntry;

/// One slot in the projected draft order, rank 1 = first pick.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOrderEntry {
    pub rank: usize,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
    pub sos: f64,
}

/// Worst-first ordering: ascending win pct, then ascending SOS among equal
/// records. No tertiary key exists; the sort is stable, so teams equal on
/// both keys keep the order the caller supplied (universe order when entries
/// come from `standings_entries`). Always returns the complete ordering;
/// any top-N cut is the caller's.
pub fn rank_draft_order(entries: &[StandingsEntry]) -> Vec<DraftOrderEntry> {
    let mut sorted: Vec<&StandingsEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        a.win_pct
            .total_cmp(&b.win_pct)
            .then(a.sos.total_cmp(&b.sos))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| DraftOrderEntry {
            rank: idx + 1,
            team: entry.team.clone(),
            wins: entry.wins,
            losses: entry.losses,
            ties: entry.ties,
            win_pct: entry.win_pct,
            sos: entry.sos,
        })
        .collect()
}
