use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schedule::{GameOutcome, GameStatus};

// Placeholder scores behind a pick. Only the sign of the difference matters;
// these never surface as real scores.
const WINNER_SCORE: u32 = 21;
const LOSER_SCORE: u32 = 10;
const TIE_SCORE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pick {
    HomeWin,
    AwayWin,
    Tie,
    Unresolved,
}

impl Pick {
    pub fn label(self) -> &'static str {
        match self {
            Pick::HomeWin => "HOME WIN",
            Pick::AwayWin => "AWAY WIN",
            Pick::Tie => "TIE",
            Pick::Unresolved => "---",
        }
    }
}

/// Resolve a single game against a pick. Decided games pass through
/// untouched; a scheduled game becomes a Simulated outcome, except an
/// Unresolved pick, which emits nothing and keeps the game out of the
/// standings entirely.
pub fn resolve_pick(game: &GameOutcome, pick: Pick) -> Option<GameOutcome> {
    if game.status == GameStatus::Final {
        return Some(game.clone());
    }
    let (home, away) = match pick {
        Pick::HomeWin => (WINNER_SCORE, LOSER_SCORE),
        Pick::AwayWin => (LOSER_SCORE, WINNER_SCORE),
        Pick::Tie => (TIE_SCORE, TIE_SCORE),
        Pick::Unresolved => return None,
    };
    Some(GameOutcome::simulated(game, home, away))
}

/// Full-season resolution: actual results plus whatever picks the caller is
/// currently holding. The pick map is consumed read-only and in full on
/// every call; a missing entry counts as Unresolved.
pub fn apply_picks(schedule: &[GameOutcome], picks: &HashMap<String, Pick>) -> Vec<GameOutcome> {
    schedule
        .iter()
        .filter_map(|game| {
            let pick = picks.get(&game.id).copied().unwrap_or(Pick::Unresolved);
            resolve_pick(game, pick)
        })
        .collect()
}
