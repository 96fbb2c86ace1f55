use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::schedule::{GameOutcome, ScoreLine};
use crate::strength::ScheduleStrength;

/// Season tally for one team. `opponents` preserves order and duplicates, so
/// a rematch shows up twice. Built fresh on every aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
    pub opponents: Vec<String>,
}

impl TeamRecord {
    /// (wins + 0.5 * ties) / games, or 0.0 for a team yet to play a decided
    /// game.
    pub fn win_pct(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / self.games_played as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingsEntry {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
    pub sos: f64,
}

/// Union of every home/away identifier across the complete schedule, decided
/// or not. Runs before aggregation so a team with zero decided games still
/// gets a record. BTreeSet keeps the universe in a stable order.
pub fn team_universe(schedule: &[GameOutcome]) -> BTreeSet<String> {
    let mut teams = BTreeSet::new();
    for game in schedule {
        teams.insert(game.home_team.clone());
        teams.insert(game.away_team.clone());
    }
    teams
}

enum GameResult {
    Win,
    Loss,
    Tie,
}

fn credit(record: &mut TeamRecord, opponent: &str, result: GameResult) {
    record.opponents.push(opponent.to_string());
    record.games_played += 1;
    match result {
        GameResult::Win => record.wins += 1,
        GameResult::Loss => record.losses += 1,
        GameResult::Tie => record.ties += 1,
    }
}

/// Fold outcomes into per-team records. Every team in `teams` starts at
/// zero; games without a decided score are skipped silently. Classification
/// is strictly by score comparison, home field carries no weight.
pub fn aggregate(
    teams: &BTreeSet<String>,
    outcomes: &[GameOutcome],
) -> HashMap<String, TeamRecord> {
    let mut records: HashMap<String, TeamRecord> = teams
        .iter()
        .map(|team| (team.clone(), TeamRecord::default()))
        .collect();

    for game in outcomes {
        let ScoreLine::Decided { home, away } = game.score else {
            continue;
        };
        let (home_result, away_result) = match home.cmp(&away) {
            Ordering::Greater => (GameResult::Win, GameResult::Loss),
            Ordering::Less => (GameResult::Loss, GameResult::Win),
            Ordering::Equal => (GameResult::Tie, GameResult::Tie),
        };
        credit(
            records.entry(game.home_team.clone()).or_default(),
            &game.away_team,
            home_result,
        );
        credit(
            records.entry(game.away_team.clone()).or_default(),
            &game.home_team,
            away_result,
        );
    }

    records
}

/// Flatten records plus schedule strength into ranked-sort input, one entry
/// per team in universe order. That order is what the ranker's stable sort
/// falls back to when win pct and SOS both tie.
pub fn standings_entries(
    teams: &BTreeSet<String>,
    records: &HashMap<String, TeamRecord>,
    strength: &HashMap<String, ScheduleStrength>,
) -> Vec<StandingsEntry> {
    teams
        .iter()
        .map(|team| {
            let record = records.get(team).cloned().unwrap_or_default();
            let sos = strength.get(team).map(|s| s.sos).unwrap_or(0.0);
            StandingsEntry {
                team: team.clone(),
                wins: record.wins,
                losses: record.losses,
                ties: record.ties,
                win_pct: record.win_pct(),
                sos,
            }
        })
        .collect()
}
