use std::collections::HashMap;

use crate::standings::TeamRecord;

/// One opponent's full season tally as it entered a team's SOS sum. A
/// rematch produces two identical lines, doubling that opponent's weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentLine {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleStrength {
    pub sos: f64,
    pub opponents: Vec<OpponentLine>,
}

/// Two-hop strength of schedule: the combined win-percentage-equivalent of
/// every opponent faced, over those opponents' entire decided schedules.
/// An opponent's totals include its game(s) against the subject team itself,
/// so the metric is mildly self-referential once the two have met. Teams
/// with no decided games get 0.0.
pub fn compute_sos(records: &HashMap<String, TeamRecord>) -> HashMap<String, ScheduleStrength> {
    let mut out = HashMap::with_capacity(records.len());

    for (team, record) in records {
        let mut lines = Vec::with_capacity(record.opponents.len());
        let mut total_wins = 0u32;
        let mut total_ties = 0u32;
        let mut total_games = 0u32;

        for opponent in &record.opponents {
            let Some(opp_record) = records.get(opponent) else {
                continue;
            };
            total_wins += opp_record.wins;
            total_ties += opp_record.ties;
            total_games += opp_record.games_played;
            lines.push(OpponentLine {
                team: opponent.clone(),
                wins: opp_record.wins,
                losses: opp_record.losses,
                ties: opp_record.ties,
                games_played: opp_record.games_played,
            });
        }

        let sos = if total_games > 0 {
            (total_wins as f64 + 0.5 * total_ties as f64) / total_games as f64
        } else {
            0.0
        };
        out.insert(
            team.clone(),
            ScheduleStrength {
                sos,
                opponents: lines,
            },
        );
    }

    out
}
