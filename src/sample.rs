use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::schedule::{self, GameOutcome};

const NFL_TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LA", "LAC", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

/// Demo season for first launch without a schedule file: every week pairs
/// the shuffled field, weeks up to `decided_weeks` carry results, the rest
/// stay open for picks. Matchups repeat across weeks, which exercises the
/// rematch weighting in the SOS view.
pub fn sample_schedule(season: u16, weeks: u16, decided_weeks: u16) -> Vec<GameOutcome> {
    let mut rng = rand::thread_rng();
    let opener = NaiveDate::from_ymd_opt(season as i32, 9, 7);
    let mut games = Vec::with_capacity(weeks as usize * NFL_TEAMS.len() / 2);

    for week in 1..=weeks {
        let mut field = NFL_TEAMS.to_vec();
        field.shuffle(&mut rng);
        let gameday = opener
            .and_then(|d| d.checked_add_signed(Duration::days(7 * (week as i64 - 1))))
            .map(|d| d.format("%Y-%m-%d").to_string());

        for pair in field.chunks(2) {
            let (home, away) = (pair[0], pair[1]);
            let id = schedule::fallback_game_id(season, week, away, home);
            let game = if week <= decided_weeks {
                let home_score = rng.gen_range(0..45);
                let away_score = rng.gen_range(0..45);
                GameOutcome::final_score(id, week, home, away, home_score, away_score)
            } else {
                GameOutcome::scheduled(id, week, home, away)
            };
            games.push(game.with_gameday(gameday.clone()));
        }
    }

    games
}
