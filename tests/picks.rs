use std::collections::HashMap;

use draft26_terminal::picks::{Pick, apply_picks, resolve_pick};
use draft26_terminal::schedule::{GameOutcome, GameStatus, ScoreLine};
use draft26_terminal::standings::{aggregate, team_universe};

fn scheduled(id: &str) -> GameOutcome {
    GameOutcome::scheduled(id, 15, "PHI", "DAL")
}

#[test]
fn home_pick_produces_home_win_margin() {
    let game = scheduled("g1");
    let resolved = resolve_pick(&game, Pick::HomeWin).expect("pick emits an outcome");

    assert_eq!(resolved.status, GameStatus::Simulated);
    let ScoreLine::Decided { home, away } = resolved.score else {
        panic!("simulated game must carry a score");
    };
    assert!(home > away);
    assert_eq!((home, away), (21, 10));
}

#[test]
fn away_pick_produces_away_win_margin() {
    let resolved = resolve_pick(&scheduled("g1"), Pick::AwayWin).expect("pick emits an outcome");
    assert_eq!(resolved.status, GameStatus::Simulated);
    assert_eq!(
        resolved.score,
        ScoreLine::Decided { home: 10, away: 21 }
    );
}

#[test]
fn tie_pick_produces_level_score() {
    let resolved = resolve_pick(&scheduled("g1"), Pick::Tie).expect("pick emits an outcome");
    assert_eq!(resolved.status, GameStatus::Simulated);
    assert_eq!(
        resolved.score,
        ScoreLine::Decided { home: 20, away: 20 }
    );
}

#[test]
fn final_games_pass_through_whatever_the_pick_says() {
    let game = GameOutcome::final_score("g1", 3, "KC", "LV", 17, 20);
    let resolved = resolve_pick(&game, Pick::HomeWin).expect("final games always survive");
    assert_eq!(resolved, game);
}

#[test]
fn unresolved_pick_emits_nothing() {
    assert!(resolve_pick(&scheduled("g1"), Pick::Unresolved).is_none());
}

#[test]
fn unresolved_games_leave_no_trace_in_standings() {
    let schedule = vec![
        GameOutcome::final_score("g1", 1, "PHI", "DAL", 28, 6),
        GameOutcome::scheduled("g2", 2, "DAL", "NYG"),
    ];
    let picks = HashMap::new();

    let outcomes = apply_picks(&schedule, &picks);
    assert_eq!(outcomes.len(), 1);

    let teams = team_universe(&schedule);
    let records = aggregate(&teams, &outcomes);

    let nyg = &records["NYG"];
    assert_eq!(nyg.games_played, 0);
    assert!(nyg.opponents.is_empty());
    // DAL played the decided game only; the open one never counted.
    assert_eq!(records["DAL"].games_played, 1);
    assert_eq!(records["DAL"].opponents, vec!["PHI".to_string()]);
}

#[test]
fn apply_picks_merges_results_and_hypotheticals() {
    let schedule = vec![
        GameOutcome::final_score("g1", 1, "PHI", "DAL", 28, 6),
        GameOutcome::scheduled("g2", 2, "DAL", "NYG"),
        GameOutcome::scheduled("g3", 2, "PHI", "WAS"),
    ];
    let mut picks = HashMap::new();
    picks.insert("g2".to_string(), Pick::AwayWin);

    let outcomes = apply_picks(&schedule, &picks);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, GameStatus::Final);
    assert_eq!(outcomes[1].status, GameStatus::Simulated);
    assert_eq!(outcomes[1].id, "g2");
}
