use draft26_terminal::schedule::GameOutcome;
use draft26_terminal::standings::{aggregate, standings_entries, team_universe};
use draft26_terminal::strength::compute_sos;

fn decided(id: &str, week: u16, home: &str, away: &str, home_score: u32, away_score: u32) -> GameOutcome {
    GameOutcome::final_score(id, week, home, away, home_score, away_score)
}

fn open_game(id: &str, week: u16, home: &str, away: &str) -> GameOutcome {
    GameOutcome::scheduled(id, week, home, away)
}

// Week 1: A beats B. Week 2: B and C tie. Week 3: C beats A.
fn three_team_season() -> Vec<GameOutcome> {
    vec![
        decided("w1_B_A", 1, "A", "B", 30, 15),
        decided("w2_C_B", 2, "B", "C", 20, 20),
        decided("w3_A_C", 3, "C", "A", 24, 14),
    ]
}

#[test]
fn wins_and_ties_are_conserved() {
    let season = vec![
        decided("g1", 1, "A", "B", 21, 14),
        decided("g2", 1, "C", "D", 10, 10),
        decided("g3", 2, "B", "C", 3, 17),
        decided("g4", 2, "D", "A", 28, 28),
        open_game("g5", 3, "A", "C"),
    ];
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);

    let total_wins: u32 = records.values().map(|r| r.wins).sum();
    let total_ties: u32 = records.values().map(|r| r.ties).sum();
    let total_games: u32 = records.values().map(|r| r.games_played).sum();

    // 2 decided non-tied games, 2 tied games, 4 decided games total.
    assert_eq!(total_wins, 2);
    assert_eq!(total_ties, 4);
    assert_eq!(total_games, 8);
}

#[test]
fn zero_game_team_scores_zero() {
    let mut season = three_team_season();
    // D appears only in a game that never got played.
    season.push(open_game("w4_D_A", 4, "A", "D"));

    let teams = team_universe(&season);
    assert!(teams.contains("D"));

    let records = aggregate(&teams, &season);
    let strength = compute_sos(&records);

    let d = records.get("D").expect("D must still get a record");
    assert_eq!(d.games_played, 0);
    assert_eq!(d.win_pct(), 0.0);
    assert!(d.opponents.is_empty());
    assert_eq!(strength.get("D").expect("D gets a strength row").sos, 0.0);
}

#[test]
fn three_team_scenario_matches_expected_standings() {
    let season = three_team_season();
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);
    let strength = compute_sos(&records);

    let a = &records["A"];
    assert_eq!((a.wins, a.losses, a.ties), (1, 1, 0));
    assert!((a.win_pct() - 0.500).abs() < f64::EPSILON);
    assert!((strength["A"].sos - 0.500).abs() < f64::EPSILON);

    let b = &records["B"];
    assert_eq!((b.wins, b.losses, b.ties), (0, 1, 1));
    assert!((b.win_pct() - 0.250).abs() < f64::EPSILON);
    assert!((strength["B"].sos - 0.625).abs() < f64::EPSILON);

    let c = &records["C"];
    assert_eq!((c.wins, c.losses, c.ties), (1, 0, 1));
    assert!((c.win_pct() - 0.750).abs() < f64::EPSILON);
    assert!((strength["C"].sos - 0.375).abs() < f64::EPSILON);
}

#[test]
fn rematches_double_opponent_weight() {
    let season = vec![
        decided("g1", 1, "A", "B", 20, 10),
        decided("g2", 2, "B", "A", 13, 6),
        decided("g3", 3, "B", "C", 31, 0),
    ];
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);

    let a_opponents = &records["A"].opponents;
    assert_eq!(a_opponents.iter().filter(|o| o.as_str() == "B").count(), 2);

    // B is 2-1 over 3 games; A faced B twice, so A's SOS is exactly B's
    // win pct, counted through both meetings: (2+2) / (3+3).
    let strength = compute_sos(&records);
    assert!((strength["A"].sos - 4.0 / 6.0).abs() < f64::EPSILON);
    assert_eq!(strength["A"].opponents.len(), 2);
}

#[test]
fn opponent_totals_include_games_against_the_subject() {
    // A's only opponent is B, and B's only win came against A. That win
    // still counts toward A's SOS.
    let season = vec![decided("g1", 1, "B", "A", 27, 3)];
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);
    let strength = compute_sos(&records);

    assert!((strength["A"].sos - 1.0).abs() < f64::EPSILON);
    assert!((strength["B"].sos - 0.0).abs() < f64::EPSILON);
}

#[test]
fn empty_schedule_yields_zeroed_complete_standings() {
    let season = vec![
        open_game("g1", 1, "A", "B"),
        open_game("g2", 1, "C", "D"),
    ];
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);
    let strength = compute_sos(&records);
    let entries = standings_entries(&teams, &records, &strength);

    assert_eq!(entries.len(), 4);
    for entry in &entries {
        assert_eq!((entry.wins, entry.losses, entry.ties), (0, 0, 0));
        assert_eq!(entry.win_pct, 0.0);
        assert_eq!(entry.sos, 0.0);
    }
}
