use draft26_terminal::draft_order::rank_draft_order;
use draft26_terminal::schedule::GameOutcome;
use draft26_terminal::standings::{StandingsEntry, aggregate, standings_entries, team_universe};
use draft26_terminal::strength::compute_sos;

fn entry(team: &str, win_pct: f64, sos: f64) -> StandingsEntry {
    StandingsEntry {
        team: team.to_string(),
        wins: 0,
        losses: 0,
        ties: 0,
        win_pct,
        sos,
    }
}

#[test]
fn three_team_scenario_orders_b_a_c() {
    let season = vec![
        GameOutcome::final_score("w1_B_A", 1, "A", "B", 30, 15),
        GameOutcome::final_score("w2_C_B", 2, "B", "C", 20, 20),
        GameOutcome::final_score("w3_A_C", 3, "C", "A", 24, 14),
    ];
    let teams = team_universe(&season);
    let records = aggregate(&teams, &season);
    let strength = compute_sos(&records);
    let entries = standings_entries(&teams, &records, &strength);
    let order = rank_draft_order(&entries);

    let ranked: Vec<(usize, &str)> = order
        .iter()
        .map(|e| (e.rank, e.team.as_str()))
        .collect();
    assert_eq!(ranked, vec![(1, "B"), (2, "A"), (3, "C")]);
}

#[test]
fn sos_breaks_win_pct_ties() {
    let entries = vec![
        entry("STRONGSCHED", 0.250, 0.700),
        entry("WEAKSCHED", 0.250, 0.300),
        entry("BOTTOM", 0.100, 0.500),
    ];
    let order = rank_draft_order(&entries);

    assert_eq!(order[0].team, "BOTTOM");
    assert_eq!(order[1].team, "WEAKSCHED");
    assert_eq!(order[2].team, "STRONGSCHED");
}

#[test]
fn equal_keys_preserve_input_order() {
    let entries = vec![
        entry("ZEBRA", 0.500, 0.500),
        entry("APEX", 0.500, 0.500),
        entry("MIDDLE", 0.500, 0.500),
    ];
    let order = rank_draft_order(&entries);

    let teams: Vec<&str> = order.iter().map(|e| e.team.as_str()).collect();
    assert_eq!(teams, vec!["ZEBRA", "APEX", "MIDDLE"]);
}

#[test]
fn ranking_is_complete_and_one_based() {
    let entries: Vec<StandingsEntry> = (0..32)
        .map(|i| entry(&format!("T{i:02}"), f64::from(i) / 32.0, 0.5))
        .collect();
    let order = rank_draft_order(&entries);

    assert_eq!(order.len(), 32);
    for (idx, slot) in order.iter().enumerate() {
        assert_eq!(slot.rank, idx + 1);
    }
}

#[test]
fn pipeline_output_is_deterministic() {
    let season = vec![
        GameOutcome::final_score("g1", 1, "A", "B", 21, 14),
        GameOutcome::final_score("g2", 1, "C", "D", 10, 10),
        GameOutcome::final_score("g3", 2, "B", "C", 3, 17),
        GameOutcome::final_score("g4", 2, "D", "A", 35, 31),
    ];

    let run = || {
        let teams = team_universe(&season);
        let records = aggregate(&teams, &season);
        let strength = compute_sos(&records);
        let entries = standings_entries(&teams, &records, &strength);
        rank_draft_order(&entries)
    };

    assert_eq!(run(), run());
}
