use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::draft_order::DraftOrderEntry;
use crate::standings::StandingsEntry;
use crate::strength::ScheduleStrength;

pub struct ExportReport {
    pub teams: usize,
    pub opponent_lines: usize,
}

/// Write the projected board to an .xlsx workbook: the complete draft order,
/// the standings in team order, and the per-team SOS breakdown (one row per
/// matchup).
pub fn export_draft_board(
    path: &Path,
    order: &[DraftOrderEntry],
    entries: &[StandingsEntry],
    strength: &BTreeMap<String, ScheduleStrength>,
) -> Result<ExportReport> {
    let mut order_rows = vec![vec![
        "Pick".to_string(),
        "Team".to_string(),
        "W".to_string(),
        "L".to_string(),
        "T".to_string(),
        "Win %".to_string(),
        "SOS".to_string(),
    ]];
    for entry in order {
        order_rows.push(vec![
            entry.rank.to_string(),
            entry.team.clone(),
            entry.wins.to_string(),
            entry.losses.to_string(),
            entry.ties.to_string(),
            format!("{:.3}", entry.win_pct),
            format!("{:.3}", entry.sos),
        ]);
    }

    let mut standings_rows = vec![vec![
        "Team".to_string(),
        "W".to_string(),
        "L".to_string(),
        "T".to_string(),
        "Win %".to_string(),
        "SOS".to_string(),
    ]];
    for entry in entries {
        standings_rows.push(vec![
            entry.team.clone(),
            entry.wins.to_string(),
            entry.losses.to_string(),
            entry.ties.to_string(),
            format!("{:.3}", entry.win_pct),
            format!("{:.3}", entry.sos),
        ]);
    }

    let mut strength_rows = vec![vec![
        "Team".to_string(),
        "SOS".to_string(),
        "Opponent".to_string(),
        "Opp W".to_string(),
        "Opp L".to_string(),
        "Opp T".to_string(),
        "Opp G".to_string(),
    ]];
    for (team, detail) in strength {
        for line in &detail.opponents {
            strength_rows.push(vec![
                team.clone(),
                format!("{:.3}", detail.sos),
                line.team.clone(),
                line.wins.to_string(),
                line.losses.to_string(),
                line.ties.to_string(),
                line.games_played.to_string(),
            ]);
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("DraftOrder")?;
        write_rows(sheet, &order_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Standings")?;
        write_rows(sheet, &standings_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("StrengthDetail")?;
        write_rows(sheet, &strength_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        teams: order.len(),
        opponent_lines: strength_rows.len().saturating_sub(1),
    })
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
