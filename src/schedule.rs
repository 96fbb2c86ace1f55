use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Score columns as ingested: both sides known, or not yet decided. A game
/// with only one reported score is Undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLine {
    Decided { home: u32, away: u32 },
    Undecided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Final,
    Scheduled,
    Simulated,
}

/// One schedule row. Status and score stay in lockstep: Final/Simulated carry
/// a Decided score, Scheduled an Undecided one. Built through the
/// constructors below and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub id: String,
    pub week: u16,
    pub gameday: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub score: ScoreLine,
    pub status: GameStatus,
}

impl GameOutcome {
    pub fn final_score(
        id: impl Into<String>,
        week: u16,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home: u32,
        away: u32,
    ) -> Self {
        Self {
            id: id.into(),
            week,
            gameday: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            score: ScoreLine::Decided { home, away },
            status: GameStatus::Final,
        }
    }

    pub fn scheduled(
        id: impl Into<String>,
        week: u16,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            week,
            gameday: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            score: ScoreLine::Undecided,
            status: GameStatus::Scheduled,
        }
    }

    /// A hypothetical result layered over a scheduled game. The score is a
    /// placeholder that only drives win/loss/tie classification.
    pub fn simulated(base: &GameOutcome, home: u32, away: u32) -> Self {
        Self {
            id: base.id.clone(),
            week: base.week,
            gameday: base.gameday.clone(),
            home_team: base.home_team.clone(),
            away_team: base.away_team.clone(),
            score: ScoreLine::Decided { home, away },
            status: GameStatus::Simulated,
        }
    }

    pub fn with_gameday(mut self, gameday: Option<String>) -> Self {
        self.gameday = gameday;
        self
    }

    pub fn is_decided(&self) -> bool {
        matches!(self.score, ScoreLine::Decided { .. })
    }
}

// Raw CSV row in the nflverse games shape. Everything beyond the matchup
// columns is optional so hand-rolled schedule files load too; unknown extra
// columns are ignored by the reader.
#[derive(Debug, Deserialize)]
struct RawScheduleRow {
    #[serde(default)]
    game_id: Option<String>,
    #[serde(default)]
    season: Option<u16>,
    #[serde(default)]
    game_type: Option<String>,
    week: u16,
    #[serde(default)]
    gameday: Option<String>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    home_score: Option<String>,
    #[serde(default)]
    away_score: Option<String>,
}

pub fn load_schedule(path: &Path, season: Option<u16>) -> Result<Vec<GameOutcome>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open schedule csv {}", path.display()))?;
    parse_schedule_csv(file, season)
}

/// Parse a schedule CSV into outcomes. Rows are filtered to the regular
/// season (when a `game_type` column exists) and to `season` (when both
/// sides carry one). A game with any unparseable score is Scheduled, never
/// an error.
pub fn parse_schedule_csv(reader: impl Read, season: Option<u16>) -> Result<Vec<GameOutcome>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut games = Vec::new();

    for result in csv_reader.deserialize::<RawScheduleRow>() {
        let row = result.context("malformed schedule csv row")?;
        if let Some(kind) = row.game_type.as_deref() {
            if !kind.trim().eq_ignore_ascii_case("REG") {
                continue;
            }
        }
        if let (Some(want), Some(got)) = (season, row.season) {
            if want != got {
                continue;
            }
        }
        games.push(outcome_from_row(row, season));
    }

    Ok(games)
}

fn outcome_from_row(row: RawScheduleRow, season: Option<u16>) -> GameOutcome {
    let home = parse_score(row.home_score.as_deref());
    let away = parse_score(row.away_score.as_deref());
    let id = match row.game_id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => fallback_game_id(
            row.season.or(season).unwrap_or(0),
            row.week,
            &row.away_team,
            &row.home_team,
        ),
    };

    let game = match (home, away) {
        (Some(home), Some(away)) => {
            GameOutcome::final_score(id, row.week, row.home_team, row.away_team, home, away)
        }
        _ => GameOutcome::scheduled(id, row.week, row.home_team, row.away_team),
    };
    game.with_gameday(row.gameday.filter(|d| !d.trim().is_empty()))
}

/// Identifier in the nflverse shape (`2025_01_DAL_PHI`) for files that lack a
/// game_id column.
pub fn fallback_game_id(season: u16, week: u16, away_team: &str, home_team: &str) -> String {
    format!("{season}_{week:02}_{away_team}_{home_team}")
}

// Blanks and junk coerce to "no score", which downgrades the row to
// Scheduled.
fn parse_score(raw: Option<&str>) -> Option<u32> {
    let s = raw?.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("na") {
        return None;
    }
    let value = s.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round() as u32)
}

/// Write outcomes back out in the same column shape `load_schedule` reads,
/// so a fetched season slice round-trips through the local file.
pub fn write_schedule_csv(path: &Path, season: u16, games: &[GameOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create schedule csv {}", path.display()))?;
    writer
        .write_record([
            "game_id",
            "season",
            "game_type",
            "week",
            "gameday",
            "home_team",
            "away_team",
            "home_score",
            "away_score",
        ])
        .context("write schedule header")?;

    for game in games {
        let (home_score, away_score) = match game.score {
            ScoreLine::Decided { home, away } => (home.to_string(), away.to_string()),
            ScoreLine::Undecided => (String::new(), String::new()),
        };
        let record = vec![
            game.id.clone(),
            season.to_string(),
            "REG".to_string(),
            game.week.to_string(),
            game.gameday.clone().unwrap_or_default(),
            game.home_team.clone(),
            game.away_team.clone(),
            home_score,
            away_score,
        ];
        writer.write_record(&record).context("write schedule row")?;
    }
    writer.flush().context("flush schedule csv")?;
    Ok(())
}
