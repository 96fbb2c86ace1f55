use std::collections::{BTreeSet, HashMap, VecDeque};
use std::env;

use rand::Rng;

use crate::draft_order::{self, DraftOrderEntry};
use crate::picks::{self, Pick};
use crate::schedule::{GameOutcome, GameStatus};
use crate::standings::{self, StandingsEntry};
use crate::strength::{self, ScheduleStrength};

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Board,
    Picks,
    TeamDetail,
}

/// Everything derived from one pipeline pass. Replaced wholesale on every
/// recompute; nothing in here is patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<StandingsEntry>,
    pub order: Vec<DraftOrderEntry>,
    pub strength: HashMap<String, ScheduleStrength>,
    pub final_games: usize,
    pub simulated_games: usize,
}

pub struct AppState {
    pub screen: Screen,
    pub schedule: Vec<GameOutcome>,
    pub teams: BTreeSet<String>,
    pub picks: HashMap<String, Pick>,
    pub snapshot: Snapshot,
    pub board_selected: usize,
    pub picks_selected: usize,
    pub detail_team: Option<String>,
    pub detail_scroll: u16,
    pub picks_shown: usize,
    pub season: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let picks_shown = env::var("DRAFT_PICKS_SHOWN")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(18)
            .max(1);
        let season = env::var("DRAFT_SEASON")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(2025);

        Self {
            screen: Screen::Board,
            schedule: Vec::new(),
            teams: BTreeSet::new(),
            picks: HashMap::new(),
            snapshot: Snapshot::default(),
            board_selected: 0,
            picks_selected: 0,
            detail_team: None,
            detail_scroll: 0,
            picks_shown,
            season,
            logs: VecDeque::with_capacity(MAX_LOG_LINES),
            help_overlay: false,
        }
    }

    /// Install a freshly loaded schedule: rebuild the team universe, drop
    /// picks that no longer point at an open game, recompute.
    pub fn set_schedule(&mut self, schedule: Vec<GameOutcome>) {
        self.teams = standings::team_universe(&schedule);
        self.schedule = schedule;
        let open: BTreeSet<&str> = self
            .schedule
            .iter()
            .filter(|game| game.status == GameStatus::Scheduled)
            .map(|game| game.id.as_str())
            .collect();
        let stale: Vec<String> = self
            .picks
            .keys()
            .filter(|id| !open.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.picks.remove(&id);
        }
        self.recompute();
    }

    /// One full pipeline pass over the current schedule and pick map. Every
    /// call starts from scratch; the core keeps no state between calls.
    pub fn recompute(&mut self) {
        let outcomes = picks::apply_picks(&self.schedule, &self.picks);
        let records = standings::aggregate(&self.teams, &outcomes);
        let strength = strength::compute_sos(&records);
        let entries = standings::standings_entries(&self.teams, &records, &strength);
        let order = draft_order::rank_draft_order(&entries);

        let final_games = outcomes
            .iter()
            .filter(|game| game.status == GameStatus::Final)
            .count();
        let simulated_games = outcomes.len() - final_games;

        self.snapshot = Snapshot {
            entries,
            order,
            strength,
            final_games,
            simulated_games,
        };

        self.board_selected = self
            .board_selected
            .min(self.snapshot.order.len().saturating_sub(1));
        self.picks_selected = self
            .picks_selected
            .min(self.open_games().len().saturating_sub(1));
    }

    /// Scheduled games still awaiting a pick or a real result, in schedule
    /// order.
    pub fn open_games(&self) -> Vec<&GameOutcome> {
        self.schedule
            .iter()
            .filter(|game| game.status == GameStatus::Scheduled)
            .collect()
    }

    pub fn pick_for(&self, game_id: &str) -> Pick {
        self.picks.get(game_id).copied().unwrap_or(Pick::Unresolved)
    }

    pub fn set_pick(&mut self, game_id: &str, pick: Pick) {
        if pick == Pick::Unresolved {
            self.picks.remove(game_id);
        } else {
            self.picks.insert(game_id.to_string(), pick);
        }
        self.recompute();
    }

    pub fn clear_picks(&mut self) {
        if self.picks.is_empty() {
            return;
        }
        self.picks.clear();
        self.recompute();
    }

    /// Fill every open game that has no pick yet with a random one. Home
    /// win, away win and tie are equally likely; existing picks stay.
    pub fn randomize_open_picks(&mut self) {
        let mut rng = rand::thread_rng();
        let unpicked: Vec<String> = self
            .open_games()
            .iter()
            .filter(|game| !self.picks.contains_key(&game.id))
            .map(|game| game.id.clone())
            .collect();
        for id in unpicked {
            let pick = match rng.gen_range(0..3) {
                0 => Pick::HomeWin,
                1 => Pick::AwayWin,
                _ => Pick::Tie,
            };
            self.picks.insert(id, pick);
        }
        self.recompute();
    }

    /// (picked, open) for the status line.
    pub fn pick_progress(&self) -> (usize, usize) {
        let open = self.open_games().len();
        (self.picks.len().min(open), open)
    }

    pub fn selected_order_entry(&self) -> Option<&DraftOrderEntry> {
        self.snapshot.order.get(self.board_selected)
    }

    pub fn selected_open_game_id(&self) -> Option<String> {
        self.open_games()
            .get(self.picks_selected)
            .map(|game| game.id.clone())
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Board => {
                let last = self.snapshot.order.len().saturating_sub(1);
                self.board_selected = (self.board_selected + 1).min(last);
            }
            Screen::Picks => {
                let last = self.open_games().len().saturating_sub(1);
                self.picks_selected = (self.picks_selected + 1).min(last);
            }
            Screen::TeamDetail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Board => self.board_selected = self.board_selected.saturating_sub(1),
            Screen::Picks => self.picks_selected = self.picks_selected.saturating_sub(1),
            Screen::TeamDetail => self.detail_scroll = self.detail_scroll.saturating_sub(1),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }
}
