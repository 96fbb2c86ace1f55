use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use draft26_terminal::export;
use draft26_terminal::persist;
use draft26_terminal::picks::Pick;
use draft26_terminal::sample;
use draft26_terminal::schedule;
use draft26_terminal::schedule_fetch;
use draft26_terminal::state::{AppState, Screen};

const DEFAULT_SCHEDULE_CSV: &str = "nfl_schedule_2025.csv";
const SAMPLE_WEEKS: u16 = 18;
const SAMPLE_DECIDED_WEEKS: u16 = 12;

struct App {
    state: AppState,
    schedule_path: PathBuf,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let schedule_path = std::env::var("SCHEDULE_CSV")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEDULE_CSV.to_string());
        Self {
            state: AppState::new(),
            schedule_path: PathBuf::from(schedule_path),
            should_quit: false,
        }
    }

    fn load_schedule(&mut self) {
        let season = self.state.season;
        match schedule::load_schedule(&self.schedule_path, Some(season)) {
            Ok(games) => {
                let loaded = games.len();
                self.state.set_schedule(games);
                self.state.push_log(format!(
                    "[INFO] Loaded {loaded} games from {}",
                    self.schedule_path.display()
                ));
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Schedule load failed: {err}"));
                self.state
                    .set_schedule(sample::sample_schedule(season, SAMPLE_WEEKS, SAMPLE_DECIDED_WEEKS));
                self.state
                    .push_log("[INFO] Using a generated demo season (f fetches the real one)");
            }
        }
    }

    fn fetch_schedule(&mut self) {
        let url = schedule_fetch::schedule_url();
        self.state.push_log(format!("[INFO] Fetching schedule from {url}"));
        match schedule_fetch::download_schedule(&url, self.state.season, &self.schedule_path) {
            Ok(count) => {
                self.state.push_log(format!(
                    "[INFO] Wrote {count} games to {}",
                    self.schedule_path.display()
                ));
                self.load_schedule();
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Schedule fetch failed: {err}"));
            }
        }
    }

    fn export_board(&mut self) {
        let path = PathBuf::from(format!("draft_board_{}.xlsx", self.state.season));
        let strength: BTreeMap<_, _> = self
            .state
            .snapshot
            .strength
            .iter()
            .map(|(team, detail)| (team.clone(), detail.clone()))
            .collect();
        match export::export_draft_board(
            &path,
            &self.state.snapshot.order,
            &self.state.snapshot.entries,
            &strength,
        ) {
            Ok(report) => {
                self.state.push_log(format!(
                    "[INFO] Exported {} teams / {} opponent lines to {}",
                    report.teams,
                    report.opponent_lines,
                    path.display()
                ));
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }

    fn apply_pick(&mut self, pick: Pick) {
        let Some(game_id) = self.state.selected_open_game_id() else {
            self.state.push_log("[INFO] No open game selected");
            return;
        };
        self.state.set_pick(&game_id, pick);
        persist::save_picks(self.state.season, &self.state.picks);
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                persist::save_picks(self.state.season, &self.state.picks);
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('1') => self.state.screen = Screen::Board,
            KeyCode::Char('2') | KeyCode::Char('p') => self.state.screen = Screen::Picks,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('d') | KeyCode::Enter if self.state.screen == Screen::Board => {
                if let Some(entry) = self.state.selected_order_entry() {
                    self.state.detail_team = Some(entry.team.clone());
                    self.state.detail_scroll = 0;
                    self.state.screen = Screen::TeamDetail;
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Board,
            KeyCode::Char('e') => self.export_board(),
            KeyCode::Char('r') => self.load_schedule(),
            KeyCode::Char('f') => self.fetch_schedule(),
            KeyCode::Char('h') if self.state.screen == Screen::Picks => {
                self.apply_pick(Pick::HomeWin);
            }
            KeyCode::Char('a') if self.state.screen == Screen::Picks => {
                self.apply_pick(Pick::AwayWin);
            }
            KeyCode::Char('t') if self.state.screen == Screen::Picks => {
                self.apply_pick(Pick::Tie);
            }
            KeyCode::Char('u') | KeyCode::Backspace if self.state.screen == Screen::Picks => {
                self.apply_pick(Pick::Unresolved);
            }
            KeyCode::Char('c') if self.state.screen == Screen::Picks => {
                self.state.clear_picks();
                persist::save_picks(self.state.season, &self.state.picks);
                self.state.push_log("[INFO] Cleared all picks");
            }
            KeyCode::Char('R') if self.state.screen == Screen::Picks => {
                self.state.randomize_open_picks();
                persist::save_picks(self.state.season, &self.state.picks);
                self.state.push_log("[INFO] Randomized remaining picks");
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut app = App::new();
    app.state.picks = persist::load_picks(app.state.season);
    app.load_schedule();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Board => render_board(frame, chunks[1], &app.state),
        Screen::Picks => render_picks(frame, chunks[1], &app.state),
        Screen::TeamDetail => render_detail(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let (picked, open) = state.pick_progress();
    let title = match state.screen {
        Screen::Board => "DRAFT BOARD",
        Screen::Picks => "PICK SHEET",
        Screen::TeamDetail => "SCHEDULE STRENGTH",
    };
    let line1 = format!("  __  {title} | Season {}", state.season);
    let line2 = format!(
        " |__| Final {} | Simulated {} | Picks {picked}/{open}",
        state.snapshot.final_games, state.snapshot.simulated_games
    );
    let line3 = format!(
        " |  | Worst first: low Win % then low SOS | Top {} highlighted",
        state.picks_shown
    );
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Board => {
            "1 Board | 2 Picks | Enter/d Detail | j/k Move | e Export | r Reload | f Fetch | ? Help | q Quit"
                .to_string()
        }
        Screen::Picks => {
            "h Home | a Away | t Tie | u Unset | R Random rest | c Clear | j/k Move | b Board | q Quit"
                .to_string()
        }
        Screen::TeamDetail => "b/Esc Board | j/k Scroll | e Export | ? Help | q Quit".to_string(),
    }
}

fn board_columns() -> [Constraint; 5] {
    [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(8),
    ]
}

fn render_board(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = board_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Pick", bold);
    render_cell_text(frame, cols[1], "Team", bold);
    render_cell_text(frame, cols[2], "W-L-T", bold);
    render_cell_text(frame, cols[3], "Win %", bold);
    render_cell_text(frame, cols[4], "SOS", bold);

    let list_area = sections[1];
    let order = &state.snapshot.order;
    if order.is_empty() {
        let empty =
            Paragraph::new("No teams yet - r reloads the schedule").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.board_selected, order.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let entry = &order[idx];
        let selected = idx == state.board_selected;
        let mut row_style = if entry.rank <= state.picks_shown {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        if selected {
            row_style = row_style.bg(Color::DarkGray);
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let record = format!("{}-{}-{}", entry.wins, entry.losses, entry.ties);
        render_cell_text(frame, cols[0], &entry.rank.to_string(), row_style);
        render_cell_text(frame, cols[1], &entry.team, row_style);
        render_cell_text(frame, cols[2], &record, row_style);
        render_cell_text(frame, cols[3], &format!("{:.3}", entry.win_pct), row_style);
        render_cell_text(frame, cols[4], &format!("{:.3}", entry.sos), row_style);
    }
}

fn picks_columns() -> [Constraint; 4] {
    [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(12),
    ]
}

fn render_picks(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = picks_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Week", bold);
    render_cell_text(frame, cols[1], "Date", bold);
    render_cell_text(frame, cols[2], "Matchup", bold);
    render_cell_text(frame, cols[3], "Pick", bold);

    let list_area = sections[1];
    let open = state.open_games();
    if open.is_empty() {
        let empty = Paragraph::new("Season complete - nothing left to pick")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.picks_selected, open.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let game = open[idx];
        let selected = idx == state.picks_selected;
        let row_style = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let pick = state.pick_for(&game.id);
        let pick_style = row_style.fg(match pick {
            Pick::HomeWin => Color::Green,
            Pick::AwayWin => Color::Red,
            Pick::Tie => Color::Yellow,
            Pick::Unresolved => Color::DarkGray,
        });
        let matchup = format!("{} at {}", game.away_team, game.home_team);

        render_cell_text(frame, cols[0], &game.week.to_string(), row_style);
        render_cell_text(frame, cols[1], &format_gameday(game.gameday.as_deref()), row_style);
        render_cell_text(frame, cols[2], &matchup, row_style);
        render_cell_text(frame, cols[3], pick.label(), pick_style);
    }
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(team) = state.detail_team.as_deref() else {
        let empty = Paragraph::new("No team selected").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = Vec::new();
    if let Some(entry) = state.snapshot.entries.iter().find(|e| e.team == team) {
        lines.push(format!(
            "{team}  {}-{}-{}  Win % {:.3}  SOS {:.3}",
            entry.wins, entry.losses, entry.ties, entry.win_pct, entry.sos
        ));
    } else {
        lines.push(team.to_string());
    }
    lines.push(String::new());
    lines.push("Opponents faced (season totals, rematches listed twice):".to_string());

    match state.snapshot.strength.get(team) {
        Some(detail) if !detail.opponents.is_empty() => {
            for line in &detail.opponents {
                lines.push(format!(
                    "  {:<4} {}-{}-{} over {} games",
                    line.team, line.wins, line.losses, line.ties, line.games_played
                ));
            }
        }
        _ => lines.push("  No decided games yet".to_string()),
    }

    let body = Paragraph::new(lines.join("\n"))
        .scroll((state.detail_scroll, 0))
        .block(Block::default().title(format!("{team} schedule")).borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn format_gameday(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "TBD".to_string();
    };
    let cleaned = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return date.format("%b %d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%m/%d/%Y") {
        return date.format("%b %d").to_string();
    }
    cleaned.to_string()
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Draft Terminal - Help",
        "",
        "Global:",
        "  1            Draft board",
        "  2 / p        Pick sheet",
        "  Enter / d    Team schedule detail",
        "  b / Esc      Back to board",
        "  e            Export board to .xlsx",
        "  r            Reload schedule csv",
        "  f            Fetch published schedule",
        "  ?            Toggle help",
        "  q            Quit (picks are saved)",
        "",
        "Pick sheet:",
        "  h / a / t    Home win / Away win / Tie",
        "  u / Bksp     Unset pick",
        "  R            Randomize remaining",
        "  c            Clear all picks",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
