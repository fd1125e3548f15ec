use crate::calc::{
    is_low_progress, season_for, time_remaining, year_progress_percent, DateFormatter, Season,
    TimeRemaining,
};
use crate::data::{FeatureFlags, FlagChange};
use crate::grid::model::GRID_ROWS;
use crate::grid::{day_of_year, DayClass, GridRenderer, GridSlot, GRID_COLS};
use crate::ui::scheduler::RefreshScheduler;
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDateTime};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Instant;

// Grid cell colors
const PAST_COLOR: Color = Color::DarkGray;
const FUTURE_COLOR: Color = Color::Gray;
const HOLIDAY_COLOR: Color = Color::Red;
const LONGEST_COLOR: Color = Color::Indexed(220); // gold
const SHORTEST_COLOR: Color = Color::Indexed(39); // sky blue
const OVERFLOW_COLOR: Color = Color::Indexed(236);
const DEFAULT_ACCENT: Color = Color::LightBlue;

const OPTION_LINES: u16 = 7;

/// Everything one render pass shows outside the grid, taken from one clock reading.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub now: NaiveDateTime,
    pub date_line: String,
    pub time_line: String,
    pub remaining: TimeRemaining,
    pub progress: f64,
    pub season: Option<Season>,
}

impl Snapshot {
    pub fn capture(now: NaiveDateTime, flags: &FeatureFlags, formatter: &DateFormatter) -> Self {
        Snapshot {
            now,
            date_line: formatter.date_line(now.date()),
            time_line: formatter.time_line(now, flags.show_milliseconds),
            remaining: time_remaining(now),
            progress: year_progress_percent(now),
            season: flags
                .style_season
                .then(|| season_for(now.date(), formatter.tag())),
        }
    }
}

pub struct App {
    flags: FeatureFlags,
    formatter: DateFormatter,
    renderer: GridRenderer,
    scheduler: RefreshScheduler,
    snapshot: Option<Snapshot>,
    /// Whether the options panel is expanded.
    options_open: bool,
}

impl App {
    pub fn new(flags: FeatureFlags, locale: &str) -> Self {
        let formatter = DateFormatter::new(locale);
        App {
            flags: flags.normalized(),
            renderer: GridRenderer::new(formatter.clone()),
            formatter,
            scheduler: RefreshScheduler::new(),
            snapshot: None,
            options_open: false,
        }
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Starts the refresh timer and paints the first frame's data.
    pub fn start(&mut self, instant: Instant, now: NaiveDateTime) {
        self.scheduler.set_cadence(&self.flags, instant);
        self.render_pass(now);
    }

    pub fn stop(&mut self) {
        self.scheduler.cancel();
    }

    /// Recomputes the date/time lines, countdown, progress and grid for `now`.
    pub fn render_pass(&mut self, now: NaiveDateTime) {
        self.snapshot = Some(Snapshot::capture(now, &self.flags, &self.formatter));
        self.renderer.render_grid(now, &self.flags);
    }

    /// Runs a render pass if the refresh timer is due. The clock is only read then.
    pub fn on_tick(&mut self, instant: Instant, clock: impl FnOnce() -> NaiveDateTime) -> bool {
        if !self.scheduler.poll(instant) {
            return false;
        }
        self.render_pass(clock());
        true
    }

    /// Returns true if the app should quit.
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        instant: Instant,
        now: NaiveDateTime,
    ) -> bool {
        let change = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('m') => {
                let on = !self.flags.show_milliseconds;
                self.flags.set_milliseconds(on)
            }
            KeyCode::Char('g') => {
                let on = !self.flags.show_grid;
                self.flags.set_grid(on)
            }
            KeyCode::Char('c') => {
                let on = !self.flags.show_circles;
                self.flags.set_circles(on)
            }
            KeyCode::Char('h') => {
                let on = !self.flags.show_holidays;
                self.flags.set_holidays(on)
            }
            KeyCode::Char('s') => {
                let on = !self.flags.show_solstice;
                self.flags.set_solstice(on)
            }
            KeyCode::Char('e') => {
                let on = !self.flags.style_season;
                self.flags.set_season(on)
            }
            KeyCode::Char('o') => {
                self.options_open = !self.options_open;
                return false;
            }
            _ => return false,
        };
        self.apply_change(change, instant, now);
        false
    }

    fn apply_change(&mut self, change: FlagChange, instant: Instant, now: NaiveDateTime) {
        match change {
            FlagChange::Unchanged => return,
            FlagChange::Cadence => self.scheduler.set_cadence(&self.flags, instant),
            FlagChange::Structural => self.renderer.invalidate(),
            FlagChange::Cosmetic => {}
        }
        // Toggles repaint immediately instead of waiting for the next tick.
        self.render_pass(now);
    }

    pub fn draw(&self, f: &mut Frame) {
        let snap = match &self.snapshot {
            Some(s) => s,
            None => {
                f.render_widget(Paragraph::new("Starting..."), f.area());
                return;
            }
        };
        let accent = accent_color(snap.season);

        let grid_height = if self.renderer.container().visible {
            GRID_ROWS as u16 + 3
        } else {
            0
        };
        let options_height = if self.options_open { OPTION_LINES + 2 } else { 1 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // date line
                Constraint::Length(1), // time line
                Constraint::Length(1), // spacer
                Constraint::Length(2), // countdown numbers + labels
                Constraint::Length(3), // progress gauge
                Constraint::Length(grid_height),
                Constraint::Length(options_height),
                Constraint::Min(0),
            ])
            .split(f.area());

        let date = Paragraph::new(Span::styled(
            snap.date_line.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(date, chunks[0]);
        f.render_widget(
            Paragraph::new(snap.time_line.clone()).alignment(Alignment::Center),
            chunks[1],
        );

        self.render_countdown(f, chunks[3], snap, accent);
        render_progress(f, chunks[4], snap.progress, accent);
        if grid_height > 0 {
            self.render_grid(f, chunks[5], snap, accent);
        }
        self.render_options(f, chunks[6]);
    }

    fn render_countdown(&self, f: &mut Frame, area: Rect, snap: &Snapshot, accent: Color) {
        let label_style = if is_low_progress(snap.progress) {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let units = countdown_units(&snap.remaining, self.flags.show_milliseconds);
        let numbers: Vec<Span> = units
            .iter()
            .map(|(n, _)| {
                Span::styled(
                    format!("{n:^10}"),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        let labels: Vec<Span> = units
            .iter()
            .map(|(_, l)| Span::styled(format!("{l:^10}"), label_style))
            .collect();
        let p = Paragraph::new(vec![Line::from(numbers), Line::from(labels)])
            .alignment(Alignment::Center);
        f.render_widget(p, area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect, snap: &Snapshot, accent: Color) {
        let container = self.renderer.container();
        let slots: Vec<GridSlot> = self.renderer.slots().collect();

        let mut lines: Vec<Line> = slots
            .chunks(GRID_COLS)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|slot| {
                            let (class, overflow) = match slot {
                                GridSlot::Day(cell) => (cell.class(), false),
                                GridSlot::Overflow => (None, true),
                            };
                            Span::styled(
                                format!("{} ", cell_symbol(container.circles, overflow)),
                                grid_cell_style(class, accent),
                            )
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let today = self
            .renderer
            .cells()
            .get(day_of_year(snap.now))
            .map(|c| c.tooltip().to_string())
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("Today: {today}"),
            Style::default().fg(Color::Gray),
        )));

        let title = match self.renderer.rendered_year() {
            Some(year) => format!(" {year} "),
            None => format!(" {} ", snap.now.year()),
        };
        let grid = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(grid, area);
    }

    fn render_options(&self, f: &mut Frame, area: Rect) {
        if !self.options_open {
            let hint = Paragraph::new(Span::styled(
                "▸ Options (o)   Quit (q)",
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(hint, area);
            return;
        }
        let mut lines: Vec<Line> = option_rows(&self.flags)
            .into_iter()
            .map(|(key, label, checked, enabled)| {
                let mark = if checked { "[x]" } else { "[ ]" };
                let style = if enabled {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                Line::from(Span::styled(format!(" {mark} {key}  {label}"), style))
            })
            .collect();
        lines.push(Line::from(Span::styled(
            refresh_label(&self.scheduler),
            Style::default().fg(Color::DarkGray),
        )));
        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ▾ Options (o to close) "),
        );
        f.render_widget(panel, area);
    }
}

fn render_progress(f: &mut Frame, area: Rect, percent: f64, accent: Color) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Year progress "))
        .gauge_style(Style::default().fg(accent))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{percent:.2}%"));
    f.render_widget(gauge, area);
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    app.start(Instant::now(), Local::now().naive_local());
    loop {
        terminal.draw(|f| app.draw(f))?;
        let timeout = app.scheduler().time_until_next(Instant::now());
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && app.handle_key(
                        key.code,
                        key.modifiers,
                        Instant::now(),
                        Local::now().naive_local(),
                    )
                {
                    break;
                }
            }
        }
        app.on_tick(Instant::now(), || Local::now().naive_local());
    }
    app.stop();
    Ok(())
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

/// Countdown number/label pairs; the ms unit only appears when enabled.
pub(crate) fn countdown_units(t: &TimeRemaining, show_ms: bool) -> Vec<(String, &'static str)> {
    let mut units = vec![
        (t.days.to_string(), "Days"),
        (format!("{:02}", t.hours), "Hours"),
        (format!("{:02}", t.minutes), "Minutes"),
        (format!("{:02}", t.seconds), "Seconds"),
    ];
    if show_ms {
        units.push((format!("{:03}", t.milliseconds), "ms"));
    }
    units
}

pub(crate) fn refresh_label(scheduler: &RefreshScheduler) -> String {
    if scheduler.is_running() {
        format!("     refresh every {} ms", scheduler.tick_period().as_millis())
    } else {
        "     refresh paused".to_string()
    }
}

/// (key, label, checked, enabled) for each entry of the options panel.
pub(crate) fn option_rows(flags: &FeatureFlags) -> Vec<(char, &'static str, bool, bool)> {
    vec![
        ('m', "Show milliseconds", flags.show_milliseconds, true),
        ('e', "Seasonal colors", flags.style_season, true),
        ('g', "Show year grid", flags.show_grid, true),
        ('c', "Circles", flags.show_circles, flags.show_grid),
        ('h', "Holidays", flags.show_holidays, flags.show_grid),
        ('s', "Solstices", flags.show_solstice, flags.show_grid),
    ]
}

pub(crate) fn accent_color(season: Option<Season>) -> Color {
    match season {
        Some(Season::Spring) => Color::Green,
        Some(Season::Summer) => Color::Yellow,
        Some(Season::Autumn) => Color::Indexed(208), // orange
        Some(Season::Winter) => Color::Cyan,
        None => DEFAULT_ACCENT,
    }
}

pub(crate) fn cell_symbol(circles: bool, overflow: bool) -> &'static str {
    if overflow {
        "·"
    } else if circles {
        "●"
    } else {
        "■"
    }
}

/// Style for a grid cell; `None` is an overflow placeholder.
pub(crate) fn grid_cell_style(class: Option<DayClass>, accent: Color) -> Style {
    match class {
        None => Style::default().fg(OVERFLOW_COLOR),
        Some(DayClass::Past) => Style::default().fg(PAST_COLOR),
        Some(DayClass::Today) => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        Some(DayClass::Future) => Style::default().fg(FUTURE_COLOR),
        Some(DayClass::Holiday) => Style::default()
            .fg(HOLIDAY_COLOR)
            .add_modifier(Modifier::BOLD),
        Some(DayClass::LongestDay) => Style::default()
            .fg(LONGEST_COLOR)
            .add_modifier(Modifier::BOLD),
        Some(DayClass::ShortestDay) => Style::default()
            .fg(SHORTEST_COLOR)
            .add_modifier(Modifier::BOLD),
    }
}
