//! Ratatui-based terminal dashboard.
//!
//! The TUI provides a settings panel with the two dashboard controls (report
//! type and year), then renders the four bound charts in a 2×2 grid. Every
//! control change goes through the binding dispatch table.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::binding::{Dashboard, InputId, InputValue, Output};
use crate::data::DataFetcher;
use crate::domain::DashboardConfig;
use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::Figures;

mod plotters_chart;

pub use plotters_chart::{prepare, PlotData, SalesChart};

const TITLE: &str = "Automobile Sales Statistics Dashboard";

/// Start the TUI.
///
/// The dataset is loaded before the terminal switches to raw mode so a load
/// failure is reported like any other CLI error.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let fetcher = DataFetcher::new();
    let dataset = Arc::new(fetcher.load(&config.source)?);
    let mut app = App::new(config, fetcher, dataset)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Settings rows.
const FIELD_REPORT: usize = 0;
const FIELD_YEAR: usize = 1;

struct App {
    config: DashboardConfig,
    fetcher: DataFetcher,
    dashboard: Dashboard,
    figures: Option<Box<Figures>>,
    year_disabled: bool,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(config: DashboardConfig, fetcher: DataFetcher, dataset: Arc<crate::data::Dataset>) -> Result<Self, AppError> {
        if let Some(year) = config.year.filter(|&y| !dataset.contains_year(y)) {
            warn!("year {year} not in dataset, using default");
        }
        let dashboard = Dashboard::new(dataset, config.report, config.year);
        let outputs = dashboard.initial()?;

        let mut app = Self {
            config,
            fetcher,
            dashboard,
            figures: None,
            year_disabled: false,
            selected_field: FIELD_REPORT,
            status: "Ready.".to_string(),
        };
        app.apply_outputs(outputs);
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = FIELD_REPORT;
            }
            KeyCode::Down => {
                self.selected_field = FIELD_YEAR;
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_REPORT => {
                let next = self.dashboard.inputs().report.toggle();
                self.dispatch(InputId::Report, InputValue::Report(next));
            }
            FIELD_YEAR => {
                if self.year_disabled {
                    self.status = "Year selection is disabled for the recession report.".to_string();
                    return;
                }
                let years = self.dashboard.dataset().years();
                let current = self.dashboard.inputs().year;
                let idx = years.iter().position(|&y| y == current).unwrap_or(0);
                let next = if delta >= 0 {
                    (idx + 1).min(years.len() - 1)
                } else {
                    idx.saturating_sub(1)
                };
                let year = years[next];
                self.dispatch(InputId::Year, InputValue::Year(year));
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, input: InputId, value: InputValue) {
        match self.dashboard.dispatch(input, value) {
            Ok(outputs) => {
                self.apply_outputs(outputs);
                let inputs = self.dashboard.inputs();
                self.status = match input {
                    InputId::Report => format!("report: {}", inputs.report.display_name()),
                    InputId::Year => format!("year: {}", inputs.year),
                };
            }
            Err(err) => {
                self.status = format!("Error: {err}");
            }
        }
    }

    fn apply_outputs(&mut self, outputs: Vec<Output>) {
        for output in outputs {
            match output {
                Output::YearDisabled(disabled) => self.year_disabled = disabled,
                Output::Figures(figures) => self.figures = Some(figures),
            }
        }
    }

    fn export(&mut self) {
        let Some(figures) = &self.figures else {
            self.status = "Nothing to export.".to_string();
            return;
        };
        let inputs = self.dashboard.inputs();
        let result = crate::io::default_export_path(inputs.report, inputs.year)
            .and_then(|path| {
                crate::io::write_charts_json(&path, inputs.report, inputs.year, figures.as_slice())?;
                Ok(path)
            });
        self.status = match result {
            Ok(path) => format!("Wrote charts: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    /// Reload from the source and swap the shared dataset.
    fn reload(&mut self) {
        let dataset = match self.fetcher.load(&self.config.source) {
            Ok(dataset) => Arc::new(dataset),
            Err(err) => {
                self.status = format!("Reload failed: {err}");
                return;
            }
        };
        let rows = dataset.len();
        match self.dashboard.replace_dataset(dataset) {
            Ok(outputs) => {
                // No logging here: stderr shares the raw-mode alternate screen.
                self.apply_outputs(outputs);
                self.status = format!("Reloaded {rows} rows.");
            }
            Err(err) => {
                self.status = format!("Reload failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
        self.draw_grid(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dataset = self.dashboard.dataset();
        let years = dataset.years();
        let lines = vec![
            Line::from(Span::styled(
                TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "source: {} | rows: {} | recession rows: {} | years: {}–{}",
                    self.config.source,
                    dataset.len(),
                    dataset.recession_len(),
                    years[0],
                    years[years.len() - 1],
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let inputs = self.dashboard.inputs();

        let year_style = if self.year_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let year_label = if self.year_disabled {
            format!("Year: {} (disabled)", inputs.year)
        } else {
            format!("Year: {}", inputs.year)
        };

        let items = vec![
            ListItem::new(format!("Report: {}", inputs.report.display_name())),
            ListItem::new(year_label).style(year_style),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_grid(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let mut cells = Vec::with_capacity(4);
        for row in rows.iter() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            cells.extend(cols.iter().copied());
        }

        match &self.figures {
            Some(figures) => {
                for (spec, cell) in figures.iter().zip(cells) {
                    let block = Block::default().title(spec.title.as_str()).borders(Borders::ALL);
                    let inner = block.inner(cell);
                    frame.render_widget(block, cell);
                    frame.render_widget(Clear, inner);
                    frame.render_widget(SalesChart { spec }, inner);
                }
            }
            None => {
                let msg = Paragraph::new("Waiting for data...")
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(msg, area);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  x export  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
