use super::prompts::TermInteract;
use super::ui;
use anyhow::Result;
use bistro_admin::{AdminConsole, EntityKind, MutationOutcome};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::io;
use tui_textarea::{CursorMove, TextArea};

#[derive(Debug, Clone, Copy)]
pub enum Mode {
    Browse,
    /// Editing one creation-form field; `field` indexes the form.
    Form { field: usize },
}

pub struct App<'a> {
    pub console: AdminConsole,
    /// Index of the active station (tab).
    pub active: usize,
    /// Row selection within the active table.
    pub selected: usize,
    pub mode: Mode,
    pub input: TextArea<'a>,
    pub messages: Vec<Line<'static>>,
    pub exit: bool,
}

impl<'a> App<'a> {
    pub fn new(console: AdminConsole) -> Self {
        Self {
            console,
            active: 0,
            selected: 0,
            mode: Mode::Browse,
            input: TextArea::default(),
            messages: vec![
                Line::from(vec![Span::styled(
                    "Welcome to the Bistro Admin console!",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from("Tab switches entity, 'n' creates, 'e' edits, 'd' deletes."),
                Line::from("--------------------------------------------------"),
            ],
            exit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match self.mode {
                        Mode::Form { field } => self.handle_form_key(field, key).await,
                        Mode::Browse => self.handle_browse_key(key, terminal).await,
                    }
                }
            }
            if self.exit {
                return Ok(());
            }
        }
    }

    async fn handle_browse_key<B: Backend>(&mut self, key: KeyEvent, terminal: &mut Terminal<B>) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
            KeyCode::Tab => self.switch_tab(1),
            KeyCode::BackTab => self.switch_tab(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('r') => self.refresh_active().await,
            KeyCode::Char('n') => self.open_form(),
            KeyCode::Char('e') => self.edit_selected(terminal).await,
            KeyCode::Char('d') => self.delete_selected(terminal).await,
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, field: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Closing the form keeps whatever was typed, like leaving a
                // half-filled page form.
                self.save_field(field);
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                self.save_field(field);
                let len = self.active_station().form().len();
                if field + 1 < len {
                    self.mode = Mode::Form { field: field + 1 };
                    self.load_field(field + 1);
                } else {
                    self.submit_form().await;
                }
            }
            _ => {
                self.input.input(key);
            }
        }
    }

    fn switch_tab(&mut self, step: isize) {
        let len = self.console.stations().len();
        if len == 0 {
            return;
        }
        let current = self.active as isize;
        self.active = (current + step).rem_euclid(len as isize) as usize;
        self.selected = 0;
    }

    fn move_selection(&mut self, step: isize) {
        let rows = self.active_station().render().rows.len();
        if rows == 0 {
            return;
        }
        let next = self.selected as isize + step;
        self.selected = next.clamp(0, rows as isize - 1) as usize;
    }

    async fn refresh_active(&mut self) {
        let station = &mut self.console.stations_mut()[self.active];
        let title = station.descriptor().title;
        let refreshed = station.refresh().await;
        self.clamp_selection();
        if refreshed {
            self.push_message(format!("{title} refreshed"));
        } else {
            self.push_error(format!("{title} refresh failed (see log)"));
        }
    }

    fn open_form(&mut self) {
        let station = &mut self.console.stations_mut()[self.active];
        if station.form().is_empty() {
            return;
        }
        if station.descriptor().kind == EntityKind::Order {
            let now = Local::now();
            let form = station.form_mut();
            form.prefill("order_date", now.format("%Y-%m-%d").to_string());
            form.prefill("order_time", now.format("%H:%M").to_string());
        }
        self.mode = Mode::Form { field: 0 };
        self.load_field(0);
    }

    async fn submit_form(&mut self) {
        let station = &mut self.console.stations_mut()[self.active];
        let noun = station.descriptor().noun;
        let outcome = station.submit_create().await;
        self.mode = Mode::Browse;
        self.clamp_selection();
        self.push_outcome(noun, "create", outcome);
    }

    async fn edit_selected<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let Some(id) = self.selected_row_id() else {
            self.push_message("no row selected");
            return;
        };
        let station = &mut self.console.stations_mut()[self.active];
        let noun = station.descriptor().noun;
        let outcome = {
            let mut prompts = TermInteract::new(terminal);
            station.update(id, &mut prompts).await
        };
        self.clamp_selection();
        self.push_outcome(noun, "update", outcome);
    }

    async fn delete_selected<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let Some(id) = self.selected_row_id() else {
            self.push_message("no row selected");
            return;
        };
        let station = &mut self.console.stations_mut()[self.active];
        let noun = station.descriptor().noun;
        let outcome = {
            let mut prompts = TermInteract::new(terminal);
            station.delete(id, &mut prompts).await
        };
        self.clamp_selection();
        self.push_outcome(noun, "delete", outcome);
    }

    pub fn active_station(&self) -> &bistro_admin::EntityStation {
        &self.console.stations()[self.active]
    }

    fn selected_row_id(&self) -> Option<i64> {
        self.active_station()
            .render()
            .rows
            .get(self.selected)
            .map(|row| row.id)
    }

    fn clamp_selection(&mut self) {
        let rows = self.active_station().render().rows.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn save_field(&mut self, field: usize) {
        let value = self.input.lines().first().cloned().unwrap_or_default();
        self.console.stations_mut()[self.active]
            .form_mut()
            .set_value(field, value);
    }

    fn load_field(&mut self, field: usize) {
        let station = self.active_station();
        let form_field = &station.form().fields()[field];
        let title = format!(
            " New {}: {} ({}/{}) ",
            station.descriptor().noun,
            form_field.label,
            field + 1,
            station.form().len()
        );

        let mut input = TextArea::new(vec![form_field.value.clone()]);
        input.move_cursor(CursorMove::End);
        input.set_block(
            ratatui::widgets::Block::default()
                .borders(ratatui::widgets::Borders::ALL)
                .title(title),
        );
        self.input = input;
    }

    fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(Line::from(text.into()));
    }

    fn push_error(&mut self, text: impl Into<String>) {
        self.messages.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(Color::Red),
        )));
    }

    fn push_outcome(&mut self, noun: &str, op: &str, outcome: MutationOutcome) {
        match outcome {
            MutationOutcome::Applied => self.push_message(format!("{noun} {op} applied")),
            MutationOutcome::Abandoned => self.messages.push(Line::from(Span::styled(
                format!("{noun} {op} abandoned"),
                Style::default().fg(Color::DarkGray),
            ))),
            MutationOutcome::Failed => self.push_error(format!("{noun} {op} failed (see log)")),
        }
    }
}
