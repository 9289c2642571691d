use bistro_admin::Interact;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Modal prompt drawn over the console.
///
/// Keys are read in a nested loop, so the rest of the interface is
/// suspended until the operator answers or cancels; one edit or delete
/// flow runs to completion at a time.
pub struct TermInteract<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
}

impl<'t, B: Backend> TermInteract<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>) -> Self {
        Self { terminal }
    }

    fn draw_prompt(&mut self, title: &str, body: Line<'static>, hint: &str) -> std::io::Result<()> {
        self.terminal.draw(|f| {
            let area = prompt_area(f.area());
            f.render_widget(Clear, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(1)].as_ref())
                .split(area);

            let panel = Paragraph::new(body).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {title} ")),
            );
            f.render_widget(panel, chunks[0]);

            let hint = Paragraph::new(hint.to_string()).style(Style::default().fg(Color::DarkGray));
            f.render_widget(hint, chunks[1]);
        })?;
        Ok(())
    }
}

impl<B: Backend> Interact for TermInteract<'_, B> {
    fn ask_text(&mut self, prompt: &str) -> Option<String> {
        let mut buffer = String::new();
        loop {
            let body = Line::from(vec![
                Span::raw(prompt.to_string()),
                Span::raw(" "),
                Span::styled(buffer.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]);
            if self
                .draw_prompt("Edit", body, "Enter to submit, Esc to cancel")
                .is_err()
            {
                return None;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Enter => return Some(buffer),
                    KeyCode::Esc => return None,
                    KeyCode::Backspace => {
                        buffer.pop();
                    }
                    KeyCode::Char(c) => buffer.push(c),
                    _ => {}
                },
                Ok(_) => {}
                Err(_) => return None,
            }
        }
    }

    fn ask_confirm(&mut self, message: &str) -> bool {
        loop {
            let body = Line::from(message.to_string());
            if self
                .draw_prompt("Confirm", body, "y to confirm, n or Esc to decline")
                .is_err()
            {
                return false;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(_) => return false,
            }
        }
    }
}

fn prompt_area(frame: Rect) -> Rect {
    let width = frame.width.min(64);
    let height = 4;
    Rect::new(
        frame.x + frame.width.saturating_sub(width) / 2,
        frame.y + frame.height.saturating_sub(height + 1),
        width,
        height.min(frame.height),
    )
}
