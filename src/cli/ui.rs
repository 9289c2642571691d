use super::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, TableState, Tabs},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // tab strip
                Constraint::Min(3),    // collection table
                Constraint::Length(3), // form input or key help
                Constraint::Length(7), // message log
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    draw_entry(f, app, chunks[2]);
    draw_messages(f, app, chunks[3]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = app
        .console
        .stations()
        .iter()
        .map(|s| s.descriptor().title)
        .collect();

    let tabs = Tabs::new(titles).select(app.active).highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(tabs, area);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let station = app.active_station();
    let render = station.render();

    let header =
        Row::new(render.columns.clone()).style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = render
        .rows
        .iter()
        .map(|row| Row::new(row.cells.clone()))
        .collect();
    let widths = vec![Constraint::Min(10); render.columns.len()];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", station.descriptor().title)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    state.select((!render.rows.is_empty()).then_some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_entry(f: &mut Frame, app: &App, area: Rect) {
    match app.mode {
        Mode::Form { .. } => f.render_widget(&app.input, area),
        Mode::Browse => {
            let help =
                Paragraph::new("n new | e edit | d delete | r refresh | Tab switch | q quit")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL).title(" Keys "));
            f.render_widget(help, area);
        }
    }
}

fn draw_messages(f: &mut Frame, app: &App, area: Rect) {
    // Show only the last messages that fit inside the borders.
    let inner_height = area.height.saturating_sub(2) as usize;
    let skip_count = app.messages.len().saturating_sub(inner_height);

    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .skip(skip_count)
        .map(|line| ListItem::new(line.clone()))
        .collect();

    let panel = List::new(messages)
        .block(Block::default().borders(Borders::ALL).title(" Messages "))
        .style(Style::default().fg(Color::White));
    f.render_widget(panel, area);
}
