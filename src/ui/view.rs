//! Dashboard rendering
//!
//! Layout, top to bottom:
//! - Header (title + subtitle)
//! - Search form (three field boxes)
//! - Button line and inline error/hint line
//! - Results table (or empty hint)
//! - Key help bar

use ratatui::style::Stylize;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::query::table::{results_heading, ResultRow, COLUMNS, EMPTY_RESULTS_HINT};
use crate::ui::state::{App, Field};

pub const TITLE: &str = "Medical Measurements Dashboard";
pub const SUBTITLE: &str = "Search stored blood pressure and heart rate measurements.";

const BUTTON_IDLE: &str = "Search";
const BUTTON_LOADING: &str = "Searching...";
const HELP: &str = "Enter search | Tab/Shift-Tab move | Ctrl+L clear | Esc quit";

/// Render the dashboard
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_form(f, app, chunks[1]);
    render_button(f, app, chunks[2]);
    render_status_line(f, app, chunks[3]);
    render_results(f, app, chunks[4]);

    let help = Paragraph::new(Span::styled(HELP, Style::default().fg(Color::DarkGray)));
    f.render_widget(help, chunks[5]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (field, rect) in Field::ALL.iter().zip(boxes.iter()) {
        render_field(f, app, *field, *rect);
    }
}

fn render_field(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focus() == field;
    let text = app.field_text(field);

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let content = if text.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text)
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let offset = text.chars().count().min(usize::from(area.width - 3)) as u16;
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}

fn render_button(f: &mut Frame, app: &App, area: Rect) {
    let loading = app.query_state().is_loading();
    let (label, style) = if loading {
        (BUTTON_LOADING, Style::default().fg(Color::DarkGray))
    } else {
        (
            BUTTON_IDLE,
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    };
    let line = Line::from(vec![
        Span::styled(format!("[ {} ]", label), style),
        Span::raw(" "),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(description) = app.query_state().error_description() {
        Line::from(Span::styled(
            format!("Error: {}", description),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(hint) = app.form_error() {
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let state = app.query_state();
    let results = state.results();
    let block = Block::default()
        .title(format!(" {} ", results_heading(results.len())))
        .borders(Borders::ALL);

    if results.is_empty() {
        let message = if state.is_loading() {
            Span::styled(BUTTON_LOADING, Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(EMPTY_RESULTS_HINT, Style::default().fg(Color::Gray))
        };
        f.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let header = Row::new(COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = results
        .iter()
        .map(|m| Row::new(ResultRow::from_measurement(m).cells))
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(19),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);
    f.render_widget(table, area);
}
