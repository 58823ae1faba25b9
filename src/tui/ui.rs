use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use chrono::Local;
use crate::due::{due_status, DueStatus};
use super::app::{App, InputField, InputMode, ViewMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let header_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let highlight = Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray);

    match app.view_mode {
        ViewMode::Garage => {
            let data = app.garage.data();
            let rows: Vec<Row> = app
                .cars
                .iter()
                .map(|(name, car)| {
                    Row::new(vec![
                        Cell::from(name.clone()),
                        Cell::from(car.model_year.clone()),
                        Cell::from(if car.image_path.is_empty() { "-".to_string() } else { car.image_path.clone() }),
                        Cell::from(data.pending_for(name).len().to_string()),
                        Cell::from(data.history_for(name).len().to_string()),
                    ])
                })
                .collect();

            let widths = [
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Length(8),
            ];

            let table = Table::new(rows, widths)
                .header(Row::new(vec!["Name", "Year", "Image", "Pending", "Done"])
                    .style(header_style)
                    .bottom_margin(1))
                .block(Block::default().borders(Borders::ALL).title("carkeep - Garage"))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[0], &mut app.state);
        }
        ViewMode::Maintenance => {
            let today = Local::now().date_naive();

            let rows: Vec<Row> = app
                .pending
                .iter()
                .map(|r| {
                    let status = due_status(&r.task, today);
                    let style = match status {
                        DueStatus::Overdue(_) => Style::default().fg(Color::Red),
                        DueStatus::Today => Style::default().fg(Color::Yellow),
                        DueStatus::Upcoming(_) => Style::default().fg(Color::Green),
                        DueStatus::Done | DueStatus::Unscheduled => Style::default(),
                    };
                    Row::new(vec![
                        Cell::from(r.car.clone()),
                        Cell::from(r.index.to_string()),
                        Cell::from(r.task.task.clone()),
                        Cell::from(r.task.due_date.clone()),
                        Cell::from(status.label()),
                    ]).style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(16),
                Constraint::Length(4),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(12),
            ];

            let table = Table::new(rows, widths)
                .header(Row::new(vec!["Car", "#", "Task", "Due", "Time Left"])
                    .style(header_style)
                    .bottom_margin(1))
                .block(Block::default().borders(Borders::ALL).title("carkeep - Maintenance"))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[0], &mut app.state);
        }
        ViewMode::History => {
            let rows: Vec<Row> = app
                .history
                .iter()
                .map(|(car, t)| {
                    Row::new(vec![
                        Cell::from(car.clone()),
                        Cell::from(t.task.clone()),
                        Cell::from(t.due_date.clone()),
                        Cell::from(t.completion_date.clone().unwrap_or_default()),
                        Cell::from(t.note.clone().unwrap_or_default()),
                    ])
                })
                .collect();

            let widths = [
                Constraint::Length(16),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Min(20),
            ];

            let table = Table::new(rows, widths)
                .header(Row::new(vec!["Car", "Task", "Due", "Completed", "Note"])
                    .style(header_style)
                    .bottom_margin(1))
                .block(Block::default().borders(Borders::ALL).title("carkeep - History"))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[0], &mut app.state);
        }
    }

    let help_text = match (&app.message, &app.input_mode) {
        (Some(msg), InputMode::Normal) => msg.clone(),
        (_, InputMode::Normal) => match app.view_mode {
            ViewMode::Garage => "q: Quit | a: Add Car | e: Year | i: Image | d: Remove | r: Reload | v: View Maintenance",
            ViewMode::Maintenance => "q: Quit | a: Add Task | Space: Complete | r: Reload | v: View History",
            ViewMode::History => "q: Quit | r: Reload | v: View Garage",
        }.to_string(),
        (_, InputMode::Editing) => "Enter: Save | Esc: Cancel".to_string(),
        (_, InputMode::Adding) => "Enter: Next Step | Esc: Cancel".to_string(),
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    if app.input_mode == InputMode::Normal {
        return;
    }

    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);

    let title = match app.input_mode {
        InputMode::Adding => match (app.view_mode, app.add_state.step) {
            (ViewMode::Garage, 0) => "Add Car: Enter Name",
            (ViewMode::Garage, 1) => "Add Car: Enter Model Year",
            (ViewMode::Garage, _) => "Add Car: Image File (Optional)",
            (_, 0) => "Add Task: Enter Car",
            (_, 1) => "Add Task: Enter Task",
            (_, _) => "Add Task: Enter Due Date (YYYY-MM-DD)",
        },
        InputMode::Editing => match app.input_field {
            InputField::ModelYear => "Edit Model Year",
            InputField::Image => "Replace Image: File Path (Empty Keeps Current)",
            InputField::Note => "Complete Task: Note (Optional)",
            InputField::None => "Edit",
        },
        InputMode::Normal => "",
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
