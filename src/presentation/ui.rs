use crate::application::{App, AppMode, FormField};
use crate::domain::{Cycle, CycleStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_timer(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "tomatui - Terminal Pomodoro | Cycles: {}",
        app.store.cycles().len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Timer");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let running = app
        .store
        .active_cycle()
        .filter(|cycle| !cycle.is_terminal());

    let Some(active) = running else {
        let idle = Paragraph::new("No cycle running - press n to start one")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(idle, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let task = Paragraph::new(active.task.clone()).style(Style::default().fg(Color::Yellow));
    f.render_widget(task, rows[0]);

    let remaining = app.remaining_seconds();
    let clock = Paragraph::new(format_clock(remaining)).style(
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(clock, rows[1]);

    let total = active.total_seconds();
    let elapsed = app.store.amount_seconds_passed().min(total);
    let ratio = if total == 0 {
        1.0
    } else {
        elapsed as f64 / total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{} min target", active.minutes_amount));
    f.render_widget(gauge, rows[2]);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Task").style(Style::default().fg(Color::Yellow)),
        Cell::from("Duration").style(Style::default().fg(Color::Yellow)),
        Cell::from("Started").style(Style::default().fg(Color::Yellow)),
        Cell::from("Status").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let visible_rows = area.height.saturating_sub(3) as usize;

    let mut rows = vec![header];
    // Newest first; insertion order in the store is oldest first.
    for cycle in app
        .store
        .cycles()
        .iter()
        .rev()
        .skip(app.history_scroll)
        .take(visible_rows)
    {
        rows.push(history_row(cycle));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(12),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("History"))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn history_row(cycle: &Cycle) -> Row<'static> {
    let (status_text, status_color) = match cycle.status() {
        CycleStatus::Finished => ("Finished", Color::Green),
        CycleStatus::Interrupted => ("Interrupted", Color::Red),
        CycleStatus::InProgress => ("In progress", Color::Yellow),
    };

    Row::new(vec![
        Cell::from(cycle.task.clone()),
        Cell::from(format!("{} min", cycle.minutes_amount)),
        Cell::from(cycle.start_date.format("%Y-%m-%d %H:%M").to_string()),
        Cell::from(status_text).style(Style::default().fg(status_color)),
    ])
    .height(1)
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "n: new cycle | i: interrupt | j/k: scroll history | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::NewCycle => {
            let (task_marker, minutes_marker) = match app.form_field {
                FormField::Task => (">", " "),
                FormField::Minutes => (" ", ">"),
            };
            format!(
                "{}Task: {} {}Minutes: {} (Tab to switch, Enter to start, Esc to cancel)",
                task_marker, app.task_input, minutes_marker, app.minutes_input
            )
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
            .to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::NewCycle => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "tomatui Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TOMATUI KEY REFERENCE

=== CYCLES ===
n               Start a new cycle (opens the task/minutes form)
i               Interrupt the running cycle
                A cycle finishes on its own when the target duration elapses

=== NEW-CYCLE FORM ===
Tab             Switch between the task and minutes fields
Enter           Start the cycle
Esc             Cancel without starting
Arrow keys      Move the cursor inside the focused field

Task and minutes are taken as typed: an empty task is allowed, and
minutes that fail to parse count as 0 (the cycle finishes immediately).

=== HISTORY ===
↑↓ or j/k       Scroll the history list (newest entries are at the top)

=== PERSISTENCE ===
The cycle history and the running cycle are saved to
"tomatui-cycles-state-1.0.0.json" after every change and restored on
start, so a countdown resumes where the wall clock says it should.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

=== GENERAL ===
F1 or ?         Show this help
q               Quit application"#
        .to_string()
}
