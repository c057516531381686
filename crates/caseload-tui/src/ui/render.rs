use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

use super::roster;
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(1), // Search line
            Constraint::Min(8),    // Roster
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_search_line(frame, app, chunks[1]);
    roster::render(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::EditingUnits | AppState::EditingMonths => render_edit_overlay(frame, app),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Caseload";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_search_line(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.state == AppState::Searching;
    let line = if searching || !app.query.search.is_empty() {
        let cursor = if searching { "▌" } else { "" };
        Line::from(vec![
            Span::styled(" Search: ", styles::muted_style()),
            Span::styled(format!("{}{}", app.query.search, cursor), styles::search_style()),
        ])
    } else {
        Line::from(Span::styled(" [/] Search by client name", styles::muted_style()))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let shortcuts = "[e]dit [s]witch mode [a]dd [x] delete [q]uit";

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None if summary.is_filtered() => {
            format!(" Showing {} of {} clients ", summary.shown, summary.total)
        }
        None => format!(" {} clients ", summary.total),
    };

    let over_text = if summary.over_allocated > 0 {
        format!("{} over allocated ", summary.over_allocated)
    } else {
        String::new()
    };

    let right_text = format!(" {} ", shortcuts);
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(over_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::styled(over_text, styles::over_allocated_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 26, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Caseload", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::section_style())),
        help_line("↑/↓ j/k", "Move selection"),
        help_line("PgUp/PgDn", "Move by a page"),
        help_line("Home/End", "First / last client"),
        help_line("/", "Search by name (Esc clears)"),
        Line::from(""),
        Line::from(Span::styled(" Sorting", styles::section_style())),
        help_line("n/c/d", "Name / clinician / assigned date"),
        help_line("u/m/t/l", "Units / mode / status / last updated"),
        help_line("", "Press again to reverse"),
        Line::from(""),
        Line::from(Span::styled(" Editing", styles::section_style())),
        help_line("e / M", "Edit units / months assigned"),
        help_line("s", "Switch annual / monthly"),
        help_line("[ / ]", "Previous / next status"),
        help_line("a / x", "Add / delete client"),
        help_line("i / o", "Import / export roster file"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let name = app
        .selected_client()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("   Delete ", styles::section_style()),
            Span::styled(name, styles::delete_target_style()),
            Span::styled("?", styles::section_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to delete, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_edit_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 8, frame.area());
    frame.render_widget(Clear, area);

    let (label, hint) = match app.state {
        AppState::EditingMonths => ("Months:", "1 to 12"),
        _ => match app.selected_client().and_then(|c| c.months_assigned()) {
            Some(_) => ("Hours: ", "0 or more"),
            None => ("Units: ", "0 to 960, whole units"),
        },
    };

    let name = app
        .selected_client()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(format!("  {}", name), styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} [", label), styles::muted_style()),
            Span::styled(format!("{:<8}▌", app.input_buffer), styles::selected_style()),
            Span::styled("]", styles::muted_style()),
        ]),
        Line::from(Span::styled(format!("  {}", hint), styles::muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Enter]", styles::help_key_style()),
            Span::styled(" save  ", styles::muted_style()),
            Span::styled("[Esc]", styles::help_key_style()),
            Span::styled(" cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
