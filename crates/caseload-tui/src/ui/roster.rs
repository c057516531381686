use caseload_core::utils::truncate;
use caseload_core::{RosterRow, SortField, UnitsMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Width of the usage bar in cells.
const BAR_WIDTH: usize = 10;

/// Longest name shown before truncating.
const MAX_NAME_CHARS: usize = 24;

/// Render the roster - table with sortable columns and a detail pane
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(area);

    let rows = app.rows();
    render_table(frame, app, &rows, chunks[0]);
    render_detail(frame, rows.get(app.selection), chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, rows: &[RosterRow<'_>], area: Rect) {
    let sort = app.query.sort;
    let header_cells: Vec<Cell> = SortField::ALL
        .iter()
        .map(|field| Cell::from(format!("{} {}", field.label(), sort.indicator_for(*field))))
        .chain(std::iter::once(Cell::from("Usage")))
        .collect();

    let header = Row::new(header_cells).style(styles::title_style()).height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let client = row.client;
            let over = row.utilization.is_over_allocated();
            let style = if i == app.selection {
                styles::selected_style()
            } else if over {
                styles::over_allocated_style()
            } else {
                styles::client_row_style()
            };

            let mode = match client.units_mode() {
                UnitsMode::Annual => "Annual",
                UnitsMode::Monthly => "Monthly",
            };

            Row::new(vec![
                Cell::from(truncate(&client.name, MAX_NAME_CHARS)),
                Cell::from(client.clinician.clone()),
                Cell::from(client.assigned_date_str()),
                Cell::from(client.units_display()),
                Cell::from(mode),
                Cell::from(Span::styled(
                    client.status.label(),
                    styles::status_style(client.status),
                )),
                Cell::from(client.last_updated_str()),
                Cell::from(usage_line(row)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(3),    // Name
        Constraint::Fill(2),    // Clinician
        Constraint::Length(12), // Assigned
        Constraint::Length(14), // Units
        Constraint::Length(8),  // Mode
        Constraint::Fill(3),    // Status
        Constraint::Length(13), // Last updated
        Constraint::Length(19), // Usage
    ];

    let sort_help = "[n]ame [c]linician [d]ate [u]nits [m]ode s[t]atus [l]ast";
    let title = if app.query.search.is_empty() {
        format!(" Clients ({}) - {} ", rows.len(), sort_help)
    } else {
        format!(
            " Clients ({} of {}) - {} ",
            rows.len(),
            app.store.clients().len(),
            sort_help
        )
    };

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(app.selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// `████░░░░░░  42.0%` with the bar clamped at full and the percentage not.
fn usage_line(row: &RosterRow<'_>) -> Line<'static> {
    let filled = usage_cells(row.utilization.bar_percent());
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let style = styles::utilization_style(row.utilization.percent());
    Line::from(vec![
        Span::styled(bar, style),
        Span::styled(format!("{:>7}", row.utilization.to_string()), style),
    ])
}

/// Filled cells for a bar percentage in `[0, 100]`.
fn usage_cells(bar_percent: f64) -> usize {
    ((bar_percent / 100.0) * BAR_WIDTH as f64).round() as usize
}

fn render_detail(frame: &mut Frame, row: Option<&RosterRow<'_>>, area: Rect) {
    let content = match row {
        Some(row) => {
            let client = row.client;
            let usage_style = styles::utilization_style(row.utilization.percent());
            let mut lines = vec![
                Line::from(Span::styled(client.name.clone(), styles::title_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Clinician: ", styles::muted_style()),
                    Span::raw(client.clinician.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Assigned:  ", styles::muted_style()),
                    Span::raw(client.assigned_date_str()),
                ]),
                Line::from(vec![
                    Span::styled("Status:    ", styles::muted_style()),
                    Span::styled(client.status.label(), styles::status_style(client.status)),
                ]),
                Line::from(""),
                Line::from(Span::styled("Allocation", styles::section_style())),
                Line::from(vec![
                    Span::styled("Mode:      ", styles::muted_style()),
                    Span::raw(client.allocation.to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Used:      ", styles::muted_style()),
                    Span::raw(client.units_display()),
                ]),
                Line::from(vec![
                    Span::styled("Capacity:  ", styles::muted_style()),
                    Span::raw(format!("{}", client.capacity())),
                ]),
                Line::from(vec![
                    Span::styled("Remaining: ", styles::muted_style()),
                    Span::styled(format!("{}", client.remaining_units()), usage_style),
                ]),
                Line::from(vec![
                    Span::styled("Usage:     ", styles::muted_style()),
                    Span::styled(row.utilization.to_string(), usage_style),
                ]),
            ];

            if row.utilization.is_over_allocated() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Over allocated",
                    styles::over_allocated_style(),
                )));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Updated:   ", styles::muted_style()),
                Span::raw(client.last_updated_str()),
            ]));
            lines
        }
        None => vec![Line::from(Span::styled(
            "No clients to show",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(content).block(block), area);
}
