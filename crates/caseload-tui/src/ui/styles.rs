use caseload_core::ClientStatus;
use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const HEADER: Color = Color::Rgb(64, 128, 192);
pub const ON_TRACK: Color = Color::Rgb(96, 160, 96);
pub const NEAR_LIMIT: Color = Color::Rgb(192, 160, 64);
pub const OVER_LIMIT: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const SELECTED_ROW: Color = Color::Rgb(48, 48, 64);
pub const STATUS_BAR: Color = Color::Rgb(32, 32, 40);

/// Share of capacity above which usage shows as nearing the limit.
const NEAR_LIMIT_PERCENT: f64 = 75.0;

pub fn title_style() -> Style {
    Style::default().fg(HEADER).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(SELECTED_ROW).add_modifier(Modifier::BOLD)
}

pub fn client_row_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

/// Section headings in the detail pane and help.
pub fn section_style() -> Style {
    Style::default().fg(NEAR_LIMIT)
}

/// Rows, counts and notes for clients past capacity.
pub fn over_allocated_style() -> Style {
    Style::default().fg(OVER_LIMIT)
}

/// Name of a client about to be deleted.
pub fn delete_target_style() -> Style {
    Style::default().fg(OVER_LIMIT).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(HEADER)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(NEAR_LIMIT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(STATUS_BAR).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(NEAR_LIMIT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Badge color for a client status: new work, active authorizations, and
/// clients whose care is interrupted.
pub fn status_style(status: ClientStatus) -> Style {
    let color = match status {
        ClientStatus::NewAuthorization | ClientStatus::NewlyAssigned => NEAR_LIMIT,
        ClientStatus::CurrentAuthorization | ClientStatus::CurrentAuthorizationNewLbs => ON_TRACK,
        ClientStatus::ClientHospitalized | ClientStatus::FrequentCaregiverCancellations => {
            OVER_LIMIT
        }
    };
    Style::default().fg(color)
}

/// Usage bar color: on track up to 75%, nearing the limit up to 100%, over
/// past capacity.
pub fn utilization_style(percent: f64) -> Style {
    let color = if percent > 100.0 {
        OVER_LIMIT
    } else if percent > NEAR_LIMIT_PERCENT {
        NEAR_LIMIT
    } else {
        ON_TRACK
    };
    Style::default().fg(color)
}
