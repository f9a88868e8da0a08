use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Row, Table},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use campustrack_core::{AttendanceRecord, AttendanceStatus};

// --- THEME ---
pub struct Theme {
    pub primary: Color,
    pub muted: Color,
    pub text: Color,
    pub present: Color,
    pub absent: Color,
    pub on_leave: Color,
}

pub const THEME: Theme = Theme {
    primary: Color::Rgb(99, 102, 241), // indigo
    muted: Color::DarkGray,
    text: Color::White,
    present: Color::Rgb(16, 185, 129),
    absent: Color::Rgb(239, 68, 68),
    on_leave: Color::Rgb(245, 158, 11),
};

pub fn status_color(status: AttendanceStatus) -> Color {
    match status {
        AttendanceStatus::Present => THEME.present,
        AttendanceStatus::Absent => THEME.absent,
        AttendanceStatus::OnLeave => THEME.on_leave,
    }
}

/// Status text with the check / cross marks used in the attendance table.
pub fn badge_text(status: AttendanceStatus) -> String {
    match status {
        AttendanceStatus::Present => "✔ Present".to_string(),
        AttendanceStatus::Absent => "Absent ✖".to_string(),
        AttendanceStatus::OnLeave => "On Leave".to_string(),
    }
}

/// `Present 9` in the status colour.
pub fn pill(status: AttendanceStatus, count: usize) -> Span<'static> {
    Span::styled(
        format!(" {} {} ", status.label(), count),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn section_header(title: &str, subtitle: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("▌{}", title),
            Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", subtitle),
            Style::default().fg(THEME.muted),
        )),
    ]
}

pub fn card_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
}

pub fn attendance_table(records: &[AttendanceRecord]) -> Table<'static> {
    let rows: Vec<Row> = records
        .iter()
        .map(|r| {
            Row::new(vec![
                Span::styled(r.date.format("%Y-%m-%d").to_string(), Style::default().fg(THEME.muted)),
                Span::styled(badge_text(r.status), Style::default().fg(status_color(r.status))),
                Span::styled(r.status.remark(), Style::default().fg(THEME.muted)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(12), // Date
            Constraint::Length(12), // Status
            Constraint::Min(10),    // Remark
        ],
    )
    .header(
        Row::new(vec!["Date", "Status", "Remark"])
            .style(Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
    )
}

/// Truncate to at most `width` terminal columns.
pub fn fit_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("10-19", 5), "10-19");
        assert_eq!(fit_width("10-19", 3), "10-");
        assert_eq!(fit_width("Faculty", 0), "");
        assert_eq!(fit_width("×+", 1), "×");
    }

    #[test]
    fn test_pill_text() {
        let span = pill(AttendanceStatus::Present, 9);
        assert_eq!(span.content, " Present 9 ");
        assert_eq!(span.style.fg, Some(THEME.present));
    }

    #[test]
    fn test_badges() {
        assert!(badge_text(AttendanceStatus::Present).contains('✔'));
        assert!(badge_text(AttendanceStatus::Absent).contains('✖'));
        assert_eq!(badge_text(AttendanceStatus::OnLeave), "On Leave");
    }
}
