use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use campustrack_core::service::aggregate::{
    department_counts, faculty_counts, faculty_daily_series, hod_counts, hod_daily_series, pie_series,
};
use campustrack_core::{AttendanceStatus, CardPath, StatusCounts};

use crate::tui::app::App;
use crate::tui::charts::{PieChart, StackedBarChart};
use crate::tui::widgets::{attendance_table, card_block, pill, section_header, THEME};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Tiles
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);
    draw_tiles(f, app, main_chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[2]);

    draw_tree(f, app, content_chunks[0]);
    draw_detail(f, app, content_chunks[1]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled("CampusTrack", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("  Principal Dashboard", Style::default().fg(THEME.text)),
        Span::styled(
            format!("  ·  Filter: {}", app.dashboard.filter_label(&app.filter)),
            Style::default().fg(THEME.muted),
        ),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_tiles(f: &mut Frame, app: &App, area: Rect) {
    let tiles = app.dashboard.tiles();
    let entries = [
        ("Departments", tiles.departments.to_string()),
        ("Total HODs", tiles.hods.to_string()),
        ("Faculty", tiles.faculty.to_string()),
        ("Attendance Window", tiles.window),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for ((label, value), chunk) in entries.into_iter().zip(chunks.iter()) {
        let text = vec![
            Line::from(Span::styled(label, Style::default().fg(THEME.muted))),
            Line::from(Span::styled(value, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD))),
        ];
        let tile = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.primary)),
        );
        f.render_widget(tile, *chunk);
    }
}

fn counts_cell(counts: StatusCounts) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>3}", counts.present), Style::default().fg(THEME.present)),
        Span::styled(format!("{:>4}", counts.absent), Style::default().fg(THEME.absent)),
        Span::styled(format!("{:>4}", counts.on_leave), Style::default().fg(THEME.on_leave)),
    ])
}

fn draw_tree(f: &mut Frame, app: &mut App, area: Rect) {
    let departments = app.dashboard.departments();
    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|path| {
            let marker = app.tree.get(*path).unwrap_or_default().marker();
            let (indent, name, detail, counts, style) = match *path {
                CardPath::Department(d) => {
                    let dept = &departments[d];
                    (
                        "",
                        dept.name.clone(),
                        dept.caption(),
                        department_counts(dept),
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                }
                CardPath::Hod(d, h) => {
                    let hod = &departments[d].hods[h];
                    ("  ", hod.name.clone(), hod.faculty_caption(), hod_counts(hod), Style::default())
                }
                CardPath::Faculty(d, h, i) => {
                    let faculty = &departments[d].hods[h].faculties[i];
                    (
                        "    ",
                        faculty.name.clone(),
                        faculty.role.clone(),
                        faculty_counts(faculty),
                        Style::default().fg(THEME.text),
                    )
                }
            };
            Row::new(vec![
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled(format!("[{}] ", marker), Style::default().fg(THEME.primary)),
                    Span::styled(name, style),
                ]),
                Line::from(Span::styled(detail, Style::default().fg(THEME.muted))),
                counts_cell(counts),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),    // Card
            Constraint::Length(18), // Detail
            Constraint::Length(11), // P / A / L
        ],
    )
    .header(Row::new(vec!["Card", "Detail", "  P   A   L"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(" Departments ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn pills(counts: StatusCounts) -> Line<'static> {
    Line::from(
        AttendanceStatus::ALL
            .iter()
            .map(|s| pill(*s, counts.get(*s)))
            .collect::<Vec<_>>(),
    )
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Blue)),
        Span::raw(value.to_string()),
    ])
}

/// Widest bar (up to 5 columns, room for an `MM-DD` label) that fits every day.
fn bar_width(area: Rect, days: usize) -> u16 {
    let inner = area.width.saturating_sub(2) as usize;
    let per_day = inner / days.max(1);
    per_day.saturating_sub(1).clamp(1, 5) as u16
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    match app.selected() {
        Some(CardPath::Department(d)) => draw_department_detail(f, app, d, area),
        Some(CardPath::Hod(d, h)) => draw_hod_detail(f, app, d, h, area),
        Some(CardPath::Faculty(d, h, i)) => draw_faculty_detail(f, app, d, h, i, area),
        None => f.render_widget(card_block("Detail"), area),
    }
}

fn draw_department_detail(f: &mut Frame, app: &App, d: usize, area: Rect) {
    let dept = &app.dashboard.departments()[d];
    let mut text = vec![
        Line::from(Span::styled(dept.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(dept.caption(), Style::default().fg(THEME.muted))),
        pills(department_counts(dept)),
        Line::from(""),
    ];

    if app.tree.is_expanded(CardPath::Department(d)) {
        text.extend(section_header("Heads of Department", "Enter on a HOD row to view faculty"));
        for hod in &dept.hods {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(hod.name.clone(), Style::default().add_modifier(Modifier::BOLD))));
            text.push(Line::from(Span::styled(hod.faculty_caption(), Style::default().fg(THEME.muted))));
            text.push(pills(hod_counts(hod)));
        }
    } else {
        text.push(Line::from(Span::styled("Enter: Show HOD", Style::default().fg(THEME.muted))));
    }

    let paragraph = Paragraph::new(text)
        .block(card_block("Department"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_hod_detail(f: &mut Frame, app: &App, d: usize, h: usize, area: Rect) {
    let hod = &app.dashboard.departments()[d].hods[h];
    let counts = hod_counts(hod);
    let block = card_block("HOD");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = vec![
        Line::from(Span::styled(hod.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(hod.faculty_caption(), Style::default().fg(THEME.muted))),
        pills(counts),
    ];

    if !app.tree.is_expanded(CardPath::Hod(d, h)) {
        let mut text = header;
        text.push(Line::from(""));
        text.push(Line::from(Span::styled("Enter: Show faculty", Style::default().fg(THEME.muted))));
        f.render_widget(Paragraph::new(text), inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Min(8),     // Charts
            Constraint::Length(3),  // Faculty hint
        ])
        .split(inner);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    f.render_widget(
        PieChart::new(pie_series(counts)).block(card_block("HOD Attendance Breakdown")),
        charts[0],
    );
    let daily = hod_daily_series(hod);
    f.render_widget(
        StackedBarChart::new(&daily)
            .bar_width(bar_width(charts[1], daily.len()))
            .block(card_block(&format!("Last {} (All Faculty)", app.dashboard.window().label()))),
        charts[1],
    );

    f.render_widget(
        Paragraph::new(section_header("Faculty", "Enter on a faculty row to view attendance details")),
        chunks[2],
    );
}

fn draw_faculty_detail(f: &mut Frame, app: &App, d: usize, h: usize, i: usize, area: Rect) {
    let faculty = &app.dashboard.departments()[d].hods[h].faculties[i];
    let counts = faculty_counts(faculty);
    let block = card_block("Faculty");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = vec![
        Line::from(Span::styled(faculty.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(faculty.role.clone(), Style::default().fg(THEME.muted))),
        field("Email", &faculty.email),
        field("Phone", &faculty.phone),
        Line::from(vec![
            pill(AttendanceStatus::Present, counts.present),
            pill(AttendanceStatus::Absent, counts.absent),
        ]),
    ];

    if !app.tree.is_expanded(CardPath::Faculty(d, h, i)) {
        let mut text = header;
        text.push(Line::from(""));
        text.push(Line::from(Span::styled("Enter: Show attendance", Style::default().fg(THEME.muted))));
        f.render_widget(Paragraph::new(text), inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Header
            Constraint::Length(10), // Charts
            Constraint::Min(3),     // Table
        ])
        .split(inner);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    f.render_widget(
        PieChart::new(pie_series(counts)).block(card_block("Attendance Breakdown")),
        charts[0],
    );
    let daily = faculty_daily_series(faculty);
    f.render_widget(
        StackedBarChart::new(&daily)
            .bar_width(bar_width(charts[1], daily.len()))
            .block(card_block(&format!("Last {}", app.dashboard.window().label()))),
        charts[1],
    );

    f.render_widget(
        attendance_table(&faculty.attendance).block(card_block(&format!(
            "Last {}",
            app.dashboard.window().label()
        ))),
        chunks[2],
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(area);

    let toggle = app.toggle_label().unwrap_or("Toggle");
    let help = Paragraph::new(format!(
        "j/k: Navigate | Enter: {} | f: Filter | a: All | q: Quit",
        toggle
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[0]);

    let copyright = Paragraph::new(format!("© {} CampusTrack", chrono::Local::now().year()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    f.render_widget(copyright, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustrack_core::{AttendanceWindow, Dashboard, FacultyPolicy, HierarchyRepository, SampleHierarchyRepository};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let window = AttendanceWindow::default();
        let departments = SampleHierarchyRepository::new(window, today).load().unwrap();
        let dashboard = Dashboard::new(departments, window);
        let filter = dashboard.default_filter();
        App::new(dashboard, filter, FacultyPolicy::Accordion, true)
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(140, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draws_tiles_and_tree() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("Departments"));
        assert!(screen.contains("Total HODs"));
        assert!(screen.contains("│Faculty"));
        assert!(!screen.contains("Total Faculty"));
        assert!(screen.contains("24"));
        assert!(screen.contains("14 days"));
        assert!(screen.contains("[×] Computer Science"));
        assert!(screen.contains("Computer Science & Engineering"));
        assert!(screen.contains("[+] HOD 1"));
        assert!(screen.contains("Enter: Hide HOD"));
        assert!(screen.contains("CampusTrack"));
    }

    #[test]
    fn test_draws_hod_charts_when_expanded() {
        let mut app = app();
        app.next();
        app.toggle_selected();
        let screen = render(&mut app);
        assert!(screen.contains("HOD Attendance Breakdown"));
        assert!(screen.contains("Last 14 days (All Faculty)"));
        assert!(screen.contains("Present 54"));
    }

    #[test]
    fn test_draws_faculty_attendance_table() {
        let mut app = app();
        app.next();
        app.toggle_selected();
        app.next();
        app.toggle_selected();
        let screen = render(&mut app);
        assert!(screen.contains("faculty1@cse.edu"));
        assert!(screen.contains("2026-10-19"));
        assert!(screen.contains("Uninformed"));
        assert!(screen.contains("Approved"));
        assert!(screen.contains("Enter: Hide attendance"));
    }

    #[test]
    fn test_bar_width_fits_window() {
        assert_eq!(bar_width(Rect::new(0, 0, 46, 10), 14), 2);
        assert_eq!(bar_width(Rect::new(0, 0, 200, 10), 14), 5);
        assert_eq!(bar_width(Rect::new(0, 0, 10, 10), 14), 1);
        assert_eq!(bar_width(Rect::new(0, 0, 10, 10), 0), 5);
    }

    #[test]
    fn test_filter_label_in_header() {
        let mut app = app();
        app.show_all();
        let screen = render(&mut app);
        assert!(screen.contains("Filter: All departments"));
        assert!(screen.contains("[×] Mechanical Engin"));
    }
}
