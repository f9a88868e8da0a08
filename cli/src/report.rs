//! Plain-terminal reports rendered with tabled.

use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use campustrack_core::service::aggregate::{department_counts, faculty_counts, hod_counts, hod_daily_series};
use campustrack_core::{Dashboard, DepartmentFilter, Result};

use crate::tui::widgets::badge_text;

#[derive(Tabled)]
struct TileRow {
    #[tabled(rename = "Tile")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Department")]
    name: String,
    #[tabled(rename = "HODs")]
    hods: usize,
    #[tabled(rename = "Faculty")]
    faculty: usize,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Absent")]
    absent: usize,
    #[tabled(rename = "On Leave")]
    on_leave: usize,
}

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Remark")]
    remark: &'static str,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Absent")]
    absent: usize,
    #[tabled(rename = "On Leave")]
    on_leave: usize,
    #[tabled(rename = "Total")]
    total: usize,
}

fn styled<I, T>(rows: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Tabled,
{
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table.to_string()
}

/// Tiles over the whole hierarchy, then one row per visible department.
pub fn render_summary(dashboard: &Dashboard, filter: &DepartmentFilter) -> String {
    let tiles = dashboard.tiles();
    let tile_rows = vec![
        TileRow { name: "Departments", value: tiles.departments.to_string() },
        TileRow { name: "Total HODs", value: tiles.hods.to_string() },
        TileRow { name: "Faculty", value: tiles.faculty.to_string() },
        TileRow { name: "Attendance Window", value: tiles.window },
    ];

    let department_rows: Vec<DepartmentRow> = dashboard
        .visible(filter)
        .into_iter()
        .map(|d| {
            let counts = department_counts(d);
            DepartmentRow {
                code: d.code.clone(),
                name: d.name.clone(),
                hods: d.hods.len(),
                faculty: d.faculty_count(),
                present: counts.present,
                absent: counts.absent,
                on_leave: counts.on_leave,
            }
        })
        .collect();

    format!(
        "{}\n\n\x1b[1;36m{}\x1b[0m\n{}",
        styled(tile_rows),
        dashboard.filter_label(filter),
        styled(department_rows)
    )
}

pub fn render_attendance(dashboard: &Dashboard, faculty_id: &str) -> Result<String> {
    let (department, hod, faculty) = dashboard.find_faculty(faculty_id)?;
    let counts = faculty_counts(faculty);

    let rows: Vec<AttendanceRow> = faculty
        .attendance
        .iter()
        .map(|r| AttendanceRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            status: badge_text(r.status),
            remark: r.status.remark(),
        })
        .collect();

    Ok(format!(
        "\x1b[1;36m{}\x1b[0m ({}, {} / {})\n{} | {}\nPresent: {}  Absent: {}  On Leave: {}\n{}",
        faculty.name,
        faculty.role,
        hod.name,
        department.code,
        faculty.email,
        faculty.phone,
        counts.present,
        counts.absent,
        counts.on_leave,
        styled(rows)
    ))
}

pub fn render_trend(dashboard: &Dashboard, hod_id: &str) -> Result<String> {
    let (department, hod) = dashboard.find_hod(hod_id)?;
    let counts = hod_counts(hod);

    let rows: Vec<TrendRow> = hod_daily_series(hod)
        .into_iter()
        .map(|day| TrendRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            present: day.counts.present,
            absent: day.counts.absent,
            on_leave: day.counts.on_leave,
            total: day.counts.total(),
        })
        .collect();

    Ok(format!(
        "\x1b[1;36m{}\x1b[0m ({}, {})\nPresent: {}  Absent: {}  On Leave: {}\n{}",
        hod.name,
        department.name,
        hod.faculty_caption(),
        counts.present,
        counts.absent,
        counts.on_leave,
        styled(rows)
    ))
}
