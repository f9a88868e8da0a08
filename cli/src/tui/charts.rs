//! Pie and stacked-bar charts for the detail panel.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Paragraph, Widget,
    },
};

use campustrack_core::service::aggregate::{DailyAggregate, PieSlice};
use campustrack_core::{AttendanceStatus, StatusCounts};

use crate::tui::widgets::{fit_width, status_color, THEME};

const RINGS: usize = 24;
const SPOKES: usize = 360;

/// Donut chart with one segment per status and a legend underneath.
pub struct PieChart<'a> {
    slices: [PieSlice; 3],
    block: Option<Block<'a>>,
}

impl<'a> PieChart<'a> {
    pub fn new(slices: [PieSlice; 3]) -> Self {
        Self { slices, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// Sample points of a ring between `inner` and 1.0, split by slice share.
/// Starts at twelve o'clock and runs clockwise.
pub fn pie_points(slices: &[PieSlice; 3], inner: f64) -> [Vec<(f64, f64)>; 3] {
    let mut out: [Vec<(f64, f64)>; 3] = Default::default();
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return out;
    }

    let mut bounds = [0.0f64; 3];
    let mut acc = 0;
    for (i, slice) in slices.iter().enumerate() {
        acc += slice.value;
        bounds[i] = acc as f64 / total as f64;
    }

    for ring in 0..=RINGS {
        let r = inner + (1.0 - inner) * ring as f64 / RINGS as f64;
        for spoke in 0..SPOKES {
            let frac = spoke as f64 / SPOKES as f64;
            let slot = bounds.iter().position(|&b| frac < b).unwrap_or(2);
            let angle = FRAC_PI_2 - frac * TAU;
            out[slot].push((r * angle.cos(), r * angle.sin()));
        }
    }
    out
}

impl Widget for PieChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height < 2 || inner.width < 4 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        // braille dots are roughly square, cells are not
        let canvas_area = chunks[0];
        let aspect = canvas_area.width as f64 / (2.0 * canvas_area.height.max(1) as f64);
        let (x_bound, y_bound) = if aspect >= 1.0 {
            (aspect, 1.0)
        } else {
            (1.0, 1.0 / aspect)
        };

        let points = pie_points(&self.slices, 0.55);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_bound, x_bound])
            .y_bounds([-y_bound, y_bound])
            .paint(|ctx| {
                for (status, coords) in AttendanceStatus::ALL.iter().zip(points.iter()) {
                    ctx.draw(&Points {
                        coords,
                        color: status_color(*status),
                    });
                }
            })
            .render(canvas_area, buf);

        let legend: Vec<Span> = self
            .slices
            .iter()
            .flat_map(|s| {
                [
                    Span::styled("■ ", Style::default().fg(status_color(s.status))),
                    Span::styled(format!("{} {}  ", s.status.label(), s.value), Style::default().fg(THEME.text)),
                ]
            })
            .collect();
        Paragraph::new(Line::from(legend))
            .alignment(ratatui::layout::Alignment::Center)
            .render(chunks[1], buf);
    }
}

/// One bar per date, Present at the bottom, then Absent, then On Leave.
pub struct StackedBarChart<'a> {
    data: &'a [DailyAggregate],
    block: Option<Block<'a>>,
    bar_width: u16,
    gap: u16,
}

impl<'a> StackedBarChart<'a> {
    pub fn new(data: &'a [DailyAggregate]) -> Self {
        Self {
            data,
            block: None,
            bar_width: 3,
            gap: 1,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn bar_width(mut self, width: u16) -> Self {
        self.bar_width = width.max(1);
        self
    }
}

/// Rows per segment, rounded on the cumulative total so the stack never
/// exceeds `height`.
pub fn stack_heights(counts: StatusCounts, max: usize, height: u16) -> [u16; 3] {
    let mut out = [0u16; 3];
    if max == 0 {
        return out;
    }
    let scale = |v: usize| ((v as f64 / max as f64) * height as f64).round() as u16;

    let mut acc = 0;
    let mut prev = 0u16;
    for (i, status) in AttendanceStatus::ALL.iter().enumerate() {
        acc += counts.get(*status);
        let top = scale(acc).min(height);
        out[i] = top - prev;
        prev = top;
    }
    out
}

impl Widget for StackedBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.height < 2 || inner.width == 0 || self.data.is_empty() {
            return;
        }

        let chart_height = inner.height - 1;
        let slot = self.bar_width + self.gap;
        let fit = ((inner.width + self.gap) / slot).max(1) as usize;
        // keep the most recent days when the panel is narrow
        let data = &self.data[self.data.len().saturating_sub(fit)..];
        let max = data.iter().map(|d| d.counts.total()).max().unwrap_or(0).max(1);

        for (i, day) in data.iter().enumerate() {
            let x0 = inner.x + i as u16 * slot;
            let heights = stack_heights(day.counts, max, chart_height);

            let mut y = inner.y + chart_height;
            for (status, rows) in AttendanceStatus::ALL.iter().zip(heights) {
                for _ in 0..rows {
                    y -= 1;
                    for dx in 0..self.bar_width {
                        if let Some(cell) = buf.cell_mut((x0 + dx, y)) {
                            cell.set_symbol("█").set_fg(status_color(*status));
                        }
                    }
                }
            }

            let label = if self.bar_width >= 5 {
                day.label()
            } else {
                day.date.format("%d").to_string()
            };
            buf.set_string(
                x0,
                inner.y + chart_height,
                fit_width(&label, self.bar_width as usize),
                Style::default().fg(THEME.muted),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slices(p: usize, a: usize, l: usize) -> [PieSlice; 3] {
        campustrack_core::service::aggregate::pie_series(StatusCounts {
            present: p,
            absent: a,
            on_leave: l,
        })
    }

    #[test]
    fn test_pie_points_empty_total() {
        let points = pie_points(&slices(0, 0, 0), 0.5);
        assert!(points.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_pie_points_single_status() {
        let points = pie_points(&slices(5, 0, 0), 0.5);
        assert_eq!(points[0].len(), (RINGS + 1) * SPOKES);
        assert!(points[1].is_empty());
        assert!(points[2].is_empty());
    }

    #[test]
    fn test_pie_points_proportions() {
        let points = pie_points(&slices(1, 1, 2), 0.5);
        let total = ((RINGS + 1) * SPOKES) as f64;
        assert!((points[2].len() as f64 / total - 0.5).abs() < 0.01);
        for (x, y) in points.iter().flatten() {
            let r = (x * x + y * y).sqrt();
            assert!(r >= 0.5 - 1e-9 && r <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_stack_heights() {
        let counts = StatusCounts { present: 3, absent: 2, on_leave: 1 };
        assert_eq!(stack_heights(counts, 6, 12), [6, 4, 2]);
        assert_eq!(stack_heights(counts, 12, 12), [3, 2, 1]);
        assert_eq!(stack_heights(StatusCounts::default(), 6, 12), [0, 0, 0]);
        assert_eq!(stack_heights(counts, 0, 12), [0, 0, 0]);

        let h = stack_heights(counts, 6, 5);
        assert_eq!(h.iter().sum::<u16>(), 5);
    }

    #[test]
    fn test_stacked_bars_render_latest_days() {
        let base = NaiveDate::from_ymd_opt(2026, 10, 10).unwrap();
        let data: Vec<DailyAggregate> = (0..10)
            .map(|i| DailyAggregate {
                date: base + chrono::Duration::days(i),
                counts: StatusCounts { present: 2, absent: 1, on_leave: 0 },
            })
            .collect();

        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);
        StackedBarChart::new(&data).render(area, &mut buf);

        // two 3-wide bars fit in 8 columns: days 18 and 19
        let labels: String = (0..8).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(labels.starts_with("18"));
        assert!(labels.contains("19"));
        assert_eq!(buf[(0, 2)].fg, THEME.present);
        assert_eq!(buf[(0, 0)].fg, THEME.absent);
    }
}
