use ratatui::widgets::TableState;

use campustrack_core::{
    CardPath, Dashboard, DepartmentFilter, Disclosure, DisclosureTree, FacultyPolicy,
};

pub struct App {
    pub dashboard: Dashboard,
    pub tree: DisclosureTree,
    pub filter: DepartmentFilter,
    pub rows: Vec<CardPath>,
    pub state: TableState,
}

/// Flatten the visible part of the tree into table rows, depth first.
pub fn visible_rows(dashboard: &Dashboard, tree: &DisclosureTree, filter: &DepartmentFilter) -> Vec<CardPath> {
    let mut rows = Vec::new();
    for d in filter.apply(dashboard.departments()) {
        rows.push(CardPath::Department(d));
        if !tree.is_expanded(CardPath::Department(d)) {
            continue;
        }
        for (h, hod) in dashboard.departments()[d].hods.iter().enumerate() {
            rows.push(CardPath::Hod(d, h));
            if !tree.is_expanded(CardPath::Hod(d, h)) {
                continue;
            }
            rows.extend((0..hod.faculties.len()).map(|f| CardPath::Faculty(d, h, f)));
        }
    }
    rows
}

impl App {
    pub fn new(
        dashboard: Dashboard,
        filter: DepartmentFilter,
        policy: FacultyPolicy,
        expand_departments: bool,
    ) -> App {
        let tree = DisclosureTree::new(
            dashboard.departments(),
            policy,
            Disclosure::from_open(expand_departments),
        );
        let mut app = App {
            dashboard,
            tree,
            filter,
            rows: Vec::new(),
            state: TableState::default(),
        };
        app.rebuild_rows(None);
        app
    }

    pub fn selected(&self) -> Option<CardPath> {
        self.state.selected().and_then(|i| self.rows.get(i).copied())
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Expand or collapse the selected card. The cursor stays on it.
    pub fn toggle_selected(&mut self) -> Option<Disclosure> {
        let path = self.selected()?;
        let state = self.tree.toggle(path)?;
        tracing::debug!(?path, ?state, "toggled card");
        self.rebuild_rows(Some(path));
        Some(state)
    }

    pub fn cycle_filter(&mut self) {
        let next = self.dashboard.next_filter(&self.filter);
        self.set_filter(next);
    }

    pub fn show_all(&mut self) {
        self.set_filter(DepartmentFilter::All);
    }

    fn set_filter(&mut self, filter: DepartmentFilter) {
        tracing::info!(filter = %self.dashboard.filter_label(&filter), "filter changed");
        self.filter = filter;
        self.rebuild_rows(None);
    }

    fn rebuild_rows(&mut self, keep: Option<CardPath>) {
        self.rows = visible_rows(&self.dashboard, &self.tree, &self.filter);
        let position = keep.and_then(|path| self.rows.iter().position(|p| *p == path));
        let selected = match position {
            Some(i) => Some(i),
            None if self.rows.is_empty() => None,
            None => Some(0),
        };
        self.state.select(selected);
    }

    /// Footer hint for the selected card, e.g. `Show HOD`.
    pub fn toggle_label(&self) -> Option<&'static str> {
        let path = self.selected()?;
        let state = self.tree.get(path)?;
        Some(path.kind().toggle_label(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustrack_core::{AttendanceWindow, HierarchyRepository, SampleHierarchyRepository};
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let window = AttendanceWindow::default();
        let departments = SampleHierarchyRepository::new(window, today).load().unwrap();
        Dashboard::new(departments, window)
    }

    fn app(policy: FacultyPolicy) -> App {
        let dashboard = dashboard();
        let filter = dashboard.default_filter();
        App::new(dashboard, filter, policy, true)
    }

    #[test]
    fn test_initial_rows() {
        let app = app(FacultyPolicy::Accordion);
        assert_eq!(app.rows, vec![CardPath::Department(0), CardPath::Hod(0, 0)]);
        assert_eq!(app.selected(), Some(CardPath::Department(0)));
        assert_eq!(app.toggle_label(), Some("Hide HOD"));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app(FacultyPolicy::Accordion);
        app.next();
        assert_eq!(app.selected(), Some(CardPath::Hod(0, 0)));
        app.next();
        assert_eq!(app.selected(), Some(CardPath::Department(0)));
        app.previous();
        assert_eq!(app.selected(), Some(CardPath::Hod(0, 0)));
    }

    #[test]
    fn test_toggle_hod_reveals_faculty() {
        let mut app = app(FacultyPolicy::Accordion);
        app.next();
        assert_eq!(app.toggle_label(), Some("Show faculty"));
        assert_eq!(app.toggle_selected(), Some(Disclosure::Expanded));
        assert_eq!(app.rows.len(), 2 + 6);
        assert_eq!(app.selected(), Some(CardPath::Hod(0, 0)));
        assert_eq!(app.toggle_label(), Some("Hide faculty"));
    }

    #[test]
    fn test_accordion_keeps_one_faculty_open() {
        let mut app = app(FacultyPolicy::Accordion);
        app.next();
        app.toggle_selected();

        app.next();
        app.toggle_selected();
        assert!(app.tree.is_expanded(CardPath::Faculty(0, 0, 0)));
        app.next();
        app.toggle_selected();
        assert!(app.tree.is_expanded(CardPath::Faculty(0, 0, 1)));
        assert!(!app.tree.is_expanded(CardPath::Faculty(0, 0, 0)));
    }

    #[test]
    fn test_independent_faculty() {
        let mut app = app(FacultyPolicy::Independent);
        app.next();
        app.toggle_selected();
        app.next();
        app.toggle_selected();
        app.next();
        app.toggle_selected();
        assert!(app.tree.is_expanded(CardPath::Faculty(0, 0, 0)));
        assert!(app.tree.is_expanded(CardPath::Faculty(0, 0, 1)));
    }

    #[test]
    fn test_collapse_department_hides_descendants() {
        let mut app = app(FacultyPolicy::Accordion);
        app.next();
        app.toggle_selected();
        app.previous();
        assert_eq!(app.toggle_selected(), Some(Disclosure::Collapsed));
        assert_eq!(app.rows, vec![CardPath::Department(0)]);

        app.toggle_selected();
        // descendants come back collapsed
        assert_eq!(app.rows, vec![CardPath::Department(0), CardPath::Hod(0, 0)]);
    }

    #[test]
    fn test_filter_cycle_and_show_all() {
        let mut app = app(FacultyPolicy::Accordion);
        app.cycle_filter();
        assert_eq!(app.filter, DepartmentFilter::Only("ece".to_string()));
        assert_eq!(app.rows[0], CardPath::Department(1));
        assert_eq!(app.selected(), Some(CardPath::Department(1)));

        app.show_all();
        assert_eq!(app.filter, DepartmentFilter::All);
        assert_eq!(app.rows.len(), 8);

        app.cycle_filter();
        assert_eq!(app.filter, DepartmentFilter::Only("cse".to_string()));
    }

    #[test]
    fn test_disclosure_survives_filter_change() {
        let mut app = app(FacultyPolicy::Accordion);
        app.next();
        app.toggle_selected();
        app.cycle_filter();
        app.show_all();
        assert!(app.rows.contains(&CardPath::Faculty(0, 0, 5)));
    }
}
