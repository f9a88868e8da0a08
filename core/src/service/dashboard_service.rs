use crate::dashboard::{Dashboard, DepartmentFilter};
use crate::error::Result;
use crate::repository::HierarchyRepository;
use crate::service::generator::AttendanceWindow;

pub struct DashboardService<R: HierarchyRepository> {
    repo: R,
    window: AttendanceWindow,
}

impl<R: HierarchyRepository> DashboardService<R> {
    pub fn new(repo: R, window: AttendanceWindow) -> Self {
        Self { repo, window }
    }

    /// Build the session's dashboard. The hierarchy is read-only afterwards.
    pub fn load_dashboard(&self) -> Result<Dashboard> {
        let departments = self.repo.load()?;
        let dashboard = Dashboard::new(departments, self.window);
        let tiles = dashboard.tiles();
        tracing::info!(
            departments = tiles.departments,
            hods = tiles.hods,
            faculty = tiles.faculty,
            "dashboard loaded"
        );
        Ok(dashboard)
    }

    /// Resolve the initial filter: an explicit key wins, `None` selects the
    /// first department.
    pub fn initial_filter(&self, dashboard: &Dashboard, key: Option<&str>) -> Result<DepartmentFilter> {
        match key {
            Some(key) => dashboard.resolve_filter(key),
            None => Ok(dashboard.default_filter()),
        }
    }
}
