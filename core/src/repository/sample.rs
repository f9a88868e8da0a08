use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;
use crate::model::hierarchy::Department;
use crate::repository::traits::HierarchyRepository;
use crate::service::generator::AttendanceWindow;
use crate::service::sample::{build_hierarchy, default_catalog, DepartmentSeed, SampleShape};

/// Generates the hierarchy in memory on every `load`.
#[derive(Debug, Clone)]
pub struct SampleHierarchyRepository {
    catalog: Vec<DepartmentSeed>,
    shape: SampleShape,
    window: AttendanceWindow,
    today: NaiveDate,
}

impl SampleHierarchyRepository {
    pub fn new(window: AttendanceWindow, today: NaiveDate) -> Self {
        Self {
            catalog: default_catalog(),
            shape: SampleShape::default(),
            window,
            today,
        }
    }

    pub fn from_config(config: &Config, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            catalog: config.catalog(),
            shape: config.shape(),
            window: config.window()?,
            today,
        })
    }

    pub fn window(&self) -> AttendanceWindow {
        self.window
    }
}

impl HierarchyRepository for SampleHierarchyRepository {
    fn load(&self) -> Result<Vec<Department>> {
        let departments = build_hierarchy(&self.catalog, self.shape, self.window.days(), self.today);
        tracing::debug!(
            departments = departments.len(),
            window = self.window.days(),
            today = %self.today,
            "generated sample hierarchy"
        );
        Ok(departments)
    }
}
