//! Configuration management for campustrack.
//!
//! Loaded with figment from defaults, an optional TOML file and
//! `CAMPUSTRACK_`-prefixed environment variables (`__` separates sections).

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::disclosure::FacultyPolicy;
use crate::error::{Error, Result};
use crate::service::generator::{AttendanceWindow, DEFAULT_WINDOW_DAYS};
use crate::service::sample::{
    default_catalog, DepartmentSeed, SampleShape, DEFAULT_FACULTY_PER_HOD, DEFAULT_HODS_PER_DEPARTMENT,
};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "campustrack";
const ENV_PREFIX: &str = "CAMPUSTRACK_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub attendance: AttendanceConfig,
    pub sample: SampleConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Window length as written in the file; validated into `AttendanceWindow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowSetting {
    Days(i64),
    Fractional(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    pub window_days: WindowSetting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub hods_per_department: usize,
    pub faculty_per_hod: usize,
    /// Replaces the built-in department catalog when set.
    pub departments: Option<Vec<DepartmentSeed>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Initial filter: `"all"` or a department id prefix. Unset selects the
    /// first department.
    pub department: Option<String>,
    pub faculty_policy: FacultyPolicy,
    pub expand_departments: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the TUI log file.
    pub directory: Option<PathBuf>,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            window_days: WindowSetting::Days(DEFAULT_WINDOW_DAYS as i64),
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            hods_per_department: DEFAULT_HODS_PER_DEPARTMENT,
            faculty_per_hod: DEFAULT_FACULTY_PER_HOD,
            departments: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            department: None,
            faculty_policy: FacultyPolicy::Accordion,
            expand_departments: true,
        }
    }
}

impl Config {
    /// Load with an optional custom config file path.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        self.window()?;

        if self.sample.hods_per_department == 0 {
            return Err(Error::invalid_config("hods_per_department must be greater than 0"));
        }
        if self.sample.faculty_per_hod == 0 {
            return Err(Error::invalid_config("faculty_per_hod must be greater than 0"));
        }

        if let Some(departments) = &self.sample.departments {
            if departments.is_empty() {
                return Err(Error::invalid_config("departments must not be empty"));
            }
            let mut seen = HashSet::new();
            for seed in departments {
                if seed.id.trim().is_empty() {
                    return Err(Error::invalid_config("department id must not be empty"));
                }
                if !seen.insert(seed.id.as_str()) {
                    return Err(Error::invalid_config(format!(
                        "duplicate department id: {}",
                        seed.id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn window(&self) -> Result<AttendanceWindow> {
        match self.attendance.window_days {
            WindowSetting::Days(days) => AttendanceWindow::try_from(days),
            WindowSetting::Fractional(days) if days.fract() == 0.0 && days.is_finite() => {
                AttendanceWindow::try_from(days as i64)
            }
            WindowSetting::Fractional(days) => Err(Error::invalid_config(format!(
                "window_days must be a whole number (got {})",
                days
            ))),
        }
    }

    pub fn catalog(&self) -> Vec<DepartmentSeed> {
        self.sample.departments.clone().unwrap_or_else(default_catalog)
    }

    pub fn shape(&self) -> SampleShape {
        SampleShape {
            hods_per_department: self.sample.hods_per_department,
            faculty_per_hod: self.sample.faculty_per_hod,
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(Self::default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window().unwrap().days(), 14);
        assert_eq!(config.shape(), SampleShape::default());
        assert_eq!(config.catalog().len(), 4);
        assert_eq!(config.dashboard.faculty_policy, FacultyPolicy::Accordion);
        assert!(config.dashboard.expand_departments);
        assert!(config.dashboard.department.is_none());
    }

    #[test]
    fn test_negative_window_is_invalid() {
        let mut config = Config::default();
        config.attendance.window_days = WindowSetting::Days(-3);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_fractional_window_is_invalid() {
        let mut config = Config::default();
        config.attendance.window_days = WindowSetting::Fractional(7.5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("whole number"));

        config.attendance.window_days = WindowSetting::Fractional(7.0);
        assert_eq!(config.window().unwrap().days(), 7);
    }

    #[test]
    fn test_zero_shape_is_invalid() {
        let mut config = Config::default();
        config.sample.faculty_per_hod = 0;
        assert!(config.validate().unwrap_err().to_string().contains("faculty_per_hod"));
    }

    #[test]
    fn test_duplicate_departments_are_invalid() {
        let mut config = Config::default();
        config.sample.departments = Some(vec![
            DepartmentSeed::new("cse", "A", "A"),
            DepartmentSeed::new("cse", "B", "B"),
        ]);
        assert!(config.validate().unwrap_err().to_string().contains("duplicate"));

        config.sample.departments = Some(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "campustrack.toml",
                r#"
                [attendance]
                window_days = 7

                [dashboard]
                department = "ece"
                faculty_policy = "independent"

                [[sample.departments]]
                id = "phy"
                name = "Physics"
                code = "PHY"
                "#,
            )?;
            jail.set_env("CAMPUSTRACK_SAMPLE__FACULTY_PER_HOD", "3");

            let config = Config::load_from(Some(jail.directory().join("campustrack.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.window().map_err(|e| e.to_string())?.days(), 7);
            assert_eq!(config.dashboard.department.as_deref(), Some("ece"));
            assert_eq!(config.dashboard.faculty_policy, FacultyPolicy::Independent);
            assert_eq!(config.sample.faculty_per_hod, 3);
            assert_eq!(config.catalog(), vec![DepartmentSeed::new("phy", "Physics", "PHY")]);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_fractional_window() {
        Jail::expect_with(|jail| {
            jail.create_file("c.toml", "[attendance]\nwindow_days = 2.5\n")?;
            let result = Config::load_from(Some(jail.directory().join("c.toml")));
            assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|jail| {
            let config = Config::load_from(Some(jail.directory().join("absent.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_log_dir_override() {
        let mut config = Config::default();
        assert!(config.log_dir().ends_with("campustrack"));
        config.logging.directory = Some(PathBuf::from("/tmp/ct"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/ct"));
    }
}
