mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use campustrack_core::time::today;
use campustrack_core::{
    parse_reference_date, Config, Dashboard, DashboardService, DashboardSnapshot, DepartmentFilter,
    SampleHierarchyRepository,
};

use crate::logging::Verbosity;

#[derive(Parser)]
#[command(name = "campustrack")]
#[command(about = "Principal's attendance dashboard for departments, HODs and faculty", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/campustrack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Last day of the attendance window: today, yesterday, -3d, -1w or YYYY-MM-DD
    #[arg(long, global = true)]
    today: Option<String>,

    /// Department filter: "all" or a department id prefix
    #[arg(short, long, global = true)]
    department: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Commands {
    /// Open the interactive dashboard (default)
    Tui,
    /// Summary tiles and per-department counts
    Summary,
    /// Attendance table of one faculty member (e.g. cse-f0-2)
    Attendance {
        faculty_id: String,
    },
    /// Per-date totals across a HOD's faculty (e.g. ece-hod-1)
    Trend {
        hod_id: String,
    },
    /// JSON snapshot of the filtered dashboard
    Export {
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the resolved config path and values
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Tui);
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_config_path);
    let config = Config::load_from(Some(config_path.clone())).context("failed to load configuration")?;

    let _guard = match command {
        Commands::Tui => logging::init_file_logging(verbosity, &config.log_dir()),
        _ => {
            logging::init_logging(verbosity);
            None
        }
    };
    tracing::debug!(path = %config_path.display(), "configuration loaded");
    tracing::debug!(?command, "dispatching");

    if let Commands::Config = command {
        println!("Config file: {}", config_path.display());
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let now = today();
    let reference = match cli.today.as_deref() {
        Some(input) => parse_reference_date(input, now).context("invalid --today")?,
        None => now,
    };

    let repo = SampleHierarchyRepository::from_config(&config, reference)?;
    let window = repo.window();
    let service = DashboardService::new(repo, window);
    let dashboard = service.load_dashboard().context("failed to build dashboard")?;

    let key = cli.department.as_deref().or(config.dashboard.department.as_deref());

    match command {
        Commands::Tui => {
            let filter = service.initial_filter(&dashboard, key)?;
            tui::run(dashboard, filter, &config)?;
        }
        Commands::Summary => {
            let filter = report_filter(&dashboard, key)?;
            println!("{}", report::render_summary(&dashboard, &filter));
        }
        Commands::Attendance { faculty_id } => {
            println!("{}", report::render_attendance(&dashboard, &faculty_id)?);
        }
        Commands::Trend { hod_id } => {
            println!("{}", report::render_trend(&dashboard, &hod_id)?);
        }
        Commands::Export { compact } => {
            let filter = report_filter(&dashboard, key)?;
            let snapshot = DashboardSnapshot::build(&dashboard, &filter);
            println!("{}", snapshot.to_json(!compact)?);
        }
        Commands::Config => {}
    }

    Ok(())
}

/// Reports cover every department unless a filter is asked for.
fn report_filter(dashboard: &Dashboard, key: Option<&str>) -> Result<DepartmentFilter> {
    Ok(match key {
        Some(key) => dashboard.resolve_filter(key)?,
        None => DepartmentFilter::All,
    })
}
