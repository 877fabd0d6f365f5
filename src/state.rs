use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::CategoryColors;
use crate::data::filter::{apply, FilterOptions, FilterSelection};
use crate::data::loader::load_file;
use crate::data::model::EmployeeTable;
use crate::ui::chart::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current table came from (or failed to come from).
    pub data_path: PathBuf,

    /// Loaded table (None until a load succeeds).
    pub table: Option<EmployeeTable>,

    /// Selector entries computed from the unfiltered table.
    pub options: FilterOptions,

    /// Current sidebar selection.
    pub selection: FilterSelection,

    /// Metrics and charts for the current selection.
    pub dashboard: Option<DashboardView>,

    /// Bar / box colours, fixed per loaded table.
    pub colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            table: None,
            options: FilterOptions::default(),
            selection: FilterSelection::default(),
            dashboard: None,
            colors: CategoryColors::default(),
            status_message: None,
        }
    }

    /// Read `path` and make it the current table.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.data_path = path.to_path_buf();
        let table = load_file(path)
            .with_context(|| format!("loading employee data from {}", path.display()))?;
        self.set_dataset(table);
        Ok(())
    }

    /// Like [`AppState::load`], but a failure drops the current table and
    /// leaves the error in `status_message`.
    pub fn load_or_report(&mut self, path: &Path) {
        if let Err(e) = self.load(path) {
            log::error!("Failed to load file: {e:#}");
            self.table = None;
            self.dashboard = None;
            self.options = FilterOptions::default();
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Load the current `data_path` again.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        self.load_or_report(&path);
    }

    /// Ingest a newly loaded table, initialise selectors and colours.
    pub fn set_dataset(&mut self, table: EmployeeTable) {
        if table.is_empty() {
            log::warn!("{} contains no employee records", table.source);
        }
        self.options = FilterOptions::from_table(&table);
        self.selection.retain_valid(&self.options);
        self.colors = CategoryColors::for_table(&table);
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Re-run filter → aggregate → chart shaping from scratch.
    pub fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.dashboard = None;
            return;
        };
        let view = apply(table, &self.selection);
        if view.is_empty() {
            log::warn!("No employees match {}", self.selection.describe());
        }
        let dashboard = DashboardView::build(&view);
        log::debug!("{}: {}", self.selection.describe(), dashboard.kpi);
        self.dashboard = Some(dashboard);
    }

    /// Change the department constraint (`None` = All).
    pub fn set_department(&mut self, department: Option<String>) {
        if self.selection.department != department {
            self.selection.department = department;
            self.refresh();
        }
    }

    /// Change the job level constraint (`None` = All).
    pub fn set_job_level(&mut self, job_level: Option<i64>) {
        if self.selection.job_level != job_level {
            self.selection.job_level = job_level;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CSV: &str = "\
Department,JobLevel,Attrition,OverTime,WorkLifeBalance,MonthlyIncome
Sales,2,Yes,Yes,1,5993
Research & Development,2,No,No,3,5130
Research & Development,1,Yes,Yes,3,2090
Sales,1,No,No,2,2909
";

    fn csv_file() -> tempfile::NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(tmp, "{CSV}").unwrap();
        tmp
    }

    #[test]
    fn loading_builds_the_dashboard() {
        let tmp = csv_file();
        let mut state = AppState::new(tmp.path());
        state.reload();

        assert!(state.status_message.is_none());
        assert_eq!(state.options.job_levels, vec![1, 2]);
        let dash = state.dashboard.as_ref().unwrap();
        assert_eq!(dash.kpi.total_employees, 4);
        assert_eq!(dash.kpi.attrition_rate, Some(50.0));
    }

    #[test]
    fn selection_changes_rerun_the_pipeline() {
        let tmp = csv_file();
        let mut state = AppState::new(tmp.path());
        state.reload();

        state.set_department(Some("Sales".into()));
        state.set_job_level(Some(2));
        let kpi = state.dashboard.as_ref().unwrap().kpi;
        assert_eq!((kpi.total_employees, kpi.attrition_count), (1, 1));
        // selector lists ignore the active filters
        assert_eq!(state.options.departments.len(), 2);

        state.set_department(None);
        let kpi = state.dashboard.as_ref().unwrap().kpi;
        assert_eq!(kpi.total_employees, 2);
    }

    #[test]
    fn empty_selection_keeps_a_dashboard() {
        let tmp = csv_file();
        let mut state = AppState::new(tmp.path());
        state.reload();
        state.set_job_level(Some(7));
        let dash = state.dashboard.as_ref().unwrap();
        assert_eq!(dash.kpi.attrition_rate, None);
    }

    #[test]
    fn header_only_file_loads_as_empty_dashboard() {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(tmp, "{}", CSV.lines().next().unwrap()).unwrap();
        let mut state = AppState::new(tmp.path());
        state.reload();

        assert!(state.status_message.is_none());
        assert!(state.table.as_ref().unwrap().is_empty());
        assert!(state.options.departments.is_empty());
        let dash = state.dashboard.as_ref().unwrap();
        assert_eq!(dash.kpi.total_employees, 0);
        assert_eq!(dash.kpi.attrition_rate, None);
    }

    #[test]
    fn failed_load_is_reported_not_swallowed() {
        let tmp = csv_file();
        let mut state = AppState::new(tmp.path());
        state.reload();

        state.load_or_report(Path::new("/no/such/employees.csv"));
        assert!(state.table.is_none());
        assert!(state.dashboard.is_none());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("/no/such/employees.csv"), "{msg}");
        assert_eq!(state.data_path, PathBuf::from("/no/such/employees.csv"));
    }
}
