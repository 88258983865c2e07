use std::collections::BTreeSet;

use crate::config::DashboardConfig;
use crate::data::aggregate::Dashboard;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::model::{FieldValue, FilterColumn, SalaryDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a source loads successfully).
    pub dataset: Option<SalaryDataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Aggregates over `visible_indices`.
    pub dashboard: Dashboard,

    pub config: DashboardConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load the configured source, replacing any current dataset on success.
    pub fn load_configured_source(&mut self) {
        let source = self.config.source.clone();
        self.load_with(&source, crate::data::loader::load_source);
    }

    /// Run `load` and ingest the result, reporting failures in the status bar.
    pub fn load_with<F>(&mut self, label: &str, load: F)
    where
        F: FnOnce(&str) -> anyhow::Result<SalaryDataset>,
    {
        match load(label) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {label}; {}",
                    dataset.len(),
                    FilterColumn::ALL
                        .iter()
                        .map(|&c| format!(
                            "{}: {} values",
                            c.source_name(),
                            dataset.options(c).map_or(0, |v| v.len())
                        ))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {label}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset with every filter value selected.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_state(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and every aggregate after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.dashboard = Dashboard::default();
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        self.dashboard =
            Dashboard::compute(ds, &self.visible_indices, &self.config.aggregate_params());
        log::debug!(
            "Filter matched {} of {} records",
            self.visible_indices.len(),
            ds.len()
        );
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &FieldValue) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(all_vals) = self.dataset.as_ref().and_then(|ds| ds.options(column)) {
            self.filters.insert(column, all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.insert(column, BTreeSet::new());
        self.refilter();
    }

    pub fn is_selected(&self, column: FilterColumn, value: &FieldValue) -> bool {
        self.filters
            .get(&column)
            .is_some_and(|selected| selected.contains(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(SalaryDataset::from_records(vec![
            record(2023, "Senior", "Data Scientist", 100_000.0),
            record(2023, "Junior", "Data Scientist", 50_000.0),
        ]));
        state
    }

    #[test]
    fn test_set_dataset_selects_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.dashboard.summary.total_records, 2);
        assert_eq!(state.dashboard.summary.mean_salary, 75_000.0);
    }

    #[test]
    fn test_toggle_recomputes_dashboard() {
        let mut state = loaded();
        state.toggle_filter_value(FilterColumn::Seniority, &"Junior".into());
        assert!(!state.is_selected(FilterColumn::Seniority, &"Junior".into()));
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.dashboard.summary.max_salary, 100_000.0);

        state.toggle_filter_value(FilterColumn::Seniority, &"Junior".into());
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn test_select_none_then_all() {
        let mut state = loaded();
        state.select_none(FilterColumn::Year);
        assert!(state.visible_indices.is_empty());
        assert!(state.dashboard.is_empty());

        state.select_all(FilterColumn::Year);
        assert_eq!(state.visible_indices.len(), 2);
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        state.load_with("missing.csv", |_| anyhow::bail!("no such file"));
        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().contains("no such file"));
    }
}
