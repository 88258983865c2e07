//! Dashboard configuration.
//!
//! Defaults point at the published salary CSV. An optional TOML file named by
//! `SALARY_DASHBOARD_CONFIG` overrides them, and `SALARY_DASHBOARD_SOURCE`
//! overrides the source last.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::aggregate::AggregateParams;
use crate::error::DashboardError;

pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

pub const CONFIG_ENV: &str = "SALARY_DASHBOARD_CONFIG";
pub const SOURCE_ENV: &str = "SALARY_DASHBOARD_SOURCE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL or local path of the dataset.
    pub source: String,
    /// Number of equal-width salary histogram bins.
    pub histogram_bins: usize,
    /// How many job titles the top-by-mean chart shows.
    pub top_titles: usize,
    /// Job title the per-country map is restricted to.
    pub focus_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let params = AggregateParams::default();
        Self {
            source: DEFAULT_SOURCE.to_string(),
            histogram_bins: params.histogram_bins,
            top_titles: params.top_titles,
            focus_title: params.focus_title,
        }
    }
}

impl DashboardConfig {
    /// Resolve the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        if let Ok(source) = std::env::var(SOURCE_ENV) {
            if !source.trim().is_empty() {
                config.source = source;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(text).map_err(DashboardError::from)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.histogram_bins == 0 {
            return Err(DashboardError::Config("histogram_bins must be at least 1".into()));
        }
        if self.top_titles == 0 {
            return Err(DashboardError::Config("top_titles must be at least 1".into()));
        }
        if self.source.trim().is_empty() {
            return Err(DashboardError::Config("source must not be empty".into()));
        }
        Ok(())
    }

    pub fn aggregate_params(&self) -> AggregateParams {
        AggregateParams {
            top_titles: self.top_titles,
            histogram_bins: self.histogram_bins,
            focus_title: self.focus_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.top_titles, 10);
        assert_eq!(config.focus_title, "Data Scientist");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            source = "data/salaries.parquet"
            focus_title = "Data Engineer"
            "#,
        )
        .unwrap();
        assert_eq!(config.source, "data/salaries.parquet");
        assert_eq!(config.focus_title, "Data Engineer");
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.aggregate_params().top_titles, 10);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let err = DashboardConfig::from_toml("histogram_bins = 0").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "top_titles = 5\n").unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.top_titles, 5);
        assert_eq!(config.source, DEFAULT_SOURCE);
    }
}
