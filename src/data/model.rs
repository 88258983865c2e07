use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// FieldValue – a single categorical cell used in filters
// ---------------------------------------------------------------------------

/// A categorical cell value. Years are integers, everything else is text.
/// Ordered so the per-column option lists come out sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// FilterColumn – the four categorical columns the sidebar filters on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Column name in the source file.
    pub fn source_name(self) -> &'static str {
        match self {
            FilterColumn::Year => "ano",
            FilterColumn::Seniority => "senioridade",
            FilterColumn::Contract => "contrato",
            FilterColumn::CompanySize => "tamanho_empresa",
        }
    }

    /// Label shown in the filter panel.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::Contract => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// One salary observation. Field names follow the source CSV header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i64,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "remoto")]
    pub remote: String,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
    /// Annual salary in USD.
    pub usd: f64,
}

impl SalaryRecord {
    /// The value this record holds for a filter column.
    pub fn value_of(&self, column: FilterColumn) -> FieldValue {
        match column {
            FilterColumn::Year => FieldValue::Integer(self.year),
            FilterColumn::Seniority => FieldValue::Text(self.seniority.clone()),
            FilterColumn::Contract => FieldValue::Text(self.contract.clone()),
            FilterColumn::CompanySize => FieldValue::Text(self.company_size.clone()),
        }
    }

    /// Cheap membership check without allocating a `FieldValue` for text columns.
    pub fn matches(&self, column: FilterColumn, selected: &BTreeSet<FieldValue>) -> bool {
        match column {
            FilterColumn::Year => selected.contains(&FieldValue::Integer(self.year)),
            FilterColumn::Seniority => contains_text(selected, &self.seniority),
            FilterColumn::Contract => contains_text(selected, &self.contract),
            FilterColumn::CompanySize => contains_text(selected, &self.company_size),
        }
    }
}

fn contains_text(selected: &BTreeSet<FieldValue>, needle: &str) -> bool {
    selected
        .iter()
        .any(|v| matches!(v, FieldValue::Text(s) if s == needle))
}

/// Column names every source must provide, in display order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "remoto",
    "residencia_iso3",
    "usd",
];

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed option lists per filter column.
/// Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of unique values.
    pub unique_values: BTreeMap<FilterColumn, BTreeSet<FieldValue>>,
}

impl SalaryDataset {
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<FilterColumn, BTreeSet<FieldValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for rec in &records {
            for col in FilterColumn::ALL {
                unique_values.entry(col).or_default().insert(rec.value_of(col));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted option list for a filter column.
    pub fn options(&self, column: FilterColumn) -> Option<&BTreeSet<FieldValue>> {
        self.unique_values.get(&column)
    }
}

#[cfg(test)]
pub(crate) fn record(
    year: i64,
    seniority: &str,
    job_title: &str,
    usd: f64,
) -> SalaryRecord {
    SalaryRecord {
        year,
        seniority: seniority.to_string(),
        contract: "integral".to_string(),
        company_size: "media".to_string(),
        job_title: job_title.to_string(),
        remote: "remoto".to_string(),
        residence_iso3: "USA".to_string(),
        usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_values_sorted_per_column() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "senior", "Data Engineer", 1.0),
            record(2022, "junior", "Data Analyst", 2.0),
            record(2024, "pleno", "Data Engineer", 3.0),
        ]);

        let years: Vec<_> = ds.options(FilterColumn::Year).unwrap().iter().cloned().collect();
        assert_eq!(years, vec![FieldValue::Integer(2022), FieldValue::Integer(2024)]);

        let seniority: Vec<String> = ds
            .options(FilterColumn::Seniority)
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(seniority, vec!["junior", "pleno", "senior"]);
        assert_eq!(ds.options(FilterColumn::Contract).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_dataset_still_has_all_columns() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for col in FilterColumn::ALL {
            assert!(ds.options(col).unwrap().is_empty());
        }
    }

    #[test]
    fn test_matches_does_not_confuse_year_and_text() {
        let rec = record(2023, "2023", "Data Scientist", 1.0);
        let only_text: BTreeSet<FieldValue> = [FieldValue::from("2023")].into_iter().collect();
        assert!(!rec.matches(FilterColumn::Year, &only_text));
        assert!(rec.matches(FilterColumn::Seniority, &only_text));
    }
}
