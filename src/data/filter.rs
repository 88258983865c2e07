use std::collections::{BTreeMap, BTreeSet};

use super::model::{FieldValue, FilterColumn, SalaryDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of allowed values.
/// A column that is absent, or whose set is empty, allows nothing.
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<FieldValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    FilterColumn::ALL
        .iter()
        .map(|&col| (col, dataset.options(col).cloned().unwrap_or_default()))
        .collect()
}

/// Return indices of records that pass all four column filters.
///
/// A record passes a column filter when its value for that column is in the
/// selected set. There is no implicit "allow all": a missing or empty set
/// rejects every record.
pub fn filtered_indices(dataset: &SalaryDataset, filters: &FilterState) -> Vec<usize> {
    let mut active: Vec<(FilterColumn, &BTreeSet<FieldValue>)> = Vec::with_capacity(4);
    for col in FilterColumn::ALL {
        let Some(selected) = filters.get(&col).filter(|s| !s.is_empty()) else {
            return Vec::new();
        };
        // Everything selected → no effective filter on this column.
        if let Some(all_vals) = dataset.options(col) {
            if all_vals.is_subset(selected) {
                continue;
            }
        }
        active.push((col, selected));
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| active.iter().all(|(col, selected)| rec.matches(*col, selected)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> SalaryDataset {
        let mut contract = record(2024, "senior", "ML Engineer", 150_000.0);
        contract.contract = "freelancer".to_string();
        let mut small = record(2022, "pleno", "Data Analyst", 60_000.0);
        small.company_size = "pequena".to_string();
        SalaryDataset::from_records(vec![
            record(2023, "senior", "Data Scientist", 100_000.0),
            record(2023, "junior", "Data Scientist", 50_000.0),
            contract,
            small,
        ])
    }

    fn set(values: &[FieldValue]) -> BTreeSet<FieldValue> {
        values.iter().cloned().collect()
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let ds = sample();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_seniority_selection() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Seniority, set(&["senior".into()]));
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn test_conjunction_of_columns() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Seniority, set(&["senior".into()]));
        filters.insert(FilterColumn::Year, set(&[FieldValue::Integer(2023)]));
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        let ds = sample();
        for col in FilterColumn::ALL {
            let mut filters = init_filter_state(&ds);
            filters.insert(col, BTreeSet::new());
            assert!(filtered_indices(&ds, &filters).is_empty(), "column {col}");
        }
    }

    #[test]
    fn test_missing_column_yields_nothing() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.remove(&FilterColumn::CompanySize);
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn test_unknown_values_never_match() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Contract, set(&["estagio".into()]));
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn test_results_respect_every_selected_set() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Year, set(&[FieldValue::Integer(2023), FieldValue::Integer(2024)]));
        filters.insert(FilterColumn::CompanySize, set(&["media".into()]));

        let idx = filtered_indices(&ds, &filters);
        assert!(!idx.is_empty());
        for i in idx {
            let rec = &ds.records[i];
            for col in FilterColumn::ALL {
                assert!(filters[&col].contains(&rec.value_of(col)));
            }
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let ds = sample();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Seniority, set(&["senior".into(), "pleno".into()]));

        let first = filtered_indices(&ds, &filters);
        let subset = SalaryDataset::from_records(
            first.iter().map(|&i| ds.records[i].clone()).collect(),
        );
        let second = filtered_indices(&subset, &filters);
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
    }
}
