/// Data layer: record types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset  │  Vec<SalaryRecord>, options per filter column
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  four set-membership predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs, top titles, histogram, remote shares, countries
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
