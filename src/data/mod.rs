/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  remote .zip / local .zip .csv .json .parquet
///        │
///        ▼
///   ┌──────────────┐
///   │ source/loader │  fetch + parse → SurveyDataset (cached once)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SurveyDataset │  Vec<Record>, derived age per record
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category, age range, education → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ aggregate/summary  │  metrics + top-10 rankings per dimension
///   └───────────────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
pub mod summary;
