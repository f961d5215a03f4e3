/// Data layer: core types, loading, the shared table and filtering.
///
/// Architecture:
/// ```text
///  bundled .csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PenguinDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ provider  │  process-wide read-only Arc<PenguinDataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  species selection → FilteredView (row indices)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod provider;
