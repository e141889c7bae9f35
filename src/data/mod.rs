/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (memoized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region selection → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  type counts, region stats, correlation
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
