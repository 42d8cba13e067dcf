/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → TripTable (derives hour, month, weekday, travel time)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / weekday predicate → filtered TripTable
///   └──────────┘
///        │
///        ▼
///    stats, export
/// ```

pub mod filter;
pub mod loader;
pub mod model;
