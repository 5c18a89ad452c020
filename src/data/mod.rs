/// Data layer: core types and CSV loading.
///
/// Architecture:
/// ```text
///       map.csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  read header + rows, verify required columns
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  coercer  │  parse RPM / Load / Timing cells, drop invalid rows
///    └──────────┘
///          │
///          ▼
///    Vec<MapRecord>  (handed to the grid layer)
/// ```

pub mod loader;
pub mod model;
