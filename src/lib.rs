//! maplab: parse ECU ignition map measurements into a dense grid.
//!
//! Pipeline:
//! ```text
//!   map.csv  (RPM, Load, Timing rows)
//!      │
//!      ▼
//!  ┌──────────┐
//!  │  loader   │  read table, check columns, coerce cells → Vec<MapRecord>
//!  └──────────┘
//!      │
//!      ▼
//!  ┌──────────┐
//!  │  pivot    │  average duplicates, derive axes, lay out sparse grid
//!  └──────────┘
//!      │
//!      ▼
//!  ┌──────────┐
//!  │  fill     │  triangulated linear interpolation + nearest fallback
//!  └──────────┘
//!      │
//!      ▼
//!   MapGrid (X, Y, Z, no gaps remaining)
//! ```

pub mod data;
pub mod error;
pub mod grid;

pub use data::model::{GridShape, GridSummary, MapGrid, MapRecord};
pub use error::MapParseError;

use std::path::Path;

/// Load an ECU map CSV and produce a dense, fully interpolated grid.
///
/// One-shot and stateless: the file is read once, nothing is cached, and the
/// returned [`MapGrid`] is owned by the caller. Any failure aborts the whole
/// transform with the most specific [`MapParseError`] variant.
pub fn parse_map_file(path: &Path) -> Result<MapGrid, MapParseError> {
    let records = data::loader::load_map_csv(path)?;
    let points = grid::pivot::aggregate(&records);
    let mut sparse = grid::pivot::pivot(&points);
    grid::fill::fill_gaps(&mut sparse)?;
    sparse.into_grid()
}
