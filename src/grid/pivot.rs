use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{MapGrid, MapRecord};
use crate::error::MapParseError;

// ---------------------------------------------------------------------------
// AxisKey – total-ordered f64 for grouping and axis derivation
// ---------------------------------------------------------------------------

/// Wrapper giving axis values a total order so they can key a `BTreeMap`.
/// Grouping is by exact numeric equality; -0.0 folds into 0.0 so the two
/// representations land in one group.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisKey(f64);

impl AxisKey {
    fn new(value: f64) -> Self {
        Self(if value == 0.0 { 0.0 } else { value })
    }
}

impl Eq for AxisKey {}

impl Ord for AxisKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for AxisKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// One grid point after duplicate resolution: at most one per (rpm, load).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedPoint {
    pub rpm: f64,
    pub load: f64,
    pub timing: f64,
}

/// Collapse duplicate (rpm, load) pairs to the arithmetic mean of their
/// timing values. Output is sorted by (load, rpm) ascending; input row order
/// only affects floating-point summation order within a group.
pub fn aggregate(records: &[MapRecord]) -> Vec<AggregatedPoint> {
    let mut groups: BTreeMap<(AxisKey, AxisKey), (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((AxisKey::new(record.load), AxisKey::new(record.rpm)))
            .or_insert((0.0, 0));
        entry.0 += record.timing;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((load, rpm), (sum, count))| AggregatedPoint {
            rpm: rpm.0,
            load: load.0,
            timing: sum / count as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grid builder
// ---------------------------------------------------------------------------

/// Aggregated points laid out on the axis lattice; cells without a
/// measurement are `None` until the gap filler runs.
#[derive(Debug, Clone)]
pub struct SparseGrid {
    pub rpm_axis: Vec<f64>,
    pub load_axis: Vec<f64>,
    /// Row-major, shape `|load_axis| × |rpm_axis|`.
    pub z: Vec<Vec<Option<f64>>>,
}

/// Derive the sorted axes and place every aggregated point into its cell.
/// Single-value axes are fine; the grid just has a dimension of size 1.
pub fn pivot(points: &[AggregatedPoint]) -> SparseGrid {
    let rpm_keys: BTreeSet<AxisKey> = points.iter().map(|p| AxisKey::new(p.rpm)).collect();
    let load_keys: BTreeSet<AxisKey> = points.iter().map(|p| AxisKey::new(p.load)).collect();

    let rpm_index: BTreeMap<AxisKey, usize> =
        rpm_keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
    let load_index: BTreeMap<AxisKey, usize> =
        load_keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();

    let rpm_axis: Vec<f64> = rpm_keys.iter().map(|k| k.0).collect();
    let load_axis: Vec<f64> = load_keys.iter().map(|k| k.0).collect();

    let mut z = vec![vec![None; rpm_axis.len()]; load_axis.len()];
    for point in points {
        if let (Some(&col), Some(&row)) = (
            rpm_index.get(&AxisKey::new(point.rpm)),
            load_index.get(&AxisKey::new(point.load)),
        ) {
            z[row][col] = Some(point.timing);
        }
    }

    SparseGrid {
        rpm_axis,
        load_axis,
        z,
    }
}

impl SparseGrid {
    /// Finalize into a dense [`MapGrid`], materializing the coordinate
    /// meshes. Any cell still unfilled is a hard failure.
    pub fn into_grid(self) -> Result<MapGrid, MapParseError> {
        let cols = self.rpm_axis.len();

        let mut z = Vec::with_capacity(self.z.len());
        for row in self.z {
            let mut out = Vec::with_capacity(cols);
            for cell in row {
                match cell {
                    Some(v) => out.push(v),
                    None => return Err(MapParseError::UnfillableGrid),
                }
            }
            z.push(out);
        }

        let x: Vec<Vec<f64>> = (0..self.load_axis.len())
            .map(|_| self.rpm_axis.clone())
            .collect();
        let y: Vec<Vec<f64>> = self
            .load_axis
            .iter()
            .map(|&load| vec![load; cols])
            .collect();

        Ok(MapGrid {
            rpm_axis: self.rpm_axis,
            load_axis: self.load_axis,
            x,
            y,
            z,
        })
    }
}
