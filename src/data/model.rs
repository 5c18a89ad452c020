use serde::Serialize;

// ---------------------------------------------------------------------------
// MapRecord – one coerced row of the source table
// ---------------------------------------------------------------------------

/// A single measurement: engine speed, engine load, ignition timing.
///
/// Records only exist between loading and aggregation. Duplicate (rpm, load)
/// pairs are permitted here and resolved later by averaging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRecord {
    pub rpm: f64,
    pub load: f64,
    pub timing: f64,
}

// ---------------------------------------------------------------------------
// MapGrid – the dense parsed map
// ---------------------------------------------------------------------------

/// The fully parsed map: coordinate meshes plus timing values.
///
/// All three matrices are row-major with shape `|load_axis| × |rpm_axis|`,
/// and satisfy `x[i][j] == rpm_axis[j]`, `y[i][j] == load_axis[i]`. After a
/// successful parse `z` has a value in every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    /// Distinct RPM values, strictly ascending (grid columns).
    pub rpm_axis: Vec<f64>,
    /// Distinct Load values, strictly ascending (grid rows).
    pub load_axis: Vec<f64>,
    /// RPM mesh.
    pub x: Vec<Vec<f64>>,
    /// Load mesh.
    pub y: Vec<Vec<f64>>,
    /// Timing values.
    pub z: Vec<Vec<f64>>,
}

impl MapGrid {
    pub fn rows(&self) -> usize {
        self.load_axis.len()
    }

    pub fn cols(&self) -> usize {
        self.rpm_axis.len()
    }

    /// Flatten into the JSON payload served at the tool boundary.
    pub fn summary(&self) -> GridSummary {
        let z_grid_flat: Vec<f64> = self.z.iter().flatten().copied().collect();
        GridSummary {
            rpm_axis: self.rpm_axis.clone(),
            load_axis: self.load_axis.clone(),
            total_points: z_grid_flat.len(),
            shape: GridShape {
                rows: self.rows(),
                cols: self.cols(),
            },
            z_grid_flat,
        }
    }
}

// ---------------------------------------------------------------------------
// GridSummary – serialized boundary representation
// ---------------------------------------------------------------------------

/// JSON shape a serving layer returns for a parsed map: the two axes, the
/// timing matrix flattened row-major, and its dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub rpm_axis: Vec<f64>,
    pub load_axis: Vec<f64>,
    pub z_grid_flat: Vec<f64>,
    pub shape: GridShape,
    pub total_points: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}
