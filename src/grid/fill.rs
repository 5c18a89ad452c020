use log::debug;

use super::delaunay::Triangulation;
use super::pivot::SparseGrid;
use crate::error::MapParseError;

// ---------------------------------------------------------------------------
// Gap filler
// ---------------------------------------------------------------------------

/// Fill every empty cell of the grid.
///
/// Two phases: a piecewise-linear estimate from a triangulation of the known
/// points for gaps inside their convex hull, then nearest-neighbour lookup
/// for anything outside it. Linear interpolation preserves the measured
/// surface inside the sampled envelope; nearest-neighbour keeps edge values
/// bounded instead of extrapolating a linear trend.
///
/// No-op when the grid is already dense. Fails with
/// [`MapParseError::InsufficientData`] when fewer than 3 known points exist.
pub fn fill_gaps(grid: &mut SparseGrid) -> Result<(), MapParseError> {
    // Row-major scan: known-point order is fixed, so nearest-neighbour ties
    // resolve to the first point in axis order.
    let mut known_points: Vec<[f64; 2]> = Vec::new();
    let mut known_values: Vec<f64> = Vec::new();
    let mut gaps: Vec<(usize, usize)> = Vec::new();

    for (i, &load) in grid.load_axis.iter().enumerate() {
        for (j, &rpm) in grid.rpm_axis.iter().enumerate() {
            match grid.z[i][j] {
                Some(value) => {
                    known_points.push([rpm, load]);
                    known_values.push(value);
                }
                None => gaps.push((i, j)),
            }
        }
    }

    if gaps.is_empty() {
        return Ok(());
    }
    if known_points.len() < 3 {
        return Err(MapParseError::InsufficientData {
            known: known_points.len(),
        });
    }

    let triangulation = Triangulation::build(&known_points);

    let mut fallback_count = 0usize;
    for &(i, j) in &gaps {
        let query = [grid.rpm_axis[j], grid.load_axis[i]];
        let value = match triangulation.linear_at(query, &known_values) {
            Some(estimate) => estimate,
            None => {
                fallback_count += 1;
                nearest_value(&known_points, &known_values, query)
            }
        };
        grid.z[i][j] = Some(value);
    }

    debug!(
        "filled {} gaps from {} known points ({fallback_count} outside the hull via nearest neighbour)",
        gaps.len(),
        known_points.len()
    );

    Ok(())
}

/// Value of the closest known point by Euclidean distance in (rpm, load)
/// space. Strict `<` keeps the first occurrence on ties.
fn nearest_value(points: &[[f64; 2]], values: &[f64], query: [f64; 2]) -> f64 {
    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (idx, point) in points.iter().enumerate() {
        let dist = (point[0] - query[0]).powi(2) + (point[1] - query[1]).powi(2);
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    values[best]
}
