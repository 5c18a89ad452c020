/// Grid layer: aggregation, pivoting, and gap filling.
///
/// `pivot` collapses duplicate (RPM, Load) pairs and lays the averaged values
/// into a sparse |Load|×|RPM| grid; `fill` turns that into a dense grid by
/// interpolating every missing cell.
pub mod delaunay;
pub mod fill;
pub mod pivot;
