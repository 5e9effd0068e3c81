use ndarray::Array1;

use crate::{cut::Cut, error::Error};
pub use ellipsoid_kernel::CutStatus;

/// The contract both [`crate::Ellipsoid`] and [`crate::EllipsoidStable`]
/// implement, and the one the four drivers in [`crate::driver`] are written
/// against. `Clone` is required by `bsearch_adaptor`, which clones the
/// space to probe feasibility at a candidate target without disturbing the
/// caller's space.
pub trait SearchSpace: Clone {
    /// Ambient dimension, fixed at construction.
    fn n(&self) -> usize;

    /// Read-only view of the current center.
    fn xc(&self) -> &Array1<f64>;

    /// Overwrite the center directly (used by `bsearch_adaptor`).
    fn set_xc(&mut self, xc: Array1<f64>);

    /// `τ²` cached from the most recent successful update; `0.0` before the
    /// first update.
    fn tsq(&self) -> f64;

    /// Apply a cut, shrinking the space to the minimum-volume ellipsoid
    /// containing the intersection with the cut's half-space(s).
    fn update(&mut self, cut: &Cut) -> Result<CutStatus, Error>;
}
