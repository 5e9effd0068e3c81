use ndarray::Array1;

use crate::cut::Cut;

/// A feasibility separation oracle: given a point, either certify it
/// feasible (`None`) or hand back a cut that excludes it and everything on
/// the wrong side of the cutting hyperplane.
pub trait FeasibilityOracle {
    fn assess_feas(&mut self, x: &Array1<f64>) -> Option<Cut>;
}

/// An optimization oracle. `gamma` is the current objective target; the
/// oracle mutates it in place when it finds a strictly better achievable
/// value (`shrunk = true`), in which case the returned cut is central and
/// the driver records `x` as the new incumbent.
pub trait OptimOracle {
    fn assess_optim(&mut self, x: &Array1<f64>, gamma: &mut f64) -> (Cut, bool);
}

/// An oracle for discrete (lattice) feasibility/optimization, used by
/// `cutting_plane_q`. `retry` tells the oracle it is being asked again for
/// the same rounded point after the space reported `NoEffect`, and that it
/// should try an alternative cut rather than repeat the last one.
pub trait DiscreteOracle {
    fn assess_q(
        &mut self,
        x: &Array1<f64>,
        gamma: f64,
        retry: bool,
    ) -> (Cut, bool, Array1<f64>, bool);
}

/// A one-dimensional bisection oracle: is the inner feasibility problem
/// satisfiable with objective target `gamma`?
pub trait BisectionOracle {
    fn assess_bs(&mut self, gamma: f64) -> bool;
}
