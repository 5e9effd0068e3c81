use ndarray::Array1;

use crate::{
    oracle::{BisectionOracle, DiscreteOracle, FeasibilityOracle, OptimOracle},
    options::Options,
    space::{CutStatus, SearchSpace},
};

/// Pure feasibility search: drive `space` until the oracle reports `x`
/// feasible, or a cut shrinks the space below `options.tol`, or `max_iter`
/// is spent. Returns `(feasible, niter)`.
#[tracing::instrument(skip(oracle, space))]
pub fn cutting_plane_feas<O, S>(oracle: &mut O, space: &mut S, options: &Options) -> (bool, usize)
where
    O: FeasibilityOracle,
    S: SearchSpace,
{
    for niter in 1..=options.max_iter {
        let cut = match oracle.assess_feas(space.xc()) {
            None => {
                tracing::info!(niter, converged = true, "feasibility found");
                return (true, niter);
            }
            Some(cut) => cut,
        };
        let status = match space.update(&cut) {
            Ok(s) => s,
            Err(err) => {
                tracing::info!(niter, converged = false, %err, "oracle produced invalid cut");
                return (false, niter);
            }
        };
        tracing::debug!(niter, tsq = space.tsq(), ?status, "feas iteration");
        if status != CutStatus::Success || space.tsq() < options.tol {
            tracing::info!(niter, converged = false, "infeasible or space exhausted");
            return (false, niter);
        }
    }
    tracing::info!(niter = options.max_iter, converged = false, "max_iter reached");
    (false, options.max_iter)
}

/// Convex optimization: minimize the objective the oracle implicitly
/// tracks via `gamma`. Returns the best feasible point found (`None` if the
/// oracle never reported a shrinking cut) and the iteration count.
#[tracing::instrument(skip(oracle, space))]
pub fn cutting_plane_optim<O, S>(
    oracle: &mut O,
    space: &mut S,
    mut gamma: f64,
    options: &Options,
) -> (Option<Array1<f64>>, usize)
where
    O: OptimOracle,
    S: SearchSpace,
{
    let mut x_best: Option<Array1<f64>> = None;
    for niter in 1..=options.max_iter {
        let (cut, shrunk) = oracle.assess_optim(space.xc(), &mut gamma);
        if shrunk {
            x_best = Some(space.xc().clone());
        }
        let status = match space.update(&cut) {
            Ok(s) => s,
            Err(err) => {
                tracing::info!(niter, %err, "oracle produced invalid cut");
                return (x_best, niter);
            }
        };
        tracing::debug!(niter, tsq = space.tsq(), ?status, gamma, "optim iteration");
        if status != CutStatus::Success || space.tsq() < options.tol {
            tracing::info!(niter, converged = x_best.is_some(), "terminated");
            return (x_best, niter);
        }
    }
    tracing::info!(niter = options.max_iter, "max_iter reached");
    (x_best, options.max_iter)
}

/// Discrete (lattice) optimization. `gamma` is the running objective
/// target; the oracle evaluates at the rounded lattice point `x0` it
/// returns alongside the cut.
#[tracing::instrument(skip(oracle, space))]
pub fn cutting_plane_q<O, S>(
    oracle: &mut O,
    space: &mut S,
    mut gamma: f64,
    options: &Options,
) -> (Option<Array1<f64>>, usize)
where
    O: DiscreteOracle,
    S: SearchSpace,
{
    let mut x_best: Option<Array1<f64>> = None;
    let mut retry = false;
    let mut niter = 0;
    while niter < options.max_iter {
        niter += 1;
        let (cut, shrunk, x0, more_alt) = oracle.assess_q(space.xc(), gamma, retry);
        if shrunk {
            x_best = Some(x0);
            retry = false;
        }
        let status = match space.update(&cut) {
            Ok(s) => s,
            Err(err) => {
                tracing::info!(niter, %err, "oracle produced invalid cut");
                return (x_best, niter);
            }
        };
        tracing::debug!(niter, tsq = space.tsq(), ?status, "discrete iteration");
        match status {
            CutStatus::Success => {
                retry = false;
                if space.tsq() < options.tol {
                    tracing::info!(niter, converged = x_best.is_some(), "space exhausted");
                    return (x_best, niter);
                }
            }
            CutStatus::NoEffect => {
                if !more_alt {
                    tracing::info!(niter, converged = x_best.is_some(), "no alternative cut");
                    return (x_best, niter);
                }
                retry = true;
            }
            CutStatus::NoSoln | CutStatus::SmallEnough => {
                tracing::info!(niter, converged = x_best.is_some(), "terminated");
                return (x_best, niter);
            }
        }
    }
    tracing::info!(niter, "max_iter reached");
    (x_best, niter)
}

/// One-dimensional bisection over `[lo, hi]`. Shrinks `hi` whenever
/// `assess_bs(mid)` is feasible, otherwise raises `lo`. Terminates when the
/// half-interval falls below `options.tol`.
#[tracing::instrument(skip(oracle))]
pub fn bsearch<O>(oracle: &mut O, lo: f64, hi: f64, options: &Options) -> (f64, usize)
where
    O: BisectionOracle,
{
    let mut lo = lo;
    let mut hi = hi;
    for niter in 1..=options.max_iter {
        let mid = lo + (hi - lo) / 2.0;
        if oracle.assess_bs(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
        tracing::debug!(niter, lo, hi, "bsearch iteration");
        if (hi - lo) / 2.0 < options.tol {
            tracing::info!(niter, converged = true, hi, "bsearch converged");
            return (hi, niter);
        }
    }
    tracing::info!(niter = options.max_iter, converged = false, "max_iter reached");
    (hi, options.max_iter)
}

/// Wraps a `(FeasibilityOracle, SearchSpace)` pair so it can be driven by
/// `bsearch`: at each candidate `gamma` it tells the oracle the new target
/// (via `set_gamma`), clones the space, asks whether the inner feasibility
/// problem converges, and on success copies the inner center back out to
/// the caller's space. `set_gamma` is how a feasibility oracle built around
/// a fixed `Array1<f64>`-shaped problem is re-parameterized per probe,
/// since `FeasibilityOracle::assess_feas` itself takes no objective target.
pub struct BsearchAdaptor<'a, O, S, F> {
    oracle: &'a mut O,
    space: &'a mut S,
    set_gamma: F,
    feas_options: Options,
}

impl<'a, O, S, F> BsearchAdaptor<'a, O, S, F>
where
    O: FeasibilityOracle,
    S: SearchSpace,
    F: FnMut(&mut O, f64),
{
    pub fn new(oracle: &'a mut O, space: &'a mut S, set_gamma: F, feas_options: Options) -> Self {
        Self {
            oracle,
            space,
            set_gamma,
            feas_options,
        }
    }
}

impl<'a, O, S, F> BisectionOracle for BsearchAdaptor<'a, O, S, F>
where
    O: FeasibilityOracle,
    S: SearchSpace,
    F: FnMut(&mut O, f64),
{
    fn assess_bs(&mut self, gamma: f64) -> bool {
        (self.set_gamma)(self.oracle, gamma);
        let mut probe = self.space.clone();
        let (feasible, _) = cutting_plane_feas(self.oracle, &mut probe, &self.feas_options);
        if feasible {
            self.space.set_xc(probe.xc().clone());
        }
        feasible
    }
}
