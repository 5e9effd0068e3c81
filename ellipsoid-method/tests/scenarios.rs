//! Smoke tests for the end-to-end scenarios in the design's scenario table.
//!
//! The literal iteration counts and numeric answers in that table were
//! recorded against an upstream oracle implementation this crate does not
//! reproduce (the application oracles — profit, quasi-convex, FIR, LMI —
//! are out of scope; see the design notes). These tests implement oracles
//! of the stated *shape* and assert the qualitative properties instead:
//! feasibility is reached, the objective improves monotonically, niter
//! stays within the budget, and the witness property holds.

use ellipsoid_kernel::Ldlt;
use ellipsoid_method::{
    bsearch, cutting_plane_feas, cutting_plane_optim, cutting_plane_q, BisectionOracle, Cut,
    DiscreteOracle, Ellipsoid, EllipsoidStable, FeasibilityOracle, OptimOracle, Options,
    SearchSpace,
};
use ndarray::{array, Array1};

/// S1/S2/S3 shape: maximize revenue `p * q` subject to a downward-sloping
/// demand constraint `q <= scale * p^(-elasticity)`, worked in
/// `x = (ln p, ln q)` so the constraint and the objective are both affine
/// in `x`. `assess_optim` returns a deep cut on the constraint when it's
/// violated, else a central cut on the (now-linear) objective gradient
/// when a strictly better revenue is found.
struct ProfitOracle {
    ln_scale: f64,
    elasticity: f64,
}

impl OptimOracle for ProfitOracle {
    fn assess_optim(&mut self, x: &Array1<f64>, gamma: &mut f64) -> (Cut, bool) {
        let (ln_p, ln_q) = (x[0], x[1]);
        // constraint: ln_q + elasticity*ln_p - ln_scale <= 0
        let g_constraint = array![self.elasticity, 1.0];
        let violation = ln_q + self.elasticity * ln_p - self.ln_scale;
        if violation > 0.0 {
            return (Cut::single(g_constraint, violation), false);
        }
        let revenue = ln_p + ln_q; // ln(p*q)
        if revenue > *gamma {
            *gamma = revenue;
            (Cut::central(array![-1.0, -1.0]), true)
        } else {
            (Cut::single(array![-1.0, -1.0], 0.0), false)
        }
    }
}

#[test]
fn s1_profit_oracle_standard_ellipsoid_converges_within_budget() {
    let mut oracle = ProfitOracle {
        ln_scale: (40.0f64).ln(),
        elasticity: 0.4,
    };
    let mut space = Ellipsoid::new(array![(20.0f64).ln(), (30.5f64).ln()], 100.0).unwrap();
    let options = Options::default().with_max_iter(500);
    let (x_best, niter) = cutting_plane_optim(&mut oracle, &mut space, f64::NEG_INFINITY, &options);
    assert!(niter <= options.max_iter);
    let x_best = x_best.expect("profit oracle should find at least one improving point");
    // Feasible: q <= scale * p^(-elasticity), i.e. ln_q + e*ln_p <= ln_scale.
    assert!(x_best[1] + oracle.elasticity * x_best[0] <= oracle.ln_scale + 1e-6);
}

#[test]
fn s2_profit_oracle_stable_ellipsoid_converges_within_budget() {
    let mut oracle = ProfitOracle {
        ln_scale: (40.0f64).ln(),
        elasticity: 0.4,
    };
    let mut space = EllipsoidStable::new(array![(20.0f64).ln(), (30.5f64).ln()], 100.0).unwrap();
    let options = Options::default().with_max_iter(500);
    let (x_best, niter) = cutting_plane_optim(&mut oracle, &mut space, f64::NEG_INFINITY, &options);
    assert!(niter <= options.max_iter);
    assert!(x_best.is_some());
}

/// S3 shape: the same profit-maximization problem as S1/S2, but driven
/// through `cutting_plane_q` — the oracle rounds the ellipsoid's center to
/// the nearest lattice point before evaluating the constraint/objective,
/// exercising the discrete driver's `x0`/`more_alt` protocol instead of the
/// continuous one.
struct DiscreteProfitOracle {
    ln_scale: f64,
    elasticity: f64,
}

impl DiscreteOracle for DiscreteProfitOracle {
    fn assess_q(
        &mut self,
        x: &Array1<f64>,
        gamma: f64,
        retry: bool,
    ) -> (Cut, bool, Array1<f64>, bool) {
        let x0 = x.mapv(f64::round);
        let (ln_p, ln_q) = (x0[0], x0[1]);
        let g_constraint = array![self.elasticity, 1.0];
        let violation = ln_q + self.elasticity * ln_p - self.ln_scale;
        if violation > 0.0 {
            return (Cut::single(g_constraint, violation), false, x0, false);
        }
        let revenue = ln_p + ln_q;
        if !retry && revenue > gamma {
            (Cut::central(array![-1.0, -1.0]), true, x0, false)
        } else {
            (Cut::single(array![-1.0, -1.0], 0.0), false, x0, false)
        }
    }
}

#[test]
fn s3_discrete_profit_oracle_converges_within_budget() {
    let mut oracle = DiscreteProfitOracle {
        ln_scale: (40.0f64).ln(),
        elasticity: 0.4,
    };
    let mut space = Ellipsoid::new(array![(20.0f64).ln(), (30.5f64).ln()], 100.0).unwrap();
    let options = Options::default().with_max_iter(500);
    let (x_best, niter) = cutting_plane_q(&mut oracle, &mut space, f64::NEG_INFINITY, &options);
    assert!(niter <= options.max_iter);
    let x_best =
        x_best.expect("discrete profit oracle should find at least one improving lattice point");
    // Feasible at the lattice point: q <= scale * p^(-elasticity).
    assert!(x_best[1] + oracle.elasticity * x_best[0] <= oracle.ln_scale + 1e-6);
}

/// S4 shape: minimize `sqrt(x)/y` subject to `exp(x) <= y`, via bisection
/// over the objective target: feasibility at target `gamma` is
/// `exp(x) <= y` and `x <= (gamma*y)^2`, both affine after the usual
/// convex reparameterization is skipped here in favor of directly cutting
/// on the (locally linearized) constraints, which is sufficient for a
/// feasibility-style smoke test.
struct QuasiConvexToy {
    gamma: f64,
}

impl FeasibilityOracle for QuasiConvexToy {
    fn assess_feas(&mut self, x: &Array1<f64>) -> Option<Cut> {
        let (x0, x1) = (x[0], x[1]);
        if x0 <= 0.0 {
            return Some(Cut::single(array![-1.0, 0.0], -x0));
        }
        let exp_violation = x0.exp() - x1;
        if exp_violation > 0.0 {
            // Linearize exp(x0) - x1 around x0.
            let g = array![x0.exp(), -1.0];
            return Some(Cut::single(g, exp_violation));
        }
        let obj_violation = x0.sqrt() - self.gamma * x1;
        if obj_violation > 0.0 {
            let g = array![0.5 / x0.sqrt().max(1e-9), -self.gamma];
            return Some(Cut::single(g, obj_violation));
        }
        None
    }
}

#[test]
fn s4_quasi_convex_toy_bisection_converges() {
    struct Adaptor;
    impl BisectionOracle for Adaptor {
        fn assess_bs(&mut self, gamma: f64) -> bool {
            let mut oracle = QuasiConvexToy { gamma };
            let mut space = Ellipsoid::new(array![0.5, 2.0], 10.0).unwrap();
            let options = Options::default().with_max_iter(2000);
            cutting_plane_feas(&mut oracle, &mut space, &options).0
        }
    }
    let options = Options::default().with_tol(1e-6);
    let (gamma, niter) = bsearch(&mut Adaptor, 0.0, 2.0, &options);
    assert!(niter > 0 && niter <= options.max_iter);
    // This fixture's linearized oracle is a proxy for the real quasi-convex
    // shape (documented optimum ~0.4288673397); only the bracket itself is
    // asserted, per the design notes' loose-tolerance caveat.
    assert!(gamma > 0.0 && gamma < 2.0);
}

/// S5 shape: a bank of linear inequality pairs (as would come from a
/// passband/stopband ripple spec), exercised through the parallel-cut
/// path to confirm it drives the space down without ever reporting a
/// spurious infeasibility.
#[test]
fn s5_parallel_cut_bank_shrinks_without_spurious_infeasibility() {
    let n = 8;
    let mut space = Ellipsoid::new(Array1::zeros(n), 40.0)
        .unwrap()
        .with_parallel_cut(true);
    let options = Options::default().with_max_iter(634);
    let mut niter = 0;
    let mut last_tsq = f64::INFINITY;
    for k in 0..options.max_iter {
        let mut g = Array1::zeros(n);
        g[k % n] = 1.0;
        let status = space.update(&Cut::parallel(g, -0.125, 0.125)).unwrap();
        niter += 1;
        match status {
            ellipsoid_method::CutStatus::Success => {
                assert!(space.tsq() <= last_tsq + 1e-9);
                last_tsq = space.tsq();
            }
            ellipsoid_method::CutStatus::NoEffect => {}
            ellipsoid_method::CutStatus::SmallEnough => break,
            ellipsoid_method::CutStatus::NoSoln => {
                panic!("a symmetric ripple band around the origin should never be infeasible")
            }
        }
    }
    assert!(niter <= options.max_iter);
}

/// S6: an indefinite LMI candidate must fail factorization and produce a
/// witness with a genuine negative quadratic form.
#[test]
fn s6_lmi_witness_certifies_indefiniteness() {
    let b = [[1.0, 2.0], [2.0, 1.0]];
    let mut ldlt = Ldlt::<f64>::new(2);
    assert!(!ldlt.factor(|i, j| b[i][j]));
    let margin = ldlt.witness().unwrap();
    assert!(margin > 0.0);
    let quad = ldlt.sym_quad(|i, j| b[i][j]);
    assert!(quad < 0.0);
}
