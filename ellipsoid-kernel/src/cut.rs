//! Cut classification and update-coefficient algebra.
//!
//! `classify_single` and `classify_parallel` are pure functions: given the
//! current `τ² = gᵀQg` and the cut's `β` (or `β₀, β₁` pair), they classify
//! the cut and, on [`CutStatus::Success`], return the `(ρ, σ, δ)` triple the
//! space uses to shrink itself. Neither function allocates or mutates
//! anything; both are safe to call from the hot loop of `update`.

use num_traits::Float;

/// Outcome of classifying a cut against the current ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutStatus {
    /// The update coefficients were computed; the space should apply them.
    Success,
    /// The half-space misses the ellipsoid entirely: the feasible set is empty.
    NoSoln,
    /// The cut is tangent to the ellipsoid's boundary (`β == τ`, `δ == 0`
    /// exactly) — it has shrunk to a single point. Reached directly from
    /// `classify_single`, and from `classify_parallel` whenever it falls
    /// back to the single-cut path at that boundary. Treated like
    /// `NoEffect` by drivers.
    SmallEnough,
    /// The cut does not reduce the ellipsoid.
    NoEffect,
}

/// Center-shift scale (`ρ`), rank-one coefficient (`σ`), and volume-shrink
/// factor (`δ`) produced by the cut calculator. Only meaningful when the
/// paired [`CutStatus`] is `Success`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutParams<T> {
    pub rho: T,
    pub sigma: T,
    pub delta: T,
}

impl<T: Float> CutParams<T> {
    fn zero() -> Self {
        Self {
            rho: T::zero(),
            sigma: T::zero(),
            delta: T::zero(),
        }
    }
}

/// Classify a single (deep/central/shallow) cut.
///
/// `tau_sq` is `τ² = gᵀQg` (before `κ` is folded in by the caller — see
/// `ellipsoid-method`'s `Ellipsoid::update`). `n` is the ambient dimension.
pub fn classify_single<T: Float>(tau_sq: T, beta: T, n: usize) -> (CutStatus, CutParams<T>) {
    let tau = tau_sq.sqrt();
    if beta > tau {
        return (CutStatus::NoSoln, CutParams::zero());
    }
    // beta == tau exactly: the cut is tangent to the ellipsoid's boundary.
    // delta = n^2*(tau^2-beta^2) / ((n^2-1)*tau^2) is then exactly zero —
    // the formula's own way of saying the ellipsoid has already shrunk to
    // a single point along this cut and there is nothing left to update.
    if beta == tau {
        return (CutStatus::SmallEnough, CutParams::zero());
    }
    if beta <= -tau {
        return (CutStatus::NoEffect, CutParams::zero());
    }
    (CutStatus::Success, single_cut_params(tau, tau_sq, beta, n))
}

fn single_cut_params<T: Float>(tau: T, tau_sq: T, beta: T, n: usize) -> CutParams<T> {
    let nf = T::from(n).expect("dimension fits in the scalar type");
    let one = T::one();
    let eta = tau + nf * beta;
    let sigma = (eta + eta) / ((nf + one) * (tau + beta));
    let rho = eta / (nf + one);
    let delta = (nf * nf * (tau_sq - beta * beta)) / ((nf * nf - one) * tau_sq);
    CutParams { rho, sigma, delta }
}

/// Classify a parallel cut `(β₀, β₁)` with `β₀ ≤ β₁`.
///
/// Falls back to [`classify_single`] on `β₀` whenever the parallel cut
/// degenerates (policy disabled, `β₁ ≤ 0`, `τ ≤ β₁`, or `β₀ == β₁` exactly —
/// the last case is the limit the unified formula is 0/0 at, see
/// `DESIGN.md`); since `classify_single` can itself return `SmallEnough`
/// (the `β = τ` tangent case), so can `classify_parallel` through these
/// fallbacks — e.g. `β₀ == β₁ == τ` or `β₁ == τ`.
pub fn classify_parallel<T: Float>(
    tau_sq: T,
    beta0: T,
    beta1: T,
    n: usize,
    use_parallel_cut: bool,
) -> (CutStatus, CutParams<T>) {
    if beta1 < beta0 {
        return (CutStatus::NoSoln, CutParams::zero());
    }
    if beta1 <= T::zero() || !use_parallel_cut || beta0 == beta1 {
        return classify_single(tau_sq, beta0, n);
    }
    let tau = tau_sq.sqrt();
    if tau <= beta1 {
        return classify_single(tau_sq, beta0, n);
    }

    let nf = T::from(n).expect("dimension fits in the scalar type");
    let one = T::one();
    let two = one + one;
    let b0_sq = beta0 * beta0;
    let b1_sq = beta1 * beta1;

    let xi_sq = two * two * (tau_sq - b0_sq) * (tau_sq - b1_sq)
        + (nf * (b1_sq - b0_sq)) * (nf * (b1_sq - b0_sq));
    // A negative discriminant means the pair of cuts has squeezed the
    // feasible strip down past what this update formula can represent —
    // the same "collapsed to a point" case as the single-cut tangent,
    // just reached from the other direction.
    if xi_sq < T::zero() {
        return (CutStatus::SmallEnough, CutParams::zero());
    }
    let xi = xi_sq.sqrt();

    let sigma = (nf + (two * (tau_sq - beta0 * beta1) - xi) / (b1_sq - b0_sq)) / (nf + one);
    let rho = sigma * (beta0 + beta1) / two;
    let delta =
        (nf * nf / (nf * nf - one)) * (tau_sq - (b0_sq + b1_sq) / two + xi / (two * nf)) / tau_sq;

    (CutStatus::Success, CutParams { rho, sigma, delta })
}
