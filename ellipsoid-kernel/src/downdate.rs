//! Rank-one Cholesky downdate.
//!
//! Given a lower-triangular `L` (row-major, `n×n`, positive diagonal) with
//! `A = L Lᵀ`, and a vector `p` such that the caller wants
//! `A' = A − p pᵀ`, this computes `L'` with `A' = L' L'ᵀ` in place,
//! column by column, using the standard hyperbolic-rotation downdate
//! (the mirror image of the textbook rank-one Cholesky *update*). `p` is
//! consumed as scratch.
//!
//! Returns `false` without finishing the sweep if `A'` is not positive
//! definite (a diagonal entry would go non-positive) — per the caller's
//! contract this should not happen when the cut calculator has already
//! classified the cut as `Success`; see `DESIGN.md`.

use num_traits::Float;

/// `l` is the flattened row-major lower triangle of an `n×n` matrix
/// (`l[i * n + j]` for `j <= i`; entries with `j > i` are never read or
/// written). `p` has length `n` and is overwritten as scratch.
pub fn cholesky_downdate<T: Float>(l: &mut [T], p: &mut [T], n: usize) -> bool {
    debug_assert_eq!(l.len(), n * n);
    debug_assert_eq!(p.len(), n);

    for k in 0..n {
        let lkk = l[k * n + k];
        let r_sq = lkk * lkk - p[k] * p[k];
        if r_sq <= T::zero() {
            return false;
        }
        let r = r_sq.sqrt();
        let c = r / lkk;
        let s = p[k] / lkk;
        l[k * n + k] = r;

        for i in (k + 1)..n {
            let new_lik = (l[i * n + k] - s * p[i]) / c;
            p[i] = c * p[i] - s * new_lik;
            l[i * n + k] = new_lik;
        }
    }
    true
}
