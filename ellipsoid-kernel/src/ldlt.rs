//! Incremental LDLᵀ factorization with a failure witness.
//!
//! Used by matrix-inequality oracles (LMI/QMI) to test a candidate symmetric
//! matrix for positive (semi)definiteness without ever materializing it: the
//! matrix is supplied as an element accessor `(i, j) -> T`, consumed in
//! column-major triangular order. On failure, [`Ldlt::witness`] produces a
//! vector certifying indefiniteness.

use crate::error::KernelError;
use num_traits::Float;

/// `n × n` workspace for a left-looking LDLᵀ factorization. Allocated once
/// in [`Ldlt::new`] and reused across calls to `factor`/
/// `factor_with_allow_semidefinite` so an LMI oracle can test many candidate
/// matrices without reallocating.
pub struct Ldlt<T> {
    n: usize,
    /// Row-major `n×n`: strict lower triangle holds `L`'s off-diagonal
    /// multipliers, the diagonal holds `D`.
    t: Vec<T>,
    start: usize,
    stop: usize,
    witness_vec: Vec<T>,
    /// `Some(true)` after a successful factorization, `Some(false)` after a
    /// failed one, `None` before the first call.
    last_success: Option<bool>,
}

impl<T: Float> Ldlt<T> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            t: vec![T::zero(); n * n],
            start: 0,
            stop: n,
            witness_vec: vec![T::zero(); n],
            last_success: None,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Range `(start, stop)` of the pivot block the last `factor*` call
    /// touched. On success, `(0, n)`. On failure, `stop` is the first index
    /// at which the diagonal failed and `start` marks the restart point
    /// (always `0` unless `factor_with_allow_semidefinite` advanced it).
    pub fn pivot_range(&self) -> (usize, usize) {
        (self.start, self.stop)
    }

    /// Strict LDLᵀ: fails (returns `false`) the moment a diagonal pivot is
    /// not strictly positive.
    pub fn factor(&mut self, get: impl Fn(usize, usize) -> T) -> bool {
        self.factor_impl(get, false)
    }

    /// Like [`Ldlt::factor`], but an exactly-zero pivot advances `start` and
    /// restarts the factorization from the next column instead of failing —
    /// supports matrices that are block positive-semidefinite. A strictly
    /// negative pivot still fails.
    pub fn factor_with_allow_semidefinite(&mut self, get: impl Fn(usize, usize) -> T) -> bool {
        self.factor_impl(get, true)
    }

    fn factor_impl(&mut self, get: impl Fn(usize, usize) -> T, allow_semidefinite: bool) -> bool {
        let n = self.n;
        let mut start = 0usize;

        let mut j = 0usize;
        while j < n {
            let mut d = get(j, j);
            for k in start..j {
                d = d - self.t[j * n + k] * self.t[j * n + k] * self.t[k * n + k];
            }

            if d.is_zero() && allow_semidefinite {
                self.t[j * n + j] = T::zero();
                for i in (j + 1)..n {
                    self.t[i * n + j] = T::zero();
                }
                start = j + 1;
                j += 1;
                continue;
            }

            if d <= T::zero() {
                self.t[j * n + j] = d;
                self.start = start;
                self.stop = j + 1;
                self.last_success = Some(false);
                return false;
            }

            self.t[j * n + j] = d;
            for i in (j + 1)..n {
                let mut v = get(i, j);
                for k in start..j {
                    v = v - self.t[i * n + k] * self.t[j * n + k] * self.t[k * n + k];
                }
                self.t[i * n + j] = v / d;
            }
            j += 1;
        }

        self.start = 0;
        self.stop = n;
        self.last_success = Some(true);
        true
    }

    /// Certify indefiniteness after a failed factorization. Returns
    /// `-D[stop-1]`, a strictly positive margin of infeasibility, and leaves
    /// the witness vector retrievable via [`Ldlt::witness_vec`]. The
    /// quadratic form itself, `vᵀ A v`, is `D[stop-1]` (negative) and is
    /// available via [`Ldlt::sym_quad`] — the sign flip is deliberate: this
    /// return value is a magnitude callers can compare or log directly,
    /// while `sym_quad` hands back the mathematical object the invariant
    /// is stated over. Errs if the last factorization succeeded or none has
    /// run yet.
    pub fn witness(&mut self) -> Result<T, KernelError> {
        if self.last_success != Some(false) {
            return Err(KernelError::WitnessBeforeFailure);
        }
        let n = self.n;
        let (start, stop) = (self.start, self.stop);

        for v in self.witness_vec.iter_mut() {
            *v = T::zero();
        }
        self.witness_vec[stop - 1] = T::one();

        for idx in (start..stop.saturating_sub(1)).rev() {
            let mut sum = T::zero();
            for k in (idx + 1)..stop {
                sum = sum + self.t[k * n + idx] * self.witness_vec[k];
            }
            self.witness_vec[idx] = -sum;
        }

        Ok(-self.t[(stop - 1) * n + (stop - 1)])
    }

    /// The witness vector from the most recent [`Ldlt::witness`] call.
    pub fn witness_vec(&self) -> &[T] {
        &self.witness_vec
    }

    /// `vᵀ M v` over the witness's active range `[start, stop)`, for
    /// building an oracle subgradient from an arbitrary symmetric `M`.
    pub fn sym_quad(&self, get: impl Fn(usize, usize) -> T) -> T {
        let (start, stop) = (self.start, self.stop);
        let mut total = T::zero();
        for i in start..stop {
            if self.witness_vec[i].is_zero() {
                continue;
            }
            for j in start..stop {
                if self.witness_vec[j].is_zero() {
                    continue;
                }
                total = total + self.witness_vec[i] * get(i, j) * self.witness_vec[j];
            }
        }
        total
    }
}
