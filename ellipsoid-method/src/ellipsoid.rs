use ellipsoid_kernel::{classify_parallel, classify_single, CutStatus};
use ndarray::{Array1, Array2};

use crate::{cut::Cut, error::Error, space::SearchSpace};

/// `E(xc, Q, κ) = { x : (x − xc)ᵀ (κQ)⁻¹ (x − xc) ≤ 1 }`.
///
/// The textbook (non-factored) search space. `Q` is kept symmetric by an
/// explicit re-symmetrization after every rank-one update rather than by a
/// Cholesky-factored representation — see [`crate::EllipsoidStable`] for
/// the more robust alternative.
#[derive(Debug, Clone)]
pub struct Ellipsoid {
    n: usize,
    xc: Array1<f64>,
    q: Array2<f64>,
    kappa: f64,
    use_parallel_cut: bool,
    no_defer_trick: bool,
    tsq: f64,
    qg_scratch: Array1<f64>,
}

impl Ellipsoid {
    /// Cube initialization: `Q = α·I`, centered at `xc0`.
    pub fn new(xc0: Array1<f64>, alpha: f64) -> Result<Self, Error> {
        let n = xc0.len();
        if n == 0 {
            return Err(Error::InvalidDimension { n });
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(Error::NonFiniteInput {
                context: "Ellipsoid::new alpha",
            });
        }
        Ok(Self {
            n,
            xc: xc0,
            q: Array2::eye(n) * alpha,
            kappa: 1.0,
            use_parallel_cut: true,
            no_defer_trick: false,
            tsq: 0.0,
            qg_scratch: Array1::zeros(n),
        })
    }

    /// Initialize from a diagonal half-width vector: `Q = diag(widths)`.
    pub fn from_diagonal(xc0: Array1<f64>, widths: Array1<f64>) -> Result<Self, Error> {
        let n = xc0.len();
        if n == 0 {
            return Err(Error::InvalidDimension { n });
        }
        if widths.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: widths.len(),
            });
        }
        if widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(Error::NonFiniteInput {
                context: "Ellipsoid::from_diagonal widths",
            });
        }
        let mut q = Array2::zeros((n, n));
        for i in 0..n {
            q[[i, i]] = widths[i];
        }
        Ok(Self {
            n,
            xc: xc0,
            q,
            kappa: 1.0,
            use_parallel_cut: true,
            no_defer_trick: false,
            tsq: 0.0,
            qg_scratch: Array1::zeros(n),
        })
    }

    pub fn with_parallel_cut(mut self, enabled: bool) -> Self {
        self.use_parallel_cut = enabled;
        self
    }

    pub fn with_no_defer_trick(mut self, no_defer: bool) -> Self {
        self.no_defer_trick = no_defer;
        self
    }

    /// Effective shape matrix `κQ`. Allocates; intended for inspection/tests,
    /// never called from the hot loop.
    pub fn effective_q(&self) -> Array2<f64> {
        &self.q * self.kappa
    }
}

impl SearchSpace for Ellipsoid {
    fn n(&self) -> usize {
        self.n
    }

    fn xc(&self) -> &Array1<f64> {
        &self.xc
    }

    fn set_xc(&mut self, xc: Array1<f64>) {
        self.xc = xc;
    }

    fn tsq(&self) -> f64 {
        self.tsq
    }

    fn update(&mut self, cut: &Cut) -> Result<CutStatus, Error> {
        let g = cut.g();
        if g.len() != self.n {
            return Err(Error::DimensionMismatch {
                expected: self.n,
                found: g.len(),
            });
        }
        if g.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFiniteInput {
                context: "Ellipsoid::update g",
            });
        }

        ndarray::linalg::general_mat_vec_mul(1.0, &self.q, g, 0.0, &mut self.qg_scratch);
        let omega = g.dot(&self.qg_scratch);

        // g == 0 (or Q has collapsed along g): the cut carries no
        // information. Caught here rather than relying on the classifier's
        // τ=0 edge case, per invariant 6 ("g=0 leaves state bit-identical").
        if omega <= 0.0 {
            return Ok(CutStatus::NoEffect);
        }
        let tau_sq = self.kappa * omega;

        let (status, params) = match cut {
            Cut::Single { beta, .. } => {
                if !beta.is_finite() {
                    return Err(Error::NonFiniteInput {
                        context: "Ellipsoid::update beta",
                    });
                }
                classify_single(tau_sq, *beta, self.n)
            }
            Cut::Parallel { beta: (b0, b1), .. } => {
                if !b0.is_finite() || !b1.is_finite() {
                    return Err(Error::NonFiniteInput {
                        context: "Ellipsoid::update beta pair",
                    });
                }
                classify_parallel(tau_sq, *b0, *b1, self.n, self.use_parallel_cut)
            }
        };

        if status != CutStatus::Success {
            return Ok(status);
        }

        self.xc.scaled_add(-(params.rho / omega), &self.qg_scratch);

        let factor = params.sigma / omega;
        for i in 0..self.n {
            let qgi = self.qg_scratch[i];
            if qgi == 0.0 {
                continue;
            }
            for j in 0..self.n {
                self.q[[i, j]] -= factor * qgi * self.qg_scratch[j];
            }
        }
        // The rank-one subtraction can drift Q off symmetric in floating
        // point; cancel that before it accumulates over iterations.
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let avg = (self.q[[i, j]] + self.q[[j, i]]) * 0.5;
                self.q[[i, j]] = avg;
                self.q[[j, i]] = avg;
            }
        }

        if self.no_defer_trick {
            self.q *= params.delta;
        } else {
            self.kappa *= params.delta;
        }

        self.tsq = tau_sq;
        tracing::trace!(
            status = ?status,
            tsq = self.tsq,
            rho = params.rho,
            sigma = params.sigma,
            delta = params.delta,
            "ellipsoid update"
        );

        Ok(CutStatus::Success)
    }
}
