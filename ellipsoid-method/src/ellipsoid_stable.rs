use ellipsoid_kernel::{cholesky_downdate, classify_parallel, classify_single, CutStatus};
use ndarray::{Array1, Array2};

use crate::{cut::Cut, error::Error, space::SearchSpace};

/// Same contract as [`crate::Ellipsoid`], but `Q = κ·L·Lᵀ` is carried
/// through its Cholesky factor `L` (lower triangular, positive diagonal)
/// instead of as an explicit matrix. The rank-one update becomes a
/// Cholesky *downdate* of `L`, which never loses symmetry by construction
/// — the numerical-robustness trade the textbook variant doesn't make.
#[derive(Debug, Clone)]
pub struct EllipsoidStable {
    n: usize,
    xc: Array1<f64>,
    /// Lower triangular, row-major; entries above the diagonal are unused
    /// and kept at zero.
    l: Array2<f64>,
    kappa: f64,
    use_parallel_cut: bool,
    no_defer_trick: bool,
    tsq: f64,
    y_scratch: Array1<f64>,
    qg_scratch: Array1<f64>,
    /// Copy of `l` taken right before a downdate is attempted, so a failed
    /// downdate can be rolled back instead of leaving `l` half-mutated.
    l_backup: Array2<f64>,
}

impl EllipsoidStable {
    /// Cube initialization: `Q = α·I`, i.e. `L = √α·I`.
    pub fn new(xc0: Array1<f64>, alpha: f64) -> Result<Self, Error> {
        let n = xc0.len();
        if n == 0 {
            return Err(Error::InvalidDimension { n });
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(Error::NonFiniteInput {
                context: "EllipsoidStable::new alpha",
            });
        }
        Ok(Self {
            n,
            xc: xc0,
            l: Array2::eye(n) * alpha.sqrt(),
            kappa: 1.0,
            use_parallel_cut: true,
            no_defer_trick: false,
            tsq: 0.0,
            y_scratch: Array1::zeros(n),
            qg_scratch: Array1::zeros(n),
            l_backup: Array2::zeros((n, n)),
        })
    }

    /// Initialize from a diagonal half-width vector: `Q = diag(widths)`,
    /// i.e. `L = diag(sqrt(widths))`.
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
                context: "EllipsoidStable::from_diagonal widths",
            });
        }
        let mut l = Array2::zeros((n, n));
        for i in 0..n {
            l[[i, i]] = widths[i].sqrt();
        }
        Ok(Self {
            n,
            xc: xc0,
            l,
            kappa: 1.0,
            use_parallel_cut: true,
            no_defer_trick: false,
            tsq: 0.0,
            y_scratch: Array1::zeros(n),
            qg_scratch: Array1::zeros(n),
            l_backup: Array2::zeros((n, n)),
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

    /// Reconstructs `κ·L·Lᵀ`. Allocates; for inspection/tests only.
    pub fn effective_q(&self) -> Array2<f64> {
        self.l.dot(&self.l.t()) * self.kappa
    }
}

impl SearchSpace for EllipsoidStable {
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
                context: "EllipsoidStable::update g",
            });
        }

        // y = L^T g, Qg = L y = (L L^T) g = Q/kappa . g
        ndarray::linalg::general_mat_vec_mul(1.0, &self.l.t(), g, 0.0, &mut self.y_scratch);
        ndarray::linalg::general_mat_vec_mul(1.0, &self.l, &self.y_scratch, 0.0, &mut self.qg_scratch);
        let omega = g.dot(&self.qg_scratch);

        if omega <= 0.0 {
            return Ok(CutStatus::NoEffect);
        }
        let tau_sq = self.kappa * omega;

        let (status, params) = match cut {
            Cut::Single { beta, .. } => {
                if !beta.is_finite() {
                    return Err(Error::NonFiniteInput {
                        context: "EllipsoidStable::update beta",
                    });
                }
                classify_single(tau_sq, *beta, self.n)
            }
            Cut::Parallel { beta: (b0, b1), .. } => {
                if !b0.is_finite() || !b1.is_finite() {
                    return Err(Error::NonFiniteInput {
                        context: "EllipsoidStable::update beta pair",
                    });
                }
                classify_parallel(tau_sq, *b0, *b1, self.n, self.use_parallel_cut)
            }
        };

        if status != CutStatus::Success {
            return Ok(status);
        }

        // Downdate L before touching xc: if the classifier and the
        // floating-point guard above are both correct this always
        // succeeds (see DESIGN.md); if it somehow doesn't, bail before
        // xc and L can disagree with each other. cholesky_downdate mutates
        // its buffer column-by-column and can return false partway through
        // the sweep, so l is backed up first and restored on failure —
        // NoEffect must return without mutating.
        let c = params.sigma / omega;
        self.y_scratch.mapv_inplace(|y| y * c.sqrt());
        let n = self.n;
        self.l_backup.assign(&self.l);
        let l_slice = self
            .l
            .as_slice_mut()
            .expect("L is allocated in standard (row-major) layout");
        let y_slice = self
            .y_scratch
            .as_slice_mut()
            .expect("scratch vector is contiguous");
        let ok = cholesky_downdate(l_slice, y_slice, n);
        debug_assert!(
            ok,
            "cholesky downdate failed despite a Success cut classification"
        );
        if !ok {
            self.l.assign(&self.l_backup);
            return Ok(CutStatus::NoEffect);
        }

        self.xc.scaled_add(-(params.rho / omega), &self.qg_scratch);

        if self.no_defer_trick {
            self.l *= params.delta.sqrt();
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
            "stable ellipsoid update"
        );

        Ok(CutStatus::Success)
    }
}
