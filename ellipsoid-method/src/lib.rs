//! Ellipsoid-method convex feasibility and optimization.
//!
//! This crate is the ndarray-typed half of a two-crate split: the
//! allocation-free numerical core lives in `ellipsoid-kernel` (cut
//! classification, LDLᵀ factorization, Cholesky downdate); this crate wraps
//! it in the `Ellipsoid` / `EllipsoidStable` search spaces, the oracle
//! traits a caller implements, and the four driver loops that tie an
//! oracle and a space together into a solve.
//!
//! A typical feasibility problem:
//!
//! ```
//! use ellipsoid_method::{cutting_plane_feas, Cut, Ellipsoid, FeasibilityOracle, Options};
//! use ndarray::{array, Array1};
//!
//! struct HalfSpace;
//! impl FeasibilityOracle for HalfSpace {
//!     fn assess_feas(&mut self, x: &Array1<f64>) -> Option<Cut> {
//!         let beta = x[0] - (-1.0);
//!         (beta > 0.0).then(|| Cut::single(array![1.0, 0.0], beta))
//!     }
//! }
//!
//! let mut oracle = HalfSpace;
//! let mut space = Ellipsoid::new(array![0.0, 0.0], 100.0).unwrap();
//! let (feasible, _niter) = cutting_plane_feas(&mut oracle, &mut space, &Options::default());
//! assert!(feasible);
//! ```

mod cut;
mod driver;
mod ellipsoid;
mod ellipsoid_stable;
mod error;
mod oracle;
mod options;
mod space;

pub use crate::ellipsoid::Ellipsoid;
pub use crate::ellipsoid_stable::EllipsoidStable;
pub use cut::Cut;
pub use driver::{bsearch, cutting_plane_feas, cutting_plane_optim, cutting_plane_q, BsearchAdaptor};
pub use error::Error;
pub use options::Options;
pub use oracle::{BisectionOracle, DiscreteOracle, FeasibilityOracle, OptimOracle};
pub use space::{CutStatus, SearchSpace};

pub use ellipsoid_kernel::{KernelError, Ldlt};
