//! Allocation-free numeric kernels for the ellipsoid method.
//!
//! This crate is the low-level half of the `ellipsoid-method` workspace —
//! the same split as `lax` sits under `ndarray-linalg`. It has no
//! dependency on `ndarray`: every kernel here operates on raw `&[T]` /
//! `&mut [T]` slices plus a dimension, and none of them allocate, matching
//! the "no allocation inside `update`" resource constraint the engine as a
//! whole has to honor.
//!
//! Three independent pieces live here:
//!
//! - [`cut`]: the pure cut-classifier `(τ², β) -> (status, ρ, σ, δ)`.
//! - [`downdate`]: the rank-one Cholesky downdate used by the numerically
//!   stable ellipsoid variant.
//! - [`ldlt`]: the incremental LDLᵀ manager with its failure-witness
//!   protocol, used by matrix-inequality oracles.
//!
//! All three are generic directly over `num_traits::Float` (so `f32` and
//! `f64` both work out of the box) — this engine has no use for complex
//! scalars (see `DESIGN.md`), so unlike the teacher crate's
//! `cauchy::Scalar` there's no need for a crate-local marker trait over
//! the bound at all.

mod cut;
mod downdate;
mod error;
mod ldlt;

pub use cut::{classify_parallel, classify_single, CutParams, CutStatus};
pub use downdate::cholesky_downdate;
pub use error::KernelError;
pub use ldlt::Ldlt;
