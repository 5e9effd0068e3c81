use ndarray::Array1;

/// A half-space cut `g·(x − xc) + β ≤ 0`, known to contain the solution set.
///
/// `Parallel` brackets the solution set between two parallel half-spaces
/// sharing the same normal `g`; `β₀` must be `<= β₁`. A cut is *central*
/// when its `β` (or `β₀`) is zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Cut {
    Single { g: Array1<f64>, beta: f64 },
    Parallel { g: Array1<f64>, beta: (f64, f64) },
}

impl Cut {
    pub fn single(g: Array1<f64>, beta: f64) -> Self {
        Cut::Single { g, beta }
    }

    pub fn central(g: Array1<f64>) -> Self {
        Cut::Single { g, beta: 0.0 }
    }

    pub fn parallel(g: Array1<f64>, beta0: f64, beta1: f64) -> Self {
        Cut::Parallel {
            g,
            beta: (beta0, beta1),
        }
    }

    pub fn g(&self) -> &Array1<f64> {
        match self {
            Cut::Single { g, .. } => g,
            Cut::Parallel { g, .. } => g,
        }
    }
}
