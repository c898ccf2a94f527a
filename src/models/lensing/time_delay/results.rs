//! Result types for lens time-delay evaluation.

use std::fmt;

use uom::si::f64::Time;

/// Time delay between two lensed images and its derived parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDelayResult {
    /// Estimated time delay.
    ///
    /// Negative when the second path dominates the first.
    pub value: Time,

    /// Propagated uncertainty of the delay, never negative.
    pub error: Time,

    /// Field regime implied by the curvature arguments.
    pub regime: Regime,

    /// Dimensionless curvature parameter, inversely proportional to mass.
    pub mu: f64,

    /// Time-scaling factor, proportional to mass and boosted by ellipticity.
    pub lambda: Time,

    /// Formula used to compute [`value`](Self::value).
    pub approximation: Approximation,
}

/// Gravitational field regime of a lens.
///
/// The regime is `Weak` when both curvature arguments are below one.
/// It does not depend on which formula produced the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Weak,
    Strong,
}

impl Regime {
    pub(super) fn classify(arg1: f64, arg2: f64) -> Self {
        if arg1.max(arg2) < 1.0 {
            Self::Weak
        } else {
            Self::Strong
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => f.write_str("weak"),
            Self::Strong => f.write_str("strong"),
        }
    }
}

/// Formula used to evaluate a time delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approximation {
    /// `lambda * ln(sinh(arg1) / sinh(arg2))`.
    SinhRatio,

    /// `lambda * mu * (K - K') / K0`, used above the stable mass threshold.
    StrongFieldLinear,
}
