//! Closed-form delay arithmetic on validated SI inputs.

use std::f64::consts::LN_2;

use tracing::debug;
use uom::si::{f64::Time, time::second};

use super::{
    Approximation, DelayError, Lens, Regime, TimeDelayResult, Uncertainty, config::Constants,
};

/// Smallest `|arg2|` for which `sinh(arg2)` is used as a divisor.
const MIN_SINH_ARGUMENT: f64 = 1e-10;

/// Above this, `ln(sinh(x))` is evaluated from its exponential asymptote.
const LN_SINH_ASYMPTOTE: f64 = 20.0;

/// Intermediate quantities shared by both delay formulas.
#[derive(Debug, Clone, Copy)]
pub(super) struct Curvature {
    pub(super) schwarzschild_radius: f64,
    pub(super) k: f64,
    pub(super) k_prime: f64,
    pub(super) k0: f64,
    pub(super) mu: f64,
    pub(super) lambda: f64,
    pub(super) arg1: f64,
    pub(super) arg2: f64,
}

impl Curvature {
    pub(super) fn new(constants: &Constants, lens: &Lens) -> Self {
        let Constants {
            g,
            c,
            m0,
            mu0,
            lambda0,
            ..
        } = *constants;
        let lens = lens.si();
        let c2 = c * c;

        let schwarzschild_radius = 2.0 * g * lens.mass / c2;
        let k = lens.first_path / (2.0 * schwarzschild_radius);
        let k_prime = lens.second_path / (2.0 * schwarzschild_radius);
        let k0 = c2 / (2.0 * g * m0);

        let mu = mu0 * m0 / lens.mass;
        let lambda = lambda0 * (lens.mass / m0) * (1.0 + lens.ellipticity);

        Self {
            schwarzschild_radius,
            k,
            k_prime,
            k0,
            mu,
            lambda,
            arg1: mu * k / k0,
            arg2: mu * k_prime / k0,
        }
    }
}

/// Computes the delay, its uncertainty, and the regime for one lens.
pub(super) fn evaluate(
    constants: &Constants,
    lens: &Lens,
    uncertainty: &Uncertainty,
) -> Result<TimeDelayResult, DelayError> {
    let curvature = Curvature::new(constants, lens);
    let Curvature {
        k,
        k_prime,
        k0,
        mu,
        lambda,
        arg1,
        arg2,
        ..
    } = curvature;

    let regime = Regime::classify(arg1, arg2);
    let mass = lens.si().mass;

    let (delta_t, approximation) = if mass > constants.m_max {
        (
            lambda * mu * (k - k_prime) / k0,
            Approximation::StrongFieldLinear,
        )
    } else {
        (lambda * ln_sinh_ratio(arg1, arg2)?, Approximation::SinhRatio)
    };

    if !delta_t.is_finite() {
        return Err(DelayError::NonFiniteDelay { value: delta_t });
    }

    debug!(
        mass_kg = mass,
        r_s_m = curvature.schwarzschild_radius,
        arg1,
        arg2,
        %regime,
        ?approximation,
        delta_t_s = delta_t,
        "evaluated lens time delay"
    );

    Ok(TimeDelayResult {
        value: Time::new::<second>(delta_t),
        error: Time::new::<second>(delta_t.abs() * uncertainty.relative_delay()),
        regime,
        mu,
        lambda: Time::new::<second>(lambda),
        approximation,
    })
}

/// Returns `ln(sinh(arg1) / sinh(arg2))`.
///
/// Evaluated as a difference of logarithms so large arguments do not
/// overflow `sinh`.
fn ln_sinh_ratio(arg1: f64, arg2: f64) -> Result<f64, DelayError> {
    if arg2.abs() < MIN_SINH_ARGUMENT {
        return Err(DelayError::NearZeroArgument { argument: arg2 });
    }

    let positive = (arg1 > 0.0 && arg2 > 0.0) || (arg1 < 0.0 && arg2 < 0.0);
    if !positive {
        return Err(DelayError::NonPositiveRatio {
            ratio: arg1.sinh() / arg2.sinh(),
        });
    }

    Ok(ln_abs_sinh(arg1) - ln_abs_sinh(arg2))
}

/// Returns `ln|sinh(x)|`.
fn ln_abs_sinh(x: f64) -> f64 {
    let x = x.abs();
    if x > LN_SINH_ASYMPTOTE {
        // sinh(x) = e^x (1 - e^-2x) / 2
        x - LN_2 + (-(-2.0 * x).exp()).ln_1p()
    } else {
        x.sinh().ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn ln_abs_sinh_matches_direct_evaluation() {
        for x in [1e-6, 0.1, 1.0, 5.0, 19.9, 20.1, 50.0, 700.0] {
            assert_relative_eq!(ln_abs_sinh(x), x.sinh().ln(), max_relative = 1e-12);
        }
        assert_relative_eq!(ln_abs_sinh(-2.0), 2.0_f64.sinh().ln());
    }

    #[test]
    fn ln_abs_sinh_stays_finite_for_huge_arguments() {
        let x: f64 = 9.46e9;
        assert!(x.sinh().is_infinite());
        assert_relative_eq!(ln_abs_sinh(x), x - LN_2);
    }

    #[test]
    fn ratio_of_small_arguments_is_ratio_of_arguments() {
        let value = ln_sinh_ratio(4e-6, 1e-6).unwrap();
        assert_relative_eq!(value, 4.0_f64.ln(), max_relative = 1e-9);
    }

    #[test]
    fn rejects_near_zero_denominator() {
        assert_eq!(
            ln_sinh_ratio(1.0, 1e-11),
            Err(DelayError::NearZeroArgument { argument: 1e-11 })
        );
        assert!(ln_sinh_ratio(1.0, -1e-11).is_err());
        assert!(ln_sinh_ratio(1.0, 1e-10).is_ok());
    }

    #[test]
    fn rejects_non_positive_ratio() {
        assert!(matches!(
            ln_sinh_ratio(-1.0, 2.0),
            Err(DelayError::NonPositiveRatio { ratio }) if ratio < 0.0
        ));
        assert!(matches!(
            ln_sinh_ratio(0.0, 2.0),
            Err(DelayError::NonPositiveRatio { .. })
        ));
        assert!(ln_sinh_ratio(-2.0, -1.0).is_ok());
    }
}
