//! Strong-lensing time delay with a hyperbolic-sine correction.
//!
//! Light from a background source reaches the observer along two paths of
//! lengths `L1` and `L2` around a lens of mass `M`. The delay between the two
//! images is estimated in closed form as
//!
//! ```text
//! delta_t = lambda * ln(sinh(mu * K / K0) / sinh(mu * K' / K0))
//! ```
//!
//! where `K = L1 / 2r_s` and `K' = L2 / 2r_s` are curvature parameters built
//! from the Schwarzschild radius `r_s = 2GM / c²`, `K0 = c² / 2GM0` is the
//! reference curvature scale, and `mu` and `lambda` scale inversely and
//! directly with mass relative to a reference system. Ellipticity boosts
//! `lambda` linearly.
//!
//! Lenses heavier than [`DelayConfig::max_stable_mass`] use the linear
//! strong-field approximation `lambda * mu * (K - K') / K0` instead.
//!
//! Relative mass and path-length uncertainties are propagated in quadrature
//! into [`TimeDelayResult::error`], which is always the magnitude
//! `|delta_t| * relative_error`.

mod adapter;
mod config;
mod error;
mod input;
mod physics;
mod results;

pub use config::DelayConfig;
pub use error::{Argument, DelayError, ErrorKind};
pub use input::{Ellipticities, Lens, LensInput, Uncertainty};
pub use results::{Approximation, Regime, TimeDelayResult};

use tracing::warn;
use uom::si::{
    f64::{Length, Mass, Ratio},
    mass::kilogram,
};

use config::Constants;

/// Closed-form lens time-delay model.
///
/// The model holds immutable physical and reference constants and is cheap to
/// copy and safe to share between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayModel {
    config: DelayConfig,
    constants: Constants,
}

impl Default for DelayModel {
    fn default() -> Self {
        let config = DelayConfig::default();
        Self {
            config,
            constants: Constants::resolve_unchecked(&config),
        }
    }
}

impl DelayModel {
    /// Creates a model from the given constants.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError::InvalidArgument`] if any constant is not
    /// strictly positive.
    pub fn new(config: DelayConfig) -> Result<Self, DelayError> {
        Ok(Self {
            config,
            constants: Constants::resolve(&config)?,
        })
    }

    /// Returns the constants this model was built with.
    #[must_use]
    pub fn config(&self) -> &DelayConfig {
        &self.config
    }

    /// Validates batch inputs and returns the corresponding lenses.
    ///
    /// Every element is checked. A warning is logged if any mass exceeds the
    /// stable mass threshold, since those lenses use the strong-field
    /// approximation.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError::LengthMismatch`] if the slices differ in length
    /// and [`DelayError::InvalidArgument`] for the first invalid element.
    pub fn validate_inputs(
        &self,
        masses: &[Mass],
        first_paths: &[Length],
        second_paths: &[Length],
        ellipticities: Ellipticities<'_>,
    ) -> Result<Vec<Lens>, DelayError> {
        let expected = masses.len();
        let lengths = [
            (Argument::FirstPath, first_paths.len()),
            (Argument::SecondPath, second_paths.len()),
        ]
        .into_iter()
        .chain(match ellipticities {
            Ellipticities::PerLens(values) => Some((Argument::Ellipticity, values.len())),
            Ellipticities::Uniform(_) => None,
        });
        for (argument, found) in lengths {
            if found != expected {
                return Err(DelayError::LengthMismatch {
                    argument,
                    expected,
                    found,
                });
            }
        }

        let lenses = masses
            .iter()
            .zip(first_paths)
            .zip(second_paths)
            .zip(ellipticities.broadcast(expected))
            .enumerate()
            .map(|(index, (((&mass, &first), &second), ellipticity))| {
                Lens::new(mass, first, second, ellipticity).map_err(|e| e.at_index(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.warn_unstable(&lenses);
        Ok(lenses)
    }

    /// Computes the time delay for a single lens.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError::InvalidArgument`] for invalid inputs, before any
    /// computation, or a numerical instability error (see
    /// [`ErrorKind::NumericalInstability`]) if the sinh-ratio formula cannot be
    /// evaluated.
    ///
    /// # Example
    ///
    /// ```
    /// use twine_lensing::models::lensing::time_delay::{DelayModel, Regime, Uncertainty};
    /// use uom::si::{
    ///     f64::{Length, Mass, Ratio},
    ///     length::meter,
    ///     mass::kilogram,
    ///     ratio::ratio,
    /// };
    ///
    /// let result = DelayModel::default()
    ///     .time_delay(
    ///         Mass::new::<kilogram>(2e41),
    ///         Length::new::<meter>(2e9),
    ///         Length::new::<meter>(1e9),
    ///         Ratio::new::<ratio>(0.0),
    ///         Uncertainty::default(),
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(result.regime, Regime::Weak);
    /// ```
    pub fn time_delay(
        &self,
        mass: Mass,
        first_path: Length,
        second_path: Length,
        ellipticity: Ratio,
        uncertainty: Uncertainty,
    ) -> Result<TimeDelayResult, DelayError> {
        let lens = Lens::new(mass, first_path, second_path, ellipticity)?;
        self.warn_unstable(std::slice::from_ref(&lens));
        physics::evaluate(&self.constants, &lens, &uncertainty)
    }

    /// Computes time delays for a batch of lenses.
    ///
    /// All inputs are validated before any delay is computed, so an invalid
    /// argument anywhere rejects the whole batch. Numerical instabilities are
    /// reported per lens and do not affect the other entries.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError::LengthMismatch`] or [`DelayError::InvalidArgument`]
    /// as described in [`DelayModel::validate_inputs`].
    pub fn time_delays(
        &self,
        masses: &[Mass],
        first_paths: &[Length],
        second_paths: &[Length],
        ellipticities: Ellipticities<'_>,
        uncertainty: Uncertainty,
    ) -> Result<Vec<Result<TimeDelayResult, DelayError>>, DelayError> {
        let lenses = self.validate_inputs(masses, first_paths, second_paths, ellipticities)?;
        Ok(lenses
            .iter()
            .map(|lens| physics::evaluate(&self.constants, lens, &uncertainty))
            .collect())
    }

    /// Computes the time delay for an already validated lens.
    ///
    /// # Errors
    ///
    /// Returns a numerical instability error if the sinh-ratio formula
    /// cannot be evaluated.
    pub fn time_delay_for(
        &self,
        lens: &Lens,
        uncertainty: Uncertainty,
    ) -> Result<TimeDelayResult, DelayError> {
        self.warn_unstable(std::slice::from_ref(lens));
        physics::evaluate(&self.constants, lens, &uncertainty)
    }

    fn warn_unstable(&self, lenses: &[Lens]) {
        let threshold = self.constants.m_max;
        let heavy = lenses
            .iter()
            .map(|lens| lens.mass().get::<kilogram>())
            .filter(|&mass| mass > threshold);

        let (count, max_mass) = heavy.fold((0_usize, 0.0_f64), |(n, max), m| (n + 1, max.max(m)));
        if count > 0 {
            warn!(
                count,
                max_mass_kg = max_mass,
                threshold_kg = threshold,
                "lens mass exceeds stability threshold, using strong-field approximation"
            );
        }
    }
}
