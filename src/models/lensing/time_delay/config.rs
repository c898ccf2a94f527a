use uom::si::{
    f64::{Mass, Time, Velocity},
    mass::kilogram,
    time::second,
    velocity::meter_per_second,
};

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{Argument, DelayError};

/// Physical and reference constants for a [`DelayModel`](super::DelayModel).
///
/// The gravitational constant and the reference curvature scalar have no
/// dedicated [`uom`] quantity and are stored as SI numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayConfig {
    /// Newtonian gravitational constant `G`, in m³·kg⁻¹·s⁻².
    pub gravitational_constant: f64,

    /// Speed of light `c`.
    pub speed_of_light: Velocity,

    /// Mass of the reference lens system `M0`.
    pub reference_mass: Mass,

    /// Curvature scalar `mu0` of the reference system.
    pub reference_mu: f64,

    /// Time-scaling factor `lambda0` of the reference system.
    pub reference_lambda: Time,

    /// Masses above this use the linear strong-field approximation.
    pub max_stable_mass: Mass,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 6.674_30e-11,
            speed_of_light: Velocity::new::<meter_per_second>(299_792_458.0),
            reference_mass: Mass::new::<kilogram>(2e41),
            reference_mu: 1e-10,
            reference_lambda: Time::new::<second>(5.866e4),
            max_stable_mass: Mass::new::<kilogram>(1e45),
        }
    }
}

/// Configuration resolved to SI numbers for the arithmetic core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Constants {
    pub(super) g: f64,
    pub(super) c: f64,
    pub(super) m0: f64,
    pub(super) mu0: f64,
    pub(super) lambda0: f64,
    pub(super) m_max: f64,
}

impl Constants {
    /// Checks that every constant is strictly positive and converts to SI.
    pub(super) fn resolve(config: &DelayConfig) -> Result<Self, DelayError> {
        Ok(Self {
            g: positive(config.gravitational_constant, Argument::GravitationalConstant)?,
            c: positive(
                config.speed_of_light.get::<meter_per_second>(),
                Argument::SpeedOfLight,
            )?,
            m0: positive(config.reference_mass.get::<kilogram>(), Argument::ReferenceMass)?,
            mu0: positive(config.reference_mu, Argument::ReferenceMu)?,
            lambda0: positive(
                config.reference_lambda.get::<second>(),
                Argument::ReferenceLambda,
            )?,
            m_max: positive(config.max_stable_mass.get::<kilogram>(), Argument::MaxStableMass)?,
        })
    }

    /// Converts a configuration already known to be valid.
    pub(super) fn resolve_unchecked(config: &DelayConfig) -> Self {
        Self {
            g: config.gravitational_constant,
            c: config.speed_of_light.get::<meter_per_second>(),
            m0: config.reference_mass.get::<kilogram>(),
            mu0: config.reference_mu,
            lambda0: config.reference_lambda.get::<second>(),
            m_max: config.max_stable_mass.get::<kilogram>(),
        }
    }
}

fn positive(value: f64, argument: Argument) -> Result<f64, DelayError> {
    StrictlyPositive::new(value)
        .map(Constrained::into_inner)
        .map_err(|source| DelayError::invalid(argument, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn default_resolves() {
        let config = DelayConfig::default();
        let checked = Constants::resolve(&config).unwrap();
        assert_eq!(checked, Constants::resolve_unchecked(&config));
        assert_eq!(checked.m0, 2e41);
    }

    #[test]
    fn rejects_non_positive_constants() {
        let config = DelayConfig {
            reference_mu: 0.0,
            ..DelayConfig::default()
        };
        assert_eq!(
            Constants::resolve(&config),
            Err(DelayError::InvalidArgument {
                argument: Argument::ReferenceMu,
                index: None,
                source: ConstraintError::Zero,
            })
        );

        let config = DelayConfig {
            speed_of_light: Velocity::new::<meter_per_second>(-1.0),
            ..DelayConfig::default()
        };
        assert!(Constants::resolve(&config).is_err());

        let config = DelayConfig {
            gravitational_constant: f64::NAN,
            ..DelayConfig::default()
        };
        assert!(Constants::resolve(&config).is_err());
    }
}
