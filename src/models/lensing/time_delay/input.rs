use uom::si::{
    f64::{Length, Mass, Ratio},
    length::meter,
    mass::kilogram,
    ratio::ratio,
};

use crate::support::constraint::{
    Constrained, Constraint, ConstraintError, ConstraintResult, NonNegative, StrictlyPositive,
};

use super::{Argument, DelayError};

/// A lens whose inputs have passed validation.
///
/// Mass and both path lengths are strictly positive and the ellipticity is
/// non-negative, so the arithmetic core never sees an invalid lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    mass: Constrained<Mass, StrictlyPositive>,
    first_path: Constrained<Length, StrictlyPositive>,
    second_path: Constrained<Length, StrictlyPositive>,
    ellipticity: Constrained<Ratio, NonNegative>,
}

impl Lens {
    /// Validates and constructs a lens.
    ///
    /// # Errors
    ///
    /// Returns [`DelayError::InvalidArgument`] if the mass or either path
    /// length is not strictly positive, or if the ellipticity is negative.
    /// `NaN` and infinite values are rejected everywhere.
    pub fn new(
        mass: Mass,
        first_path: Length,
        second_path: Length,
        ellipticity: Ratio,
    ) -> Result<Self, DelayError> {
        Ok(Self {
            mass: finite(mass, mass.is_finite(), Argument::Mass)?,
            first_path: finite(first_path, first_path.is_finite(), Argument::FirstPath)?,
            second_path: finite(second_path, second_path.is_finite(), Argument::SecondPath)?,
            ellipticity: finite(ellipticity, ellipticity.is_finite(), Argument::Ellipticity)?,
        })
    }

    /// Lens mass.
    #[must_use]
    pub fn mass(&self) -> Mass {
        *self.mass.as_ref()
    }

    /// Length of the first light path (`L1`).
    #[must_use]
    pub fn first_path(&self) -> Length {
        *self.first_path.as_ref()
    }

    /// Length of the second light path (`L2`).
    #[must_use]
    pub fn second_path(&self) -> Length {
        *self.second_path.as_ref()
    }

    /// Lens ellipticity.
    #[must_use]
    pub fn ellipticity(&self) -> Ratio {
        *self.ellipticity.as_ref()
    }

    pub(super) fn si(&self) -> LensSi {
        LensSi {
            mass: self.mass().get::<kilogram>(),
            first_path: self.first_path().get::<meter>(),
            second_path: self.second_path().get::<meter>(),
            ellipticity: self.ellipticity().get::<ratio>(),
        }
    }
}

/// Checks the sign constraint, then rejects infinite values.
fn finite<T, C: Constraint<T>>(
    value: T,
    is_finite: bool,
    argument: Argument,
) -> ConstraintResult<Constrained<T, C>, DelayError> {
    let constrained = Constrained::new(value).map_err(|e| DelayError::invalid(argument, e))?;
    if !is_finite {
        return Err(DelayError::invalid(argument, ConstraintError::Infinite));
    }
    Ok(constrained)
}

/// Lens values in SI numbers.
#[derive(Debug, Clone, Copy)]
pub(super) struct LensSi {
    pub(super) mass: f64,
    pub(super) first_path: f64,
    pub(super) second_path: f64,
    pub(super) ellipticity: f64,
}

/// Ellipticity for a batch of lenses.
#[derive(Debug, Clone, Copy)]
pub enum Ellipticities<'a> {
    /// One ellipticity shared by every lens.
    Uniform(Ratio),

    /// One ellipticity per lens, matching the batch length.
    PerLens(&'a [Ratio]),
}

impl Ellipticities<'_> {
    /// Circular lenses (zero ellipticity) throughout the batch.
    #[must_use]
    pub fn none() -> Self {
        Self::Uniform(Ratio::new::<ratio>(0.0))
    }

    /// Returns one ellipticity per lens for a batch of `len` lenses.
    ///
    /// A per-lens slice is returned as is; its length is checked by the caller.
    pub(super) fn broadcast(&self, len: usize) -> Vec<Ratio> {
        match self {
            Self::Uniform(value) => vec![*value; len],
            Self::PerLens(values) => values.to_vec(),
        }
    }
}

/// Relative uncertainties propagated into the delay error.
///
/// Both values are fractions (0.1 means 10%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uncertainty {
    /// Relative uncertainty of the lens mass.
    pub mass: f64,

    /// Relative uncertainty of each path length.
    pub path_length: f64,
}

impl Default for Uncertainty {
    fn default() -> Self {
        Self {
            mass: 0.1,
            path_length: 0.05,
        }
    }
}

impl Uncertainty {
    /// Relative uncertainty of the time delay.
    ///
    /// Independent contributions combine in quadrature as
    /// `sqrt(dM² + 2·dL² + dM²)`; the mass term enters twice.
    #[must_use]
    pub fn relative_delay(&self) -> f64 {
        let dm2 = self.mass.powi(2);
        let dl2 = self.path_length.powi(2);
        (dm2 + 2.0 * dl2 + dm2).sqrt()
    }
}

/// Unvalidated input for the [`twine_core::Model`] adapter.
#[derive(Debug, Clone, Copy)]
pub struct LensInput {
    pub mass: Mass,
    pub first_path: Length,
    pub second_path: Length,
    pub ellipticity: Ratio,
    pub uncertainty: Uncertainty,
}

impl LensInput {
    /// Creates an input for a circular lens with default uncertainties.
    #[must_use]
    pub fn new(mass: Mass, first_path: Length, second_path: Length) -> Self {
        Self {
            mass,
            first_path,
            second_path,
            ellipticity: Ratio::new::<ratio>(0.0),
            uncertainty: Uncertainty::default(),
        }
    }

    /// Sets the lens ellipticity.
    #[must_use]
    pub fn with_ellipticity(self, ellipticity: Ratio) -> Self {
        Self {
            ellipticity,
            ..self
        }
    }

    /// Sets the relative uncertainties.
    #[must_use]
    pub fn with_uncertainty(self, uncertainty: Uncertainty) -> Self {
        Self {
            uncertainty,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::kilometer;

    fn meters(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    #[test]
    fn valid_lens_keeps_its_values() {
        let lens = Lens::new(
            Mass::new::<kilogram>(2e41),
            Length::new::<kilometer>(3.0),
            meters(1e3),
            Ratio::new::<ratio>(0.2),
        )
        .unwrap();

        let si = lens.si();
        assert_relative_eq!(si.mass, 2e41);
        assert_relative_eq!(si.first_path, 3e3);
        assert_relative_eq!(si.second_path, 1e3);
        assert_relative_eq!(si.ellipticity, 0.2);
    }

    #[test]
    fn rejects_each_invalid_argument() {
        let mass = Mass::new::<kilogram>(2e41);
        let zero = Ratio::new::<ratio>(0.0);

        let err = Lens::new(Mass::new::<kilogram>(-1e41), meters(1.0), meters(1.0), zero);
        assert_eq!(
            err,
            Err(DelayError::InvalidArgument {
                argument: Argument::Mass,
                index: None,
                source: ConstraintError::Negative,
            })
        );

        let err = Lens::new(mass, meters(0.0), meters(1.0), zero).unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                argument: Argument::FirstPath,
                source: ConstraintError::Zero,
                ..
            }
        ));

        let err = Lens::new(mass, meters(1.0), meters(-1.0), zero).unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                argument: Argument::SecondPath,
                ..
            }
        ));

        let err = Lens::new(mass, meters(1.0), meters(1.0), Ratio::new::<ratio>(-0.1)).unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                argument: Argument::Ellipticity,
                ..
            }
        ));
    }

    #[test]
    fn rejects_infinite_inputs() {
        let mass = Mass::new::<kilogram>(2e41);
        let zero = Ratio::new::<ratio>(0.0);

        let err = Lens::new(
            Mass::new::<kilogram>(f64::INFINITY),
            meters(1.0),
            meters(1.0),
            zero,
        );
        assert_eq!(
            err,
            Err(DelayError::InvalidArgument {
                argument: Argument::Mass,
                index: None,
                source: ConstraintError::Infinite,
            })
        );

        let err = Lens::new(mass, meters(1.0), meters(f64::INFINITY), zero).unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                argument: Argument::SecondPath,
                source: ConstraintError::Infinite,
                ..
            }
        ));

        let err = Lens::new(mass, meters(1.0), meters(1.0), Ratio::new::<ratio>(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                argument: Argument::Ellipticity,
                source: ConstraintError::Infinite,
                ..
            }
        ));

        let err = Lens::new(Mass::new::<kilogram>(f64::NEG_INFINITY), meters(1.0), meters(1.0), zero)
            .unwrap_err();
        assert!(matches!(
            err,
            DelayError::InvalidArgument {
                source: ConstraintError::Negative,
                ..
            }
        ));
    }

    #[test]
    fn zero_ellipticity_is_valid() {
        let lens = Lens::new(
            Mass::new::<kilogram>(1.0),
            meters(1.0),
            meters(1.0),
            Ratio::new::<ratio>(0.0),
        );
        assert!(lens.is_ok());
    }

    #[test]
    fn relative_delay_counts_mass_twice() {
        assert_relative_eq!(Uncertainty::default().relative_delay(), 0.025_f64.sqrt());

        let only_mass = Uncertainty {
            mass: 0.1,
            path_length: 0.0,
        };
        assert_relative_eq!(only_mass.relative_delay(), 0.02_f64.sqrt());
    }

    #[test]
    fn ellipticities_broadcast_to_batch() {
        let uniform = Ellipticities::Uniform(Ratio::new::<ratio>(0.3));
        assert_eq!(uniform.broadcast(3), vec![Ratio::new::<ratio>(0.3); 3]);
        assert!(uniform.broadcast(0).is_empty());

        let values = [Ratio::new::<ratio>(0.0), Ratio::new::<ratio>(0.2)];
        let per_lens = Ellipticities::PerLens(&values);
        assert_eq!(per_lens.broadcast(2), values.to_vec());
    }
}
