use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is greater than zero.
///
/// Lens masses and path lengths carry this constraint.
///
/// # Examples
///
/// ```
/// use twine_lensing::support::constraint::StrictlyPositive;
///
/// assert!(StrictlyPositive::new(1.892e20).is_ok());
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1e41).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, Mass},
        length::{light_year, meter},
        mass::kilogram,
    };

    #[test]
    fn floats() {
        assert!(Constrained::<f64, StrictlyPositive>::new(1e-10).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-5.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn masses() {
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(2e41)).is_ok());
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(0.0)).is_err());
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(-1e41)).is_err());
    }

    #[test]
    fn lengths_in_any_unit() {
        let path = StrictlyPositive::new(Length::new::<light_year>(2.0)).unwrap();
        assert!(path.as_ref().get::<meter>() > 1e16);

        assert!(StrictlyPositive::new(Length::new::<light_year>(-2.0)).is_err());
    }
}
