use std::fmt;

use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while computing a lens time delay.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DelayError {
    /// An input or configuration value violated its sign constraint.
    #[error("invalid {argument}{}", at(.index))]
    InvalidArgument {
        /// The offending argument.
        argument: Argument,

        /// Position in the batch, or `None` for a single lens or the configuration.
        index: Option<usize>,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// Batch input slices have different lengths.
    #[error("{argument} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// The slice whose length disagrees with the masses.
        argument: Argument,

        /// Number of masses.
        expected: usize,

        /// Number of entries supplied for `argument`.
        found: usize,
    },

    /// The second sinh argument is too close to zero to divide by.
    #[error("sinh argument {argument:e} is too close to zero")]
    NearZeroArgument {
        /// The dimensionless argument `mu * K' / K0`.
        argument: f64,
    },

    /// The sinh ratio is not positive, so its logarithm is undefined.
    #[error("sinh ratio {ratio:e} is not positive")]
    NonPositiveRatio {
        /// The ratio `sinh(arg1) / sinh(arg2)`.
        ratio: f64,
    },

    /// The computed delay is infinite or NaN.
    #[error("time delay is not finite: {value}")]
    NonFiniteDelay {
        /// The offending delay in seconds.
        value: f64,
    },
}

impl DelayError {
    /// Returns the broad category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } | Self::LengthMismatch { .. } => ErrorKind::InvalidArgument,
            Self::NearZeroArgument { .. }
            | Self::NonPositiveRatio { .. }
            | Self::NonFiniteDelay { .. } => ErrorKind::NumericalInstability,
        }
    }

    pub(super) fn invalid(argument: Argument, source: ConstraintError) -> Self {
        Self::InvalidArgument {
            argument,
            index: None,
            source,
        }
    }

    /// Attaches a batch position to an invalid argument error.
    pub(super) fn at_index(self, position: usize) -> Self {
        match self {
            Self::InvalidArgument {
                argument, source, ..
            } => Self::InvalidArgument {
                argument,
                index: Some(position),
                source,
            },
            other => other,
        }
    }
}

/// Broad error categories.
///
/// Invalid arguments are rejected before any arithmetic runs.
/// Numerical instabilities arise mid-computation for a single lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NumericalInstability,
}

/// Names the input or configuration value an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Mass,
    FirstPath,
    SecondPath,
    Ellipticity,
    GravitationalConstant,
    SpeedOfLight,
    ReferenceMass,
    ReferenceMu,
    ReferenceLambda,
    MaxStableMass,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mass => "lens mass",
            Self::FirstPath => "first path length",
            Self::SecondPath => "second path length",
            Self::Ellipticity => "ellipticity",
            Self::GravitationalConstant => "gravitational constant",
            Self::SpeedOfLight => "speed of light",
            Self::ReferenceMass => "reference mass",
            Self::ReferenceMu => "reference mu",
            Self::ReferenceLambda => "reference lambda",
            Self::MaxStableMass => "maximum stable mass",
        };
        f.write_str(name)
    }
}

fn at(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_argument() {
        let err = DelayError::invalid(Argument::Mass, ConstraintError::Negative);
        assert_eq!(err.to_string(), "invalid lens mass");
        assert_eq!(err.at_index(2).to_string(), "invalid lens mass at index 2");

        let err = DelayError::LengthMismatch {
            argument: Argument::SecondPath,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "second path length has 2 entries, expected 3");
    }

    #[test]
    fn kinds() {
        let err = DelayError::invalid(Argument::Ellipticity, ConstraintError::Negative);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = DelayError::NearZeroArgument { argument: 1e-12 };
        assert_eq!(err.kind(), ErrorKind::NumericalInstability);
        assert_eq!(err.at_index(4), err);
    }
}
