//! [`twine_core::Model`] adapter for [`DelayModel`].

use twine_core::Model;

use super::{DelayError, DelayModel, LensInput, TimeDelayResult};

impl Model for DelayModel {
    type Input = LensInput;
    type Output = TimeDelayResult;
    type Error = DelayError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.time_delay(
            input.mass,
            input.first_path,
            input.second_path,
            input.ellipticity,
            input.uncertainty,
        )
    }
}
