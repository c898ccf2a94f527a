//! # Twine Lensing
//!
//! Gravitational lensing time-delay models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Lensing models, each with a [`twine_core::Model`] adapter.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Quick start
//!
//! ```
//! use twine_lensing::models::lensing::time_delay::{DelayModel, Uncertainty};
//! use uom::si::{
//!     f64::{Length, Mass, Ratio},
//!     length::meter,
//!     mass::kilogram,
//!     ratio::ratio,
//!     time::second,
//! };
//!
//! let model = DelayModel::default();
//! let result = model
//!     .time_delay(
//!         Mass::new::<kilogram>(2e41),
//!         Length::new::<meter>(2e9),
//!         Length::new::<meter>(1e9),
//!         Ratio::new::<ratio>(0.0),
//!         Uncertainty::default(),
//!     )
//!     .unwrap();
//!
//! assert!(result.value.get::<second>() > 0.0);
//! assert!(result.error.get::<second>() >= 0.0);
//! ```
//!
//! Modules in [`support`] are public because they're useful,
//! but their APIs are not stable.

pub mod models;
pub mod support;
