//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module. The computation is exposed as plain
//! methods on the model type, and the [`twine_core::Model`] implementation is
//! a thin adapter that delegates to those methods.

pub mod lensing;
