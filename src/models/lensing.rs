//! Gravitational lensing models.
//!
//! This module contains models for strong-lensing systems, where a massive
//! foreground lens bends light from a background source along more than one
//! path.

pub mod time_delay;
