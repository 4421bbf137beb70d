//! Core types for Spry.
//!
//! This crate holds the implementation behind the `spry` facade: curves and presets, the
//! per-view configuration, the solver that turns presets into concrete animations, and the driver
//! that runs them against a host toolkit. All important types are re-exported by Spry.

pub mod attach;
pub mod config;
pub mod curve;
pub mod driver;
pub mod error;
pub mod headless;
pub mod host;
pub mod interpolation;
pub mod layer;
pub mod motion;
pub mod preset;
pub mod solver;
pub mod time_scale;
pub mod transform;

#[cfg(feature = "glam")]
pub mod glam;
