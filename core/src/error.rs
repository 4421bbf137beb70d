//! Errors produced when looking up presets and curves by name.

use thiserror::Error;

/// A name did not match any known [`Preset`](crate::preset::Preset) or
/// [`Curve`](crate::curve::Curve).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseNameError {
    #[error("unknown animation preset `{0}`")]
    UnknownPreset(String),
    #[error("unknown timing curve `{0}`")]
    UnknownCurve(String),
}
