//! Includes the types commonly used for building animations.

pub use crate::{
    Animated, Configuration, Curve, Driver, Host, Motion, Preset, SpringBasis, Stage, View,
};
