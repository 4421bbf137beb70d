//! The catalog of named motion effects.

use crate::error::ParseNameError;
use enum_map::Enum;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::FromStr;

/// A named, pre-tuned motion effect.
///
/// Presets are stateless keys. Resolving one (see [`resolve_preset`](crate::solver::resolve_preset))
/// either writes geometry into a [`Configuration`](crate::config::Configuration) for the main
/// transform animation, or submits supplementary animations straight to the view's render layer.
#[derive(Clone, Copy, Debug, Default, Enum, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Preset {
    SlideLeft,
    SlideRight,
    SlideDown,
    SlideUp,
    SqueezeLeft,
    SqueezeRight,
    SqueezeDown,
    SqueezeUp,
    FadeIn,
    FadeOut,
    FadeOutIn,
    FadeInLeft,
    FadeInRight,
    FadeInDown,
    FadeInUp,
    ZoomIn,
    ZoomOut,
    Fall,
    Shake,
    Pop,
    FlipX,
    FlipY,
    Morph,
    Squeeze,
    Flash,
    Wobble,
    Swing,
    Active,
    #[default]
    None,
}

impl Preset {
    /// Iterates over every preset, including [`Preset::None`], in declaration order.
    pub fn all() -> impl Iterator<Item = Preset> {
        (0..<Preset as Enum>::LENGTH).map(<Preset as Enum>::from_usize)
    }

    /// Whether this preset animates the render layer directly instead of (or in addition to)
    /// feeding geometry to the main transform animation.
    pub fn is_layer_effect(&self) -> bool {
        matches!(
            self,
            Self::FadeOutIn
                | Self::Shake
                | Self::Pop
                | Self::FlipX
                | Self::FlipY
                | Self::Morph
                | Self::Squeeze
                | Self::Flash
                | Self::Wobble
                | Self::Swing
                | Self::Active
        )
    }

    /// The camelCase name of this preset, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::SlideLeft => "slideLeft",
            Self::SlideRight => "slideRight",
            Self::SlideDown => "slideDown",
            Self::SlideUp => "slideUp",
            Self::SqueezeLeft => "squeezeLeft",
            Self::SqueezeRight => "squeezeRight",
            Self::SqueezeDown => "squeezeDown",
            Self::SqueezeUp => "squeezeUp",
            Self::FadeIn => "fadeIn",
            Self::FadeOut => "fadeOut",
            Self::FadeOutIn => "fadeOutIn",
            Self::FadeInLeft => "fadeInLeft",
            Self::FadeInRight => "fadeInRight",
            Self::FadeInDown => "fadeInDown",
            Self::FadeInUp => "fadeInUp",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::Fall => "fall",
            Self::Shake => "shake",
            Self::Pop => "pop",
            Self::FlipX => "flipX",
            Self::FlipY => "flipY",
            Self::Morph => "morph",
            Self::Squeeze => "squeeze",
            Self::Flash => "flash",
            Self::Wobble => "wobble",
            Self::Swing => "swing",
            Self::Active => "active",
            Self::None => "none",
        }
    }
}

lazy_static! {
    static ref PRESETS_BY_NAME: HashMap<&'static str, Preset> =
        Preset::all().map(|preset| (preset.name(), preset)).collect();
}

impl FromStr for Preset {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESETS_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| ParseNameError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_preset_once() {
        let presets: Vec<_> = Preset::all().collect();

        assert_eq!(presets.len(), 29);
        assert_eq!(presets.first(), Some(&Preset::SlideLeft));
        assert_eq!(presets.last(), Some(&Preset::None));
    }

    #[test]
    fn every_name_parses_to_its_preset() {
        for preset in Preset::all() {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "slideSideways".parse::<Preset>(),
            Err(ParseNameError::UnknownPreset("slideSideways".to_string()))
        );
    }

    #[test]
    fn geometry_presets_are_not_layer_effects() {
        assert!(!Preset::SlideLeft.is_layer_effect());
        assert!(!Preset::Fall.is_layer_effect());
        assert!(!Preset::None.is_layer_effect());
        assert!(Preset::Shake.is_layer_effect());
        assert!(Preset::FadeOutIn.is_layer_effect());
    }
}
