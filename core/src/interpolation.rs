//! Traits and implementations related to interpolation of animatable values.

use crate::layer::AnimationValue;
use crate::transform::{AffineTransform, Transform3D};

/// Trait for a type that supports the standard `lerp` (**l**inear int**erp**olation) operation.
///
/// `Lerp` assumes a normalized `x` value, such that the result is `y0` at `x = 0` and `y1` at
/// `x = 1`. Values of `x` outside that range extrapolate, which is how overshooting curves such as
/// [`Curve::OutBack`](crate::curve::Curve::OutBack) push past their target.
pub trait Lerp {
    /// Computes the linear interpolation between this value (`y0`) and a second (`y1`) value of the
    /// same type, at normalized position `x`.
    ///
    /// # Example
    ///
    /// ```
    /// use spry_core::interpolation::Lerp;
    ///
    /// let y0: f32 = 5.0;
    /// let y1: f32 = 15.0;
    ///
    /// assert_eq!(y0.lerp(&y1, 0.0), 5.0);
    /// assert_eq!(y0.lerp(&y1, 0.25), 7.5);
    /// assert_eq!(y0.lerp(&y1, 1.0), 15.0);
    /// ```
    fn lerp(&self, y1: &Self, x: f32) -> Self;
}

// `tb + (1 - t)a` rather than `a + t(b - a)`, so that both end points are reproduced exactly.

impl Lerp for f32 {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        self * (1.0 - x) + y1 * x
    }
}

impl Lerp for f64 {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        let x = x as f64;
        self * (1.0 - x) + y1 * x
    }
}

impl Lerp for AffineTransform {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        Self {
            a: self.a.lerp(&y1.a, x),
            b: self.b.lerp(&y1.b, x),
            c: self.c.lerp(&y1.c, x),
            d: self.d.lerp(&y1.d, x),
            tx: self.tx.lerp(&y1.tx, x),
            ty: self.ty.lerp(&y1.ty, x),
        }
    }
}

impl Lerp for Transform3D {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        let mut m = self.m;
        for (row, target_row) in m.iter_mut().zip(y1.m.iter()) {
            for (value, target) in row.iter_mut().zip(target_row.iter()) {
                *value = value.lerp(target, x);
            }
        }
        Self { m }
    }
}

impl Lerp for AnimationValue {
    /// Mismatched kinds cannot be blended and switch over at the halfway point.
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        match (self, y1) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a.lerp(b, x)),
            (Self::Transform(a), Self::Transform(b)) => Self::Transform(a.lerp(b, x)),
            _ if x < 0.5 => *self,
            _ => *y1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_floats() {
        assert_eq!(0.0f32.lerp(&1.0, 0.314), 0.314);
        assert_eq!(2.0f64.lerp(&4.0, 0.5), 3.0);
        assert_eq!(0.5f32.lerp(&0.5, 0.123), 0.5);
    }

    #[test]
    fn lerp_extrapolates_past_end() {
        assert_relative_eq!(0.0f32.lerp(&10.0, 1.2), 12.0, epsilon = 1e-5);
    }

    #[test]
    fn lerp_affine_transform() {
        let from = AffineTransform::translation(600.0, 0.0);
        let to = AffineTransform::IDENTITY;

        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 0.5), AffineTransform::translation(300.0, 0.0));
        assert_eq!(from.lerp(&to, 1.0), to);
    }

    #[test]
    fn lerp_transform_3d() {
        let from = Transform3D::IDENTITY;
        let to = Transform3D::perspective(-0.5);

        assert_eq!(from.lerp(&to, 0.5).m[2][3], -0.25);
    }

    #[test]
    fn lerp_mismatched_values_switches_at_half() {
        let scalar = AnimationValue::Scalar(1.0);
        let transform = AnimationValue::Transform(Transform3D::IDENTITY);

        assert_eq!(scalar.lerp(&transform, 0.49), scalar);
        assert_eq!(scalar.lerp(&transform, 0.5), transform);
    }
}
