//! Support for the Glam library. Converts transforms to Glam matrices and adds [Lerp] trait
//! implementations for the vector types hosts commonly animate.
use crate::interpolation::Lerp;
use crate::transform::{AffineTransform, Transform3D};
use glam::{Affine2, Mat2, Mat4, Quat, Vec2, Vec3, Vec4};

macro_rules! impl_lerp {
    ($($t:ty),*) => {
        $( impl Lerp for $t {
            fn lerp(&self, y1: &Self, x: f32) -> Self {
                <$t>::lerp(*self, *y1, x)
            }
        }) *
    }
}

impl_lerp! { Vec2, Vec3, Vec4, Quat }

impl From<AffineTransform> for Affine2 {
    fn from(t: AffineTransform) -> Self {
        // Row-vector rows are column-vector columns.
        Affine2 {
            matrix2: Mat2::from_cols(Vec2::new(t.a, t.b), Vec2::new(t.c, t.d)),
            translation: Vec2::new(t.tx, t.ty),
        }
    }
}

impl From<Transform3D> for Mat4 {
    fn from(t: Transform3D) -> Self {
        Mat4::from_cols_array_2d(&t.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn affine_conversion_transforms_points_alike() {
        let t = AffineTransform::rotation(FRAC_PI_2).concat(&AffineTransform::translation(5.0, 0.0));
        let (x, y) = t.apply(1.0, 2.0);

        let p = Affine2::from(t).transform_point2(Vec2::new(1.0, 2.0));

        assert_relative_eq!(p.x, x, epsilon = 1e-5);
        assert_relative_eq!(p.y, y, epsilon = 1e-5);
    }

    #[test]
    fn transform_3d_conversion_keeps_perspective() {
        let m = Mat4::from(Transform3D::perspective(-0.25));

        assert_eq!(m.z_axis.w, -0.25);
        assert_eq!(m.w_axis.w, 1.0);
    }

    #[test]
    fn lerp_vectors() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 20.0);

        assert_eq!(Lerp::lerp(&a, &b, 0.5), Vec2::new(5.0, 15.0));
    }
}
