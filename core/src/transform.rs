//! View and layer transform matrices.
//!
//! Both types follow the row-vector convention of the host toolkit: a point is transformed as
//! `p' = p * M`, so `a.concat(&b)` applies `a` first and `b` second.

/// A 2D affine transform, laid out as
///
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | tx ty 1 |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::IDENTITY
        }
    }

    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            a: x,
            d: y,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation in a y-up space (clockwise on a y-down screen).
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Returns the transform that applies `self` and then `other`.
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.tx * other.a + self.ty * other.c + other.tx,
            ty: self.tx * other.b + self.ty * other.d + other.ty,
        }
    }

    /// Transforms the point `(x, y)`.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.tx,
            x * self.b + y * self.d + self.ty,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// A 3D homogeneous transform as used by render layers, stored row by row (`m[0][0]` is `m11`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub m: [[f32; 4]; 4],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Identity with a perspective term in `m34`, the usual way of giving flips depth.
    pub fn perspective(m34: f32) -> Self {
        let mut transform = Self::IDENTITY;
        transform.m[2][3] = m34;
        transform
    }

    /// Rotation by `radians` around the axis `(x, y, z)`.
    ///
    /// A zero-length axis produces the identity.
    pub fn rotation(radians: f32, x: f32, y: f32, z: f32) -> Self {
        let length = (x * x + y * y + z * z).sqrt();
        if length == 0.0 {
            return Self::IDENTITY;
        }
        let (x, y, z) = (x / length, y / length, z / length);
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        Self {
            m: [
                [c + t * x * x, t * x * y + s * z, t * x * z - s * y, 0.0],
                [t * x * y - s * z, c + t * y * y, t * y * z + s * x, 0.0],
                [t * x * z + s * y, t * y * z - s * x, c + t * z * z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns the transform that applies `self` and then `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut m = [[0.0f32; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Self { m }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl From<AffineTransform> for Transform3D {
    fn from(t: AffineTransform) -> Self {
        Self {
            m: [
                [t.a, t.b, 0.0, 0.0],
                [t.c, t.d, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [t.tx, t.ty, 0.0, 1.0],
            ],
        }
    }
}
