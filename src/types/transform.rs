//! Transformation matrix value type.
//!
//! IGES entity type 124 stores a 3x3 matrix `R` and a translation `T` so that
//! a point in definition space maps to `R·p + T` in the parent space.

use crate::types::Vector3;

/// Rotation (3x3) plus translation (3x1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformationMatrix {
    /// Matrix elements stored in row-major order.
    pub r: [[f64; 3]; 3],
    /// Translation vector.
    pub t: [f64; 3],
}

impl TransformationMatrix {
    /// The identity transform: unit diagonal, zero translation.
    pub const IDENTITY: TransformationMatrix = TransformationMatrix {
        r: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        t: [0.0, 0.0, 0.0],
    };

    /// Number of parameter fields used by entity type 124.
    pub const PARAMETER_COUNT: usize = 12;

    /// Create identity matrix.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create from rows and a translation.
    pub fn from_rows(row0: [f64; 3], row1: [f64; 3], row2: [f64; 3], t: [f64; 3]) -> Self {
        Self {
            r: [row0, row1, row2],
            t,
        }
    }

    /// Create a pure translation.
    pub fn translation(offset: Vector3) -> Self {
        Self {
            t: offset.to_array(),
            ..Self::IDENTITY
        }
    }

    /// Create rotation matrix around Z axis, followed by a translation.
    pub fn rotation_z(angle: f64, offset: Vector3) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            r: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
            t: offset.to_array(),
        }
    }

    /// Build from the twelve parameters in file order:
    /// `R11 R12 R13 T1 R21 R22 R23 T2 R31 R32 R33 T3`.
    pub fn from_parameters(p: [f64; 12]) -> Self {
        Self {
            r: [[p[0], p[1], p[2]], [p[4], p[5], p[6]], [p[8], p[9], p[10]]],
            t: [p[3], p[7], p[11]],
        }
    }

    /// The twelve parameters in file order (inverse of [`Self::from_parameters`]).
    pub fn to_parameters(&self) -> [f64; 12] {
        let r = &self.r;
        let t = &self.t;
        [
            r[0][0], r[0][1], r[0][2], t[0], //
            r[1][0], r[1][1], r[1][2], t[1], //
            r[2][0], r[2][1], r[2][2], t[2],
        ]
    }

    /// Apply `R·p + T`.
    pub fn transform(&self, point: Vector3) -> Vector3 {
        let v = self.apply_rotation(point);
        Vector3::new(v.x + self.t[0], v.y + self.t[1], v.z + self.t[2])
    }

    /// Apply only the 3x3 part (directions, normals).
    pub fn apply_rotation(&self, v: Vector3) -> Vector3 {
        let r = &self.r;
        Vector3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    /// Exact comparison against [`Self::IDENTITY`].
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Determinant of the 3x3 part.
    pub fn determinant(&self) -> f64 {
        let m = &self.r;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Bit pattern of all twelve parameters, usable as a hash key.
    pub(crate) fn bit_key(&self) -> [u64; 12] {
        self.to_parameters().map(f64::to_bits)
    }
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
