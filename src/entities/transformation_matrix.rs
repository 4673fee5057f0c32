//! Transformation matrix entity (type 124).
//!
//! Matrices referenced by another entity's transform pointer are folded into
//! that entity while reading. Only stand-alone matrices appear as entities.

use super::{Entity, EntityCommon, EntityTypeCode};
use crate::types::{TransformationMatrix, Vector3};

/// A transformation matrix kept as an entity of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationMatrixEntity {
    /// Common entity data.
    pub common: EntityCommon,
    /// The matrix itself.
    pub matrix: TransformationMatrix,
    /// Form number: 0 or 1 for right/left-handed rigid motion, 10-12 for
    /// coordinate system variants.
    pub form: i32,
}

impl TransformationMatrixEntity {
    /// Create a new matrix entity with form 0.
    pub fn new(matrix: TransformationMatrix) -> Self {
        TransformationMatrixEntity {
            common: EntityCommon::new(),
            matrix,
            form: 0,
        }
    }
}

impl Default for TransformationMatrixEntity {
    fn default() -> Self {
        Self::new(TransformationMatrix::IDENTITY)
    }
}

impl Entity for TransformationMatrixEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn type_code(&self) -> EntityTypeCode {
        EntityTypeCode::TransformationMatrix
    }

    fn form(&self) -> i32 {
        self.form
    }

    fn entity_type(&self) -> &'static str {
        "TRANSFORMATION_MATRIX"
    }

    fn translate(&mut self, offset: Vector3) {
        self.matrix.t[0] += offset.x;
        self.matrix.t[1] += offset.y;
        self.matrix.t[2] += offset.z;
    }
}
