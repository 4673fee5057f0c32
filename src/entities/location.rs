//! Point entity (type 116).

use super::{Entity, EntityCommon, EntityTypeCode};
use crate::types::Vector3;

/// A single point in definition space.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Common entity data.
    pub common: EntityCommon,
    /// Point coordinates.
    pub point: Vector3,
}

impl Location {
    /// Create a new point.
    pub fn new(point: Vector3) -> Self {
        Location {
            common: EntityCommon::new(),
            point,
        }
    }

    /// Create a new point from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z))
    }

    /// The point mapped through the entity transform.
    pub fn world_point(&self) -> Vector3 {
        self.common.transform.transform(self.point)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Vector3::ZERO)
    }
}

impl Entity for Location {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn type_code(&self) -> EntityTypeCode {
        EntityTypeCode::Point
    }

    fn entity_type(&self) -> &'static str {
        "POINT"
    }

    fn translate(&mut self, offset: Vector3) {
        self.point = self.point + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransformationMatrix;

    #[test]
    fn test_location() {
        let mut location = Location::from_coords(1.0, 2.0, 3.0);
        assert_eq!(location.world_point(), Vector3::new(1.0, 2.0, 3.0));
        location.common.transform = TransformationMatrix::translation(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(location.world_point(), Vector3::new(2.0, 3.0, 4.0));
        location.translate(Vector3::UNIT_Z);
        assert_eq!(location.point, Vector3::new(1.0, 2.0, 4.0));
    }
}
