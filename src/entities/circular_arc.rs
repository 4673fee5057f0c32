//! Circular arc entity (type 100).
//!
//! The arc lies in a plane parallel to XT-YT at height `ZT` of its
//! definition space and runs counter-clockwise from the start point to the
//! end point. Coinciding start and end points describe a full circle.

use super::{Entity, EntityCommon, EntityTypeCode};
use crate::types::Vector3;
use std::f64::consts::TAU;

/// A circular arc or full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularArc {
    /// Common entity data.
    pub common: EntityCommon,
    /// Center; `z` is the plane displacement.
    pub center: Vector3,
    /// Start point. Its `z` must equal `center.z`; writing fails otherwise.
    pub start_point: Vector3,
    /// End point. Its `z` must equal `center.z`; writing fails otherwise.
    pub end_point: Vector3,
}

impl CircularArc {
    /// Create a new arc. Start and end are projected onto the plane of the center.
    pub fn new(center: Vector3, start_point: Vector3, end_point: Vector3) -> Self {
        CircularArc {
            common: EntityCommon::new(),
            center,
            start_point: Vector3::new(start_point.x, start_point.y, center.z),
            end_point: Vector3::new(end_point.x, end_point.y, center.z),
        }
    }

    /// Create a full circle; the start and end point sit on the +X side.
    pub fn circle(center: Vector3, radius: f64) -> Self {
        let point = Vector3::new(center.x + radius, center.y, center.z);
        Self::new(center, point, point)
    }

    /// Create an arc from angles in radians, measured counter-clockwise from +X.
    pub fn from_angles(center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        let on_arc = |angle: f64| {
            Vector3::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
                center.z,
            )
        };
        Self::new(center, on_arc(start_angle), on_arc(end_angle))
    }

    /// Displacement of the arc plane along ZT.
    pub fn plane_displacement(&self) -> f64 {
        self.center.z
    }

    /// Distance from the center to the start point.
    pub fn radius(&self) -> f64 {
        self.center.distance(&self.start_point)
    }

    /// Whether the start and end points coincide.
    pub fn is_full_circle(&self) -> bool {
        self.start_point.is_close_to(&self.end_point)
    }

    /// Start angle in radians, in `[0, 2π)`.
    pub fn start_angle(&self) -> f64 {
        self.angle_of(self.start_point)
    }

    /// End angle in radians, in `[0, 2π)`; a full circle ends at `2π`.
    pub fn end_angle(&self) -> f64 {
        if self.is_full_circle() {
            return self.start_angle() + TAU;
        }
        self.angle_of(self.end_point)
    }

    fn angle_of(&self, point: Vector3) -> f64 {
        (point.y - self.center.y)
            .atan2(point.x - self.center.x)
            .rem_euclid(TAU)
    }

    /// Center mapped through the entity transform.
    pub fn world_center(&self) -> Vector3 {
        self.common.transform.transform(self.center)
    }

    /// Start point mapped through the entity transform.
    pub fn world_start(&self) -> Vector3 {
        self.common.transform.transform(self.start_point)
    }

    /// End point mapped through the entity transform.
    pub fn world_end(&self) -> Vector3 {
        self.common.transform.transform(self.end_point)
    }

    /// Arc plane normal mapped through the entity transform.
    pub fn world_normal(&self) -> Vector3 {
        self.common.transform.apply_rotation(Vector3::UNIT_Z)
    }
}

impl Default for CircularArc {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO, Vector3::ZERO)
    }
}

impl Entity for CircularArc {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn type_code(&self) -> EntityTypeCode {
        EntityTypeCode::CircularArc
    }

    fn entity_type(&self) -> &'static str {
        "CIRCULAR_ARC"
    }

    fn translate(&mut self, offset: Vector3) {
        self.center = self.center + offset;
        self.start_point = self.start_point + offset;
        self.end_point = self.end_point + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransformationMatrix;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_circle() {
        let circle = CircularArc::circle(Vector3::new(1.0, 2.0, 3.0), 5.0);
        assert!(circle.is_full_circle());
        assert_eq!(circle.radius(), 5.0);
        assert_eq!(circle.plane_displacement(), 3.0);
        assert_eq!(circle.start_point, Vector3::new(6.0, 2.0, 3.0));
        assert!((circle.end_angle() - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_points_projected_onto_plane() {
        let arc = CircularArc::new(
            Vector3::new(0.0, 0.0, 4.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 9.0),
        );
        assert_eq!(arc.start_point.z, 4.0);
        assert_eq!(arc.end_point.z, 4.0);
        assert!(!arc.is_full_circle());
    }

    #[test]
    fn test_angles() {
        let arc = CircularArc::from_angles(Vector3::ZERO, 2.0, FRAC_PI_2, PI);
        assert!((arc.start_angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((arc.end_angle() - PI).abs() < 1e-12);
        assert!((arc.radius() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_geometry() {
        let mut arc = CircularArc::circle(Vector3::ZERO, 1.0);
        arc.common.transform = TransformationMatrix::translation(Vector3::new(0.0, 0.0, 10.0));
        assert_eq!(arc.world_center(), Vector3::new(0.0, 0.0, 10.0));
        assert_eq!(arc.world_start(), Vector3::new(1.0, 0.0, 10.0));
        assert_eq!(arc.world_normal(), Vector3::UNIT_Z);
    }
}
