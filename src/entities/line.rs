//! Line entity (type 110).

use super::{Entity, EntityCommon, EntityTypeCode};
use crate::error::{IgesError, Result};
use crate::types::Vector3;

/// How far a line extends past its defining points, encoded in the form number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBounding {
    /// Segment from P1 to P2 (form 0).
    #[default]
    BoundOnBothSides,
    /// Ray starting at P1 through P2 (form 1).
    BoundOnStart,
    /// Infinite line through P1 and P2 (form 2).
    Unbounded,
}

impl LineBounding {
    /// Map a line form number.
    pub fn from_form(form: i32) -> Result<Self> {
        match form {
            0 => Ok(LineBounding::BoundOnBothSides),
            1 => Ok(LineBounding::BoundOnStart),
            2 => Ok(LineBounding::Unbounded),
            _ => Err(IgesError::Structure(format!(
                "Invalid line form number {}",
                form
            ))),
        }
    }

    /// The form number written to the directory entry.
    pub fn form(self) -> i32 {
        match self {
            LineBounding::BoundOnBothSides => 0,
            LineBounding::BoundOnStart => 1,
            LineBounding::Unbounded => 2,
        }
    }
}

/// A line entity defined by two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data.
    pub common: EntityCommon,
    /// First point, in definition space.
    pub p1: Vector3,
    /// Second point, in definition space.
    pub p2: Vector3,
    /// Segment, ray or unbounded line.
    pub bounding: LineBounding,
}

impl Line {
    /// Create a new line from origin to origin.
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            p1: Vector3::ZERO,
            p2: Vector3::ZERO,
            bounding: LineBounding::BoundOnBothSides,
        }
    }

    /// Create a new segment between two points.
    pub fn from_points(p1: Vector3, p2: Vector3) -> Self {
        Line {
            p1,
            p2,
            ..Self::new()
        }
    }

    /// Create a new segment from coordinates.
    pub fn from_coords(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Line::from_points(Vector3::new(x1, y1, z1), Vector3::new(x2, y2, z2))
    }

    /// Get the length between the defining points.
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Defining points mapped through the entity transform.
    pub fn world_points(&self) -> (Vector3, Vector3) {
        let transform = &self.common.transform;
        (transform.transform(self.p1), transform.transform(self.p2))
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn type_code(&self) -> EntityTypeCode {
        EntityTypeCode::Line
    }

    fn form(&self) -> i32 {
        self.bounding.form()
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }

    fn translate(&mut self, offset: Vector3) {
        self.p1 = self.p1 + offset;
        self.p2 = self.p2 + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransformationMatrix;

    #[test]
    fn test_line_creation() {
        let line = Line::new();
        assert_eq!(line.p1, Vector3::ZERO);
        assert_eq!(line.p2, Vector3::ZERO);
        assert_eq!(line.entity_type(), "LINE");
        assert_eq!(line.form(), 0);
    }

    #[test]
    fn test_line_length() {
        let line = Line::from_coords(0.0, 0.0, 0.0, 3.0, 4.0, 0.0);
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn test_bounding_forms() {
        assert_eq!(LineBounding::from_form(1).unwrap(), LineBounding::BoundOnStart);
        assert_eq!(LineBounding::Unbounded.form(), 2);
        assert!(LineBounding::from_form(3).is_err());
    }

    #[test]
    fn test_world_points() {
        let mut line = Line::from_coords(1.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        line.common.transform = TransformationMatrix::translation(Vector3::new(0.0, 5.0, 0.0));
        let (a, b) = line.world_points();
        assert_eq!(a, Vector3::new(1.0, 5.0, 0.0));
        assert_eq!(b, Vector3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_line_translate() {
        let mut line = Line::from_coords(0.0, 0.0, 0.0, 10.0, 0.0, 0.0);
        line.translate(Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(line.p1, Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(line.p2, Vector3::new(15.0, 5.0, 5.0));
    }
}
