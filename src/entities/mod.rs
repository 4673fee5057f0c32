//! IGES entity types and traits.

use crate::error::{IgesError, Result};
use crate::types::{Color, TransformationMatrix, Vector3};
use std::fmt;

pub mod circular_arc;
pub mod line;
pub mod location;
pub mod transformation_matrix;

pub use circular_arc::CircularArc;
pub use line::{Line, LineBounding};
pub use location::Location;
pub use transformation_matrix::TransformationMatrixEntity;

/// Entity type numbers understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTypeCode {
    CircularArc,
    Line,
    Point,
    TransformationMatrix,
    ColorDefinition,
}

impl EntityTypeCode {
    /// Map an entity type number; `None` for types the codec does not model.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            100 => Some(EntityTypeCode::CircularArc),
            110 => Some(EntityTypeCode::Line),
            116 => Some(EntityTypeCode::Point),
            124 => Some(EntityTypeCode::TransformationMatrix),
            314 => Some(EntityTypeCode::ColorDefinition),
            _ => None,
        }
    }

    /// The entity type number written to the file.
    pub fn to_i32(self) -> i32 {
        match self {
            EntityTypeCode::CircularArc => 100,
            EntityTypeCode::Line => 110,
            EntityTypeCode::Point => 116,
            EntityTypeCode::TransformationMatrix => 124,
            EntityTypeCode::ColorDefinition => 314,
        }
    }
}

impl fmt::Display for EntityTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}

/// Status number of a directory entry (field 9), four two-digit groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityStatus {
    /// 00 visible, 01 blanked.
    pub blank: u8,
    /// 00 independent, 01 physically, 02 logically, 03 both dependent.
    pub subordinate: u8,
    /// 00 geometry, 01 annotation, 02 definition, ...
    pub entity_use: u8,
    /// 00 global top down, 01 global defer, 02 use hierarchy property.
    pub hierarchy: u8,
}

impl EntityStatus {
    /// Parse the raw 8-column status field. Leading blanks count as zeros.
    pub fn parse(field: &str) -> Result<Self> {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed.len() > 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IgesError::Structure(format!(
                "Invalid status number '{}'",
                field
            )));
        }

        let digits = format!("{:0>8}", trimmed);
        let group = |index: usize| -> u8 {
            let bytes = &digits.as_bytes()[index * 2..index * 2 + 2];
            (bytes[0] - b'0') * 10 + (bytes[1] - b'0')
        };

        Ok(EntityStatus {
            blank: group(0),
            subordinate: group(1),
            entity_use: group(2),
            hierarchy: group(3),
        })
    }

    /// Whether the entity is flagged as blanked (not displayed).
    pub fn is_blanked(&self) -> bool {
        self.blank == 1
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}{:02}{:02}",
            self.blank, self.subordinate, self.entity_use, self.hierarchy
        )
    }
}

/// Base trait for all IGES entities.
pub trait Entity {
    /// Shared directory entry data.
    fn common(&self) -> &EntityCommon;

    /// Mutable shared directory entry data.
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// The entity type number.
    fn type_code(&self) -> EntityTypeCode;

    /// The form number written to the directory entry.
    fn form(&self) -> i32 {
        0
    }

    /// Get the entity type name.
    fn entity_type(&self) -> &'static str;

    /// Move the entity's definition-space geometry.
    fn translate(&mut self, offset: Vector3);

    /// Get the entity's color.
    fn color(&self) -> &Color {
        &self.common().color
    }

    /// Set the entity's color.
    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    /// Get the transform applied to the entity's definition space.
    fn transform(&self) -> &TransformationMatrix {
        &self.common().transform
    }

    /// Set the transform applied to the entity's definition space.
    fn set_transform(&mut self, transform: TransformationMatrix) {
        self.common_mut().transform = transform;
    }

    /// Get the entity label.
    fn label(&self) -> Option<&str> {
        self.common().label.as_deref()
    }
}

/// Directory entry data shared by all entities.
///
/// Color and transform are already resolved; the remaining fields are kept
/// as read. Structure, view and label display associativity are pointers to
/// entities the codec does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Structure pointer.
    pub structure: i32,
    /// Line font pattern number (negative: pointer).
    pub line_font_pattern: i32,
    /// Level number (negative: pointer).
    pub level: i32,
    /// View pointer.
    pub view: i32,
    /// Label display associativity pointer.
    pub label_display: i32,
    /// Status number.
    pub status: EntityStatus,
    /// Line weight graduation number.
    pub line_weight: i32,
    /// Resolved color.
    pub color: Color,
    /// Resolved transformation matrix.
    pub transform: TransformationMatrix,
    /// Entity label, at most 8 characters.
    pub label: Option<String>,
    /// Entity subscript number.
    pub subscript: i32,
}

impl EntityCommon {
    /// Create new common entity data with defaults.
    pub fn new() -> Self {
        EntityCommon {
            structure: 0,
            line_font_pattern: 0,
            level: 0,
            view: 0,
            label_display: 0,
            status: EntityStatus::default(),
            line_weight: 0,
            color: Color::Default,
            transform: TransformationMatrix::IDENTITY,
            label: None,
            subscript: 0,
        }
    }

    /// Create with a specific color.
    pub fn with_color(color: Color) -> Self {
        EntityCommon {
            color,
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    /// Line entity (110).
    Line(Line),
    /// Circular arc or full circle (100).
    CircularArc(CircularArc),
    /// Point entity (116).
    Location(Location),
    /// Transformation matrix not referenced by any other entity (124).
    TransformationMatrix(TransformationMatrixEntity),
}

impl EntityType {
    /// Get a reference to the entity trait object.
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::CircularArc(e) => e,
            EntityType::Location(e) => e,
            EntityType::TransformationMatrix(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object.
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::CircularArc(e) => e,
            EntityType::Location(e) => e,
            EntityType::TransformationMatrix(e) => e,
        }
    }

    /// Shared directory entry data.
    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    /// The entity type number.
    pub fn type_code(&self) -> EntityTypeCode {
        self.as_entity().type_code()
    }
}

impl From<Line> for EntityType {
    fn from(line: Line) -> Self {
        EntityType::Line(line)
    }
}

impl From<CircularArc> for EntityType {
    fn from(arc: CircularArc) -> Self {
        EntityType::CircularArc(arc)
    }
}

impl From<Location> for EntityType {
    fn from(location: Location) -> Self {
        EntityType::Location(location)
    }
}

impl From<TransformationMatrixEntity> for EntityType {
    fn from(matrix: TransformationMatrixEntity) -> Self {
        EntityType::TransformationMatrix(matrix)
    }
}
