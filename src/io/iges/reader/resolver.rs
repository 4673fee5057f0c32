//! Resolution of transformation matrix and color pointers.
//!
//! Runs after every directory entry is decoded, so pointers may refer
//! forwards as well as backwards. Pointers are followed one level only.

use crate::entities::EntityType;
use crate::error::{IgesError, Result};
use crate::io::iges::directory::DirectoryEntry;
use crate::io::iges::registry::Decoded;
use crate::types::{Color, TransformationMatrix};
use indexmap::{IndexMap, IndexSet};

/// A decoded directory entry, keyed by its sequence number in the table.
#[derive(Debug, Clone)]
pub struct DecodedEntry {
    /// The entry as read from the directory section.
    pub directory: DirectoryEntry,
    /// What its parameter record decoded to.
    pub decoded: Decoded,
}

/// Decoded entries keyed by directory sequence number.
pub type DecodedTable = IndexMap<usize, DecodedEntry>;

/// Attach resolved colors and transforms and build the output list.
///
/// Color definitions never appear in the output. Transformation matrices
/// referenced by another entry are left out when `trim_referenced_transforms`
/// is set.
pub fn resolve(table: &DecodedTable, trim_referenced_transforms: bool) -> Result<Vec<EntityType>> {
    let referenced: IndexSet<usize> = if trim_referenced_transforms {
        table
            .values()
            .filter_map(|entry| usize::try_from(entry.directory.transformation_pointer).ok())
            .filter(|&pointer| pointer != 0)
            .collect()
    } else {
        IndexSet::new()
    };

    let mut entities = Vec::with_capacity(table.len());
    for (sequence, entry) in table {
        let Decoded::Entity(entity) = &entry.decoded else {
            continue;
        };
        if matches!(entity, EntityType::TransformationMatrix(_)) && referenced.contains(sequence) {
            tracing::debug!(sequence, "folding referenced transformation matrix");
            continue;
        }

        let mut entity = entity.clone();
        let target = entity.as_entity_mut();
        target.set_transform(resolve_transform(table, entry.directory.transformation_pointer)?);
        target.set_color(resolve_color(table, entry.directory.color)?);
        entities.push(entity);
    }
    Ok(entities)
}

/// Look up the matrix a transform pointer refers to; 0 is the identity.
pub fn resolve_transform(table: &DecodedTable, pointer: i32) -> Result<TransformationMatrix> {
    if pointer == 0 {
        return Ok(TransformationMatrix::IDENTITY);
    }

    let invalid = || IgesError::InvalidPointer {
        kind: "transformation matrix",
        pointer,
    };
    let sequence = usize::try_from(pointer).map_err(|_| invalid())?;
    match table.get(&sequence).map(|entry| &entry.decoded) {
        Some(Decoded::Entity(EntityType::TransformationMatrix(matrix))) => Ok(matrix.matrix),
        _ => Err(invalid()),
    }
}

/// Map a color number: 0..=8 is the palette, negative values point at a
/// color definition.
pub fn resolve_color(table: &DecodedTable, number: i32) -> Result<Color> {
    if number > Color::MAX_NUMBER {
        return Err(IgesError::Structure(format!("Invalid color number {}", number)));
    }
    if let Some(color) = Color::from_number(number) {
        return Ok(color);
    }

    let pointer = -number;
    let invalid = || IgesError::InvalidPointer {
        kind: "color",
        pointer,
    };
    let sequence = usize::try_from(pointer).map_err(|_| invalid())?;
    match table.get(&sequence).map(|entry| &entry.decoded) {
        Some(Decoded::ColorDefinition(definition)) => Ok(Color::Custom(definition.clone())),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Line, TransformationMatrixEntity};
    use crate::types::{ColorDefinition, Vector3};

    fn entry(entity_type: i32, sequence: usize, decoded: Decoded) -> (usize, DecodedEntry) {
        let mut directory = DirectoryEntry::new(entity_type, 0);
        directory.sequence = sequence;
        (sequence, DecodedEntry { directory, decoded })
    }

    fn line_entry(sequence: usize, transform: i32, color: i32) -> (usize, DecodedEntry) {
        let (sequence, mut entry) = entry(
            110,
            sequence,
            Decoded::Entity(Line::from_coords(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).into()),
        );
        entry.directory.transformation_pointer = transform;
        entry.directory.color = color;
        (sequence, entry)
    }

    fn matrix_entry(sequence: usize) -> (usize, DecodedEntry) {
        let matrix = TransformationMatrix::translation(Vector3::new(10.0, 0.0, 0.0));
        entry(
            124,
            sequence,
            Decoded::Entity(TransformationMatrixEntity::new(matrix).into()),
        )
    }

    #[test]
    fn test_identity_and_palette() {
        let table: DecodedTable = [line_entry(1, 0, 3)].into_iter().collect();
        let entities = resolve(&table, true).unwrap();
        assert_eq!(entities.len(), 1);
        let common = entities[0].common();
        assert!(common.transform.is_identity());
        assert_eq!(common.color, Color::Green);
    }

    #[test]
    fn test_transform_pointer_and_trim() {
        let table: DecodedTable = [matrix_entry(1), line_entry(3, 1, 0)].into_iter().collect();
        let entities = resolve(&table, true).unwrap();
        assert_eq!(entities.len(), 1);
        match &entities[0] {
            EntityType::Line(line) => {
                assert_eq!(line.common.transform.t, [10.0, 0.0, 0.0]);
                assert_eq!(line.world_points().0, Vector3::new(11.0, 2.0, 3.0));
            }
            other => panic!("expected a line, got {:?}", other),
        }

        let untrimmed = resolve(&table, false).unwrap();
        assert_eq!(untrimmed.len(), 2);
    }

    #[test]
    fn test_forward_transform_pointer() {
        let table: DecodedTable = [line_entry(1, 3, 0), matrix_entry(3)].into_iter().collect();
        let entities = resolve(&table, true).unwrap();
        assert_eq!(entities.len(), 1);
        assert!(!entities[0].common().transform.is_identity());
    }

    #[test]
    fn test_invalid_transform_pointer() {
        let table: DecodedTable = [line_entry(1, 1, 0), line_entry(3, 7, 0)].into_iter().collect();
        let err = resolve(&table, true).unwrap_err();
        assert!(matches!(
            err,
            IgesError::InvalidPointer { kind: "transformation matrix", pointer: 1 }
        ));
    }

    #[test]
    fn test_custom_color_pointer() {
        let definition = ColorDefinition::new(1.0, 0.5, 0.0);
        let table: DecodedTable = [
            entry(314, 1, Decoded::ColorDefinition(definition.clone())),
            line_entry(3, 0, -1),
        ]
        .into_iter()
        .collect();
        let entities = resolve(&table, true).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].common().color, Color::Custom(definition));
    }

    #[test]
    fn test_invalid_color() {
        let table: DecodedTable = [line_entry(1, 0, -9)].into_iter().collect();
        assert!(matches!(
            resolve(&table, true).unwrap_err(),
            IgesError::InvalidPointer { kind: "color", pointer: 9 }
        ));

        let table: DecodedTable = [line_entry(1, 0, 9)].into_iter().collect();
        assert!(matches!(resolve(&table, true).unwrap_err(), IgesError::Structure(_)));
    }
}
