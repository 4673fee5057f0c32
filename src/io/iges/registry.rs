//! Entity type dispatch between directory/parameter records and the model.

use crate::entities::{
    CircularArc, EntityCommon, EntityType, EntityTypeCode, Line, LineBounding, Location,
    TransformationMatrixEntity,
};
use crate::error::{IgesError, Result};
use crate::io::iges::directory::DirectoryEntry;
use crate::io::iges::parameter::ParameterValue;
use crate::io::iges::tokenizer::Token;
use crate::types::{ColorDefinition, TransformationMatrix, Vector3};

/// Result of decoding one directory entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A modeled entity; color and transform are not resolved yet.
    Entity(EntityType),
    /// Color definition, only used to resolve color pointers.
    ColorDefinition(ColorDefinition),
}

/// Entity type, form number and parameter values (without the type field).
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedEntity {
    /// Entity type written to the directory entry.
    pub code: EntityTypeCode,
    /// Form number written to the directory entry.
    pub form: i32,
    /// Parameter fields after the entity type number.
    pub values: Vec<ParameterValue>,
}

/// Decode a directory entry and the fields that follow the entity type in its
/// parameter record. Unmodeled entity types yield `None`.
pub fn decode(entry: &DirectoryEntry, fields: &[Token]) -> Result<Option<Decoded>> {
    let code = match EntityTypeCode::from_i32(entry.entity_type) {
        Some(code) => code,
        None => return Ok(None),
    };

    let decoded = match code {
        EntityTypeCode::Line => {
            expect_count(entry, fields, 6, 6)?;
            let p = reals(fields)?;
            Decoded::Entity(EntityType::Line(Line {
                common: common_from_entry(entry),
                p1: Vector3::new(p[0], p[1], p[2]),
                p2: Vector3::new(p[3], p[4], p[5]),
                bounding: LineBounding::from_form(entry.form)?,
            }))
        }
        EntityTypeCode::CircularArc => {
            expect_count(entry, fields, 7, 7)?;
            let p = reals(fields)?;
            let z = p[0];
            Decoded::Entity(EntityType::CircularArc(CircularArc {
                common: common_from_entry(entry),
                center: Vector3::new(p[1], p[2], z),
                start_point: Vector3::new(p[3], p[4], z),
                end_point: Vector3::new(p[5], p[6], z),
            }))
        }
        EntityTypeCode::Point => {
            expect_count(entry, fields, 3, 4)?;
            let p = reals(&fields[..3])?;
            if let Some(symbol) = fields.get(3) {
                let pointer = symbol.integer(0)?;
                if pointer != 0 {
                    tracing::debug!(
                        sequence = entry.sequence,
                        pointer,
                        "ignoring display symbol pointer of point"
                    );
                }
            }
            Decoded::Entity(EntityType::Location(Location {
                common: common_from_entry(entry),
                point: Vector3::new(p[0], p[1], p[2]),
            }))
        }
        EntityTypeCode::TransformationMatrix => {
            expect_count(entry, fields, 12, 12)?;
            let p = reals(fields)?;
            let mut parameters = [0.0; TransformationMatrix::PARAMETER_COUNT];
            parameters.copy_from_slice(&p);
            Decoded::Entity(EntityType::TransformationMatrix(TransformationMatrixEntity {
                common: common_from_entry(entry),
                matrix: TransformationMatrix::from_parameters(parameters),
                form: entry.form,
            }))
        }
        EntityTypeCode::ColorDefinition => {
            expect_count(entry, fields, 3, 4)?;
            let p = fields[..3]
                .iter()
                .map(|token| token.percentage(0.0))
                .collect::<Result<Vec<_>>>()?;
            let name = match fields.get(3) {
                Some(token) => token.string()?,
                None => None,
            };
            Decoded::ColorDefinition(ColorDefinition {
                red: p[0],
                green: p[1],
                blue: p[2],
                name,
            })
        }
    };

    Ok(Some(decoded))
}

fn expect_count(entry: &DirectoryEntry, fields: &[Token], min: usize, max: usize) -> Result<()> {
    if fields.len() < min || fields.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{}-{}", min, max)
        };
        return Err(IgesError::FieldCount {
            entity: entry.entity_type,
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}

fn reals(fields: &[Token]) -> Result<Vec<f64>> {
    fields.iter().map(|token| token.real(0.0)).collect()
}

fn common_from_entry(entry: &DirectoryEntry) -> EntityCommon {
    EntityCommon {
        structure: entry.structure,
        line_font_pattern: entry.line_font_pattern,
        level: entry.level,
        view: entry.view,
        label_display: entry.label_display,
        status: entry.status,
        line_weight: entry.line_weight,
        label: entry.label.clone(),
        subscript: entry.subscript,
        ..EntityCommon::new()
    }
}

/// Encode an entity's geometry.
///
/// An arc record holds one plane displacement; an arc whose start or end
/// point leaves the plane of its center is rejected.
pub fn encode(entity: &EntityType) -> Result<EncodedEntity> {
    let real = ParameterValue::Real;
    let encoded = match entity {
        EntityType::Line(line) => EncodedEntity {
            code: EntityTypeCode::Line,
            form: line.bounding.form(),
            values: [line.p1, line.p2]
                .iter()
                .flat_map(|p| p.to_array())
                .map(real)
                .collect(),
        },
        EntityType::CircularArc(arc) => {
            check_arc_plane(arc)?;
            EncodedEntity {
                code: EntityTypeCode::CircularArc,
                form: 0,
                values: [
                    arc.plane_displacement(),
                    arc.center.x,
                    arc.center.y,
                    arc.start_point.x,
                    arc.start_point.y,
                    arc.end_point.x,
                    arc.end_point.y,
                ]
                .into_iter()
                .map(real)
                .collect(),
            }
        }
        EntityType::Location(location) => EncodedEntity {
            code: EntityTypeCode::Point,
            form: 0,
            values: location.point.to_array().into_iter().map(real).collect(),
        },
        EntityType::TransformationMatrix(matrix) => EncodedEntity {
            code: EntityTypeCode::TransformationMatrix,
            form: matrix.form,
            values: encode_transform(&matrix.matrix),
        },
    };
    Ok(encoded)
}

fn check_arc_plane(arc: &CircularArc) -> Result<()> {
    let z = arc.plane_displacement();
    for (name, point) in [("start", arc.start_point), ("end", arc.end_point)] {
        if point.z != z {
            return Err(IgesError::Custom(format!(
                "Arc {} point z {} differs from its plane displacement {}",
                name, point.z, z
            )));
        }
    }
    Ok(())
}

/// Parameter values of a transformation matrix entity.
pub fn encode_transform(matrix: &TransformationMatrix) -> Vec<ParameterValue> {
    matrix
        .to_parameters()
        .into_iter()
        .map(ParameterValue::Real)
        .collect()
}

/// Parameter values of a color definition entity, intensities as percentages.
pub fn encode_color_definition(definition: &ColorDefinition) -> Vec<ParameterValue> {
    let mut values: Vec<ParameterValue> = [definition.red, definition.green, definition.blue]
        .into_iter()
        .map(ParameterValue::Percentage)
        .collect();
    if definition.name.as_deref().is_some_and(|name| !name.is_empty()) {
        values.push(ParameterValue::optional_text(definition.name.as_deref()));
    }
    values
}
