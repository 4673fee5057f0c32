//! Directory and parameter data section layout.
//!
//! Entities are laid out in order. A non-identity transform or a custom
//! color is written as its own record just before the first entity that
//! uses it, and later entities with the same value point at that record.

use crate::entities::{EntityCommon, EntityType, EntityTypeCode};
use crate::error::{IgesError, Result};
use crate::io::iges::directory::DirectoryEntry;
use crate::io::iges::parameter::{format_parameter_lines, ParameterValue};
use crate::io::iges::registry;
use crate::types::{Color, ColorDefinition, TransformationMatrix};
use indexmap::IndexMap;

type ColorKey = ([u64; 3], Option<String>);

/// Accumulates directory and parameter data areas (72 columns each).
#[derive(Debug)]
pub struct SectionBuilder {
    field_delimiter: char,
    record_delimiter: char,
    /// Directory entry data areas, two per record.
    pub directory_lines: Vec<String>,
    /// Parameter data areas with their back-pointers.
    pub parameter_lines: Vec<String>,
    transforms: IndexMap<[u64; 12], usize>,
    colors: IndexMap<ColorKey, usize>,
}

impl SectionBuilder {
    pub fn new(field_delimiter: char, record_delimiter: char) -> Self {
        SectionBuilder {
            field_delimiter,
            record_delimiter,
            directory_lines: Vec::new(),
            parameter_lines: Vec::new(),
            transforms: IndexMap::new(),
            colors: IndexMap::new(),
        }
    }

    /// Lay out one entity, preceded by any transform or color record it needs.
    pub fn push_entity(mut self, entity: &EntityType) -> Result<Self> {
        let encoded = registry::encode(entity)?;
        let common = entity.common();
        let transformation_pointer = self.transform_pointer(&common.transform)?;
        let color = self.color_number(&common.color)?;

        let mut entry = directory_entry(encoded.code, encoded.form, common);
        entry.transformation_pointer = transformation_pointer;
        entry.color = color;
        self.push_record(entry, encoded.values)?;
        Ok(self)
    }

    fn transform_pointer(&mut self, matrix: &TransformationMatrix) -> Result<i32> {
        if matrix.is_identity() {
            return Ok(0);
        }
        let key = matrix.bit_key();
        if let Some(&sequence) = self.transforms.get(&key) {
            return to_field(sequence);
        }

        let entry = DirectoryEntry::new(EntityTypeCode::TransformationMatrix.to_i32(), 0);
        let sequence = self.push_record(entry, registry::encode_transform(matrix))?;
        self.transforms.insert(key, sequence);
        to_field(sequence)
    }

    /// Predefined colors are written as their number, custom colors as a
    /// negated pointer to a color definition record.
    fn color_number(&mut self, color: &Color) -> Result<i32> {
        let definition = match color {
            Color::Custom(definition) => definition,
            other => return Ok(other.number().unwrap_or(0)),
        };

        let key = color_key(definition);
        let sequence = match self.colors.get(&key) {
            Some(&sequence) => sequence,
            None => {
                let entry = DirectoryEntry::new(EntityTypeCode::ColorDefinition.to_i32(), 0);
                let sequence =
                    self.push_record(entry, registry::encode_color_definition(definition))?;
                self.colors.insert(key, sequence);
                sequence
            }
        };
        Ok(-to_field(sequence)?)
    }

    /// Append a directory entry and its parameter record; returns the entry's sequence number.
    fn push_record(&mut self, mut entry: DirectoryEntry, values: Vec<ParameterValue>) -> Result<usize> {
        let sequence = self.directory_lines.len() + 1;

        let mut record = Vec::with_capacity(values.len() + 1);
        record.push(ParameterValue::Integer(entry.entity_type));
        record.extend(values);
        let lines = format_parameter_lines(
            &record,
            self.field_delimiter,
            self.record_delimiter,
            sequence,
        )?;

        entry.parameter_pointer = to_field(self.parameter_lines.len() + 1)?;
        entry.parameter_line_count = to_field(lines.len())?;
        entry.sequence = sequence;

        let (first, second) = entry.format();
        self.directory_lines.push(first);
        self.directory_lines.push(second);
        self.parameter_lines.extend(lines);
        Ok(sequence)
    }
}

/// Directory fields carried over from the model. Structure, view and label
/// display associativity are not modeled as entities, so they are written as 0,
/// as are line font and level pointers.
fn directory_entry(code: EntityTypeCode, form: i32, common: &EntityCommon) -> DirectoryEntry {
    DirectoryEntry {
        line_font_pattern: common.line_font_pattern.max(0),
        level: common.level.max(0),
        status: common.status,
        line_weight: common.line_weight,
        label: common.label.clone(),
        subscript: common.subscript,
        ..DirectoryEntry::new(code.to_i32(), form)
    }
}

fn color_key(definition: &ColorDefinition) -> ColorKey {
    (
        [definition.red, definition.green, definition.blue].map(f64::to_bits),
        definition.name.clone(),
    )
}

fn to_field(value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        IgesError::Custom(format!("Sequence number {} does not fit a directory field", value))
    })
}
