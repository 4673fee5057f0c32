//! IGES file model: start text, global section values and entities.

use crate::entities::EntityType;
use crate::error::Result;
use crate::io::iges::{IgesReader, IgesWriter};
use crate::notification::NotificationCollection;
use crate::types::{IgesDraftingStandard, IgesUnits, IgesVersion};
use chrono::{Local, NaiveDateTime, Timelike};
use std::io::{Read, Write};

/// An IGES file held in memory.
///
/// Global section fields are stored flat, in file order. Optional strings
/// that were left empty in the file read as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct IgesFile {
    // ==================== Delimiters ====================
    /// Global field 1.
    pub field_delimiter: char,
    /// Global field 2.
    pub record_delimiter: char,

    /// Free-form text of the start section, lines separated by `\n`.
    pub start_text: String,

    // ==================== Product / sender ====================
    /// Product identification from the sender (field 3).
    pub identification: Option<String>,
    /// File name (field 4).
    pub full_file_name: Option<String>,
    /// Native system ID (field 5).
    pub system_identifier: Option<String>,
    /// Preprocessor version (field 6).
    pub system_version: Option<String>,

    // ==================== Number representation ====================
    /// Bits in an integer (field 7).
    pub integer_size: i32,
    /// Maximum power of ten of a single precision float (field 8).
    pub single_size: i32,
    /// Significant digits of a single precision float (field 9).
    pub decimal_digits: i32,
    /// Maximum power of ten of a double precision float (field 10).
    pub double_magnitude: i32,
    /// Significant digits of a double precision float (field 11).
    pub double_precision: i32,

    // ==================== Model ====================
    /// Product identification for the receiver (field 12).
    pub identifier: Option<String>,
    /// Model space scale (field 13).
    pub model_space_scale: f64,
    /// Units flag (field 14).
    pub model_units: IgesUnits,
    /// Units name when the flag is custom (field 15).
    pub custom_model_units: Option<String>,
    /// Number of line weight graduations (field 16).
    pub max_line_weight_graduations: i32,
    /// Width of the maximum line weight in units (field 17).
    pub max_line_weight: f64,
    /// Date and time of file generation (field 18).
    pub timestamp: NaiveDateTime,
    /// Minimum user-intended resolution (field 19).
    pub minimum_resolution: f64,
    /// Approximate maximum coordinate value (field 20).
    pub max_coordinate_value: f64,

    // ==================== Authoring ====================
    /// Name of author (field 21).
    pub author: Option<String>,
    /// Author's organization (field 22).
    pub organization: Option<String>,
    /// Version flag (field 23).
    pub iges_version: IgesVersion,
    /// Drafting standard flag (field 24).
    pub drafting_standard: IgesDraftingStandard,
    /// Date and time the model was last modified (field 25).
    pub modified_time: NaiveDateTime,
    /// Application protocol or subset identifier (field 26).
    pub application_protocol: Option<String>,

    /// Modeled entities, in directory order.
    pub entities: Vec<EntityType>,
    /// Issues collected while reading.
    pub notifications: NotificationCollection,
}

impl IgesFile {
    /// Default field delimiter.
    pub const DEFAULT_FIELD_DELIMITER: char = ',';

    /// Default record delimiter.
    pub const DEFAULT_RECORD_DELIMITER: char = ';';

    /// Create an empty file with default global values, stamped with the current time.
    pub fn new() -> Self {
        let now = current_time();
        IgesFile {
            field_delimiter: Self::DEFAULT_FIELD_DELIMITER,
            record_delimiter: Self::DEFAULT_RECORD_DELIMITER,
            start_text: String::new(),
            identification: None,
            full_file_name: None,
            system_identifier: None,
            system_version: None,
            integer_size: 32,
            single_size: 8,
            decimal_digits: 23,
            double_magnitude: 11,
            double_precision: 52,
            identifier: None,
            model_space_scale: 1.0,
            model_units: IgesUnits::Inches,
            custom_model_units: None,
            max_line_weight_graduations: 0,
            max_line_weight: 1.0,
            timestamp: now,
            minimum_resolution: 1e-10,
            max_coordinate_value: 0.0,
            author: None,
            organization: None,
            iges_version: IgesVersion::V5_3,
            drafting_standard: IgesDraftingStandard::None,
            modified_time: now,
            application_protocol: None,
            entities: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Read a file from any reader with the default configuration.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        IgesReader::from_reader(reader)?.read()
    }

    /// Write the file to any writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        IgesWriter::new(self).write_to_writer(writer)
    }

    /// Append an entity.
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) {
        self.entities.push(entity.into());
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over entities.
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.iter()
    }
}

impl Default for IgesFile {
    fn default() -> Self {
        Self::new()
    }
}

fn current_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Line;

    #[test]
    fn test_defaults() {
        let file = IgesFile::new();
        assert_eq!(file.field_delimiter, ',');
        assert_eq!(file.record_delimiter, ';');
        assert_eq!(file.integer_size, 32);
        assert_eq!(file.double_precision, 52);
        assert_eq!(file.model_units, IgesUnits::Inches);
        assert_eq!(file.minimum_resolution, 1e-10);
        assert_eq!(file.iges_version, IgesVersion::V5_3);
        assert_eq!(file.timestamp.nanosecond(), 0);
        assert_eq!(file.entity_count(), 0);
    }

    #[test]
    fn test_add_entity() {
        let mut file = IgesFile::new();
        file.add_entity(Line::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(file.entity_count(), 1);
        assert_eq!(file.entities().count(), 1);
    }
}
