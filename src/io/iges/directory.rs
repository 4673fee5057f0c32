//! Directory entry section: two fixed-width lines per entity.

use crate::entities::EntityStatus;
use crate::error::{IgesError, Result};
use crate::io::iges::record::{
    format_int_field, format_label_field, format_pointer_field, parse_int_field,
    parse_string_field, raw_field, FIELD_WIDTH,
};

/// One directory entry, as laid out in the file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectoryEntry {
    /// Entity type number (fields 1 and 11).
    pub entity_type: i32,
    /// First line of the entity's parameter record (field 2).
    pub parameter_pointer: i32,
    /// Structure pointer or value (field 3); not followed.
    pub structure: i32,
    /// Line font number, or a negated pointer to a definition (field 4).
    pub line_font_pattern: i32,
    /// Level number, or a negated pointer to a property (field 5).
    pub level: i32,
    /// View pointer (field 6); not followed.
    pub view: i32,
    /// Transformation matrix pointer, 0 for none (field 7).
    pub transformation_pointer: i32,
    /// Label display associativity pointer (field 8); not followed.
    pub label_display: i32,
    /// Blank, subordinate, use and hierarchy flags (field 9).
    pub status: EntityStatus,
    /// Line weight number (field 12).
    pub line_weight: i32,
    /// Color number 0..=8, or a negated pointer to a color definition (field 13).
    pub color: i32,
    /// Number of parameter lines (field 14).
    pub parameter_line_count: i32,
    /// Form number (field 15).
    pub form: i32,
    /// Entity label, up to 8 characters (field 18).
    pub label: Option<String>,
    /// Entity subscript number (field 19).
    pub subscript: i32,
    /// Sequence number of the entry's first line.
    pub sequence: usize,
}

impl DirectoryEntry {
    /// Create an entry for an entity type; pointers and counts are filled in when written.
    pub fn new(entity_type: i32, form: i32) -> Self {
        DirectoryEntry {
            entity_type,
            form,
            ..Default::default()
        }
    }

    /// Parse a pair of directory lines (data columns only).
    pub fn parse(first: &str, second: &str, sequence: usize) -> Result<Self> {
        let int = |data: &str, index: usize, name: &str| -> Result<i32> {
            parse_int_field(raw_field(data, index), name).map_err(|e| at_sequence(e, sequence))
        };

        let entity_type = int(first, 0, "entity type")?;
        let repeated_type = int(second, 0, "entity type")?;
        if entity_type != repeated_type {
            return Err(IgesError::Structure(format!(
                "Directory entry {} has mismatched entity types {} and {}",
                sequence, entity_type, repeated_type
            )));
        }

        let status = EntityStatus::parse(raw_field(first, 8)).map_err(|e| at_sequence(e, sequence))?;

        Ok(DirectoryEntry {
            entity_type,
            parameter_pointer: int(first, 1, "parameter pointer")?,
            structure: int(first, 2, "structure")?,
            line_font_pattern: int(first, 3, "line font pattern")?,
            level: int(first, 4, "level")?,
            view: int(first, 5, "view")?,
            transformation_pointer: int(first, 6, "transformation matrix pointer")?,
            label_display: int(first, 7, "label display")?,
            status,
            line_weight: int(second, 1, "line weight")?,
            color: int(second, 2, "color")?,
            parameter_line_count: int(second, 3, "parameter line count")?,
            form: int(second, 4, "form")?,
            label: parse_string_field(raw_field(second, 7)),
            subscript: int(second, 8, "entity subscript")?,
            sequence,
        })
    }

    /// Format the two data areas (72 columns each).
    pub fn format(&self) -> (String, String) {
        let first = [
            format_int_field(self.entity_type),
            format_int_field(self.parameter_pointer),
            format_int_field(self.structure),
            format_int_field(self.line_font_pattern),
            format_int_field(self.level),
            format_pointer_field(self.view),
            format_pointer_field(self.transformation_pointer),
            format_pointer_field(self.label_display),
            format!("{:>8}", self.status.to_string()),
        ]
        .concat();

        let blank = " ".repeat(FIELD_WIDTH);
        let second = [
            format_int_field(self.entity_type),
            format_int_field(self.line_weight),
            format_int_field(self.color),
            format_int_field(self.parameter_line_count),
            format_int_field(self.form),
            blank.clone(),
            blank,
            format_label_field(self.label.as_deref()),
            format_pointer_field(self.subscript),
        ]
        .concat();

        (first, second)
    }
}

fn at_sequence(error: IgesError, sequence: usize) -> IgesError {
    match error {
        IgesError::Structure(message) => {
            IgesError::Structure(format!("{} (directory entry {})", message, sequence))
        }
        other => other,
    }
}
