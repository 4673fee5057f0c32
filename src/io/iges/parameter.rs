//! Parameter data section.
//!
//! Reading gathers physical lines into records: a record opens on its first
//! line and closes on the record delimiter found outside any Hollerith
//! string. Writing goes the other way, wrapping fields onto 64-column lines
//! that each carry the owning directory entry's sequence number.

use crate::error::{IgesError, Result};
use crate::io::iges::record::{
    columns, format_percentage, format_real, hollerith, PhysicalLine, MAX_DATA_LENGTH,
    PARAMETER_DATA_LENGTH,
};
use crate::io::iges::tokenizer::{scan_record, RecordScan, Token};
use indexmap::IndexMap;

/// A closed parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    /// Sequence number of the record's first line.
    pub pointer: usize,
    /// All fields, starting with the entity type number.
    pub tokens: Vec<Token>,
    /// Directory entry sequence number from columns 66-72.
    pub back_pointer: Option<usize>,
    /// Number of physical lines the record spans.
    pub line_count: usize,
}

impl ParameterRecord {
    /// The entity type number in the first field.
    pub fn entity_type(&self) -> Result<i32> {
        match self.tokens.first() {
            Some(token) => token.integer(0),
            None => Err(IgesError::Structure(format!(
                "Parameter record {} is empty",
                self.pointer
            ))),
        }
    }

    /// Fields after the entity type number.
    pub fn fields(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

#[derive(Debug)]
enum RecordState {
    Empty,
    Accumulating {
        pointer: usize,
        text: String,
        back_pointer: Option<usize>,
        line_count: usize,
    },
}

/// Incremental record builder over parameter lines.
#[derive(Debug)]
pub struct ParameterReader {
    field_delimiter: char,
    record_delimiter: char,
    state: RecordState,
}

impl ParameterReader {
    pub fn new(field_delimiter: char, record_delimiter: char) -> Self {
        ParameterReader {
            field_delimiter,
            record_delimiter,
            state: RecordState::Empty,
        }
    }

    /// Feed one line; returns the record it closes, if any.
    pub fn push_line(&mut self, line: &PhysicalLine) -> Result<Option<ParameterRecord>> {
        let data = columns(&line.data, 0, PARAMETER_DATA_LENGTH);
        let back_pointer = parse_back_pointer(line)?;

        let state = std::mem::replace(&mut self.state, RecordState::Empty);
        let (pointer, mut text, first_back_pointer, line_count) = match state {
            RecordState::Empty => {
                if data.trim().is_empty() {
                    return Ok(None);
                }
                (line.sequence, String::new(), back_pointer, 0)
            }
            RecordState::Accumulating {
                pointer,
                text,
                back_pointer: first_back_pointer,
                line_count,
            } => {
                if back_pointer != first_back_pointer {
                    return Err(IgesError::Structure(format!(
                        "Parameter line {} points to directory entry {}, but its record started with {}",
                        line.sequence,
                        display_pointer(back_pointer),
                        display_pointer(first_back_pointer)
                    )));
                }
                (pointer, text, first_back_pointer, line_count)
            }
        };

        text.push_str(data);
        let line_count = line_count + 1;

        match scan_record(&text, self.field_delimiter, self.record_delimiter)? {
            RecordScan::Complete(tokens) => Ok(Some(ParameterRecord {
                pointer,
                tokens,
                back_pointer: first_back_pointer,
                line_count,
            })),
            RecordScan::Incomplete => {
                self.state = RecordState::Accumulating {
                    pointer,
                    text,
                    back_pointer: first_back_pointer,
                    line_count,
                };
                Ok(None)
            }
        }
    }

    /// End of section; fails when a record is still open.
    pub fn finish(self) -> Result<()> {
        match self.state {
            RecordState::Empty => Ok(()),
            RecordState::Accumulating { pointer, .. } => Err(IgesError::Structure(format!(
                "Parameter record starting at line {} is not terminated by '{}'",
                pointer, self.record_delimiter
            ))),
        }
    }
}

fn parse_back_pointer(line: &PhysicalLine) -> Result<Option<usize>> {
    let text = columns(&line.data, PARAMETER_DATA_LENGTH, MAX_DATA_LENGTH).trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<usize>().map(Some).map_err(|_| IgesError::InvalidLine {
        line: line.line_number,
        reason: format!("invalid directory entry back-pointer '{}'", text),
    })
}

fn display_pointer(pointer: Option<usize>) -> String {
    pointer.map_or_else(|| "(blank)".to_string(), |p| p.to_string())
}

/// Gather every record of the section, keyed by the sequence number of its first line.
pub fn read_records(
    lines: &[PhysicalLine],
    field_delimiter: char,
    record_delimiter: char,
) -> Result<IndexMap<usize, ParameterRecord>> {
    let mut reader = ParameterReader::new(field_delimiter, record_delimiter);
    let mut records = IndexMap::new();
    for line in lines {
        if let Some(record) = reader.push_line(line)? {
            records.insert(record.pointer, record);
        }
    }
    reader.finish()?;
    Ok(records)
}

/// A value to be written into a free-format record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Written as nothing, so the reader falls back to its default.
    Default,
    Integer(i32),
    Real(f64),
    /// A fraction written as a percentage.
    Percentage(f64),
    /// Written as a Hollerith string.
    Text(String),
}

impl ParameterValue {
    /// Optional text; `None` and empty strings become [`ParameterValue::Default`].
    pub fn optional_text(text: Option<&str>) -> Self {
        match text {
            Some(text) if !text.is_empty() => ParameterValue::Text(text.to_string()),
            _ => ParameterValue::Default,
        }
    }

    /// The field text without delimiter.
    pub fn format(&self) -> Result<String> {
        match self {
            ParameterValue::Default => Ok(String::new()),
            ParameterValue::Integer(value) => Ok(value.to_string()),
            ParameterValue::Real(value) if value.is_finite() => Ok(format_real(*value)),
            ParameterValue::Percentage(value) if value.is_finite() => {
                Ok(format_percentage(*value))
            }
            ParameterValue::Real(value) | ParameterValue::Percentage(value) => {
                Err(IgesError::Custom(format!(
                    "Cannot write non-finite value {}",
                    value
                )))
            }
            ParameterValue::Text(text) => Ok(hollerith(text)),
        }
    }
}

/// Lay out fields on lines of `width` columns.
///
/// Each field is followed by the field delimiter, the last one by the record
/// delimiter. A field that does not fit on the current line starts a new
/// one; a field wider than a whole line is split across lines.
pub fn wrap_fields(
    values: &[ParameterValue],
    field_delimiter: char,
    record_delimiter: char,
    width: usize,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_length = 0;
    let last = values.len().saturating_sub(1);

    for (index, value) in values.iter().enumerate() {
        let delimiter = if index == last {
            record_delimiter
        } else {
            field_delimiter
        };
        let mut text = value.format()?;
        text.push(delimiter);
        let length = text.chars().count();

        if current_length + length <= width {
            current.push_str(&text);
            current_length += length;
        } else if length <= width {
            lines.push(std::mem::take(&mut current));
            current = text;
            current_length = length;
        } else {
            let mut rest: Vec<char> = text.chars().collect();
            while !rest.is_empty() {
                let allowed = width - current_length;
                if rest.len() <= allowed {
                    current_length += rest.len();
                    current.extend(rest.drain(..));
                } else {
                    current.extend(rest.drain(..allowed));
                    lines.push(std::mem::take(&mut current));
                    current_length = 0;
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Parameter data areas for one record: 64 wrapped columns, a blank, then
/// the directory entry sequence number right-justified in 7 columns.
pub fn format_parameter_lines(
    values: &[ParameterValue],
    field_delimiter: char,
    record_delimiter: char,
    directory_sequence: usize,
) -> Result<Vec<String>> {
    let lines = wrap_fields(values, field_delimiter, record_delimiter, PARAMETER_DATA_LENGTH)?;
    Ok(lines
        .into_iter()
        .map(|data| {
            let padding = PARAMETER_DATA_LENGTH - data.chars().count();
            format!("{}{} {:>7}", data, " ".repeat(padding), directory_sequence)
        })
        .collect())
}
