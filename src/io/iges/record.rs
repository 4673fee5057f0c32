//! Fixed-column record primitives.
//!
//! Every physical line is 80 columns: 72 data columns, the section letter in
//! column 73 and a right-justified sequence number in columns 74-80.

use crate::error::{IgesError, Result};
use std::fmt;

/// Data columns of a physical line.
pub const MAX_DATA_LENGTH: usize = 72;

/// Data columns of a parameter line; 65 is blank, 66-72 hold the back-pointer.
pub const PARAMETER_DATA_LENGTH: usize = 64;

/// Full physical line width.
pub const LINE_LENGTH: usize = 80;

/// Width of a directory entry field.
pub const FIELD_WIDTH: usize = 8;

/// The five sections of an ASCII file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionType {
    Start,
    Global,
    Directory,
    Parameter,
    Terminate,
}

impl SectionType {
    /// Classify a line by its column-73 letter.
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'S' => Ok(SectionType::Start),
            'G' => Ok(SectionType::Global),
            'D' => Ok(SectionType::Directory),
            'P' => Ok(SectionType::Parameter),
            'T' => Ok(SectionType::Terminate),
            'B' | 'C' => Err(IgesError::Structure(format!(
                "Binary and compressed files are not supported (section letter '{}')",
                letter
            ))),
            _ => Err(IgesError::Structure(format!(
                "Unknown section letter '{}'",
                letter
            ))),
        }
    }

    /// The column-73 letter.
    pub fn letter(self) -> char {
        match self {
            SectionType::Start => 'S',
            SectionType::Global => 'G',
            SectionType::Directory => 'D',
            SectionType::Parameter => 'P',
            SectionType::Terminate => 'T',
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One 80-column line split into its data area and sequence columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalLine {
    /// Section named by the column-73 letter.
    pub section: SectionType,
    /// Columns 1-72.
    pub data: String,
    /// Columns 74-80.
    pub sequence: usize,
    /// 1-based position in the stream, for error messages.
    pub line_number: usize,
}

impl PhysicalLine {
    /// Split a line that has already had its line terminator removed.
    pub fn parse(text: &str, line_number: usize) -> Result<Self> {
        let length = text.chars().count();
        if length != LINE_LENGTH {
            return Err(IgesError::InvalidLine {
                line: line_number,
                reason: format!("expected {} columns, found {}", LINE_LENGTH, length),
            });
        }

        let letter = columns(text, MAX_DATA_LENGTH, MAX_DATA_LENGTH + 1)
            .chars()
            .next()
            .unwrap_or(' ');
        let section = SectionType::from_letter(letter).map_err(|e| IgesError::InvalidLine {
            line: line_number,
            reason: e.to_string(),
        })?;

        let sequence_text = columns(text, MAX_DATA_LENGTH + 1, LINE_LENGTH);
        let sequence = sequence_text
            .trim()
            .parse::<usize>()
            .map_err(|_| IgesError::InvalidLine {
                line: line_number,
                reason: format!("invalid sequence number '{}'", sequence_text),
            })?;

        Ok(PhysicalLine {
            section,
            data: columns(text, 0, MAX_DATA_LENGTH).to_string(),
            sequence,
            line_number,
        })
    }
}

/// Line counts recorded in the terminate section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminateCounts {
    pub start: usize,
    pub global: usize,
    pub directory: usize,
    pub parameter: usize,
}

impl TerminateCounts {
    const ORDER: [SectionType; 4] = [
        SectionType::Start,
        SectionType::Global,
        SectionType::Directory,
        SectionType::Parameter,
    ];

    /// Parse `S{n:>7}G{n:>7}D{n:>7}P{n:>7}` from a terminate data area.
    pub fn parse(data: &str) -> Result<Self> {
        let mut counts = [0usize; 4];
        for (index, section) in Self::ORDER.iter().enumerate() {
            let field = raw_field(data, index);
            let letter = field.chars().next().unwrap_or(' ');
            let number = columns(field, 1, FIELD_WIDTH).trim();
            if letter != section.letter() {
                return Err(IgesError::Structure(format!(
                    "Terminate section expected '{}' count, found '{}'",
                    section.letter(),
                    field
                )));
            }
            counts[index] = number.parse::<usize>().map_err(|_| {
                IgesError::Structure(format!("Invalid terminate count '{}'", field))
            })?;
        }

        Ok(TerminateCounts {
            start: counts[0],
            global: counts[1],
            directory: counts[2],
            parameter: counts[3],
        })
    }

    /// The terminate data area.
    pub fn format(&self) -> String {
        format!(
            "S{:>7}G{:>7}D{:>7}P{:>7}",
            self.start, self.global, self.directory, self.parameter
        )
    }
}

/// Build one physical line from at most 72 data characters.
pub fn format_line(data: &str, section: SectionType, sequence: usize) -> Result<String> {
    let length = data.chars().count();
    if length > MAX_DATA_LENGTH {
        return Err(IgesError::Custom(format!(
            "Line data exceeds {} columns ({} characters): '{}'",
            MAX_DATA_LENGTH, length, data
        )));
    }
    Ok(format!(
        "{}{}{}{:>7}",
        data,
        " ".repeat(MAX_DATA_LENGTH - length),
        section.letter(),
        sequence
    ))
}

/// Character columns `[start, end)` of `text`, clamped to its length.
pub fn columns(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |column: usize| {
        text.char_indices()
            .nth(column)
            .map(|(index, _)| index)
            .unwrap_or(text.len())
    };
    let start_byte = byte_at(start);
    let end_byte = byte_at(end.max(start));
    &text[start_byte..end_byte]
}

/// The raw text of fixed-width field `index` (0-based) of a data area.
pub fn raw_field(data: &str, index: usize) -> &str {
    columns(data, index * FIELD_WIDTH, (index + 1) * FIELD_WIDTH)
}

/// Parse a right-justified integer field; blank reads as 0.
pub fn parse_int_field(text: &str, name: &str) -> Result<i32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i32>().map_err(|_| {
        IgesError::Structure(format!("Invalid {} field: '{}'", name, text))
    })
}

/// Parse a string field; blank reads as `None`.
pub fn parse_string_field(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Right-justify an integer in an 8-column field.
pub fn format_int_field(value: i32) -> String {
    format!("{:>8}", value)
}

/// Right-justify a pointer in an 8-column field, blank when zero.
pub fn format_pointer_field(value: i32) -> String {
    if value == 0 {
        " ".repeat(FIELD_WIDTH)
    } else {
        format_int_field(value)
    }
}

/// Left-justify a label in an 8-column field, truncating longer text.
pub fn format_label_field(label: Option<&str>) -> String {
    let text: String = label.unwrap_or_default().chars().take(FIELD_WIDTH).collect();
    format!("{:<8}", text)
}

/// Hollerith string literal `nHtext`; `n` counts characters.
pub fn hollerith(text: &str) -> String {
    format!("{}H{}", text.chars().count(), text)
}

/// Format a real so that it always carries a decimal point or exponent.
pub fn format_real(value: f64) -> String {
    if value == 0.0 {
        return "0.".to_string();
    }

    let magnitude = value.abs();
    let mut text = if magnitude < 1e-4 || magnitude >= 1e15 {
        format!("{:E}", value)
    } else {
        value.to_string()
    };
    if !text.contains('.') && !text.contains('E') {
        text.push('.');
    }
    text
}

/// Parse a real, accepting `D` as the exponent marker.
pub fn parse_real(text: &str) -> Option<f64> {
    let normalized: String = text
        .trim()
        .chars()
        .map(|c| if c == 'D' || c == 'd' { 'E' } else { c })
        .collect();
    normalized.parse::<f64>().ok()
}

/// Parse an integer; reals with no fractional part are accepted.
pub fn parse_integer(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return Some(value);
    }
    match parse_real(trimmed) {
        Some(value) if value.fract() == 0.0 && value.abs() <= i32::MAX as f64 => {
            Some(value as i32)
        }
        _ => None,
    }
}

/// Format a fraction as a percentage.
///
/// The decimal point of the shortest representation is moved two places
/// as text, so [`parse_percentage`] restores the exact value.
pub fn format_percentage(value: f64) -> String {
    match DecimalDigits::parse(&value.to_string()).and_then(|digits| digits.shifted(2)) {
        Some(digits) => digits.to_text(),
        None => format_real(value * 100.0),
    }
}

/// Parse a percentage into a fraction by moving its decimal point two places left.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let digits = DecimalDigits::parse(text)?.shifted(-2)?;
    digits.to_scientific().parse::<f64>().ok()
}

/// A decimal real split into sign, significant digits and a power of ten.
#[derive(Debug, Clone, PartialEq)]
struct DecimalDigits {
    negative: bool,
    /// No leading or trailing zeros; empty for zero.
    digits: String,
    exponent: i32,
}

impl DecimalDigits {
    /// Split `[sign]digits[.digits][(E|D)[sign]digits]`.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (mantissa, exponent) = match unsigned.find(['E', 'e', 'D', 'd']) {
            Some(index) => (&unsigned[..index], unsigned[index + 1..].parse::<i32>().ok()?),
            None => (unsigned, 0),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let all = format!("{}{}", whole, fraction);
        let significant = all.trim_start_matches('0');
        let digits = significant.trim_end_matches('0');
        let trailing = i32::try_from(significant.len() - digits.len()).ok()?;
        let fraction_length = i32::try_from(fraction.len()).ok()?;
        Some(DecimalDigits {
            negative,
            digits: digits.to_string(),
            exponent: exponent.checked_sub(fraction_length)?.checked_add(trailing)?,
        })
    }

    fn shifted(mut self, places: i32) -> Option<Self> {
        self.exponent = self.exponent.checked_add(places)?;
        Some(self)
    }

    fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }

    /// Text accepted by `f64::from_str`.
    fn to_scientific(&self) -> String {
        if self.digits.is_empty() {
            return format!("{}0", self.sign());
        }
        format!("{}{}E{}", self.sign(), self.digits, self.exponent)
    }

    /// Field text: plain decimal near the point, scientific otherwise.
    fn to_text(&self) -> String {
        if self.digits.is_empty() {
            return "0.".to_string();
        }
        let length = self.digits.len() as i64;
        let point = length + self.exponent as i64;
        let body = if !(-4..=17).contains(&point) {
            let (first, rest) = self.digits.split_at(1);
            let dot = if rest.is_empty() { "" } else { "." };
            format!("{}{}{}E{}", first, dot, rest, point - 1)
        } else if self.exponent >= 0 {
            format!("{}{}.", self.digits, "0".repeat(self.exponent as usize))
        } else if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), self.digits)
        } else {
            let (whole, fraction) = self.digits.split_at(point as usize);
            format!("{}.{}", whole, fraction)
        };
        format!("{}{}", self.sign(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_letters() {
        assert_eq!(SectionType::from_letter('G').unwrap(), SectionType::Global);
        assert_eq!(SectionType::Parameter.letter(), 'P');
        assert!(SectionType::from_letter('B').is_err());
        assert!(SectionType::from_letter('X').is_err());
        assert!(SectionType::Start < SectionType::Terminate);
    }

    #[test]
    fn test_format_line() {
        let line = format_line("110,1.;", SectionType::Parameter, 12).unwrap();
        assert_eq!(line.len(), LINE_LENGTH);
        assert!(line.starts_with("110,1.;"));
        assert!(line.ends_with("P     12"));
        assert!(format_line(&"x".repeat(73), SectionType::Start, 1).is_err());
    }

    #[test]
    fn test_physical_line_parse() {
        let text = format_line("1H,,1H;;", SectionType::Global, 1).unwrap();
        let line = PhysicalLine::parse(&text, 2).unwrap();
        assert_eq!(line.section, SectionType::Global);
        assert_eq!(line.sequence, 1);
        assert_eq!(line.data.trim_end(), "1H,,1H;;");
        assert_eq!(line.data.len(), MAX_DATA_LENGTH);
        assert_eq!(line.line_number, 2);
    }

    #[test]
    fn test_physical_line_errors() {
        assert!(matches!(
            PhysicalLine::parse("too short", 4),
            Err(IgesError::InvalidLine { line: 4, .. })
        ));
        let binary = format!("{}B      1", " ".repeat(72));
        assert!(PhysicalLine::parse(&binary, 1).is_err());
        let bad_sequence = format!("{}S    abc", " ".repeat(72));
        assert!(PhysicalLine::parse(&bad_sequence, 1).is_err());
    }

    #[test]
    fn test_terminate_counts() {
        let counts = TerminateCounts {
            start: 1,
            global: 3,
            directory: 4,
            parameter: 12,
        };
        let data = counts.format();
        assert_eq!(data, "S      1G      3D      4P     12");
        assert_eq!(TerminateCounts::parse(&data).unwrap(), counts);
        assert!(TerminateCounts::parse("S      1G      3X      4P     12").is_err());
        assert!(TerminateCounts::parse("S      1G    abcD      4P     12").is_err());
    }

    #[test]
    fn test_fields() {
        let data = "     110       1                       0";
        assert_eq!(raw_field(data, 0), "     110");
        assert_eq!(parse_int_field(raw_field(data, 1), "pointer").unwrap(), 1);
        assert_eq!(parse_int_field(raw_field(data, 2), "structure").unwrap(), 0);
        assert_eq!(raw_field(data, 9), "");
        assert!(parse_int_field("  abc   ", "level").is_err());
        assert_eq!(parse_string_field("        "), None);
        assert_eq!(parse_string_field("LABEL   "), Some("LABEL".to_string()));
    }

    #[test]
    fn test_field_formatting() {
        assert_eq!(format_int_field(110), "     110");
        assert_eq!(format_int_field(-3), "      -3");
        assert_eq!(format_pointer_field(0), "        ");
        assert_eq!(format_label_field(Some("LONGLABEL1")), "LONGLABE");
        assert_eq!(format_label_field(Some("ab")), "ab      ");
        assert_eq!(format_label_field(None), "        ");
    }

    #[test]
    fn test_hollerith() {
        assert_eq!(hollerith("identifier"), "10Hidentifier");
        assert_eq!(hollerith(","), "1H,");
        assert_eq!(hollerith("\u{e9}t\u{e9}"), "3H\u{e9}t\u{e9}");
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(0.0), "0.");
        assert_eq!(format_real(1.0), "1.");
        assert_eq!(format_real(500.0), "500.");
        assert_eq!(format_real(0.75), "0.75");
        assert_eq!(format_real(0.001), "0.001");
        assert_eq!(format_real(1e-10), "1E-10");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(1.1234512345), "1.1234512345");
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_real("1.0D-3"), Some(0.001));
        assert_eq!(parse_real(" 1.0E-003"), Some(0.001));
        assert_eq!(parse_real("500"), Some(500.0));
        assert_eq!(parse_real("abc"), None);
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("4."), Some(4));
        assert_eq!(parse_integer("4.5"), None);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.");
        assert_eq!(format_percentage(1.0), "100.");
        assert_eq!(format_percentage(0.5), "50.");
        assert_eq!(format_percentage(0.25), "25.");
        assert_eq!(format_percentage(0.001), "0.1");
        assert_eq!(format_percentage(0.7843137254901961), "78.43137254901961");
        assert_eq!(format_percentage(-0.125), "-12.5");
        assert_eq!(format_percentage(1e-300), "1E-298");
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("100."), Some(1.0));
        assert_eq!(parse_percentage("50"), Some(0.5));
        assert_eq!(parse_percentage("1.5D1"), Some(0.15));
        assert_eq!(parse_percentage(" 78.43137254901961 "), Some(0.7843137254901961));
        assert_eq!(parse_percentage("0."), Some(0.0));
        assert_eq!(parse_percentage("abc"), None);
        assert_eq!(parse_percentage("."), None);
    }

    #[test]
    fn test_percentage_is_exact_for_byte_channels() {
        for byte in 0..=255u8 {
            let intensity = byte as f64 / 255.0;
            let text = format_percentage(intensity);
            assert_eq!(parse_percentage(&text), Some(intensity), "channel {}", byte);
        }
    }
}
