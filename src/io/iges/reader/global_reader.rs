//! Global section parsing.
//!
//! The global section is one free-format record spread over any number of
//! lines. Its first two fields define the delimiters used by the rest of the
//! record and by the parameter data section.

use crate::document::IgesFile;
use crate::error::{IgesError, Result};
use crate::io::iges::record::{columns, PhysicalLine, MAX_DATA_LENGTH};
use crate::io::iges::tokenizer::{hollerith_length, tokenize_record, Token};
use crate::types::{IgesDraftingStandard, IgesUnits, IgesVersion};
use chrono::NaiveDateTime;

/// Number of positional fields in the global record.
pub const GLOBAL_FIELD_COUNT: usize = 26;

const DATE_FORMAT: &str = "%Y%m%d.%H%M%S";

/// Parse the global lines into `file`; empty fields keep the values already on it.
pub fn read_global(lines: &[PhysicalLine], file: &mut IgesFile) -> Result<()> {
    let text: String = lines
        .iter()
        .map(|line| columns(&line.data, 0, MAX_DATA_LENGTH))
        .collect();

    let rest = skip_blanks(&text);
    if rest.is_empty() {
        return Ok(());
    }

    let (field_delimiter, rest) = read_delimiter(rest, IgesFile::DEFAULT_FIELD_DELIMITER)?;
    file.field_delimiter = field_delimiter;
    let rest = match next_delimiter(rest, field_delimiter, IgesFile::DEFAULT_RECORD_DELIMITER)? {
        Some(rest) => rest,
        None => return Ok(()),
    };

    let (record_delimiter, rest) = read_delimiter(rest, IgesFile::DEFAULT_RECORD_DELIMITER)?;
    if field_delimiter == record_delimiter {
        return Err(IgesError::Structure(format!(
            "Field and record delimiters are both '{}'",
            field_delimiter
        )));
    }
    file.record_delimiter = record_delimiter;
    let rest = match next_delimiter(rest, field_delimiter, record_delimiter)? {
        Some(rest) => rest,
        None => return Ok(()),
    };

    let tokens = tokenize_record(rest, field_delimiter, record_delimiter)?;
    if tokens.len() > GLOBAL_FIELD_COUNT - 2 {
        tracing::debug!(
            extra = tokens.len() - (GLOBAL_FIELD_COUNT - 2),
            "ignoring trailing global fields"
        );
    }
    apply_fields(&tokens, file)
}

fn skip_blanks(input: &str) -> &str {
    input.trim_start_matches([' ', '\t'])
}

/// Field 1 or 2: empty, or a one-character Hollerith string.
fn read_delimiter(input: &str, default: char) -> Result<(char, &str)> {
    let input = skip_blanks(input);
    match hollerith_length(input) {
        Ok((after, 1)) => {
            let mut chars = after.chars();
            match chars.next() {
                Some(delimiter) => Ok((delimiter, chars.as_str())),
                None => Err(IgesError::Structure(
                    "Global section ends inside a delimiter field".to_string(),
                )),
            }
        }
        Ok((_, count)) => Err(IgesError::Structure(format!(
            "Delimiter must be a single character, found a {}-character string",
            count
        ))),
        Err(_) => Ok((default, input)),
    }
}

/// Consume the delimiter after a field: `Some(rest)` to continue, `None` when
/// the record ends here.
fn next_delimiter(input: &str, field: char, record: char) -> Result<Option<&str>> {
    let input = skip_blanks(input);
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c == field => Ok(Some(chars.as_str())),
        Some(c) if c == record => Ok(None),
        Some(c) => Err(IgesError::Structure(format!(
            "Expected a delimiter in the global section, found '{}'",
            c
        ))),
        None => Err(IgesError::Structure(
            "Global section is not terminated".to_string(),
        )),
    }
}

fn apply_fields(tokens: &[Token], file: &mut IgesFile) -> Result<()> {
    let empty = Token::Empty;
    // Indexed by global field number; the delimiters are fields 1 and 2
    let field = |number: usize| tokens.get(number - 3).unwrap_or(&empty);
    let string = |number: usize, current: &Option<String>| -> Result<Option<String>> {
        Ok(field(number).string().map_err(|e| in_field(e, number))?.or_else(|| current.clone()))
    };
    let integer = |number: usize, current: i32| field(number).integer(current).map_err(|e| in_field(e, number));
    let real = |number: usize, current: f64| field(number).real(current).map_err(|e| in_field(e, number));

    file.identification = string(3, &file.identification)?;
    file.full_file_name = string(4, &file.full_file_name)?;
    file.system_identifier = string(5, &file.system_identifier)?;
    file.system_version = string(6, &file.system_version)?;
    file.integer_size = integer(7, file.integer_size)?;
    file.single_size = integer(8, file.single_size)?;
    file.decimal_digits = integer(9, file.decimal_digits)?;
    file.double_magnitude = integer(10, file.double_magnitude)?;
    file.double_precision = integer(11, file.double_precision)?;
    file.identifier = string(12, &file.identifier)?;
    file.model_space_scale = real(13, file.model_space_scale)?;

    let units = integer(14, file.model_units.to_i32())?;
    file.model_units = IgesUnits::from_i32(units)
        .ok_or_else(|| IgesError::Structure(format!("Invalid units flag {}", units)))?;

    file.custom_model_units = string(15, &file.custom_model_units)?;
    file.max_line_weight_graduations = integer(16, file.max_line_weight_graduations)?;
    file.max_line_weight = real(17, file.max_line_weight)?;
    if let Some(text) = string(18, &None)? {
        file.timestamp = parse_date(&text)?;
    }
    file.minimum_resolution = real(19, file.minimum_resolution)?;
    file.max_coordinate_value = real(20, file.max_coordinate_value)?;
    file.author = string(21, &file.author)?;
    file.organization = string(22, &file.organization)?;

    let version = integer(23, file.iges_version.to_i32())?;
    file.iges_version = IgesVersion::from_i32(version)
        .ok_or_else(|| IgesError::Structure(format!("Invalid IGES version flag {}", version)))?;

    let standard = integer(24, file.drafting_standard.to_i32())?;
    file.drafting_standard = IgesDraftingStandard::from_i32(standard).ok_or_else(|| {
        IgesError::Structure(format!("Invalid drafting standard flag {}", standard))
    })?;

    if let Some(text) = string(25, &None)? {
        file.modified_time = parse_date(&text)?;
    }
    file.application_protocol = string(26, &file.application_protocol)?;
    Ok(())
}

fn in_field(error: IgesError, number: usize) -> IgesError {
    match error {
        IgesError::Parse(message) => {
            IgesError::Parse(format!("{} (global field {})", message, number))
        }
        other => other,
    }
}

/// Parse `YYMMDD.HHNNSS` (years from 1900) or `YYYYMMDD.HHNNSS`.
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    let full = match trimmed.len() {
        13 => format!("19{}", trimmed),
        15 => trimmed.to_string(),
        _ => {
            return Err(IgesError::Parse(format!(
                "Invalid date '{}': expected YYMMDD.HHNNSS or YYYYMMDD.HHNNSS",
                text
            )))
        }
    };
    NaiveDateTime::parse_from_str(&full, DATE_FORMAT)
        .map_err(|e| IgesError::Parse(format!("Invalid date '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::iges::record::{format_line, SectionType};
    use chrono::NaiveDate;

    fn global_lines(data: &[&str]) -> Vec<PhysicalLine> {
        data.iter()
            .enumerate()
            .map(|(index, text)| {
                let line = format_line(text, SectionType::Global, index + 1).unwrap();
                PhysicalLine::parse(&line, index + 1).unwrap()
            })
            .collect()
    }

    fn read(data: &[&str]) -> Result<IgesFile> {
        let mut file = IgesFile::new();
        read_global(&global_lines(data), &mut file)?;
        Ok(file)
    }

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn test_full_global_record() {
        let file = read(&[
            "1H,,1H;,10Hidentifier,28HC:\\path\\to\\full\\filename.igs,4HBCAD,3H1.0,16,7,",
            "22,10,51,6Hident2,0.75,10,,4,0.8,15H19831123.130811,1.0E-003,500,5HBrett",
            ",7HIxMilia,8,4,13H870508.123456,8Hprotocol;",
        ])
        .unwrap();

        assert_eq!(file.field_delimiter, ',');
        assert_eq!(file.record_delimiter, ';');
        assert_eq!(file.identification.as_deref(), Some("identifier"));
        assert_eq!(file.full_file_name.as_deref(), Some("C:\\path\\to\\full\\filename.igs"));
        assert_eq!(file.system_identifier.as_deref(), Some("BCAD"));
        assert_eq!(file.system_version.as_deref(), Some("1.0"));
        assert_eq!(file.integer_size, 16);
        assert_eq!(file.single_size, 7);
        assert_eq!(file.decimal_digits, 22);
        assert_eq!(file.double_magnitude, 10);
        assert_eq!(file.double_precision, 51);
        assert_eq!(file.identifier.as_deref(), Some("ident2"));
        assert_eq!(file.model_space_scale, 0.75);
        assert_eq!(file.model_units, IgesUnits::Centimeters);
        assert_eq!(file.custom_model_units, None);
        assert_eq!(file.max_line_weight_graduations, 4);
        assert_eq!(file.max_line_weight, 0.8);
        assert_eq!(file.timestamp, date(1983, 11, 23, 13, 8, 11));
        assert_eq!(file.minimum_resolution, 0.001);
        assert_eq!(file.max_coordinate_value, 500.0);
        assert_eq!(file.author.as_deref(), Some("Brett"));
        assert_eq!(file.organization.as_deref(), Some("IxMilia"));
        assert_eq!(file.iges_version, IgesVersion::V5_0);
        assert_eq!(file.drafting_standard, IgesDraftingStandard::Bsi);
        assert_eq!(file.modified_time, date(1987, 5, 8, 12, 34, 56));
        assert_eq!(file.application_protocol.as_deref(), Some("protocol"));
    }

    #[test]
    fn test_non_standard_delimiters() {
        let file = read(&["1H//1H#/10Hidentifier/12Hfilename.igs#"]).unwrap();
        assert_eq!(file.field_delimiter, '/');
        assert_eq!(file.record_delimiter, '#');
        assert_eq!(file.identification.as_deref(), Some("identifier"));
        assert_eq!(file.full_file_name.as_deref(), Some("filename.igs"));
    }

    #[test]
    fn test_string_containing_delimiters() {
        let file = read(&["1H,,1H;,6H,;,;,;;"]).unwrap();
        assert_eq!(file.identification.as_deref(), Some(",;,;,;"));
    }

    #[test]
    fn test_default_delimiters_when_empty() {
        let file = read(&[",,10Hidentifier;"]).unwrap();
        assert_eq!(file.field_delimiter, ',');
        assert_eq!(file.record_delimiter, ';');
        assert_eq!(file.identification.as_deref(), Some("identifier"));
        assert_eq!(file.integer_size, 32);
    }

    #[test]
    fn test_leading_whitespace() {
        let file = read(&["  1H,,  1H;,   4HBCAD,  4Hfile,\t3HSYS;"]).unwrap();
        assert_eq!(file.identification.as_deref(), Some("BCAD"));
        assert_eq!(file.full_file_name.as_deref(), Some("file"));
        assert_eq!(file.system_identifier.as_deref(), Some("SYS"));
    }

    #[test]
    fn test_early_record_end_keeps_defaults() {
        let file = read(&["1H,,1H;;"]).unwrap();
        assert_eq!(file.double_precision, 52);
        assert_eq!(file.model_units, IgesUnits::Inches);
        let empty = read(&[]).unwrap();
        assert_eq!(empty.minimum_resolution, 1e-10);
    }

    #[test]
    fn test_hollerith_spanning_lines() {
        let first = format!("1H,,1H;,{}", "80H");
        let long = "x".repeat(80);
        let split = 72 - first.len();
        let line_one = format!("{}{}", first, &long[..split]);
        let line_two = format!("{};", &long[split..]);
        let file = read(&[&line_one, &line_two]).unwrap();
        assert_eq!(file.identification.as_deref(), Some(long.as_str()));
    }

    #[test]
    fn test_invalid_values() {
        assert!(read(&["1H,,1H;,,,,,,,,,,,,99;"]).is_err());
        assert!(read(&["1H,,1H;,,,,,abc;"]).is_err());
        assert!(read(&["2H,,,1H;;"]).is_err());
        assert!(read(&["1H,,1H;,4HBCAD"]).is_err());
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(parse_date("870508.123456").unwrap(), date(1987, 5, 8, 12, 34, 56));
        assert_eq!(parse_date("20240229.235959").unwrap(), date(2024, 2, 29, 23, 59, 59));
        assert!(parse_date("1987").is_err());
        assert!(parse_date("19871308.123456").is_err());
    }
}
