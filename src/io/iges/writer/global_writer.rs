//! Start and global section output.

use crate::document::IgesFile;
use crate::error::Result;
use crate::io::iges::parameter::{wrap_fields, ParameterValue};
use crate::io::iges::record::MAX_DATA_LENGTH;
use chrono::NaiveDateTime;

/// Start section data areas; an empty start section is one blank line.
pub fn start_lines(file: &IgesFile) -> Vec<String> {
    let mut lines: Vec<String> = file
        .start_text
        .split('\n')
        .flat_map(|line| {
            let chars: Vec<char> = line.trim_end_matches('\r').chars().collect();
            if chars.is_empty() {
                return vec![String::new()];
            }
            chars
                .chunks(MAX_DATA_LENGTH)
                .map(|chunk| chunk.iter().collect())
                .collect()
        })
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Global section data areas: all 26 fields wrapped at 72 columns.
pub fn global_lines(file: &IgesFile) -> Result<Vec<String>> {
    let text = |value: &Option<String>| ParameterValue::optional_text(value.as_deref());
    let values = vec![
        ParameterValue::Text(file.field_delimiter.to_string()),
        ParameterValue::Text(file.record_delimiter.to_string()),
        text(&file.identification),
        text(&file.full_file_name),
        text(&file.system_identifier),
        text(&file.system_version),
        ParameterValue::Integer(file.integer_size),
        ParameterValue::Integer(file.single_size),
        ParameterValue::Integer(file.decimal_digits),
        ParameterValue::Integer(file.double_magnitude),
        ParameterValue::Integer(file.double_precision),
        text(&file.identifier),
        ParameterValue::Real(file.model_space_scale),
        ParameterValue::Integer(file.model_units.to_i32()),
        text(&file.custom_model_units),
        ParameterValue::Integer(file.max_line_weight_graduations),
        ParameterValue::Real(file.max_line_weight),
        ParameterValue::Text(format_date(&file.timestamp)),
        ParameterValue::Real(file.minimum_resolution),
        ParameterValue::Real(file.max_coordinate_value),
        text(&file.author),
        text(&file.organization),
        ParameterValue::Integer(file.iges_version.to_i32()),
        ParameterValue::Integer(file.drafting_standard.to_i32()),
        ParameterValue::Text(format_date(&file.modified_time)),
        text(&file.application_protocol),
    ];
    wrap_fields(
        &values,
        file.field_delimiter,
        file.record_delimiter,
        MAX_DATA_LENGTH,
    )
}

/// `YYYYMMDD.HHNNSS`.
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%Y%m%d.%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IgesDraftingStandard, IgesUnits, IgesVersion};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn test_default_global_lines() {
        let mut file = IgesFile::new();
        file.timestamp = date(1983, 11, 23, 13, 8, 5);
        file.modified_time = file.timestamp;
        assert_eq!(
            global_lines(&file).unwrap(),
            vec![
                "1H,,1H;,,,,,32,8,23,11,52,,1.,1,,0,1.,15H19831123.130805,1E-10,0.,,,11,"
                    .to_string(),
                "0,15H19831123.130805,;".to_string(),
            ]
        );
    }

    #[test]
    fn test_specific_global_lines() {
        let mut file = IgesFile::new();
        file.identification = Some("identifier".to_string());
        file.full_file_name = Some("C:\\path\\to\\full\\filename.igs".to_string());
        file.system_identifier = Some("BCAD".to_string());
        file.system_version = Some("1.0".to_string());
        file.integer_size = 16;
        file.single_size = 7;
        file.decimal_digits = 22;
        file.double_magnitude = 10;
        file.double_precision = 51;
        file.identifier = Some("ident2".to_string());
        file.model_space_scale = 0.75;
        file.model_units = IgesUnits::Centimeters;
        file.max_line_weight_graduations = 4;
        file.max_line_weight = 0.8;
        file.timestamp = date(1983, 11, 23, 13, 8, 11);
        file.minimum_resolution = 0.001;
        file.max_coordinate_value = 500.0;
        file.author = Some("Brett".to_string());
        file.organization = Some("IxMilia".to_string());
        file.iges_version = IgesVersion::V5_0;
        file.drafting_standard = IgesDraftingStandard::Bsi;
        file.modified_time = date(1987, 5, 8, 12, 34, 56);
        file.application_protocol = Some("protocol".to_string());

        assert_eq!(
            global_lines(&file).unwrap(),
            vec![
                "1H,,1H;,10Hidentifier,28HC:\\path\\to\\full\\filename.igs,4HBCAD,3H1.0,16,7,"
                    .to_string(),
                "22,10,51,6Hident2,0.75,10,,4,0.8,15H19831123.130811,0.001,500.,5HBrett,"
                    .to_string(),
                "7HIxMilia,8,4,15H19870508.123456,8Hprotocol;".to_string(),
            ]
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let mut file = IgesFile::new();
        file.field_delimiter = '/';
        file.record_delimiter = '#';
        let lines = global_lines(&file).unwrap();
        assert!(lines[0].starts_with("1H//1H#/"));
        assert!(lines.last().unwrap().ends_with('#'));
    }

    #[test]
    fn test_start_lines() {
        let mut file = IgesFile::new();
        assert_eq!(start_lines(&file), vec![String::new()]);

        file.start_text = format!("first\n{}", "y".repeat(80));
        let lines = start_lines(&file);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "first");
        assert_eq!(lines[1].len(), 72);
        assert_eq!(lines[2], "y".repeat(8));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(1987, 5, 8, 12, 34, 56)), "19870508.123456");
    }
}
