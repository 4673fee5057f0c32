//! IGES writer module.

mod global_writer;
mod section_writer;

pub use global_writer::{format_date, global_lines, start_lines};
pub use section_writer::SectionBuilder;

use crate::document::IgesFile;
use crate::entities::EntityType;
use crate::error::Result;
use crate::io::iges::record::{format_line, SectionType, TerminateCounts};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// IGES file writer.
pub struct IgesWriter<'a> {
    file: &'a IgesFile,
}

impl<'a> IgesWriter<'a> {
    /// Create a new writer for a file.
    pub fn new(file: &'a IgesFile) -> Self {
        Self { file }
    }

    /// Write to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_to_writer(writer)
    }

    /// Write to any writer.
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.lines()? {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write to a byte vector (useful for testing).
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// All physical lines of the file, in order.
    pub fn lines(&self) -> Result<Vec<String>> {
        let start = start_lines(self.file);
        let global = global_lines(self.file)?;
        let sections = self.file.entities.iter().try_fold(
            SectionBuilder::new(self.file.field_delimiter, self.file.record_delimiter),
            |builder, entity| builder.push_entity(entity),
        )?;

        let counts = TerminateCounts {
            start: start.len(),
            global: global.len(),
            directory: sections.directory_lines.len(),
            parameter: sections.parameter_lines.len(),
        };

        let mut lines = Vec::with_capacity(
            counts.start + counts.global + counts.directory + counts.parameter + 1,
        );
        for (section, data) in [
            (SectionType::Start, &start),
            (SectionType::Global, &global),
            (SectionType::Directory, &sections.directory_lines),
            (SectionType::Parameter, &sections.parameter_lines),
        ] {
            for (index, text) in data.iter().enumerate() {
                lines.push(format_line(text, section, index + 1)?);
            }
        }
        lines.push(format_line(&counts.format(), SectionType::Terminate, 1)?);

        tracing::debug!(
            start = counts.start,
            global = counts.global,
            directory = counts.directory,
            parameter = counts.parameter,
            "wrote IGES file"
        );
        Ok(lines)
    }
}

/// Write a file to a path.
pub fn write_iges<P: AsRef<Path>>(file: &IgesFile, path: P) -> Result<()> {
    IgesWriter::new(file).write_to_file(path)
}

/// Write entities with default global values.
pub fn write_entities<W: Write>(entities: &[EntityType], writer: W) -> Result<()> {
    let mut file = IgesFile::new();
    file.entities = entities.to_vec();
    IgesWriter::new(&file).write_to_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, Line};
    use crate::types::Color;
    use chrono::NaiveDate;

    fn dated_file() -> IgesFile {
        let mut file = IgesFile::new();
        file.timestamp = NaiveDate::from_ymd_opt(1983, 11, 23)
            .and_then(|day| day.and_hms_opt(13, 8, 5))
            .unwrap();
        file.modified_time = file.timestamp;
        file
    }

    #[test]
    fn test_empty_file() {
        let lines = IgesWriter::new(&dated_file()).lines().unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("{}S      1", " ".repeat(72)));
        assert!(lines[1].ends_with("G      1"));
        assert!(lines[2].starts_with("0,15H19831123.130805,;"));
        assert_eq!(
            lines[3],
            format!("{:<72}T      1", "S      1G      2D      0P      0")
        );
        assert!(lines.iter().all(|line| line.len() == 80));
    }

    #[test]
    fn test_line_sections() {
        let mut file = dated_file();
        let mut line = Line::from_coords(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        line.set_color(Color::Green);
        file.add_entity(line);

        let lines = IgesWriter::new(&file).lines().unwrap();
        assert_eq!(
            lines[3],
            "     110       1       0       0       0                        00000000D      1"
        );
        assert_eq!(
            lines[4],
            "     110       0       3       1       0                                D      2"
        );
        assert_eq!(
            lines[5],
            format!("{:<64}       1P      1", "110,1.,2.,3.,4.,5.,6.;")
        );
        assert!(lines[6].starts_with("S      1G      2D      2P      1"));
    }

    #[test]
    fn test_write_to_vec_ends_lines() {
        let bytes = IgesWriter::new(&dated_file()).write_to_vec().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("T      1\n"));
    }
}
