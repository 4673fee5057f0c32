//! Splits the input stream into physical lines grouped by section.

use crate::error::{IgesError, Result};
use crate::io::iges::record::{PhysicalLine, SectionType, TerminateCounts};
use encoding_rs::WINDOWS_1252;

/// Physical lines of each section, in file order.
#[derive(Debug, Clone, Default)]
pub struct SectionLines {
    pub start: Vec<PhysicalLine>,
    pub global: Vec<PhysicalLine>,
    pub directory: Vec<PhysicalLine>,
    pub parameter: Vec<PhysicalLine>,
    /// Counts from the terminate line, when present.
    pub terminate: Option<TerminateCounts>,
}

impl SectionLines {
    fn section_mut(&mut self, section: SectionType) -> Option<&mut Vec<PhysicalLine>> {
        match section {
            SectionType::Start => Some(&mut self.start),
            SectionType::Global => Some(&mut self.global),
            SectionType::Directory => Some(&mut self.directory),
            SectionType::Parameter => Some(&mut self.parameter),
            SectionType::Terminate => None,
        }
    }

    /// Line counts actually present.
    pub fn counts(&self) -> TerminateCounts {
        TerminateCounts {
            start: self.start.len(),
            global: self.global.len(),
            directory: self.directory.len(),
            parameter: self.parameter.len(),
        }
    }

    /// Compare the terminate line against the lines read.
    pub fn verify_terminate_counts(&self) -> Result<()> {
        let Some(reported) = self.terminate else {
            return Ok(());
        };
        let actual = self.counts();
        let checks = [
            ("start", reported.start, actual.start),
            ("global", reported.global, actual.global),
            ("directory", reported.directory, actual.directory),
            ("parameter", reported.parameter, actual.parameter),
        ];
        for (name, reported, actual) in checks {
            if reported != actual {
                return Err(IgesError::Structure(format!(
                    "Incorrect number of {} lines reported: terminate section says {}, found {}",
                    name, reported, actual
                )));
            }
        }
        Ok(())
    }
}

/// Decode one line, falling back to Windows-1252 for non-UTF-8 bytes.
fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Split `content` into sections.
///
/// Blank lines are skipped. Sections must appear in S, G, D, P, T order and
/// sequence numbers must count up from 1 within each section. Reading stops
/// at the terminate line.
pub fn read_sections(content: &[u8]) -> Result<SectionLines> {
    let mut sections = SectionLines::default();
    let mut current = SectionType::Start;

    for (index, raw) in content.split(|&b| b == b'\n').enumerate() {
        let line_number = index + 1;
        let text = decode_line(raw);
        let text = text.trim_end();
        if text.is_empty() {
            continue;
        }

        let line = PhysicalLine::parse(text, line_number)?;
        if line.section < current {
            return Err(IgesError::InvalidLine {
                line: line_number,
                reason: format!(
                    "section '{}' line found after section '{}'",
                    line.section, current
                ),
            });
        }
        current = line.section;

        if line.section == SectionType::Terminate {
            sections.terminate = Some(TerminateCounts::parse(&line.data)?);
            break;
        }
        let Some(lines) = sections.section_mut(line.section) else {
            continue;
        };

        let expected = lines.len() + 1;
        if line.sequence != expected {
            return Err(IgesError::InvalidLine {
                line: line_number,
                reason: format!(
                    "Unordered line number: expected {}{}, found {}{}",
                    line.section, expected, line.section, line.sequence
                ),
            });
        }
        lines.push(line);
    }

    tracing::debug!(
        start = sections.start.len(),
        global = sections.global.len(),
        directory = sections.directory.len(),
        parameter = sections.parameter.len(),
        terminated = sections.terminate.is_some(),
        "split IGES sections"
    );
    Ok(sections)
}
