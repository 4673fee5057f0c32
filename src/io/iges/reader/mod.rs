//! IGES file reader.

mod global_reader;
mod line_reader;
mod resolver;

pub use global_reader::parse_date;
pub use line_reader::{read_sections, SectionLines};
pub use resolver::{DecodedEntry, DecodedTable};

use crate::document::IgesFile;
use crate::entities::EntityType;
use crate::error::{IgesError, Result};
use crate::io::iges::directory::DirectoryEntry;
use crate::io::iges::parameter::{read_records, ParameterRecord};
use crate::io::iges::record::PhysicalLine;
use crate::io::iges::registry;
use crate::notification::NotificationType;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Configuration for the IGES reader.
#[derive(Debug, Clone)]
pub struct IgesReaderConfiguration {
    /// When `true`, every parameter line must carry its directory entry's
    /// sequence number in columns 66-72. When `false`, blank back-pointers
    /// are accepted; non-blank ones are still checked.
    ///
    /// Default: `true`.
    pub strict_back_pointers: bool,
    /// Drop transformation matrices that are referenced by another entity
    /// from the entity list; their effect is already on the referencing entity.
    ///
    /// Default: `true`.
    pub trim_referenced_transforms: bool,
    /// Check the line counts in the terminate section.
    ///
    /// Default: `true`.
    pub verify_terminate_counts: bool,
}

impl Default for IgesReaderConfiguration {
    fn default() -> Self {
        Self {
            strict_back_pointers: true,
            trim_referenced_transforms: true,
            verify_terminate_counts: true,
        }
    }
}

/// IGES file reader.
pub struct IgesReader {
    content: Vec<u8>,
    config: IgesReaderConfiguration,
}

impl IgesReader {
    /// Create a new reader; the stream is read to the end immediately.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut buf_reader = BufReader::new(reader);
        let mut content = Vec::new();
        buf_reader.read_to_end(&mut content)?;
        Ok(Self {
            content,
            config: IgesReaderConfiguration::default(),
        })
    }

    /// Create a new reader from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: IgesReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the IGES file.
    pub fn read(self) -> Result<IgesFile> {
        let sections = read_sections(&self.content)?;
        if self.config.verify_terminate_counts {
            sections.verify_terminate_counts()?;
        }

        let mut file = IgesFile::new();
        file.start_text = read_start_text(&sections.start);
        global_reader::read_global(&sections.global, &mut file)?;

        let directory = read_directory(&sections.directory)?;
        let records = read_records(
            &sections.parameter,
            file.field_delimiter,
            file.record_delimiter,
        )?;

        let mut table = DecodedTable::new();
        for entry in directory {
            let record = find_record(&records, &entry)?;
            self.check_record(&entry, record)?;

            if record.line_count != entry.parameter_line_count as usize {
                file.notifications.notify_entry(
                    NotificationType::Warning,
                    entry.sequence,
                    format!(
                        "reports {} parameter lines, record has {}",
                        entry.parameter_line_count, record.line_count
                    ),
                );
            }

            match registry::decode(&entry, record.fields())? {
                Some(decoded) => {
                    table.insert(entry.sequence, DecodedEntry { directory: entry, decoded });
                }
                None => {
                    file.notifications.notify_entry(
                        NotificationType::NotSupported,
                        entry.sequence,
                        format!("entity type {} is not supported", entry.entity_type),
                    );
                }
            }
        }

        file.entities = resolver::resolve(&table, self.config.trim_referenced_transforms)?;
        tracing::debug!(
            entities = file.entities.len(),
            notifications = file.notifications.len(),
            "read IGES file"
        );
        Ok(file)
    }

    /// Back-pointer and entity type consistency between a directory entry and its record.
    fn check_record(&self, entry: &DirectoryEntry, record: &ParameterRecord) -> Result<()> {
        match record.back_pointer {
            Some(back_pointer) if back_pointer != entry.sequence => {
                return Err(IgesError::Structure(format!(
                    "Parameter record {} points back to directory entry {}, expected {}",
                    record.pointer, back_pointer, entry.sequence
                )));
            }
            None if self.config.strict_back_pointers => {
                return Err(IgesError::Structure(format!(
                    "Parameter record {} has no directory entry back-pointer",
                    record.pointer
                )));
            }
            _ => {}
        }

        let record_type = record.entity_type()?;
        if record_type != entry.entity_type {
            return Err(IgesError::Structure(format!(
                "Directory entry {} has entity type {} but its parameter record has {}",
                entry.sequence, entry.entity_type, record_type
            )));
        }
        Ok(())
    }
}

fn read_start_text(lines: &[PhysicalLine]) -> String {
    lines
        .iter()
        .map(|line| line.data.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_directory(lines: &[PhysicalLine]) -> Result<Vec<DirectoryEntry>> {
    let pairs = lines.chunks_exact(2);
    if let Some(orphan) = pairs.remainder().first() {
        return Err(IgesError::Structure(format!(
            "Directory section has an odd number of lines; entry at D{} is incomplete",
            orphan.sequence
        )));
    }
    pairs
        .map(|pair| DirectoryEntry::parse(&pair[0].data, &pair[1].data, pair[0].sequence))
        .collect()
}

fn find_record<'a>(
    records: &'a IndexMap<usize, ParameterRecord>,
    entry: &DirectoryEntry,
) -> Result<&'a ParameterRecord> {
    usize::try_from(entry.parameter_pointer)
        .ok()
        .and_then(|pointer| records.get(&pointer))
        .ok_or(IgesError::InvalidPointer {
            kind: "parameter data",
            pointer: entry.parameter_pointer,
        })
}

/// Read only the entities of a stream.
pub fn read_entities<R: Read>(reader: R) -> Result<Vec<EntityType>> {
    Ok(IgesReader::from_reader(reader)?.read()?.entities)
}
