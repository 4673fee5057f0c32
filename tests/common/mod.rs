//! Shared test utilities for igesrust integration tests.
//!
//! Builds IGES text line by line so each test can state exactly the
//! directory and parameter records it feeds the reader.

#![allow(dead_code)]

use igesrust::entities::EntityType;
use igesrust::io::iges::record::{format_line, SectionType, TerminateCounts};
use igesrust::{IgesFile, IgesReader, IgesReaderConfiguration};

/// Global record with default delimiters and no other fields
pub const MINIMAL_GLOBAL: &str = "1H,,1H;;";

/// Directory entry fields that tests vary; everything else is zero or blank
#[derive(Debug, Clone, Copy, Default)]
pub struct De {
    pub entity_type: i32,
    pub parameter_pointer: i32,
    pub transform: i32,
    pub color: i32,
    pub line_count: i32,
    pub form: i32,
}

impl De {
    pub fn new(entity_type: i32, parameter_pointer: i32, line_count: i32) -> Self {
        De {
            entity_type,
            parameter_pointer,
            line_count,
            ..Default::default()
        }
    }

    pub fn transform(mut self, pointer: i32) -> Self {
        self.transform = pointer;
        self
    }

    pub fn color(mut self, color: i32) -> Self {
        self.color = color;
        self
    }

    pub fn form(mut self, form: i32) -> Self {
        self.form = form;
        self
    }
}

/// The two 72-column data areas of a directory entry
pub fn de_areas(de: De) -> [String; 2] {
    let pointer = |value: i32| {
        if value == 0 {
            " ".repeat(8)
        } else {
            format!("{:>8}", value)
        }
    };
    let first = format!(
        "{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{}{:>8}{:>8}",
        de.entity_type,
        de.parameter_pointer,
        0,
        0,
        0,
        "",
        pointer(de.transform),
        "",
        "00000000"
    );
    let second = format!(
        "{:>8}{:>8}{:>8}{:>8}{:>8}{:<32}",
        de.entity_type, 0, de.color, de.line_count, de.form, ""
    );
    [first, second]
}

/// A 72-column parameter data area: 64 columns of data and the back-pointer
pub fn param_area(data: &str, back_pointer: usize) -> String {
    format!("{:<64} {:>7}", data, back_pointer)
}

/// A parameter data area with a blank back-pointer
pub fn param_area_unpointed(data: &str) -> String {
    format!("{:<72}", data)
}

/// Assemble a complete file from section data areas, terminate line included
pub fn file_text(start: &[&str], global: &[&str], directory: &[De], parameter: &[String]) -> String {
    let directory: Vec<String> = directory.iter().flat_map(|de| de_areas(*de)).collect();
    let mut lines = Vec::new();
    for (section, data) in [
        (SectionType::Start, start.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
        (SectionType::Global, global.iter().map(|s| s.to_string()).collect()),
        (SectionType::Directory, directory.clone()),
        (SectionType::Parameter, parameter.to_vec()),
    ] {
        for (index, text) in data.iter().enumerate() {
            lines.push(format_line(text, section, index + 1).unwrap());
        }
    }
    let counts = TerminateCounts {
        start: start.len(),
        global: global.len(),
        directory: directory.len(),
        parameter: parameter.len(),
    };
    lines.push(format_line(&counts.format(), SectionType::Terminate, 1).unwrap());
    lines.join("\n")
}

/// File with one start line, the minimal global record and the given entities
pub fn entity_file(directory: &[De], parameter: &[String]) -> String {
    file_text(&["test file"], &[MINIMAL_GLOBAL], directory, parameter)
}

pub fn read(text: &str) -> igesrust::Result<IgesFile> {
    IgesReader::from_reader(text.as_bytes())?.read()
}

pub fn read_with(text: &str, config: IgesReaderConfiguration) -> igesrust::Result<IgesFile> {
    IgesReader::from_reader(text.as_bytes())?
        .with_configuration(config)
        .read()
}

/// Read `text` and return its only entity
pub fn single_entity(text: &str) -> EntityType {
    let file = read(text).unwrap();
    assert_eq!(file.entities.len(), 1, "expected exactly one entity");
    file.entities.into_iter().next().unwrap()
}
