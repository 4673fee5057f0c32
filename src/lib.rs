//! # igesrust.
//!
//! A pure Rust library for reading and writing CAD files in the IGES
//! (Initial Graphics Exchange Specification) ASCII format.
//!
//! ## Features.
//!
//! - Read and write the fixed-line ASCII form (Start, Global, Directory
//!   Entry, Parameter Data and Terminate sections)
//! - Lines, circular arcs, points and transformation matrices
//! - Transformation matrix and color definition pointers resolved on read
//!   and regenerated on write
//! - Non-default field and record delimiters.
//!
//! ## Quick Start.
//!
//! ```rust,ignore
//! use igesrust::{IgesFile, IgesReader, IgesWriter};
//!
//! // Read an IGES file
//! let file = IgesReader::from_file("sample.igs")?.read()?;
//!
//! // Access entities
//! for entity in file.entities() {
//!     println!("Entity: {:?}", entity);
//! }
//!
//! // Write to IGES
//! IgesWriter::new(&file).write_to_file("output.igs")?;
//! # Ok::<(), igesrust::error::IgesError>(())
//! ```
//!
//! ## Architecture.
//!
//! - `Entity` - Trait shared by all modeled entities
//! - `EntityType` - Closed set of modeled entities
//! - `IgesFile` - Start text, global values and entities
//! - `io::iges` - Section-level reading and writing.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{IgesError, Result};
pub use types::{
    Color, ColorDefinition, IgesDraftingStandard, IgesUnits, IgesVersion, TransformationMatrix,
    Vector3,
};

// Re-export entity types
pub use entities::{
    CircularArc, Entity, EntityType, Line, LineBounding, Location, TransformationMatrixEntity,
};

// Re-export document
pub use document::IgesFile;

// Re-export I/O types
pub use io::iges::{read_entities, write_entities, IgesReader, IgesReaderConfiguration, IgesWriter};
pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
