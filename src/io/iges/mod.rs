//! IGES (Initial Graphics Exchange Specification) ASCII format support.
//!
//! Only the fixed-line ASCII form is handled: Start, Global, Directory Entry,
//! Parameter Data and Terminate sections.

pub mod directory;
pub mod parameter;
pub mod reader;
pub mod record;
pub mod registry;
pub mod tokenizer;
pub mod writer;

pub use reader::{read_entities, IgesReader, IgesReaderConfiguration};
pub use writer::{write_entities, write_iges, IgesWriter};
