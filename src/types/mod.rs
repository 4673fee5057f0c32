//! Core value types shared across the library.

pub mod color;
pub mod transform;
pub mod units;
pub mod vector;

pub use color::{Color, ColorDefinition};
pub use transform::TransformationMatrix;
pub use units::{IgesDraftingStandard, IgesUnits, IgesVersion};
pub use vector::{Vector3, POINT_EPSILON};
