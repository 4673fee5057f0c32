//! Enumerated global-section values: model units, IGES version, drafting standard.

/// Model space units (global field 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IgesUnits {
    #[default]
    Inches,
    Millimeters,
    /// Named by the custom unit field (global field 15).
    Custom,
    Feet,
    Miles,
    Meters,
    Kilometers,
    Mils,
    Microns,
    Centimeters,
    MicroInches,
}

impl IgesUnits {
    /// Decode the unit flag.
    pub fn from_i32(value: i32) -> Option<Self> {
        let units = match value {
            1 => IgesUnits::Inches,
            2 => IgesUnits::Millimeters,
            3 => IgesUnits::Custom,
            4 => IgesUnits::Feet,
            5 => IgesUnits::Miles,
            6 => IgesUnits::Meters,
            7 => IgesUnits::Kilometers,
            8 => IgesUnits::Mils,
            9 => IgesUnits::Microns,
            10 => IgesUnits::Centimeters,
            11 => IgesUnits::MicroInches,
            _ => return None,
        };
        Some(units)
    }

    /// The unit flag written to the file.
    pub fn to_i32(self) -> i32 {
        match self {
            IgesUnits::Inches => 1,
            IgesUnits::Millimeters => 2,
            IgesUnits::Custom => 3,
            IgesUnits::Feet => 4,
            IgesUnits::Miles => 5,
            IgesUnits::Meters => 6,
            IgesUnits::Kilometers => 7,
            IgesUnits::Mils => 8,
            IgesUnits::Microns => 9,
            IgesUnits::Centimeters => 10,
            IgesUnits::MicroInches => 11,
        }
    }
}

/// IGES version the file complies with (global field 23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IgesVersion {
    V1_0,
    Ansi1981,
    V2_0,
    V3_0,
    Ansi1987,
    V4_0,
    Ansi1989,
    V5_0,
    V5_1,
    UsPro5_2,
    #[default]
    V5_3,
}

impl IgesVersion {
    /// Decode the version flag.
    pub fn from_i32(value: i32) -> Option<Self> {
        let version = match value {
            1 => IgesVersion::V1_0,
            2 => IgesVersion::Ansi1981,
            3 => IgesVersion::V2_0,
            4 => IgesVersion::V3_0,
            5 => IgesVersion::Ansi1987,
            6 => IgesVersion::V4_0,
            7 => IgesVersion::Ansi1989,
            8 => IgesVersion::V5_0,
            9 => IgesVersion::V5_1,
            10 => IgesVersion::UsPro5_2,
            11 => IgesVersion::V5_3,
            _ => return None,
        };
        Some(version)
    }

    /// The version flag written to the file.
    pub fn to_i32(self) -> i32 {
        match self {
            IgesVersion::V1_0 => 1,
            IgesVersion::Ansi1981 => 2,
            IgesVersion::V2_0 => 3,
            IgesVersion::V3_0 => 4,
            IgesVersion::Ansi1987 => 5,
            IgesVersion::V4_0 => 6,
            IgesVersion::Ansi1989 => 7,
            IgesVersion::V5_0 => 8,
            IgesVersion::V5_1 => 9,
            IgesVersion::UsPro5_2 => 10,
            IgesVersion::V5_3 => 11,
        }
    }
}

/// Drafting standard flag (global field 24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IgesDraftingStandard {
    #[default]
    None,
    Iso,
    Afnor,
    Ansi,
    Bsi,
    Csa,
    Din,
    Jis,
}

impl IgesDraftingStandard {
    /// Decode the drafting standard flag.
    pub fn from_i32(value: i32) -> Option<Self> {
        let standard = match value {
            0 => IgesDraftingStandard::None,
            1 => IgesDraftingStandard::Iso,
            2 => IgesDraftingStandard::Afnor,
            3 => IgesDraftingStandard::Ansi,
            4 => IgesDraftingStandard::Bsi,
            5 => IgesDraftingStandard::Csa,
            6 => IgesDraftingStandard::Din,
            7 => IgesDraftingStandard::Jis,
            _ => return None,
        };
        Some(standard)
    }

    /// The drafting standard flag written to the file.
    pub fn to_i32(self) -> i32 {
        match self {
            IgesDraftingStandard::None => 0,
            IgesDraftingStandard::Iso => 1,
            IgesDraftingStandard::Afnor => 2,
            IgesDraftingStandard::Ansi => 3,
            IgesDraftingStandard::Bsi => 4,
            IgesDraftingStandard::Csa => 5,
            IgesDraftingStandard::Din => 6,
            IgesDraftingStandard::Jis => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_flags() {
        assert_eq!(IgesUnits::from_i32(10), Some(IgesUnits::Centimeters));
        assert_eq!(IgesUnits::Centimeters.to_i32(), 10);
        assert_eq!(IgesUnits::from_i32(0), None);
        assert_eq!(IgesUnits::from_i32(12), None);
        for flag in 1..=11 {
            assert_eq!(IgesUnits::from_i32(flag).unwrap().to_i32(), flag);
        }
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(IgesVersion::from_i32(8), Some(IgesVersion::V5_0));
        assert_eq!(IgesVersion::default().to_i32(), 11);
        assert!(IgesVersion::V5_0 < IgesVersion::V5_3);
        for flag in 1..=11 {
            assert_eq!(IgesVersion::from_i32(flag).unwrap().to_i32(), flag);
        }
    }

    #[test]
    fn test_drafting_standard_flags() {
        assert_eq!(IgesDraftingStandard::from_i32(4), Some(IgesDraftingStandard::Bsi));
        assert_eq!(IgesDraftingStandard::default().to_i32(), 0);
        assert_eq!(IgesDraftingStandard::from_i32(8), None);
    }
}
