//! Units that results can be expressed in.
//!
//! All computations are done in CGS. The conversions here use the constants
//! of the given table, so a parameter set with overridden constants converts
//! consistently with the values it produced.

use crate::constants::{fcn, PhysicalConstants};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for units.
#[allow(non_camel_case_types)]
pub type fun = f64;

/// Unit of length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum DistanceUnit {
    Centimeter,
    Megaparsec,
}

/// Unit of time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    Second,
    Gigayear,
}

impl DistanceUnit {
    /// Length of one of this unit [cm].
    pub fn in_cgs(&self, constants: &PhysicalConstants) -> fun {
        match self {
            DistanceUnit::Centimeter => 1.0,
            DistanceUnit::Megaparsec => constants.megaparsec_length(),
        }
    }

    /// Converts a length in centimeters to this unit.
    pub fn from_cgs(&self, length: fcn, constants: &PhysicalConstants) -> fun {
        length / self.in_cgs(constants)
    }

    /// Abbreviated unit name.
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Centimeter => "cm",
            DistanceUnit::Megaparsec => "Mpc",
        }
    }
}

impl TimeUnit {
    /// Duration of one of this unit [s].
    pub fn in_cgs(&self, constants: &PhysicalConstants) -> fun {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Gigayear => constants.gigayear_length(),
        }
    }

    /// Converts a duration in seconds to this unit.
    pub fn from_cgs(&self, duration: fcn, constants: &PhysicalConstants) -> fun {
        duration / self.in_cgs(constants)
    }

    /// Abbreviated unit name.
    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Gigayear => "Gyr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cgs_units_are_identity() {
        let constants = PhysicalConstants::default();
        assert_eq!(DistanceUnit::Centimeter.from_cgs(1.5e20, &constants), 1.5e20);
        assert_eq!(TimeUnit::Second.from_cgs(2.0e9, &constants), 2.0e9);
    }

    #[test]
    fn conversion_uses_constant_table() {
        let constants = PhysicalConstants::default();
        assert_relative_eq!(
            DistanceUnit::Megaparsec.from_cgs(3.085_677_58e24, &constants),
            1.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            TimeUnit::Gigayear.from_cgs(3.155_695_20e16, &constants),
            1.0,
            max_relative = 1e-12
        );

        let doubled = PhysicalConstants {
            parsec_length: 2.0 * constants.parsec_length,
            ..constants
        };
        assert_relative_eq!(
            DistanceUnit::Megaparsec.from_cgs(3.085_677_58e24, &doubled),
            0.5,
            max_relative = 1e-12
        );
        assert_eq!(DistanceUnit::Megaparsec.symbol(), "Mpc");
        assert_eq!(TimeUnit::Gigayear.symbol(), "Gyr");
    }
}
