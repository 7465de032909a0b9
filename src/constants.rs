//! Physical and mathematical constants.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Mathematical constants

pub const PI: fcn = std::f64::consts::PI;

// Physical constants

/// Speed of light in vacuum [cm/s].
pub const CLIGHT: fcn = 2.997_924_58e10;
/// Gravitational constant [cm^3/(g s^2)].
pub const GRAVITATIONAL_CONSTANT: fcn = 6.672_59e-8;
/// Proton mass [g].
pub const M_PROTON: fcn = 1.672_623_1e-24;
/// Electron mass [g].
pub const M_ELECTRON: fcn = 9.109_382_9e-28;
/// Planck constant [erg s].
pub const HPLANCK: fcn = 6.626_075_5e-27;

// Lengths, angles and times

/// Parsec [cm].
pub const PARSEC: fcn = 3.085_677_58e18;
/// Arcsecond [radians].
pub const ARCSEC: fcn = 4.848_136_81e-6;
/// Year [s].
pub const YEAR: fcn = 3.155_695_20e7;

// Unit conversion factors

/// Conversion factor from kilometers to centimeters.
pub const KM_TO_CM: fcn = 1e5;
/// Number of parsecs in a megaparsec.
pub const PC_PER_MPC: fcn = 1e6;
/// Number of years in a gigayear.
pub const YR_PER_GYR: fcn = 1e9;

/// Table of the physical constants a parameter set carries.
///
/// The defaults are the CGS values of the constants above. Individual
/// entries can be replaced through
/// [`ParameterOverrides`](crate::cosmology::parameters::ParameterOverrides).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PhysicalConstants {
    /// Speed of light in vacuum [cm/s].
    pub speed_of_light: fcn,
    /// Gravitational constant [cm^3/(g s^2)].
    pub gravitational_constant: fcn,
    /// Parsec [cm].
    pub parsec_length: fcn,
    /// Year [s].
    pub year_length: fcn,
    /// Proton mass [g].
    pub proton_mass: fcn,
    /// Electron mass [g].
    pub electron_mass: fcn,
    /// Planck constant [erg s].
    pub planck_constant: fcn,
    /// Arcsecond [radians].
    pub arcsec_in_radians: fcn,
}

impl PhysicalConstants {
    /// Returns the constants as (name, value) pairs.
    pub fn entries(&self) -> [(&'static str, fcn); 8] {
        [
            ("speed_of_light", self.speed_of_light),
            ("gravitational_constant", self.gravitational_constant),
            ("parsec_length", self.parsec_length),
            ("year_length", self.year_length),
            ("proton_mass", self.proton_mass),
            ("electron_mass", self.electron_mass),
            ("planck_constant", self.planck_constant),
            ("arcsec_in_radians", self.arcsec_in_radians),
        ]
    }

    /// Length of a megaparsec [cm].
    pub fn megaparsec_length(&self) -> fcn {
        self.parsec_length * PC_PER_MPC
    }

    /// Length of a gigayear [s].
    pub fn gigayear_length(&self) -> fcn {
        self.year_length * YR_PER_GYR
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            speed_of_light: CLIGHT,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            parsec_length: PARSEC,
            year_length: YEAR,
            proton_mass: M_PROTON,
            electron_mass: M_ELECTRON,
            planck_constant: HPLANCK,
            arcsec_in_radians: ARCSEC,
        }
    }
}
