//! Cosmological parameter sets.

use crate::{
    constants::{fcn, PhysicalConstants, KM_TO_CM, PC_PER_MPC, PI},
    error::{CosmoError, CosmoResult},
};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Immutable set of cosmological parameters for a flat universe.
///
/// Densities are in units of the critical density today. Derived quantities
/// are recomputed on every call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct CosmologicalParameters {
    hubble_constant: fcn,
    age_estimate: fcn,
    omega_baryon: fcn,
    omega_dark_matter: fcn,
    omega_dark_energy: fcn,
    omega_radiation: fcn,
    dark_energy_w: fcn,
    constants: PhysicalConstants,
}

/// Optional replacements for the default parameter values.
///
/// Every field left as `None` takes the corresponding default of
/// [`CosmologicalParameters`] or [`PhysicalConstants`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default, deny_unknown_fields))]
pub struct ParameterOverrides {
    /// Hubble constant [km/s/Mpc].
    pub hubble_constant: Option<fcn>,
    /// Age of the universe, for reference only [Gyr].
    pub age_estimate: Option<fcn>,
    pub omega_baryon: Option<fcn>,
    pub omega_dark_matter: Option<fcn>,
    pub omega_dark_energy: Option<fcn>,
    pub omega_radiation: Option<fcn>,
    /// Dark energy equation of state parameter.
    pub dark_energy_w: Option<fcn>,
    /// Allowed deviation of the density sum from unity.
    pub flatness_tolerance: Option<fcn>,
    pub speed_of_light: Option<fcn>,
    pub gravitational_constant: Option<fcn>,
    pub parsec_length: Option<fcn>,
    pub year_length: Option<fcn>,
    pub proton_mass: Option<fcn>,
    pub electron_mass: Option<fcn>,
    pub planck_constant: Option<fcn>,
    pub arcsec_in_radians: Option<fcn>,
}

impl ParameterOverrides {
    /// Sets the override for the parameter with the given name.
    ///
    /// Besides the field names, the short names `H0`, `T0`, `OmegaB`,
    /// `OmegaDM`, `OmegaL`, `OmegaR`, `w`, `c`, `G`, `mProton`, `mElectron`,
    /// `planckH`, `parsec`, `arcsec` and `year` are recognized.
    pub fn set(&mut self, name: &str, value: fcn) -> CosmoResult<()> {
        let slot = match name {
            "hubble_constant" | "H0" => &mut self.hubble_constant,
            "age_estimate" | "T0" => &mut self.age_estimate,
            "omega_baryon" | "OmegaB" => &mut self.omega_baryon,
            "omega_dark_matter" | "OmegaDM" => &mut self.omega_dark_matter,
            "omega_dark_energy" | "OmegaL" => &mut self.omega_dark_energy,
            "omega_radiation" | "OmegaR" => &mut self.omega_radiation,
            "dark_energy_w" | "w" => &mut self.dark_energy_w,
            "flatness_tolerance" => &mut self.flatness_tolerance,
            "speed_of_light" | "c" => &mut self.speed_of_light,
            "gravitational_constant" | "G" => &mut self.gravitational_constant,
            "parsec_length" | "parsec" => &mut self.parsec_length,
            "year_length" | "year" => &mut self.year_length,
            "proton_mass" | "mProton" => &mut self.proton_mass,
            "electron_mass" | "mElectron" => &mut self.electron_mass,
            "planck_constant" | "planckH" => &mut self.planck_constant,
            "arcsec_in_radians" | "arcsec" => &mut self.arcsec_in_radians,
            _ => {
                return Err(CosmoError::UnknownParameter {
                    name: name.to_string(),
                })
            }
        };
        *slot = Some(value);
        Ok(())
    }

    /// Whether no parameter is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl CosmologicalParameters {
    /// Hubble constant [km/s/Mpc].
    pub const DEFAULT_HUBBLE_CONSTANT: fcn = 69.7;
    /// Age of the universe [Gyr].
    pub const DEFAULT_AGE_ESTIMATE: fcn = 13.76;
    pub const DEFAULT_OMEGA_DARK_MATTER: fcn = 0.235;
    pub const DEFAULT_OMEGA_BARYON: fcn = 0.0464;
    pub const DEFAULT_OMEGA_DARK_ENERGY: fcn = 0.7185;
    /// Corresponds to omega_r h^2 = 2.47e-5 with h = 0.704.
    pub const DEFAULT_OMEGA_RADIATION: fcn = 4.984e-4;
    /// Cosmological constant.
    pub const DEFAULT_DARK_ENERGY_W: fcn = -1.0;
    /// The default densities sum to 1.000398.
    pub const DEFAULT_FLATNESS_TOLERANCE: fcn = 1e-3;

    /// Creates a new parameter set from the defaults and the given overrides.
    ///
    /// # Returns
    ///
    /// A `CosmoResult` which is either:
    ///
    /// - `Ok`: Contains the validated parameter set.
    /// - `Err`: `InvalidParameter` naming the first offending value. Densities
    ///   must be finite and non-negative and sum to one within the flatness
    ///   tolerance, the Hubble constant must be positive, the age estimate
    ///   non-negative, `w` finite and all physical constants positive.
    pub fn new(overrides: ParameterOverrides) -> CosmoResult<Self> {
        let defaults = Self::default();
        let default_constants = defaults.constants;

        let parameters = CosmologicalParameters {
            hubble_constant: overrides
                .hubble_constant
                .unwrap_or(defaults.hubble_constant),
            age_estimate: overrides.age_estimate.unwrap_or(defaults.age_estimate),
            omega_baryon: overrides.omega_baryon.unwrap_or(defaults.omega_baryon),
            omega_dark_matter: overrides
                .omega_dark_matter
                .unwrap_or(defaults.omega_dark_matter),
            omega_dark_energy: overrides
                .omega_dark_energy
                .unwrap_or(defaults.omega_dark_energy),
            omega_radiation: overrides
                .omega_radiation
                .unwrap_or(defaults.omega_radiation),
            dark_energy_w: overrides.dark_energy_w.unwrap_or(defaults.dark_energy_w),
            constants: PhysicalConstants {
                speed_of_light: overrides
                    .speed_of_light
                    .unwrap_or(default_constants.speed_of_light),
                gravitational_constant: overrides
                    .gravitational_constant
                    .unwrap_or(default_constants.gravitational_constant),
                parsec_length: overrides
                    .parsec_length
                    .unwrap_or(default_constants.parsec_length),
                year_length: overrides
                    .year_length
                    .unwrap_or(default_constants.year_length),
                proton_mass: overrides
                    .proton_mass
                    .unwrap_or(default_constants.proton_mass),
                electron_mass: overrides
                    .electron_mass
                    .unwrap_or(default_constants.electron_mass),
                planck_constant: overrides
                    .planck_constant
                    .unwrap_or(default_constants.planck_constant),
                arcsec_in_radians: overrides
                    .arcsec_in_radians
                    .unwrap_or(default_constants.arcsec_in_radians),
            },
        };

        parameters.validate(
            overrides
                .flatness_tolerance
                .unwrap_or(Self::DEFAULT_FLATNESS_TOLERANCE),
        )?;
        Ok(parameters)
    }

    fn validate(&self, flatness_tolerance: fcn) -> CosmoResult<()> {
        if !(flatness_tolerance >= 0.0 && flatness_tolerance.is_finite()) {
            return Err(CosmoError::invalid_parameter(
                "flatness_tolerance",
                flatness_tolerance,
                "must be finite and larger than or equal to zero",
            ));
        }
        for (name, density) in self.densities() {
            if !(density >= 0.0 && density.is_finite()) {
                return Err(CosmoError::invalid_parameter(
                    name,
                    density,
                    "density fractions must be finite and non-negative",
                ));
            }
        }
        if !(self.hubble_constant > 0.0 && self.hubble_constant.is_finite()) {
            return Err(CosmoError::invalid_parameter(
                "hubble_constant",
                self.hubble_constant,
                "must be finite and larger than zero",
            ));
        }
        if !(self.age_estimate >= 0.0 && self.age_estimate.is_finite()) {
            return Err(CosmoError::invalid_parameter(
                "age_estimate",
                self.age_estimate,
                "must be finite and larger than or equal to zero",
            ));
        }
        if !self.dark_energy_w.is_finite() {
            return Err(CosmoError::invalid_parameter(
                "dark_energy_w",
                self.dark_energy_w,
                "must be finite",
            ));
        }
        for (name, value) in self.constants.entries() {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CosmoError::invalid_parameter(
                    name,
                    value,
                    "physical constants must be finite and larger than zero",
                ));
            }
        }

        let omega_total = self.omega_total();
        if omega_total <= 0.0 {
            return Err(CosmoError::invalid_parameter(
                "omega_total",
                omega_total,
                "at least one density fraction must be larger than zero",
            ));
        }
        let deviation = (omega_total - 1.0).abs();
        if deviation > flatness_tolerance {
            return Err(CosmoError::invalid_parameter(
                "omega_total",
                omega_total,
                format!(
                    "density fractions must sum to 1 within {:e} for a flat universe",
                    flatness_tolerance
                ),
            ));
        }
        if deviation > 0.0 {
            log::debug!(
                "Density fractions sum to {} and are normalized by their total",
                omega_total
            );
        }
        Ok(())
    }

    /// Returns the density fractions as (name, value) pairs in the order
    /// baryon, dark matter, dark energy, radiation.
    pub fn densities(&self) -> [(&'static str, fcn); 4] {
        [
            ("omega_baryon", self.omega_baryon),
            ("omega_dark_matter", self.omega_dark_matter),
            ("omega_dark_energy", self.omega_dark_energy),
            ("omega_radiation", self.omega_radiation),
        ]
    }

    /// Hubble constant [km/s/Mpc].
    pub fn hubble_constant(&self) -> fcn {
        self.hubble_constant
    }

    /// Reference age of the universe [Gyr]. Not used in any computation.
    pub fn age_estimate(&self) -> fcn {
        self.age_estimate
    }

    pub fn omega_baryon(&self) -> fcn {
        self.omega_baryon
    }

    pub fn omega_dark_matter(&self) -> fcn {
        self.omega_dark_matter
    }

    pub fn omega_dark_energy(&self) -> fcn {
        self.omega_dark_energy
    }

    pub fn omega_radiation(&self) -> fcn {
        self.omega_radiation
    }

    /// Dark energy equation of state parameter `w = p/(rho c^2)`.
    pub fn dark_energy_w(&self) -> fcn {
        self.dark_energy_w
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Total matter density (baryons and dark matter).
    pub fn omega_matter(&self) -> fcn {
        self.omega_baryon + self.omega_dark_matter
    }

    /// Sum of all density fractions.
    pub fn omega_total(&self) -> fcn {
        self.omega_matter() + self.omega_radiation + self.omega_dark_energy
    }

    /// Hubble time 1/H0 [s].
    pub fn hubble_time(&self) -> fcn {
        (self.constants.parsec_length * PC_PER_MPC / KM_TO_CM) / self.hubble_constant
    }

    /// Hubble distance c/H0 [cm].
    pub fn hubble_distance(&self) -> fcn {
        self.constants.speed_of_light * self.hubble_time()
    }

    /// Hubble constant in CGS [1/s].
    pub fn hubble_constant_cgs(&self) -> fcn {
        self.hubble_time().recip()
    }

    /// Critical density 3 H0^2 / (8 pi G) [g/cm^3].
    ///
    /// H0 enters in CGS units [1/s], giving about 9.13e-30 g/cm^3 for the
    /// defaults. This departs from evaluating the formula with H0 in
    /// km/s/Mpc, which does not yield a density.
    pub fn critical_density(&self) -> fcn {
        3.0 * self.hubble_constant_cgs().powi(2)
            / (8.0 * PI * self.constants.gravitational_constant)
    }

    /// Returns a human-readable summary of the parameters.
    pub fn describe(&self) -> String {
        format!(
            "Hubble Constant, H0 = {:.6} km/s/Mpc\n\
             Age of the Universe, T0 = {:.6} Gyr\n\
             Baryon      Fraction, OmegaB = {:.6}\n\
             Dark Matter Fraction, OmegaDM = {:.6}\n\
             Dark Energy Fraction, OmegaL = {:.6}\n\
             Radiation   Fraction, OmegaR = {:.6}\n",
            self.hubble_constant,
            self.age_estimate,
            self.omega_baryon,
            self.omega_dark_matter,
            self.omega_dark_energy,
            self.omega_radiation
        )
    }
}

impl Default for CosmologicalParameters {
    fn default() -> Self {
        CosmologicalParameters {
            hubble_constant: Self::DEFAULT_HUBBLE_CONSTANT,
            age_estimate: Self::DEFAULT_AGE_ESTIMATE,
            omega_baryon: Self::DEFAULT_OMEGA_BARYON,
            omega_dark_matter: Self::DEFAULT_OMEGA_DARK_MATTER,
            omega_dark_energy: Self::DEFAULT_OMEGA_DARK_ENERGY,
            omega_radiation: Self::DEFAULT_OMEGA_RADIATION,
            dark_energy_w: Self::DEFAULT_DARK_ENERGY_W,
            constants: PhysicalConstants::default(),
        }
    }
}

impl fmt::Display for CosmologicalParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
