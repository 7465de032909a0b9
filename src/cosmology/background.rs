//! Evaluation of background quantities of a flat universe.
//!
//! The dimensionless expansion rate is
//!
//! E(z)^2 = [Om (1+z)^3 + Or (1+z)^4 + OL (1+z)^(3(1+w))] / Ototal,
//!
//! where the normalization by the density total makes E(0) = 1 exactly.
//! Distances and times follow from integrating 1/E and 1/((1+z)E) and
//! are returned in CGS units.

use super::{
    parameters::CosmologicalParameters,
    redshift::{check_redshift, scale_factor, Redshifts},
};
use crate::{
    constants::PhysicalConstants,
    error::{CosmoError, CosmoResult},
    math::{
        fin,
        quadrature::{integrate_adaptive, QuadratureConfig},
    },
    units::{DistanceUnit, TimeUnit},
};
use rayon::prelude::*;
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Evaluates background quantities for any parameter set.
///
/// The evaluator only holds the configuration of the numerical integration,
/// so it can be freely copied and shared between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackgroundEvaluator {
    quadrature: QuadratureConfig,
}

/// All background quantities at a single redshift.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct BackgroundQuantities {
    pub redshift: fin,
    pub scale_factor: fin,
    /// Dimensionless expansion rate E(z).
    pub expansion_rate: fin,
    pub comoving_distance: fin,
    pub luminosity_distance: fin,
    pub angular_diameter_distance: fin,
    /// Proper length subtended by one arcsecond.
    pub arcsec_scale: fin,
    /// Distance modulus [mag], only defined for z >= 0.
    pub distance_modulus: Option<fin>,
    pub lookback_time: fin,
    pub age: fin,
    /// Unit of all distances.
    pub distance_unit: DistanceUnit,
    /// Unit of all times.
    pub time_unit: TimeUnit,
}

impl BackgroundEvaluator {
    /// Creates an evaluator integrating with the given configuration.
    pub fn new(quadrature: QuadratureConfig) -> CosmoResult<Self> {
        quadrature.validate()?;
        Ok(BackgroundEvaluator { quadrature })
    }

    pub fn quadrature(&self) -> &QuadratureConfig {
        &self.quadrature
    }

    /// Computes the dimensionless expansion rate E(z) = H(z)/H0.
    ///
    /// Fails with `Domain` for z < -1.
    pub fn expansion_rate<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| expansion_rate_at(parameters, z))
    }

    /// Computes 1/E(z), the integrand of the comoving distance in units of
    /// the Hubble distance.
    pub fn inverse_expansion_rate<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| expansion_rate_at(parameters, z).map(fin::recip))
    }

    /// Computes 1/((1+z) E(z)), the integrand of cosmic time in units of the
    /// Hubble time. Infinite at z = -1.
    pub fn time_integrand<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| time_integrand_at(parameters, z))
    }

    /// Computes the Hubble parameter H(z) = H0 E(z) [km/s/Mpc].
    pub fn hubble_parameter<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| {
            expansion_rate_at(parameters, z).map(|rate| parameters.hubble_constant() * rate)
        })
    }

    /// Computes the line-of-sight comoving distance to redshift z [cm].
    ///
    /// Negative for -1 <= z < 0. At z = infinity this is the comoving
    /// particle horizon.
    pub fn comoving_distance<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| self.comoving_distance_at(parameters, z))
    }

    /// Computes the luminosity distance (1+z) D_C [cm].
    pub fn luminosity_distance<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| {
            self.comoving_distance_at(parameters, z)
                .map(|distance| (1.0 + z) * distance)
        })
    }

    /// Computes the angular diameter distance D_C/(1+z) [cm].
    pub fn angular_diameter_distance<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| {
            self.comoving_distance_at(parameters, z)
                .map(|distance| distance / (1.0 + z))
        })
    }

    /// Computes the proper length subtended by one arcsecond at redshift z
    /// [cm/arcsec].
    pub fn arcsec_scale<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| {
            self.comoving_distance_at(parameters, z)
                .map(|distance| distance / (1.0 + z) * parameters.constants().arcsec_in_radians)
        })
    }

    /// Computes the distance modulus 5 log10(D_L / 10 pc) [mag].
    ///
    /// Fails with `Domain` for z < 0, where the luminosity distance is
    /// negative. Gives negative infinity at z = 0.
    pub fn distance_modulus<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| {
            if z < 0.0 {
                return Err(CosmoError::domain(
                    z,
                    "distance modulus requires a non-negative redshift",
                ));
            }
            let distance = self.comoving_distance_at(parameters, z)?;
            Ok(distance_modulus_from_luminosity_distance(
                (1.0 + z) * distance,
                parameters.constants(),
            ))
        })
    }

    /// Computes the time elapsed between redshift z and today [s].
    ///
    /// Fails with `Convergence` at z = -1, where the time to the infinite
    /// future is unbounded.
    pub fn lookback_time<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| self.lookback_time_at(parameters, z))
    }

    /// Computes the age of the universe at redshift z [s].
    ///
    /// The integral over [z, infinity) is evaluated in terms of the scale
    /// factor, over (0, 1/(1+z)]. Gives zero at z = infinity and fails with
    /// `Convergence` at z = -1.
    pub fn age_at_redshift<R: Redshifts>(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: R,
    ) -> CosmoResult<R::Output> {
        redshifts.map_redshifts(|z| self.age_at(parameters, z))
    }

    /// Computes all background quantities at the given redshift, with
    /// distances in centimeters and times in seconds.
    pub fn evaluate_all(
        &self,
        parameters: &CosmologicalParameters,
        redshift: fin,
    ) -> CosmoResult<BackgroundQuantities> {
        let z = check_redshift(redshift)?;
        let comoving_distance = self.comoving_distance_at(parameters, z)?;
        let luminosity_distance = (1.0 + z) * comoving_distance;
        let angular_diameter_distance = comoving_distance / (1.0 + z);

        Ok(BackgroundQuantities {
            redshift: z,
            scale_factor: scale_factor(z)?,
            expansion_rate: expansion_rate_at(parameters, z)?,
            comoving_distance,
            luminosity_distance,
            angular_diameter_distance,
            arcsec_scale: angular_diameter_distance * parameters.constants().arcsec_in_radians,
            distance_modulus: if z >= 0.0 {
                Some(distance_modulus_from_luminosity_distance(
                    luminosity_distance,
                    parameters.constants(),
                ))
            } else {
                None
            },
            lookback_time: self.lookback_time_at(parameters, z)?,
            age: self.age_at(parameters, z)?,
            distance_unit: DistanceUnit::Centimeter,
            time_unit: TimeUnit::Second,
        })
    }

    /// Computes all background quantities for each of the given redshifts in
    /// parallel. Results are in input order; the first failing redshift in
    /// input order determines the error.
    pub fn evaluate_all_many(
        &self,
        parameters: &CosmologicalParameters,
        redshifts: &[fin],
    ) -> CosmoResult<Vec<BackgroundQuantities>> {
        let results: Vec<_> = redshifts
            .par_iter()
            .map(|&z| self.evaluate_all(parameters, z))
            .collect();
        results.into_iter().collect()
    }

    /// Redshifts z >= 0 are integrated over the scale factor on [1/(1+z), 1],
    /// which stays representable up to and including z = infinity. The
    /// bounded range -1 <= z < 0 is integrated directly in redshift.
    fn comoving_distance_at(&self, parameters: &CosmologicalParameters, z: fin) -> CosmoResult<fin> {
        let z = check_redshift(z)?;
        let integral = if z >= 0.0 {
            integrate_adaptive(
                |a| scaled_squared_expansion_rate(parameters, a).sqrt().recip(),
                scale_factor(z)?,
                1.0,
                &self.quadrature,
            )?
        } else {
            integrate_adaptive(
                |z| inverse_expansion_rate_unchecked(parameters, z),
                0.0,
                z,
                &self.quadrature,
            )?
        };
        Ok(parameters.hubble_distance() * integral.value)
    }

    fn lookback_time_at(&self, parameters: &CosmologicalParameters, z: fin) -> CosmoResult<fin> {
        let z = check_redshift(z)?;
        if z == -1.0 {
            return Err(self.unbounded_time());
        }
        let integral = if z >= 0.0 {
            integrate_adaptive(
                |a| scale_factor_time_integrand(parameters, a),
                scale_factor(z)?,
                1.0,
                &self.quadrature,
            )?
        } else {
            integrate_adaptive(
                |z| time_integrand_unchecked(parameters, z),
                0.0,
                z,
                &self.quadrature,
            )?
        };
        Ok(parameters.hubble_time() * integral.value)
    }

    fn age_at(&self, parameters: &CosmologicalParameters, z: fin) -> CosmoResult<fin> {
        let a = scale_factor(z)?;
        if a.is_infinite() {
            return Err(self.unbounded_time());
        }
        let integral = integrate_adaptive(
            |a| scale_factor_time_integrand(parameters, a),
            0.0,
            a,
            &self.quadrature,
        )?;
        Ok(parameters.hubble_time() * integral.value)
    }

    fn unbounded_time(&self) -> CosmoError {
        CosmoError::Convergence {
            estimate: fin::INFINITY,
            error_bound: fin::INFINITY,
            tolerance: self.quadrature.relative_tolerance,
            subdivisions: 0,
        }
    }
}

impl BackgroundQuantities {
    /// Returns a copy with distances and times expressed in the given units,
    /// converted with the given constants.
    pub fn converted(
        &self,
        distance_unit: DistanceUnit,
        time_unit: TimeUnit,
        constants: &PhysicalConstants,
    ) -> Self {
        let distance_scale =
            self.distance_unit.in_cgs(constants) / distance_unit.in_cgs(constants);
        let time_scale = self.time_unit.in_cgs(constants) / time_unit.in_cgs(constants);
        BackgroundQuantities {
            comoving_distance: self.comoving_distance * distance_scale,
            luminosity_distance: self.luminosity_distance * distance_scale,
            angular_diameter_distance: self.angular_diameter_distance * distance_scale,
            arcsec_scale: self.arcsec_scale * distance_scale,
            lookback_time: self.lookback_time * time_scale,
            age: self.age * time_scale,
            distance_unit,
            time_unit,
            ..*self
        }
    }
}

impl fmt::Display for BackgroundQuantities {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let length = self.distance_unit.symbol();
        let time = self.time_unit.symbol();
        writeln!(f, "Redshift, z = {:.6}", self.redshift)?;
        writeln!(f, "Scale factor, a = {:.6}", self.scale_factor)?;
        writeln!(f, "Expansion rate, E = {:.6}", self.expansion_rate)?;
        writeln!(f, "Comoving distance = {:.6e} {}", self.comoving_distance, length)?;
        writeln!(f, "Luminosity distance = {:.6e} {}", self.luminosity_distance, length)?;
        writeln!(
            f,
            "Angular diameter distance = {:.6e} {}",
            self.angular_diameter_distance, length
        )?;
        writeln!(f, "Arcsecond scale = {:.6e} {}/arcsec", self.arcsec_scale, length)?;
        if let Some(distance_modulus) = self.distance_modulus {
            writeln!(f, "Distance modulus = {:.6} mag", distance_modulus)?;
        }
        writeln!(f, "Lookback time = {:.6e} {}", self.lookback_time, time)?;
        writeln!(f, "Age = {:.6e} {}", self.age, time)
    }
}

/// Computes E(z) with the default evaluator.
pub fn expansion_rate<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().expansion_rate(parameters, redshifts)
}

/// Computes 1/E(z) with the default evaluator.
pub fn inverse_expansion_rate<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().inverse_expansion_rate(parameters, redshifts)
}

/// Computes 1/((1+z) E(z)) with the default evaluator.
pub fn time_integrand<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().time_integrand(parameters, redshifts)
}

/// Computes the comoving distance [cm] with the default evaluator.
pub fn comoving_distance<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().comoving_distance(parameters, redshifts)
}

/// Computes the lookback time [s] with the default evaluator.
pub fn lookback_time<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().lookback_time(parameters, redshifts)
}

/// Computes the age of the universe at redshift z [s] with the default
/// evaluator.
pub fn age_at_redshift<R: Redshifts>(
    parameters: &CosmologicalParameters,
    redshifts: R,
) -> CosmoResult<R::Output> {
    BackgroundEvaluator::default().age_at_redshift(parameters, redshifts)
}

fn expansion_rate_at(parameters: &CosmologicalParameters, z: fin) -> CosmoResult<fin> {
    check_redshift(z).map(|z| squared_expansion_rate(parameters, 1.0 + z).sqrt())
}

fn time_integrand_at(parameters: &CosmologicalParameters, z: fin) -> CosmoResult<fin> {
    check_redshift(z).map(|z| time_integrand_unchecked(parameters, z))
}

fn inverse_expansion_rate_unchecked(parameters: &CosmologicalParameters, z: fin) -> fin {
    squared_expansion_rate(parameters, 1.0 + z).sqrt().recip()
}

fn time_integrand_unchecked(parameters: &CosmologicalParameters, z: fin) -> fin {
    let one_plus_z = 1.0 + z;
    (one_plus_z * squared_expansion_rate(parameters, one_plus_z).sqrt()).recip()
}

/// E^2 as a function of 1+z.
fn squared_expansion_rate(parameters: &CosmologicalParameters, one_plus_z: fin) -> fin {
    let matter = density_term(parameters.omega_matter(), one_plus_z.powi(3));
    let radiation = density_term(parameters.omega_radiation(), one_plus_z.powi(4));
    let dark_energy = density_term(
        parameters.omega_dark_energy(),
        one_plus_z.powf(3.0 * (1.0 + parameters.dark_energy_w())),
    );
    (matter + radiation + dark_energy) / parameters.omega_total()
}

/// a^4 E^2 as a function of the scale factor a, which stays finite as a -> 0.
fn scaled_squared_expansion_rate(parameters: &CosmologicalParameters, a: fin) -> fin {
    let matter = density_term(parameters.omega_matter(), a);
    let radiation = parameters.omega_radiation();
    let dark_energy = density_term(
        parameters.omega_dark_energy(),
        a.powf(1.0 - 3.0 * parameters.dark_energy_w()),
    );
    (matter + radiation + dark_energy) / parameters.omega_total()
}

/// Absent components contribute nothing, even where their scaling diverges.
fn density_term(omega: fin, scaling: fin) -> fin {
    if omega == 0.0 {
        0.0
    } else {
        omega * scaling
    }
}

/// 1/(a E), the integrand of cosmic time with respect to the scale factor.
fn scale_factor_time_integrand(parameters: &CosmologicalParameters, a: fin) -> fin {
    a / scaled_squared_expansion_rate(parameters, a).sqrt()
}

fn distance_modulus_from_luminosity_distance(
    luminosity_distance: fin,
    constants: &PhysicalConstants,
) -> fin {
    5.0 * fin::log10(luminosity_distance / (10.0 * constants.parsec_length))
}
