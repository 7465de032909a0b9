//! Property-based tests for the background evaluator using proptest.

use cosmocalc::{
    cosmology::background::{age_at_redshift, comoving_distance, expansion_rate, lookback_time},
    CosmologicalParameters, ParameterOverrides,
};
use proptest::prelude::*;

/// Flat parameter set with the given matter and radiation densities and the
/// remainder in a cosmological constant.
fn flat_parameters(omega_matter: f64, omega_radiation: f64, hubble_constant: f64) -> CosmologicalParameters {
    let omega_baryon = 0.15 * omega_matter;
    CosmologicalParameters::new(ParameterOverrides {
        hubble_constant: Some(hubble_constant),
        omega_baryon: Some(omega_baryon),
        omega_dark_matter: Some(omega_matter - omega_baryon),
        omega_radiation: Some(omega_radiation),
        omega_dark_energy: Some(1.0 - omega_matter - omega_radiation),
        ..ParameterOverrides::default()
    })
    .unwrap()
}

proptest! {
    /// The expansion rate is exactly one today for any flat parameter set.
    #[test]
    fn expansion_rate_is_unity_today(
        omega_matter in 0.01f64..0.99,
        omega_radiation in 0.0f64..1e-3,
        hubble_constant in 40.0f64..100.0,
    ) {
        let parameters = flat_parameters(omega_matter, omega_radiation, hubble_constant);
        prop_assert_eq!(expansion_rate(&parameters, 0.0).unwrap(), 1.0);
    }

    /// The expansion rate and comoving distance grow with redshift.
    #[test]
    fn quantities_grow_with_redshift(
        omega_matter in 0.01f64..0.99,
        z in 0.0f64..50.0,
        dz in 0.01f64..10.0,
    ) {
        let parameters = flat_parameters(omega_matter, 5e-4, 70.0);
        prop_assert!(expansion_rate(&parameters, z + dz).unwrap() > expansion_rate(&parameters, z).unwrap());
        prop_assert!(
            comoving_distance(&parameters, z + dz).unwrap() > comoving_distance(&parameters, z).unwrap()
        );
    }

    /// Lookback time and age at a redshift add up to the current age.
    #[test]
    fn lookback_and_age_add_up(
        omega_matter in 0.05f64..0.95,
        z in 0.0f64..1000.0,
    ) {
        let parameters = flat_parameters(omega_matter, 1e-4, 70.0);
        let age_today = age_at_redshift(&parameters, 0.0).unwrap();
        let age_then = age_at_redshift(&parameters, z).unwrap();
        let lookback = lookback_time(&parameters, z).unwrap();
        prop_assert!(age_then > 0.0);
        prop_assert!(lookback >= 0.0 && lookback < age_today);
        prop_assert!(
            (age_then + lookback - age_today).abs() <= 1e-6 * age_today,
            "age {:e} + lookback {:e} != {:e}", age_then, lookback, age_today
        );
    }

    /// Evaluating a vector gives the same values as evaluating each element.
    #[test]
    fn vector_matches_scalars(redshifts in prop::collection::vec(-0.9f64..100.0, 0..16)) {
        let parameters = CosmologicalParameters::default();
        let distances = comoving_distance(&parameters, &redshifts).unwrap();
        prop_assert_eq!(distances.len(), redshifts.len());
        for (&distance, &z) in distances.iter().zip(redshifts.iter()) {
            prop_assert_eq!(distance, comoving_distance(&parameters, z).unwrap());
        }
    }

    /// Redshifts below -1 are always rejected.
    #[test]
    fn unphysical_redshifts_are_rejected(z in -1e6f64..-1.000_001) {
        let parameters = CosmologicalParameters::default();
        prop_assert!(expansion_rate(&parameters, z).is_err());
        prop_assert!(comoving_distance(&parameters, z).is_err());
        prop_assert!(age_at_redshift(&parameters, z).is_err());
    }
}
