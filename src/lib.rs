//! The `cosmocalc` crate computes background quantities of a flat universe:
//! expansion rates, comoving distances, lookback times and ages.

pub mod constants;
pub mod cosmology;
pub mod error;
pub mod io;
pub mod math;
pub mod num;
pub mod units;

pub use cosmology::{
    background::{BackgroundEvaluator, BackgroundQuantities},
    parameters::{CosmologicalParameters, ParameterOverrides},
    redshift::Redshifts,
};
pub use error::{CosmoError, CosmoResult};
