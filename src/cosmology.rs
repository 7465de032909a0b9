//! Background cosmology of a flat universe.
//!
//! A [`CosmologicalParameters`](parameters::CosmologicalParameters) value
//! describes the universe, and the functions of [`background`] evaluate
//! expansion rates, distances and times for one or many redshifts.

pub mod background;
pub mod parameters;
pub mod redshift;
