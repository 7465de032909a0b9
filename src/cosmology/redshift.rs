//! Redshift validation and elementwise evaluation over redshift collections.

use crate::{
    error::{CosmoError, CosmoResult},
    math::fin,
};
use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use rayon::prelude::*;

/// Returns the given redshift if it lies in the physical domain z >= -1.
///
/// Positive infinity is accepted and corresponds to the Big Bang.
pub fn check_redshift(redshift: fin) -> CosmoResult<fin> {
    if redshift.is_nan() {
        Err(CosmoError::domain(redshift, "redshift is not a number"))
    } else if redshift < -1.0 {
        Err(CosmoError::domain(
            redshift,
            "redshift must be larger than or equal to -1",
        ))
    } else {
        Ok(redshift)
    }
}

/// Computes the scale factor a = 1/(1 + z) of the given redshift.
pub fn scale_factor(redshift: fin) -> CosmoResult<fin> {
    check_redshift(redshift).map(|z| (1.0 + z).recip())
}

/// A single redshift or an ordered collection of redshifts.
///
/// Evaluation preserves order and shape: scalars map to scalars, slices and
/// vectors to vectors and arrays to arrays of the same dimensions. Collections
/// are evaluated in parallel. If any evaluation fails, the error of the first
/// failing element in iteration order is returned.
pub trait Redshifts {
    type Output;

    /// Applies the given fallible function to every redshift.
    fn map_redshifts<E>(self, evaluate: E) -> CosmoResult<Self::Output>
    where
        E: Fn(fin) -> CosmoResult<fin> + Sync + Send;
}

impl Redshifts for fin {
    type Output = fin;

    fn map_redshifts<E>(self, evaluate: E) -> CosmoResult<fin>
    where
        E: Fn(fin) -> CosmoResult<fin> + Sync + Send,
    {
        evaluate(self)
    }
}

impl<'a> Redshifts for &'a [fin] {
    type Output = Vec<fin>;

    fn map_redshifts<E>(self, evaluate: E) -> CosmoResult<Vec<fin>>
    where
        E: Fn(fin) -> CosmoResult<fin> + Sync + Send,
    {
        let results: Vec<CosmoResult<fin>> = self.par_iter().map(|&z| evaluate(z)).collect();
        results.into_iter().collect()
    }
}

impl<'a> Redshifts for &'a Vec<fin> {
    type Output = Vec<fin>;

    fn map_redshifts<E>(self, evaluate: E) -> CosmoResult<Vec<fin>>
    where
        E: Fn(fin) -> CosmoResult<fin> + Sync + Send,
    {
        self.as_slice().map_redshifts(evaluate)
    }
}

impl<'a, S, D> Redshifts for &'a ArrayBase<S, D>
where
    S: Data<Elem = fin>,
    D: Dimension,
{
    type Output = Array<fin, D>;

    fn map_redshifts<E>(self, evaluate: E) -> CosmoResult<Array<fin, D>>
    where
        E: Fn(fin) -> CosmoResult<fin> + Sync + Send,
    {
        let results = Zip::from(self.view()).par_map_collect(|&z| evaluate(z));
        if let Some(err) = results.iter().find_map(|result| result.as_ref().err()) {
            return Err(err.clone());
        }
        Ok(results.map(|result| result.as_ref().copied().unwrap_or(fin::NAN)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn doubled(z: fin) -> CosmoResult<fin> {
        check_redshift(z).map(|z| 2.0 * z)
    }

    #[test]
    fn domain_is_checked() {
        assert_eq!(check_redshift(-1.0), Ok(-1.0));
        assert_eq!(check_redshift(fin::INFINITY), Ok(fin::INFINITY));
        assert!(matches!(
            check_redshift(-2.0),
            Err(CosmoError::Domain { redshift, .. }) if redshift == -2.0
        ));
        assert!(check_redshift(fin::NAN).is_err());
    }

    #[test]
    fn scale_factor_is_reciprocal() {
        assert_eq!(scale_factor(0.0), Ok(1.0));
        assert_eq!(scale_factor(1.0), Ok(0.5));
        assert_eq!(scale_factor(fin::INFINITY), Ok(0.0));
        assert!(scale_factor(-1.5).is_err());
    }

    #[test]
    fn collections_preserve_order_and_shape() {
        assert_eq!(1.5_f64.map_redshifts(doubled), Ok(3.0));

        let z = vec![0.0, 1.0, 2.0];
        assert_eq!(z.as_slice().map_redshifts(doubled), Ok(vec![0.0, 2.0, 4.0]));
        assert_eq!((&z).map_redshifts(doubled), Ok(vec![0.0, 2.0, 4.0]));

        let grid = array![[0.0, 0.5], [1.0, 1.5], [2.0, 2.5]];
        let mapped = (&grid).map_redshifts(doubled).unwrap();
        assert_eq!(mapped.shape(), &[3, 2]);
        assert_eq!(mapped, &grid * 2.0);
    }

    #[test]
    fn first_failing_element_is_reported() {
        let z = vec![0.0, -3.0, 1.0, -2.0];
        match z.as_slice().map_redshifts(doubled) {
            Err(CosmoError::Domain { redshift, .. }) => assert_eq!(redshift, -3.0),
            other => panic!("Expected domain error, got {:?}", other),
        }

        let grid = array![[0.0, -2.0], [-5.0, 1.0]];
        match (&grid).map_redshifts(doubled) {
            Err(CosmoError::Domain { redshift, .. }) => assert_eq!(redshift, -2.0),
            other => panic!("Expected domain error, got {:?}", other),
        }
    }
}
