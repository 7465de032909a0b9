//! Adaptive quadrature with global subdivision.
//!
//! The interval with the largest error estimate is repeatedly bisected and
//! re-estimated with the 15-point Gauss–Kronrod rule until the summed error
//! estimate meets the requested tolerance or the subdivision budget runs out.

use super::{fin, integrate_fifteen_point_gauss_kronrod, RuleEstimate};
use crate::{
    error::{CosmoError, CosmoResult},
    num::OrderableIndexValuePair,
};
use std::collections::BinaryHeap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for adaptive quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadratureConfig {
    /// Relative error tolerance.
    pub relative_tolerance: fin,
    /// Absolute error tolerance.
    pub absolute_tolerance: fin,
    /// Maximum number of interval bisections before giving up.
    pub max_subdivisions: usize,
}

/// Outcome of a converged integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureResult {
    /// Estimated value of the integral.
    pub value: fin,
    /// Estimated upper bound on the absolute error.
    pub error_bound: fin,
    /// Number of bisections performed.
    pub subdivisions: usize,
}

#[derive(Clone, Copy, Debug)]
struct Subinterval {
    start: fin,
    end: fin,
    estimate: RuleEstimate,
}

impl QuadratureConfig {
    pub const DEFAULT_RELATIVE_TOLERANCE: fin = 1e-8;
    pub const DEFAULT_ABSOLUTE_TOLERANCE: fin = 0.0;
    pub const DEFAULT_MAX_SUBDIVISIONS: usize = 1000;

    /// Smallest non-zero relative tolerance that round-off allows us to meet.
    pub const MIN_RELATIVE_TOLERANCE: fin = 50.0 * fin::EPSILON;

    /// Creates a configuration with the given relative tolerance and
    /// default values for everything else.
    pub fn with_relative_tolerance(relative_tolerance: fin) -> Self {
        QuadratureConfig {
            relative_tolerance,
            ..Self::default()
        }
    }

    /// Checks that the configuration can be used for integration.
    pub fn validate(&self) -> CosmoResult<()> {
        if !(self.relative_tolerance == 0.0
            || self.relative_tolerance >= Self::MIN_RELATIVE_TOLERANCE)
        {
            return Err(CosmoError::invalid_parameter(
                "relative_tolerance",
                self.relative_tolerance,
                format!(
                    "must be zero or at least {:e}",
                    Self::MIN_RELATIVE_TOLERANCE
                ),
            ));
        }
        if !(self.absolute_tolerance >= 0.0 && self.absolute_tolerance.is_finite()) {
            return Err(CosmoError::invalid_parameter(
                "absolute_tolerance",
                self.absolute_tolerance,
                "must be finite and larger than or equal to zero",
            ));
        }
        if self.relative_tolerance == 0.0 && self.absolute_tolerance == 0.0 {
            return Err(CosmoError::invalid_parameter(
                "absolute_tolerance",
                self.absolute_tolerance,
                "relative and absolute tolerance cannot both be zero",
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(CosmoError::invalid_parameter(
                "max_subdivisions",
                0.0,
                "must be larger than zero",
            ));
        }
        Ok(())
    }

    fn tolerance_for(&self, integral: fin) -> fin {
        fin::max(
            self.absolute_tolerance,
            self.relative_tolerance * integral.abs(),
        )
    }
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        QuadratureConfig {
            relative_tolerance: Self::DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: Self::DEFAULT_ABSOLUTE_TOLERANCE,
            max_subdivisions: Self::DEFAULT_MAX_SUBDIVISIONS,
        }
    }
}

/// Integrates the given function from `start` to `end` to within the
/// tolerance of the given configuration.
///
/// If `end < start` the integral over `[end, start]` is computed and its sign
/// flipped. Identical end points give exactly zero without evaluating the
/// integrand.
///
/// # Returns
///
/// A `CosmoResult` which is either:
///
/// - `Ok`: Contains a `QuadratureResult` with the integral and its error bound.
/// - `Err`: `InvalidParameter` for an unusable configuration or non-finite
///   bounds, or `Convergence` with the best estimate when the tolerance was not
///   met within `max_subdivisions` bisections.
pub fn integrate_adaptive<E>(
    evaluate_integrand: E,
    start: fin,
    end: fin,
    config: &QuadratureConfig,
) -> CosmoResult<QuadratureResult>
where
    E: Fn(fin) -> fin,
{
    config.validate()?;
    for (name, bound) in [("start", start), ("end", end)] {
        if !bound.is_finite() {
            return Err(CosmoError::invalid_parameter(
                name,
                bound,
                "integration bounds must be finite",
            ));
        }
    }

    if start == end {
        return Ok(QuadratureResult {
            value: 0.0,
            error_bound: 0.0,
            subdivisions: 0,
        });
    }

    if end < start {
        return integrate_adaptive(evaluate_integrand, end, start, config).map(|result| {
            QuadratureResult {
                value: -result.value,
                ..result
            }
        });
    }

    let mut subintervals = vec![Subinterval {
        start,
        end,
        estimate: integrate_fifteen_point_gauss_kronrod(&evaluate_integrand, start, end),
    }];
    let mut queue = BinaryHeap::new();
    queue.push(OrderableIndexValuePair(0_usize, subintervals[0].estimate.error));

    let mut subdivisions = 0;
    loop {
        let (integral, error) = subintervals.iter().fold((0.0, 0.0), |(sum, err), interval| {
            (sum + interval.estimate.integral, err + interval.estimate.error)
        });
        let tolerance = config.tolerance_for(integral);

        let not_converged = |subdivisions| CosmoError::Convergence {
            estimate: integral,
            error_bound: error,
            tolerance,
            subdivisions,
        };

        if !(integral.is_finite() && error.is_finite()) {
            return Err(not_converged(subdivisions));
        }
        if error <= tolerance {
            log::debug!(
                "Quadrature over [{:e}, {:e}] converged after {} subdivisions (error bound {:e})",
                start,
                end,
                subdivisions,
                error
            );
            return Ok(QuadratureResult {
                value: integral,
                error_bound: error,
                subdivisions,
            });
        }
        if subdivisions >= config.max_subdivisions {
            return Err(not_converged(subdivisions));
        }

        let OrderableIndexValuePair(worst_idx, _) = match queue.pop() {
            Some(entry) => entry,
            None => return Err(not_converged(subdivisions)),
        };
        let worst = subintervals[worst_idx];
        let midpoint = 0.5 * (worst.start + worst.end);

        // The interval can no longer be split in floating point
        if midpoint <= worst.start || midpoint >= worst.end {
            return Err(not_converged(subdivisions));
        }

        let lower = Subinterval {
            start: worst.start,
            end: midpoint,
            estimate: integrate_fifteen_point_gauss_kronrod(
                &evaluate_integrand,
                worst.start,
                midpoint,
            ),
        };
        let upper = Subinterval {
            start: midpoint,
            end: worst.end,
            estimate: integrate_fifteen_point_gauss_kronrod(&evaluate_integrand, midpoint, worst.end),
        };

        subintervals[worst_idx] = lower;
        queue.push(OrderableIndexValuePair(worst_idx, lower.estimate.error));
        subintervals.push(upper);
        queue.push(OrderableIndexValuePair(
            subintervals.len() - 1,
            upper.estimate.error,
        ));

        subdivisions += 1;
    }
}
