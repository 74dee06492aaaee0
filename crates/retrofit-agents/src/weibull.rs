//! Two-parameter Weibull percentile/value transforms.
//!
//! With shape `alpha` and scale `beta`, the cumulative distribution is
//!
//! ```text
//! p = 1 - exp(-(x / beta)^alpha)
//! ```
//!
//! and its inverse, with a small `epsilon` keeping the logarithm finite as
//! `p` approaches 1:
//!
//! ```text
//! x = beta * (-ln(1 - p + epsilon))^(1 / alpha)
//! ```
//!
//! Both directions are pure and reject inputs outside their domain instead
//! of returning `NaN`.

use serde::Deserialize;

use crate::error::HouseholdError;

/// Offset added inside the inverse transform's logarithm.
pub const WEIBULL_EPSILON: f64 = 1e-7;

/// Shape and scale of a Weibull distribution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeibullParams {
    /// Shape parameter (`alpha > 0`).
    pub alpha: f64,
    /// Scale parameter (`beta > 0`).
    pub beta: f64,
}

impl WeibullParams {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::InvalidWeibullParameter`] if either value is
    /// not positive and finite.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, HouseholdError> {
        let params = Self { alpha, beta };
        params.validate()?;
        Ok(params)
    }

    /// Check both parameters are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::InvalidWeibullParameter`] naming the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), HouseholdError> {
        check_parameter("alpha", self.alpha)?;
        check_parameter("beta", self.beta)
    }

    /// Percentile of `value` under this distribution.
    ///
    /// # Errors
    ///
    /// See [`percentile_from_value`].
    pub fn percentile(&self, value: f64) -> Result<f64, HouseholdError> {
        percentile_from_value(self.alpha, self.beta, value)
    }

    /// Value at `percentile` under this distribution.
    ///
    /// # Errors
    ///
    /// See [`value_from_percentile`].
    pub fn value(&self, percentile: f64) -> Result<f64, HouseholdError> {
        value_from_percentile(self.alpha, self.beta, percentile)
    }
}

/// Percentile rank in `[0, 1)` of `value` under Weibull(`alpha`, `beta`).
///
/// # Errors
///
/// Returns [`HouseholdError::InvalidWeibullParameter`] for a non-positive
/// `alpha` or `beta`, and [`HouseholdError::InvalidWeibullValue`] for a
/// negative or non-finite `value`.
pub fn percentile_from_value(alpha: f64, beta: f64, value: f64) -> Result<f64, HouseholdError> {
    check_parameter("alpha", alpha)?;
    check_parameter("beta", beta)?;
    if !value.is_finite() || value < 0.0 {
        return Err(HouseholdError::InvalidWeibullValue { value });
    }

    let scaled = (value / beta).powf(alpha);
    Ok(-(-scaled).exp_m1())
}

/// Value at `percentile` under Weibull(`alpha`, `beta`).
///
/// Inverse of [`percentile_from_value`] up to float precision and the
/// [`WEIBULL_EPSILON`] offset.
///
/// # Errors
///
/// Returns [`HouseholdError::InvalidWeibullParameter`] for a non-positive
/// `alpha` or `beta`, and [`HouseholdError::PercentileOutOfRange`] unless
/// `percentile` lies in `[0, 1]`.
pub fn value_from_percentile(
    alpha: f64,
    beta: f64,
    percentile: f64,
) -> Result<f64, HouseholdError> {
    check_parameter("alpha", alpha)?;
    check_parameter("beta", beta)?;
    if !(0.0..=1.0).contains(&percentile) {
        return Err(HouseholdError::PercentileOutOfRange { percentile });
    }

    // ln(1 - p + epsilon) is positive for p < epsilon; clamp so the root stays real.
    let tail = (-(WEIBULL_EPSILON - percentile).ln_1p()).max(0.0);
    Ok(beta * tail.powf(alpha.recip()))
}

const fn check_parameter(name: &'static str, value: f64) -> Result<(), HouseholdError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HouseholdError::InvalidWeibullParameter { name, value })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn zero_maps_to_zero_percentile() {
        let p = percentile_from_value(1.5, 100.0, 0.0).unwrap();
        assert!(p.abs() < f64::EPSILON);
    }

    #[test]
    fn scale_maps_to_known_percentile() {
        // At x == beta, p = 1 - e^-1 for every shape.
        for alpha in [0.5, 1.0, 2.0, 3.7] {
            let p = percentile_from_value(alpha, 250.0, 250.0).unwrap();
            assert!((p - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
        }
    }

    #[test]
    fn percentile_stays_below_one() {
        let p = percentile_from_value(1.61, 280_000.0, 1_000_000.0).unwrap();
        assert!(p > 0.99 && p < 1.0);
    }

    #[test]
    fn round_trip_recovers_value() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let alpha: f64 = rng.random_range(0.5..4.0);
            let beta: f64 = rng.random_range(1.0..1_000_000.0);
            // Keep (x / beta)^alpha where p neither vanishes nor saturates.
            let scaled: f64 = rng.random_range(0.05..4.0);
            let x = beta * scaled.powf(alpha.recip());

            let p = percentile_from_value(alpha, beta, x).unwrap();
            let back = value_from_percentile(alpha, beta, p).unwrap();
            let relative_error = ((back - x) / x).abs();
            assert!(
                relative_error < 1e-4,
                "alpha={alpha} beta={beta} x={x} back={back}"
            );
        }
    }

    #[test]
    fn inverse_is_finite_at_percentile_bounds() {
        let at_zero = value_from_percentile(0.55, 21_994.0, 0.0).unwrap();
        assert!(at_zero.abs() < f64::EPSILON);
        let at_one = value_from_percentile(0.55, 21_994.0, 1.0).unwrap();
        assert!(at_one.is_finite());
        assert!(at_one > 21_994.0);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(matches!(
            percentile_from_value(0.0, 1.0, 1.0),
            Err(HouseholdError::InvalidWeibullParameter { name: "alpha", .. })
        ));
        assert!(matches!(
            percentile_from_value(1.0, -5.0, 1.0),
            Err(HouseholdError::InvalidWeibullParameter { name: "beta", .. })
        ));
        assert!(matches!(
            value_from_percentile(1.0, f64::NAN, 0.5),
            Err(HouseholdError::InvalidWeibullParameter { name: "beta", .. })
        ));
        assert!(WeibullParams::new(-1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        assert!(matches!(
            percentile_from_value(1.0, 1.0, -0.1),
            Err(HouseholdError::InvalidWeibullValue { .. })
        ));
        assert!(matches!(
            percentile_from_value(1.0, 1.0, f64::INFINITY),
            Err(HouseholdError::InvalidWeibullValue { .. })
        ));
        assert!(matches!(
            value_from_percentile(1.0, 1.0, 1.5),
            Err(HouseholdError::PercentileOutOfRange { .. })
        ));
        assert!(matches!(
            value_from_percentile(1.0, 1.0, f64::NAN),
            Err(HouseholdError::PercentileOutOfRange { .. })
        ));
    }
}
