use crate::BkError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, BkError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BkError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, BkError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(BkError::OutOfRange { what, value: v })
    }
}

/// Finite and not negative. Zero is allowed.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, BkError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(BkError::OutOfRange { what, value: v })
    }
}

/// Linear interpolation between `a` and `b` at fraction `frac`.
#[inline]
pub fn lerp(a: Real, b: Real, frac: Real) -> Real {
    a + frac * (b - a)
}

/// Logarithmically spaced points from `start` to `end`, both inclusive.
///
/// Requires `points >= 2` and `0 < start < end`. Endpoints are written
/// exactly so that grids like `1..1000` over 4 points land on decades.
pub fn log_space(start: Real, end: Real, points: usize) -> Result<Vec<Real>, BkError> {
    if points < 2 {
        return Err(BkError::InvalidArg {
            what: "log_space needs at least 2 points",
        });
    }
    ensure_positive(start, "log_space start")?;
    ensure_finite(end, "log_space end")?;
    if end <= start {
        return Err(BkError::InvalidArg {
            what: "log_space end must be greater than start",
        });
    }

    let log_start = start.log10();
    let log_end = end.log10();
    let log_delta = (log_end - log_start) / (points - 1) as Real;

    let mut out = Vec::with_capacity(points);
    for i in 0..points {
        out.push(10.0_f64.powf(log_start + i as Real * log_delta));
    }

    // Ensure exact endpoints
    out[0] = start;
    out[points - 1] = end;
    Ok(out)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[Real]) -> Real {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<Real>() / values.len() as Real
}

/// Root-mean-square, 0 for an empty slice.
pub fn rms(values: &[Real]) -> Real {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<Real>() / values.len() as Real).sqrt()
}

/// (min, max) of a slice, `None` when empty.
pub fn min_max(values: &[Real]) -> Option<(Real, Real)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn log_space_is_ascending(start in 1e-3_f64..1e3, span in 1.01_f64..1e4, n in 2_usize..400) {
            let end = start * span;
            let pts = log_space(start, end, n).unwrap();
            prop_assert_eq!(pts.len(), n);
            prop_assert_eq!(pts[0], start);
            prop_assert_eq!(pts[n - 1], end);
            for w in pts.windows(2) {
                prop_assert!(w[1] > w[0]);
            }
        }
    }
}
