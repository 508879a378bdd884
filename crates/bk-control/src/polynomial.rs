//! Polynomial helpers over coefficient slices, highest degree first.

use num_complex::Complex64;

/// Drop leading zero coefficients. Keeps at least one entry.
pub fn trim(coeffs: &[f64]) -> &[f64] {
    match coeffs.iter().position(|&c| c != 0.0) {
        Some(first) => &coeffs[first..],
        None if coeffs.is_empty() => coeffs,
        None => &coeffs[coeffs.len() - 1..],
    }
}

/// Degree after trimming leading zeros (0 for constants and the zero polynomial).
pub fn degree(coeffs: &[f64]) -> usize {
    trim(coeffs).len().saturating_sub(1)
}

/// True when every coefficient is zero (or there are none).
pub fn is_zero(coeffs: &[f64]) -> bool {
    coeffs.iter().all(|&c| c == 0.0)
}

/// Horner evaluation at a complex point.
pub fn eval(coeffs: &[f64], s: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// Full convolution of two coefficient sequences.
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Sum of two polynomials, aligned on their constant terms.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    let mut out = vec![0.0; n];
    for (slot, &c) in out[n - a.len()..].iter_mut().zip(a) {
        *slot += c;
    }
    for (slot, &c) in out[n - b.len()..].iter_mut().zip(b) {
        *slot += c;
    }
    out
}

/// Closed-form roots for degree <= 2.
///
/// Higher degrees return an empty list; there is no general root finder here.
pub fn roots(coeffs: &[f64]) -> Vec<Complex64> {
    let p = trim(coeffs);
    match p.len() {
        2 => vec![Complex64::new(-p[1] / p[0], 0.0)],
        3 => {
            let (a, b, c) = (p[0], p[1], p[2]);
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                vec![
                    Complex64::new((-b + sq) / (2.0 * a), 0.0),
                    Complex64::new((-b - sq) / (2.0 * a), 0.0),
                ]
            } else {
                let re = -b / (2.0 * a);
                let im = (-disc).sqrt() / (2.0 * a);
                vec![Complex64::new(re, im), Complex64::new(re, -im)]
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trim_and_degree() {
        assert_eq!(trim(&[0.0, 0.0, 1.0, 2.0]), &[1.0, 2.0]);
        assert_eq!(trim(&[0.0, 0.0]), &[0.0]);
        assert_eq!(degree(&[0.0, 3.0, 1.0, 0.0]), 2);
        assert_eq!(degree(&[5.0]), 0);
    }

    #[test]
    fn horner_matches_direct() {
        // 2s^2 + 3s + 4 at s = 1 + j
        let s = Complex64::new(1.0, 1.0);
        let direct = s * s * 2.0 + s * 3.0 + 4.0;
        let v = eval(&[2.0, 3.0, 4.0], s);
        assert_abs_diff_eq!(v.re, direct.re, epsilon = 1e-12);
        assert_abs_diff_eq!(v.im, direct.im, epsilon = 1e-12);
    }

    #[test]
    fn multiply_is_convolution() {
        // (s + 1)(s + 2) = s^2 + 3s + 2
        assert_eq!(multiply(&[1.0, 1.0], &[1.0, 2.0]), vec![1.0, 3.0, 2.0]);
        assert!(multiply(&[], &[1.0]).is_empty());
    }

    #[test]
    fn add_aligns_constant_terms() {
        // (s^2 + 1) + (2s + 3) = s^2 + 2s + 4
        assert_eq!(add(&[1.0, 0.0, 1.0], &[2.0, 3.0]), vec![1.0, 2.0, 4.0]);
        assert_eq!(add(&[1.0], &[1.0, 1.0]), vec![1.0, 2.0]);
    }

    #[test]
    fn linear_root() {
        let r = roots(&[2.0, 4.0]);
        assert_eq!(r.len(), 1);
        assert_abs_diff_eq!(r[0].re, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_real_and_complex_roots() {
        let r = roots(&[1.0, 3.0, 2.0]);
        assert_eq!(r.len(), 2);
        assert_abs_diff_eq!(r[0].re, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[1].re, -2.0, epsilon = 1e-12);

        // s^2 + 2s + 5 -> -1 +/- 2j
        let r = roots(&[1.0, 2.0, 5.0]);
        assert_abs_diff_eq!(r[0].re, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[0].im, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[1].im, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn high_degree_has_no_closed_form() {
        assert!(roots(&[1.0, 6.0, 11.0, 6.0]).is_empty());
        assert!(roots(&[3.0]).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coeffs() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-10.0_f64..10.0, 1..5)
    }

    // Upper bound on |p(jw)|, used to scale rounding tolerance.
    fn bound(p: &[f64], w: f64) -> f64 {
        p.iter().fold(0.0, |acc, c| acc * w + c.abs())
    }

    proptest! {
        #[test]
        fn product_evaluates_to_product_of_values(a in coeffs(), b in coeffs(), w in 0.1_f64..10.0) {
            let s = Complex64::new(0.0, w);
            let direct = eval(&a, s) * eval(&b, s);
            let via_poly = eval(&multiply(&a, &b), s);
            let scale = 1.0 + bound(&a, w) * bound(&b, w);
            prop_assert!((direct - via_poly).norm() <= 1e-12 * scale);
        }

        #[test]
        fn sum_evaluates_to_sum_of_values(a in coeffs(), b in coeffs(), w in 0.1_f64..10.0) {
            let s = Complex64::new(0.0, w);
            let direct = eval(&a, s) + eval(&b, s);
            let via_poly = eval(&add(&a, &b), s);
            let scale = 1.0 + bound(&a, w) + bound(&b, w);
            prop_assert!((direct - via_poly).norm() <= 1e-12 * scale);
        }
    }
}
