use std::str::FromStr;

use crate::error::RationalError;

/// The four denominator formulas a rational activation can use.
///
/// With numerator `P(x) = a_0 + a_1 x + ... + a_n x^n`, the versions
/// differ only in the denominator `Q(x)`:
/// - `A`: `Q(x) = 1 + |b_0 x| + |b_1 x^2| + ... + |b_m x^{m+1}|`
/// - `B`: `Q(x) = 1 + |b_0 x + b_1 x^2 + ... + b_m x^{m+1}|`
/// - `C`: `Q(x) = 0.1 + |b_0 + b_1 x + ... + b_m x^m|`
/// - `D`: version `B` with noised denominator coefficients while training
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Version {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            _ => Err(RationalError::UnknownVersion(s.to_string())),
        }
    }
}

impl Version {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Evaluates `Q(x)` for a single element. Version `D` callers pass
    /// coefficients that already carry any training noise, so it shares
    /// the version `B` formula here.
    pub(crate) fn denominator(self, coeffs: &[f32], x: f32) -> f32 {
        match self {
            Self::A => {
                let ax = x.abs();
                let mut acc = 0.0;
                for &b in coeffs.iter().rev() {
                    acc = acc * ax + b.abs();
                }
                1.0 + acc * ax
            }
            Self::B | Self::D => 1.0 + (x * polynomial(coeffs, x)).abs(),
            Self::C => 0.1 + polynomial(coeffs, x).abs(),
        }
    }

    /// Evaluates `dQ/dx` for a single element.
    pub(crate) fn denominator_dx(self, coeffs: &[f32], x: f32) -> f32 {
        match self {
            Self::A => {
                let ax = x.abs();
                let mut acc = 0.0;
                for (j, &b) in coeffs.iter().enumerate().rev() {
                    acc = acc * ax + (j + 1) as f32 * b.abs();
                }
                sgn(x) * acc
            }
            Self::B | Self::D => {
                let mut acc = 0.0;
                for (j, &b) in coeffs.iter().enumerate().rev() {
                    acc = acc * x + (j + 1) as f32 * b;
                }
                sgn(x * polynomial(coeffs, x)) * acc
            }
            Self::C => sgn(polynomial(coeffs, x)) * polynomial_dx(coeffs, x),
        }
    }

    /// Accumulates `coef * dQ/db_j` into `grads`. For noised version `D`
    /// forward passes, `coeffs` holds the noised values and `noise` the
    /// factors to chain through back to the stored coefficients.
    pub(crate) fn backprop_denominator(
        self,
        coeffs: &[f32],
        x: f32,
        coef: f32,
        noise: Option<&[f32]>,
        grads: &mut [f32],
    ) {
        match self {
            Self::A => {
                let ax = x.abs();
                let mut axp = ax;
                for (grad, &b) in grads.iter_mut().zip(coeffs.iter()) {
                    *grad += coef * sgn(b) * axp;
                    axp *= ax;
                }
            }
            Self::B | Self::D => {
                let sign = sgn(x * polynomial(coeffs, x));
                let mut xp = x;
                for (j, grad) in grads.iter_mut().enumerate() {
                    let factor = noise.map_or(1.0, |n| n[j]);
                    *grad += coef * sign * xp * factor;
                    xp *= x;
                }
            }
            Self::C => {
                let sign = sgn(polynomial(coeffs, x));
                let mut xp = 1.0;
                for grad in grads.iter_mut() {
                    *grad += coef * sign * xp;
                    xp *= x;
                }
            }
        }
    }
}

/// Evaluates `c_0 + c_1 x + ... + c_k x^k`.
pub(crate) fn polynomial(coeffs: &[f32], x: f32) -> f32 {
    let mut acc = 0.0;
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Evaluates the derivative `c_1 + 2 c_2 x + ... + k c_k x^{k-1}`.
pub(crate) fn polynomial_dx(coeffs: &[f32], x: f32) -> f32 {
    let mut acc = 0.0;
    for (i, &c) in coeffs.iter().enumerate().skip(1).rev() {
        acc = acc * x + i as f32 * c;
    }
    acc
}

/// Accumulates `coef * x^i` into each `grads[i]`.
pub(crate) fn backprop_polynomial(x: f32, coef: f32, grads: &mut [f32]) {
    let mut xp = 1.0;
    for grad in grads.iter_mut() {
        *grad += coef * xp;
        xp *= x;
    }
}

/// Sign with a zero subgradient at the absolute value's kink.
fn sgn(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!((a - b).abs() < tol, "{a} != {b} (tol {tol})");
    }

    #[test]
    fn parse_accepts_both_cases() {
        for (tag, expected) in
            [("A", Version::A), ("b", Version::B), ("C", Version::C), ("d", Version::D)]
        {
            assert_eq!(tag.parse::<Version>().unwrap(), expected);
        }
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        for tag in ["E", "", "AB", "version"] {
            assert_eq!(
                tag.parse::<Version>(),
                Err(RationalError::UnknownVersion(tag.to_string()))
            );
        }
    }

    #[test]
    fn display_matches_tag() {
        for version in Version::ALL {
            assert_eq!(version.as_str().parse::<Version>().unwrap(), version);
        }
    }

    #[test]
    fn polynomial_horner() {
        assert_eq!(polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(polynomial(&[1.0, 2.0, 3.0], 0.0), 1.0);
        assert_eq!(polynomial_dx(&[1.0, 2.0, 3.0], 2.0), 14.0);
        assert_eq!(polynomial_dx(&[5.0], 3.0), 0.0);
    }

    #[test]
    fn denominator_a() {
        let coeffs = [0.5, -0.25];
        assert_eq!(Version::A.denominator(&coeffs, 2.0), 3.0);
        assert_eq!(Version::A.denominator(&coeffs, -2.0), 3.0);
        assert_eq!(Version::A.denominator(&coeffs, 0.0), 1.0);
    }

    #[test]
    fn denominator_b() {
        let coeffs = [0.5, 0.25];
        assert_eq!(Version::B.denominator(&coeffs, 2.0), 3.0);
        assert_eq!(Version::B.denominator(&coeffs, -2.0), 1.0);
        assert_eq!(Version::B.denominator(&coeffs, 0.0), 1.0);
    }

    #[test]
    fn denominator_c() {
        let coeffs = [0.3, 0.2];
        assert_close(Version::C.denominator(&coeffs, 2.0), 0.8, 1e-6);
        assert_close(Version::C.denominator(&coeffs, -2.0), 0.2, 1e-6);
        assert_close(Version::C.denominator(&coeffs, 0.0), 0.4, 1e-6);
    }

    #[test]
    fn denominator_d_matches_b_without_noise() {
        let coeffs = [0.9, 0.4, -0.6];
        for x in [-2.3, -0.7, 0.0, 0.4, 1.9] {
            assert_eq!(Version::D.denominator(&coeffs, x), Version::B.denominator(&coeffs, x));
        }
    }

    #[test]
    fn denominator_dx_matches_central_difference() {
        let coeffs = [0.9, 0.4, -0.6];
        let h = 0.005;

        for version in Version::ALL {
            for x in [-1.7, -0.6, 0.3, 1.2] {
                let expected = (version.denominator(&coeffs, x + h)
                    - version.denominator(&coeffs, x - h))
                    / (2.0 * h);
                assert_close(version.denominator_dx(&coeffs, x), expected, 0.01);
            }
        }
    }

    #[test]
    fn backprop_denominator_matches_central_difference() {
        let coeffs = [0.9, 0.4, -0.6];
        let h = 0.005;

        for version in Version::ALL {
            for x in [-1.7, -0.6, 0.3, 1.2] {
                let mut grads = [0.0; 3];
                version.backprop_denominator(&coeffs, x, 1.0, None, &mut grads);

                for j in 0..coeffs.len() {
                    let mut up = coeffs;
                    let mut down = coeffs;
                    up[j] += h;
                    down[j] -= h;
                    let expected =
                        (version.denominator(&up, x) - version.denominator(&down, x)) / (2.0 * h);
                    assert_close(grads[j], expected, 0.01);
                }
            }
        }
    }

    #[test]
    fn backprop_polynomial_accumulates_powers() {
        let mut grads = [0.0; 3];
        backprop_polynomial(2.0, 1.5, &mut grads);
        assert_eq!(grads, [1.5, 3.0, 6.0]);

        backprop_polynomial(1.0, 0.5, &mut grads);
        assert_eq!(grads, [2.0, 3.5, 6.5]);
    }
}
