use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::polynomial::{rational_to_f64, Polynomial, Rational};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::trace;

/// Roots closer than this (relative to their magnitude) are the same root.
pub const ROOT_TOLERANCE: f64 = 1e-9;

/// Coefficients wider than this are not searched for rational roots.
const MAX_RATIONAL_SEARCH_BITS: u64 = 40;

/// Beyond this many `±p/q` candidates the closed forms take over.
const MAX_RATIONAL_CANDIDATES: usize = 512;

const BISECTION_STEPS: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum RealRoot {
    Rational(Rational),
    Irrational(f64),
}

impl RealRoot {
    pub fn value(&self) -> f64 {
        match self {
            RealRoot::Rational(r) => rational_to_f64(r),
            RealRoot::Irrational(v) => *v,
        }
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            RealRoot::Rational(r) => Some(r),
            RealRoot::Irrational(_) => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, RealRoot::Rational(_))
    }
}

/// Distinct real roots of `poly`, ascending.
pub fn real_roots(poly: &Polynomial) -> Vec<RealRoot> {
    real_roots_with_tolerance(poly, ROOT_TOLERANCE)
}

pub fn real_roots_with_tolerance(poly: &Polynomial, tolerance: f64) -> Vec<RealRoot> {
    if poly.is_constant() {
        return Vec::new();
    }

    let mut current = poly.square_free_part().primitive_part();
    let mut roots = Vec::new();

    while let Some(root) = find_rational_root(&current) {
        let divider = Polynomial::from_coeffs(&[Rational::one(), -root.clone()]);
        roots.push(RealRoot::Rational(root));
        match current.div_exact(&divider) {
            Some(next) => current = next.primitive_part(),
            None => break,
        }
    }

    let remainder = match current.degree() {
        None | Some(0) => Vec::new(),
        Some(1) => current.linear_root().map(|r| rational_to_f64(&r)).into_iter().collect(),
        Some(2) => quadratic_roots(&current),
        Some(3) => cubic_roots(&current),
        Some(degree) => {
            trace!(degree, "bracketing roots of high degree remainder");
            bracketed_roots(&current, tolerance)
        }
    };
    roots.extend(remainder.into_iter().map(RealRoot::Irrational));

    dedup_roots(roots, tolerance)
}

pub fn real_root_values(poly: &Polynomial) -> Vec<f64> {
    real_roots(poly).iter().map(RealRoot::value).collect()
}

/// True when `a` and `b` are the same root up to `tolerance`.
pub fn roots_coincide(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

impl Polynomial {
    pub fn linear_root(&self) -> Option<Rational> {
        if self.degree()? != 1 {
            return None;
        }
        let a = self.coeff(1);
        let b = self.coeff(0);
        Some(-b / a)
    }
}

fn find_rational_root(poly: &Polynomial) -> Option<Rational> {
    match poly.degree()? {
        0 => return None,
        1 => return poly.linear_root(),
        2 => return exact_quadratic_root(poly),
        _ => {}
    }

    let int_coeffs = integer_coeffs(poly);
    let leading = int_coeffs.last()?.clone();
    let constant = int_coeffs.first()?.clone();
    if constant.is_zero() {
        return Some(Rational::zero());
    }
    if leading.bits() > MAX_RATIONAL_SEARCH_BITS || constant.bits() > MAX_RATIONAL_SEARCH_BITS {
        trace!("coefficients too wide for rational root search");
        return None;
    }

    let p_candidates = divisors(&constant)?;
    let q_candidates = divisors(&leading)?;
    if p_candidates.len() * q_candidates.len() * 2 > MAX_RATIONAL_CANDIDATES {
        trace!(
            p = p_candidates.len(),
            q = q_candidates.len(),
            "too many rational root candidates"
        );
        return None;
    }

    for p in &p_candidates {
        for q in &q_candidates {
            let candidate = Rational::new(p.clone(), q.clone());
            if poly.evaluate(&candidate).is_zero() {
                return Some(candidate);
            }
            let negated = -candidate;
            if poly.evaluate(&negated).is_zero() {
                return Some(negated);
            }
        }
    }
    None
}

/// The smaller root of a quadratic whose discriminant is the square of a
/// rational.
fn exact_quadratic_root(poly: &Polynomial) -> Option<Rational> {
    let a = poly.coeff(2);
    let b = poly.coeff(1);
    let c = poly.coeff(0);
    let four = Rational::from_integer(BigInt::from(4));
    let discriminant = &b * &b - four * &a * &c;
    if discriminant.is_negative() {
        return None;
    }
    let root = rational_sqrt(&discriminant)?;
    let two_a = &a + &a;
    let (lo, hi) = ((-&b - &root) / &two_a, (-&b + root) / two_a);
    Some(if lo <= hi { lo } else { hi })
}

fn rational_sqrt(r: &Rational) -> Option<Rational> {
    let num = r.numer().sqrt();
    let den = r.denom().sqrt();
    if &(&num * &num) == r.numer() && &(&den * &den) == r.denom() {
        Some(Rational::new(num, den))
    } else {
        None
    }
}

fn integer_coeffs(poly: &Polynomial) -> Vec<BigInt> {
    let mut lcm = BigInt::one();
    for (_, coeff) in poly.coeff_entries() {
        lcm = lcm.lcm(coeff.denom());
    }
    let degree = poly.degree().unwrap_or(0);
    let mut coeffs = vec![BigInt::zero(); degree + 1];
    for (exp, coeff) in poly.coeff_entries() {
        let scaled = coeff * Rational::from_integer(lcm.clone());
        coeffs[exp] = scaled.numer().clone();
    }
    coeffs
}

fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let n = n.abs().to_u64()?;
    if n == 0 {
        return None;
    }
    let mut result = Vec::new();
    let mut d = 1u64;
    while d * d <= n {
        if n % d == 0 {
            result.push(d);
            if d != n / d {
                result.push(n / d);
            }
        }
        d += 1;
    }
    result.sort_unstable();
    Some(result.into_iter().map(BigInt::from).collect())
}

fn quadratic_roots(poly: &Polynomial) -> Vec<f64> {
    let a = poly.coeff(2);
    let b = poly.coeff(1);
    let c = poly.coeff(0);
    let four = Rational::from_integer(BigInt::from(4));
    let discriminant = &b * &b - four * &a * &c;
    if discriminant.is_negative() {
        return Vec::new();
    }

    let (a, b, c) = (rational_to_f64(&a), rational_to_f64(&b), rational_to_f64(&c));
    let sqrt_d = rational_to_f64(&discriminant).sqrt();
    if discriminant.is_zero() {
        return vec![-b / (2.0 * a)];
    }
    let q = -0.5 * (b + b.signum() * sqrt_d);
    if q == 0.0 {
        let r = (-c / a).sqrt();
        return vec![-r, r];
    }
    let mut roots = vec![q / a, c / q];
    roots.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
    roots
}

/// Real roots of a cubic, via the depressed form `t^3 + p t + q`.
fn cubic_roots(poly: &Polynomial) -> Vec<f64> {
    let monic = poly.monic();
    let b = monic.coeff(2);
    let c = monic.coeff(1);
    let d = monic.coeff(0);

    let three = Rational::from_integer(BigInt::from(3));
    let shift = &b / &three;
    let p = &c - &b * &b / &three;
    let q = Rational::new(BigInt::from(2), BigInt::from(27)) * &b * &b * &b - &b * &c / &three + &d;
    let discriminant = -(Rational::from_integer(BigInt::from(4)) * &p * &p * &p
        + Rational::from_integer(BigInt::from(27)) * &q * &q);

    let shift = rational_to_f64(&shift);
    let pf = rational_to_f64(&p);
    let qf = rational_to_f64(&q);

    let depressed: Vec<f64> = if discriminant.is_positive() {
        let m = 2.0 * (-pf / 3.0).sqrt();
        let arg = (3.0 * qf / (2.0 * pf) * (-3.0 / pf).sqrt()).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        (0..3)
            .map(|k| m * (theta - 2.0 * PI * k as f64 / 3.0).cos())
            .collect()
    } else if discriminant.is_zero() {
        if p.is_zero() {
            vec![0.0]
        } else {
            vec![3.0 * qf / pf, -3.0 * qf / (2.0 * pf)]
        }
    } else if p.is_zero() {
        vec![(-qf).cbrt()]
    } else if p.is_negative() {
        let m = (-pf / 3.0).sqrt();
        let arg = -3.0 * qf.abs() / (2.0 * pf) * (-3.0 / pf).sqrt();
        vec![-2.0 * qf.signum() * m * (arg.acosh() / 3.0).cosh()]
    } else {
        let m = (pf / 3.0).sqrt();
        let arg = 3.0 * qf / (2.0 * pf) * (3.0 / pf).sqrt();
        vec![-2.0 * m * (arg.asinh() / 3.0).sinh()]
    };

    depressed
        .into_iter()
        .map(|t| polish(poly, t - shift))
        .collect()
}

/// A few Newton steps to recover precision lost in the closed forms.
fn polish(poly: &Polynomial, mut x: f64) -> f64 {
    let derivative = poly.derivative();
    for _ in 0..3 {
        let fx = poly.evaluate_f64(x);
        let dfx = derivative.evaluate_f64(x);
        if fx == 0.0 || dfx == 0.0 || !dfx.is_finite() {
            break;
        }
        let next = x - fx / dfx;
        if !next.is_finite() || poly.evaluate_f64(next).abs() >= fx.abs() {
            break;
        }
        x = next;
    }
    x
}

/// Roots of a square-free polynomial, bracketed between consecutive real
/// roots of its derivative and refined by bisection.
fn bracketed_roots(poly: &Polynomial, tolerance: f64) -> Vec<f64> {
    let bound = cauchy_bound(poly);
    let mut fences = vec![-bound];
    fences.extend(real_root_values(&poly.derivative()));
    fences.push(bound);

    let mut roots = Vec::new();
    for window in fences.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        let (f_lo, f_hi) = (poly.evaluate_f64(lo), poly.evaluate_f64(hi));
        if f_lo == 0.0 {
            roots.push(lo);
        } else if f_lo.signum() != f_hi.signum() && f_hi != 0.0 {
            roots.push(bisect(poly, lo, hi, tolerance));
        }
    }
    if poly.evaluate_f64(bound) == 0.0 {
        roots.push(bound);
    }
    roots
}

fn bisect(poly: &Polynomial, mut lo: f64, mut hi: f64, tolerance: f64) -> f64 {
    let lo_sign = poly.evaluate_f64(lo).signum();
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if (hi - lo).abs() <= tolerance * 1e-3 * mid.abs().max(1.0) {
            return mid;
        }
        let f_mid = poly.evaluate_f64(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

fn cauchy_bound(poly: &Polynomial) -> f64 {
    let lc = rational_to_f64(&poly.leading_coeff()).abs();
    let max_ratio = poly
        .coeff_entries()
        .rev()
        .skip(1)
        .map(|(_, c)| rational_to_f64(c).abs() / lc)
        .fold(0.0, f64::max);
    1.0 + max_ratio
}

/// Sorts and collapses roots that coincide within `tolerance`; an exact root
/// wins over a floating point one at the same place.
fn dedup_roots(mut roots: Vec<RealRoot>, tolerance: f64) -> Vec<RealRoot> {
    roots.sort_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal));
    let mut result: Vec<RealRoot> = Vec::with_capacity(roots.len());
    for root in roots {
        match result.last_mut() {
            Some(last) if roots_coincide(last.value(), root.value(), tolerance) => {
                if !last.is_exact() && root.is_exact() {
                    *last = root;
                }
            }
            _ => result.push(root),
        }
    }
    result
}
