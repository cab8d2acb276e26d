use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{RatError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

pub type Rational = BigRational;

/// A polynomial in one variable with exact rational coefficients.
///
/// Coefficients are stored sparsely (exponent to nonzero coefficient), so the
/// zero polynomial is the empty map and has no degree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Polynomial::from_constant(Rational::one())
    }

    pub fn x() -> Self {
        Polynomial::monomial(Rational::one(), 1)
    }

    pub fn from_constant(c: Rational) -> Self {
        Polynomial::monomial(c, 0)
    }

    pub fn monomial(c: Rational, exp: usize) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(exp, c);
        }
        Polynomial { coeffs }
    }

    /// Builds a polynomial from coefficients ordered highest degree first.
    pub fn from_coeffs(coeffs: &[Rational]) -> Self {
        let top = coeffs.len().saturating_sub(1);
        let mut map = BTreeMap::new();
        for (i, c) in coeffs.iter().enumerate() {
            if !c.is_zero() {
                map.insert(top - i, c.clone());
            }
        }
        Polynomial { coeffs: map }
    }

    pub fn from_integers(coeffs: &[i64]) -> Self {
        let converted: Vec<Rational> = coeffs
            .iter()
            .map(|&c| Rational::from_integer(BigInt::from(c)))
            .collect();
        Polynomial::from_coeffs(&converted)
    }

    /// Floating point coefficients, highest degree first. Each value is taken
    /// as the nearest small-denominator fraction when one reproduces it.
    pub fn from_f64_coeffs(coeffs: &[f64]) -> Result<Self> {
        let converted = coeffs
            .iter()
            .map(|&c| {
                rational_from_f64(c).ok_or_else(|| {
                    RatError::InvalidFunction(format!("coefficient {c} is not a finite number"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Polynomial::from_coeffs(&converted))
    }

    /// Coefficients ordered highest degree first. The zero polynomial yields `[0]`.
    pub fn coefficients(&self) -> Vec<Rational> {
        match self.degree() {
            None => vec![Rational::zero()],
            Some(deg) => (0..=deg).rev().map(|e| self.coeff(e)).collect(),
        }
    }

    pub fn coefficients_f64(&self) -> Vec<f64> {
        self.coefficients().iter().map(rational_to_f64).collect()
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().cloned()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.degree()
            .and_then(|d| self.coeffs.get(&d).cloned())
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs.get(&0).map(|c| c.is_one()).unwrap_or(false)
    }

    pub fn is_constant(&self) -> bool {
        self.degree().map_or(true, |d| d == 0)
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn coeff_entries(&self) -> impl DoubleEndedIterator<Item = (usize, &Rational)> + '_ {
        self.coeffs.iter().map(|(e, c)| (*e, c))
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * &base;
            }
            base = base.clone() * &base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Polynomial::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|(exp, coeff)| (*exp, coeff * k))
            .collect();
        Polynomial { coeffs }
    }

    pub fn add(&self, other: &Self) -> Self {
        self.clone() + other
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.clone() - other
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.clone() * other
    }

    pub fn derivative(&self) -> Self {
        let mut coeffs = BTreeMap::new();
        for (exp, coeff) in &self.coeffs {
            if *exp == 0 {
                continue;
            }
            let factor = Rational::from_integer(BigInt::from(*exp));
            coeffs.insert(exp - 1, coeff * factor);
        }
        Polynomial { coeffs }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&lc.recip())
    }

    /// Exact value at `x` by Horner's rule.
    pub fn evaluate(&self, x: &Rational) -> Rational {
        let Some(deg) = self.degree() else {
            return Rational::zero();
        };
        let mut acc = Rational::zero();
        for exp in (0..=deg).rev() {
            acc *= x;
            if let Some(c) = self.coeffs.get(&exp) {
                acc += c;
            }
        }
        acc
    }

    pub fn evaluate_f64(&self, x: f64) -> f64 {
        let Some(deg) = self.degree() else {
            return 0.0;
        };
        let mut acc = 0.0;
        for exp in (0..=deg).rev() {
            acc *= x;
            if let Some(c) = self.coeffs.get(&exp) {
                acc += rational_to_f64(c);
            }
        }
        acc
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Polynomial::zero(), self.clone());
        };
        let divisor_lc = divisor.leading_coeff();
        let mut remainder = self.clone();
        let mut quotient = Polynomial::zero();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let coeff = remainder.leading_coeff() / &divisor_lc;
            let term = Polynomial::monomial(coeff, r_deg - divisor_degree);
            remainder = remainder - &(term.clone() * divisor);
            quotient = quotient + term;
        }

        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        if r.is_zero() && !divisor.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    /// Monic greatest common divisor by Euclid's algorithm. Coprime inputs
    /// give the constant `1`; `gcd(0, 0)` is `0`.
    pub fn gcd(a: &Polynomial, b: &Polynomial) -> Polynomial {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// `self / gcd(self, self')`: same roots, each with multiplicity one.
    pub fn square_free_part(&self) -> Self {
        if self.is_constant() {
            return self.clone();
        }
        let g = Polynomial::gcd(self, &self.derivative());
        self.div_exact(&g).unwrap_or_else(|| self.clone())
    }

    pub fn content(&self) -> Rational {
        self.content_and_primitive_part().0
    }

    pub fn primitive_part(&self) -> Self {
        self.content_and_primitive_part().1
    }

    /// Splits off the rational content so the remaining part has coprime
    /// integer coefficients and a positive leading coefficient.
    pub fn content_and_primitive_part(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Zero::zero(), Polynomial::zero());
        }
        let mut lcm = BigInt::one();
        for coeff in self.coeffs.values() {
            lcm = lcm.lcm(coeff.denom());
        }

        let mut gcd_num = BigInt::zero();
        let mut scaled_nums = BTreeMap::new();
        for (exp, coeff) in &self.coeffs {
            let scaled = coeff * Rational::from_integer(lcm.clone());
            let num = scaled.numer().clone();
            gcd_num = gcd_num.gcd(&num);
            scaled_nums.insert(*exp, num);
        }

        let coeffs = scaled_nums
            .into_iter()
            .map(|(exp, num)| (exp, Rational::from_integer(num / &gcd_num)))
            .collect();

        let mut primitive = Polynomial { coeffs };
        let mut content = Rational::new(gcd_num, lcm);
        if primitive.leading_coeff().is_negative() {
            primitive = -primitive;
            content = -content;
        }
        (content, primitive)
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Polynomial) -> Polynomial {
        self + &rhs
    }
}

impl std::ops::Add<&Polynomial> for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in &rhs.coeffs {
            accumulate(&mut coeffs, *exp, coeff.clone());
        }
        Polynomial { coeffs }
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Polynomial) -> Polynomial {
        self - &rhs
    }
}

impl std::ops::Sub<&Polynomial> for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in &rhs.coeffs {
            accumulate(&mut coeffs, *exp, -coeff);
        }
        Polynomial { coeffs }
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Polynomial) -> Polynomial {
        self * &rhs
    }
}

impl std::ops::Mul<&Polynomial> for Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut coeffs = BTreeMap::new();
        for (exp_a, coeff_a) in &self.coeffs {
            for (exp_b, coeff_b) in &rhs.coeffs {
                accumulate(&mut coeffs, exp_a + exp_b, coeff_a * coeff_b);
            }
        }
        Polynomial { coeffs }
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        let coeffs = self
            .coeffs
            .into_iter()
            .map(|(exp, coeff)| (exp, -coeff))
            .collect();
        Polynomial { coeffs }
    }
}

fn accumulate(coeffs: &mut BTreeMap<usize, Rational>, exp: usize, value: Rational) {
    if value.is_zero() {
        return;
    }
    match coeffs.entry(exp) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) => {
            let updated = entry.get() + value;
            if updated.is_zero() {
                entry.remove();
            } else {
                *entry.get_mut() = updated;
            }
        }
    }
}

pub(crate) fn rational_to_f64(r: &Rational) -> f64 {
    r.to_f64().unwrap_or(f64::NAN)
}

/// Closest fraction with a small denominator that reproduces `val`, falling
/// back to the exact binary value.
pub(crate) fn rational_from_f64(val: f64) -> Option<Rational> {
    if !val.is_finite() {
        return None;
    }
    let max_den: i64 = 1000;
    if val.abs() < 1e12 {
        for den in 1..=max_den {
            let num = (val * den as f64).round();
            let approx = Rational::new(BigInt::from(num as i64), BigInt::from(den));
            if rational_to_f64(&approx) == val {
                return Some(approx);
            }
        }
    }
    Rational::from_float(val)
}
