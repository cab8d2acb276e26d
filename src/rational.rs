use std::fmt;

use crate::error::{RatError, Result};
use crate::format::{format_number, polynomial_latex, polynomial_text, stacked_fraction};
use crate::plot::{PlotData, PLOT_CLIP_THRESHOLD};
use crate::polynomial::{rational_to_f64, Polynomial, Rational};
use crate::roots::{real_roots_with_tolerance, roots_coincide, RealRoot, ROOT_TOLERANCE};
use num_traits::{Signed, Zero};
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hole {
    pub x: f64,
    pub y: f64,
}

/// Where `f(x)` goes as `x` grows without bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EndBehavior {
    ApproachesZero,
    Approaches(f64),
    PositiveInfinity,
    NegativeInfinity,
}

impl fmt::Display for EndBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndBehavior::ApproachesZero => write!(f, "approaches 0"),
            EndBehavior::Approaches(h) => write!(f, "approaches {}", format_number(*h)),
            EndBehavior::PositiveInfinity => write!(f, "approaches +infinity"),
            EndBehavior::NegativeInfinity => write!(f, "approaches -infinity"),
        }
    }
}

/// A ratio of two polynomials, kept both as given and with the common factor
/// cancelled.
///
/// Rendering always uses the polynomials as given; every graph query works
/// on the cancelled pair.
#[derive(Clone, Debug)]
pub struct RationalFunction {
    numerator: Polynomial,
    denominator: Polynomial,
    common: Polynomial,
    simplified_num: Polynomial,
    simplified_den: Polynomial,
    tolerance: f64,
}

impl RationalFunction {
    /// Fails with [`RatError::InvalidFunction`] when the denominator is the
    /// zero polynomial.
    #[instrument(level = "trace", skip_all)]
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Result<Self> {
        if denominator.is_zero() {
            return Err(RatError::InvalidFunction(
                "denominator is the zero polynomial".to_string(),
            ));
        }

        let common = Polynomial::gcd(&numerator, &denominator);
        let (simplified_num, simplified_den) = if common.is_constant() {
            (numerator.clone(), denominator.clone())
        } else {
            let num = numerator.div_exact(&common).unwrap_or_else(|| numerator.clone());
            let den = denominator.div_exact(&common).unwrap_or_else(|| denominator.clone());
            (num, den)
        };
        debug!(
            common_degree = ?common.degree(),
            num_degree = ?simplified_num.degree(),
            den_degree = ?simplified_den.degree(),
            "simplified rational function"
        );

        Ok(RationalFunction {
            numerator,
            denominator,
            common,
            simplified_num,
            simplified_den,
            tolerance: ROOT_TOLERANCE,
        })
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn from_integers(numerator: &[i64], denominator: &[i64]) -> Result<Self> {
        RationalFunction::new(
            Polynomial::from_integers(numerator),
            Polynomial::from_integers(denominator),
        )
    }

    pub fn from_coeffs(numerator: &[f64], denominator: &[f64]) -> Result<Self> {
        if denominator.is_empty() {
            return Err(RatError::InvalidFunction(
                "denominator has no coefficients".to_string(),
            ));
        }
        RationalFunction::new(
            Polynomial::from_f64_coeffs(numerator)?,
            Polynomial::from_f64_coeffs(denominator)?,
        )
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn simplified_numerator(&self) -> &Polynomial {
        &self.simplified_num
    }

    pub fn simplified_denominator(&self) -> &Polynomial {
        &self.simplified_den
    }

    /// Monic GCD of the numerator and denominator as given.
    pub fn common_factor(&self) -> &Polynomial {
        &self.common
    }

    pub fn simplified(&self) -> RationalFunction {
        RationalFunction {
            numerator: self.simplified_num.clone(),
            denominator: self.simplified_den.clone(),
            common: Polynomial::one(),
            simplified_num: self.simplified_num.clone(),
            simplified_den: self.simplified_den.clone(),
            tolerance: self.tolerance,
        }
    }

    pub fn vertical_asymptotes(&self) -> Vec<f64> {
        self.root_values(&self.simplified_den)
    }

    pub fn horizontal_asymptote(&self) -> Option<f64> {
        let Some(num_degree) = self.simplified_num.degree() else {
            return Some(0.0);
        };
        let den_degree = self.simplified_den.degree().unwrap_or(0);
        if num_degree < den_degree {
            Some(0.0)
        } else if num_degree == den_degree {
            Some(rational_to_f64(&self.leading_ratio()))
        } else {
            None
        }
    }

    /// Removable discontinuities, ascending by `x`.
    ///
    /// A common root where the cancelled form is still singular (the factor
    /// had higher multiplicity in the denominator) is a pole, not a hole, and
    /// is left out.
    pub fn holes(&self) -> Vec<Hole> {
        if self.common.is_constant() {
            return Vec::new();
        }
        let asymptotes = self.vertical_asymptotes();
        let mut holes = Vec::new();
        for root in real_roots_with_tolerance(&self.common, self.tolerance) {
            let x = root.value();
            if asymptotes
                .iter()
                .any(|&va| roots_coincide(va, x, self.tolerance))
            {
                debug!(x, "common root is still a pole after cancellation; skipping hole");
                continue;
            }
            match self.value_at_root(&root) {
                Ok(y) => holes.push(Hole { x, y }),
                Err(err) => debug!(x, %err, "skipping hole"),
            }
        }
        holes
    }

    pub fn x_intercepts(&self) -> Vec<f64> {
        self.root_values(&self.simplified_num)
    }

    pub fn y_intercept(&self) -> Option<f64> {
        self.evaluate_exact(&Rational::zero())
            .ok()
            .map(|y| rational_to_f64(&y))
    }

    pub fn end_behavior(&self) -> EndBehavior {
        match self.horizontal_asymptote() {
            Some(h) if h == 0.0 => EndBehavior::ApproachesZero,
            Some(h) => EndBehavior::Approaches(h),
            None if self.leading_ratio().is_positive() => EndBehavior::PositiveInfinity,
            None => EndBehavior::NegativeInfinity,
        }
    }

    /// Value of the cancelled form at `x`. At a pole the result is an
    /// infinity carrying the numerator's sign.
    pub fn evaluate(&self, x: f64) -> f64 {
        let den = self.simplified_den.evaluate_f64(x);
        let num = self.simplified_num.evaluate_f64(x);
        if den == 0.0 {
            return if num < 0.0 {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        num / den
    }

    pub fn evaluate_exact(&self, x: &Rational) -> Result<Rational> {
        let den = self.simplified_den.evaluate(x);
        if den.is_zero() {
            return Err(RatError::DegenerateEvaluation { x: x.to_string() });
        }
        Ok(self.simplified_num.evaluate(x) / den)
    }

    /// Evenly spaced samples over `x_range` plus the feature coordinates that
    /// fall inside it. Samples with `|y|` above the clip threshold become
    /// signed infinities so a renderer breaks the curve there.
    pub fn sample_for_plot(&self, x_range: (f64, f64), point_count: usize) -> PlotData {
        PlotData::sample(self, x_range, point_count, PLOT_CLIP_THRESHOLD)
    }

    /// `f(x) = (numerator) / (denominator)` for the function as given.
    pub fn to_display_string(&self) -> String {
        format!(
            "f(x) = ({}) / ({})",
            polynomial_text(&self.numerator),
            polynomial_text(&self.denominator)
        )
    }

    pub fn to_latex(&self) -> String {
        format!(
            "f(x) = \\frac{{{}}}{{{}}}",
            polynomial_latex(&self.numerator),
            polynomial_latex(&self.denominator)
        )
    }

    pub fn to_formatted_expression(&self) -> String {
        stacked_fraction(
            "f(x) = ",
            &polynomial_text(&self.numerator),
            &polynomial_text(&self.denominator),
        )
    }

    fn root_values(&self, poly: &Polynomial) -> Vec<f64> {
        real_roots_with_tolerance(poly, self.tolerance)
            .iter()
            .map(RealRoot::value)
            .collect()
    }

    fn leading_ratio(&self) -> Rational {
        self.simplified_num.leading_coeff() / self.simplified_den.leading_coeff()
    }

    fn value_at_root(&self, root: &RealRoot) -> Result<f64> {
        match root {
            RealRoot::Rational(r) => self.evaluate_exact(r).map(|y| rational_to_f64(&y)),
            RealRoot::Irrational(x) => {
                let den = self.simplified_den.evaluate_f64(*x);
                if den.abs() <= self.tolerance {
                    return Err(RatError::DegenerateEvaluation { x: format_number(*x) });
                }
                Ok(self.simplified_num.evaluate_f64(*x) / den)
            }
        }
    }
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
