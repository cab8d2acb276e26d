use crate::polynomial::Polynomial;
use num_rational::BigRational;
use num_traits::{One, Signed};

/// Conventional plain-text form, highest degree first: `2x^2 - 3x + 1`.
pub fn polynomial_text(poly: &Polynomial) -> String {
    render_terms(poly, |coeff, exp| {
        let mut term = if exp == 0 {
            show_rational(coeff)
        } else if coeff.is_one() {
            String::new()
        } else if coeff.is_integer() {
            coeff.numer().to_string()
        } else {
            format!("({})", show_rational(coeff))
        };
        match exp {
            0 => {}
            1 => term.push('x'),
            _ => term.push_str(&format!("x^{exp}")),
        }
        term
    })
}

pub fn polynomial_latex(poly: &Polynomial) -> String {
    render_terms(poly, |coeff, exp| {
        let mut term = if coeff.is_integer() {
            if exp > 0 && coeff.is_one() {
                String::new()
            } else {
                coeff.numer().to_string()
            }
        } else {
            format!("\\frac{{{}}}{{{}}}", coeff.numer(), coeff.denom())
        };
        match exp {
            0 => {}
            1 => term.push('x'),
            _ => term.push_str(&format!("x^{{{exp}}}")),
        }
        term
    })
}

/// Numerator over a rule over the denominator, centred after `prefix`.
pub fn stacked_fraction(prefix: &str, numerator: &str, denominator: &str) -> String {
    let width = numerator.chars().count().max(denominator.chars().count()) + 2;
    let indent = " ".repeat(prefix.chars().count());
    format!(
        "{indent}{}\n{prefix}{}\n{indent}{}",
        centre(numerator, width).trim_end(),
        "-".repeat(width),
        centre(denominator, width).trim_end()
    )
}

/// Short decimal rendering used in answers, at most four decimals. Values
/// from `1e15` up switch to exponent form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "undefined".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "infinity" } else { "-infinity" }.to_string();
    }
    if value.abs() >= 1e15 {
        return format!("{value:e}");
    }
    let rounded = (value * 1e4).round() / 1e4;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{rounded:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn render_terms(poly: &Polynomial, term: impl Fn(&BigRational, usize) -> String) -> String {
    if poly.is_zero() {
        return "0".to_string();
    }
    let mut out = String::new();
    for (exp, coeff) in poly.coeff_entries().rev() {
        let body = term(&coeff.abs(), exp);
        match (out.is_empty(), coeff.is_negative()) {
            (true, true) => {
                out.push('-');
                out.push_str(&body);
            }
            (true, false) => out.push_str(&body),
            (false, true) => {
                out.push_str(" - ");
                out.push_str(&body);
            }
            (false, false) => {
                out.push_str(" + ");
                out.push_str(&body);
            }
        }
    }
    out
}

fn centre(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(left))
}

fn show_rational(r: &BigRational) -> String {
    if r.is_integer() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.0 / 3.0), "0.6667");
        assert_eq!(format_number(f64::NEG_INFINITY), "-infinity");
    }

    #[test]
    fn huge_numbers_use_exponent_form() {
        assert_eq!(format_number(1e305), "1e305");
        assert_eq!(format_number(-2.5e20), "-2.5e20");
        assert_eq!(format_number(123456789012345.0), "123456789012345");
    }

    #[test]
    fn stacked_fraction_centres_shorter_side() {
        let text = stacked_fraction("f(x) = ", "x^2 - 1", "x - 1");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "        x^2 - 1");
        assert_eq!(lines[1], "f(x) = ---------");
        assert_eq!(lines[2], "         x - 1");
    }
}
