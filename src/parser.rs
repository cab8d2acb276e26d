use crate::error::{RatError, Result};
use crate::polynomial::{Polynomial, Rational};
use crate::rational::RationalFunction;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, verify};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;
use num_bigint::{BigInt, ParseBigIntError};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Exponents beyond this are rejected rather than expanded.
const MAX_EXPONENT: i32 = 64;

/// Parses a rational function in `x`. A leading `f(x) =` or `y =` is allowed.
pub fn parse_function(input: &str) -> Result<RationalFunction> {
    parse_function_in(input, "x")
}

pub fn parse_function_in(input: &str, var: &str) -> Result<RationalFunction> {
    let fraction = parse_fraction(input, var)?;
    RationalFunction::new(fraction.num, fraction.den)
}

/// Parses a polynomial in `x`; division is only allowed by constants.
pub fn parse_polynomial(input: &str) -> Result<Polynomial> {
    let fraction = parse_fraction(input, "x")?;
    match fraction.den.degree() {
        Some(0) => Ok(fraction.num.scale(&fraction.den.leading_coeff().recip())),
        _ => Err(RatError::Parse(format!("`{input}` is not a polynomial"))),
    }
}

fn parse_fraction<'a>(input: &'a str, var: &str) -> Result<Fraction> {
    let grammar = Grammar { var };
    let result = all_consuming(preceded(
        opt(|i: &'a str| grammar.lhs(i)),
        |i: &'a str| grammar.add_sub(i),
    ))(input);
    match result {
        Ok((_, fraction)) if fraction.divides_by_zero => Err(RatError::InvalidFunction(
            format!("`{input}` divides by zero"),
        )),
        Ok((_, fraction)) => Ok(fraction),
        Err(e) => Err(RatError::Parse(format!("{e:?}"))),
    }
}

/// `num / den`, never reduced. `divides_by_zero` records a zero divisor
/// anywhere inside.
#[derive(Clone, Debug)]
struct Fraction {
    num: Polynomial,
    den: Polynomial,
    divides_by_zero: bool,
}

impl Fraction {
    fn constant(c: Rational) -> Self {
        Fraction::from_poly(Polynomial::from_constant(c))
    }

    fn from_poly(num: Polynomial) -> Self {
        Fraction {
            num,
            den: Polynomial::one(),
            divides_by_zero: false,
        }
    }

    /// `(1/2)` is the constant one half, not a fraction over 2. Only
    /// parenthesised groups are folded so `x / 2` keeps its denominator.
    fn absorb_constant_den(self) -> Self {
        match self.den.degree() {
            Some(0) if !self.den.is_one() => Fraction {
                num: self.num.scale(&self.den.leading_coeff().recip()),
                den: Polynomial::one(),
                divides_by_zero: self.divides_by_zero,
            },
            _ => self,
        }
    }

    fn add(self, rhs: Fraction) -> Self {
        let divides_by_zero = self.divides_by_zero || rhs.divides_by_zero;
        if self.den == rhs.den {
            return Fraction {
                num: self.num + rhs.num,
                den: self.den,
                divides_by_zero,
            };
        }
        Fraction {
            num: self.num * &rhs.den + rhs.num * &self.den,
            den: self.den * rhs.den,
            divides_by_zero,
        }
    }

    fn sub(self, rhs: Fraction) -> Self {
        self.add(rhs.neg())
    }

    fn mul(self, rhs: Fraction) -> Self {
        Fraction {
            num: self.num * rhs.num,
            den: self.den * rhs.den,
            divides_by_zero: self.divides_by_zero || rhs.divides_by_zero,
        }
    }

    fn div(self, rhs: Fraction) -> Self {
        Fraction {
            divides_by_zero: self.divides_by_zero || rhs.divides_by_zero || rhs.num.is_zero(),
            num: self.num * rhs.den,
            den: self.den * rhs.num,
        }
    }

    fn neg(self) -> Self {
        Fraction {
            num: -self.num,
            ..self
        }
    }

    fn powi(self, exp: i32) -> Self {
        let n = exp.unsigned_abs() as usize;
        if exp >= 0 {
            Fraction {
                num: self.num.pow(n),
                den: self.den.pow(n),
                divides_by_zero: self.divides_by_zero,
            }
        } else {
            Fraction {
                divides_by_zero: self.divides_by_zero || self.num.is_zero(),
                num: self.den.pow(n),
                den: self.num.pow(n),
            }
        }
    }
}

struct Grammar<'v> {
    var: &'v str,
}

impl<'v> Grammar<'v> {
    /// `f(x) =` or `y =`.
    fn lhs<'a>(&self, input: &'a str) -> ParseResult<'a, &'a str> {
        terminated(
            ws(alt((
                recognize(tuple((alpha1, ws(char('(')), alpha1, ws(char(')'))))),
                alpha1,
            ))),
            char('='),
        )(input)
    }

    fn add_sub<'a>(&self, input: &'a str) -> ParseResult<'a, Fraction> {
        let (rest, init) = self.term(input)?;
        fold_many0(
            pair(ws(alt((char('+'), char('-')))), |i: &'a str| self.term(i)),
            move || init.clone(),
            |acc, (op, rhs)| match op {
                '+' => acc.add(rhs),
                _ => acc.sub(rhs),
            },
        )(rest)
    }

    /// Products and quotients, including juxtaposition such as `2x` or
    /// `(x + 1)(x - 1)`.
    fn term<'a>(&self, input: &'a str) -> ParseResult<'a, Fraction> {
        let (rest, init) = self.unary(input)?;
        fold_many0(
            alt((
                pair(ws(alt((char('*'), char('/')))), |i: &'a str| self.unary(i)),
                map(|i: &'a str| self.power(i), |f| ('*', f)),
            )),
            move || init.clone(),
            |acc, (op, rhs)| match op {
                '/' => acc.div(rhs),
                _ => acc.mul(rhs),
            },
        )(rest)
    }

    fn unary<'a>(&self, input: &'a str) -> ParseResult<'a, Fraction> {
        alt((
            map(preceded(ws(char('-')), |i: &'a str| self.unary(i)), Fraction::neg),
            preceded(ws(char('+')), |i: &'a str| self.unary(i)),
            |i: &'a str| self.power(i),
        ))(input)
    }

    fn power<'a>(&self, input: &'a str) -> ParseResult<'a, Fraction> {
        let (rest, base) = self.primary(input)?;
        let (rest, exp) = opt(preceded(ws(alt((tag("**"), tag("^")))), exponent))(rest)?;
        match exp {
            Some(exp) => Ok((rest, base.powi(exp))),
            None => Ok((rest, base)),
        }
    }

    fn primary<'a>(&self, input: &'a str) -> ParseResult<'a, Fraction> {
        alt((
            map(
                delimited(ws(char('(')), |i: &'a str| self.add_sub(i), ws(char(')'))),
                Fraction::absorb_constant_den,
            ),
            map(number, Fraction::constant),
            map(|i: &'a str| self.variable(i), |_| Fraction::from_poly(Polynomial::x())),
        ))(input)
    }

    fn variable<'a>(&self, input: &'a str) -> ParseResult<'a, &'a str> {
        let var = self.var;
        ws(verify(recognize(pair(alpha1, alphanumeric0)), move |s: &str| {
            s == var
        }))(input)
    }
}

fn exponent(input: &str) -> ParseResult<'_, i32> {
    alt((
        exponent_literal,
        delimited(ws(char('(')), exponent_literal, ws(char(')'))),
    ))(input)
}

fn exponent_literal(input: &str) -> ParseResult<'_, i32> {
    verify(
        map_res(ws(recognize(pair(opt(char('-')), digit1))), |s: &str| {
            s.parse::<i32>()
        }),
        |e: &i32| e.abs() <= MAX_EXPONENT,
    )(input)
}

fn number(input: &str) -> ParseResult<'_, Rational> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit1))))),
        parse_decimal,
    )(input)
}

fn parse_decimal(text: &str) -> std::result::Result<Rational, ParseBigIntError> {
    match text.split_once('.') {
        None => Ok(Rational::from_integer(text.parse()?)),
        Some((whole, frac)) => {
            let digits: BigInt = format!("{whole}{frac}").parse()?;
            let scale = num_traits::pow(BigInt::from(10), frac.len());
            Ok(Rational::new(digits, scale))
        }
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
