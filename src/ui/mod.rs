//! String-based helpers for quick usage and rendering.

mod summary;

use crate::error::Result;
use crate::parser::parse_function;
use crate::rational::RationalFunction;

pub use summary::summary;

pub fn analyze(input: &str) -> Result<RationalFunction> {
    parse_function(input)
}

/// Parses `input` and describes its graph, one feature per line.
pub fn report(input: &str) -> Result<Vec<String>> {
    Ok(summary(&analyze(input)?))
}

pub fn simp(input: &str) -> Result<String> {
    Ok(analyze(input)?.simplified().to_display_string())
}

pub fn latex(input: &str) -> Result<String> {
    Ok(analyze(input)?.to_latex())
}

pub fn fraction(input: &str) -> Result<String> {
    Ok(analyze(input)?.to_formatted_expression())
}
