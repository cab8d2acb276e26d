use crate::format::format_number;
use crate::rational::{Hole, RationalFunction};

/// Render the features of a function as human-readable lines for CLI/demos.
pub fn summary(function: &RationalFunction) -> Vec<String> {
    let mut lines = vec![function.to_display_string()];

    if !function.common_factor().is_constant() {
        lines.push(format!("Simplified: {}", function.simplified().to_display_string()));
    }

    lines.push(format!(
        "Vertical asymptotes: {}",
        list_or_none(&function.vertical_asymptotes(), |x| format!("x = {}", format_number(x)))
    ));
    lines.push(format!(
        "Horizontal asymptote: {}",
        match function.horizontal_asymptote() {
            Some(h) => format!("y = {}", format_number(h)),
            None => "none".to_string(),
        }
    ));
    lines.push(format!("Holes: {}", list_or_none(&function.holes(), show_hole)));
    lines.push(format!(
        "x-intercepts: {}",
        list_or_none(&function.x_intercepts(), |x| format!("({}, 0)", format_number(x)))
    ));
    lines.push(format!(
        "y-intercept: {}",
        match function.y_intercept() {
            Some(y) => format!("(0, {})", format_number(y)),
            None => "none".to_string(),
        }
    ));
    lines.push(format!("End behavior: {}", function.end_behavior()));
    lines
}

fn show_hole(hole: Hole) -> String {
    format!("({}, {})", format_number(hole.x), format_number(hole.y))
}

fn list_or_none<T: Copy>(items: &[T], show: impl Fn(T) -> String) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items.iter().map(|&item| show(item)).collect::<Vec<_>>().join(", ")
}
