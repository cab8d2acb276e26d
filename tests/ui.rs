use ratfunc::prelude::{analyze, fraction, latex, report, simp, summary};

#[test]
fn report_lists_every_feature() {
    let lines = report("(x^2 - 1)/(x - 1)").expect("report");
    assert_eq!(
        lines,
        vec![
            "f(x) = (x^2 - 1) / (x - 1)",
            "Simplified: f(x) = (x + 1) / (1)",
            "Vertical asymptotes: none",
            "Horizontal asymptote: none",
            "Holes: (1, 2)",
            "x-intercepts: (-1, 0)",
            "y-intercept: (0, 1)",
            "End behavior: approaches +infinity",
        ]
    );
}

#[test]
fn summary_without_common_factor() {
    let function = analyze("1/(x^2 - 4)").expect("analyze");
    let lines = summary(&function);
    assert_eq!(lines[0], "f(x) = (1) / (x^2 - 4)");
    assert!(!lines.iter().any(|l| l.starts_with("Simplified")));
    assert!(lines.contains(&"Vertical asymptotes: x = -2, x = 2".to_string()));
    assert!(lines.contains(&"Horizontal asymptote: y = 0".to_string()));
    assert!(lines.contains(&"y-intercept: (0, -0.25)".to_string()));
    assert!(lines.contains(&"End behavior: approaches 0".to_string()));
}

#[test]
fn string_helpers() {
    assert_eq!(simp("(x^2 - 4)/(x - 2)").expect("simp"), "f(x) = (x + 2) / (1)");
    assert_eq!(latex("2x/(x + 1)").expect("latex"), "f(x) = \\frac{2x}{x + 1}");
    assert_eq!(fraction("1/x").expect("fraction").lines().count(), 3);
    assert!(report("x +").is_err());
}
