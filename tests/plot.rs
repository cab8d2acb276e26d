use ratfunc::{PlotSettings, RationalFunction, PLOT_CLIP_THRESHOLD};

fn f(num: &[i64], den: &[i64]) -> RationalFunction {
    RationalFunction::from_integers(num, den).expect("valid rational function")
}

#[test]
fn samples_cover_the_inclusive_range() {
    let plot = f(&[1, 0], &[1]).sample_for_plot((-2.0, 2.0), 5);
    let xs: Vec<f64> = plot.points.iter().map(|p| p.0).collect();
    assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(plot.x_range, (-2.0, 2.0));
}

#[test]
fn degenerate_point_counts() {
    let rf = f(&[1], &[1, 1]);
    assert!(rf.sample_for_plot((-1.0, 1.0), 0).points.is_empty());
    let single = rf.sample_for_plot((3.0, 5.0), 1);
    assert_eq!(single.points.len(), 1);
    assert_eq!(single.points[0].0, 3.0);
}

#[test]
fn large_values_are_clipped_to_infinity() {
    // 1/x sampled so that one point lands very close to the pole
    let rf = f(&[1], &[1, 0]);
    let plot = rf.sample_for_plot((-0.01, 0.01), 3);
    assert_eq!(plot.points[0].1, f64::NEG_INFINITY);
    assert!(plot.points[1].1.is_infinite());
    assert_eq!(plot.points[2].1, f64::INFINITY);
    assert!(plot.points.iter().all(|&(_, y)| y.is_infinite() || y.abs() <= PLOT_CLIP_THRESHOLD));
}

#[test]
fn clipping_does_not_touch_evaluate() {
    let rf = f(&[1], &[1, 0]);
    assert_eq!(rf.evaluate(0.01), 100.0);
}

#[test]
fn features_are_filtered_to_the_window() {
    // (x - 4)/((x + 1)(x - 6))
    let rf = f(&[1, -4], &[1, -5, -6]);
    let plot = rf.sample_for_plot((-3.0, 3.0), 61);
    assert_eq!(plot.vertical_asymptotes, vec![-1.0]);
    assert!(plot.x_intercepts.is_empty());
    assert_eq!(plot.horizontal_asymptote, Some(0.0));
    assert!(plot.y_intercept.is_some());

    let right = rf.sample_for_plot((1.0, 10.0), 10);
    assert_eq!(right.vertical_asymptotes, vec![6.0]);
    assert_eq!(right.x_intercepts, vec![4.0]);
    assert_eq!(right.y_intercept, None);
}

#[test]
fn holes_inside_the_window_are_reported() {
    let rf = f(&[1, 0, -1], &[1, -1]);
    let plot = rf.sample_for_plot((-5.0, 5.0), 11);
    assert_eq!(plot.holes.len(), 1);
    assert_eq!(plot.holes[0].x, 1.0);
    assert!(rf.sample_for_plot((2.0, 5.0), 11).holes.is_empty());
}

#[test]
fn segments_split_at_asymptotes() {
    let rf = f(&[1], &[1, 0]);
    let plot = rf.sample_for_plot((-1.0, 1.0), 201);
    let segments = plot.segments();
    assert_eq!(segments.len(), 2);
    assert!(segments[0].iter().all(|&(x, _)| x < 0.0));
    assert!(segments[1].iter().all(|&(x, _)| x > 0.0));
}

#[test]
fn settings_drive_sampling() {
    let settings = PlotSettings {
        x_min: 0.0,
        x_max: 1.0,
        point_count: 3,
        clip_threshold: 0.5,
        ..PlotSettings::default()
    };
    let plot = f(&[1, 0], &[1]).sample_with(&settings);
    let ys: Vec<f64> = plot.points.iter().map(|p| p.1).collect();
    assert_eq!(ys, vec![0.0, 0.5, f64::INFINITY]);
}
