use crate::config::PlotSettings;
use crate::rational::{Hole, RationalFunction};

/// Samples with a larger magnitude are reported as signed infinities.
pub const PLOT_CLIP_THRESHOLD: f64 = 50.0;

/// What a renderer needs to draw a rational function over a window.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotData {
    pub x_range: (f64, f64),
    pub points: Vec<(f64, f64)>,
    pub vertical_asymptotes: Vec<f64>,
    pub horizontal_asymptote: Option<f64>,
    pub holes: Vec<Hole>,
    pub x_intercepts: Vec<f64>,
    pub y_intercept: Option<f64>,
}

impl PlotData {
    pub(crate) fn sample(
        function: &RationalFunction,
        x_range: (f64, f64),
        point_count: usize,
        clip_threshold: f64,
    ) -> Self {
        let points = linspace(x_range.0, x_range.1, point_count)
            .map(|x| (x, clip(function.evaluate(x), clip_threshold)))
            .collect();

        let (lo, hi) = if x_range.0 <= x_range.1 {
            x_range
        } else {
            (x_range.1, x_range.0)
        };
        let in_range = |x: f64| lo <= x && x <= hi;

        PlotData {
            x_range,
            points,
            vertical_asymptotes: function
                .vertical_asymptotes()
                .into_iter()
                .filter(|&x| in_range(x))
                .collect(),
            horizontal_asymptote: function.horizontal_asymptote(),
            holes: function
                .holes()
                .into_iter()
                .filter(|hole| in_range(hole.x))
                .collect(),
            x_intercepts: function
                .x_intercepts()
                .into_iter()
                .filter(|&x| in_range(x))
                .collect(),
            y_intercept: function.y_intercept().filter(|_| in_range(0.0)),
        }
    }

    /// Maximal runs of finite samples. Each run can be drawn as one polyline
    /// without crossing an asymptote.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

impl RationalFunction {
    /// [`RationalFunction::sample_for_plot`] driven by settings.
    pub fn sample_with(&self, settings: &PlotSettings) -> PlotData {
        PlotData::sample(
            self,
            (settings.x_min, settings.x_max),
            settings.point_count,
            settings.clip_threshold,
        )
    }
}

fn clip(y: f64, threshold: f64) -> f64 {
    if y.is_nan() || y.abs() <= threshold {
        y
    } else if y > 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| {
        if count > 1 && i == count - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}
