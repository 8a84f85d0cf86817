use serde::Serialize;

pub const CHART_WIDTH: f64 = 600.0;
pub const CHART_HEIGHT: f64 = 260.0;
pub const MARGIN_X: f64 = 44.0;
pub const MARGIN_TOP: f64 = 24.0;
pub const MARGIN_BOTTOM: f64 = 34.0;
pub const PLOT_WIDTH: f64 = CHART_WIDTH - MARGIN_X * 2.0;
pub const PLOT_HEIGHT: f64 = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub total: f64,
    pub points: Vec<PlotPoint>,
}

/// Labelled samples for one chart line. Labels and samples always have the
/// same length because they can only be pushed together.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricSeries {
    labels: Vec<String>,
    samples: Vec<f64>,
}

impl MetricSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, sample: f64) {
        self.labels.push(label.into());
        self.samples.push(sample);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn summarize(&self) -> TrendSummary {
        summarize(&self.samples)
    }
}

/// Sums the samples and maps them onto the chart's viewBox.
///
/// The value range always includes 0 and 1 so a flat or single-sample series
/// still has a non-zero span; larger values get smaller `y`.
pub fn summarize(samples: &[f64]) -> TrendSummary {
    let total = samples.iter().sum();
    if samples.is_empty() {
        return TrendSummary {
            total,
            points: Vec::new(),
        };
    }

    let min = samples.iter().copied().fold(0.0_f64, f64::min);
    let max = samples.iter().copied().fold(1.0_f64, f64::max);
    let range = if max == min { 1.0 } else { max - min };
    let x_step = PLOT_WIDTH / (samples.len().saturating_sub(1).max(1) as f64);

    let points = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| PlotPoint {
            x: MARGIN_X + index as f64 * x_step,
            y: MARGIN_TOP + PLOT_HEIGHT * (1.0 - (sample - min) / range),
        })
        .collect();

    TrendSummary { total, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_has_no_points() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0.0);
        assert!(summary.points.is_empty());
    }

    #[test]
    fn single_sample_sits_on_fixed_baseline() {
        let summary = summarize(&[5.0]);
        assert_eq!(summary.total, 5.0);
        assert_eq!(summary.points.len(), 1);
        let point = summary.points[0];
        assert_eq!(point.x, MARGIN_X);
        assert_eq!(point.y, MARGIN_TOP);
        assert!(point.y.is_finite());
    }

    #[test]
    fn equal_samples_collapse_to_one_line() {
        let summary = summarize(&[3.0, 3.0, 3.0]);
        assert!(summary.points.iter().all(|point| point.y == MARGIN_TOP));
    }

    #[test]
    fn all_zero_series_stays_finite() {
        let summary = summarize(&[0.0, 0.0]);
        assert_eq!(summary.total, 0.0);
        assert!(summary.points.iter().all(|point| point.y == MARGIN_TOP + PLOT_HEIGHT));
    }

    #[test]
    fn larger_values_plot_higher() {
        let summary = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(summary.total, 15.0);
        assert_eq!(summary.points.len(), 5);
        for pair in summary.points.windows(2) {
            assert!(pair[1].y < pair[0].y);
            assert!(pair[1].x > pair[0].x);
        }
        assert_eq!(summary.points[0].x, MARGIN_X);
        assert_eq!(summary.points[4].x, MARGIN_X + PLOT_WIDTH);
    }

    #[test]
    fn negative_samples_extend_the_range() {
        let summary = summarize(&[-2.0, 2.0]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.points[0].y, MARGIN_TOP + PLOT_HEIGHT);
        assert_eq!(summary.points[1].y, MARGIN_TOP);
    }

    #[test]
    fn series_keeps_labels_aligned() {
        let mut series = MetricSeries::with_capacity(2);
        series.push("01-01", 2.0);
        series.push("01-02", 4.0);
        assert_eq!(series.labels().len(), series.samples().len());
        assert_eq!(series.summarize().total, 6.0);
    }
}
