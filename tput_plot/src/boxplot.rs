use crate::db::{Throughputs, Trial};
use crate::fmt::PlotFmt;
use crate::key::GroupKey;
use color_eyre::Report;

#[derive(Debug, Clone, PartialEq)]
pub enum BoxStyle {
    Plain,
    Filled { facecolor: String, alpha: f64 },
}

/// One `boxplot` call: a box per tick, in tick order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    pub boxes: Vec<Vec<f64>>,
    pub style: BoxStyle,
}

/// Everything needed to draw a figure of box plots sharing one x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub labels: Vec<String>,
    pub series: Vec<BoxSeries>,
}

impl BoxPlot {
    /// One box per window size, in ascending window size order.
    pub fn windows(
        throughputs: &Throughputs,
        title: &str,
        xlabel: &str,
        ylabel: &str,
    ) -> Self {
        let labels = PlotFmt::tick_labels(throughputs.keys());
        let boxes = throughputs
            .iter()
            .map(|(_, samples)| samples.clone())
            .collect();
        let series = BoxSeries {
            boxes,
            style: BoxStyle::Plain,
        };
        Self::new(title, xlabel, ylabel, labels, vec![series])
    }

    /// Two overlaid boxes per trial: window `optimal` and, on top of it,
    /// window `baseline` drawn with `baseline_style`. Trials are shown in name
    /// order.
    pub fn trials(
        trials: &[Trial],
        baseline: &GroupKey,
        optimal: &GroupKey,
        baseline_style: BoxStyle,
        title: &str,
        xlabel: &str,
        ylabel: &str,
    ) -> Result<Self, Report> {
        let mut trials: Vec<_> =
            trials.iter().map(|trial| (trial.key(), trial)).collect();
        trials.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut optimal_boxes = Vec::with_capacity(trials.len());
        let mut baseline_boxes = Vec::with_capacity(trials.len());
        for (_, trial) in &trials {
            optimal_boxes.push(trial.window(optimal)?.clone());
            baseline_boxes.push(trial.window(baseline)?.clone());
        }

        let labels = PlotFmt::tick_labels(trials.iter().map(|(key, _)| key));
        let series = vec![
            BoxSeries {
                boxes: optimal_boxes,
                style: BoxStyle::Plain,
            },
            BoxSeries {
                boxes: baseline_boxes,
                style: baseline_style,
            },
        ];
        Ok(Self::new(title, xlabel, ylabel, labels, series))
    }

    fn new(
        title: &str,
        xlabel: &str,
        ylabel: &str,
        labels: Vec<String>,
        series: Vec<BoxSeries>,
    ) -> Self {
        Self {
            title: title.to_string(),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            labels,
            series,
        }
    }

    /// x positions of the boxes (matplotlib's default: `1..=N`).
    pub fn positions(&self) -> Vec<usize> {
        (1..=self.labels.len()).collect()
    }

    /// Total number of boxes across all series.
    pub fn box_count(&self) -> usize {
        self.series.iter().map(|series| series.boxes.len()).sum()
    }
}
