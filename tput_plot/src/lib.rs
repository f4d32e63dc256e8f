#![deny(rust_2018_idioms)]

mod boxplot;
pub mod config;
pub mod db;
pub mod fmt;
pub mod key;
#[cfg(feature = "pyo3")]
pub mod plot;

// Re-exports.
pub use boxplot::{BoxPlot, BoxSeries, BoxStyle};
pub use config::PlotConfig;
pub use db::{load_throughputs, Measurement, Throughputs, Trial};
pub use fmt::PlotFmt;
pub use key::GroupKey;

#[cfg(feature = "pyo3")]
use color_eyre::Report;
#[cfg(feature = "pyo3")]
use plot::axes::Axes;
#[cfg(feature = "pyo3")]
use plot::figure::Figure;
#[cfg(feature = "pyo3")]
use plot::pyplot::PyPlot;
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;
#[cfg(feature = "pyo3")]
use std::path::Path;

/// Turns a `PyResult` into its value, or prints the python traceback and
/// returns a `Report` from the enclosing function.
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(v) => v,
            Err(e) => {
                e.print($py);
                return Err(color_eyre::eyre::eyre!("{:?}", e));
            }
        }
    }};
}

/// Creates a `PyDict` from `(key, value)` pairs: `pydict!(py, ("dpi", 500))`.
#[macro_export]
macro_rules! pydict {
    ($py:expr, $($tup:expr),* $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        #[allow(unused_mut)]
        let mut result: pyo3::PyResult<()> = Ok(());
        $(
            if result.is_ok() {
                let (key, value) = $tup;
                result = dict.set_item(key, value);
            }
        )*
        result.map(|()| dict)
    }};
}

/// Plots the throughput in the measurement log `path`, one box per window
/// size. Returns the number of boxes drawn.
#[cfg(feature = "pyo3")]
pub fn throughput_plot(
    path: impl AsRef<Path>,
    output_file: &str,
    title: &str,
    xlabel: &str,
    ylabel: &str,
    config: &PlotConfig,
) -> Result<usize, Report> {
    let throughputs = load_throughputs(path)?;
    let plot = BoxPlot::windows(&throughputs, title, xlabel, ylabel);
    render(&plot, output_file, config)
}

/// Plots, for each trial (one per measurement log), the throughput of window
/// `optimal` with the throughput of window `baseline` overlaid. Returns the
/// number of boxes drawn.
#[allow(clippy::too_many_arguments)]
#[cfg(feature = "pyo3")]
pub fn trial_plot<P>(
    paths: &[P],
    output_file: &str,
    baseline: &GroupKey,
    optimal: &GroupKey,
    title: &str,
    xlabel: &str,
    ylabel: &str,
    config: &PlotConfig,
) -> Result<usize, Report>
where
    P: AsRef<Path>,
{
    let trials = Trial::load_all(paths)?;
    let baseline_style = BoxStyle::Filled {
        facecolor: config.baseline_color.clone(),
        alpha: config.baseline_alpha,
    };
    let plot = BoxPlot::trials(
        &trials,
        baseline,
        optimal,
        baseline_style,
        title,
        xlabel,
        ylabel,
    )?;
    render(&plot, output_file, config)
}

/// Draws `plot` on a new figure and saves it to `output_file`. The figure is
/// closed before returning, whether or not drawing succeeded.
#[cfg(feature = "pyo3")]
pub fn render(
    plot: &BoxPlot,
    output_file: &str,
    config: &PlotConfig,
) -> Result<usize, Report> {
    // start python
    let gil = Python::acquire_gil();
    let py = gil.python();
    let plt = pytry!(py, PyPlot::new(py));

    let (fig, ax) = start_plot(py, &plt)?;
    match draw(py, &plt, &ax, plot) {
        Ok(drawn) => {
            end_plot(output_file, config, py, &plt, fig)?;
            tracing::info!("saved {} boxes to {}", drawn, output_file);
            Ok(drawn)
        }
        Err(e) => {
            pytry!(py, plt.close(fig));
            Err(e)
        }
    }
}

#[cfg(feature = "pyo3")]
pub fn start_plot<'p>(
    py: Python<'p>,
    plt: &PyPlot<'p>,
) -> Result<(Figure<'p>, Axes<'p>), Report> {
    let (fig, ax) = pytry!(py, plt.subplots(None));
    let number = pytry!(py, fig.number());
    tracing::debug!("started figure {}", number);
    Ok((fig, ax))
}

/// Saves the figure and closes it; the figure is closed even if saving fails.
#[cfg(feature = "pyo3")]
pub fn end_plot(
    output_file: &str,
    config: &PlotConfig,
    py: Python<'_>,
    plt: &PyPlot<'_>,
    fig: Figure<'_>,
) -> Result<(), Report> {
    let saved = save(output_file, config, py, plt);
    pytry!(py, plt.close(fig));
    saved
}

#[cfg(feature = "pyo3")]
fn save(
    output_file: &str,
    config: &PlotConfig,
    py: Python<'_>,
    plt: &PyPlot<'_>,
) -> Result<(), Report> {
    let kwargs = pytry!(py, pydict!(py, ("dpi", config.dpi)));
    if let Some(format) = &config.format {
        pytry!(py, kwargs.set_item("format", format.as_str()));
    }
    pytry!(py, plt.savefig(output_file, Some(kwargs)));
    Ok(())
}

#[cfg(feature = "pyo3")]
fn draw(
    py: Python<'_>,
    plt: &PyPlot<'_>,
    ax: &Axes<'_>,
    plot: &BoxPlot,
) -> Result<usize, Report> {
    let positions = plot.positions();
    let mut drawn = 0;
    for series in &plot.series {
        // matplotlib can't draw an empty series at fixed positions
        if series.boxes.is_empty() {
            continue;
        }
        let kwargs = pytry!(py, pydict!(py, ("positions", positions.clone())));
        if let BoxStyle::Filled { .. } = series.style {
            // boxes are only fillable when drawn as patches
            pytry!(py, kwargs.set_item("patch_artist", true));
        }
        let artists =
            pytry!(py, ax.boxplot(series.boxes.clone(), Some(kwargs)));
        let boxes = pytry!(py, artists.get_item("boxes"));
        if let BoxStyle::Filled { facecolor, alpha } = &series.style {
            let kwargs = pytry!(
                py,
                pydict!(
                    py,
                    ("facecolor", facecolor.as_str()),
                    ("alpha", *alpha),
                )
            );
            pytry!(py, plt.setp(boxes, Some(kwargs)));
        }
        drawn += pytry!(py, boxes.len());
    }
    tracing::debug!("drew {} boxes of {}", drawn, plot.box_count());

    // set ticks (one per box position) and their labels
    pytry!(py, ax.set_xticks(positions));
    pytry!(py, ax.set_xticklabels(plot.labels.clone()));

    // set title and labels
    pytry!(py, ax.set_title(&plot.title));
    pytry!(py, ax.set_xlabel(&plot.xlabel));
    pytry!(py, ax.set_ylabel(&plot.ylabel));
    Ok(drawn)
}
