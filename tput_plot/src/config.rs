use crate::fmt::PlotFmt;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::path::Path;

// resolution of every saved figure
const DPI: usize = 500;

// stop-and-wait is a window of size 1
const BASELINE_WINDOW: f64 = 1f64;

// style of the baseline boxes in trial plots
const BASELINE_COLOR: &str = "cyan";
const BASELINE_ALPHA: f64 = 0.5;

/// Rendering settings. Every field has a default, so a configuration file only
/// needs to list the ones it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub dpi: usize,
    /// image format; if not set, it's inferred from the output file extension
    pub format: Option<String>,
    pub baseline_window: f64,
    pub baseline_color: String,
    pub baseline_alpha: f64,
    pub window_xlabel: String,
    pub trial_xlabel: String,
    pub ylabel: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            dpi: DPI,
            format: None,
            baseline_window: BASELINE_WINDOW,
            baseline_color: String::from(BASELINE_COLOR),
            baseline_alpha: BASELINE_ALPHA,
            window_xlabel: PlotFmt::window_xlabel().to_string(),
            trial_xlabel: PlotFmt::trial_xlabel().to_string(),
            ylabel: PlotFmt::throughput_ylabel().to_string(),
        }
    }
}

impl PlotConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("open config {}", path.display()))?;
        let buf = std::io::BufReader::new(file);
        let config = serde_json::from_reader(buf)
            .wrap_err_with(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: PlotConfig =
            serde_json::from_str(r#"{ "dpi": 100, "format": "pdf" }"#)
                .unwrap();
        assert_eq!(config.dpi, 100);
        assert_eq!(config.format.as_deref(), Some("pdf"));
        assert_eq!(config.baseline_window, 1f64);
        assert_eq!(config.baseline_color, "cyan");
        assert_eq!(config.ylabel, "Throughput (kbps)");
    }

    #[test]
    fn empty_config_is_default() {
        let config: PlotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.dpi, 500);
    }
}
