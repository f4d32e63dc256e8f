use crate::db::{self, Throughputs};
use crate::key::GroupKey;
use color_eyre::eyre;
use color_eyre::Report;
use std::collections::BTreeMap;
use std::path::Path;

/// The throughputs of one measurement log, named after its file.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub name: String,
    pub throughputs: Throughputs,
}

impl Trial {
    pub fn new(name: impl Into<String>, throughputs: Throughputs) -> Self {
        Self {
            name: name.into(),
            throughputs,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let name = Self::name_from_path(path)?;
        let throughputs = db::load_throughputs(path)?;
        Ok(Self::new(name, throughputs))
    }

    /// Key of this trial on the x-axis of a trial plot.
    pub fn key(&self) -> GroupKey {
        GroupKey::label(self.name.as_str())
    }

    /// Loads one trial per path, sorted by name.
    pub fn load_all<P>(paths: &[P]) -> Result<Vec<Self>, Report>
    where
        P: AsRef<Path>,
    {
        let mut trials = BTreeMap::new();
        for path in paths {
            let trial = Self::load(path)?;
            let key = trial.key();
            if trials.contains_key(&key) {
                eyre::bail!(
                    "more than one measurement log for trial {} ({})",
                    trial.name,
                    path.as_ref().display()
                );
            }
            trials.insert(key, trial);
        }
        Ok(trials.into_values().collect())
    }

    /// The trial name is the file name up to its first dot: both `a.log` and
    /// `dir/a.tsv.old` name trial `a`.
    pub fn name_from_path(path: impl AsRef<Path>) -> Result<String, Report> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                eyre::eyre!("no trial name in path {}", path.display())
            })?;
        let name = file_name.split('.').next().unwrap_or(file_name);
        if name.is_empty() {
            eyre::bail!("empty trial name in path {}", path.display());
        }
        Ok(name.to_string())
    }

    /// Samples of window `window`.
    pub fn window(&self, window: &GroupKey) -> Result<&Vec<f64>, Report> {
        self.throughputs.get(window).ok_or_else(|| {
            eyre::eyre!(
                "trial {} has no window size {} group",
                self.name,
                window
            )
        })
    }
}
