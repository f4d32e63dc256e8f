use crate::key::GroupKey;

pub struct PlotFmt;

impl PlotFmt {
    pub fn window_xlabel() -> &'static str {
        "Window Size"
    }

    pub fn trial_xlabel() -> &'static str {
        "Trial"
    }

    pub fn throughput_ylabel() -> &'static str {
        "Throughput (kbps)"
    }

    pub fn tick_labels<'a, I>(keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a GroupKey>,
    {
        keys.into_iter().map(|key| key.to_string()).collect()
    }
}
