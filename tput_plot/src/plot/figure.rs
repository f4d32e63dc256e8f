use pyo3::prelude::*;

// https://matplotlib.org/stable/api/figure_api.html#matplotlib.figure.Figure
pub struct Figure<'a> {
    fig: &'a PyAny,
}

impl<'a> Figure<'a> {
    pub fn new(fig: &'a PyAny) -> Self {
        Self { fig }
    }

    pub fn fig(&self) -> &PyAny {
        self.fig
    }

    /// Number pyplot uses to track this figure while it's open.
    pub fn number(&self) -> PyResult<usize> {
        self.fig.getattr("number")?.extract()
    }
}
