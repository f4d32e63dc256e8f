use crate::plot::axes::Axes;
use crate::plot::figure::Figure;
use pyo3::prelude::*;
use pyo3::types::PyDict;

// figures are only ever written to files
const BACKEND: &str = "Agg";

pub struct PyPlot<'p> {
    plt: &'p PyModule,
}

impl<'p> PyPlot<'p> {
    pub fn new(py: Python<'p>) -> PyResult<Self> {
        // the backend must be selected before `pyplot` is imported
        let matplotlib = PyModule::import(py, "matplotlib")?;
        matplotlib.getattr("use")?.call1((BACKEND,))?;
        let plt = PyModule::import(py, "matplotlib.pyplot")?;
        Ok(Self { plt })
    }

    pub fn subplots(
        &self,
        kwargs: Option<&PyDict>,
    ) -> PyResult<(Figure<'p>, Axes<'p>)> {
        // check that `ncols` and `nrows` was not set: a single axes is returned
        if let Some(kwargs) = kwargs {
            assert_eq!(
                kwargs.get_item("ncols"),
                None,
                "ncols shouldn't be set in `PyPlot::subplots`"
            );
            assert_eq!(
                kwargs.get_item("nrows"),
                None,
                "nrows shouldn't be set in `PyPlot::subplots`"
            );
        }
        let result = self.plt.getattr("subplots")?.call((), kwargs)?;
        let (fig, ax): (&PyAny, &PyAny) = result.extract()?;
        Ok((Figure::new(fig), Axes::new(ax)))
    }

    pub fn setp(
        &self,
        artists: &PyAny,
        kwargs: Option<&PyDict>,
    ) -> PyResult<()> {
        self.plt.getattr("setp")?.call((artists,), kwargs)?;
        Ok(())
    }

    pub fn savefig(&self, path: &str, kwargs: Option<&PyDict>) -> PyResult<()> {
        self.plt.getattr("savefig")?.call((path,), kwargs)?;
        Ok(())
    }

    pub fn close(&self, figure: Figure<'_>) -> PyResult<()> {
        self.plt.getattr("close")?.call1((figure.fig(),))?;
        Ok(())
    }

    /// Number of figures currently open.
    pub fn open_figures(&self) -> PyResult<usize> {
        self.plt.getattr("get_fignums")?.call0()?.len()
    }
}
