use pyo3::prelude::*;
use pyo3::types::PyDict;

pub struct Axes<'a> {
    ax: &'a PyAny,
}

impl<'a> Axes<'a> {
    pub fn new(ax: &'a PyAny) -> Self {
        Self { ax }
    }

    pub fn set_title(&self, title: &str) -> PyResult<()> {
        self.ax.call_method1("set_title", (title,))?;
        Ok(())
    }

    pub fn set_xlabel(&self, label: &str) -> PyResult<()> {
        self.ax.call_method1("set_xlabel", (label,))?;
        Ok(())
    }

    pub fn set_ylabel(&self, label: &str) -> PyResult<()> {
        self.ax.call_method1("set_ylabel", (label,))?;
        Ok(())
    }

    pub fn set_xticks<T>(&self, ticks: Vec<T>) -> PyResult<()>
    where
        T: IntoPy<PyObject>,
    {
        self.ax.call_method1("set_xticks", (ticks,))?;
        Ok(())
    }

    pub fn set_xticklabels<L>(&self, labels: Vec<L>) -> PyResult<()>
    where
        L: IntoPy<PyObject>,
    {
        self.ax.call_method1("set_xticklabels", (labels,))?;
        Ok(())
    }

    /// Draws one box per entry of `data` and returns the artists created, a
    /// dictionary with keys such as `boxes`, `whiskers` and `medians`.
    pub fn boxplot<T>(
        &self,
        data: Vec<Vec<T>>,
        kwargs: Option<&PyDict>,
    ) -> PyResult<&'a PyAny>
    where
        T: IntoPy<PyObject>,
    {
        self.ax.call_method("boxplot", (data,), kwargs)
    }
}
