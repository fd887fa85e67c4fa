use pyo3::prelude::*;

pub(crate) mod metrics;

pub(crate) struct WrappedError(evalml_core::error::Error);

impl From<evalml_core::error::Error> for WrappedError {
    fn from(err: evalml_core::error::Error) -> WrappedError {
        WrappedError(err)
    }
}

impl From<WrappedError> for PyErr {
    fn from(err: WrappedError) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", err.0))
    }
}

#[pymodule]
fn _evalml(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<metrics::WrappedPrecision>()?;
    m.add_function(wrap_pyfunction!(metrics::list_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(metrics::evaluate, m)?)?;
    Ok(())
}
