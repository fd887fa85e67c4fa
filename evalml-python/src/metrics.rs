use pyo3::{prelude::*, types::PyDict};
use pythonize::{depythonize, pythonize};

use evalml_core::{
    evaluation::{Evaluation, EvaluationConfig},
    metrics::{Metric, PrecisionConfig, PrecisionMetric, METRIC_REGISTRY},
    Average, ClassLabel, ZeroDivision,
};

use crate::WrappedError;

#[pyclass]
#[pyo3(name = "Precision")]
#[derive(Default)]
pub(crate) struct WrappedPrecision(PrecisionMetric);

#[pymethods]
impl WrappedPrecision {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Description, inputs documentation, features and reference urls.
    fn info(&self, py: Python) -> PyResult<PyObject> {
        Ok(pythonize(py, &self.0.info())?)
    }

    /// `average=None` returns one score per label.
    #[pyo3(signature = (
        predictions,
        references,
        labels=None,
        pos_label=1,
        average="binary",
        sample_weight=None,
        zero_division=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn compute(
        &self,
        py: Python,
        predictions: Vec<ClassLabel>,
        references: Vec<ClassLabel>,
        labels: Option<Vec<ClassLabel>>,
        pos_label: ClassLabel,
        average: Option<&str>,
        sample_weight: Option<Vec<f64>>,
        zero_division: Option<&PyAny>,
    ) -> PyResult<PyObject> {
        let average = match average {
            Some(average) => average.parse::<Average>().map_err(WrappedError::from)?,
            None => Average::None,
        };
        let zero_division = match zero_division {
            Some(value) => value
                .str()?
                .to_str()?
                .parse::<ZeroDivision>()
                .map_err(WrappedError::from)?,
            None => ZeroDivision::default(),
        };

        let mut config = PrecisionConfig::default()
            .with_pos_label(pos_label)
            .with_average(average)
            .with_zero_division(zero_division);
        config.labels = labels;
        config.sample_weight = sample_weight;

        let output = py
            .allow_threads(|| self.0.compute_precision(&predictions, &references, &config))
            .map_err(WrappedError::from)?;
        Ok(pythonize(py, &output)?)
    }

    fn __repr__(&self) -> String {
        format!("Precision(name={:?})", self.0.typename())
    }
}

#[pyfunction]
pub(crate) fn list_metrics() -> Vec<String> {
    METRIC_REGISTRY.read().names()
}

/// Computes any registered metric. `config` holds its keyword arguments in camelCase.
#[pyfunction]
#[pyo3(signature = (metric, predictions, references, config=None))]
pub(crate) fn evaluate(
    py: Python,
    metric: &str,
    predictions: Vec<ClassLabel>,
    references: Vec<ClassLabel>,
    config: Option<&PyDict>,
) -> PyResult<PyObject> {
    let config: serde_json::Value = match config {
        Some(config) => depythonize(config)?,
        None => serde_json::json!({}),
    };
    let mut evaluation =
        Evaluation::new(EvaluationConfig::new(metric, config)).map_err(WrappedError::from)?;
    evaluation.add_batch(&predictions, &references);
    let output = py
        .allow_threads(|| evaluation.compute())
        .map_err(WrappedError::from)?;
    Ok(pythonize(py, &output)?)
}
